//! Mock filesystem implementations for testing.
//!
//! Provides `MockFs` and a pre-built host scenario for exercising the
//! provider without actual Linux `/proc` or `/sys` access.

mod filesystem;
mod scenarios;

pub use filesystem::MockFs;
