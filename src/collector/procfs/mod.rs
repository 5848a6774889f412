//! Readers for the Linux `/proc` and `/sys` virtual filesystems.

pub mod parser;
pub mod system;

pub use system::ProcProvider;
