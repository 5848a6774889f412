//! Collection of raw host metrics for the report service.
//!
//! Everything here reads through the [`FileSystem`] trait so the same code
//! runs against the real `/proc` and `/sys` trees on Linux, or against an
//! in-memory [`MockFs`] in tests and on other platforms.

pub mod mock;
pub mod procfs;
pub mod traits;

pub use mock::MockFs;
pub use procfs::ProcProvider;
pub use traits::{FileSystem, RealFs};
