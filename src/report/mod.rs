//! Report configuration and rendering.
//!
//! A report is driven by a six-bit [`ReportMask`] selecting which fields
//! appear, and rendered by [`ReportFormatter`] into a fixed eight-line,
//! logo-aligned text block.

pub mod format;
pub mod mask;

pub use format::{DEFAULT_CEILING, LOGO, RenderError, ReportFormatter, UNAVAILABLE};
pub use mask::{CONFIG_WORD_LEN, Field, MalformedConfig, ReportMask};
