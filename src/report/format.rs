//! Renders a snapshot into the fixed eight-line, logo-aligned report.

use crate::provider::SystemSnapshot;
use crate::report::mask::{Field, ReportMask};

/// The decorative logo, one entry per output line.
///
/// Its length is locked to the header plus the field count: adding a report
/// field requires adding a logo line in the same change.
pub const LOGO: [&str; HEADER_LINES + Field::COUNT] = [
    "        a8888b.     ",
    "       d888888b.    ",
    "       8P\"YP\"Y88    ",
    "       8|o||o|88    ",
    "       8'    .88    ",
    "       8`._.' Y8.   ",
    "      d/      `8b.  ",
    "     dP   .    Y8b  ",
];

/// Unconditional lines at the top of every report: host name and separator.
pub const HEADER_LINES: usize = 2;

/// Default output size ceiling in bytes.
pub const DEFAULT_CEILING: usize = 8000;

/// Marker rendered in place of a metric the provider could not produce.
pub const UNAVAILABLE: &str = "unavailable";

/// Rendered output would exceed the configured byte ceiling.
///
/// The bound is a fail-fast error, never a silent truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderError {
    /// Bytes the report would have needed.
    pub needed: usize,
    /// Configured ceiling.
    pub ceiling: usize,
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "rendered report needs {} bytes, ceiling is {}",
            self.needed, self.ceiling
        )
    }
}

impl std::error::Error for RenderError {}

/// Renders snapshots into the fixed report layout.
///
/// Output is always exactly `LOGO.len()` lines: the host-name line, a dash
/// separator sized to the host name, one line per enabled field in
/// [`Field::ORDER`], then bare logo lines to fill out the block.
#[derive(Debug, Clone, Copy)]
pub struct ReportFormatter {
    ceiling: usize,
}

impl ReportFormatter {
    /// Formatter with the default byte ceiling.
    pub fn new() -> Self {
        Self::with_ceiling(DEFAULT_CEILING)
    }

    /// Formatter with an explicit byte ceiling.
    pub fn with_ceiling(ceiling: usize) -> Self {
        Self { ceiling }
    }

    /// Renders one report. Deterministic for a given mask and snapshot.
    pub fn render(
        &self,
        mask: ReportMask,
        snapshot: &SystemSnapshot,
    ) -> Result<String, RenderError> {
        let hostname = snapshot.hostname.as_deref().unwrap_or(UNAVAILABLE);
        let dashes = "-".repeat(hostname.chars().count());

        let mut out = String::new();
        let mut cursor = 0usize;

        self.push_line(&mut out, LOGO[cursor], Some(hostname))?;
        cursor += 1;
        self.push_line(&mut out, LOGO[cursor], Some(&dashes))?;
        cursor += 1;

        for field in Field::ORDER {
            if !mask.is_set(field) {
                continue;
            }
            // Cannot overrun: 2 header lines + 6 fields == LOGO.len().
            let text = format!("{}\t{}", field.label(), field_value(field, snapshot));
            self.push_line(&mut out, LOGO[cursor], Some(&text))?;
            cursor += 1;
        }

        while cursor < LOGO.len() {
            self.push_line(&mut out, LOGO[cursor], None)?;
            cursor += 1;
        }

        Ok(out)
    }

    fn push_line(
        &self,
        out: &mut String,
        logo: &str,
        text: Option<&str>,
    ) -> Result<(), RenderError> {
        let needed = out.len() + logo.len() + text.map_or(0, |t| t.len() + 1) + 1;
        if needed > self.ceiling {
            return Err(RenderError {
                needed,
                ceiling: self.ceiling,
            });
        }
        out.push_str(logo);
        if let Some(text) = text {
            out.push('\t');
            out.push_str(text);
        }
        out.push('\n');
        Ok(())
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn field_value(field: Field, snapshot: &SystemSnapshot) -> String {
    match field {
        Field::Release => snapshot
            .release
            .clone()
            .unwrap_or_else(|| UNAVAILABLE.to_string()),
        Field::CpuModel => snapshot
            .cpu_model
            .clone()
            .unwrap_or_else(|| UNAVAILABLE.to_string()),
        Field::CpuCount => match snapshot.cpus {
            Some(c) => format!("{} / {}", c.online, c.active),
            None => UNAVAILABLE.to_string(),
        },
        Field::Memory => match snapshot.memory {
            Some(m) => format!("{} MB / {} MB", m.free_kb / 1024, m.total_kb / 1024),
            None => UNAVAILABLE.to_string(),
        },
        Field::Uptime => match snapshot.uptime_minutes {
            Some(mins) => format!("{} mins", mins),
            None => UNAVAILABLE.to_string(),
        },
        Field::ProcessCount => match snapshot.processes {
            Some(n) => n.to_string(),
            None => UNAVAILABLE.to_string(),
        },
    }
}
