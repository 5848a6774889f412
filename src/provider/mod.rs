//! Provider abstraction for raw host metrics.
//!
//! The `SystemInfoProvider` trait is the seam between the report service and
//! the platform: the service never touches `/proc` itself, it only orders,
//! filters, and formats what a provider returns. The production provider is
//! [`ProcProvider`](crate::collector::ProcProvider); tests substitute their
//! own implementations.

use tracing::warn;

/// Error types that can occur while producing a single metric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// I/O error while reading a source file.
    Io(String),
    /// Error parsing a source file.
    Parse(String),
    /// The platform does not expose this metric at all.
    Unsupported(&'static str),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::Io(msg) => write!(f, "I/O error: {}", msg),
            ProviderError::Parse(msg) => write!(f, "parse error: {}", msg),
            ProviderError::Unsupported(what) => write!(f, "{} not supported here", what),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Online and active CPU counts, as reported by the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuCounts {
    pub online: u32,
    pub active: u32,
}

/// Free and total physical memory in KiB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryStats {
    pub free_kb: u64,
    pub total_kb: u64,
}

/// Source of the six raw metrics plus the host name.
///
/// Every accessor is synchronous, side-effect-free from the caller's point of
/// view, and individually fallible: one missing metric must not take down the
/// rest of a report.
pub trait SystemInfoProvider {
    /// Host name, as the kernel knows it.
    fn hostname(&self) -> Result<String, ProviderError>;

    /// Kernel/OS release string, verbatim.
    fn kernel_release(&self) -> Result<String, ProviderError>;

    /// CPU model string, verbatim.
    fn cpu_model(&self) -> Result<String, ProviderError>;

    /// Online and active CPU counts.
    fn cpu_counts(&self) -> Result<CpuCounts, ProviderError>;

    /// Free and total physical memory.
    fn memory(&self) -> Result<MemoryStats, ProviderError>;

    /// Whole minutes since boot.
    fn uptime_minutes(&self) -> Result<u64, ProviderError>;

    /// Number of live processes at the time of the call. Not atomic with
    /// respect to process creation/teardown; a best-effort count.
    fn process_count(&self) -> Result<u32, ProviderError>;
}

/// One read's worth of metrics, captured fresh per call and discarded after
/// formatting.
///
/// Each field is `None` when its accessor failed; rendering degrades that
/// field to an explicit marker instead of aborting the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemSnapshot {
    pub hostname: Option<String>,
    pub release: Option<String>,
    pub cpu_model: Option<String>,
    pub cpus: Option<CpuCounts>,
    pub memory: Option<MemoryStats>,
    pub uptime_minutes: Option<u64>,
    pub processes: Option<u32>,
}

impl SystemSnapshot {
    /// Captures a fresh snapshot from the provider.
    ///
    /// Accessor failures are logged and turn into `None` fields; capture
    /// itself never fails.
    pub fn capture<P: SystemInfoProvider + ?Sized>(provider: &P) -> Self {
        Self {
            hostname: metric("hostname", provider.hostname()),
            release: metric("release", provider.kernel_release()),
            cpu_model: metric("cpu_model", provider.cpu_model()),
            cpus: metric("cpu_counts", provider.cpu_counts()),
            memory: metric("memory", provider.memory()),
            uptime_minutes: metric("uptime", provider.uptime_minutes()),
            processes: metric("process_count", provider.process_count()),
        }
    }
}

fn metric<T>(name: &str, result: Result<T, ProviderError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(metric = name, error = %e, "metric unavailable, degrading");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingProvider;

    impl SystemInfoProvider for FailingProvider {
        fn hostname(&self) -> Result<String, ProviderError> {
            Ok("box".to_string())
        }
        fn kernel_release(&self) -> Result<String, ProviderError> {
            Err(ProviderError::Io("no osrelease".to_string()))
        }
        fn cpu_model(&self) -> Result<String, ProviderError> {
            Err(ProviderError::Unsupported("cpu model"))
        }
        fn cpu_counts(&self) -> Result<CpuCounts, ProviderError> {
            Ok(CpuCounts {
                online: 2,
                active: 2,
            })
        }
        fn memory(&self) -> Result<MemoryStats, ProviderError> {
            Err(ProviderError::Parse("bad meminfo".to_string()))
        }
        fn uptime_minutes(&self) -> Result<u64, ProviderError> {
            Ok(5)
        }
        fn process_count(&self) -> Result<u32, ProviderError> {
            Ok(17)
        }
    }

    #[test]
    fn test_capture_degrades_per_field() {
        let snap = SystemSnapshot::capture(&FailingProvider);
        assert_eq!(snap.hostname.as_deref(), Some("box"));
        assert_eq!(snap.release, None);
        assert_eq!(snap.cpu_model, None);
        assert_eq!(
            snap.cpus,
            Some(CpuCounts {
                online: 2,
                active: 2
            })
        );
        assert_eq!(snap.memory, None);
        assert_eq!(snap.uptime_minutes, Some(5));
        assert_eq!(snap.processes, Some(17));
    }
}
