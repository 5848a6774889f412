//! Production `SystemInfoProvider` backed by `/proc` and `/sys`.

use std::path::{Path, PathBuf};

use crate::collector::procfs::parser::{
    parse_cpu_list, parse_cpu_model, parse_meminfo, parse_stat_cpu_count, parse_uptime_minutes,
};
use crate::collector::traits::FileSystem;
use crate::provider::{CpuCounts, MemoryStats, ProviderError, SystemInfoProvider};

/// Reads the six report metrics from the kernel's virtual filesystems.
///
/// Base paths are constructor parameters so tests can point the provider at
/// a [`MockFs`](crate::collector::MockFs) tree.
pub struct ProcProvider<F: FileSystem> {
    fs: F,
    proc_path: PathBuf,
    sys_path: PathBuf,
}

impl<F: FileSystem> ProcProvider<F> {
    /// Creates a provider over the given filesystem and base paths
    /// (usually `/proc` and `/sys`).
    pub fn new(fs: F, proc_path: impl Into<PathBuf>, sys_path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
            sys_path: sys_path.into(),
        }
    }

    fn read_proc(&self, rel: &str) -> Result<String, ProviderError> {
        self.read(&self.proc_path.join(rel))
    }

    fn read(&self, path: &Path) -> Result<String, ProviderError> {
        self.fs
            .read_to_string(path)
            .map_err(|e| ProviderError::Io(format!("{}: {}", path.display(), e)))
    }
}

impl<F: FileSystem> SystemInfoProvider for ProcProvider<F> {
    fn hostname(&self) -> Result<String, ProviderError> {
        Ok(self.read_proc("sys/kernel/hostname")?.trim().to_string())
    }

    fn kernel_release(&self) -> Result<String, ProviderError> {
        Ok(self.read_proc("sys/kernel/osrelease")?.trim().to_string())
    }

    fn cpu_model(&self) -> Result<String, ProviderError> {
        let content = self.read_proc("cpuinfo")?;
        parse_cpu_model(&content).map_err(|e| ProviderError::Parse(e.message))
    }

    fn cpu_counts(&self) -> Result<CpuCounts, ProviderError> {
        let online_list = self.read(&self.sys_path.join("devices/system/cpu/online"))?;
        let online = parse_cpu_list(&online_list).map_err(|e| ProviderError::Parse(e.message))?;

        let stat = self.read_proc("stat")?;
        let active = parse_stat_cpu_count(&stat).map_err(|e| ProviderError::Parse(e.message))?;

        Ok(CpuCounts { online, active })
    }

    fn memory(&self) -> Result<MemoryStats, ProviderError> {
        let content = self.read_proc("meminfo")?;
        let info = parse_meminfo(&content).map_err(|e| ProviderError::Parse(e.message))?;
        Ok(MemoryStats {
            free_kb: info.free_kb,
            total_kb: info.total_kb,
        })
    }

    fn uptime_minutes(&self) -> Result<u64, ProviderError> {
        let content = self.read_proc("uptime")?;
        parse_uptime_minutes(&content).map_err(|e| ProviderError::Parse(e.message))
    }

    fn process_count(&self) -> Result<u32, ProviderError> {
        let entries = self
            .fs
            .read_dir(&self.proc_path)
            .map_err(|e| ProviderError::Io(format!("{}: {}", self.proc_path.display(), e)))?;

        // Every numeric directory under /proc is one live process.
        let count = entries
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .filter(|name| !name.is_empty() && name.chars().all(|c| c.is_ascii_digit()))
            .count();
        Ok(count as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::MockFs;

    fn provider() -> ProcProvider<MockFs> {
        ProcProvider::new(MockFs::basic_host(), "/proc", "/sys")
    }

    #[test]
    fn test_hostname_and_release_trimmed() {
        let p = provider();
        assert_eq!(p.hostname().unwrap(), "tux-dev");
        assert_eq!(p.kernel_release().unwrap(), "6.6.13-mock");
    }

    #[test]
    fn test_cpu_model() {
        assert_eq!(
            provider().cpu_model().unwrap(),
            "Intel(R) Core(TM) i7-8650U CPU @ 1.90GHz"
        );
    }

    #[test]
    fn test_cpu_counts() {
        assert_eq!(
            provider().cpu_counts().unwrap(),
            CpuCounts {
                online: 4,
                active: 4
            }
        );
    }

    #[test]
    fn test_memory() {
        assert_eq!(
            provider().memory().unwrap(),
            MemoryStats {
                free_kb: 8192000,
                total_kb: 16384000
            }
        );
    }

    #[test]
    fn test_uptime_minutes() {
        assert_eq!(provider().uptime_minutes().unwrap(), 120);
    }

    #[test]
    fn test_process_count_ignores_non_numeric() {
        // basic_host has /proc/1, /proc/2, /proc/42 plus self/sys noise.
        assert_eq!(provider().process_count().unwrap(), 3);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let mut fs = MockFs::basic_host();
        fs.remove_file("/proc/uptime");
        let p = ProcProvider::new(fs, "/proc", "/sys");
        assert!(matches!(p.uptime_minutes(), Err(ProviderError::Io(_))));
    }
}
