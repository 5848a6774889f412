//! Pre-built mock filesystem scenarios for testing.

use super::filesystem::MockFs;

impl MockFs {
    /// Creates a small but complete host: four CPUs, 16 GB of RAM,
    /// two hours of uptime, and three live processes.
    ///
    /// The values are chosen so derived numbers are round:
    /// 8192000 kB free / 16384000 kB total is 8000 MB / 16000 MB,
    /// and 7200 s of uptime is 120 minutes.
    pub fn basic_host() -> Self {
        let mut fs = Self::new();

        fs.add_file("/proc/sys/kernel/hostname", "tux-dev\n");
        fs.add_file("/proc/sys/kernel/osrelease", "6.6.13-mock\n");

        fs.add_file(
            "/proc/cpuinfo",
            "\
processor\t: 0
vendor_id\t: GenuineIntel
cpu family\t: 6
model\t\t: 142
model name\t: Intel(R) Core(TM) i7-8650U CPU @ 1.90GHz
stepping\t: 10
cpu MHz\t\t: 1900.000

processor\t: 1
vendor_id\t: GenuineIntel
model name\t: Intel(R) Core(TM) i7-8650U CPU @ 1.90GHz
",
        );

        fs.add_file(
            "/proc/stat",
            "\
cpu  10000 500 3000 80000 1000 200 100 0 0 0
cpu0 2500 125 750 20000 250 50 25 0 0 0
cpu1 2500 125 750 20000 250 50 25 0 0 0
cpu2 2500 125 750 20000 250 50 25 0 0 0
cpu3 2500 125 750 20000 250 50 25 0 0 0
intr 1000000 50 0 0
ctxt 500000
btime 1700000000
processes 12345
",
        );
        fs.add_file("/sys/devices/system/cpu/online", "0-3\n");

        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapTotal:       4096000 kB
SwapFree:        4096000 kB
",
        );

        fs.add_file("/proc/uptime", "7200.00 25000.00\n");

        // Three live processes plus non-numeric entries that must not count.
        fs.add_dir("/proc/1");
        fs.add_dir("/proc/2");
        fs.add_dir("/proc/42");
        fs.add_dir("/proc/self");
        fs.add_dir("/proc/sys");

        fs
    }
}
