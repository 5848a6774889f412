//! kfetch - prints a logo-aligned snapshot of host statistics.
//!
//! Usage:
//!   kfetch              # full report
//!   kfetch 9            # mask word 9: kernel release + memory only
//!   kfetch --proc-path ./fake/proc
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[cfg(not(target_os = "linux"))]
use kfetch::collector::MockFs;
use kfetch::collector::ProcProvider;
#[cfg(target_os = "linux")]
use kfetch::collector::RealFs;
use kfetch::provider::SystemInfoProvider;
use kfetch::report::{DEFAULT_CEILING, ReportFormatter};
use kfetch::service::{ReportService, ServiceError};

/// Exclusive-access system information reporter.
#[derive(Parser)]
#[command(name = "kfetch", about = "System information reporter", version)]
struct Args {
    /// Configuration word selecting report fields (low 6 bits).
    /// Omitted means the full report.
    #[arg(value_name = "MASK")]
    mask: Option<u32>,

    /// Path to the proc filesystem.
    #[arg(long, default_value = "/proc")]
    proc_path: String,

    /// Path to the sys filesystem.
    #[arg(long, default_value = "/sys")]
    sys_path: String,

    /// Output size ceiling in bytes.
    #[arg(long, default_value_t = DEFAULT_CEILING)]
    ceiling: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    #[cfg(target_os = "linux")]
    let provider = ProcProvider::new(RealFs::new(), &args.proc_path, &args.sys_path);
    #[cfg(not(target_os = "linux"))]
    let provider = ProcProvider::new(MockFs::basic_host(), &args.proc_path, &args.sys_path);

    let service =
        ReportService::with_formatter(provider, ReportFormatter::with_ceiling(args.ceiling));

    if let Err(e) = run(&service, args.mask) {
        eprintln!("kfetch: {}", e);
        std::process::exit(1);
    }
}

fn run<P: SystemInfoProvider>(
    service: &ReportService<P>,
    mask: Option<u32>,
) -> Result<(), ServiceError> {
    let session = service.open()?;
    if let Some(word) = mask {
        session.write(&word.to_le_bytes())?;
    }
    print!("{}", session.read()?);
    Ok(())
}
