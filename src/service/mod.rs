//! The report service: an open/write/read/close state machine over one
//! exclusive session.
//!
//! The service owns the [`AccessGate`] and the current [`ReportMask`] for
//! its whole lifetime and borrows a [`SystemInfoProvider`]. Snapshots and
//! rendered reports are transient, one per read call; nothing is cached
//! between reads.

pub mod gate;

pub use gate::{AccessGate, AlreadyOpen, GateState};

use std::sync::atomic::{AtomicU8, Ordering};

use tracing::debug;

use crate::provider::{SystemInfoProvider, SystemSnapshot};
use crate::report::format::RenderError;
use crate::report::mask::MalformedConfig;
use crate::report::{ReportFormatter, ReportMask};

/// Failures of the service operations. All recoverable; nothing here aborts
/// the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceError {
    /// Another session already holds the gate.
    Busy,
    /// Write payload could not form a configuration word. The previous mask
    /// is left unchanged.
    MalformedConfig(MalformedConfig),
    /// Rendered output would exceed the byte ceiling.
    Render(RenderError),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::Busy => write!(f, "service busy: another session is open"),
            ServiceError::MalformedConfig(e) => write!(f, "{}", e),
            ServiceError::Render(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<MalformedConfig> for ServiceError {
    fn from(e: MalformedConfig) -> Self {
        ServiceError::MalformedConfig(e)
    }
}

impl From<RenderError> for ServiceError {
    fn from(e: RenderError) -> Self {
        ServiceError::Render(e)
    }
}

/// Exclusive-access system information reporting service.
///
/// `write` and `read` are deliberately callable without an open session,
/// mirroring a device-file model where open and write/read are independent
/// callbacks. Only `open` enforces exclusivity.
pub struct ReportService<P: SystemInfoProvider> {
    provider: P,
    gate: AccessGate,
    mask_bits: AtomicU8,
    formatter: ReportFormatter,
}

impl<P: SystemInfoProvider> ReportService<P> {
    /// Creates a service with the full-report default mask and default
    /// output ceiling.
    pub fn new(provider: P) -> Self {
        Self::with_formatter(provider, ReportFormatter::new())
    }

    /// Creates a service with an explicit formatter (custom byte ceiling).
    pub fn with_formatter(provider: P, formatter: ReportFormatter) -> Self {
        Self {
            provider,
            gate: AccessGate::new(),
            mask_bits: AtomicU8::new(ReportMask::all().bits()),
            formatter,
        }
    }

    /// Opens the single session. Fails with [`ServiceError::Busy`] while
    /// another session is open. The returned handle closes on drop.
    pub fn open(&self) -> Result<Session<'_, P>, ServiceError> {
        self.gate.try_open().map_err(|_| ServiceError::Busy)?;
        Ok(Session { service: self })
    }

    /// Decodes a configuration word from the payload and replaces the whole
    /// mask. A short payload is rejected and leaves the mask untouched.
    pub fn write(&self, payload: &[u8]) -> Result<(), ServiceError> {
        let mask = ReportMask::from_config_bytes(payload)?;
        self.mask_bits.store(mask.bits(), Ordering::Release);
        debug!(bits = mask.bits(), "report mask replaced");
        Ok(())
    }

    /// Takes a fresh snapshot and renders it with the current mask.
    /// Never mutates the mask; every call is an independent snapshot.
    pub fn read(&self) -> Result<String, ServiceError> {
        let snapshot = SystemSnapshot::capture(&self.provider);
        let report = self.formatter.render(self.mask(), &snapshot)?;
        Ok(report)
    }

    /// Releases the session gate. Idempotent.
    pub fn close(&self) {
        self.gate.close();
    }

    /// Currently configured mask.
    pub fn mask(&self) -> ReportMask {
        ReportMask::decode(self.mask_bits.load(Ordering::Acquire) as u32)
    }
}

/// Handle to the one open session. Dropping it closes the gate.
pub struct Session<'a, P: SystemInfoProvider> {
    service: &'a ReportService<P>,
}

impl<P: SystemInfoProvider> Session<'_, P> {
    /// See [`ReportService::write`].
    pub fn write(&self, payload: &[u8]) -> Result<(), ServiceError> {
        self.service.write(payload)
    }

    /// See [`ReportService::read`].
    pub fn read(&self) -> Result<String, ServiceError> {
        self.service.read()
    }
}

impl<P: SystemInfoProvider> Drop for Session<'_, P> {
    fn drop(&mut self) {
        self.service.close();
    }
}
