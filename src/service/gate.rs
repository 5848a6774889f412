//! Atomic exclusivity guard for the single report session.

use std::sync::atomic::{AtomicU8, Ordering};

use tracing::debug;

/// Gate states. At most one caller holds the gate open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GateState {
    Idle = 0,
    Open = 1,
}

/// The gate is already held open by another session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlreadyOpen;

impl std::fmt::Display for AlreadyOpen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "gate already open")
    }
}

impl std::error::Error for AlreadyOpen {}

/// Two-state exclusivity guard.
///
/// The Idle→Open transition is a single compare-and-swap, so concurrent
/// `try_open` calls cannot both succeed and a losing call has no side
/// effects. There is no timeout-based auto-release: a holder that never
/// closes starves everyone until an explicit close. That is a documented
/// limitation, not a bug.
#[derive(Debug, Default)]
pub struct AccessGate {
    state: AtomicU8,
}

impl AccessGate {
    /// Creates a gate in the Idle state.
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(GateState::Idle as u8),
        }
    }

    /// Atomically transitions Idle→Open. Fails without side effects if the
    /// gate is already open.
    pub fn try_open(&self) -> Result<(), AlreadyOpen> {
        self.state
            .compare_exchange(
                GateState::Idle as u8,
                GateState::Open as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .map(|_| debug!("gate opened"))
            .map_err(|_| AlreadyOpen)
    }

    /// Unconditionally transitions to Idle. Idempotent: closing an idle gate
    /// is a no-op, flagged in the log as a likely caller bug.
    pub fn close(&self) {
        let prev = self.state.swap(GateState::Idle as u8, Ordering::AcqRel);
        if prev == GateState::Idle as u8 {
            debug!("gate closed while idle; caller released without opening");
        } else {
            debug!("gate closed");
        }
    }

    /// Current state, for diagnostics.
    pub fn state(&self) -> GateState {
        if self.state.load(Ordering::Acquire) == GateState::Open as u8 {
            GateState::Open
        } else {
            GateState::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_open_then_busy_then_reopen() {
        let gate = AccessGate::new();
        assert_eq!(gate.state(), GateState::Idle);

        gate.try_open().unwrap();
        assert_eq!(gate.state(), GateState::Open);
        assert_eq!(gate.try_open(), Err(AlreadyOpen));

        gate.close();
        assert_eq!(gate.state(), GateState::Idle);
        gate.try_open().unwrap();
    }

    #[test]
    fn test_close_is_idempotent() {
        let gate = AccessGate::new();
        gate.close();
        gate.close();
        assert_eq!(gate.state(), GateState::Idle);
        gate.try_open().unwrap();
    }

    #[test]
    fn test_concurrent_opens_exactly_one_wins() {
        const THREADS: usize = 8;
        let gate = AccessGate::new();
        let barrier = Barrier::new(THREADS);
        let wins = AtomicUsize::new(0);

        std::thread::scope(|s| {
            for _ in 0..THREADS {
                s.spawn(|| {
                    barrier.wait();
                    if gate.try_open().is_ok() {
                        wins.fetch_add(1, Ordering::SeqCst);
                    }
                });
            }
        });

        assert_eq!(wins.load(Ordering::SeqCst), 1);
        assert_eq!(gate.state(), GateState::Open);

        // After release, exactly one subsequent open succeeds again.
        gate.close();
        gate.try_open().unwrap();
        assert_eq!(gate.try_open(), Err(AlreadyOpen));
    }
}
