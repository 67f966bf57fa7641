//! Shutdown token - the shared deadline every actor polls
//!
//! Created once at launch and cloned into each actor. Nothing is ever
//! cancelled early; actors stop when they observe the deadline has passed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug)]
enum Deadline {
    Wall { started: Instant, ends: Instant },
    /// Virtual clock advanced by the stepped scheduler, one tick per round.
    Stepped { tick: AtomicU64, end: u64 },
}

#[derive(Debug, Clone)]
pub struct ShutdownToken {
    deadline: Arc<Deadline>,
}

impl ShutdownToken {
    /// Deadline `duration` of wall-clock time from now.
    pub fn wall(duration: Duration) -> Self {
        let started = Instant::now();
        Self {
            deadline: Arc::new(Deadline::Wall {
                started,
                ends: started + duration,
            }),
        }
    }

    /// Deadline after `ticks` calls to [`advance`](Self::advance).
    pub fn stepped(ticks: u64) -> Self {
        Self {
            deadline: Arc::new(Deadline::Stepped {
                tick: AtomicU64::new(0),
                end: ticks,
            }),
        }
    }

    pub fn is_expired(&self) -> bool {
        match &*self.deadline {
            Deadline::Wall { ends, .. } => Instant::now() >= *ends,
            Deadline::Stepped { tick, end } => tick.load(Ordering::Acquire) >= *end,
        }
    }

    /// Move a stepped clock forward one tick. No-op on wall clocks.
    pub fn advance(&self) {
        if let Deadline::Stepped { tick, .. } = &*self.deadline {
            tick.fetch_add(1, Ordering::AcqRel);
        }
    }

    /// Milliseconds of wall time, or ticks, since launch.
    pub fn elapsed(&self) -> u64 {
        match &*self.deadline {
            Deadline::Wall { started, .. } => started.elapsed().as_millis() as u64,
            Deadline::Stepped { tick, .. } => tick.load(Ordering::Acquire),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stepped_expiry() {
        let token = ShutdownToken::stepped(3);
        let shared = token.clone();

        assert!(!shared.is_expired());
        token.advance();
        token.advance();
        assert!(!shared.is_expired());
        token.advance();
        assert!(shared.is_expired());
        assert_eq!(shared.elapsed(), 3);
    }

    #[test]
    fn test_wall_expiry() {
        let token = ShutdownToken::wall(Duration::from_millis(20));
        assert!(!token.is_expired());

        token.advance();
        std::thread::sleep(Duration::from_millis(30));
        assert!(token.is_expired());
        assert!(token.elapsed() >= 20);
    }

    #[test]
    fn test_zero_duration_is_expired() {
        assert!(ShutdownToken::stepped(0).is_expired());
        assert!(ShutdownToken::wall(Duration::ZERO).is_expired());
    }
}
