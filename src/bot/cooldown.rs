//! Per-user cooldown table
//!
//! Best-effort: a lost race between two requests of the same user only means
//! one of them slips through.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Last accepted use per user
#[derive(Debug)]
pub struct CooldownTable {
    window: Duration,
    last_used: Mutex<HashMap<u64, Instant>>,
}

impl CooldownTable {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_used: Mutex::new(HashMap::new()),
        }
    }

    /// Accept and stamp the user, or return the time left to wait
    pub fn try_acquire(&self, user_id: u64) -> Result<(), Duration> {
        self.try_acquire_at(user_id, Instant::now())
    }

    /// `try_acquire` with an explicit clock
    pub fn try_acquire_at(&self, user_id: u64, now: Instant) -> Result<(), Duration> {
        let mut last_used = self.last_used.lock();
        if let Some(prev) = last_used.get(&user_id) {
            let elapsed = now.saturating_duration_since(*prev);
            if elapsed < self.window {
                return Err(self.window - elapsed);
            }
        }
        last_used.insert(user_id, now);
        Ok(())
    }

    /// Drop entries whose window has passed
    pub fn prune(&self, now: Instant) -> usize {
        let mut last_used = self.last_used.lock();
        let before = last_used.len();
        last_used.retain(|_, prev| now.saturating_duration_since(*prev) < self.window);
        before - last_used.len()
    }

    pub fn len(&self) -> usize {
        self.last_used.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_used.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_use_within_window_is_rejected() {
        let table = CooldownTable::new(Duration::from_secs(2));
        let t0 = Instant::now();

        assert!(table.try_acquire_at(1, t0).is_ok());
        let wait = table.try_acquire_at(1, t0 + Duration::from_millis(500)).unwrap_err();
        assert_eq!(wait, Duration::from_millis(1500));
        assert!(table.try_acquire_at(1, t0 + Duration::from_secs(2)).is_ok());
    }

    #[test]
    fn test_users_are_independent() {
        let table = CooldownTable::new(Duration::from_secs(2));
        let t0 = Instant::now();
        assert!(table.try_acquire_at(1, t0).is_ok());
        assert!(table.try_acquire_at(2, t0).is_ok());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_rejection_does_not_extend_window() {
        let table = CooldownTable::new(Duration::from_secs(2));
        let t0 = Instant::now();
        assert!(table.try_acquire_at(1, t0).is_ok());
        assert!(table.try_acquire_at(1, t0 + Duration::from_secs(1)).is_err());
        assert!(table.try_acquire_at(1, t0 + Duration::from_secs(2)).is_ok());
    }

    #[test]
    fn test_prune_removes_expired() {
        let table = CooldownTable::new(Duration::from_secs(2));
        let t0 = Instant::now();
        table.try_acquire_at(1, t0).unwrap();
        table.try_acquire_at(2, t0 + Duration::from_secs(3)).unwrap();

        assert_eq!(table.prune(t0 + Duration::from_secs(4)), 1);
        assert_eq!(table.len(), 1);
    }
}
