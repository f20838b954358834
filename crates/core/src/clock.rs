// SPDX-License-Identifier: MIT

//! Time source abstraction, so engine/storage tests can control `now`.

use std::time::SystemTime;

/// Source of the current time. Swappable so tests can pin `created_at` and
/// scheduling-hint resolution to fixed instants.
pub trait Clock: Send + Sync {
    fn now(&self) -> SystemTime;
}

/// Production clock backed by [`SystemTime::now`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Fixed-time clock for tests. Advances only when told to.
#[derive(Clone, Debug)]
pub struct FakeClock {
    now: std::sync::Arc<std::sync::Mutex<SystemTime>>,
}

impl FakeClock {
    pub fn at(now: SystemTime) -> Self {
        Self {
            now: std::sync::Arc::new(std::sync::Mutex::new(now)),
        }
    }

    /// Advance the clock by `duration` and return the new `now`.
    pub fn advance(&self, duration: std::time::Duration) -> SystemTime {
        let mut guard = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *guard += duration;
        *guard
    }
}

impl Clock for FakeClock {
    fn now(&self) -> SystemTime {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
