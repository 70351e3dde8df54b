use alloc::rc::Rc;
use core::cell::Cell;
use core::time::Duration;

/// Monotonic time source, read as an offset from an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock, works natively and on wasm.
#[derive(Copy, Clone, Debug)]
pub struct InstantClock {
    origin: web_time::Instant,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            origin: web_time::Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for InstantClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get().saturating_add(by));
    }

    pub fn set(&self, at: Duration) {
        self.now.set(at);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_is_shared_between_clones() {
        let clock = ManualClock::new();
        let handle = clock.clone();

        handle.advance(Duration::from_secs(3));
        handle.advance(Duration::from_millis(500));

        assert_eq!(clock.now(), Duration::from_millis(3500));

        clock.set(Duration::ZERO);
        assert_eq!(handle.now(), Duration::ZERO);
    }

    #[test]
    fn instant_clock_does_not_go_backwards() {
        let clock = InstantClock::new();
        let first = clock.now();

        assert!(clock.now() >= first);
    }
}
