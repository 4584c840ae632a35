use crate::library::clock::interface::Clock;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};

/// Advances by a fixed step on every read. The first read returns `start`.
pub struct ClockFake {
    start: Instant,
    step: Duration,
    reads: AtomicU32,
}

impl ClockFake {
    pub fn new(start: Instant, step: Duration) -> Self {
        Self {
            start,
            step,
            reads: AtomicU32::new(0),
        }
    }
}

impl Clock for ClockFake {
    fn now(&self) -> Instant {
        let reads = self.reads.fetch_add(1, Ordering::SeqCst);
        self.start + self.step * reads
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_on_each_read() {
        let start = Instant::now();
        let clock = ClockFake::new(start, Duration::from_millis(100));

        assert_eq!(clock.now(), start);
        assert_eq!(clock.now(), start + Duration::from_millis(100));
        assert_eq!(clock.now(), start + Duration::from_millis(200));
    }
}
