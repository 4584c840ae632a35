use crate::library::clock::interface::Clock;
use std::time::Instant;

pub struct ClockSystem;

impl Clock for ClockSystem {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
