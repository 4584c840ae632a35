use std::time::Instant;

/// Monotonic time source, read once per frame.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}
