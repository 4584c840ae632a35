pub mod clock;
pub mod logger;
pub mod resource_guard;
