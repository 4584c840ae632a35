use crate::library::logger::interface::Logger;
use std::ops::Deref;
use std::sync::Arc;

pub type Action<T> = fn(&T) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Holds an acquired device and releases it exactly once when dropped.
///
/// Guards declared later in a scope drop first, so devices come down in the
/// reverse of the order they were brought up.
pub struct ResourceGuard<T: ?Sized> {
    name: &'static str,
    resource: Arc<T>,
    release: Action<T>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl<T: ?Sized> ResourceGuard<T> {
    pub fn acquire(
        name: &'static str,
        resource: Arc<T>,
        acquire: Action<T>,
        release: Action<T>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        acquire(&resource)?;
        let _ = logger.info(&format!("Acquired {}", name));

        Ok(Self {
            name,
            resource,
            release,
            logger,
        })
    }
}

impl<T: ?Sized> Deref for ResourceGuard<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.resource
    }
}

impl<T: ?Sized> Drop for ResourceGuard<T> {
    fn drop(&mut self) {
        match (self.release)(&self.resource) {
            Ok(()) => {
                let _ = self.logger.info(&format!("Released {}", self.name));
            }
            Err(e) => {
                let _ = self
                    .logger
                    .error(&format!("Failed to release {}: {}", self.name, e));
            }
        }
    }
}
