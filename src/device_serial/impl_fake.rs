use crate::device_serial::interface::DeviceSerial;
use crate::library::logger::interface::Logger;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub struct DeviceSerialFake {
    logger: Arc<dyn Logger + Send + Sync>,
    open: AtomicBool,
    fail_open: bool,
    fail_write: bool,
    closes: AtomicUsize,
    written: Mutex<Vec<Vec<u8>>>,
}

impl DeviceSerialFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("serial").with_namespace("fake"),
            open: AtomicBool::new(false),
            fail_open: false,
            fail_write: false,
            closes: AtomicUsize::new(0),
            written: Mutex::new(Vec::new()),
        }
    }

    #[allow(dead_code)]
    pub fn failing_open(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            fail_open: true,
            ..Self::new(logger)
        }
    }

    #[allow(dead_code)]
    pub fn failing_write(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            fail_write: true,
            ..Self::new(logger)
        }
    }

    #[allow(dead_code)]
    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    #[allow(dead_code)]
    pub fn written(&self) -> Vec<Vec<u8>> {
        self.written
            .lock()
            .map(|written| written.clone())
            .unwrap_or_default()
    }
}

impl DeviceSerial for DeviceSerialFake {
    fn open(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if self.fail_open {
            return Err("serial port unavailable".into());
        }
        self.logger.info("Opening serial link")?;
        self.open.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn close(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Closing serial link")?;
        self.open.store(false, Ordering::SeqCst);
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn write(&self, bytes: &[u8]) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if !self.open.load(Ordering::SeqCst) {
            return Err("serial link not open".into());
        }
        if self.fail_write {
            return Err("serial write timed out".into());
        }
        self.written
            .lock()
            .map_err(|_| "serial buffer lock poisoned")?
            .push(bytes.to_vec());
        Ok(())
    }
}
