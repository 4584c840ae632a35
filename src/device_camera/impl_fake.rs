use crate::config::CameraConfig;
use crate::device_camera::interface::{DeviceCamera, Frame};
use crate::library::logger::interface::Logger;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Produces a moving gradient in the configured window.
pub struct DeviceCameraFake {
    config: CameraConfig,
    logger: Arc<dyn Logger + Send + Sync>,
    running: AtomicBool,
    frames_captured: AtomicUsize,
    stops: AtomicUsize,
}

impl DeviceCameraFake {
    pub fn new(config: CameraConfig, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            config,
            logger: logger.with_namespace("camera").with_namespace("fake"),
            running: AtomicBool::new(false),
            frames_captured: AtomicUsize::new(0),
            stops: AtomicUsize::new(0),
        }
    }

    #[allow(dead_code)]
    pub fn stop_count(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info(&format!(
            "Starting camera {}x{} hmirror={} vflip={}",
            self.config.window.0, self.config.window.1, self.config.hmirror, self.config.vflip
        ))?;
        self.running.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Stopping camera")?;
        self.running.store(false, Ordering::SeqCst);
        self.stops.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn capture_frame(&self) -> Result<Frame, Box<dyn std::error::Error + Send + Sync>> {
        if !self.running.load(Ordering::SeqCst) {
            return Err("camera not started".into());
        }

        let index = self.frames_captured.fetch_add(1, Ordering::SeqCst);
        let (width, height) = self.config.window;
        let shift = index as u32;
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| x.wrapping_add(y).wrapping_add(shift) as u16))
            .collect();

        let mut frame = Frame::new(width, height, pixels);
        if self.config.hmirror {
            frame = frame.mirrored();
        }
        if self.config.vflip {
            frame = frame.flipped();
        }

        Ok(frame)
    }
}
