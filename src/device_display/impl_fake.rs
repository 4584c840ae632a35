use crate::device_display::interface::{
    check_rotation, write_into, DeviceDisplay, DisplayBuffer, CHARS_PER_LINE, LINES,
};
use crate::library::logger::interface::Logger;
use std::error::Error;
use std::sync::Arc;

/// Keeps the screen contents in memory so tests can read them back.
pub struct DeviceDisplayFake {
    logger: Arc<dyn Logger + Send + Sync>,
    display_buffer: DisplayBuffer,
    pub history: Vec<String>,
    pub backlight_on: bool,
    pub rotation: u8,
    pub init_count: usize,
}

impl DeviceDisplayFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("display").with_namespace("fake"),
            display_buffer: [[' '; CHARS_PER_LINE]; LINES],
            history: Vec::new(),
            backlight_on: false,
            rotation: 0,
            init_count: 0,
        }
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.logger.info("init()")?;
        self.backlight_on = true;
        self.init_count += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.display_buffer = [[' '; CHARS_PER_LINE]; LINES];
        Ok(())
    }

    fn write_line(&mut self, line: u8, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        write_into(&mut self.display_buffer, line, text)?;
        self.history.push(text.to_string());
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.logger.info(&format!("set_backlight({})", on))?;
        self.backlight_on = on;
        Ok(())
    }

    fn set_rotation(&mut self, rotation: u8) -> Result<(), Box<dyn Error + Send + Sync>> {
        check_rotation(rotation)?;
        self.rotation = rotation;
        Ok(())
    }
}
