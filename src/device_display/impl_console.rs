use crate::device_display::interface::{
    check_rotation, rotated_rows, write_into, DeviceDisplay, DisplayBuffer, CHARS_PER_LINE, LINES,
};
use std::error::Error;

pub struct DeviceDisplayConsole {
    display_buffer: DisplayBuffer,
    backlight_on: bool,
    rotation: u8,
}

impl DeviceDisplayConsole {
    pub fn new() -> Self {
        Self {
            display_buffer: [[' '; CHARS_PER_LINE]; LINES],
            backlight_on: true,
            rotation: 0,
        }
    }

    fn render_display(&self) {
        if !self.backlight_on {
            return;
        }
        let rows = rotated_rows(&self.display_buffer, self.rotation);
        let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
        println!("┌{}┐", "─".repeat(width));
        for row in rows {
            println!("│{}│", row);
        }
        println!("└{}┘", "─".repeat(width));
    }
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.backlight_on = true;
        self.render_display();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.display_buffer = [[' '; CHARS_PER_LINE]; LINES];
        self.render_display();
        Ok(())
    }

    fn write_line(&mut self, line: u8, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        write_into(&mut self.display_buffer, line, text)?;
        self.render_display();
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.backlight_on = on;
        self.render_display();
        Ok(())
    }

    fn set_rotation(&mut self, rotation: u8) -> Result<(), Box<dyn Error + Send + Sync>> {
        check_rotation(rotation)?;
        self.rotation = rotation;
        Ok(())
    }
}
