use std::error::Error;
use std::sync::{Mutex, MutexGuard};

pub const LINES: usize = 2;
pub const CHARS_PER_LINE: usize = 16;

pub type DisplayBuffer = [[char; CHARS_PER_LINE]; LINES];

/// Represents a 16x2 text display module
pub trait DeviceDisplay: Send + Sync {
    /// Power up the display and show a blank screen
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Clear all text from the display
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Write text to a specific line on the display (0-based index)
    /// Returns error if line number is invalid (must be 0 or 1)
    fn write_line(&mut self, line: u8, text: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn set_backlight(&mut self, on: bool) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Quarter turns clockwise, 0..=3
    fn set_rotation(&mut self, rotation: u8) -> Result<(), Box<dyn Error + Send + Sync>>;
}

pub fn lock_display(
    display: &Mutex<dyn DeviceDisplay + Send + Sync>,
) -> Result<MutexGuard<'_, dyn DeviceDisplay + Send + Sync + 'static>, Box<dyn Error + Send + Sync>>
{
    display.lock().map_err(|_| "display lock poisoned".into())
}

pub fn write_into(
    buffer: &mut DisplayBuffer,
    line: u8,
    text: &str,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let row = buffer
        .get_mut(line as usize)
        .ok_or("Invalid line number")?;

    *row = [' '; CHARS_PER_LINE];
    for (i, c) in text.chars().take(CHARS_PER_LINE).enumerate() {
        row[i] = c;
    }

    Ok(())
}

pub fn check_rotation(rotation: u8) -> Result<(), Box<dyn Error + Send + Sync>> {
    if rotation > 3 {
        return Err(format!("Invalid rotation {}", rotation).into());
    }
    Ok(())
}

/// Rows as they appear on a panel mounted with the given rotation.
pub fn rotated_rows(buffer: &DisplayBuffer, rotation: u8) -> Vec<String> {
    match rotation % 4 {
        0 => buffer.iter().map(|row| row.iter().collect::<String>()).collect(),
        1 => (0..CHARS_PER_LINE)
            .map(|col| buffer.iter().rev().map(|row| row[col]).collect::<String>())
            .collect(),
        2 => buffer
            .iter()
            .rev()
            .map(|row| row.iter().rev().collect::<String>())
            .collect(),
        _ => (0..CHARS_PER_LINE)
            .rev()
            .map(|col| buffer.iter().map(|row| row[col]).collect::<String>())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer() -> DisplayBuffer {
        let mut buffer = [[' '; CHARS_PER_LINE]; LINES];
        write_into(&mut buffer, 0, "ab").unwrap();
        write_into(&mut buffer, 1, "cd").unwrap();
        buffer
    }

    #[test]
    fn test_write_truncates_to_line_width() {
        let mut buffer = [[' '; CHARS_PER_LINE]; LINES];
        write_into(&mut buffer, 0, "0.93 tennis ball!!").unwrap();

        let row: String = buffer[0].iter().collect();
        assert_eq!(row, "0.93 tennis ball");
    }

    #[test]
    fn test_write_rejects_third_line() {
        let mut buffer = [[' '; CHARS_PER_LINE]; LINES];
        assert!(write_into(&mut buffer, 2, "x").is_err());
    }

    #[test]
    fn test_rotation_zero_is_identity() {
        let rows = rotated_rows(&buffer(), 0);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("ab"));
        assert!(rows[1].starts_with("cd"));
    }

    #[test]
    fn test_rotation_half_turn() {
        let rows = rotated_rows(&buffer(), 2);
        assert!(rows[0].ends_with("dc"));
        assert!(rows[1].ends_with("ba"));
    }

    #[test]
    fn test_rotation_quarter_turns() {
        let clockwise = rotated_rows(&buffer(), 1);
        assert_eq!(clockwise.len(), CHARS_PER_LINE);
        assert_eq!(clockwise[0], "ca");
        assert_eq!(clockwise[1], "db");

        let counter = rotated_rows(&buffer(), 3);
        assert_eq!(counter[CHARS_PER_LINE - 1], "ac");
        assert_eq!(counter[CHARS_PER_LINE - 2], "bd");
    }

    #[test]
    fn test_check_rotation() {
        assert!(check_rotation(3).is_ok());
        assert!(check_rotation(4).is_err());
    }
}
