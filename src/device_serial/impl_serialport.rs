use crate::config::{Parity, SerialConfig};
use crate::device_serial::interface::DeviceSerial;
use crate::library::logger::interface::Logger;
use serialport::{DataBits, SerialPort, StopBits};
use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// UART dispatch sink, e.g. `/dev/ttyUSB0`, opened with the configured
/// baud rate, framing and write timeout.
pub struct DeviceSerialPort {
    path: PathBuf,
    config: SerialConfig,
    logger: Arc<dyn Logger + Send + Sync>,
    port: Mutex<Option<Box<dyn SerialPort>>>,
}

impl DeviceSerialPort {
    pub fn new(path: PathBuf, config: SerialConfig, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            path,
            config,
            logger: logger.with_namespace("serial").with_namespace("port"),
            port: Mutex::new(None),
        }
    }
}

fn data_bits(bits: u8) -> Result<DataBits, Box<dyn Error + Send + Sync>> {
    match bits {
        5 => Ok(DataBits::Five),
        6 => Ok(DataBits::Six),
        7 => Ok(DataBits::Seven),
        8 => Ok(DataBits::Eight),
        other => Err(format!("unsupported data bits: {}", other).into()),
    }
}

fn stop_bits(bits: u8) -> Result<StopBits, Box<dyn Error + Send + Sync>> {
    match bits {
        1 => Ok(StopBits::One),
        2 => Ok(StopBits::Two),
        other => Err(format!("unsupported stop bits: {}", other).into()),
    }
}

fn parity(parity: Parity) -> serialport::Parity {
    match parity {
        Parity::None => serialport::Parity::None,
        Parity::Even => serialport::Parity::Even,
        Parity::Odd => serialport::Parity::Odd,
    }
}

/// Short line-settings form such as `8N1`.
fn framing(config: &SerialConfig) -> String {
    let parity = match config.parity {
        Parity::None => 'N',
        Parity::Even => 'E',
        Parity::Odd => 'O',
    };
    format!("{}{}{}", config.data_bits, parity, config.stop_bits)
}

impl DeviceSerial for DeviceSerialPort {
    fn open(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.logger.info(&format!(
            "Opening {} at {} baud, {}, timeout {}ms",
            self.path.display(),
            self.config.baud_rate,
            framing(&self.config),
            self.config.timeout.as_millis(),
        ))?;

        let port = serialport::new(self.path.to_string_lossy(), self.config.baud_rate)
            .data_bits(data_bits(self.config.data_bits)?)
            .stop_bits(stop_bits(self.config.stop_bits)?)
            .parity(parity(self.config.parity))
            .timeout(self.config.timeout)
            .open()?;

        *self.port.lock().map_err(|_| "serial lock poisoned")? = Some(port);
        Ok(())
    }

    fn close(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        if let Some(mut port) = self.port.lock().map_err(|_| "serial lock poisoned")?.take() {
            port.flush()?;
        }
        self.logger.info("Serial link closed")?;
        Ok(())
    }

    fn write(&self, bytes: &[u8]) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut guard = self.port.lock().map_err(|_| "serial lock poisoned")?;
        let port = guard.as_mut().ok_or("serial link not open")?;
        port.write_all(bytes)?;
        port.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::library::logger::impl_console::LoggerConsole;
    use chrono::{Offset, Utc};

    fn serial_port(path: &str, config: SerialConfig) -> DeviceSerialPort {
        DeviceSerialPort::new(
            PathBuf::from(path),
            config,
            Arc::new(LoggerConsole::new(Utc.fix())),
        )
    }

    #[test]
    fn test_default_framing_is_8n1() {
        let config = Config::default().serial;

        assert_eq!(framing(&config), "8N1");
        assert_eq!(data_bits(config.data_bits).unwrap(), DataBits::Eight);
        assert_eq!(stop_bits(config.stop_bits).unwrap(), StopBits::One);
        assert_eq!(parity(config.parity), serialport::Parity::None);
    }

    #[test]
    fn test_line_settings_map_onto_the_port() {
        let config = SerialConfig {
            data_bits: 7,
            stop_bits: 2,
            parity: Parity::Even,
            ..Config::default().serial
        };

        assert_eq!(framing(&config), "7E2");
        assert_eq!(data_bits(7).unwrap(), DataBits::Seven);
        assert_eq!(stop_bits(2).unwrap(), StopBits::Two);
        assert_eq!(parity(Parity::Odd), serialport::Parity::Odd);
    }

    #[test]
    fn test_unsupported_framing_is_rejected() {
        assert!(data_bits(9).is_err());
        assert!(stop_bits(0).is_err());

        let serial = serial_port(
            "/dev/null",
            SerialConfig {
                data_bits: 9,
                ..Config::default().serial
            },
        );
        assert!(serial.open().is_err());
    }

    #[test]
    fn test_write_before_open_fails() {
        let serial = serial_port("/nonexistent/tty", Config::default().serial);

        assert!(serial.write(b"mouse").is_err());
        assert!(serial.open().is_err());
        assert!(serial.close().is_ok());
    }
}
