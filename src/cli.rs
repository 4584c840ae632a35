use crate::config::{Config, Parity};
use chrono::FixedOffset;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Watches the camera and reports labels that hold steady over serial.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Label vocabulary, one label per line.
    #[arg(long)]
    pub labels: Option<PathBuf>,
    /// Model location handed to the classifier.
    #[arg(long)]
    pub model: Option<String>,
    /// How long a target label must hold before it is sent (ms).
    #[arg(long)]
    pub dwell_ms: Option<u64>,
    /// How long a sent label must keep holding before it is sent again (ms).
    /// Defaults to the dwell time.
    #[arg(long)]
    pub cooldown_ms: Option<u64>,
    #[arg(long, default_value_t = false)]
    pub hmirror: bool,
    #[arg(long, default_value_t = false)]
    pub vflip: bool,
    /// Display rotation in quarter turns.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=3))]
    pub rotation: Option<u8>,
    /// Serial device to write dispatches to. Without it dispatches go to the log only.
    #[arg(long)]
    pub serial_device: Option<PathBuf>,
    #[arg(long)]
    pub baud_rate: Option<u32>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(5..=8))]
    pub data_bits: Option<u8>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub stop_bits: Option<u8>,
    #[arg(long, value_enum)]
    pub parity: Option<Parity>,
    /// Serial write timeout (ms).
    #[arg(long)]
    pub serial_timeout_ms: Option<u64>,
    #[arg(long, value_enum, default_value_t = DisplayBackend::Console)]
    pub display: DisplayBackend,
    /// Stop after this many frames.
    #[arg(long)]
    pub max_frames: Option<u64>,
    /// Log timestamp offset from UTC, in hours.
    #[arg(long, allow_negative_numbers = true)]
    pub utc_offset_hours: Option<i32>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayBackend {
    Console,
    Gui,
    Headless,
}

impl Args {
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(labels) = &self.labels {
            config.labels_path = labels.clone();
        }
        if let Some(model) = &self.model {
            config.model_location = model.clone();
        }
        if let Some(dwell_ms) = self.dwell_ms {
            config.dwell_threshold = Duration::from_millis(dwell_ms);
            config.cooldown_threshold = config.dwell_threshold;
        }
        if let Some(cooldown_ms) = self.cooldown_ms {
            config.cooldown_threshold = Duration::from_millis(cooldown_ms);
        }
        config.camera.hmirror |= self.hmirror;
        config.camera.vflip |= self.vflip;
        if let Some(rotation) = self.rotation {
            config.display_rotation = rotation;
        }
        if let Some(device) = &self.serial_device {
            config.serial.device_path = Some(device.clone());
        }
        if let Some(baud_rate) = self.baud_rate {
            config.serial.baud_rate = baud_rate;
        }
        if let Some(data_bits) = self.data_bits {
            config.serial.data_bits = data_bits;
        }
        if let Some(stop_bits) = self.stop_bits {
            config.serial.stop_bits = stop_bits;
        }
        if let Some(parity) = self.parity {
            config.serial.parity = parity;
        }
        if let Some(timeout_ms) = self.serial_timeout_ms {
            config.serial.timeout = Duration::from_millis(timeout_ms);
        }
        if self.max_frames.is_some() {
            config.max_frames = self.max_frames;
        }
        if let Some(offset) = self
            .utc_offset_hours
            .and_then(|hours| hours.checked_mul(3600))
            .and_then(FixedOffset::east_opt)
        {
            config.logger_timezone = offset;
        }
        config
    }
}
