use chrono::{Offset, Utc};
use std::path::PathBuf;
use std::time::Duration;

/// Labels that trigger a serial dispatch once they hold steady.
pub const TARGET_LABELS: [&str; 11] = [
    "lotion",
    "necklace",
    "chain",
    "mouse",
    "envelope",
    "lipstick",
    "lip rouge",
    "ballpen",
    "tennis ball",
    "Band Aid",
    "safety pin",
];

#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    pub window: (u32, u32),
    pub hmirror: bool,
    pub vflip: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Parity {
    None,
    Even,
    Odd,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SerialConfig {
    pub device_path: Option<PathBuf>,
    pub baud_rate: u32,
    pub data_bits: u8,
    pub stop_bits: u8,
    pub parity: Parity,
    /// Write timeout.
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub target_labels: Vec<String>,
    pub dwell_threshold: Duration,
    pub cooldown_threshold: Duration,
    pub labels_path: PathBuf,
    pub model_location: String,
    pub camera: CameraConfig,
    pub display_rotation: u8,
    pub serial: SerialConfig,
    pub max_frames: Option<u64>,
    pub logger_timezone: chrono::FixedOffset,
}

impl Config {
    pub fn is_target(&self, label: &str) -> bool {
        self.target_labels.iter().any(|target| target == label)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_labels: TARGET_LABELS.iter().map(|l| l.to_string()).collect(),
            dwell_threshold: Duration::from_millis(1000),
            cooldown_threshold: Duration::from_millis(1000),
            labels_path: PathBuf::from("labels.txt"),
            model_location: "/sd/m.kmodel".to_string(),
            camera: CameraConfig {
                window: (224, 224),
                hmirror: false,
                vflip: false,
            },
            display_rotation: 0,
            serial: SerialConfig {
                device_path: None,
                baud_rate: 115_200,
                data_bits: 8,
                stop_bits: 1,
                parity: Parity::None,
                timeout: Duration::from_millis(1000),
            },
            max_frames: None,
            logger_timezone: Utc.fix(),
        }
    }
}
