use crate::device_display::interface::{lock_display, DeviceDisplay, CHARS_PER_LINE};
use crate::label_dispatcher::core::DispatchEvent;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the display shows for one processed frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport<'a> {
    pub label: &'a str,
    pub confidence: f32,
    pub inference_time: Duration,
    pub dispatched: Option<&'a DispatchEvent>,
}

#[derive(Clone)]
pub struct Render {
    device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
}

impl Render {
    pub fn new(device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>) -> Self {
        Self { device_display }
    }

    pub fn render(
        &self,
        report: &FrameReport,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut device_display = lock_display(&self.device_display)?;

        let [top, bottom] = lines(report);
        device_display.write_line(0, &top)?;
        device_display.write_line(1, &bottom)?;

        Ok(())
    }
}

pub fn lines(report: &FrameReport) -> [String; 2] {
    let top = format!("{:.2} {}", report.confidence, report.label);

    let bottom = match report.dispatched {
        Some(event) => format!("sent {}", event.label),
        None => format!("t:{}ms", report.inference_time.as_millis()),
    };

    [fit(top), fit(bottom)]
}

fn fit(text: String) -> String {
    text.chars().take(CHARS_PER_LINE).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_shows_confidence_label_and_inference_time() {
        let report = FrameReport {
            label: "mouse",
            confidence: 0.8712,
            inference_time: Duration::from_millis(42),
            dispatched: None,
        };

        assert_eq!(lines(&report), ["0.87 mouse".to_string(), "t:42ms".to_string()]);
    }

    #[test]
    fn test_shows_dispatch_in_place_of_timing() {
        let event = DispatchEvent {
            label: "chain".to_string(),
            timestamp: Instant::now(),
        };
        let report = FrameReport {
            label: "chain",
            confidence: 0.5,
            inference_time: Duration::from_millis(42),
            dispatched: Some(&event),
        };

        assert_eq!(lines(&report)[1], "sent chain");
    }

    #[test]
    fn test_long_labels_are_cut_to_line_width() {
        let report = FrameReport {
            label: "safety pin, pocket knife",
            confidence: 1.0,
            inference_time: Duration::ZERO,
            dispatched: None,
        };

        assert_eq!(lines(&report)[0], "1.00 safety pin,");
    }
}
