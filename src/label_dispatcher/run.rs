use super::core::{init, transition, DispatchEvent, Observation, State};
use super::main::LabelDispatcher;
use super::render::FrameReport;
use crate::device_camera::interface::DeviceCamera;
use crate::device_display::interface::{lock_display, DeviceDisplay};
use crate::device_serial::interface::DeviceSerial;
use crate::error::RunError;
use crate::image_classifier::interface::ImageClassifier;
use crate::library::resource_guard::{Action, ResourceGuard};
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
use std::time::Instant;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub dispatched: Vec<DispatchEvent>,
}

impl LabelDispatcher {
    /// Brings the devices up, processes frames until shutdown, a frame limit,
    /// or a device failure, then releases whatever was acquired.
    pub fn run(&self) -> Result<RunSummary, RunError> {
        let _ = self.logger.info(&format!(
            "Starting with {} labels, {} targets, dwell {}ms",
            self.vocabulary.len(),
            self.config.target_labels.len(),
            self.config.dwell_threshold.as_millis()
        ));

        let camera = self.acquire(
            "camera",
            self.device_camera.clone(),
            |camera| camera.start(),
            |camera| camera.stop(),
        )?;
        let _display = self.acquire(
            "display",
            self.device_display.clone(),
            init_display,
            release_display,
        )?;
        let classifier = self.acquire(
            "image classifier",
            self.image_classifier.clone(),
            |classifier| classifier.load(),
            |classifier| classifier.unload(),
        )?;
        let serial = self.acquire(
            "serial",
            self.device_serial.clone(),
            |serial| serial.open(),
            |serial| serial.close(),
        )?;

        let result = self.run_frames(&*camera, &*classifier, &*serial);

        match &result {
            Ok(summary) => {
                let _ = self.logger.info(&format!(
                    "Stopped after {} frames, {} dispatches",
                    summary.frames,
                    summary.dispatched.len()
                ));
            }
            Err(e) => {
                let _ = self.logger.error(&format!("Stopping: {}", e));
            }
        }

        result
    }

    fn acquire<T: ?Sized>(
        &self,
        name: &'static str,
        resource: Arc<T>,
        acquire: Action<T>,
        release: Action<T>,
    ) -> Result<ResourceGuard<T>, RunError> {
        ResourceGuard::acquire(name, resource, acquire, release, self.logger.clone()).map_err(
            |source| {
                let _ = self
                    .logger
                    .error(&format!("Failed to acquire {}: {}", name, source));
                RunError::Acquire {
                    device: name,
                    source,
                }
            },
        )
    }

    fn run_frames(
        &self,
        camera: &(dyn DeviceCamera + Send + Sync),
        classifier: &(dyn ImageClassifier + Send + Sync),
        serial: &(dyn DeviceSerial + Send + Sync),
    ) -> Result<RunSummary, RunError> {
        lock_display(&self.device_display)
            .and_then(|mut display| display.set_rotation(self.config.display_rotation))
            .map_err(RunError::Display)?;

        let mut state = init();
        let mut summary = RunSummary::default();
        let mut last_dispatch: Option<Instant> = None;

        loop {
            if self.shutdown.load(Ordering::SeqCst) {
                let _ = self.logger.info("Shutdown requested");
                break;
            }
            if self
                .config
                .max_frames
                .is_some_and(|max_frames| summary.frames >= max_frames)
            {
                break;
            }

            let frame = camera.capture_frame().map_err(RunError::Capture)?;

            let inference_start = Instant::now();
            let scores = classifier.forward(&frame).map_err(RunError::Classify)?;
            let inference_time = inference_start.elapsed();

            let (label, confidence) = self.vocabulary.top(&scores)?;
            let observation = Observation {
                label: label.to_string(),
                confidence,
                timestamp: self.clock.now(),
            };

            let (new_state, dispatch) = transition(&self.config, state.clone(), &observation);
            if new_state.current_candidate() != state.current_candidate() {
                let _ = self
                    .logger
                    .info(&candidate_change(&state, &new_state, observation.timestamp));
            }
            state = new_state;

            if let Some(event) = &dispatch {
                serial
                    .write(&event.to_bytes())
                    .map_err(RunError::Dispatch)?;

                let message = match last_dispatch {
                    Some(previous) => format!(
                        "Sent over serial: {} ({}ms after previous)",
                        event.label,
                        event.timestamp.saturating_duration_since(previous).as_millis()
                    ),
                    None => format!("Sent over serial: {}", event.label),
                };
                let _ = self.logger.info(&message);
                last_dispatch = Some(event.timestamp);
            }

            self.render
                .render(&FrameReport {
                    label,
                    confidence: observation.confidence,
                    inference_time,
                    dispatched: dispatch.as_ref(),
                })
                .map_err(RunError::Display)?;

            summary.frames += 1;
            summary.dispatched.extend(dispatch);
        }

        Ok(summary)
    }
}

/// Log line for a candidate change, with how long the old candidate held.
pub fn candidate_change(old: &State, new: &State, now: Instant) -> String {
    let change = format!(
        "Candidate {:?} -> {:?}",
        old.current_candidate(),
        new.current_candidate()
    );

    match old.candidate_start() {
        Some(start) => format!(
            "{} after {}ms",
            change,
            now.saturating_duration_since(start).as_millis()
        ),
        None => change,
    }
}

fn init_display(
    display: &Mutex<dyn DeviceDisplay + Send + Sync>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut display = lock_display(display)?;
    display.init()?;
    display.clear()
}

fn release_display(
    display: &Mutex<dyn DeviceDisplay + Send + Sync>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut display = lock_display(display)?;
    display.clear()?;
    display.set_backlight(false)
}
