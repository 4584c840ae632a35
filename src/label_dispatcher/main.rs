use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::device_display::interface::DeviceDisplay;
use crate::device_serial::interface::DeviceSerial;
use crate::image_classifier::interface::ImageClassifier;
use crate::label_dispatcher::render::Render;
use crate::library::clock::interface::Clock;
use crate::library::logger::interface::Logger;
use crate::vocabulary::Vocabulary;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct LabelDispatcher {
    pub config: Config,
    pub vocabulary: Vocabulary,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub clock: Arc<dyn Clock + Send + Sync>,
    pub device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    pub device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    pub device_serial: Arc<dyn DeviceSerial + Send + Sync>,
    pub image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    pub render: Render,
    pub shutdown: Arc<AtomicBool>,
}

impl LabelDispatcher {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: Config,
        vocabulary: Vocabulary,
        logger: Arc<dyn Logger + Send + Sync>,
        clock: Arc<dyn Clock + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
        device_serial: Arc<dyn DeviceSerial + Send + Sync>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    ) -> Self {
        Self {
            render: Render::new(device_display.clone()),
            logger: logger.with_namespace("label_dispatcher"),
            config,
            vocabulary,
            clock,
            device_camera,
            device_display,
            device_serial,
            image_classifier,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }
}
