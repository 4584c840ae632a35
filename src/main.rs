use clap::Parser;
use cli::{Args, DisplayBackend};
use config::Config;
use device_camera::impl_fake::DeviceCameraFake;
use device_display::{
    impl_console::DeviceDisplayConsole, impl_fake::DeviceDisplayFake,
    impl_gui::{DeviceDisplayGui, DisplayWindow},
    interface::DeviceDisplay,
};
use device_serial::{
    impl_fake::DeviceSerialFake, impl_serialport::DeviceSerialPort, interface::DeviceSerial,
};
use error::ConfigError;
use image_classifier::impl_fake::ImageClassifierFake;
use label_dispatcher::main::LabelDispatcher;
use library::clock::impl_system::ClockSystem;
use library::logger::{impl_console::LoggerConsole, interface::Logger};
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
use std::thread;
use vocabulary::Vocabulary;

mod cli;
mod config;
mod device_camera;
mod device_display;
mod device_serial;
mod error;
mod image_classifier;
mod label_dispatcher;
mod library;
mod vocabulary;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = args.apply(Config::default());

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let vocabulary = match Vocabulary::load(&config.labels_path) {
        Ok(vocabulary) => vocabulary,
        Err(e) => {
            let _ = logger.error(&e.to_string());
            return Err(e.into());
        }
    };

    let device_camera = Arc::new(DeviceCameraFake::new(
        config.camera.clone(),
        logger.clone(),
    ));

    let mut window = None;
    let device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>> = match args.display {
        DisplayBackend::Console => Arc::new(Mutex::new(DeviceDisplayConsole::new())),
        DisplayBackend::Gui => {
            let display = DeviceDisplayGui::new();
            window = Some(display.window());
            Arc::new(Mutex::new(display))
        }
        DisplayBackend::Headless => Arc::new(Mutex::new(DeviceDisplayFake::new(logger.clone()))),
    };

    let device_serial: Arc<dyn DeviceSerial + Send + Sync> = match &config.serial.device_path {
        Some(path) => Arc::new(DeviceSerialPort::new(
            path.clone(),
            config.serial.clone(),
            logger.clone(),
        )),
        None => Arc::new(DeviceSerialFake::new(logger.clone())),
    };

    let image_classifier = Arc::new(ImageClassifierFake::new(
        config.model_location.clone(),
        vocabulary.len(),
        logger.clone(),
    ));

    let label_dispatcher = LabelDispatcher::new(
        config,
        vocabulary,
        logger.clone(),
        Arc::new(ClockSystem),
        device_camera,
        device_display,
        device_serial,
        image_classifier,
    );

    for signal in [signal_hook::consts::SIGINT, signal_hook::consts::SIGTERM] {
        signal_hook::flag::register(signal, label_dispatcher.shutdown.clone())
            .map_err(ConfigError::Signal)?;
    }

    match window {
        Some(window) => run_with_window(label_dispatcher, window, &logger)?,
        None => {
            label_dispatcher.run()?;
        }
    }

    Ok(())
}

/// The window owns the main thread, so the control loop runs beside it.
/// Closing the window shuts the loop down; the loop ending closes the window.
fn run_with_window(
    label_dispatcher: LabelDispatcher,
    window: DisplayWindow,
    logger: &Arc<dyn Logger + Send + Sync>,
) -> Result<(), Box<dyn std::error::Error>> {
    let shutdown = label_dispatcher.shutdown.clone();
    let finished = window.finished();

    let control_loop = thread::spawn(move || {
        let result = label_dispatcher.run();
        finished.store(true, Ordering::SeqCst);
        result
    });

    if let Err(e) = window.show() {
        let _ = logger.error(&format!("Display window failed: {}", e));
    }
    shutdown.store(true, Ordering::SeqCst);

    control_loop
        .join()
        .map_err(|_| "control loop panicked")??;

    Ok(())
}
