use std::path::PathBuf;
use thiserror::Error;

/// Error type returned by device and classifier collaborators.
pub type DeviceError = Box<dyn std::error::Error + Send + Sync>;

/// Startup failures. Nothing has been acquired when one of these is raised.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no labels file at {0}")]
    MissingLabels(PathBuf),
    #[error("failed to read labels from {path}: {source}")]
    ReadLabels {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("label vocabulary is empty")]
    EmptyVocabulary,
    #[error("failed to install shutdown handler: {0}")]
    Signal(#[source] std::io::Error),
}

/// Failures that end a run of the control loop.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to acquire {device}: {source}")]
    Acquire {
        device: &'static str,
        #[source]
        source: DeviceError,
    },
    #[error("frame capture failed: {0}")]
    Capture(#[source] DeviceError),
    #[error("inference failed: {0}")]
    Classify(#[source] DeviceError),
    #[error("classifier returned {actual} scores for {expected} labels")]
    ProbabilityLength { expected: usize, actual: usize },
    #[error("display failed: {0}")]
    Display(#[source] DeviceError),
    #[error("dispatch failed: {0}")]
    Dispatch(#[source] DeviceError),
}
