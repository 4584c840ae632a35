use crate::device_camera::interface::Frame;

/// Model runner. `forward` returns one non-negative score per vocabulary
/// label, in vocabulary order.
pub trait ImageClassifier {
    fn load(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn unload(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn forward(&self, frame: &Frame) -> Result<Vec<f32>, Box<dyn std::error::Error + Send + Sync>>;
}
