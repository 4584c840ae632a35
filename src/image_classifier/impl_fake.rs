use crate::device_camera::interface::Frame;
use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::interface::Logger;
use rand::distr::{Distribution, Uniform};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Random scores that tend to keep the same winner for a stretch of frames,
/// so a run shows both flicker and stable periods.
pub struct ImageClassifierFake {
    model_location: String,
    label_count: usize,
    stickiness: f64,
    loaded: AtomicBool,
    winner: Mutex<Option<usize>>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierFake {
    pub fn new(
        model_location: String,
        label_count: usize,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            model_location,
            label_count,
            stickiness: 0.95,
            loaded: AtomicBool::new(false),
            winner: Mutex::new(None),
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
        }
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn load(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger
            .info(&format!("Loading model from {}", self.model_location))?;
        self.loaded.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn unload(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Unloading model")?;
        self.loaded.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn forward(&self, _frame: &Frame) -> Result<Vec<f32>, Box<dyn std::error::Error + Send + Sync>> {
        if !self.loaded.load(Ordering::SeqCst) {
            return Err("model not loaded".into());
        }

        let mut rng = rand::rng();

        let index_dist = Uniform::new(0, self.label_count)?;
        let noise_dist = Uniform::new(0.0f32, 0.4)?;
        let peak_dist = Uniform::new(0.5f32, 1.0)?;

        let mut winner = self.winner.lock().map_err(|_| "classifier lock poisoned")?;
        let index = match *winner {
            Some(index) if rng.random_bool(self.stickiness) => index,
            _ => index_dist.sample(&mut rng),
        };
        *winner = Some(index);

        let mut scores: Vec<f32> = (0..self.label_count)
            .map(|_| noise_dist.sample(&mut rng))
            .collect();
        scores[index] = peak_dist.sample(&mut rng);

        Ok(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_console::LoggerConsole;
    use crate::vocabulary::argmax;
    use chrono::{Offset, Utc};

    #[test]
    fn test_scores_cover_every_label() {
        let classifier = ImageClassifierFake::new(
            "/sd/m.kmodel".to_string(),
            5,
            Arc::new(LoggerConsole::new(Utc.fix())),
        );
        classifier.load().unwrap();

        let frame = Frame::new(1, 1, vec![0]);
        for _ in 0..20 {
            let scores = classifier.forward(&frame).unwrap();
            assert_eq!(scores.len(), 5);
            assert!(scores.iter().all(|s| *s >= 0.0));
            let (_, confidence) = argmax(&scores).unwrap();
            assert!(confidence >= 0.5);
        }
    }

    #[test]
    fn test_forward_requires_load() {
        let classifier = ImageClassifierFake::new(
            "/sd/m.kmodel".to_string(),
            5,
            Arc::new(LoggerConsole::new(Utc.fix())),
        );

        assert!(classifier.forward(&Frame::new(1, 1, vec![0])).is_err());
    }
}
