use crate::device_camera::interface::Frame;
use crate::image_classifier::interface::ImageClassifier;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Replays a fixed list of score vectors, one per frame. Fails once the
/// script runs out.
pub struct ImageClassifierScripted {
    script: Mutex<VecDeque<Vec<f32>>>,
    forwards: AtomicUsize,
    unloads: AtomicUsize,
    raise_after: Mutex<Option<(usize, Arc<AtomicBool>)>>,
}

impl ImageClassifierScripted {
    pub fn new(script: Vec<Vec<f32>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            forwards: AtomicUsize::new(0),
            unloads: AtomicUsize::new(0),
            raise_after: Mutex::new(None),
        }
    }

    pub fn unload_count(&self) -> usize {
        self.unloads.load(Ordering::SeqCst)
    }

    /// Sets `flag` during the `forwards`-th call to `forward`.
    pub fn raise_after(&self, forwards: usize, flag: Arc<AtomicBool>) {
        if let Ok(mut raise_after) = self.raise_after.lock() {
            *raise_after = Some((forwards, flag));
        }
    }
}

impl ImageClassifier for ImageClassifierScripted {
    fn load(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }

    fn unload(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.unloads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn forward(&self, _frame: &Frame) -> Result<Vec<f32>, Box<dyn std::error::Error + Send + Sync>> {
        let forwards = self.forwards.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some((after, flag)) = &*self.raise_after.lock().map_err(|_| "hook lock poisoned")? {
            if forwards == *after {
                flag.store(true, Ordering::SeqCst);
            }
        }

        self.script
            .lock()
            .map_err(|_| "script lock poisoned")?
            .pop_front()
            .ok_or_else(|| "classifier script exhausted".into())
    }
}
