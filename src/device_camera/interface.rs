/// A single RGB565 frame, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u16>,
}

impl Frame {
    pub fn new(width: u32, height: u32, pixels: Vec<u16>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Horizontal mirror: each row reversed.
    pub fn mirrored(mut self) -> Self {
        let width = self.width as usize;
        if width > 0 {
            for row in self.pixels.chunks_mut(width) {
                row.reverse();
            }
        }
        self
    }

    /// Vertical flip: row order reversed.
    pub fn flipped(self) -> Self {
        let width = self.width as usize;
        if width == 0 {
            return self;
        }
        let pixels = self
            .pixels
            .chunks(width)
            .rev()
            .flatten()
            .copied()
            .collect();
        Self { pixels, ..self }
    }
}

pub trait DeviceCamera {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn capture_frame(&self) -> Result<Frame, Box<dyn std::error::Error + Send + Sync>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        Frame::new(3, 2, vec![1, 2, 3, 4, 5, 6])
    }

    #[test]
    fn test_mirrored() {
        assert_eq!(frame().mirrored().pixels, vec![3, 2, 1, 6, 5, 4]);
    }

    #[test]
    fn test_flipped() {
        assert_eq!(frame().flipped().pixels, vec![4, 5, 6, 1, 2, 3]);
    }

    #[test]
    fn test_mirrored_and_flipped() {
        assert_eq!(frame().mirrored().flipped().pixels, vec![6, 5, 4, 3, 2, 1]);
    }
}
