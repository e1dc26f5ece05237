use crate::device_camera::interface::{DeviceCamera, Facing};
use crate::image_ref::ImageRef;
use crate::library::logger::interface::Logger;
use image::{Rgb, RgbImage};
use rand::Rng;
use std::path::PathBuf;
use std::sync::Arc;

const FRAME_WIDTH: u32 = 64;
const FRAME_HEIGHT: u32 = 48;

/// Writes a small noisy green frame per capture, standing in for a sensor.
pub struct DeviceCameraFake {
    logger: Arc<dyn Logger + Send + Sync>,
    capture_dir: PathBuf,
}

impl DeviceCameraFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, capture_dir: PathBuf) -> Self {
        Self {
            logger: logger.with_namespace("camera").with_namespace("fake"),
            capture_dir,
        }
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn capture(
        &self,
        facing: Facing,
    ) -> Result<ImageRef, Box<dyn std::error::Error + Send + Sync>> {
        self.logger
            .info(&format!("Capturing frame with {} camera...", facing))?;

        std::fs::create_dir_all(&self.capture_dir)?;

        let mut rng = rand::rng();
        let frame = RgbImage::from_fn(FRAME_WIDTH, FRAME_HEIGHT, |_, _| {
            let soil: u8 = rng.random_range(40..90);
            let leaf: u8 = rng.random_range(120..220);
            Rgb([soil, leaf, soil / 2])
        });

        let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S%.3f");
        let path = self
            .capture_dir
            .join(format!("capture-{}-{}.jpg", facing, timestamp));
        frame.save(&path)?;

        self.logger
            .info(&format!("Frame captured to {}", path.display()))?;
        Ok(ImageRef::new(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_console::LoggerConsole;

    #[test]
    fn test_capture_writes_readable_image() {
        let dir = tempfile::tempdir().unwrap();
        let logger = Arc::new(LoggerConsole::new(chrono::FixedOffset::east_opt(0).unwrap()));
        let camera = DeviceCameraFake::new(logger, dir.path().join("captures"));

        let image = camera.capture(Facing::Front).unwrap();

        assert!(image.path().starts_with(dir.path()));
        assert!(image.file_name().unwrap().starts_with("capture-front-"));
        let decoded = image::open(image.path()).unwrap();
        assert_eq!(decoded.width(), FRAME_WIDTH);
        assert_eq!(decoded.height(), FRAME_HEIGHT);
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        for facing in [Facing::Front, Facing::Back] {
            assert_eq!(facing.toggle().toggle(), facing);
            assert_ne!(facing.toggle(), facing);
        }
    }
}
