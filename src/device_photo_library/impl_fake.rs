use crate::device_photo_library::interface::DevicePhotoLibrary;
use crate::image_ref::ImageRef;
use crate::library::logger::interface::Logger;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Answers picks from a queue and remembers every saved image.
#[allow(dead_code)]
pub struct DevicePhotoLibraryFake {
    logger: Arc<dyn Logger + Send + Sync>,
    picks: Mutex<VecDeque<Option<ImageRef>>>,
    saved: Mutex<Vec<ImageRef>>,
    fail_saves: bool,
}

#[allow(dead_code)]
impl DevicePhotoLibraryFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("photo_library").with_namespace("fake"),
            picks: Mutex::new(VecDeque::new()),
            saved: Mutex::new(vec![]),
            fail_saves: false,
        }
    }

    pub fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    pub fn push_pick(&self, pick: Option<ImageRef>) {
        if let Ok(mut picks) = self.picks.lock() {
            picks.push_back(pick);
        }
    }

    pub fn saved(&self) -> Vec<ImageRef> {
        self.saved
            .lock()
            .map(|saved| saved.clone())
            .unwrap_or_default()
    }
}

impl DevicePhotoLibrary for DevicePhotoLibraryFake {
    fn pick(&self) -> Result<Option<ImageRef>, Box<dyn std::error::Error + Send + Sync>> {
        let pick = self
            .picks
            .lock()
            .map_err(|e| e.to_string())?
            .pop_front()
            .flatten();
        self.logger.info(&format!("Picked {:?}", pick))?;
        Ok(pick)
    }

    fn save(&self, image: &ImageRef) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if self.fail_saves {
            return Err(format!("Photo library is full, cannot save {}", image).into());
        }
        self.saved.lock().map_err(|e| e.to_string())?.push(image.clone());
        self.logger.info(&format!("Saved {}", image))?;
        Ok(())
    }
}
