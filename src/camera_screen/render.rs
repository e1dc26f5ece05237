use crate::camera_screen::core::{Model, Screen};
use crate::camera_screen::presenter::present;
use crate::device_screen::interface::{DeviceScreen, View};
use std::sync::{Arc, Mutex};

const NO_ACCESS_MESSAGE: &str = "No access to camera";

pub fn view(model: &Model) -> View {
    let alert = model.alert.as_ref().map(present);

    match &model.screen {
        Screen::AwaitingPermission => View::Blank,
        Screen::NoAccess => View::NoAccess {
            message: NO_ACCESS_MESSAGE.to_string(),
        },
        Screen::Capture { busy } => View::Camera {
            facing: model.facing,
            controls_enabled: !busy,
            alert,
        },
        Screen::Review { image, uploading } => View::Review {
            image: image.clone(),
            upload_enabled: !uploading,
            alert,
        },
    }
}

#[derive(Clone)]
pub struct Render {
    device_screen: Arc<Mutex<dyn DeviceScreen + Send + Sync>>,
}

impl Render {
    pub fn new(device_screen: Arc<Mutex<dyn DeviceScreen + Send + Sync>>) -> Self {
        Self { device_screen }
    }

    pub fn render(&self, model: &Model) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut device_screen = self.device_screen.lock().map_err(|e| e.to_string())?;

        device_screen.show(&view(model))?;

        Ok(())
    }
}
