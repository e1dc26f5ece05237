use crate::device_camera::interface::Facing;
use crate::image_ref::ImageRef;
use std::error::Error;
use std::sync::mpsc::Receiver;

/// Buttons the user can press on the capture screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    PickImage,
    Capture,
    ToggleFacing,
    Upload,
    Discard,
    DismissAlert,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage {
    pub title: String,
    pub body: String,
    pub severity: Severity,
}

/// Everything a screen needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Blank,
    NoAccess {
        message: String,
    },
    Camera {
        facing: Facing,
        controls_enabled: bool,
        alert: Option<AlertMessage>,
    },
    Review {
        image: ImageRef,
        upload_enabled: bool,
        alert: Option<AlertMessage>,
    },
}

impl View {
    pub fn alert(&self) -> Option<&AlertMessage> {
        match self {
            View::Camera { alert, .. } | View::Review { alert, .. } => alert.as_ref(),
            View::Blank | View::NoAccess { .. } => None,
        }
    }
}

pub trait DeviceScreen: Send + Sync {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Replaces whatever is on screen with `view`.
    fn show(&mut self, view: &View) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Stream of button presses.
    fn events(&self) -> Receiver<UserAction>;
}
