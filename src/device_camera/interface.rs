use crate::image_ref::ImageRef;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Front,
    #[default]
    Back,
}

impl Facing {
    pub fn toggle(self) -> Self {
        match self {
            Facing::Front => Facing::Back,
            Facing::Back => Facing::Front,
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Facing::Front => write!(f, "front"),
            Facing::Back => write!(f, "back"),
        }
    }
}

pub trait DeviceCamera {
    /// Takes one still with the camera facing `facing` and stores it on disk.
    fn capture(&self, facing: Facing)
        -> Result<ImageRef, Box<dyn std::error::Error + Send + Sync>>;
}
