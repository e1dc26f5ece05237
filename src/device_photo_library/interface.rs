use crate::image_ref::ImageRef;

pub trait DevicePhotoLibrary {
    /// Lets the user choose an existing photo. `None` when the picker was cancelled.
    fn pick(&self) -> Result<Option<ImageRef>, Box<dyn std::error::Error + Send + Sync>>;

    fn save(&self, image: &ImageRef) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
