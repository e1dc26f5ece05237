use crate::device_photo_library::interface::DevicePhotoLibrary;
use crate::image_ref::ImageRef;
use crate::library::logger::interface::Logger;
use std::path::PathBuf;
use std::sync::Arc;

const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Photo library backed by a directory, with the native file dialog as picker.
pub struct DevicePhotoLibraryNative {
    logger: Arc<dyn Logger + Send + Sync>,
    library_dir: PathBuf,
}

impl DevicePhotoLibraryNative {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, library_dir: PathBuf) -> Self {
        Self {
            logger: logger.with_namespace("photo_library").with_namespace("native"),
            library_dir,
        }
    }
}

impl DevicePhotoLibrary for DevicePhotoLibraryNative {
    fn pick(&self) -> Result<Option<ImageRef>, Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Opening photo picker...")?;

        let mut dialog = rfd::FileDialog::new()
            .set_title("Choose a seedling photo")
            .add_filter("Images", &IMAGE_EXTENSIONS);
        if self.library_dir.is_dir() {
            dialog = dialog.set_directory(&self.library_dir);
        }

        match dialog.pick_file() {
            Some(path) => {
                self.logger.info(&format!("Picked {}", path.display()))?;
                Ok(Some(ImageRef::new(path)))
            }
            None => {
                self.logger.info("Photo picker cancelled")?;
                Ok(None)
            }
        }
    }

    fn save(&self, image: &ImageRef) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let file_name = image
            .file_name()
            .ok_or_else(|| format!("Image {} has no file name", image))?;

        std::fs::create_dir_all(&self.library_dir)?;
        let destination = self.library_dir.join(file_name);
        std::fs::copy(image.path(), &destination)?;

        self.logger
            .info(&format!("Saved {} to {}", image, destination.display()))?;
        Ok(())
    }
}
