use camera_screen::main::CameraScreen;
use config::{ClassifierKind, Config, ScreenKind};
use device_camera::impl_fake::DeviceCameraFake;
use device_permission::impl_fake::DevicePermissionFake;
use device_photo_library::impl_native::DevicePhotoLibraryNative;
use device_screen::impl_console::DeviceScreenConsole;
use device_screen::impl_gui::DeviceScreenGui;
use device_screen::interface::DeviceScreen;
use image_classifier::impl_fake::ImageClassifierFake;
use image_classifier::impl_http::ImageClassifierHttp;
use image_classifier::interface::ImageClassifier;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use std::sync::{Arc, Mutex};

mod camera_screen;
mod config;
mod device_camera;
mod device_permission;
mod device_photo_library;
mod device_screen;
mod image_classifier;
mod image_ref;
mod library;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;

    let logger: Arc<dyn Logger + Send + Sync> = Arc::new(LoggerConsole::new(config.logger_timezone));

    let device_permission = Arc::new(DevicePermissionFake::granted(logger.clone()));

    let device_camera = Arc::new(DeviceCameraFake::new(
        logger.clone(),
        config.capture_dir.clone(),
    ));

    let device_photo_library = Arc::new(DevicePhotoLibraryNative::new(
        logger.clone(),
        config.photo_library_dir.clone(),
    ));

    let image_classifier: Arc<dyn ImageClassifier + Send + Sync> = match config.classifier {
        ClassifierKind::Http => Arc::new(ImageClassifierHttp::new(
            config.prediction_endpoint.clone(),
            logger.clone(),
        )?),
        ClassifierKind::Fake => Arc::new(ImageClassifierFake::new(logger.clone())),
    };

    let device_screen: Arc<Mutex<dyn DeviceScreen + Send + Sync>> = match config.screen {
        ScreenKind::Console => Arc::new(Mutex::new(DeviceScreenConsole::new())),
        ScreenKind::Gui => Arc::new(Mutex::new(DeviceScreenGui::new(logger.clone()))),
    };

    device_screen.lock().map_err(|e| e.to_string())?.init()?;

    let camera_screen = CameraScreen::new(
        config,
        logger.clone(),
        device_permission,
        device_camera,
        device_photo_library,
        device_screen,
        image_classifier,
    );

    let model = camera_screen.run()?;

    logger.info(&format!("Exited with {:?}", model))?;

    Ok(())
}
