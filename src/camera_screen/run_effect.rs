use crate::camera_screen::core::{Effect, Msg};
use crate::device_camera::interface::DeviceCamera;
use crate::device_permission::interface::{DevicePermission, PermissionScope};
use crate::device_photo_library::interface::DevicePhotoLibrary;
use crate::device_screen::interface::DeviceScreen;
use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::interface::Logger;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const SUBSCRIPTION_POLL: Duration = Duration::from_millis(50);

#[derive(Clone)]
pub struct RunEffect {
    logger: Arc<dyn Logger + Send + Sync>,
    device_permission: Arc<dyn DevicePermission + Send + Sync>,
    device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    device_photo_library: Arc<dyn DevicePhotoLibrary + Send + Sync>,
    device_screen: Arc<Mutex<dyn DeviceScreen + Send + Sync>>,
    image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    msg_sender: Sender<Msg>,
    stopped: Arc<AtomicBool>,
}

impl RunEffect {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        device_permission: Arc<dyn DevicePermission + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        device_photo_library: Arc<dyn DevicePhotoLibrary + Send + Sync>,
        device_screen: Arc<Mutex<dyn DeviceScreen + Send + Sync>>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
        msg_sender: Sender<Msg>,
    ) -> Self {
        Self {
            logger: logger.with_namespace("run_effect"),
            device_permission,
            device_camera,
            device_photo_library,
            device_screen,
            image_classifier,
            msg_sender,
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Ends the screen subscription shared by every clone.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn run_effect(&self, effect: Effect) {
        let _ = self.logger.info(&format!("Running effect: {:?}", effect));

        match effect {
            Effect::SubscribeToScreen => {
                let actions = match self.device_screen.lock() {
                    Ok(device_screen) => device_screen.events(),
                    Err(e) => {
                        let _ = self
                            .logger
                            .error(&format!("Screen unavailable, no input: {}", e));
                        return;
                    }
                };
                while !self.stopped.load(Ordering::SeqCst) {
                    match actions.recv_timeout(SUBSCRIPTION_POLL) {
                        Ok(action) => {
                            if self.msg_sender.send(Msg::UserAction(action)).is_err() {
                                break;
                            }
                        }
                        Err(RecvTimeoutError::Timeout) => {}
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                let _ = self.logger.info("Screen subscription ended");
            }
            Effect::RequestPermission(scope) => {
                let status = self.device_permission.request(scope);
                if let Err(e) = &status {
                    let _ = self
                        .logger
                        .error(&format!("Permission request for {:?} failed: {}", scope, e));
                }
                let msg = match scope {
                    PermissionScope::Camera => Msg::CameraPermissionDone(status),
                    PermissionScope::PhotoLibrary => Msg::PhotoLibraryPermissionDone(status),
                };
                let _ = self.msg_sender.send(msg);
            }
            Effect::PickImage => {
                let picked = self.device_photo_library.pick();
                if let Err(e) = &picked {
                    let _ = self.logger.error(&format!("Photo picker failed: {}", e));
                }
                let _ = self.msg_sender.send(Msg::PickImageDone(picked));
            }
            Effect::CaptureImage { facing } => {
                let captured = self.device_camera.capture(facing);
                if let Err(e) = &captured {
                    let _ = self.logger.error(&format!("Capture failed: {}", e));
                }
                let _ = self.msg_sender.send(Msg::CaptureDone(captured));
            }
            Effect::SaveToLibrary { image } => {
                let saved = self.device_photo_library.save(&image);
                if let Err(e) = &saved {
                    let _ = self
                        .logger
                        .error(&format!("Saving {} to photo library failed: {}", image, e));
                }
                let _ = self.msg_sender.send(Msg::SaveToLibraryDone(saved));
            }
            Effect::ClassifyImage { image } => {
                let classified = self.image_classifier.classify(&image);
                match &classified {
                    Ok(predictions) => {
                        let _ = self
                            .logger
                            .info(&format!("Classified {}: {:?}", image, predictions));
                    }
                    Err(e) => {
                        let _ = self
                            .logger
                            .error(&format!("Classifying {} failed: {}", image, e));
                    }
                }
                let _ = self.msg_sender.send(Msg::ClassifyDone {
                    image,
                    result: classified,
                });
            }
            // Handled by the event loop
            Effect::Exit => {}
        }
    }
}
