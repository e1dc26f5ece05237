use crate::camera_screen::core::{init, transition, Effect, Model, Msg};
use crate::camera_screen::render::Render;
use crate::camera_screen::run_effect::RunEffect;
use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::device_permission::interface::DevicePermission;
use crate::device_photo_library::interface::DevicePhotoLibrary;
use crate::device_screen::interface::DeviceScreen;
use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::interface::Logger;
use std::ops::ControlFlow;
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex};

pub struct CameraScreen {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    render: Render,
    run_effect: RunEffect,
    msg_receiver: Receiver<Msg>,
}

impl CameraScreen {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_permission: Arc<dyn DevicePermission + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        device_photo_library: Arc<dyn DevicePhotoLibrary + Send + Sync>,
        device_screen: Arc<Mutex<dyn DeviceScreen + Send + Sync>>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    ) -> Self {
        let (msg_sender, msg_receiver) = channel();
        let logger = logger.with_namespace("camera_screen");

        Self {
            render: Render::new(device_screen.clone()),
            run_effect: RunEffect::new(
                logger.clone(),
                device_permission,
                device_camera,
                device_photo_library,
                device_screen,
                image_classifier,
                msg_sender,
            ),
            config,
            logger,
            msg_receiver,
        }
    }

    /// Runs until the user exits and returns the last model.
    pub fn run(&self) -> Result<Model, Box<dyn std::error::Error + Send + Sync>> {
        let (mut model, effects) = init(&self.config);

        self.render.render(&model)?;

        if let ControlFlow::Break(()) = self.execute_effects(effects) {
            return Ok(model);
        }

        loop {
            let msg = self.msg_receiver.recv()?;

            let _ = self.logger.info(&format!(
                "\nold model:\n\t{:?}\n\nmsg:\n\t{:?}",
                model, msg,
            ));

            let (new_model, effects) = transition(&self.config, model, msg);

            let _ = self.logger.info(&format!(
                "\nnew model:\n\t{:?}\n\neffects:\n\t{:?}",
                new_model, effects
            ));

            model = new_model;

            self.render.render(&model)?;

            if let ControlFlow::Break(()) = self.execute_effects(effects) {
                return Ok(model);
            }
        }
    }

    fn execute_effects(&self, effects: Vec<Effect>) -> ControlFlow<()> {
        for effect in effects {
            if effect == Effect::Exit {
                return ControlFlow::Break(());
            }
            let run_effect = self.run_effect.clone();
            std::thread::spawn(move || run_effect.run_effect(effect));
        }
        ControlFlow::Continue(())
    }
}

impl Drop for CameraScreen {
    fn drop(&mut self) {
        self.run_effect.stop();
    }
}
