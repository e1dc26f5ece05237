use crate::camera_screen::outcome::{self, Outcome};
use crate::config::Config;
use crate::device_camera::interface::Facing;
use crate::device_permission::interface::{PermissionScope, PermissionStatus};
use crate::device_screen::interface::UserAction;
use crate::image_classifier::error::ClassifierError;
use crate::image_classifier::interface::Prediction;
use crate::image_ref::ImageRef;

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    AwaitingPermission,
    NoAccess,
    /// `busy` while a capture or a library pick is in flight.
    Capture {
        busy: bool,
    },
    Review {
        image: ImageRef,
        uploading: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    PhotoLibraryPermissionNeeded,
    Classified(Outcome),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub screen: Screen,
    pub facing: Facing,
    pub alert: Option<Alert>,
}

impl Model {
    #[allow(dead_code)]
    pub fn current_image(&self) -> Option<&ImageRef> {
        match &self.screen {
            Screen::Review { image, .. } => Some(image),
            _ => None,
        }
    }

    fn with_screen(self, screen: Screen) -> Self {
        Self { screen, ..self }
    }

    fn with_alert(self, alert: Option<Alert>) -> Self {
        Self { alert, ..self }
    }
}

#[derive(Debug)]
pub enum Msg {
    CameraPermissionDone(Result<PermissionStatus, Box<dyn std::error::Error + Send + Sync>>),
    PhotoLibraryPermissionDone(Result<PermissionStatus, Box<dyn std::error::Error + Send + Sync>>),
    UserAction(UserAction),
    PickImageDone(Result<Option<ImageRef>, Box<dyn std::error::Error + Send + Sync>>),
    CaptureDone(Result<ImageRef, Box<dyn std::error::Error + Send + Sync>>),
    SaveToLibraryDone(Result<(), Box<dyn std::error::Error + Send + Sync>>),
    ClassifyDone {
        image: ImageRef,
        result: Result<Vec<Prediction>, ClassifierError>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SubscribeToScreen,
    RequestPermission(PermissionScope),
    PickImage,
    CaptureImage { facing: Facing },
    SaveToLibrary { image: ImageRef },
    ClassifyImage { image: ImageRef },
    Exit,
}

pub fn init(config: &Config) -> (Model, Vec<Effect>) {
    let mut effects = vec![
        Effect::SubscribeToScreen,
        Effect::RequestPermission(PermissionScope::Camera),
    ];
    if config.request_photo_library_permission {
        effects.push(Effect::RequestPermission(PermissionScope::PhotoLibrary));
    }

    (
        Model {
            screen: Screen::AwaitingPermission,
            facing: Facing::default(),
            alert: None,
        },
        effects,
    )
}

pub fn transition(config: &Config, model: Model, msg: Msg) -> (Model, Vec<Effect>) {
    match msg {
        Msg::CameraPermissionDone(result) => match model.screen {
            Screen::AwaitingPermission => {
                let screen = match result {
                    Ok(PermissionStatus::Granted) => Screen::Capture { busy: false },
                    Ok(PermissionStatus::Denied) | Err(_) => Screen::NoAccess,
                };
                (model.with_screen(screen), vec![])
            }
            _ => (model, vec![]),
        },

        Msg::PhotoLibraryPermissionDone(Ok(PermissionStatus::Granted)) => (model, vec![]),
        Msg::PhotoLibraryPermissionDone(_) => {
            if model.alert.is_some() {
                (model, vec![])
            } else {
                (
                    model.with_alert(Some(Alert::PhotoLibraryPermissionNeeded)),
                    vec![],
                )
            }
        }

        Msg::UserAction(action) => on_user_action(config, model, action),

        Msg::PickImageDone(result) => match (is_busy(&model), result) {
            (true, Ok(Some(image))) => (
                model.with_screen(Screen::Review {
                    image,
                    uploading: false,
                }),
                vec![],
            ),
            (true, _) => (model.with_screen(Screen::Capture { busy: false }), vec![]),
            (false, _) => (model, vec![]),
        },

        Msg::CaptureDone(result) => match (is_busy(&model), result) {
            (true, Ok(image)) => (
                model.with_screen(Screen::Review {
                    image: image.clone(),
                    uploading: false,
                }),
                vec![Effect::SaveToLibrary { image }],
            ),
            (true, Err(_)) => (model.with_screen(Screen::Capture { busy: false }), vec![]),
            (false, _) => (model, vec![]),
        },

        // Failure is logged by the effect runner and otherwise ignored.
        Msg::SaveToLibraryDone(_) => (model, vec![]),

        Msg::ClassifyDone { image, result } => {
            if !is_uploading(&model, &image) {
                // Started for an image that has since been discarded.
                return (model, vec![]);
            }
            let outcome = outcome::from_classification(&config.crop_labels, &result);
            (
                model
                    .with_screen(Screen::Review {
                        image,
                        uploading: false,
                    })
                    .with_alert(Some(Alert::Classified(outcome))),
                vec![],
            )
        }
    }
}

fn on_user_action(config: &Config, model: Model, action: UserAction) -> (Model, Vec<Effect>) {
    match action {
        UserAction::Exit => return (model, vec![Effect::Exit]),
        UserAction::DismissAlert => return dismiss_alert(config, model),
        // Alerts are modal
        _ if model.alert.is_some() => return (model, vec![]),
        _ => {}
    }

    match (model.screen.clone(), action) {
        (Screen::Capture { .. }, UserAction::ToggleFacing) => {
            let facing = model.facing.toggle();
            (Model { facing, ..model }, vec![])
        }
        (Screen::Capture { busy: false }, UserAction::PickImage) => (
            model.with_screen(Screen::Capture { busy: true }),
            vec![Effect::PickImage],
        ),
        (Screen::Capture { busy: false }, UserAction::Capture) => {
            let facing = model.facing;
            (
                model.with_screen(Screen::Capture { busy: true }),
                vec![Effect::CaptureImage { facing }],
            )
        }
        (
            Screen::Review {
                image,
                uploading: false,
            },
            UserAction::Upload,
        ) => (
            model.with_screen(Screen::Review {
                image: image.clone(),
                uploading: true,
            }),
            vec![Effect::ClassifyImage { image }],
        ),
        (Screen::Review { .. }, UserAction::Discard) => {
            (model.with_screen(Screen::Capture { busy: false }), vec![])
        }
        _ => (model, vec![]),
    }
}

fn is_busy(model: &Model) -> bool {
    matches!(model.screen, Screen::Capture { busy: true })
}

fn is_uploading(model: &Model, image: &ImageRef) -> bool {
    matches!(&model.screen, Screen::Review { image: current, uploading: true } if current == image)
}

fn dismiss_alert(config: &Config, model: Model) -> (Model, Vec<Effect>) {
    let classified = matches!(
        model.alert,
        Some(Alert::Classified(Outcome::Crop { .. } | Outcome::Weed { .. }))
    );
    let idle_review = matches!(model.screen, Screen::Review { uploading: false, .. });

    let model = model.with_alert(None);

    if config.clear_image_after_upload && classified && idle_review {
        (model.with_screen(Screen::Capture { busy: false }), vec![])
    } else {
        (model, vec![])
    }
}
