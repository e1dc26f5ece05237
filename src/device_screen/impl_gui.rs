use crate::device_screen::interface::{AlertMessage, DeviceScreen, Severity, UserAction, View};
use crate::image_ref::ImageRef;
use crate::library::logger::interface::Logger;
use eframe::egui;
use std::error::Error;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

type WindowResult = Result<(), Box<dyn Error + Send + Sync>>;

struct Photo {
    image: ImageRef,
    texture: Option<egui::TextureHandle>,
}

struct ScreenWindow {
    view: Arc<Mutex<View>>,
    context: Arc<Mutex<Option<egui::Context>>>,
    actions: Sender<UserAction>,
    photo: Option<Photo>,
}

pub fn decode_photo(image: &ImageRef) -> Result<egui::ColorImage, image::ImageError> {
    let rgba = image::open(image.path())?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

impl ScreenWindow {
    /// Decodes each reviewed image once and keeps its texture until the image changes.
    fn photo_texture(&mut self, ctx: &egui::Context, image: &ImageRef) -> Option<egui::TextureHandle> {
        let stale = self.photo.as_ref().map_or(true, |photo| photo.image != *image);
        if stale {
            let texture = decode_photo(image).ok().map(|decoded| {
                ctx.load_texture(image.to_string(), decoded, egui::TextureOptions::LINEAR)
            });
            self.photo = Some(Photo {
                image: image.clone(),
                texture,
            });
        }
        self.photo.as_ref().and_then(|photo| photo.texture.clone())
    }

    fn press(&self, action: UserAction) {
        let _ = self.actions.send(action);
    }

    fn button(&self, ui: &mut egui::Ui, enabled: bool, label: &str, action: UserAction) {
        let button = egui::Button::new(egui::RichText::new(label).size(18.0));
        if ui.add_enabled(enabled, button).clicked() {
            self.press(action);
        }
    }

    fn show_alert(&self, ctx: &egui::Context, alert: &AlertMessage) {
        let color = match alert.severity {
            Severity::Info => egui::Color32::from_rgb(40, 120, 40),
            Severity::Warning => egui::Color32::from_rgb(200, 120, 0),
            Severity::Error => egui::Color32::from_rgb(190, 30, 30),
        };

        egui::Window::new(alert.title.as_str())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(egui::RichText::new(alert.body.as_str()).color(color));
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    self.press(UserAction::DismissAlert);
                }
            });
    }
}

impl eframe::App for ScreenWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Ok(mut context) = self.context.lock() {
            if context.is_none() {
                *context = Some(ctx.clone());
            }
        }

        let view = match self.view.lock() {
            Ok(view) => view.clone(),
            Err(_) => return,
        };
        let modal = view.alert().is_some();
        let texture = match &view {
            View::Review { image, .. } => self.photo_texture(ctx, image),
            _ => {
                self.photo = None;
                None
            }
        };

        egui::CentralPanel::default().show(ctx, |ui| match &view {
            View::Blank => {}
            View::NoAccess { message } => {
                ui.centered_and_justified(|ui| ui.heading(message.as_str()));
            }
            View::Camera {
                facing,
                controls_enabled,
                ..
            } => {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.heading(format!("Camera ({})", facing));
                    ui.add_space(40.0);
                    ui.horizontal(|ui| {
                        let enabled = *controls_enabled && !modal;
                        self.button(ui, enabled, "Photos", UserAction::PickImage);
                        self.button(ui, enabled, "Capture", UserAction::Capture);
                        self.button(ui, !modal, "Switch camera", UserAction::ToggleFacing);
                    });
                });
            }
            View::Review {
                image,
                upload_enabled,
                ..
            } => {
                ui.vertical_centered(|ui| {
                    match &texture {
                        Some(texture) => {
                            let max_size = ui.available_size() - egui::vec2(0.0, 48.0);
                            ui.add(
                                egui::Image::new(egui::load::SizedTexture::from_handle(texture))
                                    .max_size(max_size)
                                    .maintain_aspect_ratio(true),
                            );
                        }
                        None => {
                            ui.add_space(40.0);
                            ui.label(format!("Photo: {}", image));
                            ui.add_space(40.0);
                        }
                    }
                    ui.horizontal(|ui| {
                        self.button(ui, *upload_enabled && !modal, "Upload", UserAction::Upload);
                        self.button(ui, !modal, "Close", UserAction::Discard);
                    });
                });
            }
        });

        if let Some(alert) = view.alert() {
            self.show_alert(ctx, alert);
        }
    }
}

pub struct DeviceScreenGui {
    logger: Arc<dyn Logger + Send + Sync>,
    view: Arc<Mutex<View>>,
    context: Arc<Mutex<Option<egui::Context>>>,
    sender: Sender<UserAction>,
    receiver: Mutex<Option<Receiver<UserAction>>>,
}

impl DeviceScreenGui {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        let (sender, receiver) = channel();
        Self {
            logger: logger.with_namespace("device_screen").with_namespace("gui"),
            view: Arc::new(Mutex::new(View::Blank)),
            context: Arc::new(Mutex::new(None)),
            sender,
            receiver: Mutex::new(Some(receiver)),
        }
    }
}

fn native_options() -> eframe::NativeOptions {
    #[allow(unused_mut)]
    let mut options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 360.0])
            .with_resizable(false),
        ..Default::default()
    };

    // The window runs beside the screen loop, not on the main thread.
    #[cfg(target_os = "linux")]
    {
        options.event_loop_builder = Some(Box::new(
            |builder: &mut eframe::EventLoopBuilder<eframe::UserEvent>| {
                use winit::platform::x11::EventLoopBuilderExtX11;
                builder.with_any_thread(true);
            },
        ));
    }

    options
}

/// Runs the window until it closes, then always reports `Exit`, even when the
/// window fails to open or panics.
pub fn run_window_until_closed<F>(
    logger: &Arc<dyn Logger + Send + Sync>,
    exit: &Sender<UserAction>,
    run: F,
) where
    F: FnOnce() -> WindowResult,
{
    match panic::catch_unwind(AssertUnwindSafe(run)) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            let _ = logger.error(&format!("Window failed: {}", e));
        }
        Err(_) => {
            let _ = logger.error("Window panicked");
        }
    }
    let _ = exit.send(UserAction::Exit);
}

impl DeviceScreen for DeviceScreenGui {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let window = ScreenWindow {
            view: self.view.clone(),
            context: self.context.clone(),
            actions: self.sender.clone(),
            photo: None,
        };
        let exit = self.sender.clone();
        let logger = self.logger.clone();

        thread::spawn(move || {
            run_window_until_closed(&logger, &exit, || {
                // Blocks until the window is closed
                eframe::run_native(
                    "Weed Detector",
                    native_options(),
                    Box::new(|_cc| Box::new(window)),
                )
                .map_err(|e| e.to_string().into())
            });
        });

        Ok(())
    }

    fn show(&mut self, view: &View) -> Result<(), Box<dyn Error + Send + Sync>> {
        *self.view.lock().map_err(|e| e.to_string())? = view.clone();

        if let Some(ctx) = self.context.lock().map_err(|e| e.to_string())?.as_ref() {
            ctx.request_repaint();
        }
        Ok(())
    }

    fn events(&self) -> Receiver<UserAction> {
        match self.receiver.lock().ok().and_then(|mut r| r.take()) {
            Some(receiver) => receiver,
            None => channel().1,
        }
    }
}
