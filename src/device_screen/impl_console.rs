use crate::device_screen::interface::{AlertMessage, DeviceScreen, Severity, UserAction, View};
use std::error::Error;
use std::io::BufRead;
use std::sync::mpsc::{channel, Receiver};

const WIDTH: usize = 44;

pub struct DeviceScreenConsole {}

impl DeviceScreenConsole {
    pub fn new() -> Self {
        Self {}
    }
}

pub fn parse_command(line: &str) -> Option<UserAction> {
    match line.trim().to_lowercase().as_str() {
        "p" | "pick" => Some(UserAction::PickImage),
        "c" | "capture" => Some(UserAction::Capture),
        "f" | "flip" => Some(UserAction::ToggleFacing),
        "u" | "upload" => Some(UserAction::Upload),
        "x" | "discard" => Some(UserAction::Discard),
        "ok" | "dismiss" => Some(UserAction::DismissAlert),
        "q" | "quit" | "exit" => Some(UserAction::Exit),
        _ => None,
    }
}

fn boxed(lines: &[String]) -> Vec<String> {
    let mut out = vec![format!("┌{}┐", "─".repeat(WIDTH))];
    for line in lines {
        let text: String = line.chars().take(WIDTH).collect();
        let padding = WIDTH - text.chars().count();
        out.push(format!("│{}{}│", text, " ".repeat(padding)));
    }
    out.push(format!("└{}┘", "─".repeat(WIDTH)));
    out
}

fn alert_lines(alert: &AlertMessage) -> Vec<String> {
    let marker = match alert.severity {
        Severity::Info => "(i)",
        Severity::Warning => "(!)",
        Severity::Error => "(x)",
    };
    vec![
        String::new(),
        format!("{} {}", marker, alert.title),
        alert.body.clone(),
        "[ok] dismiss".to_string(),
    ]
}

pub fn render_view(view: &View) -> Vec<String> {
    let mut lines = vec![];

    match view {
        View::Blank => return vec![],
        View::NoAccess { message } => lines.push(message.clone()),
        View::Camera {
            facing,
            controls_enabled,
            ..
        } => {
            lines.push(format!("Camera ({})", facing));
            if *controls_enabled {
                lines.push("[p]ick  [c]apture  [f]lip".to_string());
            } else {
                lines.push("Working...".to_string());
            }
        }
        View::Review {
            image,
            upload_enabled,
            ..
        } => {
            lines.push(format!("Photo: {}", image.file_name().unwrap_or("?")));
            if *upload_enabled {
                lines.push("[u]pload  discard [x]".to_string());
            } else {
                lines.push("Uploading...  discard [x]".to_string());
            }
        }
    }

    if let Some(alert) = view.alert() {
        lines.extend(alert_lines(alert));
    }

    boxed(&lines)
}

impl DeviceScreen for DeviceScreenConsole {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        println!("Commands: pick, capture, flip, upload, discard, ok, quit");
        Ok(())
    }

    fn show(&mut self, view: &View) -> Result<(), Box<dyn Error + Send + Sync>> {
        for line in render_view(view) {
            println!("{}", line);
        }
        Ok(())
    }

    fn events(&self) -> Receiver<UserAction> {
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                match parse_command(&line) {
                    Some(action) => {
                        if tx.send(action).is_err() {
                            return;
                        }
                    }
                    None => println!("Unknown command: {}", line.trim()),
                }
            }
            // stdin closed
            let _ = tx.send(UserAction::Exit);
        });
        rx
    }
}
