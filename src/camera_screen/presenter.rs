use crate::camera_screen::core::Alert;
use crate::camera_screen::outcome::Outcome;
use crate::device_screen::interface::{AlertMessage, Severity};

fn message(title: &str, body: &str, severity: Severity) -> AlertMessage {
    AlertMessage {
        title: title.to_string(),
        body: body.to_string(),
        severity,
    }
}

pub fn present(alert: &Alert) -> AlertMessage {
    match alert {
        Alert::PhotoLibraryPermissionNeeded => message(
            "Permission needed",
            "Sorry, we need camera roll permissions to make this work.",
            Severity::Warning,
        ),
        Alert::Classified(outcome) => present_outcome(outcome),
    }
}

pub fn present_outcome(outcome: &Outcome) -> AlertMessage {
    match outcome {
        Outcome::Crop { .. } => message(
            "Crop detected",
            "Please take good care of the seedling.",
            Severity::Info,
        ),
        Outcome::Weed { .. } => message(
            "Weed detected!",
            "Please take appropriate actions.",
            Severity::Warning,
        ),
        Outcome::Unclassified => message(
            "Error",
            "Sorry, the seedling cannot be classified.",
            Severity::Error,
        ),
        Outcome::ConnectivityFailure => message(
            "Error",
            "Sorry, we cannot connect to the server at the moment. Please try again later.",
            Severity::Error,
        ),
    }
}
