use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_CROP_LABELS: [&str; 3] = ["Common wheat", "Maize", "Sugar beet"];

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Console,
    Gui,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierKind {
    Http,
    Fake,
}

#[derive(Debug, Clone)]
pub struct PredictionEndpointConfig {
    pub url: String,
    pub prediction_key: String,
    /// Replaces the multipart content type when set.
    pub content_type: Option<String>,
    pub field_name: String,
    /// None leaves the HTTP client's default in place.
    pub timeout: Option<Duration>,
}

impl Default for PredictionEndpointConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            prediction_key: String::new(),
            content_type: Some("application/octet-stream".to_string()),
            field_name: "file".to_string(),
            timeout: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub logger_timezone: chrono::FixedOffset,
    pub prediction_endpoint: PredictionEndpointConfig,
    pub crop_labels: Vec<String>,
    pub clear_image_after_upload: bool,
    pub request_photo_library_permission: bool,
    pub screen: ScreenKind,
    pub classifier: ClassifierKind,
    pub capture_dir: PathBuf,
    pub photo_library_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logger_timezone: local_timezone(),
            prediction_endpoint: PredictionEndpointConfig::default(),
            crop_labels: DEFAULT_CROP_LABELS.iter().map(|s| s.to_string()).collect(),
            clear_image_after_upload: false,
            request_photo_library_permission: cfg!(target_os = "macos"),
            screen: ScreenKind::Console,
            classifier: ClassifierKind::Http,
            capture_dir: std::env::temp_dir().join("weed-detector"),
            photo_library_dir: default_photo_library_dir(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(value) = lookup("SCREEN") {
            config.screen = match value.trim().to_lowercase().as_str() {
                "console" => ScreenKind::Console,
                "gui" => ScreenKind::Gui,
                _ => return Err(invalid("SCREEN", value)),
            };
        }

        if let Some(value) = lookup("CLASSIFIER") {
            config.classifier = match value.trim().to_lowercase().as_str() {
                "http" => ClassifierKind::Http,
                "fake" => ClassifierKind::Fake,
                _ => return Err(invalid("CLASSIFIER", value)),
            };
        }

        if config.classifier == ClassifierKind::Http {
            config.prediction_endpoint.url =
                required(&lookup, "PREDICTION_URL")?;
            config.prediction_endpoint.prediction_key =
                required(&lookup, "PREDICTION_KEY")?;
        }

        if let Some(value) = lookup("PREDICTION_CONTENT_TYPE") {
            let value = value.trim().to_string();
            config.prediction_endpoint.content_type = (!value.is_empty()).then_some(value);
        }

        if let Some(value) = lookup("PREDICTION_TIMEOUT_SECS") {
            let secs = value
                .trim()
                .parse::<u64>()
                .map_err(|_| invalid("PREDICTION_TIMEOUT_SECS", value.clone()))?;
            config.prediction_endpoint.timeout = Some(Duration::from_secs(secs));
        }

        if let Some(value) = lookup("CROP_LABELS") {
            let labels: Vec<String> = value
                .split(',')
                .map(|label| label.trim().to_string())
                .filter(|label| !label.is_empty())
                .collect();
            if labels.is_empty() {
                return Err(invalid("CROP_LABELS", value));
            }
            config.crop_labels = labels;
        }

        if let Some(value) = lookup("CLEAR_IMAGE_AFTER_UPLOAD") {
            config.clear_image_after_upload = parse_bool("CLEAR_IMAGE_AFTER_UPLOAD", value)?;
        }

        if let Some(value) = lookup("REQUEST_PHOTO_LIBRARY_PERMISSION") {
            config.request_photo_library_permission =
                parse_bool("REQUEST_PHOTO_LIBRARY_PERMISSION", value)?;
        }

        if let Some(value) = lookup("CAPTURE_DIR") {
            config.capture_dir = PathBuf::from(value);
        }

        if let Some(value) = lookup("PHOTO_LIBRARY_DIR") {
            config.photo_library_dir = PathBuf::from(value);
        }

        Ok(config)
    }
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn parse_bool(name: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(name, value)),
    }
}

fn invalid(name: &'static str, value: String) -> ConfigError {
    ConfigError::Invalid { name, value }
}

fn local_timezone() -> chrono::FixedOffset {
    *chrono::Local::now().offset()
}

fn default_photo_library_dir() -> PathBuf {
    dirs::picture_dir()
        .map(|dir| dir.join("Weed Detector"))
        .unwrap_or_else(|| std::env::temp_dir().join("weed-detector").join("library"))
}
