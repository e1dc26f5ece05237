use crate::image_classifier::error::ClassifierError;
use crate::image_classifier::interface::{ImageClassifier, Prediction};
use crate::image_ref::ImageRef;
use crate::library::logger::interface::Logger;
use rand::Rng;
use std::sync::Arc;

const SEEDLING_LABELS: [&str; 12] = [
    "Black-grass",
    "Charlock",
    "Cleavers",
    "Common Chickweed",
    "Common wheat",
    "Fat Hen",
    "Loose Silky-bent",
    "Maize",
    "Scentless Mayweed",
    "Shepherds Purse",
    "Small-flowered Cranesbill",
    "Sugar beet",
];

enum Script {
    Random,
    Predictions(Vec<Prediction>),
    Unavailable,
}

pub struct ImageClassifierFake {
    logger: Arc<dyn Logger + Send + Sync>,
    script: Script,
}

impl ImageClassifierFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self::with_script(logger, Script::Random)
    }

    #[allow(dead_code)]
    pub fn with_predictions(logger: Arc<dyn Logger + Send + Sync>, predictions: Vec<Prediction>) -> Self {
        Self::with_script(logger, Script::Predictions(predictions))
    }

    #[allow(dead_code)]
    pub fn unavailable(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self::with_script(logger, Script::Unavailable)
    }

    fn with_script(logger: Arc<dyn Logger + Send + Sync>, script: Script) -> Self {
        Self {
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
            script,
        }
    }

    fn random_prediction() -> Prediction {
        let mut rng = rand::rng();

        Prediction {
            label: SEEDLING_LABELS[rng.random_range(0..SEEDLING_LABELS.len())].to_string(),
            confidence: rng.random_range(0.0..1.0),
        }
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(&self, image: &ImageRef) -> Result<Vec<Prediction>, ClassifierError> {
        let _ = self.logger.info(&format!("Classifying {}...", image));

        match &self.script {
            Script::Random => Ok(vec![Self::random_prediction()]),
            Script::Predictions(predictions) => Ok(predictions.clone()),
            Script::Unavailable => Err(ClassifierError::Status {
                status: 503,
                body: "Service Unavailable".to_string(),
            }),
        }
    }
}
