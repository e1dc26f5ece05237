use crate::image_classifier::error::ClassifierError;
use crate::image_ref::ImageRef;

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub confidence: f32,
}

pub trait ImageClassifier {
    /// Predictions in the order the model ranked them, best first.
    fn classify(&self, image: &ImageRef) -> Result<Vec<Prediction>, ClassifierError>;
}
