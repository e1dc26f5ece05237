use crate::image_classifier::error::ClassifierError;
use crate::image_classifier::interface::Prediction;

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Crop { label: String },
    Weed { label: String },
    Unclassified,
    ConnectivityFailure,
}

/// Only the top prediction counts. Labels match the crop list exactly.
pub fn from_classification(
    crop_labels: &[String],
    result: &Result<Vec<Prediction>, ClassifierError>,
) -> Outcome {
    match result {
        Ok(predictions) => match predictions.first() {
            Some(top) if crop_labels.iter().any(|crop| *crop == top.label) => Outcome::Crop {
                label: top.label.clone(),
            },
            Some(top) => Outcome::Weed {
                label: top.label.clone(),
            },
            None => Outcome::Unclassified,
        },
        Err(_) => Outcome::ConnectivityFailure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crops() -> Vec<String> {
        vec!["Common wheat".to_string(), "Maize".to_string(), "Sugar beet".to_string()]
    }

    fn prediction(label: &str, confidence: f32) -> Prediction {
        Prediction {
            label: label.to_string(),
            confidence,
        }
    }

    #[test]
    fn test_top_prediction_decides() {
        let result = Ok(vec![prediction("Charlock", 0.2), prediction("Maize", 0.9)]);
        assert_eq!(
            from_classification(&crops(), &result),
            Outcome::Weed {
                label: "Charlock".to_string()
            }
        );

        let result = Ok(vec![prediction("Sugar beet", 0.4), prediction("Cleavers", 0.3)]);
        assert_eq!(
            from_classification(&crops(), &result),
            Outcome::Crop {
                label: "Sugar beet".to_string()
            }
        );
    }

    #[test]
    fn test_match_is_exact() {
        let result = Ok(vec![prediction("maize", 0.9)]);
        assert!(matches!(
            from_classification(&crops(), &result),
            Outcome::Weed { .. }
        ));
    }

    #[test]
    fn test_empty_and_failed() {
        assert_eq!(from_classification(&crops(), &Ok(vec![])), Outcome::Unclassified);

        let failed = Err(ClassifierError::Status {
            status: 500,
            body: String::new(),
        });
        assert_eq!(
            from_classification(&crops(), &failed),
            Outcome::ConnectivityFailure
        );
    }
}
