use crate::config::PredictionEndpointConfig;
use crate::image_classifier::error::ClassifierError;
use crate::image_classifier::interface::{ImageClassifier, Prediction};
use crate::image_ref::ImageRef;
use crate::library::logger::interface::Logger;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use std::sync::Arc;

const PREDICTION_KEY_HEADER: &str = "Prediction-Key";

#[derive(Debug, Deserialize)]
struct PredictionResponse {
    predictions: Vec<PredictionEntry>,
}

#[derive(Debug, Deserialize)]
struct PredictionEntry {
    #[serde(rename = "tagName")]
    tag_name: String,
    #[serde(default)]
    probability: f32,
}

/// Uploads the image to a hosted prediction endpoint and reads back its tags.
pub struct ImageClassifierHttp {
    http: Client,
    config: PredictionEndpointConfig,
    content_type_override: Option<HeaderMap>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierHttp {
    pub fn new(
        config: PredictionEndpointConfig,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, ClassifierError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        let content_type_override = content_type_override(&config)?;

        Ok(Self {
            http,
            config,
            content_type_override,
            logger: logger.with_namespace("image_classifier").with_namespace("http"),
        })
    }
}

fn content_type_override(
    config: &PredictionEndpointConfig,
) -> Result<Option<HeaderMap>, ClassifierError> {
    let Some(content_type) = &config.content_type else {
        return Ok(None);
    };
    let value = HeaderValue::from_str(content_type).map_err(|e| {
        ClassifierError::InvalidRequest(format!("content type {:?}: {}", content_type, e))
    })?;
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, value);
    Ok(Some(headers))
}

impl ImageClassifier for ImageClassifierHttp {
    fn classify(&self, image: &ImageRef) -> Result<Vec<Prediction>, ClassifierError> {
        let bytes = std::fs::read(image.path())?;
        let file_name = image.file_name().unwrap_or("image").to_string();

        let form = Form::new().part(
            self.config.field_name.clone(),
            Part::bytes(bytes).file_name(file_name),
        );

        let mut request = self
            .http
            .post(&self.config.url)
            .header(PREDICTION_KEY_HEADER, self.config.prediction_key.as_str())
            .multipart(form);

        // Replaces the multipart content type set above.
        if let Some(headers) = &self.content_type_override {
            request = request.headers(headers.clone());
        }

        let _ = self
            .logger
            .info(&format!("Uploading {} to {}", image, self.config.url));

        let response = request.send()?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClassifierError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text()?;
        let predictions = parse_predictions(&body)?;

        let _ = self.logger.info(&format!("Predictions: {:?}", predictions));

        Ok(predictions)
    }
}

pub fn parse_predictions(body: &str) -> Result<Vec<Prediction>, ClassifierError> {
    let response: PredictionResponse = serde_json::from_str(body)?;
    Ok(response
        .predictions
        .into_iter()
        .map(|entry| Prediction {
            label: entry.tag_name,
            confidence: entry.probability,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_console::LoggerConsole;
    use serde_json::json;
    use std::path::Path;
    use std::time::Duration;
    use tokio::runtime::Runtime;
    use wiremock::matchers::{body_string_contains, header, header_regex, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn logger() -> Arc<dyn Logger + Send + Sync> {
        Arc::new(LoggerConsole::new(chrono::FixedOffset::east_opt(0).unwrap()))
    }

    fn classifier(url: String) -> ImageClassifierHttp {
        let config = PredictionEndpointConfig {
            url,
            prediction_key: "secret-key".to_string(),
            timeout: Some(Duration::from_secs(5)),
            ..PredictionEndpointConfig::default()
        };
        ImageClassifierHttp::new(config, logger()).unwrap()
    }

    fn seedling(dir: &Path) -> ImageRef {
        let file = dir.join("seedling.jpg");
        std::fs::write(&file, b"not really a jpeg").unwrap();
        ImageRef::new(file)
    }

    fn start_server(rt: &Runtime, template: ResponseTemplate) -> MockServer {
        rt.block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/classify"))
                .respond_with(template)
                .mount(&server)
                .await;
            server
        })
    }

    #[test]
    fn test_parse_predictions_keeps_order() {
        let predictions = parse_predictions(
            r#"{"id":"x","predictions":[
                {"tagName":"Maize","probability":0.91},
                {"tagName":"Charlock","probability":0.05}
            ]}"#,
        )
        .unwrap();

        assert_eq!(
            predictions,
            vec![
                Prediction {
                    label: "Maize".to_string(),
                    confidence: 0.91
                },
                Prediction {
                    label: "Charlock".to_string(),
                    confidence: 0.05
                },
            ]
        );
    }

    #[test]
    fn test_parse_predictions_without_probability() {
        let predictions = parse_predictions(r#"{"predictions":[{"tagName":"Dandelion"}]}"#).unwrap();
        assert_eq!(predictions[0].label, "Dandelion");
        assert_eq!(predictions[0].confidence, 0.0);
    }

    #[test]
    fn test_parse_predictions_rejects_malformed_body() {
        assert!(matches!(
            parse_predictions(r#"{"items":[]}"#),
            Err(ClassifierError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_predictions("<html>"),
            Err(ClassifierError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_invalid_content_type_fails_at_construction() {
        let config = PredictionEndpointConfig {
            url: "http://127.0.0.1:1/classify".to_string(),
            content_type: Some("application/octet-stream\n".to_string()),
            ..PredictionEndpointConfig::default()
        };

        let result = ImageClassifierHttp::new(config, logger());

        assert!(matches!(result, Err(ClassifierError::InvalidRequest(_))));
    }

    #[test]
    fn test_classify_keeps_multipart_type_without_override() {
        let rt = Runtime::new().unwrap();
        let server = rt.block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/classify"))
                .and(header_regex("content-type", "^multipart/form-data; boundary="))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "predictions": [] })))
                .expect(1)
                .mount(&server)
                .await;
            server
        });
        let dir = tempfile::tempdir().unwrap();
        let config = PredictionEndpointConfig {
            url: format!("{}/classify", server.uri()),
            prediction_key: "secret-key".to_string(),
            content_type: None,
            ..PredictionEndpointConfig::default()
        };

        let predictions = ImageClassifierHttp::new(config, logger())
            .unwrap()
            .classify(&seedling(dir.path()))
            .unwrap();

        assert!(predictions.is_empty());
    }

    #[test]
    fn test_classify_sends_key_content_type_and_file_part() {
        let rt = Runtime::new().unwrap();
        let server = rt.block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/classify"))
                .and(header("Prediction-Key", "secret-key"))
                .and(header("content-type", "application/octet-stream"))
                .and(body_string_contains("name=\"file\""))
                .and(body_string_contains("filename=\"seedling.jpg\""))
                .and(body_string_contains("not really a jpeg"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "predictions": [{ "tagName": "Sugar beet", "probability": 0.8 }]
                })))
                .expect(1)
                .mount(&server)
                .await;
            server
        });
        let dir = tempfile::tempdir().unwrap();

        let predictions = classifier(format!("{}/classify", server.uri()))
            .classify(&seedling(dir.path()))
            .unwrap();

        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].label, "Sugar beet");
    }

    #[test]
    fn test_classify_empty_predictions() {
        let rt = Runtime::new().unwrap();
        let server = start_server(
            &rt,
            ResponseTemplate::new(200).set_body_json(json!({ "predictions": [] })),
        );
        let dir = tempfile::tempdir().unwrap();

        let predictions = classifier(format!("{}/classify", server.uri()))
            .classify(&seedling(dir.path()))
            .unwrap();

        assert!(predictions.is_empty());
    }

    #[test]
    fn test_classify_non_success_status() {
        let rt = Runtime::new().unwrap();
        let server = start_server(
            &rt,
            ResponseTemplate::new(401).set_body_string("bad key"),
        );
        let dir = tempfile::tempdir().unwrap();

        let result = classifier(format!("{}/classify", server.uri())).classify(&seedling(dir.path()));

        match result {
            Err(ClassifierError::Status { status, body }) => {
                assert_eq!(status, 401);
                assert_eq!(body, "bad key");
            }
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_classify_malformed_body() {
        let rt = Runtime::new().unwrap();
        let server = start_server(&rt, ResponseTemplate::new(200).set_body_string("oops"));
        let dir = tempfile::tempdir().unwrap();

        let result = classifier(format!("{}/classify", server.uri())).classify(&seedling(dir.path()));

        assert!(matches!(result, Err(ClassifierError::InvalidResponse(_))));
    }

    #[test]
    fn test_classify_unreachable_endpoint() {
        let dir = tempfile::tempdir().unwrap();

        let result = classifier("http://127.0.0.1:1/classify".to_string())
            .classify(&seedling(dir.path()));

        assert!(matches!(result, Err(ClassifierError::Network(_))));
    }

    #[test]
    fn test_classify_missing_image() {
        let dir = tempfile::tempdir().unwrap();

        let result = classifier("http://127.0.0.1:1/classify".to_string())
            .classify(&ImageRef::new(dir.path().join("gone.jpg")));

        assert!(matches!(result, Err(ClassifierError::Io(_))));
    }
}
