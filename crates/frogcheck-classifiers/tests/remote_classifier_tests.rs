//! RemoteClassifier against a mock inference server

use frogcheck_classifiers::{ImageClassifier, RemoteClassifier};
use frogcheck_core::Error;
use image::{Rgb, RgbImage};
use std::time::Duration;
use wiremock::matchers::{header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> RemoteClassifier {
    RemoteClassifier::new(
        format!("{}/predict", server.uri()),
        Duration::from_secs(5),
        90,
    )
    .unwrap()
}

fn image() -> RgbImage {
    RgbImage::from_pixel(64, 64, Rgb([0, 200, 0]))
}

#[tokio::test]
async fn test_parses_label_probabilities() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "labels": ["bullfrog", "tabby"],
            "probabilities": [0.75, 0.25]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = client(&server).classify(&image()).await.unwrap();

    assert_eq!(output.labels.unwrap(), vec!["bullfrog", "tabby"]);
    assert_eq!(output.probabilities.unwrap(), vec![0.75, 0.25]);
}

#[tokio::test]
async fn test_server_error_is_classifier_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client(&server).classify(&image()).await.unwrap_err();

    assert!(matches!(err, Error::ClassifierFailure(_)));
}

#[tokio::test]
async fn test_non_json_body_is_classifier_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client(&server).classify(&image()).await.unwrap_err();

    assert!(matches!(err, Error::ClassifierFailure(_)));
}

#[tokio::test]
async fn test_missing_fields_pass_through_as_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "labels": ["bullfrog"] })))
        .mount(&server)
        .await;

    let output = client(&server).classify(&image()).await.unwrap();

    assert!(output.labels.is_some());
    assert!(output.probabilities.is_none());
}

#[tokio::test]
async fn test_unreachable_server_is_classifier_failure() {
    let classifier =
        RemoteClassifier::new("http://127.0.0.1:1/predict", Duration::from_millis(500), 90).unwrap();

    let err = classifier.classify(&image()).await.unwrap_err();

    assert!(matches!(err, Error::ClassifierFailure(_)));
}

#[tokio::test]
async fn test_is_loaded_follows_last_call() {
    let server = MockServer::start().await;
    let classifier = client(&server);
    assert!(classifier.is_loaded());

    // Nothing mounted yet, so wiremock answers 404
    classifier.classify(&image()).await.unwrap_err();
    assert!(!classifier.is_loaded());

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "labels": ["tabby"],
            "probabilities": [1.0]
        })))
        .mount(&server)
        .await;

    classifier.classify(&image()).await.unwrap();
    assert!(classifier.is_loaded());
}

#[tokio::test]
async fn test_unreachable_server_not_loaded() {
    let classifier =
        RemoteClassifier::new("http://127.0.0.1:1/predict", Duration::from_millis(500), 90).unwrap();

    classifier.classify(&image()).await.unwrap_err();

    assert!(!classifier.is_loaded());
}
