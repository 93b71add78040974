use super::CaptionService;
use crate::models::EncodedImage;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// In-memory caption service for tests: configurable canned responses, call
/// counting, and optional injected failure.
#[derive(Clone)]
pub struct MockCaptionClient {
    responses: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
    fail_with: Arc<Mutex<Option<String>>>,
}

impl MockCaptionClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            fail_with: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_response(self, response: String) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    pub fn with_failure(self, message: String) -> Self {
        *self.fail_with.lock().unwrap() = Some(message);
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockCaptionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaptionService for MockCaptionClient {
    async fn generate_captions(
        &self,
        _instruction: &str,
        image: &EncodedImage,
        requirement: &str,
    ) -> Result<String> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        if let Some(message) = self.fail_with.lock().unwrap().clone() {
            return Err(Error::AiProvider(message));
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Default mock response
            Ok(format!(
                "A {} of {} bytes\nAnother caption",
                requirement,
                image.data.len()
            ))
        } else {
            let index = (*count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_image() -> EncodedImage {
        EncodedImage {
            mime_type: "image/jpeg".to_string(),
            data: "aGk=".to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_returns_configured_responses_in_order() {
        let client = MockCaptionClient::new()
            .with_response("First".to_string())
            .with_response("Second".to_string());

        assert_eq!(
            client
                .generate_captions("i", &tiny_image(), "r")
                .await
                .unwrap(),
            "First"
        );
        assert_eq!(
            client
                .generate_captions("i", &tiny_image(), "r")
                .await
                .unwrap(),
            "Second"
        );
        // Cycles back around
        assert_eq!(
            client
                .generate_captions("i", &tiny_image(), "r")
                .await
                .unwrap(),
            "First"
        );
        assert_eq!(client.get_call_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_injected_failure() {
        let client = MockCaptionClient::new().with_failure("quota exceeded".to_string());

        let err = client
            .generate_captions("i", &tiny_image(), "r")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
        assert_eq!(client.get_call_count(), 1);
    }
}
