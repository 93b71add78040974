use super::MediaService;
use crate::models::PublishedImage;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// In-memory media host for tests: remembers every upload, hands back a
/// configurable URL, and can be told to fail.
#[derive(Clone)]
pub struct MockMediaClient {
    uploads: Arc<Mutex<Vec<Vec<u8>>>>,
    secure_url: String,
    fail_with: Arc<Mutex<Option<String>>>,
}

impl MockMediaClient {
    pub fn new() -> Self {
        Self {
            uploads: Arc::new(Mutex::new(Vec::new())),
            secure_url: "https://mock-media.example.com/upload.jpg".to_string(),
            fail_with: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_secure_url(mut self, url: String) -> Self {
        self.secure_url = url;
        self
    }

    pub fn with_failure(self, message: String) -> Self {
        *self.fail_with.lock().unwrap() = Some(message);
        self
    }

    pub fn get_upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub fn last_upload(&self) -> Option<Vec<u8>> {
        self.uploads.lock().unwrap().last().cloned()
    }
}

impl Default for MockMediaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaService for MockMediaClient {
    async fn upload(&self, data: &[u8]) -> Result<PublishedImage> {
        if let Some(message) = self.fail_with.lock().unwrap().clone() {
            return Err(Error::Media(message));
        }

        self.uploads.lock().unwrap().push(data.to_vec());
        Ok(PublishedImage {
            secure_url: self.secure_url.clone(),
        })
    }
}
