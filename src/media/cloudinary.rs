use super::MediaService;
use crate::models::PublishedImage;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use sha1::{Digest, Sha1};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.cloudinary.com";

/// Cloudinary signed-upload client.
///
/// Signed uploads require a SHA-1 hex digest over the alphabetically sorted
/// request parameters (excluding `file`, `api_key`, and the signature itself)
/// with the API secret appended.
pub struct CloudinaryClient {
    client: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
    base_url: String,
    timeout: Duration,
}

impl CloudinaryClient {
    pub fn new(cloud_name: String, api_key: String, api_secret: String, timeout: Duration) -> Self {
        Self::new_with_client(
            cloud_name,
            api_key,
            api_secret,
            timeout,
            reqwest::Client::new(),
        )
    }

    pub fn new_with_client(
        cloud_name: String,
        api_key: String,
        api_secret: String,
        timeout: Duration,
        client: reqwest::Client,
    ) -> Self {
        Self {
            client,
            cloud_name,
            api_key,
            api_secret,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout,
        }
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn sign(&self, params: &mut Vec<(String, String)>) -> String {
        params.sort();
        let joined = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha1::new();
        hasher.update(joined.as_bytes());
        hasher.update(self.api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[async_trait]
impl MediaService for CloudinaryClient {
    async fn upload(&self, data: &[u8]) -> Result<PublishedImage> {
        tracing::debug!("Uploading {} bytes to Cloudinary", data.len());

        let timestamp = chrono::Utc::now().timestamp().to_string();
        let mut signed_params = vec![("timestamp".to_string(), timestamp.clone())];
        let signature = self.sign(&mut signed_params);

        let form = Form::new()
            .part("file", Part::bytes(data.to_vec()).file_name("upload"))
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("signature", signature);

        let url = format!("{}/v1_1/{}/image/upload", self.base_url, self.cloud_name);
        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send upload to Cloudinary: {}", e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::error!("Cloudinary error (status {}): {}", status, error_text);
            return Err(Error::Media(format!(
                "Cloudinary error (status {}): {}",
                status, error_text
            )));
        }

        let body = response.text().await?;
        let published: PublishedImage = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Cloudinary response: {}\nBody: {}", e, body);
            Error::Media(format!("Failed to parse Cloudinary response: {}", e))
        })?;

        tracing::info!("Published image at {}", published.secure_url);
        Ok(published)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_client(server: &MockServer) -> CloudinaryClient {
        CloudinaryClient::new(
            "demo".to_string(),
            "key".to_string(),
            "secret".to_string(),
            Duration::from_secs(5),
        )
        .with_base_url(server.uri())
    }

    #[tokio::test]
    async fn test_upload_returns_secure_url() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1_1/demo/image/upload"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "secure_url": "https://res.cloudinary.com/demo/image/upload/x.jpg",
                "public_id": "x"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server);
        let published = client.upload(&[1, 2, 3]).await.unwrap();
        assert_eq!(
            published.secure_url,
            "https://res.cloudinary.com/demo/image/upload/x.jpg"
        );
    }

    #[tokio::test]
    async fn test_api_error_maps_to_media_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1_1/demo/image/upload"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid signature"))
            .mount(&server)
            .await;

        let client = make_client(&server);
        let err = client.upload(&[1, 2, 3]).await.unwrap_err();
        assert!(matches!(err, Error::Media(_)));
        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn test_missing_secure_url_is_a_media_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1_1/demo/image/upload"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "public_id": "x" })),
            )
            .mount(&server)
            .await;

        let client = make_client(&server);
        let err = client.upload(&[1, 2, 3]).await.unwrap_err();
        assert!(matches!(err, Error::Media(_)));
    }

    #[test]
    fn test_signature_is_sha1_of_sorted_params_plus_secret() {
        let client = CloudinaryClient::new(
            "demo".to_string(),
            "key".to_string(),
            "secret".to_string(),
            Duration::from_secs(5),
        );

        let mut params = vec![("timestamp".to_string(), "1234".to_string())];
        let signature = client.sign(&mut params);

        let mut hasher = Sha1::new();
        hasher.update(b"timestamp=1234secret");
        assert_eq!(signature, hex::encode(hasher.finalize()));
    }
}
