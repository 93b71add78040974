//! Application orchestration for one caption-generation action.

use crate::ai::{CaptionService, GeminiCaptionClient};
use crate::encoding;
use crate::media::{CloudinaryClient, MediaService};
use crate::models::{CaptionRecord, CaptionRequest, Config, GenerationOutcome, PromptStyle};
use crate::prompts;
use crate::store::{CaptionStore, MongoCaptionStore};
use crate::{Error, Result};
use tracing::info;

/// Coordinates encoding, the model call, media publishing, and the record
/// write for a single user action.
pub struct App {
    captioner: Box<dyn CaptionService>,
    media: Box<dyn MediaService>,
    store: Box<dyn CaptionStore>,
    default_style: PromptStyle,
    credit_handle: String,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub captioner: Box<dyn CaptionService>,
    pub media: Box<dyn MediaService>,
    pub store: Box<dyn CaptionStore>,
}

impl App {
    /// Build an app from concrete service dependencies.
    ///
    /// This is primarily useful for integration tests and local harnesses that
    /// need to inject mocks.
    pub fn with_services(
        services: AppServices,
        default_style: PromptStyle,
        credit_handle: String,
    ) -> Self {
        Self {
            captioner: services.captioner,
            media: services.media,
            store: services.store,
            default_style,
            credit_handle,
        }
    }

    /// Construct an app from environment configuration (`Config::from_env`).
    pub async fn new(config: &Config) -> Result<Self> {
        // Reuse one HTTP connection pool across the model and media clients.
        let http_client = reqwest::Client::new();

        info!("Caption provider: Gemini (model: {})", config.caption_model);
        let captioner = Box::new(GeminiCaptionClient::new_with_client(
            config.gemini_api_key.clone(),
            config.caption_model.clone(),
            config.request_timeout,
            http_client.clone(),
        ));

        info!(
            "Media host: Cloudinary (cloud: {})",
            config.cloudinary_cloud_name
        );
        let media = Box::new(CloudinaryClient::new_with_client(
            config.cloudinary_cloud_name.clone(),
            config.cloudinary_api_key.clone(),
            config.cloudinary_api_secret.clone(),
            config.request_timeout,
            http_client,
        ));

        let store = Box::new(
            MongoCaptionStore::connect(
                &config.mongodb_uri,
                &config.mongodb_database,
                &config.mongodb_collection,
                config.request_timeout,
            )
            .await?,
        );

        Ok(Self::with_services(
            AppServices {
                captioner,
                media,
                store,
            },
            config.default_style,
            config.credit_handle.clone(),
        ))
    }

    pub fn default_style(&self) -> PromptStyle {
        self.default_style
    }

    /// Probe the document store; startup and the health endpoint both use
    /// this so an unreachable store degrades the service without stopping it.
    pub async fn ping_store(&self) -> Result<()> {
        self.store.ping().await
    }

    /// Run the full flow for one user action.
    ///
    /// Captions are only handed back once the image is published and the
    /// record is stored, so a late-stage failure never leaves the user with
    /// captions that were never persisted. A record exists iff both the model
    /// call and the upload succeeded.
    pub async fn generate(&self, request: CaptionRequest) -> Result<GenerationOutcome> {
        if request.image_bytes.is_empty() {
            return Err(Error::MissingInput("Please upload your image".to_string()));
        }

        let encoded = encoding::encode_image(&request.image_bytes)?;
        info!(
            "Encoded {} byte upload as {} for {:?} captions",
            request.image_bytes.len(),
            encoded.mime_type,
            request.style
        );

        let instruction = prompts::instruction_for(request.style, &self.credit_handle);
        let response_text = self
            .captioner
            .generate_captions(&instruction, &encoded, &request.requirement)
            .await?;
        info!("Model returned {} chars of caption text", response_text.len());

        let raw_bytes = encoding::decode_image(&encoded)?;
        let published = self.media.upload(&raw_bytes).await?;

        let record = CaptionRecord::new(
            published.secure_url.clone(),
            &response_text,
            request.requirement,
        );
        self.store.insert(&record).await?;
        info!("Stored caption record for {}", record.image_url);

        Ok(GenerationOutcome {
            captions: record.captions,
            image_url: published.secure_url,
        })
    }
}
