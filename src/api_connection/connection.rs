use async_trait::async_trait;
use dotenv::dotenv;
use reqwest::Client;
use std::env;
use std::error::Error;
use std::fmt;
use tracing::debug;

use super::endpoints::{
    GenerateContentRequest, GenerateContentResponse, GenerateImagesRequest,
    GenerateImagesResponse, API_BASE_URL,
};

#[derive(Debug)]
pub enum ApiConnectionError {
    MissingApiKey(String),
    NetworkError(reqwest::Error),
    SerializationError(serde_json::Error),
    ApiError {
        status: reqwest::StatusCode,
        error_body: String,
    },
}

impl fmt::Display for ApiConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiConnectionError::MissingApiKey(key_name) => {
                write!(f, "API key not found in environment: {}", key_name)
            }
            ApiConnectionError::NetworkError(err) => write!(f, "Network error: {}", err),
            ApiConnectionError::SerializationError(err) => {
                write!(f, "Serialization error: {}", err)
            }
            ApiConnectionError::ApiError { status, error_body } => {
                write!(f, "API error {}: {}", status, error_body)
            }
        }
    }
}

impl Error for ApiConnectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiConnectionError::NetworkError(err) => Some(err),
            ApiConnectionError::SerializationError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiConnectionError {
    fn from(err: reqwest::Error) -> Self {
        ApiConnectionError::NetworkError(err)
    }
}

impl From<serde_json::Error> for ApiConnectionError {
    fn from(err: serde_json::Error) -> Self {
        ApiConnectionError::SerializationError(err)
    }
}

/// Text/multimodal generation seam; the orchestration layer and tests depend on
/// this rather than on the concrete HTTP provider.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ApiConnectionError>;
}

/// Image generation seam, same role as [`TextModel`].
#[async_trait]
pub trait ImageModel: Send + Sync {
    async fn generate_images(
        &self,
        model: &str,
        request: GenerateImagesRequest,
    ) -> Result<GenerateImagesResponse, ApiConnectionError>;
}

/// HTTP client for the Google Generative Language API. The API key is read from
/// the environment at call time so a missing key surfaces as a typed error
/// rather than a construction failure.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    api_key_env_var: String,
    client: Client,
}

impl GeminiProvider {
    pub fn from_env(api_key_env_var: &str) -> Self {
        dotenv().ok();
        GeminiProvider {
            api_key_env_var: api_key_env_var.to_string(),
            client: Client::new(),
        }
    }

    fn api_key(&self) -> Result<String, ApiConnectionError> {
        dotenv().ok();
        env::var(&self.api_key_env_var)
            .map_err(|_| ApiConnectionError::MissingApiKey(self.api_key_env_var.clone()))
    }

    async fn post_json<Req: serde::Serialize, Resp: serde::de::DeserializeOwned>(
        &self,
        url: String,
        request: &Req,
    ) -> Result<Resp, ApiConnectionError> {
        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.json::<Resp>().await?)
        } else {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            Err(ApiConnectionError::ApiError { status, error_body })
        }
    }
}

#[async_trait]
impl TextModel for GeminiProvider {
    async fn generate_content(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ApiConnectionError> {
        let api_key = self.api_key()?;
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            API_BASE_URL, model, api_key
        );
        debug!(model, "issuing generateContent request");
        self.post_json(url, &request).await
    }
}

#[async_trait]
impl ImageModel for GeminiProvider {
    async fn generate_images(
        &self,
        model: &str,
        request: GenerateImagesRequest,
    ) -> Result<GenerateImagesResponse, ApiConnectionError> {
        let api_key = self.api_key()?;
        let url = format!("{}/models/{}:predict?key={}", API_BASE_URL, model, api_key);
        debug!(model, "issuing image prediction request");
        self.post_json(url, &request).await
    }
}
