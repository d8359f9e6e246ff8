//! Scripted fake model backends for unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api_connection::endpoints::{
    Candidate, CandidateContent, GenerateContentRequest, GenerateContentResponse,
    GenerateImagesRequest, GenerateImagesResponse, ImagePrediction, ResponsePart,
};
use crate::api_connection::{ApiConnectionError, ImageModel, TextModel};

pub fn text_response(text: &str) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: Some(vec![Candidate {
            content: CandidateContent {
                parts: vec![ResponsePart {
                    text: Some(text.to_string()),
                }],
            },
        }]),
    }
}

pub fn image_response(bytes: &str) -> GenerateImagesResponse {
    GenerateImagesResponse {
        predictions: vec![ImagePrediction {
            bytes_base64_encoded: bytes.to_string(),
            mime_type: Some("image/jpeg".to_string()),
        }],
    }
}

pub fn api_error(status: u16, body: &str) -> ApiConnectionError {
    ApiConnectionError::ApiError {
        status: reqwest::StatusCode::from_u16(status).expect("valid status code"),
        error_body: body.to_string(),
    }
}

fn unscripted() -> ApiConnectionError {
    api_error(500, "no scripted response remaining")
}

#[derive(Clone, Default)]
pub struct FakeTextModel {
    responses: Arc<Mutex<VecDeque<Result<GenerateContentResponse, ApiConnectionError>>>>,
    calls: Arc<AtomicUsize>,
}

impl FakeTextModel {
    pub fn with_responses(
        responses: Vec<Result<GenerateContentResponse, ApiConnectionError>>,
    ) -> Self {
        FakeTextModel {
            responses: Arc::new(Mutex::new(responses.into())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextModel for FakeTextModel {
    async fn generate_content(
        &self,
        _model: &str,
        _request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ApiConnectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted()))
    }
}

#[derive(Clone, Default)]
pub struct FakeImageModel {
    responses: Arc<Mutex<VecDeque<Result<GenerateImagesResponse, ApiConnectionError>>>>,
    calls: Arc<AtomicUsize>,
}

impl FakeImageModel {
    pub fn with_responses(
        responses: Vec<Result<GenerateImagesResponse, ApiConnectionError>>,
    ) -> Self {
        FakeImageModel {
            responses: Arc::new(Mutex::new(responses.into())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageModel for FakeImageModel {
    async fn generate_images(
        &self,
        _model: &str,
        _request: GenerateImagesRequest,
    ) -> Result<GenerateImagesResponse, ApiConnectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted()))
    }
}
