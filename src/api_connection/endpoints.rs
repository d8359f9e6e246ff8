use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const TEXT_MODEL: &str = "gemini-2.5-flash";
pub const IMAGE_MODEL: &str = "imagen-4.0-generate-001";

pub const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Structured-output schema in the Generative Language API's flavor
/// (type names are upper-case: "OBJECT", "ARRAY", "STRING", ...).
#[derive(Debug, Serialize, Clone)]
pub struct ResponseSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ResponseSchema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, ResponseSchema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl ResponseSchema {
    pub fn string(description: &str) -> Self {
        Self::leaf("STRING", description)
    }

    pub fn number(description: &str) -> Self {
        Self::leaf("NUMBER", description)
    }

    pub fn boolean(description: &str) -> Self {
        Self::leaf("BOOLEAN", description)
    }

    pub fn array(description: Option<&str>, items: ResponseSchema) -> Self {
        ResponseSchema {
            schema_type: "ARRAY".to_string(),
            description: description.map(str::to_string),
            items: Some(Box::new(items)),
            properties: None,
            required: None,
        }
    }

    pub fn object(
        description: Option<&str>,
        properties: HashMap<String, ResponseSchema>,
        required: Vec<String>,
    ) -> Self {
        ResponseSchema {
            schema_type: "OBJECT".to_string(),
            description: description.map(str::to_string),
            items: None,
            properties: Some(properties),
            required: Some(required),
        }
    }

    fn leaf(schema_type: &str, description: &str) -> Self {
        ResponseSchema {
            schema_type: schema_type.to_string(),
            description: Some(description.to_string()),
            items: None,
            properties: None,
            required: None,
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct InlineData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

/// A single request part: plain text or inline binary data, never both.
#[derive(Debug, Serialize, Clone)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Part {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            }),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(parts: Vec<Part>) -> Self {
        Content {
            role: Some("user".to_string()),
            parts,
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Content {
            role: None,
            parts: vec![Part::text(text)],
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct GenerationConfig {
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(rename = "responseSchema", skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<ResponseSchema>,
}

impl GenerationConfig {
    pub fn json_with_schema(schema: ResponseSchema) -> Self {
        GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(schema),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Candidate {
    pub content: CandidateContent,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
}

impl GenerateContentResponse {
    /// Text of the first candidate's first part, if any.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.parts.first())
            .and_then(|p| p.text.as_deref())
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct ImageInstance {
    pub prompt: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct ImageParameters {
    #[serde(rename = "sampleCount")]
    pub sample_count: u32,
    #[serde(rename = "aspectRatio")]
    pub aspect_ratio: String,
    #[serde(rename = "outputMimeType")]
    pub output_mime_type: String,
}

impl Default for ImageParameters {
    fn default() -> Self {
        ImageParameters {
            sample_count: 1,
            aspect_ratio: "16:9".to_string(),
            output_mime_type: "image/jpeg".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct GenerateImagesRequest {
    pub instances: Vec<ImageInstance>,
    pub parameters: ImageParameters,
}

impl GenerateImagesRequest {
    pub fn single(prompt: impl Into<String>) -> Self {
        GenerateImagesRequest {
            instances: vec![ImageInstance {
                prompt: prompt.into(),
            }],
            parameters: ImageParameters::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ImagePrediction {
    #[serde(rename = "bytesBase64Encoded")]
    pub bytes_base64_encoded: String,
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GenerateImagesResponse {
    #[serde(default)]
    pub predictions: Vec<ImagePrediction>,
}
