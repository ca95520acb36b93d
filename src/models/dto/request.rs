use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

use crate::models::domain::GenerationRequest;

pub const MAX_TOPIC_LENGTH: usize = 200;

/// Body of every generation endpoint.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequestDto {
    #[serde(default)]
    #[validate(custom(function = "validate_topic"))]
    pub topic: String,

    #[serde(default)]
    pub audience: Option<String>,

    #[serde(default)]
    pub style: Option<String>,

    #[serde(default, deserialize_with = "deserialize_slide_count")]
    pub slides: Option<u32>,

    #[serde(default)]
    pub additional_info: Option<String>,

    #[serde(default)]
    pub presentation_type: Option<String>,

    #[serde(default, alias = "template")]
    pub theme: Option<String>,
}

fn validate_topic(topic: &str) -> Result<(), ValidationError> {
    let trimmed = topic.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("required").with_message("Topic is required".into()));
    }
    if trimmed.chars().count() > MAX_TOPIC_LENGTH {
        return Err(ValidationError::new("length").with_message(
            format!("Topic must be at most {} characters", MAX_TOPIC_LENGTH).into(),
        ));
    }
    Ok(())
}

/// Accepts the slide count as a JSON number or a numeric string (form posts send strings).
fn deserialize_slide_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCount {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<RawCount>::deserialize(deserializer)? {
        Some(RawCount::Number(n)) if n.is_finite() => Some(n.max(0.0).min(u32::MAX as f64) as u32),
        Some(RawCount::Text(text)) => text.trim().parse::<u32>().ok(),
        _ => None,
    })
}

fn none_if_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

impl From<GenerationRequestDto> for GenerationRequest {
    /// Call `validate()` first; this conversion only normalizes.
    fn from(dto: GenerationRequestDto) -> Self {
        let mut request = GenerationRequest::new(dto.topic.trim()).with_slides(dto.slides);
        request.audience = none_if_blank(dto.audience);
        request.style = none_if_blank(dto.style);
        request.additional_info = none_if_blank(dto.additional_info);
        request.presentation_type = none_if_blank(dto.presentation_type);
        request.theme = none_if_blank(dto.theme);
        request
    }
}

/// A structured outline, either returned by a language model or posted by a client.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineDto {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub subtitle: Option<String>,

    #[serde(default)]
    pub slides: Option<Vec<OutlineSlideDto>>,

    #[serde(default)]
    pub style: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutlineSlideDto {
    #[serde(default)]
    pub title: Option<String>,

    /// A string or an array; non-string array items are stringified.
    #[serde(default)]
    pub content: Option<serde_json::Value>,

    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    #[serde(default)]
    pub icon: Option<String>,
}

impl OutlineSlideDto {
    pub fn content_lines(&self) -> Vec<String> {
        fn stringify(value: &serde_json::Value) -> Option<String> {
            match value {
                serde_json::Value::Null => None,
                serde_json::Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            }
        }

        match &self.content {
            Some(serde_json::Value::Array(items)) => items.iter().filter_map(stringify).collect(),
            Some(serde_json::Value::String(text)) => text.lines().map(str::to_string).collect(),
            Some(other) => stringify(other).into_iter().collect(),
            None => Vec::new(),
        }
    }
}

/// Body of `/api/generate-presentation`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationDataRequestDto {
    #[serde(default)]
    pub presentation_data: Option<OutlineDto>,

    #[serde(default)]
    pub template: Option<String>,
}
