use serde::Serialize;

pub const MIN_SLIDES: usize = 5;
pub const MAX_SLIDES: usize = 25;
pub const DEFAULT_SLIDES: usize = 10;

/// Validated generation parameters. Built from the inbound DTO.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    pub topic: String,
    pub audience: Option<String>,
    pub style: Option<String>,
    pub slide_target: usize,
    pub additional_info: Option<String>,
    pub presentation_type: Option<String>,
    pub theme: Option<String>,
}

impl GenerationRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            audience: None,
            style: None,
            slide_target: DEFAULT_SLIDES,
            additional_info: None,
            presentation_type: None,
            theme: None,
        }
    }

    pub fn with_slides(mut self, requested: Option<u32>) -> Self {
        self.slide_target = clamp_slide_count(requested);
        self
    }

    /// Presentation type with its first letter upper-cased, `Business` when absent.
    pub fn presentation_type_label(&self) -> String {
        match self.presentation_type.as_deref().map(str::trim) {
            Some(kind) if !kind.is_empty() => {
                let mut chars = kind.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => "Business".to_string(),
                }
            }
            _ => "Business".to_string(),
        }
    }
}

pub fn clamp_slide_count(requested: Option<u32>) -> usize {
    requested
        .map(|n| (n as usize).clamp(MIN_SLIDES, MAX_SLIDES))
        .unwrap_or(DEFAULT_SLIDES)
}

/// Per-request pipeline position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStage {
    Received,
    SourcingText,
    Normalizing,
    LayingOut,
    Serializing,
    Streaming,
    Done,
    Errored,
}

impl GenerationStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GenerationStage::Done | GenerationStage::Errored)
    }
}

impl std::fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationStage::Received => write!(f, "received"),
            GenerationStage::SourcingText => write!(f, "sourcing_text"),
            GenerationStage::Normalizing => write!(f, "normalizing"),
            GenerationStage::LayingOut => write!(f, "laying_out"),
            GenerationStage::Serializing => write!(f, "serializing"),
            GenerationStage::Streaming => write!(f, "streaming"),
            GenerationStage::Done => write!(f, "done"),
            GenerationStage::Errored => write!(f, "errored"),
        }
    }
}

/// Where the deck's text came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum TextSource {
    Generated { model: String, text: String },
    Canned { reason: String },
}

/// A finished document ready to send.
#[derive(Clone, Debug)]
pub struct GeneratedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}
