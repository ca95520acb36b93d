use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfoResponse {
    pub message: String,
    pub status: String,
    pub endpoints: serde_json::Value,
    /// Theme identifiers accepted by the `theme` request field.
    pub themes: Vec<&'static str>,
}

/// A design-service template as listed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignTemplateDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DesignTemplatesResponse {
    pub templates: Vec<DesignTemplateDto>,
}
