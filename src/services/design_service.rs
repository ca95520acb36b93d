use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;

use crate::errors::UpstreamError;
use crate::models::domain::Deck;
use crate::models::dto::response::DesignTemplateDto;

const DEMO_HANDLE_PREFIX: &str = "demo-";

/// Opaque reference to a presentation held by the design service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DesignHandle {
    pub id: String,
}

impl DesignHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Local stand-in used when the design service could not create the presentation.
    pub fn demo() -> Self {
        Self::new(format!("{}{}", DEMO_HANDLE_PREFIX, chrono::Utc::now().timestamp_millis()))
    }

    pub fn is_demo(&self) -> bool {
        self.id.starts_with(DEMO_HANDLE_PREFIX)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DesignService: Send + Sync {
    async fn create_presentation(&self, deck: &Deck, template: &str) -> Result<DesignHandle, UpstreamError>;

    async fn export_presentation(&self, handle: &DesignHandle) -> Result<Vec<u8>, UpstreamError>;

    async fn templates(&self) -> Result<Vec<DesignTemplateDto>, UpstreamError>;
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct CreatedPresentation {
    id: String,
}

#[derive(Deserialize)]
struct TemplateList {
    #[serde(default)]
    templates: Vec<DesignTemplateDto>,
}

/// Canva REST client using the client-credentials grant.
pub struct CanvaClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: SecretString,
    base_url: String,
    token_url: String,
}

impl CanvaClient {
    pub fn new(
        client_id: String,
        client_secret: SecretString,
        base_url: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id,
            client_secret,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token_url: token_url.into(),
        }
    }

    async fn access_token(&self) -> Result<String, UpstreamError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.expose_secret()),
            ])
            .send()
            .await?;

        let response = ensure_success(response).await?;
        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, UpstreamError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read response body".to_string());
    Err(UpstreamError::from_status(status.as_u16(), &body))
}

#[async_trait]
impl DesignService for CanvaClient {
    async fn create_presentation(&self, deck: &Deck, template: &str) -> Result<DesignHandle, UpstreamError> {
        let token = self.access_token().await?;
        let slides: Vec<_> = deck
            .slides
            .iter()
            .enumerate()
            .map(|(i, slide)| {
                json!({
                    "title": slide.title,
                    "content": slide.content,
                    "slideNumber": i + 1,
                })
            })
            .collect();

        let response = self
            .http
            .post(format!("{}/v1/presentations", self.base_url))
            .bearer_auth(token)
            .json(&json!({
                "title": deck.title,
                "template": template,
                "slides": slides,
            }))
            .send()
            .await?;

        let created: CreatedPresentation = ensure_success(response).await?.json().await?;
        log::info!("Design service created presentation {}", created.id);
        Ok(DesignHandle::new(created.id))
    }

    async fn export_presentation(&self, handle: &DesignHandle) -> Result<Vec<u8>, UpstreamError> {
        let token = self.access_token().await?;
        let response = self
            .http
            .post(format!("{}/v1/presentations/{}/export", self.base_url, handle.id))
            .bearer_auth(token)
            .json(&json!({ "format": "pptx", "quality": "high" }))
            .send()
            .await?;

        let bytes = ensure_success(response).await?.bytes().await?;
        Ok(bytes.to_vec())
    }

    async fn templates(&self) -> Result<Vec<DesignTemplateDto>, UpstreamError> {
        let token = self.access_token().await?;
        let response = self
            .http
            .get(format!("{}/v1/templates", self.base_url))
            .query(&[("type", "presentation")])
            .bearer_auth(token)
            .send()
            .await?;

        let list: TemplateList = ensure_success(response).await?.json().await?;
        Ok(list.templates)
    }
}

/// Templates offered when the design service cannot be reached.
pub fn builtin_templates() -> Vec<DesignTemplateDto> {
    [
        ("business", "Business Professional", "6366F1", "Business", "Business"),
        ("creative", "Creative Modern", "8B5CF6", "Creative", "Creative"),
        ("minimal", "Minimal Clean", "6B7280", "Minimal", "Minimal"),
        ("tech", "Technology", "059669", "Tech", "Technology"),
    ]
    .into_iter()
    .map(|(id, name, color, label, category)| DesignTemplateDto {
        id: id.to_string(),
        name: name.to_string(),
        thumbnail: Some(format!(
            "https://via.placeholder.com/300x200/{}/FFFFFF?text={}",
            color, label
        )),
        category: Some(category.to_string()),
    })
    .collect()
}
