use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, SecretString};

use crate::errors::UpstreamError;
use crate::services::pptx_writer::PPTX_CONTENT_TYPE;

/// Replaces every occurrence of a literal token inside a presentation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaceholderService: Send + Sync {
    async fn replace_all(
        &self,
        document: Vec<u8>,
        token: &str,
        replacement: &str,
    ) -> Result<Vec<u8>, UpstreamError>;
}

/// Cloudmersive document-editing client.
pub struct CloudmersiveClient {
    http: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl CloudmersiveClient {
    pub fn new(api_key: SecretString, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PlaceholderService for CloudmersiveClient {
    async fn replace_all(
        &self,
        document: Vec<u8>,
        token: &str,
        replacement: &str,
    ) -> Result<Vec<u8>, UpstreamError> {
        let file = Part::bytes(document)
            .file_name("template.pptx")
            .mime_str(PPTX_CONTENT_TYPE)?;
        let form = Form::new()
            .part("inputFile", file)
            .text("matchString", token.to_string())
            .text("replaceString", replacement.to_string());

        let response = self
            .http
            .post(format!("{}/convert/edit/pptx/replace-all", self.base_url))
            .header("Apikey", self.api_key.expose_secret())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("Placeholder {} was not replaced: HTTP {}", token, status);
            return Err(UpstreamError::from_status(status.as_u16(), &body));
        }

        Ok(response.bytes().await?.to_vec())
    }
}
