use std::env;
use std::path::PathBuf;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

const OPENAI_KEY_PLACEHOLDER: &str = "your-openai-api-key-here";
const DEFAULT_MODELS: &str = "gpt-4,gpt-4o-mini,gpt-3.5-turbo";

#[derive(Clone, Debug)]
pub struct Config {
    pub web_server_host: String,
    pub web_server_port: u16,
    pub openai_api_key: Option<SecretString>,
    pub openai_api_base: Option<String>,
    /// Models tried in order when drafting text.
    pub openai_models: Vec<String>,
    pub openai_timeout_secs: u64,
    pub canva_client_id: Option<String>,
    pub canva_client_secret: Option<SecretString>,
    pub canva_base_url: String,
    pub canva_token_url: String,
    pub cloudmersive_api_key: Option<SecretString>,
    pub cloudmersive_base_url: String,
    pub output_dir: PathBuf,
    pub cleanup_delay_secs: u64,
    pub rate_limit_max_requests: u32,
    pub rate_limit_window_secs: u64,
    /// Key rate limits on `X-Forwarded-For` instead of the peer address.
    pub rate_limit_trust_proxy: bool,
    pub deck_author: String,
    pub deck_company: String,
}

fn non_empty(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parsed<T: std::str::FromStr>(name: &str, default: T) -> T {
    non_empty(name)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_models(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    pub fn from_env() -> Self {
        let models = parse_models(&non_empty("OPENAI_MODELS").unwrap_or_else(|| DEFAULT_MODELS.to_string()));

        Self {
            web_server_host: non_empty("WEB_SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            web_server_port: parsed("PORT", 3040),
            openai_api_key: non_empty("OPENAI_API_KEY")
                .filter(|key| key != OPENAI_KEY_PLACEHOLDER)
                .map(SecretString::from),
            openai_api_base: non_empty("OPENAI_API_BASE"),
            openai_models: if models.is_empty() {
                parse_models(DEFAULT_MODELS)
            } else {
                models
            },
            openai_timeout_secs: parsed("OPENAI_TIMEOUT_SECS", 60),
            canva_client_id: non_empty("CANVA_CLIENT_ID"),
            canva_client_secret: non_empty("CANVA_CLIENT_SECRET").map(SecretString::from),
            canva_base_url: non_empty("CANVA_BASE_URL")
                .unwrap_or_else(|| "https://api.canva.com".to_string()),
            canva_token_url: non_empty("CANVA_TOKEN_URL")
                .unwrap_or_else(|| "https://api.canva.com/oauth/token".to_string()),
            cloudmersive_api_key: non_empty("CLOUDMERSIVE_API_KEY").map(SecretString::from),
            cloudmersive_base_url: non_empty("CLOUDMERSIVE_BASE_URL")
                .unwrap_or_else(|| "https://api.cloudmersive.com".to_string()),
            output_dir: PathBuf::from(non_empty("OUTPUT_DIR").unwrap_or_else(|| "generated".to_string())),
            cleanup_delay_secs: parsed("CLEANUP_DELAY_SECS", 5),
            rate_limit_max_requests: parsed("RATE_LIMIT_MAX_REQUESTS", 100),
            rate_limit_window_secs: parsed("RATE_LIMIT_WINDOW_SECS", 900),
            rate_limit_trust_proxy: parsed("RATE_LIMIT_TRUST_PROXY", false),
            deck_author: non_empty("DECK_AUTHOR").unwrap_or_else(|| "BBSF Dev Team".to_string()),
            deck_company: non_empty("DECK_COMPANY")
                .unwrap_or_else(|| "Professional AI Tools".to_string()),
        }
    }

    pub fn has_text_credentials(&self) -> bool {
        self.openai_api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().is_empty())
    }

    pub fn has_design_credentials(&self) -> bool {
        self.canva_client_id.is_some() && self.canva_client_secret.is_some()
    }

    pub fn has_placeholder_credentials(&self) -> bool {
        self.cloudmersive_api_key.is_some()
    }

    pub fn openai_timeout(&self) -> Duration {
        Duration::from_secs(self.openai_timeout_secs)
    }

    pub fn cleanup_delay(&self) -> Duration {
        Duration::from_secs(self.cleanup_delay_secs)
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }

    /// Logs which optional collaborators are available at startup.
    pub fn log_summary(&self) {
        log::info!(
            "Text generation: {} (models: {})",
            if self.has_text_credentials() { "configured" } else { "demo mode" },
            self.openai_models.join(", ")
        );
        log::info!(
            "Design service: {}",
            if self.has_design_credentials() { "configured" } else { "demo mode" }
        );
        log::info!(
            "Placeholder service: {}",
            if self.has_placeholder_credentials() { "configured" } else { "not configured" }
        );
        log::info!("Temporary output directory: {}", self.output_dir.display());
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 3040,
            openai_api_key: None,
            openai_api_base: None,
            openai_models: parse_models(DEFAULT_MODELS),
            openai_timeout_secs: 1,
            canva_client_id: None,
            canva_client_secret: None,
            canva_base_url: "http://127.0.0.1:9".to_string(),
            canva_token_url: "http://127.0.0.1:9/oauth/token".to_string(),
            cloudmersive_api_key: None,
            cloudmersive_base_url: "http://127.0.0.1:9".to_string(),
            output_dir: env::temp_dir().join("deckgen-test"),
            cleanup_delay_secs: 0,
            rate_limit_max_requests: 100,
            rate_limit_window_secs: 900,
            rate_limit_trust_proxy: false,
            deck_author: "BBSF Dev Team".to_string(),
            deck_company: "Professional AI Tools".to_string(),
        }
    }
}
