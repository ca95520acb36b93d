use std::sync::Arc;

use crate::{
    config::Config,
    services::{
        design_service::{CanvaClient, DesignService},
        placeholder_service::{CloudmersiveClient, PlaceholderService},
        presentation_service::PresentationService,
        temp_files::TempFileStore,
        text_generation::{ModelChain, OpenAiTextGenerator, TextGenerator},
    },
};

#[derive(Clone)]
pub struct AppState {
    pub presentation_service: Arc<PresentationService>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wires the collaborators for which credentials are present.
    pub fn new(config: Config) -> Self {
        let generator = config.openai_api_key.as_ref().map(|key| {
            Arc::new(OpenAiTextGenerator::new(key, config.openai_api_base.as_deref()))
                as Arc<dyn TextGenerator>
        });
        let models = ModelChain::new(generator, config.openai_models.clone(), config.openai_timeout());

        let design = match (&config.canva_client_id, &config.canva_client_secret) {
            (Some(id), Some(secret)) => Some(Arc::new(CanvaClient::new(
                id.clone(),
                secret.clone(),
                config.canva_base_url.clone(),
                config.canva_token_url.clone(),
            )) as Arc<dyn DesignService>),
            _ => None,
        };

        let placeholders = config.cloudmersive_api_key.as_ref().map(|key| {
            Arc::new(CloudmersiveClient::new(key.clone(), config.cloudmersive_base_url.clone()))
                as Arc<dyn PlaceholderService>
        });

        let files = TempFileStore::new(config.output_dir.clone(), config.cleanup_delay());
        let presentation_service =
            PresentationService::new(models, design, placeholders, files).with_credits(&config);

        Self {
            presentation_service: Arc::new(presentation_service),
            config: Arc::new(config),
        }
    }

    pub fn with_service(config: Config, presentation_service: PresentationService) -> Self {
        Self {
            presentation_service: Arc::new(presentation_service),
            config: Arc::new(config),
        }
    }
}
