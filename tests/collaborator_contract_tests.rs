use std::{
    collections::HashMap,
    io::{Cursor, Read, Write},
    sync::Arc,
    time::Duration,
};

use async_trait::async_trait;
use tokio::sync::RwLock;
use zip::{write::SimpleFileOptions, ZipArchive, ZipWriter};

use deckgen_server::{
    errors::{AppError, UpstreamError},
    models::{
        domain::{Deck, GenerationRequest, TextSource},
        dto::response::DesignTemplateDto,
    },
    services::{
        design_service::{DesignHandle, DesignService},
        layout_engine::LayoutEngine,
        placeholder_service::PlaceholderService,
        pptx_writer::{self, inspect, DocumentMetadata},
        presentation_service::PresentationService,
        temp_files::TempFileStore,
        text_generation::{ChatPrompt, ModelChain, TextGenerator},
        theme_registry::resolve_theme,
    },
};

/// Answers per model from a script and records every model it was asked for.
struct ScriptedTextGenerator {
    replies: HashMap<String, Result<String, UpstreamError>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl ScriptedTextGenerator {
    fn new(replies: Vec<(&str, Result<String, UpstreamError>)>) -> Self {
        Self {
            replies: replies
                .into_iter()
                .map(|(model, reply)| (model.to_string(), reply))
                .collect(),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl TextGenerator for ScriptedTextGenerator {
    async fn complete(&self, model: &str, _prompt: &ChatPrompt) -> Result<String, UpstreamError> {
        self.calls.write().await.push(model.to_string());
        self.replies
            .get(model)
            .cloned()
            .unwrap_or_else(|| Err(UpstreamError::NotFound(format!("{} does not exist", model))))
    }
}

/// Never answers within any reasonable timeout.
struct StalledTextGenerator;

#[async_trait]
impl TextGenerator for StalledTextGenerator {
    async fn complete(&self, _model: &str, _prompt: &ChatPrompt) -> Result<String, UpstreamError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(String::new())
    }
}

/// Rewrites every XML part of the package, replacing the token literally.
struct InMemoryPlaceholderService {
    replaced: Arc<RwLock<Vec<String>>>,
}

impl InMemoryPlaceholderService {
    fn new() -> Self {
        Self {
            replaced: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

fn xml_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[async_trait]
impl PlaceholderService for InMemoryPlaceholderService {
    async fn replace_all(
        &self,
        document: Vec<u8>,
        token: &str,
        replacement: &str,
    ) -> Result<Vec<u8>, UpstreamError> {
        let io = |e: std::io::Error| UpstreamError::Other(e.to_string());
        let zip = |e: zip::result::ZipError| UpstreamError::Other(e.to_string());

        let mut archive = ZipArchive::new(Cursor::new(document)).map_err(zip)?;
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for i in 0..archive.len() {
            let mut file = archive.by_index(i).map_err(zip)?;
            let name = file.name().to_string();
            let mut content = Vec::new();
            file.read_to_end(&mut content).map_err(io)?;

            if name.ends_with(".xml") {
                let text = String::from_utf8_lossy(&content).replace(token, &xml_escape(replacement));
                content = text.into_bytes();
            }
            writer.start_file(name, SimpleFileOptions::default()).map_err(zip)?;
            writer.write_all(&content).map_err(io)?;
        }

        self.replaced.write().await.push(token.to_string());
        Ok(writer.finish().map_err(zip)?.into_inner())
    }
}

/// Keeps created decks and exports them through the local writer.
struct InMemoryDesignService {
    decks: Arc<RwLock<HashMap<String, Deck>>>,
}

impl InMemoryDesignService {
    fn new() -> Self {
        Self {
            decks: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl DesignService for InMemoryDesignService {
    async fn create_presentation(&self, deck: &Deck, template: &str) -> Result<DesignHandle, UpstreamError> {
        let mut decks = self.decks.write().await;
        let id = format!("{}-{}", template, decks.len() + 1);
        decks.insert(id.clone(), deck.clone());
        Ok(DesignHandle::new(id))
    }

    async fn export_presentation(&self, handle: &DesignHandle) -> Result<Vec<u8>, UpstreamError> {
        let decks = self.decks.read().await;
        let deck = decks
            .get(&handle.id)
            .ok_or_else(|| UpstreamError::NotFound(handle.id.clone()))?;

        let theme = resolve_theme("ai-creative");
        let pages = LayoutEngine::new(theme).layout(deck);
        pptx_writer::serialize(&pages, &theme, &DocumentMetadata::new(&deck.title, &deck.subtitle))
            .map_err(|e| UpstreamError::Other(e.to_string()))
    }

    async fn templates(&self) -> Result<Vec<DesignTemplateDto>, UpstreamError> {
        Ok(vec![DesignTemplateDto {
            id: "pitch".to_string(),
            name: "Pitch Deck".to_string(),
            thumbnail: None,
            category: Some("Business".to_string()),
        }])
    }
}

const MODELS: [&str; 3] = ["gpt-4", "gpt-4o-mini", "gpt-3.5-turbo"];

const OUTLINE_REPLY: &str = r#"```json
{
  "title": "Remote Work Policy",
  "subtitle": "Working well from anywhere",
  "slides": [
    { "title": "Principles", "content": ["Async first", "Documented decisions"] },
    { "title": "Tooling & Access", "content": ["VPN", "Shared calendars", "Chat etiquette"] }
  ]
}
```"#;

fn files() -> TempFileStore {
    let dir = std::env::temp_dir().join(format!("deckgen-contract-{}", uuid::Uuid::new_v4()));
    TempFileStore::new(dir, Duration::from_millis(0))
}

fn chain(generator: Arc<dyn TextGenerator>, timeout: Duration) -> ModelChain {
    ModelChain::new(
        Some(generator),
        MODELS.iter().map(|m| m.to_string()).collect(),
        timeout,
    )
}

fn request() -> GenerationRequest {
    GenerationRequest::new("Remote Work Policy").with_slides(Some(6))
}

#[tokio::test]
async fn model_chain_tries_models_in_order() {
    let generator = Arc::new(ScriptedTextGenerator::new(vec![
        ("gpt-4", Err(UpstreamError::NotFound("model_not_found".to_string()))),
        ("gpt-4o-mini", Err(UpstreamError::Other("HTTP 502: bad gateway".to_string()))),
        ("gpt-3.5-turbo", Ok("Overview:\nA line long enough to keep".to_string())),
    ]));
    let calls = Arc::clone(&generator.calls);

    let source = chain(generator, Duration::from_secs(5))
        .source(&ChatPrompt::new("system", "user"))
        .await
        .unwrap();

    assert!(matches!(source, TextSource::Generated { .. }));
    assert_eq!(*calls.read().await, MODELS.to_vec());
}

#[tokio::test]
async fn model_chain_treats_timeouts_as_failures() {
    let source = chain(Arc::new(StalledTextGenerator), Duration::from_millis(20))
        .source(&ChatPrompt::new("system", "user"))
        .await
        .unwrap();

    assert!(matches!(source, TextSource::Canned { .. }));
}

#[tokio::test]
async fn model_chain_stops_on_rate_limit() {
    let generator = Arc::new(ScriptedTextGenerator::new(vec![(
        "gpt-4",
        Err(UpstreamError::RateLimit("429 Too Many Requests".to_string())),
    )]));
    let calls = Arc::clone(&generator.calls);

    let err = chain(generator, Duration::from_secs(5))
        .source(&ChatPrompt::new("system", "user"))
        .await
        .unwrap_err();

    assert!(err.is_fatal());
    assert_eq!(calls.read().await.len(), 1);
}

#[tokio::test]
async fn placeholder_path_replaces_every_token() {
    let generator = Arc::new(ScriptedTextGenerator::new(vec![("gpt-4", Ok(OUTLINE_REPLY.to_string()))]));
    let placeholders = Arc::new(InMemoryPlaceholderService::new());
    let replaced = Arc::clone(&placeholders.replaced);

    let service = PresentationService::new(
        chain(generator, Duration::from_secs(5)),
        None,
        Some(placeholders as Arc<dyn PlaceholderService>),
        files(),
    );
    let document = service.build_presentation("contract-1", &request()).await.unwrap();

    assert_eq!(inspect::slide_count(&document.bytes).unwrap(), 4);
    assert_eq!(replaced.read().await.len(), 8);

    let title = inspect::slide_text(&document.bytes, 1).unwrap();
    assert!(title.iter().any(|t| t == "Remote Work Policy"));
    assert!(title.iter().all(|t| !t.contains("{{")));

    let tooling = inspect::slide_text(&document.bytes, 3).unwrap();
    assert!(tooling.iter().any(|t| t == "Tooling &amp; Access"));
}

#[tokio::test]
async fn placeholder_path_rejects_canned_text() {
    let generator = Arc::new(ScriptedTextGenerator::new(vec![]));
    let service = PresentationService::new(
        chain(generator, Duration::from_secs(5)),
        None,
        Some(Arc::new(InMemoryPlaceholderService::new()) as Arc<dyn PlaceholderService>),
        files(),
    );

    let err = service.build_presentation("contract-2", &request()).await.unwrap_err();
    assert!(matches!(err, AppError::UpstreamUnavailable(_)));
}

#[tokio::test]
async fn design_path_returns_the_exported_deck() {
    let generator = Arc::new(ScriptedTextGenerator::new(vec![("gpt-4", Ok(OUTLINE_REPLY.to_string()))]));
    let design = Arc::new(InMemoryDesignService::new());
    let decks = Arc::clone(&design.decks);

    let service = PresentationService::new(
        chain(generator, Duration::from_secs(5)),
        Some(design as Arc<dyn DesignService>),
        None,
        files(),
    );
    let document = service.design_presentation("contract-3", &request()).await.unwrap();

    assert!(document.filename.starts_with("canva-presentation-"));
    assert_eq!(inspect::slide_count(&document.bytes).unwrap(), 4);
    let stored = decks.read().await;
    assert_eq!(stored.get("business-1").map(|d| d.title.as_str()), Some("Remote Work Policy"));
}

#[tokio::test]
async fn design_templates_come_from_the_service() {
    let service = PresentationService::new(
        ModelChain::new(None, Vec::new(), Duration::from_secs(1)),
        Some(Arc::new(InMemoryDesignService::new()) as Arc<dyn DesignService>),
        None,
        files(),
    );

    let templates = service.design_templates().await;
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0].id, "pitch");
}
