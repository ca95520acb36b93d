use std::sync::Arc;

use crate::{
    config::Config,
    constants::{
        demo_content::{DESIGN_DEMO_NOTICE, DESIGN_DEMO_NOTICE_TITLE},
        prompts::{deck_prompt, outline_prompt, DESIGNER_SYSTEM_PROMPT, OUTLINE_SYSTEM_PROMPT},
    },
    errors::{AppError, AppResult, UpstreamError},
    models::{
        domain::{
            Deck, GeneratedDocument, GenerationRequest, GenerationStage, IconKind, PageDescriptor,
            SlideKind, SlideRecord, TextSource, Theme, MAX_SLIDES,
        },
        dto::{request::OutlineDto, response::DesignTemplateDto},
    },
    services::{
        content_normalizer,
        design_service::{builtin_templates, DesignHandle, DesignService},
        layout_engine::LayoutEngine,
        placeholder_service::PlaceholderService,
        pptx_writer::{self, inspect, DocumentMetadata},
        temp_files::TempFileStore,
        text_generation::{ChatPrompt, ModelChain},
        theme_registry::{resolve_theme, resolve_theme_for_style},
    },
};

/// Placeholder decks carry at most this many content slides.
pub const MAX_TEMPLATE_SLIDES: usize = 10;
const DEFAULT_DESIGN_TEMPLATE: &str = "business";
const OUTLINE_MAX_TOKENS: u32 = 3000;

/// Logs each stage transition of one request.
struct StageLog<'a> {
    request_id: &'a str,
    stage: GenerationStage,
}

impl<'a> StageLog<'a> {
    fn start(request_id: &'a str) -> Self {
        log::info!("[{}] {}", request_id, GenerationStage::Received);
        Self {
            request_id,
            stage: GenerationStage::Received,
        }
    }

    fn advance(&mut self, next: GenerationStage) {
        if self.stage.is_terminal() {
            log::warn!("[{}] ignoring {} after {}", self.request_id, next, self.stage);
            return;
        }
        log::info!("[{}] {} -> {}", self.request_id, self.stage, next);
        self.stage = next;
    }

    /// Records the outcome and passes it through unchanged.
    fn finish<T>(mut self, result: AppResult<T>) -> AppResult<T> {
        match &result {
            Ok(_) => self.advance(GenerationStage::Done),
            Err(e) => {
                log::error!("[{}] failed during {}: {}", self.request_id, self.stage, e);
                self.advance(GenerationStage::Errored);
            }
        }
        result
    }
}

fn timestamped(stem: &str) -> String {
    format!("{}-{}.pptx", stem, chrono::Utc::now().timestamp_millis())
}

/// Runs every generation path: text sourcing, normalization, layout,
/// serialization and hand-off of the finished file.
pub struct PresentationService {
    models: ModelChain,
    design: Option<Arc<dyn DesignService>>,
    placeholders: Option<Arc<dyn PlaceholderService>>,
    files: TempFileStore,
    author: String,
    company: String,
}

impl PresentationService {
    pub fn new(
        models: ModelChain,
        design: Option<Arc<dyn DesignService>>,
        placeholders: Option<Arc<dyn PlaceholderService>>,
        files: TempFileStore,
    ) -> Self {
        Self {
            models,
            design,
            placeholders,
            files,
            author: String::new(),
            company: String::new(),
        }
    }

    pub fn with_credits(mut self, config: &Config) -> Self {
        self.author = config.deck_author.clone();
        self.company = config.deck_company.clone();
        self
    }

    fn render(&self, deck: &Deck, theme: Theme) -> AppResult<Vec<u8>> {
        let pages = LayoutEngine::new(theme).with_author(&self.author).layout(deck);
        self.write(&pages, &theme, &deck.title, &deck.subtitle)
    }

    fn write(&self, pages: &[PageDescriptor], theme: &Theme, title: &str, subject: &str) -> AppResult<Vec<u8>> {
        let metadata = DocumentMetadata::new(title, subject)
            .with_author(&self.author)
            .with_company(&self.company);
        pptx_writer::serialize(pages, theme, &metadata)
    }

    async fn deliver(&self, stem: &str, bytes: Vec<u8>) -> AppResult<GeneratedDocument> {
        let bytes = self.files.persist_and_load(stem, &bytes).await?;
        Ok(GeneratedDocument {
            filename: timestamped(stem),
            bytes,
        })
    }

    /// Full pipeline from a topic. Falls back to built-in content when no
    /// model is configured or every model failed.
    pub async fn generate_content(&self, request_id: &str, request: &GenerationRequest) -> AppResult<GeneratedDocument> {
        let mut stages = StageLog::start(request_id);
        let result = self.run_generate_content(&mut stages, request).await;
        stages.finish(result)
    }

    async fn run_generate_content(
        &self,
        stages: &mut StageLog<'_>,
        request: &GenerationRequest,
    ) -> AppResult<GeneratedDocument> {
        stages.advance(GenerationStage::SourcingText);
        let prompt = ChatPrompt::new(DESIGNER_SYSTEM_PROMPT, deck_prompt(request));
        let source = self.models.source(&prompt).await?;

        stages.advance(GenerationStage::Normalizing);
        let deck = match source {
            TextSource::Generated { model, text } => {
                content_normalizer::normalize(&text, request).with_generated_with(model)
            }
            TextSource::Canned { reason } => {
                log::info!("[{}] using demo content: {}", stages.request_id, reason);
                content_normalizer::demo_deck(request)
            }
        };

        stages.advance(GenerationStage::LayingOut);
        let theme = resolve_theme_for_style(request.theme.as_deref(), request.style.as_deref());

        stages.advance(GenerationStage::Serializing);
        let bytes = self.render(&deck, theme)?;

        stages.advance(GenerationStage::Streaming);
        self.deliver("ai-presentation", bytes).await
    }

    /// Lays out a caller-supplied outline without contacting any collaborator.
    pub async fn generate_from_outline(
        &self,
        request_id: &str,
        outline: &OutlineDto,
        template: Option<&str>,
    ) -> AppResult<GeneratedDocument> {
        let mut stages = StageLog::start(request_id);
        let result = self.run_generate_from_outline(&mut stages, outline, template).await;
        stages.finish(result)
    }

    async fn run_generate_from_outline(
        &self,
        stages: &mut StageLog<'_>,
        outline: &OutlineDto,
        template: Option<&str>,
    ) -> AppResult<GeneratedDocument> {
        let slides = outline
            .slides
            .as_ref()
            .ok_or_else(|| AppError::ValidationError("Presentation slides array is required".to_string()))?;

        stages.advance(GenerationStage::Normalizing);
        let topic = outline
            .title
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| "AI Generated Presentation".to_string());
        let mut request = GenerationRequest::new(topic);
        request.slide_target = (slides.len() + 2).min(MAX_SLIDES);
        request.style = outline.style.clone();
        let deck = content_normalizer::normalize_outline(outline, &request);

        stages.advance(GenerationStage::LayingOut);
        let theme = resolve_theme_for_style(template, outline.style.as_deref());

        stages.advance(GenerationStage::Serializing);
        let bytes = self.render(&deck, theme)?;

        stages.advance(GenerationStage::Streaming);
        self.deliver("presentation", bytes).await
    }

    /// Template-and-substitute path: a deck of placeholder tokens is written
    /// locally and every token is replaced through the placeholder service.
    pub async fn build_presentation(&self, request_id: &str, request: &GenerationRequest) -> AppResult<GeneratedDocument> {
        if !self.models.is_configured() {
            return Err(AppError::NotConfigured {
                what: "OpenAI API key".to_string(),
                suggestion: "Add OPENAI_API_KEY=your-key-here to your .env file".to_string(),
            });
        }
        let placeholders = self.placeholders.as_ref().ok_or_else(|| AppError::NotConfigured {
            what: "Cloudmersive API key".to_string(),
            suggestion: "Add CLOUDMERSIVE_API_KEY=your-key-here to your .env file".to_string(),
        })?;

        let mut stages = StageLog::start(request_id);
        let result = self.run_build_presentation(&mut stages, request, placeholders.as_ref()).await;
        stages.finish(result)
    }

    async fn run_build_presentation(
        &self,
        stages: &mut StageLog<'_>,
        request: &GenerationRequest,
        placeholders: &dyn PlaceholderService,
    ) -> AppResult<GeneratedDocument> {
        stages.advance(GenerationStage::SourcingText);
        let prompt = ChatPrompt::new(DESIGNER_SYSTEM_PROMPT, outline_prompt(request));
        let text = match self.models.source(&prompt).await? {
            TextSource::Generated { text, .. } => text,
            TextSource::Canned { reason } => {
                return Err(AppError::UpstreamUnavailable(format!("OpenAI API error: {}", reason)))
            }
        };

        stages.advance(GenerationStage::Normalizing);
        let deck = content_normalizer::normalize(&text, request);
        let replacements = template_replacements(&deck);
        let template = template_deck(replacements.len().saturating_sub(2) / 2);

        stages.advance(GenerationStage::LayingOut);
        let theme = resolve_theme_for_style(request.theme.as_deref(), request.style.as_deref());
        let pages = LayoutEngine::new(theme).with_author(&self.author).layout(&template);

        stages.advance(GenerationStage::Serializing);
        let mut document = self.write(&pages, &theme, &deck.title, &deck.subtitle)?;
        for (token, value) in &replacements {
            document = placeholders
                .replace_all(document, token, value)
                .await
                .map_err(|e| {
                    log::warn!("[{}] placeholder {} failed: {}", stages.request_id, token, e);
                    AppError::from(e)
                })?;
        }
        inspect::ensure_presentation(&document)?;

        stages.advance(GenerationStage::Streaming);
        self.deliver("presentation", document).await
    }

    /// Design-service path. Any failure short of rejected credentials
    /// degrades to a locally written notice document.
    pub async fn design_presentation(&self, request_id: &str, request: &GenerationRequest) -> AppResult<GeneratedDocument> {
        let mut stages = StageLog::start(request_id);
        let result = self.run_design_presentation(&mut stages, request).await;
        stages.finish(result)
    }

    async fn run_design_presentation(
        &self,
        stages: &mut StageLog<'_>,
        request: &GenerationRequest,
    ) -> AppResult<GeneratedDocument> {
        stages.advance(GenerationStage::SourcingText);
        let prompt = ChatPrompt::new(OUTLINE_SYSTEM_PROMPT, outline_prompt(request)).with_max_tokens(OUTLINE_MAX_TOKENS);
        let outline = match self.models.source(&prompt).await {
            Ok(TextSource::Generated { text, .. }) => content_normalizer::parse_outline(&text),
            Ok(TextSource::Canned { .. }) => None,
            Err(e) => {
                log::warn!("[{}] outline generation failed, using demo outline: {}", stages.request_id, e);
                None
            }
        }
        .unwrap_or_else(|| content_normalizer::design_demo_outline(request));

        stages.advance(GenerationStage::Normalizing);
        let deck = content_normalizer::normalize_outline(&outline, request);
        let template = request.theme.as_deref().unwrap_or(DEFAULT_DESIGN_TEMPLATE);

        stages.advance(GenerationStage::LayingOut);
        let handle = match &self.design {
            Some(design) => match design.create_presentation(&deck, template).await {
                Ok(handle) => handle,
                Err(e @ UpstreamError::Auth(_)) => return Err(e.into()),
                Err(e) => {
                    log::warn!("[{}] design service create failed: {}", stages.request_id, e);
                    DesignHandle::demo()
                }
            },
            None => DesignHandle::demo(),
        };

        stages.advance(GenerationStage::Serializing);
        let exported = match (&self.design, handle.is_demo()) {
            (Some(design), false) => match design.export_presentation(&handle).await {
                Ok(bytes) if inspect::ensure_presentation(&bytes).is_ok() => Some(bytes),
                Ok(_) => {
                    log::warn!("[{}] design service export is not a presentation", stages.request_id);
                    None
                }
                Err(e @ UpstreamError::Auth(_)) => return Err(e.into()),
                Err(e) => {
                    log::warn!("[{}] design service export failed: {}", stages.request_id, e);
                    None
                }
            },
            _ => None,
        };
        let bytes = match exported {
            Some(bytes) => bytes,
            None => self.design_notice(resolve_theme(template))?,
        };

        stages.advance(GenerationStage::Streaming);
        self.deliver("canva-presentation", bytes).await
    }

    fn design_notice(&self, theme: Theme) -> AppResult<Vec<u8>> {
        let page = LayoutEngine::new(theme).notice_page(DESIGN_DEMO_NOTICE_TITLE, DESIGN_DEMO_NOTICE);
        self.write(&[page], &theme, "Canva Demo Presentation", DESIGN_DEMO_NOTICE)
    }

    /// Design-service templates, or the built-in list when it cannot answer.
    pub async fn design_templates(&self) -> Vec<DesignTemplateDto> {
        let Some(design) = &self.design else {
            return builtin_templates();
        };
        match design.templates().await {
            Ok(templates) => templates,
            Err(e) => {
                log::warn!("Fetching design templates failed: {}", e);
                builtin_templates()
            }
        }
    }
}

/// Token/value pairs for a deck: title and subtitle, then one title and one
/// bullet token per slide after the title page.
pub fn template_replacements(deck: &Deck) -> Vec<(String, String)> {
    let mut pairs = vec![
        ("{{TITLE}}".to_string(), deck.title.clone()),
        ("{{SUBTITLE}}".to_string(), deck.subtitle.clone()),
    ];
    for (i, slide) in deck.slides.iter().skip(1).take(MAX_TEMPLATE_SLIDES).enumerate() {
        let n = i + 1;
        pairs.push((format!("{{{{S{}_TITLE}}}}", n), slide.title.clone()));
        pairs.push((format!("{{{{S{}_BULLETS}}}}", n), slide.content.join("\n")));
    }
    pairs
}

/// Deck whose text is nothing but placeholder tokens.
pub fn template_deck(slides: usize) -> Deck {
    let mut records = vec![SlideRecord::title_slide("{{TITLE}}", "{{SUBTITLE}}")];
    records.extend((1..=slides.min(MAX_TEMPLATE_SLIDES)).map(|n| {
        SlideRecord::new(
            n + 1,
            format!("{{{{S{}_TITLE}}}}", n),
            vec![format!("{{{{S{}_BULLETS}}}}", n)],
            SlideKind::Content,
            IconKind::Default,
        )
    }));

    Deck {
        title: "{{TITLE}}".to_string(),
        subtitle: "{{SUBTITLE}}".to_string(),
        slides: records,
        generated_with: None,
    }
}
