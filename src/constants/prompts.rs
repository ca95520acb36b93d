use crate::models::domain::GenerationRequest;

pub const DESIGNER_SYSTEM_PROMPT: &str = "You are an expert PowerPoint presentation designer and creator. You have deep knowledge of professional presentation design, business communication, and visual storytelling. Create engaging, well-structured presentations that follow industry best practices.";

pub const OUTLINE_SYSTEM_PROMPT: &str = "You are an expert PowerPoint presentation designer. Create engaging, professional content that follows best practices.";

const OUTLINE_FORMAT: &str = r#"{
  "title": "Main presentation title",
  "subtitle": "Subtitle or tagline",
  "slides": [
    {
      "title": "Slide Title",
      "content": ["Bullet point 1", "Bullet point 2", "Bullet point 3"],
      "type": "content"
    }
  ]
}"#;

struct Requirements<'a> {
    audience: &'a str,
    style: &'a str,
    presentation_type: &'a str,
    additional_info: &'a str,
}

impl<'a> Requirements<'a> {
    fn of(request: &'a GenerationRequest) -> Self {
        Self {
            audience: request
                .audience
                .as_deref()
                .unwrap_or("General business audience"),
            style: request.style.as_deref().unwrap_or("Professional and modern"),
            presentation_type: request.presentation_type.as_deref().unwrap_or("business"),
            additional_info: request.additional_info.as_deref().unwrap_or("None"),
        }
    }
}

/// Prompt for free-form deck text; the reply is parsed line by line.
pub fn deck_prompt(request: &GenerationRequest) -> String {
    let req = Requirements::of(request);
    format!(
        r#"You are an expert PowerPoint presentation creator. Create a professional PowerPoint presentation for the topic: "{topic}".

Requirements:
- Target audience: {audience}
- Style: {style}
- Presentation type: {kind}
- Number of slides: {slides}
- Additional context: {info}
- Template style: {theme}

Create a complete PowerPoint presentation with:
1. Professional title slide with compelling title and subtitle
2. Agenda/overview slide with clear structure
3. Main content slides with detailed bullet points
4. Conclusion slide with key takeaways

Write each slide title on its own line ending with a colon, followed by its bullet points."#,
        topic = request.topic,
        audience = req.audience,
        style = req.style,
        kind = req.presentation_type,
        slides = request.slide_target,
        info = req.additional_info,
        theme = request.theme.as_deref().unwrap_or("ai-modern"),
    )
}

/// Prompt asking for a JSON outline.
pub fn outline_prompt(request: &GenerationRequest) -> String {
    let req = Requirements::of(request);
    format!(
        r#"Create a professional PowerPoint presentation outline for: "{topic}"

Requirements:
- Target audience: {audience}
- Style: {style}
- Presentation type: {kind}
- Number of slides: {slides}
- Additional context: {info}

Please provide the content in this exact JSON format:
{format}

Make the content professional, engaging, and suitable for the target audience."#,
        topic = request.topic,
        audience = req.audience,
        style = req.style,
        kind = req.presentation_type,
        slides = request.slide_target,
        info = req.additional_info,
        format = OUTLINE_FORMAT,
    )
}
