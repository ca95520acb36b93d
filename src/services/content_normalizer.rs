use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::demo_content::{
    CannedSlide, AGENDA_TITLE, CONCLUSION, DEMO_CONTENT, DESIGN_DEMO_MAX_SLIDES,
    DESIGN_DEMO_OUTLINE, EMPTY_SLIDE_LINE, FALLBACK_AGENDA, FALLBACK_CONTENT,
};
use crate::models::domain::{Deck, GenerationRequest, IconKind, SlideKind, SlideRecord};
use crate::models::dto::request::{OutlineDto, OutlineSlideDto};

const AGENDA_KEYWORDS: [&str; 8] = [
    "agenda",
    "overview",
    "introduction",
    "challenges",
    "solutions",
    "implementation",
    "conclusion",
    "next steps",
];
const MAX_AGENDA_ITEMS: usize = 6;

/// Title, agenda and conclusion always accompany the extracted content.
const UNSTRUCTURED_RESERVED: usize = 3;
/// Title and conclusion accompany a caller's outline.
const STRUCTURED_RESERVED: usize = 2;

/// A leading bullet or `1.` / `1)` ordinal followed by whitespace.
static LIST_MARKUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[-*•]|\d+[.)])\s+").expect("list pattern is valid"));
static TITLE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][^.!?]*$").expect("title pattern is valid"));

/// Subtitle used for decks drafted by a language model.
pub fn generated_subtitle(request: &GenerationRequest) -> String {
    format!("Professional {} Presentation", request.presentation_type_label())
}

/// Subtitle used for decks built from built-in content.
pub fn canned_subtitle(request: &GenerationRequest) -> String {
    format!("AI-Generated {} Presentation", request.presentation_type_label())
}

/// Converts generated text into a deck. A JSON outline embedded anywhere in
/// the text is preferred; anything else is read as free-form prose.
pub fn normalize(raw: &str, request: &GenerationRequest) -> Deck {
    match parse_outline(raw) {
        Some(outline) => normalize_outline(&outline, request),
        None => normalize_text(raw, request),
    }
}

/// Extracts the outermost `{ ... }` span and parses it as an outline.
/// Returns `None` when there is no span, it is malformed, or it has no slides.
pub fn parse_outline(raw: &str) -> Option<OutlineDto> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }

    let outline: OutlineDto = match serde_json::from_str(&raw[start..=end]) {
        Ok(outline) => outline,
        Err(e) => {
            log::debug!("Generated text is not a JSON outline: {}", e);
            return None;
        }
    };

    match &outline.slides {
        Some(slides) if !slides.is_empty() => Some(outline),
        _ => None,
    }
}

/// Builds a deck from a structured outline.
pub fn normalize_outline(outline: &OutlineDto, request: &GenerationRequest) -> Deck {
    let title = non_blank(outline.title.as_deref()).unwrap_or(&request.topic).to_string();
    let subtitle = non_blank(outline.subtitle.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| generated_subtitle(request));

    let caller_slides = outline.slides.as_deref().unwrap_or_default();
    let last = caller_slides.len().saturating_sub(1);
    let budget = request.slide_target.saturating_sub(STRUCTURED_RESERVED);

    let mut conclusion = None;
    let mut body = Vec::new();
    for (i, slide) in caller_slides.iter().enumerate() {
        let mut kind = slide
            .kind
            .as_deref()
            .map(SlideKind::from_tag)
            .unwrap_or(SlideKind::Content);

        if kind == SlideKind::Conclusion && i == last {
            conclusion = Some(outline_record(i + 2, slide, kind));
            continue;
        }
        if kind == SlideKind::Conclusion || kind == SlideKind::Title {
            kind = SlideKind::Content;
        }
        body.push(outline_record(i + 2, slide, kind));
    }
    body.truncate(budget);

    let mut slides = Vec::with_capacity(body.len() + STRUCTURED_RESERVED);
    slides.push(SlideRecord::title_slide(title.clone(), subtitle.clone()));
    slides.extend(body);
    slides.push(conclusion.unwrap_or_else(conclusion_record));

    Deck {
        title,
        subtitle,
        slides,
        generated_with: None,
    }
}

fn outline_record(position: usize, slide: &OutlineSlideDto, kind: SlideKind) -> SlideRecord {
    let title = slide.title.clone().unwrap_or_default();
    let icon = slide
        .icon
        .as_deref()
        .and_then(IconKind::from_name)
        .unwrap_or_else(|| match kind {
            SlideKind::Agenda => IconKind::List,
            SlideKind::Conclusion => IconKind::Check,
            _ => IconKind::for_title(&title),
        });

    let mut content = slide.content_lines();
    if kind == SlideKind::Agenda {
        content.truncate(MAX_AGENDA_ITEMS);
    }

    ensure_content(SlideRecord::new(position, title, content, kind, icon))
}

/// Builds a deck from free-form text: title, agenda, extracted content, conclusion.
pub fn normalize_text(raw: &str, request: &GenerationRequest) -> Deck {
    let lines: Vec<String> = raw
        .lines()
        .map(strip_emphasis)
        .filter(|line| !line.is_empty())
        .collect();

    let title = request.topic.clone();
    let subtitle = generated_subtitle(request);
    let budget = request.slide_target.saturating_sub(UNSTRUCTURED_RESERVED);

    let mut slides = vec![
        SlideRecord::title_slide(title.clone(), subtitle.clone()),
        agenda_record(extract_agenda(&lines)),
    ];
    slides.extend(extract_content_slides(&lines, budget));
    slides.push(conclusion_record());

    Deck {
        title,
        subtitle,
        slides,
        generated_with: None,
    }
}

/// Agenda candidates are lines naming a keyword, 10 to 99 characters long.
/// Falls back to a fixed agenda when none are found.
pub fn extract_agenda(lines: &[String]) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();

    for line in lines {
        let length = line.chars().count();
        if !(10..100).contains(&length) {
            continue;
        }
        let lower = line.to_lowercase();
        if !AGENDA_KEYWORDS.iter().any(|keyword| lower.contains(keyword)) {
            continue;
        }

        let item = strip_bullet(line);
        if !item.is_empty() && !items.iter().any(|existing| existing == item) {
            items.push(item.to_string());
        }
        if items.len() == MAX_AGENDA_ITEMS {
            break;
        }
    }

    if items.is_empty() {
        return FALLBACK_AGENDA.iter().map(|item| item.to_string()).collect();
    }
    items
}

/// Walks the lines opening a slide at every title candidate and collecting
/// longer lines beneath it. At most `budget` slides are kept.
pub fn extract_content_slides(lines: &[String], budget: usize) -> Vec<SlideRecord> {
    let mut slides = Vec::new();
    let mut current: Option<(String, Vec<String>)> = None;

    for line in lines {
        if is_title_candidate(line) {
            if let Some(open) = current.take() {
                if slides.len() < budget {
                    slides.push(open);
                }
            }
            let title = line.trim_end_matches(':').trim().to_string();
            current = Some((title, Vec::new()));
        } else if line.chars().count() > 10 {
            if let Some((_, content)) = current.as_mut() {
                content.push(strip_bullet(line).to_string());
            }
        }
    }
    if let Some(open) = current {
        if slides.len() < budget {
            slides.push(open);
        }
    }

    if slides.is_empty() {
        return FALLBACK_CONTENT
            .iter()
            .enumerate()
            .map(|(i, canned)| canned_record(i + 3, canned, SlideKind::Content))
            .collect();
    }

    slides
        .into_iter()
        .take(budget)
        .enumerate()
        .map(|(i, (title, content))| {
            let icon = IconKind::for_title(&title);
            ensure_content(SlideRecord::new(i + 3, title, content, SlideKind::Content, icon))
        })
        .collect()
}

fn is_title_candidate(line: &str) -> bool {
    let length = line.chars().count();
    (5..80).contains(&length) && (line.ends_with(':') || TITLE_SHAPE.is_match(line))
}

/// Deck used when no generated text is available.
pub fn demo_deck(request: &GenerationRequest) -> Deck {
    let title = request.topic.clone();
    let subtitle = canned_subtitle(request);
    let budget = request.slide_target.saturating_sub(UNSTRUCTURED_RESERVED);

    let mut slides = vec![
        SlideRecord::title_slide(title.clone(), subtitle.clone()),
        agenda_record(FALLBACK_AGENDA.iter().map(|item| item.to_string()).collect()),
    ];
    slides.extend(
        DEMO_CONTENT
            .iter()
            .take(budget)
            .enumerate()
            .map(|(i, canned)| canned_record(i + 3, canned, SlideKind::Content)),
    );
    slides.push(conclusion_record());

    Deck {
        title,
        subtitle,
        slides,
        generated_with: None,
    }
}

/// Outline sent to the design service when no generated outline exists.
pub fn design_demo_outline(request: &GenerationRequest) -> OutlineDto {
    let count = request.slide_target.min(DESIGN_DEMO_MAX_SLIDES);

    OutlineDto {
        title: Some(request.topic.clone()),
        subtitle: Some(canned_subtitle(request)),
        slides: Some(
            DESIGN_DEMO_OUTLINE
                .iter()
                .take(count)
                .map(|canned| OutlineSlideDto {
                    title: Some(canned.title.to_string()),
                    content: Some(serde_json::json!(canned.lines)),
                    kind: Some(SlideKind::Content.to_string()),
                    icon: Some(canned.icon.to_string()),
                })
                .collect(),
        ),
        style: request.style.clone(),
    }
}

fn agenda_record(items: Vec<String>) -> SlideRecord {
    SlideRecord::new(2, AGENDA_TITLE, items, SlideKind::Agenda, IconKind::List)
}

fn conclusion_record() -> SlideRecord {
    canned_record(0, &CONCLUSION, SlideKind::Conclusion)
}

fn canned_record(position: usize, canned: &CannedSlide, kind: SlideKind) -> SlideRecord {
    SlideRecord::new(
        position,
        canned.title,
        canned.lines.iter().map(|line| line.to_string()),
        kind,
        IconKind::from_name(canned.icon).unwrap_or(IconKind::Default),
    )
}

fn ensure_content(mut record: SlideRecord) -> SlideRecord {
    if record.content.is_empty() {
        record.content.push(EMPTY_SLIDE_LINE.to_string());
    }
    record
}

/// Removes markdown heading markers and bold emphasis.
fn strip_emphasis(line: &str) -> String {
    line.replace("**", "")
        .trim()
        .trim_start_matches('#')
        .trim()
        .to_string()
}

fn strip_bullet(line: &str) -> &str {
    let line = line.trim();
    match LIST_MARKUP.find(line) {
        Some(found) => line[found.end()..].trim(),
        None => line,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(slides: u32) -> GenerationRequest {
        GenerationRequest::new("Digital Transformation Strategy").with_slides(Some(slides))
    }

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(strip_emphasis).filter(|l| !l.is_empty()).collect()
    }

    #[test]
    fn test_agenda_falls_back_without_keywords() {
        let text = "Market Forces:\nprices keep rising in every segment.\nsupply chains are under pressure.";
        let deck = normalize(text, &request(10));

        let agenda = &deck.slides[1];
        assert_eq!(agenda.kind, SlideKind::Agenda);
        assert_eq!(agenda.content, FALLBACK_AGENDA.to_vec());
    }

    #[test]
    fn test_agenda_extraction_strips_markup_and_dedupes() {
        let items = extract_agenda(&lines(
            "1. Introduction to the program\n- Introduction to the program\n* Key challenges ahead\noverview\n",
        ));

        assert_eq!(items, vec!["Introduction to the program", "Key challenges ahead"]);
    }

    #[test]
    fn test_agenda_is_capped() {
        let text = (0..10)
            .map(|i| format!("Overview item number {}", i))
            .collect::<Vec<_>>()
            .join("\n");

        assert_eq!(extract_agenda(&lines(&text)).len(), MAX_AGENDA_ITEMS);
    }

    #[test]
    fn test_single_title_with_three_lines() {
        let text = "Market Analysis:\n- demand is growing in every region.\n- costs are falling year over year.\n- competition is intensifying quickly.";
        let deck = normalize(text, &request(10));

        let content: Vec<&SlideRecord> = deck
            .slides
            .iter()
            .filter(|s| s.kind == SlideKind::Content)
            .collect();
        assert_eq!(content.len(), 1);
        assert_eq!(content[0].title, "Market Analysis");
        assert_eq!(
            content[0].content,
            vec![
                "demand is growing in every region.",
                "costs are falling year over year.",
                "competition is intensifying quickly."
            ]
        );
        assert_eq!(deck.slides.first().map(|s| s.kind), Some(SlideKind::Title));
        assert_eq!(deck.slides.last().map(|s| s.kind), Some(SlideKind::Conclusion));
        assert_eq!(deck.slide_count(), 4);
    }

    #[test]
    fn test_content_lines_keep_leading_figures() {
        let text = "Market Data:\n2024 revenue grew 15% year over year\n30% of users churn within a month\n2) renewals are up this quarter";
        let deck = normalize(text, &request(10));

        let slide = deck
            .slides
            .iter()
            .find(|s| s.title == "Market Data")
            .expect("heading becomes a slide");
        assert_eq!(
            slide.content,
            vec![
                "2024 revenue grew 15% year over year",
                "30% of users churn within a month",
                "renewals are up this quarter"
            ]
        );
    }

    #[test]
    fn test_content_slides_truncated_to_budget() {
        let text = "First Topic:\nthe first topic has details.\nSecond Topic:\nthe second topic has details.\nThird Topic:\nthe third topic has details.\nFourth Topic:\nthe fourth topic has details.";
        let deck = normalize(text, &request(5));

        let titles: Vec<&str> = deck
            .slides
            .iter()
            .filter(|s| s.kind == SlideKind::Content)
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(titles, vec!["First Topic", "Second Topic"]);
        assert_eq!(deck.slide_count(), 5);
    }

    #[test]
    fn test_no_title_candidates_uses_fallback_content() {
        let deck = normalize("nothing here looks like a heading at all.", &request(10));

        let content: Vec<&str> = deck
            .slides
            .iter()
            .filter(|s| s.kind == SlideKind::Content)
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(
            content,
            vec!["Introduction and Overview", "Key Challenges and Opportunities"]
        );
    }

    #[test]
    fn test_heading_without_content_gets_fallback_line() {
        let deck = normalize("## Lonely Heading", &request(10));
        let slide = deck
            .slides
            .iter()
            .find(|s| s.title == "Lonely Heading")
            .expect("heading becomes a slide");

        assert_eq!(slide.content, vec![EMPTY_SLIDE_LINE]);
    }

    #[test]
    fn test_deck_bounds_hold_for_every_target() {
        let text = (0..40)
            .map(|i| format!("Section {}:\nthis section explains point {}.", i, i))
            .collect::<Vec<_>>()
            .join("\n");

        for target in 5..=25 {
            let deck = normalize(&text, &request(target));
            assert_eq!(deck.slides[0].kind, SlideKind::Title);
            assert_eq!(deck.slides.last().map(|s| s.kind), Some(SlideKind::Conclusion));
            assert!(deck.slide_count() <= target as usize);
        }
    }

    #[test]
    fn test_structured_outline_is_preferred() {
        let raw = r#"Here is your deck:
        {"title": "Cloud Roadmap", "subtitle": "2025 plan", "slides": [
            {"title": "Team Structure", "content": ["Platform squad", "Data squad"]},
            {"title": "Wrap Up", "content": "Ship it", "type": "conclusion", "icon": "goal"}
        ]}
        Good luck!"#;
        let deck = normalize(raw, &request(10));

        assert_eq!(deck.title, "Cloud Roadmap");
        assert_eq!(deck.subtitle, "2025 plan");
        assert_eq!(deck.slide_count(), 3);
        assert_eq!(deck.slides[1].icon, IconKind::People);
        let conclusion = &deck.slides[2];
        assert_eq!(conclusion.kind, SlideKind::Conclusion);
        assert_eq!(conclusion.title, "Wrap Up");
        assert_eq!(conclusion.icon, IconKind::Target);
    }

    #[test]
    fn test_malformed_outline_falls_back_to_text() {
        let raw = "Growth Plan:\n{not json at all}\nrevenue should double next year.";
        let deck = normalize(raw, &request(10));

        assert_eq!(deck.title, "Digital Transformation Strategy");
        assert!(deck.slides.iter().any(|s| s.title == "Growth Plan"));
    }

    #[test]
    fn test_outline_budget_and_demoted_conclusion() {
        let slides: Vec<OutlineSlideDto> = (0..10)
            .map(|i| OutlineSlideDto {
                title: Some(format!("Point {}", i)),
                content: Some(serde_json::json!(["detail"])),
                kind: Some(if i == 0 { "conclusion" } else { "content" }.to_string()),
                icon: None,
            })
            .collect();
        let outline = OutlineDto {
            slides: Some(slides),
            ..Default::default()
        };

        let deck = normalize_outline(&outline, &request(6));
        assert_eq!(deck.slide_count(), 6);
        assert_eq!(deck.slides[1].kind, SlideKind::Content);
        assert_eq!(deck.slides[5].title, CONCLUSION.title);
    }

    #[test]
    fn test_outline_agenda_is_capped() {
        let outline = OutlineDto {
            slides: Some(vec![OutlineSlideDto {
                title: Some("Agenda".to_string()),
                content: Some(serde_json::json!(["a", "b", "c", "d", "e", "f", "g", "h"])),
                kind: Some("agenda".to_string()),
                icon: None,
            }]),
            ..Default::default()
        };

        let deck = normalize_outline(&outline, &request(10));
        assert_eq!(deck.slides[1].content.len(), MAX_AGENDA_ITEMS);
        assert_eq!(deck.slides[1].icon, IconKind::List);
    }

    #[test]
    fn test_demo_deck_respects_budget() {
        let deck = demo_deck(&request(5));
        assert_eq!(deck.slide_count(), 5);
        assert_eq!(deck.subtitle, "AI-Generated Business Presentation");

        let full = demo_deck(&request(25));
        assert_eq!(full.slide_count(), 8);
        assert_eq!(full.slides[5].icon, IconKind::Default);
    }

    #[test]
    fn test_design_demo_outline_is_capped() {
        let outline = design_demo_outline(&request(5));
        assert_eq!(outline.slides.as_ref().map(Vec::len), Some(5));

        let outline = design_demo_outline(&request(20));
        assert_eq!(outline.slides.as_ref().map(Vec::len), Some(6));
        assert_eq!(outline.title.as_deref(), Some("Digital Transformation Strategy"));
    }
}
