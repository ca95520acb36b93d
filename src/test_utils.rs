#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::{Deck, GenerationRequest, IconKind, SlideKind, SlideRecord};
    use crate::models::dto::request::OutlineDto;

    /// A request with every optional field filled in.
    pub fn sample_request() -> GenerationRequest {
        let mut request = GenerationRequest::new("Digital Transformation Strategy").with_slides(Some(10));
        request.audience = Some("Executive leadership".to_string());
        request.style = Some("Corporate and concise".to_string());
        request.presentation_type = Some("business".to_string());
        request.theme = Some("ai-corporate".to_string());
        request
    }

    /// Title, one content slide of each width, and a conclusion.
    pub fn sample_deck() -> Deck {
        let lines = |n: usize| (1..=n).map(|i| format!("Point number {}", i)).collect::<Vec<_>>();
        Deck {
            title: "Digital Transformation Strategy".to_string(),
            subtitle: "Professional Business Presentation".to_string(),
            slides: vec![
                SlideRecord::title_slide("Digital Transformation Strategy", "Professional Business Presentation"),
                SlideRecord::new(2, "Market Data", lines(3), SlideKind::Content, IconKind::Chart),
                SlideRecord::new(3, "Roadmap", lines(6), SlideKind::Content, IconKind::Target),
                SlideRecord::new(4, "Next Steps", lines(2), SlideKind::Conclusion, IconKind::Check),
            ],
            generated_with: Some("gpt-4".to_string()),
        }
    }

    pub fn sample_outline() -> OutlineDto {
        serde_json::from_value(serde_json::json!({
            "title": "Cloud Migration",
            "subtitle": "From data center to cloud",
            "slides": [
                { "title": "Why Move", "content": ["Lower cost", "Elastic scale"], "icon": "trending-up" },
                { "title": "Plan", "content": "Assess\nMigrate\nOptimize" },
                { "title": "Summary", "content": ["Start small"], "type": "conclusion" }
            ]
        }))
        .expect("sample outline is valid")
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::SlideKind;

    #[test]
    fn test_fixtures_sample_request() {
        let request = sample_request();
        assert_eq!(request.slide_target, 10);
        assert_eq!(request.theme.as_deref(), Some("ai-corporate"));
    }

    #[test]
    fn test_fixtures_sample_deck() {
        let deck = sample_deck();
        assert_eq!(deck.slide_count(), 4);
        assert_eq!(deck.slides[0].kind, SlideKind::Title);
        assert_eq!(deck.slides[3].kind, SlideKind::Conclusion);
    }

    #[test]
    fn test_fixtures_sample_outline() {
        let outline = sample_outline();
        let slides = outline.slides.unwrap();
        assert_eq!(slides.len(), 3);
        assert_eq!(slides[1].content_lines(), vec!["Assess", "Migrate", "Optimize"]);
    }
}
