use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideKind {
    Title,
    Agenda,
    Content,
    Conclusion,
}

impl SlideKind {
    /// Parses a caller-supplied slide type. Unknown or missing types are content.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "title" => SlideKind::Title,
            "agenda" => SlideKind::Agenda,
            "conclusion" => SlideKind::Conclusion,
            _ => SlideKind::Content,
        }
    }
}

impl std::fmt::Display for SlideKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlideKind::Title => write!(f, "title"),
            SlideKind::Agenda => write!(f, "agenda"),
            SlideKind::Content => write!(f, "content"),
            SlideKind::Conclusion => write!(f, "conclusion"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKind {
    Chart,
    People,
    Idea,
    Target,
    Check,
    List,
    Default,
}

impl IconKind {
    pub const ALL: [IconKind; 7] = [
        IconKind::Chart,
        IconKind::People,
        IconKind::Idea,
        IconKind::Target,
        IconKind::Check,
        IconKind::List,
        IconKind::Default,
    ];

    /// Infers an icon from keywords in a slide title.
    pub fn for_title(title: &str) -> Self {
        let lower = title.to_lowercase();
        let has_any = |words: &[&str]| words.iter().any(|w| lower.contains(w));

        if has_any(&["data", "statistics", "chart"]) {
            IconKind::Chart
        } else if has_any(&["team", "people", "users"]) {
            IconKind::People
        } else if has_any(&["goal", "target", "objective"]) {
            IconKind::Target
        } else if has_any(&["idea", "innovation", "creative"]) {
            IconKind::Idea
        } else if has_any(&["check", "complete", "done"]) {
            IconKind::Check
        } else if has_any(&["list", "agenda", "overview"]) {
            IconKind::List
        } else {
            IconKind::Default
        }
    }

    /// Maps an icon name as sent by clients and language models.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "chart" | "bar-chart" | "trending-up" => Some(IconKind::Chart),
            "people" | "users" | "team" => Some(IconKind::People),
            "idea" | "lightbulb" | "brain" => Some(IconKind::Idea),
            "target" | "goal" => Some(IconKind::Target),
            "check" | "check-circle" => Some(IconKind::Check),
            "list" | "agenda" => Some(IconKind::List),
            "default" | "briefcase" => Some(IconKind::Default),
            _ => None,
        }
    }
}

/// Canonical content of one slide before layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SlideRecord {
    pub title: String,
    pub content: Vec<String>,
    pub kind: SlideKind,
    pub icon: IconKind,
}

impl SlideRecord {
    /// Builds a record, discarding blank content lines and substituting
    /// `Slide {position}` for a blank title.
    pub fn new(
        position: usize,
        title: impl Into<String>,
        content: impl IntoIterator<Item = String>,
        kind: SlideKind,
        icon: IconKind,
    ) -> Self {
        let title = title.into().trim().to_string();
        let title = if title.is_empty() {
            format!("Slide {}", position)
        } else {
            title
        };

        Self {
            title,
            content: content
                .into_iter()
                .map(|line| line.trim().to_string())
                .filter(|line| !line.is_empty())
                .collect(),
            kind,
            icon,
        }
    }

    pub fn title_slide(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self::new(
            1,
            title,
            vec![subtitle.into()],
            SlideKind::Title,
            IconKind::Default,
        )
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.content.first().map(String::as_str)
    }
}

/// Ordered slide sequence plus the deck-wide text the layout needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Deck {
    pub title: String,
    pub subtitle: String,
    pub slides: Vec<SlideRecord>,
    /// Shown as a caption on the title page, e.g. the model that drafted the text.
    pub generated_with: Option<String>,
}

impl Deck {
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn with_generated_with(mut self, source: impl Into<String>) -> Self {
        self.generated_with = Some(source.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_for_title_keywords() {
        assert_eq!(IconKind::for_title("Data and Statistics"), IconKind::Chart);
        assert_eq!(IconKind::for_title("Our Team"), IconKind::People);
        assert_eq!(IconKind::for_title("Quarterly Goals"), IconKind::Target);
        assert_eq!(IconKind::for_title("Innovation Pipeline"), IconKind::Idea);
        assert_eq!(IconKind::for_title("Completed Work"), IconKind::Check);
        assert_eq!(IconKind::for_title("Market Overview"), IconKind::List);
        assert_eq!(IconKind::for_title("Budget"), IconKind::Default);
    }

    #[test]
    fn test_icon_keyword_precedence() {
        // "data" wins over "team" because chart keywords are checked first
        assert_eq!(IconKind::for_title("Team data"), IconKind::Chart);
    }

    #[test]
    fn test_icon_from_name_aliases() {
        assert_eq!(IconKind::from_name("bar-chart"), Some(IconKind::Chart));
        assert_eq!(IconKind::from_name("Users"), Some(IconKind::People));
        assert_eq!(IconKind::from_name("lightbulb"), Some(IconKind::Idea));
        assert_eq!(IconKind::from_name("check-circle"), Some(IconKind::Check));
        assert_eq!(IconKind::from_name("rocket"), None);
    }

    #[test]
    fn test_slide_record_filters_blank_lines_and_titles() {
        let record = SlideRecord::new(
            4,
            "   ",
            vec!["one".to_string(), "  ".to_string(), " two ".to_string()],
            SlideKind::Content,
            IconKind::Default,
        );

        assert_eq!(record.title, "Slide 4");
        assert_eq!(record.content, vec!["one", "two"]);
    }

    #[test]
    fn test_slide_kind_from_tag() {
        assert_eq!(SlideKind::from_tag("Agenda"), SlideKind::Agenda);
        assert_eq!(SlideKind::from_tag("conclusion"), SlideKind::Conclusion);
        assert_eq!(SlideKind::from_tag("whatever"), SlideKind::Content);
    }
}
