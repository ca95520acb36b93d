use crate::models::domain::{
    Align, Background, Deck, ListStyle, PageDescriptor, PageElement, PageVariant, Rect, Shape,
    SlideKind, SlideRecord, TextBlock, Theme,
};
use crate::services::icon_synthesizer::synthesize_icon;

const WHITE: &str = "FFFFFF";

/// Content pages with more lines than this are split into two columns.
pub const TWO_COLUMN_THRESHOLD: usize = 4;

/// Top-left corner of the icon inside the header band, left of the badge.
pub const ICON_ANCHOR: (f64, f64) = (7.5, 0.3);

const AGENDA_ROW_HEIGHT: f64 = 0.8;

/// Turns a deck into laid-out pages, one per slide record.
pub struct LayoutEngine {
    theme: Theme,
    author: String,
}

impl LayoutEngine {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            author: String::new(),
        }
    }

    /// Credit printed under the title page footer.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn layout(&self, deck: &Deck) -> Vec<PageDescriptor> {
        let mut ordinal = 0;

        deck.slides
            .iter()
            .enumerate()
            .map(|(index, record)| {
                if record.kind == SlideKind::Title {
                    self.title_page(index, record, deck.generated_with.as_deref())
                } else {
                    ordinal += 1;
                    self.content_page(index, ordinal, record, &deck.title)
                }
            })
            .collect()
    }

    fn title_page(
        &self,
        index: usize,
        record: &SlideRecord,
        generated_with: Option<&str>,
    ) -> PageDescriptor {
        let theme = &self.theme;
        let mut elements = vec![
            shape(Shape::rect(Rect::new(0.0, 0.0, 10.0, 0.4), theme.accent)),
            shape(
                Shape::rect(Rect::new(8.2, 0.8, 1.6, 1.6), theme.accent)
                    .with_transparency(20)
                    .with_outline(theme.accent, 2.0)
                    .rounded(8.0),
            ),
            shape(
                Shape::circle(Rect::new(0.2, 5.8, 1.2, 1.2), theme.secondary)
                    .with_transparency(30)
                    .with_outline(theme.secondary, 1.0),
            ),
            shape(Shape::line(Rect::new(0.0, 1.2, 10.0, 0.0), theme.accent, 1.0).with_transparency(40)),
            text(
                TextBlock::new(Rect::new(0.5, 2.2, 9.0, 2.0), record.title.clone(), 48.0, WHITE)
                    .bold()
                    .aligned(Align::Center)
                    .centered_vertically(),
            ),
        ];

        if let Some(subtitle) = record.subtitle() {
            elements.push(text(
                TextBlock::new(Rect::new(0.5, 4.4, 9.0, 1.0), subtitle, 28.0, WHITE)
                    .aligned(Align::Center)
                    .with_transparency(10),
            ));
        }
        if let Some(source) = generated_with {
            elements.push(text(
                TextBlock::new(
                    Rect::new(0.5, 6.5, 9.0, 0.5),
                    format!("Generated with {}", source),
                    14.0,
                    WHITE,
                )
                .aligned(Align::Center)
                .with_transparency(20),
            ));
        }

        elements.push(shape(Shape::rect(Rect::new(0.0, 6.8, 10.0, 0.2), theme.accent)));
        if !self.author.is_empty() {
            elements.push(text(
                TextBlock::new(Rect::new(0.5, 7.0, 9.0, 0.3), self.author.clone(), 12.0, WHITE)
                    .aligned(Align::Center)
                    .with_transparency(20),
            ));
        }

        PageDescriptor {
            index,
            variant: PageVariant::Title,
            background: Background::Gradient(theme.main_gradient()),
            elements,
        }
    }

    fn content_page(
        &self,
        index: usize,
        ordinal: usize,
        record: &SlideRecord,
        deck_title: &str,
    ) -> PageDescriptor {
        let theme = &self.theme;
        let variant = choose_variant(record);

        let mut elements = vec![
            shape(Shape::rect(Rect::new(0.0, 0.0, 10.0, 1.4), theme.primary).with_gradient(theme.main_gradient())),
            shape(Shape::circle(Rect::new(8.5, 0.2, 1.0, 1.0), theme.accent)),
            text(
                TextBlock::new(Rect::new(8.5, 0.2, 1.0, 1.0), ordinal.to_string(), 14.0, WHITE)
                    .bold()
                    .aligned(Align::Center)
                    .centered_vertically(),
            ),
            text(
                TextBlock::new(Rect::new(0.5, 0.3, 6.8, 0.8), record.title.clone(), 32.0, WHITE)
                    .bold()
                    .centered_vertically(),
            ),
        ];

        if variant != PageVariant::Bare {
            let (x, y) = ICON_ANCHOR;
            elements.extend(synthesize_icon(record.icon, theme.accent, x, y).into_iter().map(shape));
        }

        match variant {
            PageVariant::Agenda => self.agenda_body(&record.content, &mut elements),
            PageVariant::Conclusion => self.conclusion_body(&record.content, &mut elements),
            PageVariant::TwoColumn => self.two_column_body(&record.content, &mut elements),
            PageVariant::SingleColumn => self.single_column_body(&record.content, &mut elements),
            PageVariant::Bare | PageVariant::Title => {}
        }

        elements.push(shape(Shape::rect(Rect::new(0.0, 7.0, 10.0, 0.2), theme.primary)));
        elements.push(text(TextBlock::new(
            Rect::new(0.5, 7.1, 9.0, 0.3),
            deck_title,
            10.0,
            theme.primary,
        )));

        PageDescriptor {
            index,
            variant,
            background: Background::Solid {
                color: theme.light_background.to_string(),
            },
            elements,
        }
    }

    fn panel(&self, frame: Rect, border: &str, width: f64) -> PageElement {
        shape(
            Shape::rect(frame, self.theme.background)
                .with_outline(border, width)
                .rounded(8.0),
        )
    }

    fn agenda_body(&self, items: &[String], elements: &mut Vec<PageElement>) {
        let theme = &self.theme;
        elements.push(self.panel(Rect::new(0.3, 1.6, 9.4, 5.4), theme.primary, 2.0));

        for (i, item) in items.iter().enumerate() {
            let offset = i as f64 * AGENDA_ROW_HEIGHT;
            elements.push(shape(Shape::circle(Rect::new(0.8, 2.2 + offset, 0.3, 0.3), theme.accent)));
            elements.push(text(
                TextBlock::new(
                    Rect::new(1.3, 2.1 + offset, 8.0, 0.6),
                    format!("{}. {}", i + 1, item),
                    18.0,
                    theme.text,
                )
                .centered_vertically(),
            ));
        }
    }

    fn conclusion_body(&self, lines: &[String], elements: &mut Vec<PageElement>) {
        let theme = &self.theme;
        elements.push(self.panel(Rect::new(0.3, 1.6, 9.4, 5.4), theme.accent, 3.0));
        elements.push(text(
            TextBlock::paragraphs(Rect::new(1.5, 1.8, 8.0, 5.0), lines.to_vec(), 18.0, theme.text)
                .listed(ListStyle::Numbered),
        ));
    }

    fn two_column_body(&self, lines: &[String], elements: &mut Vec<PageElement>) {
        let theme = &self.theme;
        let (left, right) = lines.split_at(lines.len().div_ceil(2));

        elements.push(self.panel(Rect::new(0.3, 1.6, 4.5, 5.4), theme.primary, 1.0));
        elements.push(self.panel(Rect::new(5.2, 1.6, 4.5, 5.4), theme.primary, 1.0));
        elements.push(text(
            TextBlock::paragraphs(Rect::new(0.6, 1.8, 4.0, 5.0), left.to_vec(), 16.0, theme.text)
                .listed(ListStyle::Numbered),
        ));
        elements.push(text(
            TextBlock::paragraphs(Rect::new(5.5, 1.8, 4.0, 5.0), right.to_vec(), 16.0, theme.text)
                .listed(ListStyle::Numbered),
        ));
    }

    fn single_column_body(&self, lines: &[String], elements: &mut Vec<PageElement>) {
        let theme = &self.theme;
        elements.push(self.panel(Rect::new(0.3, 1.6, 9.4, 5.4), theme.primary, 2.0));
        elements.push(shape(Shape::rect(Rect::new(0.3, 1.6, 0.4, 5.4), theme.accent).rounded(4.0)));
        elements.push(text(
            TextBlock::paragraphs(Rect::new(0.9, 1.8, 8.5, 5.0), lines.to_vec(), 18.0, theme.text)
                .listed(ListStyle::Numbered),
        ));
    }

    /// A single page carrying a heading and one explanatory line.
    pub fn notice_page(&self, heading: &str, message: &str) -> PageDescriptor {
        let theme = &self.theme;
        PageDescriptor {
            index: 0,
            variant: PageVariant::Title,
            background: Background::Solid {
                color: theme.light_background.to_string(),
            },
            elements: vec![
                text(
                    TextBlock::new(Rect::new(1.0, 1.0, 8.0, 2.0), heading, 36.0, theme.text)
                        .bold()
                        .aligned(Align::Center)
                        .centered_vertically(),
                ),
                text(
                    TextBlock::new(Rect::new(1.0, 3.0, 8.0, 1.0), message, 18.0, theme.secondary)
                        .aligned(Align::Center),
                ),
            ],
        }
    }
}

/// Picks the content arrangement for a non-title record.
pub fn choose_variant(record: &SlideRecord) -> PageVariant {
    if record.content.is_empty() {
        return PageVariant::Bare;
    }
    match record.kind {
        SlideKind::Title => PageVariant::Title,
        SlideKind::Agenda => PageVariant::Agenda,
        SlideKind::Conclusion => PageVariant::Conclusion,
        SlideKind::Content if record.content.len() > TWO_COLUMN_THRESHOLD => PageVariant::TwoColumn,
        SlideKind::Content => PageVariant::SingleColumn,
    }
}

fn shape(shape: Shape) -> PageElement {
    PageElement::Shape(shape)
}

fn text(block: TextBlock) -> PageElement {
    PageElement::Text(block)
}
