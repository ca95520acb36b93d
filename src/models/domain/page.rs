use serde::Serialize;

use crate::models::domain::theme::Gradient;

/// Width of the page coordinate space, in inches.
pub const PAGE_WIDTH: f64 = 10.0;
/// Height of the page coordinate space, in inches.
pub const PAGE_HEIGHT: f64 = 7.5;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Background {
    Solid { color: String },
    Gradient(Gradient),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Fill {
    Solid { color: String },
    Gradient(Gradient),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Line,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Outline {
    pub color: String,
    /// Stroke width in points.
    pub width: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
}

/// A filled or stroked primitive placed in the 10 x 7.5 page space.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Shape {
    pub kind: ShapeKind,
    pub frame: Rect,
    pub fill: Option<Fill>,
    pub outline: Option<Outline>,
    /// Percent, 0 = opaque.
    pub transparency: Option<u8>,
    /// Corner radius in points; only meaningful for rectangles.
    pub corner_radius: Option<f64>,
}

impl Shape {
    pub fn rect(frame: Rect, color: &str) -> Self {
        Self::filled(ShapeKind::Rectangle, frame, color)
    }

    pub fn circle(frame: Rect, color: &str) -> Self {
        Self::filled(ShapeKind::Circle, frame, color)
    }

    pub fn line(frame: Rect, color: &str, width: f64) -> Self {
        Self {
            kind: ShapeKind::Line,
            frame,
            fill: None,
            outline: Some(Outline {
                color: color.to_string(),
                width,
            }),
            transparency: None,
            corner_radius: None,
        }
    }

    fn filled(kind: ShapeKind, frame: Rect, color: &str) -> Self {
        Self {
            kind,
            frame,
            fill: Some(Fill::Solid {
                color: color.to_string(),
            }),
            outline: None,
            transparency: None,
            corner_radius: None,
        }
    }

    pub fn with_gradient(mut self, gradient: Gradient) -> Self {
        self.fill = Some(Fill::Gradient(gradient));
        self
    }

    pub fn with_outline(mut self, color: &str, width: f64) -> Self {
        self.outline = Some(Outline {
            color: color.to_string(),
            width,
        });
        self
    }

    pub fn with_transparency(mut self, percent: u8) -> Self {
        self.transparency = Some(percent.min(100));
        self
    }

    pub fn rounded(mut self, radius: f64) -> Self {
        self.corner_radius = Some(radius);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    Numbered,
}

/// A text box. Each entry of `lines` is rendered as its own paragraph.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TextBlock {
    pub frame: Rect,
    pub lines: Vec<String>,
    /// Points.
    pub font_size: f64,
    pub font_face: String,
    pub color: String,
    pub bold: bool,
    pub align: Align,
    pub list: Option<ListStyle>,
    pub transparency: Option<u8>,
    pub vertical_center: bool,
}

impl TextBlock {
    pub fn new(frame: Rect, text: impl Into<String>, font_size: f64, color: &str) -> Self {
        Self::paragraphs(frame, vec![text.into()], font_size, color)
    }

    pub fn paragraphs(frame: Rect, lines: Vec<String>, font_size: f64, color: &str) -> Self {
        Self {
            frame,
            lines,
            font_size,
            font_face: "Arial".to_string(),
            color: color.to_string(),
            bold: false,
            align: Align::Left,
            list: None,
            transparency: None,
            vertical_center: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn aligned(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn listed(mut self, style: ListStyle) -> Self {
        self.list = Some(style);
        self
    }

    pub fn with_transparency(mut self, percent: u8) -> Self {
        self.transparency = Some(percent.min(100));
        self
    }

    pub fn centered_vertically(mut self) -> Self {
        self.vertical_center = true;
        self
    }
}

/// One drawable in paint order; later elements cover earlier ones.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "element", rename_all = "lowercase")]
pub enum PageElement {
    Shape(Shape),
    Text(TextBlock),
}

/// Which content arrangement the layout chose for a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageVariant {
    Title,
    Agenda,
    Conclusion,
    SingleColumn,
    TwoColumn,
    /// Header and footer only; the record had no content lines.
    Bare,
}

/// Fully laid-out, theme-applied description of one slide.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageDescriptor {
    pub index: usize,
    pub variant: PageVariant,
    pub background: Background,
    pub elements: Vec<PageElement>,
}

impl PageDescriptor {
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.elements.iter().filter_map(|e| match e {
            PageElement::Shape(shape) => Some(shape),
            PageElement::Text(_) => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextBlock> {
        self.elements.iter().filter_map(|e| match e {
            PageElement::Text(text) => Some(text),
            PageElement::Shape(_) => None,
        })
    }
}
