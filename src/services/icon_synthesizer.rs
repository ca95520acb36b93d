use crate::models::domain::{IconKind, Rect, Shape};

/// Edge length of every icon's backdrop, in page units.
pub const ICON_SIZE: f64 = 0.8;

const GLYPH: &str = "FFFFFF";

/// Builds the small composite glyph for `kind`, anchored at its top-left corner.
pub fn synthesize_icon(kind: IconKind, color: &str, x: f64, y: f64) -> Vec<Shape> {
    let backdrop = Rect::new(x, y, ICON_SIZE, ICON_SIZE);

    match kind {
        IconKind::Chart => {
            let mut shapes = vec![Shape::rect(backdrop, color).rounded(4.0)];
            shapes.extend((0..3).map(|i| {
                let i = i as f64;
                Shape::rect(
                    Rect::new(x + 0.1 + i * 0.15, y + 0.4 - i * 0.1, 0.1, 0.2 + i * 0.1),
                    GLYPH,
                )
            }));
            shapes
        }
        IconKind::People => vec![
            Shape::circle(backdrop, color),
            Shape::circle(Rect::new(x + 0.1, y + 0.2, 0.2, 0.2), GLYPH),
            Shape::rect(Rect::new(x + 0.05, y + 0.4, 0.3, 0.3), GLYPH).rounded(4.0),
        ],
        IconKind::Idea => vec![
            Shape::circle(backdrop, color),
            Shape::rect(Rect::new(x + 0.2, y + 0.6, 0.2, 0.1), GLYPH),
        ],
        IconKind::Target => vec![
            Shape::circle(backdrop, color),
            Shape::circle(Rect::new(x + 0.1, y + 0.1, 0.6, 0.6), GLYPH),
            Shape::circle(Rect::new(x + 0.2, y + 0.2, 0.4, 0.4), color),
        ],
        IconKind::Check => vec![
            Shape::circle(backdrop, color),
            Shape::line(Rect::new(x + 0.15, y + 0.3, 0.2, 0.1), GLYPH, 3.0),
            Shape::line(Rect::new(x + 0.25, y + 0.4, 0.1, 0.2), GLYPH, 3.0),
        ],
        IconKind::List => {
            let mut shapes = vec![Shape::rect(backdrop, color).rounded(4.0)];
            shapes.extend((0..3).map(|i| {
                Shape::rect(
                    Rect::new(x + 0.1, y + 0.1 + i as f64 * 0.15, 0.6, 0.05),
                    GLYPH,
                )
            }));
            shapes
        }
        IconKind::Default => vec![
            Shape::rect(backdrop, color).rounded(4.0),
            Shape::rect(Rect::new(x + 0.1, y + 0.1, 0.6, 0.4), GLYPH),
            Shape::rect(Rect::new(x + 0.15, y + 0.05, 0.5, 0.1), GLYPH),
        ],
    }
}
