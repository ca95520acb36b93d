pub mod generation;
pub mod page;
pub mod slide;
pub mod theme;

pub use page::{
    Align, Background, Fill, ListStyle, PageDescriptor, PageElement, PageVariant, Rect, Shape,
    ShapeKind, TextBlock,
};
pub use slide::{Deck, IconKind, SlideKind, SlideRecord};
pub use theme::{Gradient, Theme};
pub use generation::{
    GeneratedDocument, GenerationRequest, GenerationStage, TextSource, DEFAULT_SLIDES,
    MAX_SLIDES, MIN_SLIDES,
};
