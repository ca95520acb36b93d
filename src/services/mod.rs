pub mod content_normalizer;
pub mod design_service;
pub mod icon_synthesizer;
pub mod layout_engine;
pub mod placeholder_service;
pub mod pptx_writer;
pub mod presentation_service;
pub mod temp_files;
pub mod text_generation;
pub mod theme_registry;
