pub mod demo_content;
pub mod prompts;
