pub mod health_handler;
pub mod presentation_handler;

pub use health_handler::{health_check, service_info};
pub use presentation_handler::{
    build_presentation, design_presentation, design_templates, generate_content,
    generate_presentation,
};

use actix_web::{error, web};

use crate::errors::AppError;

/// Registers every route plus a JSON extractor that answers malformed bodies
/// with the usual error shape.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let message = match &err {
            error::JsonPayloadError::Deserialize(e) => format!("Invalid request body: {}", e),
            other => other.to_string(),
        };
        AppError::ValidationError(message).into()
    }))
    .service(service_info)
    .service(health_check)
    .service(generate_content)
    .service(generate_presentation)
    .service(build_presentation)
    .service(design_presentation)
    .service(design_templates);
}
