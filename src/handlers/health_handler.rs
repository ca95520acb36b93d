use actix_web::{get, HttpResponse};

use crate::models::dto::response::{HealthResponse, ServiceInfoResponse};
use crate::services::theme_registry;

#[get("/")]
pub async fn service_info() -> HttpResponse {
    HttpResponse::Ok().json(ServiceInfoResponse {
        message: "AI Presentation Generator API".to_string(),
        status: "running".to_string(),
        endpoints: serde_json::json!({
            "health": "/api/health",
            "generateContent": "/api/generate-content",
            "generatePresentation": "/api/generate-presentation",
            "buildPresentation": "/api/build-presentation",
            "canvaGeneratePresentation": "/api/canva/generate-presentation",
            "canvaTemplates": "/api/canva/templates"
        }),
        themes: theme_registry::available(),
    })
}

#[get("/api/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    })
}
