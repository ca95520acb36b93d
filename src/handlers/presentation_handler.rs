use std::sync::Arc;

use actix_web::{
    get,
    http::header::{ContentDisposition, DispositionParam, DispositionType},
    post, web, HttpRequest, HttpResponse,
};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::{
        domain::{GeneratedDocument, GenerationRequest},
        dto::{
            request::{GenerationRequestDto, PresentationDataRequestDto},
            response::DesignTemplatesResponse,
        },
    },
    services::pptx_writer::PPTX_CONTENT_TYPE,
};

fn request_id(req: &HttpRequest) -> String {
    get_request_id(req).unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

fn validated(body: web::Json<GenerationRequestDto>) -> Result<GenerationRequest, AppError> {
    let dto = body.into_inner();
    dto.validate()?;
    Ok(GenerationRequest::from(dto))
}

fn attachment(document: GeneratedDocument) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(PPTX_CONTENT_TYPE)
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(document.filename)],
        })
        .body(document.bytes)
}

#[post("/api/generate-content")]
pub async fn generate_content(
    req: HttpRequest,
    state: web::Data<Arc<AppState>>,
    body: web::Json<GenerationRequestDto>,
) -> Result<HttpResponse, AppError> {
    let request = validated(body)?;
    log::info!("Generating presentation for topic: {}", request.topic);

    let document = state
        .presentation_service
        .generate_content(&request_id(&req), &request)
        .await?;
    Ok(attachment(document))
}

#[post("/api/generate-presentation")]
pub async fn generate_presentation(
    req: HttpRequest,
    state: web::Data<Arc<AppState>>,
    body: web::Json<PresentationDataRequestDto>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let outline = body
        .presentation_data
        .ok_or_else(|| AppError::ValidationError("Presentation data is required".to_string()))?;

    let document = state
        .presentation_service
        .generate_from_outline(&request_id(&req), &outline, body.template.as_deref())
        .await?;
    Ok(attachment(document))
}

#[post("/api/build-presentation")]
pub async fn build_presentation(
    req: HttpRequest,
    state: web::Data<Arc<AppState>>,
    body: web::Json<GenerationRequestDto>,
) -> Result<HttpResponse, AppError> {
    let request = validated(body)?;
    log::info!("Building presentation from template for topic: {}", request.topic);

    let document = state
        .presentation_service
        .build_presentation(&request_id(&req), &request)
        .await?;
    Ok(attachment(document))
}

#[post("/api/canva/generate-presentation")]
pub async fn design_presentation(
    req: HttpRequest,
    state: web::Data<Arc<AppState>>,
    body: web::Json<GenerationRequestDto>,
) -> Result<HttpResponse, AppError> {
    let request = validated(body)?;
    log::info!("Generating design-service presentation for topic: {}", request.topic);

    let document = state
        .presentation_service
        .design_presentation(&request_id(&req), &request)
        .await?;
    Ok(attachment(document))
}

#[get("/api/canva/templates")]
pub async fn design_templates(state: web::Data<Arc<AppState>>) -> HttpResponse {
    let templates = state.presentation_service.design_templates().await;
    HttpResponse::Ok().json(DesignTemplatesResponse { templates })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::services::pptx_writer::inspect;
    use crate::test_utils::test_helpers::{assert_error_status, assert_success_status};
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;

    fn state() -> web::Data<Arc<AppState>> {
        web::Data::new(Arc::new(AppState::new(Config::test_config())))
    }

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(state())
                    .service(generate_content)
                    .service(generate_presentation)
                    .service(build_presentation)
                    .service(design_presentation)
                    .service(design_templates),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_generate_content_without_credentials_returns_demo_deck() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/generate-content")
            .set_json(json!({ "topic": "Digital Transformation Strategy", "slides": 5 }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_success_status(resp.status());
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            PPTX_CONTENT_TYPE
        );
        let disposition = resp
            .headers()
            .get("content-disposition")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"ai-presentation-"));

        let bytes = test::read_body(resp).await;
        // title, agenda, two demo slides, conclusion
        assert_eq!(inspect::slide_count(&bytes).unwrap(), 5);
    }

    #[actix_web::test]
    async fn test_missing_topic_is_rejected() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/generate-content")
            .set_json(json!({ "audience": "Executives" }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Topic is required" }));
    }

    #[actix_web::test]
    async fn test_generate_presentation_requires_data() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/generate-presentation")
            .set_json(json!({ "template": "ai-modern" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["error"], "Presentation data is required");

        let req = test::TestRequest::post()
            .uri("/api/generate-presentation")
            .set_json(json!({ "presentationData": { "title": "Q3" } }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_error_status(resp.status());
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Presentation slides array is required");
    }

    #[actix_web::test]
    async fn test_generate_presentation_from_outline() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/generate-presentation")
            .set_json(json!({
                "presentationData": {
                    "title": "Quarterly Review",
                    "slides": [
                        { "title": "Highlights", "content": ["Revenue up", "Churn down"] },
                        { "title": "Wrap Up", "content": "Thanks", "type": "conclusion" }
                    ]
                },
                "template": "corporate"
            }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_success_status(resp.status());
        let bytes = test::read_body(resp).await;
        assert_eq!(inspect::slide_count(&bytes).unwrap(), 3);
    }

    #[actix_web::test]
    async fn test_build_presentation_requires_credentials() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/build-presentation")
            .set_json(json!({ "topic": "Onboarding" }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "OpenAI API key not configured");
        assert_eq!(body["suggestion"], "Add OPENAI_API_KEY=your-key-here to your .env file");
    }

    #[actix_web::test]
    async fn test_design_presentation_falls_back_locally() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/canva/generate-presentation")
            .set_json(json!({ "topic": "Brand Refresh", "template": "creative" }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_success_status(resp.status());
        let bytes = test::read_body(resp).await;
        assert_eq!(inspect::slide_count(&bytes).unwrap(), 1);
    }

    #[actix_web::test]
    async fn test_design_templates_builtin() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/canva/templates").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["templates"].as_array().unwrap().len(), 4);
        assert_eq!(body["templates"][0]["id"], "business");
    }
}
