use actix_multipart::form::MultipartForm;
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    constants::generation_prompt::MIN_SOURCE_CHARS,
    errors::AppError,
    middleware::get_request_id,
    models::dto::request::{GenerateTestRequest, UploadForm},
    services::extraction_service,
};

#[post("/api/generate-test")]
pub async fn generate_test(
    state: web::Data<AppState>,
    request: web::Json<GenerateTestRequest>,
    http_request: HttpRequest,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let request_id = get_request_id(&http_request).unwrap_or_default();
    log::info!(
        "[{}] generate-test: type={} count={}",
        request_id,
        request.test_type(),
        request.question_count()
    );

    let questions = state
        .generation_service
        .generate(&request.text, request.test_type(), request.question_count())
        .await?;

    Ok(HttpResponse::Ok().json(questions))
}

#[post("/api/upload-and-generate")]
pub async fn upload_and_generate(
    state: web::Data<AppState>,
    MultipartForm(form): MultipartForm<UploadForm>,
    http_request: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let mime = form
        .file
        .content_type
        .as_ref()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    if !extraction_service::is_supported_mime(&mime) {
        return Err(AppError::UnsupportedFileType(mime));
    }

    // Same rules as the JSON route; a bad field fails before extraction.
    let test_type = form.test_type()?;
    let question_count = form.question_count();

    let request_id = get_request_id(&http_request).unwrap_or_default();
    log::info!(
        "[{}] upload-and-generate: mime={} type={} count={} bytes={}",
        request_id,
        mime,
        test_type,
        question_count,
        form.file.size
    );

    // The temp file moves into the blocking closure, so it is removed as
    // soon as extraction finishes, whatever the outcome.
    let text = web::block(move || {
        let upload = form.file;
        let bytes = std::fs::read(upload.file.path()).map_err(|err| {
            AppError::ExtractionError(format!("could not read the upload: {}", err))
        })?;
        extraction_service::extract_text(&bytes, &mime)
    })
    .await??;

    if text.trim().chars().count() < MIN_SOURCE_CHARS {
        return Err(AppError::ValidationError(
            "Please provide at least 50 characters of study material.".to_string(),
        ));
    }

    let questions = state
        .generation_service
        .generate(&text, test_type, question_count)
        .await?;

    Ok(HttpResponse::Ok().json(questions))
}

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{test, App};
    use async_trait::async_trait;

    use super::*;
    use crate::config::Config;
    use crate::errors::AppResult;
    use crate::services::ModelService;

    /// Fails loudly if a handler reaches the model when it should not.
    struct UnreachableModel;

    #[async_trait]
    impl ModelService for UnreachableModel {
        async fn complete(&self, _system: &str, _user: &str) -> AppResult<String> {
            Err(AppError::UpstreamError(
                "the model should not be called".to_string(),
            ))
        }
    }

    fn state() -> AppState {
        AppState::with_model_service(Config::test_config(), Arc::new(UnreachableModel))
    }

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().service(health_check)).await;

        let req = test::TestRequest::get().uri("/health").to_request();

        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn test_short_text_is_rejected_before_the_model_call() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .service(generate_test),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate-test")
            .set_json(serde_json::json!({ "text": "too short" }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_unknown_test_type_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .service(generate_test),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate-test")
            .set_json(serde_json::json!({
                "text": "long enough text ".repeat(10),
                "testType": "essay"
            }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_client_error());
    }
}
