use actix_cors::Cors;
use actix_multipart::form::MultipartFormConfig;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use secrecy::ExposeSecret;

use examgen_server::{
    app_state::AppState,
    config::Config,
    constants::{JSON_BODY_LIMIT_BYTES, MAX_UPLOAD_BYTES},
    errors,
    handlers,
    middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(Env::new().default_filter_or("info"));

    let config = Config::from_env();
    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        config.validate_for_production();
    } else if config.openai_api_key.expose_secret().is_empty() {
        log::warn!("OPENAI_API_KEY is not set; generation requests will fail upstream");
    }

    let state = AppState::new(config.clone());

    log::info!(
        "starting HTTP server on {}:{}",
        config.web_server_host,
        config.web_server_port
    );

    HttpServer::new(move || {
        let json_config = web::JsonConfig::default()
            .limit(JSON_BODY_LIMIT_BYTES)
            .error_handler(errors::json_error_handler);

        let multipart_config = MultipartFormConfig::default()
            .total_limit(MAX_UPLOAD_BYTES)
            .error_handler(errors::multipart_error_handler);

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(json_config)
            .app_data(multipart_config)
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .wrap(Cors::permissive())
            .service(handlers::generate_test)
            .service(handlers::upload_and_generate)
            .service(handlers::health_check)
    })
    .bind((config.web_server_host.clone(), config.web_server_port))?
    .run()
    .await
}
