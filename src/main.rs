use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use deckgen_server::{
    app_state::AppState,
    config::Config,
    handlers,
    middleware::{RateLimitMiddleware, RequestIdMiddleware},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    config.log_summary();

    let host = config.web_server_host.clone();
    let port = config.web_server_port;
    let rate_limit = RateLimitMiddleware::new(config.rate_limit_max_requests, config.rate_limit_window())
        .trust_proxy(config.rate_limit_trust_proxy);
    let state = web::Data::new(Arc::new(AppState::new(config)));

    log::info!("Starting HTTP server on http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(rate_limit.clone())
            .wrap(RequestIdMiddleware)
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
