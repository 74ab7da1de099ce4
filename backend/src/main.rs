mod analyzer;
mod config;
mod error;
mod routes;
mod vision;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use analyzer::ImageAnalyzer;
use config::AppConfig;
use routes::{configure_routes, AnalyzeState};
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        io::Error::other(e.to_string())
    })?;

    let provider = vision::create_provider(&config).map_err(|e| {
        log::error!("Failed to create vision provider: {}", e);
        io::Error::other(e.to_string())
    })?;

    match &provider {
        Some(provider) => log::info!(
            "Using {} vision provider ({})",
            provider.provider_name(),
            provider.model_name()
        ),
        None => log::warn!("OPENAI_API_KEY is not set; analyze requests will fail until it is configured"),
    }

    let state = AnalyzeState {
        analyzer: provider.map(ImageAnalyzer::new),
        max_upload_size: config.max_upload_size,
    };

    let frontend_dir = if config.frontend_dir.is_dir() {
        log::info!("Serving frontend from {}", config.frontend_dir.display());
        Some(config.frontend_dir.clone())
    } else {
        log::warn!(
            "Frontend directory {} not found; serving the API only",
            config.frontend_dir.display()
        );
        None
    };

    let bind_address = format!("0.0.0.0:{}", config.port);
    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(|cfg| configure_routes(cfg, frontend_dir.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}
