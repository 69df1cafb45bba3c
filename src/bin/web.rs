//! Single binary web server: REST API for karate brackets.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT; log level with RUST_LOG.

use actix_web::{web::Data, App, HttpServer};
use karate_bracket_web::config::{ServerConfig, DEFAULT_LOG_FILTER};
use karate_bracket_web::{api, EntityStore, MemStore};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(DEFAULT_LOG_FILTER));

    let config = ServerConfig::from_env();
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    // Everything lives in memory for the lifetime of the process.
    let store: Arc<dyn EntityStore> = Arc::new(MemStore::new());
    let state = Data::from(store);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
