//! Single binary web server for the bracket organizer (JSON API only).
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, SEED_DEMO (0/false to skip demo roster), MAX_TEAM_COUNT.

use actix_web::{web::Data, App, HttpServer};
use duo_bracket_web::{api, service, MemoryStore, ServerConfig};
use tokio::sync::RwLock;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let mut store = MemoryStore::new();
    if config.seed_demo {
        if let Err(e) = service::seed_demo_roster(&mut store) {
            log::warn!("Could not seed demo roster: {}", e);
        }
    }

    let (host, port) = config.bind_addr();
    let bind = (host.to_string(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(store));
    let config = Data::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(config.clone())
            .configure(api::configure)
    })
    .bind(bind)?
    .run()
    .await
}
