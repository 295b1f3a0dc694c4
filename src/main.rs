use actix_web::{web, App, HttpServer};
use babaji_signal_server::{configure, cors, AppError, AppState, Settings};
use dotenv::dotenv;
use std::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[actix_web::main]
async fn main() -> babaji_signal_server::Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = Settings::new()?;

    // RUST_LOG wins over log.level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    info!("Configuration loaded for environment: {}", config.environment);
    if config.auth.jwt_secret == "development_secret" {
        warn!("Using the built-in development JWT secret; set APP_AUTH__JWT_SECRET");
    }

    let state = web::Data::new(AppState::new(config.clone()));

    let listener = TcpListener::bind(format!("{}:{}", config.server.host, config.server.port))?;
    info!("Listening on http://{}:{}", config.server.host, config.server.port);

    let cors_config = config.cors.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(cors(&cors_config))
            .app_data(state.clone())
            .configure(configure)
    })
    .listen(listener)?
    .workers(config.server.workers as usize)
    .run()
    .await
    .map_err(|e| AppError::InternalError(e.to_string()))?;

    Ok(())
}
