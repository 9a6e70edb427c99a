use log::*;
use service::config::Config;
use service::logging::Logger;
use service::AppState;

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config);

    if let Err(message) = config.validate_required() {
        error!("{message}");
        std::process::exit(1);
    }

    let app_state = AppState::new(config.clone());
    let router = web::init_router(app_state);

    if config.managed_runtime() {
        // The hosting platform drives the exported router directly.
        info!("Managed runtime detected, skipping local port binding");
        return;
    }

    let interface = config
        .interface
        .clone()
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", interface, config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|err| panic!("Failed to bind to {addr}: {err}"));

    info!("Server listening on http://{addr}");

    axum::serve(listener, router)
        .await
        .expect("Failed to start the API server");
}
