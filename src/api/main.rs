use spellbook_server::config::AppConfig;
use spellbook_server::middleware::observability;
use spellbook_server::routes::{self, AppState};
use spellbook_server::storage::session_store::start_session_cleanup_task;
use tracing::{error, info};

// Panic hook to catch and log panics
fn setup_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        let message = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown".to_string());
        match panic_info.location() {
            Some(location) => error!(
                "PANIC at {}:{}:{}: {}",
                location.file(),
                location.line(),
                location.column(),
                message
            ),
            None => error!("PANIC: {}", message),
        }
    }));
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    observability::init_tracing();
    setup_panic_hook();
    observability::init_observability();
    info!("Application starting...");

    let config = AppConfig::from_env();
    let addr = config.listen_addr();

    let app_state = AppState::from_config(config).await?;
    if let Some(pool) = app_state.database().cloned() {
        tokio::spawn(start_session_cleanup_task(pool));
        info!("Session cleanup task started");
    }
    if let Some(base_url) = &app_state.config.api_base_url {
        info!("Internal API fetches go to {}", base_url);
    }

    let app = routes::build_app(app_state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);
    info!("Health check available at http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

// Handle both SIGINT (Ctrl+C) and SIGTERM (Docker stop)
#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to install SIGTERM handler: {}", e);
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("SIGINT received, shutting down gracefully");
            }
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("SIGINT received, shutting down gracefully");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received, shutting down gracefully");
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for CTRL+C: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
