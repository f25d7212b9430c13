//! Campass HTTP server entry point.

use anyhow::Context;
use campass_core::db::open_db;
use campass_core::init_logging;
use campass_server::{router, AppState, Settings};
use log::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::load().context("failed to load configuration")?;

    let cwd = std::env::current_dir().context("failed to read working directory")?;
    let log_dir = settings.logging.resolve_dir(&cwd);
    init_logging(&settings.logging.level, &log_dir.to_string_lossy())
        .context("failed to initialize logging")?;

    let conn = open_db(&settings.database.path).with_context(|| {
        format!(
            "failed to open database `{}`",
            settings.database.path.display()
        )
    })?;
    let app = router(AppState::new(conn));

    let bind_addr = settings.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind `{bind_addr}`"))?;
    info!("event=server_start module=server status=ok addr={bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated with an error")?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("event=server_signal module=server status=error error={err}");
    }
}
