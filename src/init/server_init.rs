use std::{net::SocketAddr, sync::Arc};

use tracing::{debug, error, info, warn};

use crate::{
    domain::photo::{
        disk_store::DiskPhotoStore, memory_store::MemoryPhotoStore, photoz_service::PhotozService,
    },
    routers::main_router::build_router,
};

use super::{config::ServerConfig, logging::init_logging, state::ServerState};

pub async fn server_init_proc(start: tokio::time::Instant) -> anyhow::Result<()> {
    // Logging is not up yet; report the .env outcome once it is.
    let dotenv_result = dotenvy::dotenv();

    let config = ServerConfig::from_env()?;
    let _log_guard = init_logging(&config)?;

    match dotenv_result {
        Ok(path) => info!(path = %path.display(), "Loaded environment from .env"),
        Err(e) if e.not_found() => debug!("No .env file found; using process environment"),
        Err(e) => warn!(error = %e, "Could not load .env file"),
    }

    let photoz_service: Arc<dyn PhotozService> = match &config.storage_dir {
        Some(dir) => Arc::new(DiskPhotoStore::open(dir).await?),
        None => {
            info!("PHOTOZ_STORAGE_DIR not set; photos are kept in memory only");
            Arc::new(MemoryPhotoStore::new())
        }
    };

    let state = Arc::new(
        ServerState::builder()
            .app_name_version(format!(
                "{} {}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .server_start_time(start)
            .photoz_service(photoz_service)
            .deployment_environment(config.deployment_environment)
            .max_upload_size_bytes(config.max_upload_size_bytes)
            .build()?,
    );

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;

    info!(
        addr = %bind_addr,
        app = %state.get_app_name_version(),
        environment = state.get_deployment_environment().as_str(),
        photos = state.photoz().count(),
        elapsed = ?start.elapsed(),
        "Photoz server starting..."
    );

    axum::serve(
        listener,
        build_router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Photoz server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = ?e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = ?e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}
