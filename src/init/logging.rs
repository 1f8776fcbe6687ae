use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use super::config::ServerConfig;

const LOG_FILE_PREFIX: &str = "photoz.log";

/// Installs the global subscriber. The returned guard flushes the rolling log
/// file on drop and must live as long as the server.
pub fn init_logging(config: &ServerConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match &config.logs_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().json().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    if config.deployment_environment.wants_json_logs() {
        registry.with(fmt::layer().json()).try_init()?;
    } else {
        registry
            .with(fmt::layer().with_target(true).with_thread_ids(false))
            .try_init()?;
    }

    tracing::info!(
        environment = config.deployment_environment.as_str(),
        json = config.deployment_environment.wants_json_logs(),
        logs_dir = ?config.logs_dir,
        "Logging initialized"
    );

    Ok(guard)
}
