use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use crate::domain::photo::photoz_service::PhotozService;
use crate::init::config::DEFAULT_MAX_UPLOAD_SIZE_BYTES;

use super::deployment_environment::DeploymentEnvironment;
use super::server_state::ServerState;

#[derive(Default)]
pub struct ServerStateBuilder {
    app_name_version: Option<String>,
    server_start_time: Option<tokio::time::Instant>,
    photoz_service: Option<Arc<dyn PhotozService>>,
    deployment_environment: Option<DeploymentEnvironment>,
    max_upload_size_bytes: Option<usize>,
}

impl ServerStateBuilder {
    pub fn app_name_version(mut self, app_name_version: String) -> Self {
        self.app_name_version = Some(app_name_version);
        self
    }

    pub fn server_start_time(mut self, server_start_time: tokio::time::Instant) -> Self {
        self.server_start_time = Some(server_start_time);
        self
    }

    pub fn photoz_service(mut self, photoz_service: Arc<dyn PhotozService>) -> Self {
        self.photoz_service = Some(photoz_service);
        self
    }

    pub fn deployment_environment(mut self, deployment_environment: DeploymentEnvironment) -> Self {
        self.deployment_environment = Some(deployment_environment);
        self
    }

    pub fn max_upload_size_bytes(mut self, max_upload_size_bytes: usize) -> Self {
        self.max_upload_size_bytes = Some(max_upload_size_bytes);
        self
    }

    pub fn build(self) -> anyhow::Result<ServerState> {
        Ok(ServerState {
            app_name_version: self
                .app_name_version
                .ok_or_else(|| anyhow::anyhow!("app_name_version is required"))?,
            server_start_time: self
                .server_start_time
                .ok_or_else(|| anyhow::anyhow!("server_start_time is required"))?,
            responses_handled: AtomicU64::new(0u64),
            photoz_service: self
                .photoz_service
                .ok_or_else(|| anyhow::anyhow!("photoz_service is required"))?,
            deployment_environment: self
                .deployment_environment
                .unwrap_or(DeploymentEnvironment::Local),
            max_upload_size_bytes: self
                .max_upload_size_bytes
                .unwrap_or(DEFAULT_MAX_UPLOAD_SIZE_BYTES),
        })
    }
}
