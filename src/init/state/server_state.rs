use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use crate::domain::photo::photoz_service::PhotozService;

use super::builder::ServerStateBuilder;
use super::deployment_environment::DeploymentEnvironment;

pub struct ServerState {
    pub(crate) app_name_version: String,
    pub(crate) server_start_time: tokio::time::Instant,
    pub(crate) responses_handled: AtomicU64,
    pub(crate) photoz_service: Arc<dyn PhotozService>,
    pub(crate) deployment_environment: DeploymentEnvironment,
    pub(crate) max_upload_size_bytes: usize,
}

impl ServerState {
    pub fn builder() -> ServerStateBuilder {
        ServerStateBuilder::default()
    }

    pub fn get_app_name_version(&self) -> String {
        self.app_name_version.clone()
    }

    pub fn get_uptime(&self) -> tokio::time::Duration {
        self.server_start_time.elapsed()
    }

    pub fn photoz(&self) -> &dyn PhotozService {
        self.photoz_service.as_ref()
    }

    pub fn get_deployment_environment(&self) -> DeploymentEnvironment {
        self.deployment_environment
    }

    pub fn get_max_upload_size_bytes(&self) -> usize {
        self.max_upload_size_bytes
    }

    pub fn get_responses_handled(&self) -> u64 {
        self.responses_handled
            .load(std::sync::atomic::Ordering::SeqCst)
    }

    pub fn add_responses_handled(&self) {
        self.responses_handled
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}
