use std::sync::Arc;

use recall_service::{MemoryStore, RetrievalService};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<RetrievalService>,
}
impl AppState {
	pub fn new(config: recall_config::Config) -> Self {
		Self::from_service(RetrievalService::new(config))
	}

	pub fn with_store(config: recall_config::Config, store: Arc<dyn MemoryStore>) -> Self {
		Self::from_service(RetrievalService::with_store(config, store))
	}

	pub fn from_service(service: RetrievalService) -> Self {
		Self { service: Arc::new(service) }
	}
}
