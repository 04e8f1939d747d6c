pub mod fallback;
pub mod limit;
pub mod metadata;
pub mod pipeline;
pub mod request;
pub mod stages;

mod error;

pub use error::{Error, Result};
pub use metadata::PerformanceMetadata;
pub use request::{DEFAULT_LIMIT, SearchRequest};
pub use stages::{Stage, StageContext, StageKind, Stages};

use std::{future::Future, pin::Pin, sync::Arc, time::Duration};

use serde_json::{Map, Value};

use recall_config::Config;
use recall_providers::store;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The external memory store. Responses are returned raw because upstream shapes vary by API
/// version; callers normalize them through [`recall_domain::ResultEnvelope::from_response`].
pub trait MemoryStore
where
	Self: Send + Sync,
{
	fn base_search<'a>(
		&'a self,
		cfg: &'a recall_config::Store,
		query: &'a str,
		params: &'a Map<String, Value>,
	) -> BoxFuture<'a, Result<Value>>;

	fn keyword_search<'a>(
		&'a self,
		cfg: &'a recall_config::Store,
		query: &'a str,
		params: &'a Map<String, Value>,
	) -> BoxFuture<'a, Result<Value>>;
}

pub struct RetrievalService {
	pub cfg: Config,
	pub store: Arc<dyn MemoryStore>,
	pub stages: Stages,
}
impl RetrievalService {
	pub fn new(cfg: Config) -> Self {
		Self { cfg, store: Arc::new(HttpMemoryStore), stages: Stages::default() }
	}

	pub fn with_store(cfg: Config, store: Arc<dyn MemoryStore>) -> Self {
		Self { cfg, store, stages: Stages::default() }
	}

	pub fn with_parts(cfg: Config, store: Arc<dyn MemoryStore>, stages: Stages) -> Self {
		Self { cfg, store, stages }
	}

	pub fn default_timeout(&self) -> Duration {
		Duration::from_millis(self.cfg.pipeline.timeout_ms)
	}
}

struct HttpMemoryStore;
impl MemoryStore for HttpMemoryStore {
	fn base_search<'a>(
		&'a self,
		cfg: &'a recall_config::Store,
		query: &'a str,
		params: &'a Map<String, Value>,
	) -> BoxFuture<'a, Result<Value>> {
		Box::pin(async move { Ok(store::base_search(cfg, query, params).await?) })
	}

	fn keyword_search<'a>(
		&'a self,
		cfg: &'a recall_config::Store,
		query: &'a str,
		params: &'a Map<String, Value>,
	) -> BoxFuture<'a, Result<Value>> {
		Box::pin(async move { Ok(store::keyword_search(cfg, query, params).await?) })
	}
}
