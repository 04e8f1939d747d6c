use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub store: Store,
	#[serde(default)]
	pub pipeline: Pipeline,
	#[serde(default)]
	pub filter: Filter,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

/// Connection settings for the external memory store.
#[derive(Debug, Clone, Deserialize)]
pub struct Store {
	pub api_base: String,
	/// Optional. Blank values are treated as absent and no `Authorization` header is sent.
	pub api_key: Option<String>,
	pub base_search_path: String,
	pub keyword_search_path: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Pipeline {
	/// Budget for the whole advanced pipeline before the fallback path takes over.
	pub timeout_ms: u64,
	/// Base-search pool size requested when any enhancement stage is enabled.
	pub candidate_k: u32,
	pub keyword_search: bool,
	pub rerank: bool,
	pub filter_memories: bool,
}
impl Default for Pipeline {
	fn default() -> Self {
		Self {
			timeout_ms: 15_000,
			candidate_k: 20,
			keyword_search: false,
			rerank: false,
			filter_memories: false,
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Filter {
	pub min_relevance: f32,
	pub drop_empty: bool,
}
impl Default for Filter {
	fn default() -> Self {
		Self { min_relevance: 0.05, drop_empty: true }
	}
}
