mod filter;
mod keyword;
mod rerank;

pub use filter::{FilterStage, filter_memories};
pub use keyword::{KeywordSearchStage, merge_memories};
pub use rerank::{RerankStage, rerank};

use std::sync::Arc;

use recall_config::Config;
use recall_domain::ResultEnvelope;

use crate::{BoxFuture, MemoryStore, Result, SearchRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
	KeywordSearch,
	Rerank,
	Filter,
}
impl StageKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::KeywordSearch => "keyword_search",
			Self::Rerank => "rerank",
			Self::Filter => "filter",
		}
	}
}

/// Request-scoped inputs shared by every stage of one pipeline run.
#[derive(Clone, Copy)]
pub struct StageContext<'a> {
	pub cfg: &'a Config,
	pub store: &'a dyn MemoryStore,
	pub request: &'a SearchRequest,
	/// Pool size requested from the store for this run.
	pub pool_size: usize,
}

/// One optional enhancement over the running envelope. Implementations return a new envelope
/// and leave the input untouched so a failure can carry the pre-stage envelope forward.
pub trait Stage
where
	Self: Send + Sync,
{
	fn apply<'a>(
		&'a self,
		ctx: StageContext<'a>,
		envelope: &'a ResultEnvelope,
	) -> BoxFuture<'a, Result<ResultEnvelope>>;
}

#[derive(Clone)]
pub struct Stages {
	pub keyword_search: Arc<dyn Stage>,
	pub rerank: Arc<dyn Stage>,
	pub filter: Arc<dyn Stage>,
}
impl Stages {
	pub fn new(
		keyword_search: Arc<dyn Stage>,
		rerank: Arc<dyn Stage>,
		filter: Arc<dyn Stage>,
	) -> Self {
		Self { keyword_search, rerank, filter }
	}

	/// Stages in execution order, each paired with whether the request enables it.
	pub fn ordered(&self, request: &SearchRequest) -> [(StageKind, bool, &dyn Stage); 3] {
		[
			(StageKind::KeywordSearch, request.keyword_search, self.keyword_search.as_ref()),
			(StageKind::Rerank, request.rerank, self.rerank.as_ref()),
			(StageKind::Filter, request.filter_memories, self.filter.as_ref()),
		]
	}
}
impl Default for Stages {
	fn default() -> Self {
		Self {
			keyword_search: Arc::new(KeywordSearchStage),
			rerank: Arc::new(RerankStage),
			filter: Arc::new(FilterStage),
		}
	}
}
