use std::time::{Duration, Instant};

use serde_json::{Map, Value};
use tokio::time;

use recall_domain::{ResultEnvelope, Status};

use crate::{
	Error, PerformanceMetadata, Result, RetrievalService, SearchRequest, limit,
	stages::StageContext,
};

impl RetrievalService {
	/// Runs the advanced retrieval pipeline for one tool call. Never fails: every failure path
	/// ends in an envelope whose status and metadata describe what happened.
	pub async fn execute(&self, arguments: &Map<String, Value>) -> ResultEnvelope {
		self.execute_with_timeout(arguments, self.default_timeout()).await
	}

	/// Like [`RetrievalService::execute`] with a caller-supplied budget for the advanced
	/// pipeline. An expired budget aborts the in-flight store call and routes to the fallback.
	pub async fn execute_with_timeout(
		&self,
		arguments: &Map<String, Value>,
		timeout: Duration,
	) -> ResultEnvelope {
		let request = SearchRequest::from_arguments(arguments, &self.cfg.pipeline);

		self.search(&request, timeout).await
	}

	pub async fn search(&self, request: &SearchRequest, timeout: Duration) -> ResultEnvelope {
		let outcome = match time::timeout(timeout, self.run(request)).await {
			Ok(outcome) => outcome,
			Err(_) => Err(Error::Timeout { timeout_ms: timeout.as_millis() as u64 }),
		};

		match outcome {
			Ok(envelope) => envelope,
			Err(err) => {
				tracing::warn!(
					error = %err,
					"Advanced retrieval failed; falling back to a plain base search."
				);

				self.fallback_within(request, &err.to_string(), timeout).await
			},
		}
	}

	/// The primary pipeline: validate, base search, optional stages, limit, annotate. Only
	/// validation and base-search failures escape; stage failures are absorbed here.
	async fn run(&self, request: &SearchRequest) -> Result<ResultEnvelope> {
		let started = Instant::now();

		request.validate()?;

		let pool_size = self.base_pool_size(request);
		let params = request.store_params(pool_size);
		let response = self.store.base_search(&self.cfg.store, &request.query, &params).await?;
		let mut envelope = upstream_envelope(response)?;
		let mut metadata = PerformanceMetadata::default();
		let ctx = StageContext { cfg: &self.cfg, store: self.store.as_ref(), request, pool_size };

		for (kind, enabled, stage) in self.stages.ordered(request) {
			if !enabled {
				continue;
			}

			let outcome = stage.apply(ctx, &envelope).await;

			match outcome {
				Ok(next) => {
					envelope = next;

					metadata.mark_applied(kind);
				},
				Err(err) => {
					tracing::warn!(
						stage = kind.as_str(),
						error = %err,
						"Search stage failed; continuing with the previous results."
					);

					metadata.mark_failed(kind);
				},
			}
		}

		let mut envelope = limit::limit_envelope(envelope, request.limit);

		metadata.finish(started);

		tracing::info!(
			elapsed_ms = metadata.elapsed_ms,
			results = envelope.memories.len(),
			keyword_search = metadata.keyword_search_applied,
			rerank = metadata.rerank_applied,
			filter = metadata.filter_applied,
			"Advanced retrieval completed."
		);

		envelope.merge_metadata(metadata.into_map());

		Ok(envelope)
	}

	/// Enhancement stages get a wider candidate pool than the caller's limit; the limiter
	/// restores the requested bound afterwards.
	fn base_pool_size(&self, request: &SearchRequest) -> usize {
		if request.has_enhancements() {
			request.limit.max(self.cfg.pipeline.candidate_k as usize)
		} else {
			request.limit
		}
	}
}

/// Normalizes a base-search response. An upstream `status: "error"` counts as a failed search.
pub(crate) fn upstream_envelope(response: Value) -> Result<ResultEnvelope> {
	let envelope = ResultEnvelope::from_response(response);

	if envelope.status == Status::Error {
		let message =
			envelope.message.unwrap_or_else(|| "Store reported an error status.".to_string());

		return Err(Error::Store { message });
	}

	Ok(envelope)
}
