use std::time::{Duration, Instant};

use serde_json::{Map, Value};
use tokio::time;

use recall_domain::ResultEnvelope;

use crate::{Error, PerformanceMetadata, RetrievalService, SearchRequest, limit, pipeline};

impl RetrievalService {
	/// Degraded path: a plain base search with every enhancement stripped. Never fails; when the
	/// base search fails again the result is an empty error envelope.
	pub async fn fallback(&self, request: &SearchRequest, original_error: &str) -> ResultEnvelope {
		self.fallback_within(request, original_error, self.default_timeout()).await
	}

	pub(crate) async fn fallback_within(
		&self,
		request: &SearchRequest,
		original_error: &str,
		timeout: Duration,
	) -> ResultEnvelope {
		let started = Instant::now();
		let baseline = request.baseline();
		let params = baseline.store_params(baseline.limit);
		let search = self.store.base_search(&self.cfg.store, &baseline.query, &params);
		let outcome = match time::timeout(timeout, search).await {
			Ok(outcome) => outcome.and_then(pipeline::upstream_envelope),
			Err(_) => Err(Error::Timeout { timeout_ms: timeout.as_millis() as u64 }),
		};

		match outcome {
			Ok(envelope) => {
				let mut envelope = limit::limit_envelope(envelope, baseline.limit);
				let mut metadata = PerformanceMetadata {
					fallback_used: true,
					original_error: Some(original_error.to_string()),
					..Default::default()
				};

				metadata.finish(started);

				tracing::info!(
					elapsed_ms = metadata.elapsed_ms,
					results = envelope.memories.len(),
					"Fallback search completed."
				);

				envelope.merge_metadata(metadata.into_map());

				envelope
			},
			Err(err) => {
				tracing::error!(error = %err, original_error, "Fallback search failed.");

				let mut metadata = Map::new();

				metadata.insert("fallbackUsed".to_string(), Value::Bool(true));
				metadata.insert("fallbackFailed".to_string(), Value::Bool(true));
				metadata
					.insert("originalError".to_string(), Value::String(original_error.to_string()));

				ResultEnvelope::error(
					format!("Both advanced and standard search failed: {err}"),
					metadata,
				)
			},
		}
	}
}
