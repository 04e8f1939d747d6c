use recall_domain::ResultEnvelope;

use crate::request::DEFAULT_LIMIT;

/// Truncates the envelope to `limit` memories, keeping status, message, metadata, and
/// passthrough fields. A zero limit behaves as [`DEFAULT_LIMIT`].
pub fn limit_envelope(mut envelope: ResultEnvelope, limit: usize) -> ResultEnvelope {
	let limit = effective_limit(limit);

	if envelope.memories.len() > limit {
		tracing::debug!(from = envelope.memories.len(), to = limit, "Truncating search results.");

		envelope.memories.truncate(limit);
	}

	envelope
}

fn effective_limit(limit: usize) -> usize {
	if limit == 0 { DEFAULT_LIMIT } else { limit }
}
