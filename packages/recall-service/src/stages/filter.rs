use recall_domain::{MemoryRecord, ResultEnvelope, overlap_ratio};

use super::{Stage, StageContext};
use crate::{BoxFuture, Result};

pub struct FilterStage;
impl Stage for FilterStage {
	fn apply<'a>(
		&'a self,
		ctx: StageContext<'a>,
		envelope: &'a ResultEnvelope,
	) -> BoxFuture<'a, Result<ResultEnvelope>> {
		Box::pin(async move {
			let mut next = envelope.clone();

			next.memories = filter_memories(&ctx.request.query, next.memories, &ctx.cfg.filter);

			Ok(next)
		})
	}
}

/// Drops records with blank content (when configured) and records whose word overlap with
/// `query` falls below `cfg.min_relevance`. The length bonus of the rerank score does not count
/// here. Survivors keep their relative order.
pub fn filter_memories(
	query: &str,
	records: Vec<MemoryRecord>,
	cfg: &recall_config::Filter,
) -> Vec<MemoryRecord> {
	let before = records.len();
	let kept: Vec<MemoryRecord> =
		records.into_iter().filter(|record| keep_record(query, record, cfg)).collect();

	if kept.len() < before {
		tracing::debug!(dropped = before - kept.len(), kept = kept.len(), "Filtered search results.");
	}

	kept
}

fn keep_record(query: &str, record: &MemoryRecord, cfg: &recall_config::Filter) -> bool {
	if cfg.drop_empty && !record.has_content() {
		return false;
	}
	if cfg.min_relevance > 0.0 && overlap_ratio(query, &record.content) < cfg.min_relevance {
		return false;
	}

	true
}
