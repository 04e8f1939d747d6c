use recall_domain::{MemoryRecord, ResultEnvelope, cmp_f32_desc, score_record};

use super::{Stage, StageContext};
use crate::{BoxFuture, Result};

pub struct RerankStage;
impl Stage for RerankStage {
	fn apply<'a>(
		&'a self,
		ctx: StageContext<'a>,
		envelope: &'a ResultEnvelope,
	) -> BoxFuture<'a, Result<ResultEnvelope>> {
		Box::pin(async move {
			let mut next = envelope.clone();

			next.memories = rerank(&ctx.request.query, next.memories);

			Ok(next)
		})
	}
}

struct ScoredRecord {
	score: f32,
	record: MemoryRecord,
}

/// Orders records by descending lexical relevance to `query`. The sort is stable, so equally
/// scored records keep the order the store returned them in. A blank query leaves the input
/// untouched.
pub fn rerank(query: &str, records: Vec<MemoryRecord>) -> Vec<MemoryRecord> {
	if query.trim().is_empty() {
		tracing::error!("Rerank requires a non-empty query; keeping the input order.");

		return records;
	}

	let mut scored: Vec<ScoredRecord> = records
		.into_iter()
		.map(|record| ScoredRecord { score: score_record(query, &record), record })
		.collect();

	scored.sort_by(|a, b| cmp_f32_desc(a.score, b.score));

	scored.into_iter().map(|scored| scored.record).collect()
}
