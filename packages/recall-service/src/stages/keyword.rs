use std::collections::HashSet;

use recall_domain::{MemoryRecord, ResultEnvelope, extract_memories};

use super::{Stage, StageContext, StageKind};
use crate::{BoxFuture, Error, Result};

/// Secondary keyword search merged behind the running results. Purely additive.
pub struct KeywordSearchStage;
impl Stage for KeywordSearchStage {
	fn apply<'a>(
		&'a self,
		ctx: StageContext<'a>,
		envelope: &'a ResultEnvelope,
	) -> BoxFuture<'a, Result<ResultEnvelope>> {
		Box::pin(async move {
			let params = ctx.request.store_params(ctx.pool_size);
			let response = ctx
				.store
				.keyword_search(&ctx.cfg.store, &ctx.request.query, &params)
				.await
				.map_err(|err| Error::Stage {
					stage: StageKind::KeywordSearch.as_str(),
					message: err.to_string(),
				})?;
			let additions = extract_memories(&response);

			tracing::debug!(additions = additions.len(), "Keyword search returned results.");

			Ok(merge_memories(envelope.clone(), additions))
		})
	}
}

/// Appends `additions` that are not already present. A record is a duplicate when its `id` or
/// its non-blank content matches a record already kept.
pub fn merge_memories(mut envelope: ResultEnvelope, additions: Vec<MemoryRecord>) -> ResultEnvelope {
	let mut ids: HashSet<String> = envelope.memories.iter().filter_map(MemoryRecord::id).collect();
	let mut contents: HashSet<String> = envelope
		.memories
		.iter()
		.filter(|record| record.has_content())
		.map(|record| record.content.clone())
		.collect();

	for record in additions {
		let id = record.id();

		if id.as_ref().is_some_and(|id| ids.contains(id))
			|| (record.has_content() && contents.contains(&record.content))
		{
			continue;
		}
		if let Some(id) = id {
			ids.insert(id);
		}
		if record.has_content() {
			contents.insert(record.content.clone());
		}

		envelope.memories.push(record);
	}

	envelope
}
