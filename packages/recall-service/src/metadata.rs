use std::time::Instant;

use serde_json::{Map, Value};

use crate::stages::StageKind;

/// Pipeline provenance merged into the returned envelope's metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerformanceMetadata {
	pub elapsed_ms: f64,
	pub keyword_search_applied: bool,
	pub rerank_applied: bool,
	pub filter_applied: bool,
	pub fallback_used: bool,
	pub original_error: Option<String>,
	pub failed_stages: Vec<StageKind>,
}
impl PerformanceMetadata {
	pub fn mark_applied(&mut self, kind: StageKind) {
		match kind {
			StageKind::KeywordSearch => self.keyword_search_applied = true,
			StageKind::Rerank => self.rerank_applied = true,
			StageKind::Filter => self.filter_applied = true,
		}
	}

	pub fn mark_failed(&mut self, kind: StageKind) {
		self.failed_stages.push(kind);
	}

	pub fn finish(&mut self, started: Instant) {
		self.elapsed_ms = started.elapsed().as_secs_f64() * 1_000.0;
	}

	pub fn into_map(self) -> Map<String, Value> {
		let mut map = Map::new();

		map.insert("elapsedMs".to_string(), Value::from(self.elapsed_ms));
		map.insert("keywordSearchApplied".to_string(), Value::Bool(self.keyword_search_applied));
		map.insert("rerankApplied".to_string(), Value::Bool(self.rerank_applied));
		map.insert("filterApplied".to_string(), Value::Bool(self.filter_applied));
		map.insert("fallbackUsed".to_string(), Value::Bool(self.fallback_used));
		map.insert("advanced_retrieval".to_string(), Value::Bool(!self.fallback_used));

		if let Some(original_error) = self.original_error {
			map.insert("originalError".to_string(), Value::String(original_error));
		}
		if !self.failed_stages.is_empty() {
			map.insert(
				"failedStages".to_string(),
				Value::Array(
					self.failed_stages
						.into_iter()
						.map(|kind| Value::String(kind.as_str().to_string()))
						.collect(),
				),
			);
		}

		map
	}
}
