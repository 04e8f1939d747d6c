use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::record::{self, MemoryRecord};

/// Keys probed, in order, for the result list of an upstream response. The first key present
/// wins even when its value is empty.
pub const RESULT_KEYS: [&str; 2] = ["results", "memories"];

const RESERVED_KEYS: [&str; 3] = ["status", "message", "metadata"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
	#[default]
	Success,
	Error,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope {
	pub memories: Vec<MemoryRecord>,
	#[serde(default)]
	pub status: Status,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	#[serde(default)]
	pub metadata: Map<String, Value>,
	/// Passthrough top-level fields of the upstream response, such as graph relations.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}
impl ResultEnvelope {
	pub fn success(memories: Vec<MemoryRecord>) -> Self {
		Self { memories, ..Default::default() }
	}

	pub fn error(message: impl Into<String>, metadata: Map<String, Value>) -> Self {
		Self {
			memories: Vec::new(),
			status: Status::Error,
			message: Some(message.into()),
			metadata,
			extra: Map::new(),
		}
	}

	/// Builds an envelope from an arbitrarily shaped upstream response. Never fails: anything
	/// that is not an object yields an empty successful envelope.
	pub fn from_response(response: Value) -> Self {
		let memories = extract_memories(&response);
		let Value::Object(map) = response else { return Self::success(memories) };
		let status = match map.get("status").and_then(Value::as_str) {
			Some("error") => Status::Error,
			_ => Status::Success,
		};
		let message = map.get("message").and_then(Value::as_str).map(str::to_string);
		let metadata = match map.get("metadata") {
			Some(Value::Object(metadata)) => metadata.clone(),
			_ => Map::new(),
		};
		let extra = map
			.into_iter()
			.filter(|(key, _)| {
				!RESULT_KEYS.contains(&key.as_str()) && !RESERVED_KEYS.contains(&key.as_str())
			})
			.collect();

		Self { memories, status, message, metadata, extra }
	}

	pub fn merge_metadata(&mut self, entries: Map<String, Value>) {
		self.metadata.extend(entries);
	}
}

/// Extracts the normalized memory list from an upstream response of any shape.
pub fn extract_memories(response: &Value) -> Vec<MemoryRecord> {
	let Value::Object(map) = response else {
		tracing::debug!(
			observed_type = crate::json_type_name(response),
			"Search response is not an object; treating it as empty."
		);

		return Vec::new();
	};
	let Some((key, resolved)) =
		RESULT_KEYS.iter().find_map(|key| map.get(*key).map(|value| (*key, value)))
	else {
		tracing::debug!("Search response carries no result list.");

		return Vec::new();
	};
	let Value::Array(items) = resolved else {
		tracing::warn!(
			key,
			observed_type = crate::json_type_name(resolved),
			"Search response result list is not an array."
		);

		return Vec::new();
	};
	let mut out = Vec::with_capacity(items.len());

	for (index, item) in items.iter().enumerate() {
		match record::normalize(item) {
			Some(record) => out.push(record),
			None => tracing::warn!(
				index,
				observed_type = crate::json_type_name(item),
				"Dropping search result that is not a record or string."
			),
		}
	}

	out
}
