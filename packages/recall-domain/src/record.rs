use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names probed, in order, for the text of a structured upstream item.
pub const CONTENT_FIELDS: [&str; 3] = ["content", "text", "memory"];

/// Canonical memory record. Fields of the upstream item other than `content` ride along in
/// `fields` and are serialized back at the top level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
	pub content: String,
	#[serde(flatten)]
	pub fields: Map<String, Value>,
}
impl MemoryRecord {
	pub fn new(content: impl Into<String>) -> Self {
		Self { content: content.into(), fields: Map::new() }
	}

	/// Upstream identifier, when the store supplied one.
	pub fn id(&self) -> Option<String> {
		match self.fields.get("id")? {
			Value::String(id) => Some(id.clone()),
			Value::Number(id) => Some(id.to_string()),
			_ => None,
		}
	}

	pub fn has_content(&self) -> bool {
		!self.content.trim().is_empty()
	}
}

/// Converts one upstream result item into a [`MemoryRecord`].
///
/// Strings become `{ content }`. Objects resolve their content from [`CONTENT_FIELDS`] and keep
/// every other field; a missing or null content resolves to an empty string. Any other JSON type
/// yields `None`.
pub fn normalize(item: &Value) -> Option<MemoryRecord> {
	match item {
		Value::String(text) => Some(MemoryRecord::new(text.as_str())),
		Value::Object(map) => {
			let content = CONTENT_FIELDS
				.iter()
				.find_map(|field| map.get(*field).filter(|value| !value.is_null()))
				.map(content_to_string)
				.unwrap_or_default();
			let mut fields = map.clone();

			fields.remove("content");

			Some(MemoryRecord { content, fields })
		},
		_ => None,
	}
}

fn content_to_string(value: &Value) -> String {
	match value {
		Value::String(text) => text.clone(),
		other => other.to_string(),
	}
}
