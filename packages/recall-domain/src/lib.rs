pub mod envelope;
pub mod record;
pub mod relevance;

pub use envelope::{ResultEnvelope, Status, extract_memories};
pub use record::{MemoryRecord, normalize};
pub use relevance::{cmp_f32_desc, overlap_ratio, relevance_score, score_record};

use serde_json::Value;

pub fn json_type_name(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "bool",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}
