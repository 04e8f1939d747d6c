use serde_json::{Value, json};

use recall_domain::{ResultEnvelope, Status, extract_memories, normalize, score_record};

fn mixed_response() -> Value {
	json!({
		"results": [
			{ "content": "I drink coffee every morning", "id": "m-1" },
			"unrelated text",
			{ "text": "coffee shop reviews", "id": "m-3" },
			17,
		]
	})
}

#[test]
fn mixed_upstream_items_normalize_to_records() {
	let memories = extract_memories(&mixed_response());
	let contents: Vec<_> = memories.iter().map(|record| record.content.as_str()).collect();

	assert_eq!(contents, vec!["I drink coffee every morning", "unrelated text", "coffee shop reviews"]);
	assert!(memories[1].fields.is_empty());
	assert_eq!(memories[2].id().as_deref(), Some("m-3"));
}

#[test]
fn normalized_content_is_always_a_string() {
	let items = [
		json!("plain"),
		json!({ "content": "a" }),
		json!({ "text": 1.5 }),
		json!({ "memory": ["x"] }),
		json!({ "other": true }),
		json!({}),
	];

	for item in items {
		let record = normalize(&item).expect("strings and objects must normalize");

		assert_eq!(normalize(&item), Some(record.clone()), "normalization must be pure");
		assert!(serde_json::to_value(&record).expect("serialize")["content"].is_string());
	}
}

#[test]
fn envelope_round_trips_through_serde() {
	let envelope = ResultEnvelope::from_response(mixed_response());
	let value = serde_json::to_value(&envelope).expect("serialize");
	let decoded: ResultEnvelope = serde_json::from_value(value).expect("deserialize");

	assert_eq!(decoded, envelope);
	assert_eq!(decoded.status, Status::Success);
}

#[test]
fn scores_follow_query_overlap() {
	let memories = extract_memories(&mixed_response());
	let scores: Vec<f32> = memories.iter().map(|record| score_record("coffee", record)).collect();

	assert!(scores[0] > scores[1]);
	assert!(scores[2] > scores[0], "shorter content with higher overlap must win: {scores:?}");
}
