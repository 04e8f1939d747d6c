// std
use std::time::Duration as StdDuration;

// crates.io
use reqwest::Client;
use serde_json::{Map, Value};

use crate::Result;

/// Issues the store's plain semantic search and returns the raw response body.
pub async fn base_search(
	cfg: &recall_config::Store,
	query: &str,
	params: &Map<String, Value>,
) -> Result<Value> {
	post_search(cfg, &cfg.base_search_path, query, params).await
}

/// Issues the store's keyword-oriented search and returns the raw response body.
pub async fn keyword_search(
	cfg: &recall_config::Store,
	query: &str,
	params: &Map<String, Value>,
) -> Result<Value> {
	post_search(cfg, &cfg.keyword_search_path, query, params).await
}

async fn post_search(
	cfg: &recall_config::Store,
	path: &str,
	query: &str,
	params: &Map<String, Value>,
) -> Result<Value> {
	let client = Client::builder().timeout(StdDuration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, path);
	let body = build_search_body(query, params);

	tracing::debug!(%url, "Sending memory store search.");

	let res = client
		.post(url)
		.headers(crate::auth_headers(cfg.api_key.as_deref(), &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	Ok(json)
}

fn build_search_body(query: &str, params: &Map<String, Value>) -> Value {
	let mut body = params.clone();

	body.insert("query".to_string(), Value::String(query.to_string()));

	Value::Object(body)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn query_overrides_passthrough_params() {
		let mut params = Map::new();

		params.insert("query".to_string(), Value::String("stale".to_string()));
		params.insert("user_id".to_string(), Value::String("alice".to_string()));

		let body = build_search_body("coffee", &params);

		assert_eq!(body, serde_json::json!({ "query": "coffee", "user_id": "alice" }));
	}
}
