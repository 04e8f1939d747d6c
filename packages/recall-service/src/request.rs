use serde_json::{Map, Value};

use crate::{Error, Result};

pub const DEFAULT_LIMIT: usize = 5;

const KNOWN_ARGUMENTS: [&str; 6] =
	["query", "user_id", "limit", "keyword_search", "rerank", "filter_memories"];

/// One search call, built from tool-call arguments and discarded once the pipeline returns.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
	pub query: String,
	pub user_id: Option<String>,
	pub limit: usize,
	pub keyword_search: bool,
	pub rerank: bool,
	pub filter_memories: bool,
	/// Arguments the pipeline does not interpret; forwarded to the store untouched.
	pub extra: Map<String, Value>,
}
impl SearchRequest {
	pub fn new(query: impl Into<String>, limit: usize) -> Self {
		Self {
			query: query.into().trim().to_string(),
			user_id: None,
			limit: if limit == 0 { DEFAULT_LIMIT } else { limit },
			keyword_search: false,
			rerank: false,
			filter_memories: false,
			extra: Map::new(),
		}
	}

	/// Parses tool-call arguments. Never fails: malformed optional fields fall back to defaults
	/// with a warning, and query validation is deferred to [`SearchRequest::validate`].
	pub fn from_arguments(
		arguments: &Map<String, Value>,
		defaults: &recall_config::Pipeline,
	) -> Self {
		let query = match arguments.get("query") {
			Some(Value::String(query)) => query.trim().to_string(),
			Some(Value::Null) | None => String::new(),
			Some(other) => {
				tracing::warn!(
					observed_type = recall_domain::json_type_name(other),
					"Ignoring non-string query argument."
				);

				String::new()
			},
		};
		let user_id = match arguments.get("user_id") {
			Some(Value::String(user_id)) if !user_id.trim().is_empty() =>
				Some(user_id.trim().to_string()),
			Some(Value::String(_) | Value::Null) | None => None,
			Some(other) => {
				tracing::warn!(
					observed_type = recall_domain::json_type_name(other),
					"Ignoring non-string user_id argument."
				);

				None
			},
		};
		let extra = arguments
			.iter()
			.filter(|(key, _)| !KNOWN_ARGUMENTS.contains(&key.as_str()))
			.map(|(key, value)| (key.clone(), value.clone()))
			.collect();

		Self {
			query,
			user_id,
			limit: normalize_limit(arguments.get("limit")),
			keyword_search: flag(arguments, "keyword_search", defaults.keyword_search),
			rerank: flag(arguments, "rerank", defaults.rerank),
			filter_memories: flag(arguments, "filter_memories", defaults.filter_memories),
			extra,
		}
	}

	pub fn validate(&self) -> Result<()> {
		if self.query.trim().is_empty() {
			return Err(Error::InvalidRequest {
				message: "query must be a non-empty string.".to_string(),
			});
		}

		Ok(())
	}

	pub fn has_enhancements(&self) -> bool {
		self.keyword_search || self.rerank || self.filter_memories
	}

	/// The same request with every enhancement stage switched off.
	pub fn baseline(&self) -> Self {
		Self { keyword_search: false, rerank: false, filter_memories: false, ..self.clone() }
	}

	/// Store parameters: passthrough arguments plus `user_id` and the requested pool size.
	pub fn store_params(&self, limit: usize) -> Map<String, Value> {
		let mut params = self.extra.clone();

		if let Some(user_id) = self.user_id.as_ref() {
			params.insert("user_id".to_string(), Value::String(user_id.clone()));
		}

		params.insert("limit".to_string(), Value::from(limit));

		params
	}
}

/// Positive JSON integers pass through; anything else present becomes [`DEFAULT_LIMIT`].
pub fn normalize_limit(raw: Option<&Value>) -> usize {
	let Some(raw) = raw.filter(|value| !value.is_null()) else { return DEFAULT_LIMIT };

	match raw.as_u64() {
		Some(limit) if limit > 0 => limit as usize,
		_ => {
			tracing::warn!(limit = %raw, default = DEFAULT_LIMIT, "Invalid limit; using the default.");

			DEFAULT_LIMIT
		},
	}
}

fn flag(arguments: &Map<String, Value>, key: &str, default: bool) -> bool {
	match arguments.get(key) {
		Some(Value::Bool(value)) => *value,
		None | Some(Value::Null) => default,
		Some(other) => {
			tracing::warn!(
				flag = key,
				observed_type = recall_domain::json_type_name(other),
				default,
				"Ignoring non-boolean stage flag."
			);

			default
		},
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn arguments(value: Value) -> Map<String, Value> {
		match value {
			Value::Object(map) => map,
			_ => panic!("arguments must be an object"),
		}
	}

	#[test]
	fn invalid_limits_fall_back_to_default() {
		for raw in [json!("abc"), json!(0), json!(-3), json!(2.5), json!(true), json!([])] {
			assert_eq!(normalize_limit(Some(&raw)), DEFAULT_LIMIT, "{raw} must normalize");
		}

		assert_eq!(normalize_limit(None), DEFAULT_LIMIT);
		assert_eq!(normalize_limit(Some(&json!(12))), 12);
	}

	#[test]
	fn parses_known_arguments_and_keeps_the_rest() {
		let request = SearchRequest::from_arguments(
			&arguments(json!({
				"query": "  coffee  ",
				"user_id": "alice",
				"limit": 3,
				"rerank": true,
				"keyword_search": "yes",
				"filters": { "category": "food" },
			})),
			&recall_config::Pipeline::default(),
		);

		assert_eq!(request.query, "coffee");
		assert_eq!(request.user_id.as_deref(), Some("alice"));
		assert_eq!(request.limit, 3);
		assert!(request.rerank);
		assert!(!request.keyword_search, "non-boolean flags must fall back to the default");
		assert!(!request.filter_memories);
		assert_eq!(request.extra.len(), 1);
		assert!(request.extra.contains_key("filters"));
	}

	#[test]
	fn non_string_user_id_is_dropped_not_forwarded() {
		let request = SearchRequest::from_arguments(
			&arguments(json!({ "query": "coffee", "user_id": 42 })),
			&recall_config::Pipeline::default(),
		);

		assert!(request.user_id.is_none());
		assert!(!request.store_params(5).contains_key("user_id"));
	}

	#[test]
	fn absent_flags_use_configured_defaults() {
		let defaults = recall_config::Pipeline {
			keyword_search: true,
			filter_memories: true,
			..Default::default()
		};
		let request =
			SearchRequest::from_arguments(&arguments(json!({ "query": "tea" })), &defaults);

		assert!(request.keyword_search);
		assert!(request.filter_memories);
		assert!(!request.rerank);
	}

	#[test]
	fn blank_query_fails_validation() {
		for raw in [json!({}), json!({ "query": "   " }), json!({ "query": 7 })] {
			let request =
				SearchRequest::from_arguments(&arguments(raw), &recall_config::Pipeline::default());

			assert!(matches!(request.validate(), Err(Error::InvalidRequest { .. })));
		}
	}

	#[test]
	fn baseline_strips_enhancements_only() {
		let mut request = SearchRequest::new("coffee", 4);

		request.rerank = true;
		request.keyword_search = true;
		request.user_id = Some("alice".to_string());

		let baseline = request.baseline();

		assert!(!baseline.has_enhancements());
		assert_eq!(baseline.query, "coffee");
		assert_eq!(baseline.limit, 4);
		assert_eq!(baseline.user_id.as_deref(), Some("alice"));
	}

	#[test]
	fn store_params_carry_user_and_limit() {
		let mut request = SearchRequest::new("coffee", 2);

		request.user_id = Some("alice".to_string());
		request.extra.insert("agent_id".to_string(), json!("planner"));

		let params = request.store_params(20);

		assert_eq!(
			Value::Object(params),
			json!({ "user_id": "alice", "limit": 20, "agent_id": "planner" })
		);
	}
}
