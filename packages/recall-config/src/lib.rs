mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Filter, Pipeline, Service, Store};

use std::{fs, path::Path};

/// Upper bound of the word-overlap ratio the filter threshold is compared against.
pub const MAX_RELEVANCE: f32 = 1.0;

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;
	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.store.api_base.trim().is_empty() {
		return Err(Error::Validation { message: "store.api_base must be non-empty.".to_string() });
	}

	for (label, path) in [
		("store.base_search_path", &cfg.store.base_search_path),
		("store.keyword_search_path", &cfg.store.keyword_search_path),
	] {
		if !path.starts_with('/') {
			return Err(Error::Validation { message: format!("{label} must start with '/'.") });
		}
	}

	if cfg.store.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "store.timeout_ms must be greater than zero.".to_string(),
		});
	}

	for (key, value) in &cfg.store.default_headers {
		if !value.is_string() {
			return Err(Error::Validation {
				message: format!("store.default_headers.{key} must be a string."),
			});
		}
	}

	if cfg.pipeline.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "pipeline.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.pipeline.candidate_k == 0 {
		return Err(Error::Validation {
			message: "pipeline.candidate_k must be greater than zero.".to_string(),
		});
	}
	if !cfg.filter.min_relevance.is_finite() {
		return Err(Error::Validation {
			message: "filter.min_relevance must be a finite number.".to_string(),
		});
	}
	if !(0.0..=MAX_RELEVANCE).contains(&cfg.filter.min_relevance) {
		return Err(Error::Validation {
			message: "filter.min_relevance must be in the range 0.0-1.0.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.store.api_key.as_deref().map(|key| key.trim().is_empty()).unwrap_or(false) {
		cfg.store.api_key = None;
	}

	let trimmed = cfg.store.api_base.trim().trim_end_matches('/');

	if trimmed.len() != cfg.store.api_base.len() {
		cfg.store.api_base = trimmed.to_string();
	}
}
