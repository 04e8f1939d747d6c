pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Store error: {message}")]
	Store { message: String },
	#[error("Stage {stage} failed: {message}")]
	Stage { stage: &'static str, message: String },
	#[error("Search timed out after {timeout_ms}ms.")]
	Timeout { timeout_ms: u64 },
}
impl From<recall_providers::Error> for Error {
	fn from(err: recall_providers::Error) -> Self {
		Self::Store { message: err.to_string() }
	}
}
