pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Knowledge base failed validation: {}.", issues.join("; "))]
	Schema { issues: Vec<String> },
	#[error("Solution not found: {id}.")]
	NotFound { id: String },
	#[error("Invalid value {value:?} for {field}; expected one of: {}.", allowed.join(", "))]
	InvalidContextValue { field: String, value: String, allowed: Vec<&'static str> },
	#[error("Failed to parse knowledge base JSON.")]
	Json(#[from] serde_json::Error),
}
