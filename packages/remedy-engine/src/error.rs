pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Pain point description is empty or contains no meaningful terms.")]
	EmptyQuery,
	#[error("Invalid value {value:?} for {field}.")]
	InvalidContextValue { field: String, value: String },
	#[error("Solution not found: {id}.")]
	NotFound { id: String },
	#[error("Knowledge base failed validation: {}.", issues.join("; "))]
	Schema { issues: Vec<String> },
	#[error("Failed to score solution {solution_id}: {message}")]
	Scoring { solution_id: String, message: String },
	#[error(transparent)]
	Config(#[from] remedy_config::Error),
}
impl From<remedy_domain::Error> for Error {
	fn from(err: remedy_domain::Error) -> Self {
		match err {
			remedy_domain::Error::Schema { issues } => Self::Schema { issues },
			remedy_domain::Error::NotFound { id } => Self::NotFound { id },
			remedy_domain::Error::InvalidContextValue { field, value, .. } =>
				Self::InvalidContextValue { field, value },
			remedy_domain::Error::Json(inner) => Self::Schema { issues: vec![inner.to_string()] },
		}
	}
}
