pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Expansion is disabled by configuration.")]
	ExpansionDisabled,
	#[error("Record {id} does not expose the grouping-key field {field}.")]
	MissingGroupingKey { id: String, field: String },
	#[error("Fetch failed: {message}")]
	Fetch { message: String },
}

impl From<color_eyre::Report> for Error {
	fn from(err: color_eyre::Report) -> Self {
		Self::Fetch { message: err.to_string() }
	}
}
