pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Qdrant error: {message}")]
	Qdrant { message: String },
}

impl From<mondap_storage::Error> for Error {
	fn from(err: mondap_storage::Error) -> Self {
		match err {
			mondap_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			mondap_storage::Error::Qdrant(inner) => Self::Qdrant { message: inner.to_string() },
		}
	}
}
