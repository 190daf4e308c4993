//! Broker-level error types shared across flows, the API client, and stores.

// self
use crate::_prelude::*;

/// Broker-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical broker error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Temporary upstream failure.
	#[error(transparent)]
	Transient(#[from] TransientError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Platform envelope reported a non-success error code.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// Action token could not be obtained or was not approved.
	#[error(transparent)]
	Authorization(#[from] AuthorizationError),

	/// A vault item needs a character to act through, but none is selected.
	#[error("No current character is available to act on a vault item.")]
	MissingCurrentCharacter,
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// An endpoint URL could not be derived from the configured base URL.
	#[error("Endpoint `{path}` cannot be joined onto the base URL.")]
	InvalidEndpoint {
		/// Relative endpoint path.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Request payload could not be serialized.
	#[error("Request body for {endpoint} could not be serialized.")]
	RequestBody {
		/// Endpoint label.
		endpoint: &'static str,
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Temporary failure variants.
#[derive(Debug, ThisError)]
pub enum TransientError {
	/// Endpoint returned an unexpected but non-fatal response.
	#[error("{endpoint} returned an unexpected response: {message}.")]
	UnexpectedResponse {
		/// Endpoint label.
		endpoint: &'static str,
		/// Broker-supplied message summarizing the failure.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
	/// Endpoint responded with JSON that does not match the expected shape.
	#[error("{endpoint} returned malformed JSON.")]
	ResponseParse {
		/// Endpoint label.
		endpoint: &'static str,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::error::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
}
impl TransientError {
	/// HTTP status code attached to the failure, if known.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::UnexpectedResponse { status, .. } | Self::ResponseParse { status, .. } => *status,
		}
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the platform API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the platform API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Error reported inside the platform response envelope.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("{endpoint} failed with {error_status} ({error_code}): {message}")]
pub struct ApiError {
	/// Endpoint label.
	pub endpoint: &'static str,
	/// Numeric platform error code.
	pub error_code: i32,
	/// Symbolic platform error status.
	pub error_status: String,
	/// Human-readable platform message.
	pub message: String,
	/// Seconds the platform asks callers to wait, when throttled.
	pub throttle_seconds: i32,
}

/// Failure to obtain a usable action token.
#[derive(Debug, ThisError)]
#[error("{message_key}: {cause}")]
pub struct AuthorizationError {
	/// Localization key describing the failure.
	pub message_key: &'static str,
	/// Underlying reason.
	#[source]
	pub cause: AuthorizationCause,
}
impl AuthorizationError {
	/// Message key shared by every token-acquisition failure.
	pub const FAILED_TOKEN: &'static str = "AWA.FailedToken";
	/// Developer-note fallback used when the response carried none.
	pub const NO_RESPONSE: &'static str = "no response";

	/// Wraps a failed token request.
	pub fn request(error: Error) -> Self {
		Self { message_key: Self::FAILED_TOKEN, cause: AuthorizationCause::Request(Box::new(error)) }
	}

	/// Reports a freshly issued token that is still unusable.
	pub fn rejected(developer_note: Option<&str>) -> Self {
		let developer_note =
			developer_note.filter(|note| !note.is_empty()).unwrap_or(Self::NO_RESPONSE).to_owned();

		Self { message_key: Self::FAILED_TOKEN, cause: AuthorizationCause::Rejected { developer_note } }
	}
}

/// Why an [`AuthorizationError`] was raised.
#[derive(Debug, ThisError)]
pub enum AuthorizationCause {
	/// The token request itself failed.
	#[error(transparent)]
	Request(Box<Error>),
	/// The service answered, but the token is not usable.
	#[error("token was not approved: {developer_note}")]
	Rejected {
		/// Developer-facing note from the response, or `no response`.
		developer_note: String,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn rejected_token_falls_back_to_no_response() {
		let err = AuthorizationError::rejected(None);

		assert_eq!(err.to_string(), "AWA.FailedToken: token was not approved: no response");

		let err = AuthorizationError::rejected(Some(""));

		assert!(err.to_string().ends_with("no response"));

		let err = AuthorizationError::rejected(Some("User declined on device."));

		assert!(err.to_string().ends_with("User declined on device."));
	}

	#[test]
	fn request_failure_keeps_the_underlying_error_as_source() {
		let inner = Error::MissingCurrentCharacter;
		let err: Error = AuthorizationError::request(inner).into();
		let source = StdError::source(&err)
			.expect("Authorization errors should expose their cause as the source.");

		assert!(matches!(err, Error::Authorization(_)));
		assert_eq!(source.to_string(), Error::MissingCurrentCharacter.to_string());
	}
}
