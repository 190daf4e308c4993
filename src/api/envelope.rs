//! Platform response envelope (`{ Response, ErrorCode, ErrorStatus, Message, ... }`).

// crates.io
use oauth2::HttpResponse;
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	api::ApiEndpoint,
	error::{ApiError, TransientError},
};

/// `ErrorCode` value reported by successful calls.
pub const PLATFORM_SUCCESS: i32 = 1;

const BODY_PREVIEW_LIMIT: usize = 256;

/// Envelope wrapped around every platform response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServerResponse<T> {
	/// Payload; missing or `null` on most failures.
	pub response: Option<T>,
	/// Numeric platform error code; [`PLATFORM_SUCCESS`] on success.
	pub error_code: i32,
	/// Seconds the caller should wait before retrying.
	#[serde(default)]
	pub throttle_seconds: i32,
	/// Symbolic error status.
	#[serde(default)]
	pub error_status: String,
	/// Human-readable message.
	#[serde(default)]
	pub message: String,
	/// Extra message parameters.
	#[serde(default)]
	pub message_data: BTreeMap<String, String>,
}
impl<T> ServerResponse<T> {
	/// Returns the payload or the envelope's error.
	pub fn into_result(self, endpoint: ApiEndpoint) -> Result<T> {
		if self.error_code != PLATFORM_SUCCESS {
			return Err(ApiError {
				endpoint: endpoint.as_str(),
				error_code: self.error_code,
				error_status: self.error_status,
				message: self.message,
				throttle_seconds: self.throttle_seconds,
			}
			.into());
		}

		self.response.ok_or_else(|| {
			TransientError::UnexpectedResponse {
				endpoint: endpoint.as_str(),
				message: "successful envelope carried no Response".into(),
				status: None,
				retry_after: None,
			}
			.into()
		})
	}
}

/// Decodes an HTTP response into the endpoint payload.
///
/// The envelope is read first with an untyped payload so platform errors surface as
/// [`ApiError`] even when their `Response` does not match `T`.
pub fn decode_response<T>(endpoint: ApiEndpoint, response: HttpResponse) -> Result<T>
where
	T: DeserializeOwned,
{
	let status = response.status();
	let body = response.body();
	let envelope: ServerResponse<serde_json::Value> =
		match serde_path_to_error::deserialize(&mut serde_json::Deserializer::from_slice(body)) {
			Ok(envelope) => envelope,
			Err(source) if status.is_success() =>
				return Err(TransientError::ResponseParse {
					endpoint: endpoint.as_str(),
					source,
					status: Some(status.as_u16()),
				}
				.into()),
			Err(_) =>
				return Err(TransientError::UnexpectedResponse {
					endpoint: endpoint.as_str(),
					message: format!("HTTP {}: {}", status.as_u16(), body_preview(body)),
					status: Some(status.as_u16()),
					retry_after: None,
				}
				.into()),
		};
	let payload = envelope.into_result(endpoint)?;

	serde_path_to_error::deserialize(payload).map_err(|source| {
		TransientError::ResponseParse { endpoint: endpoint.as_str(), source, status: Some(status.as_u16()) }
			.into()
	})
}

fn body_preview(body: &[u8]) -> String {
	let text = String::from_utf8_lossy(body);
	let trimmed = text.trim();

	match trimmed.char_indices().nth(BODY_PREVIEW_LIMIT) {
		Some((idx, _)) => format!("{}…", &trimmed[..idx]),
		None => trimmed.to_owned(),
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use oauth2::http::StatusCode;
	// self
	use super::*;
	use crate::error::Error;

	fn response(status: u16, body: &str) -> HttpResponse {
		let mut response = HttpResponse::new(body.as_bytes().to_vec());

		*response.status_mut() =
			StatusCode::from_u16(status).expect("Status fixture should be a valid code.");

		response
	}

	#[derive(Debug, Deserialize)]
	#[serde(rename_all = "camelCase")]
	struct Correlation {
		correlation_id: String,
	}

	#[test]
	fn success_envelope_yields_payload() {
		let body = r#"{"Response":{"correlationId":"abc"},"ErrorCode":1,"ThrottleSeconds":0,"ErrorStatus":"Success","Message":"Ok","MessageData":{}}"#;
		let payload: Correlation = decode_response(ApiEndpoint::AwaInitialize, response(200, body))
			.expect("Success envelopes should decode.");

		assert_eq!(payload.correlation_id, "abc");
	}

	#[test]
	fn platform_errors_surface_even_with_mismatched_payload() {
		let body = r#"{"Response":0,"ErrorCode":1618,"ThrottleSeconds":0,"ErrorStatus":"DestinyUnexpectedError","Message":"Something broke","MessageData":{}}"#;
		let err = decode_response::<Correlation>(ApiEndpoint::InsertSocketPlug, response(500, body))
			.expect_err("Platform errors should be reported.");

		match err {
			Error::Api(api) => {
				assert_eq!(api.error_code, 1618);
				assert_eq!(api.error_status, "DestinyUnexpectedError");
				assert_eq!(api.endpoint, "Destiny2.InsertSocketPlug");
			},
			other => panic!("Unexpected error variant: {other:?}"),
		}
	}

	#[test]
	fn non_json_failures_are_transient() {
		let err = decode_response::<Correlation>(ApiEndpoint::GetItem, response(502, "<html>Bad Gateway</html>"))
			.expect_err("HTML error pages should not decode.");

		assert!(matches!(
			err,
			Error::Transient(TransientError::UnexpectedResponse { status: Some(502), .. })
		));
	}

	#[test]
	fn payload_shape_mismatch_reports_the_path() {
		let body = r#"{"Response":{"correlationId":7},"ErrorCode":1,"ErrorStatus":"Success","Message":"Ok"}"#;
		let err = decode_response::<Correlation>(ApiEndpoint::AwaInitialize, response(200, body))
			.expect_err("Wrong payload types should fail.");

		match err {
			Error::Transient(TransientError::ResponseParse { source, .. }) =>
				assert_eq!(source.path().to_string(), "correlationId"),
			other => panic!("Unexpected error variant: {other:?}"),
		}
	}

	#[test]
	fn body_preview_truncates_long_bodies() {
		let long = "x".repeat(BODY_PREVIEW_LIMIT + 10);

		assert_eq!(body_preview(long.as_bytes()).chars().count(), BODY_PREVIEW_LIMIT + 1);
		assert_eq!(body_preview(b"  short  "), "short");
	}
}
