//! Platform API client: request construction, envelope decoding, and endpoint wrappers.

pub mod awa;
pub mod envelope;
pub mod items;
pub mod mapper;

pub use awa::*;
pub use envelope::*;
pub use items::*;
pub use mapper::*;

// crates.io
use oauth2::{
	AccessToken, AsyncHttpClient, HttpRequest,
	http::{
		Method,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
	},
};
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	config::ApiConfig,
	error::ConfigError,
	http::{ApiHttpClient, ResponseMetadataSlot},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// API client specialized for the crate's default reqwest transport stack.
pub type ReqwestBungieApi = BungieApi<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Endpoints the client talks to; used as labels in errors, spans, and metrics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApiEndpoint {
	/// `POST /Destiny2/Awa/Initialize/`.
	AwaInitialize,
	/// `GET /Destiny2/Awa/GetActionToken/{correlationId}/`.
	AwaGetActionToken,
	/// `GET /Destiny2/{membershipType}/Profile/{membershipId}/Item/{itemInstanceId}/`.
	GetItem,
	/// `POST /Destiny2/Actions/Items/InsertSocketPlug/`.
	InsertSocketPlug,
}
impl ApiEndpoint {
	/// Returns a stable label suitable for error messages and metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ApiEndpoint::AwaInitialize => "Destiny2.Awa.Initialize",
			ApiEndpoint::AwaGetActionToken => "Destiny2.Awa.GetActionToken",
			ApiEndpoint::GetItem => "Destiny2.GetItem",
			ApiEndpoint::InsertSocketPlug => "Destiny2.InsertSocketPlug",
		}
	}
}
impl Display for ApiEndpoint {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Authenticated client for the platform endpoints the broker needs.
///
/// Every request carries the configured `X-API-Key`; once an OAuth access token is installed
/// via [`BungieApi::set_access_token`], requests also carry `Authorization: Bearer`.
pub struct BungieApi<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Validated configuration.
	pub config: ApiConfig,
	/// Transport used for every request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors.
	pub transport_mapper: Arc<M>,
	access_token: RwLock<Option<AccessToken>>,
}
impl<C, M> BungieApi<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client over the caller-provided transport + mapper pair.
	pub fn with_http_client(
		config: ApiConfig,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			config,
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			access_token: RwLock::new(None),
		}
	}

	/// Installs (or clears) the OAuth access token sent as a bearer credential.
	pub fn set_access_token(&self, token: Option<AccessToken>) {
		*self.access_token.write() = token;
	}

	/// Installs the access token at construction time.
	pub fn with_access_token(self, token: AccessToken) -> Self {
		self.set_access_token(Some(token));

		self
	}

	fn build_request(
		&self,
		method: Method,
		url: &Url,
		body: Option<Vec<u8>>,
	) -> Result<HttpRequest, ConfigError> {
		let mut builder = oauth2::http::Request::builder()
			.method(method)
			.uri(url.as_str())
			.header(ACCEPT, "application/json")
			.header("X-API-Key", self.config.api_key.as_str());

		if let Some(token) = self.access_token.read().as_ref() {
			builder = builder.header(AUTHORIZATION, format!("Bearer {}", token.secret()));
		}
		if body.is_some() {
			builder = builder.header(CONTENT_TYPE, "application/json");
		}

		Ok(builder.body(body.unwrap_or_default())?)
	}

	pub(crate) async fn get<T>(&self, endpoint: ApiEndpoint, url: Url) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let request = self.build_request(Method::GET, &url, None)?;

		self.execute(endpoint, request).await
	}

	pub(crate) async fn post<B, T>(&self, endpoint: ApiEndpoint, url: Url, body: &B) -> Result<T>
	where
		B: ?Sized + Serialize,
		T: DeserializeOwned,
	{
		let payload = serde_json::to_vec(body)
			.map_err(|source| ConfigError::RequestBody { endpoint: endpoint.as_str(), source })?;
		let request = self.build_request(Method::POST, &url, Some(payload))?;

		self.execute(endpoint, request).await
	}

	async fn execute<T>(&self, endpoint: ApiEndpoint, request: HttpRequest) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let meta = ResponseMetadataSlot::default();
		let handle = self.http_client.with_metadata(meta.clone());
		let response = handle.call(request).await.map_err(|err| {
			self.transport_mapper.map_transport_error(endpoint, meta.take().as_ref(), err)
		})?;

		envelope::decode_response(endpoint, response)
	}
}
#[cfg(feature = "reqwest")]
impl BungieApi<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a client that provisions its own reqwest transport.
	pub fn new(config: ApiConfig) -> Self {
		Self::with_http_client(
			config,
			ReqwestHttpClient::default(),
			Arc::new(ReqwestTransportErrorMapper),
		)
	}
}
impl<C, M> Debug for BungieApi<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("BungieApi")
			.field("config", &self.config)
			.field("access_token_set", &self.access_token.read().is_some())
			.finish()
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// self
	use super::*;

	fn api() -> ReqwestBungieApi {
		let config = ApiConfig::builder("test-key")
			.base_url(
				Url::parse(ApiConfig::PRODUCTION_BASE_URL).expect("Production URL should parse."),
			)
			.build()
			.expect("Config fixture should build.");

		BungieApi::new(config)
	}

	#[test]
	fn requests_carry_api_key_and_bearer_token() {
		let api = api().with_access_token(AccessToken::new("bearer-value".into()));
		let url = api.config.endpoint("/Destiny2/Awa/Initialize/").expect("Endpoint should join.");
		let request = api
			.build_request(Method::POST, &url, Some(b"{}".to_vec()))
			.expect("Request should build.");

		assert_eq!(request.headers()["X-API-Key"], "test-key");
		assert_eq!(request.headers()[AUTHORIZATION], "Bearer bearer-value");
		assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
		assert_eq!(request.uri(), "https://www.bungie.net/Platform/Destiny2/Awa/Initialize/");
	}

	#[test]
	fn anonymous_get_requests_skip_optional_headers() {
		let api = api();
		let url = api.config.endpoint("Destiny2/Manifest/").expect("Endpoint should join.");
		let request = api.build_request(Method::GET, &url, None).expect("Request should build.");

		assert!(request.headers().get(AUTHORIZATION).is_none());
		assert!(request.headers().get(CONTENT_TYPE).is_none());
		assert!(request.body().is_empty());
	}

	#[test]
	fn debug_output_hides_credentials() {
		let api = api().with_access_token(AccessToken::new("bearer-value".into()));
		let rendered = format!("{api:?}");

		assert!(!rendered.contains("bearer-value"));
		assert!(!rendered.contains("test-key"));
		assert!(rendered.contains("access_token_set: true"));
	}
}
