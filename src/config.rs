//! Validated API client configuration and its builder.

// self
use crate::{_prelude::*, error::ConfigError};

/// Errors raised while constructing or validating an [`ApiConfig`].
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ApiConfigError {
	/// Base URL is mandatory.
	#[error("Missing base URL.")]
	MissingBaseUrl,
	/// API key is mandatory and must not be blank.
	#[error("Missing API key.")]
	MissingApiKey,
	/// Non-loopback endpoints must use HTTPS.
	#[error("The base URL must use HTTPS: {url}.")]
	InsecureBaseUrl {
		/// URL that failed validation.
		url: String,
	},
	/// Base URL cannot carry query strings or fragments.
	#[error("The base URL must not contain a query or fragment: {url}.")]
	BaseUrlHasQuery {
		/// URL that failed validation.
		url: String,
	},
	/// Token cache storage key must not be blank.
	#[error("Token cache key cannot be empty.")]
	EmptyCacheKey,
}

/// Immutable API configuration consumed by [`crate::api::BungieApi`] and the broker.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
	/// Platform root, e.g. `https://www.bungie.net/Platform`.
	pub base_url: Url,
	/// Application API key sent as `X-API-Key`.
	pub api_key: String,
	/// Key under which the token cache is persisted.
	pub token_cache_key: String,
	/// Component ids requested when re-fetching an item after a mutation.
	pub item_components: Vec<u32>,
}
impl ApiConfig {
	/// Production platform root.
	pub const PRODUCTION_BASE_URL: &'static str = "https://www.bungie.net/Platform";
	/// Default storage key for the token cache.
	pub const DEFAULT_TOKEN_CACHE_KEY: &'static str = "awa-tokens";
	/// ItemInstances, ItemPerks, ItemStats, ItemSockets, ItemCommonData, ItemPlugStates.
	pub const DEFAULT_ITEM_COMPONENTS: [u32; 6] = [300, 302, 304, 305, 307, 308];

	/// Creates a new builder for the provided API key.
	pub fn builder(api_key: impl Into<String>) -> ApiConfigBuilder {
		ApiConfigBuilder::new(api_key)
	}

	/// Joins a relative endpoint path onto the base URL.
	pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		let joined =
			format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path.trim_start_matches('/'));

		Url::parse(&joined)
			.map_err(|source| ConfigError::InvalidEndpoint { path: path.to_owned(), source })
	}

	/// Comma-separated component list for item requests.
	pub fn item_components_query(&self) -> String {
		self.item_components.iter().map(u32::to_string).collect::<Vec<_>>().join(",")
	}

	fn validate(&self) -> Result<(), ApiConfigError> {
		if self.api_key.trim().is_empty() {
			return Err(ApiConfigError::MissingApiKey);
		}
		if self.token_cache_key.trim().is_empty() {
			return Err(ApiConfigError::EmptyCacheKey);
		}
		if self.base_url.query().is_some() || self.base_url.fragment().is_some() {
			return Err(ApiConfigError::BaseUrlHasQuery { url: self.base_url.to_string() });
		}
		if self.base_url.scheme() != "https" && !is_loopback(&self.base_url) {
			return Err(ApiConfigError::InsecureBaseUrl { url: self.base_url.to_string() });
		}

		Ok(())
	}
}
impl Debug for ApiConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiConfig")
			.field("base_url", &self.base_url.as_str())
			.field("api_key", &"<redacted>")
			.field("token_cache_key", &self.token_cache_key)
			.field("item_components", &self.item_components)
			.finish()
	}
}

/// Builder for [`ApiConfig`] values.
#[derive(Debug)]
pub struct ApiConfigBuilder {
	/// Platform root; required.
	pub base_url: Option<Url>,
	/// Application API key.
	pub api_key: String,
	/// Storage key for the token cache.
	pub token_cache_key: String,
	/// Component ids requested on item refresh.
	pub item_components: Vec<u32>,
}
impl ApiConfigBuilder {
	/// Creates a new builder seeded with the API key; the base URL must be set before building.
	pub fn new(api_key: impl Into<String>) -> Self {
		Self {
			base_url: None,
			api_key: api_key.into(),
			token_cache_key: ApiConfig::DEFAULT_TOKEN_CACHE_KEY.into(),
			item_components: ApiConfig::DEFAULT_ITEM_COMPONENTS.to_vec(),
		}
	}

	/// Sets the platform root, e.g. [`ApiConfig::PRODUCTION_BASE_URL`].
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Overrides the token cache storage key.
	pub fn token_cache_key(mut self, key: impl Into<String>) -> Self {
		self.token_cache_key = key.into();

		self
	}

	/// Overrides the components requested when refreshing items.
	pub fn item_components<I>(mut self, components: I) -> Self
	where
		I: IntoIterator<Item = u32>,
	{
		self.item_components = components.into_iter().collect();

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ApiConfig, ApiConfigError> {
		let base_url = self.base_url.ok_or(ApiConfigError::MissingBaseUrl)?;
		let config = ApiConfig {
			base_url,
			api_key: self.api_key,
			token_cache_key: self.token_cache_key,
			item_components: self.item_components,
		};

		config.validate()?;

		Ok(config)
	}
}

fn is_loopback(url: &Url) -> bool {
	match url.host() {
		Some(url::Host::Domain(domain)) => domain == "localhost",
		Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
		Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
		None => false,
	}
}
