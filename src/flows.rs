//! Workflows driven by the [`ActionBroker`]: action-token acquisition, plug insertion, and item
//! refresh after a mutation.

pub mod action_token;
pub mod insert_plug;
pub mod item_refresh;

pub use action_token::*;
pub use insert_plug::*;

// self
use crate::{
	_prelude::*,
	account::AccountContext,
	api::{BungieApi, TransportErrorMapper},
	auth::TokenCache,
	dispatch::StateDispatcher,
	http::ApiHttpClient,
	notify::Notifier,
	store::{KeyValueStore, TokenCacheRepository},
};
#[cfg(feature = "reqwest")]
use crate::{api::ReqwestTransportErrorMapper, config::ApiConfig, http::ReqwestHttpClient};

#[cfg(feature = "reqwest")]
/// Broker specialized for the crate's default reqwest transport stack.
pub type ReqwestActionBroker = ActionBroker<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Coordinates action-token-backed item mutations for one signed-in account.
///
/// The broker owns the token cache. It is loaded through the [`TokenCacheRepository`] the first
/// time a token is needed (unless the owner seeded it with [`ActionBroker::with_token_cache`])
/// and written back in full after every change. Token acquisition is serialized by the cache
/// lock, so concurrent callers never request the same action twice.
pub struct ActionBroker<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Platform API client.
	pub api: Arc<BungieApi<C, M>>,
	/// Persistence for the token cache.
	pub repository: TokenCacheRepository,
	/// User-facing notification sink.
	pub notifier: Arc<dyn Notifier>,
	/// Application-state dispatcher.
	pub dispatcher: Arc<dyn StateDispatcher>,
	/// Current session.
	pub context: Arc<dyn AccountContext>,
	/// Shared counters for token acquisition outcomes.
	pub token_metrics: Arc<TokenMetrics>,
	cache: AsyncMutex<Option<TokenCache>>,
}
impl<C, M> ActionBroker<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a broker over an existing API client.
	///
	/// The token cache is persisted in `store` under the API config's `token_cache_key`.
	pub fn with_api(
		api: impl Into<Arc<BungieApi<C, M>>>,
		store: Arc<dyn KeyValueStore>,
		notifier: Arc<dyn Notifier>,
		dispatcher: Arc<dyn StateDispatcher>,
		context: Arc<dyn AccountContext>,
	) -> Self {
		let api = api.into();
		let repository = TokenCacheRepository::new(store, api.config.token_cache_key.clone());

		Self {
			api,
			repository,
			notifier,
			dispatcher,
			context,
			token_metrics: Default::default(),
			cache: AsyncMutex::new(None),
		}
	}

	/// Seeds the in-memory cache so the first call skips the storage read.
	pub fn with_token_cache(mut self, cache: TokenCache) -> Self {
		self.cache = AsyncMutex::new(Some(cache));

		self
	}

	/// Returns a copy of the in-memory cache, or `None` before it has been loaded.
	pub async fn token_cache(&self) -> Option<TokenCache> {
		self.cache.lock().await.clone()
	}
}
#[cfg(feature = "reqwest")]
impl ActionBroker<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a broker that provisions its own reqwest-backed API client.
	pub fn new(
		config: ApiConfig,
		store: Arc<dyn KeyValueStore>,
		notifier: Arc<dyn Notifier>,
		dispatcher: Arc<dyn StateDispatcher>,
		context: Arc<dyn AccountContext>,
	) -> Self {
		Self::with_api(BungieApi::new(config), store, notifier, dispatcher, context)
	}
}
impl<C, M> Debug for ActionBroker<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ActionBroker")
			.field("api", &self.api)
			.field("repository", &self.repository)
			.field("token_metrics", &self.token_metrics)
			.finish()
	}
}
