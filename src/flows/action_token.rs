//! Action token acquisition with a durable per-action cache.
//!
//! [`ActionBroker::action_token`] hands out the cached token for an action while it is still
//! usable (not expired, within its use quota, approved by the user). Otherwise it asks the
//! platform for a new one, which prompts the user on their companion device, and caches the
//! result. Every successful call counts one use and writes the whole cache back to storage.

mod metrics;

pub use metrics::TokenMetrics;

// self
use crate::{
	_prelude::*,
	account::DestinyAccount,
	api::TransportErrorMapper,
	auth::{ActionToken, AwaType, CachedActionToken, CharacterId, TokenCache},
	error::AuthorizationError,
	flows::ActionBroker,
	http::ApiHttpClient,
	item::InventoryItem,
	notify::Notification,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	store::StoreError,
};

/// Title key of the notification shown while the user is asked to approve an action.
pub const CONFIRM_TITLE_KEY: &str = "AWA.ConfirmTitle";
/// Body key of the notification shown while the user is asked to approve an action.
pub const CONFIRM_BODY_KEY: &str = "AWA.ConfirmDescription";

impl<C, M> ActionBroker<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Returns a usable action token for `action`, requesting a new one when needed.
	///
	/// `item` is forwarded as the affected item of a fresh request. Failures to obtain a usable
	/// token surface as [`Error::Authorization`].
	pub async fn action_token(
		&self,
		account: &DestinyAccount,
		action: AwaType,
		character_id: &CharacterId,
		item: Option<&InventoryItem>,
	) -> Result<ActionToken> {
		const KIND: FlowKind = FlowKind::ActionToken;

		let span = FlowSpan::new(KIND, "action_token");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let mut guard = self.cache.lock().await;

				if guard.is_none() {
					*guard = Some(self.load_token_cache().await?);
				}

				let cache = guard.get_or_insert_with(TokenCache::default);

				if cache.is_usable(action, OffsetDateTime::now_utc()) {
					self.token_metrics.record_cache_hit();
				} else {
					self.token_metrics.record_request();
					self.notifier.show(Notification::info(CONFIRM_TITLE_KEY, CONFIRM_BODY_KEY));
					self.request_and_store(cache, account, action, character_id, item)
						.await
						.map_err(AuthorizationError::request)?;

					if let Some(record) =
						cache.get(action).filter(|record| !record.is_valid_at(OffsetDateTime::now_utc()))
					{
						return Err(
							AuthorizationError::rejected(record.developer_note.as_deref()).into()
						);
					}
				}

				let token =
					cache.consume(action).ok_or_else(|| AuthorizationError::rejected(None))?;

				self.repository.save(cache).await?;

				Ok(token)
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => {
				self.token_metrics.record_failure();
				obs::record_flow_outcome(KIND, FlowOutcome::Failure);
			},
		}

		result
	}

	// An undecodable document is dropped; the next save overwrites it.
	async fn load_token_cache(&self) -> Result<TokenCache> {
		match self.repository.load().await {
			Ok(cache) => Ok(cache),
			Err(e @ StoreError::Serialization { .. }) => {
				obs::log_flow_fallback(FlowKind::ActionToken, "load_token_cache", &e);

				Ok(TokenCache::default())
			},
			Err(e) => Err(e.into()),
		}
	}

	async fn request_and_store(
		&self,
		cache: &mut TokenCache,
		account: &DestinyAccount,
		action: AwaType,
		character_id: &CharacterId,
		item: Option<&InventoryItem>,
	) -> Result<()> {
		let issued = self
			.api
			.request_action_token(account, action, character_id, item.map(|item| &item.id))
			.await?;

		cache.insert(action, CachedActionToken::from(issued));
		self.repository.save(cache).await?;

		Ok(())
	}
}
