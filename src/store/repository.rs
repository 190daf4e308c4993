//! Typed access to the persisted [`TokenCache`] document.

// self
use crate::{
	_prelude::*,
	auth::TokenCache,
	store::{KeyValueStore, StoreError},
};

/// Loads and stores the whole token cache under one fixed key.
#[derive(Clone)]
pub struct TokenCacheRepository {
	store: Arc<dyn KeyValueStore>,
	key: String,
}
impl TokenCacheRepository {
	/// Binds a repository to `store` under `key`.
	pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
		Self { store, key: key.into() }
	}

	/// Storage key the cache lives under.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Reads the cache; a missing or `null` document yields an empty cache.
	pub async fn load(&self) -> Result<TokenCache, StoreError> {
		match self.store.get(&self.key).await? {
			None | Some(serde_json::Value::Null) => Ok(TokenCache::default()),
			Some(document) => serde_json::from_value(document).map_err(|e| {
				StoreError::Serialization {
					message: format!("Failed to decode token cache `{}`: {e}", self.key),
				}
			}),
		}
	}

	/// Writes the entire cache back.
	pub async fn save(&self, cache: &TokenCache) -> Result<(), StoreError> {
		let document = serde_json::to_value(cache).map_err(|e| StoreError::Serialization {
			message: format!("Failed to encode token cache `{}`: {e}", self.key),
		})?;

		self.store.set(&self.key, document).await
	}
}
impl Debug for TokenCacheRepository {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenCacheRepository").field("key", &self.key).finish()
	}
}
