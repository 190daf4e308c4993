//! Per-action mapping of cached tokens, persisted as one document.

// self
use crate::{
	_prelude::*,
	auth::{ActionToken, AwaType, CachedActionToken},
};

/// Cached action tokens keyed by the action type they authorize.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenCache(BTreeMap<AwaType, CachedActionToken>);
impl TokenCache {
	/// Returns the record for `action`, if any.
	pub fn get(&self, action: AwaType) -> Option<&CachedActionToken> {
		self.0.get(&action)
	}

	/// Returns `true` when a record exists for `action` and it is usable at `now`.
	pub fn is_usable(&self, action: AwaType, now: OffsetDateTime) -> bool {
		self.get(action).is_some_and(|record| record.is_valid_at(now))
	}

	/// Stores or replaces the record for `action`.
	pub fn insert(&mut self, action: AwaType, record: CachedActionToken) {
		self.0.insert(action, record);
	}

	/// Counts one use of the record for `action` and returns its token.
	pub fn consume(&mut self, action: AwaType) -> Option<ActionToken> {
		self.0.get_mut(&action).map(CachedActionToken::consume)
	}

	/// Number of cached records.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns `true` when nothing is cached.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
