//! Account and session context consumed by the workflows.
//!
//! The application owns the session (signed-in account, selected character, loaded manifest);
//! the broker only reads it through [`AccountContext`].

// self
use crate::{
	_prelude::*,
	auth::{CharacterId, MembershipId, MembershipType},
};

/// A signed-in Destiny account.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinyAccount {
	/// Destiny membership id.
	pub membership_id: MembershipId,
	/// Platform the membership was originally created on; the API addresses it by this value.
	pub original_platform_type: MembershipType,
	/// Name shown in the UI.
	#[serde(default)]
	pub display_name: String,
}
impl DestinyAccount {
	/// Creates an account for the provided membership.
	pub fn new(membership_id: MembershipId, original_platform_type: MembershipType) -> Self {
		Self { membership_id, original_platform_type, display_name: String::new() }
	}

	/// Sets the display name.
	pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
		self.display_name = display_name.into();

		self
	}
}

/// Loaded manifest definitions, shared read-only with the application store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ManifestDefinitions {
	/// Manifest version string.
	pub version: String,
	/// Definition tables keyed by table name.
	pub tables: BTreeMap<String, serde_json::Value>,
}

/// One inventory bucket definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryBucket {
	/// Bucket hash.
	pub hash: u32,
	/// Display name.
	pub name: String,
	/// Whether items in this bucket may sit in the vault.
	#[serde(default)]
	pub in_vault: bool,
}

/// Bucket definitions keyed by hash.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InventoryBuckets {
	/// Buckets keyed by hash.
	pub by_hash: BTreeMap<u32, InventoryBucket>,
}
impl InventoryBuckets {
	/// Builds the lookup from a list of buckets.
	pub fn new(buckets: impl IntoIterator<Item = InventoryBucket>) -> Self {
		Self { by_hash: buckets.into_iter().map(|bucket| (bucket.hash, bucket)).collect() }
	}
}

/// Read access to the current session.
pub trait AccountContext
where
	Self: Send + Sync,
{
	/// The signed-in account.
	fn account(&self) -> DestinyAccount;

	/// The currently selected character, if any.
	fn current_character(&self) -> Option<CharacterId>;

	/// Currently loaded manifest definitions.
	fn definitions(&self) -> Arc<ManifestDefinitions>;

	/// Current bucket definitions.
	fn buckets(&self) -> Arc<InventoryBuckets>;
}

/// Fixed [`AccountContext`] whose selected character can be changed at runtime.
#[derive(Debug)]
pub struct StaticAccountContext {
	account: DestinyAccount,
	current_character: RwLock<Option<CharacterId>>,
	definitions: Arc<ManifestDefinitions>,
	buckets: Arc<InventoryBuckets>,
}
impl StaticAccountContext {
	/// Creates a context for `account` with empty definitions.
	pub fn new(account: DestinyAccount, current_character: Option<CharacterId>) -> Self {
		Self {
			account,
			current_character: RwLock::new(current_character),
			definitions: Default::default(),
			buckets: Default::default(),
		}
	}

	/// Replaces the manifest definitions.
	pub fn with_definitions(mut self, definitions: ManifestDefinitions) -> Self {
		self.definitions = Arc::new(definitions);

		self
	}

	/// Replaces the bucket definitions.
	pub fn with_buckets(mut self, buckets: InventoryBuckets) -> Self {
		self.buckets = Arc::new(buckets);

		self
	}

	/// Selects a different character.
	pub fn select_character(&self, character: Option<CharacterId>) {
		*self.current_character.write() = character;
	}
}
impl AccountContext for StaticAccountContext {
	fn account(&self) -> DestinyAccount {
		self.account.clone()
	}

	fn current_character(&self) -> Option<CharacterId> {
		self.current_character.read().clone()
	}

	fn definitions(&self) -> Arc<ManifestDefinitions> {
		self.definitions.clone()
	}

	fn buckets(&self) -> Arc<InventoryBuckets> {
		self.buckets.clone()
	}
}
