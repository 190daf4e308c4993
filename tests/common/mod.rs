#![allow(dead_code)]

// std
use std::sync::Arc;
// crates.io
use httpmock::MockServer;
use serde_json::{Value, json};
// self
use item_action_broker::{
	account::{DestinyAccount, InventoryBucket, InventoryBuckets, StaticAccountContext},
	auth::{CharacterId, ItemInstanceId, MembershipId, MembershipType},
	config::ApiConfig,
	dispatch::DispatchLog,
	flows::ReqwestActionBroker,
	item::{InventoryItem, ItemOwner},
	notify::NotificationLog,
	store::{KeyValueStore, MemoryStore},
	url::Url,
};

pub const API_KEY: &str = "test-key";
pub const MEMBERSHIP_ID: &str = "4611686018467284386";
pub const CHARACTER_ID: &str = "2305843009301405432";
pub const OTHER_CHARACTER_ID: &str = "2305843009301405499";
pub const ITEM_ID: &str = "6917529000000000001";
pub const ITEM_HASH: u32 = 1_363_886_209;
pub const CACHE_KEY: &str = "awa-tokens";

pub struct Harness {
	pub broker: ReqwestActionBroker,
	pub store: MemoryStore,
	pub notifications: NotificationLog,
	pub dispatches: DispatchLog,
	pub context: Arc<StaticAccountContext>,
}

pub fn character(id: &str) -> CharacterId {
	CharacterId::new(id).expect("Character fixture should be valid.")
}

pub fn account() -> DestinyAccount {
	DestinyAccount::new(
		MembershipId::new(MEMBERSHIP_ID).expect("Membership fixture should be valid."),
		MembershipType::TigerSteam,
	)
	.with_display_name("Guardian#1234")
}

pub fn item(owner: ItemOwner) -> InventoryItem {
	InventoryItem::new(
		ItemInstanceId::new(ITEM_ID).expect("Item fixture should be valid."),
		ITEM_HASH,
		owner,
	)
}

pub fn carried_item() -> InventoryItem {
	item(ItemOwner::Character(character(CHARACTER_ID)))
}

pub fn build_harness(server: &MockServer, current_character: Option<&str>) -> Harness {
	let config = ApiConfig::builder(API_KEY)
		.base_url(Url::parse(&server.url("/Platform")).expect("Mock base URL should parse."))
		.build()
		.expect("Test config should build.");
	let store = MemoryStore::default();
	let notifications = NotificationLog::default();
	let dispatches = DispatchLog::default();
	let context = Arc::new(
		StaticAccountContext::new(account(), current_character.map(character)).with_buckets(
			InventoryBuckets::new([InventoryBucket {
				hash: 1_498_876_634,
				name: "Kinetic Weapons".into(),
				in_vault: true,
			}]),
		),
	);
	let broker = ReqwestActionBroker::new(
		config,
		Arc::new(store.clone()),
		Arc::new(notifications.clone()),
		Arc::new(dispatches.clone()),
		context.clone(),
	);

	Harness { broker, store, notifications, dispatches, context }
}

pub fn envelope(response: Value) -> Value {
	json!({
		"Response": response,
		"ErrorCode": 1,
		"ThrottleSeconds": 0,
		"ErrorStatus": "Success",
		"Message": "Ok",
		"MessageData": {}
	})
}

pub fn platform_error(code: i32, status: &str, message: &str) -> Value {
	json!({
		"ErrorCode": code,
		"ThrottleSeconds": 0,
		"ErrorStatus": status,
		"Message": message,
		"MessageData": {}
	})
}

pub fn authorization_result(token: &str, user_selection: i32, developer_note: &str) -> Value {
	json!({
		"userSelection": user_selection,
		"responseReason": 1,
		"developerNote": developer_note,
		"actionToken": token,
		"maximumNumberOfUses": 0,
		"validUntil": "2099-01-01T00:00:00Z",
		"type": 1,
		"membershipType": 3
	})
}

pub fn cached_record(token: &str, valid_until: &str, used: u32) -> Value {
	json!({
		"actionToken": token,
		"validUntil": valid_until,
		"maximumNumberOfUses": 0,
		"userSelection": 2,
		"used": used,
		"type": 1,
		"membershipType": 3,
		"responseReason": 1,
		"developerNote": null
	})
}

pub async fn seed_cache(store: &MemoryStore, record: Value) {
	store
		.set(CACHE_KEY, json!({ "1": record }))
		.await
		.expect("Seeding the token cache should succeed.");
}

pub fn stored_record(store: &MemoryStore) -> Value {
	store
		.snapshot(CACHE_KEY)
		.and_then(|cache| cache.get("1").cloned())
		.expect("Token cache should hold an InsertPlugs record.")
}

pub fn item_payload(plug_hash: u32) -> Value {
	json!({
		"characterId": CHARACTER_ID,
		"item": { "data": { "itemHash": ITEM_HASH, "itemInstanceId": ITEM_ID, "quantity": 1 }, "privacy": 1 },
		"sockets": {
			"data": { "sockets": [{ "plugHash": plug_hash, "isEnabled": true, "isVisible": true }] },
			"privacy": 1
		}
	})
}

pub fn change_payload(plug_hash: u32) -> Value {
	json!({
		"item": item_payload(plug_hash),
		"addedInventoryItems": [],
		"removedInventoryItems": []
	})
}
