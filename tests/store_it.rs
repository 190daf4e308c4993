mod common;

// std
use std::{env, fs, path::PathBuf, process, sync::Arc};
// crates.io
use httpmock::prelude::*;
use time::macros;
// self
use common::*;
use item_action_broker::{
	auth::{
		ActionToken, AwaResponseReason, AwaType, AwaUserSelection, CachedActionToken,
		MembershipType, TokenCache,
	},
	store::{FileStore, KeyValueStore, MemoryStore, TokenCacheRepository},
};

fn temp_path(label: &str) -> PathBuf {
	env::temp_dir().join(format!("item_action_broker_{label}_{}.json", process::id()))
}

fn record(token: &str, used: u32) -> CachedActionToken {
	CachedActionToken {
		action_token: ActionToken::new(token),
		valid_until: Some(macros::datetime!(2099-01-01 00:00 UTC)),
		maximum_number_of_uses: 3,
		user_selection: AwaUserSelection::Approved,
		used,
		action_type: AwaType::InsertPlugs,
		membership_type: MembershipType::TigerSteam,
		response_reason: AwaResponseReason::Answered,
		developer_note: None,
	}
}

#[tokio::test]
async fn memory_repository_round_trips_cache() {
	let backend = MemoryStore::default();
	let repository = TokenCacheRepository::new(Arc::new(backend.clone()), CACHE_KEY);
	let mut cache = TokenCache::default();

	cache.insert(AwaType::InsertPlugs, record("memory-token", 1));
	repository.save(&cache).await.expect("Saving the cache should succeed.");

	assert_eq!(backend.len(), 1);
	assert_eq!(repository.load().await.expect("Loading the cache should succeed."), cache);
	assert_eq!(
		backend.get(CACHE_KEY).await.expect("Raw read should succeed.").map(|doc| doc["1"]["used"].clone()),
		Some(serde_json::json!(1))
	);
}

#[tokio::test]
async fn file_backed_cache_survives_reopen() {
	let path = temp_path("reopen");
	let server = MockServer::start_async().await;
	let initialize = server
		.mock_async(|when, then| {
			when.method(POST).path("/Platform/Destiny2/Awa/Initialize/");
			then.status(500);
		})
		.await;

	{
		let store = FileStore::open(&path).expect("File store should open.");
		let repository = TokenCacheRepository::new(Arc::new(store), CACHE_KEY);
		let mut cache = TokenCache::default();

		cache.insert(AwaType::InsertPlugs, record("file-token", 0));
		repository.save(&cache).await.expect("Saving the cache should succeed.");
	}

	let harness = build_harness(&server, Some(CHARACTER_ID));
	let reopened = FileStore::open(&path).expect("File store should reopen.");
	let broker = item_action_broker::flows::ReqwestActionBroker::with_api(
		harness.broker.api.clone(),
		Arc::new(reopened),
		harness.broker.notifier.clone(),
		harness.broker.dispatcher.clone(),
		harness.broker.context.clone(),
	);
	let token = broker
		.action_token(&account(), AwaType::InsertPlugs, &character(CHARACTER_ID), None)
		.await
		.expect("Persisted token should be reused.");

	assert_eq!(token.expose(), "file-token");

	initialize.assert_calls_async(0).await;

	let cache = broker.token_cache().await.expect("Cache should be loaded after first use.");

	assert_eq!(cache.get(AwaType::InsertPlugs).map(|record| record.used), Some(1));

	fs::remove_file(&path).unwrap_or_else(|e| {
		panic!("Failed to remove temporary file store snapshot {}: {e}", path.display())
	});
}
