//! Item endpoints: socket plug insertion and single-item reads.

// self
use crate::{
	_prelude::*,
	account::DestinyAccount,
	api::{ApiEndpoint, BungieApi, TransportErrorMapper},
	auth::{ActionToken, CharacterId, ItemInstanceId, MembershipType},
	http::ApiHttpClient,
	item::{DestinyItemChangeResponse, DestinyItemResponse, SocketArrayType},
};

/// Plug placement inside an [`InsertSocketPlugRequest`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinyInsertPlugsRequestEntry {
	/// Index of the socket receiving the plug.
	pub socket_index: u32,
	/// Socket array the index refers to.
	pub socket_array_type: SocketArrayType,
	/// Hash of the plug definition to insert.
	pub plug_item_hash: u32,
}

/// Body of `POST /Destiny2/Actions/Items/InsertSocketPlug/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertSocketPlugRequest {
	/// Action token authorizing the change.
	pub action_token: ActionToken,
	/// Item being modified.
	pub item_instance_id: ItemInstanceId,
	/// Plug placement.
	pub plug: DestinyInsertPlugsRequestEntry,
	/// Character performing the change.
	pub character_id: CharacterId,
	/// Platform of the acting membership.
	pub membership_type: MembershipType,
}

impl<C, M> BungieApi<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Inserts a plug into an item socket.
	pub async fn insert_socket_plug(
		&self,
		request: &InsertSocketPlugRequest,
	) -> Result<DestinyItemChangeResponse> {
		let url = self.config.endpoint("/Destiny2/Actions/Items/InsertSocketPlug/")?;

		self.post(ApiEndpoint::InsertSocketPlug, url, request).await
	}

	/// Reads one item instance with the configured item components.
	pub async fn get_item(
		&self,
		account: &DestinyAccount,
		item_id: &ItemInstanceId,
	) -> Result<DestinyItemResponse> {
		let mut url = self.config.endpoint(&format!(
			"/Destiny2/{}/Profile/{}/Item/{}/",
			account.original_platform_type.as_i32(),
			account.membership_id,
			item_id
		))?;

		url.query_pairs_mut().append_pair("components", &self.config.item_components_query());

		self.get(ApiEndpoint::GetItem, url).await
	}
}
