//! Inventory item model and the item shapes exchanged with the platform.

// self
use crate::{
	_prelude::*,
	auth::{CharacterId, ItemInstanceId},
};

/// Where an item currently lives.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemOwner {
	/// The shared vault.
	Vault,
	/// A character's inventory.
	Character(CharacterId),
}

/// An instanced inventory item as the application tracks it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
	/// Instance id.
	pub id: ItemInstanceId,
	/// Item definition hash.
	pub hash: u32,
	/// Current owner.
	pub owner: ItemOwner,
}
impl InventoryItem {
	/// Creates an item record.
	pub fn new(id: ItemInstanceId, hash: u32, owner: ItemOwner) -> Self {
		Self { id, hash, owner }
	}

	/// Returns `true` when the item sits in the vault.
	pub fn is_vault(&self) -> bool {
		matches!(self.owner, ItemOwner::Vault)
	}

	/// Character a mutation must go through: the owner, or `current` for vault items.
	pub fn acting_character<'a>(&'a self, current: Option<&'a CharacterId>) -> Option<&'a CharacterId> {
		match &self.owner {
			ItemOwner::Vault => current,
			ItemOwner::Character(owner) => Some(owner),
		}
	}
}

/// Socket on an item, addressed by index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemSocket {
	/// Index into the item's socket array.
	pub socket_index: u32,
}

wire_enum! {
	/// Which socket array a plug request addresses.
	pub enum SocketArrayType: "DestinySocketArrayType" {
		/// Regular sockets.
		Default = 0,
		/// Intrinsic sockets.
		Intrinsic = 1,
	}
}

/// Component wrapper used by the platform for single-object components.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct SingleComponent<T> {
	/// Component payload; absent when privacy settings hide it.
	#[serde(default)]
	pub data: Option<T>,
	/// Privacy setting for the component.
	#[serde(default)]
	pub privacy: i32,
}

/// Basic item component.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinyItemComponent {
	/// Item definition hash.
	pub item_hash: u32,
	/// Instance id for instanced items.
	#[serde(default)]
	pub item_instance_id: Option<String>,
	/// Stack size.
	#[serde(default)]
	pub quantity: i32,
	/// Bucket the item currently sits in.
	#[serde(default)]
	pub bucket_hash: u32,
	/// Location enum value.
	#[serde(default)]
	pub location: i32,
}

/// Instance-level state of an item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinyItemInstanceComponent {
	/// Whether the item is equipped.
	#[serde(default)]
	pub is_equipped: bool,
	/// Whether the item can be equipped.
	#[serde(default)]
	pub can_equip: bool,
	/// Item level.
	#[serde(default)]
	pub item_level: i32,
}

/// Current state of one socket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinyItemSocketState {
	/// Plug currently inserted.
	#[serde(default)]
	pub plug_hash: Option<u32>,
	/// Whether the plug is active.
	#[serde(default)]
	pub is_enabled: bool,
	/// Whether the socket is shown in the UI.
	#[serde(default)]
	pub is_visible: bool,
}

/// Sockets component of an item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinyItemSocketsComponent {
	/// Socket states by index.
	#[serde(default)]
	pub sockets: Vec<DestinyItemSocketState>,
}

/// Full item record as returned by the item endpoint and inside change responses.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinyItemResponse {
	/// Owning character, when the item is on a character.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub character_id: Option<String>,
	/// Basic item component.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub item: Option<SingleComponent<DestinyItemComponent>>,
	/// Instance component.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub instance: Option<SingleComponent<DestinyItemInstanceComponent>>,
	/// Sockets component.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sockets: Option<SingleComponent<DestinyItemSocketsComponent>>,
	/// Components this crate does not model, kept verbatim.
	#[serde(flatten)]
	pub other: BTreeMap<String, serde_json::Value>,
}
impl DestinyItemResponse {
	/// Replaces every component present in `newer`, keeping the rest.
	pub fn overlay(&mut self, newer: DestinyItemResponse) {
		if newer.character_id.is_some() {
			self.character_id = newer.character_id;
		}
		if newer.item.is_some() {
			self.item = newer.item;
		}
		if newer.instance.is_some() {
			self.instance = newer.instance;
		}
		if newer.sockets.is_some() {
			self.sockets = newer.sockets;
		}

		self.other.extend(newer.other);
	}

	/// Plug hash currently in `socket_index`, when the sockets component is present.
	pub fn plug_at(&self, socket_index: u32) -> Option<u32> {
		self.sockets
			.as_ref()?
			.data
			.as_ref()?
			.sockets
			.get(usize::try_from(socket_index).ok()?)?
			.plug_hash
	}
}

/// Result of a mutating item action.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinyItemChangeResponse {
	/// The mutated item.
	#[serde(default)]
	pub item: DestinyItemResponse,
	/// Items that entered the inventory as a side effect.
	#[serde(default)]
	pub added_inventory_items: Vec<DestinyItemComponent>,
	/// Items that left the inventory as a side effect.
	#[serde(default)]
	pub removed_inventory_items: Vec<DestinyItemComponent>,
}
