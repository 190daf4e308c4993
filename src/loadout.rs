//! Loadout shapes: the persisted (API) form with separate equipped/unequipped lists, and the
//! in-memory form with one flat item list.
//!
//! Conversions are pure. Persisted → in-memory lists equipped items first, then unequipped,
//! each in original order; a missing item id becomes [`UNKNOWN_ITEM_ID`] and a missing or zero
//! amount becomes `1`. The reverse conversion drops those defaults again.

// self
use crate::_prelude::*;

/// Id given to loadout items that carry no instance id (e.g. uninstanced items).
pub const UNKNOWN_ITEM_ID: &str = "0";

/// Free-form loadout parameters (mods, stat constraints, ...), kept as opaque JSON.
pub type LoadoutParameters = BTreeMap<String, serde_json::Value>;

wire_enum! {
	/// Character class a loadout applies to.
	pub enum DestinyClass: "DestinyClass" {
		/// Titan.
		Titan = 0,
		/// Hunter.
		Hunter = 1,
		/// Warlock.
		Warlock = 2,
		/// Any class.
		Unknown = 3,
	}
}

/// Item reference inside a persisted loadout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiLoadoutItem {
	/// Item instance id, absent for uninstanced items.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Item definition hash.
	pub hash: u32,
	/// Stack size, absent when `1`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub amount: Option<u32>,
	/// Plug overrides keyed by socket index.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub socket_overrides: Option<BTreeMap<u32, u32>>,
}

/// Loadout as persisted by the loadout service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiLoadout {
	/// Loadout id.
	pub id: String,
	/// Class the loadout applies to.
	pub class_type: DestinyClass,
	/// Display name.
	pub name: String,
	/// Free-form notes.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub notes: Option<String>,
	/// Whether applying the loadout moves unrelated items out of the way.
	#[serde(default)]
	pub clear_space: bool,
	/// Items to equip.
	#[serde(default)]
	pub equipped: Vec<ApiLoadoutItem>,
	/// Items to carry without equipping.
	#[serde(default)]
	pub unequipped: Vec<ApiLoadoutItem>,
	/// Extra parameters.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub parameters: Option<LoadoutParameters>,
}

/// Item inside an in-memory [`Loadout`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadoutItem {
	/// Item instance id, [`UNKNOWN_ITEM_ID`] when unknown.
	pub id: String,
	/// Item definition hash.
	pub hash: u32,
	/// Stack size, at least `1`.
	pub amount: u32,
	/// Whether the item is equipped by the loadout.
	pub equipped: bool,
	/// Plug overrides keyed by socket index.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub socket_overrides: Option<BTreeMap<u32, u32>>,
}

/// Loadout as the application works with it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loadout {
	/// Loadout id.
	pub id: String,
	/// Class the loadout applies to.
	pub class_type: DestinyClass,
	/// Display name.
	pub name: String,
	/// Free-form notes.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub notes: Option<String>,
	/// Whether applying the loadout moves unrelated items out of the way.
	pub clear_space: bool,
	/// Equipped items first, then unequipped ones.
	pub items: Vec<LoadoutItem>,
	/// Extra parameters.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub parameters: Option<LoadoutParameters>,
}

/// Converts a persisted loadout into its in-memory form.
pub fn convert_api_loadout(loadout: ApiLoadout) -> Loadout {
	let items = loadout
		.equipped
		.into_iter()
		.map(|item| convert_api_loadout_item(item, true))
		.chain(loadout.unequipped.into_iter().map(|item| convert_api_loadout_item(item, false)))
		.collect();

	Loadout {
		id: loadout.id,
		class_type: loadout.class_type,
		name: loadout.name,
		notes: loadout.notes,
		clear_space: loadout.clear_space,
		items,
		parameters: loadout.parameters,
	}
}

/// Converts one persisted item, tagging it with `equipped`.
pub fn convert_api_loadout_item(item: ApiLoadoutItem, equipped: bool) -> LoadoutItem {
	LoadoutItem {
		id: item.id.unwrap_or_else(|| UNKNOWN_ITEM_ID.to_owned()),
		hash: item.hash,
		amount: item.amount.filter(|amount| *amount != 0).unwrap_or(1),
		equipped,
		socket_overrides: item.socket_overrides,
	}
}

/// Converts an in-memory loadout back into its persisted form.
pub fn convert_loadout_to_api(loadout: Loadout) -> ApiLoadout {
	let (equipped, unequipped): (Vec<_>, Vec<_>) =
		loadout.items.into_iter().partition(|item| item.equipped);

	ApiLoadout {
		id: loadout.id,
		class_type: loadout.class_type,
		name: loadout.name,
		notes: loadout.notes,
		clear_space: loadout.clear_space,
		equipped: equipped.into_iter().map(convert_loadout_item_to_api).collect(),
		unequipped: unequipped.into_iter().map(convert_loadout_item_to_api).collect(),
		parameters: loadout.parameters,
	}
}

/// Converts one in-memory item back into its persisted form.
pub fn convert_loadout_item_to_api(item: LoadoutItem) -> ApiLoadoutItem {
	ApiLoadoutItem {
		id: Some(item.id).filter(|id| id != UNKNOWN_ITEM_ID),
		hash: item.hash,
		amount: Some(item.amount).filter(|amount| *amount > 1),
		socket_overrides: item.socket_overrides,
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn api_item(id: Option<&str>, hash: u32, amount: Option<u32>) -> ApiLoadoutItem {
		ApiLoadoutItem { id: id.map(str::to_owned), hash, amount, socket_overrides: None }
	}

	fn api_loadout(equipped: Vec<ApiLoadoutItem>, unequipped: Vec<ApiLoadoutItem>) -> ApiLoadout {
		ApiLoadout {
			id: "loadout-1".into(),
			class_type: DestinyClass::Warlock,
			name: "Raid".into(),
			notes: None,
			clear_space: true,
			equipped,
			unequipped,
			parameters: None,
		}
	}

	#[test]
	fn equipped_items_come_first_in_original_order() {
		let loadout = convert_api_loadout(api_loadout(
			vec![api_item(Some("11"), 1, None), api_item(Some("12"), 2, None)],
			vec![
				api_item(Some("21"), 3, None),
				api_item(Some("22"), 4, None),
				api_item(Some("23"), 5, None),
			],
		));
		let flags = loadout.items.iter().map(|item| (item.id.as_str(), item.equipped)).collect::<Vec<_>>();

		assert_eq!(
			flags,
			[("11", true), ("12", true), ("21", false), ("22", false), ("23", false)]
		);
		assert_eq!(loadout.class_type, DestinyClass::Warlock);
		assert!(loadout.clear_space);
	}

	#[test]
	fn missing_ids_and_amounts_get_defaults() {
		let zero = convert_api_loadout_item(api_item(None, 7, Some(0)), false);
		let absent = convert_api_loadout_item(api_item(None, 7, None), true);
		let stacked = convert_api_loadout_item(api_item(Some("5"), 7, Some(3)), true);

		assert_eq!(zero.id, UNKNOWN_ITEM_ID);
		assert_eq!(zero.amount, 1);
		assert_eq!(absent.amount, 1);
		assert!(absent.equipped);
		assert_eq!(stacked.amount, 3);
		assert_eq!(stacked.id, "5");
	}

	#[test]
	fn reverse_conversion_splits_and_drops_defaults() {
		let mut overrides = BTreeMap::new();

		overrides.insert(2, 1_234_567);

		let source = api_loadout(
			vec![ApiLoadoutItem {
				id: Some("11".into()),
				hash: 1,
				amount: None,
				socket_overrides: Some(overrides),
			}],
			vec![api_item(None, 2, Some(5))],
		);
		let restored = convert_loadout_to_api(convert_api_loadout(source.clone()));

		assert_eq!(restored, source);
	}

	#[test]
	fn persisted_shape_reads_platform_json() {
		let loadout: ApiLoadout = serde_json::from_value(serde_json::json!({
			"id": "abc",
			"classType": 0,
			"name": "PvP",
			"clearSpace": false,
			"equipped": [{ "id": "6917529000000000001", "hash": 1, "socketOverrides": { "3": 99 } }],
			"unequipped": [],
			"parameters": { "mods": [1, 2] }
		}))
		.expect("Loadout fixture should deserialize.");
		let converted = convert_api_loadout(loadout);

		assert_eq!(converted.class_type, DestinyClass::Titan);
		assert_eq!(converted.items.len(), 1);
		assert_eq!(converted.items[0].socket_overrides.as_ref().and_then(|map| map.get(&3)), Some(&99));
		assert!(converted.parameters.is_some_and(|params| params.contains_key("mods")));
	}
}
