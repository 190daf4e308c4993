//! Advanced write action endpoints: prompt initialization and token retrieval.

// self
use crate::{
	_prelude::*,
	account::DestinyAccount,
	api::{ApiEndpoint, BungieApi, TransportErrorMapper},
	auth::{AwaAuthorizationResult, AwaType, CharacterId, ItemInstanceId, MembershipType},
	http::ApiHttpClient,
};

/// Body of `POST /Destiny2/Awa/Initialize/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwaPermissionRequested {
	/// Action class being requested.
	#[serde(rename = "type")]
	pub action_type: AwaType,
	/// Item the action will touch, when there is one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub affected_item_id: Option<ItemInstanceId>,
	/// Platform of the acting membership.
	pub membership_type: MembershipType,
	/// Character the action runs through.
	pub character_id: CharacterId,
}

/// Response of `POST /Destiny2/Awa/Initialize/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwaInitializeResponse {
	/// Id used to collect the authorization result.
	pub correlation_id: String,
	/// Whether the approval prompt was delivered to the requesting device itself.
	#[serde(default)]
	pub sent_to_self: bool,
}

impl<C, M> BungieApi<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Starts an approval prompt for an advanced write action.
	pub async fn awa_initialize(
		&self,
		request: &AwaPermissionRequested,
	) -> Result<AwaInitializeResponse> {
		let url = self.config.endpoint("/Destiny2/Awa/Initialize/")?;

		self.post(ApiEndpoint::AwaInitialize, url, request).await
	}

	/// Collects the authorization result for a previously initialized prompt.
	pub async fn awa_get_action_token(&self, correlation_id: &str) -> Result<AwaAuthorizationResult> {
		let url = self.config.endpoint(&format!("/Destiny2/Awa/GetActionToken/{correlation_id}/"))?;

		self.get(ApiEndpoint::AwaGetActionToken, url).await
	}

	/// Requests an action token for `action` on behalf of `account`.
	///
	/// Initializes the approval prompt, then reads back its authorization result.
	pub async fn request_action_token(
		&self,
		account: &DestinyAccount,
		action: AwaType,
		character_id: &CharacterId,
		affected_item: Option<&ItemInstanceId>,
	) -> Result<AwaAuthorizationResult> {
		let request = AwaPermissionRequested {
			action_type: action,
			affected_item_id: affected_item.cloned(),
			membership_type: account.original_platform_type,
			character_id: character_id.clone(),
		};
		let initialized = self.awa_initialize(&request).await?;

		self.awa_get_action_token(&initialized.correlation_id).await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn permission_request_matches_wire_shape() {
		let request = AwaPermissionRequested {
			action_type: AwaType::InsertPlugs,
			affected_item_id: Some(
				ItemInstanceId::new("6917529000000000001").expect("Item fixture should be valid."),
			),
			membership_type: MembershipType::TigerSteam,
			character_id: CharacterId::new("2305843009301405432")
				.expect("Character fixture should be valid."),
		};
		let value = serde_json::to_value(&request).expect("Request should serialize.");

		assert_eq!(
			value,
			serde_json::json!({
				"type": 1,
				"affectedItemId": "6917529000000000001",
				"membershipType": 3,
				"characterId": "2305843009301405432"
			})
		);
	}

	#[test]
	fn permission_request_omits_missing_item() {
		let request = AwaPermissionRequested {
			action_type: AwaType::InsertPlugs,
			affected_item_id: None,
			membership_type: MembershipType::TigerXbox,
			character_id: CharacterId::new("1").expect("Character fixture should be valid."),
		};
		let value = serde_json::to_value(&request).expect("Request should serialize.");

		assert!(value.get("affectedItemId").is_none());
	}
}
