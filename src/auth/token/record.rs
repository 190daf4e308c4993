//! Authorization results returned by the platform and the cached records built from them.

// self
use crate::{
	_prelude::*,
	auth::{ActionToken, AwaResponseReason, AwaType, AwaUserSelection, MembershipType},
};

/// Why a cached record cannot be used right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenValidity {
	/// Record may be used.
	Usable,
	/// `valid_until` is not in the future.
	Expired,
	/// Use count went past a non-zero quota.
	Exhausted,
	/// The user did not approve the action.
	NotApproved,
}

/// Authorization result as returned by `GetActionToken`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwaAuthorizationResult {
	/// The user's answer to the approval prompt.
	pub user_selection: AwaUserSelection,
	/// Why this result was produced.
	#[serde(default = "default_response_reason")]
	pub response_reason: AwaResponseReason,
	/// Developer-facing explanation, mostly populated on failures.
	#[serde(default)]
	pub developer_note: Option<String>,
	/// Token to send with the mutating request.
	#[serde(default)]
	pub action_token: ActionToken,
	/// How many times the token may be used; `0` means unlimited.
	#[serde(default)]
	pub maximum_number_of_uses: u32,
	/// Instant after which the token is no longer accepted.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub valid_until: Option<OffsetDateTime>,
	/// Action class the token authorizes.
	#[serde(rename = "type")]
	pub action_type: AwaType,
	/// Platform of the membership the token was issued for.
	pub membership_type: MembershipType,
}

/// Cache entry: an authorization result plus the number of times it has been handed out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedActionToken {
	/// Token to send with the mutating request.
	pub action_token: ActionToken,
	/// Instant after which the token is no longer accepted.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub valid_until: Option<OffsetDateTime>,
	/// How many times the token may be used; `0` means unlimited.
	#[serde(default)]
	pub maximum_number_of_uses: u32,
	/// The user's answer to the approval prompt.
	pub user_selection: AwaUserSelection,
	/// Number of times the token has been handed out.
	#[serde(default)]
	pub used: u32,
	/// Action class the token authorizes; the cache key is authoritative.
	#[serde(rename = "type", default = "default_action_type")]
	pub action_type: AwaType,
	/// Platform of the membership the token was issued for.
	#[serde(default = "default_membership_type")]
	pub membership_type: MembershipType,
	/// Why the result was produced.
	#[serde(default = "default_response_reason")]
	pub response_reason: AwaResponseReason,
	/// Developer-facing explanation from the service.
	#[serde(default)]
	pub developer_note: Option<String>,
}
impl CachedActionToken {
	/// Computes why (or whether) the record is usable at `now`.
	pub fn validity_at(&self, now: OffsetDateTime) -> TokenValidity {
		if self.valid_until.is_some_and(|until| until <= now) {
			return TokenValidity::Expired;
		}
		if self.maximum_number_of_uses != 0 && self.used > self.maximum_number_of_uses {
			return TokenValidity::Exhausted;
		}
		if self.user_selection != AwaUserSelection::Approved {
			return TokenValidity::NotApproved;
		}

		TokenValidity::Usable
	}

	/// Returns `true` if the record may be used at `now`.
	pub fn is_valid_at(&self, now: OffsetDateTime) -> bool {
		matches!(self.validity_at(now), TokenValidity::Usable)
	}

	/// Convenience helper that checks validity against the current UTC clock.
	pub fn is_valid(&self) -> bool {
		self.is_valid_at(OffsetDateTime::now_utc())
	}

	/// Counts one use and returns the token.
	pub fn consume(&mut self) -> ActionToken {
		self.used = self.used.saturating_add(1);

		self.action_token.clone()
	}
}
impl From<AwaAuthorizationResult> for CachedActionToken {
	fn from(result: AwaAuthorizationResult) -> Self {
		Self {
			action_token: result.action_token,
			valid_until: result.valid_until,
			maximum_number_of_uses: result.maximum_number_of_uses,
			user_selection: result.user_selection,
			used: 0,
			action_type: result.action_type,
			membership_type: result.membership_type,
			response_reason: result.response_reason,
			developer_note: result.developer_note,
		}
	}
}

fn default_response_reason() -> AwaResponseReason {
	AwaResponseReason::None
}

fn default_action_type() -> AwaType {
	AwaType::None
}

fn default_membership_type() -> MembershipType {
	MembershipType::None
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	fn now() -> OffsetDateTime {
		macros::datetime!(2025-06-01 12:00 UTC)
	}

	fn record(
		valid_until: Option<OffsetDateTime>,
		maximum_number_of_uses: u32,
		used: u32,
		user_selection: AwaUserSelection,
	) -> CachedActionToken {
		CachedActionToken {
			action_token: ActionToken::new("token"),
			valid_until,
			maximum_number_of_uses,
			user_selection,
			used,
			action_type: AwaType::InsertPlugs,
			membership_type: MembershipType::TigerSteam,
			response_reason: AwaResponseReason::Answered,
			developer_note: None,
		}
	}

	#[test]
	fn minimal_cached_record_decodes_with_defaults() {
		let record: CachedActionToken = serde_json::from_value(serde_json::json!({
			"actionToken": "old",
			"validUntil": "2099-01-01T00:00:00Z",
			"maximumNumberOfUses": 0,
			"userSelection": 2,
			"used": 1
		}))
		.expect("Records without type metadata should decode.");

		assert_eq!(record.action_type, AwaType::None);
		assert_eq!(record.membership_type, MembershipType::None);
		assert_eq!(record.used, 1);
		assert!(record.is_valid_at(now()));
	}

	#[test]
	fn unlimited_unexpiring_approved_records_ignore_use_count() {
		for used in [0, 1, 50, u32::MAX] {
			assert!(record(None, 0, used, AwaUserSelection::Approved).is_valid_at(now()));
		}
	}

	#[test]
	fn past_expiry_is_invalid() {
		let expired = record(Some(now() - Duration::seconds(1)), 0, 0, AwaUserSelection::Approved);
		let boundary = record(Some(now()), 0, 0, AwaUserSelection::Approved);
		let future = record(Some(now() + Duration::minutes(5)), 0, 0, AwaUserSelection::Approved);

		assert_eq!(expired.validity_at(now()), TokenValidity::Expired);
		assert_eq!(boundary.validity_at(now()), TokenValidity::Expired);
		assert!(future.is_valid_at(now()));
	}

	#[test]
	fn quota_allows_used_up_to_maximum() {
		assert!(record(None, 2, 2, AwaUserSelection::Approved).is_valid_at(now()));
		assert_eq!(
			record(None, 2, 3, AwaUserSelection::Approved).validity_at(now()),
			TokenValidity::Exhausted,
		);
	}

	#[test]
	fn unapproved_records_are_never_valid() {
		for selection in [AwaUserSelection::None, AwaUserSelection::Rejected] {
			let record = record(Some(now() + Duration::hours(1)), 0, 0, selection);

			assert_eq!(record.validity_at(now()), TokenValidity::NotApproved);
		}
	}

	#[test]
	fn consume_counts_uses() {
		let mut record = record(None, 1, 0, AwaUserSelection::Approved);

		assert_eq!(record.consume().expose(), "token");
		assert_eq!(record.used, 1);
		assert!(record.is_valid_at(now()));

		record.consume();

		assert!(!record.is_valid_at(now()));
	}

	#[test]
	fn authorization_result_parses_platform_payload() {
		let payload = r#"{
			"userSelection": 2,
			"responseReason": 1,
			"developerNote": null,
			"actionToken": "abc",
			"maximumNumberOfUses": 3,
			"validUntil": "2025-06-01T13:00:00Z",
			"type": 1,
			"membershipType": 3
		}"#;
		let result: AwaAuthorizationResult =
			serde_json::from_str(payload).expect("Authorization result should deserialize.");
		let cached = CachedActionToken::from(result);

		assert_eq!(cached.used, 0);
		assert_eq!(cached.maximum_number_of_uses, 3);
		assert_eq!(cached.valid_until, Some(macros::datetime!(2025-06-01 13:00 UTC)));
		assert!(cached.is_valid_at(now()));
	}
}
