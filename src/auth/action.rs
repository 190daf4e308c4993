//! Advanced write action (AWA) enumerations shared by the API client and the token cache.

// self
use crate::_prelude::*;

/// Raised when a numeric wire value has no matching enum variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
#[error("{value} is not a known {kind} value.")]
pub struct UnknownWireValue {
	/// Enumeration name.
	pub kind: &'static str,
	/// Rejected wire value.
	pub value: i32,
}

wire_enum! {
	/// Class of mutating action an action token authorizes.
	pub enum AwaType: "AwaType" {
		/// No action.
		None = 0,
		/// Insert plugs into item sockets.
		InsertPlugs = 1,
	}
}

wire_enum! {
	/// The user's answer to an action approval prompt.
	pub enum AwaUserSelection: "AwaUserSelection" {
		/// No answer yet.
		None = 0,
		/// The user declined.
		Rejected = 1,
		/// The user approved.
		Approved = 2,
	}
}

wire_enum! {
	/// Why an authorization result was produced.
	pub enum AwaResponseReason: "AwaResponseReason" {
		/// No reason given.
		None = 0,
		/// The user answered the prompt.
		Answered = 1,
		/// The prompt timed out.
		TimedOut = 2,
		/// A newer request replaced this one.
		Replaced = 3,
	}
}

wire_enum! {
	/// Platform a Destiny membership lives on.
	pub enum MembershipType: "BungieMembershipType" {
		/// Wildcard used by some lookups.
		All = -1,
		/// No platform.
		None = 0,
		/// Xbox.
		TigerXbox = 1,
		/// PlayStation.
		TigerPsn = 2,
		/// Steam.
		TigerSteam = 3,
		/// Battle.net.
		TigerBlizzard = 4,
		/// Stadia.
		TigerStadia = 5,
		/// Epic Games Store.
		TigerEgs = 6,
		/// Demon.
		TigerDemon = 10,
		/// Bungie.net account.
		BungieNext = 254,
	}
}
