//! Strongly typed platform identifiers.
//!
//! The platform encodes 64-bit ids as decimal strings; these newtypes keep that wire shape while
//! rejecting anything that is not a decimal number.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new identifier after validation.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				let view = value.as_ref();

				validate_view($kind, view)?;

				Ok(Self(view.to_owned()))
			}

			/// Returns the identifier as a string slice.
			pub fn as_str(&self) -> &str {
				&self.0
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				validate_view($kind, &value)?;

				Ok(Self(value))
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
	};
}

// u64::MAX has 20 decimal digits.
const IDENTIFIER_MAX_LEN: usize = 20;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (membership, character, item).
		kind: &'static str,
	},
	/// The identifier contains something other than ASCII digits.
	#[error("{kind} identifier must be a decimal number.")]
	NotNumeric {
		/// Kind of identifier (membership, character, item).
		kind: &'static str,
	},
	/// The identifier exceeded the allowed digit count.
	#[error("{kind} identifier exceeds {max} digits.")]
	TooLong {
		/// Kind of identifier (membership, character, item).
		kind: &'static str,
		/// Maximum permitted digit count.
		max: usize,
	},
}

def_id! { MembershipId, "Destiny membership identifier of an account.", "Membership" }
def_id! { CharacterId, "Identifier of a character (a store that is not the vault).", "Character" }
def_id! { ItemInstanceId, "Instance identifier of a concrete inventory item.", "Item" }

fn validate_view(kind: &'static str, view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if !view.bytes().all(|b| b.is_ascii_digit()) {
		return Err(IdentifierError::NotNumeric { kind });
	}
	if view.len() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { kind, max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn identifiers_require_decimal_digits() {
		let character = CharacterId::new("2305843009301405432")
			.expect("Character fixture should be considered valid.");

		assert_eq!(character.as_ref(), "2305843009301405432");
		assert_eq!(CharacterId::new(""), Err(IdentifierError::Empty { kind: "Character" }));
		assert!(ItemInstanceId::new("69175290").is_ok());
		assert!(ItemInstanceId::new(" 6917529").is_err());
		assert!(MembershipId::new("-1").is_err());
		assert!(MembershipId::new("4611686018467284386a").is_err());
	}

	#[test]
	fn serde_round_trip_enforces_validation() {
		let item: ItemInstanceId = serde_json::from_str("\"6917529123456789012\"")
			.expect("Item id should deserialize successfully.");

		assert_eq!(item.as_str(), "6917529123456789012");
		assert!(serde_json::from_str::<ItemInstanceId>("\"not-a-number\"").is_err());
		assert_eq!(
			serde_json::to_string(&item).expect("Item id should serialize."),
			"\"6917529123456789012\""
		);
	}

	#[test]
	fn length_limit_matches_u64_digits() {
		let exact = "9".repeat(IDENTIFIER_MAX_LEN);

		MembershipId::new(&exact).expect("Twenty digits should succeed.");

		let too_long = "1".repeat(IDENTIFIER_MAX_LEN + 1);

		assert!(matches!(MembershipId::new(&too_long), Err(IdentifierError::TooLong { .. })));
	}

	#[test]
	fn borrow_supports_fast_lookup() {
		let map: HashMap<CharacterId, u8> = HashMap::from_iter([(
			CharacterId::new("2305843009301405432").expect("Character used for lookup should be valid."),
			3_u8,
		)]);

		assert_eq!(map.get("2305843009301405432"), Some(&3));
	}
}
