//! Redacted wrapper for action token values.

// self
use crate::_prelude::*;

/// Action token credential; formatting never reveals the value.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionToken(String);
impl ActionToken {
	/// Wraps a token string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the raw token for request bodies. Callers must avoid logging it.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns `true` when the service handed back no token at all.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl Debug for ActionToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ActionToken").field(&"<redacted>").finish()
	}
}
impl Display for ActionToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
