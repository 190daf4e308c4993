// Integer-backed enums whose serde form is the platform's numeric wire value.
macro_rules! wire_enum {
	(
		$(#[$meta:meta])*
		pub enum $name:ident : $kind:literal {
			$( $(#[$vmeta:meta])* $variant:ident = $value:literal ),+ $(,)?
		}
	) => {
		$(#[$meta])*
		#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "i32", into = "i32")]
		pub enum $name {
			$( $(#[$vmeta])* $variant = $value ),+
		}
		impl $name {
			/// Numeric value used on the wire.
			pub const fn as_i32(self) -> i32 {
				self as i32
			}
		}
		impl From<$name> for i32 {
			fn from(value: $name) -> Self {
				value.as_i32()
			}
		}
		impl TryFrom<i32> for $name {
			type Error = crate::auth::UnknownWireValue;

			fn try_from(value: i32) -> Result<Self, Self::Error> {
				match value {
					$( $value => Ok(Self::$variant), )+
					_ => Err(crate::auth::UnknownWireValue { kind: $kind, value }),
				}
			}
		}
	};
}
