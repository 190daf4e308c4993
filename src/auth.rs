//! Auth-domain identifiers, action types, and action token models.

pub mod action;
pub mod id;
pub mod token;

pub use action::*;
pub use id::*;
pub use token::{cache::*, record::*, secret::*};
