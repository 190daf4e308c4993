//! Action token records, the redacted token wrapper, and the per-action cache.

pub mod cache;
pub mod record;
pub mod secret;
