//! Application-state dispatch for item change events.

// self
use crate::{
	_prelude::*,
	account::{InventoryBuckets, ManifestDefinitions},
	item::DestinyItemChangeResponse,
};

/// State update emitted after an item mutation.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemChangeEvent {
	/// Change response, with the re-fetched item overlaid when the refresh succeeded.
	pub changes: DestinyItemChangeResponse,
	/// Manifest definitions current at dispatch time.
	pub defs: Arc<ManifestDefinitions>,
	/// Bucket definitions current at dispatch time.
	pub buckets: Arc<InventoryBuckets>,
}

/// Receiver of application-state updates.
pub trait StateDispatcher
where
	Self: Send + Sync,
{
	/// Applies `event` to the application state.
	fn dispatch(&self, event: ItemChangeEvent);
}

/// [`StateDispatcher`] that keeps every event in memory.
#[derive(Clone, Debug, Default)]
pub struct DispatchLog(Arc<Mutex<Vec<ItemChangeEvent>>>);
impl DispatchLog {
	/// Returns a copy of every dispatched event.
	pub fn events(&self) -> Vec<ItemChangeEvent> {
		self.0.lock().clone()
	}

	/// Returns the number of dispatched events.
	pub fn len(&self) -> usize {
		self.0.lock().len()
	}

	/// Returns `true` when nothing has been dispatched.
	pub fn is_empty(&self) -> bool {
		self.0.lock().is_empty()
	}
}
impl StateDispatcher for DispatchLog {
	fn dispatch(&self, event: ItemChangeEvent) {
		self.0.lock().push(event);
	}
}
