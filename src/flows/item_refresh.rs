//! Item refresh after a mutation, followed by an application-state dispatch.

// self
use crate::{
	account::DestinyAccount,
	api::TransportErrorMapper,
	dispatch::ItemChangeEvent,
	flows::ActionBroker,
	http::ApiHttpClient,
	item::{DestinyItemChangeResponse, DestinyItemResponse, InventoryItem},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

impl<C, M> ActionBroker<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Re-fetches `item`, overlays it onto `changes`, and dispatches the result.
	///
	/// A failed re-fetch is logged and the mutation response is dispatched as returned. Returns
	/// the change set that was dispatched.
	pub async fn refresh_after_change(
		&self,
		item: &InventoryItem,
		mut changes: DestinyItemChangeResponse,
	) -> DestinyItemChangeResponse {
		const KIND: FlowKind = FlowKind::ItemRefresh;

		let span = FlowSpan::new(KIND, "refresh_after_change");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		span.instrument(async move {
			let account = self.context.account();

			if let Some(current) = self.fetch_current_item(&account, item).await {
				changes.item.overlay(current);
			}

			self.dispatcher.dispatch(ItemChangeEvent {
				changes: changes.clone(),
				defs: self.context.definitions(),
				buckets: self.context.buckets(),
			});
			obs::record_flow_outcome(KIND, FlowOutcome::Success);

			changes
		})
		.await
	}

	/// Reads the current state of `item`; `None` when the read failed.
	pub async fn fetch_current_item(
		&self,
		account: &DestinyAccount,
		item: &InventoryItem,
	) -> Option<DestinyItemResponse> {
		match self.api.get_item(account, &item.id).await {
			Ok(current) => Some(current),
			Err(e) => {
				obs::log_flow_fallback(FlowKind::ItemRefresh, "fetch_current_item", &e);

				None
			},
		}
	}
}
