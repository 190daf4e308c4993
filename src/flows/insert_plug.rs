//! Socket plug insertion through an action token.

// self
use crate::{
	_prelude::*,
	api::{DestinyInsertPlugsRequestEntry, InsertSocketPlugRequest, TransportErrorMapper},
	auth::AwaType,
	flows::ActionBroker,
	http::ApiHttpClient,
	item::{DestinyItemChangeResponse, InventoryItem, ItemSocket, SocketArrayType},
	notify::Notification,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

/// Title key of the notification shown when a plug insertion fails.
pub const INSERT_FAILED_TITLE_KEY: &str = "AWA.Error";

impl<C, M> ActionBroker<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Inserts `plug_item_hash` into `socket` of `item` and refreshes the item.
	///
	/// This is a failure boundary: errors are logged and shown as an error notification instead
	/// of being returned. Returns the dispatched change set on success.
	pub async fn insert_plug(
		&self,
		item: &InventoryItem,
		socket: ItemSocket,
		plug_item_hash: u32,
	) -> Option<DestinyItemChangeResponse> {
		match self.try_insert_plug(item, socket, plug_item_hash).await {
			Ok(changes) => Some(changes),
			Err(e) => {
				obs::log_flow_error(FlowKind::InsertPlug, "insert_plug", &e);
				self.notifier.show(Notification::error(INSERT_FAILED_TITLE_KEY, e.to_string()));

				None
			},
		}
	}

	/// Fallible form of [`ActionBroker::insert_plug`].
	///
	/// Vault items act through the currently selected character; without one the call fails
	/// with [`Error::MissingCurrentCharacter`] before any request is made.
	pub async fn try_insert_plug(
		&self,
		item: &InventoryItem,
		socket: ItemSocket,
		plug_item_hash: u32,
	) -> Result<DestinyItemChangeResponse> {
		const KIND: FlowKind = FlowKind::InsertPlug;

		let span = FlowSpan::new(KIND, "try_insert_plug");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let current = self.context.current_character();
				let character_id = item
					.acting_character(current.as_ref())
					.cloned()
					.ok_or(Error::MissingCurrentCharacter)?;
				let account = self.context.account();
				let action_token = self
					.action_token(&account, AwaType::InsertPlugs, &character_id, Some(item))
					.await?;
				let request = InsertSocketPlugRequest {
					action_token,
					item_instance_id: item.id.clone(),
					plug: DestinyInsertPlugsRequestEntry {
						socket_index: socket.socket_index,
						socket_array_type: SocketArrayType::Default,
						plug_item_hash,
					},
					character_id,
					membership_type: account.original_platform_type,
				};
				let changes = self.api.insert_socket_plug(&request).await?;

				Ok(self.refresh_after_change(item, changes).await)
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}
}
