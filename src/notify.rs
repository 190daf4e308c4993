//! User-facing notification surface.

// self
use crate::_prelude::*;

/// Severity of a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
	/// Informational, e.g. "check your device to approve the action".
	Info,
	/// A requested action completed.
	Success,
	/// Something degraded but the action went through.
	Warning,
	/// The action failed.
	Error,
}
impl NotificationKind {
	/// Returns a stable label for the kind.
	pub const fn as_str(self) -> &'static str {
		match self {
			NotificationKind::Info => "info",
			NotificationKind::Success => "success",
			NotificationKind::Warning => "warning",
			NotificationKind::Error => "error",
		}
	}
}
impl Display for NotificationKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// A notification shown to the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
	/// Severity.
	#[serde(rename = "type")]
	pub kind: NotificationKind,
	/// Short title.
	pub title: String,
	/// Body text.
	pub body: String,
}
impl Notification {
	/// Builds a notification of the given kind.
	pub fn new(kind: NotificationKind, title: impl Into<String>, body: impl Into<String>) -> Self {
		Self { kind, title: title.into(), body: body.into() }
	}

	/// Builds an [`NotificationKind::Info`] notification.
	pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
		Self::new(NotificationKind::Info, title, body)
	}

	/// Builds an [`NotificationKind::Error`] notification.
	pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
		Self::new(NotificationKind::Error, title, body)
	}
}

/// Fire-and-forget notification sink.
pub trait Notifier
where
	Self: Send + Sync,
{
	/// Shows `notification`. Implementations must not block.
	fn show(&self, notification: Notification);
}

/// [`Notifier`] that keeps every notification in memory.
#[derive(Clone, Debug, Default)]
pub struct NotificationLog(Arc<Mutex<Vec<Notification>>>);
impl NotificationLog {
	/// Returns a copy of every notification shown so far.
	pub fn snapshot(&self) -> Vec<Notification> {
		self.0.lock().clone()
	}

	/// Returns the notifications of one kind.
	pub fn of_kind(&self, kind: NotificationKind) -> Vec<Notification> {
		self.0.lock().iter().filter(|notification| notification.kind == kind).cloned().collect()
	}

	/// Returns the number of notifications shown.
	pub fn len(&self) -> usize {
		self.0.lock().len()
	}

	/// Returns `true` when nothing has been shown.
	pub fn is_empty(&self) -> bool {
		self.0.lock().is_empty()
	}
}
impl Notifier for NotificationLog {
	fn show(&self, notification: Notification) {
		self.0.lock().push(notification);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn log_filters_by_kind() {
		let log = NotificationLog::default();

		log.show(Notification::info("Approve", "Check your device."));
		log.show(Notification::error("Failed", "boom"));

		assert_eq!(log.len(), 2);
		assert_eq!(log.of_kind(NotificationKind::Error)[0].body, "boom");
		assert!(log.of_kind(NotificationKind::Warning).is_empty());
	}

	#[test]
	fn notifications_serialize_with_type_field() {
		let value = serde_json::to_value(Notification::info("t", "b"))
			.expect("Notification should serialize.");

		assert_eq!(value, serde_json::json!({ "type": "info", "title": "t", "body": "b" }));
	}
}
