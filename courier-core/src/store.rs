//! Per-context aggregation of notifications, warnings, system errors and logs.

use crate::category::NotificationCategory;
use crate::message::TWork;
use crate::notification::{Log, Notification, NotificationRecord, SystemError, Warning};
use tokio::sync::RwLock;

/// Selects which collections a store query looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationFilter {
	pub notifications: bool,
	pub warnings: bool,
	pub system_errors: bool,
	pub logs: bool,
}

impl Default for NotificationFilter {
	fn default() -> Self {
		Self::ALL
	}
}

impl NotificationFilter {
	pub const ALL: Self = Self {
		notifications: true,
		warnings: true,
		system_errors: true,
		logs: true,
	};

	/// What makes an execution unsuccessful: domain notifications and system errors.
	pub const FAILURES: Self = Self {
		notifications: true,
		warnings: false,
		system_errors: true,
		logs: false,
	};

	pub const NONE: Self = Self {
		notifications: false,
		warnings: false,
		system_errors: false,
		logs: false,
	};

	pub fn notifications(mut self, on: bool) -> Self {
		self.notifications = on;
		self
	}
	pub fn warnings(mut self, on: bool) -> Self {
		self.warnings = on;
		self
	}
	pub fn system_errors(mut self, on: bool) -> Self {
		self.system_errors = on;
		self
	}
	pub fn logs(mut self, on: bool) -> Self {
		self.logs = on;
		self
	}
}

#[derive(Default)]
struct Collections {
	sequence: u64,
	notifications: Vec<(u64, Notification)>,
	warnings: Vec<(u64, Warning)>,
	system_errors: Vec<(u64, SystemError)>,
	logs: Vec<(u64, Log)>,
}

impl Collections {
	fn next_sequence(&mut self) -> u64 {
		self.sequence += 1;
		self.sequence
	}

	fn merged(&self, filter: NotificationFilter) -> Vec<(u64, NotificationRecord)> {
		let mut merged = Vec::new();
		if filter.notifications {
			merged.extend(self.notifications.iter().map(|(seq, n)| (*seq, NotificationRecord::Notification(n.clone()))));
		}
		if filter.warnings {
			merged.extend(self.warnings.iter().map(|(seq, w)| (*seq, NotificationRecord::Warning(w.clone()))));
		}
		if filter.system_errors {
			merged.extend(self.system_errors.iter().map(|(seq, e)| (*seq, NotificationRecord::SystemError(e.clone()))));
		}
		if filter.logs {
			merged.extend(self.logs.iter().map(|(seq, l)| (*seq, NotificationRecord::Log(l.clone()))));
		}
		merged.sort_by(|(a_seq, a), (b_seq, b)| a.created_at().cmp(&b.created_at()).then(a_seq.cmp(b_seq)));
		merged
	}
}

/// Collects everything published during one execution context.
///
/// Reads return snapshots; nothing handed out keeps the lock.
#[derive(Default)]
pub struct NotificationStore {
	inner: RwLock<Collections>,
}

impl NotificationStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores the item if it is one of the four notification kinds.
	/// Returns whether it was stored; anything else is ignored.
	pub async fn add(&self, work: &dyn TWork) -> bool {
		let mut inner = self.inner.write().await;
		match work.notification_category() {
			NotificationCategory::DomainNotification => {
				if let Some(notification) = work.as_any().downcast_ref::<Notification>() {
					let seq = inner.next_sequence();
					inner.notifications.push((seq, notification.clone()));
					return true;
				}
			}
			NotificationCategory::Warning => {
				if let Some(warning) = work.as_any().downcast_ref::<Warning>() {
					let seq = inner.next_sequence();
					inner.warnings.push((seq, warning.clone()));
					return true;
				}
			}
			NotificationCategory::SystemError => {
				if let Some(error) = work.as_any().downcast_ref::<SystemError>() {
					let seq = inner.next_sequence();
					inner.system_errors.push((seq, error.clone()));
					return true;
				}
			}
			NotificationCategory::Log => {
				if let Some(log) = work.as_any().downcast_ref::<Log>() {
					let seq = inner.next_sequence();
					inner.logs.push((seq, log.clone()));
					return true;
				}
			}
			_ => {}
		}
		tracing::trace!(work = work.work_name(), "not a notification, skipped by store");
		false
	}

	pub async fn notifications(&self) -> Vec<Notification> {
		self.inner.read().await.notifications.iter().map(|(_, n)| n.clone()).collect()
	}

	pub async fn warnings(&self) -> Vec<Warning> {
		self.inner.read().await.warnings.iter().map(|(_, w)| w.clone()).collect()
	}

	pub async fn system_errors(&self) -> Vec<SystemError> {
		self.inner.read().await.system_errors.iter().map(|(_, e)| e.clone()).collect()
	}

	pub async fn logs(&self) -> Vec<Log> {
		self.inner.read().await.logs.iter().map(|(_, l)| l.clone()).collect()
	}

	/// Selected collections merged, oldest first. Ties keep insertion order.
	pub async fn get_all(&self, filter: NotificationFilter) -> Vec<NotificationRecord> {
		self.inner.read().await.merged(filter).into_iter().map(|(_, record)| record).collect()
	}

	pub async fn find<P>(&self, predicate: P, filter: NotificationFilter) -> Vec<NotificationRecord>
	where
		P: Fn(&NotificationRecord) -> bool,
	{
		self.inner
			.read()
			.await
			.merged(filter)
			.into_iter()
			.map(|(_, record)| record)
			.filter(|record| predicate(record))
			.collect()
	}

	/// True when a domain notification or a system error is present. Warnings and logs do not count.
	pub async fn has_notifications(&self) -> bool {
		self.has_notifications_with(NotificationFilter::FAILURES).await
	}

	/// Checks notifications, then warnings, then system errors, stopping at the first hit.
	/// The `logs` toggle is ignored.
	pub async fn has_notifications_with(&self, filter: NotificationFilter) -> bool {
		let inner = self.inner.read().await;
		(filter.notifications && !inner.notifications.is_empty())
			|| (filter.warnings && !inner.warnings.is_empty())
			|| (filter.system_errors && !inner.system_errors.is_empty())
	}

	pub async fn has_logs(&self) -> bool {
		!self.inner.read().await.logs.is_empty()
	}

	pub async fn has_warnings(&self) -> bool {
		!self.inner.read().await.warnings.is_empty()
	}

	pub async fn has_system_errors(&self) -> bool {
		!self.inner.read().await.system_errors.is_empty()
	}

	pub async fn len(&self) -> usize {
		let inner = self.inner.read().await;
		inner.notifications.len() + inner.warnings.len() + inner.system_errors.len() + inner.logs.len()
	}

	pub async fn is_empty(&self) -> bool {
		self.len().await == 0
	}

	/// Empties all four collections. Safe to call on an empty store.
	pub async fn clear(&self) {
		let mut inner = self.inner.write().await;
		inner.notifications.clear();
		inner.warnings.clear();
		inner.system_errors.clear();
		inner.logs.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::events::EnqueueWorkEvent;

	#[tokio::test]
	async fn test_add_routes_by_category() {
		let store = NotificationStore::new();
		assert!(store.add(&Notification::new("n")).await);
		assert!(store.add(&Warning::new("w")).await);
		assert!(store.add(&SystemError::new("e")).await);
		assert!(store.add(&Log::new("l")).await);

		assert_eq!(store.notifications().await.len(), 1);
		assert_eq!(store.warnings().await.len(), 1);
		assert_eq!(store.system_errors().await.len(), 1);
		assert_eq!(store.logs().await.len(), 1);
	}

	#[tokio::test]
	async fn test_non_notifications_are_dropped() {
		let store = NotificationStore::new();
		assert!(!store.add(&EnqueueWorkEvent::new(None)).await);
		assert!(store.is_empty().await);
	}

	#[tokio::test]
	async fn test_ties_keep_insertion_order() {
		let store = NotificationStore::new();
		for i in 0..50 {
			store.add(&Notification::new(format!("n{i}"))).await;
		}
		let messages: Vec<String> = store.get_all(NotificationFilter::ALL).await.iter().map(|r| r.notification().message().to_owned()).collect();
		assert_eq!(messages, (0..50).map(|i| format!("n{i}")).collect::<Vec<_>>());
	}
}
