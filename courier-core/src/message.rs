use crate::category::NotificationCategory;
use crate::validation::TValidate;
use chrono::{DateTime, Utc};
use downcast_rs::{impl_downcast, DowncastSync};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use uuid::Uuid;

/// How the bus treats a work item it receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExecutionMode {
	/// Handled immediately; the caller waits until every handler is done.
	#[default]
	WaitToClose,
	/// Handed off to whatever listens for enqueue envelopes.
	Enqueue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkType {
	/// Delivered to exactly one handler.
	Command,
	/// Delivered to every handler registered for it, possibly none.
	Event,
}

/// Fields shared by every command and event.
///
/// Build one in your constructor and expose it through [`TWork::header`].
/// The derive macros `TCommand` and `TEvent` look for a field named `header`
/// (or annotated with `#[header]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkHeader {
	id: Uuid,
	name: String,
	created_at: DateTime<Utc>,
	execution_mode: ExecutionMode,
	category: NotificationCategory,
	#[serde(default)]
	apply_event_sourcing: bool,
}

impl WorkHeader {
	pub fn new<W: ?Sized>(execution_mode: ExecutionMode, category: NotificationCategory) -> Self {
		Self {
			id: Uuid::new_v4(),
			name: short_type_name::<W>(),
			created_at: Utc::now(),
			execution_mode,
			category,
			apply_event_sourcing: false,
		}
	}

	/// Header for a command that is handled right away.
	pub fn command<W: ?Sized>() -> Self {
		Self::new::<W>(ExecutionMode::WaitToClose, NotificationCategory::Default)
	}

	/// Header for an event that is handled right away.
	pub fn event<W: ?Sized>() -> Self {
		Self::new::<W>(ExecutionMode::WaitToClose, NotificationCategory::Default)
	}

	pub fn with_id(mut self, id: Uuid) -> Self {
		self.id = id;
		self
	}

	pub fn with_execution_mode(mut self, execution_mode: ExecutionMode) -> Self {
		self.execution_mode = execution_mode;
		self
	}

	pub fn with_category(mut self, category: NotificationCategory) -> Self {
		self.category = category;
		self
	}

	pub fn with_event_sourcing(mut self, apply: bool) -> Self {
		self.apply_event_sourcing = apply;
		self
	}

	pub fn id(&self) -> Uuid {
		self.id
	}
	pub fn name(&self) -> &str {
		&self.name
	}
	pub fn created_at(&self) -> DateTime<Utc> {
		self.created_at
	}
	pub fn execution_mode(&self) -> ExecutionMode {
		self.execution_mode
	}
	pub fn category(&self) -> NotificationCategory {
		self.category
	}
	pub fn apply_event_sourcing(&self) -> bool {
		self.apply_event_sourcing
	}

	pub(crate) fn set_execution_mode(&mut self, execution_mode: ExecutionMode) {
		self.execution_mode = execution_mode
	}
	pub(crate) fn set_id(&mut self, id: Uuid) {
		self.id = id
	}
}

/// `a::b::Foo<c::Bar>` -> `Foo<c::Bar>`
fn short_type_name<T: ?Sized>() -> String {
	let full = std::any::type_name::<T>();
	let (path, generics) = full.split_at(full.find('<').unwrap_or(full.len()));
	let base = path.rsplit("::").next().unwrap_or(path);
	format!("{base}{generics}")
}

/// Anything the bus can dispatch: a command or an event.
pub trait TWork: DowncastSync + TValidate {
	fn header(&self) -> &WorkHeader;
	fn header_mut(&mut self) -> &mut WorkHeader;
	fn work_type(&self) -> WorkType;

	fn work_id(&self) -> Uuid {
		self.header().id()
	}
	fn work_name(&self) -> &str {
		self.header().name()
	}
	fn created_at(&self) -> DateTime<Utc> {
		self.header().created_at()
	}
	fn execution_mode(&self) -> ExecutionMode {
		self.header().execution_mode()
	}
	fn notification_category(&self) -> NotificationCategory {
		self.header().category()
	}

	/// Used by the bus when it reroutes the work into deferred execution.
	#[doc(hidden)]
	fn change_execution_mode(&mut self, execution_mode: ExecutionMode) {
		self.header_mut().set_execution_mode(execution_mode)
	}

	#[doc(hidden)]
	fn change_work_id(&mut self, id: Uuid) {
		self.header_mut().set_id(id)
	}
}

impl_downcast!(sync TWork);

impl Debug for dyn TWork {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}({})", self.work_name(), self.work_id())
	}
}

/// Intent handled by exactly one handler.
///
/// `Response::default()` is what the caller gets back when the command is
/// enqueued instead of executed.
pub trait TCommand: TWork {
	type Response: Default + Send + 'static;
}

/// Fact delivered to zero or more handlers.
pub trait TEvent: TWork {
	/// Hook for an external event store; the bus itself does not record anything.
	fn apply_event_sourcing(&self) -> bool {
		self.header().apply_event_sourcing()
	}
}

impl_downcast!(sync TEvent);

impl Debug for dyn TEvent {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}({})", self.work_name(), self.work_id())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	struct Plain;
	struct Wrapped<T>(T);

	#[test]
	fn test_short_type_name() {
		assert_eq!(short_type_name::<Plain>(), "Plain");
		assert_eq!(short_type_name::<Wrapped<Plain>>(), format!("Wrapped<{}>", std::any::type_name::<Plain>()));
	}

	#[test]
	fn test_header_defaults() {
		let header = WorkHeader::command::<Plain>();
		assert_eq!(header.execution_mode(), ExecutionMode::WaitToClose);
		assert_eq!(header.category(), NotificationCategory::Default);
		assert!(!header.id().is_nil());
		assert!(!header.apply_event_sourcing());
		assert_eq!(header.name(), "Plain");
	}

	#[test]
	fn test_headers_get_distinct_ids() {
		let a = WorkHeader::event::<Plain>();
		let b = WorkHeader::event::<Plain>();
		assert_ne!(a.id(), b.id());
	}
}
