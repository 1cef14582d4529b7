//! Envelope events used for deferred execution.

use crate::category::NotificationCategory;
use crate::message::{ExecutionMode, TEvent, TWork, WorkHeader, WorkType};
use crate::validation::{TValidate, ValidationFailure};
use std::sync::Arc;
use uuid::Uuid;

pub const WORK_MISSING: &str = "Work can not be null";
pub const WORKS_MISSING: &str = "Works can not be null or a empty collection.";
pub const STORED_EVENT_ID_UNDEFINED: &str = "The store event id is not defined.";
pub const STORED_EVENT_MISSING: &str = "The event to store can not be null.";

macro_rules! impl_envelope_work {
	($name:ty) => {
		impl TWork for $name {
			fn header(&self) -> &WorkHeader {
				&self.header
			}
			fn header_mut(&mut self) -> &mut WorkHeader {
				&mut self.header
			}
			fn work_type(&self) -> WorkType {
				WorkType::Event
			}
		}
		impl TEvent for $name {}
	};
}

/// Carries a single work item to whoever executes deferred work.
///
/// The envelope itself is always delivered right away.
#[derive(Debug, Clone)]
pub struct EnqueueWorkEvent {
	header: WorkHeader,
	work: Option<Arc<dyn TWork>>,
}
impl_envelope_work!(EnqueueWorkEvent);

impl EnqueueWorkEvent {
	pub fn new(work: Option<Arc<dyn TWork>>) -> Self {
		Self {
			header: WorkHeader::new::<Self>(ExecutionMode::WaitToClose, NotificationCategory::WorkCreated),
			work,
		}
	}

	pub fn work(&self) -> Option<&Arc<dyn TWork>> {
		self.work.as_ref()
	}
}

impl TValidate for EnqueueWorkEvent {
	fn validate(&self) -> Vec<ValidationFailure> {
		match self.work {
			Some(_) => vec![],
			None => vec![ValidationFailure::new(WORK_MISSING).with_property("work")],
		}
	}
}

/// Carries a batch of work items.
#[derive(Debug, Clone)]
pub struct EnqueueWorksEvent {
	header: WorkHeader,
	works: Vec<Arc<dyn TWork>>,
}
impl_envelope_work!(EnqueueWorksEvent);

impl EnqueueWorksEvent {
	pub fn new(works: Vec<Arc<dyn TWork>>) -> Self {
		Self {
			header: WorkHeader::new::<Self>(ExecutionMode::WaitToClose, NotificationCategory::WorkCreated),
			works,
		}
	}

	pub fn works(&self) -> &[Arc<dyn TWork>] {
		&self.works
	}
}

impl TValidate for EnqueueWorksEvent {
	fn validate(&self) -> Vec<ValidationFailure> {
		if self.works.is_empty() {
			return vec![ValidationFailure::new(WORKS_MISSING).with_property("works")];
		}
		vec![]
	}
}

/// Wraps an event on its way to durable storage.
#[derive(Debug, Clone)]
pub struct StoredEvent {
	header: WorkHeader,
	stored_event_id: Uuid,
	event: Option<Arc<dyn TEvent>>,
}
impl_envelope_work!(StoredEvent);

impl StoredEvent {
	pub fn new(event: Option<Arc<dyn TEvent>>) -> Self {
		Self {
			header: WorkHeader::new::<Self>(ExecutionMode::Enqueue, NotificationCategory::StoredEvent).with_event_sourcing(false),
			stored_event_id: Uuid::new_v4(),
			event,
		}
	}

	pub fn with_stored_event_id(mut self, id: Uuid) -> Self {
		self.stored_event_id = id;
		self
	}

	pub fn stored_event_id(&self) -> Uuid {
		self.stored_event_id
	}

	pub fn event(&self) -> Option<&Arc<dyn TEvent>> {
		self.event.as_ref()
	}
}

impl TValidate for StoredEvent {
	fn validate(&self) -> Vec<ValidationFailure> {
		let mut failures = vec![];
		if self.stored_event_id.is_nil() {
			failures.push(ValidationFailure::new(STORED_EVENT_ID_UNDEFINED).with_property("stored_event_id"));
		}
		if self.event.is_none() {
			failures.push(ValidationFailure::new(STORED_EVENT_MISSING).with_property("event"));
		}
		failures
	}
}
