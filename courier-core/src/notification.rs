//! The notification family: domain notifications, warnings, system errors and logs.
//!
//! All four are events, so they travel through [`ServiceBus::publish_event`](crate::prelude::ServiceBus::publish_event)
//! like anything else and end up in the context's [`NotificationStore`](crate::prelude::NotificationStore).

use crate::backtrace::{ExceptionSummary, SourceLocation};
use crate::category::NotificationCategory;
use crate::make_smart_pointer;
use crate::message::{ExecutionMode, TEvent, TWork, WorkHeader, WorkType};
use crate::validation::{TValidate, ValidationFailure};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

pub const NOTIFICATION_ID_UNDEFINED: &str = "The notification id is not defined.";
pub const NOTIFICATION_MESSAGE_EMPTY: &str = "The notification message can not be null or empty.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
	header: WorkHeader,
	code: Option<String>,
	message: String,
}

impl Notification {
	pub fn new(message: impl Into<String>) -> Self {
		Self::with_header(WorkHeader::new::<Self>(ExecutionMode::WaitToClose, NotificationCategory::DomainNotification), message)
	}

	fn with_header(header: WorkHeader, message: impl Into<String>) -> Self {
		Self {
			header,
			code: None,
			message: message.into(),
		}
	}

	pub fn with_code(mut self, code: impl Into<String>) -> Self {
		self.code = Some(code.into());
		self
	}

	pub fn with_id(mut self, id: Uuid) -> Self {
		self.header = self.header.with_id(id);
		self
	}

	pub fn code(&self) -> Option<&str> {
		self.code.as_deref()
	}

	pub fn has_code(&self) -> bool {
		self.code.is_some()
	}

	pub fn message(&self) -> &str {
		&self.message
	}

	pub fn id(&self) -> Uuid {
		self.header.id()
	}

	pub fn created_at(&self) -> DateTime<Utc> {
		self.header.created_at()
	}

	pub fn category(&self) -> NotificationCategory {
		self.header.category()
	}
}

impl From<ValidationFailure> for Notification {
	fn from(failure: ValidationFailure) -> Self {
		let notification = Notification::new(failure.message);
		match failure.code {
			Some(code) => notification.with_code(code),
			None => notification,
		}
	}
}

impl Display for Notification {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match &self.code {
			Some(code) => write!(f, "[{}] {}", code, self.message),
			None => write!(f, "{}", self.message),
		}
	}
}

impl TValidate for Notification {
	fn validate(&self) -> Vec<ValidationFailure> {
		let mut failures = Vec::new();
		if self.header.id().is_nil() {
			failures.push(ValidationFailure::new(NOTIFICATION_ID_UNDEFINED).with_property("id"));
		}
		if self.message.is_empty() {
			failures.push(ValidationFailure::new(NOTIFICATION_MESSAGE_EMPTY).with_property("message"));
		}
		failures
	}
}

/// Implements the work traits for a type whose `Notification` lives in field `$field`.
macro_rules! impl_notification_work {
	($name:ty, $field:ident) => {
		impl TValidate for $name {
			fn validate(&self) -> Vec<ValidationFailure> {
				self.$field.validate()
			}
		}
		impl TWork for $name {
			fn header(&self) -> &WorkHeader {
				&self.$field.header
			}
			fn header_mut(&mut self) -> &mut WorkHeader {
				&mut self.$field.header
			}
			fn work_type(&self) -> WorkType {
				WorkType::Event
			}
		}
		impl TEvent for $name {}
	};
}

impl TWork for Notification {
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
impl TEvent for Notification {}

/// User-facing, does not make the execution fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
	notification: Notification,
}
make_smart_pointer!(Warning, Notification, notification);
impl_notification_work!(Warning, notification);

impl Warning {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			notification: Notification::with_header(WorkHeader::new::<Self>(ExecutionMode::WaitToClose, NotificationCategory::Warning), message),
		}
	}

	pub fn with_code(mut self, code: impl Into<String>) -> Self {
		self.notification = self.notification.with_code(code);
		self
	}
}

impl Display for Warning {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.notification.message)
	}
}

/// Unexpected failure. Carries enough context to debug it, so it is kept
/// away from end users outside development.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemError {
	notification: Notification,
	location: SourceLocation,
	exception: Option<ExceptionSummary>,
	object_manipulated: Option<serde_json::Value>,
}
make_smart_pointer!(SystemError, Notification, notification);
impl_notification_work!(SystemError, notification);

impl SystemError {
	#[track_caller]
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			notification: Notification::with_header(WorkHeader::new::<Self>(ExecutionMode::WaitToClose, NotificationCategory::SystemError), message),
			location: SourceLocation::caller(),
			exception: None,
			object_manipulated: None,
		}
	}

	/// Uses the error's message and keeps a summary of it.
	#[track_caller]
	pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
		Self::new(error.to_string()).with_exception(error)
	}

	pub fn with_exception(mut self, error: &(dyn std::error::Error + 'static)) -> Self {
		self.exception = Some(ExceptionSummary::capture(error));
		self
	}

	pub fn with_code(mut self, code: impl Into<String>) -> Self {
		self.notification = self.notification.with_code(code);
		self
	}

	pub fn with_location(mut self, location: SourceLocation) -> Self {
		self.location = location;
		self
	}

	/// Attaches the object that was being worked on. Values that fail to serialise are dropped.
	pub fn with_object<T: Serialize + ?Sized>(mut self, object: &T) -> Self {
		self.object_manipulated = serde_json::to_value(object).ok();
		self
	}

	pub fn location(&self) -> &SourceLocation {
		&self.location
	}
	pub fn exception(&self) -> Option<&ExceptionSummary> {
		self.exception.as_ref()
	}
	pub fn stack_trace(&self) -> Option<&str> {
		self.exception.as_ref().map(|e| e.stack_trace.as_str())
	}
	pub fn inner_exception(&self) -> Option<&str> {
		self.exception.as_ref().and_then(|e| e.inner.as_deref())
	}
	pub fn object_manipulated(&self) -> Option<&serde_json::Value> {
		self.object_manipulated.as_ref()
	}
}

impl Display for SystemError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} {}", self.notification.message, self.location)
	}
}

/// Diagnostic trace entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Log {
	notification: Notification,
	location: SourceLocation,
	object_manipulated: Option<serde_json::Value>,
}
make_smart_pointer!(Log, Notification, notification);
impl_notification_work!(Log, notification);

impl Log {
	#[track_caller]
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			notification: Notification::with_header(WorkHeader::new::<Self>(ExecutionMode::WaitToClose, NotificationCategory::Log), message),
			location: SourceLocation::caller(),
			object_manipulated: None,
		}
	}

	pub fn with_code(mut self, code: impl Into<String>) -> Self {
		self.notification = self.notification.with_code(code);
		self
	}

	pub fn with_location(mut self, location: SourceLocation) -> Self {
		self.location = location;
		self
	}

	pub fn with_object<T: Serialize + ?Sized>(mut self, object: &T) -> Self {
		self.object_manipulated = serde_json::to_value(object).ok();
		self
	}

	pub fn location(&self) -> &SourceLocation {
		&self.location
	}
	pub fn object_manipulated(&self) -> Option<&serde_json::Value> {
		self.object_manipulated.as_ref()
	}
}

impl Display for Log {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} {}", self.notification.message, self.location)
	}
}

/// Any stored notification, as returned by merged store queries.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationRecord {
	Notification(Notification),
	Warning(Warning),
	SystemError(SystemError),
	Log(Log),
}

impl NotificationRecord {
	pub fn notification(&self) -> &Notification {
		match self {
			Self::Notification(n) => n,
			Self::Warning(w) => &w.notification,
			Self::SystemError(e) => &e.notification,
			Self::Log(l) => &l.notification,
		}
	}

	pub fn created_at(&self) -> DateTime<Utc> {
		self.notification().created_at()
	}

	pub fn category(&self) -> NotificationCategory {
		self.notification().category()
	}

	pub fn is_warning(&self) -> bool {
		matches!(self, Self::Warning(_))
	}
}

impl Display for NotificationRecord {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Notification(n) => Display::fmt(n, f),
			Self::Warning(w) => Display::fmt(w, f),
			Self::SystemError(e) => Display::fmt(e, f),
			Self::Log(l) => Display::fmt(l, f),
		}
	}
}
