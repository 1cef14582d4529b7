use crate::category::NotificationCategory;
use crate::notification::{Log, Notification, SystemError, Warning};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// What a handler returns. Use notifications for expected failures and
/// keep `Err` for bugs.
pub type HandlerResult<T> = Result<T, BoxError>;

#[derive(Debug, thiserror::Error)]
pub enum BusError {
	#[error("no command handler registered for {0}")]
	CommandHandlerNotFound(&'static str),

	#[error("a command handler for {0} is already registered")]
	DuplicateCommandHandler(&'static str),

	#[error("category code {0} is reserved; extension codes start at 100")]
	ReservedCategoryCode(u16),

	#[error("handler for {work} failed: {source}")]
	Handler {
		work: String,
		#[source]
		source: BoxError,
	},

	#[error("no handler registered to run deferred {0}")]
	DeferredWorkNotRunnable(String),

	#[error("deferred {0} is still shared and can not be taken back for execution")]
	DeferredWorkShared(String),
}

/// Every error raised by the listeners of one event, in the order they were collected.
#[derive(Debug)]
pub struct HandlerFailures(Vec<BoxError>);

impl HandlerFailures {
	/// A single failure is returned as is, several are wrapped together.
	pub(crate) fn collapse(mut errors: Vec<BoxError>) -> Option<BoxError> {
		match errors.len() {
			0 => None,
			1 => errors.pop(),
			_ => Some(Box::new(Self(errors))),
		}
	}

	pub fn errors(&self) -> &[BoxError] {
		&self.0
	}
}

impl std::fmt::Display for HandlerFailures {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} handlers failed", self.0.len())?;
		for (i, err) in self.0.iter().enumerate() {
			write!(f, "{}{err}", if i == 0 { ": " } else { "; " })?;
		}
		Ok(())
	}
}

impl std::error::Error for HandlerFailures {}

/// One notification as shown to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationView {
	pub event_id: Uuid,
	pub code: Option<String>,
	pub message: String,
	pub notification_type: NotificationCategory,
	pub time: DateTime<Utc>,
}

impl From<&Notification> for NotificationView {
	fn from(value: &Notification) -> Self {
		Self {
			event_id: value.id(),
			code: value.code().map(str::to_owned),
			message: value.message().to_owned(),
			notification_type: value.category(),
			time: value.created_at(),
		}
	}
}

impl From<&Warning> for NotificationView {
	fn from(value: &Warning) -> Self {
		Self::from(&**value)
	}
}

/// Response envelope built from a context's notification store.
///
/// `system_errors` and `logs` are only filled in development and are left
/// out of the serialised form otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionReport<T> {
	pub success: bool,
	pub data: Option<T>,
	pub warnings: Vec<NotificationView>,
	pub errors: Vec<NotificationView>,
	pub error_codes: Vec<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub system_errors: Option<Vec<SystemError>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub logs: Option<Vec<Log>>,
}

impl<T> ExecutionReport<T> {
	pub fn has_errors(&self) -> bool {
		!self.success
	}

	pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ExecutionReport<U> {
		ExecutionReport {
			success: self.success,
			data: self.data.map(f),
			warnings: self.warnings,
			errors: self.errors,
			error_codes: self.error_codes,
			system_errors: self.system_errors,
			logs: self.logs,
		}
	}
}
