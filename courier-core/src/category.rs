//! Notification categories.
//!
//! Codes below [`EXTENSION_CODE_START`] belong to this crate. Applications that
//! need their own categories use [`NotificationCategory::extension`], which only
//! accepts codes from [`EXTENSION_CODE_START`] upwards.

use crate::responses::BusError;
use serde::{Deserialize, Serialize};

pub const EXTENSION_CODE_START: u16 = 100;

/// Application-defined category code, always `>= 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExtensionCode(u16);

impl ExtensionCode {
	pub fn new(code: u16) -> Result<Self, BusError> {
		if code < EXTENSION_CODE_START {
			return Err(BusError::ReservedCategoryCode(code));
		}
		Ok(Self(code))
	}

	pub fn get(self) -> u16 {
		self.0
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum NotificationCategory {
	#[default]
	Default,
	DomainNotification,
	/// Shown to the user, does not fail the execution.
	Warning,
	Log,
	/// Sensitive; never shown to end users in production.
	SystemError,
	StoredEvent,
	PipelineFinished,
	WorkCreated,
	WorkEnqueued,
	WorkStarted,
	WorkFinished,
	WorkFailed,
	Extension(ExtensionCode),
}

impl NotificationCategory {
	pub fn extension(code: u16) -> Result<Self, BusError> {
		ExtensionCode::new(code).map(Self::Extension)
	}

	pub fn code(self) -> u16 {
		match self {
			Self::Default => 0,
			Self::DomainNotification => 1,
			Self::Warning => 2,
			Self::Log => 3,
			Self::SystemError => 4,
			Self::StoredEvent => 5,
			Self::PipelineFinished => 6,
			Self::WorkCreated => 7,
			Self::WorkEnqueued => 8,
			Self::WorkStarted => 9,
			Self::WorkFinished => 10,
			Self::WorkFailed => 11,
			Self::Extension(code) => code.get(),
		}
	}

	pub fn is_extension(self) -> bool {
		matches!(self, Self::Extension(_))
	}
}

impl TryFrom<u16> for NotificationCategory {
	type Error = BusError;

	fn try_from(code: u16) -> Result<Self, Self::Error> {
		let category = match code {
			0 => Self::Default,
			1 => Self::DomainNotification,
			2 => Self::Warning,
			3 => Self::Log,
			4 => Self::SystemError,
			5 => Self::StoredEvent,
			6 => Self::PipelineFinished,
			7 => Self::WorkCreated,
			8 => Self::WorkEnqueued,
			9 => Self::WorkStarted,
			10 => Self::WorkFinished,
			11 => Self::WorkFailed,
			code => Self::extension(code)?,
		};
		Ok(category)
	}
}

impl From<NotificationCategory> for u16 {
	fn from(value: NotificationCategory) -> Self {
		value.code()
	}
}
