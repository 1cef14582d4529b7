pub mod backtrace;
mod bus_components;
mod category;
mod config;
mod events;
mod macros;
mod message;
mod notification;
pub mod repository;
mod responses;
mod store;
mod validation;

pub mod prelude {
	pub use crate::backtrace::{ExceptionSummary, SourceLocation};
	pub use crate::bus_components::deferred::{WorkQueue, WorkReceiver, WORK_QUEUE_CLOSED};
	pub use crate::bus_components::handler::*;
	pub use crate::bus_components::messagebus::ServiceBus;
	pub use crate::bus_components::registry::{HandlerRegistry, RegistryBuilder};
	pub use crate::category::{ExtensionCode, NotificationCategory, EXTENSION_CODE_START};
	pub use crate::config::{BusConfig, Environment, ENVIRONMENT_VARIABLE};
	pub use crate::events::*;
	pub use crate::message::*;
	pub use crate::notification::*;
	pub use crate::repository::in_memory::InMemoryRepository;
	pub use crate::repository::{PaginationFilter, Predicate, RepositoryError, RepositoryResult, TIdentity, TMapper, TReadRepository, TRepository};
	pub use crate::responses::{BoxError, BusError, ExecutionReport, HandlerFailures, HandlerResult, NotificationView};
	pub use crate::store::{NotificationFilter, NotificationStore};
	pub use crate::validation::{TValidate, TValidator, ValidationFailure, ValidationFailures};

	pub use async_trait::async_trait;
	pub use chrono;
	pub use serde;
	pub use serde::{Deserialize, Serialize};
	pub use serde_json;
	pub use tokio;
	pub use tracing;
	pub use uuid;
}

pub mod event_macros {
	pub use crate::{caller, function_name, log_entry, system_error};
}
