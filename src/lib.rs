//! # courier
//! In-process command and event dispatch, with a notification store per
//! execution context.
//!
//! - Commands go to exactly one handler, events to every listener.
//! - A work item in `ExecutionMode::Enqueue` is wrapped in an envelope event
//!   and handed to whoever listens for it, a [`WorkQueue`](prelude::WorkQueue) for instance.
//! - Handlers report problems by publishing notifications, warnings, system
//!   errors and logs, which the context's store collects.
//!
//! ```rust,no_run
//! use courier::prelude::*;
//! use std::sync::Arc;
//!
//! #[derive(Debug, TCommand)]
//! #[response(bool)]
//! struct Ping {
//!     header: WorkHeader,
//! }
//!
//! struct PingHandler;
//!
//! #[async_trait]
//! impl TCommandHandler<Ping> for PingHandler {
//!     async fn handle(&self, _: Ping, bus: &ServiceBus) -> HandlerResult<bool> {
//!         bus.publish_event(Log::new("pong")).await?;
//!         Ok(true)
//!     }
//! }
//!
//! # async fn run() -> Result<(), BusError> {
//! let registry = Arc::new(HandlerRegistry::builder().command::<Ping>(PingHandler).build()?);
//! let bus = ServiceBus::new(registry);
//! assert!(bus.send_command(Ping { header: WorkHeader::command::<Ping>() }).await?);
//! # Ok(())
//! # }
//! ```

pub use courier_core::{backtrace_error, caller, function_name, log_entry, system_error};

pub mod prelude {
	pub use courier_core::prelude::*;
	pub use courier_core::repository;
	pub use courier_macro::{TCommand, TEvent};
}
