//! # Service Bus
//! One [`ServiceBus`] per execution context (a request, a job, a unit of work).
//! It owns the [`NotificationStore`] of that context and shares the
//! [`HandlerRegistry`] with every other context.
//!
//! ### example
//! ```ignore
//! let registry = Arc::new(
//!     HandlerRegistry::builder()
//!         .command::<CreateUser>(CreateUserHandler::new(repository))
//!         .event::<UserCreated>(SendWelcomeMail)
//!         .build()?,
//! );
//!
//! let bus = ServiceBus::new(Arc::clone(&registry));
//! let created = bus.send_command(CreateUser::new("ada")).await?;
//! let report = bus.report(Some(created)).await;
//! ```

use super::handler::EventHandlers;
use super::registry::HandlerRegistry;
use crate::config::BusConfig;
use crate::events::{EnqueueWorkEvent, EnqueueWorksEvent};
use crate::message::{ExecutionMode, TCommand, TEvent, TWork, WorkType};
use crate::notification::Notification;
use crate::responses::{BoxError, BusError, ExecutionReport, HandlerFailures, NotificationView};
use crate::store::NotificationStore;
use futures::future::BoxFuture;
use std::any::{type_name, Any};
use std::sync::Arc;

/// Runs one drained work item of a known concrete type on a bus.
pub(crate) type DeferredExecutor = for<'a> fn(Arc<dyn TWork>, &'a ServiceBus) -> BoxFuture<'a, Result<(), BusError>>;

pub struct ServiceBus {
	registry: Arc<HandlerRegistry>,
	notifications: NotificationStore,
	config: BusConfig,
}

impl ServiceBus {
	pub fn new(registry: Arc<HandlerRegistry>) -> Self {
		Self::with_config(registry, BusConfig::default())
	}

	pub fn with_config(registry: Arc<HandlerRegistry>, config: BusConfig) -> Self {
		Self {
			registry,
			notifications: NotificationStore::new(),
			config,
		}
	}

	pub fn notifications(&self) -> &NotificationStore {
		&self.notifications
	}

	pub fn config(&self) -> &BusConfig {
		&self.config
	}

	pub fn registry(&self) -> &Arc<HandlerRegistry> {
		&self.registry
	}

	/// Runs every listener of the event, or enqueues it when its mode says so.
	///
	/// Returns whether the context is still free of notifications afterwards.
	pub async fn publish_event<E: TEvent>(&self, event: E) -> Result<bool, BusError> {
		match event.execution_mode() {
			ExecutionMode::Enqueue => self.enqueue_work(event).await,
			ExecutionMode::WaitToClose => {
				self.dispatch(&event).await?;
				Ok(!self.notifications.has_notifications().await)
			}
		}
	}

	/// Runs the command's handler and returns its response.
	///
	/// An enqueued command yields `C::Response::default()`, since no handler ran.
	pub async fn send_command<C: TCommand>(&self, command: C) -> Result<C::Response, BusError> {
		#[cfg(feature = "tracing")]
		{
			tracing::info!("{}", command.work_name());
		}

		if command.execution_mode() == ExecutionMode::Enqueue {
			self.enqueue_work(command).await?;
			return Ok(C::Response::default());
		}

		let handler = self.registry.command_handler::<C>().ok_or_else(|| {
			tracing::error!(command = std::any::type_name::<C>(), "no command handler registered");
			BusError::CommandHandlerNotFound(std::any::type_name::<C>())
		})?;

		let name = command.work_name().to_owned();
		handler.handle(command, self).await.map_err(|source| {
			tracing::error!(work = %name, error = %source, "command handler failed");
			BusError::Handler { work: name, source }
		})
	}

	/// Forces deferred execution of `work` regardless of its own mode.
	pub async fn enqueue_work<W: TWork>(&self, mut work: W) -> Result<bool, BusError> {
		work.change_execution_mode(ExecutionMode::Enqueue);
		let work: Arc<dyn TWork> = Arc::new(work);
		tracing::debug!(work = work.work_name(), id = %work.work_id(), "enqueueing");

		self.dispatch(&EnqueueWorkEvent::new(Some(work))).await?;
		Ok(!self.notifications.has_notifications().await)
	}

	/// Same as [`enqueue_work`](Self::enqueue_work) for a batch, delivered in a single envelope.
	pub async fn enqueue_works(&self, works: Vec<Box<dyn TWork>>) -> Result<bool, BusError> {
		let works: Vec<Arc<dyn TWork>> = works
			.into_iter()
			.map(|mut work| {
				if work.execution_mode() != ExecutionMode::Enqueue {
					work.change_execution_mode(ExecutionMode::Enqueue);
				}
				Arc::from(work)
			})
			.collect();
		tracing::debug!(count = works.len(), "enqueueing batch");

		self.dispatch(&EnqueueWorksEvent::new(works)).await?;
		Ok(!self.notifications.has_notifications().await)
	}

	/// Runs work drained from a [`WorkReceiver`](super::deferred::WorkReceiver) in this context.
	///
	/// The item is switched back to `WaitToClose` and goes to the handler(s) of its type.
	/// An event nobody listens to is only collected; a command without a handler is an error.
	pub async fn execute_deferred(&self, work: Arc<dyn TWork>) -> Result<bool, BusError> {
		tracing::debug!(work = work.work_name(), id = %work.work_id(), "executing deferred work");

		match self.registry.deferred_executor(Any::type_id(work.as_any())) {
			Some(execute) => execute(work, self).await?,
			None => match work.work_type() {
				WorkType::Command => {
					tracing::error!(work = work.work_name(), "no handler for deferred command");
					return Err(BusError::DeferredWorkNotRunnable(work.work_name().to_owned()));
				}
				WorkType::Event => {
					self.notifications.add(&*work).await;
				}
			},
		}
		Ok(!self.notifications.has_notifications().await)
	}

	/// Publishes one [`Notification`] per validation failure of `work`.
	/// Returns whether `work` was valid.
	pub async fn validate_work(&self, work: &dyn TWork) -> Result<bool, BusError> {
		let failures = work.validate();
		if failures.is_empty() {
			return Ok(true);
		}
		tracing::debug!(work = work.work_name(), failures = failures.len(), "validation failed");
		for failure in failures {
			self.publish_event(Notification::from(failure)).await?;
		}
		Ok(false)
	}

	/// Builds the response envelope from what this context collected.
	pub async fn report<T>(&self, data: Option<T>) -> ExecutionReport<T> {
		let store = &self.notifications;
		let system_errors = store.system_errors().await;
		let error_codes = system_errors.iter().filter_map(|e| e.code().map(str::to_owned)).collect();

		let development = self.config.environment.is_development();
		ExecutionReport {
			success: !store.has_notifications().await,
			data,
			warnings: store.warnings().await.iter().map(NotificationView::from).collect(),
			errors: store.notifications().await.iter().map(NotificationView::from).collect(),
			error_codes,
			system_errors: development.then_some(system_errors),
			logs: if development { Some(store.logs().await) } else { None },
		}
	}

	/// Stores the event if it is a notification, then runs its listeners.
	/// Never redirects, so the envelopes can go through here without looping back.
	async fn dispatch<E: TEvent>(&self, event: &E) -> Result<(), BusError> {
		#[cfg(feature = "tracing")]
		{
			tracing::info!("Processing {}...", event.work_name());
		}

		self.notifications.add(event).await;

		let Some(handlers) = self.registry.event_handlers::<E>() else {
			tracing::trace!(event = event.work_name(), "no listeners");
			return Ok(());
		};

		let mut failures: Vec<BoxError> = Vec::new();
		match handlers {
			EventHandlers::Sync(h) => {
				for (i, handler) in h.iter().enumerate() {
					if let Err(err) = handler.handle(event, self).await {
						tracing::error!("Error Occurred While Handling Event In {i}th Handler! Error:{}", err);
						failures.push(err);
					}
				}
			}
			EventHandlers::Async(h) => {
				let futures = h.iter().map(|handler| handler.handle(event, self));
				for err in futures::future::join_all(futures).await.into_iter().filter_map(Result::err) {
					tracing::error!("Error Occurred While Handling Event! Error:{}", err);
					failures.push(err);
				}
			}
		}

		match HandlerFailures::collapse(failures) {
			Some(source) => Err(BusError::Handler {
				work: event.work_name().to_owned(),
				source,
			}),
			None => Ok(()),
		}
	}
}

pub(crate) fn execute_deferred_command<C: TCommand>(work: Arc<dyn TWork>, bus: &ServiceBus) -> BoxFuture<'_, Result<(), BusError>> {
	Box::pin(async move {
		let Ok(command) = work.into_any_arc().downcast::<C>() else {
			unreachable!("deferred executors are keyed by the type id of their work")
		};
		let mut command = Arc::try_unwrap(command).map_err(|_| BusError::DeferredWorkShared(type_name::<C>().to_owned()))?;
		command.change_execution_mode(ExecutionMode::WaitToClose);
		bus.send_command(command).await.map(|_| ())
	})
}

pub(crate) fn execute_deferred_event<E: TEvent>(work: Arc<dyn TWork>, bus: &ServiceBus) -> BoxFuture<'_, Result<(), BusError>> {
	Box::pin(async move {
		let Ok(event) = work.into_any_arc().downcast::<E>() else {
			unreachable!("deferred executors are keyed by the type id of their work")
		};
		match Arc::try_unwrap(event) {
			Ok(mut event) => {
				event.change_execution_mode(ExecutionMode::WaitToClose);
				bus.dispatch(&event).await
			}
			// Listeners only borrow the event, so a shared one still runs.
			Err(shared) => bus.dispatch(&*shared).await,
		}
	})
}
