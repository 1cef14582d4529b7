use super::deferred::WorkQueue;
use super::handler::{EventHandlers, TCommandHandler, TEventHandler};
use super::messagebus::{execute_deferred_command, execute_deferred_event, DeferredExecutor};
use crate::events::{EnqueueWorkEvent, EnqueueWorksEvent};
use crate::message::{TCommand, TEvent};
use crate::responses::BusError;
use hashbrown::HashMap;
use std::any::{type_name, Any, TypeId};
use std::sync::Arc;

type ErasedHandler = Box<dyn Any + Send + Sync>;

/// Handlers by the runtime type of the work they accept.
///
/// Built once at startup and shared between execution contexts.
#[derive(Default)]
pub struct HandlerRegistry {
	commands: HashMap<TypeId, ErasedHandler>,
	events: HashMap<TypeId, ErasedHandler>,
	deferred: HashMap<TypeId, DeferredExecutor>,
}

impl HandlerRegistry {
	pub fn builder() -> RegistryBuilder {
		RegistryBuilder::default()
	}

	pub fn command_handler<C: TCommand>(&self) -> Option<&Arc<dyn TCommandHandler<C>>> {
		self.commands.get(&TypeId::of::<C>()).and_then(|handler| handler.downcast_ref::<Arc<dyn TCommandHandler<C>>>())
	}

	pub fn event_handlers<E: TEvent>(&self) -> Option<&EventHandlers<E>> {
		self.events.get(&TypeId::of::<E>()).and_then(|handlers| handlers.downcast_ref::<EventHandlers<E>>())
	}

	pub(crate) fn deferred_executor(&self, work: TypeId) -> Option<DeferredExecutor> {
		self.deferred.get(&work).copied()
	}

	pub fn has_command_handler<C: TCommand>(&self) -> bool {
		self.commands.contains_key(&TypeId::of::<C>())
	}
}

#[derive(Default)]
pub struct RegistryBuilder {
	registry: HandlerRegistry,
	duplicates: Vec<&'static str>,
}

impl RegistryBuilder {
	/// Registers the handler of `C`. A second registration for the same type makes [`build`](Self::build) fail.
	pub fn command<C: TCommand>(mut self, handler: impl TCommandHandler<C> + 'static) -> Self {
		let handler: Arc<dyn TCommandHandler<C>> = Arc::new(handler);
		if self.registry.commands.insert(TypeId::of::<C>(), Box::new(handler)).is_some() {
			self.duplicates.push(type_name::<C>());
		}
		self.registry.deferred.insert(TypeId::of::<C>(), execute_deferred_command::<C>);
		self
	}

	/// Adds a listener of `E`. Listeners run in registration order unless
	/// `E` is marked with [`concurrent_events`](Self::concurrent_events).
	pub fn event<E: TEvent>(mut self, handler: impl TEventHandler<E> + 'static) -> Self {
		self.handlers_mut::<E>().push(Arc::new(handler));
		self
	}

	/// Runs every listener of `E` at once.
	pub fn concurrent_events<E: TEvent>(mut self) -> Self {
		let handlers = self.handlers_mut::<E>();
		*handlers = std::mem::take(handlers).into_concurrent();
		self
	}

	/// Forwards everything the bus enqueues to `queue`.
	pub fn deferred_queue(self, queue: WorkQueue) -> Self {
		self.event::<EnqueueWorkEvent>(queue.clone()).event::<EnqueueWorksEvent>(queue)
	}

	pub fn build(self) -> Result<HandlerRegistry, BusError> {
		if let Some(name) = self.duplicates.first() {
			return Err(BusError::DuplicateCommandHandler(*name));
		}
		Ok(self.registry)
	}

	fn handlers_mut<E: TEvent>(&mut self) -> &mut EventHandlers<E> {
		self.registry.deferred.entry(TypeId::of::<E>()).or_insert(execute_deferred_event::<E>);
		let entry = self.registry.events.entry(TypeId::of::<E>()).or_insert_with(|| Box::new(EventHandlers::<E>::default()));
		match entry.downcast_mut::<EventHandlers<E>>() {
			Some(handlers) => handlers,
			None => unreachable!("event handlers are keyed by their own type id"),
		}
	}
}
