use super::messagebus::ServiceBus;
use crate::message::{TCommand, TEvent};
use crate::responses::HandlerResult;
use async_trait::async_trait;
use std::sync::Arc;

/// The one handler behind a command type.
///
/// Expected failures should be published to `bus` as notifications; `Err`
/// is for things the handler could not deal with.
#[async_trait]
pub trait TCommandHandler<C: TCommand>: Send + Sync {
	async fn handle(&self, command: C, bus: &ServiceBus) -> HandlerResult<C::Response>;
}

/// One of possibly many listeners of an event type.
#[async_trait]
pub trait TEventHandler<E: TEvent>: Send + Sync {
	async fn handle(&self, event: &E, bus: &ServiceBus) -> HandlerResult<()>;
}

#[async_trait]
impl<C: TCommand, H: TCommandHandler<C> + ?Sized> TCommandHandler<C> for Arc<H> {
	async fn handle(&self, command: C, bus: &ServiceBus) -> HandlerResult<C::Response> {
		(**self).handle(command, bus).await
	}
}

#[async_trait]
impl<E: TEvent, H: TEventHandler<E> + ?Sized> TEventHandler<E> for Arc<H> {
	async fn handle(&self, event: &E, bus: &ServiceBus) -> HandlerResult<()> {
		(**self).handle(event, bus).await
	}
}

pub type EventHandlerList<E> = Vec<Arc<dyn TEventHandler<E>>>;

/// Handlers of one event type and how they are run.
pub enum EventHandlers<E: TEvent> {
	/// One after another, in registration order.
	Sync(EventHandlerList<E>),
	/// All at once; joined before the publish returns.
	Async(EventHandlerList<E>),
}

impl<E: TEvent> Default for EventHandlers<E> {
	fn default() -> Self {
		Self::Sync(Vec::new())
	}
}

impl<E: TEvent> EventHandlers<E> {
	pub fn push(&mut self, handler: Arc<dyn TEventHandler<E>>) {
		match self {
			Self::Sync(h) => h.push(handler),
			Self::Async(h) => h.push(handler),
		}
	}

	pub fn extend(&mut self, handlers: EventHandlerList<E>) {
		match self {
			Self::Sync(h) => h.extend(handlers),
			Self::Async(h) => h.extend(handlers),
		}
	}

	pub fn into_concurrent(self) -> Self {
		match self {
			Self::Sync(h) | Self::Async(h) => Self::Async(h),
		}
	}

	pub fn handlers(&self) -> &[Arc<dyn TEventHandler<E>>] {
		match self {
			Self::Sync(h) | Self::Async(h) => h,
		}
	}

	pub fn len(&self) -> usize {
		self.handlers().len()
	}

	pub fn is_empty(&self) -> bool {
		self.handlers().is_empty()
	}

	pub fn is_concurrent(&self) -> bool {
		matches!(self, Self::Async(_))
	}
}
