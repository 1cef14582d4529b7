use super::handler::TEventHandler;
use super::messagebus::ServiceBus;
use crate::events::{EnqueueWorkEvent, EnqueueWorksEvent};
use crate::make_smart_pointer;
use crate::message::TWork;
use crate::notification::SystemError;
use crate::responses::HandlerResult;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;

pub const WORK_QUEUE_CLOSED: &str = "WORK_QUEUE_CLOSED";

/// In-process listener of the enqueue envelopes.
///
/// Unwraps them and hands every work item to the paired [`WorkReceiver`].
/// Whoever drains the receiver runs the work with [`ServiceBus::execute_deferred`].
#[derive(Clone)]
pub struct WorkQueue {
	sender: mpsc::UnboundedSender<Arc<dyn TWork>>,
}

pub struct WorkReceiver(mpsc::UnboundedReceiver<Arc<dyn TWork>>);
make_smart_pointer!(WorkReceiver, mpsc::UnboundedReceiver<Arc<dyn TWork>>);

impl WorkQueue {
	pub fn channel() -> (WorkQueue, WorkReceiver) {
		let (sender, receiver) = mpsc::unbounded_channel();
		(WorkQueue { sender }, WorkReceiver(receiver))
	}

	async fn forward(&self, work: Arc<dyn TWork>, bus: &ServiceBus) -> HandlerResult<()> {
		tracing::debug!(work = work.work_name(), id = %work.work_id(), "handing off deferred work");
		if let Err(err) = self.sender.send(work) {
			crate::backtrace_error!(%err, "deferred work receiver is gone");
			bus.publish_event(SystemError::from_error(&err).with_code(WORK_QUEUE_CLOSED)).await?;
		}
		Ok(())
	}
}

impl WorkReceiver {
	/// Everything queued so far, without waiting.
	pub fn drain(&mut self) -> Vec<Arc<dyn TWork>> {
		let mut works = Vec::new();
		while let Ok(work) = self.0.try_recv() {
			works.push(work);
		}
		works
	}
}

#[async_trait]
impl TEventHandler<EnqueueWorkEvent> for WorkQueue {
	async fn handle(&self, event: &EnqueueWorkEvent, bus: &ServiceBus) -> HandlerResult<()> {
		if !bus.validate_work(event).await? {
			return Ok(());
		}
		if let Some(work) = event.work() {
			self.forward(work.clone(), bus).await?;
		}
		Ok(())
	}
}

#[async_trait]
impl TEventHandler<EnqueueWorksEvent> for WorkQueue {
	async fn handle(&self, event: &EnqueueWorksEvent, bus: &ServiceBus) -> HandlerResult<()> {
		if !bus.validate_work(event).await? {
			return Ok(());
		}
		for work in event.works() {
			self.forward(work.clone(), bus).await?;
		}
		Ok(())
	}
}
