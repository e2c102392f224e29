use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

/// Identifies a scheduled task so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

/// Delayed delivery of events back into a single driving task.
///
/// Each scheduled event is a `tokio` task that sleeps and then posts the
/// event into a channel. The owner pulls events with [`Scheduler::next`] and
/// applies them itself, so all state changes stay on one task.
pub struct Scheduler<E> {
    sender: mpsc::UnboundedSender<(TaskHandle, E)>,
    receiver: mpsc::UnboundedReceiver<(TaskHandle, E)>,
    pending: HashMap<TaskHandle, JoinHandle<()>>,
    next_id: u64,
}

impl<E: Send + 'static> Scheduler<E> {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender,
            receiver,
            pending: HashMap::new(),
            next_id: 0,
        }
    }

    /// Delivers `event` after `delay`.
    pub fn schedule(&mut self, delay: Duration, event: E) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;

        let sender = self.sender.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver lives as long as the scheduler.
            let _ = sender.send((handle, event));
        });
        self.pending.insert(handle, task);
        trace!(task = handle.0, delay_ms = delay.as_millis() as u64, "scheduled");
        handle
    }

    /// Cancels a task that has not been delivered yet.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        match self.pending.remove(&handle) {
            Some(task) => {
                task.abort();
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, task) in self.pending.drain() {
            task.abort();
        }
    }

    /// Number of scheduled events not yet handed out by [`Scheduler::next`].
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Waits for the next due event; `None` once nothing is pending.
    ///
    /// Cancel-safe: a cancelled `next` loses no event.
    pub async fn next(&mut self) -> Option<E> {
        loop {
            if self.pending.is_empty() {
                return None;
            }
            let (handle, event) = self.receiver.recv().await?;
            // Skip events from tasks cancelled after they already fired.
            if self.pending.remove(&handle).is_some() {
                return Some(event);
            }
        }
    }
}

impl<E: Send + 'static> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Drop for Scheduler<E> {
    fn drop(&mut self) {
        for (_, task) in self.pending.drain() {
            task.abort();
        }
    }
}
