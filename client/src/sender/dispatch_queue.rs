use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use thiserror::Error;

use flotilla_shared::Envelope;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The sender loop has exited and dropped the consuming end
    #[error("Dispatch queue is closed, the sender loop is no longer running")]
    Closed,
}

/// Creates the unbounded outgoing queue. The producer half can be cloned
/// freely; the receiver half belongs to the sender loop.
pub fn dispatch_queue() -> (DispatchQueue, DispatchReceiver) {
    let (sender, receiver) = mpsc::channel();
    (
        DispatchQueue { sender },
        DispatchReceiver { receiver },
    )
}

/// Producer handle for outgoing envelopes. Enqueueing never blocks.
#[derive(Clone)]
pub struct DispatchQueue {
    sender: Sender<Envelope>,
}

impl DispatchQueue {
    pub fn try_enqueue(&self, envelope: Envelope) -> Result<(), DispatchError> {
        self.sender.send(envelope).map_err(|_| DispatchError::Closed)
    }

    /// Panics if the sender loop has gone away. Use
    /// [`DispatchQueue::try_enqueue`] where that is expected.
    pub fn enqueue(&self, envelope: Envelope) {
        self.try_enqueue(envelope)
            .expect("dispatch queue closed while enqueueing");
    }
}

/// The single consumer of a [`DispatchQueue`].
pub struct DispatchReceiver {
    receiver: Receiver<Envelope>,
}

impl DispatchReceiver {
    /// Non-blocking. `None` when the queue is empty, or when every producer
    /// is gone and nothing is left.
    pub fn try_dequeue(&self) -> Option<Envelope> {
        match self.receiver.try_recv() {
            Ok(envelope) => Some(envelope),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}
