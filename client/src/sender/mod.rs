mod dispatch_queue;
mod reset_signal;
mod sender_loop;

pub use dispatch_queue::{dispatch_queue, DispatchError, DispatchQueue, DispatchReceiver};
pub use reset_signal::ResetSignal;
pub use sender_loop::{SenderLoop, SenderReport};
