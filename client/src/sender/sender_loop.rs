use std::{
    io,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use log::{debug, info, warn};

use flotilla_shared::{Codec, Envelope, Timestamp};

use crate::{
    connection::{ConnectionGateway, SendOutcome},
    sender::{dispatch_queue::DispatchReceiver, reset_signal::ResetSignal},
};

/// Counters returned when the sender loop exits
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SenderReport {
    /// Envelopes written to the transport, connected or unconnected
    pub sent: u64,
    /// Envelopes dropped because of a codec failure or missing connection
    pub dropped: u64,
    /// Wire bytes of the envelopes counted in `sent`
    pub bytes_sent: u64,
    /// Transport failures routed to the disconnect classifier
    pub transport_errors: u64,
    /// Dequeue attempts that found the queue empty
    pub idle_checks: u64,
    /// Shortest gap observed between two consecutive empty dequeues
    pub min_idle_gap: Option<Duration>,
}

/// The only consumer of the dispatch queue. Drains it in order onto the
/// gateway and sleeps for `idle_interval` whenever it is empty.
pub struct SenderLoop {
    receiver: DispatchReceiver,
    gateway: ConnectionGateway,
    codec: Codec,
    reset: ResetSignal,
    idle_interval: Duration,
    report: SenderReport,
    last_idle_check: Option<Instant>,
}

impl SenderLoop {
    pub fn new(
        receiver: DispatchReceiver,
        gateway: ConnectionGateway,
        codec: Codec,
        reset: ResetSignal,
        idle_interval: Duration,
    ) -> Self {
        Self {
            receiver,
            gateway,
            codec,
            reset,
            idle_interval,
            report: SenderReport::default(),
            last_idle_check: None,
        }
    }

    /// Moves the loop onto its own thread
    pub fn spawn(self) -> io::Result<JoinHandle<SenderReport>> {
        thread::Builder::new()
            .name(String::from("flotilla-sender"))
            .spawn(move || self.run())
    }

    pub fn run(mut self) -> SenderReport {
        info!("Sender loop started");
        while !self.reset.is_requested() {
            if !self.step() {
                thread::sleep(self.idle_interval);
            }
        }
        info!(
            "Sender loop stopped after sending {} envelopes",
            self.report.sent
        );
        self.report
    }

    /// Dispatches at most one envelope. Returns false when the queue was empty.
    pub fn step(&mut self) -> bool {
        match self.receiver.try_dequeue() {
            Some(envelope) => {
                self.last_idle_check = None;
                self.dispatch(envelope);
                true
            }
            None => {
                self.record_idle_check();
                false
            }
        }
    }

    pub fn report(&self) -> &SenderReport {
        &self.report
    }

    fn dispatch(&mut self, mut envelope: Envelope) {
        let now = match Timestamp::try_now_millis() {
            Ok(now) => now,
            Err(err) => {
                warn!("Unable to read the clock, sending unstamped: {}", err);
                0
            }
        };
        envelope.stamp(now);

        let size = match self.codec.message_size(&envelope) {
            Ok(size) => size,
            Err(err) => {
                warn!("Dropping {:?} envelope: {}", envelope.kind(), err);
                self.report.dropped += 1;
                return;
            }
        };
        let bytes = match self.codec.serialize(&envelope) {
            Ok(bytes) if bytes.len() == size => bytes,
            Ok(bytes) => {
                warn!(
                    "Dropping {:?} envelope: sized at {} bytes but wrote {}",
                    envelope.kind(),
                    size,
                    bytes.len()
                );
                self.report.dropped += 1;
                return;
            }
            Err(err) => {
                warn!("Dropping {:?} envelope: {}", envelope.kind(), err);
                self.report.dropped += 1;
                return;
            }
        };

        match self.gateway.send(&envelope, &bytes) {
            Ok(SendOutcome::Dropped) => self.report.dropped += 1,
            Ok(outcome) => {
                debug!("{:?} {:?} ({} bytes)", outcome, envelope.kind(), size);
                self.report.sent += 1;
                self.report.bytes_sent += size as u64;
            }
            Err(err) => {
                self.report.transport_errors += 1;
                self.gateway.handle_transport_error(&err);
                return;
            }
        }

        if let Err(err) = self.gateway.flush() {
            self.report.transport_errors += 1;
            self.gateway.handle_transport_error(&err);
        }
    }

    fn record_idle_check(&mut self) {
        let now = Instant::now();
        if let Some(previous) = self.last_idle_check {
            let gap = now.duration_since(previous);
            self.report.min_idle_gap = Some(match self.report.min_idle_gap {
                Some(min) => min.min(gap),
                None => gap,
            });
        }
        self.last_idle_check = Some(now);
        self.report.idle_checks += 1;
    }
}
