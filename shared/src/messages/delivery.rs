/// How the transport should deliver an envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeliveryClass {
    /// May be dropped or arrive out of order
    BestEffort,
    /// Retransmitted until acknowledged, delivered in order within its channel
    ReliableOrdered,
}
