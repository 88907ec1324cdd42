use std::cell::Cell;

use crate::{
    messages::{data::MessageData, delivery::DeliveryClass, message_kind::MessageKind},
    types::ChannelIndex,
};

/// A typed payload plus the delivery parameters the transport needs.
///
/// Envelopes are single-use: the sender loop consumes them when they are
/// written to the transport. The exact byte size is computed lazily by the
/// [`Codec`](crate::Codec) and cached until the envelope is next stamped.
#[derive(Clone, Debug)]
pub struct Envelope {
    data: MessageData,
    delivery: DeliveryClass,
    channel: ChannelIndex,
    sent_time: i64,
    size: Cell<Option<usize>>,
}

impl Envelope {
    /// Wraps `data` with the delivery class and channel its kind uses by default
    pub fn new(data: MessageData) -> Self {
        let (delivery, channel) = data.default_delivery();
        Self {
            data,
            delivery,
            channel,
            sent_time: 0,
            size: Cell::new(None),
        }
    }

    pub fn with_delivery(mut self, delivery: DeliveryClass, channel: ChannelIndex) -> Self {
        self.delivery = delivery;
        self.channel = channel;
        self
    }

    pub fn data(&self) -> &MessageData {
        &self.data
    }

    pub fn into_data(self) -> MessageData {
        self.data
    }

    pub fn kind(&self) -> MessageKind {
        self.data.kind()
    }

    pub fn delivery(&self) -> DeliveryClass {
        self.delivery
    }

    pub fn channel(&self) -> ChannelIndex {
        self.channel
    }

    pub fn sent_time(&self) -> i64 {
        self.sent_time
    }

    pub fn is_master_server(&self) -> bool {
        self.kind().is_master_server()
    }

    /// Records the send time. Clock probes also carry it in their payload.
    pub fn stamp(&mut self, now_millis: i64) {
        self.sent_time = now_millis;
        if let MessageData::SyncTimeRequest(request) = &mut self.data {
            request.client_send_time = now_millis;
        }
        self.size.set(None);
    }

    pub(crate) fn set_sent_time(&mut self, sent_time: i64) {
        self.sent_time = sent_time;
    }

    pub(crate) fn cached_size(&self) -> Option<usize> {
        self.size.get()
    }

    pub(crate) fn cache_size(&self, size: usize) {
        self.size.set(Some(size));
    }
}

impl PartialEq for Envelope {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
            && self.delivery == other.delivery
            && self.channel == other.channel
            && self.sent_time == other.sent_time
    }
}
