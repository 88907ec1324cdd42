use log::trace;

use flotilla_serde::{BitCounter, BitReader, BitWrite, BitWriter, Serde};

use crate::{
    connection::{compression_config::CompressionConfig, decoder::Decoder, encoder::Encoder},
    messages::{
        data::MessageData, envelope::Envelope, error::CodecError, message_kind::MessageKind,
    },
};

/// Turns envelopes into transport bytes and back.
///
/// Wire layout: message kind (1 byte), send timestamp (8 bytes), then the
/// payload's fields in declared order, optionally wrapped in the compression
/// transform selected by [`CompressionConfig`].
pub struct Codec {
    encoder: Encoder,
    decoder: Decoder,
}

impl Codec {
    pub fn try_new(config: &CompressionConfig) -> Result<Self, CodecError> {
        Ok(Self {
            encoder: Encoder::try_new(config)?,
            decoder: Decoder::try_new(config)?,
        })
    }

    pub fn is_compressing(&self) -> bool {
        self.encoder.is_compressing()
    }

    /// Exact number of bytes [`Codec::serialize`] will produce for `envelope`.
    /// Transport buffers are sized from this value before writing.
    pub fn message_size(&mut self, envelope: &Envelope) -> Result<usize, CodecError> {
        if let Some(size) = envelope.cached_size() {
            return Ok(size);
        }

        let size = if self.is_compressing() {
            self.serialize(envelope)?.len()
        } else {
            raw_size(envelope)
        };

        envelope.cache_size(size);
        Ok(size)
    }

    pub fn serialize(&mut self, envelope: &Envelope) -> Result<Vec<u8>, CodecError> {
        // Uncompressed, the cached wire size is the raw size
        let capacity = match envelope.cached_size() {
            Some(size) if !self.is_compressing() => size,
            _ => raw_size(envelope),
        };
        let mut writer = BitWriter::with_capacity(capacity);
        write_envelope(envelope, &mut writer);

        let bytes = self.encoder.try_encode(writer.to_bytes())?;
        envelope.cache_size(bytes.len());
        Ok(bytes)
    }

    /// Reads an envelope back. Delivery class and channel are not part of the
    /// wire format, so the payload kind's defaults are restored.
    pub fn deserialize(&mut self, bytes: &[u8]) -> Result<Envelope, CodecError> {
        let decoded = self.decoder.try_decode(bytes)?;
        let mut reader = BitReader::new(&decoded);

        let kind_byte = reader
            .read_byte()
            .map_err(CodecError::malformed("header", decoded.len()))?;
        let kind = MessageKind::from_u8(kind_byte)
            .ok_or(CodecError::InvalidMessageKind { kind: kind_byte })?;
        let sent_time =
            i64::de(&mut reader).map_err(CodecError::malformed("header", decoded.len()))?;

        let data = MessageData::de_payload(kind, &mut reader)
            .map_err(CodecError::malformed("payload", decoded.len()))?;

        let trailing = reader.bytes_remaining();
        if trailing > 0 {
            return Err(CodecError::TrailingBytes {
                kind: data.name(),
                count: trailing,
            });
        }

        trace!("Decoded {} ({} bytes)", data.name(), bytes.len());

        let mut envelope = Envelope::new(data);
        envelope.set_sent_time(sent_time);
        Ok(envelope)
    }
}

fn raw_size(envelope: &Envelope) -> usize {
    let mut counter = BitCounter::new();
    write_envelope(envelope, &mut counter);
    counter.bytes_needed()
}

fn write_envelope(envelope: &Envelope, writer: &mut dyn BitWrite) {
    envelope.kind().ser(writer);
    envelope.sent_time().ser(writer);
    envelope.data().ser_payload(writer);
}
