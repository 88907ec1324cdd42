use super::{compression_config::CompressionConfig, error::EncoderError};

cfg_if! {
    if #[cfg(feature = "zstd_support")]
    {
        use zstd::bulk::Compressor;

        use super::compression_config::CompressionMode;

        pub struct Encoder {
            compressor: Option<Compressor<'static>>,
        }

        impl Encoder {
            /// Try to create a new Encoder for the given compression settings
            pub fn try_new(config: &CompressionConfig) -> Result<Self, EncoderError> {
                if !config.enabled {
                    return Ok(Self { compressor: None });
                }

                let compressor = match &config.mode {
                    CompressionMode::Default(level) => Compressor::new(*level)
                        .map_err(|_| EncoderError::CompressorCreationFailed { level: *level })?,
                    CompressionMode::Dictionary(level, dictionary) => {
                        Compressor::with_dictionary(*level, dictionary).map_err(|_| {
                            EncoderError::CompressorWithDictionaryFailed { level: *level }
                        })?
                    }
                };

                Ok(Self {
                    compressor: Some(compressor),
                })
            }

            pub fn is_compressing(&self) -> bool {
                self.compressor.is_some()
            }

            /// Try to encode a payload, returning error on compression failure
            pub fn try_encode(&mut self, payload: Vec<u8>) -> Result<Vec<u8>, EncoderError> {
                match &mut self.compressor {
                    Some(compressor) => compressor
                        .compress(&payload)
                        .map_err(|_| EncoderError::CompressionFailed {
                            payload_size: payload.len(),
                        }),
                    None => Ok(payload),
                }
            }
        }
    }
    else
    {
        use log::warn;

        pub struct Encoder;

        impl Encoder {
            pub fn try_new(config: &CompressionConfig) -> Result<Self, EncoderError> {
                if config.enabled {
                    warn!("Compression requested but the `zstd_support` feature is disabled; payloads are sent uncompressed");
                }
                Ok(Self)
            }

            pub fn is_compressing(&self) -> bool {
                false
            }

            pub fn try_encode(&mut self, payload: Vec<u8>) -> Result<Vec<u8>, EncoderError> {
                Ok(payload)
            }
        }
    }
}
