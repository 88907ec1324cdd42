use super::{compression_config::CompressionConfig, error::DecoderError};

cfg_if! {
    if #[cfg(feature = "zstd_support")]
    {
        use zstd::{bulk::Decompressor, zstd_safe};

        use super::compression_config::CompressionMode;

        // A hostile frame must not be able to request an arbitrarily large
        // allocation.
        const MAX_OUTPUT_CAPACITY: usize = 8 * 1024 * 1024;

        pub struct Decoder {
            decompressor: Option<Decompressor<'static>>,
        }

        impl Decoder {
            /// Try to create a new Decoder for the given compression settings
            pub fn try_new(config: &CompressionConfig) -> Result<Self, DecoderError> {
                if !config.enabled {
                    return Ok(Self { decompressor: None });
                }

                let decompressor = match &config.mode {
                    CompressionMode::Default(_) => {
                        Decompressor::new().map_err(|_| DecoderError::DecompressorCreationFailed)?
                    }
                    CompressionMode::Dictionary(_, dictionary) => {
                        Decompressor::with_dictionary(dictionary)
                            .map_err(|_| DecoderError::DecompressorWithDictionaryFailed)?
                    }
                };

                Ok(Self {
                    decompressor: Some(decompressor),
                })
            }

            /// Try to decode a payload, returning error on decompression failure
            ///
            /// SECURITY: This method processes untrusted network data. Any malformed or
            /// malicious payload will return an error instead of panicking.
            pub fn try_decode(&mut self, payload: &[u8]) -> Result<Vec<u8>, DecoderError> {
                let Some(decompressor) = &mut self.decompressor else {
                    return Ok(payload.to_vec());
                };

                let capacity = output_capacity(payload)?;

                decompressor
                    .decompress(payload, capacity)
                    .map_err(|_| DecoderError::DecompressionFailed {
                        payload_size: payload.len(),
                    })
            }
        }

        // Frames produced by the encoder always declare their content size,
        // so the output buffer is sized exactly from the frame header.
        fn output_capacity(payload: &[u8]) -> Result<usize, DecoderError> {
            let declared = zstd_safe::get_frame_content_size(payload)
                .map_err(|_| DecoderError::ContentSizeUnavailable {
                    payload_size: payload.len(),
                })?
                .ok_or(DecoderError::ContentSizeUnavailable {
                    payload_size: payload.len(),
                })?;

            match usize::try_from(declared) {
                Ok(size) if size <= MAX_OUTPUT_CAPACITY => Ok(size),
                _ => Err(DecoderError::ContentSizeTooLarge {
                    declared,
                    limit: MAX_OUTPUT_CAPACITY,
                }),
            }
        }
    }
    else
    {
        pub struct Decoder;

        impl Decoder {
            pub fn try_new(_: &CompressionConfig) -> Result<Self, DecoderError> {
                Ok(Self)
            }

            pub fn try_decode(&mut self, payload: &[u8]) -> Result<Vec<u8>, DecoderError> {
                Ok(payload.to_vec())
            }
        }
    }
}
