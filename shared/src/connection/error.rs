use thiserror::Error;

/// Errors that can occur while applying the outgoing compression transform
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncoderError {
    /// Failed to create compressor with the specified configuration
    #[error("Failed to create compressor with compression level {level}")]
    CompressorCreationFailed {
        level: i32,
    },

    /// Failed to create compressor with dictionary
    #[error("Failed to create compressor with dictionary (compression level {level})")]
    CompressorWithDictionaryFailed {
        level: i32,
    },

    /// Compression operation failed
    #[error("Failed to compress payload of {payload_size} bytes")]
    CompressionFailed {
        payload_size: usize,
    },
}

/// Errors that can occur while reversing the compression transform
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecoderError {
    /// Failed to create decompressor
    #[error("Failed to create decompressor")]
    DecompressorCreationFailed,

    /// Failed to create decompressor with dictionary
    #[error("Failed to create decompressor with dictionary")]
    DecompressorWithDictionaryFailed,

    /// The frame header does not declare a usable content size
    #[error("Unable to read the decompressed size of a {payload_size} byte payload")]
    ContentSizeUnavailable {
        payload_size: usize,
    },

    /// The frame declares more output than a single envelope may carry
    #[error("Payload declares {declared} decompressed bytes, above the {limit} byte limit")]
    ContentSizeTooLarge {
        declared: u64,
        limit: usize,
    },

    /// Decompression operation failed (SECURITY: potentially malicious payload)
    #[error("Failed to decompress payload of {payload_size} bytes (possible malformed or malicious data)")]
    DecompressionFailed {
        payload_size: usize,
    },
}
