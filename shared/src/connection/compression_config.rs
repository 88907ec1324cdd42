/// Whether envelopes are wrapped in a compression transform. Both ends must
/// agree on this out-of-band; nothing on the wire says whether a given
/// payload was compressed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompressionConfig {
    pub enabled: bool,
    pub mode: CompressionMode,
}

impl CompressionConfig {
    pub fn new(enabled: bool, mode: CompressionMode) -> Self {
        Self { enabled, mode }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            mode: CompressionMode::default(),
        }
    }
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self::disabled()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompressionMode {
    /// Compression level, between -7 and 22
    Default(i32),
    /// Compression level plus a dictionary trained ahead of time on
    /// representative vessel definitions
    Dictionary(i32, Vec<u8>),
}

impl Default for CompressionMode {
    fn default() -> Self {
        CompressionMode::Default(3)
    }
}
