/// Configuration used to control compression of migration byte images.
#[derive(Clone)]
pub struct CompressionConfig {
    pub mode: CompressionMode,
}

impl CompressionConfig {
    pub fn new(mode: CompressionMode) -> Self {
        Self { mode }
    }
}

#[derive(Clone)]
pub enum CompressionMode {
    /// Compression with the given zstd compression level. All ranks must
    /// agree on the mode, though not necessarily on the level.
    Default(i32),

    /// Compression with the given level and a shared pre-trained
    /// dictionary. Small batches compress far better against a dictionary
    /// trained on representative exchanges.
    Dictionary(i32, Vec<u8>),

    /// No compression yet: record the given number of sample batches for
    /// dictionary training. Byte images pass through unchanged.
    Training(usize),
}
