use thiserror::Error;

use lagmesh_serde::SerdeErr;

/// Errors that can occur while compressing migration byte images
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
    #[error("Failed to compress byte image of {payload_size} bytes")]
    CompressionFailed {
        payload_size: usize,
    },

    /// Dictionary training failed
    #[error("Failed to train compression dictionary from {sample_count} samples ({total_bytes} bytes)")]
    DictionaryTrainingFailed {
        sample_count: usize,
        total_bytes: usize,
    },
}

/// Errors that can occur while decompressing received byte images
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecoderError {
    /// Failed to create decompressor
    #[error("Failed to create decompressor")]
    DecompressorCreationFailed,

    /// Failed to create decompressor with dictionary
    #[error("Failed to create decompressor with dictionary")]
    DecompressorWithDictionaryFailed,

    /// Failed to calculate upper bound for decompression
    #[error("Failed to calculate upper bound for byte image of {payload_size} bytes")]
    UpperBoundCalculationFailed {
        payload_size: usize,
    },

    /// Decompression operation failed on bytes received from another rank
    #[error("Failed to decompress byte image of {payload_size} bytes (possible malformed data)")]
    DecompressionFailed {
        payload_size: usize,
    },
}

/// General migration-transfer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// Encoder error
    #[error("Encoder error: {0}")]
    Encoder(#[from] EncoderError),

    /// Decoder error
    #[error("Decoder error: {0}")]
    Decoder(#[from] DecoderError),

    /// A received byte image could not be unpacked
    #[error("Stream error: {0}")]
    Stream(#[from] SerdeErr),
}
