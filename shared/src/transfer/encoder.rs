cfg_if! {
    if #[cfg(feature = "zstd_support")]
    {
        use log::info;

        use zstd::{bulk::Compressor, dict::from_continuous};

        use super::compression_config::CompressionMode;
        use super::error::EncoderError;

        /// Compresses migration byte images before they are handed to the
        /// communication layer.
        pub struct Encoder {
            result: Vec<u8>,
            encoder: EncoderType,
        }

        impl Encoder {
            /// Try to create a new Encoder with the specified compression mode
            pub fn try_new(compression_mode: CompressionMode) -> Result<Self, EncoderError> {
                let encoder = match compression_mode {
                    CompressionMode::Training(sample_size) => {
                        EncoderType::DictionaryTrainer(DictionaryTrainer::new(sample_size))
                    }
                    CompressionMode::Default(compression_level) => EncoderType::Compressor(
                        Compressor::new(compression_level).map_err(|_| EncoderError::CompressorCreationFailed {
                            level: compression_level,
                        })?,
                    ),
                    CompressionMode::Dictionary(compression_level, dictionary) => EncoderType::Compressor(
                        Compressor::with_dictionary(compression_level, &dictionary)
                            .map_err(|_| EncoderError::CompressorWithDictionaryFailed {
                                level: compression_level,
                            })?,
                    ),
                };

                Ok(Self {
                    result: Vec::new(),
                    encoder,
                })
            }

            /// Create a new Encoder with the specified compression mode
            ///
            /// # Panics
            /// Panics if the compressor cannot be created with the given configuration
            pub fn new(compression_mode: CompressionMode) -> Self {
                Self::try_new(compression_mode).expect("Failed to create Encoder")
            }

            /// Try to encode a byte image, returning error on compression failure
            pub fn try_encode(&mut self, payload: &[u8]) -> Result<&[u8], EncoderError> {
                match &mut self.encoder {
                    EncoderType::DictionaryTrainer(trainer) => {
                        trainer.try_record_bytes(payload)?;
                        self.result = payload.to_vec();
                        Ok(&self.result)
                    }
                    EncoderType::Compressor(encoder) => {
                        self.result = encoder.compress(payload).map_err(|_| EncoderError::CompressionFailed {
                            payload_size: payload.len(),
                        })?;
                        Ok(&self.result)
                    }
                }
            }

            /// Encode a byte image
            ///
            /// # Panics
            /// Panics if compression fails
            pub fn encode(&mut self, payload: &[u8]) -> &[u8] {
                self.try_encode(payload).expect("Failed to encode payload")
            }

            /// The dictionary trained so far, if this encoder is in training
            /// mode and has seen enough samples. Persisting and distributing
            /// the dictionary to the other ranks is the caller's concern.
            pub fn trained_dictionary(&self) -> Option<&[u8]> {
                match &self.encoder {
                    EncoderType::DictionaryTrainer(trainer) => trainer.dictionary(),
                    EncoderType::Compressor(_) => None,
                }
            }
        }

        pub enum EncoderType {
            Compressor(Compressor<'static>),
            DictionaryTrainer(DictionaryTrainer),
        }

        pub struct DictionaryTrainer {
            sample_data: Vec<u8>,
            sample_sizes: Vec<usize>,
            target_sample_size: usize,
            dictionary: Option<Vec<u8>>,
        }

        impl DictionaryTrainer {
            /// `target_sample_size` is the number of sample batches to train
            /// on; more samples give better theoretical compression.
            pub fn new(target_sample_size: usize) -> Self {
                Self {
                    target_sample_size,
                    sample_data: Vec::new(),
                    sample_sizes: Vec::new(),
                    dictionary: None,
                }
            }

            /// Try to record bytes for dictionary training, returning error on failure
            pub fn try_record_bytes(&mut self, bytes: &[u8]) -> Result<(), EncoderError> {
                if self.dictionary.is_some() {
                    return Ok(());
                }

                self.sample_data.extend_from_slice(bytes);
                self.sample_sizes.push(bytes.len());

                if self.sample_sizes.len() >= self.target_sample_size {
                    info!(
                        "dictionary training complete: {} samples ({} bytes)",
                        self.sample_sizes.len(),
                        self.sample_data.len()
                    );

                    let target_dict_size = self.sample_data.len() / 100;
                    let dictionary =
                        from_continuous(&self.sample_data, &self.sample_sizes, target_dict_size)
                            .map_err(|_| EncoderError::DictionaryTrainingFailed {
                                sample_count: self.sample_sizes.len(),
                                total_bytes: self.sample_data.len(),
                            })?;

                    self.dictionary = Some(dictionary);
                    self.sample_data = Vec::new();
                    self.sample_sizes = Vec::new();
                }

                Ok(())
            }

            pub fn dictionary(&self) -> Option<&[u8]> {
                self.dictionary.as_deref()
            }
        }
    }
    else
    {
        use super::compression_config::CompressionMode;

        pub struct Encoder {
            result: Vec<u8>,
        }

        impl Encoder {
            pub fn new(_: CompressionMode) -> Self {
                Self {
                    result: Vec::new(),
                }
            }

            pub fn encode(&mut self, payload: &[u8]) -> &[u8] {
                self.result = payload.to_vec();
                &self.result
            }
        }
    }
}
