use lagmesh_serde::Serde;

use crate::{
    mesh::payload::{node_payload::NodePayload, payload_kinds::PayloadKinds},
    transfer::compression_config::CompressionConfig,
};

pub mod error;
pub use error::ProtocolError;

/// The shared contract between every rank of a simulation: which payload
/// types may ride on a node record, and how migration byte images are
/// compressed.
///
/// The wire format carries no schema, so all ranks must build identical
/// protocols (same payloads, registered in the same order) and lock them
/// before the first exchange. Mutating a locked protocol is a programming
/// error and panics.
pub struct Protocol {
    pub payload_kinds: PayloadKinds,
    /// Configuration used to control compression parameters
    pub compression: Option<CompressionConfig>,
    locked: bool,
}

impl Default for Protocol {
    fn default() -> Self {
        Self {
            payload_kinds: PayloadKinds::new(),
            compression: None,
            locked: false,
        }
    }
}

impl Protocol {
    pub fn builder() -> Self {
        Self::default()
    }

    pub fn add_payload<P: NodePayload + Serde>(&mut self) -> &mut Self {
        self.check_lock();
        self.payload_kinds.add_payload::<P>();
        self
    }

    pub fn compression(&mut self, config: CompressionConfig) -> &mut Self {
        self.check_lock();
        self.compression = Some(config);
        self
    }

    pub fn lock(&mut self) {
        self.check_lock();
        self.locked = true;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Report, rather than panic on, use of an unlocked protocol.
    pub fn try_require_locked(&self, operation: &'static str) -> Result<(), ProtocolError> {
        if !self.locked {
            return Err(ProtocolError::NotLocked { operation });
        }
        Ok(())
    }

    fn check_lock(&self) {
        if self.locked {
            panic!("Protocol is already locked and cannot be modified");
        }
    }
}
