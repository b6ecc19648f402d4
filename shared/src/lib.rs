//! # Lagmesh Shared
//! Lagrangian marker indexing and the migration wire protocol, shared by
//! every rank of a lagmesh simulation.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

#[macro_use]
extern crate cfg_if;

pub use lagmesh_serde::{
    BitCounter, BitReader, BitWrite, BitWriter, Serde, SerdeErr, UnsignedVariableInteger,
};

mod key_generator;
mod mesh;
mod protocol;
mod transfer;
mod types;

pub use key_generator::KeyGenerator;
pub use mesh::{
    grid::{CellIndex, IntVector, RealVector},
    node::{
        error::NodeError,
        global_node::GlobalNodeId,
        local_slot::{LocalSlot, PositionRef},
        node_record::NodeRecord,
    },
    node_map::NodeMap,
    ordering::NodeOrdering,
    payload::{
        error::PayloadError,
        node_payload::NodePayload,
        payload_kinds::{PayloadKind, PayloadKinds},
    },
    position_store::PositionStore,
};
pub use protocol::{Protocol, ProtocolError};
pub use transfer::{
    compression_config::{CompressionConfig, CompressionMode},
    decoder::Decoder,
    encoder::Encoder,
    error::{DecoderError, EncoderError, TransferError},
    migration::MigrationBatch,
};
pub use types::PayloadNetId;
