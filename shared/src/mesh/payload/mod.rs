pub mod error;
pub mod node_payload;
pub mod payload_kinds;
