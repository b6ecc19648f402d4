use thiserror::Error as ThisError;

/// Errors that can occur during payload registration and wire-tag lookup
#[derive(Debug, Clone, ThisError, PartialEq, Eq)]
pub enum PayloadError {
    /// Payload type was never registered with the Protocol
    #[error("Payload not registered with Protocol. Must call `add_payload()` during protocol initialization. Payload: {payload_name}")]
    PayloadNotRegistered {
        payload_name: &'static str,
    },

    /// A wire tag did not match any registered payload type
    #[error("Payload net ID {net_id} not found in registry. Both sides of a migration must register the same payloads in the same order")]
    NetIdNotFound {
        net_id: u16,
    },

    /// Payload kind was not found in the registry
    #[error("Payload kind not found in registry. Must properly initialize Payload with Protocol via `add_payload()` function")]
    KindNotFound,

    /// Payload type registered twice
    #[error("Payload already registered with Protocol: {payload_name}")]
    DuplicateRegistration {
        payload_name: &'static str,
    },
}
