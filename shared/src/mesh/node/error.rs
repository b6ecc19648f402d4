use thiserror::Error as ThisError;

/// Errors raised when node-index state is read before it has been bound.
///
/// Every variant signals a caller contract violation (use-before-bind or
/// use-after-migration), not a steady-state runtime condition.
#[derive(Debug, Clone, ThisError, PartialEq, Eq)]
pub enum NodeError {
    /// Global id read while still unassigned
    #[error("Global node id is unassigned: {context}")]
    UnassignedGlobalId {
        context: &'static str,
    },

    /// Local slot read while still unassigned (e.g. freshly unpacked)
    #[error("Local slot is unassigned: {context}")]
    UnassignedLocalSlot {
        context: &'static str,
    },

    /// Position accessed with no bound position ref
    #[error("Node position is unbound: {context}")]
    PositionUnbound {
        context: &'static str,
    },

    /// A position ref pointed outside the store it was resolved against
    #[error("Position ref {slot} is stale: store holds {store_len} slots")]
    StalePositionRef {
        slot: u32,
        store_len: usize,
    },
}
