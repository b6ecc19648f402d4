use std::any::Any;

use lagmesh_serde::BitWrite;

use super::payload_kinds::PayloadKind;

/// The capability contract for auxiliary per-node data.
///
/// Anything attached to a node beyond its core indexing fields implements
/// this trait: it reports its own worst-case packed size, writes its body to
/// a bit stream, and exposes its runtime kind for typed lookup and wire
/// tagging. Reading a payload back is done through the builder registered
/// with [`PayloadKinds`](super::payload_kinds::PayloadKinds) for its kind;
/// the record never inspects concrete payload types beyond tag matching.
pub trait NodePayload: Send + Sync + 'static {
    /// The runtime kind of this payload. Implementations return
    /// `PayloadKind::of::<Self>()`.
    fn payload_kind(&self) -> PayloadKind;

    /// An upper bound on the number of bits [`ser`](NodePayload::ser) will
    /// write for the current value. Callers size buffers from this, so
    /// under-estimating is a fatal consistency fault; over-estimating only
    /// wastes buffer space.
    fn bit_length_upper_bound(&self) -> u32;

    /// Write this payload's body to the stream. The kind tag is written by
    /// the caller, not the payload.
    fn ser(&self, writer: &mut dyn BitWrite);

    fn as_any(&self) -> &dyn Any;
}
