use std::fmt;
use std::sync::Arc;

use lagmesh_serde::{BitReader, BitWrite, Serde, SerdeErr, UnsignedVariableInteger};

use crate::mesh::{
    grid::{CellIndex, IntVector, RealVector},
    payload::{node_payload::NodePayload, payload_kinds::PayloadKinds},
    position_store::PositionStore,
};
use crate::types::PayloadNetId;

use super::{
    error::NodeError,
    global_node::GlobalNodeId,
    local_slot::{LocalSlot, PositionRef},
};

// payload counts are tiny (0-4 typical), so a 3-bit block varint keeps the
// common case to 4 bits on the wire
type PayloadCount = UnsignedVariableInteger<3>;

const PAYLOAD_TAG_BITS: u32 = (std::mem::size_of::<PayloadNetId>() as u32) * 8;

/// Indexing record for a single Lagrangian marker.
///
/// A record couples the marker's permanent global identity with the
/// rank-local slot it currently occupies in the distributed position
/// vector, a non-owning ref to its coordinates, the periodic-image
/// bookkeeping applied to its apparent location, and an open-ended list of
/// auxiliary payloads. Exactly one record exists per marker on the rank
/// that currently owns it; the record migrates (as bytes) whenever the
/// grid is repartitioned.
///
/// Cloning is a full value copy: payloads are ownership-shared, so a clone
/// bumps each payload's refcount rather than duplicating its contents.
#[derive(Clone)]
pub struct NodeRecord<const D: usize> {
    global_id: Option<GlobalNodeId>,
    local_slot: Option<LocalSlot>,
    position: Option<PositionRef>,
    periodic_offset: IntVector<D>,
    periodic_displacement: RealVector<D>,
    payloads: Vec<Arc<dyn NodePayload>>,
}

impl<const D: usize> NodeRecord<D> {
    /// A record with a global identity but no local binding yet.
    pub fn new(global_id: GlobalNodeId) -> Self {
        Self {
            global_id: Some(global_id),
            ..Self::default()
        }
    }

    /// A record already bound into this rank's position store.
    pub fn bound(global_id: GlobalNodeId, local_slot: LocalSlot, position: PositionRef) -> Self {
        Self {
            global_id: Some(global_id),
            local_slot: Some(local_slot),
            position: Some(position),
            ..Self::default()
        }
    }

    // Identity

    /// # Panics
    /// Panics if the global id is still unassigned
    pub fn global_id(&self) -> GlobalNodeId {
        match self.global_id {
            Some(global_id) => global_id,
            None => panic!("Global node id accessed before assignment"),
        }
    }

    pub fn try_global_id(&self) -> Result<GlobalNodeId, NodeError> {
        self.global_id.ok_or(NodeError::UnassignedGlobalId {
            context: "record has never been assigned an identity",
        })
    }

    pub fn set_global_id(&mut self, global_id: GlobalNodeId) {
        self.global_id = Some(global_id);
    }

    /// # Panics
    /// Panics if the local slot is unassigned (e.g. on a freshly unpacked
    /// record that has not been re-bound on this rank)
    pub fn local_slot(&self) -> LocalSlot {
        match self.local_slot {
            Some(local_slot) => local_slot,
            None => panic!("Local slot accessed while unassigned"),
        }
    }

    pub fn try_local_slot(&self) -> Result<LocalSlot, NodeError> {
        self.local_slot.ok_or(NodeError::UnassignedLocalSlot {
            context: "record is not bound on this rank",
        })
    }

    pub fn set_local_slot(&mut self, local_slot: LocalSlot) {
        self.local_slot = Some(local_slot);
    }

    // Position

    pub fn position(&self) -> Option<PositionRef> {
        self.position
    }

    pub fn set_position(&mut self, position: PositionRef) {
        self.position = Some(position);
    }

    /// This record's coordinates in `store`.
    ///
    /// # Panics
    /// Panics if no position is bound, or the bound ref is stale for this
    /// store
    pub fn position_in<'s>(&self, store: &'s PositionStore<D>) -> &'s [f64; D] {
        self.try_position_in(store)
            .unwrap_or_else(|error| panic!("{}", error))
    }

    pub fn try_position_in<'s>(
        &self,
        store: &'s PositionStore<D>,
    ) -> Result<&'s [f64; D], NodeError> {
        let position_ref = self.position.ok_or(NodeError::PositionUnbound {
            context: "record holds no position ref",
        })?;
        store
            .try_resolve(position_ref)
            .ok_or(NodeError::StalePositionRef {
                slot: position_ref.slot(),
                store_len: store.len(),
            })
    }

    /// Bind this record into the local position store. Called when a marker
    /// is first placed, and again after every renumbering event.
    pub fn bind(&mut self, local_slot: LocalSlot, position: PositionRef) {
        self.local_slot = Some(local_slot);
        self.position = Some(position);
    }

    /// Drop the local binding, e.g. when the record has been packed for
    /// migration or its store has been repacked.
    pub fn clear_local_binding(&mut self) {
        self.local_slot = None;
        self.position = None;
    }

    // Periodic bookkeeping

    /// Record that this node's canonical position has been reinterpreted as
    /// having crossed the domain boundary `offset` fundamental cells,
    /// producing the physical displacement `displacement`.
    ///
    /// Both fields are overwritten together: the shift replaces any prior
    /// shift rather than accumulating onto it, and there is deliberately no
    /// way to set one field without the other.
    pub fn register_periodic_shift(&mut self, offset: IntVector<D>, displacement: RealVector<D>) {
        self.periodic_offset = offset;
        self.periodic_displacement = displacement;
    }

    pub fn periodic_offset(&self) -> &IntVector<D> {
        &self.periodic_offset
    }

    pub fn periodic_displacement(&self) -> &RealVector<D> {
        &self.periodic_displacement
    }

    // Payloads

    pub fn payloads(&self) -> &[Arc<dyn NodePayload>] {
        &self.payloads
    }

    pub fn set_payloads(&mut self, payloads: Vec<Arc<dyn NodePayload>>) {
        self.payloads = payloads;
    }

    pub fn add_payload(&mut self, payload: Arc<dyn NodePayload>) {
        self.payloads.push(payload);
    }

    /// The first payload of type `P`, in insertion order.
    ///
    /// Multiple payloads of the same type may ride on one node; callers
    /// that want all of them use
    /// [`payloads_of`](NodeRecord::payloads_of). Returns `None` when no
    /// payload matches; a match is never guaranteed.
    pub fn payload<P: NodePayload>(&self) -> Option<&P> {
        self.payloads
            .iter()
            .find_map(|payload| payload.as_any().downcast_ref::<P>())
    }

    /// Every payload of type `P`, in insertion order.
    pub fn payloads_of<P: NodePayload>(&self) -> Vec<&P> {
        self.payloads
            .iter()
            .filter_map(|payload| payload.as_any().downcast_ref::<P>())
            .collect()
    }

    // Grid-fill support

    /// Copy all fields from `src` into this record.
    ///
    /// Used when merging source data from a neighboring region during fill
    /// operations; by convention the destination cell of the copied item is
    /// `src_index + src_offset`. The record itself carries no cell index, so
    /// the copy is a plain full value copy.
    pub fn copy_source_item(
        &mut self,
        _src_index: CellIndex<D>,
        _src_offset: IntVector<D>,
        src: &NodeRecord<D>,
    ) {
        *self = src.clone();
    }

    // Streaming

    /// A conservative upper bound on the bits [`pack`](NodeRecord::pack)
    /// will write. Callers pre-allocate from this, so it never
    /// under-estimates.
    pub fn bit_length_upper_bound(&self) -> u32 {
        let mut length = self.global_id.bit_length();
        length += self.local_slot.bit_length();
        length += self.periodic_offset.bit_length();
        length += self.periodic_displacement.bit_length();
        length += PayloadCount::new(self.payloads.len() as u64).bit_length();
        for payload in &self.payloads {
            length += PAYLOAD_TAG_BITS;
            length += payload.bit_length_upper_bound();
        }
        length
    }

    /// Pack this record for migration, in fixed field order: global id,
    /// local slot, periodic offset, periodic displacement, payload count,
    /// then each payload as tag + body.
    ///
    /// The position coordinates are NOT packed; position data is
    /// bulk-transferred through the [`PositionStore`](crate::PositionStore)
    /// surface, never through the per-record stream.
    ///
    /// # Panics
    /// Panics if a payload writes more bits than it advertised through
    /// [`NodePayload::bit_length_upper_bound`]. Continuing would overrun
    /// buffers sized from the advertised bound, so the pack aborts rather
    /// than truncate
    pub fn pack(&self, kinds: &PayloadKinds, writer: &mut dyn BitWrite) {
        self.global_id.ser(writer);
        self.local_slot.ser(writer);
        self.periodic_offset.ser(writer);
        self.periodic_displacement.ser(writer);

        PayloadCount::new(self.payloads.len() as u64).ser(writer);
        for payload in &self.payloads {
            kinds.write_tag(payload.as_ref(), writer);

            let advertised = payload.bit_length_upper_bound();
            let before = writer.bits_written();
            payload.ser(writer);
            let written = writer.bits_written() - before;
            if written > advertised {
                panic!(
                    "Payload advertised an upper bound of {} bits but wrote {}: aborting pack",
                    advertised, written
                );
            }
        }
    }

    /// Unpack a record that migrated in from another rank.
    ///
    /// `relocation` is the receiving side's cell-to-cell translation of the
    /// periodic image and is added into the freshly read periodic offset.
    /// This is the one place unpacking is not a plain copy: the periodic
    /// bookkeeping must be re-homed to this rank's frame of reference.
    ///
    /// The local slot and position ref come back unresolved regardless of
    /// what the sender had bound: the receiver binds them once the node is
    /// inserted into its own position store.
    pub fn unpack(
        kinds: &PayloadKinds,
        reader: &mut BitReader,
        relocation: &IntVector<D>,
    ) -> Result<Self, SerdeErr> {
        let global_id = Option::<GlobalNodeId>::de(reader)?;

        // the sender's slot number is meaningless on this rank
        let _sender_slot = Option::<LocalSlot>::de(reader)?;

        let mut periodic_offset = IntVector::<D>::de(reader)?;
        let periodic_displacement = RealVector::<D>::de(reader)?;
        periodic_offset += *relocation;

        let payload_count = PayloadCount::de(reader)?.get();
        let mut payloads = Vec::with_capacity(payload_count as usize);
        for _ in 0..payload_count {
            payloads.push(kinds.read(reader)?);
        }

        Ok(Self {
            global_id,
            local_slot: None,
            position: None,
            periodic_offset,
            periodic_displacement,
            payloads,
        })
    }
}

impl<const D: usize> Default for NodeRecord<D> {
    fn default() -> Self {
        Self {
            global_id: None,
            local_slot: None,
            position: None,
            periodic_offset: IntVector::ZERO,
            periodic_displacement: RealVector::ZERO,
            payloads: Vec::new(),
        }
    }
}

impl<const D: usize> fmt::Debug for NodeRecord<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRecord")
            .field("global_id", &self.global_id)
            .field("local_slot", &self.local_slot)
            .field("position", &self.position)
            .field("periodic_offset", &self.periodic_offset)
            .field("periodic_displacement", &self.periodic_displacement)
            .field("payloads", &self.payloads.len())
            .finish()
    }
}
