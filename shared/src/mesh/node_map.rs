use std::collections::HashMap;

use log::trace;

use super::{
    node::{
        global_node::GlobalNodeId,
        local_slot::{LocalSlot, PositionRef},
        node_record::NodeRecord,
    },
    ordering::NodeOrdering,
    position_store::PositionStore,
};

/// The set of node records currently owned by this rank, keyed by global id
/// with a reverse map from local slots.
///
/// A record enters the map when its marker is first placed here or arrives
/// from a peer, and leaves when the marker migrates away or is removed from
/// the simulation. Renumbering events rebind every record in one
/// [`rebind`](NodeMap::rebind) pass.
pub struct NodeMap<const D: usize> {
    records: HashMap<GlobalNodeId, NodeRecord<D>>,
    slot_to_global: HashMap<LocalSlot, GlobalNodeId>,
}

impl<const D: usize> NodeMap<D> {
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            slot_to_global: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, global_id: &GlobalNodeId) -> bool {
        self.records.contains_key(global_id)
    }

    /// Insert a record under its global id.
    ///
    /// # Panics
    /// Panics if the record has no global id, if that id is already
    /// present, or if the record's slot is already mapped to another node
    pub fn insert(&mut self, record: NodeRecord<D>) {
        let global_id = record.global_id();
        if self.records.contains_key(&global_id) {
            panic!("Cannot overwrite inserted global node id: {:?}", global_id);
        }
        if let Ok(local_slot) = record.try_local_slot() {
            if self.slot_to_global.contains_key(&local_slot) {
                panic!("Cannot overwrite occupied local slot: {:?}", local_slot);
            }
            self.slot_to_global.insert(local_slot, global_id);
        }
        self.records.insert(global_id, record);
    }

    pub fn remove(&mut self, global_id: &GlobalNodeId) -> Option<NodeRecord<D>> {
        let record = self.records.remove(global_id)?;
        if let Ok(local_slot) = record.try_local_slot() {
            self.slot_to_global.remove(&local_slot);
        }
        Some(record)
    }

    pub fn get(&self, global_id: &GlobalNodeId) -> Option<&NodeRecord<D>> {
        self.records.get(global_id)
    }

    /// Mutable access to a record. Slot changes must go through
    /// [`bind`](NodeMap::bind)/[`rebind`](NodeMap::rebind) so the reverse
    /// map stays consistent.
    pub fn get_mut(&mut self, global_id: &GlobalNodeId) -> Option<&mut NodeRecord<D>> {
        self.records.get_mut(global_id)
    }

    /// Bind one record into the local store.
    ///
    /// # Panics
    /// Panics if the id is unknown or the slot is already mapped to a
    /// different node
    pub fn bind(&mut self, global_id: GlobalNodeId, local_slot: LocalSlot, position: PositionRef) {
        if let Some(occupant) = self.slot_to_global.get(&local_slot) {
            if *occupant != global_id {
                panic!(
                    "Cannot bind {:?} to {:?}: slot is occupied by {:?}",
                    global_id, local_slot, occupant
                );
            }
        }
        let Some(record) = self.records.get_mut(&global_id) else {
            panic!("Cannot bind unknown global node id: {:?}", global_id);
        };
        if let Ok(previous_slot) = record.try_local_slot() {
            self.slot_to_global.remove(&previous_slot);
        }
        record.bind(local_slot, position);
        self.slot_to_global.insert(local_slot, global_id);
    }

    /// Rebind every record after a renumbering event. The supplied closure
    /// maps each global id to its new slot and position ref.
    pub fn rebind(&mut self, mut binding: impl FnMut(GlobalNodeId) -> (LocalSlot, PositionRef)) {
        self.slot_to_global.clear();
        for (global_id, record) in self.records.iter_mut() {
            let (local_slot, position) = binding(*global_id);
            record.bind(local_slot, position);
            self.slot_to_global.insert(local_slot, *global_id);
        }
        trace!("rebound {} node records", self.records.len());
    }

    pub fn slot_of(&self, global_id: &GlobalNodeId) -> Option<LocalSlot> {
        self.records
            .get(global_id)
            .and_then(|record| record.try_local_slot().ok())
    }

    pub fn global_at(&self, local_slot: &LocalSlot) -> Option<GlobalNodeId> {
        self.slot_to_global.get(local_slot).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GlobalNodeId, &NodeRecord<D>)> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&GlobalNodeId, &mut NodeRecord<D>)> {
        self.records.iter_mut()
    }

    /// Global ids in deterministic physical traversal order for the given
    /// position snapshot.
    pub fn sorted_ids(&self, store: &PositionStore<D>) -> Vec<GlobalNodeId> {
        let ordering = NodeOrdering::new(store);
        let mut entries: Vec<(&GlobalNodeId, &NodeRecord<D>)> = self.records.iter().collect();
        entries.sort_by(|lhs, rhs| ordering.cmp(lhs.1, rhs.1));
        entries.into_iter().map(|(global_id, _)| *global_id).collect()
    }
}

impl<const D: usize> Default for NodeMap<D> {
    fn default() -> Self {
        Self::new()
    }
}
