use std::cmp::Ordering;

use super::{node::node_record::NodeRecord, position_store::PositionStore};

/// Deterministic physical ordering over node records.
///
/// Records compare by their dereferenced positions, lexicographically from
/// the last spatial dimension down to the first, so a sorted collection
/// visits nodes in column-major lattice order. The comparison never looks
/// at global ids or local slots, which makes it stable under renumbering:
/// any two ranks holding the same position snapshot traverse their nodes in
/// the same order.
///
/// The order is a snapshot property: moving any position invalidates a
/// previous sort, and call sites re-sort after position mutation.
pub struct NodeOrdering<'s, const D: usize> {
    store: &'s PositionStore<D>,
}

impl<'s, const D: usize> NodeOrdering<'s, D> {
    pub fn new(store: &'s PositionStore<D>) -> Self {
        Self { store }
    }

    /// Compare two records by physical location.
    ///
    /// # Panics
    /// Panics if either record has no bound position; ordering an unbound
    /// record is a use-before-bind defect
    pub fn cmp(&self, lhs: &NodeRecord<D>, rhs: &NodeRecord<D>) -> Ordering {
        let lhs_position = self.resolve(lhs);
        let rhs_position = self.resolve(rhs);

        for dim in (0..D).rev() {
            match lhs_position[dim].total_cmp(&rhs_position[dim]) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }

    pub fn sort(&self, records: &mut [NodeRecord<D>]) {
        records.sort_by(|lhs, rhs| self.cmp(lhs, rhs));
    }

    fn resolve(&self, record: &NodeRecord<D>) -> &'s [f64; D] {
        let Some(position_ref) = record.position() else {
            panic!(
                "Cannot order a node with no bound position (global id: {:?})",
                record.try_global_id().ok()
            );
        };
        self.store.resolve(position_ref)
    }
}
