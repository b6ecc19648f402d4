use super::node::local_slot::PositionRef;

/// Rank-local contiguous storage for marker coordinates.
///
/// One slot holds `D` contiguous reals. The linear-algebra layer owns the
/// equivalent distributed vector; this store is its process-local coordinate
/// block. Node records hold only [`PositionRef`]s into it, so repacking or
/// renumbering the store invalidates every outstanding ref at once, and the
/// owning rank must rebind all of its records before using them again.
///
/// Position data migrates between ranks through this store's flat-slice
/// surface in bulk, never through the per-record wire protocol.
pub struct PositionStore<const D: usize> {
    data: Vec<f64>,
}

impl<const D: usize> PositionStore<D> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn with_capacity(slots: usize) -> Self {
        Self {
            data: Vec::with_capacity(slots * D),
        }
    }

    /// Rebuild a store from a bulk-transferred flat coordinate block.
    ///
    /// # Panics
    /// Panics if the block length is not a multiple of `D`
    pub fn from_flat(data: Vec<f64>) -> Self {
        if data.len() % D != 0 {
            panic!(
                "Flat coordinate block of length {} is not a whole number of {}-dimensional slots",
                data.len(),
                D
            );
        }
        Self { data }
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.data.len() / D
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Append a coordinate slot, returning the ref that resolves to it.
    pub fn allocate(&mut self, position: &[f64; D]) -> PositionRef {
        let slot = self.len() as u32;
        self.data.extend_from_slice(position);
        PositionRef::new(slot)
    }

    /// Drop every slot. All outstanding refs become stale.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn try_resolve(&self, position_ref: PositionRef) -> Option<&[f64; D]> {
        let start = position_ref.as_usize() * D;
        let slice = self.data.get(start..start + D)?;
        <&[f64; D]>::try_from(slice).ok()
    }

    /// Resolve a ref to its coordinates.
    ///
    /// # Panics
    /// Panics if the ref does not address an occupied slot. Resolving a
    /// stale or unbound ref is a use-before-bind defect, not a runtime
    /// condition
    pub fn resolve(&self, position_ref: PositionRef) -> &[f64; D] {
        self.try_resolve(position_ref).unwrap_or_else(|| {
            panic!(
                "Position ref {} is unbound: store holds {} slots",
                position_ref.slot(),
                self.len()
            )
        })
    }

    pub fn try_resolve_mut(&mut self, position_ref: PositionRef) -> Option<&mut [f64; D]> {
        let start = position_ref.as_usize() * D;
        let slice = self.data.get_mut(start..start + D)?;
        <&mut [f64; D]>::try_from(slice).ok()
    }

    /// Mutable variant of [`resolve`](PositionStore::resolve).
    ///
    /// # Panics
    /// Panics if the ref does not address an occupied slot
    pub fn resolve_mut(&mut self, position_ref: PositionRef) -> &mut [f64; D] {
        let len = self.len();
        self.try_resolve_mut(position_ref).unwrap_or_else(|| {
            panic!(
                "Position ref {} is unbound: store holds {} slots",
                position_ref.slot(),
                len
            )
        })
    }

    /// The flat coordinate block, for bulk transfer alongside a migration
    /// batch.
    pub fn as_flat(&self) -> &[f64] {
        &self.data
    }
}

impl<const D: usize> Default for PositionStore<D> {
    fn default() -> Self {
        Self::new()
    }
}
