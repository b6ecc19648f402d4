use lagmesh_serde::{BitReader, BitWrite, Serde, SerdeErr};

/// An index into the current rank's block of the distributed position
/// vector.
///
/// Valid only on the owning rank, and only until the next renumbering
/// event; it never travels across ranks as a meaningful value.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct LocalSlot(u32);

impl LocalSlot {
    pub fn new(slot: u32) -> Self {
        Self(slot)
    }

    pub fn to_u32(&self) -> u32 {
        self.0
    }

    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl Serde for LocalSlot {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.0.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self(u32::de(reader)?))
    }

    fn bit_length(&self) -> u32 {
        self.0.bit_length()
    }
}

/// A non-owning reference to one slot of a
/// [`PositionStore`](crate::PositionStore).
///
/// The store owns and resizes the coordinate memory; a ref is just the slot
/// number, so repacking the store invalidates every outstanding ref in one
/// sweep instead of leaving dangling pointers behind.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct PositionRef(u32);

impl PositionRef {
    pub fn new(slot: u32) -> Self {
        Self(slot)
    }

    pub fn slot(&self) -> u32 {
        self.0
    }

    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}
