use lagmesh_serde::{BitReader, BitWrite, Serde, SerdeErr};

/// The permanent, process-independent identity of a Lagrangian marker.
///
/// Assigned once when the marker is first placed and stable across every
/// repartitioning; restart files and force-coupling maps refer to markers
/// by this id.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct GlobalNodeId(u64);

impl GlobalNodeId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for GlobalNodeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<GlobalNodeId> for u64 {
    fn from(id: GlobalNodeId) -> Self {
        id.0
    }
}

impl Serde for GlobalNodeId {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.0.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self(u64::de(reader)?))
    }

    fn bit_length(&self) -> u32 {
        self.0.bit_length()
    }
}
