use log::{trace, warn};

use lagmesh_serde::{BitReader, BitWriter, Serde, SerdeErr, UnsignedVariableInteger};

use crate::mesh::{
    grid::IntVector, node::node_record::NodeRecord, payload::payload_kinds::PayloadKinds,
};

// batch sizes vary from a handful of stragglers to whole-patch moves, so a
// 7-bit block varint covers both cheaply
type RecordCount = UnsignedVariableInteger<7>;

/// One exchange's worth of node records leaving this rank for a single
/// destination.
///
/// The write side collects records and produces a byte image; the read side
/// turns a received image back into records, applying the destination's
/// relocation offset to every record in the batch (all records in one
/// ghost-region exchange share the same cell translation). Moving the bytes
/// between ranks (and bulk-moving the corresponding position data) is the
/// communication layer's concern.
pub struct MigrationBatch<const D: usize> {
    records: Vec<NodeRecord<D>>,
}

impl<const D: usize> MigrationBatch<D> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: NodeRecord<D>) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[NodeRecord<D>] {
        &self.records
    }

    /// A conservative upper bound on the bits the byte image will hold.
    pub fn bit_length_upper_bound(&self) -> u32 {
        let mut length = RecordCount::new(self.records.len() as u64).bit_length();
        for record in &self.records {
            length += record.bit_length_upper_bound();
        }
        length
    }

    /// Produce the wire image: record count, then each packed record.
    pub fn to_bytes(&self, kinds: &PayloadKinds) -> Vec<u8> {
        let capacity = (self.bit_length_upper_bound() as usize).div_ceil(8);
        let mut writer = BitWriter::with_capacity(capacity);

        RecordCount::new(self.records.len() as u64).ser(&mut writer);
        for record in &self.records {
            record.pack(kinds, &mut writer);
        }

        trace!(
            "packed migration batch: {} records, {} bits",
            self.records.len(),
            writer.bits_written()
        );
        writer.to_bytes()
    }

    /// Read a received byte image back into records.
    ///
    /// Every record's periodic offset is re-homed by `relocation`; local
    /// slots and position refs come back unresolved and are bound by the
    /// receiver once the records are inserted into its local collection.
    pub fn read(
        kinds: &PayloadKinds,
        bytes: &[u8],
        relocation: &IntVector<D>,
    ) -> Result<Vec<NodeRecord<D>>, SerdeErr> {
        let mut reader = BitReader::new(bytes);

        let record_count = RecordCount::de(&mut reader)?.get();
        if record_count == 0 {
            warn!("unpacked an empty migration batch");
        }

        let mut records = Vec::with_capacity(record_count as usize);
        for _ in 0..record_count {
            records.push(NodeRecord::unpack(kinds, &mut reader, relocation)?);
        }

        trace!("unpacked migration batch: {} records", records.len());
        Ok(records)
    }
}

impl<const D: usize> Default for MigrationBatch<D> {
    fn default() -> Self {
        Self::new()
    }
}
