/// PROPERTY-BASED TESTS: wire-protocol and ordering invariants
///
/// Uses proptest to verify migration properties hold across random inputs.
///
/// Key invariants:
/// 1. Pack/unpack with a zero relocation is lossless (position excluded)
/// 2. Unpacking with relocation o2 after packing offset o1 stores o1 + o2
/// 3. Pack never writes more bits than the advertised upper bound
/// 4. The physical ordering is a strict total order over distinct positions
use std::sync::Arc;

use proptest::prelude::*;

use lagmesh_serde::{BitReader, BitWriter};
use lagmesh_shared::{
    GlobalNodeId, IntVector, LocalSlot, NodeOrdering, NodeRecord, PositionStore, RealVector,
};

use lagmesh_test::test_protocol::{protocol, InertiaSpec, SpringForceSpec};

fn offset_strategy() -> impl Strategy<Value = IntVector<2>> {
    (-8i32..8, -8i32..8).prop_map(|(x, y)| IntVector::new([x, y]))
}

fn displacement_strategy() -> impl Strategy<Value = RealVector<2>> {
    (-1.0e3f64..1.0e3, -1.0e3f64..1.0e3).prop_map(|(x, y)| RealVector::new([x, y]))
}

fn record_strategy() -> impl Strategy<Value = NodeRecord<2>> {
    (
        1u64..100_000,
        proptest::option::of(0u32..512),
        offset_strategy(),
        displacement_strategy(),
        proptest::option::of((1u64..100_000, 0.0f64..1.0e4)),
        proptest::option::of((0.0f64..1.0e2, 0.0f64..1.0e1)),
    )
        .prop_map(|(id, slot, offset, displacement, spring, inertia)| {
            let mut record = NodeRecord::<2>::new(GlobalNodeId::new(id));
            if let Some(slot) = slot {
                record.bind(
                    LocalSlot::new(slot),
                    lagmesh_shared::PositionRef::new(slot),
                );
            }
            record.register_periodic_shift(offset, displacement);
            if let Some((peer, stiffness)) = spring {
                record.add_payload(Arc::new(SpringForceSpec {
                    peer: GlobalNodeId::new(peer),
                    stiffness,
                    damping: stiffness / 100.0,
                    rest_length: 0.5,
                }));
            }
            if let Some((mass, volume)) = inertia {
                record.add_payload(Arc::new(InertiaSpec { mass, volume }));
            }
            record
        })
}

fn pack_to_bytes(record: &NodeRecord<2>) -> Vec<u8> {
    let protocol = protocol();
    let mut writer = BitWriter::new();
    record.pack(&protocol.payload_kinds, &mut writer);
    writer.to_bytes()
}

proptest! {
    /// Round-trip with zero relocation reproduces every transmitted field.
    #[test]
    fn prop_round_trip_is_lossless(record in record_strategy()) {
        let protocol = protocol();
        let bytes = pack_to_bytes(&record);

        let mut reader = BitReader::new(&bytes);
        let unpacked =
            NodeRecord::<2>::unpack(&protocol.payload_kinds, &mut reader, &IntVector::ZERO)
                .unwrap();

        prop_assert_eq!(unpacked.global_id(), record.global_id());
        prop_assert_eq!(unpacked.periodic_offset(), record.periodic_offset());
        prop_assert_eq!(
            unpacked.periodic_displacement(),
            record.periodic_displacement()
        );
        prop_assert_eq!(unpacked.payloads().len(), record.payloads().len());

        let sent_springs = record.payloads_of::<SpringForceSpec>();
        let received_springs = unpacked.payloads_of::<SpringForceSpec>();
        prop_assert_eq!(sent_springs.len(), received_springs.len());
        for (sent, received) in sent_springs.iter().zip(received_springs.iter()) {
            prop_assert_eq!(sent, received);
        }

        // the local slot never survives a migration
        prop_assert!(unpacked.try_local_slot().is_err());
    }

    /// Relocation is additive: offset o1 packed, relocation o2 on unpack,
    /// stored offset is o1 + o2.
    #[test]
    fn prop_relocation_is_additive(
        record in record_strategy(),
        relocation in offset_strategy(),
    ) {
        let protocol = protocol();
        let original_offset = *record.periodic_offset();
        let bytes = pack_to_bytes(&record);

        let mut reader = BitReader::new(&bytes);
        let unpacked =
            NodeRecord::<2>::unpack(&protocol.payload_kinds, &mut reader, &relocation).unwrap();

        prop_assert_eq!(*unpacked.periodic_offset(), original_offset + relocation);
    }

    /// Pack stays within the advertised upper bound for every payload mix.
    #[test]
    fn prop_pack_stays_within_upper_bound(record in record_strategy()) {
        let protocol = protocol();
        let bound = record.bit_length_upper_bound();

        let mut writer = BitWriter::new();
        record.pack(&protocol.payload_kinds, &mut writer);

        prop_assert!(writer.bits_written() <= bound);
    }

    /// Sorting by the physical ordering is a strict total order on distinct
    /// positions and visits them in column-major (last dimension first)
    /// lattice order.
    #[test]
    fn prop_ordering_is_strict_and_column_major(
        positions in proptest::collection::hash_set(
            (-100i32..100, -100i32..100),
            2..16,
        )
    ) {
        let mut store = PositionStore::<2>::new();
        let mut records: Vec<NodeRecord<2>> = positions
            .iter()
            .enumerate()
            .map(|(id, &(x, y))| {
                let position_ref = store.allocate(&[x as f64, y as f64]);
                NodeRecord::bound(
                    GlobalNodeId::new(id as u64),
                    LocalSlot::new(position_ref.slot()),
                    position_ref,
                )
            })
            .collect();

        let ordering = NodeOrdering::new(&store);
        ordering.sort(&mut records);

        for pair in records.windows(2) {
            let lhs = store.resolve(pair[0].position().unwrap());
            let rhs = store.resolve(pair[1].position().unwrap());

            // strictly increasing by (y, x): no equals, no inversions
            prop_assert!((lhs[1], lhs[0]) < (rhs[1], rhs[0]));
            prop_assert_eq!(
                ordering.cmp(&pair[0], &pair[1]),
                std::cmp::Ordering::Less
            );
            prop_assert_eq!(
                ordering.cmp(&pair[1], &pair[0]),
                std::cmp::Ordering::Greater
            );
        }

        for record in &records {
            prop_assert_eq!(
                ordering.cmp(record, record),
                std::cmp::Ordering::Equal
            );
        }
    }
}
