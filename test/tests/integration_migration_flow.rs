/// End-to-end migration flow between two simulated ranks: stage departures,
/// produce a byte image, move it (with optional compression), unpack on the
/// receiver, bind into the local store, and re-sort.
use std::sync::Arc;

use lagmesh_shared::{
    CompressionConfig, CompressionMode, Decoder, Encoder, GlobalNodeId, IntVector, LocalSlot,
    MigrationBatch, NodeMap, NodeRecord, PositionStore, RealVector,
};

use lagmesh_test::helpers::{collect_batch, place_marker};
use lagmesh_test::test_protocol::{protocol, InertiaSpec};

#[test]
fn full_migration_binds_and_sorts_on_the_receiver() {
    let protocol = protocol();

    // rank A owns four markers
    let mut store_a = PositionStore::<2>::new();
    let mut map_a = NodeMap::<2>::new();
    let departing = [
        place_marker(&mut map_a, &mut store_a, 11, [1.0, 1.0]),
        place_marker(&mut map_a, &mut store_a, 12, [0.5, 0.0]),
        place_marker(&mut map_a, &mut store_a, 13, [0.0, 1.0]),
    ];
    place_marker(&mut map_a, &mut store_a, 14, [2.0, 2.0]);

    // stage the departures; their coordinates travel as a flat block
    let coordinates: Vec<f64> = departing
        .iter()
        .flat_map(|id| {
            let slot = map_a.get(id).unwrap().position().unwrap();
            store_a.resolve(slot).to_vec()
        })
        .collect();
    let batch = collect_batch(&mut map_a, &departing);
    let bytes = batch.to_bytes(&protocol.payload_kinds);

    assert_eq!(map_a.len(), 1);

    // rank B receives both transfers
    let mut store_b = PositionStore::<2>::from_flat(coordinates);
    let mut map_b = NodeMap::<2>::new();

    let records =
        MigrationBatch::<2>::read(&protocol.payload_kinds, &bytes, &IntVector::ZERO).unwrap();
    assert_eq!(records.len(), 3);

    // arrival order matches departure order, so slot i holds record i's
    // coordinates; insert then bind
    for (slot, record) in records.into_iter().enumerate() {
        let global_id = record.global_id();
        map_b.insert(record);
        map_b.bind(
            global_id,
            LocalSlot::new(slot as u32),
            lagmesh_shared::PositionRef::new(slot as u32),
        );
    }

    // deterministic traversal order on the receiver: column-major by
    // position, independent of arrival order or ids
    let sorted = map_b.sorted_ids(&store_b);
    assert_eq!(
        sorted,
        vec![
            GlobalNodeId::new(12),
            GlobalNodeId::new(13),
            GlobalNodeId::new(11),
        ]
    );

    // positions are live views: moving a marker invalidates the old order
    let moved = map_b.get(&GlobalNodeId::new(12)).unwrap().position().unwrap();
    store_b.resolve_mut(moved)[1] = 9.0;
    let resorted = map_b.sorted_ids(&store_b);
    assert_eq!(*resorted.last().unwrap(), GlobalNodeId::new(12));
}

#[test]
fn migration_preserves_payloads_and_periodic_state() {
    let protocol = protocol();

    let mut store_a = PositionStore::<2>::new();
    let mut map_a = NodeMap::<2>::new();
    let id = place_marker(&mut map_a, &mut store_a, 21, [7.75, 0.25]);

    {
        let record = map_a.get_mut(&id).unwrap();
        record.register_periodic_shift(IntVector::new([1, 0]), RealVector::new([8.0, 0.0]));
        record.add_payload(Arc::new(InertiaSpec {
            mass: 3.0,
            volume: 0.5,
        }));
    }

    let batch = collect_batch(&mut map_a, &[id]);
    let bytes = batch.to_bytes(&protocol.payload_kinds);

    // the receiving patch sits one fundamental cell to the left
    let records =
        MigrationBatch::<2>::read(&protocol.payload_kinds, &bytes, &IntVector::new([-1, 0]))
            .unwrap();
    let arrived = &records[0];

    assert_eq!(arrived.global_id(), GlobalNodeId::new(21));
    assert_eq!(arrived.periodic_offset(), &IntVector::ZERO);
    assert_eq!(arrived.payload::<InertiaSpec>().unwrap().mass, 3.0);
}

#[test]
fn byte_image_survives_encoder_decoder_pass() {
    let protocol = protocol();

    let mut batch = MigrationBatch::<2>::new();
    for id in 0..10u64 {
        batch.push(NodeRecord::new(GlobalNodeId::new(id)));
    }
    let bytes = batch.to_bytes(&protocol.payload_kinds);

    // without the zstd feature this is a passthrough; with it, a real
    // compress/decompress cycle
    let config = CompressionConfig::new(CompressionMode::Default(3));
    let mut encoder = Encoder::new(config.mode.clone());
    let mut decoder = Decoder::new(config.mode);

    let encoded = encoder.encode(&bytes).to_vec();
    let decoded = decoder.decode(&encoded).to_vec();

    let records =
        MigrationBatch::<2>::read(&protocol.payload_kinds, &decoded, &IntVector::ZERO).unwrap();
    assert_eq!(records.len(), 10);
    assert_eq!(records[4].global_id(), GlobalNodeId::new(4));
}
