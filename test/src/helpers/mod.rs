use lagmesh_shared::{
    GlobalNodeId, LocalSlot, MigrationBatch, NodeMap, NodeRecord, PositionStore,
};

/// Place a new marker on a "rank": allocate its coordinates, build a bound
/// record, and insert it into the rank's node map.
pub fn place_marker(
    map: &mut NodeMap<2>,
    store: &mut PositionStore<2>,
    id: u64,
    position: [f64; 2],
) -> GlobalNodeId {
    let global_id = GlobalNodeId::new(id);
    let position_ref = store.allocate(&position);
    map.insert(NodeRecord::bound(
        global_id,
        LocalSlot::new(position_ref.slot()),
        position_ref,
    ));
    global_id
}

/// Pull the given markers out of a rank's map into a migration batch, the
/// way the grid layer stages departures during a repartition.
pub fn collect_batch(map: &mut NodeMap<2>, ids: &[GlobalNodeId]) -> MigrationBatch<2> {
    let mut batch = MigrationBatch::new();
    for id in ids {
        let record = map
            .remove(id)
            .unwrap_or_else(|| panic!("marker {:?} is not owned by this rank", id));
        batch.push(record);
    }
    batch
}
