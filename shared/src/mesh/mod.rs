pub mod grid;
pub mod node;
pub mod node_map;
pub mod ordering;
pub mod payload;
pub mod position_store;
