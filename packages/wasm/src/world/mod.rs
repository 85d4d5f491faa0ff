//! Graph world snapshots, their owner, and the random generator.

mod entities;
mod generator;
mod store;

pub use entities::GraphWorldEntities;
pub use generator::{DEFAULT_EDGE_PROBABILITY, EdgePolicy, RandomGraphConfig};
pub use store::{EntityStore, GraphWorld};
