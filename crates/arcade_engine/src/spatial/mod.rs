//! Spatial partitioning data structures
//!
//! Provides efficient spatial indexing for broad-phase collision detection
//! and proximity queries in 2D space.

pub mod spatial_query;
mod grid;

pub use spatial_query::SpatialQuery;
pub use grid::{CellRange, SpatialGrid, DEFAULT_CELL_SIZE};
