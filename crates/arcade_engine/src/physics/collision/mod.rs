//! Narrow-phase collision geometry
//!
//! # Architecture
//!
//! This module follows Game Engine Architecture 3rd Edition (GEA 13.3.4):
//! - **Model Space Storage**: Outlines stored in local coordinates on the transform
//! - **On-Demand Transformation**: Shapes transformed to world space only during tests
//!
//! # Module Organization
//!
//! - [`primitives`] - Bounding circles
//! - [`polygon`] - Convex polygons and separating-axis tests
//! - [`shape`] - World-space shapes built from transforms

pub mod primitives;
pub mod polygon;
pub mod shape;

pub use primitives::BoundingCircle;
pub use polygon::{ConvexPolygon, PolygonError};
pub use shape::{transforms_overlap, WorldSpaceShape};
