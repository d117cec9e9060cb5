//! Convex polygon separating-axis tests
//!
//! Polygons are world-space vertex loops in either winding. Two shapes are
//! disjoint as soon as one axis separates their projections; projections that
//! only touch count as separated, matching the strict circle rule.

use super::primitives::BoundingCircle;
use crate::foundation::math::{utils, Vec2};

const AREA_EPSILON: f32 = 1e-6;

/// Reasons an outline cannot be used as a convex polygon
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PolygonError {
    /// Fewer than three vertices
    #[error("outline has {0} vertices, at least 3 are required")]
    TooFewVertices(usize),
    /// A coordinate is NaN or infinite
    #[error("outline contains a non-finite vertex")]
    NonFinite,
    /// Vertices enclose no area
    #[error("outline encloses zero area")]
    Degenerate,
    /// Turning direction changes along the loop
    #[error("outline is not convex")]
    NonConvex,
}

/// A validated convex polygon in world space
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexPolygon {
    vertices: Vec<Vec2>,
}

impl ConvexPolygon {
    /// Validate a vertex loop
    pub fn try_new(vertices: Vec<Vec2>) -> Result<Self, PolygonError> {
        if vertices.len() < 3 {
            return Err(PolygonError::TooFewVertices(vertices.len()));
        }
        if vertices.iter().any(|v| !v.x.is_finite() || !v.y.is_finite()) {
            return Err(PolygonError::NonFinite);
        }
        if signed_area(&vertices).abs() <= AREA_EPSILON {
            return Err(PolygonError::Degenerate);
        }

        let n = vertices.len();
        let mut sign = 0.0_f32;
        for i in 0..n {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            let c = vertices[(i + 2) % n];
            let turn = utils::cross(b - a, c - b);
            if turn.abs() <= f32::EPSILON {
                continue;
            }
            if sign == 0.0 {
                sign = turn.signum();
            } else if turn.signum() != sign {
                return Err(PolygonError::NonConvex);
            }
        }

        Ok(Self { vertices })
    }

    /// Vertices in their original winding order
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Project onto an axis, returning `(min, max)`
    pub fn project(&self, axis: Vec2) -> (f32, f32) {
        self.vertices
            .iter()
            .map(|v| v.dot(&axis))
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| (lo.min(p), hi.max(p)))
    }

    fn edge_normals(&self) -> impl Iterator<Item = Vec2> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| utils::perp(self.vertices[(i + 1) % n] - self.vertices[i]))
    }

    /// Strict polygon-polygon overlap
    pub fn intersects_polygon(&self, other: &ConvexPolygon) -> bool {
        self.edge_normals()
            .chain(other.edge_normals())
            .all(|axis| overlaps(self.project(axis), other.project(axis)))
    }

    /// Strict polygon-circle overlap
    pub fn intersects_circle(&self, circle: &BoundingCircle) -> bool {
        let closest = self
            .vertices
            .iter()
            .copied()
            .min_by(|a, b| {
                let da = (a - circle.center).magnitude_squared();
                let db = (b - circle.center).magnitude_squared();
                da.total_cmp(&db)
            });

        let Some(closest) = closest else {
            return false;
        };

        let vertex_axis = circle.center - closest;
        let extra = (vertex_axis.magnitude_squared() > 0.0).then_some(vertex_axis);

        self.edge_normals()
            .chain(extra)
            .all(|axis| overlaps(self.project(axis), circle.project(axis)))
    }
}

fn overlaps(a: (f32, f32), b: (f32, f32)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

fn signed_area(vertices: &[Vec2]) -> f32 {
    let n = vertices.len();
    (0..n)
        .map(|i| utils::cross(vertices[i], vertices[(i + 1) % n]))
        .sum::<f32>()
        * 0.5
}
