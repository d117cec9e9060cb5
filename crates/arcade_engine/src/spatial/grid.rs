//! Uniform grid spatial index
//!
//! Space is cut into square cells of a fixed size. An entity is appended to
//! the bucket of every cell its bounding square `[p - r, p + r]` touches, so a
//! large entity is reachable from all the cells it spans.
//!
//! Cell ranges are clamped to the world bounds plus one cell on every side.
//! Anything further out lands in the border cells, which caps the work a
//! single insert or query can do. Clamping both ends of two overlapping
//! ranges keeps them overlapping, so no pair is lost.

use super::SpatialQuery;
use crate::ecs::Entity;
use crate::foundation::math::{Bounds2, Vec2};
use std::collections::HashMap;

/// Default cell edge length in world units
pub const DEFAULT_CELL_SIZE: f32 = 64.0;

/// Most cells the world bounds may span along one axis
pub const MAX_CELLS_PER_AXIS: f32 = 1024.0;

/// Inclusive range of cell coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    /// Lowest cell column
    pub min_x: i32,
    /// Lowest cell row
    pub min_y: i32,
    /// Highest cell column
    pub max_x: i32,
    /// Highest cell row
    pub max_y: i32,
}

impl CellRange {
    /// Iterate over every `(x, y)` cell in the range, row by row
    pub fn cells(self) -> impl Iterator<Item = (i32, i32)> {
        (self.min_y..=self.max_y).flat_map(move |y| (self.min_x..=self.max_x).map(move |x| (x, y)))
    }

    /// Number of cells covered
    pub fn len(self) -> usize {
        let w = i64::from(self.max_x) - i64::from(self.min_x) + 1;
        let h = i64::from(self.max_y) - i64::from(self.min_y) + 1;
        usize::try_from(w * h).unwrap_or(usize::MAX)
    }

    /// Whether the range covers no cells (never true for ranges built by the grid)
    pub fn is_empty(self) -> bool {
        self.max_x < self.min_x || self.max_y < self.min_y
    }

    fn clamp_to(self, limits: Self) -> Self {
        Self {
            min_x: self.min_x.clamp(limits.min_x, limits.max_x),
            min_y: self.min_y.clamp(limits.min_y, limits.max_y),
            max_x: self.max_x.clamp(limits.min_x, limits.max_x),
            max_y: self.max_y.clamp(limits.min_y, limits.max_y),
        }
    }
}

/// Uniform grid keyed by a paired integer cell key
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    limits: CellRange,
    buckets: HashMap<u64, Vec<Entity>>,
    entity_cache: HashMap<Entity, (Vec2, f32)>,
}

impl SpatialGrid {
    /// Create an empty grid over the default world bounds
    ///
    /// A non-positive or non-finite size falls back to [`DEFAULT_CELL_SIZE`].
    pub fn new(cell_size: f32) -> Self {
        Self::with_bounds(cell_size, Bounds2::default())
    }

    /// Create an empty grid whose cell ranges are clamped to `bounds`
    ///
    /// Cells grow when the bounds would otherwise span more than
    /// [`MAX_CELLS_PER_AXIS`] cells.
    pub fn with_bounds(cell_size: f32, bounds: Bounds2) -> Self {
        let mut cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            log::warn!("Invalid grid cell size {cell_size}, using {DEFAULT_CELL_SIZE}");
            DEFAULT_CELL_SIZE
        };

        let finite = [bounds.min.x, bounds.min.y, bounds.max.x, bounds.max.y]
            .iter()
            .all(|v| v.is_finite());
        let bounds = if finite {
            bounds
        } else {
            log::warn!("Invalid grid bounds {bounds:?}, using the default world");
            Bounds2::default()
        };

        let widest = bounds.width().max(bounds.height());
        if widest / cell_size > MAX_CELLS_PER_AXIS {
            let grown = widest / MAX_CELLS_PER_AXIS;
            log::warn!("Grid cell size {cell_size} is too fine for a {widest} unit world, using {grown}");
            cell_size = grown;
        }

        let limits = CellRange {
            min_x: coord(bounds.min.x, cell_size).saturating_sub(1),
            min_y: coord(bounds.min.y, cell_size).saturating_sub(1),
            max_x: coord(bounds.max.x, cell_size).saturating_add(1),
            max_y: coord(bounds.max.y, cell_size).saturating_add(1),
        };

        Self {
            cell_size,
            limits,
            buckets: HashMap::new(),
            entity_cache: HashMap::new(),
        }
    }

    /// Cell edge length
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Cells an entity can ever be stored in
    pub fn limits(&self) -> CellRange {
        self.limits
    }

    /// Cell coordinate containing a world coordinate
    pub fn cell_coord(&self, value: f32) -> i32 {
        coord(value, self.cell_size)
    }

    /// Inclusive cell range covering `[position - radius, position + radius]`,
    /// clamped to [`limits`](Self::limits)
    pub fn cell_range(&self, position: Vec2, radius: f32) -> CellRange {
        let r = radius.max(0.0);
        CellRange {
            min_x: self.cell_coord(position.x - r),
            min_y: self.cell_coord(position.y - r),
            max_x: self.cell_coord(position.x + r),
            max_y: self.cell_coord(position.y + r),
        }
        .clamp_to(self.limits)
    }

    /// Deterministic, injective key for a cell
    ///
    /// Signed coordinates are folded onto the naturals (0, -1, 1, -2, ... map to
    /// 0, 1, 2, 3, ...) and then combined with Szudzik's pairing function.
    /// Every `i32` pair gets its own key and the result always fits in `u64`.
    pub fn cell_key(x: i32, y: i32) -> u64 {
        let a = fold_sign(x);
        let b = fold_sign(y);
        if a >= b {
            a * a + a + b
        } else {
            a + b * b
        }
    }

    /// Entities stored in a single cell
    pub fn bucket(&self, x: i32, y: i32) -> &[Entity] {
        self.buckets
            .get(&Self::cell_key(x, y))
            .map_or(&[], Vec::as_slice)
    }

    fn collect_range(&self, range: CellRange, exclude: Option<Entity>) -> Vec<Entity> {
        let mut found: Vec<Entity> = range
            .cells()
            .filter_map(|(x, y)| self.buckets.get(&Self::cell_key(x, y)))
            .flatten()
            .copied()
            .filter(|e| Some(*e) != exclude)
            .collect();
        found.sort_unstable();
        found.dedup();
        found
    }
}

#[allow(clippy::cast_possible_truncation)]
fn coord(value: f32, cell_size: f32) -> i32 {
    // `as` saturates on overflow and maps NaN to 0.
    (value / cell_size).floor() as i32
}

fn fold_sign(v: i32) -> u64 {
    let wide = i64::from(v);
    if wide >= 0 {
        wide.unsigned_abs() * 2
    } else {
        wide.unsigned_abs() * 2 - 1
    }
}

impl Default for SpatialGrid {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE)
    }
}

impl SpatialQuery for SpatialGrid {
    fn insert(&mut self, entity: Entity, position: Vec2, radius: f32) {
        let range = self.cell_range(position, radius);
        for (x, y) in range.cells() {
            self.buckets.entry(Self::cell_key(x, y)).or_default().push(entity);
        }
        self.entity_cache.insert(entity, (position, radius.max(0.0)));
    }

    fn query_nearby(&self, entity: Entity) -> Vec<Entity> {
        match self.entity_cache.get(&entity) {
            Some(&(position, radius)) => self.collect_range(self.cell_range(position, radius), Some(entity)),
            None => Vec::new(),
        }
    }

    fn query_circle(&self, center: Vec2, radius: f32) -> Vec<Entity> {
        self.collect_range(self.cell_range(center, radius), None)
    }

    fn get_entity_data(&self, entity: Entity) -> Option<(Vec2, f32)> {
        self.entity_cache.get(&entity).copied()
    }

    fn clear(&mut self) {
        self.buckets.clear();
        self.entity_cache.clear();
    }

    fn entity_count(&self) -> usize {
        self.entity_cache.len()
    }

    fn cell_count(&self) -> usize {
        self.buckets.len()
    }
}
