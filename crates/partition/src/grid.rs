//! Uniform grid over the bounding box of a point set.

use std::collections::BTreeMap;

use hpfr_proximity::Point;
use tracing::debug;

use crate::bounds::Bounds;
use crate::error::PartitionError;

/// Grid coordinates of a cell: column `gx`, row `gy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellId {
    pub gx: usize,
    pub gy: usize,
}

impl CellId {
    pub fn new(gx: usize, gy: usize) -> Self {
        Self { gx, gy }
    }
}

/// A non-empty grid cell.
#[derive(Debug, Clone)]
pub struct Cell {
    id: CellId,
    members: Vec<usize>,
    weight_sum: f64,
}

impl Cell {
    pub fn id(&self) -> CellId {
        self.id
    }

    /// Point indices in input order.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Member count.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false` for cells exposed by [`UniformGrid::cells`].
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Sum of member weights.
    pub fn weight_sum(&self) -> f64 {
        self.weight_sum
    }
}

/// `G × G` grid of equal cells over the tight bounding box of S.
///
/// A point maps to `(⌊(x − x_min)/cell_w⌋, ⌊(y − y_min)/cell_h⌋)`, clamped
/// into `0..G` so the maximum coordinate lands in the last column/row. A point
/// on an interior grid line belongs to the cell whose lower edge it lies on.
/// A zero-extent axis maps everything to index 0.
#[derive(Debug, Clone)]
pub struct UniformGrid {
    bounds: Bounds,
    resolution: usize,
    cell_w: f64,
    cell_h: f64,
    cells: Vec<Cell>,
}

impl UniformGrid {
    /// Buckets `points` into a `resolution × resolution` grid.
    ///
    /// # Errors
    ///
    /// Returns [`PartitionError::InvalidResolution`] for `resolution == 0` and
    /// [`PartitionError::EmptyInputSet`] for an empty slice.
    pub fn build(points: &[Point], resolution: usize) -> Result<Self, PartitionError> {
        if resolution == 0 {
            return Err(PartitionError::InvalidResolution { resolution });
        }
        let bounds = Bounds::of_points(points).ok_or(PartitionError::EmptyInputSet)?;
        let g = resolution as f64;
        let mut grid = Self {
            bounds,
            resolution,
            cell_w: bounds.width() / g,
            cell_h: bounds.height() / g,
            cells: Vec::new(),
        };

        let mut buckets: BTreeMap<CellId, Cell> = BTreeMap::new();
        for (i, p) in points.iter().enumerate() {
            let id = grid.to_index(p.x(), p.y());
            let cell = buckets.entry(id).or_insert_with(|| Cell {
                id,
                members: Vec::new(),
                weight_sum: 0.0,
            });
            cell.members.push(i);
            cell.weight_sum += p.weight();
        }
        grid.cells = buckets.into_values().collect();

        debug!(
            resolution,
            n_points = points.len(),
            n_cells = grid.cells.len(),
            "uniform grid built"
        );
        Ok(grid)
    }

    /// Cell containing `(x, y)`. Shared by construction and lookup.
    pub fn to_index(&self, x: f64, y: f64) -> CellId {
        CellId {
            gx: axis_index(x, self.bounds.min_x(), self.cell_w, self.resolution),
            gy: axis_index(y, self.bounds.min_y(), self.cell_h, self.resolution),
        }
    }

    /// Non-empty cells in ascending `(gx, gy)` order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Looks up a non-empty cell.
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells
            .binary_search_by(|c| c.id.cmp(&id))
            .ok()
            .map(|i| &self.cells[i])
    }

    /// Rectangle covered by cell `id`.
    pub fn cell_bounds(&self, id: CellId) -> Bounds {
        let x0 = self.bounds.min_x() + id.gx as f64 * self.cell_w;
        let y0 = self.bounds.min_y() + id.gy as f64 * self.cell_h;
        Bounds::new(x0, y0, x0 + self.cell_w, y0 + self.cell_h)
    }

    /// Cells per axis.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Bounding box of the input set.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn cell_width(&self) -> f64 {
        self.cell_w
    }

    pub fn cell_height(&self) -> f64 {
        self.cell_h
    }
}

fn axis_index(v: f64, min: f64, size: f64, resolution: usize) -> usize {
    if size <= 0.0 {
        return 0;
    }
    let raw = ((v - min) / size).floor().max(0.0) as usize;
    raw.min(resolution - 1)
}
