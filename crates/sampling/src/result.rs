//! Output types for subset samplers.

use std::time::Duration;

use hpfr_partition::{CellId, NodeId};
use hpfr_score::Objective;

use crate::config::Strategy;

/// Partition unit a [`CellStat`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKey {
    /// Uniform-grid cell.
    Grid(CellId),
    /// Quadtree leaf.
    Leaf(NodeId),
}

/// Population and draw count of one partition unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStat {
    cell: CellKey,
    total: usize,
    selected: usize,
}

impl CellStat {
    pub(crate) fn new(cell: CellKey, total: usize, selected: usize) -> Self {
        Self {
            cell,
            total,
            selected,
        }
    }

    pub fn cell(&self) -> CellKey {
        self.cell
    }

    /// Points in the unit.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Points drawn from the unit.
    pub fn selected(&self) -> usize {
        self.selected
    }
}

/// Details only the hybrid sampler reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HybridInfo {
    pool_size: usize,
    effective_weight: f64,
    prefilter_time: Duration,
}

impl HybridInfo {
    pub(crate) fn new(pool_size: usize, effective_weight: f64, prefilter_time: Duration) -> Self {
        Self {
            pool_size,
            effective_weight,
            prefilter_time,
        }
    }

    /// K'.
    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// W' = W·K'/K, the weight the inner strategy ran with.
    pub fn effective_weight(&self) -> f64 {
        self.effective_weight
    }

    /// Time spent building the pool and its proximity table.
    pub fn prefilter_time(&self) -> Duration {
        self.prefilter_time
    }
}

/// Result of one sampler run.
///
/// `indices` refer to the caller's point slice; for the hybrid sampler they
/// are already mapped back from the pool.
#[derive(Debug, Clone)]
pub struct Selection {
    strategy: Strategy,
    indices: Vec<usize>,
    objective: Objective,
    prep_time: Duration,
    select_time: Duration,
    cell_stats: Vec<CellStat>,
    hybrid: Option<HybridInfo>,
}

impl Selection {
    pub(crate) fn new(
        strategy: Strategy,
        indices: Vec<usize>,
        objective: Objective,
        prep_time: Duration,
        select_time: Duration,
    ) -> Self {
        Self {
            strategy,
            indices,
            objective,
            prep_time,
            select_time,
            cell_stats: Vec::new(),
            hybrid: None,
        }
    }

    pub(crate) fn with_cell_stats(mut self, cell_stats: Vec<CellStat>) -> Self {
        self.cell_stats = cell_stats;
        self
    }

    pub(crate) fn with_hybrid(mut self, hybrid: HybridInfo) -> Self {
        self.hybrid = Some(hybrid);
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Selected point indices.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Consumes the selection, returning its indices.
    pub fn into_indices(self) -> Vec<usize> {
        self.indices
    }

    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Preparation time (table build or partitioning).
    pub fn prep_time(&self) -> Duration {
        self.prep_time
    }

    /// Time spent allocating quotas and drawing the subset.
    pub fn select_time(&self) -> Duration {
        self.select_time
    }

    pub fn total_time(&self) -> Duration {
        self.prep_time + self.select_time
    }

    /// Per-cell statistics; empty for partition-free strategies.
    pub fn cell_stats(&self) -> &[CellStat] {
        &self.cell_stats
    }

    pub fn hybrid(&self) -> Option<&HybridInfo> {
        self.hybrid.as_ref()
    }
}
