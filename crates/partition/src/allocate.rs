//! Proportional budget allocation with largest-remainder rounding.

use std::cmp::Ordering;

use tracing::debug;

use crate::error::PartitionError;

/// One cell competing for budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellDemand<Id> {
    /// Caller-side cell identifier, carried through untouched.
    pub id: Id,
    /// Non-negative allocation weight.
    pub score: f64,
    /// Most units the cell can absorb (its population).
    pub capacity: usize,
}

impl<Id> CellDemand<Id> {
    pub fn new(id: Id, score: f64, capacity: usize) -> Self {
        Self {
            id,
            score,
            capacity,
        }
    }
}

/// Integer quota per cell, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation<Id> {
    quotas: Vec<(Id, usize)>,
}

impl<Id: Copy + PartialEq> Allocation<Id> {
    /// `(id, quota)` pairs in input order, zero quotas included.
    pub fn quotas(&self) -> &[(Id, usize)] {
        &self.quotas
    }

    /// Sum of all quotas.
    pub fn total(&self) -> usize {
        self.quotas.iter().map(|&(_, q)| q).sum()
    }

    /// Quota of `id`, or 0 if absent.
    pub fn quota_of(&self, id: Id) -> usize {
        self.quotas
            .iter()
            .find(|(c, _)| *c == id)
            .map_or(0, |&(_, q)| q)
    }
}

/// Splits `k` units across `scores` proportionally.
///
/// `ideal_i = k · score_i / Σ score`; each cell first gets `⌊ideal_i⌋`, then the
/// leftover units go one at a time to the largest fractional remainders, ties
/// broken by input order. The result always sums to exactly `k`.
///
/// # Errors
///
/// Returns [`PartitionError::InvalidCellScore`] for a negative or non-finite
/// score and [`PartitionError::ZeroAllocationMass`] when all scores are zero
/// (or the slice is empty).
pub fn largest_remainder(scores: &[f64], k: usize) -> Result<Vec<usize>, PartitionError> {
    if let Some((index, &score)) = scores
        .iter()
        .enumerate()
        .find(|(_, s)| !s.is_finite() || **s < 0.0)
    {
        return Err(PartitionError::InvalidCellScore { index, score });
    }
    let total: f64 = scores.iter().sum();
    if total <= 0.0 {
        return Err(PartitionError::ZeroAllocationMass);
    }

    let mut quotas = Vec::with_capacity(scores.len());
    let mut remainders = Vec::with_capacity(scores.len());
    for (i, &s) in scores.iter().enumerate() {
        let ideal = k as f64 * s / total;
        let floor = ideal.floor();
        quotas.push(floor as usize);
        remainders.push((i, ideal - floor));
    }

    let assigned: usize = quotas.iter().sum();
    let leftover = k.saturating_sub(assigned);
    // `sort_by` is stable: equal remainders keep input order.
    remainders.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    for &(i, _) in remainders.iter().cycle().take(leftover) {
        quotas[i] += 1;
    }
    Ok(quotas)
}

/// Allocates `k` units across `cells`, never exceeding a cell's capacity.
///
/// The first pass is [`largest_remainder`] of `min(k, Σ capacity)` over all
/// scores. Units that land
/// above a cell's capacity are clamped off and re-allocated by the same rule
/// among cells with room left, until `min(k, Σ capacity)` units are placed.
/// When every cell with room scores zero, remaining room is used as the score.
///
/// # Errors
///
/// Same as [`largest_remainder`] on the full score vector.
pub fn allocate<Id: Copy + PartialEq>(
    cells: &[CellDemand<Id>],
    k: usize,
) -> Result<Allocation<Id>, PartitionError> {
    let capacity: usize = cells.iter().map(|c| c.capacity).sum();
    let budget = k.min(capacity);
    let scores: Vec<f64> = cells.iter().map(|c| c.score).collect();
    let mut shares = largest_remainder(&scores, budget)?;
    let mut quotas = vec![0usize; cells.len()];
    let mut remaining = budget;
    let mut targets: Vec<usize> = (0..cells.len()).collect();
    let mut rounds = 0usize;

    loop {
        rounds += 1;
        for (&i, &share) in targets.iter().zip(&shares) {
            let give = share.min(cells[i].capacity - quotas[i]).min(remaining);
            quotas[i] += give;
            remaining -= give;
        }
        if remaining == 0 {
            break;
        }

        targets = (0..cells.len())
            .filter(|&i| quotas[i] < cells[i].capacity)
            .collect();
        let mut round_scores: Vec<f64> = targets.iter().map(|&i| cells[i].score).collect();
        if round_scores.iter().sum::<f64>() <= 0.0 {
            round_scores = targets
                .iter()
                .map(|&i| (cells[i].capacity - quotas[i]) as f64)
                .collect();
        }
        shares = largest_remainder(&round_scores, remaining)?;
    }

    debug!(
        n_cells = cells.len(),
        k,
        budget,
        rounds,
        "budget allocated"
    );
    Ok(Allocation {
        quotas: cells.iter().zip(quotas).map(|(c, q)| (c.id, q)).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_split() {
        assert_eq!(largest_remainder(&[1.0, 1.0, 2.0], 8).unwrap(), vec![2, 2, 4]);
    }

    #[test]
    fn test_remainder_goes_to_largest_fraction() {
        // ideals [1.5, 2.5, 6.0] -> floors [1, 2, 6], one left.
        // 1.5 and 2.5 tie on 0.5: input order wins.
        assert_eq!(
            largest_remainder(&[3.0, 5.0, 12.0], 10).unwrap(),
            vec![2, 2, 6]
        );
        // ideals [0.65, 1.85, 2.5] -> floors [0, 1, 2], two left.
        assert_eq!(
            largest_remainder(&[13.0, 37.0, 50.0], 5).unwrap(),
            vec![1, 2, 2]
        );
    }

    #[test]
    fn test_sum_is_k() {
        let scores = [3.0, 7.0, 1.0, 0.0, 5.5, 2.25];
        for k in 0..40 {
            let q = largest_remainder(&scores, k).unwrap();
            assert_eq!(q.iter().sum::<usize>(), k);
            assert_eq!(q[3], 0);
        }
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            largest_remainder(&[0.0, 0.0], 3),
            Err(PartitionError::ZeroAllocationMass)
        ));
        assert!(matches!(
            largest_remainder(&[], 3),
            Err(PartitionError::ZeroAllocationMass)
        ));
        assert!(matches!(
            largest_remainder(&[1.0, -2.0], 3),
            Err(PartitionError::InvalidCellScore { index: 1, .. })
        ));
        assert!(matches!(
            largest_remainder(&[f64::NAN], 3),
            Err(PartitionError::InvalidCellScore { index: 0, .. })
        ));
    }

    #[test]
    fn test_allocate_population_scores() {
        let cells = [
            CellDemand::new('a', 5.0, 5),
            CellDemand::new('b', 3.0, 3),
            CellDemand::new('c', 2.0, 2),
        ];
        let a = allocate(&cells, 5).unwrap();
        assert_eq!(a.quotas(), &[('a', 3), ('b', 1), ('c', 1)]);
        assert_eq!(a.total(), 5);
        assert_eq!(a.quota_of('b'), 1);
        assert_eq!(a.quota_of('z'), 0);
    }

    #[test]
    fn test_allocate_redistributes_overflow() {
        // 'a' wants 9 of 10 but holds 2 points.
        let cells = [
            CellDemand::new(0, 90.0, 2),
            CellDemand::new(1, 5.0, 10),
            CellDemand::new(2, 5.0, 10),
        ];
        let a = allocate(&cells, 10).unwrap();
        // First pass [9, 1, 0]; the 7 clamped units split 4/3 between the rest.
        assert_eq!(a.quota_of(0), 2);
        assert_eq!(a.total(), 10);
        assert_eq!(a.quota_of(1), 5);
        assert_eq!(a.quota_of(2), 3);
    }

    #[test]
    fn test_allocate_k_above_capacity() {
        let cells = [CellDemand::new(0, 1.0, 2), CellDemand::new(1, 1.0, 3)];
        let a = allocate(&cells, 100).unwrap();
        assert_eq!(a.quotas(), &[(0, 2), (1, 3)]);
    }

    #[test]
    fn test_allocate_huge_budget() {
        let cells = [
            CellDemand::new(0, 3.0, 4),
            CellDemand::new(1, 1.0, 6),
            CellDemand::new(2, 0.0, 1),
        ];
        let a = allocate(&cells, usize::MAX).unwrap();
        assert_eq!(a.quotas(), &[(0, 4), (1, 6), (2, 1)]);
    }

    #[test]
    fn test_allocate_zero_score_cells_absorb_leftover() {
        let cells = [CellDemand::new(0, 1.0, 1), CellDemand::new(1, 0.0, 4)];
        let a = allocate(&cells, 3).unwrap();
        assert_eq!(a.quotas(), &[(0, 1), (1, 2)]);
    }

    #[test]
    fn test_allocate_skips_empty_cells() {
        let cells = [
            CellDemand::new(0, 1.0, 0),
            CellDemand::new(1, 1.0, 3),
            CellDemand::new(2, 1.0, 3),
        ];
        let a = allocate(&cells, 4).unwrap();
        assert_eq!(a.quotas(), &[(0, 0), (1, 2), (2, 2)]);
    }

    #[test]
    fn test_allocate_zero_mass() {
        let cells = [CellDemand::new(0, 0.0, 4)];
        assert!(matches!(
            allocate(&cells, 2),
            Err(PartitionError::ZeroAllocationMass)
        ));
    }
}
