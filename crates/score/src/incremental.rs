//! Incremental subset scoring.

use hpfr_proximity::{PairProximity, Point};

use crate::error::ScoreError;
use crate::objective::{Objective, SplitObjective};

/// Running HPFR state for a growing subset R.
///
/// Each [`push`](IncrementalScore::push) costs O(|R|) pair lookups, so
/// building R point by point costs the same O(k²) as scoring it in one go.
/// Intra-subset proximities are always taken relative to R, never to S.
#[derive(Debug, Clone)]
pub struct IncrementalScore<'a, P: PairProximity + ?Sized> {
    points: &'a [Point],
    sums: &'a [f64],
    pairs: &'a P,
    w: f64,
    set_size: usize,
    members: Vec<usize>,
    intra: Vec<f64>,
    in_subset: Vec<bool>,
    sum_weight: f64,
    sum_baseline: f64,
}

impl<'a, P: PairProximity + ?Sized> IncrementalScore<'a, P> {
    /// Starts an empty subset.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::LengthMismatch`] if `sums` does not cover
    /// `points`, and [`ScoreError::DegenerateWeight`] if `w == set_size`.
    pub fn new(
        points: &'a [Point],
        sums: &'a [f64],
        pairs: &'a P,
        w: f64,
        set_size: usize,
    ) -> Result<Self, ScoreError> {
        if sums.len() != points.len() {
            return Err(ScoreError::LengthMismatch {
                sums: sums.len(),
                points: points.len(),
            });
        }
        if set_size as f64 == w {
            return Err(ScoreError::DegenerateWeight { w, set_size });
        }
        Ok(Self {
            points,
            sums,
            pairs,
            w,
            set_size,
            members: Vec::new(),
            intra: Vec::new(),
            in_subset: vec![false; points.len()],
            sum_weight: 0.0,
            sum_baseline: 0.0,
        })
    }

    /// Proximity `i` would add to the subset: `Σ_{m∈R} proximity(m, i)`.
    pub fn marginal_proximity(&self, i: usize) -> f64 {
        self.members
            .iter()
            .filter(|&&m| m != i)
            .map(|&m| self.pairs.proximity(m, i))
            .sum()
    }

    /// Adds point `i` to the subset.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::IndexOutOfRange`] or [`ScoreError::DuplicateIndex`].
    pub fn push(&mut self, i: usize) -> Result<(), ScoreError> {
        let len = self.points.len();
        if i >= len {
            return Err(ScoreError::IndexOutOfRange { index: i, len });
        }
        if self.in_subset[i] {
            return Err(ScoreError::DuplicateIndex { index: i });
        }

        let mut own = 0.0;
        for (slot, &m) in self.members.iter().enumerate() {
            let p = self.pairs.proximity(m, i);
            self.intra[slot] += p;
            own += p;
        }
        self.members.push(i);
        self.intra.push(own);
        self.in_subset[i] = true;
        self.sum_weight += self.points[i].weight();
        self.sum_baseline += self.sums[i];
        Ok(())
    }

    /// Subset members in insertion order.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// `intra[i]` per member, aligned with [`members`](IncrementalScore::members).
    pub fn intra(&self) -> &[f64] {
        &self.intra
    }

    /// Current subset size.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` while no point has been pushed.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Decomposed objective of the current subset.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::InvalidBudget`] while the subset has fewer than
    /// two members.
    pub fn split(&self) -> Result<SplitObjective, ScoreError> {
        let k = self.members.len();
        if k < 2 {
            return Err(ScoreError::InvalidBudget { k });
        }
        let sum_penalty: f64 = self.intra.iter().map(|v| self.w * v).sum();
        Ok(SplitObjective::new(
            self.sum_weight,
            self.sum_baseline,
            sum_penalty,
            k,
            self.set_size,
            self.w,
        ))
    }

    /// Aggregate objective of the current subset.
    ///
    /// # Errors
    ///
    /// Same as [`split`](IncrementalScore::split).
    pub fn objective(&self) -> Result<Objective, ScoreError> {
        Ok(self.split()?.to_objective())
    }
}
