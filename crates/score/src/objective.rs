//! Output records of the scoring engine.

/// HPFR value of a subset together with its diagnostic sums.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Objective {
    score: f64,
    sum_baseline: f64,
    sum_penalty: f64,
}

impl Objective {
    pub(crate) fn new(score: f64, sum_baseline: f64, sum_penalty: f64) -> Self {
        Self {
            score,
            sum_baseline,
            sum_penalty,
        }
    }

    /// The aggregate objective.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// `Σ sums[i]` over the subset, using full-set proximity sums.
    pub fn sum_baseline(&self) -> f64 {
        self.sum_baseline
    }

    /// `Σ W·intra[i]` over the subset.
    pub fn sum_penalty(&self) -> f64 {
        self.sum_penalty
    }
}

/// HPFR with the relevance and proximity terms reported separately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitObjective {
    relevance: f64,
    proximity: f64,
    sum_baseline: f64,
    sum_penalty: f64,
    k: usize,
    set_size: usize,
    w: f64,
}

impl SplitObjective {
    pub(crate) fn new(
        relevance: f64,
        sum_baseline: f64,
        sum_penalty: f64,
        k: usize,
        set_size: usize,
        w: f64,
    ) -> Self {
        Self {
            relevance,
            proximity: sum_baseline - sum_penalty,
            sum_baseline,
            sum_penalty,
            k,
            set_size,
            w,
        }
    }

    /// `Σ weight_i` over the subset (unnormalised).
    pub fn relevance(&self) -> f64 {
        self.relevance
    }

    /// `Σ (sums[i] − W·intra[i])` over the subset (unnormalised).
    pub fn proximity(&self) -> f64 {
        self.proximity
    }

    /// `Σ sums[i]` over the subset.
    pub fn sum_baseline(&self) -> f64 {
        self.sum_baseline
    }

    /// `Σ W·intra[i]` over the subset.
    pub fn sum_penalty(&self) -> f64 {
        self.sum_penalty
    }

    /// Recombines both terms with the HPFR normalisation.
    pub fn combined(&self) -> f64 {
        let k = self.k as f64;
        self.relevance / (2.0 * k) + self.proximity / (2.0 * k * (self.set_size as f64 - self.w))
    }

    /// Recombines into an [`Objective`].
    pub fn to_objective(&self) -> Objective {
        Objective::new(self.combined(), self.sum_baseline, self.sum_penalty)
    }
}
