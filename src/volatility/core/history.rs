//! History buffers for the variance recursion.
//!
//! [`VarianceHistory`] holds the four aligned, append-only sequences the
//! kernel operates on: conditional variances, their natural logs, raw
//! residuals, and standardized residuals. A fixed presample prefix of length
//! `max(p, q)` seeds the recursion before real data begins; its level comes
//! from the unconditional-variance solver (or another [`Init`] policy).
//!
//! ## Ordering
//! Buffers store the **newest element at the end**. Lag accessors take a
//! 1-based offset from the *next* position: while computing the variance for
//! step `t`, `variance_lag(1)` is σ²_{t−1} and `residual_lag(1)` is ε_{t−1}.
//!
//! ## Append-only discipline
//! Entries are written exactly once, in time order, and never mutated
//! retroactively. `push_variance` appends the variance and its log together;
//! `push_residual` standardizes against the variance already computed for the
//! same time index and appends both residual forms. Buffers are preallocated
//! to their full size, so the hot loop performs no heap allocation.
//!
//! Each likelihood evaluation or simulation run owns its private history;
//! instances are never shared across concurrent evaluations.
//!
//! [`Init`]: crate::volatility::core::init::Init
use ndarray::{Array1, ArrayView1, s};

/// Aligned variance / log-variance / residual / standardized-residual
/// buffers with a presample prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct VarianceHistory {
    variance: Array1<f64>,
    log_variance: Array1<f64>,
    residuals: Array1<f64>,
    std_residuals: Array1<f64>,
    presample: usize,
    var_len: usize,
    res_len: usize,
}

impl VarianceHistory {
    /// Allocate buffers for a presample prefix plus `capacity` observations.
    ///
    /// All four buffers have length `presample + capacity`; no further
    /// allocation happens over the lifetime of the history.
    pub fn new(presample: usize, capacity: usize) -> Self {
        let total = presample + capacity;
        VarianceHistory {
            variance: Array1::zeros(total),
            log_variance: Array1::zeros(total),
            residuals: Array1::zeros(total),
            std_residuals: Array1::zeros(total),
            presample,
            var_len: 0,
            res_len: 0,
        }
    }

    /// Presample prefix length (`max(p, q)` for the owning model).
    pub fn presample(&self) -> usize {
        self.presample
    }

    /// Number of in-sample variances computed so far (prefix excluded).
    pub fn len(&self) -> usize {
        self.var_len - self.presample
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Seed the presample prefix at a flat variance `level`.
    ///
    /// The residual prefix is set to `√level` (a one-sigma shock), so the
    /// standardized-residual prefix is exactly one. Seeding at the
    /// unconditional variance therefore puts a plain GARCH recursion exactly
    /// at its fixed point. Resets any previously pushed content.
    pub fn seed_level(&mut self, level: f64) {
        let log_level = level.ln();
        let shock = level.sqrt();
        for i in 0..self.presample {
            self.variance[i] = level;
            self.log_variance[i] = log_level;
            self.residuals[i] = shock;
            self.std_residuals[i] = 1.0;
        }
        self.var_len = self.presample;
        self.res_len = self.presample;
    }

    /// Seed the presample prefix from explicit lag vectors (newest at the
    /// end of each vector).
    ///
    /// Prefix slots older than the provided vectors are filled with the
    /// oldest provided variance lag (falling back to the mean squared
    /// residual lag, then 1.0, when no variance lags exist). Residual slots
    /// without a provided value are set to the one-sigma shock of their slot
    /// variance. Resets any previously pushed content.
    pub fn seed_vectors(
        &mut self, variance_lags: ArrayView1<'_, f64>, residual_lags: ArrayView1<'_, f64>,
    ) {
        let fallback = if !variance_lags.is_empty() {
            variance_lags[0]
        } else if !residual_lags.is_empty() {
            let mean_sq = residual_lags.iter().map(|&r| r * r).sum::<f64>()
                / residual_lags.len() as f64;
            if mean_sq > 0.0 { mean_sq } else { 1.0 }
        } else {
            1.0
        };

        let var_start = self.presample - variance_lags.len();
        let res_start = self.presample - residual_lags.len();
        for i in 0..self.presample {
            let v = if i >= var_start { variance_lags[i - var_start] } else { fallback };
            self.variance[i] = v;
            self.log_variance[i] = v.ln();
            let r = if i >= res_start { residual_lags[i - res_start] } else { v.sqrt() };
            self.residuals[i] = r;
            self.std_residuals[i] = r / v.sqrt();
        }
        self.var_len = self.presample;
        self.res_len = self.presample;
    }

    /// Append the next conditional variance (and its log).
    ///
    /// # Panics
    /// Panics when the preallocated capacity is exhausted; the owning model
    /// sizes the buffers from the sample length, so this is a logic error.
    pub fn push_variance(&mut self, value: f64) {
        self.variance[self.var_len] = value;
        self.log_variance[self.var_len] = value.ln();
        self.var_len += 1;
    }

    /// Standardize and append the observed residual for the current step.
    ///
    /// Requires that the variance for this time index has already been
    /// pushed; returns the standardized residual `ε_t / √σ²_t`.
    ///
    /// # Panics
    /// Panics if called before the matching `push_variance` (logic error).
    pub fn push_residual(&mut self, raw: f64) -> f64 {
        assert!(self.res_len < self.var_len, "residual pushed before its variance");
        let z = raw / self.variance[self.res_len].sqrt();
        self.residuals[self.res_len] = raw;
        self.std_residuals[self.res_len] = z;
        self.res_len += 1;
        z
    }

    /// σ²_{t−k} while computing step `t` (k ≥ 1).
    pub fn variance_lag(&self, k: usize) -> f64 {
        self.variance[self.var_len - k]
    }

    /// ln σ²_{t−k} while computing step `t` (k ≥ 1).
    pub fn log_variance_lag(&self, k: usize) -> f64 {
        self.log_variance[self.var_len - k]
    }

    /// ε_{t−k} while computing step `t` (k ≥ 1).
    pub fn residual_lag(&self, k: usize) -> f64 {
        self.residuals[self.res_len - k]
    }

    /// z_{t−k} while computing step `t` (k ≥ 1).
    pub fn std_residual_lag(&self, k: usize) -> f64 {
        self.std_residuals[self.res_len - k]
    }

    /// In-sample variance path (presample excluded).
    pub fn variance_path(&self) -> ArrayView1<'_, f64> {
        self.variance.slice(s![self.presample..self.var_len])
    }

    /// In-sample log-variance path (presample excluded).
    pub fn log_variance_path(&self) -> ArrayView1<'_, f64> {
        self.log_variance.slice(s![self.presample..self.var_len])
    }

    /// In-sample standardized residuals (presample excluded).
    pub fn std_residual_path(&self) -> ArrayView1<'_, f64> {
        self.std_residuals.slice(s![self.presample..self.res_len])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Presample seeding (flat level and explicit vectors).
    // - Push/lag alignment and the append-only length accounting.
    //
    // They intentionally DO NOT cover:
    // - The family-specific variance updates that drive these buffers
    //   (recursion module tests).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Seeding at a flat level fills all four buffers consistently: variance,
    // its log, a one-sigma residual, and a unit standardized residual.
    //
    // Given
    // -----
    // - Presample length 2 seeded at level 0.25.
    //
    // Expect
    // ------
    // - variance_lag(1) = 0.25, log_variance_lag(1) = ln 0.25,
    //   residual_lag(1) = 0.5, std_residual_lag(1) = 1.0.
    fn seed_level_fills_aligned_prefix() {
        // Arrange
        let mut history = VarianceHistory::new(2, 4);

        // Act
        history.seed_level(0.25);

        // Assert
        assert_eq!(history.len(), 0);
        assert_eq!(history.variance_lag(1), 0.25);
        assert_eq!(history.log_variance_lag(1), 0.25_f64.ln());
        assert_eq!(history.residual_lag(1), 0.5);
        assert_eq!(history.std_residual_lag(1), 1.0);
    }

    #[test]
    // Purpose
    // -------
    // Lag accessors track the push sequence: after pushing a variance and its
    // residual, lag 1 refers to that pair and lag 2 to the presample.
    //
    // Given
    // -----
    // - Presample 1 seeded at 1.0, then variance 4.0 and residual 1.0 pushed.
    //
    // Expect
    // ------
    // - variance_lag(1) = 4.0, variance_lag(2) = 1.0; push_residual returns
    //   z = 1.0 / 2.0 and std_residual_lag(1) = 0.5.
    fn push_and_lag_accessors_stay_aligned() {
        // Arrange
        let mut history = VarianceHistory::new(1, 4);
        history.seed_level(1.0);

        // Act
        history.push_variance(4.0);
        let z = history.push_residual(1.0);

        // Assert
        assert_eq!(history.len(), 1);
        assert_eq!(z, 0.5);
        assert_eq!(history.variance_lag(1), 4.0);
        assert_eq!(history.variance_lag(2), 1.0);
        assert_eq!(history.std_residual_lag(1), 0.5);
        assert_eq!(history.residual_lag(1), 1.0);
        assert_eq!(history.variance_path().to_vec(), vec![4.0]);
    }

    #[test]
    // Purpose
    // -------
    // Vector seeding places provided lags newest-at-the-end and pads older
    // slots from the oldest provided variance lag.
    //
    // Given
    // -----
    // - Presample 3, variance lags [0.5, 0.8] (p = 2), residual lags [-0.2]
    //   (q = 1).
    //
    // Expect
    // ------
    // - variance prefix [0.5, 0.5, 0.8]; newest residual −0.2 standardized
    //   against 0.8; older residual slots carry one-sigma shocks.
    fn seed_vectors_pads_older_slots() {
        // Arrange
        let mut history = VarianceHistory::new(3, 2);

        // Act
        history.seed_vectors(array![0.5, 0.8].view(), array![-0.2].view());

        // Assert
        assert_eq!(history.variance_lag(1), 0.8);
        assert_eq!(history.variance_lag(2), 0.5);
        assert_eq!(history.variance_lag(3), 0.5);
        assert_eq!(history.residual_lag(1), -0.2);
        assert!((history.std_residual_lag(1) + 0.2 / 0.8_f64.sqrt()).abs() < 1e-12);
        assert_eq!(history.std_residual_lag(2), 1.0);
    }
}
