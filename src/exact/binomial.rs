use statrs::distribution::{ContinuousCDF, Normal};
use statrs::function::beta::beta_reg;

use crate::error::{Error, Result};

/// Sum of `draws` independent two-valued draws.
///
/// Each draw is `win` with probability `p` and `loss` otherwise, so
/// `S = loss·n + (win − loss)·W` with `W ~ Binomial(n, p)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SumOfDraws {
    /// Number of draws `n`.
    pub draws: u64,
    /// Probability of `win` on each draw.
    pub p: f64,
    /// Value of a success.
    pub win: f64,
    /// Value of a failure.
    pub loss: f64,
}

impl SumOfDraws {
    /// Validated two-valued sum.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] for `draws == 0`, `p ∉ [0, 1]`, equal or
    /// non-finite values.
    pub fn new(draws: u64, p: f64, win: f64, loss: f64) -> Result<Self> {
        if draws == 0 {
            return Err(Error::invalid("number of draws must be positive, got 0"));
        }
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::invalid(format!("success probability must lie in [0, 1], got {p}")));
        }
        if !(win.is_finite() && loss.is_finite()) || win == loss {
            return Err(Error::invalid(format!(
                "draw values must be finite and distinct, got win={win} loss={loss}"
            )));
        }
        Ok(Self { draws, p, win, loss })
    }

    /// ±1 draws, the roulette "bet on red" payoff.
    ///
    /// # Errors
    /// See [`SumOfDraws::new`].
    pub fn signed(draws: u64, p: f64) -> Result<Self> {
        Self::new(draws, p, 1.0, -1.0)
    }

    /// `E[S] = n·(p·win + (1 − p)·loss)`.
    pub fn expected_value(&self) -> f64 {
        self.draws as f64 * (self.p * self.win + (1.0 - self.p) * self.loss)
    }

    /// `SD[S] = √n·|win − loss|·√(p(1 − p))`.
    pub fn standard_error(&self) -> f64 {
        (self.draws as f64).sqrt() * (self.win - self.loss).abs() * (self.p * (1.0 - self.p)).sqrt()
    }

    /// `Pr(W ≤ k)` through the regularized incomplete beta `I_{1−p}(n − k, k + 1)`.
    fn binomial_cdf(&self, k: i64) -> f64 {
        let n = self.draws;
        match u64::try_from(k) {
            Err(_) => 0.0,
            Ok(k) if k >= n => 1.0,
            Ok(k) => beta_reg((n - k) as f64, (k + 1) as f64, 1.0 - self.p),
        }
    }

    /// Exact `Pr(S < t)`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] when `t` is NaN.
    pub fn prob_below(&self, t: f64) -> Result<f64> {
        if t.is_nan() {
            return Err(Error::invalid("threshold t must not be NaN"));
        }
        let step = self.win - self.loss;
        let mut c = (t - self.loss * self.draws as f64) / step;
        // Snap round-off so integer thresholds keep their strict inequality
        if (c - c.round()).abs() < 1e-9 {
            c = c.round();
        }
        let c = c.clamp(-1.0, self.draws as f64 + 1.0);

        #[allow(clippy::cast_possible_truncation)]
        let p = if step > 0.0 {
            // W < c
            self.binomial_cdf(c.ceil() as i64 - 1)
        } else {
            // W > c
            1.0 - self.binomial_cdf(c.floor() as i64)
        };
        Ok(p.clamp(0.0, 1.0))
    }

    /// Central-limit approximation of `Pr(S < t)`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] when `t` is NaN.
    pub fn normal_approximation_below(&self, t: f64) -> Result<f64> {
        if t.is_nan() {
            return Err(Error::invalid("threshold t must not be NaN"));
        }
        let mean = self.expected_value();
        let sd = self.standard_error();
        if sd == 0.0 {
            return Ok(if mean < t { 1.0 } else { 0.0 });
        }
        let normal = Normal::new(mean, sd).map_err(|e| Error::invalid(e.to_string()))?;
        Ok(normal.cdf(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn single_signed_draw() {
        let s = SumOfDraws::signed(1, 18.0 / 38.0).unwrap();
        assert_abs_diff_eq!(s.prob_below(0.0).unwrap(), 20.0 / 38.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.prob_below(1.0).unwrap(), 20.0 / 38.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.prob_below(1.5).unwrap(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.prob_below(-1.0).unwrap(), 0.0);
        assert_abs_diff_eq!(s.expected_value(), -2.0 / 38.0, epsilon = 1e-12);
    }

    #[test]
    fn small_binomial_by_hand() {
        // n=3, p=0.5, ±1: S ∈ {-3,-1,1,3} with weights 1,3,3,1 over 8
        let s = SumOfDraws::signed(3, 0.5).unwrap();
        assert_abs_diff_eq!(s.prob_below(0.0).unwrap(), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(s.prob_below(-1.0).unwrap(), 0.125, epsilon = 1e-12);
        assert_abs_diff_eq!(s.prob_below(3.0).unwrap(), 0.875, epsilon = 1e-12);
        assert_abs_diff_eq!(s.prob_below(10.0).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn losing_value_above_winning_value() {
        // win < loss flips the direction of the tail
        let s = SumOfDraws::new(3, 0.5, -1.0, 1.0).unwrap();
        assert_abs_diff_eq!(s.prob_below(0.0).unwrap(), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(s.prob_below(-1.0).unwrap(), 0.125, epsilon = 1e-12);
    }

    #[test]
    fn roulette_thousand_bets_matches_normal_curve() {
        let s = SumOfDraws::signed(1_000, 18.0 / 38.0).unwrap();
        let exact = s.prob_below(0.0).unwrap();
        let approx = s.normal_approximation_below(0.0).unwrap();
        assert!(exact > 0.9 && exact < 0.99);
        assert_abs_diff_eq!(exact, approx, epsilon = 0.02);
        let spread = 2.0 * (1_000.0_f64 * 18.0 / 38.0 * 20.0 / 38.0).sqrt();
        assert_abs_diff_eq!(s.standard_error(), spread, epsilon = 1e-9);
    }

    #[test]
    fn degenerate_probabilities() {
        let always = SumOfDraws::signed(10, 1.0).unwrap();
        assert_eq!(always.prob_below(10.0).unwrap(), 0.0);
        assert_eq!(always.prob_below(10.5).unwrap(), 1.0);
        assert_eq!(always.normal_approximation_below(10.5).unwrap(), 1.0);
    }

    #[test]
    fn invalid_arguments() {
        assert!(SumOfDraws::signed(0, 0.5).is_err());
        assert!(SumOfDraws::signed(5, 1.2).is_err());
        assert!(SumOfDraws::new(5, 0.5, 1.0, 1.0).is_err());
        assert!(SumOfDraws::signed(5, 0.5).unwrap().prob_below(f64::NAN).is_err());
    }
}
