//! Weight-initialization strategies.
//!
//! The network takes the strategy as a plain function so a different rule can
//! be swapped in without touching the propagation code.

use ndarray::Array2;
use ndarray_rand::rand_distr::StandardNormal;
use ndarray_rand::RandomExt;

/// He-style initialization as the original network computed it: independent
/// standard-normal draws, each shifted by the additive constant
/// `sqrt(2 / fan_in)`.
///
/// Note the offset is *added*, not multiplied. The canonical He rule scales
/// the draws instead, so this is almost certainly a bug in the original, but
/// it is kept as the default for behavioral fidelity. Use [`he_normal`] for
/// the corrected rule.
pub fn he_offset(fan_in: usize, shape: (usize, usize)) -> Array2<f64> {
    let offset = (2.0 / fan_in as f64).sqrt();
    Array2::random(shape, StandardNormal) + offset
}

/// Canonical He initialization: standard-normal draws scaled by
/// `sqrt(2 / fan_in)`.
pub fn he_normal(fan_in: usize, shape: (usize, usize)) -> Array2<f64> {
    let scale = (2.0 / fan_in as f64).sqrt();
    Array2::random(shape, StandardNormal) * scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn he_offset_shifts_the_mean() {
        let fan_in = 8;
        let weights = he_offset(fan_in, (200, 200));
        let expected_mean = (2.0 / fan_in as f64).sqrt();
        // Sample mean of 40k standard-normal draws stays well within 0.05.
        assert_relative_eq!(
            weights.mean().unwrap(),
            expected_mean,
            epsilon = 0.05
        );
    }

    #[test]
    fn he_normal_is_centered() {
        let weights = he_normal(8, (200, 200));
        assert_relative_eq!(weights.mean().unwrap(), 0.0, epsilon = 0.05);
    }

    #[test]
    fn requested_shape_is_respected() {
        assert_eq!(he_offset(4, (4, 3)).dim(), (4, 3));
        assert_eq!(he_normal(4, (4, 3)).dim(), (4, 3));
    }
}
