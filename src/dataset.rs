//! Scalar sequence generators and the sliding-window dataset the training
//! loop consumes.

use ndarray::Array1;

use crate::error::Error;

/// First `n` Fibonacci numbers: `[1, 1, 2, 3, 5, 8, ...]`.
pub fn fibonacci(n: usize) -> Vec<f64> {
    let mut values = Vec::with_capacity(n);
    let (mut a, mut b) = (1.0, 1.0);
    for _ in 0..n {
        values.push(a);
        let next = a + b;
        a = b;
        b = next;
    }
    values
}

/// First `n` factorials: `[1, 1, 2, 6, 24, 120, ...]`.
pub fn factorial(n: usize) -> Vec<f64> {
    let mut values = Vec::with_capacity(n);
    let mut acc = 1.0;
    for k in 0..n {
        if k > 0 {
            acc *= k as f64;
        }
        values.push(acc);
    }
    values
}

/// Periodic sequence of period 4: `[1, 0, -1, 0, 1, 0, -1, ...]`.
pub fn periodic(n: usize) -> Vec<f64> {
    (0..n)
        .map(|k| match k % 4 {
            0 => 1.0,
            2 => -1.0,
            _ => 0.0,
        })
        .collect()
}

/// Squares interleaved with the index: `[0, 1, 4, 3, 16, 5, 36, 7, 64, ...]`
/// (`k^2` at even positions, `k` at odd ones).
pub fn exponential(n: usize) -> Vec<f64> {
    (0..n)
        .map(|k| {
            if k % 2 == 0 {
                (k * k) as f64
            } else {
                k as f64
            }
        })
        .collect()
}

/// A scalar sequence min-max normalized into `[0, 1]` (the sigmoid output
/// range), served as sliding-window samples: each sample pairs `window`
/// consecutive values with the value that follows them.
pub struct SequenceDataset {
    values: Vec<f64>,
    window: usize,
}

impl SequenceDataset {
    pub fn new(raw: &[f64], window: usize) -> Result<Self, Error> {
        if window == 0 {
            return Err(Error::Configuration(
                "window must hold at least one value".to_string(),
            ));
        }
        if raw.len() <= window {
            return Err(Error::Configuration(format!(
                "a sequence of {} values yields no samples for window {}",
                raw.len(),
                window
            )));
        }

        let min = raw.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = raw.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let span = max - min;
        let values = if span == 0.0 {
            // A constant sequence maps to the sigmoid midpoint.
            vec![0.5; raw.len()]
        } else {
            raw.iter().map(|v| (v - min) / span).collect()
        };

        Ok(Self { values, window })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Number of (input, target) samples the dataset yields.
    pub fn len(&self) -> usize {
        self.values.len() - self.window
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over `(input_window, next_value)` pairs in sequence order.
    pub fn samples(&self) -> impl Iterator<Item = (Array1<f64>, Array1<f64>)> + '_ {
        self.values.windows(self.window + 1).map(|chunk| {
            let input = Array1::from(chunk[..self.window].to_vec());
            let target = Array1::from_elem(1, chunk[self.window]);
            (input, target)
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::assert_rel_eq_arr1;

    use super::*;
    use approx::assert_relative_eq;
    use ndarray::arr1;

    #[test]
    fn fibonacci_prefix() {
        assert_eq!(fibonacci(6), vec![1.0, 1.0, 2.0, 3.0, 5.0, 8.0]);
    }

    #[test]
    fn factorial_prefix() {
        assert_eq!(factorial(6), vec![1.0, 1.0, 2.0, 6.0, 24.0, 120.0]);
    }

    #[test]
    fn periodic_prefix() {
        assert_eq!(periodic(7), vec![1.0, 0.0, -1.0, 0.0, 1.0, 0.0, -1.0]);
    }

    #[test]
    fn exponential_prefix() {
        assert_eq!(
            exponential(9),
            vec![0.0, 1.0, 4.0, 3.0, 16.0, 5.0, 36.0, 7.0, 64.0]
        );
    }

    #[test]
    fn rejects_zero_window() {
        let result = SequenceDataset::new(&[1.0, 2.0, 3.0], 0);
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn rejects_sequence_shorter_than_window() {
        let result = SequenceDataset::new(&[1.0, 2.0], 2);
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn normalizes_into_unit_interval() {
        let dataset = SequenceDataset::new(&periodic(8), 2).unwrap();
        assert!(dataset.values.iter().all(|&v| (0.0..=1.0).contains(&v)));
        // [1, 0, -1] maps to [1, 0.5, 0].
        assert_relative_eq!(dataset.values[0], 1.0);
        assert_relative_eq!(dataset.values[1], 0.5);
        assert_relative_eq!(dataset.values[2], 0.0);
    }

    #[test]
    fn constant_sequence_maps_to_midpoint() {
        let dataset = SequenceDataset::new(&[3.0, 3.0, 3.0], 1).unwrap();
        assert!(dataset.values.iter().all(|&v| v == 0.5));
    }

    #[test]
    fn samples_slide_over_the_sequence() {
        let dataset = SequenceDataset::new(&[0.0, 1.0, 2.0, 3.0, 4.0], 2).unwrap();
        assert_eq!(dataset.len(), 3);

        let samples: Vec<_> = dataset.samples().collect();
        // Normalized values are [0, 0.25, 0.5, 0.75, 1].
        assert_rel_eq_arr1!(samples[0].0, arr1(&[0.0, 0.25]));
        assert_rel_eq_arr1!(samples[0].1, arr1(&[0.5]));
        assert_rel_eq_arr1!(samples[2].0, arr1(&[0.5, 0.75]));
        assert_rel_eq_arr1!(samples[2].1, arr1(&[1.0]));
    }
}
