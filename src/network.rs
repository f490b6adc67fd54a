use ndarray::{s, Array1, Array2, ArrayView1, Axis};

use crate::activation::{sigmoid, sigmoid_prime};
use crate::error::Error;
use crate::init;

/// Jordan network: a sigmoid multilayer perceptron whose previous output is
/// fed back into the input layer as a single-step recurrent context.
///
/// Layer 0 is wider than the external input: it holds the input, the context
/// copied from the previous pass's output, and a constant bias of 1 in the
/// last slot. `forward` and `backward` must alternate on one sample; calling
/// `backward` without a pending forward pass fails with
/// [`Error::NoForwardPass`].
pub struct Jordan {
    learning_rate: f64,
    momentum: f64,
    shape: Vec<usize>,
    layers: Vec<Array1<f64>>,
    weights: Vec<Array2<f64>>,
    // Previous raw gradient per weight matrix, the momentum term of the next
    // update.
    dw: Vec<Array2<f64>>,
    // Output of the previous pass, kept as a named field instead of an alias
    // into layer 0 so the recurrence is observable on its own.
    context: Array1<f64>,
    awaiting_target: bool,
}

impl Jordan {
    /// Create a network with weights drawn by [`init::he_offset`].
    pub fn new(learning_rate: f64, momentum: f64, shape: Vec<usize>) -> Result<Self, Error> {
        Self::with_init(learning_rate, momentum, shape, init::he_offset)
    }

    /// Create a network with an explicit weight-initialization strategy.
    /// The strategy receives the fan-in and the requested matrix shape.
    pub fn with_init<F>(
        learning_rate: f64,
        momentum: f64,
        shape: Vec<usize>,
        init: F,
    ) -> Result<Self, Error>
    where
        F: Fn(usize, (usize, usize)) -> Array2<f64>,
    {
        let layer_lens = Self::layer_lens(&shape)?;
        let weights = layer_lens
            .windows(2)
            .map(|pair| init(pair[0], (pair[0], pair[1])))
            .collect();
        Ok(Self::from_parts(learning_rate, momentum, shape, weights))
    }

    /// Create a network with explicit weight matrices. Intended for
    /// deterministic tests and drivers that restore a known state.
    pub fn with_weights(
        learning_rate: f64,
        momentum: f64,
        shape: Vec<usize>,
        weights: Vec<Array2<f64>>,
    ) -> Result<Self, Error> {
        let layer_lens = Self::layer_lens(&shape)?;
        if weights.len() != layer_lens.len() - 1 {
            return Err(Error::Configuration(format!(
                "expected {} weight matrices, got {}",
                layer_lens.len() - 1,
                weights.len()
            )));
        }
        for (i, w) in weights.iter().enumerate() {
            let expected = (layer_lens[i], layer_lens[i + 1]);
            if w.dim() != expected {
                return Err(Error::Configuration(format!(
                    "weight matrix {} has shape {:?}, expected {:?}",
                    i,
                    w.dim(),
                    expected
                )));
            }
        }
        Ok(Self::from_parts(learning_rate, momentum, shape, weights))
    }

    fn from_parts(
        learning_rate: f64,
        momentum: f64,
        shape: Vec<usize>,
        weights: Vec<Array2<f64>>,
    ) -> Self {
        // `layer_lens` already validated by the callers.
        let layer_lens = Self::layer_lens(&shape).unwrap();
        let layers = layer_lens.iter().map(|&len| Array1::ones(len)).collect();
        let dw = weights
            .iter()
            .map(|w: &Array2<f64>| Array2::zeros(w.dim()))
            .collect();
        let context = Array1::ones(*shape.last().unwrap());
        Self {
            learning_rate,
            momentum,
            shape,
            layers,
            weights,
            dw,
            context,
            awaiting_target: false,
        }
    }

    // Lengths of the stored layer vectors: layer 0 is augmented with the
    // context segment and the bias slot.
    fn layer_lens(shape: &[usize]) -> Result<Vec<usize>, Error> {
        if shape.len() < 2 {
            return Err(Error::Configuration(format!(
                "a network needs at least 2 layers, got {}",
                shape.len()
            )));
        }
        if let Some(pos) = shape.iter().position(|&n| n == 0) {
            return Err(Error::Configuration(format!(
                "layer {} has no neurons",
                pos
            )));
        }

        let mut lens = vec![shape[0] + shape[shape.len() - 1] + 1];
        lens.extend_from_slice(&shape[1..]);
        Ok(lens)
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Output of the most recent forward pass.
    pub fn output(&self) -> ArrayView1<f64> {
        self.layers[self.layers.len() - 1].view()
    }

    /// The recurrent feedback the most recent forward pass consumed, i.e.
    /// the network output as it stood when that pass was entered.
    pub fn context(&self) -> ArrayView1<f64> {
        self.context.view()
    }

    /// Propagate `input` through the network and return the output layer.
    ///
    /// The context segment of layer 0 is refreshed from the output layer as
    /// it stands on entry, so consecutive `forward` calls feed each pass the
    /// previous pass's result.
    pub fn forward(&mut self, input: ArrayView1<f64>) -> Result<Array1<f64>, Error> {
        let n_in = self.shape[0];
        let n_out = *self.shape.last().unwrap();
        if input.len() != n_in {
            return Err(Error::ShapeMismatch {
                expected: n_in,
                actual: input.len(),
            });
        }

        // Snapshot the output layer before this pass overwrites it.
        let last = self.layers.len() - 1;
        self.context.assign(&self.layers[last]);

        let layer0 = &mut self.layers[0];
        layer0.slice_mut(s![..n_in]).assign(&input);
        layer0
            .slice_mut(s![n_in..n_in + n_out])
            .assign(&self.context);
        // The trailing bias slot is never written and stays at 1.

        for i in 1..self.layers.len() {
            self.layers[i] = sigmoid(&self.layers[i - 1].dot(&self.weights[i - 1]));
        }

        self.awaiting_target = true;
        Ok(self.layers[last].clone())
    }

    /// Backpropagate the error against `target` through the activations left
    /// by the preceding `forward` call, update the weights in place and
    /// return the summed squared error of that pass, computed before the
    /// update.
    pub fn backward(&mut self, target: ArrayView1<f64>) -> Result<f64, Error> {
        let n_out = *self.shape.last().unwrap();
        if target.len() != n_out {
            return Err(Error::ShapeMismatch {
                expected: n_out,
                actual: target.len(),
            });
        }
        if !self.awaiting_target {
            return Err(Error::NoForwardPass);
        }
        self.awaiting_target = false;

        let n = self.layers.len();
        let error = &target - &self.layers[n - 1];
        let loss = error.mapv(|e| e * e).sum();

        // deltas[i] is the error signal of layer i; layer 0 has none.
        let mut deltas = vec![Array1::zeros(0); n];
        deltas[n - 1] = &error * &sigmoid_prime(&self.layers[n - 1]);
        // With no hidden layers this loop body never runs.
        for i in (1..n - 1).rev() {
            deltas[i] =
                &deltas[i + 1].dot(&self.weights[i].t()) * &sigmoid_prime(&self.layers[i]);
        }

        for i in 0..self.weights.len() {
            let grad = self.layers[i]
                .view()
                .insert_axis(Axis(1))
                .dot(&deltas[i + 1].view().insert_axis(Axis(0)));
            let update = &grad * self.learning_rate + &self.dw[i] * self.momentum;
            self.weights[i] += &update;
            self.dw[i] = grad;
        }

        Ok(loss)
    }
}
