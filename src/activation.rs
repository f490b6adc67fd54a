use ndarray::Array1;

fn sigmoid_one(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Elementwise logistic sigmoid.
pub fn sigmoid(x: &Array1<f64>) -> Array1<f64> {
    x.mapv(sigmoid_one)
}

/// Derivative of the logistic sigmoid expressed in terms of its own output:
/// for `y = sigmoid(x)`, `dy/dx = y * (1 - y)`.
/// Takes post-activation values, not pre-activation ones.
pub fn sigmoid_prime(y: &Array1<f64>) -> Array1<f64> {
    y.mapv(|v| v * (1.0 - v))
}
