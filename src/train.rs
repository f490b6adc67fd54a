//! Training-loop and evaluation glue around the network core.

use crate::dataset::SequenceDataset;
use crate::error::Error;
use crate::network::Jordan;

/// Run `n_epochs` sequential passes over the dataset, one forward/backward
/// pair per sample, and return the summed squared error of each epoch.
pub fn train(
    network: &mut Jordan,
    dataset: &SequenceDataset,
    n_epochs: usize,
) -> Result<Vec<f64>, Error> {
    let mut errors = Vec::with_capacity(n_epochs);
    for _ in 0..n_epochs {
        let mut epoch_error = 0.0;
        for (input, target) in dataset.samples() {
            network.forward(input.view())?;
            epoch_error += network.backward(target.view())?;
        }
        errors.push(epoch_error);
    }
    Ok(errors)
}

/// Crude accuracy score: the fraction of dataset samples whose prediction
/// lands within `tolerance` of the target. Uses the network as a black box,
/// through `forward` only.
pub fn evaluate(
    network: &mut Jordan,
    dataset: &SequenceDataset,
    tolerance: f64,
) -> Result<f64, Error> {
    let mut n_correct = 0;
    for (input, target) in dataset.samples() {
        let prediction = network.forward(input.view())?;
        let hit = prediction
            .iter()
            .zip(target.iter())
            .all(|(p, t)| (p - t).abs() <= tolerance);
        if hit {
            n_correct += 1;
        }
    }
    Ok(n_correct as f64 / dataset.len() as f64)
}
