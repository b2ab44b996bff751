//! Loss and accuracy primitives.

use burn::prelude::Backend;
use burn::tensor::{ElementConversion, Tensor};

/// Binary cross-entropy over post-sigmoid probabilities.
///
/// The network's head already applies sigmoid, so inputs are
/// probabilities, not logits. Values are clamped away from 0 and 1 before
/// the logs.
///
/// # Arguments
///
/// - `probs`: Predicted fake-probabilities `[batch, 1]`
/// - `targets`: Labels (0.0 or 1.0) `[batch, 1]`
///
/// # Returns
///
/// Scalar mean loss.
pub fn binary_cross_entropy<B: Backend>(
    probs: Tensor<B, 2>,
    targets: Tensor<B, 2>,
) -> Tensor<B, 1> {
    let eps = 1e-7;
    let probs = probs.clamp(eps, 1.0 - eps);

    let log_probs = probs.clone().log();
    let log_complement = (Tensor::ones_like(&probs) - probs).log();

    let loss = targets.clone().neg() * log_probs
        - (Tensor::ones_like(&targets) - targets) * log_complement;

    loss.mean()
}

/// Counts predictions agreeing with their targets at the 0.5 threshold.
///
/// # Arguments
///
/// - `probs`: Predicted fake-probabilities `[batch, 1]`
/// - `targets`: Labels (0.0 or 1.0) `[batch, 1]`
#[allow(clippy::cast_sign_loss)]
pub fn count_correct<B: Backend>(probs: Tensor<B, 2>, targets: Tensor<B, 2>) -> usize {
    let predicted = probs.greater_elem(0.5);
    let actual = targets.greater_elem(0.5);

    let agreement: i64 = predicted.equal(actual).int().sum().into_scalar().elem();
    agreement as usize
}

/// Extracts a scalar loss value.
pub fn scalar<B: Backend>(loss: Tensor<B, 1>) -> f32 {
    loss.into_scalar().elem()
}
