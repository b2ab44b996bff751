//! The convolutional scoring network.

use burn::module::Module;
use burn::nn::conv::{Conv2d, Conv2dConfig};
use burn::nn::pool::{MaxPool2d, MaxPool2dConfig};
use burn::nn::{Linear, LinearConfig};
use burn::prelude::Backend;
use burn::tensor::Tensor;
use burn::tensor::activation::{relu, sigmoid};
use serde::{Deserialize, Serialize};

/// Configuration for the convolutional scorer.
///
/// The defaults describe the fixed serving architecture; changing them
/// breaks compatibility with existing checkpoints.
///
/// # Example
///
/// ```
/// use veri_model::ConvNetConfig;
///
/// let config = ConvNetConfig::default();
/// assert_eq!(config.conv1_channels, 32);
/// assert_eq!(config.flat_dim(), 64 * 54 * 54);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvNetConfig {
    /// Output channels of the first convolution stage.
    pub conv1_channels: usize,

    /// Output channels of the second convolution stage.
    pub conv2_channels: usize,

    /// Width of the hidden fully-connected layer.
    pub hidden: usize,
}

impl Default for ConvNetConfig {
    fn default() -> Self {
        Self {
            conv1_channels: 32,
            conv2_channels: 64,
            hidden: 64,
        }
    }
}

impl ConvNetConfig {
    /// Side length after two valid 3x3 convolutions and two 2x2 poolings
    /// of the 224x224 input: ((224 - 2) / 2 - 2) / 2 = 54.
    pub const POOLED_SIDE: usize = 54;

    /// Flattened feature length entering the first linear layer.
    #[must_use]
    pub const fn flat_dim(&self) -> usize {
        self.conv2_channels * Self::POOLED_SIDE * Self::POOLED_SIDE
    }

    /// Validates the configuration.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.conv1_channels > 0 && self.conv2_channels > 0 && self.hidden > 0
    }
}

/// Two-stage convolutional network scoring one image as fake-probability.
///
/// Architecture (fixed for checkpoint compatibility):
/// Conv 3->32 (k3) -> `ReLU` -> `MaxPool` 2x2 -> Conv 32->64 (k3) -> `ReLU` ->
/// `MaxPool` 2x2 -> flatten 64*54*54 -> Linear 64 -> `ReLU` -> Linear 1 ->
/// sigmoid.
///
/// Input shape `[batch, 3, 224, 224]`; output `[batch, 1]` in `(0, 1)`.
///
/// # Type Parameters
///
/// - `B`: The Burn backend (e.g., `NdArray`, `Wgpu`)
#[derive(Debug, Module)]
pub struct ConvNet<B: Backend> {
    conv1: Conv2d<B>,
    conv2: Conv2d<B>,
    pool: MaxPool2d,
    fc1: Linear<B>,
    fc2: Linear<B>,
}

impl<B: Backend> ConvNet<B> {
    /// Creates a new network with randomly initialized weights.
    #[must_use]
    pub fn new(config: ConvNetConfig, device: &B::Device) -> Self {
        let conv1 = Conv2dConfig::new([3, config.conv1_channels], [3, 3]).init(device);
        let conv2 =
            Conv2dConfig::new([config.conv1_channels, config.conv2_channels], [3, 3]).init(device);
        let pool = MaxPool2dConfig::new([2, 2]).with_strides([2, 2]).init();
        let fc1 = LinearConfig::new(config.flat_dim(), config.hidden).init(device);
        let fc2 = LinearConfig::new(config.hidden, 1).init(device);

        Self {
            conv1,
            conv2,
            pool,
            fc1,
            fc2,
        }
    }

    /// Runs the forward pass.
    ///
    /// # Arguments
    ///
    /// - `images`: Input tensor of shape `[batch, 3, 224, 224]`
    ///
    /// # Returns
    ///
    /// Fake-probabilities of shape `[batch, 1]`, each in `(0, 1)`.
    pub fn forward(&self, images: Tensor<B, 4>) -> Tensor<B, 2> {
        let x = self.pool.forward(relu(self.conv1.forward(images)));
        let x = self.pool.forward(relu(self.conv2.forward(x)));

        let [batch, channels, height, width] = x.dims();
        let x = x.reshape([batch, channels * height * width]);

        let x = relu(self.fc1.forward(x));
        sigmoid(self.fc2.forward(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn_ndarray::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn config_default() {
        let config = ConvNetConfig::default();
        assert_eq!(config.conv1_channels, 32);
        assert_eq!(config.conv2_channels, 64);
        assert_eq!(config.hidden, 64);
        assert!(config.is_valid());
    }

    #[test]
    fn config_flat_dim() {
        let config = ConvNetConfig::default();
        assert_eq!(config.flat_dim(), 186_624);
    }

    #[test]
    fn config_serialization() {
        let config = ConvNetConfig::default();
        let json = serde_json::to_string(&config);
        assert!(json.is_ok());

        let parsed: std::result::Result<ConvNetConfig, _> =
            serde_json::from_str(&json.unwrap_or_default());
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap_or_default(), config);
    }

    #[test]
    fn forward_output_shape() {
        let device = <TestBackend as Backend>::Device::default();
        let model = ConvNet::<TestBackend>::new(ConvNetConfig::default(), &device);

        let input = Tensor::<TestBackend, 4>::zeros([2, 3, 224, 224], &device);
        let output = model.forward(input);

        assert_eq!(output.dims(), [2, 1]);
    }

    #[test]
    fn forward_output_in_unit_interval() {
        let device = <TestBackend as Backend>::Device::default();
        let model = ConvNet::<TestBackend>::new(ConvNetConfig::default(), &device);

        let input = Tensor::<TestBackend, 4>::ones([1, 3, 224, 224], &device);
        let output = model.forward(input);
        let values = output.into_data().to_vec::<f32>().unwrap_or_default();

        assert_eq!(values.len(), 1);
        assert!(values[0] > 0.0 && values[0] < 1.0);
    }
}
