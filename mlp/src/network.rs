use ndarray::prelude::*;
use rand::Rng;
use tracing::trace;

use crate::activation::Sigmoid;
use crate::array_util::{all_finite, check_len};
use crate::error::{Error, Result, Stage, VectorKind};
use crate::{ActivationFn, Layer};

/// A fully connected feedforward network trained one example at a time.
///
/// Layer 0 is the input layer. Every later layer is connected to the one
/// before it by a weight matrix; adjacency is purely positional.
#[derive(Debug, Clone)]
pub struct Network<F = Sigmoid> {
    layers: Vec<Layer>,
    learning_rate: f64,
    f: F,
}

impl Network<Sigmoid> {
    /// Build a network with the given number of neurons per layer, using the
    /// logistic activation everywhere.
    ///
    /// Weights and biases are drawn from `rng`, so a seeded generator gives a
    /// reproducible network.
    pub fn new<R>(layer_sizes: &[usize], learning_rate: f64, rng: &mut R) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        Self::with_activation(layer_sizes, learning_rate, Sigmoid, rng)
    }
}

impl<F: ActivationFn> Network<F> {
    pub fn with_activation<R>(
        layer_sizes: &[usize],
        learning_rate: f64,
        f: F,
        rng: &mut R,
    ) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        if layer_sizes.len() < 2 {
            return Err(Error::Configuration(format!(
                "need at least an input and an output layer, got {} layer size(s)",
                layer_sizes.len()
            )));
        }
        if let Some(l) = layer_sizes.iter().position(|&n| n == 0) {
            return Err(Error::Configuration(format!("layer {l} has no neurons")));
        }
        if !(learning_rate.is_finite() && learning_rate > 0.0) {
            return Err(Error::Configuration(format!(
                "learning rate must be positive and finite, got {learning_rate}"
            )));
        }

        let mut layers = Vec::with_capacity(layer_sizes.len());
        layers.push(Layer::new(layer_sizes[0], 0, rng));
        for pair in layer_sizes.windows(2) {
            layers.push(Layer::new(pair[1], pair[0], rng));
        }
        trace!(?layer_sizes, learning_rate, "built network");

        Ok(Network {
            layers,
            learning_rate,
            f,
        })
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> &Layer {
        &self.layers[index]
    }

    /// Mutable access to one layer, for inspecting or hand-setting its
    /// parameters.
    pub fn layer_mut(&mut self, index: usize) -> &mut Layer {
        &mut self.layers[index]
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn layer_sizes(&self) -> Vec<usize> {
        self.layers.iter().map(Layer::len).collect()
    }

    pub fn input_len(&self) -> usize {
        self.layers[0].len()
    }

    pub fn output_len(&self) -> usize {
        self.output_layer().len()
    }

    /// Total number of weights and biases that training adjusts.
    pub fn num_params(&self) -> usize {
        self.layers[1..].iter().map(Layer::num_params).sum()
    }

    /// Output layer activations left by the most recent forward pass.
    pub fn output(&self) -> ArrayView1<'_, f64> {
        self.output_layer().activation()
    }

    fn output_layer(&self) -> &Layer {
        // `new` guarantees at least two layers.
        &self.layers[self.layers.len() - 1]
    }

    /// Propagate `input` through every layer, overwriting each layer's `z`
    /// and `a`.
    ///
    /// The new values are stored only once every layer has produced finite
    /// sums. On error the layers still hold the previous completed pass.
    pub fn forward(&mut self, input: ArrayView1<'_, f64>) -> Result<()> {
        check_len(VectorKind::Input, self.input_len(), input)?;
        if !all_finite(input) {
            return Err(Error::NumericInstability {
                layer: 0,
                stage: Stage::Forward,
            });
        }

        let f = self.f;
        let mut passes: Vec<(Array1<f64>, Array1<f64>)> =
            Vec::with_capacity(self.layers.len() - 1);
        for l in 1..self.layers.len() {
            let prev = match passes.last() {
                Some((_, a)) => a.view(),
                None => input.view(),
            };
            let (z, a) = self.layers[l].apply(prev, f);
            if !all_finite(z.view()) {
                return Err(Error::NumericInstability {
                    layer: l,
                    stage: Stage::Forward,
                });
            }
            passes.push((z, a));
        }

        self.layers[0].load_input(input);
        for (layer, (z, a)) in self.layers[1..].iter_mut().zip(passes) {
            layer.store_pass(z, a);
        }
        Ok(())
    }

    /// Propagate error terms from the output layer back to the input layer,
    /// overwriting each layer's `δ`.
    ///
    /// Must follow a forward pass on the input that `expected_output` belongs
    /// to; the derivative is taken at the `z` values that pass stored. As with
    /// `forward`, nothing is stored unless every error term is finite.
    pub fn backward(&mut self, expected_output: ArrayView1<'_, f64>) -> Result<()> {
        check_len(VectorKind::ExpectedOutput, self.output_len(), expected_output)?;

        let f = self.f;
        let last = self.layers.len() - 1;
        // Collected from the output layer down.
        let mut deltas: Vec<Array1<f64>> = Vec::with_capacity(self.layers.len());
        for l in (0..=last).rev() {
            let delta = match deltas.last() {
                None => self.layers[l].output_delta(expected_output, f),
                Some(next_delta) => {
                    self.layers[l].hidden_delta(&self.layers[l + 1], next_delta.view(), f)
                }
            };
            if !all_finite(delta.view()) {
                return Err(Error::NumericInstability {
                    layer: l,
                    stage: Stage::Backward,
                });
            }
            deltas.push(delta);
        }

        for (layer, delta) in self.layers.iter_mut().rev().zip(deltas) {
            layer.store_delta(delta);
        }
        Ok(())
    }

    /// Apply the learning rule to every non-input layer, using the
    /// activations and error terms of the last forward/backward pair.
    pub fn update(&mut self) {
        let rate = self.learning_rate;
        for l in 1..self.layers.len() {
            let (before, rest) = self.layers.split_at_mut(l);
            rest[0].update(before[l - 1].activation(), rate);
        }
    }

    /// One training step on a single example: forward, backward, update.
    ///
    /// Both vectors are checked before anything is written, so a
    /// `DimensionMismatch` leaves the network exactly as it was.
    pub fn train(
        &mut self,
        input: ArrayView1<'_, f64>,
        expected_output: ArrayView1<'_, f64>,
    ) -> Result<()> {
        check_len(VectorKind::Input, self.input_len(), input)?;
        check_len(VectorKind::ExpectedOutput, self.output_len(), expected_output)?;
        self.forward(input)?;
        self.backward(expected_output)?;
        self.update();
        Ok(())
    }

    /// Run the network on `input` and return the output activations.
    ///
    /// Only the derived `z`/`a` buffers are written; weights and biases are
    /// left alone.
    pub fn predict(&mut self, input: ArrayView1<'_, f64>) -> Result<Array1<f64>> {
        self.forward(input)?;
        Ok(self.output().to_owned())
    }
}
