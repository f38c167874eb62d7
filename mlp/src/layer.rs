use ndarray::prelude::*;
use ndarray::Zip;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::Rng;

use crate::ActivationFn;

/// One layer of neurons: its learned parameters, plus the buffers written by
/// the most recent forward and backward pass.
///
/// A layer never refers to its neighbours. The network passes in whatever it
/// needs from the previous or next layer, by position.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Incoming weights. Shape is `(len, num_inputs)`; `weights[[j, i]]` is
    /// the weight from neuron `i` of the previous layer into neuron `j` of
    /// this one.
    ///
    /// The input layer has no predecessor, so its matrix has zero columns.
    weights: Array2<f64>,
    bias: Array1<f64>,
    /// Weighted sums before the nonlinearity (`z`). Always zero for the input
    /// layer.
    pre_activation: Array1<f64>,
    /// Outputs after the nonlinearity (`a`). For the input layer, a copy of
    /// the most recent input.
    activation: Array1<f64>,
    /// Error terms (`δ`).
    delta: Array1<f64>,
}

impl Layer {
    /// A layer of `len` neurons fed by `num_inputs` neurons. Weights and
    /// biases are drawn uniformly from `[0, 1)`.
    pub(crate) fn new<R>(len: usize, num_inputs: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let unit = Uniform::new(0.0, 1.0);
        Layer {
            weights: Array::random_using((len, num_inputs), unit, rng),
            bias: Array::random_using(len, unit, rng),
            pre_activation: Array::zeros(len),
            activation: Array::zeros(len),
            delta: Array::zeros(len),
        }
    }

    /// Number of neurons.
    pub fn len(&self) -> usize {
        self.bias.len()
    }

    /// Whether the layer has no neurons. Never true for a layer of a
    /// `Network`, which rejects empty layers.
    pub fn is_empty(&self) -> bool {
        self.bias.is_empty()
    }

    /// Number of neurons in the previous layer; zero for the input layer.
    pub fn num_inputs(&self) -> usize {
        self.weights.ncols()
    }

    pub fn weights(&self) -> ArrayView2<'_, f64> {
        self.weights.view()
    }

    /// Mutable access to the weights. The shape can't change through a view.
    pub fn weights_mut(&mut self) -> ArrayViewMut2<'_, f64> {
        self.weights.view_mut()
    }

    pub fn bias(&self) -> ArrayView1<'_, f64> {
        self.bias.view()
    }

    pub fn bias_mut(&mut self) -> ArrayViewMut1<'_, f64> {
        self.bias.view_mut()
    }

    pub fn pre_activation(&self) -> ArrayView1<'_, f64> {
        self.pre_activation.view()
    }

    pub fn activation(&self) -> ArrayView1<'_, f64> {
        self.activation.view()
    }

    pub fn delta(&self) -> ArrayView1<'_, f64> {
        self.delta.view()
    }

    /// Number of learned parameters that the update step adjusts.
    pub(crate) fn num_params(&self) -> usize {
        self.weights.len() + self.bias.len()
    }

    /// Make this the input layer's state for a new pass: `a` is the input
    /// itself and `z` is unused.
    pub(crate) fn load_input(&mut self, input: ArrayView1<'_, f64>) {
        self.activation.assign(&input);
        self.pre_activation.fill(0.0);
    }

    /// Forward step: `z = W·a_prev + b`, `a = f(z)`. Returns `(z, a)` without
    /// storing them.
    pub(crate) fn apply<F: ActivationFn>(
        &self,
        prev_activation: ArrayView1<'_, f64>,
        f: F,
    ) -> (Array1<f64>, Array1<f64>) {
        assert_eq!(prev_activation.len(), self.num_inputs());
        let z = self.weights.dot(&prev_activation) + &self.bias;
        let a = z.mapv(|z| f.f(z));
        (z, a)
    }

    /// Keep the result of a completed forward step.
    pub(crate) fn store_pass(&mut self, pre_activation: Array1<f64>, activation: Array1<f64>) {
        self.pre_activation = pre_activation;
        self.activation = activation;
    }

    /// Error terms for the output layer: `δ[j] = f'(z[j]) · (y[j] - a[j])`.
    pub(crate) fn output_delta<F: ActivationFn>(
        &self,
        expected: ArrayView1<'_, f64>,
        f: F,
    ) -> Array1<f64> {
        Zip::from(&self.pre_activation)
            .and(&self.activation)
            .and(&expected)
            .map_collect(|&z, &a, &y| f.df(z) * (y - a))
    }

    /// Error terms for any earlier layer: route `next_delta` back through the
    /// weights of `next`, then scale by this layer's local derivative.
    ///
    /// `δ[i] = f'(z[i]) · Σ_j next.W[j, i] · next_delta[j]`
    pub(crate) fn hidden_delta<F: ActivationFn>(
        &self,
        next: &Layer,
        next_delta: ArrayView1<'_, f64>,
        f: F,
    ) -> Array1<f64> {
        assert_eq!(next.num_inputs(), self.len());
        let routed = next.weights.t().dot(&next_delta);
        Zip::from(&self.pre_activation)
            .and(&routed)
            .map_collect(|&z, &e| f.df(z) * e)
    }

    pub(crate) fn store_delta(&mut self, delta: Array1<f64>) {
        self.delta = delta;
    }

    /// Update rule: `W[j, i] += α · a_prev[i] · δ[j]` and `b[j] += α · δ[j]`.
    ///
    /// Rows are this layer's neurons and columns the previous layer's, so the
    /// loop bounds come straight from the matrix shape.
    pub(crate) fn update(&mut self, prev_activation: ArrayView1<'_, f64>, learning_rate: f64) {
        Zip::from(self.weights.rows_mut())
            .and(&self.delta)
            .for_each(|mut row, &d| row.scaled_add(learning_rate * d, &prev_activation));
        self.bias.scaled_add(learning_rate, &self.delta);
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::activation::{sigmoid, Sigmoid};

    fn layer(weights: Array2<f64>, bias: Array1<f64>) -> Layer {
        let mut rng = StdRng::seed_from_u64(0);
        let mut layer = Layer::new(weights.nrows(), weights.ncols(), &mut rng);
        layer.weights_mut().assign(&weights);
        layer.bias_mut().assign(&bias);
        layer
    }

    #[test]
    fn shapes_and_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let layer = Layer::new(3, 4, &mut rng);
        assert_eq!(layer.len(), 3);
        assert_eq!(layer.num_inputs(), 4);
        assert_eq!(layer.weights().dim(), (3, 4));
        assert_eq!(layer.num_params(), 15);
        assert!(!layer.is_empty());
        assert!(layer
            .weights()
            .iter()
            .chain(layer.bias().iter())
            .all(|&p| (0.0..1.0).contains(&p)));

        let input = Layer::new(5, 0, &mut rng);
        assert_eq!(input.weights().dim(), (5, 0));
        assert_eq!(input.num_params(), 5);
    }

    #[test]
    fn apply_computes_weighted_sum() {
        let mut l = layer(array![[1.0, -2.0], [0.5, 0.25]], array![0.1, -0.2]);
        let (pre, act) = l.apply(array![3.0, 1.0].view(), Sigmoid);
        let z = [1.0 * 3.0 - 2.0 * 1.0 + 0.1, 0.5 * 3.0 + 0.25 * 1.0 - 0.2];
        for j in 0..2 {
            assert!((pre[j] - z[j]).abs() < 1e-12);
            assert!((act[j] - sigmoid(z[j])).abs() < 1e-12);
        }
        // Nothing is stored until the caller asks.
        assert_eq!(l.activation(), array![0.0, 0.0]);
        l.store_pass(pre.clone(), act);
        assert_eq!(l.pre_activation(), pre);
    }

    #[test]
    fn deltas() {
        let mut hidden = layer(array![[0.4], [-0.3]], array![0.0, 0.1]);
        let mut out = layer(array![[2.0, -1.0]], array![0.5]);
        let (z, a) = hidden.apply(array![1.0].view(), Sigmoid);
        hidden.store_pass(z, a);
        let (z, a) = out.apply(hidden.activation(), Sigmoid);
        out.store_pass(z, a);

        let d = out.output_delta(array![1.0].view(), Sigmoid);
        out.store_delta(d);
        let z = out.pre_activation()[0];
        let expected = Sigmoid.df(z) * (1.0 - sigmoid(z));
        assert!((out.delta()[0] - expected).abs() < 1e-12);

        let hidden_delta = hidden.hidden_delta(&out, out.delta(), Sigmoid);
        let d = out.delta()[0];
        for (i, w) in [2.0, -1.0].into_iter().enumerate() {
            let expected = Sigmoid.df(hidden.pre_activation()[i]) * w * d;
            assert!((hidden_delta[i] - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn update_uses_source_and_destination_sizes() {
        // Three inputs feeding two neurons: a shape where mixing up the
        // two layer sizes would go out of bounds or miss weights.
        let mut l = layer(Array2::zeros((2, 3)), Array1::zeros(2));
        l.store_delta(array![1.0, -2.0]);
        l.update(array![1.0, 2.0, 3.0].view(), 0.5);
        assert_eq!(l.weights(), array![[0.5, 1.0, 1.5], [-1.0, -2.0, -3.0]]);
        assert_eq!(l.bias(), array![0.5, -1.0]);
    }
}
