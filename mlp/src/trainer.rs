use ndarray::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::loss::SquaredError;
use crate::{ActivationFn, Loss, Network};

/// One labeled training example.
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    pub input: Array1<f64>,
    pub expected: Array1<f64>,
}

impl Example {
    pub fn new(input: Vec<f64>, expected: Vec<f64>) -> Self {
        Example {
            input: Array1::from(input),
            expected: Array1::from(expected),
        }
    }
}

/// What the training loop does with an example whose vectors don't fit the
/// network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MismatchPolicy {
    /// Stop and return the `DimensionMismatch` error.
    #[default]
    Abort,
    /// Log a warning, count the example as skipped, and carry on.
    Skip,
}

/// Summary of one pass over the training set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EpochStats {
    /// Zero-based epoch number, counted across the trainer's lifetime.
    pub epoch: usize,
    /// Mean loss over trained examples, measured on each example's forward
    /// pass, before the update it caused.
    pub loss: f64,
    pub accuracy: f64,
    pub trained: usize,
    pub skipped: usize,
}

/// Drives a `Network` through epochs of single-example training steps, in a
/// freshly shuffled order each epoch.
///
/// The trainer owns its random number generator. Seed it to make the example
/// order (and hence the whole run) reproducible.
#[derive(Debug)]
pub struct Trainer<R, L = SquaredError> {
    rng: R,
    loss: L,
    policy: MismatchPolicy,
    epochs_run: usize,
}

impl<R: Rng> Trainer<R> {
    pub fn new(rng: R) -> Self {
        Trainer {
            rng,
            loss: SquaredError,
            policy: MismatchPolicy::Abort,
            epochs_run: 0,
        }
    }
}

impl<R: Rng, L: Loss> Trainer<R, L> {
    /// Report progress with a different loss function.
    pub fn with_loss<L2: Loss>(self, loss: L2) -> Trainer<R, L2> {
        Trainer {
            rng: self.rng,
            loss,
            policy: self.policy,
            epochs_run: self.epochs_run,
        }
    }

    pub fn set_mismatch_policy(&mut self, policy: MismatchPolicy) {
        self.policy = policy;
    }

    pub fn mismatch_policy(&self) -> MismatchPolicy {
        self.policy
    }

    /// Number of epochs completed so far.
    pub fn epochs_run(&self) -> usize {
        self.epochs_run
    }

    /// Train on every example once, in a random order.
    ///
    /// Each example's train step runs to completion before the next begins.
    /// An error aborts the epoch partway through; the examples already
    /// visited keep their updates.
    pub fn train_epoch<F: ActivationFn>(
        &mut self,
        net: &mut Network<F>,
        examples: &[Example],
    ) -> Result<EpochStats> {
        let mut order: Vec<usize> = (0..examples.len()).collect();
        order.shuffle(&mut self.rng);

        let mut stats = EpochStats {
            epoch: self.epochs_run,
            ..EpochStats::default()
        };
        let mut loss_total = 0.0;
        let mut accuracy_total = 0.0;

        for i in order {
            let example = &examples[i];
            match net.train(example.input.view(), example.expected.view()) {
                Ok(()) => {}
                Err(err @ Error::DimensionMismatch { .. }) if self.policy == MismatchPolicy::Skip => {
                    warn!(example = i, %err, "skipping example");
                    stats.skipped += 1;
                    continue;
                }
                Err(err) => return Err(err),
            }

            // The output layer still holds this example's forward pass.
            loss_total += self.loss.loss(example.expected.view(), net.output());
            accuracy_total += self.loss.accuracy(example.expected.view(), net.output());
            stats.trained += 1;
        }

        if stats.trained > 0 {
            stats.loss = loss_total / stats.trained as f64;
            stats.accuracy = accuracy_total / stats.trained as f64;
        }
        self.epochs_run += 1;

        debug!(
            epoch = stats.epoch,
            loss = stats.loss,
            accuracy = stats.accuracy,
            skipped = stats.skipped,
            "finished epoch"
        );
        Ok(stats)
    }

    /// Run `epochs` epochs, calling `on_epoch` after each one.
    pub fn train_epochs<F, C>(
        &mut self,
        net: &mut Network<F>,
        examples: &[Example],
        epochs: usize,
        mut on_epoch: C,
    ) -> Result<Vec<EpochStats>>
    where
        F: ActivationFn,
        C: FnMut(&EpochStats),
    {
        let mut history = Vec::with_capacity(epochs);
        for _ in 0..epochs {
            let stats = self.train_epoch(net, examples)?;
            on_epoch(&stats);
            history.push(stats);
        }
        Ok(history)
    }
}
