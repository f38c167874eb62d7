//! The JSON document describing a network, its training examples, and the
//! inputs to run once training is done.
//!
//! ```json
//! {
//!     "_comment": "Neural network implementation of OR gate",
//!     "network": { "layers": [2, 5, 5, 1], "alpha": 0.1 },
//!     "examples": [
//!         [[0.0, 0.0], [0.0]],
//!         [[0.0, 1.0], [1.0]]
//!     ],
//!     "inputs": [[0, 0], [1, 0]]
//! }
//! ```
//!
//! Fields other than these are ignored.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use mlp::Example;

#[derive(Debug, Deserialize)]
pub struct Document {
    pub network: NetworkSpec,
    /// `(input, expected output)` pairs.
    #[serde(default)]
    pub examples: Vec<(Vec<f64>, Vec<f64>)>,
    /// Inputs to predict outputs for after training.
    #[serde(default)]
    pub inputs: Vec<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
pub struct NetworkSpec {
    /// Number of neurons in each layer, input layer first.
    pub layers: Vec<usize>,
    /// Learning rate.
    pub alpha: f64,
}

impl Document {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("error reading input file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("error in input file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid network document")
    }

    pub fn examples(&self) -> Vec<Example> {
        self.examples
            .iter()
            .map(|(input, expected)| Example::new(input.clone(), expected.clone()))
            .collect()
    }
}
