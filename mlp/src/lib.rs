mod array_util;

mod traits;
pub use traits::{ActivationFn, Loss};

mod error;
pub use error::{Error, Result, Stage, VectorKind};

pub mod activation;
pub use activation::Sigmoid;

mod layer;
pub use layer::Layer;

mod network;
pub use network::Network;

pub mod loss;

mod trainer;
pub use trainer::{EpochStats, Example, MismatchPolicy, Trainer};
