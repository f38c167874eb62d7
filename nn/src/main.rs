use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use ndarray::ArrayView1;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use mlp::{MismatchPolicy, Network, Trainer};

mod document;
use document::Document;

#[derive(Parser)]
#[command(about = "Simple neural network example.", long_about = None)]
struct Options {
    /// Input file to read the network spec, examples and inputs from
    #[arg(short = 'i', long = "input-file", value_name = "FILE")]
    input_file: PathBuf,

    /// Number of epochs to train the neural network for
    #[arg(short, long, default_value_t = 1000)]
    epochs: usize,

    /// Seed for weight initialization and example order; random if omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Skip examples whose vectors don't fit the network instead of stopping
    #[arg(long)]
    skip_mismatched: bool,

    /// Log per-epoch loss instead of showing a progress bar
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let options = Options::parse();
    init_logging(options.verbose);

    let document = Document::load(&options.input_file)?;
    let examples = document.examples();
    debug!(
        layers = ?document.network.layers,
        alpha = document.network.alpha,
        examples = examples.len(),
        inputs = document.inputs.len(),
        "loaded network document"
    );

    // Printed so that any run can be repeated with --seed.
    let seed = options.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut net = Network::new(&document.network.layers, document.network.alpha, &mut rng)
        .context("error building network")?;

    let mut trainer = Trainer::new(rng);
    if options.skip_mismatched {
        trainer.set_mismatch_policy(MismatchPolicy::Skip);
    }

    println!("training network (seed {seed})...");
    let bar = if options.verbose {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(options.epochs as u64)
    };
    bar.set_style(
        ProgressStyle::with_template("[{bar:40}] {pos}/{len} epochs, loss {msg}")
            .context("bad progress bar template")?
            .progress_chars("#>-"),
    );
    trainer
        .train_epochs(&mut net, &examples, options.epochs, |stats| {
            bar.set_message(format!("{:.6}", stats.loss));
            bar.inc(1);
        })
        .context("training failed")?;
    bar.finish();

    for input in &document.inputs {
        let result = net
            .predict(ArrayView1::from(input))
            .with_context(|| format!("error running input {input:?}"))?;
        println!("Running with input={input:?}, result={result}");
    }

    Ok(())
}
