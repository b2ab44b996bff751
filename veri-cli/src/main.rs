//! Training entry point.
//!
//! Thin wrapper over the library training surface: parse flags, set up
//! logging, run, print where the best checkpoint landed.

use std::path::PathBuf;

use anyhow::Result;
use burn::backend::Autodiff;
use burn_ndarray::NdArray;
use clap::Parser;
use tracing::info;
use veri_training::{TrainConfig, TrainRequest, run_training};

type TrainBackend = Autodiff<NdArray<f32>>;

/// Train the image authenticity classifier.
#[derive(Parser)]
#[command(name = "veri-train")]
#[command(about = "Train the authenticity classifier on a labeled dataset", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory containing 'real' and 'fake' image subdirectories.
    #[arg(long)]
    data_dir: PathBuf,

    /// Directory to save trained checkpoints.
    #[arg(long, default_value = "./models")]
    model_dir: PathBuf,

    /// Training batch size.
    #[arg(long, default_value_t = 32)]
    batch_size: usize,

    /// Number of training epochs.
    #[arg(long, default_value_t = 10)]
    epochs: usize,

    /// Fraction of data to use for training.
    #[arg(long, default_value_t = 0.8)]
    train_split: f32,

    /// Seed for splitting and shuffling.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = TrainConfig::new(cli.epochs)
        .with_batch_size(cli.batch_size)
        .with_train_fraction(cli.train_split);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let request = TrainRequest::new(cli.data_dir)
        .with_model_dir(cli.model_dir)
        .with_config(config);

    info!(data_dir = %request.data_dir.display(), "starting training run");

    let device = Default::default();
    let run = run_training::<TrainBackend>(&request, &device)?;

    print!("{}", run.history.summary());
    println!(
        "Training completed. Best model saved to: {}",
        run.checkpoint.display()
    );

    Ok(())
}
