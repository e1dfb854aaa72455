//! decrypt-relocate — run one invocation against the filesystem stores

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use decrypt_relocate::config::load_padding;
use decrypt_relocate::crypto::{load_public_key, seal};
use decrypt_relocate::secret::FsSecretStore;
use decrypt_relocate::store::FsObjectStore;
use decrypt_relocate::{
    load_config, Batch, BatchProcessor, BatchReport, ChangeNotification, PaddingMode,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Process an S3-style event notification (file or stdin)
    Relocate {
        /// Event JSON file; reads stdin when omitted
        #[arg(long)]
        event: Option<PathBuf>,
    },
    /// Process every object currently in a source bucket
    Scan {
        #[arg(long)]
        bucket: String,
    },
    /// Encrypt a payload so the pipeline can decrypt it
    Seal {
        /// Public key PEM (SPKI or PKCS#1), or a private key PEM
        #[arg(long)]
        public_key: PathBuf,
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// Defaults to the configured padding (pipeline fields not required), then oaep-sha1
        #[arg(long)]
        padding: Option<PaddingMode>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Cli::parse().command {
        Command::Relocate { event } => {
            let batch = match event {
                Some(path) => {
                    let file = File::open(&path)
                        .with_context(|| format!("cannot open {}", path.display()))?;
                    Batch::from_event_reader(BufReader::new(file))?
                }
                None => Batch::from_event_reader(io::stdin().lock())?,
            };
            run(&batch)
        }
        Command::Scan { bucket } => {
            let config = load_config()?;
            let objects = FsObjectStore::new(&config.storage.object_root);
            let batch: Batch = objects
                .list_keys(&bucket)
                .with_context(|| format!("cannot list bucket '{bucket}'"))?
                .iter()
                .map(|key| ChangeNotification::for_object(bucket.as_str(), key))
                .collect();
            info!("Found {} object(s) in '{bucket}'", batch.len());
            run(&batch)
        }
        Command::Seal {
            public_key,
            input,
            output,
            padding,
        } => {
            let padding = match padding {
                Some(padding) => padding,
                None => load_padding().context("cannot determine padding; pass --padding")?,
            };
            let pem = std::fs::read_to_string(&public_key)
                .with_context(|| format!("cannot read {}", public_key.display()))?;
            let public_key = load_public_key(&pem)?;
            let plaintext = std::fs::read(&input)
                .with_context(|| format!("cannot read {}", input.display()))?;
            let sealed = seal(&public_key, padding, &plaintext)?;
            std::fs::write(&output, &sealed)
                .with_context(|| format!("cannot write {}", output.display()))?;
            println!(
                "Sealed {} byte(s) with {padding} → {}",
                plaintext.len(),
                output.display()
            );
            Ok(())
        }
    }
}

fn run(batch: &Batch) -> Result<()> {
    let config = load_config()?;
    let secrets = FsSecretStore::new(&config.storage.secret_dir);
    let objects = FsObjectStore::new(&config.storage.object_root);

    let report = BatchProcessor::new(&secrets, &objects, &config.pipeline)
        .process(batch)
        .context("invocation aborted")?;

    print_summary(&report);
    Ok(())
}

fn print_summary(report: &BatchReport) {
    println!("\n=== BATCH COMPLETE ===");
    println!("Relocated: {}", report.relocated());
    println!("Failed: {}", report.failed());

    for outcome in report.failures() {
        if let Some(error) = outcome.error() {
            println!(
                "  {}/{} ({}): {error}",
                outcome.source_bucket,
                outcome.key,
                outcome.stage()
            );
        }
    }

    if report.outcomes.is_empty() {
        println!("No records to process.");
    }
}
