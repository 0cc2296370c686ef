///
/// This module implements the CLI interface for bucket-ingest: command parsing,
/// argument validation and the user-visible reporting of transfer outcomes.
///
/// All data models and sync rules live in `bucket-ingest-core`; this module only
/// wires a loaded config and an [`S3Storage`] client into a [`SyncEngine`].
///
/// ## How To Use
/// - From the shell: `bucket-ingest --help`.
/// - Programmatically and in tests: call [`run`] with a constructed [`Cli`].
///
/// Category and file name are validated before the config is read, so a typo
/// never costs a credential lookup or a network call.
use crate::load_config::load_config;
use crate::s3::S3Storage;
use anyhow::{Context, Result};
use bucket_ingest_core::{Category, DataFileName, SyncEngine, SyncTarget, TransferOutcome};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI for bucket-ingest: list, fetch and publish project data files.
#[derive(Parser)]
#[clap(
    name = "bucket-ingest",
    version,
    about = "List, download and publish project data files in the shared bucket"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct FileArgs {
    /// Path to the YAML config file
    #[clap(long)]
    pub config: PathBuf,
    /// Data category, e.g. 01_raw or raw
    #[clap(long)]
    pub category: String,
    /// File name, e.g. 20210213-abc-raw-test.csv
    #[clap(long)]
    pub file: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the objects stored under a category
    List {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
        /// Data category, e.g. 01_raw or raw
        #[clap(long)]
        category: String,
        /// Print the listing as JSON
        #[clap(long)]
        json: bool,
    },
    /// Check whether a file has been published to the bucket
    Exists(FileArgs),
    /// Fetch a file into the local data folder unless it is already there
    Download(FileArgs),
    /// Publish a local file unless the bucket already has it
    Upload(FileArgs),
}

/// Extracted CLI logic entrypoint for integration tests and main()
pub fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::List {
            config,
            category,
            json,
        } => {
            let category: Category = category.parse()?;
            let engine = build_engine(&config)?.1;
            let listing = engine.list(category)?;
            tracing::info!(command = "list", count = listing.len(), "Listing complete");
            if json {
                println!("{}", serde_json::to_string_pretty(&listing)?);
            } else {
                for key in listing.iter() {
                    println!("{key}");
                }
            }
            Ok(())
        }
        Commands::Exists(args) => {
            let (target, engine) = prepare(&args)?;
            let exists = engine.exists(&target)?;
            tracing::info!(command = "exists", key = target.remote_key(), exists, "Probe complete");
            println!("{}: {}", target.remote_key(), if exists { "present" } else { "absent" });
            Ok(())
        }
        Commands::Download(args) => {
            let (target, engine) = prepare(&args)?;
            report("download", &target, engine.download(&target))
        }
        Commands::Upload(args) => {
            let (target, engine) = prepare(&args)?;
            report("upload", &target, engine.upload(&target))
        }
    }
}

fn prepare(args: &FileArgs) -> Result<(SyncTarget, SyncEngine<S3Storage>)> {
    let category: Category = args.category.parse()?;
    let filename = DataFileName::parse(args.file.as_str())?;
    let (config, engine) = build_engine(&args.config)?;
    let target = SyncTarget::new(&config.workspace, category, filename);
    Ok((target, engine))
}

fn build_engine(
    config_path: &std::path::Path,
) -> Result<(crate::load_config::CliConfig, SyncEngine<S3Storage>)> {
    let config = load_config(config_path)?;
    let client = S3Storage::new(&config.storage).context("Failed to construct S3 client")?;
    let engine = SyncEngine::new(&config.storage, client);
    Ok((config, engine))
}

fn report(command: &'static str, target: &SyncTarget, outcome: TransferOutcome) -> Result<()> {
    match outcome {
        TransferOutcome::Completed => {
            println!("{command} {}: completed", target.remote_key());
            Ok(())
        }
        TransferOutcome::Skipped(reason) => {
            tracing::info!(command, key = target.remote_key(), %reason, "Transfer skipped");
            println!("{command} {}: skipped ({reason})", target.remote_key());
            Ok(())
        }
        TransferOutcome::Failed(e) => {
            tracing::error!(command, key = target.remote_key(), error = %e, "Transfer failed");
            Err(anyhow::Error::new(e).context(format!("{command} of {} failed", target.remote_key())))
        }
    }
}
