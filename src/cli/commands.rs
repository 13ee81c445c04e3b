use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};

use super::report::{render_report, summary_line};
use crate::identification::{StaticIdentifier, identify};
use crate::models::HealthStatus;
use crate::normalizer::{NormalizedImage, normalize_file};
use crate::storage::{FileStore, HistoryStore, Persisted};
use crate::utils::{format_path_with_tilde, get_data_dir};

#[derive(Parser)]
#[command(name = "botanix")]
#[command(version = "0.1.0")]
#[command(
    about = "Identify plants from photos and keep a history of identifications",
    long_about = None
)]
pub struct Cli {
    /// Directory holding the identification history
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Downscale and re-encode an image into an upload-ready data URI
    Normalize {
        image: PathBuf,
        /// Write the data URI to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Record an identification from an image and a saved model response
    Import { image: PathBuf, response: PathBuf },
    /// List past identifications, newest first
    History,
    /// Show the full report for one identification
    Show {
        /// Record id (or a unique prefix of it)
        id: String,
    },
    /// Show statistics about the history
    Stats,
    /// Delete all stored identifications
    Clear,
}

fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env = env_logger::Env::default().default_filter_or(default_level);
    let _ = env_logger::Builder::from_env(env).format_timestamp_millis().try_init();
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let data_dir = cli.data_dir.as_deref();
    match &cli.command {
        Some(Commands::Normalize { image, output }) => normalize_command(image, output.as_deref()),
        Some(Commands::Import { image, response }) => import_command(data_dir, image, response),
        Some(Commands::History) => history_command(data_dir),
        Some(Commands::Show { id }) => show_command(data_dir, id),
        Some(Commands::Stats) => stats_command(data_dir),
        Some(Commands::Clear) => clear_command(data_dir),
        None => {
            println!("Use --help for usage information");
            Ok(())
        }
    }
}

fn open_history(data_dir: Option<&Path>) -> Result<(HistoryStore, PathBuf)> {
    let dir = get_data_dir(data_dir)?;
    log::debug!("DATA_DIR path={}", dir.display());
    Ok((HistoryStore::open(FileStore::new(&dir)), dir))
}

/// Read and normalize an image. `Ok(None)` means the file is not an image.
fn load_image(path: &Path) -> Result<Option<NormalizedImage>> {
    normalize_file(path).with_context(|| format!("Failed to normalize image: {}", path.display()))
}

fn normalize_command(image: &Path, output: Option<&Path>) -> Result<()> {
    let Some(normalized) = load_image(image)? else {
        println!("Skipped {}: not an image", image.display());
        return Ok(());
    };

    let (sw, sh) = normalized.source_dimensions;
    let (w, h) = normalized.dimensions;
    match output {
        Some(path) => {
            fs::write(path, normalized.payload.as_str())
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            println!("Source: {}x{} ({:?})", sw, sh, normalized.source_format);
            println!("Output: {}x{} JPEG, {} bytes", w, h, normalized.encoded_bytes);
            println!(
                "Payload: {} bytes written to {}",
                normalized.payload.encoded_len(),
                path.display()
            );
        }
        None => {
            eprintln!("Source: {}x{} ({:?})", sw, sh, normalized.source_format);
            eprintln!("Output: {}x{} JPEG, {} bytes", w, h, normalized.encoded_bytes);
            println!("{}", normalized.payload);
        }
    }

    Ok(())
}

fn import_command(data_dir: Option<&Path>, image: &Path, response: &Path) -> Result<()> {
    let Some(normalized) = load_image(image)? else {
        println!("Skipped {}: not an image", image.display());
        return Ok(());
    };

    let text = fs::read_to_string(response)
        .with_context(|| format!("Failed to read response file: {}", response.display()))?;

    let record = match identify(&StaticIdentifier::new(text), &normalized.payload) {
        Ok(record) => record,
        Err(e) => bail!("{}", e),
    };

    let (history, dir) = open_history(data_dir)?;
    if history.append(record.clone()) == Persisted::No {
        eprintln!(
            "Warning: could not save history to {}; the identification was not stored",
            format_path_with_tilde(&dir)
        );
    }

    print!("{}", render_report(&record));
    Ok(())
}

fn history_command(data_dir: Option<&Path>) -> Result<()> {
    let (history, _) = open_history(data_dir)?;
    let records = history.all();

    if records.is_empty() {
        println!("No identifications yet");
        return Ok(());
    }

    let now = Utc::now();
    for record in &records {
        println!("{}", summary_line(record, &now));
    }
    Ok(())
}

fn show_command(data_dir: Option<&Path>, id: &str) -> Result<()> {
    let (history, _) = open_history(data_dir)?;

    let record = match history.get(id) {
        Some(record) => record,
        None => {
            let matches: Vec<_> =
                history.all().into_iter().filter(|r| r.id.starts_with(id)).collect();
            match matches.len() {
                0 => bail!("No identification with id {}", id),
                1 => matches.into_iter().next().context("prefix match vanished")?,
                n => bail!("Id prefix {} is ambiguous ({} matches)", id, n),
            }
        }
    };

    print!("{}", render_report(&record));
    Ok(())
}

fn stats_command(data_dir: Option<&Path>) -> Result<()> {
    let (history, dir) = open_history(data_dir)?;
    let records = history.all();

    let mut by_status: BTreeMap<&str, usize> = BTreeMap::new();
    for record in &records {
        *by_status.entry(record.health_status().as_str()).or_default() += 1;
    }

    println!("Plant Identification Statistics");
    println!("===============================");
    println!("Total identifications: {}", records.len());
    for status in HealthStatus::ALL {
        if let Some(count) = by_status.get(status.as_str()) {
            println!("  {}: {}", status, count);
        }
    }
    println!();
    println!("Data directory: {}", format_path_with_tilde(&dir));

    if let Some(oldest) = records.last() {
        println!("Oldest entry: {}", oldest.timestamp.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(newest) = records.first() {
        println!("Newest entry: {}", newest.timestamp.format("%Y-%m-%d %H:%M:%S"));
    }

    Ok(())
}

fn clear_command(data_dir: Option<&Path>) -> Result<()> {
    let (history, _) = open_history(data_dir)?;
    let count = history.len();

    if history.clear() == Persisted::No {
        bail!("Failed to remove stored history");
    }
    println!("Cleared {} identifications", count);
    Ok(())
}
