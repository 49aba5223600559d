use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use pd_core::{ingest, DedupConfig, Document};
use pd_dedup::Deduplicator;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "postdedup", version, about = "Remove near-duplicate posts from a tokenized corpus")]
struct Cli {
    /// JSON array of tokenized documents (`id`, `text`, `created_at`, `tokens`)
    #[arg(long, env = "POSTDEDUP_INPUT")]
    input: PathBuf,

    /// Optional JSON config file; flags below override its values
    #[arg(long, env = "POSTDEDUP_CONFIG")]
    config: Option<PathBuf>,

    /// Cosine similarity a pair must strictly exceed to count as duplicates
    #[arg(long)]
    threshold: Option<f64>,

    /// Keep documents with no semantic signal instead of removing them.
    /// `--keep-zero-signal false` restores removal over a config file.
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    keep_zero_signal: Option<bool>,

    /// Length blocks visited on each side by the window pass
    #[arg(long)]
    window_radius: Option<usize>,

    /// Directory receiving kept.json, removed.json and duplicates.json
    #[arg(long, env = "POSTDEDUP_OUT_DIR", default_value = "dedup_out")]
    out_dir: PathBuf,
}

/// Output row: the post without its token vectors.
#[derive(Serialize)]
struct PostRecord<'a> {
    id: &'a str,
    text: &'a str,
    created_at: DateTime<Utc>,
}

impl<'a> From<&'a Document> for PostRecord<'a> {
    fn from(doc: &'a Document) -> Self {
        Self { id: &doc.id, text: &doc.text, created_at: doc.created_at }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

fn resolve_config(cli: &Cli) -> Result<DedupConfig> {
    let mut config = match &cli.config {
        Some(path) => DedupConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => DedupConfig::default(),
    };
    if let Some(t) = cli.threshold {
        config = config.with_threshold(t);
    }
    if let Some(keep) = cli.keep_zero_signal {
        config = config.with_remove_zero_signal(!keep);
    }
    if let Some(r) = cli.window_radius {
        config = config.with_window_radius(r);
    }
    config.validate().context("invalid dedup configuration")?;
    Ok(config)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)
        .with_context(|| format!("failed to write {}", path.display()))
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    let documents = ingest::load_documents(&cli.input)
        .with_context(|| format!("failed to read documents from {}", cli.input.display()))?;
    let outcome = Deduplicator::new(config)?.run(&documents)?;

    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("failed to create {}", cli.out_dir.display()))?;
    let kept: Vec<PostRecord> = outcome.kept_documents(&documents).into_iter().map(PostRecord::from).collect();
    let removed: Vec<PostRecord> =
        outcome.removed_documents(&documents).into_iter().map(PostRecord::from).collect();
    write_json(&cli.out_dir.join("kept.json"), &kept)?;
    write_json(&cli.out_dir.join("removed.json"), &removed)?;
    write_json(&cli.out_dir.join("duplicates.json"), &outcome.report)?;

    info!(
        documents = outcome.stats.documents,
        kept = outcome.kept.len(),
        removed = outcome.stats.removed,
        groups = outcome.stats.groups,
        removal_pct = outcome.stats.removal_pct(),
        out_dir = %cli.out_dir.display(),
        "wrote dedup results"
    );
    Ok(())
}
