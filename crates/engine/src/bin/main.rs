// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! `sqlsense` command-line front end
//!
//! Reads a buffer from a file or stdin and prints JSON to stdout. Logs go to
//! stderr and are controlled by `RUST_LOG`.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use sqlsense_catalog::{RefreshOutcome, SchemaCache, StaticSource};
use sqlsense_engine::{CompletionEngine, CompletionRequest, EngineConfig};
use sqlsense_ir::{CursorTarget, DialectId};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Connection key the CLI installs its snapshot under
const CLI_CONNECTION: &str = "cli";

#[derive(Debug, Parser)]
#[command(name = "sqlsense", version, about = "Statement resolution and completion for query editors")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the statement under the cursor or selection
    Statement {
        #[command(flatten)]
        buffer: BufferArgs,
        /// End of a selection starting at --cursor
        #[arg(long)]
        selection_end: Option<usize>,
    },
    /// Print ranked completion candidates
    Complete {
        #[command(flatten)]
        buffer: BufferArgs,
        /// Schema snapshot JSON file
        #[arg(long)]
        snapshot: Option<PathBuf>,
        /// Host settings JSON file (read from the "sqlsense" key)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Treat the request as explicitly invoked
        #[arg(long)]
        explicit: bool,
    },
    /// Print the classified completion context
    Context {
        #[command(flatten)]
        buffer: BufferArgs,
    },
    /// Print every statement in the buffer
    Split {
        #[command(flatten)]
        buffer: BufferArgs,
    },
    /// List supported dialect ids
    Dialects,
}

#[derive(Debug, Args)]
struct BufferArgs {
    /// Dialect id (unknown ids fall back to generic SQL)
    #[arg(long, short)]
    dialect: Option<String>,
    /// Buffer file; stdin when omitted
    #[arg(long, short)]
    input: Option<PathBuf>,
    /// Cursor byte offset; end of buffer when omitted
    #[arg(long, short)]
    cursor: Option<usize>,
}

impl BufferArgs {
    fn dialect(&self) -> Option<DialectId> {
        self.dialect.as_deref().map(DialectId::parse)
    }

    fn read(&self) -> Result<(String, usize)> {
        let buffer = match &self.input {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read buffer from {}", path.display()))?,
            None => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("failed to read buffer from stdin")?;
                text
            }
        };
        let cursor = self.cursor.unwrap_or(buffer.len());
        Ok((buffer, cursor))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    let cli = Cli::parse();
    match cli.command {
        Command::Statement {
            buffer,
            selection_end,
        } => {
            let (text, cursor) = buffer.read()?;
            let target = match selection_end {
                Some(end) => CursorTarget::Selection { start: cursor, end },
                None => CursorTarget::Offset(cursor),
            };
            let engine = CompletionEngine::for_dialect(buffer.dialect().unwrap_or_default());
            let statement = engine.resolve_statement(&text, target);
            print_json(&json!({ "statement": statement }))
        }
        Command::Complete {
            buffer,
            snapshot,
            config,
            explicit,
        } => {
            let mut engine_config = match &config {
                Some(path) => load_config(path)?,
                None => EngineConfig::default(),
            };
            if let Some(dialect) = buffer.dialect() {
                engine_config.dialect = dialect;
            }
            let cache = SchemaCache::new();
            if let Some(path) = &snapshot {
                load_snapshot(&cache, path).await?;
            }

            let (text, cursor) = buffer.read()?;
            let mut request = CompletionRequest::new(text, cursor);
            request.explicit = explicit;
            let engine = CompletionEngine::new(engine_config);
            print_json(&engine.complete_cached(&request, &cache))
        }
        Command::Context { buffer } => {
            let (text, cursor) = buffer.read()?;
            let engine = CompletionEngine::for_dialect(buffer.dialect().unwrap_or_default());
            let (span, context) = engine.context(&CompletionRequest::new(text, cursor));
            print_json(&json!({ "statement": span, "context": context }))
        }
        Command::Split { buffer } => {
            let (text, _) = buffer.read()?;
            let spans = sqlsense_engine::split_statements(&text, buffer.dialect().unwrap_or_default());
            print_json(&spans)
        }
        Command::Dialects => {
            let dialects: Vec<_> = DialectId::ALL
                .iter()
                .map(|d| json!({ "id": d.as_str(), "family": d.family() }))
                .collect();
            print_json(&dialects)
        }
    }
}

fn load_config(path: &Path) -> Result<EngineConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read settings from {}", path.display()))?;
    let settings: serde_json::Value =
        serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", path.display()))?;
    EngineConfig::from_settings(&settings).context("invalid engine settings")
}

async fn load_snapshot(cache: &SchemaCache, path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot from {}", path.display()))?;
    let source = StaticSource::from_json(CLI_CONNECTION, &raw)
        .with_context(|| format!("invalid snapshot in {}", path.display()))?;
    match cache.refresh(&source, CLI_CONNECTION).await {
        RefreshOutcome::Installed { .. } => Ok(()),
        outcome => bail!("snapshot was not installed: {outcome:?}"),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{out}");
    Ok(())
}
