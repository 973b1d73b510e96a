use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use prompt_architect::batch;
use prompt_architect::model::Document;
use prompt_architect::parser::{self, rules::LINE_RULES};
use prompt_architect::settings::Settings;

#[derive(Parser)]
#[command(name = "prompt_architect", about = "Structure messy project notes into a production document")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the partial update extracted from a notes file
    Extract {
        /// Notes file, or "-" for stdin
        notes: PathBuf,
        /// Current document (JSON); an empty document when omitted
        #[arg(short, long)]
        document: Option<PathBuf>,
    },
    /// Extract and merge into the document, printing the result
    Apply {
        /// Notes file, or "-" for stdin
        notes: PathBuf,
        #[arg(short, long)]
        document: Option<PathBuf>,
    },
    /// Extract every notes file in a directory
    Batch {
        dir: PathBuf,
        #[arg(short, long)]
        document: Option<PathBuf>,
        /// Max files to process (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Show the key routing rules in evaluation order
    Rules,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load().context("loading settings")?;

    match cli.command {
        Commands::Extract { notes, document } => {
            let doc = load_document(document.as_deref())?;
            let raw = read_notes(&notes)?;
            let result = parser::extract(&raw, &doc);
            print_json(&result, settings.pretty)?;
        }
        Commands::Apply { notes, document } => {
            let mut doc = load_document(document.as_deref())?;
            let raw = read_notes(&notes)?;
            let result = parser::extract(&raw, &doc);
            if result.is_empty() {
                info!("nothing extracted, document unchanged");
            } else {
                doc.apply(result);
            }
            print_json(&doc, settings.pretty)?;
        }
        Commands::Batch { dir, document, limit } => {
            let doc = load_document(document.as_deref())?;
            let mut paths = batch::discover(&dir, &settings.extensions())?;
            if let Some(n) = limit {
                paths.truncate(n);
            }
            if paths.is_empty() {
                info!(dir = %dir.display(), "no notes files found");
                return Ok(());
            }
            info!(files = paths.len(), "extracting notes files");
            let entries = batch::extract_files(&paths, &doc, settings.chunk_size)?;
            print_overview(&entries);
        }
        Commands::Rules => {
            for (i, rule) in LINE_RULES.iter().enumerate() {
                let triggers: Vec<String> = rule.triggers.iter().map(|t| t.to_string()).collect();
                println!("{:>3} | {:<32} | {}", i + 1, rule.target, triggers.join(" OR "));
            }
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    Ok(())
}

fn load_document(path: Option<&Path>) -> Result<Document> {
    let Some(path) = path else {
        return Ok(Document::default());
    };
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing document {}", path.display()))
}

fn read_notes(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut raw = String::new();
        io::stdin().read_to_string(&mut raw).context("reading notes from stdin")?;
        return Ok(raw);
    }
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}

fn print_overview(entries: &[batch::BatchEntry]) {
    println!(
        "{:>3} | {:<24} | {:<24} | {:>5} | {:>5} | {}",
        "#", "File", "Title", "Chars", "Seqs", "Groups"
    );
    println!("{}", "-".repeat(96));

    for (i, e) in entries.iter().enumerate() {
        let file = e
            .path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();
        let title = e.result.title.as_deref().unwrap_or("-");
        let chars = e.result.characters.as_ref().map_or(0, Vec::len);
        let seqs = e.result.sequences.as_ref().map_or(0, Vec::len);
        let groups: Vec<&str> = e.result.touched_groups().iter().map(|g| g.name()).collect();

        println!(
            "{:>3} | {:<24} | {:<24} | {:>5} | {:>5} | {}",
            i + 1,
            truncate(&file, 24),
            truncate(title, 24),
            chars,
            seqs,
            groups.join(", ")
        );
    }

    let empty = entries.iter().filter(|e| e.result.is_empty()).count();
    println!("\n{} files | {} with nothing to extract", entries.len(), empty);
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
