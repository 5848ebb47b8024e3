//! Evaluation CLI for exercising the name-matching pipeline.
//!
//! Usage:
//!     eval parse "Acacia dealbata Link"
//!     eval phonetic "Acacia dealbata" "Acacia dealbatta"
//!     eval build --source plants.csv --source fungi.csv
//!     eval search "Macropus rufus" --source fauna.csv --kingdom Animalia

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;

use taxamatch_backend_memory::MemoryStore;
use taxamatch_explain::{describe_error, describe_match_type, describe_quality, Explanation};
use taxamatch_features::phonetic_key;
use taxamatch_index::{IndexBuilder, PriorityConfig, SourceDataset, SourceRow};
use taxamatch_model::RankType;
use taxamatch_parser::NameParser;
use taxamatch_search::{MatchError, MatchResolver, SearchRequest};

#[derive(Parser)]
#[command(name = "eval")]
#[command(about = "Evaluate scientific-name matching quality")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse names and show their structure
    Parse {
        /// Names to parse
        names: Vec<String>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Compute phonetic keys
    Phonetic {
        /// Names to encode
        names: Vec<String>,
    },

    /// Build an index from CSV sources and report its statistics
    Build {
        /// CSV source files, highest-priority first unless --priorities is given
        #[arg(short, long = "source", required = true)]
        sources: Vec<PathBuf>,

        /// JSON file mapping dataset id to priority
        #[arg(short, long)]
        priorities: Option<PathBuf>,
    },

    /// Build an index from CSV sources and resolve a name against it
    Search {
        /// Name to resolve
        name: String,

        /// CSV source files
        #[arg(short, long = "source", required = true)]
        sources: Vec<PathBuf>,

        /// JSON file mapping dataset id to priority
        #[arg(short, long)]
        priorities: Option<PathBuf>,

        /// Kingdom hint for homonym resolution
        #[arg(short, long)]
        kingdom: Option<String>,

        /// Restrict the match to one rank
        #[arg(short, long)]
        rank: Option<String>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("taxamatch=debug".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { names, format } => run_parse(&names, &format),
        Commands::Phonetic { names } => run_phonetic(&names),
        Commands::Build { sources, priorities } => run_build(&sources, priorities.as_deref()),
        Commands::Search {
            name,
            sources,
            priorities,
            kingdom,
            rank,
            format,
        } => run_search(&name, &sources, priorities.as_deref(), kingdom, rank, &format),
    }
}

fn run_parse(names: &[String], format: &str) -> Result<()> {
    let parser = NameParser::new();
    for name in names {
        let parsed = parser.parse(name);
        if format == "json" {
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        } else {
            println!("{name}");
            println!("  canonical: {}", parsed.canonical_name());
            if let Some(rank) = parsed.rank() {
                println!("  rank: {rank}");
            }
            if let Some(author) = parsed.authorship() {
                println!("  authorship: {author}");
            }
            println!("  form: {}", form_of(&parsed));
        }
    }
    Ok(())
}

fn form_of(parsed: &taxamatch_model::ParsedName) -> &'static str {
    use taxamatch_model::ParsedName;
    match parsed {
        ParsedName::WellFormed(_) => "well-formed",
        ParsedName::Placeholder(_) => "placeholder",
        ParsedName::Phrase(_) => "phrase",
        ParsedName::Unparsable { .. } => "unparsable",
    }
}

fn run_phonetic(names: &[String]) -> Result<()> {
    for name in names {
        println!("{name} -> {}", phonetic_key(name));
    }
    Ok(())
}

fn run_build(sources: &[PathBuf], priorities: Option<&Path>) -> Result<()> {
    let (_, report) = build_index(sources, priorities)?;
    println!("datasets:   {}", report.datasets);
    println!("rows:       {}", report.rows);
    println!("indexed:    {}", report.indexed);
    println!("duplicates: {}", report.duplicates);
    println!("homonyms:   {}", report.homonyms);
    for skipped in &report.skipped {
        println!("skipped {} in {}: {}", skipped.lsid, skipped.dataset_id, skipped.reason);
    }
    Ok(())
}

fn run_search(
    name: &str,
    sources: &[PathBuf],
    priorities: Option<&Path>,
    kingdom: Option<String>,
    rank: Option<String>,
    format: &str,
) -> Result<()> {
    let (store, report) = build_index(sources, priorities)?;
    tracing::info!(indexed = report.indexed, "index ready");
    let resolver = MatchResolver::new(store);

    let mut request = SearchRequest::new(name);
    request.kingdom = kingdom;
    if let Some(rank) = rank {
        request.rank = Some(
            RankType::from_name(&rank).with_context(|| format!("unknown rank {rank:?}"))?,
        );
    }

    match resolver.search(request) {
        Ok(result) => {
            let explanation = Explanation::from_result(name, &result);
            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&explanation)?);
            } else {
                println!("{}", explanation.summary());
                if let Some(match_type) = result.match_type {
                    println!("  {}", describe_match_type(match_type));
                }
                for flag in &result.quality {
                    println!("  {}", describe_quality(*flag));
                }
            }
            Ok(())
        }
        Err(e @ MatchError::Homonym { .. }) => {
            eprintln!("{}", describe_error(&e));
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

fn build_index(
    sources: &[PathBuf],
    priorities: Option<&Path>,
) -> Result<(MemoryStore, taxamatch_index::BuildReport)> {
    let priorities = match priorities {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            PriorityConfig::from_json(&json).context("parsing priorities")?
        }
        None => PriorityConfig::default(),
    };
    let mut datasets = Vec::with_capacity(sources.len());
    for path in sources {
        datasets.push(load_dataset(path)?);
    }
    let builder = IndexBuilder::new(priorities);
    Ok(builder.build(&datasets)?)
}

/// One CSV row. Vernacular names arrive pipe-separated in a single column.
#[derive(Debug, Deserialize)]
struct CsvRow {
    lsid: String,
    name: String,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    name_complete: Option<String>,
    #[serde(default)]
    rank: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    accepted_lsid: Option<String>,
    #[serde(default)]
    kingdom: Option<String>,
    #[serde(default)]
    phylum: Option<String>,
    #[serde(default)]
    class: Option<String>,
    #[serde(default)]
    order: Option<String>,
    #[serde(default)]
    family: Option<String>,
    #[serde(default)]
    genus: Option<String>,
    #[serde(default)]
    species: Option<String>,
    #[serde(default)]
    vernacular_names: Option<String>,
}

impl From<CsvRow> for SourceRow {
    fn from(row: CsvRow) -> SourceRow {
        SourceRow {
            lsid: row.lsid,
            name: row.name,
            author: row.author,
            name_complete: row.name_complete,
            rank: row.rank,
            status: row.status,
            accepted_lsid: row.accepted_lsid,
            kingdom: row.kingdom,
            phylum: row.phylum,
            class: row.class,
            order: row.order,
            family: row.family,
            genus: row.genus,
            species: row.species,
            vernacular_names: row
                .vernacular_names
                .map(|names| {
                    names
                        .split('|')
                        .map(str::trim)
                        .filter(|n| !n.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

fn load_dataset(path: &Path) -> Result<SourceDataset> {
    let id = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset")
        .to_string();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut rows = Vec::new();
    for record in reader.deserialize::<CsvRow>() {
        let row = record.with_context(|| format!("reading {}", path.display()))?;
        rows.push(SourceRow::from(row));
    }
    tracing::debug!(dataset = %id, rows = rows.len(), "loaded source");
    Ok(SourceDataset { id, rows })
}
