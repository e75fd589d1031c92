use anyhow::{Context, Result};
use clap::Parser;
use jobmine_rust::config::{ColumnConfig, PipelineConfig};
use jobmine_rust::persistence;
use jobmine_rust::report::ColumnReport;
use jobmine_rust::structures::Column;
use jobmine_rust::TokenNormalizer;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn, Level};

#[derive(Parser, Debug)]
#[command(name = "jobmine-rust")]
#[command(about = "Turns job posting text columns into normalized noun tokens")]
struct Args {
    /// Input table (.csv or .json)
    #[arg(short, long)]
    input: PathBuf,

    /// Output table (.csv or .json)
    #[arg(short, long)]
    output: PathBuf,

    /// Pipeline config (.yaml, .yml or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Text columns to process; replaces the columns listed in the config
    #[arg(long = "column", value_delimiter = ',')]
    columns: Vec<String>,

    /// Drop tokens found in fewer documents than this
    #[arg(long)]
    min_documents: Option<usize>,

    /// Derive <column>Comb bigram columns
    #[arg(long, default_value = "false")]
    combinations: bool,

    /// Keep duplicate tokens within a document
    #[arg(long, default_value = "false")]
    keep_duplicates: bool,

    /// Run per-document stages in parallel
    #[arg(long, default_value = "false")]
    parallel: bool,

    /// Write a JSON statistics report for every token column
    #[arg(long)]
    report: Option<PathBuf>,

    /// Number of most common tokens listed per column in the report
    #[arg(long, default_value = "50")]
    report_top: usize,

    /// Debug logging
    #[arg(short, long, default_value = "false")]
    verbose: bool,
}

fn build_config(args: &Args) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_path(path)
            .with_context(|| format!("loading config {:?}", path))?,
        None => PipelineConfig::default(),
    };

    if !args.columns.is_empty() {
        config.columns = args
            .columns
            .iter()
            .map(|name| {
                config
                    .column(name)
                    .cloned()
                    .unwrap_or_else(|| ColumnConfig::new(name.as_str()))
            })
            .collect();
    }

    for column in &mut config.columns {
        if let Some(min) = args.min_documents {
            column.min_documents = min;
        }
        if args.combinations {
            column.combinations = true;
        }
        if args.keep_duplicates {
            column.remove_duplicates = false;
        }
    }
    if args.parallel {
        config.parallel = true;
    }

    if config.columns.is_empty() {
        anyhow::bail!("no text columns given; use --column or list them in the config");
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let config = build_config(&args)?;
    info!(
        "Columns: {}",
        config
            .columns
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let normalizer = TokenNormalizer::new(config).context("initializing pipeline")?;
    let table = persistence::read_table(&args.input)
        .with_context(|| format!("reading {:?}", args.input))?;

    let start = Instant::now();
    let output = normalizer.transform(&table)?;
    info!("Pipeline finished in {:?}", start.elapsed());

    for stats in &output.stats {
        info!(
            "{}: {} documents, languages {:?}, vocabulary {} -> {}, tokens {} -> {}",
            stats.column,
            stats.documents,
            stats.language_counts,
            stats.vocabulary_before_pruning,
            stats.vocabulary_after_pruning,
            stats.tokens_before_pruning,
            stats.tokens_after_pruning
        );
        if stats.detection_failures > 0 {
            warn!(
                "{}: language detection failed for {} documents, processed as German",
                stats.column, stats.detection_failures
            );
        }
        if stats.empty_documents > 0 {
            warn!("{}: {} documents have no tokens left", stats.column, stats.empty_documents);
        }
    }

    persistence::write_table(&output.table, &args.output)
        .with_context(|| format!("writing {:?}", args.output))?;

    if let Some(path) = &args.report {
        let reports: Vec<ColumnReport> = output
            .table
            .columns()
            .filter_map(|(name, column)| match column {
                Column::Tokens(tokens) => Some(ColumnReport::build(name, tokens, Some(args.report_top))),
                Column::Text(_) => None,
            })
            .collect();
        persistence::write_json(&reports, path)
            .with_context(|| format!("writing report {:?}", path))?;
        info!("Report for {} columns written to {:?}", reports.len(), path);
    }

    Ok(())
}
