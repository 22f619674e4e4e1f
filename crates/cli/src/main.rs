mod config;

use anyhow::{Context, Result, bail};
use batch::{BatchConfig, BatchDriver};
use clap::{Parser, Subcommand};
use extract::{EmperorTable, Extractor, OllamaClient};
use graph::{GraphCompiler, PlaceMapping, RdfFormat, VocabularyMode};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "epigraph")]
#[command(about = "Inscriptions to records, records to extractions, extractions to RDF")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a TSV export into normalized JSON records
    Normalize {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Extract persons, careers and relationships with an LLM, resumably
    Extract {
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long)]
        model: Option<String>,
        #[arg(short, long)]
        limit: Option<usize>,
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Compile extraction results into an RDF graph
    Rdf {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long)]
        format: Option<RdfFormat>,
        /// JSON object mapping place names to Pleiades ids
        #[arg(short = 'p', long = "pleiades-mapping")]
        place_mapping: Option<PathBuf>,
        /// Skip controlled-vocabulary checks
        #[arg(long)]
        permissive: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    init_tracing(cli.log_json || config.log_json);

    match cli.command {
        Commands::Normalize { input, output } => {
            let (records, path) = ingest::normalize_file(&input, output.as_deref()).await?;
            println!("{} records -> {}", records.len(), path.display());
        }

        Commands::Extract {
            input,
            output,
            model,
            limit,
            base_url,
        } => {
            let Some(input) = input.or(config.batch.input.clone()) else {
                bail!("no input file: pass --input or set EPIGRAPH_INPUT");
            };
            let model = model.unwrap_or(config.llm.model.clone());
            let base_url = base_url.unwrap_or(config.llm.base_url.clone());
            let output = output.unwrap_or_else(|| batch::default_output_path(&input, &model));

            tracing::info!(
                model = %model,
                input = %input.display(),
                output = %output.display(),
                "Starting extraction"
            );

            let records = ingest::load_records(&input).await?;
            let batch_config = BatchConfig::new(&input, output, &model)
                .with_limit(limit.or(config.batch.limit))
                .with_checkpoint_interval(config.batch.checkpoint_interval);

            let extractor = Extractor::new(
                OllamaClient::new(base_url, model),
                Arc::new(EmperorTable::builtin()),
            );
            let summary = BatchDriver::new(extractor, batch_config).run(&records).await?;

            println!(
                "{} accepted ({} new, {} with career), {} errors",
                summary.total_accepted, summary.newly_accepted, summary.with_career, summary.errors
            );
        }

        Commands::Rdf {
            input,
            output,
            format,
            place_mapping,
            permissive,
        } => {
            let format = match format {
                Some(format) => format,
                None => config
                    .graph
                    .format
                    .parse::<RdfFormat>()
                    .context("EPIGRAPH_RDF_FORMAT is not a known format")?,
            };
            let output = output.unwrap_or_else(|| graph::default_output_path(&input, format));

            let places = match place_mapping.or(config.graph.place_mapping.clone()) {
                Some(path) => PlaceMapping::load(&path).await?,
                None => PlaceMapping::default(),
            };
            let mode = if permissive || config.graph.permissive {
                VocabularyMode::Permissive
            } else {
                VocabularyMode::Warn
            };

            let compiler = GraphCompiler::new(Arc::new(EmperorTable::builtin()))
                .with_mode(mode)
                .with_places(places);
            let (stats, diagnostics) =
                graph::compile_file(&input, &output, format, &compiler).await?;

            println!(
                "{} triples ({} persons, {} communities, {} inscriptions, {} career positions, \
                 {} benefactions, {} relationships) -> {}",
                stats.triples,
                stats.persons,
                stats.communities,
                stats.inscriptions,
                stats.career_positions,
                stats.benefactions,
                stats.relationships,
                output.display()
            );
            if !diagnostics.is_empty() {
                println!("{} vocabulary diagnostics (see log)", diagnostics.len());
            }
        }
    }

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_rdf_flags() {
        let cli = Cli::try_parse_from([
            "epigraph", "rdf", "-i", "x_career.json", "-f", "jsonld", "-p", "map.json",
            "--permissive", "--log-json",
        ])
        .unwrap();
        assert!(cli.log_json);
        match cli.command {
            Commands::Rdf {
                format,
                place_mapping,
                permissive,
                ..
            } => {
                assert_eq!(format, Some(RdfFormat::JsonLd));
                assert_eq!(place_mapping, Some(PathBuf::from("map.json")));
                assert!(permissive);
            }
            _ => panic!("expected rdf subcommand"),
        }
    }

    #[test]
    fn parses_extract_flags() {
        let cli =
            Cli::try_parse_from(["epigraph", "extract", "-m", "mistral", "-l", "5"]).unwrap();
        match cli.command {
            Commands::Extract { model, limit, input, .. } => {
                assert_eq!(model.as_deref(), Some("mistral"));
                assert_eq!(limit, Some(5));
                assert_eq!(input, None);
            }
            _ => panic!("expected extract subcommand"),
        }
    }
}
