use analytics::{AggregationEngine, AnalysisDataset, AnalysisParams};
use clap::{Parser, Subcommand};
use configuration::Config;
use ingest::IngestError;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod render;

/// The main entry point for the trade aggregation application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = configuration::load_config(&cli.config)?;

    match cli.command {
        Commands::Report { seed, random_seed } => {
            let seed = effective_seed(&config, seed, random_seed);
            handle_report(&config, seed)
        }
        Commands::Export {
            output,
            seed,
            random_seed,
        } => {
            let seed = effective_seed(&config, seed, random_seed);
            handle_export(&config, &output, seed)
        }
        Commands::Serve => web_server::run_server(config).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Aggregates a single-reporter trade extract into yearly, per-importer and
/// importer × year summaries.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the aggregate report: summary metrics, yearly shares, the
    /// importer ranking and the top-N heatmap matrix.
    Report {
        /// Override the configured RNG seed for the synthetic-year draw.
        #[arg(long)]
        seed: Option<u64>,

        /// Force an entropy-seeded draw, ignoring any configured seed.
        #[arg(long, conflicts_with = "seed")]
        random_seed: bool,
    },

    /// Write the filtered-and-enriched dataset to a `t,i,j,k,v,q` CSV file.
    Export {
        /// Destination path for the exported CSV.
        #[arg(long, default_value = "trade_export.csv")]
        output: PathBuf,

        /// Override the configured RNG seed for the synthetic-year draw.
        #[arg(long)]
        seed: Option<u64>,

        /// Force an entropy-seeded draw, ignoring any configured seed.
        #[arg(long, conflicts_with = "seed")]
        random_seed: bool,
    },

    /// Launch the interactive dashboard server.
    Serve,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_report(config: &Config, seed: Option<u64>) -> anyhow::Result<()> {
    let Some(dataset) = build_dataset(config, seed)? else {
        return Ok(());
    };

    if dataset.records.is_empty() {
        println!(
            "No records match product {} in the loaded extract.",
            config.analysis.product
        );
        return Ok(());
    }

    println!(
        "Export analysis for product {} (years {}-{})",
        config.analysis.product, config.analysis.year_min, config.analysis.year_max
    );
    println!("\n--- Summary ---\n{}", render::summary_table(&dataset.summary));
    println!("\n--- Value by year ---\n{}", render::yearly_table(&dataset.yearly));
    println!(
        "\n--- Importer ranking ---\n{}",
        render::importer_table(&dataset.importers)
    );
    println!(
        "\n--- Top {} importers by year ---\n{}",
        dataset.matrix.importers.len(),
        render::matrix_table(&dataset.matrix)
    );

    Ok(())
}

fn handle_export(config: &Config, output: &Path, seed: Option<u64>) -> anyhow::Result<()> {
    let Some(dataset) = build_dataset(config, seed)? else {
        return Ok(());
    };

    let csv = ingest::enriched_to_csv(&dataset.records)?;
    std::fs::write(output, csv)?;
    println!(
        "Wrote {} rows to {}",
        dataset.records.len(),
        output.display()
    );

    Ok(())
}

/// Resolves the synthetic-year seed for one invocation: `--random-seed`
/// forces an entropy draw, `--seed` overrides the configured value, and
/// otherwise the configuration decides.
fn effective_seed(config: &Config, seed: Option<u64>, random_seed: bool) -> Option<u64> {
    if random_seed {
        None
    } else {
        seed.or(config.analysis.seed)
    }
}

/// Loads both input tables and runs the aggregation pipeline.
///
/// The recoverable "data unavailable" condition is rendered as a user-facing
/// message and yields `Ok(None)`; every other error propagates.
fn build_dataset(config: &Config, seed: Option<u64>) -> anyhow::Result<Option<AnalysisDataset>> {
    let params = AnalysisParams {
        product: config.analysis.product,
        year_min: config.analysis.year_min,
        year_max: config.analysis.year_max,
        seed,
        top_n: config.analysis.top_n,
    };

    let transactions = match ingest::load_transactions(&config.data.transactions_path) {
        Ok(transactions) => transactions,
        Err(err @ IngestError::DataUnavailable(_)) => {
            eprintln!("{err}. Check the [data] paths in the configuration file.");
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };
    let countries = match ingest::load_country_table(&config.data.reference_path) {
        Ok(countries) => countries,
        Err(err @ IngestError::DataUnavailable(_)) => {
            eprintln!("{err}. Check the [data] paths in the configuration file.");
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };

    let engine = AggregationEngine::new();
    let dataset = engine.analyze(&transactions, &countries, &params)?;
    tracing::debug!(
        records = dataset.records.len(),
        seed = ?params.seed,
        "Aggregation pipeline finished"
    );
    Ok(Some(dataset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use configuration::{AnalysisConfig, DataConfig, ServerConfig};

    fn config_with_seed(seed: Option<u64>) -> Config {
        Config {
            data: DataConfig {
                transactions_path: PathBuf::from("a.csv"),
                reference_path: PathBuf::from("b.csv"),
            },
            analysis: AnalysisConfig {
                product: 852352,
                year_min: 2020,
                year_max: 2023,
                top_n: 10,
                seed,
            },
            server: ServerConfig::default(),
        }
    }

    #[test]
    fn cli_seed_overrides_configured_seed() {
        let config = config_with_seed(Some(42));
        assert_eq!(effective_seed(&config, Some(7), false), Some(7));
    }

    #[test]
    fn configured_seed_applies_by_default() {
        let config = config_with_seed(Some(42));
        assert_eq!(effective_seed(&config, None, false), Some(42));
    }

    #[test]
    fn random_seed_flag_forces_entropy_draw() {
        let config = config_with_seed(Some(42));
        assert_eq!(effective_seed(&config, None, true), None);
    }

    #[test]
    fn seed_and_random_seed_flags_conflict() {
        let result =
            Cli::try_parse_from(["tradewinds", "report", "--seed", "1", "--random-seed"]);
        assert!(result.is_err());
    }

    #[test]
    fn random_seed_flag_parses() {
        let cli = Cli::try_parse_from(["tradewinds", "report", "--random-seed"]).unwrap();
        match cli.command {
            Commands::Report { seed, random_seed } => {
                assert_eq!(seed, None);
                assert!(random_seed);
            }
            _ => panic!("expected report subcommand"),
        }
    }
}
