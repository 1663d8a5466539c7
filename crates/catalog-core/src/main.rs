use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use catalog_core::{create_catalog_service, init_tracing, CatalogConfig, CatalogError, ComponentCatalog};
use catalog_interfaces::SearchOptions;

#[derive(Parser)]
#[command(name = "catalog-cli")]
#[command(version)]
#[command(about = "Inspect and query the component catalog", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show catalog metadata and cache statistics
    Info,
    /// Search components
    Search {
        /// Substring of name, description or tag
        #[arg(short, long)]
        text: Option<String>,
        /// Tag to match (repeatable, any tag matches)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Exact package name
        #[arg(short, long)]
        package: Option<String>,
        #[arg(short, long)]
        limit: Option<usize>,
        #[arg(short, long)]
        offset: Option<usize>,
    },
    /// Show one component
    Show {
        /// Component name, case-insensitive
        name: String,
        /// Variant whose overrides should be applied
        #[arg(short, long)]
        variant: Option<String>,
    },
    /// Dry-run normalization of the whole catalog source
    Validate,
    /// Drop the cached snapshot and load the catalog again
    Reload,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();
    let config = CatalogConfig::load();
    let service = match create_catalog_service(&config) {
        Ok(service) => service,
        Err(e) => return report(e),
    };

    let outcome = match cli.command {
        Commands::Info => render(service.get_catalog_info().await),
        Commands::Search {
            text,
            tags,
            package,
            limit,
            offset,
        } => {
            let options = SearchOptions {
                text,
                tags,
                package,
                limit,
                offset,
            };
            render(service.search_components(&options).await)
        }
        Commands::Show { name, variant } => {
            render(service.get_component(&name, variant.as_deref()).await)
        }
        Commands::Validate => match service.validate_catalog().await {
            Ok(report) => {
                let clean = report.is_clean();
                print_json(&report)?;
                return Ok(if clean { ExitCode::SUCCESS } else { ExitCode::from(2) });
            }
            Err(e) => Err(e),
        },
        Commands::Reload => render(service.reload_catalog().await),
    };

    match outcome {
        Ok(json) => {
            println!("{}", json?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => report(e),
    }
}

fn render<T: Serialize>(result: Result<T, CatalogError>) -> Result<anyhow::Result<String>, CatalogError> {
    result.map(|value| serde_json::to_string_pretty(&value).context("failed to render output"))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("failed to render output")?
    );
    Ok(())
}

fn report(error: CatalogError) -> anyhow::Result<ExitCode> {
    let envelope = serde_json::to_string_pretty(&error.envelope()).context("failed to render error")?;
    eprintln!("{}", envelope);
    Ok(ExitCode::FAILURE)
}
