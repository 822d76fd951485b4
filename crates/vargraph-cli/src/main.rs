//! Entry point for the vargraph binary.

mod schema;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use vargraph_sources::{EnrichmentCache, EutilsClient, SourceResolver};
use vargraph_statements::run_batch;

#[derive(Parser)]
#[command(name = "vargraph", version, about = "Knowledge-base flat-file to graph-document converter")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert the knowledge-base flat files into a graph-ready JSON document
    Convert(ConvertArgs),
    /// Provision the graph-store class hierarchy
    InitSchema(InitSchemaArgs),
}

#[derive(Args)]
struct ConvertArgs {
    /// References flat file (TSV)
    references: PathBuf,

    /// Events flat file (TSV)
    events: PathBuf,

    /// Output document path
    #[arg(long, default_value = "new_entries.json")]
    output: PathBuf,

    /// Preloaded publication metadata cache (JSON, pmid keyed)
    #[arg(long)]
    pmid_cache: Option<PathBuf>,

    /// NCBI E-utilities api key
    #[arg(long, env = "VARGRAPH_EUTILS_API_KEY")]
    api_key: Option<String>,
}

#[derive(Args)]
struct InitSchemaArgs {
    /// Graph store admin endpoint
    #[arg(long, env = "VARGRAPH_GRAPH_URL")]
    url: String,
}

async fn convert(args: ConvertArgs) -> anyhow::Result<()> {
    let records = vargraph_flatfile::load_kb(&args.references, &args.events)?;

    let cache = match &args.pmid_cache {
        Some(path) => EnrichmentCache::from_file(path)?,
        None => EnrichmentCache::new(),
    };
    let mut resolver = SourceResolver::new(EutilsClient::new(args.api_key), cache);

    let output = run_batch(&records, &mut resolver).await?;

    let json = serde_json::to_string(&output.document)?;
    std::fs::write(&args.output, json)?;
    info!(path = %args.output.display(), entries = output.counts.parsed, "wrote document");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("vargraph=debug,info")),
        )
        .init();

    info!("vargraph {}", env!("CARGO_PKG_VERSION"));

    match Cli::parse().command {
        Command::Convert(args) => convert(args).await,
        Command::InitSchema(args) => schema::SchemaClient::new(args.url).provision().await,
    }
}
