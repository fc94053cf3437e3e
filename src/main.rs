use anyhow::Result;
use clap::Parser;
use pubmed_scout::extract::process_records;
use pubmed_scout::output::{print_papers, save_csv};
use pubmed_scout::sources::PubMedSource;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Fetch research papers from PubMed and flag non-academic authors
#[derive(Parser, Debug)]
#[command(name = "pubmed-scout")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fetch PubMed papers for a query and flag industry-affiliated authors", long_about = None)]
struct Cli {
    /// Search query for the PubMed API
    query: String,

    /// Save results to a CSV file instead of printing
    #[arg(long, short)]
    file: Option<PathBuf>,

    /// Enable debug mode (prints identifier lists and record counts)
    #[arg(long, short)]
    debug: bool,

    /// Maximum number of search results
    #[arg(long, short, default_value_t = 100)]
    max_results: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; --debug raises the crate level
    let level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("pubmed_scout={}", level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let source = PubMedSource::new();

    // search -> fetch -> extract -> output, each step blocking on the last
    let ids = source
        .search_ids(&cli.query, cli.max_results, cli.debug)
        .await?;
    let xml = source.fetch_records(&ids).await?;
    let papers = process_records(&xml, cli.debug)?;

    match cli.file {
        Some(path) => save_csv(&path, &papers)?,
        None => print_papers(&papers),
    }

    Ok(())
}
