//! kgsnap - expertise knowledge graph snapshot tool.
//!
//! Runs a fixed catalog of read-only Cypher queries against an external
//! Neo4j graph and materializes each result as a flat CSV table.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::Cli;

/// Initialize tracing.
///
/// All log output goes to stderr so stdout stays clean for report output.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "kgsnap=debug,kgsnap_graph=debug,kgsnap_core=debug"
    } else {
        "kgsnap=info,kgsnap_graph=info,kgsnap_core=info"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    cli.execute().await
}
