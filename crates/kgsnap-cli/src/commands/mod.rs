//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use kgsnap_graph::GraphConfig;

pub mod catalog;
pub mod extract;
pub mod report;
pub mod status;

/// kgsnap - snapshot an expertise knowledge graph into flat tables
#[derive(Parser)]
#[command(name = "kgsnap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full query catalog and persist one CSV table per dataset
    Extract(extract::ExtractArgs),

    /// Show live node and relationship counts
    Status(status::StatusArgs),

    /// List the dataset catalog and its column schemas
    Catalog,

    /// Reports over extracted tables
    #[command(subcommand)]
    Report(report::ReportCommands),
}

/// Knowledge graph connection settings.
///
/// Credentials are supplied per invocation; nothing is compiled in and
/// there are no defaults for the password.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Bolt URI of the knowledge graph (e.g. neo4j+s://host:7687)
    #[arg(long, env = "KGSNAP_URI")]
    pub uri: String,

    /// Database user
    #[arg(long, env = "KGSNAP_USER")]
    pub user: String,

    /// Database password
    #[arg(long, env = "KGSNAP_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Database name
    #[arg(long, env = "KGSNAP_DB", default_value = "neo4j")]
    pub db: String,
}

impl ConnectionArgs {
    pub fn to_config(&self) -> GraphConfig {
        GraphConfig {
            uri: self.uri.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            db: self.db.clone(),
        }
    }
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Extract(args) => extract::execute(args).await,
            Commands::Status(args) => status::execute(args).await,
            Commands::Catalog => catalog::execute(),
            Commands::Report(cmd) => report::execute(cmd).await,
        }
    }
}
