//! The `status` command: live graph counts.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use kgsnap_graph::GraphClient;

use super::ConnectionArgs;

#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,
}

pub async fn execute(args: StatusArgs) -> Result<()> {
    let client = GraphClient::connect(&args.connection.to_config()).await?;

    println!("{}", "Knowledge Graph Status".bold());
    println!("{}", "─".repeat(40));

    let counts = client.counts().await?;
    println!("  Nodes:         {}", counts.nodes.to_string().cyan());
    println!("  Relationships: {}", counts.relationships.to_string().cyan());

    println!("{}", "─".repeat(40));

    Ok(())
}
