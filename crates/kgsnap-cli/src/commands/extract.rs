//! The `extract` command: full batch snapshot of the graph.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use kgsnap_graph::{run_extraction_with, Catalog, GraphClient};

use super::ConnectionArgs;

#[derive(Args, Debug)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Directory the CSV tables are written to (overwritten each run)
    #[arg(long, env = "KGSNAP_OUT_DIR", default_value = "data")]
    pub out_dir: PathBuf,
}

pub async fn execute(args: ExtractArgs) -> Result<()> {
    println!("{}", "Snapshotting knowledge graph...".bold());

    let client = GraphClient::connect(&args.connection.to_config()).await?;
    let catalog = Catalog::current();

    let bar = ProgressBar::new(catalog.len() as u64);
    bar.set_style(ProgressStyle::with_template(
        "{bar:40.cyan/blue} {pos}/{len} {msg}",
    )?);

    let report = run_extraction_with(&client, &catalog, &args.out_dir, |dataset| {
        bar.set_message(dataset.name.clone());
        bar.inc(1);
    })
    .await?;
    bar.finish_and_clear();

    println!("\n{}", "Extraction complete:".green().bold());
    println!("  Datasets written: {}", report.datasets.len());
    println!("  Total rows:       {}", report.total_rows());
    println!("  Output directory: {}", args.out_dir.display());

    Ok(())
}
