//! The `report` command: breakdowns over extracted tables.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use kgsnap_core::{partner_breakdown, BreakdownRow, Table};
use kgsnap_graph::{tech::tech_stakeholders, GraphClient, GraphConfig, TechClass};

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Per-partner percentage breakdown for one technology entity
    Tech(TechArgs),
}

#[derive(Args, Debug)]
pub struct TechArgs {
    /// Technology class: Software, Experiment, or TargetClass
    pub class: String,

    /// Entity name (e.g. a software package or assay)
    pub name: String,

    /// Directory holding the extracted tables
    #[arg(long, env = "KGSNAP_OUT_DIR", default_value = "data")]
    pub out_dir: PathBuf,

    /// Query the live graph (KGSNAP_* environment) instead of the extracted CSV
    #[arg(long)]
    pub live: bool,
}

pub async fn execute(cmd: ReportCommands) -> Result<()> {
    match cmd {
        ReportCommands::Tech(args) => tech_report(args).await,
    }
}

async fn tech_report(args: TechArgs) -> Result<()> {
    // Reject an invalid class before touching the filesystem or network.
    let class: TechClass = args.class.parse()?;

    let rows = if args.live {
        let client = GraphClient::connect(&GraphConfig::from_env()?).await?;
        tech_stakeholders(&client, class, &args.name).await?
    } else {
        let path = args.out_dir.join(format!("{}.csv", class.dataset()));
        let table = Table::read_csv(class.dataset(), &path)
            .with_context(|| format!("Failed to read {} (run 'kgsnap extract' first)", path.display()))?;
        partner_breakdown(&table, &args.name)?
    };

    print_breakdown(class, &args.name, &rows);
    Ok(())
}

fn print_breakdown(class: TechClass, name: &str, rows: &[BreakdownRow]) {
    println!(
        "{} {} {}",
        "Stakeholders for".bold(),
        name.cyan(),
        format!("({})", class).dimmed()
    );
    println!("{}", "─".repeat(50));

    if rows.is_empty() {
        println!("{}", "No individuals hold expertise in this entity.".dimmed());
        return;
    }

    for row in rows {
        println!(
            "  {:<30} {:>4} {}",
            row.partner,
            row.individuals,
            format!("{:.2}%", row.percentage).yellow()
        );
    }

    let total: u64 = rows.iter().map(|r| r.individuals).sum();
    println!("\n{} individuals across {} partners.", total.to_string().bold(), rows.len());
}
