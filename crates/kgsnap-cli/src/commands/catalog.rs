//! The `catalog` command: offline listing of the dataset catalog.

use anyhow::Result;
use colored::Colorize;

use kgsnap_graph::{Catalog, SCHEMA_VERSION};

pub fn execute() -> Result<()> {
    let catalog = Catalog::current();

    println!(
        "{} {} {}",
        "Dataset catalog".bold(),
        format!("(schema v{},", SCHEMA_VERSION).dimmed(),
        format!("{} datasets)", catalog.len()).dimmed()
    );
    println!("{}", "─".repeat(60));

    for spec in catalog.iter() {
        let columns: Vec<&str> = spec.columns.iter().map(|c| c.name.as_str()).collect();
        println!("  {:<16} {}", spec.name.cyan(), columns.join(", ").dimmed());
    }

    Ok(())
}
