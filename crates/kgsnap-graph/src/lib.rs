//! # kgsnap Graph
//!
//! Neo4j integration for the knowledge-graph snapshot tool.
//!
//! Provides the connection client, the versioned read-only query catalog,
//! and the batch runner that materializes each catalog entry as a CSV table.

pub mod catalog;
pub mod client;
pub mod extract;
pub mod tech;

pub use catalog::{Catalog, DatasetSpec, SCHEMA_VERSION};
pub use client::{GraphClient, GraphConfig, GraphCounts};
pub use extract::{run_extraction, run_extraction_with, DatasetReport, ExtractReport, MANIFEST_FILE};
pub use tech::TechClass;
