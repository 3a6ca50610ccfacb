//! Neo4j connection client.

use anyhow::{Context, Result};
use neo4rs::{ConfigBuilder, Graph, Query};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use kgsnap_core::KgError;

/// Configuration for connecting to the knowledge graph.
///
/// Credentials are never compiled in; they come from the CLI flags, the
/// `KGSNAP_*` environment variables, or a deserialized config object.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    #[serde(default = "default_db")]
    pub db: String,
}

fn default_db() -> String {
    "neo4j".to_string()
}

impl GraphConfig {
    /// Build a config from the `KGSNAP_URI`, `KGSNAP_USER`, `KGSNAP_PASSWORD`
    /// and optional `KGSNAP_DB` environment variables.
    pub fn from_env() -> Result<Self, KgError> {
        Ok(Self {
            uri: require_env("KGSNAP_URI")?,
            user: require_env("KGSNAP_USER")?,
            password: require_env("KGSNAP_PASSWORD")?,
            db: std::env::var("KGSNAP_DB").unwrap_or_else(|_| default_db()),
        })
    }
}

fn require_env(name: &str) -> Result<String, KgError> {
    std::env::var(name).map_err(|_| KgError::config(format!("{} is not set", name)))
}

/// Client for read-only knowledge graph operations.
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Create a new GraphClient from config.
    ///
    /// Note: neo4rs uses a lazy deadpool: `Graph::connect` only creates the
    /// pool object and does NOT establish a real bolt connection yet.  We run
    /// a cheap `RETURN 1` ping immediately so that unreachable servers and
    /// rejected credentials fail the connect call itself, before any catalog
    /// query runs or any output file is written.
    pub async fn connect(config: &GraphConfig) -> Result<Self> {
        let neo4j_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .db(config.db.as_str())
            .max_connections(2)  // One sequential query at a time
            .fetch_size(500)
            .build()
            .context("Failed to build Neo4j config")?;

        let graph = Graph::connect(neo4j_config)
            .await
            .context("Failed to create Neo4j connection pool")?;

        graph.run(Query::new("RETURN 1".to_string())).await
            .context("Knowledge graph is not responding to queries")?;

        Ok(Self { graph })
    }

    /// Execute a Cypher query and return results as rows.
    pub async fn query(&self, query: Query) -> Result<Vec<neo4rs::Row>> {
        let mut result = self.graph.execute(query).await
            .context("Graph query failed")?;

        let mut rows = Vec::new();
        while let Ok(Some(row)) = result.next().await {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Execute a Cypher query and return a single scalar value.
    pub async fn query_scalar<T: DeserializeOwned>(&self, query: Query, field: &str) -> Result<Option<T>> {
        let rows = self.query(query).await?;
        if let Some(row) = rows.into_iter().next() {
            let val: T = row.get(field)
                .map_err(|e| anyhow::anyhow!("Failed to get field '{}': {:?}", field, e))?;
            Ok(Some(val))
        } else {
            Ok(None)
        }
    }

    /// Get node and relationship counts for status display.
    ///
    /// Uses the same count queries as the `nodes`/`edges` catalog entries so
    /// the live numbers match what an extraction would snapshot.
    pub async fn counts(&self) -> Result<GraphCounts> {
        let node_query = Query::new(crate::catalog::node_count_cypher());
        let rel_query = Query::new(crate::catalog::edge_count_cypher());

        let nodes: i64 = self.query_scalar(node_query, "count").await?
            .unwrap_or(0);
        let relationships: i64 = self.query_scalar(rel_query, "count").await?
            .unwrap_or(0);

        Ok(GraphCounts {
            nodes: nodes as usize,
            relationships: relationships as usize,
        })
    }
}

/// Node and relationship counts.
#[derive(Debug, Clone)]
pub struct GraphCounts {
    pub nodes: usize,
    pub relationships: usize,
}
