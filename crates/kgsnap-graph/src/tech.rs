//! Technology entity classes.
//!
//! The graph types a "technology" a person or partner can hold expertise in
//! as one of three labels. The closed set is modelled as an enum so an
//! invalid class is rejected before any query string exists, let alone runs.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use neo4rs::Query;

use kgsnap_core::{breakdown_from_counts, BreakdownRow, KgError};

use crate::client::GraphClient;

/// The closed set of technology entity types in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TechClass {
    Software,
    Experiment,
    TargetClass,
}

impl TechClass {
    pub const ALL: [TechClass; 3] = [
        TechClass::Software,
        TechClass::Experiment,
        TechClass::TargetClass,
    ];

    /// The node label in the graph.
    pub fn label(&self) -> &'static str {
        match self {
            TechClass::Software => "Software",
            TechClass::Experiment => "Experiment",
            TechClass::TargetClass => "TargetClass",
        }
    }

    /// The logical dataset name this class extracts to.
    pub fn dataset(&self) -> &'static str {
        match self {
            TechClass::Software => "software_data",
            TechClass::Experiment => "assay_data",
            TechClass::TargetClass => "target_data",
        }
    }

    /// Cypher for the full technology dataset of this class: one row per
    /// (entity, individual, partner) edge.
    ///
    /// The label comes from this enum, never from caller-supplied text.
    pub fn data_cypher(&self) -> String {
        format!(
            "MATCH path=(e:{})-[q]->(i:Partner)<-[]-(p:Person)
             RETURN e.name as Name, p.name as info, i.name as Partner",
            self.label()
        )
    }

    /// Cypher for the per-partner stakeholder counts of one named entity.
    /// The entity name is a driver-bound `$name` parameter.
    fn stakeholders_cypher(&self) -> String {
        format!(
            "MATCH (e:{} {{name: $name}})-[]->(i:Partner)<-[]-(p:Person)
             RETURN i.name as Partner, count(distinct p.name) as Individuals",
            self.label()
        )
    }
}

impl fmt::Display for TechClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TechClass {
    type Err = KgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "software" => Ok(TechClass::Software),
            "experiment" => Ok(TechClass::Experiment),
            "targetclass" => Ok(TechClass::TargetClass),
            _ => Err(KgError::InvalidTechClass(s.to_string())),
        }
    }
}

/// Live per-partner percentage breakdown for one named technology entity.
///
/// An entity nobody works with yields an empty breakdown.
pub async fn tech_stakeholders(
    client: &GraphClient,
    class: TechClass,
    name: &str,
) -> Result<Vec<BreakdownRow>> {
    let query = Query::new(class.stakeholders_cypher()).param("name", name);

    let rows = client.query(query).await?;
    let mut counts = Vec::with_capacity(rows.len());
    for row in rows {
        let partner: String = row.get("Partner")
            .map_err(|e| anyhow::anyhow!("Failed to get field 'Partner': {:?}", e))?;
        let individuals: i64 = row.get("Individuals")
            .map_err(|e| anyhow::anyhow!("Failed to get field 'Individuals': {:?}", e))?;
        counts.push((partner, individuals.max(0) as u64));
    }

    Ok(breakdown_from_counts(counts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_the_closed_set_case_insensitively() {
        assert_eq!("Software".parse::<TechClass>().unwrap(), TechClass::Software);
        assert_eq!("experiment".parse::<TechClass>().unwrap(), TechClass::Experiment);
        assert_eq!("TARGETCLASS".parse::<TechClass>().unwrap(), TechClass::TargetClass);
    }

    #[test]
    fn test_parse_rejects_anything_else() {
        for bad in ["Assay", "Person", "Partner", "", "Software "] {
            let err = bad.parse::<TechClass>().unwrap_err();
            assert!(matches!(err, KgError::InvalidTechClass(_)), "input {:?}", bad);
        }
    }

    #[test]
    fn test_dataset_names_match_labels() {
        assert_eq!(TechClass::Software.dataset(), "software_data");
        assert_eq!(TechClass::Experiment.dataset(), "assay_data");
        assert_eq!(TechClass::TargetClass.dataset(), "target_data");
    }

    #[test]
    fn test_data_cypher_pins_the_label() {
        for class in TechClass::ALL {
            let cypher = class.data_cypher();
            assert!(cypher.contains(&format!("(e:{})", class.label())));
            assert!(!cypher.contains("$class"));
        }
    }
}
