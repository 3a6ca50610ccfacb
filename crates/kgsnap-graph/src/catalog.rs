//! The versioned catalog of read-only extraction queries.
//!
//! Each entry maps a logical dataset name to a Cypher query and the exact
//! column schema of its result. Consumers of the persisted tables depend on
//! these column names, so the schema here is a contract, not documentation.
//!
//! There is a single catalog definition. Schema evolution is an explicit
//! version bump: v1 lacked the `Organizations` column on the `wp` dataset,
//! v2 added it.

use kgsnap_core::Column;

use crate::tech::TechClass;

/// Current catalog schema version, recorded in the run manifest.
pub const SCHEMA_VERSION: u32 = 2;

/// One catalog entry: a named dataset, its column contract, and the
/// read-only Cypher query that produces it.
#[derive(Debug, Clone)]
pub struct DatasetSpec {
    pub name: &'static str,
    pub columns: Vec<Column>,
    pub cypher: String,
}

/// The fixed, ordered set of queries this tool knows how to run.
#[derive(Debug, Clone)]
pub struct Catalog {
    datasets: Vec<DatasetSpec>,
}

impl Catalog {
    /// The current (v2) catalog, in run order.
    pub fn current() -> Self {
        let mut datasets = vec![
            DatasetSpec {
                name: "location",
                columns: vec![Column::text("Location"), Column::int("Partner counts")],
                cypher: location_cypher(),
            },
            DatasetSpec {
                name: "organization",
                columns: vec![Column::text("Partner"), Column::int("Individuals")],
                cypher: organization_cypher(),
            },
            DatasetSpec {
                name: "wp",
                columns: vec![
                    Column::text("WP"),
                    Column::text("lead"),
                    Column::text("id"),
                    Column::int("Individuals"),
                    Column::int("Organizations"),
                ],
                cypher: wp_cypher(),
            },
            DatasetSpec {
                name: "nodes",
                columns: vec![Column::int("count")],
                cypher: node_count_cypher(),
            },
            DatasetSpec {
                name: "edges",
                columns: vec![Column::int("count")],
                cypher: edge_count_cypher(),
            },
            DatasetSpec {
                name: "node_stats",
                columns: vec![Column::text("Nodes"), Column::int("Counts")],
                cypher: node_stats_cypher(),
            },
            DatasetSpec {
                name: "skillgroups",
                columns: vec![Column::text("SkillGroup")],
                cypher: skill_group_cypher(),
            },
            DatasetSpec {
                name: "skills",
                columns: vec![
                    Column::text("name"),
                    Column::text("skill_name"),
                    Column::int("Individuals"),
                ],
                cypher: skill_distribution_cypher(),
            },
            DatasetSpec {
                name: "skills_metadata",
                columns: vec![
                    Column::text("SkillGroup"),
                    Column::text("Skill"),
                    Column::text("Curie"),
                    Column::text("description"),
                    Column::text("url"),
                ],
                cypher: skill_metadata_cypher(),
            },
            DatasetSpec {
                name: "skills_info",
                columns: vec![
                    Column::text("Group"),
                    Column::text("Skill"),
                    Column::text("Individual"),
                    Column::text("ORCID"),
                    Column::text("Affiliation"),
                ],
                cypher: skill_info_cypher(),
            },
            DatasetSpec {
                name: "assays",
                columns: vec![
                    Column::text("Assay"),
                    Column::text("Curie"),
                    Column::text("Definition"),
                ],
                cypher: all_assays_cypher(),
            },
            DatasetSpec {
                name: "software",
                columns: vec![Column::text("Software"), Column::text("Curie")],
                cypher: all_software_cypher(),
            },
            DatasetSpec {
                name: "target_class",
                columns: vec![Column::text("Target"), Column::text("Curie")],
                cypher: all_target_classes_cypher(),
            },
            DatasetSpec {
                name: "partner_info",
                columns: vec![
                    Column::text("Name"),
                    Column::text("Location"),
                    Column::text("acronym"),
                    Column::text("info_link"),
                ],
                cypher: partner_info_cypher(),
            },
            DatasetSpec {
                name: "person_info",
                columns: vec![
                    Column::text("Partner"),
                    Column::text("Name"),
                    Column::text("ORCID"),
                ],
                cypher: person_info_cypher(),
            },
            DatasetSpec {
                name: "partner_data",
                columns: vec![Column::text("Name"), Column::text("Partner")],
                cypher: partner_relationships_cypher(),
            },
        ];

        // One technology dataset per class, generated from the closed enum
        // rather than by splicing caller-supplied text into the query.
        for class in TechClass::ALL {
            datasets.push(DatasetSpec {
                name: class.dataset(),
                columns: vec![
                    Column::text("Name"),
                    Column::text("info"),
                    Column::text("Partner"),
                ],
                cypher: class.data_cypher(),
            });
        }

        Self { datasets }
    }

    pub fn iter(&self) -> impl Iterator<Item = &DatasetSpec> {
        self.datasets.iter()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Look up an entry by dataset name.
    pub fn get(&self, name: &str) -> Option<&DatasetSpec> {
        self.datasets.iter().find(|d| d.name == name)
    }
}

/// Partner counts grouped by location.
fn location_cypher() -> String {
    "MATCH (p:Partner)
     CALL {
         WITH p
         RETURN p.location as Location, count(*) as value
     }
     WITH Location, sum(value) as `Partner counts`
     RETURN Location, `Partner counts`"
        .to_string()
}

/// Distinct individuals affiliated with each partner.
fn organization_cypher() -> String {
    "MATCH (p:Person)-[]->(i:Partner)
     RETURN i.name as Partner, COUNT(distinct p) as Individuals"
        .to_string()
}

/// Work packages with their lead institute, participating individuals and
/// contributing organizations (the latter added in catalog v2).
fn wp_cypher() -> String {
    "MATCH (n:Partner)<-[e]-(p:Person)-[i]->(w:WP)
     RETURN w.name as WP, w.lead_institute as lead, w.wp as id,
            COUNT(distinct p) as Individuals, COUNT(distinct n) as Organizations"
        .to_string()
}

/// Total node count, excluding the dashboard's own bookkeeping node.
pub(crate) fn node_count_cypher() -> String {
    "MATCH (n)
     WHERE not n.name = '_Neodash_Dashboard'
     RETURN COUNT(n) as count"
        .to_string()
}

/// Total distinct relationship count.
pub(crate) fn edge_count_cypher() -> String {
    "MATCH (n)-[r]-(t)
     RETURN COUNT(distinct r) as count"
        .to_string()
}

/// Per-label node counts for the entity-distribution chart.
fn node_stats_cypher() -> String {
    "CALL db.labels() YIELD label
     CALL apoc.cypher.run('MATCH (:`'+label+'`) RETURN count(*) as count',{}) YIELD value
     WHERE NOT label IN ['_Neodash_Dashboard', 'SkillGroup']
     RETURN label as Nodes, value.count as Counts"
        .to_string()
}

fn skill_group_cypher() -> String {
    "MATCH (n:SkillGroup)
     RETURN n.name as SkillGroup"
        .to_string()
}

/// Individuals per skill, keyed by the skill-group/skill path.
fn skill_distribution_cypher() -> String {
    "MATCH path=(s1)-[q]->(s2: Skill)<-[]-(p:Person)
     WITH nodes(path) as no
     WITH no, last(no) as leaf
     WITH [n IN no[..-1] | n.name] AS Skills, count(distinct leaf.name) as Individuals
     RETURN Skills[0] as name, Skills[1] as skill_name, Individuals"
        .to_string()
}

fn skill_metadata_cypher() -> String {
    "MATCH (n:SkillGroup)-[]->(s:Skill)
     RETURN n.name as SkillGroup, s.name as Skill, s.curie as Curie,
            s.info as description, s.info_link as url"
        .to_string()
}

/// Who holds which skill, with ORCID and affiliation.
fn skill_info_cypher() -> String {
    "MATCH path=(s1:SkillGroup)-[]->(s2: Skill)<-[]-(p:Person)-[]->(i:Partner)
     RETURN s1.name as Group, s2.name as Skill, p.name as Individual,
            p.info as ORCID, i.name as Affiliation"
        .to_string()
}

fn all_assays_cypher() -> String {
    "MATCH (e:Experiment)
     RETURN e.name as Assay, e.curie as Curie, e.definition as Definition"
        .to_string()
}

fn all_software_cypher() -> String {
    "MATCH (s:Software)
     RETURN s.name as Software, s.curie as Curie"
        .to_string()
}

fn all_target_classes_cypher() -> String {
    "MATCH (t:TargetClass)
     RETURN t.name as Target, t.curie as Curie"
        .to_string()
}

fn partner_info_cypher() -> String {
    "MATCH (p:Partner)
     RETURN p.name as Name, p.location as Location, p.acronym as acronym,
            p.info as info_link"
        .to_string()
}

fn person_info_cypher() -> String {
    "MATCH (p:Person)-[]->(i:Partner)
     RETURN i.name as Partner, p.name as Name, p.info as ORCID"
        .to_string()
}

/// Non-person entities connected to each partner.
fn partner_relationships_cypher() -> String {
    "MATCH (p)-[]-(i:Partner)
     WHERE not labels(p) = ['Person']
     RETURN p.name as Name, i.name as Partner"
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kgsnap_core::ColumnKind;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_all_datasets_in_run_order() {
        let catalog = Catalog::current();
        let names: Vec<&str> = catalog.iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec![
                "location",
                "organization",
                "wp",
                "nodes",
                "edges",
                "node_stats",
                "skillgroups",
                "skills",
                "skills_metadata",
                "skills_info",
                "assays",
                "software",
                "target_class",
                "partner_info",
                "person_info",
                "partner_data",
                "software_data",
                "assay_data",
                "target_data",
            ]
        );
    }

    #[test]
    fn test_dataset_names_are_unique() {
        let catalog = Catalog::current();
        let names: HashSet<&str> = catalog.iter().map(|d| d.name).collect();
        assert_eq!(names.len(), catalog.len());
    }

    #[test]
    fn test_all_queries_are_read_only() {
        let catalog = Catalog::current();
        for spec in catalog.iter() {
            let upper = spec.cypher.to_uppercase();
            for clause in ["CREATE ", "MERGE ", "DELETE ", "SET ", "REMOVE ", "DROP "] {
                assert!(
                    !upper.contains(clause),
                    "dataset '{}' contains write clause {}",
                    spec.name,
                    clause.trim()
                );
            }
        }
    }

    #[test]
    fn test_column_names_are_unique_per_dataset() {
        let catalog = Catalog::current();
        for spec in catalog.iter() {
            let names: HashSet<&str> =
                spec.columns.iter().map(|c| c.name.as_str()).collect();
            assert_eq!(names.len(), spec.columns.len(), "dataset '{}'", spec.name);
            assert!(!spec.columns.is_empty(), "dataset '{}'", spec.name);
        }
    }

    #[test]
    fn test_wp_carries_the_v2_organizations_column() {
        let catalog = Catalog::current();
        let wp = catalog.get("wp").unwrap();
        let org = wp.columns.iter().find(|c| c.name == "Organizations").unwrap();
        assert_eq!(org.kind, ColumnKind::Int);
        assert_eq!(SCHEMA_VERSION, 2);
    }

    #[test]
    fn test_count_datasets_alias_a_stable_column_name() {
        let catalog = Catalog::current();
        for name in ["nodes", "edges"] {
            let spec = catalog.get(name).unwrap();
            assert_eq!(spec.columns.len(), 1);
            assert_eq!(spec.columns[0].name, "count");
            assert_eq!(spec.columns[0].kind, ColumnKind::Int);
            assert!(spec.cypher.contains("as count"), "dataset '{}'", name);
        }
    }

    #[test]
    fn test_node_count_excludes_dashboard_bookkeeping() {
        let catalog = Catalog::current();
        assert!(catalog.get("nodes").unwrap().cypher.contains("_Neodash_Dashboard"));
        assert!(catalog.get("node_stats").unwrap().cypher.contains("SkillGroup"));
    }

    #[test]
    fn test_technology_datasets_match_their_graph_label() {
        let catalog = Catalog::current();
        for (name, label) in [
            ("software_data", ":Software"),
            ("assay_data", ":Experiment"),
            ("target_data", ":TargetClass"),
        ] {
            let spec = catalog.get(name).unwrap();
            assert!(spec.cypher.contains(label), "dataset '{}'", name);
            let cols: Vec<&str> = spec.columns.iter().map(|c| c.name.as_str()).collect();
            assert_eq!(cols, vec!["Name", "info", "Partner"]);
        }
    }

    #[test]
    fn test_lookup_by_name() {
        let catalog = Catalog::current();
        assert!(catalog.get("skills_info").is_some());
        assert!(catalog.get("no_such_dataset").is_none());
    }
}
