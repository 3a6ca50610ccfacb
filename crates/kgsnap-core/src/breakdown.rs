//! Partner stakeholder breakdowns.
//!
//! The presentation layer shows, for one technology entity (an assay, a
//! software package, or a target class), which partners hold expertise in it
//! and what share of the involved individuals each partner contributes. The
//! computation groups a technology dataset by partner, counts distinct
//! individuals, and turns the counts into percentages rounded to two
//! decimals.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::error::KgResult;
use crate::table::Table;

/// One partner's share of the individuals tied to a technology entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownRow {
    pub partner: String,
    pub individuals: u64,
    pub percentage: f64,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Turn per-partner individual counts into a percentage breakdown.
///
/// Rows are ordered by share (largest first), ties broken by partner name.
/// Percentages for one entity sum to 100 within rounding.
pub fn breakdown_from_counts(counts: impl IntoIterator<Item = (String, u64)>) -> Vec<BreakdownRow> {
    let counts: Vec<(String, u64)> = counts.into_iter().collect();
    let total: u64 = counts.iter().map(|(_, n)| n).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut rows: Vec<BreakdownRow> = counts
        .into_iter()
        .filter(|(_, n)| *n > 0)
        .map(|(partner, individuals)| BreakdownRow {
            partner,
            individuals,
            percentage: round2(individuals as f64 / total as f64 * 100.0),
        })
        .collect();

    rows.sort_by(|a, b| {
        b.individuals
            .cmp(&a.individuals)
            .then_with(|| a.partner.cmp(&b.partner))
    });
    rows
}

/// Compute the per-partner breakdown for one entity of a technology dataset.
///
/// Expects the technology-data schema (`Name`, `info`, `Partner`): one row
/// per (entity, individual, partner) edge. Individuals are counted distinct
/// per partner. An entity with no rows yields an empty breakdown.
pub fn partner_breakdown(table: &Table, entity: &str) -> KgResult<Vec<BreakdownRow>> {
    let name_idx = table.require_column("Name")?;
    let info_idx = table.require_column("info")?;
    let partner_idx = table.require_column("Partner")?;

    let mut per_partner: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for row in table.rows() {
        if row[name_idx].render() != entity {
            continue;
        }
        per_partner
            .entry(row[partner_idx].render())
            .or_default()
            .insert(row[info_idx].render());
    }

    Ok(breakdown_from_counts(
        per_partner
            .into_iter()
            .map(|(partner, people)| (partner, people.len() as u64)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Column, Table, Value};

    fn tech_table(rows: &[(&str, &str, &str)]) -> Table {
        let mut t = Table::new(
            "software_data",
            vec![
                Column::text("Name"),
                Column::text("info"),
                Column::text("Partner"),
            ],
        );
        for (name, info, partner) in rows {
            t.push_row(vec![
                Value::text(*name),
                Value::text(*info),
                Value::text(*partner),
            ])
            .unwrap();
        }
        t
    }

    #[test]
    fn test_three_individuals_across_two_partners() {
        let t = tech_table(&[
            ("KNIME", "Alice", "EATRIS"),
            ("KNIME", "Bob", "EATRIS"),
            ("KNIME", "Carol", "Fraunhofer ITMP"),
        ]);

        let rows = partner_breakdown(&t, "KNIME").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows.iter().map(|r| r.individuals).sum::<u64>(), 3);
        assert_eq!(rows[0].partner, "EATRIS");
        assert_eq!(rows[0].percentage, 66.67);
        assert_eq!(rows[1].percentage, 33.33);
    }

    #[test]
    fn test_duplicate_individual_rows_count_once() {
        let t = tech_table(&[
            ("KNIME", "Alice", "EATRIS"),
            ("KNIME", "Alice", "EATRIS"),
            ("KNIME", "Bob", "EATRIS"),
        ]);

        let rows = partner_breakdown(&t, "KNIME").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].individuals, 2);
        assert_eq!(rows[0].percentage, 100.0);
    }

    #[test]
    fn test_other_entities_are_filtered_out() {
        let t = tech_table(&[
            ("KNIME", "Alice", "EATRIS"),
            ("PyMOL", "Bob", "EATRIS"),
        ]);

        let rows = partner_breakdown(&t, "PyMOL").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].individuals, 1);
    }

    #[test]
    fn test_percentages_sum_to_100_within_rounding() {
        // Three equal shares: 33.33 each, sum 99.99.
        let rows = breakdown_from_counts(vec![
            ("A".to_string(), 1),
            ("B".to_string(), 1),
            ("C".to_string(), 1),
        ]);
        let sum: f64 = rows.iter().map(|r| r.percentage).sum();
        assert!((sum - 100.0).abs() <= 0.03, "sum was {}", sum);

        let rows = breakdown_from_counts(vec![
            ("A".to_string(), 7),
            ("B".to_string(), 2),
            ("C".to_string(), 1),
        ]);
        let sum: f64 = rows.iter().map(|r| r.percentage).sum();
        assert!((sum - 100.0).abs() <= 0.03, "sum was {}", sum);
    }

    #[test]
    fn test_unknown_entity_yields_empty_breakdown() {
        let t = tech_table(&[("KNIME", "Alice", "EATRIS")]);
        let rows = partner_breakdown(&t, "does-not-exist").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_missing_schema_column_is_an_error() {
        let t = Table::new("software_data", vec![Column::text("Name")]);
        assert!(partner_breakdown(&t, "KNIME").is_err());
    }
}
