//! Aggregation layer for Farmstead
//!
//! Read-only summaries computed over the current store contents. Every
//! summary is fully recomputed per call from the fetched records; there is
//! no caching and no incremental state.
//!
//! Numeric semantics: `f64` accumulation, rounded half-away-from-zero at
//! the stated precision. An empty input set yields 0, never an error.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{Animal, Sale};

/// Health statuses counted as unhealthy in the dashboard summary
pub const UNHEALTHY_STATUSES: [&str; 3] = ["unhealthy", "sick", "critical"];

/// Summary stats for the dashboard page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_animals: i64,
    /// Average over animals with a non-null temperature, one decimal place
    pub average_temperature: f64,
    pub unhealthy_count: i64,
    /// Sum of all sale amounts, two decimal places
    pub sales_total: f64,
}

/// Profit summary; no cost tracking exists, so profit equals sales
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitSummary {
    pub sales_total: f64,
    pub costs_total: f64,
    pub profit: f64,
}

/// One group in a breakdown; `group` is null for records missing the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub group: Option<String>,
    pub count: i64,
}

/// Aggregated data for the reports page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportsSummary {
    pub total_animals: i64,
    pub total_sales_count: i64,
    pub sales_total_amount: f64,
    pub species_breakdown: Vec<BreakdownEntry>,
    pub health_breakdown: Vec<BreakdownEntry>,
}

/// Compute the dashboard summary
pub fn dashboard_summary(animals: &[Animal], sales: &[Sale]) -> DashboardSummary {
    let temps: Vec<f64> = animals.iter().filter_map(|a| a.temperature).collect();
    let average_temperature = if temps.is_empty() {
        0.0
    } else {
        round_to(temps.iter().sum::<f64>() / temps.len() as f64, 1)
    };

    let unhealthy_count = animals
        .iter()
        .filter(|a| {
            a.health_status
                .as_deref()
                .map_or(false, |s| UNHEALTHY_STATUSES.contains(&s))
        })
        .count() as i64;

    DashboardSummary {
        total_animals: animals.len() as i64,
        average_temperature,
        unhealthy_count,
        sales_total: sales_total(sales),
    }
}

/// Compute the profit summary
pub fn profit_summary(sales: &[Sale]) -> ProfitSummary {
    let sales_total = sales_total(sales);
    let costs_total = 0.0;

    ProfitSummary {
        sales_total,
        costs_total,
        profit: round_to(sales_total - costs_total, 2),
    }
}

/// Compute the reports summary
pub fn reports_summary(animals: &[Animal], sales: &[Sale]) -> ReportsSummary {
    ReportsSummary {
        total_animals: animals.len() as i64,
        total_sales_count: sales.len() as i64,
        sales_total_amount: sales_total(sales),
        species_breakdown: breakdown_by(animals, |a| a.species.clone()),
        health_breakdown: breakdown_by(animals, |a| a.health_status.clone()),
    }
}

/// Sum of all sale amounts, rounded to two decimal places
fn sales_total(sales: &[Sale]) -> f64 {
    round_to(sales.iter().map(|s| s.amount).sum::<f64>(), 2)
}

/// Group animals by a field value, counting null/missing as its own group
///
/// Output is sorted with the null group first and the remaining groups by
/// value, so report responses are deterministic.
fn breakdown_by<F>(animals: &[Animal], key: F) -> Vec<BreakdownEntry>
where
    F: Fn(&Animal) -> Option<String>,
{
    let mut counts: HashMap<Option<String>, i64> = HashMap::new();
    for animal in animals {
        *counts.entry(key(animal)).or_insert(0) += 1;
    }

    let mut entries: Vec<BreakdownEntry> = counts
        .into_iter()
        .map(|(group, count)| BreakdownEntry { group, count })
        .collect();
    entries.sort_by(|a, b| a.group.cmp(&b.group));
    entries
}

/// Round half-away-from-zero to the given number of decimal places
fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn animal(temperature: Option<f64>, health: Option<&str>, species: Option<&str>) -> Animal {
        Animal {
            id: Uuid::new_v4(),
            tag_id: Uuid::new_v4().to_string(),
            species: species.map(str::to_string),
            breed: String::new(),
            age_months: 0,
            weight_kg: 0.0,
            health_status: health.map(str::to_string),
            temperature,
            notes: String::new(),
            created_at: Utc::now(),
        }
    }

    fn sale(amount: f64) -> Sale {
        Sale {
            id: Uuid::new_v4(),
            description: "Sale".to_string(),
            amount,
            quantity: 1,
            date: "2026-08-06".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_dashboard_over_empty_store() {
        let summary = dashboard_summary(&[], &[]);

        assert_eq!(summary.total_animals, 0);
        assert_eq!(summary.average_temperature, 0.0);
        assert_eq!(summary.unhealthy_count, 0);
        assert_eq!(summary.sales_total, 0.0);
    }

    #[test]
    fn test_average_temperature() {
        let animals = vec![
            animal(Some(40.0), Some("healthy"), Some("Chicken")),
            animal(Some(41.0), Some("healthy"), Some("Chicken")),
            animal(Some(42.0), Some("healthy"), Some("Chicken")),
        ];

        let summary = dashboard_summary(&animals, &[]);
        assert_eq!(summary.average_temperature, 41.0);
    }

    #[test]
    fn test_average_skips_null_temperatures() {
        let animals = vec![
            animal(Some(39.0), None, None),
            animal(None, None, None),
            animal(Some(41.0), None, None),
        ];

        let summary = dashboard_summary(&animals, &[]);
        assert_eq!(summary.average_temperature, 40.0);
        assert_eq!(summary.total_animals, 3);
    }

    #[test]
    fn test_average_rounds_to_one_decimal() {
        let animals = vec![
            animal(Some(40.0), None, None),
            animal(Some(40.1), None, None),
            animal(Some(40.1), None, None),
        ];

        // 120.2 / 3 = 40.0666...
        let summary = dashboard_summary(&animals, &[]);
        assert_eq!(summary.average_temperature, 40.1);
    }

    #[test]
    fn test_unhealthy_count() {
        let animals = vec![
            animal(None, Some("healthy"), None),
            animal(None, Some("unhealthy"), None),
            animal(None, Some("sick"), None),
            animal(None, Some("critical"), None),
            animal(None, Some("recovering"), None),
            animal(None, None, None),
        ];

        let summary = dashboard_summary(&animals, &[]);
        assert_eq!(summary.unhealthy_count, 3);
    }

    #[test]
    fn test_sales_total_rounds_to_two_decimals() {
        let sales = vec![sale(10.111), sale(20.111)];
        let summary = dashboard_summary(&[], &sales);
        assert_eq!(summary.sales_total, 30.22);
    }

    #[test]
    fn test_sales_total_documented_float_rounding() {
        // 10.005 is not exactly representable; the nearest f64 sum sits just
        // below 30.005, so rounding the accumulated float yields 30.0.
        let sales = vec![sale(10.005), sale(20.00)];
        let summary = dashboard_summary(&[], &sales);
        assert_eq!(summary.sales_total, 30.0);
    }

    #[test]
    fn test_profit_equals_sales_when_no_costs() {
        let sales = vec![sale(100.0), sale(-25.5)];
        let summary = profit_summary(&sales);

        assert_eq!(summary.sales_total, 74.5);
        assert_eq!(summary.costs_total, 0.0);
        assert_eq!(summary.profit, summary.sales_total);
    }

    #[test]
    fn test_profit_over_no_sales() {
        let summary = profit_summary(&[]);
        assert_eq!(summary.sales_total, 0.0);
        assert_eq!(summary.profit, 0.0);
    }

    #[test]
    fn test_reports_breakdowns() {
        let animals = vec![
            animal(None, Some("healthy"), Some("Chicken")),
            animal(None, Some("healthy"), Some("Chicken")),
            animal(None, Some("sick"), Some("Goat")),
            animal(None, None, None),
        ];
        let sales = vec![sale(10.0), sale(5.25)];

        let summary = reports_summary(&animals, &sales);
        assert_eq!(summary.total_animals, 4);
        assert_eq!(summary.total_sales_count, 2);
        assert_eq!(summary.sales_total_amount, 15.25);

        // Null group first, then sorted by value
        assert_eq!(
            summary.species_breakdown,
            vec![
                BreakdownEntry { group: None, count: 1 },
                BreakdownEntry { group: Some("Chicken".to_string()), count: 2 },
                BreakdownEntry { group: Some("Goat".to_string()), count: 1 },
            ]
        );
        assert_eq!(
            summary.health_breakdown,
            vec![
                BreakdownEntry { group: None, count: 1 },
                BreakdownEntry { group: Some("healthy".to_string()), count: 2 },
                BreakdownEntry { group: Some("sick".to_string()), count: 1 },
            ]
        );
    }

    #[test]
    fn test_round_to() {
        // 1.25 is exactly representable, so the tie rounds away from zero
        assert_eq!(round_to(1.25, 1), 1.3);
        assert_eq!(round_to(-1.25, 1), -1.3);
        assert_eq!(round_to(41.04, 1), 41.0);
        assert_eq!(round_to(0.0, 2), 0.0);
    }
}
