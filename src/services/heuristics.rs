// src/services/heuristics.rs
use crate::models::{BillCategory, RecurringBillRecord};

/// Keyword tables used to recognise kinds of bills by name.
#[derive(Debug, Clone, PartialEq)]
pub struct NameHeuristics {
    /// Bills that auto-select the seasonal strategy.
    pub seasonal_keywords: Vec<String>,
    /// Bills that auto-select the average strategy.
    pub flat_rate_keywords: Vec<String>,
    /// Bills the variance analyzer may classify as seasonal.
    pub seasonal_variance_keywords: Vec<String>,
}

impl Default for NameHeuristics {
    fn default() -> Self {
        NameHeuristics {
            seasonal_keywords: keywords(&["electric", "gas", "heating", "cooling"]),
            flat_rate_keywords: keywords(&["verizon", "phone", "mobile"]),
            seasonal_variance_keywords: keywords(&["electric", "gas", "heating"]),
        }
    }
}

fn keywords(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Splits a comma-separated list into trimmed, lower-cased keywords.
pub fn parse_keyword_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

fn name_matches(name: &str, table: &[String]) -> bool {
    let name = name.to_lowercase();
    table.iter().any(|k| name.contains(k.to_lowercase().as_str()))
}

impl NameHeuristics {
    pub fn is_seasonal(&self, bill: &RecurringBillRecord) -> bool {
        match bill.category {
            Some(category) => category == BillCategory::Utility,
            None => name_matches(&bill.name, &self.seasonal_keywords),
        }
    }

    pub fn is_flat_rate(&self, bill: &RecurringBillRecord) -> bool {
        match bill.category {
            Some(category) => category == BillCategory::Telecom,
            None => name_matches(&bill.name, &self.flat_rate_keywords),
        }
    }

    pub fn is_seasonal_variance(&self, bill: &RecurringBillRecord) -> bool {
        match bill.category {
            Some(category) => category == BillCategory::Utility,
            None => name_matches(&bill.name, &self.seasonal_variance_keywords),
        }
    }
}
