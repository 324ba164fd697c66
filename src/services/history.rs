// src/services/history.rs
use chrono::NaiveDate;

use crate::models::{BillHistoryEntry, BillSummary, RecurringBillRecord};
use super::statistics::mean;

/// Records what was actually billed against what had been estimated.
pub fn new_history_entry(
    actual_amount: f64,
    bill_date: NaiveDate,
    estimated_amount: f64,
) -> BillHistoryEntry {
    let variance = actual_amount - estimated_amount;
    let variance_percent = if estimated_amount != 0.0 {
        Some(variance / estimated_amount * 100.0)
    } else {
        None
    };
    BillHistoryEntry {
        actual_amount,
        bill_date,
        variance,
        variance_percent,
    }
}

pub fn summarize_history(history: &[BillHistoryEntry]) -> Option<BillSummary> {
    let latest = history.iter().max_by_key(|e| e.bill_date)?;
    let amounts: Vec<f64> = history.iter().map(|e| e.actual_amount).collect();

    Some(BillSummary {
        count: amounts.len(),
        average_amount: mean(&amounts),
        min_amount: amounts.iter().copied().fold(f64::INFINITY, f64::min),
        max_amount: amounts.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        last_bill_amount: latest.actual_amount,
    })
}

impl RecurringBillRecord {
    /// Copy of this record with its cached summary fields recomputed from
    /// `bill_history`. Records without history keep their existing values.
    pub fn with_refreshed_summary(&self) -> RecurringBillRecord {
        let mut refreshed = self.clone();
        if let Some(summary) = summarize_history(&self.bill_history) {
            refreshed.average_amount = Some(summary.average_amount);
            refreshed.min_amount = Some(summary.min_amount);
            refreshed.max_amount = Some(summary.max_amount);
            refreshed.last_bill_amount = Some(summary.last_bill_amount);
        }
        refreshed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, 5).unwrap()
    }

    #[test]
    fn entry_records_signed_variance() {
        let entry = new_history_entry(110.0, date(1), 100.0);
        assert_eq!(entry.variance, 10.0);
        assert!((entry.variance_percent.unwrap() - 10.0).abs() < 1e-9);

        let under = new_history_entry(90.0, date(1), 100.0);
        assert_eq!(under.variance, -10.0);

        let unestimated = new_history_entry(90.0, date(1), 0.0);
        assert_eq!(unestimated.variance_percent, None);
    }

    #[test]
    fn summary_uses_latest_date_for_last_bill() {
        let history = vec![
            new_history_entry(70.0, date(3), 60.0),
            new_history_entry(50.0, date(1), 60.0),
            new_history_entry(60.0, date(2), 60.0),
        ];
        let summary = summarize_history(&history).unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.average_amount, 60.0);
        assert_eq!(summary.min_amount, 50.0);
        assert_eq!(summary.max_amount, 70.0);
        assert_eq!(summary.last_bill_amount, 70.0);
        assert!(summarize_history(&[]).is_none());
    }

    #[test]
    fn refresh_replaces_stale_hints() {
        let mut bill = RecurringBillRecord::new("bill-1", "Water");
        bill.average_amount = Some(999.0);
        bill.bill_history = vec![
            new_history_entry(40.0, date(1), 45.0),
            new_history_entry(50.0, date(2), 45.0),
        ];
        let refreshed = bill.with_refreshed_summary();
        assert_eq!(refreshed.average_amount, Some(45.0));
        assert_eq!(refreshed.last_bill_amount, Some(50.0));
        assert_eq!(bill.average_amount, Some(999.0));

        let empty = RecurringBillRecord::new("bill-2", "Gym").with_refreshed_summary();
        assert_eq!(empty.average_amount, None);
    }
}
