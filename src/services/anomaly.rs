// src/services/anomaly.rs
use chrono::NaiveDate;
use log::warn;

use crate::models::{AnomalyReport, AnomalySeverity, RecurringBillRecord};
use super::estimation::calculate_next_bill_estimate;
use super::heuristics::NameHeuristics;

const MEDIUM_THRESHOLD: f64 = 15.0;
const HIGH_THRESHOLD: f64 = 40.0;

/// Compares `proposed_amount` against the current estimate for `bill`.
///
/// The deviation is measured in both directions, but the message always
/// reads as an overage.
pub fn check_for_bill_anomalies(
    bill: &RecurringBillRecord,
    proposed_amount: f64,
    heuristics: &NameHeuristics,
    today: NaiveDate,
) -> AnomalyReport {
    let estimate = calculate_next_bill_estimate(bill, heuristics, today);
    let expected = estimate.estimated_amount;
    let percent_diff = if expected > 0.0 {
        (proposed_amount - expected).abs() * 100.0 / expected
    } else {
        0.0
    };

    if percent_diff < MEDIUM_THRESHOLD {
        return AnomalyReport {
            is_anomaly: false,
            severity: AnomalySeverity::Low,
            message: "Bill amount is within normal range".to_string(),
            suggested_action: "No action needed".to_string(),
        };
    }

    warn!(
        "{}: amount {:.2} deviates {:.1}% from estimate {:.2}",
        bill.name, proposed_amount, percent_diff, expected
    );

    if percent_diff < HIGH_THRESHOLD {
        AnomalyReport {
            is_anomaly: true,
            severity: AnomalySeverity::Medium,
            message: format!("Bill is {:.0}% higher than expected", percent_diff),
            suggested_action: "Review bill for unusual charges".to_string(),
        }
    } else {
        AnomalyReport {
            is_anomaly: true,
            severity: AnomalySeverity::High,
            message: format!("Bill is unusually high ({:.0}% higher than expected)", percent_diff),
            suggested_action: "Carefully review the bill and contact the provider".to_string(),
        }
    }
}
