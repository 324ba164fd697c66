// src/services/variance.rs
use log::debug;

use crate::models::{RecurringBillRecord, VarianceAnalysis, VarianceType};
use super::estimation::variance_range;
use super::heuristics::NameHeuristics;
use super::statistics::mean;

const STABLE_THRESHOLD: f64 = 0.1;
const MODERATE_THRESHOLD: f64 = 0.3;

fn analysis(
    variance_type: VarianceType,
    analysis: String,
    recommendations: &[&str],
) -> VarianceAnalysis {
    VarianceAnalysis {
        variance_type,
        analysis,
        recommendations: recommendations.iter().map(|r| r.to_string()).collect(),
    }
}

/// Classifies how much a bill's amounts move around from bill to bill.
pub fn analyze_bill_variance(
    bill: &RecurringBillRecord,
    heuristics: &NameHeuristics,
) -> VarianceAnalysis {
    if bill.bill_history.len() < 3 {
        return analysis(
            VarianceType::Stable,
            "Insufficient data for variance analysis".to_string(),
            &["Add more bill history to improve predictions"],
        );
    }

    let average = mean(&bill.history_amounts());
    let coefficient_of_variation = if average > 0.0 {
        variance_range(bill) / average
    } else {
        0.0
    };
    let percent = coefficient_of_variation * 100.0;
    debug!("{}: coefficient of variation {:.3}", bill.name, coefficient_of_variation);

    if coefficient_of_variation < STABLE_THRESHOLD {
        analysis(
            VarianceType::Stable,
            format!("Bill amounts are very consistent ({:.1}% variation)", percent),
            &[
                "Consider using base amount estimation",
                "This bill is highly predictable for budgeting",
            ],
        )
    } else if coefficient_of_variation < MODERATE_THRESHOLD {
        if heuristics.is_seasonal_variance(bill) {
            analysis(
                VarianceType::Seasonal,
                format!("Bill shows seasonal variation patterns ({:.1}% variation)", percent),
                &[
                    "Use seasonal estimation method",
                    "Track bills for a full year to capture seasonal patterns",
                ],
            )
        } else {
            analysis(
                VarianceType::Stable,
                format!("Bill has moderate but manageable variance ({:.1}% variation)", percent),
                &["Use average estimation method"],
            )
        }
    } else {
        analysis(
            VarianceType::Volatile,
            format!("Bill amounts vary significantly ({:.1}% variation)", percent),
            &[
                "Review recent bills for unusual charges",
                "Budget with a higher buffer for this bill",
                "Track usage patterns to understand what drives the amount",
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BillHistoryEntry;
    use chrono::NaiveDate;

    fn bill_with(name: &str, amounts: &[f64]) -> RecurringBillRecord {
        let mut bill = RecurringBillRecord::new("bill-1", name);
        bill.is_variable_amount = true;
        bill.bill_history = amounts.iter().enumerate()
            .map(|(i, a)| BillHistoryEntry {
                actual_amount: *a,
                bill_date: NaiveDate::from_ymd_opt(2025, i as u32 + 1, 1).unwrap(),
                variance: 0.0,
                variance_percent: Some(0.0),
            })
            .collect();
        bill
    }

    fn analyze(name: &str, amounts: &[f64]) -> VarianceAnalysis {
        analyze_bill_variance(&bill_with(name, amounts), &NameHeuristics::default())
    }

    #[test]
    fn short_history_is_insufficient() {
        let result = analyze("Water", &[40.0, 90.0]);
        assert_eq!(result.variance_type, VarianceType::Stable);
        assert_eq!(result.analysis, "Insufficient data for variance analysis");
        assert_eq!(result.recommendations, vec!["Add more bill history to improve predictions"]);
    }

    #[test]
    fn near_identical_bills_are_stable() {
        let result = analyze("Internet", &[50.0, 50.5, 49.8]);
        assert_eq!(result.variance_type, VarianceType::Stable);
        assert!(result.analysis.contains("very consistent"));
        assert!(result.recommendations.iter().any(|r| r.contains("base amount estimation")));
    }

    #[test]
    fn moderate_variance_depends_on_name() {
        // mean 100, population sd ~16.3
        let amounts = [80.0, 100.0, 120.0];
        let heuristics = NameHeuristics::default();

        let utility = analyze_bill_variance(&bill_with("Electric", &amounts), &heuristics);
        assert_eq!(utility.variance_type, VarianceType::Seasonal);
        assert_eq!(utility.recommendations[0], "Use seasonal estimation method");

        let other = analyze_bill_variance(&bill_with("Water", &amounts), &heuristics);
        assert_eq!(other.variance_type, VarianceType::Stable);
        assert!(other.analysis.contains("moderate but manageable"));
        assert_eq!(other.recommendations, vec!["Use average estimation method"]);
    }

    #[test]
    fn cooling_is_not_a_variance_keyword() {
        let result = analyze("Cooling", &[80.0, 100.0, 120.0]);
        assert_eq!(result.variance_type, VarianceType::Stable);
    }

    #[test]
    fn large_swings_are_volatile() {
        let result = analyze("Electric", &[20.0, 100.0, 180.0, 40.0]);
        assert_eq!(result.variance_type, VarianceType::Volatile);
        assert!(result.analysis.contains("vary significantly"));
        assert_eq!(result.recommendations.len(), 3);
    }

    #[test]
    fn zero_amounts_do_not_divide_by_zero() {
        let result = analyze("Water", &[0.0, 0.0, 0.0]);
        assert_eq!(result.variance_type, VarianceType::Stable);
    }
}
