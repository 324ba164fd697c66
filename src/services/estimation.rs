// src/services/estimation.rs
use chrono::{Datelike, NaiveDate};
use log::debug;

use crate::models::{AmountRange, Confidence, EstimateResult, EstimationMethod, RecurringBillRecord};
use super::heuristics::NameHeuristics;
use super::statistics::{linear_trend_slope, mean, standard_deviation};

const DEFAULT_VARIANCE_SHARE: f64 = 0.2;
const TREND_WINDOW: usize = 6;
const SEASONAL_MIN_HISTORY: usize = 6;
const TREND_MIN_HISTORY: usize = 3;

/// Width of the uncertainty band on either side of an estimate.
///
/// Historical standard deviation when history exists, otherwise 20% of the
/// reference amount.
pub fn variance_range(bill: &RecurringBillRecord) -> f64 {
    if bill.bill_history.is_empty() {
        DEFAULT_VARIANCE_SHARE * bill.reference_amount()
    } else {
        standard_deviation(&bill.history_amounts())
    }
}

fn band(center: f64, spread: f64) -> AmountRange {
    AmountRange {
        min: (center - spread).max(0.0),
        max: center + spread,
    }
}

pub fn estimate_fixed(bill: &RecurringBillRecord) -> EstimateResult {
    let amount = bill.reference_amount();
    EstimateResult {
        estimated_amount: amount,
        confidence: Confidence::High,
        reason: "Fixed amount bill".to_string(),
        range: AmountRange { min: amount, max: amount },
    }
}

pub fn estimate_from_last_bill(bill: &RecurringBillRecord) -> EstimateResult {
    let amount = bill.last_or_fallback();
    let confidence = if bill.bill_history.is_empty() {
        Confidence::Low
    } else {
        Confidence::Medium
    };
    EstimateResult {
        estimated_amount: amount,
        confidence,
        reason: "Based on most recent bill".to_string(),
        range: band(amount, variance_range(bill)),
    }
}

pub fn estimate_from_average(bill: &RecurringBillRecord) -> EstimateResult {
    let amount = bill.average_or_base();
    let count = bill.bill_history.len();
    let confidence = match count {
        0 | 1 => Confidence::Low,
        2 | 3 => Confidence::Medium,
        _ => Confidence::High,
    };
    EstimateResult {
        estimated_amount: amount,
        confidence,
        reason: format!("Based on {} bill average", count),
        range: band(amount, variance_range(bill)),
    }
}

/// Averages the bills that fell in the same calendar month as `today`.
pub fn estimate_seasonal(bill: &RecurringBillRecord, today: NaiveDate) -> EstimateResult {
    if bill.bill_history.len() < SEASONAL_MIN_HISTORY {
        debug!("{}: too little history for seasonal estimate, using average", bill.name);
        return estimate_from_average(bill);
    }

    let same_month: Vec<f64> = bill.bill_history.iter()
        .filter(|e| e.bill_date.month() == today.month())
        .map(|e| e.actual_amount)
        .collect();

    if same_month.is_empty() {
        debug!("{}: no bills from month {}, using average", bill.name, today.month());
        return estimate_from_average(bill);
    }

    let amount = mean(&same_month);
    let confidence = if same_month.len() > 1 {
        Confidence::High
    } else {
        Confidence::Medium
    };
    EstimateResult {
        estimated_amount: amount,
        confidence,
        reason: format!("Based on {} bills from same month", same_month.len()),
        range: band(amount, variance_range(bill)),
    }
}

/// Projects one step past the most recent bills using their linear trend.
pub fn estimate_from_trend(bill: &RecurringBillRecord) -> EstimateResult {
    if bill.bill_history.len() < TREND_MIN_HISTORY {
        debug!("{}: too little history for trend estimate, using average", bill.name);
        return estimate_from_average(bill);
    }

    let mut history: Vec<_> = bill.bill_history.iter().collect();
    history.sort_by(|a, b| b.bill_date.cmp(&a.bill_date));
    let mut recent: Vec<f64> = history.iter()
        .take(TREND_WINDOW)
        .map(|e| e.actual_amount)
        .collect();
    recent.reverse();

    let slope = linear_trend_slope(&recent);
    let last = recent.last().copied().unwrap_or(0.0);
    let projected = last + slope;
    let amount = projected.max(0.0);
    debug!(
        "{}: trend slope {:.2} over {} bills, projected {:.2}",
        bill.name, slope, recent.len(), projected
    );

    let mut range = band(projected, variance_range(bill));
    range.max = range.max.max(amount);

    let confidence = if recent.len() > 3 {
        Confidence::Medium
    } else {
        Confidence::Low
    };
    EstimateResult {
        estimated_amount: amount,
        confidence,
        reason: format!("Based on {}-month trend analysis", recent.len()),
        range,
    }
}

fn estimate_automatically(
    bill: &RecurringBillRecord,
    heuristics: &NameHeuristics,
    today: NaiveDate,
) -> EstimateResult {
    let count = bill.bill_history.len();

    if count == 0 {
        let amount = bill.base_amount.unwrap_or(0.0);
        return EstimateResult {
            estimated_amount: amount,
            confidence: Confidence::Low,
            reason: "Insufficient history - using base amount".to_string(),
            range: AmountRange { min: amount * 0.8, max: amount * 1.2 },
        };
    }

    if count < 3 {
        return estimate_from_last_bill(bill);
    }

    if count > SEASONAL_MIN_HISTORY && heuristics.is_seasonal(bill) {
        debug!("{}: auto-selected seasonal estimate", bill.name);
        return estimate_seasonal(bill, today);
    }

    if heuristics.is_flat_rate(bill) {
        debug!("{}: auto-selected average estimate for flat-rate bill", bill.name);
    }
    estimate_from_average(bill)
}

/// Runs the named strategy directly. `Base` is the fixed-amount strategy and
/// `Auto` falls back to automatic selection.
pub fn estimate_with_method(
    bill: &RecurringBillRecord,
    method: EstimationMethod,
    heuristics: &NameHeuristics,
    today: NaiveDate,
) -> EstimateResult {
    match method {
        EstimationMethod::Base => estimate_fixed(bill),
        EstimationMethod::LastBill => estimate_from_last_bill(bill),
        EstimationMethod::Average => estimate_from_average(bill),
        EstimationMethod::Seasonal => estimate_seasonal(bill, today),
        EstimationMethod::Trend => estimate_from_trend(bill),
        EstimationMethod::Auto => estimate_automatically(bill, heuristics, today),
    }
}

/// Predicts the next amount due for `bill` as of `today`.
///
/// Fixed-amount bills always use the fixed strategy. Variable bills use their
/// configured strategy, or automatic selection for `auto` and `base`.
pub fn calculate_next_bill_estimate(
    bill: &RecurringBillRecord,
    heuristics: &NameHeuristics,
    today: NaiveDate,
) -> EstimateResult {
    if !bill.is_variable_amount {
        return estimate_fixed(bill);
    }

    match bill.estimation_method {
        method @ (EstimationMethod::LastBill
        | EstimationMethod::Average
        | EstimationMethod::Seasonal
        | EstimationMethod::Trend) => estimate_with_method(bill, method, heuristics, today),
        EstimationMethod::Base | EstimationMethod::Auto => {
            estimate_automatically(bill, heuristics, today)
        }
    }
}
