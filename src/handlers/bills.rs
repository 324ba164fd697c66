// src/handlers/bills.rs
use chrono::{Local, NaiveDate};
use log::{info, warn};
use serde::Deserialize;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use crate::config::AppConfig;
use crate::models::RecurringBillRecord;
use crate::services::anomaly::check_for_bill_anomalies;
use crate::services::estimation::calculate_next_bill_estimate;
use crate::services::variance::analyze_bill_variance;
use super::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    pub bill: RecurringBillRecord,
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VarianceRequest {
    pub bill: RecurringBillRecord,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyRequest {
    pub bill: RecurringBillRecord,
    pub proposed_amount: f64,
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

fn validate_amount(label: &str, amount: f64) -> Result<(), ApiError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(ApiError::invalid_input(format!("{} must be a non-negative number", label)))
    }
}

fn validate_bill(bill: &RecurringBillRecord) -> Result<(), Rejection> {
    for entry in &bill.bill_history {
        validate_amount("actualAmount", entry.actual_amount).map_err(|e| {
            warn!("Rejecting bill {}: {}", bill.id, e);
            warp::reject::custom(e)
        })?;
    }
    Ok(())
}

fn reference_date(as_of: Option<NaiveDate>) -> NaiveDate {
    as_of.unwrap_or_else(|| Local::now().date_naive())
}

pub async fn estimate_bill(
    request: EstimateRequest,
    config: Arc<AppConfig>,
) -> Result<Json, Rejection> {
    info!("Handling request to estimate bill {}", request.bill.id);
    validate_bill(&request.bill)?;

    let today = reference_date(request.as_of);
    let estimate = calculate_next_bill_estimate(&request.bill, &config.heuristics, today);
    info!(
        "Estimated {} at {:.2} ({:?})",
        request.bill.id, estimate.estimated_amount, estimate.confidence
    );
    Ok(warp::reply::json(&estimate))
}

pub async fn analyze_variance(
    request: VarianceRequest,
    config: Arc<AppConfig>,
) -> Result<Json, Rejection> {
    info!("Handling request to analyze variance for bill {}", request.bill.id);
    validate_bill(&request.bill)?;

    let analysis = analyze_bill_variance(&request.bill, &config.heuristics);
    Ok(warp::reply::json(&analysis))
}

pub async fn check_anomaly(
    request: AnomalyRequest,
    config: Arc<AppConfig>,
) -> Result<Json, Rejection> {
    info!("Handling request to check bill {} for anomalies", request.bill.id);
    validate_bill(&request.bill)?;
    validate_amount("proposedAmount", request.proposed_amount).map_err(warp::reject::custom)?;

    let report = check_for_bill_anomalies(
        &request.bill,
        request.proposed_amount,
        &config.heuristics,
        reference_date(request.as_of),
    );
    Ok(warp::reply::json(&report))
}
