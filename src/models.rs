// src/models.rs
use serde::{Serialize, Deserialize};
use chrono::NaiveDate;

/// One observed payment of a recurring bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillHistoryEntry {
    pub actual_amount: f64,
    pub bill_date: NaiveDate,
    #[serde(default)]
    pub variance: f64,
    #[serde(default)]
    pub variance_percent: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EstimationMethod {
    Base,
    LastBill,
    Average,
    Seasonal,
    Trend,
    #[default]
    #[serde(other)]
    Auto,
}

/// Caller-supplied tag that overrides name matching when present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillCategory {
    Utility,
    Telecom,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringBillRecord {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<BillCategory>,
    #[serde(default)]
    pub base_amount: Option<f64>,
    #[serde(default)]
    pub average_amount: Option<f64>,
    #[serde(default)]
    pub min_amount: Option<f64>,
    #[serde(default)]
    pub max_amount: Option<f64>,
    #[serde(default)]
    pub last_bill_amount: Option<f64>,
    #[serde(default)]
    pub estimation_method: EstimationMethod,
    #[serde(default)]
    pub is_variable_amount: bool,
    #[serde(default)]
    pub bill_history: Vec<BillHistoryEntry>,
}

impl RecurringBillRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        RecurringBillRecord {
            id: id.into(),
            name: name.into(),
            category: None,
            base_amount: None,
            average_amount: None,
            min_amount: None,
            max_amount: None,
            last_bill_amount: None,
            estimation_method: EstimationMethod::Auto,
            is_variable_amount: false,
            bill_history: Vec::new(),
        }
    }

    /// `baseAmount ?? averageAmount ?? 0`
    pub fn reference_amount(&self) -> f64 {
        self.base_amount.or(self.average_amount).unwrap_or(0.0)
    }

    /// `averageAmount ?? baseAmount ?? 0`
    pub fn average_or_base(&self) -> f64 {
        self.average_amount.or(self.base_amount).unwrap_or(0.0)
    }

    /// `lastBillAmount ?? averageAmount ?? baseAmount ?? 0`
    pub fn last_or_fallback(&self) -> f64 {
        self.last_bill_amount
            .or(self.average_amount)
            .or(self.base_amount)
            .unwrap_or(0.0)
    }

    pub fn history_amounts(&self) -> Vec<f64> {
        self.bill_history.iter().map(|e| e.actual_amount).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmountRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResult {
    pub estimated_amount: f64,
    pub confidence: Confidence,
    pub reason: String,
    pub range: AmountRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarianceType {
    Stable,
    Seasonal,
    // Never produced by the analyzer; kept so stored/serialized values still parse.
    Trending,
    Volatile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VarianceAnalysis {
    pub variance_type: VarianceType,
    pub analysis: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalySeverity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyReport {
    pub is_anomaly: bool,
    pub severity: AnomalySeverity,
    pub message: String,
    pub suggested_action: String,
}

/// Summary figures derived from a bill's history, for callers that cache them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillSummary {
    pub count: usize,
    pub average_amount: f64,
    pub min_amount: f64,
    pub max_amount: f64,
    pub last_bill_amount: f64,
}
