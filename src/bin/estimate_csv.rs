// src/bin/estimate_csv.rs
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use csv::Reader;
use dotenv::dotenv;
use log::info;
use serde::Deserialize;
use std::env;
use std::fs::File;

use bill_estimator::config::AppConfig;
use bill_estimator::models::RecurringBillRecord;
use bill_estimator::services::estimation::calculate_next_bill_estimate;
use bill_estimator::services::history::{new_history_entry, summarize_history};
use bill_estimator::services::variance::analyze_bill_variance;

#[derive(Debug, Deserialize)]
struct HistoryRow {
    bill_date: NaiveDate,
    actual_amount: f64,
    estimated_amount: Option<f64>,
}

fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let mut args = env::args().skip(1);
    let path = args.next()
        .or_else(|| env::var("BILL_HISTORY_CSV").ok())
        .context("usage: estimate_csv <history.csv> [name] [base_amount]")?;
    let name = args.next().unwrap_or_else(|| "Imported bill".to_string());
    let base_amount = args.next()
        .map(|raw| {
            raw.parse::<f64>()
                .with_context(|| format!("base_amount must be a number, got {:?}", raw))
        })
        .transpose()?;

    let config = AppConfig::from_env()?;

    let file = File::open(&path).with_context(|| format!("Failed to open {}", path))?;
    let mut rdr = Reader::from_reader(file);

    let mut bill = RecurringBillRecord::new(path.clone(), name);
    bill.base_amount = base_amount;
    bill.is_variable_amount = true;

    for result in rdr.deserialize() {
        let row: HistoryRow = result?;
        let estimated = row.estimated_amount.or(base_amount).unwrap_or(row.actual_amount);
        bill.bill_history.push(new_history_entry(row.actual_amount, row.bill_date, estimated));
    }
    info!("Loaded {} bills from {}", bill.bill_history.len(), path);

    let bill = bill.with_refreshed_summary();
    let today = Local::now().date_naive();

    let report = serde_json::json!({
        "summary": summarize_history(&bill.bill_history),
        "estimate": calculate_next_bill_estimate(&bill, &config.heuristics, today),
        "variance": analyze_bill_variance(&bill, &config.heuristics),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
