// src/services/mod.rs
pub mod anomaly;
pub mod estimation;
pub mod heuristics;
pub mod history;
pub mod statistics;
pub mod variance;
