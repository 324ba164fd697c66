// src/handlers/mod.rs
pub mod bills;
pub mod error;
