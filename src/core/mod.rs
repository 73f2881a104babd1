// EHR Log Analyzer - core/mod.rs
//
// Core business logic layer.
// Dependencies: standard library, regex, scraper, serde, csv, chrono.
// Must NOT depend on: ui, platform, app.

pub mod document;
pub mod export;
pub mod filter;
pub mod intake;
pub mod model;
pub mod parser;
pub mod summary;
