// EHR Log Analyzer - ui/panels/mod.rs

pub mod about;
pub mod filters;
pub mod stats;
pub mod summary;
pub mod tables;
pub mod upload;
