// EHR Log Analyzer - app/mod.rs
//
// Application layer: orchestration, state management, background loading.
// Dependencies: core layer, platform (file reading, config).
// Must NOT depend on: ui.

pub mod headless;
pub mod load;
pub mod state;
