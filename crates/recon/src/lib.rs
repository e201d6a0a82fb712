//! `album-recon` — collection reconciliation engine.
//!
//! Pure engine crate: receives two pre-loaded collections, returns
//! missing/surplus/exchange sets. No CLI or IO dependencies.

pub mod engine;
pub mod model;

pub use engine::compare;
pub use model::{ExchangeReport, SideReport, SurplusEntry};
