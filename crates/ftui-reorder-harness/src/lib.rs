#![forbid(unsafe_code)]

//! Scripted host for `ftui-reorder`.
//!
//! Runs a [`Scenario`](scenario::Scenario) against a
//! [`ListController`](ftui_reorder::ListController) and a simulated stacked
//! layout, reproducing the demo host (active entry, reorder, remove, append),
//! and reports every step as a JSONL [`TraceRecord`](runner::TraceRecord).

pub mod demo;
pub mod determinism;
pub mod error;
pub mod runner;
pub mod scenario;

pub use error::HarnessError;
pub use runner::{RunReport, ScenarioRunner, TraceRecord};
pub use scenario::{Scenario, Step};
