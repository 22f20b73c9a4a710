#![forbid(unsafe_code)]

//! Reorder harness runner.
//!
//! Runs one scenario and prints its trace as JSON lines on stdout. Logs go to
//! stderr.
//!
//! # Running
//!
//! ```sh
//! cargo run -p ftui-reorder-harness
//! REORDER_HARNESS_SCENARIO=drag.json REORDER_HARNESS_LOG=debug cargo run -p ftui-reorder-harness
//! ```
//!
//! # Environment
//!
//! - `REORDER_HARNESS_SCENARIO`: path to a JSON scenario (default: built-in demo)
//! - `REORDER_HARNESS_LOG`: tracing filter directives (default: `warn`)
//! - `REORDER_HARNESS_LOG_JSON`: `1`/`true` for JSON log lines

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use ftui_reorder_harness::{HarnessError, Scenario, ScenarioRunner};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .ok()
        .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("REORDER_HARNESS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false);
    if env_flag("REORDER_HARNESS_LOG_JSON") {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

fn load_scenario() -> Result<Scenario, HarnessError> {
    match std::env::var("REORDER_HARNESS_SCENARIO") {
        Ok(path) if !path.is_empty() => {
            info!(path = %path, "loading scenario");
            Scenario::from_path(path)
        }
        _ => Ok(Scenario::demo()),
    }
}

fn run() -> Result<(), HarnessError> {
    let scenario = load_scenario()?;
    let report = ScenarioRunner::new(&scenario)?.run()?;
    info!(
        run_id = %report.run_id,
        steps = report.records.len(),
        "scenario finished"
    );

    let mut out = BufWriter::new(io::stdout().lock());
    out.write_all(report.to_jsonl()?.as_bytes())?;
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "harness run failed");
            eprintln!("ftui-reorder-harness: {err}");
            ExitCode::FAILURE
        }
    }
}
