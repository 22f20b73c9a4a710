#![forbid(unsafe_code)]

use std::fmt;
use std::io;

use ftui_reorder::{ListConfigError, OrderError};

/// Everything that can stop a harness run.
#[derive(Debug)]
pub enum HarnessError {
    /// Reading the scenario or writing the trace failed.
    Io(io::Error),
    /// The scenario file is not valid JSON for [`Scenario`](crate::scenario::Scenario).
    Scenario(serde_json::Error),
    /// A trace record could not be encoded.
    Trace(serde_json::Error),
    /// The scenario's list configuration was rejected.
    Config(ListConfigError),
    /// A step referenced an item the demo list does not have.
    Model { step: usize, source: OrderError },
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "i/o error: {err}"),
            Self::Scenario(err) => write!(f, "invalid scenario: {err}"),
            Self::Trace(err) => write!(f, "trace encoding failed: {err}"),
            Self::Config(err) => write!(f, "invalid list config: {err}"),
            Self::Model { step, source } => write!(f, "step {step}: {source}"),
        }
    }
}

impl std::error::Error for HarnessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Scenario(err) | Self::Trace(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Model { source, .. } => Some(source),
        }
    }
}

impl From<io::Error> for HarnessError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for HarnessError {
    fn from(err: serde_json::Error) -> Self {
        Self::Scenario(err)
    }
}

impl From<ListConfigError> for HarnessError {
    fn from(err: ListConfigError) -> Self {
        Self::Config(err)
    }
}
