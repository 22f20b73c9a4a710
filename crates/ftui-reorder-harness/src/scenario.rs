#![forbid(unsafe_code)]

//! Scripted host input.
//!
//! A scenario is a JSON document: list setup plus a sequence of steps tagged
//! by `op`.
//!
//! ```json
//! { "name": "drag", "steps": [
//!     { "op": "press", "item": 0, "x": 10, "y": 10 },
//!     { "op": "wait", "ms": 200 },
//!     { "op": "move", "x": 10, "y": 50 },
//!     { "op": "release", "x": 10, "y": 50 } ] }
//! ```

use std::path::Path;

use ftui_reorder::{ListConfig, PointerButton};
use serde::{Deserialize, Serialize};

use crate::demo::DEMO_CONTENT;
use crate::error::HarnessError;

const fn default_item_height() -> f32 {
    20.0
}

const fn default_step_ms() -> u64 {
    16
}

fn default_property() -> String {
    "transform".to_string()
}

/// One host action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Mouse press on the item at `item`.
    Press {
        item: usize,
        x: f32,
        y: f32,
        #[serde(default)]
        button: PointerButton,
    },
    /// Touch start on the item at `item`.
    TouchStart { item: usize, id: u32, x: f32, y: f32 },
    /// Pointer move; `touch` selects a touch id instead of the mouse.
    Move {
        x: f32,
        y: f32,
        #[serde(default)]
        touch: Option<u32>,
    },
    /// Pointer release.
    Release {
        x: f32,
        y: f32,
        #[serde(default)]
        touch: Option<u32>,
    },
    /// The pointer stream was aborted.
    Cancel,
    /// The window lost focus.
    Blur,
    /// Let `ms` pass, then poll the timer.
    Wait { ms: u64 },
    /// Click the remove button of the item at `item`.
    Remove { item: usize },
    /// The rendering layer finished a transition.
    TransitionEnd {
        #[serde(default = "default_property")]
        property: String,
    },
    /// Replace the input line.
    Type { text: String },
    /// Press enter in the input line.
    Submit,
}

impl Step {
    /// Short name for traces.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Press { .. } => "press",
            Self::TouchStart { .. } => "touch_start",
            Self::Move { .. } => "move",
            Self::Release { .. } => "release",
            Self::Cancel => "cancel",
            Self::Blur => "blur",
            Self::Wait { .. } => "wait",
            Self::Remove { .. } => "remove",
            Self::TransitionEnd { .. } => "transition_end",
            Self::Type { .. } => "type",
            Self::Submit => "submit",
        }
    }
}

/// A full scripted run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub config: ListConfig,
    /// Initial labels; the demo content when absent.
    #[serde(default)]
    pub items: Option<Vec<String>>,
    /// Content height of every item.
    #[serde(default = "default_item_height")]
    pub item_height: f32,
    /// Top and bottom margin of every item.
    #[serde(default)]
    pub item_margin: f32,
    /// Clock advance for every step except `wait`.
    #[serde(default = "default_step_ms")]
    pub step_ms: u64,
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Parse a scenario document.
    pub fn from_json(text: &str) -> Result<Self, HarnessError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a scenario file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, HarnessError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Initial labels.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        match &self.items {
            Some(items) => items.clone(),
            None => DEMO_CONTENT.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// The built-in walkthrough of the demo: activate an entry, drag the
    /// first entry two slots down, remove one entry with its animation, and
    /// append a new one.
    #[must_use]
    pub fn demo() -> Self {
        let steps = vec![
            Step::Press {
                item: 1,
                x: 10.0,
                y: 30.0,
                button: PointerButton::Primary,
            },
            Step::Release {
                x: 10.0,
                y: 30.0,
                touch: None,
            },
            Step::Press {
                item: 0,
                x: 10.0,
                y: 10.0,
                button: PointerButton::Primary,
            },
            Step::Wait { ms: 200 },
            Step::Move {
                x: 10.0,
                y: 30.0,
                touch: None,
            },
            Step::Move {
                x: 10.0,
                y: 50.0,
                touch: None,
            },
            Step::Release {
                x: 10.0,
                y: 50.0,
                touch: None,
            },
            Step::Remove { item: 1 },
            Step::TransitionEnd {
                property: default_property(),
            },
            Step::Type {
                text: "neu".to_string(),
            },
            Step::Submit,
        ];
        Self {
            name: "demo".to_string(),
            config: ListConfig::default(),
            items: None,
            item_height: default_item_height(),
            item_margin: 0.0,
            step_ms: default_step_ms(),
            steps,
        }
    }
}
