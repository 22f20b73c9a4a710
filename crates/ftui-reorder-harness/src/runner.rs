#![forbid(unsafe_code)]

//! Drives a [`ListController`] through a [`Scenario`] the way a browser host
//! would, and records one [`TraceRecord`] per step.
//!
//! # Host model
//!
//! - After every step the fresh directives are applied to the simulated
//!   [`StackLayout`] before the next step runs.
//! - A removed entry leaves the demo model at once but stays mounted in the
//!   layout until its completion callback runs, so the rows below can slide
//!   over it. Layout indices skip over that leaving row.
//! - `Reorder` and `Click` signals are applied to the [`DemoList`].

use std::cell::RefCell;
use std::rc::Rc;

use ftui_reorder::{
    CaptureCommand, DispatchOutcome, ItemDirective, ListController, ListDispatch, ListInput,
    ListLayout, ListSignal, Point, PointerButton, PointerEvent, PointerId, StackLayout,
};
use serde::Serialize;
use tracing::{debug, info_span};

use crate::demo::{DemoEntry, DemoList};
use crate::determinism::DeterminismFixture;
use crate::error::HarnessError;
use crate::scenario::{Scenario, Step};

/// One JSONL trace line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceRecord {
    pub seq: usize,
    pub ts: String,
    pub run_id: String,
    pub at_ms: u64,
    pub op: &'static str,
    pub outcome: DispatchOutcome,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub signals: Vec<ListSignal>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub capture: Vec<CaptureCommand>,
    pub dragging: bool,
    /// CSS transforms per mounted row, present only when they changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transforms: Option<Vec<Option<String>>>,
    /// CSS transitions per mounted row, alongside `transforms`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transitions: Option<Vec<Option<String>>>,
    pub contents: Vec<String>,
    pub active: Option<usize>,
}

/// Result of a complete run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: String,
    pub records: Vec<TraceRecord>,
    pub entries: Vec<DemoEntry>,
}

impl RunReport {
    /// Final labels in display order.
    #[must_use]
    pub fn contents(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.content.clone()).collect()
    }

    /// Encode the trace as JSON lines.
    pub fn to_jsonl(&self) -> Result<String, HarnessError> {
        let mut out = String::new();
        for record in &self.records {
            out.push_str(&serde_json::to_string(record).map_err(HarnessError::Trace)?);
            out.push('\n');
        }
        Ok(out)
    }
}

/// Scripted host around one controller.
#[derive(Debug)]
pub struct ScenarioRunner {
    steps: Vec<Step>,
    item_height: f32,
    list: ListController,
    layout: StackLayout,
    demo: DemoList,
    fixture: DeterminismFixture,
    leaving: Option<usize>,
    unmounts: Rc<RefCell<Vec<usize>>>,
    rendered: Vec<ItemDirective>,
}

impl ScenarioRunner {
    /// Set up the list, layout and demo model for `scenario`.
    pub fn new(scenario: &Scenario) -> Result<Self, HarnessError> {
        let list = ListController::new(scenario.config)?;
        let labels = scenario.labels();
        let layout = StackLayout::new(0.0, labels.iter().map(|_| scenario.item_height))
            .with_margins(scenario.item_margin, scenario.item_margin);
        let rendered = list.directives(layout.len());
        Ok(Self {
            steps: scenario.steps.clone(),
            item_height: scenario.item_height,
            list,
            layout,
            demo: DemoList::new(labels),
            fixture: DeterminismFixture::new(&scenario.name, scenario.step_ms),
            leaving: None,
            unmounts: Rc::new(RefCell::new(Vec::new())),
            rendered,
        })
    }

    /// Run every step.
    pub fn run(mut self) -> Result<RunReport, HarnessError> {
        let steps = std::mem::take(&mut self.steps);
        let mut records = Vec::with_capacity(steps.len());
        for (seq, step) in steps.iter().enumerate() {
            records.push(self.run_step(seq, step)?);
        }
        Ok(RunReport {
            run_id: self.fixture.run_id().to_string(),
            records,
            entries: self.demo.entries().to_vec(),
        })
    }

    fn run_step(&mut self, seq: usize, step: &Step) -> Result<TraceRecord, HarnessError> {
        let _span = info_span!("harness.step", seq, op = step.name()).entered();
        match step {
            Step::Wait { ms } => self.fixture.advance_ms(*ms),
            _ => self.fixture.advance_step(),
        }

        let dispatch = match step {
            Step::Press { item, x, y, button } => {
                let event = PointerEvent::mouse(*button, *x, *y);
                self.press(*item, event)
            }
            Step::TouchStart { item, id, x, y } => {
                let event = pointer_event(Some(*id), *x, *y);
                self.press(*item, event)
            }
            Step::Move { x, y, touch } => {
                self.process(ListInput::PointerMove(pointer_event(*touch, *x, *y)))
            }
            Step::Release { x, y, touch } => {
                self.process(ListInput::PointerUp(pointer_event(*touch, *x, *y)))
            }
            Step::Cancel => self.process(ListInput::PointerCancel),
            Step::Blur => self.process(ListInput::FocusLost),
            Step::Wait { .. } => self.process(ListInput::Tick),
            Step::Remove { item } => self.remove(seq, *item)?,
            Step::TransitionEnd { property } => {
                let index = self.leaving.unwrap_or_default();
                self.process(ListInput::TransitionEnd {
                    index,
                    property: property.clone(),
                })
            }
            Step::Type { text } => {
                self.demo.set_input(text.clone());
                ListDispatch::default()
            }
            Step::Submit => {
                if self.demo.submit() {
                    self.layout.push(self.item_height);
                }
                ListDispatch::default()
            }
        };

        self.apply_signals(seq, &dispatch)?;
        self.drain_unmounts();
        let (transforms, transitions) = self.render().unzip();

        Ok(TraceRecord {
            seq,
            ts: self.fixture.timestamp(),
            run_id: self.fixture.run_id().to_string(),
            at_ms: self.fixture.now_ms(),
            op: step.name(),
            outcome: dispatch.outcome,
            signals: dispatch.signals,
            capture: dispatch.capture,
            dragging: self.list.is_dragging(),
            transforms,
            transitions,
            contents: self.demo.contents(),
            active: self.demo.active_index(),
        })
    }

    fn process(&mut self, input: ListInput) -> ListDispatch {
        self.list.process(&input, &self.layout, self.fixture.now())
    }

    fn press(&mut self, item: usize, event: PointerEvent) -> ListDispatch {
        let index = self.layout_index(item);
        self.process(ListInput::PointerDown { index, event })
    }

    fn remove(&mut self, seq: usize, item: usize) -> Result<ListDispatch, HarnessError> {
        self.demo
            .remove(item)
            .map_err(|source| HarnessError::Model { step: seq, source })?;

        let mounted = self.layout_index(item);
        let height = self.layout.outer_height(mounted);
        let queue = Rc::clone(&self.unmounts);
        let dispatch = self
            .list
            .request_delete(item, height, self.demo.len(), move || {
                queue.borrow_mut().push(mounted);
            });
        if dispatch.any(|s| matches!(s, ListSignal::DeleteStarted { .. })) {
            self.leaving = Some(mounted);
        }
        Ok(dispatch)
    }

    fn apply_signals(&mut self, seq: usize, dispatch: &ListDispatch) -> Result<(), HarnessError> {
        let model_err = |source| HarnessError::Model { step: seq, source };
        for signal in &dispatch.signals {
            match *signal {
                ListSignal::Click { index } => {
                    let index = self.model_index(index);
                    self.demo.click(index).map_err(model_err)?;
                }
                ListSignal::Reorder { from, to } => {
                    debug!(from, to, "applying reorder");
                    let (from, to) = (self.model_index(from), self.model_index(to));
                    self.demo.reorder(from, to).map_err(model_err)?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Unmount rows whose removal callback has run.
    fn drain_unmounts(&mut self) {
        let drained: Vec<usize> = self.unmounts.borrow_mut().drain(..).collect();
        for index in drained {
            self.layout.remove(index);
            self.leaving = match self.leaving {
                Some(leaving) if leaving == index => None,
                Some(leaving) if index < leaving => Some(leaving - 1),
                other => other,
            };
        }
    }

    /// Apply changed directives; returns their CSS transforms and transitions
    /// when they changed.
    fn render(&mut self) -> Option<(Vec<Option<String>>, Vec<Option<String>>)> {
        let next = self
            .list
            .directives_if_changed(&self.rendered, self.layout.len())?;
        self.layout.apply(&next);
        let transforms = next.iter().map(ItemDirective::css_transform).collect();
        let transitions = next.iter().map(ItemDirective::css_transition).collect();
        self.rendered = next;
        Some((transforms, transitions))
    }

    fn layout_index(&self, model_index: usize) -> usize {
        match self.leaving {
            Some(leaving) if model_index >= leaving => model_index + 1,
            _ => model_index,
        }
    }

    fn model_index(&self, layout_index: usize) -> usize {
        match self.leaving {
            Some(leaving) if layout_index > leaving => layout_index - 1,
            _ => layout_index,
        }
    }
}

fn pointer_event(touch: Option<u32>, x: f32, y: f32) -> PointerEvent {
    PointerEvent {
        pointer: touch.map_or(PointerId::Mouse, PointerId::Touch),
        button: PointerButton::Primary,
        position: Point::new(x, y),
    }
}
