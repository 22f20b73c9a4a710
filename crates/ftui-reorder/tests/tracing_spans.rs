#![cfg(feature = "tracing")]

//! Span capture for `reorder.dispatch` and `reorder.delete`.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use ftui_reorder::logging::{DELETE_SPAN, DISPATCH_SPAN};
use ftui_reorder::{ListConfig, ListController, ListInput, PointerEvent, StackLayout};
use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};
use web_time::Instant;

#[derive(Debug, Default)]
struct SpanState {
    inputs: Vec<String>,
    outcomes: Vec<String>,
    deletes: Vec<u64>,
}

struct SpanCapture {
    state: Arc<Mutex<SpanState>>,
}

#[derive(Default)]
struct FieldVisitor {
    input: Option<String>,
    outcome: Option<String>,
    index: Option<u64>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        if field.name() == "index" {
            self.index = Some(value);
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "input" {
            self.input = Some(value.to_owned());
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        match field.name() {
            "input" => self.input = Some(format!("{value:?}").trim_matches('"').to_owned()),
            "outcome" => self.outcome = Some(format!("{value:?}")),
            _ => {}
        }
    }
}

impl<S> Layer<S> for SpanCapture
where
    S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::Id,
        _ctx: Context<'_, S>,
    ) {
        let name = attrs.metadata().name();
        if name != DISPATCH_SPAN && name != DELETE_SPAN {
            return;
        }
        let mut visitor = FieldVisitor::default();
        attrs.record(&mut visitor);

        let mut state = self.state.lock().expect("trace state lock");
        if name == DISPATCH_SPAN {
            state.inputs.extend(visitor.input);
            state.outcomes.extend(visitor.outcome);
        } else {
            state.deletes.extend(visitor.index);
        }
    }
}

#[test]
fn dispatch_and_delete_spans_carry_fields() {
    let state = Arc::new(Mutex::new(SpanState::default()));
    let subscriber = tracing_subscriber::registry().with(SpanCapture {
        state: Arc::clone(&state),
    });
    let _guard = tracing::subscriber::set_default(subscriber);
    tracing::callsite::rebuild_interest_cache();

    let mut list = ListController::new(ListConfig::default()).expect("valid");
    let layout = StackLayout::uniform(3, 10.0);
    let t0 = Instant::now();
    list.process(
        &ListInput::PointerDown {
            index: 0,
            event: PointerEvent::primary(5.0, 5.0),
        },
        &layout,
        t0,
    );
    list.process(&ListInput::Tick, &layout, t0 + Duration::from_millis(50));
    list.process(
        &ListInput::PointerUp(PointerEvent::primary(5.0, 5.0)),
        &layout,
        t0 + Duration::from_millis(80),
    );
    list.request_delete(1, 10.0, 2, || {});

    tracing::callsite::rebuild_interest_cache();
    let snapshot = state.lock().expect("trace state lock");
    assert_eq!(snapshot.inputs, vec!["pointer_down", "tick", "pointer_up"]);
    assert_eq!(
        snapshot.outcomes,
        vec!["Applied", "Ignored(NothingDue)", "Applied"]
    );
    assert_eq!(snapshot.deletes, vec![1]);
}
