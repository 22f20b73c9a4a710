#![forbid(unsafe_code)]

//! Structured logging facade.
//!
//! With the `tracing` feature enabled the crate emits spans and events through
//! [`tracing`](https://docs.rs/tracing); without it, no logging code is
//! compiled at all. Install a subscriber in the host to see the output.
//!
//! # Span names
//!
//! | Span | Fields |
//! |------|--------|
//! | [`DISPATCH_SPAN`] | `input`, `outcome`, `signals`, `dragging`, `delete_pending` |
//! | [`DELETE_SPAN`]   | `index`, `height`, `outcome` |

/// Span opened once per [`ListController::process`](crate::controller::ListController::process) call.
pub const DISPATCH_SPAN: &str = "reorder.dispatch";

/// Span opened once per delete request.
pub const DELETE_SPAN: &str = "reorder.delete";

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
