//! Per-request values threaded through the pipeline.
//!
//! Every [`Request`](crate::Request) owns a [`RequestContext`]. It is a plain
//! struct member, not a lookup in a loosely-typed bag, so a stage further down
//! the chain can never ask for a value that was not installed.

use std::time::Instant;

/// Request-scoped values installed by the outermost pipeline stage.
#[derive(Clone, Copy, Debug)]
pub struct RequestContext {
    started_at: Instant,
}

impl RequestContext {
    /// Captures the current instant as the request's start time.
    pub fn now() -> Self {
        Self { started_at: Instant::now() }
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Wall-clock time since capture, in whole milliseconds.
    ///
    /// `Instant` is monotonic, so the result is never negative.
    pub fn elapsed_millis(&self) -> u128 {
        self.started_at.elapsed().as_millis()
    }
}
