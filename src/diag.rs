//! Rate-limited diagnostics sink.
//!
//! The codec's correctness never depends on logging, so the sink is an
//! injected trait rather than a hard-wired `tracing` call: tests supply a
//! capturing sink, production wires up [`TracingSink`].

use std::sync::atomic::{AtomicU32, Ordering};

/// The category of condition a [`WarnSink`] is told about. Mirrors the
/// error-kind groupings in §7, but a sink may also be called for conditions
/// that are rejected before an `Error` is constructed (e.g. during an
/// exploratory length check).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarnKind {
    /// A malformed wire record of any kind.
    MalformedAction,
    /// A malformed instruction list.
    MalformedInstruction,
    /// A sub-codec reported a problem.
    SubCodec,
}

/// A one-method sink for rate-limited warnings about malformed input.
///
/// This is advisory only: it is never the channel through which an error is
/// reported to the caller of `decode_v*`, which always happens through the
/// returned `Result`.
pub trait WarnSink: Send + Sync {
    /// Records a warning. Implementations decide whether/how to rate-limit.
    fn warn(&self, kind: WarnKind, detail: &str);
}

/// A sink that forwards to `tracing::warn!`, dropping messages past a
/// per-kind budget within the current window (mirroring the source's
/// `VLOG_WARN_RL`).
#[derive(Debug, Default)]
pub struct TracingSink {
    malformed_action: AtomicU32,
    malformed_instruction: AtomicU32,
    sub_codec: AtomicU32,
}

/// Maximum warnings emitted per kind before this sink falls silent; a fresh
/// `TracingSink` resets the budget, so callers that care about long-running
/// rate limiting should keep one sink alive for the process lifetime.
const RATE_LIMIT: u32 = 20;

impl TracingSink {
    /// Creates a sink with a fresh rate-limit budget.
    pub fn new() -> Self {
        Self::default()
    }

    fn counter(&self, kind: WarnKind) -> &AtomicU32 {
        match kind {
            WarnKind::MalformedAction => &self.malformed_action,
            WarnKind::MalformedInstruction => &self.malformed_instruction,
            WarnKind::SubCodec => &self.sub_codec,
        }
    }
}

impl WarnSink for TracingSink {
    fn warn(&self, kind: WarnKind, detail: &str) {
        let counter = self.counter(kind);
        let prev = counter.fetch_add(1, Ordering::Relaxed);
        if prev >= RATE_LIMIT {
            return;
        }
        tracing::warn!(?kind, %detail, "malformed action/instruction input");
    }
}

/// A sink that discards every warning; useful when a caller has no
/// observability backend wired up, or for throughput-sensitive fuzzing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl WarnSink for NullSink {
    fn warn(&self, _kind: WarnKind, _detail: &str) {}
}

#[cfg(any(test, feature = "test-helpers"))]
pub use capturing::CapturingSink;

#[cfg(any(test, feature = "test-helpers"))]
mod capturing {
    use super::{WarnKind, WarnSink};
    use std::sync::Mutex;

    /// A sink that records every call, for test assertions.
    #[derive(Debug, Default)]
    pub struct CapturingSink {
        calls: Mutex<Vec<(WarnKind, String)>>,
    }

    impl CapturingSink {
        /// Creates an empty capturing sink.
        pub fn new() -> Self {
            Self::default()
        }

        /// Returns a snapshot of everything recorded so far.
        pub fn calls(&self) -> Vec<(WarnKind, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl WarnSink for CapturingSink {
        fn warn(&self, kind: WarnKind, detail: &str) {
            self.calls.lock().unwrap().push((kind, detail.to_string()));
        }
    }
}
