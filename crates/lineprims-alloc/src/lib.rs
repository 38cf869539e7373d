//! Uniform, fallible memory allocation with caller-observed failure reporting.
//!
//! Every failure path funnels through a caller-supplied [`ErrorSink`] instead
//! of being silently ignored or crashing unconditionally. The sink observes;
//! it never alters control flow. Callers pick the policy by picking the sink:
//! [`SilentSink`] for pure return-value control flow, [`StderrSink`] for
//! diagnostics on stderr, [`TraceSink`] to route into `tracing`.

pub mod error;
pub mod facade;
pub mod sink;

pub use error::{AllocError, ErrorKind};
pub use facade::{alloc_raw, alloc_zeroed, grow, release, shrink};
pub use sink::{ErrorEvent, ErrorSink, SilentSink, StderrSink, TraceSink};
