use std::panic::Location;

use crate::error::ErrorKind;

/// A single detected failure, as delivered to an [`ErrorSink`].
#[derive(Debug, Clone, Copy)]
pub struct ErrorEvent<'a> {
    /// What failed.
    pub kind: ErrorKind,
    /// Optional free-form detail beyond the kind's fixed description.
    pub message: Option<&'a str>,
    /// The call site that detected the failure.
    pub location: &'static Location<'static>,
}

impl<'a> ErrorEvent<'a> {
    /// Build an event attributed to the caller's source location.
    #[track_caller]
    pub fn new(kind: ErrorKind, message: Option<&'a str>) -> Self {
        Self {
            kind,
            message,
            location: Location::caller(),
        }
    }
}

/// Caller-installed handler invoked synchronously on every detected failure.
///
/// A sink observes; it has no return value and cannot veto the failure.
/// Sinks are passed by reference on every call and never stored, so they
/// need no lifecycle management. A sink must not re-enter the operation
/// that invoked it.
pub trait ErrorSink {
    fn report(&self, event: &ErrorEvent<'_>);
}

impl<F: Fn(&ErrorEvent<'_>)> ErrorSink for F {
    fn report(&self, event: &ErrorEvent<'_>) {
        self(event)
    }
}

/// Sink that swallows every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl ErrorSink for SilentSink {
    fn report(&self, _event: &ErrorEvent<'_>) {}
}

/// Sink that prints every event to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl ErrorSink for StderrSink {
    fn report(&self, event: &ErrorEvent<'_>) {
        let location = event.location;
        match event.message {
            Some(message) => eprintln!(
                "[{}: {}] {}: {} -- {}",
                location.file(),
                location.line(),
                event.kind.code(),
                event.kind.description(),
                message,
            ),
            None => eprintln!(
                "[{}: {}] {}: {}",
                location.file(),
                location.line(),
                event.kind.code(),
                event.kind.description(),
            ),
        }
    }
}

/// Sink that forwards every event to `tracing::error!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceSink;

impl ErrorSink for TraceSink {
    fn report(&self, event: &ErrorEvent<'_>) {
        tracing::error!(
            code = event.kind.code(),
            message = event.message,
            location = %event.location,
            "{}",
            event.kind.description(),
        );
    }
}
