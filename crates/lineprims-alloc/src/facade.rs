//! Fallible allocate/grow/release over owned byte storage.
//!
//! The pointer-or-null convention of a C allocator surfaces here as
//! `Result`: the error value is the null return, and the sink is the side
//! channel that observes the failure. Failures are reported exactly once at
//! the point of detection; retrying or terminating is the sink's business,
//! never this module's.

use crate::error::{AllocError, ErrorKind};
use crate::sink::{ErrorEvent, ErrorSink};

#[track_caller]
fn report_failure<S: ErrorSink + ?Sized>(sink: &S, err: &AllocError) {
    let message = err.to_string();
    sink.report(&ErrorEvent::new(ErrorKind::Alloc, Some(&message)));
}

/// Request zero-initialized storage for `count * elem_size` bytes.
///
/// The returned buffer has length and capacity equal to the product. An
/// overflowing product or a refused allocation reports through `sink` and
/// returns the error; callers treat that as fatal to the operation rather
/// than retrying.
#[track_caller]
pub fn alloc_zeroed<S>(count: usize, elem_size: usize, sink: &S) -> Result<Vec<u8>, AllocError>
where
    S: ErrorSink + ?Sized,
{
    let Some(total) = count.checked_mul(elem_size) else {
        let err = AllocError::Overflow { count, elem_size };
        report_failure(sink, &err);
        return Err(err);
    };
    let mut buf = Vec::new();
    if buf.try_reserve_exact(total).is_err() {
        let err = AllocError::Exhausted { requested: total };
        report_failure(sink, &err);
        return Err(err);
    }
    buf.resize(total, 0);
    Ok(buf)
}

/// Request uninitialized storage of `size` bytes: capacity `size`, length 0.
#[track_caller]
pub fn alloc_raw<S>(size: usize, sink: &S) -> Result<Vec<u8>, AllocError>
where
    S: ErrorSink + ?Sized,
{
    let mut buf = Vec::new();
    if buf.try_reserve_exact(size).is_err() {
        let err = AllocError::Exhausted { requested: size };
        report_failure(sink, &err);
        return Err(err);
    }
    Ok(buf)
}

/// Enlarge `buf` to hold at least `new_capacity` bytes.
///
/// On failure the sink is invoked once and `buf` is left byte-for-byte
/// intact with its previous capacity; a failed grow never loses the
/// caller's data. Requests at or below the current capacity are a no-op.
#[track_caller]
pub fn grow<S>(buf: &mut Vec<u8>, new_capacity: usize, sink: &S) -> Result<(), AllocError>
where
    S: ErrorSink + ?Sized,
{
    if new_capacity <= buf.capacity() {
        return Ok(());
    }
    let additional = new_capacity - buf.len();
    if buf.try_reserve_exact(additional).is_err() {
        let err = AllocError::Exhausted { requested: new_capacity };
        report_failure(sink, &err);
        return Err(err);
    }
    Ok(())
}

/// Release excess capacity down to `max(new_capacity, buf.len())`.
///
/// Shrinking cannot fail and never reports.
pub fn shrink(buf: &mut Vec<u8>, new_capacity: usize) {
    buf.shrink_to(new_capacity);
}

/// Free the storage held by `slot`, leaving the slot empty.
///
/// Idempotent: releasing an already-empty slot is a no-op, never a double
/// free, and does not invoke any sink.
pub fn release(slot: &mut Option<Vec<u8>>) {
    if let Some(buf) = slot.take() {
        drop(buf);
    }
}
