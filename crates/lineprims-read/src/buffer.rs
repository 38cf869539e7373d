use lineprims_alloc::{facade, AllocError, ErrorEvent, ErrorKind, ErrorSink};
use tracing::trace;

use crate::round::round_up_pow2;

/// An owned, contiguous byte buffer with a tracked capacity distinct from
/// its content length.
///
/// The tracked capacity is the contract value reported back to callers: it
/// is exactly what was requested or grown to, independent of whatever the
/// allocator rounded the underlying storage up to. Once the reader has
/// grown a buffer the capacity is always a power of two, and it never
/// shrinks. Completed reads leave the content null-terminated; the
/// terminator sits one byte past [`len`](Self::len) and is not part of the
/// content. Content may contain interior null bytes.
#[derive(Debug)]
pub struct LineBuffer {
    bytes: Vec<u8>,
    cap: usize,
}

impl LineBuffer {
    /// Allocate a buffer with exactly `capacity` tracked bytes through the
    /// allocation facade.
    #[track_caller]
    pub fn with_capacity<S>(capacity: usize, sink: &S) -> Result<Self, AllocError>
    where
        S: ErrorSink + ?Sized,
    {
        let mut bytes = facade::alloc_raw(capacity, sink)?;
        if capacity > 0 {
            bytes.push(0);
        }
        Ok(Self { bytes, cap: capacity })
    }

    /// Total tracked bytes available for content plus terminator.
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Content length in bytes, terminator excluded.
    pub fn len(&self) -> usize {
        self.bytes.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The content without its trailing null byte.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len()]
    }

    /// The content including the trailing null byte.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.bytes
    }

    /// Grow the tracked capacity to the smallest power of two that holds
    /// `required` bytes.
    ///
    /// Requests already within capacity are a no-op. On allocation failure
    /// the sink has been invoked once and both contents and capacity are
    /// untouched. Capacity is monotonic: this never shrinks the buffer.
    #[track_caller]
    pub fn ensure_capacity<S>(&mut self, required: usize, sink: &S) -> Result<(), AllocError>
    where
        S: ErrorSink + ?Sized,
    {
        if required <= self.cap {
            return Ok(());
        }
        let new_cap = round_up_pow2(required);
        if new_cap < required {
            // Requests above the top power of two wrap to zero in the
            // rounding cascade and can never be satisfied.
            let err = AllocError::Exhausted { requested: required };
            let message = err.to_string();
            sink.report(&ErrorEvent::new(ErrorKind::Alloc, Some(&message)));
            return Err(err);
        }
        facade::grow(&mut self.bytes, new_cap, sink)?;
        trace!(old_capacity = self.cap, new_capacity = new_cap, "line buffer grown");
        self.cap = new_cap;
        Ok(())
    }

    /// Reset the content to zero length, capacity untouched.
    pub fn clear(&mut self) {
        self.bytes.clear();
        if self.cap > 0 {
            self.bytes.push(0);
        }
    }

    /// Drop any previous content ahead of a fresh line. The buffer is not
    /// terminated again until [`terminate`](Self::terminate) runs.
    pub(crate) fn begin_line(&mut self) {
        self.bytes.clear();
    }

    /// Append one content byte. Capacity for it must already be ensured.
    pub(crate) fn push_byte(&mut self, byte: u8) {
        debug_assert!(self.bytes.len() + 2 <= self.cap);
        self.bytes.push(byte);
    }

    /// Write the trailing null byte after the current content.
    pub(crate) fn terminate(&mut self) {
        self.bytes.push(0);
    }
}
