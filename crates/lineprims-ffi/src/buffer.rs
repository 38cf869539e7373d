use std::os::raw::c_char;

use lineprims_alloc::{ErrorEvent, ErrorKind, ErrorSink};
use lineprims_read::{LineBuffer, LineRead, LineReader};

use crate::sink::CallbackSink;
use crate::types::{LpBuffer, LpErrorCallback, LpStream, LP_READ_EOF, LP_READ_ERR};

/// Create a line buffer with `capacity` bytes of storage.
///
/// Zero capacity reports code 3; a refused allocation reports code 1. Both
/// return null.
///
/// # Safety
/// `onerr`, when non-null, must be callable with the documented signature.
#[no_mangle]
pub unsafe extern "C" fn lp_buffer_new(capacity: usize, onerr: LpErrorCallback) -> *mut LpBuffer {
    crate::ffi_boundary(std::ptr::null_mut(), || {
        let sink = CallbackSink::new(onerr);
        if capacity == 0 {
            sink.report(&ErrorEvent::new(
                ErrorKind::InvalidArgument,
                Some("buffer capacity must be positive"),
            ));
            return std::ptr::null_mut();
        }
        match LineBuffer::with_capacity(capacity, &sink) {
            Ok(inner) => Box::into_raw(Box::new(LpBuffer { inner })),
            // The callback has already seen the allocation failure.
            Err(_) => std::ptr::null_mut(),
        }
    })
}

/// Free `*slot` if non-null, then null the slot. Idempotent.
///
/// # Safety
/// `slot`, when non-null, must point to a handle slot holding null or a
/// handle obtained from `lp_buffer_new`.
#[no_mangle]
pub unsafe extern "C" fn lp_buffer_free(slot: *mut *mut LpBuffer) {
    crate::ffi_boundary((), || {
        if slot.is_null() {
            return;
        }
        // SAFETY: non-null `slot` points to a valid handle slot.
        let ptr = unsafe { *slot };
        if ptr.is_null() {
            return;
        }
        // SAFETY: the handle originated from `lp_buffer_new`.
        unsafe {
            drop(Box::from_raw(ptr));
            *slot = std::ptr::null_mut();
        }
    })
}

/// The buffer's null-terminated content.
///
/// The pointer stays valid until the next call that mutates or frees the
/// buffer. Returns null for a null handle.
///
/// # Safety
/// `buffer` must be null or a handle obtained from `lp_buffer_new`.
#[no_mangle]
pub unsafe extern "C" fn lp_buffer_data(buffer: *const LpBuffer) -> *const c_char {
    crate::ffi_boundary(std::ptr::null(), || {
        if buffer.is_null() {
            return std::ptr::null();
        }
        // SAFETY: non-null handle originated from `lp_buffer_new`.
        unsafe { (*buffer).inner.as_bytes_with_nul().as_ptr() as *const c_char }
    })
}

/// Content length in bytes, terminator excluded. 0 for a null handle.
///
/// # Safety
/// `buffer` must be null or a handle obtained from `lp_buffer_new`.
#[no_mangle]
pub unsafe extern "C" fn lp_buffer_len(buffer: *const LpBuffer) -> usize {
    crate::ffi_boundary(0, || {
        if buffer.is_null() {
            return 0;
        }
        // SAFETY: non-null handle originated from `lp_buffer_new`.
        unsafe { (*buffer).inner.len() }
    })
}

/// The buffer's tracked capacity in bytes. 0 for a null handle.
///
/// # Safety
/// `buffer` must be null or a handle obtained from `lp_buffer_new`.
#[no_mangle]
pub unsafe extern "C" fn lp_buffer_capacity(buffer: *const LpBuffer) -> usize {
    crate::ffi_boundary(0, || {
        if buffer.is_null() {
            return 0;
        }
        // SAFETY: non-null handle originated from `lp_buffer_new`.
        unsafe { (*buffer).inner.capacity() }
    })
}

/// Wrap an owned file descriptor as a readable stream handle.
///
/// Ownership of the descriptor transfers to the handle; `lp_stream_free`
/// closes it. A negative descriptor returns null.
///
/// # Safety
/// `fd`, when non-negative, must be an open, readable descriptor not owned
/// elsewhere.
#[cfg(unix)]
#[no_mangle]
pub unsafe extern "C" fn lp_stream_from_fd(fd: std::os::raw::c_int) -> *mut LpStream {
    crate::ffi_boundary(std::ptr::null_mut(), || {
        if fd < 0 {
            return std::ptr::null_mut();
        }
        // SAFETY: the caller transfers ownership of an open descriptor.
        let inner = unsafe { <std::fs::File as std::os::fd::FromRawFd>::from_raw_fd(fd) };
        Box::into_raw(Box::new(LpStream { inner }))
    })
}

/// Close the stream and null the slot. Idempotent.
///
/// # Safety
/// `slot`, when non-null, must point to a handle slot holding null or a
/// handle obtained from `lp_stream_from_fd`.
#[no_mangle]
pub unsafe extern "C" fn lp_stream_free(slot: *mut *mut LpStream) {
    crate::ffi_boundary((), || {
        if slot.is_null() {
            return;
        }
        // SAFETY: non-null `slot` points to a valid handle slot.
        let ptr = unsafe { *slot };
        if ptr.is_null() {
            return;
        }
        // SAFETY: the handle originated from `lp_stream_from_fd`.
        unsafe {
            drop(Box::from_raw(ptr));
            *slot = std::ptr::null_mut();
        }
    })
}

/// Read one line from `stream` into `buffer`, growing the buffer when the
/// line does not fit.
///
/// Returns the line's byte count (line feed included when present),
/// `LP_READ_EOF` when zero bytes were available, or `LP_READ_ERR` when a
/// precondition or allocation failed. A null `buffer` or `stream` reports
/// code 3 through the callback and returns `LP_READ_ERR` before any I/O.
/// Stream read failures return `LP_READ_ERR` without a callback; they are
/// outside the stable code set.
///
/// # Safety
/// Non-null handles must have been obtained from `lp_buffer_new` and
/// `lp_stream_from_fd`; `onerr`, when non-null, must be callable with the
/// documented signature.
#[no_mangle]
pub unsafe extern "C" fn lp_read_line(
    buffer: *mut LpBuffer,
    stream: *mut LpStream,
    onerr: LpErrorCallback,
) -> isize {
    crate::ffi_boundary(LP_READ_ERR, || {
        let sink = CallbackSink::new(onerr);
        if buffer.is_null() {
            sink.report(&ErrorEvent::new(
                ErrorKind::InvalidArgument,
                Some("buffer handle cannot be null"),
            ));
            return LP_READ_ERR;
        }
        if stream.is_null() {
            sink.report(&ErrorEvent::new(
                ErrorKind::InvalidArgument,
                Some("stream handle cannot be null"),
            ));
            return LP_READ_ERR;
        }
        // SAFETY: both handles are non-null and valid per contract.
        let (buffer, stream) = unsafe { (&mut *buffer, &mut *stream) };
        let mut reader = LineReader::new(&mut stream.inner);
        match reader.read_line(&mut buffer.inner, &sink) {
            Ok(LineRead::Line(len)) => len as isize,
            Ok(LineRead::Eof) => LP_READ_EOF,
            // Taxonomy failures already reached the callback; stream I/O
            // failures surface through the sentinel alone.
            Err(_) => LP_READ_ERR,
        }
    })
}
