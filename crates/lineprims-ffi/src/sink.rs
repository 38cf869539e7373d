use std::borrow::Cow;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};

use lineprims_alloc::{ErrorEvent, ErrorKind, ErrorSink};

use crate::types::LpErrorCallback;

/// Adapts a C error callback to the core `ErrorSink` seam, so every FFI
/// entry point reports failures through the same path as the Rust API.
pub(crate) struct CallbackSink {
    callback: LpErrorCallback,
}

impl CallbackSink {
    pub(crate) fn new(callback: LpErrorCallback) -> Self {
        Self { callback }
    }
}

impl ErrorSink for CallbackSink {
    fn report(&self, event: &ErrorEvent<'_>) {
        let Some(callback) = self.callback else {
            return;
        };
        let message = event
            .message
            .and_then(|m| CString::new(m.replace('\0', "?")).ok());
        let file = CString::new(event.location.file().replace('\0', "?")).unwrap_or_default();
        let message_ptr = message
            .as_ref()
            .map_or(std::ptr::null(), |m| m.as_ptr());
        // SAFETY: The caller supplied the callback; the strings outlive the
        // call and are NUL-terminated.
        unsafe {
            callback(
                event.kind.code(),
                message_ptr,
                file.as_ptr(),
                event.location.line() as c_int,
            );
        }
    }
}

/// No-op error callback, the C rendition of `SilentSink`.
#[no_mangle]
pub extern "C" fn lp_onerr_nil(
    _code: c_int,
    _msg: *const c_char,
    _file: *const c_char,
    _line: c_int,
) {
}

/// Stderr-printing error callback, the C rendition of `StderrSink`.
///
/// # Safety
/// `msg` and `file` must each be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn lp_onerr_print(
    code: c_int,
    msg: *const c_char,
    file: *const c_char,
    line: c_int,
) {
    let description = ErrorKind::from_code(code)
        .map(ErrorKind::description)
        .unwrap_or("unknown error");
    let file = if file.is_null() {
        Cow::Borrowed("<unknown>")
    } else {
        // SAFETY: non-null `file` is NUL-terminated per contract.
        unsafe { CStr::from_ptr(file) }.to_string_lossy()
    };
    if msg.is_null() {
        eprintln!("[{file}: {line}] {code}: {description}");
    } else {
        // SAFETY: non-null `msg` is NUL-terminated per contract.
        let msg = unsafe { CStr::from_ptr(msg) }.to_string_lossy();
        eprintln!("[{file}: {line}] {code}: {description} -- {msg}");
    }
}
