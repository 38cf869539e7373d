//! lineprims-ffi: C-ABI exports for the lineprims allocation facade and
//! line reader.
//!
//! Every entry point crosses the boundary through a panic-catching wrapper
//! and never unwinds into C. Failures are reported through the caller's
//! 4-argument error callback `(code, message, file, line)`; a null callback
//! is the silent sink. The codes are the stable set 0-4 shared with the
//! core crates.

mod alloc;
mod buffer;
mod sink;
mod types;

use std::ffi::CStr;
use std::os::raw::{c_char, c_int};
use std::panic::AssertUnwindSafe;

use lineprims_alloc::ErrorKind;
use lineprims_read::round_up_pow2_u64;

pub use alloc::{lp_calloc, lp_free, lp_malloc, lp_realloc};
#[cfg(unix)]
pub use buffer::lp_stream_from_fd;
pub use buffer::{
    lp_buffer_capacity, lp_buffer_data, lp_buffer_free, lp_buffer_len, lp_buffer_new,
    lp_read_line, lp_stream_free,
};
pub use sink::{lp_onerr_nil, lp_onerr_print};
pub use types::{
    LpBuffer, LpErrorCallback, LpStatus, LpStream, LP_ERR_ALLOC, LP_ERR_FREE,
    LP_ERR_INVALID_ARGUMENT, LP_ERR_INVALID_PATH, LP_OK, LP_READ_EOF, LP_READ_ERR,
};

fn ffi_boundary<T>(on_panic: T, f: impl FnOnce() -> T) -> T {
    match std::panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(_) => on_panic,
    }
}

/// Round a value up to the smallest power of two `>=` the input.
///
/// Inputs above `1 << 63` wrap to 0; the wraparound is the contract, not
/// saturation.
#[no_mangle]
pub extern "C" fn lp_round_up_pow2(value: u64) -> u64 {
    round_up_pow2_u64(value)
}

/// The fixed description for a status code, as a static NUL-terminated
/// string. Unknown codes map to `"unknown error"`.
#[no_mangle]
pub extern "C" fn lp_status_description(code: c_int) -> *const c_char {
    let text: &'static CStr = match ErrorKind::from_code(code) {
        Some(ErrorKind::None) => c"no error",
        Some(ErrorKind::Alloc) => c"could not allocate memory",
        Some(ErrorKind::Dealloc) => c"could not free memory",
        Some(ErrorKind::InvalidArgument) => {
            c"null pointer passed to function expecting valid memory address"
        }
        Some(ErrorKind::InvalidPath) => {
            c"bad path passed to function expecting valid filesystem path"
        }
        None => c"unknown error",
    };
    text.as_ptr()
}

#[cfg(test)]
pub(crate) mod testutil {
    use std::cell::{Cell, RefCell};
    use std::ffi::CStr;
    use std::os::raw::{c_char, c_int};

    thread_local! {
        static LAST_CODE: Cell<c_int> = const { Cell::new(-1) };
        static CALLS: Cell<u32> = const { Cell::new(0) };
        static LAST_MESSAGE: RefCell<String> = const { RefCell::new(String::new()) };
        static LAST_FILE: RefCell<String> = const { RefCell::new(String::new()) };
    }

    pub fn reset() {
        LAST_CODE.with(|c| c.set(-1));
        CALLS.with(|c| c.set(0));
        LAST_MESSAGE.with(|m| m.borrow_mut().clear());
        LAST_FILE.with(|f| f.borrow_mut().clear());
    }

    pub fn last_code() -> c_int {
        LAST_CODE.with(Cell::get)
    }

    pub fn calls() -> u32 {
        CALLS.with(Cell::get)
    }

    pub fn last_message() -> String {
        LAST_MESSAGE.with(|m| m.borrow().clone())
    }

    pub fn last_file() -> String {
        LAST_FILE.with(|f| f.borrow().clone())
    }

    pub unsafe extern "C" fn recording_callback(
        code: c_int,
        msg: *const c_char,
        file: *const c_char,
        _line: c_int,
    ) {
        LAST_CODE.with(|c| c.set(code));
        CALLS.with(|c| c.set(c.get() + 1));
        if !msg.is_null() {
            // SAFETY: the library always passes NUL-terminated messages.
            let msg = unsafe { CStr::from_ptr(msg) }.to_string_lossy().into_owned();
            LAST_MESSAGE.with(|m| *m.borrow_mut() = msg);
        }
        if !file.is_null() {
            // SAFETY: the library always passes NUL-terminated file names.
            let file = unsafe { CStr::from_ptr(file) }.to_string_lossy().into_owned();
            LAST_FILE.with(|f| *f.borrow_mut() = file);
        }
    }
}
