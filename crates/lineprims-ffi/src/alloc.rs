use std::os::raw::c_void;

use lineprims_alloc::{ErrorEvent, ErrorKind, ErrorSink};

use crate::sink::CallbackSink;
use crate::types::LpErrorCallback;

/// Allocate zero-initialized storage for `count * size` bytes through the
/// system allocator.
///
/// On failure the callback is invoked once with code 1 and null is
/// returned; the caller treats null as fatal to the operation rather than
/// retrying.
///
/// # Safety
/// `onerr`, when non-null, must be callable with the documented signature.
#[no_mangle]
pub unsafe extern "C" fn lp_calloc(
    count: usize,
    size: usize,
    onerr: LpErrorCallback,
) -> *mut c_void {
    crate::ffi_boundary(std::ptr::null_mut(), || {
        // SAFETY: calloc validates the count * size product itself.
        let ptr = unsafe { libc::calloc(count, size) };
        if ptr.is_null() && count != 0 && size != 0 {
            CallbackSink::new(onerr).report(&ErrorEvent::new(ErrorKind::Alloc, None));
        }
        ptr
    })
}

/// Allocate uninitialized storage of `size` bytes through the system
/// allocator. Same failure contract as [`lp_calloc`].
///
/// # Safety
/// `onerr`, when non-null, must be callable with the documented signature.
#[no_mangle]
pub unsafe extern "C" fn lp_malloc(size: usize, onerr: LpErrorCallback) -> *mut c_void {
    crate::ffi_boundary(std::ptr::null_mut(), || {
        // SAFETY: malloc accepts any size, including 0.
        let ptr = unsafe { libc::malloc(size) };
        if ptr.is_null() && size != 0 {
            CallbackSink::new(onerr).report(&ErrorEvent::new(ErrorKind::Alloc, None));
        }
        ptr
    })
}

/// Resize a region previously allocated by this facade.
///
/// On failure the callback is invoked once with code 1 and null is
/// returned; `ptr` is left valid and untouched, so a failed grow never
/// loses the caller's data.
///
/// # Safety
/// `ptr` must be null or a pointer obtained from this facade's allocators;
/// `onerr`, when non-null, must be callable with the documented signature.
#[no_mangle]
pub unsafe extern "C" fn lp_realloc(
    ptr: *mut c_void,
    size: usize,
    onerr: LpErrorCallback,
) -> *mut c_void {
    crate::ffi_boundary(std::ptr::null_mut(), || {
        // SAFETY: `ptr` originates from this facade per contract.
        let new_ptr = unsafe { libc::realloc(ptr, size) };
        if new_ptr.is_null() && size != 0 {
            CallbackSink::new(onerr).report(&ErrorEvent::new(ErrorKind::Alloc, None));
        }
        new_ptr
    })
}

/// Free `*slot` if non-null, then null the slot.
///
/// Idempotent: a null `slot` or an already-null pointee is a no-op, never
/// a double free, and never invokes the callback.
///
/// # Safety
/// `slot`, when non-null, must point to a pointer slot holding null or a
/// pointer obtained from this facade's allocators.
#[no_mangle]
pub unsafe extern "C" fn lp_free(slot: *mut *mut c_void, _onerr: LpErrorCallback) {
    crate::ffi_boundary((), || {
        if slot.is_null() {
            return;
        }
        // SAFETY: non-null `slot` points to a valid pointer slot.
        let ptr = unsafe { *slot };
        if ptr.is_null() {
            return;
        }
        // SAFETY: the pointee originated from this facade's allocators.
        unsafe {
            libc::free(ptr);
            *slot = std::ptr::null_mut();
        }
    })
}
