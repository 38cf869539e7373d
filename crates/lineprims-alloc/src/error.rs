/// Failure kinds with stable numeric codes, shared with the C-ABI surface.
///
/// The codes are part of the compatibility contract and must not be
/// renumbered.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No error.
    None = 0,
    /// An allocation request was refused.
    Alloc = 1,
    /// A deallocation failed. Reporting-only and non-fatal; no path in this
    /// library can currently emit it.
    Dealloc = 2,
    /// A null or otherwise unusable argument reached a checked boundary.
    InvalidArgument = 3,
    /// Reserved for path-consuming operations outside this core. Unused.
    InvalidPath = 4,
}

impl ErrorKind {
    /// The stable numeric code for this kind.
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Look up a kind by its stable code.
    pub const fn from_code(code: i32) -> Option<ErrorKind> {
        match code {
            0 => Some(ErrorKind::None),
            1 => Some(ErrorKind::Alloc),
            2 => Some(ErrorKind::Dealloc),
            3 => Some(ErrorKind::InvalidArgument),
            4 => Some(ErrorKind::InvalidPath),
            _ => None,
        }
    }

    /// Fixed human-readable description for this kind.
    pub const fn description(self) -> &'static str {
        match self {
            ErrorKind::None => "no error",
            ErrorKind::Alloc => "could not allocate memory",
            ErrorKind::Dealloc => "could not free memory",
            ErrorKind::InvalidArgument => {
                "null pointer passed to function expecting valid memory address"
            }
            ErrorKind::InvalidPath => {
                "bad path passed to function expecting valid filesystem path"
            }
        }
    }
}

/// Errors produced by the allocation facade.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocError {
    /// The allocator refused the request.
    #[error("could not allocate memory ({requested} bytes requested)")]
    Exhausted { requested: usize },

    /// The requested element count and size overflow `usize`.
    #[error("allocation size overflows usize ({count} x {elem_size})")]
    Overflow { count: usize, elem_size: usize },
}

impl AllocError {
    /// The stable error kind this failure reports as.
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::Alloc
    }
}
