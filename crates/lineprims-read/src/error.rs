use lineprims_alloc::{AllocError, ErrorKind};

/// Errors that can occur while reading a line. This is the hard-error arm
/// of a read: when it is returned, no line was produced.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// A precondition was violated; the stream and buffer were not touched.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Growing the buffer failed. The sink has already been invoked and the
    /// buffer's prior contents and capacity are unchanged.
    #[error(transparent)]
    Alloc(#[from] AllocError),

    /// The underlying stream failed. I/O errors are outside the stable
    /// error-code set and are never routed through the sink.
    #[error("stream I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReadError {
    /// The stable error kind reported to the sink, if this failure is part
    /// of the reported taxonomy.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ReadError::InvalidArgument(_) => Some(ErrorKind::InvalidArgument),
            ReadError::Alloc(_) => Some(ErrorKind::Alloc),
            ReadError::Io(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReadError>;
