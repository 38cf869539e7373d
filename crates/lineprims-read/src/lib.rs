//! Growable line reading over any `Read` stream.
//!
//! [`LineReader`] pulls one line at a time into a caller-owned
//! [`LineBuffer`], growing the buffer's capacity to the next power of two
//! whenever a line does not fit. The buffer is created and freed by the
//! caller; the reader only borrows it for the duration of each call. All
//! failures report through the caller's `ErrorSink` exactly once.
//!
//! ```
//! use std::io::Cursor;
//!
//! use lineprims_alloc::SilentSink;
//! use lineprims_read::{LineBuffer, LineRead, LineReader};
//!
//! let mut buffer = LineBuffer::with_capacity(16, &SilentSink).unwrap();
//! let mut reader = LineReader::new(Cursor::new(b"hello\nworld\n".to_vec()));
//!
//! let read = reader.read_line(&mut buffer, &SilentSink).unwrap();
//! assert_eq!(read, LineRead::Line(6));
//! assert_eq!(buffer.as_bytes(), b"hello\n");
//! ```

pub mod buffer;
pub mod error;
pub mod reader;
pub mod round;

pub use buffer::LineBuffer;
pub use error::{ReadError, Result};
pub use reader::{LineRead, LineReader};
pub use round::{round_up_pow2, round_up_pow2_u32, round_up_pow2_u64};
