use std::io::{ErrorKind as IoErrorKind, Read};

use lineprims_alloc::{ErrorEvent, ErrorKind, ErrorSink};

use crate::buffer::LineBuffer;
use crate::error::{ReadError, Result};

/// The outcome of a successful `read_line` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRead {
    /// A line was read; the count includes the line feed when one was
    /// consumed. The buffer holds the line, null-terminated.
    Line(usize),
    /// The stream was already at end-of-stream; the buffer holds a
    /// zero-length, null-terminated content.
    Eof,
}

/// Reads lines from any `Read` stream into a caller-owned [`LineBuffer`].
///
/// Bytes are consumed one at a time so the stream position after a call is
/// always exactly one line past where it started; nothing is read ahead and
/// lost. The buffer grows through the allocation facade as needed and is
/// never freed by the reader.
pub struct LineReader<T> {
    inner: T,
}

impl<T: Read> LineReader<T> {
    /// Create a line reader over a stream.
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Read one line (terminated by a line feed, or by end-of-stream) into
    /// `buffer`, growing it when the line does not fit.
    ///
    /// Preconditions are checked before any I/O: the buffer must have
    /// positive capacity. A violation reports `InvalidArgument` through the
    /// sink and returns the error with the stream and buffer untouched.
    ///
    /// Returns the line's byte count (line feed included when present),
    /// [`LineRead::Eof`] when zero bytes were available, or the error arm
    /// when a precondition or allocation failed. In every completed case
    /// the buffer content is null-terminated; at end-of-stream the content
    /// length is zero with the terminator at offset 0. A stream that ends
    /// mid-line yields the partial line as a normal read.
    ///
    /// Growth is monotonic within and across calls; callers observe the
    /// updated capacity through [`LineBuffer::capacity`] and must not rely
    /// on a stale copy.
    pub fn read_line<S>(&mut self, buffer: &mut LineBuffer, sink: &S) -> Result<LineRead>
    where
        S: ErrorSink + ?Sized,
    {
        if buffer.capacity() == 0 {
            let message = "line buffer has no capacity";
            sink.report(&ErrorEvent::new(ErrorKind::InvalidArgument, Some(message)));
            return Err(ReadError::InvalidArgument(message));
        }

        buffer.begin_line();
        let mut len = 0usize;
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => break,
                Ok(_) => {
                    if let Err(err) = buffer.ensure_capacity(len + 2, sink) {
                        buffer.terminate();
                        return Err(err.into());
                    }
                    buffer.push_byte(byte[0]);
                    len += 1;
                    if byte[0] == b'\n' {
                        break;
                    }
                }
                Err(err) if err.kind() == IoErrorKind::Interrupted => continue,
                Err(err) => {
                    buffer.terminate();
                    return Err(ReadError::Io(err));
                }
            }
        }
        buffer.terminate();

        if len == 0 {
            Ok(LineRead::Eof)
        } else {
            Ok(LineRead::Line(len))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io::Cursor;

    use lineprims_alloc::SilentSink;

    use super::*;

    struct RecordingSink {
        codes: RefCell<Vec<i32>>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self { codes: RefCell::new(Vec::new()) }
        }
    }

    impl ErrorSink for RecordingSink {
        fn report(&self, event: &ErrorEvent<'_>) {
            self.codes.borrow_mut().push(event.kind.code());
        }
    }

    fn buffer(capacity: usize) -> LineBuffer {
        LineBuffer::with_capacity(capacity, &SilentSink).unwrap()
    }

    #[test]
    fn reads_consecutive_lines() {
        let mut reader = LineReader::new(Cursor::new(b"one\ntwo\nthree\n".to_vec()));
        let mut buf = buffer(16);

        assert_eq!(reader.read_line(&mut buf, &SilentSink).unwrap(), LineRead::Line(4));
        assert_eq!(buf.as_bytes(), b"one\n");

        assert_eq!(reader.read_line(&mut buf, &SilentSink).unwrap(), LineRead::Line(4));
        assert_eq!(buf.as_bytes(), b"two\n");

        assert_eq!(reader.read_line(&mut buf, &SilentSink).unwrap(), LineRead::Line(6));
        assert_eq!(buf.as_bytes(), b"three\n");

        assert_eq!(reader.read_line(&mut buf, &SilentSink).unwrap(), LineRead::Eof);
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.as_bytes_with_nul(), &[0]);
    }

    #[test]
    fn eof_is_sticky() {
        let mut reader = LineReader::new(Cursor::new(Vec::<u8>::new()));
        let mut buf = buffer(8);

        assert_eq!(reader.read_line(&mut buf, &SilentSink).unwrap(), LineRead::Eof);
        assert_eq!(reader.read_line(&mut buf, &SilentSink).unwrap(), LineRead::Eof);
        assert_eq!(buf.as_bytes_with_nul(), &[0]);
    }

    #[test]
    fn stream_ending_mid_line_yields_the_partial_line() {
        let mut reader = LineReader::new(Cursor::new(b"no newline".to_vec()));
        let mut buf = buffer(16);

        assert_eq!(reader.read_line(&mut buf, &SilentSink).unwrap(), LineRead::Line(10));
        assert_eq!(buf.as_bytes(), b"no newline");
        assert_eq!(buf.as_bytes_with_nul().last(), Some(&0));

        assert_eq!(reader.read_line(&mut buf, &SilentSink).unwrap(), LineRead::Eof);
    }

    #[test]
    fn grows_to_the_next_power_of_two() {
        let line = b"abcdefghijklmnopqrstuvwxyz0123456789\n"; // 37 bytes
        let mut reader = LineReader::new(Cursor::new(line.to_vec()));
        let mut buf = buffer(4);

        assert_eq!(
            reader.read_line(&mut buf, &SilentSink).unwrap(),
            LineRead::Line(line.len())
        );
        assert_eq!(buf.as_bytes(), line);
        // 37 content bytes plus the terminator round up to 64.
        assert_eq!(buf.capacity(), 64);
    }

    #[test]
    fn capacity_never_shrinks_across_calls() {
        let mut reader =
            LineReader::new(Cursor::new(b"a long line that needs growth\nok\n".to_vec()));
        let mut buf = buffer(4);

        reader.read_line(&mut buf, &SilentSink).unwrap();
        let grown = buf.capacity();
        assert!(grown >= 31);

        reader.read_line(&mut buf, &SilentSink).unwrap();
        assert_eq!(buf.as_bytes(), b"ok\n");
        assert_eq!(buf.capacity(), grown);
    }

    #[test]
    fn zero_capacity_buffer_is_rejected_before_io() {
        struct CountingReader {
            calls: usize,
        }

        impl Read for CountingReader {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                self.calls += 1;
                Ok(0)
            }
        }

        let sink = RecordingSink::new();
        let mut reader = LineReader::new(CountingReader { calls: 0 });
        let mut buf = buffer(0);

        let err = reader.read_line(&mut buf, &sink).unwrap_err();
        assert!(matches!(err, ReadError::InvalidArgument(_)));
        assert_eq!(err.kind(), Some(ErrorKind::InvalidArgument));
        assert_eq!(sink.codes.borrow().as_slice(), &[3]);
        assert_eq!(reader.get_ref().calls, 0);
    }

    #[test]
    fn interior_null_bytes_are_content() {
        let mut reader = LineReader::new(Cursor::new(b"a\0b\n".to_vec()));
        let mut buf = buffer(8);

        assert_eq!(reader.read_line(&mut buf, &SilentSink).unwrap(), LineRead::Line(4));
        assert_eq!(buf.as_bytes(), b"a\0b\n");
        assert_eq!(buf.as_bytes_with_nul(), b"a\0b\n\0");
    }

    #[test]
    fn interrupted_read_retries() {
        struct InterruptedThenData {
            state: u8,
            bytes: Vec<u8>,
            pos: usize,
        }

        impl Read for InterruptedThenData {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                if self.state == 0 {
                    self.state = 1;
                    return Err(std::io::Error::from(IoErrorKind::Interrupted));
                }
                if self.pos >= self.bytes.len() {
                    return Ok(0);
                }
                buf[0] = self.bytes[self.pos];
                self.pos += 1;
                Ok(1)
            }
        }

        let stream = InterruptedThenData {
            state: 0,
            bytes: b"ok\n".to_vec(),
            pos: 0,
        };
        let mut reader = LineReader::new(stream);
        let mut buf = buffer(8);

        assert_eq!(reader.read_line(&mut buf, &SilentSink).unwrap(), LineRead::Line(3));
        assert_eq!(buf.as_bytes(), b"ok\n");
    }

    #[test]
    fn io_errors_propagate_without_sink_reports() {
        struct FailingReader;

        impl Read for FailingReader {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::from(IoErrorKind::BrokenPipe))
            }
        }

        let sink = RecordingSink::new();
        let mut reader = LineReader::new(FailingReader);
        let mut buf = buffer(8);

        let err = reader.read_line(&mut buf, &sink).unwrap_err();
        assert!(matches!(err, ReadError::Io(_)));
        assert_eq!(err.kind(), None);
        assert!(sink.codes.borrow().is_empty());
        // The buffer is still terminated after the failed call.
        assert_eq!(buf.as_bytes_with_nul(), &[0]);
    }

    #[test]
    fn accessors_and_into_inner() {
        let cursor = Cursor::new(Vec::<u8>::new());
        let mut reader = LineReader::new(cursor);

        let _ = reader.get_ref();
        let _ = reader.get_mut();
        let _inner = reader.into_inner();
    }
}
