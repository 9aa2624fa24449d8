use std::fmt;
use std::io::{self, Write};

/// Streaming sink that writes pre-rendered log records into an [`io::Write`] target.
///
/// The sink owns its writer. Records are written in one piece and flushed
/// straight away; nothing is held back between calls, which trades
/// throughput for every record being durable before
/// [`write_record`](Self::write_record) returns.
///
/// # Examples
///
/// ```
/// use logging_sink::LogSink;
///
/// let mut sink = LogSink::new(Vec::new());
/// sink.write_record(b"first\n")?;
/// sink.write_record(b"second\n")?;
///
/// let output = std::str::from_utf8(sink.get_ref()).unwrap();
/// assert_eq!(output.lines().count(), 2);
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct LogSink<W> {
    writer: W,
}

impl<W> LogSink<W> {
    /// Creates a sink that owns `writer`.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Borrows the underlying writer.
    #[must_use]
    pub const fn get_ref(&self) -> &W {
        &self.writer
    }

}

impl<W> LogSink<W>
where
    W: Write,
{
    /// Writes one complete record and flushes the writer.
    ///
    /// The record is passed to [`Write::write_all`] as a single buffer so
    /// that append-mode files receive it as one unit. Callers that share a
    /// sink between threads serialise access around this call.
    pub fn write_record(&mut self, record: &[u8]) -> io::Result<()> {
        self.writer.write_all(record)?;
        self.writer.flush()
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl<W> fmt::Debug for LogSink<W>
where
    W: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogSink")
            .field("writer", &self.writer)
            .finish()
    }
}
