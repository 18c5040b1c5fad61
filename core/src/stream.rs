//! Byte sources and sinks with non-blocking availability semantics.
//!
//! The resumable readers and writers of this project never block:
//! when a [`ByteSource`] has no more bytes available right now,
//! or a [`ByteSink`] has no more room,
//! the operation returns [`Progress::Suspended`]
//! and can be resumed later by calling it again.
use std::collections::VecDeque;
use std::io::{self, Read, Seek, SeekFrom, Write};

/// The outcome of a resumable operation which did not fail.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Progress {
    /// The operation is complete.
    Done,
    /// The operation could not complete with the bytes (or room)
    /// currently available, and must be called again
    /// once the source has been refilled or the sink drained.
    Suspended,
}

impl Progress {
    /// Whether the operation is complete.
    #[inline]
    pub fn is_done(self) -> bool {
        self == Progress::Done
    }
}

/// A source of bytes which may deliver its content gradually.
pub trait ByteSource {
    /// The number of bytes which can be consumed right now.
    fn available(&mut self) -> io::Result<usize>;

    /// Whether the source will never deliver more bytes
    /// than the ones currently available.
    fn is_finished(&self) -> bool;

    /// Copy up to `buf.len()` bytes into `buf` without consuming them,
    /// returning the number of bytes copied.
    fn peek(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Consume up to `buf.len()` of the available bytes into `buf`,
    /// returning the number of bytes consumed.
    fn read_some(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Discard up to `n` of the available bytes,
    /// returning the number of bytes discarded.
    fn skip(&mut self, n: u64) -> io::Result<u64>;

    /// The number of bytes consumed from the start of the source.
    fn position(&self) -> u64;

    /// Whether the source supports moving to an arbitrary position.
    fn is_seekable(&self) -> bool {
        false
    }

    /// Move to the given absolute position.
    fn seek_to(&mut self, _position: u64) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "byte source does not support random access",
        ))
    }

    /// Whether the source is exhausted:
    /// it is finished and has no bytes left.
    fn at_end(&mut self) -> io::Result<bool> {
        Ok(self.is_finished() && self.available()? == 0)
    }
}

impl<S: ?Sized + ByteSource> ByteSource for &mut S {
    fn available(&mut self) -> io::Result<usize> {
        (**self).available()
    }
    fn is_finished(&self) -> bool {
        (**self).is_finished()
    }
    fn peek(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).peek(buf)
    }
    fn read_some(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read_some(buf)
    }
    fn skip(&mut self, n: u64) -> io::Result<u64> {
        (**self).skip(n)
    }
    fn position(&self) -> u64 {
        (**self).position()
    }
    fn is_seekable(&self) -> bool {
        (**self).is_seekable()
    }
    fn seek_to(&mut self, position: u64) -> io::Result<()> {
        (**self).seek_to(position)
    }
}

/// An in-memory byte source which can be fed more data over time,
/// such as the receiving end of a network transport.
///
/// The source is not seekable.
/// It becomes finished once [`finish`](BufferSource::finish) is called.
#[derive(Debug, Default, Clone)]
pub struct BufferSource {
    buffer: VecDeque<u8>,
    position: u64,
    finished: bool,
}

impl BufferSource {
    /// Create an empty source, expecting data to be fed later.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a finished source with the given content.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        BufferSource {
            buffer: VecDeque::from(bytes.into()),
            position: 0,
            finished: true,
        }
    }

    /// Append more bytes to the source.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.buffer.extend(bytes);
    }

    /// Declare that no more bytes will be fed.
    pub fn finish(&mut self) {
        self.finished = true;
    }
}

impl ByteSource for BufferSource {
    fn available(&mut self) -> io::Result<usize> {
        Ok(self.buffer.len())
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn peek(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.buffer.len());
        for (dst, src) in buf.iter_mut().zip(self.buffer.iter()) {
            *dst = *src;
        }
        Ok(n)
    }

    fn read_some(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.buffer.len());
        for (dst, src) in buf.iter_mut().zip(self.buffer.drain(..n)) {
            *dst = src;
        }
        self.position += n as u64;
        Ok(n)
    }

    fn skip(&mut self, n: u64) -> io::Result<u64> {
        let n = (n.min(self.buffer.len() as u64)) as usize;
        self.buffer.drain(..n);
        self.position += n as u64;
        Ok(n as u64)
    }

    fn position(&self) -> u64 {
        self.position
    }
}

/// A byte source over a complete, seekable reader such as a file.
///
/// All remaining bytes of the reader are considered available,
/// so reading from this source never suspends.
#[derive(Debug)]
pub struct ReadSource<R> {
    inner: R,
    position: u64,
    len: u64,
}

impl<R> ReadSource<R>
where
    R: Read + Seek,
{
    /// Create a source from the reader's current position
    /// to the end of its content.
    pub fn new(mut inner: R) -> io::Result<Self> {
        let position = inner.stream_position()?;
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(position))?;
        Ok(ReadSource {
            inner,
            position,
            len,
        })
    }

    /// Recover the inner reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R> ByteSource for ReadSource<R>
where
    R: Read + Seek,
{
    fn available(&mut self) -> io::Result<usize> {
        Ok(self.len.saturating_sub(self.position).min(usize::MAX as u64) as usize)
    }

    fn is_finished(&self) -> bool {
        true
    }

    fn peek(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.read_some(buf)?;
        self.seek_to(self.position - n as u64)?;
        Ok(n)
    }

    fn read_some(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut total = 0;
        while total < buf.len() {
            match self.inner.read(&mut buf[total..]) {
                Ok(0) => break,
                Ok(n) => total += n,
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        self.position += total as u64;
        Ok(total)
    }

    fn skip(&mut self, n: u64) -> io::Result<u64> {
        let n = n.min(self.len.saturating_sub(self.position));
        self.seek_to(self.position + n)?;
        Ok(n)
    }

    fn position(&self) -> u64 {
        self.position
    }

    fn is_seekable(&self) -> bool {
        true
    }

    fn seek_to(&mut self, position: u64) -> io::Result<()> {
        self.inner.seek(SeekFrom::Start(position))?;
        self.position = position;
        Ok(())
    }
}

/// A destination of bytes which may accept its content gradually.
pub trait ByteSink {
    /// The number of bytes which can be accepted right now.
    fn capacity(&self) -> usize;

    /// Write up to [`capacity`](ByteSink::capacity) bytes from `bytes`,
    /// returning the number of bytes accepted.
    fn write_some(&mut self, bytes: &[u8]) -> io::Result<usize>;

    /// Flush any bytes buffered by the sink itself.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: ?Sized + ByteSink> ByteSink for &mut S {
    fn capacity(&self) -> usize {
        (**self).capacity()
    }
    fn write_some(&mut self, bytes: &[u8]) -> io::Result<usize> {
        (**self).write_some(bytes)
    }
    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

/// An in-memory sink of bounded size,
/// such as the sending buffer of a network transport.
///
/// Once the buffer holds `limit` bytes, it accepts no more
/// until the bytes are taken out with [`take`](BufferSink::take).
#[derive(Debug, Clone)]
pub struct BufferSink {
    data: Vec<u8>,
    limit: usize,
}

impl BufferSink {
    /// Create a sink holding at most `limit` bytes at a time.
    pub fn with_limit(limit: usize) -> Self {
        BufferSink {
            data: Vec::with_capacity(limit.min(1 << 16)),
            limit,
        }
    }

    /// Create a sink without a size limit.
    pub fn unbounded() -> Self {
        BufferSink {
            data: Vec::new(),
            limit: usize::MAX,
        }
    }

    /// Take out all bytes currently held, making room for more.
    pub fn take(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.data)
    }

    /// The bytes currently held.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Recover all bytes held.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

impl ByteSink for BufferSink {
    fn capacity(&self) -> usize {
        self.limit - self.data.len()
    }

    fn write_some(&mut self, bytes: &[u8]) -> io::Result<usize> {
        let n = bytes.len().min(self.capacity());
        self.data.extend_from_slice(&bytes[..n]);
        Ok(n)
    }
}

/// A sink over a blocking writer, such as a file.
/// It always has room for more bytes.
#[derive(Debug)]
pub struct WriteSink<W> {
    inner: W,
}

impl<W: Write> WriteSink<W> {
    /// Wrap the given writer.
    pub fn new(inner: W) -> Self {
        WriteSink { inner }
    }

    /// Recover the inner writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> ByteSink for WriteSink<W> {
    fn capacity(&self) -> usize {
        usize::MAX
    }

    fn write_some(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.inner.write_all(bytes)?;
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn buffer_source_is_fed_gradually() {
        let mut source = BufferSource::new();
        assert_eq!(source.available().unwrap(), 0);
        assert!(!source.at_end().unwrap());

        source.feed(&[1, 2, 3]);
        let mut buf = [0; 2];
        assert_eq!(source.peek(&mut buf).unwrap(), 2);
        assert_eq!(buf, [1, 2]);
        assert_eq!(source.position(), 0);

        assert_eq!(source.read_some(&mut buf).unwrap(), 2);
        assert_eq!(source.position(), 2);
        source.feed(&[4]);
        assert_eq!(source.skip(5).unwrap(), 2);
        assert_eq!(source.position(), 4);

        source.finish();
        assert!(source.at_end().unwrap());
    }

    #[test]
    fn read_source_peeks_and_seeks() {
        let mut source = ReadSource::new(Cursor::new(vec![10, 20, 30, 40])).unwrap();
        assert_eq!(source.available().unwrap(), 4);

        let mut buf = [0; 3];
        assert_eq!(source.peek(&mut buf).unwrap(), 3);
        assert_eq!(source.position(), 0);
        assert_eq!(source.skip(2).unwrap(), 2);
        assert_eq!(source.read_some(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], &[30, 40]);
        assert!(source.at_end().unwrap());

        source.seek_to(1).unwrap();
        assert_eq!(source.available().unwrap(), 3);
    }

    #[test]
    fn buffer_sink_fills_up() {
        let mut sink = BufferSink::with_limit(4);
        assert_eq!(sink.write_some(&[1, 2, 3]).unwrap(), 3);
        assert_eq!(sink.write_some(&[4, 5, 6]).unwrap(), 1);
        assert_eq!(sink.capacity(), 0);
        assert_eq!(sink.take(), vec![1, 2, 3, 4]);
        assert_eq!(sink.capacity(), 4);
    }
}
