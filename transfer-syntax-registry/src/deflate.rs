//! Implementation of Deflated Explicit VR Little Endian.
//!
//! In this transfer syntax the whole data set after the file meta group
//! is compressed with raw deflate (no zlib header).
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use std::io::{Read, Write};

/// Wrap a reader of deflated data set bytes.
pub fn adapt_reader<R: Read>(reader: R) -> DeflateDecoder<R> {
    DeflateDecoder::new(reader)
}

/// Wrap a writer so that the data set bytes written to it are deflated.
///
/// The encoder must be finished
/// (with [`DeflateEncoder::finish`]) once all data is written.
pub fn adapt_writer<W: Write>(writer: W) -> DeflateEncoder<W> {
    DeflateEncoder::new(writer, Compression::fast())
}

/// Inflate a complete deflated data set.
pub fn inflate(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(data.len() * 2);
    adapt_reader(data).read_to_end(&mut out)?;
    Ok(out)
}

/// Deflate a complete data set.
pub fn deflate(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = adapt_writer(Vec::with_capacity(data.len() / 2));
    encoder.write_all(data)?;
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deflated_bytes_inflate_back() {
        let data: Vec<u8> = b"ISO_IR 100\0"
            .iter()
            .cycle()
            .take(2000)
            .copied()
            .collect();
        let compressed = deflate(&data).unwrap();
        assert!(compressed.len() < data.len());
        assert_eq!(inflate(&compressed).unwrap(), data);
    }
}
