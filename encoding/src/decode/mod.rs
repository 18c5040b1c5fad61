//! Data element header decoding.
//!
//! Decoders read one header at a time from a reader
//! positioned at its first byte,
//! leaving the reader at the first byte of the value.
//! Callers working over a suspending byte source
//! use [`DecodeFrom::header_len`] to learn how many bytes to gather first.
use dcmio_core::header::{DataElementHeader, SequenceItemHeader, SequenceItemHeaderError};
use dcmio_core::{Tag, VR};
use snafu::{Backtrace, Snafu};
use std::io::{self, Read};

pub mod explicit;
pub mod implicit_le;

pub use self::explicit::{ExplicitVRBigEndianDecoder, ExplicitVRLittleEndianDecoder};
pub use self::implicit_le::ImplicitVRLittleEndianDecoder;

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("Could not read element tag"))]
    ReadTag {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Could not read value representation"))]
    ReadVr {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Could not read element length"))]
    ReadLength {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Could not read item header"))]
    ReadItemHeader {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Bad sequence item header"))]
    BadSequenceHeader {
        #[snafu(backtrace)]
        source: SequenceItemHeaderError,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A decoder of data element headers in one transfer syntax.
pub trait Decode {
    /// Decode the next data element header.
    ///
    /// Item and delimiter headers are decoded as well,
    /// with the VR `UN`.
    /// Returns the header and the number of bytes read.
    fn decode_header<S>(&self, source: &mut S) -> Result<(DataElementHeader, usize)>
    where
        S: ?Sized + Read;

    /// Decode the next item or delimiter header.
    fn decode_item_header<S>(&self, source: &mut S) -> Result<SequenceItemHeader>
    where
        S: ?Sized + Read;

    /// Decode a tag alone.
    fn decode_tag<S>(&self, source: &mut S) -> Result<Tag>
    where
        S: ?Sized + Read;

    /// The full size of the header which starts with `prefix`.
    ///
    /// `prefix` should hold at least the first 6 bytes of the header.
    fn header_len(&self, prefix: &[u8]) -> usize;
}

/// The object safe counterpart of [`Decode`],
/// for one reader type `S`.
pub trait DecodeFrom<S: ?Sized + Read> {
    fn decode_header(&self, source: &mut S) -> Result<(DataElementHeader, usize)>;

    fn decode_item_header(&self, source: &mut S) -> Result<SequenceItemHeader>;

    fn decode_tag(&self, source: &mut S) -> Result<Tag>;

    fn header_len(&self, prefix: &[u8]) -> usize;
}

impl<T, S> DecodeFrom<S> for T
where
    T: Decode,
    S: ?Sized + Read,
{
    fn decode_header(&self, source: &mut S) -> Result<(DataElementHeader, usize)> {
        Decode::decode_header(self, source)
    }

    fn decode_item_header(&self, source: &mut S) -> Result<SequenceItemHeader> {
        Decode::decode_item_header(self, source)
    }

    fn decode_tag(&self, source: &mut S) -> Result<Tag> {
        Decode::decode_tag(self, source)
    }

    fn header_len(&self, prefix: &[u8]) -> usize {
        Decode::header_len(self, prefix)
    }
}

/// A decoder chosen at run time.
pub type DynDecoder<'d> = Box<dyn DecodeFrom<dyn Read + 'd> + Send + 'd>;

/// Header size in an explicit VR transfer syntax,
/// given the group number and the first bytes of the header.
pub(crate) fn explicit_header_len(group: u16, prefix: &[u8]) -> usize {
    if group == 0xFFFE || prefix.len() < 6 {
        return 8;
    }
    match VR::from_binary([prefix[4], prefix[5]]) {
        Some(vr) if vr.has_short_length() => 8,
        _ => 12,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcmio_core::dictionary::EmptyDictionary;

    fn erase<'d, T>(decoder: T) -> DynDecoder<'d>
    where
        T: DecodeFrom<dyn Read + 'd> + Send + 'd,
    {
        Box::new(decoder)
    }

    #[test]
    fn decoders_can_be_erased() {
        let decoders = vec![
            erase(ExplicitVRLittleEndianDecoder::default()),
            erase(ExplicitVRBigEndianDecoder::default()),
            erase(ImplicitVRLittleEndianDecoder::with_dict(EmptyDictionary)),
        ];
        let raw: &[u8] = &[0xFE, 0xFF, 0xDD, 0xE0, 0, 0, 0, 0];
        let mut source = raw;
        let header = decoders[0].decode_item_header(&mut source).unwrap();
        assert_eq!(header, SequenceItemHeader::SequenceDelimiter);
        assert!(decoders.iter().all(|d| d.header_len(raw) == 8));
    }
}
