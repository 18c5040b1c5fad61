//! Data element header encoding.
use dcmio_core::{DataElementHeader, Tag, VR};
use snafu::{Backtrace, ResultExt, Snafu};
use std::io::{self, Write};

pub mod explicit;
pub mod implicit_le;

pub use self::explicit::{ExplicitVRBigEndianEncoder, ExplicitVRLittleEndianEncoder};
pub use self::implicit_le::ImplicitVRLittleEndianEncoder;

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("Failed to write tag"))]
    WriteTag {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to write element header"))]
    WriteHeader {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to write item header"))]
    WriteItemHeader {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to write item delimiter"))]
    WriteItemDelimiter {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to write sequence delimiter"))]
    WriteSequenceDelimiter {
        backtrace: Backtrace,
        source: io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An encoder of data element headers in one transfer syntax.
pub trait Encode {
    /// Write a tag followed by a 32-bit length, without VR.
    /// Item headers and delimiters have this form in every transfer syntax.
    fn encode_tag_length<W>(&self, to: W, tag: Tag, len: u32) -> io::Result<()>
    where
        W: Write;

    /// Write a tag alone.
    fn encode_tag<W>(&self, to: W, tag: Tag) -> Result<()>
    where
        W: Write;

    /// Write a data element header.
    /// Returns the number of bytes written.
    fn encode_element_header<W>(&self, to: W, de: DataElementHeader) -> Result<usize>
    where
        W: Write;

    fn encode_item_header<W>(&self, to: W, len: u32) -> Result<()>
    where
        W: Write,
    {
        self.encode_tag_length(to, Tag::ITEM, len)
            .context(WriteItemHeaderSnafu)
    }

    fn encode_item_delimiter<W>(&self, to: W) -> Result<()>
    where
        W: Write,
    {
        self.encode_tag_length(to, Tag::ITEM_DELIMITER, 0)
            .context(WriteItemDelimiterSnafu)
    }

    fn encode_sequence_delimiter<W>(&self, to: W) -> Result<()>
    where
        W: Write,
    {
        self.encode_tag_length(to, Tag::SEQUENCE_DELIMITER, 0)
            .context(WriteSequenceDelimiterSnafu)
    }
}

/// The object safe counterpart of [`Encode`],
/// for one writer type `W`.
pub trait EncodeTo<W: ?Sized> {
    fn encode_tag(&self, to: &mut W, tag: Tag) -> Result<()>;

    fn encode_element_header(&self, to: &mut W, de: DataElementHeader) -> Result<usize>;

    fn encode_item_header(&self, to: &mut W, len: u32) -> Result<()>;

    fn encode_item_delimiter(&self, to: &mut W) -> Result<()>;

    fn encode_sequence_delimiter(&self, to: &mut W) -> Result<()>;
}

impl<T, W> EncodeTo<W> for T
where
    T: Encode,
    W: ?Sized + Write,
{
    fn encode_tag(&self, to: &mut W, tag: Tag) -> Result<()> {
        Encode::encode_tag(self, to, tag)
    }

    fn encode_element_header(&self, to: &mut W, de: DataElementHeader) -> Result<usize> {
        Encode::encode_element_header(self, to, de)
    }

    fn encode_item_header(&self, to: &mut W, len: u32) -> Result<()> {
        Encode::encode_item_header(self, to, len)
    }

    fn encode_item_delimiter(&self, to: &mut W) -> Result<()> {
        Encode::encode_item_delimiter(self, to)
    }

    fn encode_sequence_delimiter(&self, to: &mut W) -> Result<()> {
        Encode::encode_sequence_delimiter(self, to)
    }
}

/// An encoder chosen at run time.
pub type DynEncoder<'w, W> = Box<dyn EncodeTo<W> + Send + 'w>;

/// The number of bytes of a data element header
/// with the given value representation.
///
/// Explicit VR headers are 8 bytes long
/// for VRs with a 16-bit length field and 12 bytes long otherwise.
/// Implicit VR headers are always 8 bytes long.
pub fn header_len(vr: VR, explicit_vr: bool) -> u32 {
    if !explicit_vr || vr.has_short_length() {
        8
    } else {
        12
    }
}
