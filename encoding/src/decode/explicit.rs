//! Decoders for the explicit VR transfer syntaxes,
//! in either byte order.
use crate::decode::{
    explicit_header_len, BadSequenceHeaderSnafu, Decode, ReadItemHeaderSnafu, ReadLengthSnafu,
    ReadTagSnafu, ReadVrSnafu, Result,
};
use byteordered::byteorder::{BigEndian, ByteOrder, LittleEndian};
use dcmio_core::header::{DataElementHeader, Length, SequenceItemHeader};
use dcmio_core::{Tag, VR};
use snafu::ResultExt;
use std::fmt;
use std::io::Read;
use std::marker::PhantomData;

/// A data element header decoder for explicit VR,
/// with multi-byte fields in byte order `O`.
pub struct ExplicitVRDecoder<O> {
    order: PhantomData<fn() -> O>,
}

/// Decoder for Explicit VR Little Endian.
pub type ExplicitVRLittleEndianDecoder = ExplicitVRDecoder<LittleEndian>;

/// Decoder for Explicit VR Big Endian.
pub type ExplicitVRBigEndianDecoder = ExplicitVRDecoder<BigEndian>;

impl<O> Default for ExplicitVRDecoder<O> {
    fn default() -> Self {
        ExplicitVRDecoder { order: PhantomData }
    }
}

impl<O> Clone for ExplicitVRDecoder<O> {
    fn clone(&self) -> Self {
        ExplicitVRDecoder::default()
    }
}

impl<O> fmt::Debug for ExplicitVRDecoder<O> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(std::any::type_name::<Self>())
    }
}

impl<O: ByteOrder> ExplicitVRDecoder<O> {
    fn tag_of(buf: &[u8]) -> Tag {
        Tag(O::read_u16(&buf[0..2]), O::read_u16(&buf[2..4]))
    }
}

impl<O: ByteOrder> Decode for ExplicitVRDecoder<O> {
    fn decode_header<S>(&self, source: &mut S) -> Result<(DataElementHeader, usize)>
    where
        S: ?Sized + Read,
    {
        let mut buf = [0u8; 8];
        source.read_exact(&mut buf[..4]).context(ReadTagSnafu)?;
        let tag = Self::tag_of(&buf);

        if tag.group() == 0xFFFE {
            // items and delimiters: tag and 32-bit length, no VR
            source.read_exact(&mut buf[4..]).context(ReadLengthSnafu)?;
            let len = O::read_u32(&buf[4..]);
            return Ok((DataElementHeader::new(tag, VR::UN, Length(len)), 8));
        }

        source.read_exact(&mut buf[4..6]).context(ReadVrSnafu)?;
        let vr = VR::from_binary([buf[4], buf[5]]).unwrap_or(VR::UN);

        if vr.has_short_length() {
            source.read_exact(&mut buf[6..]).context(ReadLengthSnafu)?;
            let len = u32::from(O::read_u16(&buf[6..]));
            Ok((DataElementHeader::new(tag, vr, Length(len)), 8))
        } else {
            // 2 reserved bytes, then the 32-bit length
            let mut rest = [0u8; 6];
            source.read_exact(&mut rest).context(ReadLengthSnafu)?;
            let len = O::read_u32(&rest[2..]);
            Ok((DataElementHeader::new(tag, vr, Length(len)), 12))
        }
    }

    fn decode_item_header<S>(&self, source: &mut S) -> Result<SequenceItemHeader>
    where
        S: ?Sized + Read,
    {
        let mut buf = [0u8; 8];
        source.read_exact(&mut buf).context(ReadItemHeaderSnafu)?;
        let len = Length(O::read_u32(&buf[4..]));
        SequenceItemHeader::new(Self::tag_of(&buf), len).context(BadSequenceHeaderSnafu)
    }

    fn decode_tag<S>(&self, source: &mut S) -> Result<Tag>
    where
        S: ?Sized + Read,
    {
        let mut buf = [0u8; 4];
        source.read_exact(&mut buf).context(ReadTagSnafu)?;
        Ok(Self::tag_of(&buf))
    }

    fn header_len(&self, prefix: &[u8]) -> usize {
        let group = prefix.get(0..2).map(O::read_u16).unwrap_or(0);
        explicit_header_len(group, prefix)
    }
}
