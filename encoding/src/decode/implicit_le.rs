//! Decoder for the Implicit VR Little Endian transfer syntax.
//!
//! Headers carry no VR,
//! which is resolved through a data dictionary instead.
use crate::decode::{BadSequenceHeaderSnafu, Decode, ReadItemHeaderSnafu, ReadLengthSnafu, ReadTagSnafu, Result};
use byteordered::byteorder::{ByteOrder, LittleEndian};
use dcmio_core::dictionary::DataDictionary;
use dcmio_core::header::{DataElementHeader, Length, SequenceItemHeader};
use dcmio_core::{Tag, VR};
use snafu::ResultExt;
use std::fmt;
use std::io::Read;

pub struct ImplicitVRLittleEndianDecoder<D> {
    dict: D,
}

impl<D> fmt::Debug for ImplicitVRLittleEndianDecoder<D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ImplicitVRLittleEndianDecoder")
            .finish_non_exhaustive()
    }
}

impl<D> ImplicitVRLittleEndianDecoder<D>
where
    D: DataDictionary,
{
    pub fn with_dict(dict: D) -> Self {
        ImplicitVRLittleEndianDecoder { dict }
    }

    /// The value representation of an attribute in this transfer syntax.
    ///
    /// Pixel Data (7FE0,0010) and Overlay Data (60xx,3000) are OW.
    /// Items and delimiters are UN.
    pub fn resolve_vr(&self, tag: Tag) -> VR {
        match tag {
            Tag::PIXEL_DATA => VR::OW,
            Tag(group, 0x3000) if group & 0xFF00 == 0x6000 => VR::OW,
            Tag(0xFFFE, _) => VR::UN,
            _ => self.dict.resolve_vr(tag),
        }
    }
}

fn split(buf: &[u8; 8]) -> (Tag, Length) {
    let tag = Tag(LittleEndian::read_u16(&buf[0..2]), LittleEndian::read_u16(&buf[2..4]));
    (tag, Length(LittleEndian::read_u32(&buf[4..8])))
}

impl<D> Decode for ImplicitVRLittleEndianDecoder<D>
where
    D: DataDictionary,
{
    fn decode_header<S>(&self, source: &mut S) -> Result<(DataElementHeader, usize)>
    where
        S: ?Sized + Read,
    {
        let mut buf = [0u8; 8];
        source.read_exact(&mut buf[..4]).context(ReadTagSnafu)?;
        source.read_exact(&mut buf[4..]).context(ReadLengthSnafu)?;
        let (tag, len) = split(&buf);
        Ok((DataElementHeader::new(tag, self.resolve_vr(tag), len), 8))
    }

    fn decode_item_header<S>(&self, source: &mut S) -> Result<SequenceItemHeader>
    where
        S: ?Sized + Read,
    {
        let mut buf = [0u8; 8];
        source.read_exact(&mut buf).context(ReadItemHeaderSnafu)?;
        let (tag, len) = split(&buf);
        SequenceItemHeader::new(tag, len).context(BadSequenceHeaderSnafu)
    }

    fn decode_tag<S>(&self, source: &mut S) -> Result<Tag>
    where
        S: ?Sized + Read,
    {
        let mut buf = [0u8; 4];
        source.read_exact(&mut buf).context(ReadTagSnafu)?;
        Ok(Tag(LittleEndian::read_u16(&buf[0..2]), LittleEndian::read_u16(&buf[2..4])))
    }

    fn header_len(&self, _prefix: &[u8]) -> usize {
        8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcmio_core::dictionary::EmptyDictionary;
    use dcmio_core::header::{HasLength, Header};

    //  (0008,0000) group length, length 4, value 46
    //  (0011,0010) private creator, length 4, "ACME"
    //  (0009,1001) unknown private attribute, length 2
    //  (6002,3000) overlay data, length 2
    //  (7FE0,0010) pixel data, length 2
    #[rustfmt::skip]
    const RAW: &[u8] = &[
        0x08, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x2E, 0x00, 0x00, 0x00,
        0x11, 0x00, 0x10, 0x00, 0x04, 0x00, 0x00, 0x00, b'A', b'C', b'M', b'E',
        0x09, 0x00, 0x01, 0x10, 0x02, 0x00, 0x00, 0x00, 0xAB, 0xCD,
        0x02, 0x60, 0x00, 0x30, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00,
        0xE0, 0x7F, 0x10, 0x00, 0x02, 0x00, 0x00, 0x00, 0x01, 0x02,
    ];

    #[test]
    fn vr_from_fallback_rules() {
        let dec = ImplicitVRLittleEndianDecoder::with_dict(EmptyDictionary);
        let mut source = RAW;
        let expected = [
            (Tag(0x0008, 0x0000), VR::UL, 4),
            (Tag(0x0011, 0x0010), VR::LO, 4),
            (Tag(0x0009, 0x1001), VR::UN, 2),
            (Tag(0x6002, 0x3000), VR::OW, 2),
            (Tag::PIXEL_DATA, VR::OW, 2),
        ];
        for &(tag, vr, len) in &expected {
            let (header, read) = dec.decode_header(&mut source).unwrap();
            assert_eq!(header.tag(), tag);
            assert_eq!(header.vr(), vr);
            assert_eq!(header.length(), Length(len));
            assert_eq!(read, 8);
            source = &source[len as usize..];
        }
        assert!(source.is_empty());
    }

    #[rustfmt::skip]
    const ITEMS: &[u8] = &[
        0xFE, 0xFF, 0x00, 0xE0, 0x10, 0x00, 0x00, 0x00,
        0xFE, 0xFF, 0xDD, 0xE0, 0x00, 0x00, 0x00, 0x00,
    ];

    #[test]
    fn item_headers() {
        let dec = ImplicitVRLittleEndianDecoder::with_dict(EmptyDictionary);
        assert_eq!(dec.header_len(ITEMS), 8);
        let mut source = ITEMS;
        assert_eq!(
            dec.decode_item_header(&mut source).unwrap(),
            SequenceItemHeader::Item { len: Length(16) }
        );
        assert_eq!(
            dec.decode_item_header(&mut source).unwrap(),
            SequenceItemHeader::SequenceDelimiter
        );
    }
}
