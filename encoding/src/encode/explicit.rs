//! Encoders for the explicit VR transfer syntaxes,
//! in either byte order.
use crate::encode::{Encode, Result, WriteHeaderSnafu, WriteTagSnafu};
use byteordered::byteorder::{BigEndian, ByteOrder, LittleEndian};
use dcmio_core::header::{DataElementHeader, HasLength, Header};
use dcmio_core::Tag;
use snafu::ResultExt;
use std::fmt;
use std::io::{self, Write};
use std::marker::PhantomData;

/// A data element header encoder for explicit VR,
/// with multi-byte fields in byte order `O`.
pub struct ExplicitVREncoder<O> {
    order: PhantomData<fn() -> O>,
}

/// Encoder for Explicit VR Little Endian.
pub type ExplicitVRLittleEndianEncoder = ExplicitVREncoder<LittleEndian>;

/// Encoder for Explicit VR Big Endian.
pub type ExplicitVRBigEndianEncoder = ExplicitVREncoder<BigEndian>;

impl<O> Default for ExplicitVREncoder<O> {
    fn default() -> Self {
        ExplicitVREncoder { order: PhantomData }
    }
}

impl<O> Clone for ExplicitVREncoder<O> {
    fn clone(&self) -> Self {
        ExplicitVREncoder::default()
    }
}

impl<O> fmt::Debug for ExplicitVREncoder<O> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(std::any::type_name::<Self>())
    }
}

impl<O: ByteOrder> Encode for ExplicitVREncoder<O> {
    fn encode_tag_length<W>(&self, mut to: W, tag: Tag, len: u32) -> io::Result<()>
    where
        W: Write,
    {
        let mut buf = [0u8; 8];
        O::write_u16(&mut buf[0..], tag.group());
        O::write_u16(&mut buf[2..], tag.element());
        O::write_u32(&mut buf[4..], len);
        to.write_all(&buf)
    }

    fn encode_tag<W>(&self, mut to: W, tag: Tag) -> Result<()>
    where
        W: Write,
    {
        let mut buf = [0u8; 4];
        O::write_u16(&mut buf[0..], tag.group());
        O::write_u16(&mut buf[2..], tag.element());
        to.write_all(&buf).context(WriteTagSnafu)
    }

    fn encode_element_header<W>(&self, mut to: W, de: DataElementHeader) -> Result<usize>
    where
        W: Write,
    {
        let tag = de.tag();
        let len = de.length().0;
        if tag.group() == 0xFFFE {
            self.encode_tag_length(to, tag, len)
                .context(WriteHeaderSnafu)?;
            return Ok(8);
        }

        let mut buf = [0u8; 12];
        O::write_u16(&mut buf[0..], tag.group());
        O::write_u16(&mut buf[2..], tag.element());
        buf[4..6].copy_from_slice(&de.vr().to_bytes());
        let size = if de.vr().has_short_length() {
            O::write_u16(&mut buf[6..], len as u16);
            8
        } else {
            // bytes 6 and 7 are reserved
            O::write_u32(&mut buf[8..], len);
            12
        };
        to.write_all(&buf[..size]).context(WriteHeaderSnafu)?;
        Ok(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcmio_core::header::Length;
    use dcmio_core::VR;

    #[test]
    fn little_endian_headers() {
        let enc = ExplicitVRLittleEndianEncoder::default();
        let mut out = Vec::new();
        let n = enc
            .encode_element_header(
                &mut out,
                DataElementHeader::new(Tag(0x0002, 0x0010), VR::UI, Length(20)),
            )
            .unwrap();
        assert_eq!(n, 8);
        let n = enc
            .encode_element_header(
                &mut out,
                DataElementHeader::new(Tag::PIXEL_DATA, VR::OB, Length::UNDEFINED),
            )
            .unwrap();
        assert_eq!(n, 12);
        enc.encode_item_header(&mut out, 4).unwrap();
        enc.encode_item_delimiter(&mut out).unwrap();

        #[rustfmt::skip]
        let expected: &[u8] = &[
            0x02, 0x00, 0x10, 0x00, b'U', b'I', 0x14, 0x00,
            0xE0, 0x7F, 0x10, 0x00, b'O', b'B', 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF,
            0xFE, 0xFF, 0x00, 0xE0, 0x04, 0x00, 0x00, 0x00,
            0xFE, 0xFF, 0x0D, 0xE0, 0x00, 0x00, 0x00, 0x00,
        ];
        assert_eq!(out, expected);
    }

    #[test]
    fn big_endian_headers() {
        let enc = ExplicitVRBigEndianEncoder::default();
        let mut out = Vec::new();
        enc.encode_element_header(
            &mut out,
            DataElementHeader::new(Tag(0x0028, 0x0010), VR::US, Length(2)),
        )
        .unwrap();
        enc.encode_element_header(
            &mut out,
            DataElementHeader::new(Tag(0x300A, 0x00B0), VR::SQ, Length(0x0102)),
        )
        .unwrap();
        enc.encode_tag(&mut out, Tag(0x0008, 0x0016)).unwrap();

        #[rustfmt::skip]
        let expected: &[u8] = &[
            0x00, 0x28, 0x00, 0x10, b'U', b'S', 0x00, 0x02,
            0x30, 0x0A, 0x00, 0xB0, b'S', b'Q', 0x00, 0x00, 0x00, 0x00, 0x01, 0x02,
            0x00, 0x08, 0x00, 0x16,
        ];
        assert_eq!(out, expected);
    }
}
