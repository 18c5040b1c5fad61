//! Encoder for the Implicit VR Little Endian transfer syntax.
use crate::encode::{Encode, Result, WriteHeaderSnafu, WriteTagSnafu};
use byteordered::byteorder::{ByteOrder, LittleEndian};
use dcmio_core::header::{DataElementHeader, HasLength, Header};
use dcmio_core::Tag;
use snafu::ResultExt;
use std::io::{self, Write};

/// Every header is a tag and a 32-bit length.
#[derive(Debug, Default, Copy, Clone)]
pub struct ImplicitVRLittleEndianEncoder;

impl Encode for ImplicitVRLittleEndianEncoder {
    fn encode_tag_length<W>(&self, mut to: W, tag: Tag, len: u32) -> io::Result<()>
    where
        W: Write,
    {
        let mut buf = [0u8; 8];
        LittleEndian::write_u16(&mut buf[0..], tag.group());
        LittleEndian::write_u16(&mut buf[2..], tag.element());
        LittleEndian::write_u32(&mut buf[4..], len);
        to.write_all(&buf)
    }

    fn encode_tag<W>(&self, mut to: W, tag: Tag) -> Result<()>
    where
        W: Write,
    {
        let mut buf = [0u8; 4];
        LittleEndian::write_u16(&mut buf[0..], tag.group());
        LittleEndian::write_u16(&mut buf[2..], tag.element());
        to.write_all(&buf).context(WriteTagSnafu)
    }

    fn encode_element_header<W>(&self, to: W, de: DataElementHeader) -> Result<usize>
    where
        W: Write,
    {
        self.encode_tag_length(to, de.tag(), de.length().0)
            .context(WriteHeaderSnafu)?;
        Ok(8)
    }
}
