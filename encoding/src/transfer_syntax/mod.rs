//! Module containing the DICOM Transfer Syntax data structure and related methods.
//! Similar to the DcmXfer in DCMTK, the `TransferSyntax` describes
//! how data elements are laid out in a certain transfer syntax,
//! and produces the header decoders and encoders for it.
//!
//! This crate does not host specific transfer syntaxes. Instead, they are created in
//! other crates and gathered in an index, which implements
//! [`TransferSyntaxIndex`]. For more
//! information, please see the `dcmio-transfer-syntax-registry` crate.

use crate::decode::{
    DynDecoder, ExplicitVRBigEndianDecoder, ExplicitVRLittleEndianDecoder,
    ImplicitVRLittleEndianDecoder,
};
use crate::encode::{
    DynEncoder, ExplicitVRBigEndianEncoder, ExplicitVRLittleEndianEncoder,
    ImplicitVRLittleEndianEncoder,
};
use dcmio_core::DataDictionary;
use snafu::{Backtrace, Snafu};
use std::io::Write;

pub use byteordered::Endianness;

/// An error which may occur when resolving a transfer syntax.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// The transfer syntax UID is not known.
    #[snafu(display("Unknown transfer syntax `{}`", uid))]
    UnknownTransferSyntax { uid: String, backtrace: Backtrace },
    /// The transfer syntax is known, but has no data set codec.
    #[snafu(display("Unsupported transfer syntax `{}`", uid))]
    UnsupportedTransferSyntax { uid: String, backtrace: Backtrace },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A DICOM transfer syntax specifier.
///
/// This is static metadata:
/// byte order, value representation mode,
/// and whether pixel data is encapsulated or the data set deflated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferSyntax {
    /// The unique identifier of the transfer syntax.
    uid: &'static str,
    /// The name of the transfer syntax.
    name: &'static str,
    /// The byte order of data.
    byte_order: Endianness,
    /// Whether the transfer syntax mandates an explicit value representation,
    /// or the VR is implicit.
    explicit_vr: bool,
    /// Whether pixel data is encapsulated in fragments.
    encapsulated: bool,
    /// Whether the data set is deflated.
    deflated: bool,
}

impl TransferSyntax {
    /// Create a transfer syntax specifier for native pixel data.
    pub const fn new(
        uid: &'static str,
        name: &'static str,
        byte_order: Endianness,
        explicit_vr: bool,
    ) -> Self {
        TransferSyntax {
            uid,
            name,
            byte_order,
            explicit_vr,
            encapsulated: false,
            deflated: false,
        }
    }

    /// Create a transfer syntax specifier for encapsulated pixel data.
    ///
    /// All such transfer syntaxes are explicit VR little endian.
    pub const fn new_encapsulated(uid: &'static str, name: &'static str) -> Self {
        TransferSyntax {
            uid,
            name,
            byte_order: Endianness::Little,
            explicit_vr: true,
            encapsulated: true,
            deflated: false,
        }
    }

    /// Create a transfer syntax specifier for a deflated data set
    /// in explicit VR little endian.
    pub const fn new_deflated(uid: &'static str, name: &'static str) -> Self {
        TransferSyntax {
            uid,
            name,
            byte_order: Endianness::Little,
            explicit_vr: true,
            encapsulated: false,
            deflated: true,
        }
    }

    /// Obtain this transfer syntax' unique identifier.
    pub const fn uid(&self) -> &'static str {
        self.uid
    }

    /// Obtain the name of this transfer syntax.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Obtain this transfer syntax' expected endianness.
    pub const fn endianness(&self) -> Endianness {
        self.byte_order
    }

    /// Check whether this transfer syntax uses explicit value representations.
    pub const fn is_explicit_vr(&self) -> bool {
        self.explicit_vr
    }

    /// Check whether pixel data is encapsulated in this transfer syntax.
    pub const fn is_encapsulated_pixel_data(&self) -> bool {
        self.encapsulated
    }

    /// Check whether the data set is deflated in this transfer syntax.
    pub const fn is_deflated(&self) -> bool {
        self.deflated
    }

    /// Check whether this transfer syntax has the given UID,
    /// ignoring trailing null characters and spaces.
    pub fn has_uid(&self, uid: &str) -> bool {
        self.uid == trim_uid(uid)
    }

    /// Retrieve the appropriate data element header decoder for this
    /// transfer syntax, using the given dictionary
    /// to resolve implicit value representations.
    ///
    /// Returns `None` for implicit VR big endian,
    /// which is not a valid combination.
    pub fn decoder_with_dict<'d, D>(&self, dict: D) -> Option<DynDecoder<'d>>
    where
        D: DataDictionary + Send + 'd,
    {
        match (self.byte_order, self.explicit_vr) {
            (Endianness::Little, false) => {
                Some(Box::new(ImplicitVRLittleEndianDecoder::with_dict(dict)))
            }
            (Endianness::Little, true) => Some(Box::new(ExplicitVRLittleEndianDecoder::default())),
            (Endianness::Big, true) => Some(Box::new(ExplicitVRBigEndianDecoder::default())),
            (Endianness::Big, false) => None,
        }
    }

    /// Retrieve the appropriate data element header encoder
    /// for this transfer syntax.
    ///
    /// Returns `None` for implicit VR big endian.
    pub fn encoder<'w, W>(&self) -> Option<DynEncoder<'w, W>>
    where
        W: ?Sized + Write + 'w,
    {
        match (self.byte_order, self.explicit_vr) {
            (Endianness::Little, false) => Some(Box::new(ImplicitVRLittleEndianEncoder)),
            (Endianness::Little, true) => Some(Box::new(ExplicitVRLittleEndianEncoder::default())),
            (Endianness::Big, true) => Some(Box::new(ExplicitVRBigEndianEncoder::default())),
            (Endianness::Big, false) => None,
        }
    }
}

/// Remove the trailing null character or space padding of a UID value.
pub fn trim_uid(uid: &str) -> &str {
    uid.trim_end_matches(|c: char| c == '\0' || c == ' ')
}

/// Trait for containers of transfer syntax specifiers.
///
/// Types implementing this trait are held responsible for populating
/// themselves with a set of transfer syntaxes, which can be fully supported,
/// partially supported, or not supported.
pub trait TransferSyntaxIndex {
    /// Obtain a DICOM transfer syntax by its respective UID.
    ///
    /// Implementations of this method should be robust to the possible
    /// presence of a trailing null characters (`\0`) in `uid`.
    fn get(&self, uid: &str) -> Option<&TransferSyntax>;

    /// Obtain a DICOM transfer syntax by its respective UID,
    /// failing if it is not known.
    fn get_or_fail(&self, uid: &str) -> Result<&TransferSyntax> {
        match self.get(uid) {
            Some(ts) => Ok(ts),
            None => UnknownTransferSyntaxSnafu {
                uid: trim_uid(uid).to_string(),
            }
            .fail(),
        }
    }
}

impl<T: ?Sized> TransferSyntaxIndex for &T
where
    T: TransferSyntaxIndex,
{
    fn get(&self, uid: &str) -> Option<&TransferSyntax> {
        (**self).get(uid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcmio_core::dictionary::EmptyDictionary;
    use dcmio_core::header::{Header, Length};
    use dcmio_core::{DataElementHeader, Tag, VR};

    const EXPLICIT_BE: TransferSyntax =
        TransferSyntax::new("1.2.840.10008.1.2.2", "Explicit VR Big Endian", Endianness::Big, true);
    const IMPLICIT_BE: TransferSyntax =
        TransferSyntax::new("1.2.3.4", "Implicit VR Big Endian", Endianness::Big, false);

    #[test]
    fn uid_matching_ignores_padding() {
        assert!(EXPLICIT_BE.has_uid("1.2.840.10008.1.2.2\0"));
        assert!(EXPLICIT_BE.has_uid("1.2.840.10008.1.2.2"));
        assert!(!EXPLICIT_BE.has_uid("1.2.840.10008.1.2.1"));
    }

    #[test]
    fn codecs_follow_the_transfer_syntax() {
        let header = DataElementHeader::new(Tag(0x0028, 0x0010), VR::US, Length(2));
        let encoder = EXPLICIT_BE.encoder::<Vec<u8>>().unwrap();
        let mut out = Vec::new();
        encoder.encode_element_header(&mut out, header).unwrap();
        assert_eq!(&out[0..2], &[0x00, 0x28]);

        let decoder = EXPLICIT_BE.decoder_with_dict(EmptyDictionary).unwrap();
        let mut source: &[u8] = &out;
        let (decoded, _) = decoder.decode_header(&mut source).unwrap();
        assert_eq!(decoded.tag(), Tag(0x0028, 0x0010));

        assert!(IMPLICIT_BE.decoder_with_dict(EmptyDictionary).is_none());
        assert!(IMPLICIT_BE.encoder::<Vec<u8>>().is_none());
    }
}
