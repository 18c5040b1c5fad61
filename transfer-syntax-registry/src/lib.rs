#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    unused_qualifications,
    unused_import_braces
)]
//! This crate contains the DICOM transfer syntax registry
//! and the pixel data codec registry.
//!
//! The transfer syntax registry maps the UID of a transfer syntax into the
//! respective transfer syntax specifier.
//! It is read-only and built once on first use.
//! See [`entries`] for the list of transfer syntaxes known.
//!
//! The [`CodecRegistry`] maps the UID of a transfer syntax
//! with encapsulated pixel data
//! into a codec able to convert pixel data from and into that representation.
//! It is an ordinary value,
//! constructed and owned by whoever needs pixel data conversion.
//!
//! ```
//! use dcmio_transfer_syntax_registry::{CodecRegistry, TransferSyntaxRegistry};
//! use dcmio_encoding::TransferSyntaxIndex;
//!
//! let ts = TransferSyntaxRegistry.get("1.2.840.10008.1.2.5\0").unwrap();
//! assert_eq!(ts.name(), "RLE Lossless");
//!
//! let codecs = CodecRegistry::with_builtin();
//! assert!(codecs.get(ts.uid()).is_some());
//! ```

pub mod adapters;
pub mod deflate;
pub mod entries;

use dcmio_encoding::adapters::{
    DecodeError, EncodeError, EncodeOptions, PixelDataCodec, PixelParams, RawPixelData,
};
use dcmio_encoding::transfer_syntax::trim_uid;
use dcmio_encoding::{TransferSyntax, TransferSyntaxIndex};
use lazy_static::lazy_static;
use snafu::{Backtrace, OptionExt, ResultExt, Snafu};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

pub use dcmio_encoding;

/// Main implementation of a registry of DICOM transfer syntaxes.
///
/// Consumers would generally use [`TransferSyntaxRegistry`] instead.
pub struct TransferSyntaxRegistryImpl {
    m: HashMap<&'static str, TransferSyntax>,
}

impl fmt::Debug for TransferSyntaxRegistryImpl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let entries: HashMap<&str, &str> =
            self.m.iter().map(|(uid, ts)| (*uid, ts.name())).collect();
        f.debug_struct("TransferSyntaxRegistryImpl")
            .field("m", &entries)
            .finish()
    }
}

impl TransferSyntaxRegistryImpl {
    /// Obtain an iterator of all registered transfer syntaxes.
    pub fn iter(&self) -> impl Iterator<Item = &TransferSyntax> {
        self.m.values()
    }

    /// Obtain a DICOM transfer syntax by its respective UID.
    ///
    /// Trailing null characters and spaces are ignored.
    fn get<U: AsRef<str>>(&self, uid: U) -> Option<&TransferSyntax> {
        self.m.get(trim_uid(uid.as_ref()))
    }

    fn register(&mut self, ts: TransferSyntax) {
        self.m.insert(ts.uid(), ts);
    }
}

impl TransferSyntaxIndex for TransferSyntaxRegistryImpl {
    #[inline]
    fn get(&self, uid: &str) -> Option<&TransferSyntax> {
        Self::get(self, uid)
    }
}

/// Zero-sized representative of the main transfer syntax registry.
#[derive(Debug, Default, Copy, Clone, Eq, Hash, PartialEq)]
pub struct TransferSyntaxRegistry;

impl TransferSyntaxRegistry {
    /// Obtain an iterator of all registered transfer syntaxes.
    pub fn iter(&self) -> impl Iterator<Item = &TransferSyntax> {
        get_registry().iter()
    }
}

impl TransferSyntaxIndex for TransferSyntaxRegistry {
    #[inline]
    fn get(&self, uid: &str) -> Option<&TransferSyntax> {
        get_registry().get(uid)
    }
}

lazy_static! {
    static ref REGISTRY: TransferSyntaxRegistryImpl = {
        let mut registry = TransferSyntaxRegistryImpl { m: HashMap::new() };
        for ts in entries::ALL {
            registry.register(*ts);
        }
        registry
    };
}

/// Retrieve the default transfer syntax.
pub fn default() -> TransferSyntax {
    entries::IMPLICIT_VR_LITTLE_ENDIAN
}

/// Retrieve a reference to the global transfer syntax registry implementation.
#[inline]
pub fn get_registry() -> &'static TransferSyntaxRegistryImpl {
    &REGISTRY
}

/// An error which may occur when using the codec registry.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// No codec is registered for the transfer syntax.
    #[snafu(display("No pixel data codec for transfer syntax `{}`", uid))]
    NoCodec { uid: String, backtrace: Backtrace },
    /// The codec failed to decode the pixel data.
    #[snafu(display("Could not decode pixel data in `{}`", uid))]
    DecodePixelData {
        uid: String,
        #[snafu(backtrace)]
        source: DecodeError,
    },
    /// The codec failed to encode the pixel data.
    #[snafu(display("Could not encode pixel data in `{}`", uid))]
    EncodePixelData {
        uid: String,
        #[snafu(backtrace)]
        source: EncodeError,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A registry of pixel data codecs, keyed by transfer syntax UID.
///
/// Codecs are registered up front
/// and then looked up while data sets are converted.
/// The registry is not global:
/// create one and pass it to the operations which need it.
#[derive(Debug, Default)]
pub struct CodecRegistry {
    codecs: HashMap<String, Box<dyn PixelDataCodec>>,
}

impl CodecRegistry {
    /// Create an empty codec registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec registry with the codecs implemented in this crate:
    /// RLE Lossless.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(
            entries::RLE_LOSSLESS.uid(),
            Box::new(adapters::rle_lossless::RleLosslessCodec),
        );
        registry
    }

    /// Register a codec for the given transfer syntax UID,
    /// replacing and returning the previous one if any.
    pub fn register(
        &mut self,
        uid: &str,
        codec: Box<dyn PixelDataCodec>,
    ) -> Option<Box<dyn PixelDataCodec>> {
        debug!("Registering pixel data codec for {}", trim_uid(uid));
        self.codecs.insert(trim_uid(uid).to_string(), codec)
    }

    /// Remove the codec of the given transfer syntax UID.
    pub fn unregister(&mut self, uid: &str) -> Option<Box<dyn PixelDataCodec>> {
        self.codecs.remove(trim_uid(uid))
    }

    /// Obtain the codec of the given transfer syntax UID.
    pub fn get(&self, uid: &str) -> Option<&dyn PixelDataCodec> {
        self.codecs.get(trim_uid(uid)).map(|codec| &**codec)
    }

    /// Check whether a codec exists for the given transfer syntax UID.
    pub fn supports(&self, uid: &str) -> bool {
        self.codecs.contains_key(trim_uid(uid))
    }

    /// Encode native pixel data into the representation
    /// of the given transfer syntax.
    pub fn encode(
        &self,
        uid: &str,
        native: &[u8],
        params: &PixelParams,
        options: &EncodeOptions,
    ) -> Result<RawPixelData> {
        let uid = trim_uid(uid);
        let codec = self.get(uid).context(NoCodecSnafu { uid })?;
        codec
            .encode(native, params, options)
            .context(EncodePixelDataSnafu { uid })
    }

    /// Decode pixel data in the representation
    /// of the given transfer syntax into native pixel data.
    pub fn decode(&self, uid: &str, pixels: &RawPixelData, params: &PixelParams) -> Result<Vec<u8>> {
        let uid = trim_uid(uid);
        let codec = self.get(uid).context(NoCodecSnafu { uid })?;
        codec
            .decode(pixels, params)
            .context(DecodePixelDataSnafu { uid })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcmio_encoding::adapters::DecodeResult;
    use dcmio_encoding::adapters::EncodeResult;

    #[test]
    fn known_transfer_syntaxes_are_registered() {
        let registry = TransferSyntaxRegistry;
        let ts = registry.get("1.2.840.10008.1.2").unwrap();
        assert_eq!(ts, &entries::IMPLICIT_VR_LITTLE_ENDIAN);
        assert!(!ts.is_explicit_vr());

        let ts = registry.get("1.2.840.10008.1.2.1\0").unwrap();
        assert!(ts.is_explicit_vr());
        assert!(!ts.is_encapsulated_pixel_data());

        let ts = registry.get("1.2.840.10008.1.2.1.99").unwrap();
        assert!(ts.is_deflated());

        let ts = registry.get("1.2.840.10008.1.2.4.50").unwrap();
        assert!(ts.is_encapsulated_pixel_data());

        assert!(registry.get("1.2.3.4.5").is_none());
        assert!(registry.get_or_fail("1.2.3.4.5").is_err());
        assert_eq!(registry.iter().count(), entries::ALL.len());
    }

    #[derive(Debug)]
    struct Identity;

    impl PixelDataCodec for Identity {
        fn decode(&self, pixels: &RawPixelData, _params: &PixelParams) -> DecodeResult<Vec<u8>> {
            Ok(pixels.fragments.concat())
        }

        fn encode(
            &self,
            native: &[u8],
            _params: &PixelParams,
            _options: &EncodeOptions,
        ) -> EncodeResult<RawPixelData> {
            Ok(RawPixelData {
                offset_table: vec![0],
                fragments: vec![native.to_vec()],
            })
        }
    }

    #[test]
    fn codec_registry_dispatches_by_uid() {
        let params = PixelParams {
            rows: 1,
            columns: 2,
            samples_per_pixel: 1,
            bits_allocated: 8,
            number_of_frames: 1,
        };
        let mut codecs = CodecRegistry::new();
        assert!(!codecs.supports("1.2.840.10008.1.2.1.98"));
        assert!(matches!(
            codecs.encode("1.2.840.10008.1.2.1.98", &[1, 2], &params, &EncodeOptions::new()),
            Err(Error::NoCodec { .. })
        ));

        codecs.register("1.2.840.10008.1.2.1.98\0", Box::new(Identity));
        assert!(codecs.supports("1.2.840.10008.1.2.1.98"));
        let raw = codecs
            .encode("1.2.840.10008.1.2.1.98", &[1, 2], &params, &EncodeOptions::new())
            .unwrap();
        assert_eq!(raw.fragments, vec![vec![1, 2]]);
        let native = codecs.decode("1.2.840.10008.1.2.1.98", &raw, &params).unwrap();
        assert_eq!(native, vec![1, 2]);

        assert!(codecs.unregister("1.2.840.10008.1.2.1.98").is_some());
        assert!(!codecs.supports("1.2.840.10008.1.2.1.98"));
    }

    #[test]
    fn builtin_codecs_cover_rle_only() {
        let codecs = CodecRegistry::with_builtin();
        assert!(codecs.supports(entries::RLE_LOSSLESS.uid()));
        assert!(!codecs.supports(entries::JPEG_BASELINE.uid()));
    }
}
