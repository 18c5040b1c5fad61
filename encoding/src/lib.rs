//! Header codecs of the native DICOM transfer syntaxes.
//!
//! - [`decode`] and [`encode`] read and write data element headers
//!   in explicit VR little and big endian and implicit VR little endian.
//! - [`transfer_syntax`] describes a transfer syntax
//!   and picks the header codecs for it at run time.
//! - [`adapters`] declares the interface of pixel data codecs
//!   for transfer syntaxes with encapsulated pixel data.
#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    unused_qualifications,
    unused_import_braces
)]

pub mod adapters;
pub mod decode;
pub mod encode;
pub mod transfer_syntax;

pub use byteordered::Endianness;
pub use decode::Decode;
pub use encode::Encode;
pub use transfer_syntax::{TransferSyntax, TransferSyntaxIndex};

// public dependency re-export
pub use snafu;
