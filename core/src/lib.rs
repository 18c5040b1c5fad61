#![crate_type = "lib"]
#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    unused_qualifications,
    unused_import_braces
)]

//! This is the core library of dcmio containing the basic concepts
//! and data structures of DICOM content.
//!
//! - [`header`] comprises the data types of DICOM element headers,
//!   including DICOM tags, value representations and value lengths.
//! - [`stream`] defines byte sources and sinks which may
//!   deliver or accept bytes gradually.
//! - [`storage`] holds the raw bytes of element values,
//!   with deferred loading and byte order swapping.
//! - [`dictionary`] describes the query interface of DICOM data dictionaries.

pub mod dictionary;
pub mod header;
pub mod storage;
pub mod stream;

pub use dictionary::DataDictionary;
pub use header::{DataElementHeader, HasLength, Header, Length, Tag, VR};
pub use storage::ValueStorage;
pub use stream::{ByteSink, ByteSource, Progress};

// re-export crates that are part of the public API
pub use byteordered;
pub use snafu;
