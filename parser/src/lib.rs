//! This crate works on top of DICOM encoding primitives
//! to read and write DICOM data sets as streams of tokens.
//!
//! - [`DataSetReader`] turns bytes into [`DataToken`]s,
//!   suspending whenever its byte source runs dry
//!   and resuming exactly where it stopped.
//! - [`DataSetWriter`] turns tokens back into bytes,
//!   suspending whenever its byte sink is full.
//! - [`detect_transfer_syntax`] guesses the encoding
//!   of a data set without a file meta group.
//!
//! # Example
//!
//! ```
//! use dcmio_core::stream::BufferSource;
//! use dcmio_parser::dataset::{DataToken, Next, ReadOptions};
//! use dcmio_parser::DataSetReader;
//! use dcmio_transfer_syntax_registry::entries::EXPLICIT_VR_LITTLE_ENDIAN;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut source = BufferSource::new();
//! let mut reader = DataSetReader::new(&EXPLICIT_VR_LITTLE_ENDIAN, ReadOptions::default())?;
//!
//! // only part of the element has arrived
//! source.feed(&[0x10, 0x00, 0x10, 0x00, b'P', b'N']);
//! assert_eq!(reader.next_token(&mut source)?, Next::Suspended);
//!
//! source.feed(&[0x08, 0x00, b'S', b'M', b'I', b'T', b'H', b'^', b'J', 0]);
//! source.finish();
//! assert!(matches!(reader.next_token(&mut source)?, Next::Token(DataToken::ElementHeader(_))));
//! assert!(matches!(reader.next_token(&mut source)?, Next::Token(DataToken::PrimitiveValue(_))));
//! assert_eq!(reader.next_token(&mut source)?, Next::End);
//! # Ok(())
//! # }
//! ```
#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    unused_qualifications,
    unused_import_braces
)]

pub mod dataset;
pub mod detect;

pub use dataset::{DataSetReader, DataSetWriter, DataToken, ReadOptions, WriteOptions};
pub use detect::detect_transfer_syntax;

// re-export crates that are part of the public API
pub use dcmio_core;
pub use dcmio_encoding;
