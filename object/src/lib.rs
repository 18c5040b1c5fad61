#![allow(clippy::derive_partial_eq_without_eq)]
//! This crate contains the in-memory data set model of DICOM objects
//! and the high level operations for reading and writing them.
//!
//! A data set is an [`Item`]: an ordered collection of data elements,
//! some of which can hold sequences of nested items
//! or encapsulated pixel data fragments.
//! Data sets are read and written through the resumable
//! [`DatasetReader`] and [`DatasetWriter`],
//! which feed on any byte source and sink
//! and suspend when the stream runs dry or the sink is full.
//! Whole files, with their [file meta group][meta],
//! are handled by [`FileFormat`].
//!
//! # Examples
//!
//! Read a file and fetch some attributes:
//!
//! ```no_run
//! use dcmio_dictionary_std::tags;
//! use dcmio_object::open_file;
//! # fn foo() -> Result<(), Box<dyn std::error::Error>> {
//! let file = open_file("0001.dcm")?;
//!
//! let patient_name = file.dataset().element(tags::PATIENT_NAME)?.to_str()?;
//! # Ok(())
//! # }
//! ```
//!
//! Build a data set and save it in a new file
//! in a chosen transfer syntax,
//! letting the file meta group be generated:
//!
//! ```no_run
//! # fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use dcmio_core::VR;
//! use dcmio_dictionary_std::tags;
//! use dcmio_object::{FileFormat, Item, SaveFileOptions};
//! use dcmio_transfer_syntax_registry::entries::EXPLICIT_VR_LITTLE_ENDIAN;
//!
//! let mut dataset = Item::new();
//! dataset.put_str(tags::PATIENT_NAME, VR::PN, "Doe^John");
//!
//! let mut file = FileFormat::new(dataset, &EXPLICIT_VR_LITTLE_ENDIAN);
//! file.save_file("0001_new.dcm", &SaveFileOptions::new())?;
//! # Ok(())
//! # }
//! ```
//!
//! Data sets can be written without the file format as well:
//!
//! ```
//! # use dcmio_object::Item;
//! # use dcmio_core::VR;
//! # fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use dcmio_core::stream::BufferSink;
//! use dcmio_object::write::write_dataset;
//! use dcmio_parser::WriteOptions;
//! use dcmio_transfer_syntax_registry::entries::IMPLICIT_VR_LITTLE_ENDIAN;
//!
//! let mut dataset = Item::new();
//! dataset.put_str(dcmio_core::Tag(0x0010, 0x0010), VR::PN, "Doe^John");
//!
//! let mut sink = BufferSink::unbounded();
//! write_dataset(&mut sink, &dataset, &IMPLICIT_VR_LITTLE_ENDIAN, WriteOptions::new())?;
//! assert_eq!(sink.bytes().len(), 16);
//! # Ok(())
//! # }
//! # run().unwrap();
//! ```
pub mod file;
pub mod mem;
pub mod meta;
pub mod pixeldata;
pub mod read;
pub mod validate;
pub mod write;

pub use crate::file::{open_file, FileFormat, OpenFileOptions, ReadMode, ReadPreamble, SaveFileOptions};
pub use crate::mem::{DataElement, Item, PixelFragmentSequence, Sequence, Value};
pub use crate::meta::{FileMetaTable, WriteMode};
pub use crate::read::DatasetReader;
pub use crate::write::DatasetWriter;
pub use dcmio_core::Tag;
pub use dcmio_parser::dataset::{EncodingType, GroupLength, Padding, ReadOptions, WriteOptions};

use snafu::{Backtrace, Snafu};
use std::path::PathBuf;

/// The implementation class UID written to the file meta group.
pub const IMPLEMENTATION_CLASS_UID: &str = "2.25.287931514924196306617014960284851302547";

/// The implementation version name written to the file meta group.
pub const IMPLEMENTATION_VERSION_NAME: &str = "DCMIO_030";

/// The SOP class UID recorded for data sets
/// which do not declare one of their own.
pub const PRIVATE_GENERIC_FILE_SOP_CLASS_UID: &str =
    "2.25.199435817309726351003484766158395472981";

/// The state of a data set reader or writer.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
pub enum TransferState {
    /// Created but not yet initialized.
    NotInitialized,
    /// Initialized, nothing transferred yet.
    Init,
    /// Part of the data set was transferred.
    InWork,
    /// The whole data set was transferred.
    Ready,
}

/// An error which may occur when loading a file.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ReadError {
    #[snafu(display("Could not open file '{}'", filename.display()))]
    OpenFile {
        filename: PathBuf,
        backtrace: Backtrace,
        source: std::io::Error,
    },
    #[snafu(display("Could not read from file '{}'", filename.display()))]
    ReadFile {
        filename: PathBuf,
        backtrace: Backtrace,
        source: std::io::Error,
    },
    /// Could not read preamble bytes
    ReadPreambleBytes {
        backtrace: Backtrace,
        source: std::io::Error,
    },
    #[snafu(display("Not a DICOM file: magic code not found after the preamble"))]
    NotDicom { backtrace: Backtrace },
    #[snafu(display("Could not parse meta group data set"))]
    ParseMetaDataSet {
        #[snafu(backtrace)]
        source: crate::meta::Error,
    },
    #[snafu(display("Unsupported transfer syntax `{}`", uid))]
    ReadUnsupportedTransferSyntax { uid: String, backtrace: Backtrace },
    #[snafu(display("Could not detect the transfer syntax of the data set"))]
    UndetectableTransferSyntax { backtrace: Backtrace },
    #[snafu(display("Could not inflate data set"))]
    Inflate {
        backtrace: Backtrace,
        source: std::io::Error,
    },
    #[snafu(display("Could not read data set"))]
    ReadDataSet {
        #[snafu(backtrace)]
        source: crate::read::Error,
    },
    #[snafu(display("Premature data set end"))]
    PrematureEnd { backtrace: Backtrace },
}

/// An error which may occur when saving a file.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum WriteError {
    #[snafu(display("Could not create file in '{}'", filename.display()))]
    CreateFile {
        filename: PathBuf,
        backtrace: Backtrace,
        source: std::io::Error,
    },
    #[snafu(display("Could not write to file '{}'", filename.display()))]
    WriteFile {
        filename: PathBuf,
        backtrace: Backtrace,
        source: std::io::Error,
    },
    #[snafu(display("Could not write object preamble"))]
    WritePreamble {
        backtrace: Backtrace,
        source: std::io::Error,
    },
    #[snafu(display("Could not write magic code"))]
    WriteMagicCode {
        backtrace: Backtrace,
        source: std::io::Error,
    },
    #[snafu(display("Invalid write options"))]
    InvalidOptions {
        #[snafu(backtrace)]
        source: dcmio_parser::dataset::write::Error,
    },
    #[snafu(display("Could not load data set values"))]
    LoadValues {
        #[snafu(backtrace)]
        source: crate::mem::Error,
    },
    #[snafu(display(
        "Pixel data in `{}` cannot be written as `{}` without changing its representation",
        from,
        to
    ))]
    CannotChangeRepresentation {
        from: &'static str,
        to: &'static str,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not print meta group data set"))]
    PrintMetaDataSet {
        #[snafu(backtrace)]
        source: crate::meta::Error,
    },
    #[snafu(display("Could not print data set"))]
    PrintDataSet {
        #[snafu(backtrace)]
        source: crate::write::Error,
    },
    #[snafu(display("Could not deflate data set"))]
    Deflate {
        backtrace: Backtrace,
        source: std::io::Error,
    },
}
