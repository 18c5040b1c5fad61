//! This crate implements the standard DICOM data dictionary and constants.
//!
//! ## Run-time dictionary
//!
//! - [`data_element`]: information about the DICOM attributes,
//!   used to resolve the value representation of elements
//!   read in an implicit VR transfer syntax.
//!   The built-in entries can be extended with dictionary files
//!   listed in the `DCMDICTPATH` environment variable.
//!   Attributes missing from the dictionary resolve to `UN`.
//!
//! The dictionary is provided as a singleton
//! behind the unit type [`StandardDataDictionary`].
//!
//! ## Constants
//!
//! - [`tags`], which map an attribute alias to a DICOM tag
pub mod data_element;
pub mod tags;

pub use data_element::{StandardDataDictionary, StandardDataDictionaryRegistry};
