//! Root module for pixel data codecs.
//!
//! - [`rle_lossless`](rle_lossless) provides native RLE Lossless
//!   decoding and encoding.
//!
//! Codecs for other encapsulated transfer syntaxes
//! can be implemented outside of this crate
//! and added to a [`CodecRegistry`](crate::CodecRegistry).
pub mod rle_lossless;
