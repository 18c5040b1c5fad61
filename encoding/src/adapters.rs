//! Core module for building pixel data codecs.
//!
//! Transfer syntaxes with encapsulated pixel data
//! need a [`PixelDataCodec`] to move pixel data
//! between its native and its encapsulated representation.
//! Codecs are kept in a codec registry
//! and looked up by transfer syntax UID.

use snafu::Snafu;
use std::fmt;

/// The possible error conditions when decoding (reading) pixel data.
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub), module)]
pub enum DecodeError {
    /// The codec failed for a reason of its own.
    #[snafu(whatever, display("{}", message))]
    Custom {
        /// The error message.
        message: String,
        /// The underlying error cause, if any.
        #[snafu(source(from(Box<dyn std::error::Error + Send + Sync + 'static>, Some)))]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },

    /// The input pixel data is not encapsulated.
    NotEncapsulated,

    /// The number of fragments does not match the number of frames.
    #[snafu(display("Expected {} fragments, found {}", expected, found))]
    FragmentCount { expected: u32, found: usize },

    /// The image parameters are missing or inconsistent.
    #[snafu(display("Invalid image parameter `{}`", name))]
    InvalidParameter { name: &'static str },
}

/// The possible error conditions when encoding (writing) pixel data.
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub), module)]
pub enum EncodeError {
    /// The codec failed for a reason of its own.
    #[snafu(whatever, display("{}", message))]
    Custom {
        /// The error message.
        message: String,
        /// The underlying error cause, if any.
        #[snafu(source(from(Box<dyn std::error::Error + Send + Sync + 'static>, Some)))]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },

    /// Input pixel data is not native, should be decoded first.
    NotNative,

    /// The native pixel data is shorter than the image parameters demand.
    #[snafu(display("Expected {} bytes of pixel data, found {}", expected, found))]
    NotEnoughData { expected: usize, found: usize },

    /// The image parameters are missing or inconsistent.
    #[snafu(display("Invalid image parameter `{}`", name))]
    InvalidParameter { name: &'static str },
}

/// The result of decoding (reading) pixel data
pub type DecodeResult<T, E = DecodeError> = Result<T, E>;

/// The result of encoding (writing) pixel data
pub type EncodeResult<T, E = EncodeError> = Result<T, E>;

/// Pixel data in encapsulated form.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawPixelData {
    /// The basic offset table of the fragments,
    /// or empty if there is none
    pub offset_table: Vec<u32>,

    /// The byte fragments, one per frame
    pub fragments: Vec<Vec<u8>>,
}

/// The image attributes which a pixel data codec needs.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PixelParams {
    /// Rows (0028,0010)
    pub rows: u16,
    /// Columns (0028,0011)
    pub columns: u16,
    /// Samples per Pixel (0028,0002)
    pub samples_per_pixel: u16,
    /// Bits Allocated (0028,0100)
    pub bits_allocated: u16,
    /// Number of Frames (0028,0008), 1 if absent
    pub number_of_frames: u32,
}

impl PixelParams {
    /// The number of bytes of a single native frame.
    pub fn frame_size(&self) -> usize {
        usize::from(self.rows)
            * usize::from(self.columns)
            * usize::from(self.samples_per_pixel)
            * usize::from(self.bits_allocated / 8)
    }
}

/// Options for encoding pixel data.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct EncodeOptions {
    /// The quality of the output image as a number between 0 and 100,
    /// for lossy codecs.
    pub quality: Option<u8>,
    /// The amount of effort that the encoder may take to encode the image
    /// as a number between 0 and 100.
    pub effort: Option<u8>,
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the requested quality.
    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality);
        self
    }

    /// Set the requested encoding effort.
    pub fn effort(mut self, effort: u8) -> Self {
        self.effort = Some(effort);
        self
    }
}

/// A transcoder of pixel data
/// between native and encapsulated representations.
///
/// Native pixel data is given and returned in little endian byte order.
pub trait PixelDataCodec: fmt::Debug + Send + Sync {
    /// Decode encapsulated pixel data into native pixel data.
    fn decode(&self, pixels: &RawPixelData, params: &PixelParams) -> DecodeResult<Vec<u8>>;

    /// Encode native pixel data into its encapsulated form.
    fn encode(
        &self,
        native: &[u8],
        params: &PixelParams,
        options: &EncodeOptions,
    ) -> EncodeResult<RawPixelData>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_size_of_rgb_and_mono() {
        let params = PixelParams {
            rows: 4,
            columns: 3,
            samples_per_pixel: 3,
            bits_allocated: 8,
            number_of_frames: 1,
        };
        assert_eq!(params.frame_size(), 36);
        let params = PixelParams {
            samples_per_pixel: 1,
            bits_allocated: 16,
            ..params
        };
        assert_eq!(params.frame_size(), 24);
    }
}
