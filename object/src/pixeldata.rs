//! Moving pixel data between native and encapsulated representations.
use crate::mem::{self, DataElement, Item, Value};
use byteordered::Endianness;
use dcmio_core::{Tag, ValueStorage, VR};
use dcmio_dictionary_std::tags;
use dcmio_encoding::adapters::{EncodeOptions, PixelParams, RawPixelData};
use dcmio_encoding::TransferSyntax;
use dcmio_transfer_syntax_registry::{self as registry, CodecRegistry};
use snafu::{Backtrace, ResultExt, Snafu};
use tracing::debug;

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// The pixel data cannot be converted to the requested representation.
    #[snafu(display("Cannot change pixel data representation from `{}` to `{}`", from, to))]
    CannotChangeRepresentation {
        from: &'static str,
        to: &'static str,
        #[snafu(backtrace)]
        source: registry::Error,
    },
    /// An image attribute needed by the codec is missing or invalid.
    #[snafu(display("Missing or invalid image attribute {}", tag))]
    ImageAttribute {
        tag: Tag,
        #[snafu(backtrace)]
        source: mem::Error,
    },
    /// The pixel data element could not be read.
    #[snafu(display("Could not read pixel data"))]
    ReadPixelData {
        #[snafu(backtrace)]
        source: dcmio_core::storage::Error,
    },
    /// Deferred values could not be loaded before the conversion.
    #[snafu(display("Could not load pixel data"))]
    LoadPixelData {
        #[snafu(backtrace)]
        source: mem::Error,
    },
    /// Pixel data with undefined length in a native transfer syntax.
    #[snafu(display("Encapsulated pixel data found where native pixel data was expected"))]
    UnexpectedEncapsulation { backtrace: Backtrace },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Gather the image attributes which pixel data codecs need.
pub fn pixel_params(dataset: &Item) -> Result<PixelParams> {
    let uint16 = |tag: Tag| {
        dataset
            .element(tag)
            .and_then(DataElement::uint16)
            .context(ImageAttributeSnafu { tag })
    };
    let samples_per_pixel = match dataset.get(tags::SAMPLES_PER_PIXEL) {
        Some(_) => uint16(tags::SAMPLES_PER_PIXEL)?,
        None => 1,
    };
    let number_of_frames = match dataset.get(tags::NUMBER_OF_FRAMES) {
        Some(e) => e.to_parsed::<u32>().context(ImageAttributeSnafu {
            tag: tags::NUMBER_OF_FRAMES,
        })?,
        None => 1,
    };
    Ok(PixelParams {
        rows: uint16(tags::ROWS)?,
        columns: uint16(tags::COLUMNS)?,
        samples_per_pixel,
        bits_allocated: uint16(tags::BITS_ALLOCATED)?,
        number_of_frames,
    })
}

/// Convert the pixel data of a data set
/// from the representation of transfer syntax `current`
/// to the representation of transfer syntax `target`.
///
/// Native pixel data needs no conversion between native transfer syntaxes.
/// Any other conversion requires codecs for the encapsulated
/// transfer syntaxes involved.
/// Data sets without pixel data are left untouched.
pub fn choose_representation(
    dataset: &mut Item,
    current: &TransferSyntax,
    target: &TransferSyntax,
    codecs: &CodecRegistry,
) -> Result<()> {
    let encapsulated = match dataset.get(tags::PIXEL_DATA).map(DataElement::value) {
        None => return Ok(()),
        Some(Value::PixelSequence(_)) => true,
        Some(_) => false,
    };
    let to_encapsulated = target.is_encapsulated_pixel_data();
    if encapsulated == to_encapsulated && (!encapsulated || current.uid() == target.uid()) {
        return Ok(());
    }
    let params = pixel_params(dataset)?;

    let native = if encapsulated {
        let raw = match dataset.get(tags::PIXEL_DATA).map(DataElement::value) {
            Some(Value::PixelSequence(px)) => RawPixelData {
                offset_table: px.offset_table().to_vec(),
                fragments: px.fragments().to_vec(),
            },
            _ => return UnexpectedEncapsulationSnafu.fail(),
        };
        debug!("Decoding pixel data from {}", current.name());
        codecs
            .decode(current.uid(), &raw, &params)
            .context(CannotChangeRepresentationSnafu {
                from: current.name(),
                to: target.name(),
            })?
    } else {
        match dataset.get(tags::PIXEL_DATA).map(DataElement::value) {
            Some(Value::Primitive(v)) => v
                .to_bytes(Endianness::Little)
                .context(ReadPixelDataSnafu)?
                .into_owned(),
            _ => return UnexpectedEncapsulationSnafu.fail(),
        }
    };

    let element = if to_encapsulated {
        debug!("Encoding pixel data to {}", target.name());
        let raw = codecs
            .encode(target.uid(), &native, &params, &EncodeOptions::new())
            .context(CannotChangeRepresentationSnafu {
                from: current.name(),
                to: target.name(),
            })?;
        DataElement::new_pixel_sequence(raw.offset_table, raw.fragments)
    } else {
        let vr = if params.bits_allocated > 8 { VR::OW } else { VR::OB };
        let mut value = ValueStorage::from_bytes(native, Endianness::Little, vr);
        value.normalize(vr);
        DataElement::new(tags::PIXEL_DATA, vr, Value::Primitive(value))
    };
    dataset.put(element);
    Ok(())
}
