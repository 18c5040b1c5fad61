//! Interpretation of DICOM data sets as streams of tokens.
//!
//! A [`DataSetReader`] turns bytes from a byte source into tokens,
//! and a [`DataSetWriter`] turns tokens back into bytes for a byte sink.
//! Both can be suspended when the source or the sink is not ready,
//! and resumed later without losing their place.
use dcmio_core::header::{DataElementHeader, Length};
use dcmio_core::{Tag, ValueStorage};
use std::fmt;

pub mod read;
pub mod write;

pub use self::read::{DataSetReader, ReadOptions};
pub use self::write::{DataSetWriter, WriteCache, WriteOptions};

/// A token of a DICOM data set stream. This is part of the interpretation of a
/// data set as a stream of symbols, which may either represent data headers or
/// actual value data.
#[derive(Debug, Clone)]
pub enum DataToken {
    /// A data header of a primitive value.
    ElementHeader(DataElementHeader),
    /// The beginning of a sequence element.
    SequenceStart { tag: Tag, len: Length },
    /// The beginning of an encapsulated pixel data element.
    PixelSequenceStart,
    /// The ending delimiter of a sequence or encapsulated pixel data.
    SequenceEnd,
    /// The beginning of a new item in the sequence.
    ItemStart { len: Length },
    /// The ending delimiter of an item.
    ItemEnd,
    /// A primitive data element value.
    PrimitiveValue(ValueStorage),
    /// An item value in encapsulated pixel data (a fragment).
    ItemValue(Vec<u8>),
    /// The basic offset table of encapsulated pixel data.
    OffsetTable(Vec<u32>),
}

impl fmt::Display for DataToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DataToken::PrimitiveValue(v) => write!(f, "PrimitiveValue({} bytes)", v.length()),
            DataToken::ItemValue(v) => write!(f, "ItemValue({} bytes)", v.len()),
            other => write!(f, "{:?}", other),
        }
    }
}

/// This implementation treats undefined lengths as equal.
impl PartialEq<Self> for DataToken {
    fn eq(&self, other: &Self) -> bool {
        use DataToken::*;
        match (self, other) {
            (
                ElementHeader(DataElementHeader {
                    tag: tag1,
                    vr: vr1,
                    len: len1,
                }),
                ElementHeader(DataElementHeader {
                    tag: tag2,
                    vr: vr2,
                    len: len2,
                }),
            ) => tag1 == tag2 && vr1 == vr2 && len1.inner_eq(*len2),
            (
                SequenceStart {
                    tag: tag1,
                    len: len1,
                },
                SequenceStart {
                    tag: tag2,
                    len: len2,
                },
            ) => tag1 == tag2 && len1.inner_eq(*len2),
            (ItemStart { len: len1 }, ItemStart { len: len2 }) => len1.inner_eq(*len2),
            (PrimitiveValue(v1), PrimitiveValue(v2)) => v1 == v2,
            (ItemValue(v1), ItemValue(v2)) => v1 == v2,
            (OffsetTable(v1), OffsetTable(v2)) => v1 == v2,
            (ItemEnd, ItemEnd)
            | (SequenceEnd, SequenceEnd)
            | (PixelSequenceStart, PixelSequenceStart) => true,
            _ => false,
        }
    }
}

/// The type of delimiter: sequence or item.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SeqTokenType {
    Sequence,
    Item,
}

/// The outcome of asking a reader for the next token.
#[derive(Debug, Clone, PartialEq)]
pub enum Next {
    /// The next token of the data set.
    Token(DataToken),
    /// The source has no more bytes for now.
    /// Feed it and ask again.
    Suspended,
    /// The data set is complete.
    End,
}

/// Policy for group length elements `(gggg,0000)`.
#[derive(Debug, Default, Copy, Clone, Eq, Hash, PartialEq)]
pub enum GroupLength {
    /// Keep group length elements as they are.
    #[default]
    NoChange,
    /// Write a group length element for every group,
    /// with a recalculated value.
    WithGroupLength,
    /// Remove all group length elements.
    WithoutGroupLength,
    /// Recalculate the group length elements which exist,
    /// without adding new ones.
    Recalculate,
}

impl GroupLength {
    /// Whether group length elements are dropped while reading.
    #[inline]
    pub fn drops_on_read(self) -> bool {
        matches!(self, GroupLength::WithoutGroupLength | GroupLength::Recalculate)
    }
}

/// Policy for the trailing padding element `(FFFC,FFFC)`.
#[derive(Debug, Default, Copy, Clone, Eq, Hash, PartialEq)]
pub enum Padding {
    /// Keep existing padding elements as they are.
    #[default]
    NoChange,
    /// Add or resize padding elements so that the data set
    /// (and each sequence item) ends at a multiple of the padding length.
    WithPadding,
    /// Remove all padding elements.
    WithoutPadding,
}

/// How sequences and items are delimited when written.
#[derive(Debug, Default, Copy, Clone, Eq, Hash, PartialEq)]
pub enum EncodingType {
    /// Sequences and items declare their length in bytes.
    #[default]
    ExplicitLength,
    /// Sequences and items have an undefined length
    /// and end with a delimitation item.
    UndefinedLength,
}
