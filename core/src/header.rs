//! Data element headers and their parts:
//! the attribute tag, the value representation and the value length.

use snafu::{Backtrace, Snafu};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;
use std::str::{from_utf8, FromStr};

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum SequenceItemHeaderError {
    /// The tag is not one of the item or delimiter tags of group FFFE.
    #[snafu(display("Tag {} is not an item or delimiter tag", tag))]
    UnexpectedTag { tag: Tag, backtrace: Backtrace },
    #[snafu(display("Item delimiter with non-zero length {}", len))]
    UnexpectedDelimiterLength { len: Length, backtrace: Backtrace },
}

type Result<T, E = SequenceItemHeaderError> = std::result::Result<T, E>;

/// Anything with a declared value length.
pub trait HasLength {
    fn length(&self) -> Length;

    /// Whether the declared length is zero.
    /// An undefined length is not empty.
    fn is_empty(&self) -> bool {
        self.length() == Length(0)
    }
}

/// Anything which starts with a tag.
pub trait Header: HasLength {
    fn tag(&self) -> Tag;

    fn is_item(&self) -> bool {
        self.tag() == Tag::ITEM
    }
}

/// The header of a data element as found in the stream.
///
/// In implicit VR transfer syntaxes the `vr`
/// was resolved from the data dictionary.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct DataElementHeader {
    pub tag: Tag,
    pub vr: VR,
    pub len: Length,
}

impl DataElementHeader {
    #[inline]
    pub fn new<T: Into<Tag>>(tag: T, vr: VR, len: Length) -> Self {
        DataElementHeader {
            tag: tag.into(),
            vr,
            len,
        }
    }

    #[inline]
    pub fn vr(&self) -> VR {
        self.vr
    }
}

impl HasLength for DataElementHeader {
    #[inline]
    fn length(&self) -> Length {
        self.len
    }
}

impl Header for DataElementHeader {
    #[inline]
    fn tag(&self) -> Tag {
        self.tag
    }
}

/// One of the three headers of group FFFE
/// which structure sequences and encapsulated pixel data.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SequenceItemHeader {
    /// Start of an item, or of a pixel data fragment.
    Item {
        /// may be undefined for items inside sequences
        len: Length,
    },
    /// End of an item with undefined length.
    ItemDelimiter,
    /// End of a sequence with undefined length.
    SequenceDelimiter,
}

impl SequenceItemHeader {
    /// Interpret a raw tag and length read from group FFFE.
    ///
    /// Fails for any other tag,
    /// and for an item delimiter with a non-zero length.
    pub fn new<T: Into<Tag>>(tag: T, len: Length) -> Result<SequenceItemHeader> {
        let tag = tag.into();
        match tag {
            Tag::ITEM => Ok(SequenceItemHeader::Item { len }),
            Tag::ITEM_DELIMITER if len.0 == 0 => Ok(SequenceItemHeader::ItemDelimiter),
            Tag::ITEM_DELIMITER => UnexpectedDelimiterLengthSnafu { len }.fail(),
            Tag::SEQUENCE_DELIMITER => Ok(SequenceItemHeader::SequenceDelimiter),
            _ => UnexpectedTagSnafu { tag }.fail(),
        }
    }
}

impl HasLength for SequenceItemHeader {
    #[inline]
    fn length(&self) -> Length {
        match *self {
            SequenceItemHeader::Item { len } => len,
            SequenceItemHeader::ItemDelimiter | SequenceItemHeader::SequenceDelimiter => Length(0),
        }
    }
}

impl Header for SequenceItemHeader {
    #[inline]
    fn tag(&self) -> Tag {
        match *self {
            SequenceItemHeader::Item { .. } => Tag::ITEM,
            SequenceItemHeader::ItemDelimiter => Tag::ITEM_DELIMITER,
            SequenceItemHeader::SequenceDelimiter => Tag::SEQUENCE_DELIMITER,
        }
    }
}

macro_rules! value_representations {
    ($($vr:ident => $name:literal,)*) => {
        /// An enum type for a DICOM value representation.
        #[derive(Debug, Eq, PartialEq, Hash, Copy, Clone, Ord, PartialOrd)]
        pub enum VR {
            $(
                #[doc = $name]
                $vr,
            )*
        }

        impl VR {
            /// The two letter code.
            pub fn to_string(self) -> &'static str {
                match self {
                    $(VR::$vr => stringify!($vr),)*
                }
            }
        }

        /// Parses the two letter code, in upper case.
        impl FromStr for VR {
            type Err = &'static str;

            fn from_str(string: &str) -> std::result::Result<Self, Self::Err> {
                match string {
                    $(stringify!($vr) => Ok(VR::$vr),)*
                    _ => Err("no such value representation"),
                }
            }
        }
    };
}

value_representations! {
    AE => "Application Entity",
    AS => "Age String",
    AT => "Attribute Tag",
    CS => "Code String",
    DA => "Date",
    DS => "Decimal String",
    DT => "Date Time",
    FL => "Floating Point Single",
    FD => "Floating Point Double",
    IS => "Integer String",
    LO => "Long String",
    LT => "Long Text",
    OB => "Other Byte",
    OD => "Other Double",
    OF => "Other Float",
    OL => "Other Long",
    OV => "Other Very Long",
    OW => "Other Word",
    PN => "Person Name",
    SH => "Short String",
    SL => "Signed Long",
    SQ => "Sequence of Items",
    SS => "Signed Short",
    ST => "Short Text",
    SV => "Signed Very Long",
    TM => "Time",
    UC => "Unlimited Characters",
    UI => "Unique Identifier",
    UL => "Unsigned Long",
    UN => "Unknown",
    UR => "Universal Resource Identifier",
    US => "Unsigned Short",
    UT => "Unlimited Text",
    UV => "Unsigned Very Long",
}

/// How the bytes of a value are grouped into numbers,
/// which determines how they are swapped between byte orders.
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone)]
pub enum ValueWidth {
    /// Character data or opaque bytes, never swapped.
    Bytes,
    /// 16-bit words
    Word,
    /// 32-bit words
    DoubleWord,
    /// 64-bit words
    QuadWord,
}

impl ValueWidth {
    /// The number of bytes in each swappable unit.
    pub fn size(self) -> usize {
        match self {
            ValueWidth::Bytes => 1,
            ValueWidth::Word => 2,
            ValueWidth::DoubleWord => 4,
            ValueWidth::QuadWord => 8,
        }
    }
}

impl VR {
    /// Read the VR field of an explicit VR header.
    /// Returns `None` for anything but a known two letter code.
    pub fn from_binary(code: [u8; 2]) -> Option<Self> {
        from_utf8(&code).ok()?.parse().ok()
    }

    /// The VR field of an explicit VR header.
    pub fn to_bytes(self) -> [u8; 2] {
        match self.to_string().as_bytes() {
            &[a, b] => [a, b],
            _ => unreachable!("VR codes have two letters"),
        }
    }

    /// The width of each number in a value of this representation.
    pub fn value_width(self) -> ValueWidth {
        use VR::*;
        match self {
            AT | OW | SS | US => ValueWidth::Word,
            FL | OF | OL | SL | UL => ValueWidth::DoubleWord,
            FD | OD | OV | SV | UV => ValueWidth::QuadWord,
            _ => ValueWidth::Bytes,
        }
    }

    /// Whether the value length of this representation is encoded
    /// in a 2-byte field under explicit VR transfer syntaxes.
    /// All other representations use 2 reserved bytes
    /// followed by a 4-byte length field.
    pub fn has_short_length(self) -> bool {
        use VR::*;
        matches!(
            self,
            AE | AS | AT | CS | DA | DS | DT | FL | FD | IS | LO | LT | PN | SH | SL | SS | ST
                | TM | UI | UL | US
        )
    }

    /// Whether values of this representation are character strings.
    pub fn is_string(self) -> bool {
        use VR::*;
        matches!(
            self,
            AE | AS | CS | DA | DS | DT | IS | LO | LT | PN | SH | ST | TM | UC | UI | UR | UT
        )
    }

    /// The byte used to pad values of this representation to an even length.
    pub fn padding(self) -> u8 {
        if self.is_string() && self != VR::UI {
            b' '
        } else {
            0
        }
    }

    /// The maximum number of bytes of a single value,
    /// for string representations with a defined limit.
    pub fn max_value_length(self) -> Option<usize> {
        use VR::*;
        match self {
            AE => Some(16),
            AS => Some(4),
            CS => Some(16),
            DA => Some(8),
            DS => Some(16),
            DT => Some(26),
            IS => Some(12),
            LO => Some(64),
            LT => Some(10240),
            PN => Some(64 * 3 + 2),
            SH => Some(16),
            ST => Some(1024),
            TM => Some(14),
            UI => Some(64),
            _ => None,
        }
    }
}

impl fmt::Display for VR {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(VR::to_string(*self))
    }
}

/// A data element tag: group number and element number.
///
/// Tags order by group first, then by element,
/// which is the order of elements in an encoded data set.
#[derive(PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Copy)]
pub struct Tag(pub u16, pub u16);

impl Tag {
    pub const ITEM: Tag = Tag(0xFFFE, 0xE000);
    pub const ITEM_DELIMITER: Tag = Tag(0xFFFE, 0xE00D);
    pub const SEQUENCE_DELIMITER: Tag = Tag(0xFFFE, 0xE0DD);
    pub const PIXEL_DATA: Tag = Tag(0x7FE0, 0x0010);
    /// Data Set Trailing Padding
    pub const DATASET_TRAILING_PADDING: Tag = Tag(0xFFFC, 0xFFFC);

    #[inline]
    pub fn group(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn element(self) -> u16 {
        self.1
    }

    /// `(gggg,0000)`
    #[inline]
    pub fn is_group_length(self) -> bool {
        self.1 == 0
    }

    /// Odd groups are private.
    #[inline]
    pub fn is_private(self) -> bool {
        self.0 % 2 == 1
    }

    /// Items and delimiters, which never carry a VR.
    #[inline]
    pub fn is_delimitation(self) -> bool {
        self.0 == 0xFFFE
    }

    #[inline]
    pub fn group_length_tag(self) -> Tag {
        Tag(self.0, 0)
    }
}

impl From<(u16, u16)> for Tag {
    #[inline]
    fn from((group, element): (u16, u16)) -> Tag {
        Tag(group, element)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tag({:#06X}, {:#06X})", self.0, self.1)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({:04X},{:04X})", self.0, self.1)
    }
}

/// The value length of an element or item, in bytes.
///
/// `0xFFFF_FFFF` stands for an undefined length,
/// which is only known after reading up to the matching delimiter.
/// An undefined length compares unequal and unordered
/// to every length, itself included.
///
/// ```
/// # use dcmio_core::Length;
/// assert_ne!(Length::UNDEFINED, Length::UNDEFINED);
/// assert!(Length(16) < Length(64));
/// assert!(Length::UNDEFINED.partial_cmp(&Length(64)).is_none());
/// assert!((Length(64) + Length::UNDEFINED).is_undefined());
/// ```
#[derive(Clone, Copy)]
pub struct Length(pub u32);

const UNDEFINED: u32 = 0xFFFF_FFFF;

impl Length {
    pub const UNDEFINED: Self = Length(UNDEFINED);

    #[inline]
    pub fn is_undefined(self) -> bool {
        self.0 == UNDEFINED
    }

    #[inline]
    pub fn is_defined(self) -> bool {
        self.0 != UNDEFINED
    }

    /// The number of bytes, unless undefined.
    #[inline]
    pub fn get(self) -> Option<u32> {
        Some(self.0).filter(|&len| len != UNDEFINED)
    }

    /// Compare the raw values,
    /// so that two undefined lengths are equal.
    #[inline]
    pub fn inner_eq(self, other: Length) -> bool {
        self.0 == other.0
    }
}

impl PartialEq for Length {
    fn eq(&self, other: &Length) -> bool {
        self.is_defined() && self.0 == other.0
    }
}

impl PartialOrd for Length {
    fn partial_cmp(&self, other: &Length) -> Option<Ordering> {
        match (self.get(), other.get()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => None,
        }
    }
}

impl Add for Length {
    type Output = Length;

    fn add(self, other: Length) -> Length {
        match (self.get(), other.get()) {
            (Some(a), Some(b)) => {
                let sum = a + b;
                debug_assert_ne!(sum, UNDEFINED, "length overflow");
                Length(sum)
            }
            _ => Length::UNDEFINED,
        }
    }
}

impl fmt::Debug for Length {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.get() {
            Some(len) => write!(f, "Length({})", len),
            None => f.write_str("Length(Undefined)"),
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.get() {
            Some(len) => write!(f, "{}", len),
            None => f.write_str("U/L"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_parts() {
        let tag = Tag::from((0x0010, 0x0020));
        assert_eq!((tag.group(), tag.element()), (0x0010, 0x0020));
        assert!(Tag(0x0010, 0x0000).is_group_length());
        assert!(Tag::ITEM_DELIMITER.is_delimitation());
    }

    #[test]
    fn tag_display_and_order() {
        assert_eq!(Tag(0x0028, 0x0002).to_string(), "(0028,0002)");
        assert_eq!(format!("{:?}", Tag(0x7FE0, 0x0010)), "Tag(0x7FE0, 0x0010)");
        assert!(Tag(0x0008, 0xFFFF) < Tag(0x0010, 0x0000));
        assert!(Tag(0x0010, 0x0010) < Tag(0x0010, 0x0020));
        assert!(Tag(0x0009, 0x0010).is_private());
        assert_eq!(Tag(0x0028, 0x0002).group_length_tag(), Tag(0x0028, 0x0000));
    }

    #[test]
    fn vr_properties() {
        assert_eq!(VR::from_binary(*b"PN"), Some(VR::PN));
        assert_eq!(VR::from_binary(*b"pn"), None);
        assert_eq!(VR::OW.to_bytes(), *b"OW");

        assert!(VR::US.has_short_length());
        assert!(!VR::OB.has_short_length());
        assert!(!VR::SQ.has_short_length());
        assert!(!VR::UT.has_short_length());

        assert_eq!(VR::PN.padding(), b' ');
        assert_eq!(VR::UI.padding(), 0);
        assert_eq!(VR::OB.padding(), 0);

        assert_eq!(VR::US.value_width(), ValueWidth::Word);
        assert_eq!(VR::FL.value_width(), ValueWidth::DoubleWord);
        assert_eq!(VR::FD.value_width().size(), 8);
        assert_eq!(VR::OB.value_width().size(), 1);
    }

    #[test]
    fn sequence_item_headers() {
        assert_eq!(
            SequenceItemHeader::new(Tag::ITEM, Length::UNDEFINED).unwrap().tag(),
            Tag::ITEM
        );
        assert_eq!(
            SequenceItemHeader::new(Tag::SEQUENCE_DELIMITER, Length(0)).unwrap(),
            SequenceItemHeader::SequenceDelimiter
        );
        assert!(matches!(
            SequenceItemHeader::new(Tag::ITEM_DELIMITER, Length(4)),
            Err(SequenceItemHeaderError::UnexpectedDelimiterLength { .. })
        ));
        assert!(matches!(
            SequenceItemHeader::new(Tag(0x0010, 0x0010), Length(4)),
            Err(SequenceItemHeaderError::UnexpectedTag { .. })
        ));
    }

    #[test]
    fn length_arithmetic() {
        assert_eq!(Length(8) + Length(2), Length(10));
        assert!((Length(8) + Length::UNDEFINED).is_undefined());
        assert!(Length::UNDEFINED.inner_eq(Length::UNDEFINED));
        assert_eq!(Length::UNDEFINED.get(), None);
        assert_eq!(Length(6).get(), Some(6));
        assert_eq!(Length::UNDEFINED.to_string(), "U/L");
        assert_eq!(format!("{:?}", Length(4)), "Length(4)");
    }
}
