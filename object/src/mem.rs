//! In-memory representation of DICOM data sets.
//!
//! An [`Item`] is an ordered collection of [`DataElement`]s,
//! unique by tag.
//! It serves both as the main data set of a file
//! and as the content of each sequence item.
//!
//! Besides element access,
//! this module computes encoded lengths
//! and brings a data set into shape before writing:
//! group length elements and trailing padding are added, updated or removed
//! here, according to the [`WriteOptions`] in use.
use crate::validate::{self, ValidationError};
use dcmio_core::header::{DataElementHeader, Length};
use dcmio_core::storage::{self, native_byte_order};
use dcmio_core::stream::{ByteSource, Progress};
use dcmio_core::{Tag, ValueStorage, VR};
use dcmio_encoding::encode::header_len;
use dcmio_encoding::TransferSyntax;
use dcmio_parser::dataset::write::writable_vr;
use dcmio_parser::dataset::{EncodingType, GroupLength, Padding, WriteOptions};
use snafu::{Backtrace, OptionExt, ResultExt, Snafu};
use std::borrow::Cow;
use std::convert::TryInto;
use std::iter::FromIterator;
use std::str::FromStr;
use tracing::{debug, trace};

/// An error which may occur when accessing elements of a data set.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("No such data element with tag {}", tag))]
    NoSuchDataElementTag { tag: Tag, backtrace: Backtrace },
    #[snafu(display("Element {} is not a primitive value", tag))]
    NotPrimitive { tag: Tag, backtrace: Backtrace },
    #[snafu(display("Could not load the value of {}", tag))]
    LoadValue {
        tag: Tag,
        #[snafu(backtrace)]
        source: storage::Error,
    },
    #[snafu(display("Value of {} is incomplete in its source", tag))]
    IncompleteValue { tag: Tag, backtrace: Backtrace },
    #[snafu(display("Could not convert value of {} {} to {}", tag, vr, target))]
    ConvertValue {
        tag: Tag,
        vr: VR,
        target: &'static str,
        backtrace: Backtrace,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The value of a data element.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The bytes of a primitive value.
    Primitive(ValueStorage),
    /// A sequence of items.
    Sequence(Sequence),
    /// Encapsulated pixel data.
    PixelSequence(PixelFragmentSequence),
}

impl Value {
    /// Obtain the primitive value storage, if this is a primitive value.
    pub fn primitive(&self) -> Option<&ValueStorage> {
        match self {
            Value::Primitive(v) => Some(v),
            _ => None,
        }
    }

    /// Obtain the sequence items, if this is a sequence.
    pub fn items(&self) -> Option<&[Item]> {
        match self {
            Value::Sequence(seq) => Some(seq.items()),
            _ => None,
        }
    }

    /// Obtain the encapsulated pixel data, if this is a pixel sequence.
    pub fn pixel_sequence(&self) -> Option<&PixelFragmentSequence> {
        match self {
            Value::PixelSequence(px) => Some(px),
            _ => None,
        }
    }
}

/// A sequence of items.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Sequence {
    items: Vec<Item>,
}

impl Sequence {
    pub fn new(items: Vec<Item>) -> Self {
        Sequence { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut Vec<Item> {
        &mut self.items
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The encoded length of the sequence value,
    /// including item headers and delimiters.
    pub fn calc_length(&self, ts: &TransferSyntax, enctype: EncodingType) -> u32 {
        let delimiter = match enctype {
            EncodingType::ExplicitLength => 0,
            EncodingType::UndefinedLength => 8,
        };
        self.items
            .iter()
            .map(|item| 8 + item.calc_length(ts, enctype) + delimiter)
            .sum::<u32>()
            + delimiter
    }
}

/// Encapsulated pixel data:
/// a basic offset table followed by a list of fragments.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PixelFragmentSequence {
    offset_table: Vec<u32>,
    fragments: Vec<Vec<u8>>,
}

impl PixelFragmentSequence {
    pub fn new(offset_table: Vec<u32>, fragments: Vec<Vec<u8>>) -> Self {
        PixelFragmentSequence {
            offset_table,
            fragments,
        }
    }

    pub fn offset_table(&self) -> &[u32] {
        &self.offset_table
    }

    pub fn fragments(&self) -> &[Vec<u8>] {
        &self.fragments
    }

    pub fn into_parts(self) -> (Vec<u32>, Vec<Vec<u8>>) {
        (self.offset_table, self.fragments)
    }

    /// The encoded length of the pixel sequence value,
    /// which is always delimited.
    pub fn calc_length(&self) -> u32 {
        8 + 4 * self.offset_table.len() as u32
            + self
                .fragments
                .iter()
                .map(|f| 8 + f.len() as u32)
                .sum::<u32>()
            + 8
    }
}

/// A data element: a tag, a value representation and a value.
#[derive(Debug, Clone, PartialEq)]
pub struct DataElement {
    tag: Tag,
    vr: VR,
    value: Value,
}

impl DataElement {
    pub fn new(tag: Tag, vr: VR, value: Value) -> Self {
        DataElement { tag, vr, value }
    }

    /// Create a primitive element from bytes in the native byte order.
    /// Odd-length values are padded.
    pub fn from_bytes(tag: Tag, vr: VR, bytes: Vec<u8>) -> Self {
        DataElement::new(tag, vr, Value::Primitive(ValueStorage::from_value(bytes, vr)))
    }

    /// Create a primitive element holding text,
    /// padded with the padding character of `vr` if needed.
    pub fn from_str(tag: Tag, vr: VR, text: &str) -> Self {
        DataElement::from_bytes(tag, vr, text.as_bytes().to_vec())
    }

    /// Create a primitive element holding unsigned 16-bit integers.
    pub fn from_u16(tag: Tag, vr: VR, values: &[u16]) -> Self {
        let bytes = values.iter().flat_map(|v| v.to_ne_bytes()).collect();
        DataElement::from_bytes(tag, vr, bytes)
    }

    /// Create a primitive element holding unsigned 32-bit integers.
    pub fn from_u32(tag: Tag, vr: VR, values: &[u32]) -> Self {
        let bytes = values.iter().flat_map(|v| v.to_ne_bytes()).collect();
        DataElement::from_bytes(tag, vr, bytes)
    }

    /// Create a sequence element.
    pub fn new_sequence(tag: Tag, items: Vec<Item>) -> Self {
        DataElement::new(tag, VR::SQ, Value::Sequence(Sequence::new(items)))
    }

    /// Create an encapsulated pixel data element.
    pub fn new_pixel_sequence(offset_table: Vec<u32>, fragments: Vec<Vec<u8>>) -> Self {
        DataElement::new(
            Tag::PIXEL_DATA,
            VR::OB,
            Value::PixelSequence(PixelFragmentSequence::new(offset_table, fragments)),
        )
    }

    #[inline]
    pub fn tag(&self) -> Tag {
        self.tag
    }

    #[inline]
    pub fn vr(&self) -> VR {
        self.vr
    }

    /// The identification of this element's type.
    /// Same as [`vr`](Self::vr).
    #[inline]
    pub fn ident(&self) -> VR {
        self.vr
    }

    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    #[inline]
    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// Change the value representation.
    pub fn set_vr(&mut self, vr: VR) {
        self.vr = vr;
        if let Value::Primitive(v) = &mut self.value {
            v.set_vr(vr);
        }
    }

    /// The header of this element as it would be read back.
    /// Sequences and pixel sequences have an undefined length.
    pub fn header(&self) -> DataElementHeader {
        let len = match &self.value {
            Value::Primitive(v) => Length(v.length()),
            _ => Length::UNDEFINED,
        };
        DataElementHeader::new(self.tag, self.vr, len)
    }

    /// Whether all value bytes (recursively) are in memory.
    pub fn is_loaded(&self) -> bool {
        match &self.value {
            Value::Primitive(v) => v.is_loaded(),
            Value::Sequence(seq) => seq.items().iter().all(Item::is_loaded),
            Value::PixelSequence(_) => true,
        }
    }

    fn storage(&self) -> Result<&ValueStorage> {
        self.value
            .primitive()
            .context(NotPrimitiveSnafu { tag: self.tag })
    }

    /// The value bytes in the native byte order.
    pub fn to_bytes(&self) -> Result<Cow<'_, [u8]>> {
        self.storage()?
            .to_bytes(native_byte_order())
            .context(LoadValueSnafu { tag: self.tag })
    }

    /// The value as text,
    /// without trailing spaces and null characters.
    pub fn to_str(&self) -> Result<Cow<'_, str>> {
        let bytes = self.to_bytes()?;
        Ok(match bytes {
            Cow::Borrowed(b) => String::from_utf8_lossy(trim_padding(b)),
            Cow::Owned(b) => Cow::Owned(String::from_utf8_lossy(trim_padding(&b)).into_owned()),
        })
    }

    /// Parse the first value of a text element.
    pub fn to_parsed<T: FromStr>(&self) -> Result<T> {
        let text = self.to_str()?;
        let first = text.split('\\').next().unwrap_or_default().trim();
        first.parse().ok().context(ConvertValueSnafu {
            tag: self.tag,
            vr: self.vr,
            target: std::any::type_name::<T>(),
        })
    }

    /// The first value of a binary element as a 16-bit unsigned integer.
    pub fn uint16(&self) -> Result<u16> {
        let bytes = self.to_bytes()?;
        let b: [u8; 2] = bytes
            .get(..2)
            .and_then(|b| b.try_into().ok())
            .context(ConvertValueSnafu {
                tag: self.tag,
                vr: self.vr,
                target: "u16",
            })?;
        Ok(u16::from_ne_bytes(b))
    }

    /// The first value of a binary element as a 32-bit unsigned integer.
    pub fn uint32(&self) -> Result<u32> {
        let bytes = self.to_bytes()?;
        let b: [u8; 4] = bytes
            .get(..4)
            .and_then(|b| b.try_into().ok())
            .context(ConvertValueSnafu {
                tag: self.tag,
                vr: self.vr,
                target: "u32",
            })?;
        Ok(u32::from_ne_bytes(b))
    }

    /// The number of bytes this element takes once encoded,
    /// header included.
    pub fn calc_length(&self, ts: &TransferSyntax, enctype: EncodingType) -> u32 {
        let explicit = ts.is_explicit_vr();
        match &self.value {
            Value::Primitive(v) => {
                let vr = writable_vr(self.vr, Length(v.length()), true);
                header_len(vr, explicit) + v.length()
            }
            Value::Sequence(seq) => header_len(VR::SQ, explicit) + seq.calc_length(ts, enctype),
            Value::PixelSequence(px) => header_len(VR::OB, explicit) + px.calc_length(),
        }
    }

    /// Check the value against the constraints of its representation.
    ///
    /// Violations are logged as warnings,
    /// or returned as an error if `strict` is set.
    pub fn validate(&self, strict: bool) -> std::result::Result<(), ValidationError> {
        match &self.value {
            Value::Primitive(v) => validate::check_value(self.tag, self.vr, v, strict),
            Value::Sequence(seq) => seq
                .items()
                .iter()
                .try_for_each(|item| item.validate(strict)),
            Value::PixelSequence(_) => Ok(()),
        }
    }

    /// Load any deferred value bytes of this element from the source.
    pub fn load_value<S>(&mut self, source: &mut S) -> Result<()>
    where
        S: ?Sized + ByteSource,
    {
        match &mut self.value {
            Value::Primitive(v) => {
                if v.is_loaded() {
                    return Ok(());
                }
                match v.load_value(source).context(LoadValueSnafu { tag: self.tag })? {
                    Progress::Done => Ok(()),
                    Progress::Suspended => IncompleteValueSnafu { tag: self.tag }.fail(),
                }
            }
            Value::Sequence(seq) => seq
                .items_mut()
                .iter_mut()
                .try_for_each(|item| item.load_all_values(source)),
            Value::PixelSequence(_) => Ok(()),
        }
    }
}

fn trim_padding(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|b| *b != b' ' && *b != 0)
        .map(|i| i + 1)
        .unwrap_or(0);
    &bytes[..end]
}

/// A collection of data elements, ordered and unique by tag.
///
/// This is used both for whole data sets and for sequence items.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Item {
    elements: Vec<DataElement>,
}

impl Item {
    /// Create an empty item.
    pub fn new() -> Self {
        Item::default()
    }

    fn position(&self, tag: Tag) -> std::result::Result<usize, usize> {
        self.elements.binary_search_by(|e| e.tag.cmp(&tag))
    }

    /// Insert an element,
    /// returning the element previously held under the same tag.
    pub fn put(&mut self, element: DataElement) -> Option<DataElement> {
        match self.position(element.tag) {
            Ok(i) => Some(std::mem::replace(&mut self.elements[i], element)),
            Err(i) => {
                self.elements.insert(i, element);
                None
            }
        }
    }

    /// Insert a text element, replacing any element with the same tag.
    pub fn put_str(&mut self, tag: Tag, vr: VR, text: &str) -> Option<DataElement> {
        self.put(DataElement::from_str(tag, vr, text))
    }

    pub fn get(&self, tag: Tag) -> Option<&DataElement> {
        self.position(tag).ok().map(|i| &self.elements[i])
    }

    pub fn get_mut(&mut self, tag: Tag) -> Option<&mut DataElement> {
        match self.position(tag) {
            Ok(i) => Some(&mut self.elements[i]),
            Err(_) => None,
        }
    }

    /// Retrieve an element which must be present.
    pub fn element(&self, tag: Tag) -> Result<&DataElement> {
        self.get(tag).context(NoSuchDataElementTagSnafu { tag })
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.position(tag).is_ok()
    }

    pub fn remove(&mut self, tag: Tag) -> Option<DataElement> {
        self.position(tag).ok().map(|i| self.elements.remove(i))
    }

    /// Remove all elements of the given group from this item.
    pub fn remove_group(&mut self, group: u16) {
        self.elements.retain(|e| e.tag.group() != group);
    }

    /// Keep only the elements satisfying the predicate.
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&DataElement) -> bool,
    {
        self.elements.retain(f);
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate over the elements in tag order.
    pub fn iter(&self) -> std::slice::Iter<'_, DataElement> {
        self.elements.iter()
    }

    /// Iterate mutably over the elements in tag order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut DataElement> {
        self.elements.iter_mut()
    }

    /// The element at the given position in tag order.
    pub(crate) fn element_at(&self, index: usize) -> Option<&DataElement> {
        self.elements.get(index)
    }

    /// Whether all value bytes (recursively) are in memory.
    pub fn is_loaded(&self) -> bool {
        self.elements.iter().all(DataElement::is_loaded)
    }

    /// The number of bytes of all elements once encoded.
    pub fn calc_length(&self, ts: &TransferSyntax, enctype: EncodingType) -> u32 {
        self.elements
            .iter()
            .map(|e| e.calc_length(ts, enctype))
            .sum()
    }

    /// The encoded length of the elements of one group,
    /// not counting its group length element.
    pub fn calc_group_length(&self, group: u16, ts: &TransferSyntax, enctype: EncodingType) -> u32 {
        self.elements
            .iter()
            .filter(|e| e.tag.group() == group && !e.tag.is_group_length())
            .map(|e| e.calc_length(ts, enctype))
            .sum()
    }

    /// Validate every element, recursively.
    pub fn validate(&self, strict: bool) -> std::result::Result<(), ValidationError> {
        self.elements.iter().try_for_each(|e| e.validate(strict))
    }

    /// Load all deferred values from the source they were read from.
    pub fn load_all_values<S>(&mut self, source: &mut S) -> Result<()>
    where
        S: ?Sized + ByteSource,
    {
        self.elements
            .iter_mut()
            .try_for_each(|e| e.load_value(source))
    }

    /// Remove group length elements of groups without any other element,
    /// in this item and in all nested items.
    pub fn remove_invalid_groups(&mut self) {
        let elements = &self.elements;
        let orphans: Vec<Tag> = elements
            .iter()
            .filter(|e| e.tag.is_group_length())
            .filter(|e| {
                !elements
                    .iter()
                    .any(|o| o.tag.group() == e.tag.group() && !o.tag.is_group_length())
            })
            .map(|e| e.tag)
            .collect();
        for tag in orphans {
            debug!("Removing group length {} of an empty group", tag);
            self.remove(tag);
        }
        for item in self.nested_items_mut() {
            item.remove_invalid_groups();
        }
    }

    fn nested_items_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.elements
            .iter_mut()
            .filter_map(|e| match &mut e.value {
                Value::Sequence(seq) => Some(seq.items_mut().iter_mut()),
                _ => None,
            })
            .flatten()
    }

    /// Apply a group length policy to this item and all nested items.
    pub fn update_group_lengths(
        &mut self,
        policy: GroupLength,
        ts: &TransferSyntax,
        enctype: EncodingType,
    ) {
        for item in self.nested_items_mut() {
            item.update_group_lengths(policy, ts, enctype);
        }
        self.update_own_group_lengths(policy, ts, enctype);
    }

    fn update_own_group_lengths(
        &mut self,
        policy: GroupLength,
        ts: &TransferSyntax,
        enctype: EncodingType,
    ) {
        let create = match policy {
            GroupLength::NoChange => return,
            GroupLength::WithoutGroupLength => {
                self.elements.retain(|e| !e.tag.is_group_length());
                return;
            }
            GroupLength::WithGroupLength => true,
            GroupLength::Recalculate => false,
        };

        let mut groups: Vec<u16> = self
            .elements
            .iter()
            .filter(|e| !e.tag.is_group_length())
            .map(|e| e.tag.group())
            .filter(|g| *g != Tag::DATASET_TRAILING_PADDING.group())
            .collect();
        groups.dedup();

        for group in groups {
            let tag = Tag(group, 0x0000);
            if !create && !self.contains(tag) {
                continue;
            }
            let len = self.calc_group_length(group, ts, enctype);
            trace!("Group length {} = {}", tag, len);
            self.put(DataElement::from_u32(tag, VR::UL, &[len]));
        }
    }

    fn update_padding(
        &mut self,
        policy: Padding,
        ts: &TransferSyntax,
        enctype: EncodingType,
        padlen: u32,
        preceding: u32,
    ) {
        match policy {
            Padding::NoChange => {}
            Padding::WithoutPadding => {
                self.remove(Tag::DATASET_TRAILING_PADDING);
            }
            Padding::WithPadding => {
                self.remove(Tag::DATASET_TRAILING_PADDING);
                if padlen == 0 {
                    return;
                }
                let len = preceding + self.calc_length(ts, enctype);
                let needed = (padlen - len % padlen) % padlen;
                if needed == 0 {
                    return;
                }
                let header = header_len(VR::OB, ts.is_explicit_vr());
                let mut total = needed;
                while total < header {
                    total += padlen;
                }
                let value_len = total - header;
                trace!("Padding with {} bytes to a multiple of {}", value_len, padlen);
                self.put(DataElement::from_bytes(
                    Tag::DATASET_TRAILING_PADDING,
                    VR::OB,
                    vec![0; value_len as usize],
                ));
            }
        }
    }

    /// Bring this data set into shape for writing with the given options.
    ///
    /// Resident odd-length values are padded to an even length,
    /// group length elements follow `options.group_length`,
    /// and trailing padding follows `options.padding`.
    /// The data set is padded to a multiple of `options.padlen`
    /// counting `preceding` bytes written before it,
    /// while nested items are padded to a multiple of `options.sub_padlen`.
    pub fn prepare_for_write(&mut self, options: &WriteOptions, ts: &TransferSyntax, preceding: u32) {
        self.prepare_level(options, ts, options.padlen, preceding);
    }

    fn prepare_level(
        &mut self,
        options: &WriteOptions,
        ts: &TransferSyntax,
        padlen: u32,
        preceding: u32,
    ) {
        for elem in &mut self.elements {
            if let Value::Primitive(v) = &mut elem.value {
                if v.normalize(elem.vr) {
                    trace!("Padded odd-length value of {}", elem.tag);
                }
            }
        }
        for item in self.nested_items_mut() {
            item.prepare_level(options, ts, options.sub_padlen, 0);
        }
        self.update_own_group_lengths(options.group_length, ts, options.encoding);
        self.update_padding(options.padding, ts, options.encoding, padlen, preceding);
    }
}

impl<'a> IntoIterator for &'a Item {
    type Item = &'a DataElement;
    type IntoIter = std::slice::Iter<'a, DataElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl IntoIterator for Item {
    type Item = DataElement;
    type IntoIter = std::vec::IntoIter<DataElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl FromIterator<DataElement> for Item {
    fn from_iter<I: IntoIterator<Item = DataElement>>(iter: I) -> Self {
        let mut item = Item::new();
        for element in iter {
            item.put(element);
        }
        item
    }
}

impl Extend<DataElement> for Item {
    fn extend<I: IntoIterator<Item = DataElement>>(&mut self, iter: I) {
        for element in iter {
            self.put(element);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcmio_dictionary_std::tags;
    use dcmio_transfer_syntax_registry::entries::{
        EXPLICIT_VR_LITTLE_ENDIAN, IMPLICIT_VR_LITTLE_ENDIAN,
    };

    fn sample() -> Item {
        let mut item = Item::new();
        item.put_str(tags::PATIENT_NAME, VR::PN, "SMITH^J");
        item.put_str(tags::SOP_CLASS_UID, VR::UI, "1.2.840.10008.5.1.4.1.1.7");
        item.put(DataElement::from_u16(tags::SAMPLES_PER_PIXEL, VR::US, &[3]));
        item
    }

    #[test]
    fn elements_are_unique_and_ordered() {
        let mut item = sample();
        let old = item.put_str(tags::PATIENT_NAME, VR::PN, "DOE^JANE");
        assert_eq!(old.unwrap().to_str().unwrap(), "SMITH^J");
        assert_eq!(item.len(), 3);
        let order: Vec<Tag> = item.iter().map(DataElement::tag).collect();
        assert_eq!(
            order,
            vec![tags::SOP_CLASS_UID, tags::PATIENT_NAME, tags::SAMPLES_PER_PIXEL]
        );
        assert_eq!(item.remove(tags::PATIENT_NAME).unwrap().vr(), VR::PN);
        assert!(item.get(tags::PATIENT_NAME).is_none());
        assert!(item.element(tags::PATIENT_NAME).is_err());
    }

    #[test]
    fn odd_text_is_padded() {
        let elem = DataElement::from_str(tags::PATIENT_NAME, VR::PN, "SMITH^J");
        assert_eq!(&*elem.to_bytes().unwrap(), b"SMITH^J ");
        assert_eq!(elem.to_str().unwrap(), "SMITH^J");
        let uid = DataElement::from_str(tags::SOP_CLASS_UID, VR::UI, "1.2.3");
        assert_eq!(&*uid.to_bytes().unwrap(), b"1.2.3\0");
        assert_eq!(uid.to_str().unwrap(), "1.2.3");
    }

    #[test]
    fn numeric_accessors() {
        let item = sample();
        assert_eq!(item.element(tags::SAMPLES_PER_PIXEL).unwrap().uint16().unwrap(), 3);
        let frames = DataElement::from_str(tags::NUMBER_OF_FRAMES, VR::IS, " 12");
        assert_eq!(frames.to_parsed::<u32>().unwrap(), 12);
        let bad = DataElement::from_str(tags::NUMBER_OF_FRAMES, VR::IS, "twelve");
        assert!(bad.to_parsed::<u32>().is_err());
        let seq = DataElement::new_sequence(tags::BEAM_SEQUENCE, vec![]);
        assert!(matches!(seq.uint16(), Err(Error::NotPrimitive { .. })));
    }

    #[test]
    fn element_lengths() {
        let ts = &EXPLICIT_VR_LITTLE_ENDIAN;
        let name = DataElement::from_str(tags::PATIENT_NAME, VR::PN, "SMITH^J");
        assert_eq!(name.calc_length(ts, EncodingType::ExplicitLength), 16);
        assert_eq!(
            name.calc_length(&IMPLICIT_VR_LITTLE_ENDIAN, EncodingType::ExplicitLength),
            16
        );
        let ob = DataElement::from_bytes(tags::PIXEL_DATA, VR::OB, vec![0; 4]);
        assert_eq!(ob.calc_length(ts, EncodingType::ExplicitLength), 16);

        // a long value in a short VR is written with a long header
        let long = DataElement::from_bytes(Tag(0x0009, 0x1010), VR::LO, vec![b'a'; 0x10000]);
        assert_eq!(long.calc_length(ts, EncodingType::ExplicitLength), 12 + 0x10000);

        let mut inner = Item::new();
        inner.put_str(tags::BEAM_NAME, VR::LO, "APG");
        let seq = DataElement::new_sequence(tags::BEAM_SEQUENCE, vec![inner.clone(), inner]);
        // 12 + 2 * (8 + 12)
        assert_eq!(seq.calc_length(ts, EncodingType::ExplicitLength), 52);
        // plus two item delimiters and a sequence delimiter
        assert_eq!(seq.calc_length(ts, EncodingType::UndefinedLength), 76);

        let px = DataElement::new_pixel_sequence(vec![0], vec![vec![1; 10]]);
        // 12 + (8 + 4) + (8 + 10) + 8
        assert_eq!(px.calc_length(ts, EncodingType::ExplicitLength), 50);
    }

    #[test]
    fn group_length_is_created() {
        let ts = &EXPLICIT_VR_LITTLE_ENDIAN;
        let mut item = Item::new();
        item.put(DataElement::from_u16(tags::SAMPLES_PER_PIXEL, VR::US, &[3]));
        item.update_group_lengths(
            GroupLength::WithGroupLength,
            ts,
            EncodingType::ExplicitLength,
        );
        let group_length = item.element(Tag(0x0028, 0x0000)).unwrap();
        assert_eq!(group_length.vr(), VR::UL);
        assert_eq!(group_length.uint32().unwrap(), 10);

        item.update_group_lengths(
            GroupLength::WithoutGroupLength,
            ts,
            EncodingType::ExplicitLength,
        );
        assert_eq!(item.len(), 1);
    }

    #[test]
    fn recalculate_only_updates_existing_group_lengths() {
        let ts = &EXPLICIT_VR_LITTLE_ENDIAN;
        let mut item = sample();
        item.put(DataElement::from_u32(Tag(0x0010, 0x0000), VR::UL, &[1234]));
        item.update_group_lengths(GroupLength::Recalculate, ts, EncodingType::ExplicitLength);
        assert_eq!(item.element(Tag(0x0010, 0x0000)).unwrap().uint32().unwrap(), 16);
        assert!(!item.contains(Tag(0x0008, 0x0000)));
        assert!(!item.contains(Tag(0x0028, 0x0000)));
    }

    #[test]
    fn orphan_group_lengths_are_removed() {
        let mut inner = Item::new();
        inner.put(DataElement::from_u32(Tag(0x0011, 0x0000), VR::UL, &[0]));
        let mut item = sample();
        item.put(DataElement::from_u32(Tag(0x0010, 0x0000), VR::UL, &[16]));
        item.put(DataElement::from_u32(Tag(0x0020, 0x0000), VR::UL, &[0]));
        item.put(DataElement::new_sequence(tags::BEAM_SEQUENCE, vec![inner]));
        item.remove_invalid_groups();
        assert!(item.contains(Tag(0x0010, 0x0000)));
        assert!(!item.contains(Tag(0x0020, 0x0000)));
        let seq = item.element(tags::BEAM_SEQUENCE).unwrap();
        assert!(seq.value().items().unwrap()[0].is_empty());
    }

    #[test]
    fn padding_reaches_a_multiple() {
        let ts = &EXPLICIT_VR_LITTLE_ENDIAN;
        for padlen in [64u32, 100, 200] {
            for preceding in [0u32, 132, 300] {
                let mut item = sample();
                let options = WriteOptions::new().padding(Padding::WithPadding, padlen, 0);
                item.prepare_for_write(&options, ts, preceding);
                let total = preceding + item.calc_length(ts, EncodingType::ExplicitLength);
                assert_eq!(total % padlen, 0, "padlen {} preceding {}", padlen, preceding);
                assert!(item.contains(Tag::DATASET_TRAILING_PADDING));
            }
        }
    }

    #[test]
    fn padding_shorter_than_the_padding_header() {
        for ts in [&EXPLICIT_VR_LITTLE_ENDIAN, &IMPLICIT_VR_LITTLE_ENDIAN] {
            for padlen in [2u32, 4, 8] {
                for preceding in [0u32, 2, 6] {
                    let mut item = Item::new();
                    item.put_str(tags::PATIENT_NAME, VR::PN, "SMITH^J");
                    let options = WriteOptions::new().padding(Padding::WithPadding, padlen, 0);
                    item.prepare_for_write(&options, ts, preceding);
                    let total = preceding + item.calc_length(ts, EncodingType::ExplicitLength);
                    assert_eq!(
                        total % padlen,
                        0,
                        "{} padlen {} preceding {}",
                        ts.name(),
                        padlen,
                        preceding
                    );
                    if let Some(pad) = item.get(Tag::DATASET_TRAILING_PADDING) {
                        assert!(pad.calc_length(ts, EncodingType::ExplicitLength) < 12 + 2 * padlen);
                    }
                }
            }
        }
    }

    #[test]
    fn padding_is_removed() {
        let ts = &EXPLICIT_VR_LITTLE_ENDIAN;
        let mut item = sample();
        item.put(DataElement::from_bytes(
            Tag::DATASET_TRAILING_PADDING,
            VR::OB,
            vec![0; 6],
        ));
        let options = WriteOptions::new().padding(Padding::WithoutPadding, 0, 0);
        item.prepare_for_write(&options, ts, 0);
        assert!(!item.contains(Tag::DATASET_TRAILING_PADDING));
    }

    #[test]
    fn nested_items_are_padded_with_the_item_length() {
        let ts = &EXPLICIT_VR_LITTLE_ENDIAN;
        let mut inner = Item::new();
        inner.put_str(tags::BEAM_NAME, VR::LO, "APG");
        let mut item = sample();
        item.put(DataElement::new_sequence(tags::BEAM_SEQUENCE, vec![inner]));
        let options = WriteOptions::new().padding(Padding::WithPadding, 0, 32);
        item.prepare_for_write(&options, ts, 0);
        assert!(!item.contains(Tag::DATASET_TRAILING_PADDING));
        let inner = &item.element(tags::BEAM_SEQUENCE).unwrap().value().items().unwrap()[0];
        assert_eq!(inner.calc_length(ts, EncodingType::ExplicitLength) % 32, 0);
    }
}
