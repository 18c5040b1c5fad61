//! The query interface of DICOM data dictionaries.
//!
//! Decoding implicit VR data sets needs the value representation of each tag.
//! Tags missing from the dictionary resolve to VR `UN`
//! and are read as opaque bytes.

use crate::header::{Tag, VR};
use std::fmt::Debug;

/// A lookup table of DICOM attributes by tag and by keyword.
pub trait DataDictionary: Debug {
    /// The type of the dictionary entry.
    type Entry: DictionaryEntry;

    /// Fetch an entry by keyword, such as `"PatientName"`.
    fn by_name(&self, name: &str) -> Option<&Self::Entry>;

    /// Fetch an entry by its tag.
    fn by_tag(&self, tag: Tag) -> Option<&Self::Entry>;

    /// Resolve the value representation of an attribute
    /// to be read from an implicit VR transfer syntax.
    ///
    /// Group length attributes are always UL,
    /// private creator attributes are LO,
    /// and anything else missing from the dictionary is UN.
    fn resolve_vr(&self, tag: Tag) -> VR {
        if let Some(entry) = self.by_tag(tag) {
            return entry.vr();
        }
        if tag.is_group_length() {
            VR::UL
        } else if tag.is_private() && (0x0010..=0x00FF).contains(&tag.element()) {
            VR::LO
        } else {
            VR::UN
        }
    }
}

/// One attribute known to a dictionary.
pub trait DictionaryEntry {
    fn tag(&self) -> Tag;
    /// The keyword, e.g. `PixelData`.
    fn alias(&self) -> &str;
    /// The value representation used when the stream does not state one.
    fn vr(&self) -> VR;
    /// Value multiplicity, e.g. `"1-n"`.
    fn vm(&self) -> &str;
}

/// An owned dictionary entry,
/// as loaded from a dictionary file.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct DictionaryEntryBuf {
    pub tag: Tag,
    pub alias: String,
    pub vr: VR,
    pub vm: String,
}

impl DictionaryEntry for DictionaryEntryBuf {
    fn tag(&self) -> Tag {
        self.tag
    }
    fn alias(&self) -> &str {
        self.alias.as_str()
    }
    fn vr(&self) -> VR {
        self.vr
    }
    fn vm(&self) -> &str {
        self.vm.as_str()
    }
}

/// A borrowed dictionary entry, used for the built-in tables.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct DictionaryEntryRef<'a> {
    pub tag: Tag,
    pub alias: &'a str,
    pub vr: VR,
    pub vm: &'a str,
}

impl<'a> DictionaryEntry for DictionaryEntryRef<'a> {
    fn tag(&self) -> Tag {
        self.tag
    }
    fn alias(&self) -> &str {
        self.alias
    }
    fn vr(&self) -> VR {
        self.vr
    }
    fn vm(&self) -> &str {
        self.vm
    }
}

/// A dictionary without any entries,
/// resolving every attribute by the fallback rules alone.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct EmptyDictionary;

impl DataDictionary for EmptyDictionary {
    type Entry = DictionaryEntryBuf;

    fn by_name(&self, _name: &str) -> Option<&Self::Entry> {
        None
    }

    fn by_tag(&self, _tag: Tag) -> Option<&Self::Entry> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_resolution() {
        let dict = EmptyDictionary;
        assert_eq!(dict.resolve_vr(Tag(0x0028, 0x0000)), VR::UL);
        assert_eq!(dict.resolve_vr(Tag(0x0009, 0x0010)), VR::LO);
        assert_eq!(dict.resolve_vr(Tag(0x0009, 0x1010)), VR::UN);
        assert_eq!(dict.resolve_vr(Tag(0x0010, 0x0010)), VR::UN);
    }
}
