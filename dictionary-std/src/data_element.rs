//! The standard data element dictionary.
//!
//! The built-in entries of [`tags`](crate::tags) are complemented
//! by the dictionary files listed in the `DCMDICTPATH` environment variable,
//! which are read once, when the dictionary is first used.
use crate::tags::ENTRIES;
use dcmio_core::dictionary::{DataDictionary, DictionaryEntry, DictionaryEntryBuf};
use dcmio_core::header::{Tag, VR};
use once_cell::sync::Lazy;
use snafu::{Backtrace, OptionExt, ResultExt, Snafu};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// The environment variable listing additional dictionary files.
pub const DICTIONARY_PATH_VAR: &str = "DCMDICTPATH";

static DICT: Lazy<StandardDataDictionaryRegistry> = Lazy::new(init_dictionary);

/// An error which may occur when loading a dictionary file.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// The dictionary file could not be read.
    #[snafu(display("Could not read dictionary file {}", path.display()))]
    ReadFile {
        path: PathBuf,
        backtrace: Backtrace,
        source: std::io::Error,
    },
    /// A line of the dictionary file has too few fields.
    #[snafu(display("Line {}: expected tag, VR, keyword and VM", line))]
    MissingField { line: usize, backtrace: Backtrace },
    /// A line of the dictionary file has a malformed tag.
    #[snafu(display("Line {}: malformed tag `{}`", line, tag))]
    MalformedTag {
        line: usize,
        tag: String,
        backtrace: Backtrace,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Retrieve a singleton instance of the standard dictionary registry.
///
/// Note that one does not generally have to call this
/// unless when retrieving the underlying registry is important.
/// The unit type [`StandardDataDictionary`]
/// already provides a lazy loaded singleton implementing the necessary traits.
#[inline]
pub fn registry() -> &'static StandardDataDictionaryRegistry {
    &DICT
}

/// The data struct actually containing the standard dictionary.
///
/// This structure is made opaque via the unit type [`StandardDataDictionary`],
/// which provides a lazy loaded singleton.
#[derive(Debug, Default)]
pub struct StandardDataDictionaryRegistry {
    entries: Vec<DictionaryEntryBuf>,
    /// mapping: name → entry index
    by_name: HashMap<String, usize>,
    /// mapping: tag → entry index
    by_tag: HashMap<Tag, usize>,
    /// repeating elements of the form (ggxx, eeee). The `xx` portion is zeroed.
    repeating_ggxx: HashSet<Tag>,
}

impl StandardDataDictionaryRegistry {
    /// Create a registry with the built-in entries only.
    pub fn builtin() -> Self {
        let mut d = StandardDataDictionaryRegistry {
            entries: Vec::with_capacity(ENTRIES.len()),
            ..Default::default()
        };
        for entry in ENTRIES {
            d.index(DictionaryEntryBuf {
                tag: entry.tag,
                alias: entry.alias.to_string(),
                vr: entry.vr,
                vm: entry.vm.to_string(),
            });
        }
        d
    }

    /// Record the given dictionary entry,
    /// replacing any previous entry with the same tag.
    pub fn index(&mut self, entry: DictionaryEntryBuf) -> &mut Self {
        let tag = entry.tag;
        if is_repeating_group(tag.group()) {
            self.repeating_ggxx.insert(Tag(tag.0 & 0xFF00, tag.1));
        }
        let i = match self.by_tag.get(&tag) {
            Some(&i) => {
                self.by_name.remove(&self.entries[i].alias);
                self.entries[i] = entry;
                i
            }
            None => {
                self.entries.push(entry);
                self.entries.len() - 1
            }
        };
        self.by_name.insert(self.entries[i].alias.clone(), i);
        self.by_tag.insert(tag, i);
        self
    }

    /// Read a dictionary file and record all of its entries.
    ///
    /// Returns the number of entries loaded.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).context(ReadFileSnafu { path })?;
        let entries = parse_dictionary(&text)?;
        let count = entries.len();
        for entry in entries {
            self.index(entry);
        }
        Ok(count)
    }

    /// The number of entries in the registry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn get_by_tag(&self, tag: Tag) -> Option<&DictionaryEntryBuf> {
        self.by_tag
            .get(&tag)
            .or_else(|| {
                // check tags repeating in different groups
                let group_trimmed = Tag(tag.0 & 0xFF00, tag.1);
                if self.repeating_ggxx.contains(&group_trimmed) {
                    return self.by_tag.get(&group_trimmed);
                }
                None
            })
            .map(|&i| &self.entries[i])
    }

    fn get_by_name(&self, name: &str) -> Option<&DictionaryEntryBuf> {
        self.by_name.get(name).map(|&i| &self.entries[i])
    }
}

impl DataDictionary for StandardDataDictionaryRegistry {
    type Entry = DictionaryEntryBuf;

    fn by_name(&self, name: &str) -> Option<&Self::Entry> {
        self.get_by_name(name)
    }

    fn by_tag(&self, tag: Tag) -> Option<&Self::Entry> {
        self.get_by_tag(tag)
    }
}

/// Curve (50xx) and overlay (60xx) groups repeat their attributes.
fn is_repeating_group(group: u16) -> bool {
    matches!(group & 0xFF00, 0x5000 | 0x6000) && group & 1 == 0
}

/// A data element dictionary which consults
/// the library's global DICOM attribute registry.
///
/// This is the type which would generally be used
/// whenever a data element dictionary is needed,
/// such as when reading DICOM objects.
///
/// The dictionary index is automatically initialized upon the first use.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StandardDataDictionary;

impl DataDictionary for StandardDataDictionary {
    type Entry = DictionaryEntryBuf;

    fn by_name(&self, name: &str) -> Option<&Self::Entry> {
        registry().get_by_name(name)
    }

    fn by_tag(&self, tag: Tag) -> Option<&Self::Entry> {
        registry().get_by_tag(tag)
    }

    fn resolve_vr(&self, tag: Tag) -> VR {
        match registry().get_by_tag(tag) {
            Some(entry) => entry.vr(),
            None => {
                let vr = fallback_vr(tag);
                if vr == VR::UN {
                    debug!("Unknown attribute {}, resolved to UN", tag);
                }
                vr
            }
        }
    }
}

impl Display for StandardDataDictionary {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        f.write_str("Standard DICOM Data Dictionary")
    }
}

fn fallback_vr(tag: Tag) -> VR {
    if tag.is_group_length() {
        VR::UL
    } else if tag.is_private() && (0x0010..=0x00FF).contains(&tag.element()) {
        VR::LO
    } else {
        VR::UN
    }
}

fn init_dictionary() -> StandardDataDictionaryRegistry {
    let mut d = StandardDataDictionaryRegistry::builtin();
    match std::env::var_os(DICTIONARY_PATH_VAR) {
        Some(paths) => {
            for path in std::env::split_paths(&paths) {
                if path.as_os_str().is_empty() {
                    continue;
                }
                match d.load_file(&path) {
                    Ok(count) => debug!("Loaded {} entries from {}", count, path.display()),
                    Err(e) => warn!("Could not load dictionary {}: {}", path.display(), e),
                }
            }
        }
        None => warn!(
            "{} is not set, only built-in dictionary entries are available",
            DICTIONARY_PATH_VAR
        ),
    }
    d
}

/// Parse the content of a data dictionary file.
///
/// Each line holds the tag, VR, keyword, VM and version of an attribute,
/// separated by tabs, as in `(0010,0010)\tPN\tPatientName\t1\tDICOM`.
/// Empty lines and lines starting with `#` are ignored,
/// as are entries spanning ranges of elements
/// and entries bound to a private creator.
pub fn parse_dictionary(text: &str) -> Result<Vec<DictionaryEntryBuf>> {
    let mut entries = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split('\t').map(str::trim).filter(|f| !f.is_empty());
        let tag = fields.next().context(MissingFieldSnafu { line: line_no })?;
        let vr = fields.next().context(MissingFieldSnafu { line: line_no })?;
        let alias = fields.next().context(MissingFieldSnafu { line: line_no })?;
        let vm = fields.next().context(MissingFieldSnafu { line: line_no })?;

        let tag = match parse_tag(tag) {
            Some(tag) => tag,
            None if tag.contains('-') || tag.contains('"') => {
                // element ranges and private creator entries
                debug!("Line {}: skipping {}", line_no, tag);
                continue;
            }
            None => {
                return MalformedTagSnafu {
                    line: line_no,
                    tag: tag.to_string(),
                }
                .fail()
            }
        };
        let vr = match parse_vr(vr) {
            Some(vr) => vr,
            None => {
                debug!("Line {}: skipping attribute with VR {}", line_no, vr);
                continue;
            }
        };
        entries.push(DictionaryEntryBuf {
            tag,
            alias: alias.to_string(),
            vr,
            vm: vm.to_string(),
        });
    }
    Ok(entries)
}

/// Parse a tag written as `(gggg,eeee)`.
/// An `xx` in the group stands for a repeating group.
fn parse_tag(text: &str) -> Option<Tag> {
    let inner = text.strip_prefix('(')?.strip_suffix(')')?;
    let (group, element) = inner.split_once(',')?;
    let group = u16::from_str_radix(&group.trim().replace("xx", "00"), 16).ok()?;
    let element = u16::from_str_radix(element.trim(), 16).ok()?;
    Some(Tag(group, element))
}

/// Parse the VR of a dictionary entry,
/// including the ambiguous VRs of DCMTK dictionaries.
fn parse_vr(text: &str) -> Option<VR> {
    match text {
        "ox" => Some(VR::OB),
        "xs" => Some(VR::US),
        "lt" => Some(VR::OW),
        "up" => Some(VR::UL),
        "na" => None,
        other => other.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // tests for just a few attributes to make sure that the entries
    // were well installed into the crate
    #[test]
    fn smoke_test() {
        let dict = StandardDataDictionary;

        let entry = dict.by_name("PatientName").expect("PatientName should exist");
        assert_eq!(entry.tag, Tag(0x0010, 0x0010));
        assert_eq!(entry.vr, VR::PN);

        let pixel_data = dict
            .by_tag(Tag(0x7FE0, 0x0010))
            .expect("Pixel Data attribute should exist");
        assert_eq!(pixel_data.alias(), "PixelData");
        assert_eq!(dict.resolve_vr(Tag(0x300A, 0x00B0)), VR::SQ);
    }

    #[test]
    fn repeating_groups_and_fallbacks() {
        let dict = StandardDataDictionary;
        assert_eq!(dict.resolve_vr(Tag(0x6002, 0x3000)), VR::OW);
        assert_eq!(dict.resolve_vr(Tag(0x6002, 0x0010)), VR::US);
        assert_eq!(dict.resolve_vr(Tag(0x0018, 0x0000)), VR::UL);
        assert_eq!(dict.resolve_vr(Tag(0x0029, 0x0010)), VR::LO);
        assert_eq!(dict.resolve_vr(Tag(0x0029, 0x1010)), VR::UN);
    }

    #[test]
    fn parse_dcmtk_style_lines() {
        let text = "# comment\n\
            (0010,0010)\tPN\tPatientName\t1\tDICOM\n\
            \n\
            (60xx,0022)\tLO\tOverlayDescription\t1\tDICOM\n\
            (0020,3100-31FF)\tCS\tSourceImageIDs\t1-n\tDICOM/retired\n\
            (0028,1200)\tox\tGrayLookupTableData\t1-n\tDICOM/retired\n";
        let entries = parse_dictionary(text).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].tag, Tag(0x0010, 0x0010));
        assert_eq!(entries[1].tag, Tag(0x6000, 0x0022));
        assert_eq!(entries[2].vr, VR::OB);
        assert_eq!(entries[2].vm, "1-n");
    }

    #[test]
    fn parse_bad_lines() {
        assert!(matches!(
            parse_dictionary("(0010,0010)\tPN\n"),
            Err(Error::MissingField { line: 1, .. })
        ));
        assert!(matches!(
            parse_dictionary("\n(00G0,0010)\tPN\tName\t1\n"),
            Err(Error::MalformedTag { line: 2, .. })
        ));
    }

    #[test]
    fn load_file_overrides_builtin_entries() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "(0009,1001)\tDS\tAcmeDose\t1\tPrivate").unwrap();
        writeln!(file, "(0010,0010)\tLO\tPatientName\t1\tOdd").unwrap();

        let mut registry = StandardDataDictionaryRegistry::builtin();
        let builtin_len = registry.len();
        assert_eq!(registry.load_file(file.path()).unwrap(), 2);
        assert_eq!(registry.len(), builtin_len + 1);
        assert_eq!(registry.resolve_vr(Tag(0x0009, 0x1001)), VR::DS);
        assert_eq!(registry.resolve_vr(Tag(0x0010, 0x0010)), VR::LO);
        assert_eq!(
            registry.by_name("AcmeDose").map(|e| e.tag),
            Some(Tag(0x0009, 0x1001))
        );
    }
}
