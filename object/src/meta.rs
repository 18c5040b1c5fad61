//! The file meta information group (group 0002).
//!
//! The group is always encoded in explicit VR little endian,
//! whatever the transfer syntax of the data set which follows it.
use crate::mem::{DataElement, Item};
use crate::read::{self, DatasetReader};
use crate::write::{self, write_dataset};
use crate::{IMPLEMENTATION_CLASS_UID, IMPLEMENTATION_VERSION_NAME, PRIVATE_GENERIC_FILE_SOP_CLASS_UID};
use dcmio_core::stream::{ByteSink, ByteSource, Progress};
use dcmio_core::{Tag, VR};
use dcmio_dictionary_std::tags;
use dcmio_encoding::TransferSyntax;
use dcmio_parser::dataset::{EncodingType, GroupLength, ReadOptions, WriteOptions};
use dcmio_transfer_syntax_registry::entries::EXPLICIT_VR_LITTLE_ENDIAN;
use rand::Rng;
use snafu::{Backtrace, OptionExt, ResultExt, Snafu};
use std::borrow::Cow;
use tracing::{debug, warn};

/// The file meta information version written by this implementation.
pub const META_VERSION: [u8; 2] = [0x00, 0x01];

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// The file meta group could not be read.
    #[snafu(display("Could not read file meta group"))]
    ReadMeta {
        #[snafu(backtrace)]
        source: read::Error,
    },
    /// The source ended in the middle of the file meta group.
    #[snafu(display("File meta group is incomplete"))]
    IncompleteMeta { backtrace: Backtrace },
    /// A required file meta data element is missing.
    #[snafu(display("Missing data element `{}`", alias))]
    MissingElement {
        alias: &'static str,
        backtrace: Backtrace,
    },
    /// The file meta group could not be written.
    #[snafu(display("Could not write file meta group"))]
    WriteMeta {
        #[snafu(backtrace)]
        source: write::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// How a data set is written out.
#[derive(Debug, Default, Copy, Clone, Eq, Hash, PartialEq)]
pub enum WriteMode {
    /// Write the file format: preamble, magic code, meta group and data set.
    /// Missing meta information is filled in.
    #[default]
    FileFormat,
    /// Write the data set alone.
    Dataset,
    /// Write the file format,
    /// taking the SOP class and instance UIDs of the meta group
    /// from the data set even if they are already present.
    UpdateMeta,
}

impl WriteMode {
    /// Whether a preamble and meta group are written.
    pub fn writes_meta(self) -> bool {
        !matches!(self, WriteMode::Dataset)
    }
}

/// The file meta information table: the elements of group 0002.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FileMetaTable {
    group: Item,
}

impl FileMetaTable {
    /// Create an empty table.
    pub fn new() -> Self {
        FileMetaTable::default()
    }

    /// Build a table from the group 0002 elements of an item.
    /// Elements of other groups are discarded.
    pub fn from_item(mut item: Item) -> Self {
        let before = item.len();
        item.retain(|e| e.tag().group() == 0x0002);
        if item.len() != before {
            warn!(
                "Discarding {} elements outside of the file meta group",
                before - item.len()
            );
        }
        FileMetaTable { group: item }
    }

    /// Read the file meta group from the current position of the source,
    /// stopping at the first element of another group.
    pub fn read_from<S>(source: &mut S) -> Result<Self>
    where
        S: ?Sized + ByteSource,
    {
        let mut reader =
            DatasetReader::new(&EXPLICIT_VR_LITTLE_ENDIAN, ReadOptions::new().only_group(0x0002));
        reader.init().context(ReadMetaSnafu)?;
        match reader.read(source).context(ReadMetaSnafu)? {
            Progress::Done => {}
            Progress::Suspended => return IncompleteMetaSnafu.fail(),
        }
        let group = reader.take_dataset().context(ReadMetaSnafu)?;
        debug!("Read file meta group of {} elements", group.len());
        Ok(FileMetaTable::from_item(group))
    }

    /// Write the table to the sink, as is.
    pub fn write_to<S>(&self, sink: &mut S) -> Result<()>
    where
        S: ?Sized + ByteSink,
    {
        write_dataset(sink, &self.group, &EXPLICIT_VR_LITTLE_ENDIAN, WriteOptions::new())
            .context(WriteMetaSnafu)
    }

    pub fn item(&self) -> &Item {
        &self.group
    }

    pub fn item_mut(&mut self) -> &mut Item {
        &mut self.group
    }

    pub fn into_item(self) -> Item {
        self.group
    }

    /// The number of bytes of the encoded table.
    pub fn calc_length(&self) -> u32 {
        self.group
            .calc_length(&EXPLICIT_VR_LITTLE_ENDIAN, EncodingType::ExplicitLength)
    }

    fn text(&self, tag: Tag) -> Option<Cow<'_, str>> {
        self.group.get(tag).and_then(|e| e.to_str().ok())
    }

    /// The transfer syntax UID of the data set.
    pub fn transfer_syntax(&self) -> Option<Cow<'_, str>> {
        self.text(tags::TRANSFER_SYNTAX_UID)
    }

    /// The transfer syntax UID of the data set, which must be present.
    pub fn require_transfer_syntax(&self) -> Result<Cow<'_, str>> {
        self.transfer_syntax().context(MissingElementSnafu {
            alias: "TransferSyntaxUID",
        })
    }

    pub fn media_storage_sop_class_uid(&self) -> Option<Cow<'_, str>> {
        self.text(tags::MEDIA_STORAGE_SOP_CLASS_UID)
    }

    pub fn media_storage_sop_instance_uid(&self) -> Option<Cow<'_, str>> {
        self.text(tags::MEDIA_STORAGE_SOP_INSTANCE_UID)
    }

    pub fn implementation_class_uid(&self) -> Option<Cow<'_, str>> {
        self.text(tags::IMPLEMENTATION_CLASS_UID)
    }

    pub fn implementation_version_name(&self) -> Option<Cow<'_, str>> {
        self.text(tags::IMPLEMENTATION_VERSION_NAME)
    }

    /// Complete and update the table before writing `dataset`
    /// in the transfer syntax `ts`.
    ///
    /// The meta information version is set if missing,
    /// the SOP class and instance UIDs are taken from the data set
    /// (always with [`WriteMode::UpdateMeta`], only if missing otherwise),
    /// the transfer syntax and implementation elements are replaced,
    /// and the group length is recalculated.
    pub fn update(&mut self, dataset: &Item, ts: &TransferSyntax, mode: WriteMode) {
        let group = &mut self.group;
        let regenerate = mode == WriteMode::UpdateMeta;

        if !group.contains(tags::FILE_META_INFORMATION_VERSION) {
            group.put(DataElement::from_bytes(
                tags::FILE_META_INFORMATION_VERSION,
                VR::OB,
                META_VERSION.to_vec(),
            ));
        }

        let uids = [
            (
                tags::MEDIA_STORAGE_SOP_CLASS_UID,
                tags::SOP_CLASS_UID,
                UidFallback::PrivateClass,
            ),
            (
                tags::MEDIA_STORAGE_SOP_INSTANCE_UID,
                tags::SOP_INSTANCE_UID,
                UidFallback::Generate,
            ),
        ];
        for (meta_tag, dataset_tag, fallback) in uids {
            if !regenerate && group.contains(meta_tag) {
                continue;
            }
            let uid = match dataset.get(dataset_tag).and_then(|e| e.to_str().ok()) {
                Some(uid) if !uid.is_empty() => uid.into_owned(),
                _ => {
                    let uid = fallback.uid();
                    debug!("No {} in the data set, using {} for {}", dataset_tag, uid, meta_tag);
                    uid
                }
            };
            group.put_str(meta_tag, VR::UI, &uid);
        }

        group.put_str(tags::TRANSFER_SYNTAX_UID, VR::UI, ts.uid());
        group.put_str(tags::IMPLEMENTATION_CLASS_UID, VR::UI, IMPLEMENTATION_CLASS_UID);
        group.put_str(
            tags::IMPLEMENTATION_VERSION_NAME,
            VR::SH,
            IMPLEMENTATION_VERSION_NAME,
        );

        group.update_group_lengths(
            GroupLength::WithGroupLength,
            &EXPLICIT_VR_LITTLE_ENDIAN,
            EncodingType::ExplicitLength,
        );
    }
}

#[derive(Debug, Copy, Clone)]
enum UidFallback {
    PrivateClass,
    Generate,
}

impl UidFallback {
    fn uid(self) -> String {
        match self {
            UidFallback::PrivateClass => PRIVATE_GENERIC_FILE_SOP_CLASS_UID.to_string(),
            UidFallback::Generate => generate_uid(),
        }
    }
}

/// Generate a new unique identifier
/// in the `2.25` arc of UUID derived identifiers.
pub fn generate_uid() -> String {
    let n: u128 = rand::thread_rng().gen();
    format!("2.25.{}", n)
}

/// Complete the file meta group of a data set about to be written.
///
/// With [`WriteMode::Dataset`] the table is left untouched.
pub fn validate_meta_info(
    meta: &mut FileMetaTable,
    dataset: &Item,
    ts: &TransferSyntax,
    mode: WriteMode,
) {
    if mode.writes_meta() {
        meta.update(dataset, ts, mode);
    }
}
