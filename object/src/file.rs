//! Whole-file loading and saving.
//!
//! A [`FileFormat`] pairs a data set with its file meta group.
//! Loading and saving run the resumable data set reader and writer
//! to completion over a file,
//! so each is a single all-or-nothing operation.
use crate::mem::{self, Item, Value};
use crate::meta::{validate_meta_info, FileMetaTable, WriteMode};
use crate::read::DatasetReader;
use crate::write::write_dataset;
use crate::{pixeldata, ReadError, WriteError};
use crate::{
    CannotChangeRepresentationSnafu, CreateFileSnafu, DeflateSnafu, InflateSnafu, InvalidOptionsSnafu,
    LoadValuesSnafu, NotDicomSnafu, OpenFileSnafu, ParseMetaDataSetSnafu, PrematureEndSnafu,
    PrintDataSetSnafu, PrintMetaDataSetSnafu, ReadDataSetSnafu, ReadFileSnafu,
    ReadPreambleBytesSnafu, ReadUnsupportedTransferSyntaxSnafu, UndetectableTransferSyntaxSnafu,
    WriteFileSnafu, WriteMagicCodeSnafu, WritePreambleSnafu,
};
use byteordered::byteorder::{ByteOrder, LittleEndian};
use dcmio_core::stream::{ByteSource, Progress, ReadSource, WriteSink};
use dcmio_core::Tag;
use dcmio_encoding::{TransferSyntax, TransferSyntaxIndex};
use dcmio_parser::dataset::{ReadOptions, WriteOptions};
use dcmio_parser::detect_transfer_syntax;
use dcmio_transfer_syntax_registry::entries::EXPLICIT_VR_LITTLE_ENDIAN;
use dcmio_transfer_syntax_registry::{deflate, CodecRegistry, TransferSyntaxRegistry};
use snafu::{ensure, OptionExt, ResultExt};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

const DICM_MAGIC_CODE: [u8; 4] = *b"DICM";
const PREAMBLE_LEN: usize = 128;

/// Load a file with the default options.
pub fn open_file<P>(path: P) -> Result<FileFormat, ReadError>
where
    P: AsRef<Path>,
{
    OpenFileOptions::new().open_file(path)
}

/// Whether a file starts with a 128-byte preamble.
#[derive(Debug, Default, Copy, Clone, Eq, Hash, PartialEq)]
pub enum ReadPreamble {
    /// Look for the magic code after a preamble,
    /// and read from the start of the file if it is not there.
    #[default]
    Auto,
    /// The file has no preamble.
    Never,
    /// The file has a preamble, followed by the magic code.
    Always,
}

/// What a file is expected to contain.
#[derive(Debug, Default, Copy, Clone, Eq, Hash, PartialEq)]
pub enum ReadMode {
    /// A file meta group followed by the data set,
    /// or a bare data set if no meta group is found.
    #[default]
    FileFormat,
    /// A bare data set.
    Dataset,
}

/// A builder of options for loading a file.
///
/// ```no_run
/// # use dcmio_object::OpenFileOptions;
/// let file = OpenFileOptions::new()
///     .read_until(dcmio_dictionary_std::tags::PIXEL_DATA)
///     .open_file("path/to/file.dcm")?;
/// # Result::<(), dcmio_object::ReadError>::Ok(())
/// ```
#[derive(Debug, Default, Clone)]
#[non_exhaustive]
pub struct OpenFileOptions {
    pub read_preamble: ReadPreamble,
    pub read_mode: ReadMode,
    /// The transfer syntax of a data set without meta group.
    /// Detected from the first bytes of the data set if `None`.
    pub transfer_syntax: Option<TransferSyntax>,
    pub read_options: ReadOptions,
    pub read_until: Option<Tag>,
}

impl OpenFileOptions {
    pub fn new() -> Self {
        OpenFileOptions::default()
    }

    pub fn read_preamble(mut self, option: ReadPreamble) -> Self {
        self.read_preamble = option;
        self
    }

    pub fn read_mode(mut self, mode: ReadMode) -> Self {
        self.read_mode = mode;
        self
    }

    /// Set the transfer syntax of a data set without meta group.
    pub fn transfer_syntax(mut self, ts: TransferSyntax) -> Self {
        self.transfer_syntax = Some(ts);
        self
    }

    pub fn read_options(mut self, options: ReadOptions) -> Self {
        self.read_options = options;
        self
    }

    /// Stop reading at the first top level element
    /// with this tag or a greater one,
    /// which is left out along with all following elements.
    pub fn read_until(mut self, tag: Tag) -> Self {
        self.read_until = Some(tag);
        self
    }

    /// Read the data set to the end. This is the default.
    pub fn read_all(mut self) -> Self {
        self.read_until = None;
        self
    }

    pub fn open_file<P>(&self, path: P) -> Result<FileFormat, ReadError>
    where
        P: AsRef<Path>,
    {
        FileFormat::load_file(path, self)
    }
}

/// A builder of options for saving a file.
#[derive(Debug, Default, Copy, Clone)]
#[non_exhaustive]
pub struct SaveFileOptions {
    pub write_mode: WriteMode,
    /// The transfer syntax to write in,
    /// or `None` to keep the current one.
    pub transfer_syntax: Option<TransferSyntax>,
    pub write_options: WriteOptions,
}

impl SaveFileOptions {
    pub fn new() -> Self {
        SaveFileOptions::default()
    }

    pub fn write_mode(mut self, mode: WriteMode) -> Self {
        self.write_mode = mode;
        self
    }

    pub fn transfer_syntax(mut self, ts: TransferSyntax) -> Self {
        self.transfer_syntax = Some(ts);
        self
    }

    pub fn write_options(mut self, options: WriteOptions) -> Self {
        self.write_options = options;
        self
    }
}

/// A data set with its file meta group.
pub struct FileFormat {
    meta: Option<FileMetaTable>,
    dataset: Item,
    ts: TransferSyntax,
    /// the transfer syntax the data set was read in
    original_ts: Option<TransferSyntax>,
    /// where deferred values of the data set can be loaded from
    source: Option<Box<dyn ByteSource + Send>>,
}

impl fmt::Debug for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FileFormat")
            .field("meta", &self.meta)
            .field("dataset", &self.dataset)
            .field("ts", &self.ts.uid())
            .field("original_ts", &self.original_ts.as_ref().map(|ts| ts.uid()))
            .field("source", &self.source.as_ref().map(|_| ".."))
            .finish()
    }
}

impl FileFormat {
    /// Create a file from a data set in the given transfer syntax,
    /// without meta group.
    /// The meta group is created when the file is saved.
    pub fn new(dataset: Item, ts: &TransferSyntax) -> Self {
        FileFormat {
            meta: None,
            dataset,
            ts: *ts,
            original_ts: None,
            source: None,
        }
    }

    pub fn with_meta(meta: FileMetaTable, dataset: Item, ts: &TransferSyntax) -> Self {
        FileFormat {
            meta: Some(meta),
            ..FileFormat::new(dataset, ts)
        }
    }

    /// Load a file from the file system.
    pub fn load_file<P>(path: P, options: &OpenFileOptions) -> Result<Self, ReadError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).context(OpenFileSnafu { filename: path })?;
        let source =
            ReadSource::new(BufReader::new(file)).context(ReadFileSnafu { filename: path })?;
        debug!("Loading {}", path.display());
        FileFormat::from_source(source, options)
    }

    /// Load a file from a byte source holding all of its bytes.
    ///
    /// Values longer than the maximum read length are only loaded
    /// on demand if the source is seekable,
    /// which is why the source is kept.
    pub fn from_source<S>(mut source: S, options: &OpenFileOptions) -> Result<Self, ReadError>
    where
        S: ByteSource + Send + 'static,
    {
        let has_meta = match options.read_mode {
            ReadMode::FileFormat => read_preamble(&mut source, options.read_preamble)?,
            ReadMode::Dataset => false,
        };
        let meta = if has_meta {
            Some(FileMetaTable::read_from(&mut source).context(ParseMetaDataSetSnafu)?)
        } else {
            None
        };

        let ts = match meta.as_ref().and_then(|m| m.transfer_syntax()) {
            Some(uid) => *TransferSyntaxRegistry
                .get(&uid)
                .context(ReadUnsupportedTransferSyntaxSnafu { uid: uid.as_ref() })?,
            None => match options.transfer_syntax {
                Some(ts) => ts,
                None => detect(&mut source)?,
            },
        };
        debug!("Data set transfer syntax is {}", ts.name());

        let mut reader = DatasetReader::new(&ts, options.read_options);
        if let Some(tag) = options.read_until {
            reader = reader.read_until(tag);
        }
        reader.init().context(ReadDataSetSnafu)?;

        let (dataset, source): (Item, Box<dyn ByteSource + Send>) = if ts.is_deflated() {
            let deflated = read_rest(&mut source)?;
            let inflated = deflate::inflate(&deflated).context(InflateSnafu)?;
            debug!("Inflated {} bytes into {}", deflated.len(), inflated.len());
            let mut inflated = ReadSource::new(Cursor::new(inflated)).context(InflateSnafu)?;
            (read_all(&mut reader, &mut inflated)?, Box::new(inflated))
        } else {
            (read_all(&mut reader, &mut source)?, Box::new(source))
        };

        Ok(FileFormat {
            meta,
            dataset,
            ts,
            original_ts: Some(ts),
            source: Some(source),
        })
    }

    pub fn meta(&self) -> Option<&FileMetaTable> {
        self.meta.as_ref()
    }

    pub fn meta_mut(&mut self) -> Option<&mut FileMetaTable> {
        self.meta.as_mut()
    }

    pub fn dataset(&self) -> &Item {
        &self.dataset
    }

    pub fn dataset_mut(&mut self) -> &mut Item {
        &mut self.dataset
    }

    /// The transfer syntax which the data set is represented in.
    pub fn transfer_syntax(&self) -> &TransferSyntax {
        &self.ts
    }

    /// The transfer syntax the data set was read in,
    /// or `None` for data sets built in memory.
    pub fn original_transfer_syntax(&self) -> Option<&TransferSyntax> {
        self.original_ts.as_ref()
    }

    /// Take the current transfer syntax as the original one,
    /// e.g. once the file was saved in it.
    pub fn update_original_transfer_syntax(&mut self) {
        self.original_ts = Some(self.ts);
    }

    pub fn into_parts(self) -> (Option<FileMetaTable>, Item) {
        (self.meta, self.dataset)
    }

    /// Load all deferred values,
    /// after which the source of the file is released.
    pub fn load_all_values(&mut self) -> Result<(), mem::Error> {
        if let Some(source) = self.source.as_mut() {
            self.dataset.load_all_values(source.as_mut())?;
        }
        self.source = None;
        Ok(())
    }

    /// Remove group length elements of empty groups,
    /// meta group elements from the data set
    /// and other elements from the meta group.
    pub fn remove_invalid_groups(&mut self) {
        self.dataset.remove_invalid_groups();
        self.dataset.remove_group(0x0002);
        if let Some(meta) = self.meta.take() {
            let mut group = meta.into_item();
            group.remove_invalid_groups();
            self.meta = Some(FileMetaTable::from_item(group));
        }
    }

    /// Convert the pixel data to the representation of `target`,
    /// which becomes the transfer syntax of the file.
    pub fn choose_representation(
        &mut self,
        target: &TransferSyntax,
        codecs: &CodecRegistry,
    ) -> Result<(), pixeldata::Error> {
        self.load_all_values()
            .map_err(|source| pixeldata::Error::LoadPixelData { source })?;
        pixeldata::choose_representation(&mut self.dataset, &self.ts, target, codecs)?;
        self.ts = *target;
        Ok(())
    }

    /// Check that the pixel data can be written in `ts` as it is.
    fn check_representation(&self, ts: &TransferSyntax) -> Result<(), WriteError> {
        let encapsulated = match self.dataset.get(Tag::PIXEL_DATA).map(|e| e.value()) {
            None => return Ok(()),
            Some(Value::PixelSequence(_)) => true,
            Some(_) => false,
        };
        let compatible = if encapsulated {
            ts.uid() == self.ts.uid()
        } else {
            !ts.is_encapsulated_pixel_data()
        };
        ensure!(
            compatible,
            CannotChangeRepresentationSnafu {
                from: self.ts.name(),
                to: ts.name(),
            }
        );
        Ok(())
    }

    /// Save the file to the file system.
    ///
    /// The file is first written next to its destination
    /// and only moved into place once complete,
    /// so a failure never leaves a partial file behind.
    pub fn save_file<P>(&mut self, path: P, options: &SaveFileOptions) -> Result<(), WriteError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).context(CreateFileSnafu { filename: dir })?;
        {
            let mut to = BufWriter::new(tmp.as_file_mut());
            self.write_to(&mut to, options)?;
            to.flush().context(WriteFileSnafu { filename: path })?;
        }
        tmp.persist(path)
            .map_err(|e| e.error)
            .context(WriteFileSnafu { filename: path })?;
        info!("Saved {}", path.display());
        Ok(())
    }

    /// Write the file to a writer.
    ///
    /// All deferred values are loaded,
    /// invalid groups are removed,
    /// the meta group is completed according to the write mode,
    /// and group lengths and padding are set up
    /// according to the write options.
    pub fn write_to<W>(&mut self, mut to: W, options: &SaveFileOptions) -> Result<(), WriteError>
    where
        W: Write,
    {
        let ts = options.transfer_syntax.unwrap_or(self.ts);
        let write_options = options.write_options;
        write_options.validate().context(InvalidOptionsSnafu)?;
        self.load_all_values().context(LoadValuesSnafu)?;
        self.remove_invalid_groups();
        self.check_representation(&ts)?;

        let mode = options.write_mode;
        let preceding = if mode.writes_meta() {
            let meta = self.meta.get_or_insert_with(FileMetaTable::new);
            validate_meta_info(meta, &self.dataset, &ts, mode);
            (PREAMBLE_LEN + DICM_MAGIC_CODE.len()) as u32 + meta.calc_length()
        } else {
            0
        };
        self.dataset.prepare_for_write(&write_options, &ts, preceding);

        if let (true, Some(meta)) = (mode.writes_meta(), self.meta.as_ref()) {
            to.write_all(&[0; PREAMBLE_LEN]).context(WritePreambleSnafu)?;
            to.write_all(&DICM_MAGIC_CODE).context(WriteMagicCodeSnafu)?;
            meta.write_to(&mut WriteSink::new(&mut to))
                .context(PrintMetaDataSetSnafu)?;
        }

        if ts.is_deflated() {
            let mut sink = WriteSink::new(deflate::adapt_writer(&mut to));
            write_dataset(&mut sink, &self.dataset, &ts, write_options)
                .context(PrintDataSetSnafu)?;
            sink.into_inner().finish().context(DeflateSnafu)?;
        } else {
            let mut sink = WriteSink::new(&mut to);
            write_dataset(&mut sink, &self.dataset, &ts, write_options)
                .context(PrintDataSetSnafu)?;
        }
        self.ts = ts;
        Ok(())
    }
}

/// Consume the preamble and magic code, if any.
/// Returns whether a meta group follows.
fn read_preamble<S>(source: &mut S, option: ReadPreamble) -> Result<bool, ReadError>
where
    S: ?Sized + ByteSource,
{
    let mut buf = [0u8; PREAMBLE_LEN + 4];
    let n = source.peek(&mut buf).context(ReadPreambleBytesSnafu)?;
    let head = &buf[..n];
    let magic_at = |i: usize| head.get(i..i + 4) == Some(&DICM_MAGIC_CODE[..]);

    let skip = match option {
        ReadPreamble::Always => {
            ensure!(magic_at(PREAMBLE_LEN), NotDicomSnafu);
            PREAMBLE_LEN + 4
        }
        ReadPreamble::Auto if magic_at(PREAMBLE_LEN) => PREAMBLE_LEN + 4,
        _ if magic_at(0) => 4,
        _ => {
            let meta_group = head.len() >= 2 && LittleEndian::read_u16(&head[..2]) == 0x0002;
            if !meta_group {
                debug!("No file meta group, reading a bare data set");
            }
            return Ok(meta_group);
        }
    };
    source.skip(skip as u64).context(ReadPreambleBytesSnafu)?;
    Ok(true)
}

/// Detect the transfer syntax of a bare data set.
fn detect<S>(source: &mut S) -> Result<TransferSyntax, ReadError>
where
    S: ?Sized + ByteSource,
{
    let mut head = [0u8; 6];
    let n = source.peek(&mut head).context(ReadPreambleBytesSnafu)?;
    if n < head.len() {
        warn!("Data set too short to detect its transfer syntax");
        return Ok(EXPLICIT_VR_LITTLE_ENDIAN);
    }
    let ts = detect_transfer_syntax(&head).context(UndetectableTransferSyntaxSnafu)?;
    debug!("Detected transfer syntax {}", ts.name());
    Ok(ts)
}

fn read_rest<S>(source: &mut S) -> Result<Vec<u8>, ReadError>
where
    S: ?Sized + ByteSource,
{
    let mut out = Vec::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = source.read_some(&mut buf).context(ReadPreambleBytesSnafu)?;
        if n == 0 {
            return Ok(out);
        }
        out.extend_from_slice(&buf[..n]);
    }
}

fn read_all<S>(reader: &mut DatasetReader, source: &mut S) -> Result<Item, ReadError>
where
    S: ?Sized + ByteSource,
{
    match reader.read(source).context(ReadDataSetSnafu)? {
        Progress::Done => reader.take_dataset().context(ReadDataSetSnafu),
        Progress::Suspended => PrematureEndSnafu.fail(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mem::DataElement;
    use dcmio_core::stream::BufferSource;
    use dcmio_core::VR;
    use dcmio_dictionary_std::tags;
    use dcmio_transfer_syntax_registry::entries::{IMPLICIT_VR_LITTLE_ENDIAN, RLE_LOSSLESS};

    fn dataset() -> Item {
        let mut item = Item::new();
        item.put_str(tags::SOP_CLASS_UID, VR::UI, "1.2.840.10008.5.1.4.1.1.7");
        item.put_str(tags::SOP_INSTANCE_UID, VR::UI, "2.25.1234");
        item.put_str(tags::PATIENT_NAME, VR::PN, "SMITH^J");
        item
    }

    fn to_bytes(file: &mut FileFormat, options: &SaveFileOptions) -> Vec<u8> {
        let mut out = Vec::new();
        file.write_to(&mut out, options).unwrap();
        out
    }

    #[test]
    fn file_format_layout() {
        let mut file = FileFormat::new(dataset(), &IMPLICIT_VR_LITTLE_ENDIAN);
        let bytes = to_bytes(&mut file, &SaveFileOptions::new());
        assert!(bytes[..128].iter().all(|b| *b == 0));
        assert_eq!(&bytes[128..132], b"DICM");
        // (0002,0000) UL 4
        assert_eq!(&bytes[132..140], &[0x02, 0x00, 0x00, 0x00, b'U', b'L', 0x04, 0x00]);
        let meta = file.meta().unwrap();
        let data_start = 132 + meta.calc_length() as usize;
        // the data set is implicit VR
        assert_eq!(&bytes[data_start..data_start + 4], &[0x08, 0x00, 0x16, 0x00]);
        assert_eq!(&bytes[data_start + 4..data_start + 8], &[26, 0, 0, 0]);
    }

    #[test]
    fn read_back_with_and_without_preamble() {
        let mut file = FileFormat::new(dataset(), &IMPLICIT_VR_LITTLE_ENDIAN);
        let bytes = to_bytes(&mut file, &SaveFileOptions::new());

        let back = FileFormat::from_source(BufferSource::from_bytes(bytes.clone()), &OpenFileOptions::new())
            .unwrap();
        assert_eq!(back.dataset(), &dataset());
        assert_eq!(back.transfer_syntax(), &IMPLICIT_VR_LITTLE_ENDIAN);
        assert_eq!(back.original_transfer_syntax(), Some(&IMPLICIT_VR_LITTLE_ENDIAN));
        assert_eq!(back.meta(), file.meta());

        assert!(file.original_transfer_syntax().is_none());
        file.update_original_transfer_syntax();
        assert_eq!(file.original_transfer_syntax(), Some(&IMPLICIT_VR_LITTLE_ENDIAN));

        let no_preamble = bytes[128..].to_vec();
        let back = FileFormat::from_source(BufferSource::from_bytes(no_preamble), &OpenFileOptions::new())
            .unwrap();
        assert_eq!(back.dataset(), &dataset());

        let err = FileFormat::from_source(
            BufferSource::from_bytes(bytes[132..].to_vec()),
            &OpenFileOptions::new().read_preamble(ReadPreamble::Always),
        )
        .unwrap_err();
        assert!(matches!(err, ReadError::NotDicom { .. }));
    }

    #[test]
    fn bare_data_set_is_detected() {
        let mut file = FileFormat::new(dataset(), &IMPLICIT_VR_LITTLE_ENDIAN);
        let bytes = to_bytes(
            &mut file,
            &SaveFileOptions::new().write_mode(WriteMode::Dataset),
        );
        assert_eq!(&bytes[..4], &[0x08, 0x00, 0x16, 0x00]);
        let back = FileFormat::from_source(BufferSource::from_bytes(bytes), &OpenFileOptions::new())
            .unwrap();
        assert!(back.meta().is_none());
        assert_eq!(back.transfer_syntax(), &IMPLICIT_VR_LITTLE_ENDIAN);
        assert_eq!(back.dataset(), &dataset());
    }

    #[test]
    fn meta_elements_leave_the_data_set() {
        let mut item = dataset();
        item.put_str(tags::TRANSFER_SYNTAX_UID, VR::UI, "1.2.840.10008.1.2");
        let mut file = FileFormat::new(item, &IMPLICIT_VR_LITTLE_ENDIAN);
        file.remove_invalid_groups();
        assert_eq!(file.dataset(), &dataset());
    }

    #[test]
    fn encapsulated_pixel_data_needs_a_matching_syntax() {
        let mut item = dataset();
        item.put(DataElement::new_pixel_sequence(vec![], vec![vec![0; 4]]));
        let mut file = FileFormat::new(item, &RLE_LOSSLESS);
        let mut out = Vec::new();
        let err = file
            .write_to(
                &mut out,
                &SaveFileOptions::new().transfer_syntax(IMPLICIT_VR_LITTLE_ENDIAN),
            )
            .unwrap_err();
        assert!(matches!(err, WriteError::CannotChangeRepresentation { .. }));
    }
}
