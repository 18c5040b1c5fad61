//! Building in-memory data sets from a token stream.
//!
//! The [`DatasetReader`] drives a [`DataSetReader`] over a byte source
//! and assembles the tokens into an [`Item`],
//! suspending whenever the source runs dry.
use crate::mem::{DataElement, Item, Value};
use crate::validate::ValidationError;
use crate::TransferState;
use dcmio_core::header::DataElementHeader;
use dcmio_core::stream::{ByteSource, Progress};
use dcmio_core::Tag;
use dcmio_encoding::TransferSyntax;
use dcmio_parser::dataset::read::Error as ParserError;
use dcmio_parser::dataset::{DataSetReader, DataToken, Next, ReadOptions};
use snafu::{ensure, Backtrace, OptionExt, ResultExt, Snafu};
use tracing::{debug, warn};

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("Illegal call: {}", message))]
    IllegalCall {
        message: &'static str,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not read data set token"))]
    ReadToken {
        #[snafu(backtrace)]
        source: ParserError,
    },
    #[snafu(display("Unexpected token {}", token))]
    UnexpectedToken {
        token: Box<DataToken>,
        backtrace: Backtrace,
    },
    #[snafu(display("Element {} has no value", tag))]
    MissingElementValue { tag: Tag, backtrace: Backtrace },
    #[snafu(display("Data set ended with {} open sequences or items", depth))]
    PrematureEnd { depth: usize, backtrace: Backtrace },
    #[snafu(display("Unsupported element value"))]
    UnsupportedValue {
        #[snafu(backtrace)]
        source: ValidationError,
    },
    #[snafu(display("Reading failed earlier, the data set is incomplete"))]
    Failed { backtrace: Backtrace },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug)]
enum Frame {
    Item(Item),
    Sequence { tag: Tag, items: Vec<Item> },
    PixelSequence {
        offset_table: Vec<u32>,
        fragments: Vec<Vec<u8>>,
    },
    /// an item of a pixel sequence
    Fragment,
}

/// A resumable reader of whole data sets.
///
/// The reader must be initialized with [`init`](Self::init)
/// before reading.
/// Each call to [`read`](Self::read) consumes as many bytes
/// as the source has available;
/// once it reports [`Progress::Done`],
/// the data set can be retrieved with [`take_dataset`](Self::take_dataset).
#[derive(Debug)]
pub struct DatasetReader {
    ts: TransferSyntax,
    options: ReadOptions,
    read_until: Option<Tag>,
    reader: Option<DataSetReader>,
    state: TransferState,
    stack: Vec<Frame>,
    pending: Option<DataElementHeader>,
    dataset: Option<Item>,
    failed: bool,
}

impl DatasetReader {
    pub fn new(ts: &TransferSyntax, options: ReadOptions) -> Self {
        DatasetReader {
            ts: *ts,
            options,
            read_until: None,
            reader: None,
            state: TransferState::NotInitialized,
            stack: Vec::new(),
            pending: None,
            dataset: None,
            failed: false,
        }
    }

    /// Stop reading at the first top level element
    /// with a tag greater than or equal to `tag`.
    /// That element and all following ones are left out.
    pub fn read_until(mut self, tag: Tag) -> Self {
        self.read_until = Some(tag);
        self
    }

    /// Prepare the reader for a new data set,
    /// discarding anything read before.
    pub fn init(&mut self) -> Result<()> {
        let reader = DataSetReader::new(&self.ts, self.options).context(ReadTokenSnafu)?;
        self.reader = Some(reader);
        self.stack = vec![Frame::Item(Item::new())];
        self.pending = None;
        self.dataset = None;
        self.failed = false;
        self.state = TransferState::Init;
        Ok(())
    }

    #[inline]
    pub fn state(&self) -> TransferState {
        self.state
    }

    #[inline]
    pub fn transfer_syntax(&self) -> &TransferSyntax {
        &self.ts
    }

    /// Read from the source until the data set is complete
    /// or the source has no more bytes for now.
    pub fn read<S>(&mut self, source: &mut S) -> Result<Progress>
    where
        S: ?Sized + ByteSource,
    {
        match self.state {
            TransferState::NotInitialized => {
                return IllegalCallSnafu {
                    message: "reader was not initialized",
                }
                .fail()
            }
            TransferState::Ready => return Ok(Progress::Done),
            TransferState::Init | TransferState::InWork => {}
        }
        ensure!(!self.failed, FailedSnafu);
        self.state = TransferState::InWork;

        let progress = self.read_tokens(source);
        if progress.is_err() {
            self.failed = true;
        }
        progress
    }

    /// Whether a previous call to [`read`](Self::read) failed.
    /// The reader stays failed until it is initialized again.
    #[inline]
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    fn read_tokens<S>(&mut self, source: &mut S) -> Result<Progress>
    where
        S: ?Sized + ByteSource,
    {
        loop {
            let next = self
                .reader
                .as_mut()
                .context(IllegalCallSnafu {
                    message: "reader was not initialized",
                })?
                .next_token(source)
                .context(ReadTokenSnafu)?;
            match next {
                Next::Suspended => return Ok(Progress::Suspended),
                Next::End => {
                    self.finish()?;
                    return Ok(Progress::Done);
                }
                Next::Token(token) => {
                    if !self.accept(token)? {
                        self.finish()?;
                        return Ok(Progress::Done);
                    }
                }
            }
        }
    }

    /// Retrieve the data set once reading is done.
    pub fn take_dataset(&mut self) -> Result<Item> {
        ensure!(
            self.state == TransferState::Ready,
            IllegalCallSnafu {
                message: "data set is not complete",
            }
        );
        self.dataset.take().context(IllegalCallSnafu {
            message: "data set was already taken",
        })
    }

    /// The data set as far as it was read.
    ///
    /// After a failed read this holds the top level elements
    /// completed before the failure,
    /// which may help diagnose a damaged data set.
    pub fn partial_dataset(&self) -> Option<&Item> {
        match (&self.dataset, self.stack.first()) {
            (Some(item), _) => Some(item),
            (None, Some(Frame::Item(item))) => Some(item),
            _ => None,
        }
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(header) = self.pending.take() {
            return MissingElementValueSnafu { tag: header.tag }.fail();
        }
        ensure!(
            self.stack.len() == 1,
            PrematureEndSnafu {
                depth: self.stack.len() - 1,
            }
        );
        match self.stack.pop() {
            Some(Frame::Item(item)) => {
                debug!("Read data set of {} elements", item.len());
                self.dataset = Some(item);
                self.reader = None;
                self.state = TransferState::Ready;
                Ok(())
            }
            _ => PrematureEndSnafu { depth: 0usize }.fail(),
        }
    }

    /// Whether a top level element with this tag is past the stopping point.
    fn stops_at(&self, tag: Tag) -> bool {
        self.stack.len() == 1 && self.read_until.map(|until| tag >= until).unwrap_or(false)
    }

    /// Take in a token. Returns false when reading should stop.
    fn accept(&mut self, token: DataToken) -> Result<bool> {
        match token {
            DataToken::ElementHeader(header) => {
                if self.stops_at(header.tag) {
                    return Ok(false);
                }
                if let Some(pending) = self.pending {
                    return MissingElementValueSnafu { tag: pending.tag }.fail();
                }
                self.pending = Some(header);
            }
            DataToken::PrimitiveValue(value) => {
                let header = match self.pending.take() {
                    Some(header) => header,
                    None => {
                        return UnexpectedTokenSnafu {
                            token: Box::new(DataToken::PrimitiveValue(value)),
                        }
                        .fail()
                    }
                };
                let element = DataElement::new(header.tag, header.vr, Value::Primitive(value));
                element
                    .validate(self.options.strict)
                    .context(UnsupportedValueSnafu)?;
                self.put(element, "value")?;
            }
            DataToken::SequenceStart { tag, len } => {
                if self.stops_at(tag) {
                    return Ok(false);
                }
                self.expect_item(DataToken::SequenceStart { tag, len })?;
                self.stack.push(Frame::Sequence {
                    tag,
                    items: Vec::new(),
                });
            }
            DataToken::PixelSequenceStart => {
                if self.stops_at(Tag::PIXEL_DATA) {
                    return Ok(false);
                }
                self.expect_item(DataToken::PixelSequenceStart)?;
                self.stack.push(Frame::PixelSequence {
                    offset_table: Vec::new(),
                    fragments: Vec::new(),
                });
            }
            DataToken::ItemStart { len } => match self.stack.last() {
                Some(Frame::Sequence { .. }) => self.stack.push(Frame::Item(Item::new())),
                Some(Frame::PixelSequence { .. }) => self.stack.push(Frame::Fragment),
                _ => {
                    return UnexpectedTokenSnafu {
                        token: Box::new(DataToken::ItemStart { len }),
                    }
                    .fail()
                }
            },
            DataToken::ItemEnd => match self.stack.pop() {
                Some(Frame::Item(item)) => match self.stack.last_mut() {
                    Some(Frame::Sequence { items, .. }) => items.push(item),
                    _ => {
                        return UnexpectedTokenSnafu {
                            token: Box::new(DataToken::ItemEnd),
                        }
                        .fail()
                    }
                },
                Some(Frame::Fragment) => {}
                frame => {
                    self.stack.extend(frame);
                    return UnexpectedTokenSnafu {
                        token: Box::new(DataToken::ItemEnd),
                    }
                    .fail();
                }
            },
            DataToken::SequenceEnd => {
                let element = match self.stack.pop() {
                    Some(Frame::Sequence { tag, items }) => DataElement::new_sequence(tag, items),
                    Some(Frame::PixelSequence {
                        offset_table,
                        fragments,
                    }) => DataElement::new_pixel_sequence(offset_table, fragments),
                    frame => {
                        self.stack.extend(frame);
                        return UnexpectedTokenSnafu {
                            token: Box::new(DataToken::SequenceEnd),
                        }
                        .fail();
                    }
                };
                self.put(element, "sequence")?;
            }
            DataToken::OffsetTable(table) => match self.pixel_sequence() {
                Some((offset_table, _)) => *offset_table = table,
                None => {
                    return UnexpectedTokenSnafu {
                        token: Box::new(DataToken::OffsetTable(table)),
                    }
                    .fail()
                }
            },
            DataToken::ItemValue(fragment) => match self.pixel_sequence() {
                Some((_, fragments)) => fragments.push(fragment),
                None => {
                    return UnexpectedTokenSnafu {
                        token: Box::new(DataToken::ItemValue(fragment)),
                    }
                    .fail()
                }
            },
        }
        Ok(true)
    }

    /// Ensure that elements can be added at this point.
    fn expect_item(&self, token: DataToken) -> Result<()> {
        if let Some(pending) = self.pending {
            return MissingElementValueSnafu { tag: pending.tag }.fail();
        }
        match self.stack.last() {
            Some(Frame::Item(_)) => Ok(()),
            _ => UnexpectedTokenSnafu {
                token: Box::new(token),
            }
            .fail(),
        }
    }

    fn put(&mut self, element: DataElement, what: &'static str) -> Result<()> {
        match self.stack.last_mut() {
            Some(Frame::Item(item)) => {
                let tag = element.tag();
                if item.put(element).is_some() {
                    warn!("Duplicate element {} replaced by a later {}", tag, what);
                }
                Ok(())
            }
            _ => IllegalCallSnafu {
                message: "element outside of an item",
            }
            .fail(),
        }
    }

    /// The pixel sequence holding the current fragment.
    fn pixel_sequence(&mut self) -> Option<(&mut Vec<u32>, &mut Vec<Vec<u8>>)> {
        let n = self.stack.len();
        if !matches!(self.stack.last(), Some(Frame::Fragment)) {
            return None;
        }
        match self.stack.get_mut(n.checked_sub(2)?) {
            Some(Frame::PixelSequence {
                offset_table,
                fragments,
            }) => Some((offset_table, fragments)),
            _ => None,
        }
    }
}

/// Read a whole data set from a source which holds all of its bytes.
pub fn read_dataset<S>(source: &mut S, ts: &TransferSyntax, options: ReadOptions) -> Result<Item>
where
    S: ?Sized + ByteSource,
{
    let mut reader = DatasetReader::new(ts, options);
    reader.init()?;
    match reader.read(source)? {
        Progress::Done => reader.take_dataset(),
        Progress::Suspended => PrematureEndSnafu {
            depth: reader.stack.len().saturating_sub(1),
        }
        .fail(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcmio_core::stream::BufferSource;
    use dcmio_core::VR;
    use dcmio_dictionary_std::tags;
    use dcmio_transfer_syntax_registry::entries::EXPLICIT_VR_LITTLE_ENDIAN;

    #[rustfmt::skip]
    static DATA: &[u8] = &[
        0x10, 0x00, 0x10, 0x00, b'P', b'N', 0x08, 0x00, b'S', b'M', b'I', b'T', b'H', b'^', b'J', 0x00,
        0x28, 0x00, 0x02, 0x00, b'U', b'S', 0x02, 0x00, 0x03, 0x00,
        0x0a, 0x30, 0xb0, 0x00, b'S', b'Q', 0x00, 0x00, 0xff, 0xff, 0xff, 0xff,
        0xfe, 0xff, 0x00, 0xe0, 0x0c, 0x00, 0x00, 0x00,
        0x0a, 0x30, 0xc2, 0x00, b'L', b'O', 0x04, 0x00, b'A', b'P', b'G', b' ',
        0xfe, 0xff, 0xdd, 0xe0, 0x00, 0x00, 0x00, 0x00,
        0xe0, 0x7f, 0x10, 0x00, b'O', b'B', 0x00, 0x00, 0xff, 0xff, 0xff, 0xff,
        0xfe, 0xff, 0x00, 0xe0, 0x00, 0x00, 0x00, 0x00,
        0xfe, 0xff, 0x00, 0xe0, 0x04, 0x00, 0x00, 0x00, 1, 2, 3, 4,
        0xfe, 0xff, 0xdd, 0xe0, 0x00, 0x00, 0x00, 0x00,
    ];

    #[test]
    fn read_whole_data_set() {
        let mut source = BufferSource::from_bytes(DATA);
        let item = read_dataset(&mut source, &EXPLICIT_VR_LITTLE_ENDIAN, ReadOptions::new()).unwrap();
        assert_eq!(item.len(), 4);

        let name = item.element(tags::PATIENT_NAME).unwrap();
        assert_eq!(name.vr(), VR::PN);
        assert_eq!(name.to_str().unwrap(), "SMITH^J");
        assert_eq!(name.header().len.0, 8);
        assert_eq!(item.element(tags::SAMPLES_PER_PIXEL).unwrap().uint16().unwrap(), 3);

        let beams = item.element(tags::BEAM_SEQUENCE).unwrap().value().items().unwrap();
        assert_eq!(beams.len(), 1);
        assert_eq!(beams[0].element(tags::BEAM_NAME).unwrap().to_str().unwrap(), "APG");

        let px = item
            .element(tags::PIXEL_DATA)
            .unwrap()
            .value()
            .pixel_sequence()
            .unwrap();
        assert!(px.offset_table().is_empty());
        assert_eq!(px.fragments(), &[vec![1, 2, 3, 4]]);
    }

    #[test]
    fn read_in_small_pieces() {
        let mut reader = DatasetReader::new(&EXPLICIT_VR_LITTLE_ENDIAN, ReadOptions::new());
        reader.init().unwrap();
        let mut source = BufferSource::new();
        let mut chunks = DATA.chunks(5);
        loop {
            match reader.read(&mut source).unwrap() {
                Progress::Done => break,
                Progress::Suspended => match chunks.next() {
                    Some(chunk) => source.feed(chunk),
                    None => source.finish(),
                },
            }
        }
        assert_eq!(reader.state(), TransferState::Ready);
        let item = reader.take_dataset().unwrap();

        let mut whole = BufferSource::from_bytes(DATA);
        let expected =
            read_dataset(&mut whole, &EXPLICIT_VR_LITTLE_ENDIAN, ReadOptions::new()).unwrap();
        assert_eq!(item, expected);
        assert!(reader.take_dataset().is_err());
    }

    #[test]
    fn reading_requires_init() {
        let mut reader = DatasetReader::new(&EXPLICIT_VR_LITTLE_ENDIAN, ReadOptions::new());
        let mut source = BufferSource::from_bytes(DATA);
        assert!(matches!(
            reader.read(&mut source),
            Err(Error::IllegalCall { .. })
        ));
        assert!(reader.take_dataset().is_err());
    }

    #[test]
    fn stop_before_pixel_data() {
        let mut reader = DatasetReader::new(&EXPLICIT_VR_LITTLE_ENDIAN, ReadOptions::new())
            .read_until(tags::PIXEL_DATA);
        reader.init().unwrap();
        let mut source = BufferSource::from_bytes(DATA);
        assert_eq!(reader.read(&mut source).unwrap(), Progress::Done);
        let item = reader.take_dataset().unwrap();
        assert_eq!(item.len(), 3);
        assert!(!item.contains(tags::PIXEL_DATA));
    }

    #[test]
    fn truncated_data_set_fails() {
        let mut source = BufferSource::from_bytes(&DATA[..60]);
        assert!(read_dataset(&mut source, &EXPLICIT_VR_LITTLE_ENDIAN, ReadOptions::new()).is_err());
    }

    #[test]
    fn partial_data_set_after_failure() {
        let mut reader = DatasetReader::new(&EXPLICIT_VR_LITTLE_ENDIAN, ReadOptions::new());
        assert!(reader.partial_dataset().is_none());
        reader.init().unwrap();
        let mut source = BufferSource::from_bytes(&DATA[..60]);
        assert!(reader.read(&mut source).is_err());

        let partial = reader.partial_dataset().unwrap();
        assert_eq!(partial.len(), 2);
        assert!(partial.contains(tags::PATIENT_NAME));
        assert!(!partial.contains(tags::BEAM_SEQUENCE));
    }

    #[test]
    fn read_after_failure_keeps_failing() {
        #[rustfmt::skip]
        let data: &[u8] = &[
            0x10, 0x00, 0x10, 0x00, b'P', b'N', 0x08, 0x00, b'S', b'M', b'I', b'T', b'H', b'^', b'J', 0x00,
            0xfe, 0xff, 0x00, 0xe0, 0x00, 0x00, 0x00, 0x00,
            0x28, 0x00, 0x02, 0x00, b'U', b'S', 0x02, 0x00, 0x03, 0x00,
        ];
        let mut reader = DatasetReader::new(&EXPLICIT_VR_LITTLE_ENDIAN, ReadOptions::new());
        reader.init().unwrap();
        let mut source = BufferSource::from_bytes(data);
        assert!(reader.read(&mut source).is_err());
        assert!(reader.has_failed());

        let err = reader.read(&mut source).unwrap_err();
        assert!(matches!(err, Error::Failed { .. }));
        assert_eq!(reader.state(), TransferState::InWork);
        assert!(reader.take_dataset().is_err());
        assert!(reader.partial_dataset().unwrap().contains(tags::PATIENT_NAME));

        reader.init().unwrap();
        assert!(!reader.has_failed());
    }
}
