//! Writing in-memory data sets as a token stream.
//!
//! The [`DatasetWriter`] walks a data set one element at a time
//! and feeds the resulting tokens to a [`DataSetWriter`],
//! suspending whenever the sink is full.
//! Its position in the data set is kept as a path of indices,
//! so the data set is only borrowed for the duration of each call.
use crate::mem::{DataElement, Item, Value};
use crate::TransferState;
use dcmio_core::header::{DataElementHeader, Length};
use dcmio_core::stream::{ByteSink, Progress};
use dcmio_encoding::TransferSyntax;
use dcmio_parser::dataset::write::Error as ParserError;
use dcmio_parser::dataset::{DataSetWriter, DataToken, EncodingType, WriteOptions};
use snafu::{Backtrace, OptionExt, ResultExt, Snafu};
use std::collections::VecDeque;

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("Illegal call: {}", message))]
    IllegalCall {
        message: &'static str,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not write data set token"))]
    WriteToken {
        #[snafu(backtrace)]
        source: ParserError,
    },
    /// The data set no longer matches the position of the writer.
    #[snafu(display("Data set changed while it was being written"))]
    TreeChanged { backtrace: Backtrace },
    #[snafu(display("Sink stopped accepting bytes"))]
    SinkSuspended { backtrace: Backtrace },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// One level of the current position in the data set.
#[derive(Debug, Copy, Clone, PartialEq)]
enum Level {
    /// within an item, before the element at `next`
    Item { next: usize },
    /// within a sequence, before the item at `next`
    Sequence { next: usize },
    /// within encapsulated pixel data,
    /// before the offset table (0) or fragment `next - 1`
    Pixel { next: usize },
}

/// A resumable writer of whole data sets.
#[derive(Debug)]
pub struct DatasetWriter {
    ts: TransferSyntax,
    options: WriteOptions,
    writer: Option<DataSetWriter>,
    state: TransferState,
    levels: Vec<Level>,
    queue: VecDeque<DataToken>,
}

impl DatasetWriter {
    pub fn new(ts: &TransferSyntax, options: WriteOptions) -> Self {
        DatasetWriter {
            ts: *ts,
            options,
            writer: None,
            state: TransferState::NotInitialized,
            levels: Vec::new(),
            queue: VecDeque::new(),
        }
    }

    /// Prepare the writer to write a data set from the start.
    pub fn init(&mut self) -> Result<()> {
        let writer = DataSetWriter::new(&self.ts, self.options).context(WriteTokenSnafu)?;
        self.writer = Some(writer);
        self.levels = vec![Level::Item { next: 0 }];
        self.queue.clear();
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

    /// Write the data set to the sink, as far as the sink allows.
    ///
    /// The same data set, unchanged, must be given on every call
    /// until [`Progress::Done`] is returned.
    pub fn write<S>(&mut self, dataset: &Item, sink: &mut S) -> Result<Progress>
    where
        S: ?Sized + ByteSink,
    {
        match self.state {
            TransferState::NotInitialized => {
                return IllegalCallSnafu {
                    message: "writer was not initialized",
                }
                .fail()
            }
            TransferState::Ready => return Ok(Progress::Done),
            TransferState::Init | TransferState::InWork => {}
        }
        self.state = TransferState::InWork;

        let writer = self.writer.as_mut().context(IllegalCallSnafu {
            message: "writer was not initialized",
        })?;
        if writer.has_pending() && writer.resume(sink).context(WriteTokenSnafu)? == Progress::Suspended {
            return Ok(Progress::Suspended);
        }

        loop {
            if let Some(token) = self.queue.pop_front() {
                let writer = self.writer.as_mut().context(IllegalCallSnafu {
                    message: "writer was not initialized",
                })?;
                if writer.write(sink, token).context(WriteTokenSnafu)? == Progress::Suspended {
                    return Ok(Progress::Suspended);
                }
                continue;
            }
            if !self.advance(dataset)? {
                let writer = self.writer.as_mut().context(IllegalCallSnafu {
                    message: "writer was not initialized",
                })?;
                return match writer.flush(sink).context(WriteTokenSnafu)? {
                    Progress::Suspended => Ok(Progress::Suspended),
                    Progress::Done => {
                        self.state = TransferState::Ready;
                        self.writer = None;
                        Ok(Progress::Done)
                    }
                };
            }
        }
    }

    fn length_of(&self, len: u32) -> Length {
        match self.options.encoding {
            EncodingType::ExplicitLength => Length(len),
            EncodingType::UndefinedLength => Length::UNDEFINED,
        }
    }

    /// Find the item and element at the current position.
    fn resolve<'a>(&self, root: &'a Item) -> Result<(&'a Item, Option<&'a DataElement>)> {
        let mut item = root;
        let mut element = None;
        let depth = self.levels.len();
        for (i, level) in self.levels.iter().enumerate() {
            if i + 1 == depth {
                break;
            }
            match *level {
                Level::Item { next } => {
                    let index = next.checked_sub(1).context(TreeChangedSnafu)?;
                    element = Some(item.element_at(index).context(TreeChangedSnafu)?);
                }
                Level::Sequence { next } => {
                    let index = next.checked_sub(1).context(TreeChangedSnafu)?;
                    item = element
                        .and_then(|e| e.value().items())
                        .and_then(|items| items.get(index))
                        .context(TreeChangedSnafu)?;
                }
                Level::Pixel { .. } => return TreeChangedSnafu.fail(),
            }
        }
        Ok((item, element))
    }

    /// Queue the tokens of the next step through the data set.
    /// Returns false once the whole data set was walked.
    fn advance(&mut self, root: &Item) -> Result<bool> {
        let level = match self.levels.last() {
            Some(level) => *level,
            None => return Ok(false),
        };
        let (item, element) = self.resolve(root)?;
        let enctype = self.options.encoding;

        match level {
            Level::Item { next } => match item.element_at(next) {
                Some(element) => {
                    self.set_last(Level::Item { next: next + 1 });
                    match element.value() {
                        Value::Primitive(value) => {
                            self.queue.push_back(DataToken::ElementHeader(DataElementHeader::new(
                                element.tag(),
                                element.vr(),
                                Length(value.length()),
                            )));
                            self.queue.push_back(DataToken::PrimitiveValue(value.clone()));
                        }
                        Value::Sequence(seq) => {
                            let len = self.length_of(seq.calc_length(&self.ts, enctype));
                            self.queue.push_back(DataToken::SequenceStart {
                                tag: element.tag(),
                                len,
                            });
                            self.levels.push(Level::Sequence { next: 0 });
                        }
                        Value::PixelSequence(_) => {
                            self.queue.push_back(DataToken::PixelSequenceStart);
                            self.levels.push(Level::Pixel { next: 0 });
                        }
                    }
                }
                None => {
                    self.levels.pop();
                    if !self.levels.is_empty() {
                        self.queue.push_back(DataToken::ItemEnd);
                    }
                }
            },
            Level::Sequence { next } => {
                let items = element
                    .and_then(|e| e.value().items())
                    .context(TreeChangedSnafu)?;
                match items.get(next) {
                    Some(item) => {
                        self.set_last(Level::Sequence { next: next + 1 });
                        let len = self.length_of(item.calc_length(&self.ts, enctype));
                        self.queue.push_back(DataToken::ItemStart { len });
                        self.levels.push(Level::Item { next: 0 });
                    }
                    None => {
                        self.levels.pop();
                        self.queue.push_back(DataToken::SequenceEnd);
                    }
                }
            }
            Level::Pixel { next } => {
                let pixels = element
                    .and_then(|e| e.value().pixel_sequence())
                    .context(TreeChangedSnafu)?;
                self.set_last(Level::Pixel { next: next + 1 });
                if next == 0 {
                    let table = pixels.offset_table();
                    self.queue.push_back(DataToken::ItemStart {
                        len: Length(4 * table.len() as u32),
                    });
                    self.queue.push_back(DataToken::OffsetTable(table.to_vec()));
                    self.queue.push_back(DataToken::ItemEnd);
                } else if let Some(fragment) = pixels.fragments().get(next - 1) {
                    self.queue.push_back(DataToken::ItemStart {
                        len: Length(fragment.len() as u32),
                    });
                    self.queue.push_back(DataToken::ItemValue(fragment.clone()));
                    self.queue.push_back(DataToken::ItemEnd);
                } else {
                    self.levels.pop();
                    self.queue.push_back(DataToken::SequenceEnd);
                }
            }
        }
        Ok(true)
    }

    fn set_last(&mut self, level: Level) {
        if let Some(last) = self.levels.last_mut() {
            *last = level;
        }
    }
}

/// Write a whole data set to a sink which never suspends,
/// such as a [`WriteSink`](dcmio_core::stream::WriteSink).
pub fn write_dataset<S>(
    sink: &mut S,
    dataset: &Item,
    ts: &TransferSyntax,
    options: WriteOptions,
) -> Result<()>
where
    S: ?Sized + ByteSink,
{
    let mut writer = DatasetWriter::new(ts, options);
    writer.init()?;
    match writer.write(dataset, sink)? {
        Progress::Done => Ok(()),
        Progress::Suspended => SinkSuspendedSnafu.fail(),
    }
}
