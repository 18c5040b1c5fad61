//! This module contains a mid-level abstraction for reading DICOM content
//! sequentially.
//!
//! Element headers and values are treated as tokens which can be used
//! to form a syntax tree of a full data set.
//! The reader pulls bytes from a [`ByteSource`] and never blocks:
//! when the source runs dry, it reports [`Next::Suspended`]
//! and continues exactly where it stopped on the next call.
use super::{DataToken, GroupLength, Next, SeqTokenType};
use byteordered::byteorder::{ByteOrder, LittleEndian};
use byteordered::Endianness;
use dcmio_core::header::{DataElementHeader, Length, SequenceItemHeader};
use dcmio_core::storage::{self, ValueStorage};
use dcmio_core::stream::{ByteSource, Progress};
use dcmio_core::{DataDictionary, Tag, VR};
use dcmio_dictionary_std::StandardDataDictionary;
use dcmio_encoding::decode::{self, DynDecoder};
use dcmio_encoding::TransferSyntax;
use snafu::{Backtrace, OptionExt, ResultExt, Snafu};
use std::cmp::Ordering;
use std::fmt;
use std::io::{self, Cursor};
use tracing::{debug, trace, warn};

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("Unsupported transfer syntax `{}`", uid))]
    UnsupportedTransferSyntax {
        uid: &'static str,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not read from the byte source"))]
    ReadSource {
        source: io::Error,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not decode element header at position {}", position))]
    DecodeHeader {
        position: u64,
        #[snafu(backtrace)]
        source: decode::Error,
    },
    #[snafu(display("Could not decode item header at position {}", position))]
    DecodeItemHeader {
        position: u64,
        #[snafu(backtrace)]
        source: decode::Error,
    },
    #[snafu(display("Could not read value of element tagged {}", tag))]
    ReadValue {
        tag: Tag,
        #[snafu(backtrace)]
        source: storage::Error,
    },
    #[snafu(display(
        "Unexpected end of stream at position {} with {} open sequences or items",
        position,
        depth
    ))]
    UnexpectedEndOfStream {
        position: u64,
        depth: usize,
        backtrace: Backtrace,
    },
    #[snafu(display(
        "Inconsistent sequence end: expected end at {} bytes but read {}",
        end_of_sequence,
        bytes_read
    ))]
    InconsistentSequenceEnd {
        end_of_sequence: u64,
        bytes_read: u64,
        backtrace: Backtrace,
    },
    #[snafu(display("Unexpected item tag {} while reading element header", tag))]
    UnexpectedItemTag { tag: Tag, backtrace: Backtrace },
    #[snafu(display("Unexpected delimiter {} at position {}", tag, position))]
    UnexpectedDelimiter {
        tag: Tag,
        position: u64,
        backtrace: Backtrace,
    },
    #[snafu(display("Undefined pixel item length at position {}", position))]
    UndefinedItemLength { position: u64, backtrace: Backtrace },
    #[snafu(display("Odd value length {} in element tagged {}", len, tag))]
    OddValueLength {
        tag: Tag,
        len: u32,
        backtrace: Backtrace,
    },
    #[snafu(display("Not enough memory for a pixel data item of {} bytes", len))]
    MemoryExhausted { len: u32, backtrace: Backtrace },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The set of options for the data set reader.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub struct ReadOptions {
    /// Values longer than this many bytes are not loaded
    /// when the source supports random access:
    /// only their position is kept, to be loaded on demand.
    pub max_read_length: u32,
    /// What to do with group length elements.
    /// With [`GroupLength::WithoutGroupLength`] and [`GroupLength::Recalculate`]
    /// they are dropped while reading.
    pub group_length: GroupLength,
    /// Fail on recoverable violations of the standard
    /// instead of logging a warning.
    pub strict: bool,
    /// Stop reading at the first top level element
    /// which is not in this group,
    /// leaving the source positioned at that element.
    pub only_group: Option<u16>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            max_read_length: 4096,
            group_length: GroupLength::NoChange,
            strict: false,
            only_group: None,
        }
    }
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the maximum length of values loaded right away.
    pub fn max_read_length(mut self, max_read_length: u32) -> Self {
        self.max_read_length = max_read_length;
        self
    }

    /// Replace the group length policy.
    pub fn group_length(mut self, group_length: GroupLength) -> Self {
        self.group_length = group_length;
        self
    }

    /// Enable or disable strict reading.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Read only the top level elements of the given group.
    pub fn only_group(mut self, group: u16) -> Self {
        self.only_group = Some(group);
        self
    }
}

/// A reader-specific token representing a sequence or item start.
#[derive(Debug, Copy, Clone, PartialEq)]
struct SeqToken {
    /// Whether it is the start of a sequence or the start of an item.
    typ: SeqTokenType,
    /// The length of the value, as indicated by the starting element,
    /// can be unknown.
    len: Length,
    /// Whether this sequence token is part of an encapsulated pixel data.
    pixel_data: bool,
    /// The source position at the beginning of the sequence or item value.
    base_offset: u64,
}

/// A group length value waiting to be checked
/// against the actual size of the group.
#[derive(Debug, Copy, Clone, PartialEq)]
struct GroupCheck {
    group: u16,
    expected: u32,
    start: u64,
}

#[derive(Debug)]
enum ReadState {
    /// expecting an element header, an item header or a delimiter
    Header,
    /// loading the value of an element
    Value {
        header: DataElementHeader,
        value: ValueStorage,
    },
    /// passing over a deferred value
    Skip {
        header: DataElementHeader,
        value: ValueStorage,
        remaining: u64,
    },
    /// passing over a dropped element
    Discard { remaining: u64 },
    /// loading a pixel data fragment
    Fragment {
        len: u32,
        buf: Vec<u8>,
        offset_table: bool,
    },
    /// the data set is complete (or reading failed)
    Finished,
}

/// The outcome of peeking for the next header.
enum HeaderBytes {
    Ready(usize),
    Suspended,
    EndOfStream { trailing: usize },
}

/// A resumable reader of DICOM data set tokens
/// in a given transfer syntax.
pub struct DataSetReader {
    decoder: DynDecoder<'static>,
    ts: TransferSyntax,
    options: ReadOptions,
    state: ReadState,
    /// a stack of open sequences and items
    seq_delimiters: Vec<SeqToken>,
    /// pending group length checks, one per item level (root first)
    groups: Vec<Option<GroupCheck>>,
    /// whether the next pixel data item is the basic offset table
    offset_table_next: bool,
}

impl fmt::Debug for DataSetReader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DataSetReader")
            .field("ts", &self.ts.uid())
            .field("options", &self.options)
            .field("state", &self.state)
            .field("seq_delimiters", &self.seq_delimiters)
            .finish()
    }
}

impl DataSetReader {
    /// Create a reader for the given transfer syntax,
    /// resolving implicit value representations
    /// with the standard data dictionary.
    pub fn new(ts: &TransferSyntax, options: ReadOptions) -> Result<Self> {
        Self::new_with_dict(ts, StandardDataDictionary, options)
    }

    /// Create a reader for the given transfer syntax,
    /// resolving implicit value representations with the given dictionary.
    pub fn new_with_dict<D>(ts: &TransferSyntax, dict: D, options: ReadOptions) -> Result<Self>
    where
        D: DataDictionary + Send + 'static,
    {
        let decoder = ts
            .decoder_with_dict(dict)
            .context(UnsupportedTransferSyntaxSnafu { uid: ts.uid() })?;
        Ok(DataSetReader {
            decoder,
            ts: *ts,
            options,
            state: ReadState::Header,
            seq_delimiters: Vec::new(),
            groups: vec![None],
            offset_table_next: false,
        })
    }

    /// The transfer syntax of the data being read.
    pub fn transfer_syntax(&self) -> &TransferSyntax {
        &self.ts
    }

    /// The options of this reader.
    pub fn options(&self) -> &ReadOptions {
        &self.options
    }

    /// The number of sequences and items currently open.
    pub fn depth(&self) -> usize {
        self.seq_delimiters.len()
    }

    /// Whether the end of the data set was reached.
    pub fn is_finished(&self) -> bool {
        matches!(self.state, ReadState::Finished)
    }

    /// Fetch the next token from the source.
    ///
    /// Once the data set is complete, [`Next::End`] is returned,
    /// and so is it on any call after an error.
    pub fn next_token<S>(&mut self, source: &mut S) -> Result<Next>
    where
        S: ?Sized + ByteSource,
    {
        let out = self.step(source);
        if out.is_err() {
            self.state = ReadState::Finished;
        }
        out
    }

    fn step<S>(&mut self, source: &mut S) -> Result<Next>
    where
        S: ?Sized + ByteSource,
    {
        loop {
            match std::mem::replace(&mut self.state, ReadState::Header) {
                ReadState::Finished => {
                    self.state = ReadState::Finished;
                    return Ok(Next::End);
                }
                ReadState::Value { header, mut value } => {
                    match value
                        .load_value(source)
                        .context(ReadValueSnafu { tag: header.tag })?
                    {
                        Progress::Suspended => {
                            self.state = ReadState::Value { header, value };
                            return Ok(Next::Suspended);
                        }
                        Progress::Done => {
                            if header.tag.is_group_length() {
                                self.start_group_check(&header, &value, source.position());
                            }
                            return Ok(Next::Token(DataToken::PrimitiveValue(value)));
                        }
                    }
                }
                ReadState::Skip {
                    header,
                    value,
                    remaining,
                } => {
                    let remaining = self.skip(source, remaining)?;
                    if remaining > 0 {
                        self.state = ReadState::Skip {
                            header,
                            value,
                            remaining,
                        };
                        return Ok(Next::Suspended);
                    }
                    trace!(
                        "Deferred value of {} ({} bytes)",
                        header.tag,
                        header.len.0
                    );
                    return Ok(Next::Token(DataToken::PrimitiveValue(value)));
                }
                ReadState::Discard { remaining } => {
                    let remaining = self.skip(source, remaining)?;
                    if remaining > 0 {
                        self.state = ReadState::Discard { remaining };
                        return Ok(Next::Suspended);
                    }
                }
                ReadState::Fragment {
                    len,
                    mut buf,
                    offset_table,
                } => {
                    let missing = len as usize - buf.len();
                    let n = source.available().context(ReadSourceSnafu)?.min(missing);
                    if n > 0 {
                        let start = buf.len();
                        buf.resize(start + n, 0);
                        let got = source
                            .read_some(&mut buf[start..])
                            .context(ReadSourceSnafu)?;
                        buf.truncate(start + got);
                    }
                    if buf.len() < len as usize {
                        if source.at_end().context(ReadSourceSnafu)? {
                            return self.unexpected_end(source.position());
                        }
                        self.state = ReadState::Fragment {
                            len,
                            buf,
                            offset_table,
                        };
                        return Ok(Next::Suspended);
                    }
                    let token = if offset_table {
                        DataToken::OffsetTable(
                            buf.chunks_exact(4).map(LittleEndian::read_u32).collect(),
                        )
                    } else {
                        DataToken::ItemValue(buf)
                    };
                    return Ok(Next::Token(token));
                }
                ReadState::Header => {
                    let position = source.position();
                    if let Some(token) = self.close_container(position)? {
                        return Ok(Next::Token(token));
                    }
                    let next = match self.seq_delimiters.last() {
                        Some(SeqToken {
                            typ: SeqTokenType::Sequence,
                            pixel_data,
                            ..
                        }) => {
                            let pixel_data = *pixel_data;
                            self.read_item_header(source, position, pixel_data)?
                        }
                        _ => self.read_element_header(source, position)?,
                    };
                    if let Some(next) = next {
                        return Ok(next);
                    }
                }
            }
        }
    }

    /// Read an item header or a sequence delimiter.
    ///
    /// Returns `None` if nothing was produced and reading should go on.
    fn read_item_header<S>(
        &mut self,
        source: &mut S,
        position: u64,
        pixel_data: bool,
    ) -> Result<Option<Next>>
    where
        S: ?Sized + ByteSource,
    {
        let mut buf = [0u8; 12];
        match self.peek_header(source, &mut buf, true)? {
            HeaderBytes::Ready(_) => {}
            HeaderBytes::Suspended => return Ok(Some(Next::Suspended)),
            HeaderBytes::EndOfStream { .. } => return self.unexpected_end(position),
        }
        source.skip(8).context(ReadSourceSnafu)?;
        let header = self
            .decoder
            .decode_item_header(&mut Cursor::new(buf))
            .context(DecodeItemHeaderSnafu { position })?;

        match header {
            SequenceItemHeader::Item { len } if pixel_data => {
                let len = len
                    .get()
                    .context(UndefinedItemLengthSnafu { position })?;
                let mut buf = Vec::new();
                buf.try_reserve_exact(len as usize)
                    .ok()
                    .context(MemoryExhaustedSnafu { len })?;
                let offset_table = std::mem::replace(&mut self.offset_table_next, false);
                self.push_sequence_token(SeqTokenType::Item, Length(len), true, position + 8);
                self.state = ReadState::Fragment {
                    len,
                    buf,
                    offset_table,
                };
                Ok(Some(Next::Token(DataToken::ItemStart { len: Length(len) })))
            }
            SequenceItemHeader::Item { len } => {
                self.push_sequence_token(SeqTokenType::Item, len, false, position + 8);
                Ok(Some(Next::Token(DataToken::ItemStart { len })))
            }
            SequenceItemHeader::SequenceDelimiter => {
                let seq = self.pop_sequence_token(position);
                if seq.map(|s| s.len.is_defined()).unwrap_or(false) {
                    warn!(
                        "Sequence delimiter at position {} closes a sequence of defined length",
                        position
                    );
                }
                self.offset_table_next = false;
                Ok(Some(Next::Token(DataToken::SequenceEnd)))
            }
            SequenceItemHeader::ItemDelimiter => {
                if self.options.strict {
                    return UnexpectedDelimiterSnafu {
                        tag: Tag::ITEM_DELIMITER,
                        position,
                    }
                    .fail();
                }
                warn!(
                    "Ignoring item delimiter outside of an item at position {}",
                    position
                );
                Ok(None)
            }
        }
    }

    /// Read a data element header or an item delimiter.
    ///
    /// Returns `None` if nothing was produced and reading should go on.
    fn read_element_header<S>(&mut self, source: &mut S, position: u64) -> Result<Option<Next>>
    where
        S: ?Sized + ByteSource,
    {
        let mut buf = [0u8; 12];
        let n = match self.peek_header(source, &mut buf, false)? {
            HeaderBytes::Ready(n) => n,
            HeaderBytes::Suspended => return Ok(Some(Next::Suspended)),
            HeaderBytes::EndOfStream { trailing } => {
                if !self.seq_delimiters.is_empty() {
                    return self.unexpected_end(position);
                }
                if trailing > 0 {
                    if self.options.strict {
                        return self.unexpected_end(position);
                    }
                    warn!("Ignoring {} trailing bytes at the end of the data set", trailing);
                    source.skip(trailing as u64).context(ReadSourceSnafu)?;
                }
                self.finish_data_set(position);
                return Ok(Some(Next::End));
            }
        };

        if let (Some(group), true) = (self.options.only_group, self.seq_delimiters.is_empty()) {
            let tag = self
                .decoder
                .decode_tag(&mut Cursor::new(buf))
                .context(DecodeHeaderSnafu { position })?;
            if tag.group() != group {
                debug!("Reached element {} outside of group {:04X}", tag, group);
                self.finish_data_set(position);
                return Ok(Some(Next::End));
            }
        }

        source.skip(n as u64).context(ReadSourceSnafu)?;
        let (header, _) = self
            .decoder
            .decode_header(&mut Cursor::new(buf))
            .context(DecodeHeaderSnafu { position })?;
        let value_start = position + n as u64;

        match header.tag {
            Tag::ITEM_DELIMITER => {
                if let Some(SeqToken {
                    typ: SeqTokenType::Item,
                    ..
                }) = self.seq_delimiters.last()
                {
                    self.pop_sequence_token(position);
                    return Ok(Some(Next::Token(DataToken::ItemEnd)));
                }
                if self.options.strict {
                    return UnexpectedDelimiterSnafu {
                        tag: header.tag,
                        position,
                    }
                    .fail();
                }
                warn!(
                    "Item delimitation item outside of a sequence in position {}",
                    position
                );
                return Ok(None);
            }
            Tag::SEQUENCE_DELIMITER => {
                if self.seq_delimiters.is_empty() && !self.options.strict {
                    warn!(
                        "Sequence delimitation item outside of a sequence in position {}",
                        position
                    );
                    return Ok(None);
                }
                return UnexpectedDelimiterSnafu {
                    tag: header.tag,
                    position,
                }
                .fail();
            }
            Tag::ITEM => {
                return UnexpectedItemTagSnafu { tag: header.tag }.fail();
            }
            _ => {}
        }

        self.track_group(header.tag, position);

        if header.tag == Tag::PIXEL_DATA && header.len.is_undefined() {
            self.push_sequence_token(SeqTokenType::Sequence, Length::UNDEFINED, true, value_start);
            self.offset_table_next = true;
            return Ok(Some(Next::Token(DataToken::PixelSequenceStart)));
        }

        if header.vr == VR::SQ || header.len.is_undefined() {
            if header.vr != VR::SQ {
                // treat other undefined length elements
                // as data set sequences
                debug!(
                    "Reading {} {} of undefined length as a sequence",
                    header.tag, header.vr
                );
            }
            let DataElementHeader { tag, len, .. } = header;
            self.push_sequence_token(SeqTokenType::Sequence, len, false, value_start);
            return Ok(Some(Next::Token(DataToken::SequenceStart { tag, len })));
        }

        let len = header.len.0;
        if len % 2 != 0 {
            if self.options.strict {
                return OddValueLengthSnafu {
                    tag: header.tag,
                    len,
                }
                .fail();
            }
            warn!("Odd value length {} in element {}", len, header.tag);
        }

        if header.tag.is_group_length() && self.options.group_length.drops_on_read() {
            trace!("Dropping group length element {}", header.tag);
            self.state = ReadState::Discard {
                remaining: u64::from(len),
            };
            return Ok(None);
        }

        let byte_order = self.ts.endianness();
        self.state = if len > self.options.max_read_length && source.is_seekable() {
            ReadState::Skip {
                header,
                value: ValueStorage::deferred(value_start, len, byte_order, header.vr),
                remaining: u64::from(len),
            }
        } else {
            ReadState::Value {
                header,
                value: ValueStorage::pending(len, byte_order, header.vr),
            }
        };
        Ok(Some(Next::Token(DataToken::ElementHeader(header))))
    }

    /// Peek the bytes of the next header without consuming them.
    fn peek_header<S>(&self, source: &mut S, buf: &mut [u8; 12], item: bool) -> Result<HeaderBytes>
    where
        S: ?Sized + ByteSource,
    {
        let available = source.available().context(ReadSourceSnafu)?;
        let n = source
            .peek(&mut buf[..available.min(12)])
            .context(ReadSourceSnafu)?;
        let needed = if n < 8 {
            8
        } else if item {
            8
        } else {
            self.decoder.header_len(&buf[..n])
        };
        if n >= needed {
            Ok(HeaderBytes::Ready(needed))
        } else if source.is_finished() {
            Ok(HeaderBytes::EndOfStream { trailing: n })
        } else {
            Ok(HeaderBytes::Suspended)
        }
    }

    /// Pass over `remaining` bytes of the source,
    /// returning how many are still left to pass.
    fn skip<S>(&self, source: &mut S, remaining: u64) -> Result<u64>
    where
        S: ?Sized + ByteSource,
    {
        let skipped = source.skip(remaining).context(ReadSourceSnafu)?;
        let remaining = remaining - skipped;
        if remaining > 0 && source.at_end().context(ReadSourceSnafu)? {
            return self.unexpected_end(source.position());
        }
        Ok(remaining)
    }

    fn unexpected_end<T>(&self, position: u64) -> Result<T> {
        UnexpectedEndOfStreamSnafu {
            position,
            depth: self.seq_delimiters.len(),
        }
        .fail()
    }

    /// Close the innermost sequence or item of defined length
    /// if its end was reached.
    fn close_container(&mut self, position: u64) -> Result<Option<DataToken>> {
        if let Some(sd) = self.seq_delimiters.last() {
            if let Some(len) = sd.len.get() {
                let end_of_sequence = sd.base_offset + u64::from(len);
                match end_of_sequence.cmp(&position) {
                    Ordering::Equal => {
                        let token = match sd.typ {
                            SeqTokenType::Sequence => DataToken::SequenceEnd,
                            SeqTokenType::Item => DataToken::ItemEnd,
                        };
                        self.pop_sequence_token(position);
                        return Ok(Some(token));
                    }
                    Ordering::Less => {
                        return InconsistentSequenceEndSnafu {
                            end_of_sequence,
                            bytes_read: position,
                        }
                        .fail();
                    }
                    Ordering::Greater => {}
                }
            }
        }
        Ok(None)
    }

    fn push_sequence_token(
        &mut self,
        typ: SeqTokenType,
        len: Length,
        pixel_data: bool,
        base_offset: u64,
    ) {
        if typ == SeqTokenType::Item && !pixel_data {
            self.groups.push(None);
        }
        self.seq_delimiters.push(SeqToken {
            typ,
            len,
            pixel_data,
            base_offset,
        });
    }

    fn pop_sequence_token(&mut self, position: u64) -> Option<SeqToken> {
        let token = self.seq_delimiters.pop()?;
        if token.typ == SeqTokenType::Item && !token.pixel_data {
            if let Some(Some(check)) = self.groups.pop() {
                verify_group_length(check, position);
            }
        }
        Some(token)
    }

    fn finish_data_set(&mut self, position: u64) {
        if let Some(check) = self.groups.first_mut().and_then(Option::take) {
            verify_group_length(check, position);
        }
        self.state = ReadState::Finished;
    }

    /// Verify the pending group length check of the current level
    /// once an element of another group shows up.
    fn track_group(&mut self, tag: Tag, position: u64) {
        if let Some(slot) = self.groups.last_mut() {
            if slot.as_ref().map(|check| check.group != tag.group()).unwrap_or(false) {
                if let Some(check) = slot.take() {
                    verify_group_length(check, position);
                }
            }
        }
    }

    fn start_group_check(&mut self, header: &DataElementHeader, value: &ValueStorage, end: u64) {
        if header.len.0 != 4 {
            return;
        }
        if let Ok(bytes) = value.to_bytes(Endianness::Little) {
            let check = GroupCheck {
                group: header.tag.group(),
                expected: LittleEndian::read_u32(&bytes),
                start: end,
            };
            if let Some(slot) = self.groups.last_mut() {
                *slot = Some(check);
            }
        }
    }
}

fn verify_group_length(check: GroupCheck, position: u64) {
    let actual = position - check.start;
    if actual != u64::from(check.expected) {
        warn!(
            "Group length of group {:04X} declares {} bytes, but the group has {}",
            check.group, check.expected, actual
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcmio_core::dictionary::EmptyDictionary;
    use dcmio_core::stream::{BufferSource, ReadSource};
    use dcmio_core::storage::ValueState;
    use dcmio_transfer_syntax_registry::entries::{
        EXPLICIT_VR_BIG_ENDIAN, EXPLICIT_VR_LITTLE_ENDIAN, IMPLICIT_VR_LITTLE_ENDIAN,
    };

    fn read_all(reader: &mut DataSetReader, source: &mut dyn ByteSource) -> Vec<DataToken> {
        let mut tokens = Vec::new();
        loop {
            match reader.next_token(source).expect("should read the next token") {
                Next::Token(token) => tokens.push(token),
                Next::Suspended => panic!("source should not run dry"),
                Next::End => break,
            }
        }
        tokens
    }

    fn value(bytes: &[u8], byte_order: Endianness, vr: VR) -> DataToken {
        DataToken::PrimitiveValue(ValueStorage::from_bytes(bytes.to_vec(), byte_order, vr))
    }

    #[test]
    fn read_sequence_explicit() {
        #[rustfmt::skip]
        static DATA: &[u8] = &[
            0x18, 0x00, 0x11, 0x60, // sequence tag: (0018,6011) SequenceOfUltrasoundRegions
            b'S', b'Q', // VR
            0x00, 0x00, // reserved
            0x2e, 0x00, 0x00, 0x00, // length: 28 + 18 = 46 (#= 2)
            // -- 12 --
            0xfe, 0xff, 0x00, 0xe0, // item start tag
            0x14, 0x00, 0x00, 0x00, // item length: 20 (#= 2)
            // -- 20 --
            0x18, 0x00, 0x12, 0x60, b'U', b'S', 0x02, 0x00, 0x01, 0x00, // (0018,6012) RegionSpatialFormat, len = 2, value = 1
            // -- 30 --
            0x18, 0x00, 0x14, 0x60, b'U', b'S', 0x02, 0x00, 0x02, 0x00, // (0018,6014) RegionDataType, len = 2, value = 2
            // -- 40 --
            0xfe, 0xff, 0x00, 0xe0, // item start tag
            0x0a, 0x00, 0x00, 0x00, // item length: 10 (#= 1)
            // -- 48 --
            0x18, 0x00, 0x12, 0x60, b'U', b'S', 0x02, 0x00, 0x04, 0x00, // (0018,6012) RegionSpatialFormat, len = 2, value = 4
            // -- 58 --
            0x20, 0x00, 0x00, 0x40, b'L', b'T', 0x04, 0x00, // (0020,4000) ImageComments, len = 4
            b'T', b'E', b'S', b'T', // value = "TEST"
        ];

        let mut reader =
            DataSetReader::new(&EXPLICIT_VR_LITTLE_ENDIAN, ReadOptions::default()).unwrap();
        let mut source = BufferSource::from_bytes(DATA);
        let tokens = read_all(&mut reader, &mut source);

        let le = Endianness::Little;
        let expected = vec![
            DataToken::SequenceStart {
                tag: Tag(0x0018, 0x6011),
                len: Length(46),
            },
            DataToken::ItemStart { len: Length(20) },
            DataToken::ElementHeader(DataElementHeader::new(
                Tag(0x0018, 0x6012),
                VR::US,
                Length(2),
            )),
            value(&[1, 0], le, VR::US),
            DataToken::ElementHeader(DataElementHeader::new(
                Tag(0x0018, 0x6014),
                VR::US,
                Length(2),
            )),
            value(&[2, 0], le, VR::US),
            DataToken::ItemEnd,
            DataToken::ItemStart { len: Length(10) },
            DataToken::ElementHeader(DataElementHeader::new(
                Tag(0x0018, 0x6012),
                VR::US,
                Length(2),
            )),
            value(&[4, 0], le, VR::US),
            DataToken::ItemEnd,
            DataToken::SequenceEnd,
            DataToken::ElementHeader(DataElementHeader::new(
                Tag(0x0020, 0x4000),
                VR::LT,
                Length(4),
            )),
            value(b"TEST", le, VR::LT),
        ];
        assert_eq!(tokens, expected);
        assert!(reader.is_finished());
    }

    #[test]
    fn read_undefined_length_implicit() {
        #[rustfmt::skip]
        static DATA: &[u8] = &[
            0x18, 0x00, 0x11, 0x60, // (0018,6011) SequenceOfUltrasoundRegions
            0xff, 0xff, 0xff, 0xff, // length: undefined
            0xfe, 0xff, 0x00, 0xe0, // item start tag
            0xff, 0xff, 0xff, 0xff, // item length: undefined
            0x18, 0x00, 0x12, 0x60, 0x02, 0x00, 0x00, 0x00, 0x01, 0x00, // (0018,6012), len = 2, value = 1
            0xfe, 0xff, 0x0d, 0xe0, 0x00, 0x00, 0x00, 0x00, // item end
            0xfe, 0xff, 0xdd, 0xe0, 0x00, 0x00, 0x00, 0x00, // sequence end
            0x20, 0x00, 0x00, 0x40, 0x04, 0x00, 0x00, 0x00, // (0020,4000), len = 4
            b'T', b'E', b'S', b'T',
        ];

        let mut reader = DataSetReader::new_with_dict(
            &IMPLICIT_VR_LITTLE_ENDIAN,
            EmptyDictionary,
            ReadOptions::default(),
        )
        .unwrap();
        let mut source = BufferSource::from_bytes(DATA);
        let tokens = read_all(&mut reader, &mut source);

        assert_eq!(tokens.len(), 8);
        assert_eq!(
            tokens[0],
            DataToken::SequenceStart {
                tag: Tag(0x0018, 0x6011),
                len: Length::UNDEFINED,
            }
        );
        assert_eq!(tokens[1], DataToken::ItemStart { len: Length::UNDEFINED });
        // no dictionary, VR is unknown
        assert_eq!(
            tokens[2],
            DataToken::ElementHeader(DataElementHeader::new(
                Tag(0x0018, 0x6012),
                VR::UN,
                Length(2)
            ))
        );
        assert_eq!(tokens[4], DataToken::ItemEnd);
        assert_eq!(tokens[5], DataToken::SequenceEnd);
        assert_eq!(tokens[7], value(b"TEST", Endianness::Little, VR::UN));
    }

    #[test]
    fn read_encapsulated_pixel_data() {
        #[rustfmt::skip]
        static DATA: &[u8] = &[
            0xe0, 0x7f, 0x10, 0x00, // (7FE0,0010) PixelData
            b'O', b'B', // VR
            0x00, 0x00, // reserved
            0xff, 0xff, 0xff, 0xff, // length: undefined
            0xfe, 0xff, 0x00, 0xe0, 0x04, 0x00, 0x00, 0x00, // item start, len 4
            0x00, 0x00, 0x00, 0x00, // offset table: [0]
            0xfe, 0xff, 0x00, 0xe0, 0x04, 0x00, 0x00, 0x00, // item start, len 4
            0x99, 0x88, 0x77, 0x66, // fragment
            0xfe, 0xff, 0xdd, 0xe0, 0x00, 0x00, 0x00, 0x00, // sequence end
        ];

        let mut reader =
            DataSetReader::new(&EXPLICIT_VR_LITTLE_ENDIAN, ReadOptions::default()).unwrap();
        let mut source = BufferSource::from_bytes(DATA);
        let tokens = read_all(&mut reader, &mut source);
        assert_eq!(
            tokens,
            vec![
                DataToken::PixelSequenceStart,
                DataToken::ItemStart { len: Length(4) },
                DataToken::OffsetTable(vec![0]),
                DataToken::ItemEnd,
                DataToken::ItemStart { len: Length(4) },
                DataToken::ItemValue(vec![0x99, 0x88, 0x77, 0x66]),
                DataToken::ItemEnd,
                DataToken::SequenceEnd,
            ]
        );
    }

    #[rustfmt::skip]
    static BIG_ENDIAN: &[u8] = &[
        0x00, 0x28, 0x00, 0x00, b'U', b'L', 0x00, 0x04, // (0028,0000) GroupLength, len 4
        0x00, 0x00, 0x00, 0x0a, // value = 10
        0x00, 0x28, 0x00, 0x10, b'U', b'S', 0x00, 0x02, // (0028,0010) Rows, len 2
        0x02, 0x00, // value = 512
    ];

    #[test]
    fn big_endian_values_keep_their_byte_order() {
        let mut reader =
            DataSetReader::new(&EXPLICIT_VR_BIG_ENDIAN, ReadOptions::default()).unwrap();
        let mut source = BufferSource::from_bytes(BIG_ENDIAN);
        let tokens = read_all(&mut reader, &mut source);
        assert_eq!(tokens.len(), 4);
        match &tokens[3] {
            DataToken::PrimitiveValue(v) => {
                assert_eq!(v.byte_order(), Endianness::Big);
                assert_eq!(&*v.to_bytes(Endianness::Little).unwrap(), &[0x00, 0x02]);
            }
            token => panic!("unexpected token {}", token),
        }
    }

    #[test]
    fn group_lengths_can_be_dropped() {
        let options = ReadOptions::default().group_length(GroupLength::Recalculate);
        let mut reader = DataSetReader::new(&EXPLICIT_VR_BIG_ENDIAN, options).unwrap();
        let mut source = BufferSource::from_bytes(BIG_ENDIAN);
        let tokens = read_all(&mut reader, &mut source);
        assert_eq!(
            tokens[0],
            DataToken::ElementHeader(DataElementHeader::new(
                Tag(0x0028, 0x0010),
                VR::US,
                Length(2)
            ))
        );
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn reading_only_one_group() {
        #[rustfmt::skip]
        static DATA: &[u8] = &[
            0x02, 0x00, 0x10, 0x00, b'U', b'I', 0x02, 0x00, b'1', 0x00, // (0002,0010)
            0x08, 0x00, 0x16, 0x00, b'U', b'I', 0x02, 0x00, b'2', 0x00, // (0008,0016)
        ];
        let options = ReadOptions::default().only_group(0x0002);
        let mut reader = DataSetReader::new(&EXPLICIT_VR_LITTLE_ENDIAN, options).unwrap();
        let mut source = BufferSource::from_bytes(DATA);
        let tokens = read_all(&mut reader, &mut source);
        assert_eq!(tokens.len(), 2);
        assert_eq!(source.position(), 10);
    }

    #[test]
    fn long_values_are_deferred_in_seekable_sources() {
        let mut data = vec![0xe0, 0x7f, 0x10, 0x00, b'O', b'W', 0, 0];
        data.extend_from_slice(&64u32.to_le_bytes());
        data.extend((0..64).map(|x| x as u8));
        data.extend_from_slice(&[0x08, 0xe0, 0x10, 0x00, b'S', b'H', 0x02, 0x00, b'A', b' ']);

        let options = ReadOptions::default().max_read_length(16);
        let mut reader = DataSetReader::new(&EXPLICIT_VR_LITTLE_ENDIAN, options).unwrap();
        let mut source = ReadSource::new(std::io::Cursor::new(data)).unwrap();
        let tokens = read_all(&mut reader, &mut source);
        assert_eq!(tokens.len(), 4);

        let mut value = match &tokens[1] {
            DataToken::PrimitiveValue(v) => v.clone(),
            token => panic!("unexpected token {}", token),
        };
        assert_eq!(value.state(), ValueState::Deferred);
        assert_eq!(value.offset(), Some(12));

        assert_eq!(value.load_value(&mut source).unwrap(), Progress::Done);
        let bytes = value.get_bytes(Endianness::Little).unwrap();
        assert_eq!(bytes.len(), 64);
        assert_eq!(bytes[63], 63);
    }

    #[test]
    fn truncated_sequence_is_an_error() {
        #[rustfmt::skip]
        static DATA: &[u8] = &[
            0x18, 0x00, 0x11, 0x60, b'S', b'Q', 0x00, 0x00,
            0xff, 0xff, 0xff, 0xff, // undefined length
            0xfe, 0xff, 0x00, 0xe0, 0xff, 0xff, 0xff, 0xff, // item start
        ];
        let mut reader =
            DataSetReader::new(&EXPLICIT_VR_LITTLE_ENDIAN, ReadOptions::default()).unwrap();
        let mut source = BufferSource::from_bytes(DATA);
        assert!(matches!(
            reader.next_token(&mut source),
            Ok(Next::Token(DataToken::SequenceStart { .. }))
        ));
        assert!(matches!(
            reader.next_token(&mut source),
            Ok(Next::Token(DataToken::ItemStart { .. }))
        ));
        assert!(matches!(
            reader.next_token(&mut source),
            Err(Error::UnexpectedEndOfStream { depth: 2, .. })
        ));
        // fused after an error
        assert_eq!(reader.next_token(&mut source).unwrap(), Next::End);
    }

    #[test]
    fn odd_lengths_fail_only_when_strict() {
        static DATA: &[u8] = &[0x10, 0x00, 0x10, 0x00, b'P', b'N', 0x03, 0x00, b'A', b'^', b'B'];

        let mut reader =
            DataSetReader::new(&EXPLICIT_VR_LITTLE_ENDIAN, ReadOptions::default()).unwrap();
        let tokens = read_all(&mut reader, &mut BufferSource::from_bytes(DATA));
        assert_eq!(tokens.len(), 2);

        let options = ReadOptions::default().strict(true);
        let mut reader = DataSetReader::new(&EXPLICIT_VR_LITTLE_ENDIAN, options).unwrap();
        assert!(matches!(
            reader.next_token(&mut BufferSource::from_bytes(DATA)),
            Err(Error::OddValueLength { len: 3, .. })
        ));
    }
}
