//! This module contains a mid-level abstraction for writing DICOM content
//! sequentially.
//!
//! Tokens are encoded into a staging buffer
//! and then handed over to a [`ByteSink`] as it finds room for them.
//! When the sink is full, writing is suspended
//! and resumed on the next call.
use super::{DataToken, EncodingType, GroupLength, Padding, SeqTokenType};
use byteordered::byteorder::{ByteOrder, LittleEndian};
use dcmio_core::header::{DataElementHeader, Length};
use dcmio_core::storage;
use dcmio_core::stream::{ByteSink, Progress};
use dcmio_core::{Tag, VR};
use dcmio_encoding::encode::{self, DynEncoder};
use dcmio_encoding::TransferSyntax;
use snafu::{ensure, Backtrace, OptionExt, ResultExt, Snafu};
use std::fmt;
use std::io;
use tracing::{trace, warn};

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("Unsupported transfer syntax `{}`", uid))]
    UnsupportedTransferSyntax {
        uid: &'static str,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not encode {}", what))]
    EncodeHeader {
        what: &'static str,
        #[snafu(backtrace)]
        source: encode::Error,
    },
    #[snafu(display("Could not obtain the value bytes to write"))]
    WriteValue {
        #[snafu(backtrace)]
        source: storage::Error,
    },
    #[snafu(display("Could not write to the byte sink"))]
    WriteSink {
        source: io::Error,
        backtrace: Backtrace,
    },
    #[snafu(display("Illegal call: {}", message))]
    IllegalCall {
        message: &'static str,
        backtrace: Backtrace,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The set of options for writing a data set.
///
/// The token writer itself only makes use of
/// `enable_new_vrs` and `cache_size`.
/// The remaining options are applied
/// by the entry point writing a whole data set.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub struct WriteOptions {
    /// How sequences and items are delimited.
    pub encoding: EncodingType,
    /// What to do with group length elements.
    pub group_length: GroupLength,
    /// What to do with the trailing padding element.
    pub padding: Padding,
    /// The data set is padded to a multiple of this many bytes
    /// (0 to disable).
    pub padlen: u32,
    /// Items in sequences are padded to a multiple of this many bytes
    /// (0 to disable).
    pub sub_padlen: u32,
    /// Whether the UN and UT value representations may be written.
    /// When disabled, OB is written in their place.
    pub enable_new_vrs: bool,
    /// The number of bytes staged before they are handed to the sink
    /// (0 to disable the write cache).
    pub cache_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            encoding: EncodingType::ExplicitLength,
            group_length: GroupLength::NoChange,
            padding: Padding::NoChange,
            padlen: 0,
            sub_padlen: 0,
            enable_new_vrs: true,
            cache_size: 8192,
        }
    }
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the encoding type of sequences and items.
    pub fn encoding(mut self, encoding: EncodingType) -> Self {
        self.encoding = encoding;
        self
    }

    /// Replace the group length policy.
    pub fn group_length(mut self, group_length: GroupLength) -> Self {
        self.group_length = group_length;
        self
    }

    /// Replace the padding policy and lengths.
    pub fn padding(mut self, padding: Padding, padlen: u32, sub_padlen: u32) -> Self {
        self.padding = padding;
        self.padlen = padlen;
        self.sub_padlen = sub_padlen;
        self
    }

    /// Enable or disable the UN and UT value representations.
    pub fn enable_new_vrs(mut self, enable: bool) -> Self {
        self.enable_new_vrs = enable;
        self
    }

    /// Replace the size of the write cache.
    pub fn cache_size(mut self, cache_size: usize) -> Self {
        self.cache_size = cache_size;
        self
    }

    /// Check that the options can be used for writing.
    ///
    /// Padding lengths must be even.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.padlen % 2 == 0,
            IllegalCallSnafu {
                message: "padding length must be even"
            }
        );
        ensure!(
            self.sub_padlen % 2 == 0,
            IllegalCallSnafu {
                message: "item padding length must be even"
            }
        );
        Ok(())
    }
}

/// Determine the value representation to write for an element,
/// given its original representation and value length.
///
/// UN and UT become OB when `enable_new_vrs` is false.
/// Values too long for a 16-bit length field
/// are written as UN (or OB).
/// Either way, the header length only depends on the value length,
/// not on `enable_new_vrs`.
pub fn writable_vr(vr: VR, len: Length, enable_new_vrs: bool) -> VR {
    let vr = match vr {
        VR::UN | VR::UT if !enable_new_vrs => VR::OB,
        vr => vr,
    };
    match len.get() {
        Some(len) if vr.has_short_length() && len > 0xFFFF => {
            if enable_new_vrs {
                VR::UN
            } else {
                VR::OB
            }
        }
        _ => vr,
    }
}

/// A buffer which coalesces small writes before they reach a byte sink.
///
/// Whether a cache is used or not, the bytes reaching the sink
/// are the same.
#[derive(Debug, Clone, Default)]
pub struct WriteCache {
    buf: Vec<u8>,
    limit: usize,
}

impl WriteCache {
    /// Create a cache holding up to `limit` bytes.
    pub fn new(limit: usize) -> Self {
        WriteCache {
            buf: Vec::with_capacity(limit.min(1 << 16)),
            limit,
        }
    }

    /// Create a cache which holds nothing.
    pub fn disabled() -> Self {
        WriteCache::new(0)
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.limit > 0
    }

    /// The number of bytes currently held.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Take in as many bytes as there is room for.
    fn stage(&mut self, bytes: &[u8]) -> usize {
        let n = bytes.len().min(self.limit - self.buf.len());
        self.buf.extend_from_slice(&bytes[..n]);
        n
    }

    /// Hand over the held bytes to the sink, as many as it accepts.
    fn drain_into<S>(&mut self, sink: &mut S) -> io::Result<usize>
    where
        S: ?Sized + ByteSink,
    {
        if self.buf.is_empty() {
            return Ok(0);
        }
        let n = sink.write_some(&self.buf)?;
        self.buf.drain(..n);
        Ok(n)
    }
}

/// A token representing a sequence or item start.
#[derive(Debug)]
struct SeqToken {
    /// Whether it is the start of a sequence or the start of an item.
    typ: SeqTokenType,
    /// The length of the value, as indicated by the starting element,
    /// can be unknown.
    len: Length,
}

/// A stateful device for printing a DICOM data set in sequential order.
/// This is analogous to the [`DataSetReader`](super::DataSetReader)
/// type for converting data set tokens to bytes.
pub struct DataSetWriter {
    encoder: DynEncoder<'static, Vec<u8>>,
    ts: TransferSyntax,
    options: WriteOptions,
    seq_tokens: Vec<SeqToken>,
    /// encoded bytes not yet handed over
    pending: Vec<u8>,
    pending_pos: usize,
    cache: WriteCache,
}

impl fmt::Debug for DataSetWriter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DataSetWriter")
            .field("ts", &self.ts.uid())
            .field("options", &self.options)
            .field("seq_tokens", &self.seq_tokens)
            .field("pending", &(self.pending.len() - self.pending_pos))
            .field("cache", &self.cache.len())
            .finish()
    }
}

impl DataSetWriter {
    /// Create a writer of data set tokens in the given transfer syntax.
    pub fn new(ts: &TransferSyntax, options: WriteOptions) -> Result<Self> {
        options.validate()?;
        let encoder = ts
            .encoder()
            .context(UnsupportedTransferSyntaxSnafu { uid: ts.uid() })?;
        Ok(DataSetWriter {
            encoder,
            ts: *ts,
            options,
            seq_tokens: Vec::new(),
            pending: Vec::new(),
            pending_pos: 0,
            cache: WriteCache::new(options.cache_size),
        })
    }

    /// The transfer syntax of the data being written.
    pub fn transfer_syntax(&self) -> &TransferSyntax {
        &self.ts
    }

    /// The options of this writer.
    pub fn options(&self) -> &WriteOptions {
        &self.options
    }

    /// Whether some bytes of a previous token
    /// have not been handed to the sink yet.
    pub fn has_pending(&self) -> bool {
        self.pending_pos < self.pending.len()
    }

    /// Feed the given data set token for writing the data set.
    ///
    /// On [`Progress::Suspended`], the sink is full:
    /// [`resume`](Self::resume) (or [`flush`](Self::flush))
    /// must complete before the next token is written.
    pub fn write<S>(&mut self, sink: &mut S, token: DataToken) -> Result<Progress>
    where
        S: ?Sized + ByteSink,
    {
        ensure!(
            !self.has_pending(),
            IllegalCallSnafu {
                message: "token written while the previous one is pending"
            }
        );
        self.pending.clear();
        self.pending_pos = 0;
        self.encode_token(token)?;
        self.drain(sink, false)
    }

    /// Feed the given sequence of tokens which are part of the same data set,
    /// to a sink which always has room for more bytes.
    pub fn write_sequence<S, I>(&mut self, sink: &mut S, tokens: I) -> Result<()>
    where
        S: ?Sized + ByteSink,
        I: IntoIterator<Item = DataToken>,
    {
        for token in tokens {
            if self.write(sink, token)? == Progress::Suspended {
                return IllegalCallSnafu {
                    message: "sink cannot take all tokens at once",
                }
                .fail();
            }
        }
        Ok(())
    }

    /// Continue handing over the bytes of the last token to the sink.
    pub fn resume<S>(&mut self, sink: &mut S) -> Result<Progress>
    where
        S: ?Sized + ByteSink,
    {
        self.drain(sink, false)
    }

    /// Hand over all pending and cached bytes to the sink,
    /// then flush the sink.
    pub fn flush<S>(&mut self, sink: &mut S) -> Result<Progress>
    where
        S: ?Sized + ByteSink,
    {
        match self.drain(sink, true)? {
            Progress::Done => {
                sink.flush().context(WriteSinkSnafu)?;
                Ok(Progress::Done)
            }
            Progress::Suspended => Ok(Progress::Suspended),
        }
    }

    fn drain<S>(&mut self, sink: &mut S, all: bool) -> Result<Progress>
    where
        S: ?Sized + ByteSink,
    {
        loop {
            if self.cache.is_enabled() {
                let staged = self.cache.stage(&self.pending[self.pending_pos..]);
                self.pending_pos += staged;
                if !self.has_pending() && (!all || self.cache.is_empty()) {
                    return Ok(Progress::Done);
                }
                let written = self.cache.drain_into(sink).context(WriteSinkSnafu)?;
                if written == 0 {
                    return Ok(Progress::Suspended);
                }
            } else {
                if !self.has_pending() {
                    return Ok(Progress::Done);
                }
                let written = sink
                    .write_some(&self.pending[self.pending_pos..])
                    .context(WriteSinkSnafu)?;
                if written == 0 {
                    return Ok(Progress::Suspended);
                }
                self.pending_pos += written;
            }
        }
    }

    fn encode_token(&mut self, token: DataToken) -> Result<()> {
        // explicit length sequences or items
        // do not have their delimiter written
        match token {
            DataToken::SequenceStart { tag, len } => {
                self.seq_tokens.push(SeqToken {
                    typ: SeqTokenType::Sequence,
                    len,
                });
                self.encoder
                    .encode_element_header(
                        &mut self.pending,
                        DataElementHeader::new(tag, VR::SQ, len),
                    )
                    .context(EncodeHeaderSnafu { what: "sequence header" })?;
            }
            DataToken::PixelSequenceStart => {
                self.seq_tokens.push(SeqToken {
                    typ: SeqTokenType::Sequence,
                    len: Length::UNDEFINED,
                });
                self.encoder
                    .encode_element_header(
                        &mut self.pending,
                        DataElementHeader::new(Tag::PIXEL_DATA, VR::OB, Length::UNDEFINED),
                    )
                    .context(EncodeHeaderSnafu {
                        what: "pixel sequence header",
                    })?;
            }
            DataToken::ItemStart { len } => {
                self.seq_tokens.push(SeqToken {
                    typ: SeqTokenType::Item,
                    len,
                });
                self.encoder
                    .encode_item_header(&mut self.pending, len.0)
                    .context(EncodeHeaderSnafu { what: "item header" })?;
            }
            DataToken::ItemEnd => match self.seq_tokens.pop() {
                Some(SeqToken {
                    typ: SeqTokenType::Item,
                    len,
                }) => {
                    if len.is_undefined() {
                        self.encoder
                            .encode_item_delimiter(&mut self.pending)
                            .context(EncodeHeaderSnafu {
                                what: "item delimiter",
                            })?;
                    }
                }
                other => {
                    warn!("Item end does not close an item");
                    self.seq_tokens.extend(other);
                }
            },
            DataToken::SequenceEnd => match self.seq_tokens.pop() {
                Some(SeqToken {
                    typ: SeqTokenType::Sequence,
                    len,
                }) => {
                    if len.is_undefined() {
                        self.encoder
                            .encode_sequence_delimiter(&mut self.pending)
                            .context(EncodeHeaderSnafu {
                                what: "sequence delimiter",
                            })?;
                    }
                }
                other => {
                    warn!("Sequence end does not close a sequence");
                    self.seq_tokens.extend(other);
                }
            },
            DataToken::ElementHeader(header) => {
                let vr = writable_vr(header.vr, header.len, self.options.enable_new_vrs);
                if vr != header.vr && header.vr.has_short_length() {
                    warn!(
                        "Value of {} bytes does not fit in a {} element, writing {} as {}",
                        header.len, header.vr, header.tag, vr
                    );
                } else if vr != header.vr {
                    trace!("Writing {} {} as {}", header.tag, header.vr, vr);
                }
                self.encoder
                    .encode_element_header(
                        &mut self.pending,
                        DataElementHeader::new(header.tag, vr, header.len),
                    )
                    .context(EncodeHeaderSnafu {
                        what: "element header",
                    })?;
            }
            DataToken::PrimitiveValue(value) => {
                let bytes = value
                    .to_bytes(self.ts.endianness())
                    .context(WriteValueSnafu)?;
                self.pending.extend_from_slice(&bytes);
            }
            DataToken::ItemValue(bytes) => {
                if self.pending.is_empty() {
                    self.pending = bytes;
                } else {
                    self.pending.extend_from_slice(&bytes);
                }
            }
            DataToken::OffsetTable(table) => {
                let start = self.pending.len();
                self.pending.resize(start + table.len() * 4, 0);
                LittleEndian::write_u32_into(&table, &mut self.pending[start..]);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteordered::Endianness;
    use dcmio_core::stream::BufferSink;
    use dcmio_core::ValueStorage;
    use dcmio_transfer_syntax_registry::entries::{
        EXPLICIT_VR_LITTLE_ENDIAN, IMPLICIT_VR_LITTLE_ENDIAN,
    };

    fn us(value: u16) -> DataToken {
        DataToken::PrimitiveValue(ValueStorage::from_bytes(
            value.to_le_bytes().to_vec(),
            Endianness::Little,
            VR::US,
        ))
    }

    fn header(tag: Tag, vr: VR, len: u32) -> DataToken {
        DataToken::ElementHeader(DataElementHeader::new(tag, vr, Length(len)))
    }

    fn ultrasound_regions(seq_len: Length, item_lens: [Length; 2]) -> Vec<DataToken> {
        vec![
            DataToken::SequenceStart {
                tag: Tag(0x0018, 0x6011),
                len: seq_len,
            },
            DataToken::ItemStart { len: item_lens[0] },
            header(Tag(0x0018, 0x6012), VR::US, 2),
            us(1),
            header(Tag(0x0018, 0x6014), VR::US, 2),
            us(2),
            DataToken::ItemEnd,
            DataToken::ItemStart { len: item_lens[1] },
            header(Tag(0x0018, 0x6012), VR::US, 2),
            us(4),
            DataToken::ItemEnd,
            DataToken::SequenceEnd,
            header(Tag(0x0020, 0x4000), VR::LT, 4),
            DataToken::PrimitiveValue(ValueStorage::from_bytes(
                b"TEST".to_vec(),
                Endianness::Little,
                VR::LT,
            )),
        ]
    }

    fn validate_dataset_writer<I>(tokens: I, options: WriteOptions, ground_truth: &[u8])
    where
        I: IntoIterator<Item = DataToken>,
    {
        let mut sink = BufferSink::unbounded();
        let mut dset_writer = DataSetWriter::new(&EXPLICIT_VR_LITTLE_ENDIAN, options).unwrap();
        dset_writer.write_sequence(&mut sink, tokens).unwrap();
        assert_eq!(dset_writer.flush(&mut sink).unwrap(), Progress::Done);
        assert_eq!(sink.bytes(), ground_truth);
    }

    #[rustfmt::skip]
    static EXPLICIT_LENGTHS: &[u8] = &[
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

    #[test]
    fn write_sequence_explicit() {
        let tokens = ultrasound_regions(Length(46), [Length(20), Length(10)]);
        validate_dataset_writer(tokens, WriteOptions::default(), EXPLICIT_LENGTHS);
    }

    #[test]
    fn write_sequence_undefined_length() {
        let tokens = ultrasound_regions(Length::UNDEFINED, [Length::UNDEFINED; 2]);

        #[rustfmt::skip]
        static GROUND_TRUTH: &[u8] = &[
            0x18, 0x00, 0x11, 0x60, // sequence tag: (0018,6011) SequenceOfUltrasoundRegions
            b'S', b'Q', // VR
            0x00, 0x00, // reserved
            0xff, 0xff, 0xff, 0xff, // length: undefined
            // -- 12 --
            0xfe, 0xff, 0x00, 0xe0, // item start tag
            0xff, 0xff, 0xff, 0xff, // item length: undefined
            // -- 20 --
            0x18, 0x00, 0x12, 0x60, b'U', b'S', 0x02, 0x00, 0x01, 0x00, // (0018,6012) RegionSpatialFormat, len = 2, value = 1
            // -- 30 --
            0x18, 0x00, 0x14, 0x60, b'U', b'S', 0x02, 0x00, 0x02, 0x00, // (0018,6014) RegionDataType, len = 2, value = 2
            // -- 40 --
            0xfe, 0xff, 0x0d, 0xe0, 0x00, 0x00, 0x00, 0x00, // item end
            // -- 48 --
            0xfe, 0xff, 0x00, 0xe0, // item start tag
            0xff, 0xff, 0xff, 0xff, // item length: undefined
            // -- 56 --
            0x18, 0x00, 0x12, 0x60, b'U', b'S', 0x02, 0x00, 0x04, 0x00, // (0018,6012) RegionSpatialFormat, len = 2, value = 4
            // -- 66 --
            0xfe, 0xff, 0x0d, 0xe0, 0x00, 0x00, 0x00, 0x00, // item end
            // -- 74 --
            0xfe, 0xff, 0xdd, 0xe0, 0x00, 0x00, 0x00, 0x00, // sequence end
            // -- 82 --
            0x20, 0x00, 0x00, 0x40, b'L', b'T', 0x04, 0x00, // (0020,4000) ImageComments, len = 4
            b'T', b'E', b'S', b'T', // value = "TEST"
        ];

        validate_dataset_writer(tokens, WriteOptions::default(), GROUND_TRUTH);
    }

    #[test]
    fn write_cache_does_not_change_output() {
        let tokens = ultrasound_regions(Length(46), [Length(20), Length(10)]);
        validate_dataset_writer(
            tokens.clone(),
            WriteOptions::default().cache_size(0),
            EXPLICIT_LENGTHS,
        );
        validate_dataset_writer(tokens, WriteOptions::default().cache_size(3), EXPLICIT_LENGTHS);
    }

    #[test]
    fn small_sink_suspends_writer() {
        for cache_size in [0, 7, 4096] {
            let options = WriteOptions::default().cache_size(cache_size);
            let mut writer = DataSetWriter::new(&EXPLICIT_VR_LITTLE_ENDIAN, options).unwrap();
            let mut sink = BufferSink::with_limit(5);
            let mut out = Vec::new();
            let mut suspensions = 0;

            for token in ultrasound_regions(Length(46), [Length(20), Length(10)]) {
                let mut progress = writer.write(&mut sink, token).unwrap();
                while progress == Progress::Suspended {
                    suspensions += 1;
                    out.extend(sink.take());
                    progress = writer.resume(&mut sink).unwrap();
                }
            }
            while writer.flush(&mut sink).unwrap() == Progress::Suspended {
                suspensions += 1;
                out.extend(sink.take());
            }
            out.extend(sink.take());

            assert!(suspensions > 0);
            assert_eq!(out, EXPLICIT_LENGTHS);
        }
    }

    #[test]
    fn writing_while_pending_is_illegal() {
        let options = WriteOptions::default().cache_size(0);
        let mut writer = DataSetWriter::new(&EXPLICIT_VR_LITTLE_ENDIAN, options).unwrap();
        let mut sink = BufferSink::with_limit(4);
        let progress = writer
            .write(&mut sink, header(Tag(0x0018, 0x6012), VR::US, 2))
            .unwrap();
        assert_eq!(progress, Progress::Suspended);
        assert!(matches!(
            writer.write(&mut sink, us(1)),
            Err(Error::IllegalCall { .. })
        ));
    }

    #[test]
    fn odd_padding_lengths_are_illegal() {
        let options = WriteOptions::default().padding(Padding::WithPadding, 255, 0);
        assert!(matches!(
            DataSetWriter::new(&EXPLICIT_VR_LITTLE_ENDIAN, options),
            Err(Error::IllegalCall { .. })
        ));
    }

    #[test]
    fn new_vrs_can_be_disabled() {
        let tokens = vec![
            header(Tag(0x0008, 0x0119), VR::UT, 2),
            DataToken::PrimitiveValue(ValueStorage::from_bytes(
                b"A ".to_vec(),
                Endianness::Little,
                VR::UT,
            )),
        ];
        #[rustfmt::skip]
        static GROUND_TRUTH: &[u8] = &[
            0x08, 0x00, 0x19, 0x01, b'O', b'B', 0x00, 0x00, // (0008,0119) as OB
            0x02, 0x00, 0x00, 0x00, // length: 2
            b'A', b' ',
        ];
        validate_dataset_writer(tokens, WriteOptions::default().enable_new_vrs(false), GROUND_TRUTH);
    }

    #[test]
    fn oversized_short_values_become_un() {
        assert_eq!(writable_vr(VR::LO, Length(0x1_0000), true), VR::UN);
        assert_eq!(writable_vr(VR::LO, Length(0x1_0000), false), VR::OB);
        assert_eq!(writable_vr(VR::LO, Length(64), false), VR::LO);
        assert_eq!(writable_vr(VR::UN, Length(64), true), VR::UN);
    }

    #[test]
    fn write_encapsulated_pixel_data() {
        let tokens = vec![
            DataToken::PixelSequenceStart,
            DataToken::ItemStart { len: Length(4) },
            DataToken::OffsetTable(vec![0]),
            DataToken::ItemEnd,
            DataToken::ItemStart { len: Length(4) },
            DataToken::ItemValue(vec![0x99, 0x88, 0x77, 0x66]),
            DataToken::ItemEnd,
            DataToken::SequenceEnd,
        ];
        #[rustfmt::skip]
        static GROUND_TRUTH: &[u8] = &[
            0xe0, 0x7f, 0x10, 0x00, b'O', b'B', 0x00, 0x00, // (7FE0,0010) PixelData
            0xff, 0xff, 0xff, 0xff, // length: undefined
            0xfe, 0xff, 0x00, 0xe0, 0x04, 0x00, 0x00, 0x00, // item start, len 4
            0x00, 0x00, 0x00, 0x00, // offset table
            0xfe, 0xff, 0x00, 0xe0, 0x04, 0x00, 0x00, 0x00, // item start, len 4
            0x99, 0x88, 0x77, 0x66, // fragment
            0xfe, 0xff, 0xdd, 0xe0, 0x00, 0x00, 0x00, 0x00, // sequence end
        ];
        validate_dataset_writer(tokens, WriteOptions::default(), GROUND_TRUTH);
    }

    #[test]
    fn implicit_headers_have_no_vr() {
        let mut writer =
            DataSetWriter::new(&IMPLICIT_VR_LITTLE_ENDIAN, WriteOptions::default()).unwrap();
        let mut sink = BufferSink::unbounded();
        writer
            .write_sequence(&mut sink, vec![header(Tag(0x0028, 0x0002), VR::US, 2), us(3)])
            .unwrap();
        writer.flush(&mut sink).unwrap();
        assert_eq!(
            sink.bytes(),
            &[0x28, 0x00, 0x02, 0x00, 0x02, 0x00, 0x00, 0x00, 0x03, 0x00]
        );
    }
}
