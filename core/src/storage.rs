//! Element value storage.
//!
//! A [`ValueStorage`] owns the raw bytes of a single primitive element value.
//! The bytes may be resident in memory,
//! still being transferred from a byte source,
//! or deferred until first access
//! (in which case only their position in a seekable source is kept).
use crate::header::{ValueWidth, VR};
use crate::stream::{ByteSource, Progress};
use byteordered::Endianness;
use snafu::{Backtrace, OptionExt, ResultExt, Snafu};
use std::borrow::Cow;
use std::io;
use tracing::warn;

/// An error which may occur when loading or accessing a value.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// Could not read value bytes from the source.
    #[snafu(display("Could not read value bytes"))]
    ReadValue {
        backtrace: Backtrace,
        source: io::Error,
    },
    /// Could not move to a deferred value in the source.
    #[snafu(display("Could not seek to deferred value at position {}", position))]
    SeekValue {
        position: u64,
        backtrace: Backtrace,
        source: io::Error,
    },
    /// The source ended before the whole value was read.
    #[snafu(display(
        "End of stream reached with {} of {} value bytes read",
        transferred,
        length
    ))]
    EndOfStream {
        transferred: u32,
        length: u32,
        backtrace: Backtrace,
    },
    /// The value buffer could not be allocated.
    #[snafu(display("Not enough memory for a value of {} bytes", length))]
    MemoryExhausted { length: u32, backtrace: Backtrace },
    /// A deferred value was requested from a source without random access.
    #[snafu(display("Deferred value at position {} requires a seekable source", position))]
    NotSeekable { position: u64, backtrace: Backtrace },
    /// The value is not resident in memory.
    #[snafu(display("Value of {} bytes is not loaded", length))]
    NotLoaded { length: u32, backtrace: Backtrace },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The loading state of a value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ValueState {
    /// The value has no bytes.
    Empty,
    /// All bytes of the value are in memory.
    Resident,
    /// The bytes are still being read from the current source position.
    Loading,
    /// The bytes remain in a seekable source, at a known position.
    Deferred,
}

/// Owned storage of the bytes of a primitive element value.
#[derive(Debug, Clone)]
pub struct ValueStorage {
    state: ValueState,
    bytes: Vec<u8>,
    /// number of bytes of the value in its source
    length: u32,
    /// number of bytes obtained from the source so far
    transferred: u32,
    /// position of a deferred value in its source
    offset: Option<u64>,
    byte_order: Endianness,
    width: ValueWidth,
}

impl ValueStorage {
    /// Create an empty value.
    pub fn empty() -> Self {
        ValueStorage {
            state: ValueState::Empty,
            bytes: Vec::new(),
            length: 0,
            transferred: 0,
            offset: None,
            byte_order: native_byte_order(),
            width: ValueWidth::Bytes,
        }
    }

    /// Create a resident value with the given bytes,
    /// encoded in the given byte order.
    ///
    /// The bytes are kept as is, even if of odd length.
    pub fn from_bytes(bytes: Vec<u8>, byte_order: Endianness, vr: VR) -> Self {
        let length = bytes.len() as u32;
        ValueStorage {
            state: if bytes.is_empty() {
                ValueState::Empty
            } else {
                ValueState::Resident
            },
            bytes,
            length,
            transferred: length,
            offset: None,
            byte_order,
            width: vr.value_width(),
        }
    }

    /// Create a value of the given representation
    /// from bytes in the native byte order,
    /// padding it to an even length with the representation's padding byte.
    pub fn from_value(bytes: Vec<u8>, vr: VR) -> Self {
        let mut storage = ValueStorage::empty();
        storage.put(bytes, vr);
        storage
    }

    /// Create a value to be read from the current position of a source.
    /// The bytes are obtained with [`load_value`](ValueStorage::load_value).
    pub fn pending(length: u32, byte_order: Endianness, vr: VR) -> Self {
        ValueStorage {
            state: if length == 0 {
                ValueState::Empty
            } else {
                ValueState::Loading
            },
            bytes: Vec::new(),
            length,
            transferred: 0,
            offset: None,
            byte_order,
            width: vr.value_width(),
        }
    }

    /// Create a value which remains in a seekable source at the given position
    /// until it is loaded.
    pub fn deferred(offset: u64, length: u32, byte_order: Endianness, vr: VR) -> Self {
        ValueStorage {
            state: if length == 0 {
                ValueState::Empty
            } else {
                ValueState::Deferred
            },
            bytes: Vec::new(),
            length,
            transferred: 0,
            offset: Some(offset),
            byte_order,
            width: vr.value_width(),
        }
    }

    /// The current loading state.
    #[inline]
    pub fn state(&self) -> ValueState {
        self.state
    }

    /// Whether the value bytes can be accessed without loading.
    #[inline]
    pub fn is_loaded(&self) -> bool {
        matches!(self.state, ValueState::Empty | ValueState::Resident)
    }

    /// The value length in bytes.
    ///
    /// For resident values this is the length of the buffer,
    /// otherwise the length declared in the source.
    #[inline]
    pub fn length(&self) -> u32 {
        match self.state {
            ValueState::Resident => self.bytes.len() as u32,
            _ => self.length,
        }
    }

    /// The number of bytes obtained from the source so far.
    #[inline]
    pub fn transferred(&self) -> u32 {
        self.transferred
    }

    /// The position of a deferred value in its source.
    #[inline]
    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    /// The byte order in which the resident bytes are currently kept.
    #[inline]
    pub fn byte_order(&self) -> Endianness {
        self.byte_order
    }

    /// Obtain the remaining bytes of the value from the source.
    ///
    /// Deferred values are first sought to in the source,
    /// which must then be seekable.
    /// Values already in memory are left untouched.
    ///
    /// Returns [`Progress::Suspended`] if the source ran dry
    /// before the value was complete but may still deliver more bytes;
    /// the bytes obtained so far are kept, so that calling this method again
    /// continues where it left off.
    pub fn load_value<S>(&mut self, source: &mut S) -> Result<Progress>
    where
        S: ?Sized + ByteSource,
    {
        match self.state {
            ValueState::Empty | ValueState::Resident => return Ok(Progress::Done),
            ValueState::Deferred => {
                let position = self.offset.unwrap_or_default() + u64::from(self.transferred);
                snafu::ensure!(source.is_seekable(), NotSeekableSnafu { position });
                source
                    .seek_to(position)
                    .context(SeekValueSnafu { position })?;
            }
            ValueState::Loading => {}
        }

        if self.bytes.capacity() < self.length as usize {
            let additional = self.length as usize - self.bytes.len();
            self.bytes
                .try_reserve_exact(additional)
                .ok()
                .context(MemoryExhaustedSnafu {
                    length: self.length,
                })?;
        }

        let remaining = (self.length - self.transferred) as usize;
        let available = source.available().context(ReadValueSnafu)?;
        let n = remaining.min(available);
        if n > 0 {
            let start = self.bytes.len();
            self.bytes.resize(start + n, 0);
            let got = source
                .read_some(&mut self.bytes[start..])
                .context(ReadValueSnafu)?;
            self.bytes.truncate(start + got);
            self.transferred += got as u32;
        }

        if self.transferred == self.length {
            self.state = ValueState::Resident;
            return Ok(Progress::Done);
        }

        if source.at_end().context(ReadValueSnafu)? {
            return EndOfStreamSnafu {
                transferred: self.transferred,
                length: self.length,
            }
            .fail();
        }
        Ok(Progress::Suspended)
    }

    /// Ensure that a resident value has an even length,
    /// appending the padding byte of the given representation if necessary.
    ///
    /// Returns whether the value was padded.
    pub fn normalize(&mut self, vr: VR) -> bool {
        if self.state == ValueState::Resident && self.bytes.len() % 2 == 1 {
            self.bytes.push(vr.padding());
            self.length = self.bytes.len() as u32;
            true
        } else {
            false
        }
    }

    /// Retrieve the value bytes in the requested byte order,
    /// swapping them in place if they are currently kept in the other order.
    ///
    /// Asking twice for the same byte order never swaps twice.
    pub fn get_bytes(&mut self, byte_order: Endianness) -> Result<&[u8]> {
        match self.state {
            ValueState::Empty => return Ok(&[]),
            ValueState::Resident => {}
            ValueState::Loading | ValueState::Deferred => {
                return NotLoadedSnafu {
                    length: self.length,
                }
                .fail()
            }
        }
        if self.byte_order != byte_order {
            swap_in_place(&mut self.bytes, self.width);
            self.byte_order = byte_order;
        }
        Ok(&self.bytes)
    }

    /// Retrieve the value bytes in the requested byte order
    /// without changing the storage,
    /// copying them if a swap is needed.
    pub fn to_bytes(&self, byte_order: Endianness) -> Result<Cow<'_, [u8]>> {
        match self.state {
            ValueState::Empty => Ok(Cow::Borrowed(&[])),
            ValueState::Resident => {
                if self.byte_order == byte_order || self.width == ValueWidth::Bytes {
                    Ok(Cow::Borrowed(&self.bytes))
                } else {
                    let mut bytes = self.bytes.clone();
                    swap_in_place(&mut bytes, self.width);
                    Ok(Cow::Owned(bytes))
                }
            }
            ValueState::Loading | ValueState::Deferred => NotLoadedSnafu {
                length: self.length,
            }
            .fail(),
        }
    }

    /// Replace the value outright with bytes in the native byte order.
    ///
    /// Any deferred loading descriptor is discarded.
    /// Odd-length values are padded with the representation's padding byte.
    pub fn put(&mut self, mut bytes: Vec<u8>, vr: VR) {
        if bytes.len() % 2 == 1 {
            bytes.push(vr.padding());
        }
        self.length = bytes.len() as u32;
        self.transferred = self.length;
        self.state = if bytes.is_empty() {
            ValueState::Empty
        } else {
            ValueState::Resident
        };
        self.bytes = bytes;
        self.offset = None;
        self.byte_order = native_byte_order();
        self.width = vr.value_width();
    }

    /// Update the width used for swapping,
    /// after the value representation of the owning element changed.
    pub fn set_vr(&mut self, vr: VR) {
        self.width = vr.value_width();
    }
}

impl Default for ValueStorage {
    fn default() -> Self {
        ValueStorage::empty()
    }
}

/// Two values are equal if they hold the same bytes
/// once brought to the same byte order,
/// or if they refer to the same deferred bytes.
impl PartialEq for ValueStorage {
    fn eq(&self, other: &Self) -> bool {
        match (self.to_bytes(Endianness::Little), other.to_bytes(Endianness::Little)) {
            (Ok(a), Ok(b)) => a == b,
            (Err(_), Err(_)) => {
                self.offset == other.offset && self.length == other.length
            }
            _ => false,
        }
    }
}

/// The byte order of the running machine.
#[inline]
pub fn native_byte_order() -> Endianness {
    if cfg!(target_endian = "big") {
        Endianness::Big
    } else {
        Endianness::Little
    }
}

fn swap_in_place(bytes: &mut [u8], width: ValueWidth) {
    let size = width.size();
    if size > 1 {
        for chunk in bytes.chunks_exact_mut(size) {
            chunk.reverse();
        }
        if bytes.len() % size != 0 {
            warn!(
                "Value length {} is not a multiple of {}, trailing bytes not swapped",
                bytes.len(),
                size
            );
        }
    }
}
