//! Checks of primitive values against their value representation.
//!
//! Values which are not in memory are not checked.
use dcmio_core::storage::native_byte_order;
use dcmio_core::{Tag, ValueStorage, VR};
use snafu::{ensure, Backtrace, Snafu};
use tracing::warn;

/// A violation of the constraints of a value representation.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ValidationError {
    #[snafu(display(
        "Value of {} {} has {} bytes, which is not a multiple of {}",
        tag,
        vr,
        len,
        width
    ))]
    BadValueWidth {
        tag: Tag,
        vr: VR,
        len: usize,
        width: usize,
        backtrace: Backtrace,
    },
    #[snafu(display(
        "Value of {} {} has a component of {} bytes, more than the maximum of {}",
        tag,
        vr,
        len,
        max
    ))]
    ValueTooLong {
        tag: Tag,
        vr: VR,
        len: usize,
        max: usize,
        backtrace: Backtrace,
    },
    #[snafu(display("Unique identifier {} contains invalid characters", tag))]
    InvalidUid { tag: Tag, backtrace: Backtrace },
}

/// Validate a value,
/// logging a warning instead of failing unless `strict` is set.
pub fn check_value(
    tag: Tag,
    vr: VR,
    value: &ValueStorage,
    strict: bool,
) -> Result<(), ValidationError> {
    match validate_value(tag, vr, value) {
        Err(e) if !strict => {
            warn!("{}", e);
            Ok(())
        }
        other => other,
    }
}

/// Validate a value, failing on the first violation.
pub fn validate_value(tag: Tag, vr: VR, value: &ValueStorage) -> Result<(), ValidationError> {
    let bytes = match value.to_bytes(native_byte_order()) {
        Ok(bytes) => bytes,
        Err(_) => return Ok(()),
    };

    let width = vr.value_width().size();
    ensure!(
        bytes.len() % width == 0,
        BadValueWidthSnafu {
            tag,
            vr,
            len: bytes.len(),
            width,
        }
    );

    if !vr.is_string() {
        return Ok(());
    }
    let text = trim_end(&bytes);

    if vr == VR::UI {
        ensure!(
            text.iter().all(|c| c.is_ascii_digit() || *c == b'.' || *c == b'\\'),
            InvalidUidSnafu { tag }
        );
    }

    if let Some(max) = vr.max_value_length() {
        // these are never multi-valued
        let single = matches!(vr, VR::LT | VR::ST);
        let too_long = if single {
            Some(text.len()).filter(|len| *len > max)
        } else {
            text.split(|c| *c == b'\\')
                .map(|c| trim_end(c).len())
                .find(|len| *len > max)
        };
        if let Some(len) = too_long {
            return ValueTooLongSnafu { tag, vr, len, max }.fail();
        }
    }
    Ok(())
}

fn trim_end(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|b| *b != b' ' && *b != 0)
        .map(|i| i + 1)
        .unwrap_or(0);
    &bytes[..end]
}
