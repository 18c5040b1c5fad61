//! Transfer syntax detection for data sets of unknown encoding.
use byteordered::byteorder::{BigEndian, ByteOrder, LittleEndian};
use dcmio_core::VR;
use dcmio_encoding::TransferSyntax;
use dcmio_transfer_syntax_registry::entries::{
    EXPLICIT_VR_BIG_ENDIAN, EXPLICIT_VR_LITTLE_ENDIAN, IMPLICIT_VR_LITTLE_ENDIAN,
};
use tracing::debug;

/// Guess the transfer syntax of a data set
/// from its first bytes (at least 6 are needed).
///
/// The value representation is explicit if bytes 4 and 5
/// form a known VR.
/// The byte order is the one which yields the lower group number,
/// since data sets start with the lowest groups.
///
/// Returns `None` if there are not enough bytes,
/// or the data looks like implicit VR big endian,
/// which is not a valid transfer syntax.
pub fn detect_transfer_syntax(data: &[u8]) -> Option<TransferSyntax> {
    if data.len() < 6 {
        return None;
    }
    let explicit = VR::from_binary([data[4], data[5]]).is_some();
    let group_le = LittleEndian::read_u16(&data[0..2]);
    let group_be = BigEndian::read_u16(&data[0..2]);
    let little_endian = group_le <= group_be;

    let ts = match (explicit, little_endian) {
        (true, true) => EXPLICIT_VR_LITTLE_ENDIAN,
        (true, false) => EXPLICIT_VR_BIG_ENDIAN,
        (false, true) => IMPLICIT_VR_LITTLE_ENDIAN,
        (false, false) => {
            debug!("Data set looks like implicit VR big endian");
            return None;
        }
    };
    debug!("Detected transfer syntax {}", ts.name());
    Some(ts)
}
