//! Support for RLE Lossless pixel data encoding and decoding.
//!
//! Each frame is one fragment, made of a 64-byte header
//! followed by up to 15 PackBits-compressed segments.
//! See <https://dicom.nema.org/medical/dicom/current/output/chtml/part05/chapter_G.html>
use byteordered::byteorder::{ByteOrder, LittleEndian};
use dcmio_encoding::adapters::{
    decode_error, encode_error, DecodeResult, EncodeOptions, EncodeResult, PixelDataCodec,
    PixelParams, RawPixelData,
};
use snafu::{ensure, whatever};

/// The size of the RLE header of each frame.
const HEADER_LEN: usize = 64;

/// The maximum number of segments in a frame.
const MAX_SEGMENTS: usize = 15;

/// Pixel data codec for the RLE Lossless transfer syntax
/// (UID `1.2.840.10008.1.2.5`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RleLosslessCodec;

/// Check the image parameters,
/// returning the number of bytes per sample and the number of segments.
fn segment_layout(params: &PixelParams) -> Option<(usize, usize)> {
    if !matches!(params.bits_allocated, 8 | 16 | 32) {
        return None;
    }
    let bytes_per_sample = usize::from(params.bits_allocated / 8);
    let segments = bytes_per_sample * usize::from(params.samples_per_pixel);
    if segments == 0 || segments > MAX_SEGMENTS {
        return None;
    }
    Some((bytes_per_sample, segments))
}

impl PixelDataCodec for RleLosslessCodec {
    fn decode(&self, pixels: &RawPixelData, params: &PixelParams) -> DecodeResult<Vec<u8>> {
        let (bytes_per_sample, nr_segments) = match segment_layout(params) {
            Some(layout) => layout,
            None => {
                return decode_error::InvalidParameterSnafu {
                    name: "Bits Allocated",
                }
                .fail()
            }
        };
        let nr_frames = params.number_of_frames.max(1);
        ensure!(
            pixels.fragments.len() == nr_frames as usize,
            decode_error::FragmentCountSnafu {
                expected: nr_frames,
                found: pixels.fragments.len(),
            }
        );

        let samples_per_pixel = usize::from(params.samples_per_pixel);
        let nr_pixels = usize::from(params.rows) * usize::from(params.columns);
        let frame_size = params.frame_size();
        let mut out = vec![0u8; frame_size * pixels.fragments.len()];

        for (fragment, frame) in pixels.fragments.iter().zip(out.chunks_exact_mut(frame_size)) {
            if fragment.len() < HEADER_LEN {
                whatever!("RLE fragment too short for its header");
            }
            let declared = LittleEndian::read_u32(&fragment[0..4]) as usize;
            if declared != nr_segments {
                whatever!(
                    "Expected {} RLE segments, but header declares {}",
                    nr_segments,
                    declared
                );
            }
            let mut offsets = [0usize; MAX_SEGMENTS + 1];
            for (i, offset) in offsets.iter_mut().take(nr_segments).enumerate() {
                *offset = LittleEndian::read_u32(&fragment[4 + i * 4..8 + i * 4]) as usize;
            }
            offsets[nr_segments] = fragment.len();

            for segment in 0..nr_segments {
                let (start, end) = (offsets[segment], offsets[segment + 1]);
                if start < HEADER_LEN || start > end || end > fragment.len() {
                    whatever!("Invalid offset of RLE segment #{}", segment);
                }
                let decoded = unpack_bits(&fragment[start..end], nr_pixels)?;

                // segments hold the most significant byte first,
                // native data is little endian and sample-interleaved
                let sample = segment / bytes_per_sample;
                let byte = bytes_per_sample - 1 - segment % bytes_per_sample;
                for (pixel, value) in decoded.into_iter().enumerate() {
                    frame[(pixel * samples_per_pixel + sample) * bytes_per_sample + byte] = value;
                }
            }
        }

        Ok(out)
    }

    fn encode(
        &self,
        native: &[u8],
        params: &PixelParams,
        _options: &EncodeOptions,
    ) -> EncodeResult<RawPixelData> {
        let (bytes_per_sample, nr_segments) = match segment_layout(params) {
            Some(layout) => layout,
            None => {
                return encode_error::InvalidParameterSnafu {
                    name: "Bits Allocated",
                }
                .fail()
            }
        };
        let nr_frames = params.number_of_frames.max(1) as usize;
        let frame_size = params.frame_size();
        ensure!(
            native.len() >= frame_size * nr_frames,
            encode_error::NotEnoughDataSnafu {
                expected: frame_size * nr_frames,
                found: native.len(),
            }
        );

        let samples_per_pixel = usize::from(params.samples_per_pixel);
        let nr_pixels = usize::from(params.rows) * usize::from(params.columns);
        let mut fragments = Vec::with_capacity(nr_frames);
        let mut offset_table = Vec::with_capacity(nr_frames);
        let mut next_offset = 0u32;
        let mut plane = Vec::with_capacity(nr_pixels);

        for frame in native.chunks_exact(frame_size.max(1)).take(nr_frames) {
            let mut fragment = vec![0u8; HEADER_LEN];
            LittleEndian::write_u32(&mut fragment[0..4], nr_segments as u32);

            for segment in 0..nr_segments {
                let offset = fragment.len() as u32;
                LittleEndian::write_u32(&mut fragment[4 + segment * 4..8 + segment * 4], offset);

                let sample = segment / bytes_per_sample;
                let byte = bytes_per_sample - 1 - segment % bytes_per_sample;
                plane.clear();
                plane.extend((0..nr_pixels).map(|pixel| {
                    frame[(pixel * samples_per_pixel + sample) * bytes_per_sample + byte]
                }));
                pack_bits(&plane, &mut fragment);
                if fragment.len() % 2 != 0 {
                    fragment.push(0);
                }
            }

            offset_table.push(next_offset);
            next_offset += 8 + fragment.len() as u32;
            fragments.push(fragment);
        }

        Ok(RawPixelData {
            offset_table,
            fragments,
        })
    }
}

/// Decompress a PackBits segment into exactly `expected` bytes.
///
/// Decoding stops once `expected` bytes are produced,
/// so trailing padding is ignored.
fn unpack_bits(segment: &[u8], expected: usize) -> DecodeResult<Vec<u8>> {
    let mut out = Vec::with_capacity(expected);
    let mut i = 0;
    while out.len() < expected && i < segment.len() {
        let header = segment[i] as i8;
        i += 1;
        match header {
            // no-op
            -128 => {}
            // literal run of `header + 1` bytes
            0..=127 => {
                let count = header as usize + 1;
                let end = (i + count).min(segment.len());
                out.extend_from_slice(&segment[i..end]);
                i = end;
            }
            // replicate the next byte `1 - header` times
            _ => {
                let count = (1 - i16::from(header)) as usize;
                match segment.get(i) {
                    Some(&value) => {
                        out.extend(std::iter::repeat(value).take(count));
                        i += 1;
                    }
                    None => break,
                }
            }
        }
    }

    if out.len() < expected {
        whatever!(
            "RLE segment ended early: {} of {} bytes decoded",
            out.len(),
            expected
        );
    }
    out.truncate(expected);
    Ok(out)
}

/// Compress `data` with PackBits, appending the outcome to `out`.
///
/// Runs of two or more equal bytes become replicate runs,
/// everything else is emitted as literal runs of at most 128 bytes.
fn pack_bits(data: &[u8], out: &mut Vec<u8>) {
    let mut i = 0;
    while i < data.len() {
        let mut run = 1;
        while i + run < data.len() && run < 128 && data[i + run] == data[i] {
            run += 1;
        }

        if run >= 2 {
            // header is -(run - 1) as two's complement
            out.push((257 - run) as u8);
            out.push(data[i]);
            i += run;
        } else {
            let start = i;
            while i < data.len() && i - start < 128 {
                if i + 1 < data.len() && data[i] == data[i + 1] {
                    break;
                }
                i += 1;
            }
            out.push((i - start - 1) as u8);
            out.extend_from_slice(&data[start..i]);
        }
    }
}
