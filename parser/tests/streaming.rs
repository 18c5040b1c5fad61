//! Reading and writing data sets through constrained sources and sinks.
use dcmio_core::header::{DataElementHeader, Length};
use dcmio_core::stream::{BufferSink, BufferSource, ByteSource, Progress};
use dcmio_core::{Tag, VR};
use dcmio_parser::dataset::{DataToken, Next, ReadOptions, WriteOptions};
use dcmio_parser::{DataSetReader, DataSetWriter};
use dcmio_transfer_syntax_registry::entries::EXPLICIT_VR_LITTLE_ENDIAN;

fn push_element(out: &mut Vec<u8>, group: u16, element: u16, vr: &[u8; 2], value: &[u8]) {
    out.extend_from_slice(&group.to_le_bytes());
    out.extend_from_slice(&element.to_le_bytes());
    out.extend_from_slice(vr);
    if matches!(vr, b"OB" | b"OW" | b"UN" | b"SQ" | b"UT") {
        out.extend_from_slice(&[0, 0]);
        out.extend_from_slice(&(value.len() as u32).to_le_bytes());
    } else {
        out.extend_from_slice(&(value.len() as u16).to_le_bytes());
    }
    out.extend_from_slice(value);
}

/// A data set of a little over 10 KB,
/// with a nested sequence of undefined length.
fn ten_kb_data_set() -> Vec<u8> {
    let mut out = Vec::new();
    push_element(&mut out, 0x0008, 0x0016, b"UI", b"1.2.840.10008.5.1.4.1.1.7\0");
    push_element(&mut out, 0x0008, 0x0018, b"UI", b"2.25.1234\0");
    push_element(&mut out, 0x0010, 0x0010, b"PN", b"SMITH^J\0");

    // (0040,0275) SQ, undefined length, one item
    out.extend_from_slice(&[0x40, 0x00, 0x75, 0x02, b'S', b'Q', 0, 0, 0xff, 0xff, 0xff, 0xff]);
    out.extend_from_slice(&[0xfe, 0xff, 0x00, 0xe0, 0xff, 0xff, 0xff, 0xff]);
    push_element(&mut out, 0x0040, 0x0007, b"LO", b"SCHEDULED ");
    out.extend_from_slice(&[0xfe, 0xff, 0x0d, 0xe0, 0, 0, 0, 0]);
    out.extend_from_slice(&[0xfe, 0xff, 0xdd, 0xe0, 0, 0, 0, 0]);

    for i in 0..38u16 {
        let value: Vec<u8> = (0..256).map(|x| (x as u16 + i) as u8).collect();
        push_element(&mut out, 0x0011, 0x1000 + i, b"OB", &value);
    }
    push_element(&mut out, 0x0028, 0x0002, b"US", &[3, 0]);
    assert!(out.len() > 10 * 1024);
    out
}

fn read_whole(data: &[u8]) -> Vec<DataToken> {
    let mut reader =
        DataSetReader::new(&EXPLICIT_VR_LITTLE_ENDIAN, ReadOptions::default()).unwrap();
    let mut source = BufferSource::from_bytes(data);
    let mut tokens = Vec::new();
    loop {
        match reader.next_token(&mut source).unwrap() {
            Next::Token(token) => tokens.push(token),
            Next::Suspended => panic!("a finished source should never suspend"),
            Next::End => return tokens,
        }
    }
}

#[test]
fn read_data_set_three_bytes_at_a_time() {
    let data = ten_kb_data_set();
    let expected = read_whole(&data);

    let mut reader =
        DataSetReader::new(&EXPLICIT_VR_LITTLE_ENDIAN, ReadOptions::default()).unwrap();
    let mut source = BufferSource::new();
    let mut chunks = data.chunks(3);
    let mut tokens = Vec::new();
    let mut suspensions = 0;

    loop {
        match reader.next_token(&mut source).unwrap() {
            Next::Token(token) => tokens.push(token),
            Next::Suspended => {
                suspensions += 1;
                match chunks.next() {
                    Some(chunk) => source.feed(chunk),
                    None => source.finish(),
                }
            }
            Next::End => break,
        }
    }

    // the reader only finished once everything was supplied
    assert!(chunks.next().is_none());
    assert_eq!(source.position(), data.len() as u64);
    assert!(suspensions > 1000);
    assert_eq!(tokens, expected);
}

#[rustfmt::skip]
static BEAM_SEQUENCE: &[u8] = &[
    0x0a, 0x30, 0xb0, 0x00, b'S', b'Q', 0x00, 0x00, // (300A,00B0) BeamSequence
    0xff, 0xff, 0xff, 0xff, // length: undefined
    // item 1
    0xfe, 0xff, 0x00, 0xe0, 0xff, 0xff, 0xff, 0xff,
    0x0a, 0x30, 0xc0, 0x00, b'I', b'S', 0x02, 0x00, b'1', b' ', // (300A,00C0) BeamNumber
    0x0a, 0x30, 0xc2, 0x00, b'L', b'O', 0x04, 0x00, b'A', b'P', b'G', b' ', // (300A,00C2) BeamName
    0xfe, 0xff, 0x0d, 0xe0, 0x00, 0x00, 0x00, 0x00, // item end
    // item 2
    0xfe, 0xff, 0x00, 0xe0, 0xff, 0xff, 0xff, 0xff,
    0x0a, 0x30, 0xc0, 0x00, b'I', b'S', 0x02, 0x00, b'2', b' ', // (300A,00C0) BeamNumber
    0x0a, 0x30, 0xc2, 0x00, b'L', b'O', 0x04, 0x00, b'L', b'A', b'T', b' ', // (300A,00C2) BeamName
    0xfe, 0xff, 0x0d, 0xe0, 0x00, 0x00, 0x00, 0x00, // item end
    0xfe, 0xff, 0xdd, 0xe0, 0x00, 0x00, 0x00, 0x00, // sequence end
];

#[test]
fn undefined_length_sequence_is_rewritten_identically() {
    let tokens = read_whole(BEAM_SEQUENCE);

    let items = tokens
        .iter()
        .filter(|t| matches!(t, DataToken::ItemStart { .. }))
        .count();
    assert_eq!(items, 2);
    assert_eq!(
        tokens[0],
        DataToken::SequenceStart {
            tag: Tag(0x300A, 0x00B0),
            len: Length::UNDEFINED,
        }
    );

    let mut writer =
        DataSetWriter::new(&EXPLICIT_VR_LITTLE_ENDIAN, WriteOptions::default()).unwrap();
    let mut sink = BufferSink::unbounded();
    writer.write_sequence(&mut sink, tokens).unwrap();
    assert_eq!(writer.flush(&mut sink).unwrap(), Progress::Done);
    assert_eq!(sink.bytes(), BEAM_SEQUENCE);
}

#[test]
fn write_through_small_sink_matches_whole_write() {
    let data = ten_kb_data_set();
    let tokens = read_whole(&data);

    let mut writer =
        DataSetWriter::new(&EXPLICIT_VR_LITTLE_ENDIAN, WriteOptions::default()).unwrap();
    let mut sink = BufferSink::with_limit(512);
    let mut out = Vec::new();
    for token in tokens {
        let mut progress = writer.write(&mut sink, token).unwrap();
        while progress == Progress::Suspended {
            out.extend(sink.take());
            progress = writer.resume(&mut sink).unwrap();
        }
    }
    while writer.flush(&mut sink).unwrap() == Progress::Suspended {
        out.extend(sink.take());
    }
    out.extend(sink.take());

    assert_eq!(out, data);
}

#[test]
fn truncated_value_fails_at_end_of_stream() {
    let mut data = Vec::new();
    push_element(&mut data, 0x0010, 0x0010, b"PN", b"SMITH^J\0");
    data.truncate(12);

    let mut reader =
        DataSetReader::new(&EXPLICIT_VR_LITTLE_ENDIAN, ReadOptions::default()).unwrap();
    let mut source = BufferSource::from_bytes(data);
    assert_eq!(
        reader.next_token(&mut source).unwrap(),
        Next::Token(DataToken::ElementHeader(DataElementHeader::new(
            Tag(0x0010, 0x0010),
            VR::PN,
            Length(8)
        )))
    );
    assert!(reader.next_token(&mut source).is_err());
}
