use dcmio_core::stream::{BufferSink, BufferSource, Progress};
use dcmio_core::{Tag, VR};
use dcmio_dictionary_std::tags;
use dcmio_object::meta::validate_meta_info;
use dcmio_object::read::read_dataset;
use dcmio_object::write::write_dataset;
use dcmio_object::{
    DataElement, DatasetReader, EncodingType, FileFormat, FileMetaTable, GroupLength, Item,
    OpenFileOptions, ReadMode, ReadOptions, SaveFileOptions, TransferState, WriteMode, WriteOptions,
};
use dcmio_transfer_syntax_registry::entries::{
    DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN, EXPLICIT_VR_BIG_ENDIAN, EXPLICIT_VR_LITTLE_ENDIAN,
    IMPLICIT_VR_LITTLE_ENDIAN, RLE_LOSSLESS,
};
use dcmio_transfer_syntax_registry::CodecRegistry;

fn patient() -> Item {
    let mut item = Item::new();
    item.put_str(tags::SOP_CLASS_UID, VR::UI, "1.2.840.10008.5.1.4.1.1.7");
    item.put_str(tags::SOP_INSTANCE_UID, VR::UI, "2.25.99887766");
    item.put_str(tags::PATIENT_NAME, VR::PN, "Doe^John");
    item.put_str(tags::PATIENT_ID, VR::LO, "ID0001");
    item
}

fn image() -> Item {
    let mut item = patient();
    item.put(DataElement::from_u16(tags::SAMPLES_PER_PIXEL, VR::US, &[1]));
    item.put(DataElement::from_u16(tags::ROWS, VR::US, &[8]));
    item.put(DataElement::from_u16(tags::COLUMNS, VR::US, &[8]));
    item.put(DataElement::from_u16(tags::BITS_ALLOCATED, VR::US, &[16]));
    let pixels: Vec<u16> = (0..64).map(|i| if i < 40 { 0x0107 } else { i }).collect();
    item.put(DataElement::from_u16(tags::PIXEL_DATA, VR::OW, &pixels));
    item
}

#[test]
fn save_and_open_in_each_native_syntax() {
    let dir = tempfile::tempdir().unwrap();
    for ts in &[
        IMPLICIT_VR_LITTLE_ENDIAN,
        EXPLICIT_VR_LITTLE_ENDIAN,
        EXPLICIT_VR_BIG_ENDIAN,
        DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN,
    ] {
        let path = dir.path().join("out.dcm");
        let mut file = FileFormat::new(image(), &EXPLICIT_VR_LITTLE_ENDIAN);
        file.save_file(&path, &SaveFileOptions::new().transfer_syntax(*ts))
            .unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[128..132], b"DICM");

        let back = dcmio_object::open_file(&path).unwrap();
        assert_eq!(back.transfer_syntax().uid(), ts.uid());
        assert_eq!(back.dataset(), &image(), "data set differs in {}", ts.name());
        let meta = back.meta().unwrap();
        assert_eq!(meta.transfer_syntax().as_deref(), Some(ts.uid()));
        assert_eq!(
            meta.media_storage_sop_instance_uid().as_deref(),
            Some("2.25.99887766")
        );
    }
}

#[test]
fn save_does_not_leave_temporary_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("only.dcm");
    let mut file = FileFormat::new(patient(), &EXPLICIT_VR_LITTLE_ENDIAN);
    file.save_file(&path, &SaveFileOptions::new()).unwrap();
    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn read_until_pixel_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("image.dcm");
    let mut file = FileFormat::new(image(), &EXPLICIT_VR_LITTLE_ENDIAN);
    file.save_file(&path, &SaveFileOptions::new()).unwrap();

    let back = OpenFileOptions::new()
        .read_until(tags::PIXEL_DATA)
        .open_file(&path)
        .unwrap();
    assert!(back.dataset().get(tags::PIXEL_DATA).is_none());
    assert!(back.dataset().get(tags::ROWS).is_some());
}

#[test]
fn rle_representation_survives_a_file() {
    let codecs = CodecRegistry::with_builtin();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rle.dcm");

    let mut file = FileFormat::new(image(), &EXPLICIT_VR_LITTLE_ENDIAN);
    file.choose_representation(&RLE_LOSSLESS, &codecs).unwrap();
    assert_eq!(file.transfer_syntax(), &RLE_LOSSLESS);
    file.save_file(&path, &SaveFileOptions::new()).unwrap();

    let mut back = dcmio_object::open_file(&path).unwrap();
    assert_eq!(back.transfer_syntax().uid(), RLE_LOSSLESS.uid());
    assert!(back
        .dataset()
        .element(tags::PIXEL_DATA)
        .unwrap()
        .value()
        .pixel_sequence()
        .is_some());

    back.choose_representation(&EXPLICIT_VR_LITTLE_ENDIAN, &codecs)
        .unwrap();
    assert_eq!(back.dataset(), &image());
}

#[test]
fn update_meta_takes_uids_from_the_data_set() {
    let mut file = FileFormat::new(patient(), &EXPLICIT_VR_LITTLE_ENDIAN);
    let mut out = Vec::new();
    file.write_to(&mut out, &SaveFileOptions::new()).unwrap();

    file.dataset_mut()
        .put_str(tags::SOP_INSTANCE_UID, VR::UI, "2.25.42");
    let mut out = Vec::new();
    file.write_to(&mut out, &SaveFileOptions::new()).unwrap();
    assert_eq!(
        file.meta().unwrap().media_storage_sop_instance_uid().as_deref(),
        Some("2.25.99887766")
    );

    let mut out = Vec::new();
    file.write_to(
        &mut out,
        &SaveFileOptions::new().write_mode(WriteMode::UpdateMeta),
    )
    .unwrap();
    assert_eq!(
        file.meta().unwrap().media_storage_sop_instance_uid().as_deref(),
        Some("2.25.42")
    );
}

#[test]
fn padded_person_name_is_reproduced() {
    let mut meta = FileMetaTable::new();
    validate_meta_info(&mut meta, &Item::new(), &EXPLICIT_VR_LITTLE_ENDIAN, WriteMode::FileFormat);
    let mut sink = BufferSink::unbounded();
    meta.write_to(&mut sink).unwrap();

    let dataset: Vec<u8> = [0x10, 0x00, 0x10, 0x00, b'P', b'N', 0x08, 0x00]
        .iter()
        .chain(b"SMITH^J\0")
        .copied()
        .collect();
    let mut bytes = vec![0; 128];
    bytes.extend_from_slice(b"DICM");
    bytes.extend_from_slice(sink.bytes());
    bytes.extend_from_slice(&dataset);

    let mut file =
        FileFormat::from_source(BufferSource::from_bytes(bytes), &OpenFileOptions::new()).unwrap();
    let name = file.dataset().element(tags::PATIENT_NAME).unwrap();
    assert_eq!(name.vr(), VR::PN);
    assert_eq!(name.to_str().unwrap(), "SMITH^J");

    let mut out = Vec::new();
    file.write_to(&mut out, &SaveFileOptions::new().write_mode(WriteMode::Dataset))
        .unwrap();
    assert_eq!(out, dataset);
}

#[test]
fn group_length_is_created_on_write() {
    let mut item = Item::new();
    item.put(DataElement::from_u16(Tag(0x0028, 0x0002), VR::US, &[3]));
    let mut file = FileFormat::new(item, &EXPLICIT_VR_LITTLE_ENDIAN);
    let options = SaveFileOptions::new()
        .write_mode(WriteMode::Dataset)
        .write_options(WriteOptions::new().group_length(GroupLength::WithGroupLength));
    let mut out = Vec::new();
    file.write_to(&mut out, &options).unwrap();

    let length = file.dataset().element(Tag(0x0028, 0x0000)).unwrap();
    assert_eq!(length.vr(), VR::UL);
    assert_eq!(length.uint32().unwrap(), 10);
    assert_eq!(
        out,
        vec![
            0x28, 0x00, 0x00, 0x00, b'U', b'L', 0x04, 0x00, 10, 0, 0, 0, //
            0x28, 0x00, 0x02, 0x00, b'U', b'S', 0x02, 0x00, 3, 0,
        ]
    );
}

#[test]
fn undefined_length_sequence_is_byte_identical() {
    let item = |number: &[u8; 2]| -> Vec<u8> {
        let mut out = vec![0xFE, 0xFF, 0x00, 0xE0, 0xFF, 0xFF, 0xFF, 0xFF];
        out.extend_from_slice(&[0x0A, 0x30, 0xC0, 0x00, b'I', b'S', 0x02, 0x00]);
        out.extend_from_slice(number);
        out.extend_from_slice(&[0xFE, 0xFF, 0x0D, 0xE0, 0, 0, 0, 0]);
        out
    };
    let mut bytes = vec![0x0A, 0x30, 0xB0, 0x00, b'S', b'Q', 0, 0, 0xFF, 0xFF, 0xFF, 0xFF];
    bytes.extend(item(b"1 "));
    bytes.extend(item(b"2 "));
    bytes.extend_from_slice(&[0xFE, 0xFF, 0xDD, 0xE0, 0, 0, 0, 0]);

    let mut source = BufferSource::from_bytes(bytes.clone());
    let dataset = read_dataset(&mut source, &EXPLICIT_VR_LITTLE_ENDIAN, ReadOptions::new()).unwrap();
    let beams = dataset
        .element(tags::BEAM_SEQUENCE)
        .unwrap()
        .value()
        .items()
        .unwrap();
    assert_eq!(beams.len(), 2);
    assert_eq!(
        beams[1].element(tags::BEAM_NUMBER).unwrap().to_parsed::<u32>().unwrap(),
        2
    );

    let mut sink = BufferSink::unbounded();
    write_dataset(
        &mut sink,
        &dataset,
        &EXPLICIT_VR_LITTLE_ENDIAN,
        WriteOptions::new().encoding(EncodingType::UndefinedLength),
    )
    .unwrap();
    assert_eq!(sink.bytes(), &bytes[..]);
}

#[test]
fn three_bytes_at_a_time() {
    let mut dataset = patient();
    for i in 0..300u16 {
        dataset.put_str(Tag(0x0011, 0x1000 + i), VR::LO, "a private value of some length");
    }
    let mut sink = BufferSink::unbounded();
    write_dataset(&mut sink, &dataset, &EXPLICIT_VR_LITTLE_ENDIAN, WriteOptions::new()).unwrap();
    let bytes = sink.into_bytes();
    assert!(bytes.len() > 10_000);

    let mut reader = DatasetReader::new(&EXPLICIT_VR_LITTLE_ENDIAN, ReadOptions::new());
    reader.init().unwrap();
    let mut source = BufferSource::new();
    let mut suspensions = 0;
    for chunk in bytes.chunks(3) {
        source.feed(chunk);
        match reader.read(&mut source).unwrap() {
            Progress::Suspended => suspensions += 1,
            Progress::Done => panic!("finished before the end of the stream"),
        }
        assert_ne!(reader.state(), TransferState::Ready);
    }
    source.finish();
    assert_eq!(reader.read(&mut source).unwrap(), Progress::Done);
    assert_eq!(reader.state(), TransferState::Ready);
    assert!(suspensions > 1);
    assert_eq!(reader.take_dataset().unwrap(), dataset);
}

#[test]
fn bare_data_set_with_given_syntax() {
    let mut sink = BufferSink::unbounded();
    write_dataset(&mut sink, &patient(), &EXPLICIT_VR_BIG_ENDIAN, WriteOptions::new()).unwrap();
    let options = OpenFileOptions::new()
        .read_mode(ReadMode::Dataset)
        .transfer_syntax(EXPLICIT_VR_BIG_ENDIAN);
    let file = FileFormat::from_source(BufferSource::from_bytes(sink.into_bytes()), &options)
        .unwrap();
    assert!(file.meta().is_none());
    assert_eq!(file.dataset(), &patient());
}
