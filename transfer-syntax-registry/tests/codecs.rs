//! Pixel data conversion through the codec registry.
use dcmio_encoding::adapters::{EncodeOptions, PixelParams};
use dcmio_encoding::TransferSyntaxIndex;
use dcmio_transfer_syntax_registry::entries::{JPEG_BASELINE, RLE_LOSSLESS};
use dcmio_transfer_syntax_registry::{CodecRegistry, Error, TransferSyntaxRegistry};

fn gradient(params: &PixelParams) -> Vec<u8> {
    let frame = params.frame_size() * params.number_of_frames as usize;
    (0..frame).map(|i| (i / 4) as u8).collect()
}

#[test]
fn rle_through_registry() {
    let codecs = CodecRegistry::with_builtin();
    let params = PixelParams {
        rows: 16,
        columns: 16,
        samples_per_pixel: 1,
        bits_allocated: 16,
        number_of_frames: 3,
    };
    let native = gradient(&params);

    let ts = TransferSyntaxRegistry
        .get("1.2.840.10008.1.2.5")
        .expect("RLE Lossless should be known");
    assert_eq!(ts, &RLE_LOSSLESS);

    let raw = codecs
        .encode(ts.uid(), &native, &params, &EncodeOptions::new())
        .unwrap();
    assert_eq!(raw.fragments.len(), 3);
    assert!(raw.fragments.iter().all(|f| f.len() % 2 == 0));
    // gradients compress well
    assert!(raw.fragments[0].len() < params.frame_size());

    let decoded = codecs.decode(ts.uid(), &raw, &params).unwrap();
    assert_eq!(decoded, native);
}

#[test]
fn stub_transfer_syntaxes_have_no_codec() {
    let codecs = CodecRegistry::with_builtin();
    let params = PixelParams {
        rows: 2,
        columns: 2,
        samples_per_pixel: 1,
        bits_allocated: 8,
        number_of_frames: 1,
    };
    let err = codecs
        .encode(JPEG_BASELINE.uid(), &[0; 4], &params, &EncodeOptions::new())
        .unwrap_err();
    assert!(matches!(err, Error::NoCodec { .. }));
}
