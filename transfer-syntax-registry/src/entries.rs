//! The transfer syntaxes known to this crate.
//!
//! Data sets in any of them can be read and written,
//! since encapsulated pixel data fragments are kept as opaque bytes.
//! Converting pixel data into or out of an encapsulated syntax
//! needs a codec in the [`CodecRegistry`](crate::CodecRegistry);
//! the built-in registry only has one for RLE Lossless.

use byteordered::Endianness;
use dcmio_encoding::TransferSyntax;

// native

/// Implicit VR Little Endian, the default transfer syntax
pub const IMPLICIT_VR_LITTLE_ENDIAN: TransferSyntax = TransferSyntax::new(
    "1.2.840.10008.1.2",
    "Implicit VR Little Endian",
    Endianness::Little,
    false,
);

/// Explicit VR Little Endian
pub const EXPLICIT_VR_LITTLE_ENDIAN: TransferSyntax = TransferSyntax::new(
    "1.2.840.10008.1.2.1",
    "Explicit VR Little Endian",
    Endianness::Little,
    true,
);

/// Explicit VR Big Endian (retired)
pub const EXPLICIT_VR_BIG_ENDIAN: TransferSyntax = TransferSyntax::new(
    "1.2.840.10008.1.2.2",
    "Explicit VR Big Endian",
    Endianness::Big,
    true,
);

/// Deflated Explicit VR Little Endian
pub const DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN: TransferSyntax = TransferSyntax::new_deflated(
    "1.2.840.10008.1.2.1.99",
    "Deflated Explicit VR Little Endian",
);

// encapsulated

/// Encapsulated Uncompressed Explicit VR Little Endian
pub const ENCAPSULATED_UNCOMPRESSED_EXPLICIT_VR_LITTLE_ENDIAN: TransferSyntax =
    TransferSyntax::new_encapsulated(
        "1.2.840.10008.1.2.1.98",
        "Encapsulated Uncompressed Explicit VR Little Endian",
    );

/// RLE Lossless
pub const RLE_LOSSLESS: TransferSyntax =
    TransferSyntax::new_encapsulated("1.2.840.10008.1.2.5", "RLE Lossless");

/// JPEG Baseline (Process 1)
pub const JPEG_BASELINE: TransferSyntax =
    TransferSyntax::new_encapsulated("1.2.840.10008.1.2.4.50", "JPEG Baseline (Process 1)");

/// JPEG Extended (Process 2 & 4)
pub const JPEG_EXTENDED: TransferSyntax = TransferSyntax::new_encapsulated(
    "1.2.840.10008.1.2.4.51",
    "JPEG Extended (Process 2 & 4)",
);

/// JPEG Lossless, Non-Hierarchical (Process 14)
pub const JPEG_LOSSLESS_NON_HIERARCHICAL: TransferSyntax = TransferSyntax::new_encapsulated(
    "1.2.840.10008.1.2.4.57",
    "JPEG Lossless, Non-Hierarchical (Process 14)",
);

/// JPEG Lossless, first-order prediction (Process 14, selection value 1)
pub const JPEG_LOSSLESS_NON_HIERARCHICAL_FIRST_ORDER_PREDICTION: TransferSyntax =
    TransferSyntax::new_encapsulated(
        "1.2.840.10008.1.2.4.70",
        "JPEG Lossless, Non-Hierarchical, First-Order Prediction",
    );

/// JPEG-LS Lossless Image Compression
pub const JPEG_LS_LOSSLESS: TransferSyntax = TransferSyntax::new_encapsulated(
    "1.2.840.10008.1.2.4.80",
    "JPEG-LS Lossless Image Compression",
);

/// JPEG-LS Lossy (Near-Lossless) Image Compression
pub const JPEG_LS_LOSSY: TransferSyntax = TransferSyntax::new_encapsulated(
    "1.2.840.10008.1.2.4.81",
    "JPEG-LS Lossy (Near-Lossless) Image Compression",
);

/// JPEG 2000 Image Compression (Lossless Only)
pub const JPEG_2000_IMAGE_COMPRESSION_LOSSLESS_ONLY: TransferSyntax =
    TransferSyntax::new_encapsulated(
        "1.2.840.10008.1.2.4.90",
        "JPEG 2000 Image Compression (Lossless Only)",
    );

/// JPEG 2000 Image Compression
pub const JPEG_2000_IMAGE_COMPRESSION: TransferSyntax =
    TransferSyntax::new_encapsulated("1.2.840.10008.1.2.4.91", "JPEG 2000 Image Compression");

/// MPEG2 Main Profile / Main Level
pub const MPEG2_MAIN_PROFILE_MAIN_LEVEL: TransferSyntax = TransferSyntax::new_encapsulated(
    "1.2.840.10008.1.2.4.100",
    "MPEG2 Main Profile / Main Level",
);

/// MPEG-4 AVC/H.264 High Profile / Level 4.1
pub const MPEG4_AVC_H264_HIGH_PROFILE: TransferSyntax = TransferSyntax::new_encapsulated(
    "1.2.840.10008.1.2.4.102",
    "MPEG-4 AVC/H.264 High Profile / Level 4.1",
);

/// Looked up by UID in the registry.
pub(crate) const ALL: &[TransferSyntax] = &[
    IMPLICIT_VR_LITTLE_ENDIAN,
    EXPLICIT_VR_LITTLE_ENDIAN,
    EXPLICIT_VR_BIG_ENDIAN,
    DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN,
    ENCAPSULATED_UNCOMPRESSED_EXPLICIT_VR_LITTLE_ENDIAN,
    RLE_LOSSLESS,
    JPEG_BASELINE,
    JPEG_EXTENDED,
    JPEG_LOSSLESS_NON_HIERARCHICAL,
    JPEG_LOSSLESS_NON_HIERARCHICAL_FIRST_ORDER_PREDICTION,
    JPEG_LS_LOSSLESS,
    JPEG_LS_LOSSY,
    JPEG_2000_IMAGE_COMPRESSION_LOSSLESS_ONLY,
    JPEG_2000_IMAGE_COMPRESSION,
    MPEG2_MAIN_PROFILE_MAIN_LEVEL,
    MPEG4_AVC_H264_HIGH_PROFILE,
];
