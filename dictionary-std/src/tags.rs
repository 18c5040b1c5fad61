//! Data element tag declarations
//!
//! This module contains a curated subset of the attributes
//! of the standard data dictionary,
//! as tag constants and as dictionary entries.
// Automatically generated. Edit at your own risk.

use dcmio_core::dictionary::DictionaryEntryRef;
use dcmio_core::header::{Tag, VR};

/// FileMetaInformationGroupLength UL 1
#[rustfmt::skip]
pub const FILE_META_INFORMATION_GROUP_LENGTH: Tag = Tag(0x0002, 0x0000);
/// FileMetaInformationVersion OB 1
#[rustfmt::skip]
pub const FILE_META_INFORMATION_VERSION: Tag = Tag(0x0002, 0x0001);
/// MediaStorageSOPClassUID UI 1
#[rustfmt::skip]
pub const MEDIA_STORAGE_SOP_CLASS_UID: Tag = Tag(0x0002, 0x0002);
/// MediaStorageSOPInstanceUID UI 1
#[rustfmt::skip]
pub const MEDIA_STORAGE_SOP_INSTANCE_UID: Tag = Tag(0x0002, 0x0003);
/// TransferSyntaxUID UI 1
#[rustfmt::skip]
pub const TRANSFER_SYNTAX_UID: Tag = Tag(0x0002, 0x0010);
/// ImplementationClassUID UI 1
#[rustfmt::skip]
pub const IMPLEMENTATION_CLASS_UID: Tag = Tag(0x0002, 0x0012);
/// ImplementationVersionName SH 1
#[rustfmt::skip]
pub const IMPLEMENTATION_VERSION_NAME: Tag = Tag(0x0002, 0x0013);
/// SourceApplicationEntityTitle AE 1
#[rustfmt::skip]
pub const SOURCE_APPLICATION_ENTITY_TITLE: Tag = Tag(0x0002, 0x0016);
/// SendingApplicationEntityTitle AE 1
#[rustfmt::skip]
pub const SENDING_APPLICATION_ENTITY_TITLE: Tag = Tag(0x0002, 0x0017);
/// ReceivingApplicationEntityTitle AE 1
#[rustfmt::skip]
pub const RECEIVING_APPLICATION_ENTITY_TITLE: Tag = Tag(0x0002, 0x0018);
/// PrivateInformationCreatorUID UI 1
#[rustfmt::skip]
pub const PRIVATE_INFORMATION_CREATOR_UID: Tag = Tag(0x0002, 0x0100);
/// PrivateInformation OB 1
#[rustfmt::skip]
pub const PRIVATE_INFORMATION: Tag = Tag(0x0002, 0x0102);
/// SpecificCharacterSet CS 1-n
#[rustfmt::skip]
pub const SPECIFIC_CHARACTER_SET: Tag = Tag(0x0008, 0x0005);
/// ImageType CS 2-n
#[rustfmt::skip]
pub const IMAGE_TYPE: Tag = Tag(0x0008, 0x0008);
/// InstanceCreationDate DA 1
#[rustfmt::skip]
pub const INSTANCE_CREATION_DATE: Tag = Tag(0x0008, 0x0012);
/// InstanceCreationTime TM 1
#[rustfmt::skip]
pub const INSTANCE_CREATION_TIME: Tag = Tag(0x0008, 0x0013);
/// InstanceCreatorUID UI 1
#[rustfmt::skip]
pub const INSTANCE_CREATOR_UID: Tag = Tag(0x0008, 0x0014);
/// SOPClassUID UI 1
#[rustfmt::skip]
pub const SOP_CLASS_UID: Tag = Tag(0x0008, 0x0016);
/// SOPInstanceUID UI 1
#[rustfmt::skip]
pub const SOP_INSTANCE_UID: Tag = Tag(0x0008, 0x0018);
/// StudyDate DA 1
#[rustfmt::skip]
pub const STUDY_DATE: Tag = Tag(0x0008, 0x0020);
/// SeriesDate DA 1
#[rustfmt::skip]
pub const SERIES_DATE: Tag = Tag(0x0008, 0x0021);
/// AcquisitionDate DA 1
#[rustfmt::skip]
pub const ACQUISITION_DATE: Tag = Tag(0x0008, 0x0022);
/// ContentDate DA 1
#[rustfmt::skip]
pub const CONTENT_DATE: Tag = Tag(0x0008, 0x0023);
/// AcquisitionDateTime DT 1
#[rustfmt::skip]
pub const ACQUISITION_DATE_TIME: Tag = Tag(0x0008, 0x002A);
/// StudyTime TM 1
#[rustfmt::skip]
pub const STUDY_TIME: Tag = Tag(0x0008, 0x0030);
/// SeriesTime TM 1
#[rustfmt::skip]
pub const SERIES_TIME: Tag = Tag(0x0008, 0x0031);
/// AcquisitionTime TM 1
#[rustfmt::skip]
pub const ACQUISITION_TIME: Tag = Tag(0x0008, 0x0032);
/// ContentTime TM 1
#[rustfmt::skip]
pub const CONTENT_TIME: Tag = Tag(0x0008, 0x0033);
/// AccessionNumber SH 1
#[rustfmt::skip]
pub const ACCESSION_NUMBER: Tag = Tag(0x0008, 0x0050);
/// Modality CS 1
#[rustfmt::skip]
pub const MODALITY: Tag = Tag(0x0008, 0x0060);
/// ConversionType CS 1
#[rustfmt::skip]
pub const CONVERSION_TYPE: Tag = Tag(0x0008, 0x0064);
/// Manufacturer LO 1
#[rustfmt::skip]
pub const MANUFACTURER: Tag = Tag(0x0008, 0x0070);
/// InstitutionName LO 1
#[rustfmt::skip]
pub const INSTITUTION_NAME: Tag = Tag(0x0008, 0x0080);
/// InstitutionAddress ST 1
#[rustfmt::skip]
pub const INSTITUTION_ADDRESS: Tag = Tag(0x0008, 0x0081);
/// ReferringPhysicianName PN 1
#[rustfmt::skip]
pub const REFERRING_PHYSICIAN_NAME: Tag = Tag(0x0008, 0x0090);
/// CodeValue SH 1
#[rustfmt::skip]
pub const CODE_VALUE: Tag = Tag(0x0008, 0x0100);
/// CodingSchemeDesignator SH 1
#[rustfmt::skip]
pub const CODING_SCHEME_DESIGNATOR: Tag = Tag(0x0008, 0x0102);
/// CodingSchemeVersion SH 1
#[rustfmt::skip]
pub const CODING_SCHEME_VERSION: Tag = Tag(0x0008, 0x0103);
/// CodeMeaning LO 1
#[rustfmt::skip]
pub const CODE_MEANING: Tag = Tag(0x0008, 0x0104);
/// StationName SH 1
#[rustfmt::skip]
pub const STATION_NAME: Tag = Tag(0x0008, 0x1010);
/// StudyDescription LO 1
#[rustfmt::skip]
pub const STUDY_DESCRIPTION: Tag = Tag(0x0008, 0x1030);
/// SeriesDescription LO 1
#[rustfmt::skip]
pub const SERIES_DESCRIPTION: Tag = Tag(0x0008, 0x103E);
/// SeriesDescriptionCodeSequence SQ 1
#[rustfmt::skip]
pub const SERIES_DESCRIPTION_CODE_SEQUENCE: Tag = Tag(0x0008, 0x103F);
/// InstitutionalDepartmentName LO 1
#[rustfmt::skip]
pub const INSTITUTIONAL_DEPARTMENT_NAME: Tag = Tag(0x0008, 0x1040);
/// PerformingPhysicianName PN 1-n
#[rustfmt::skip]
pub const PERFORMING_PHYSICIAN_NAME: Tag = Tag(0x0008, 0x1050);
/// OperatorsName PN 1-n
#[rustfmt::skip]
pub const OPERATORS_NAME: Tag = Tag(0x0008, 0x1070);
/// ManufacturerModelName LO 1
#[rustfmt::skip]
pub const MANUFACTURER_MODEL_NAME: Tag = Tag(0x0008, 0x1090);
/// ReferencedStudySequence SQ 1
#[rustfmt::skip]
pub const REFERENCED_STUDY_SEQUENCE: Tag = Tag(0x0008, 0x1110);
/// ReferencedPerformedProcedureStepSequence SQ 1
#[rustfmt::skip]
pub const REFERENCED_PERFORMED_PROCEDURE_STEP_SEQUENCE: Tag = Tag(0x0008, 0x1111);
/// ReferencedSeriesSequence SQ 1
#[rustfmt::skip]
pub const REFERENCED_SERIES_SEQUENCE: Tag = Tag(0x0008, 0x1115);
/// ReferencedImageSequence SQ 1
#[rustfmt::skip]
pub const REFERENCED_IMAGE_SEQUENCE: Tag = Tag(0x0008, 0x1140);
/// ReferencedSOPClassUID UI 1
#[rustfmt::skip]
pub const REFERENCED_SOP_CLASS_UID: Tag = Tag(0x0008, 0x1150);
/// ReferencedSOPInstanceUID UI 1
#[rustfmt::skip]
pub const REFERENCED_SOP_INSTANCE_UID: Tag = Tag(0x0008, 0x1155);
/// ReferencedFrameNumber IS 1-n
#[rustfmt::skip]
pub const REFERENCED_FRAME_NUMBER: Tag = Tag(0x0008, 0x1160);
/// DerivationDescription ST 1
#[rustfmt::skip]
pub const DERIVATION_DESCRIPTION: Tag = Tag(0x0008, 0x2111);
/// SourceImageSequence SQ 1
#[rustfmt::skip]
pub const SOURCE_IMAGE_SEQUENCE: Tag = Tag(0x0008, 0x2112);
/// DerivationCodeSequence SQ 1
#[rustfmt::skip]
pub const DERIVATION_CODE_SEQUENCE: Tag = Tag(0x0008, 0x9215);
/// PatientName PN 1
#[rustfmt::skip]
pub const PATIENT_NAME: Tag = Tag(0x0010, 0x0010);
/// PatientID LO 1
#[rustfmt::skip]
pub const PATIENT_ID: Tag = Tag(0x0010, 0x0020);
/// IssuerOfPatientID LO 1
#[rustfmt::skip]
pub const ISSUER_OF_PATIENT_ID: Tag = Tag(0x0010, 0x0021);
/// PatientBirthDate DA 1
#[rustfmt::skip]
pub const PATIENT_BIRTH_DATE: Tag = Tag(0x0010, 0x0030);
/// PatientBirthTime TM 1
#[rustfmt::skip]
pub const PATIENT_BIRTH_TIME: Tag = Tag(0x0010, 0x0032);
/// PatientSex CS 1
#[rustfmt::skip]
pub const PATIENT_SEX: Tag = Tag(0x0010, 0x0040);
/// OtherPatientIDs LO 1-n
#[rustfmt::skip]
pub const OTHER_PATIENT_I_DS: Tag = Tag(0x0010, 0x1000);
/// OtherPatientNames PN 1-n
#[rustfmt::skip]
pub const OTHER_PATIENT_NAMES: Tag = Tag(0x0010, 0x1001);
/// PatientAge AS 1
#[rustfmt::skip]
pub const PATIENT_AGE: Tag = Tag(0x0010, 0x1010);
/// PatientSize DS 1
#[rustfmt::skip]
pub const PATIENT_SIZE: Tag = Tag(0x0010, 0x1020);
/// PatientWeight DS 1
#[rustfmt::skip]
pub const PATIENT_WEIGHT: Tag = Tag(0x0010, 0x1030);
/// EthnicGroup SH 1
#[rustfmt::skip]
pub const ETHNIC_GROUP: Tag = Tag(0x0010, 0x2160);
/// PatientComments LT 1
#[rustfmt::skip]
pub const PATIENT_COMMENTS: Tag = Tag(0x0010, 0x4000);
/// ContrastBolusAgent LO 1
#[rustfmt::skip]
pub const CONTRAST_BOLUS_AGENT: Tag = Tag(0x0018, 0x0010);
/// BodyPartExamined CS 1
#[rustfmt::skip]
pub const BODY_PART_EXAMINED: Tag = Tag(0x0018, 0x0015);
/// ScanningSequence CS 1-n
#[rustfmt::skip]
pub const SCANNING_SEQUENCE: Tag = Tag(0x0018, 0x0020);
/// SliceThickness DS 1
#[rustfmt::skip]
pub const SLICE_THICKNESS: Tag = Tag(0x0018, 0x0050);
/// KVP DS 1
#[rustfmt::skip]
pub const KVP: Tag = Tag(0x0018, 0x0060);
/// SpacingBetweenSlices DS 1
#[rustfmt::skip]
pub const SPACING_BETWEEN_SLICES: Tag = Tag(0x0018, 0x0088);
/// DeviceSerialNumber LO 1
#[rustfmt::skip]
pub const DEVICE_SERIAL_NUMBER: Tag = Tag(0x0018, 0x1000);
/// SoftwareVersions LO 1-n
#[rustfmt::skip]
pub const SOFTWARE_VERSIONS: Tag = Tag(0x0018, 0x1020);
/// ProtocolName LO 1
#[rustfmt::skip]
pub const PROTOCOL_NAME: Tag = Tag(0x0018, 0x1030);
/// ExposureTime IS 1
#[rustfmt::skip]
pub const EXPOSURE_TIME: Tag = Tag(0x0018, 0x1150);
/// XRayTubeCurrent IS 1
#[rustfmt::skip]
pub const X_RAY_TUBE_CURRENT: Tag = Tag(0x0018, 0x1151);
/// Exposure IS 1
#[rustfmt::skip]
pub const EXPOSURE: Tag = Tag(0x0018, 0x1152);
/// PatientPosition CS 1
#[rustfmt::skip]
pub const PATIENT_POSITION: Tag = Tag(0x0018, 0x5100);
/// StudyInstanceUID UI 1
#[rustfmt::skip]
pub const STUDY_INSTANCE_UID: Tag = Tag(0x0020, 0x000D);
/// SeriesInstanceUID UI 1
#[rustfmt::skip]
pub const SERIES_INSTANCE_UID: Tag = Tag(0x0020, 0x000E);
/// StudyID SH 1
#[rustfmt::skip]
pub const STUDY_ID: Tag = Tag(0x0020, 0x0010);
/// SeriesNumber IS 1
#[rustfmt::skip]
pub const SERIES_NUMBER: Tag = Tag(0x0020, 0x0011);
/// AcquisitionNumber IS 1
#[rustfmt::skip]
pub const ACQUISITION_NUMBER: Tag = Tag(0x0020, 0x0012);
/// InstanceNumber IS 1
#[rustfmt::skip]
pub const INSTANCE_NUMBER: Tag = Tag(0x0020, 0x0013);
/// PatientOrientation CS 2
#[rustfmt::skip]
pub const PATIENT_ORIENTATION: Tag = Tag(0x0020, 0x0020);
/// ImagePositionPatient DS 3
#[rustfmt::skip]
pub const IMAGE_POSITION_PATIENT: Tag = Tag(0x0020, 0x0032);
/// ImageOrientationPatient DS 6
#[rustfmt::skip]
pub const IMAGE_ORIENTATION_PATIENT: Tag = Tag(0x0020, 0x0037);
/// FrameOfReferenceUID UI 1
#[rustfmt::skip]
pub const FRAME_OF_REFERENCE_UID: Tag = Tag(0x0020, 0x0052);
/// PositionReferenceIndicator LO 1
#[rustfmt::skip]
pub const POSITION_REFERENCE_INDICATOR: Tag = Tag(0x0020, 0x1040);
/// SliceLocation DS 1
#[rustfmt::skip]
pub const SLICE_LOCATION: Tag = Tag(0x0020, 0x1041);
/// ImageComments LT 1
#[rustfmt::skip]
pub const IMAGE_COMMENTS: Tag = Tag(0x0020, 0x4000);
/// SamplesPerPixel US 1
#[rustfmt::skip]
pub const SAMPLES_PER_PIXEL: Tag = Tag(0x0028, 0x0002);
/// PhotometricInterpretation CS 1
#[rustfmt::skip]
pub const PHOTOMETRIC_INTERPRETATION: Tag = Tag(0x0028, 0x0004);
/// PlanarConfiguration US 1
#[rustfmt::skip]
pub const PLANAR_CONFIGURATION: Tag = Tag(0x0028, 0x0006);
/// NumberOfFrames IS 1
#[rustfmt::skip]
pub const NUMBER_OF_FRAMES: Tag = Tag(0x0028, 0x0008);
/// FrameIncrementPointer AT 1-n
#[rustfmt::skip]
pub const FRAME_INCREMENT_POINTER: Tag = Tag(0x0028, 0x0009);
/// Rows US 1
#[rustfmt::skip]
pub const ROWS: Tag = Tag(0x0028, 0x0010);
/// Columns US 1
#[rustfmt::skip]
pub const COLUMNS: Tag = Tag(0x0028, 0x0011);
/// PixelSpacing DS 2
#[rustfmt::skip]
pub const PIXEL_SPACING: Tag = Tag(0x0028, 0x0030);
/// PixelAspectRatio IS 2
#[rustfmt::skip]
pub const PIXEL_ASPECT_RATIO: Tag = Tag(0x0028, 0x0034);
/// BitsAllocated US 1
#[rustfmt::skip]
pub const BITS_ALLOCATED: Tag = Tag(0x0028, 0x0100);
/// BitsStored US 1
#[rustfmt::skip]
pub const BITS_STORED: Tag = Tag(0x0028, 0x0101);
/// HighBit US 1
#[rustfmt::skip]
pub const HIGH_BIT: Tag = Tag(0x0028, 0x0102);
/// PixelRepresentation US 1
#[rustfmt::skip]
pub const PIXEL_REPRESENTATION: Tag = Tag(0x0028, 0x0103);
/// SmallestImagePixelValue US 1
#[rustfmt::skip]
pub const SMALLEST_IMAGE_PIXEL_VALUE: Tag = Tag(0x0028, 0x0106);
/// LargestImagePixelValue US 1
#[rustfmt::skip]
pub const LARGEST_IMAGE_PIXEL_VALUE: Tag = Tag(0x0028, 0x0107);
/// PixelPaddingValue US 1
#[rustfmt::skip]
pub const PIXEL_PADDING_VALUE: Tag = Tag(0x0028, 0x0120);
/// BurnedInAnnotation CS 1
#[rustfmt::skip]
pub const BURNED_IN_ANNOTATION: Tag = Tag(0x0028, 0x0301);
/// WindowCenter DS 1-n
#[rustfmt::skip]
pub const WINDOW_CENTER: Tag = Tag(0x0028, 0x1050);
/// WindowWidth DS 1-n
#[rustfmt::skip]
pub const WINDOW_WIDTH: Tag = Tag(0x0028, 0x1051);
/// RescaleIntercept DS 1
#[rustfmt::skip]
pub const RESCALE_INTERCEPT: Tag = Tag(0x0028, 0x1052);
/// RescaleSlope DS 1
#[rustfmt::skip]
pub const RESCALE_SLOPE: Tag = Tag(0x0028, 0x1053);
/// RescaleType LO 1
#[rustfmt::skip]
pub const RESCALE_TYPE: Tag = Tag(0x0028, 0x1054);
/// RedPaletteColorLookupTableDescriptor US 3
#[rustfmt::skip]
pub const RED_PALETTE_COLOR_LOOKUP_TABLE_DESCRIPTOR: Tag = Tag(0x0028, 0x1101);
/// GreenPaletteColorLookupTableDescriptor US 3
#[rustfmt::skip]
pub const GREEN_PALETTE_COLOR_LOOKUP_TABLE_DESCRIPTOR: Tag = Tag(0x0028, 0x1102);
/// BluePaletteColorLookupTableDescriptor US 3
#[rustfmt::skip]
pub const BLUE_PALETTE_COLOR_LOOKUP_TABLE_DESCRIPTOR: Tag = Tag(0x0028, 0x1103);
/// RedPaletteColorLookupTableData OW 1
#[rustfmt::skip]
pub const RED_PALETTE_COLOR_LOOKUP_TABLE_DATA: Tag = Tag(0x0028, 0x1201);
/// GreenPaletteColorLookupTableData OW 1
#[rustfmt::skip]
pub const GREEN_PALETTE_COLOR_LOOKUP_TABLE_DATA: Tag = Tag(0x0028, 0x1202);
/// BluePaletteColorLookupTableData OW 1
#[rustfmt::skip]
pub const BLUE_PALETTE_COLOR_LOOKUP_TABLE_DATA: Tag = Tag(0x0028, 0x1203);
/// LossyImageCompression CS 1
#[rustfmt::skip]
pub const LOSSY_IMAGE_COMPRESSION: Tag = Tag(0x0028, 0x2110);
/// LossyImageCompressionRatio DS 1-n
#[rustfmt::skip]
pub const LOSSY_IMAGE_COMPRESSION_RATIO: Tag = Tag(0x0028, 0x2112);
/// LossyImageCompressionMethod CS 1-n
#[rustfmt::skip]
pub const LOSSY_IMAGE_COMPRESSION_METHOD: Tag = Tag(0x0028, 0x2114);
/// ModalityLUTSequence SQ 1
#[rustfmt::skip]
pub const MODALITY_LUT_SEQUENCE: Tag = Tag(0x0028, 0x3000);
/// LUTDescriptor US 3
#[rustfmt::skip]
pub const LUT_DESCRIPTOR: Tag = Tag(0x0028, 0x3002);
/// LUTExplanation LO 1
#[rustfmt::skip]
pub const LUT_EXPLANATION: Tag = Tag(0x0028, 0x3003);
/// LUTData US 1-n
#[rustfmt::skip]
pub const LUT_DATA: Tag = Tag(0x0028, 0x3006);
/// VOILUTSequence SQ 1
#[rustfmt::skip]
pub const VOILUT_SEQUENCE: Tag = Tag(0x0028, 0x3010);
/// RequestedProcedureDescription LO 1
#[rustfmt::skip]
pub const REQUESTED_PROCEDURE_DESCRIPTION: Tag = Tag(0x0032, 0x1060);
/// PerformedProcedureStepStartDate DA 1
#[rustfmt::skip]
pub const PERFORMED_PROCEDURE_STEP_START_DATE: Tag = Tag(0x0040, 0x0244);
/// PerformedProcedureStepStartTime TM 1
#[rustfmt::skip]
pub const PERFORMED_PROCEDURE_STEP_START_TIME: Tag = Tag(0x0040, 0x0245);
/// PerformedProcedureStepID SH 1
#[rustfmt::skip]
pub const PERFORMED_PROCEDURE_STEP_ID: Tag = Tag(0x0040, 0x0253);
/// PerformedProcedureStepDescription LO 1
#[rustfmt::skip]
pub const PERFORMED_PROCEDURE_STEP_DESCRIPTION: Tag = Tag(0x0040, 0x0254);
/// PerformedProtocolCodeSequence SQ 1
#[rustfmt::skip]
pub const PERFORMED_PROTOCOL_CODE_SEQUENCE: Tag = Tag(0x0040, 0x0260);
/// RequestAttributesSequence SQ 1
#[rustfmt::skip]
pub const REQUEST_ATTRIBUTES_SEQUENCE: Tag = Tag(0x0040, 0x0275);
/// RelationshipType CS 1
#[rustfmt::skip]
pub const RELATIONSHIP_TYPE: Tag = Tag(0x0040, 0xA010);
/// ValueType CS 1
#[rustfmt::skip]
pub const VALUE_TYPE: Tag = Tag(0x0040, 0xA040);
/// ConceptNameCodeSequence SQ 1
#[rustfmt::skip]
pub const CONCEPT_NAME_CODE_SEQUENCE: Tag = Tag(0x0040, 0xA043);
/// UID UI 1
#[rustfmt::skip]
pub const UID: Tag = Tag(0x0040, 0xA124);
/// TextValue UT 1
#[rustfmt::skip]
pub const TEXT_VALUE: Tag = Tag(0x0040, 0xA160);
/// ConceptCodeSequence SQ 1
#[rustfmt::skip]
pub const CONCEPT_CODE_SEQUENCE: Tag = Tag(0x0040, 0xA168);
/// ContentSequence SQ 1
#[rustfmt::skip]
pub const CONTENT_SEQUENCE: Tag = Tag(0x0040, 0xA730);
/// RadiopharmaceuticalInformationSequence SQ 1
#[rustfmt::skip]
pub const RADIOPHARMACEUTICAL_INFORMATION_SEQUENCE: Tag = Tag(0x0054, 0x0016);
/// NumberOfSlices US 1
#[rustfmt::skip]
pub const NUMBER_OF_SLICES: Tag = Tag(0x0054, 0x0081);
/// StorageMediaFileSetUID UI 1
#[rustfmt::skip]
pub const STORAGE_MEDIA_FILE_SET_UID: Tag = Tag(0x0088, 0x0140);
/// BeamSequence SQ 1
#[rustfmt::skip]
pub const BEAM_SEQUENCE: Tag = Tag(0x300A, 0x00B0);
/// TreatmentMachineName SH 1
#[rustfmt::skip]
pub const TREATMENT_MACHINE_NAME: Tag = Tag(0x300A, 0x00B2);
/// PrimaryDosimeterUnit CS 1
#[rustfmt::skip]
pub const PRIMARY_DOSIMETER_UNIT: Tag = Tag(0x300A, 0x00B3);
/// SourceAxisDistance DS 1
#[rustfmt::skip]
pub const SOURCE_AXIS_DISTANCE: Tag = Tag(0x300A, 0x00B4);
/// BeamNumber IS 1
#[rustfmt::skip]
pub const BEAM_NUMBER: Tag = Tag(0x300A, 0x00C0);
/// BeamName LO 1
#[rustfmt::skip]
pub const BEAM_NAME: Tag = Tag(0x300A, 0x00C2);
/// BeamType CS 1
#[rustfmt::skip]
pub const BEAM_TYPE: Tag = Tag(0x300A, 0x00C4);
/// RadiationType CS 1
#[rustfmt::skip]
pub const RADIATION_TYPE: Tag = Tag(0x300A, 0x00C6);
/// NumberOfControlPoints IS 1
#[rustfmt::skip]
pub const NUMBER_OF_CONTROL_POINTS: Tag = Tag(0x300A, 0x0110);
/// ControlPointSequence SQ 1
#[rustfmt::skip]
pub const CONTROL_POINT_SEQUENCE: Tag = Tag(0x300A, 0x0111);
/// ReferencedRTPlanSequence SQ 1
#[rustfmt::skip]
pub const REFERENCED_RT_PLAN_SEQUENCE: Tag = Tag(0x300C, 0x0002);
/// OverlayRows US 1
#[rustfmt::skip]
pub const OVERLAY_ROWS: Tag = Tag(0x6000, 0x0010);
/// OverlayColumns US 1
#[rustfmt::skip]
pub const OVERLAY_COLUMNS: Tag = Tag(0x6000, 0x0011);
/// OverlayType CS 1
#[rustfmt::skip]
pub const OVERLAY_TYPE: Tag = Tag(0x6000, 0x0040);
/// OverlayOrigin SS 2
#[rustfmt::skip]
pub const OVERLAY_ORIGIN: Tag = Tag(0x6000, 0x0050);
/// OverlayBitsAllocated US 1
#[rustfmt::skip]
pub const OVERLAY_BITS_ALLOCATED: Tag = Tag(0x6000, 0x0100);
/// OverlayBitPosition US 1
#[rustfmt::skip]
pub const OVERLAY_BIT_POSITION: Tag = Tag(0x6000, 0x0102);
/// OverlayData OW 1
#[rustfmt::skip]
pub const OVERLAY_DATA: Tag = Tag(0x6000, 0x3000);
/// ExtendedOffsetTable OV 1
#[rustfmt::skip]
pub const EXTENDED_OFFSET_TABLE: Tag = Tag(0x7FE0, 0x0001);
/// ExtendedOffsetTableLengths OV 1
#[rustfmt::skip]
pub const EXTENDED_OFFSET_TABLE_LENGTHS: Tag = Tag(0x7FE0, 0x0002);
/// PixelData OW 1
#[rustfmt::skip]
pub const PIXEL_DATA: Tag = Tag(0x7FE0, 0x0010);
/// DigitalSignaturesSequence SQ 1
#[rustfmt::skip]
pub const DIGITAL_SIGNATURES_SEQUENCE: Tag = Tag(0xFFFA, 0xFFFA);
/// DataSetTrailingPadding OB 1
#[rustfmt::skip]
pub const DATA_SET_TRAILING_PADDING: Tag = Tag(0xFFFC, 0xFFFC);

type E = DictionaryEntryRef<'static>;

#[rustfmt::skip]
pub(crate) const ENTRIES: &[E] = &[
    E { tag: FILE_META_INFORMATION_GROUP_LENGTH, alias: "FileMetaInformationGroupLength", vr: VR::UL, vm: "1" },
    E { tag: FILE_META_INFORMATION_VERSION, alias: "FileMetaInformationVersion", vr: VR::OB, vm: "1" },
    E { tag: MEDIA_STORAGE_SOP_CLASS_UID, alias: "MediaStorageSOPClassUID", vr: VR::UI, vm: "1" },
    E { tag: MEDIA_STORAGE_SOP_INSTANCE_UID, alias: "MediaStorageSOPInstanceUID", vr: VR::UI, vm: "1" },
    E { tag: TRANSFER_SYNTAX_UID, alias: "TransferSyntaxUID", vr: VR::UI, vm: "1" },
    E { tag: IMPLEMENTATION_CLASS_UID, alias: "ImplementationClassUID", vr: VR::UI, vm: "1" },
    E { tag: IMPLEMENTATION_VERSION_NAME, alias: "ImplementationVersionName", vr: VR::SH, vm: "1" },
    E { tag: SOURCE_APPLICATION_ENTITY_TITLE, alias: "SourceApplicationEntityTitle", vr: VR::AE, vm: "1" },
    E { tag: SENDING_APPLICATION_ENTITY_TITLE, alias: "SendingApplicationEntityTitle", vr: VR::AE, vm: "1" },
    E { tag: RECEIVING_APPLICATION_ENTITY_TITLE, alias: "ReceivingApplicationEntityTitle", vr: VR::AE, vm: "1" },
    E { tag: PRIVATE_INFORMATION_CREATOR_UID, alias: "PrivateInformationCreatorUID", vr: VR::UI, vm: "1" },
    E { tag: PRIVATE_INFORMATION, alias: "PrivateInformation", vr: VR::OB, vm: "1" },
    E { tag: SPECIFIC_CHARACTER_SET, alias: "SpecificCharacterSet", vr: VR::CS, vm: "1-n" },
    E { tag: IMAGE_TYPE, alias: "ImageType", vr: VR::CS, vm: "2-n" },
    E { tag: INSTANCE_CREATION_DATE, alias: "InstanceCreationDate", vr: VR::DA, vm: "1" },
    E { tag: INSTANCE_CREATION_TIME, alias: "InstanceCreationTime", vr: VR::TM, vm: "1" },
    E { tag: INSTANCE_CREATOR_UID, alias: "InstanceCreatorUID", vr: VR::UI, vm: "1" },
    E { tag: SOP_CLASS_UID, alias: "SOPClassUID", vr: VR::UI, vm: "1" },
    E { tag: SOP_INSTANCE_UID, alias: "SOPInstanceUID", vr: VR::UI, vm: "1" },
    E { tag: STUDY_DATE, alias: "StudyDate", vr: VR::DA, vm: "1" },
    E { tag: SERIES_DATE, alias: "SeriesDate", vr: VR::DA, vm: "1" },
    E { tag: ACQUISITION_DATE, alias: "AcquisitionDate", vr: VR::DA, vm: "1" },
    E { tag: CONTENT_DATE, alias: "ContentDate", vr: VR::DA, vm: "1" },
    E { tag: ACQUISITION_DATE_TIME, alias: "AcquisitionDateTime", vr: VR::DT, vm: "1" },
    E { tag: STUDY_TIME, alias: "StudyTime", vr: VR::TM, vm: "1" },
    E { tag: SERIES_TIME, alias: "SeriesTime", vr: VR::TM, vm: "1" },
    E { tag: ACQUISITION_TIME, alias: "AcquisitionTime", vr: VR::TM, vm: "1" },
    E { tag: CONTENT_TIME, alias: "ContentTime", vr: VR::TM, vm: "1" },
    E { tag: ACCESSION_NUMBER, alias: "AccessionNumber", vr: VR::SH, vm: "1" },
    E { tag: MODALITY, alias: "Modality", vr: VR::CS, vm: "1" },
    E { tag: CONVERSION_TYPE, alias: "ConversionType", vr: VR::CS, vm: "1" },
    E { tag: MANUFACTURER, alias: "Manufacturer", vr: VR::LO, vm: "1" },
    E { tag: INSTITUTION_NAME, alias: "InstitutionName", vr: VR::LO, vm: "1" },
    E { tag: INSTITUTION_ADDRESS, alias: "InstitutionAddress", vr: VR::ST, vm: "1" },
    E { tag: REFERRING_PHYSICIAN_NAME, alias: "ReferringPhysicianName", vr: VR::PN, vm: "1" },
    E { tag: CODE_VALUE, alias: "CodeValue", vr: VR::SH, vm: "1" },
    E { tag: CODING_SCHEME_DESIGNATOR, alias: "CodingSchemeDesignator", vr: VR::SH, vm: "1" },
    E { tag: CODING_SCHEME_VERSION, alias: "CodingSchemeVersion", vr: VR::SH, vm: "1" },
    E { tag: CODE_MEANING, alias: "CodeMeaning", vr: VR::LO, vm: "1" },
    E { tag: STATION_NAME, alias: "StationName", vr: VR::SH, vm: "1" },
    E { tag: STUDY_DESCRIPTION, alias: "StudyDescription", vr: VR::LO, vm: "1" },
    E { tag: SERIES_DESCRIPTION, alias: "SeriesDescription", vr: VR::LO, vm: "1" },
    E { tag: SERIES_DESCRIPTION_CODE_SEQUENCE, alias: "SeriesDescriptionCodeSequence", vr: VR::SQ, vm: "1" },
    E { tag: INSTITUTIONAL_DEPARTMENT_NAME, alias: "InstitutionalDepartmentName", vr: VR::LO, vm: "1" },
    E { tag: PERFORMING_PHYSICIAN_NAME, alias: "PerformingPhysicianName", vr: VR::PN, vm: "1-n" },
    E { tag: OPERATORS_NAME, alias: "OperatorsName", vr: VR::PN, vm: "1-n" },
    E { tag: MANUFACTURER_MODEL_NAME, alias: "ManufacturerModelName", vr: VR::LO, vm: "1" },
    E { tag: REFERENCED_STUDY_SEQUENCE, alias: "ReferencedStudySequence", vr: VR::SQ, vm: "1" },
    E { tag: REFERENCED_PERFORMED_PROCEDURE_STEP_SEQUENCE, alias: "ReferencedPerformedProcedureStepSequence", vr: VR::SQ, vm: "1" },
    E { tag: REFERENCED_SERIES_SEQUENCE, alias: "ReferencedSeriesSequence", vr: VR::SQ, vm: "1" },
    E { tag: REFERENCED_IMAGE_SEQUENCE, alias: "ReferencedImageSequence", vr: VR::SQ, vm: "1" },
    E { tag: REFERENCED_SOP_CLASS_UID, alias: "ReferencedSOPClassUID", vr: VR::UI, vm: "1" },
    E { tag: REFERENCED_SOP_INSTANCE_UID, alias: "ReferencedSOPInstanceUID", vr: VR::UI, vm: "1" },
    E { tag: REFERENCED_FRAME_NUMBER, alias: "ReferencedFrameNumber", vr: VR::IS, vm: "1-n" },
    E { tag: DERIVATION_DESCRIPTION, alias: "DerivationDescription", vr: VR::ST, vm: "1" },
    E { tag: SOURCE_IMAGE_SEQUENCE, alias: "SourceImageSequence", vr: VR::SQ, vm: "1" },
    E { tag: DERIVATION_CODE_SEQUENCE, alias: "DerivationCodeSequence", vr: VR::SQ, vm: "1" },
    E { tag: PATIENT_NAME, alias: "PatientName", vr: VR::PN, vm: "1" },
    E { tag: PATIENT_ID, alias: "PatientID", vr: VR::LO, vm: "1" },
    E { tag: ISSUER_OF_PATIENT_ID, alias: "IssuerOfPatientID", vr: VR::LO, vm: "1" },
    E { tag: PATIENT_BIRTH_DATE, alias: "PatientBirthDate", vr: VR::DA, vm: "1" },
    E { tag: PATIENT_BIRTH_TIME, alias: "PatientBirthTime", vr: VR::TM, vm: "1" },
    E { tag: PATIENT_SEX, alias: "PatientSex", vr: VR::CS, vm: "1" },
    E { tag: OTHER_PATIENT_I_DS, alias: "OtherPatientIDs", vr: VR::LO, vm: "1-n" },
    E { tag: OTHER_PATIENT_NAMES, alias: "OtherPatientNames", vr: VR::PN, vm: "1-n" },
    E { tag: PATIENT_AGE, alias: "PatientAge", vr: VR::AS, vm: "1" },
    E { tag: PATIENT_SIZE, alias: "PatientSize", vr: VR::DS, vm: "1" },
    E { tag: PATIENT_WEIGHT, alias: "PatientWeight", vr: VR::DS, vm: "1" },
    E { tag: ETHNIC_GROUP, alias: "EthnicGroup", vr: VR::SH, vm: "1" },
    E { tag: PATIENT_COMMENTS, alias: "PatientComments", vr: VR::LT, vm: "1" },
    E { tag: CONTRAST_BOLUS_AGENT, alias: "ContrastBolusAgent", vr: VR::LO, vm: "1" },
    E { tag: BODY_PART_EXAMINED, alias: "BodyPartExamined", vr: VR::CS, vm: "1" },
    E { tag: SCANNING_SEQUENCE, alias: "ScanningSequence", vr: VR::CS, vm: "1-n" },
    E { tag: SLICE_THICKNESS, alias: "SliceThickness", vr: VR::DS, vm: "1" },
    E { tag: KVP, alias: "KVP", vr: VR::DS, vm: "1" },
    E { tag: SPACING_BETWEEN_SLICES, alias: "SpacingBetweenSlices", vr: VR::DS, vm: "1" },
    E { tag: DEVICE_SERIAL_NUMBER, alias: "DeviceSerialNumber", vr: VR::LO, vm: "1" },
    E { tag: SOFTWARE_VERSIONS, alias: "SoftwareVersions", vr: VR::LO, vm: "1-n" },
    E { tag: PROTOCOL_NAME, alias: "ProtocolName", vr: VR::LO, vm: "1" },
    E { tag: EXPOSURE_TIME, alias: "ExposureTime", vr: VR::IS, vm: "1" },
    E { tag: X_RAY_TUBE_CURRENT, alias: "XRayTubeCurrent", vr: VR::IS, vm: "1" },
    E { tag: EXPOSURE, alias: "Exposure", vr: VR::IS, vm: "1" },
    E { tag: PATIENT_POSITION, alias: "PatientPosition", vr: VR::CS, vm: "1" },
    E { tag: STUDY_INSTANCE_UID, alias: "StudyInstanceUID", vr: VR::UI, vm: "1" },
    E { tag: SERIES_INSTANCE_UID, alias: "SeriesInstanceUID", vr: VR::UI, vm: "1" },
    E { tag: STUDY_ID, alias: "StudyID", vr: VR::SH, vm: "1" },
    E { tag: SERIES_NUMBER, alias: "SeriesNumber", vr: VR::IS, vm: "1" },
    E { tag: ACQUISITION_NUMBER, alias: "AcquisitionNumber", vr: VR::IS, vm: "1" },
    E { tag: INSTANCE_NUMBER, alias: "InstanceNumber", vr: VR::IS, vm: "1" },
    E { tag: PATIENT_ORIENTATION, alias: "PatientOrientation", vr: VR::CS, vm: "2" },
    E { tag: IMAGE_POSITION_PATIENT, alias: "ImagePositionPatient", vr: VR::DS, vm: "3" },
    E { tag: IMAGE_ORIENTATION_PATIENT, alias: "ImageOrientationPatient", vr: VR::DS, vm: "6" },
    E { tag: FRAME_OF_REFERENCE_UID, alias: "FrameOfReferenceUID", vr: VR::UI, vm: "1" },
    E { tag: POSITION_REFERENCE_INDICATOR, alias: "PositionReferenceIndicator", vr: VR::LO, vm: "1" },
    E { tag: SLICE_LOCATION, alias: "SliceLocation", vr: VR::DS, vm: "1" },
    E { tag: IMAGE_COMMENTS, alias: "ImageComments", vr: VR::LT, vm: "1" },
    E { tag: SAMPLES_PER_PIXEL, alias: "SamplesPerPixel", vr: VR::US, vm: "1" },
    E { tag: PHOTOMETRIC_INTERPRETATION, alias: "PhotometricInterpretation", vr: VR::CS, vm: "1" },
    E { tag: PLANAR_CONFIGURATION, alias: "PlanarConfiguration", vr: VR::US, vm: "1" },
    E { tag: NUMBER_OF_FRAMES, alias: "NumberOfFrames", vr: VR::IS, vm: "1" },
    E { tag: FRAME_INCREMENT_POINTER, alias: "FrameIncrementPointer", vr: VR::AT, vm: "1-n" },
    E { tag: ROWS, alias: "Rows", vr: VR::US, vm: "1" },
    E { tag: COLUMNS, alias: "Columns", vr: VR::US, vm: "1" },
    E { tag: PIXEL_SPACING, alias: "PixelSpacing", vr: VR::DS, vm: "2" },
    E { tag: PIXEL_ASPECT_RATIO, alias: "PixelAspectRatio", vr: VR::IS, vm: "2" },
    E { tag: BITS_ALLOCATED, alias: "BitsAllocated", vr: VR::US, vm: "1" },
    E { tag: BITS_STORED, alias: "BitsStored", vr: VR::US, vm: "1" },
    E { tag: HIGH_BIT, alias: "HighBit", vr: VR::US, vm: "1" },
    E { tag: PIXEL_REPRESENTATION, alias: "PixelRepresentation", vr: VR::US, vm: "1" },
    E { tag: SMALLEST_IMAGE_PIXEL_VALUE, alias: "SmallestImagePixelValue", vr: VR::US, vm: "1" },
    E { tag: LARGEST_IMAGE_PIXEL_VALUE, alias: "LargestImagePixelValue", vr: VR::US, vm: "1" },
    E { tag: PIXEL_PADDING_VALUE, alias: "PixelPaddingValue", vr: VR::US, vm: "1" },
    E { tag: BURNED_IN_ANNOTATION, alias: "BurnedInAnnotation", vr: VR::CS, vm: "1" },
    E { tag: WINDOW_CENTER, alias: "WindowCenter", vr: VR::DS, vm: "1-n" },
    E { tag: WINDOW_WIDTH, alias: "WindowWidth", vr: VR::DS, vm: "1-n" },
    E { tag: RESCALE_INTERCEPT, alias: "RescaleIntercept", vr: VR::DS, vm: "1" },
    E { tag: RESCALE_SLOPE, alias: "RescaleSlope", vr: VR::DS, vm: "1" },
    E { tag: RESCALE_TYPE, alias: "RescaleType", vr: VR::LO, vm: "1" },
    E { tag: RED_PALETTE_COLOR_LOOKUP_TABLE_DESCRIPTOR, alias: "RedPaletteColorLookupTableDescriptor", vr: VR::US, vm: "3" },
    E { tag: GREEN_PALETTE_COLOR_LOOKUP_TABLE_DESCRIPTOR, alias: "GreenPaletteColorLookupTableDescriptor", vr: VR::US, vm: "3" },
    E { tag: BLUE_PALETTE_COLOR_LOOKUP_TABLE_DESCRIPTOR, alias: "BluePaletteColorLookupTableDescriptor", vr: VR::US, vm: "3" },
    E { tag: RED_PALETTE_COLOR_LOOKUP_TABLE_DATA, alias: "RedPaletteColorLookupTableData", vr: VR::OW, vm: "1" },
    E { tag: GREEN_PALETTE_COLOR_LOOKUP_TABLE_DATA, alias: "GreenPaletteColorLookupTableData", vr: VR::OW, vm: "1" },
    E { tag: BLUE_PALETTE_COLOR_LOOKUP_TABLE_DATA, alias: "BluePaletteColorLookupTableData", vr: VR::OW, vm: "1" },
    E { tag: LOSSY_IMAGE_COMPRESSION, alias: "LossyImageCompression", vr: VR::CS, vm: "1" },
    E { tag: LOSSY_IMAGE_COMPRESSION_RATIO, alias: "LossyImageCompressionRatio", vr: VR::DS, vm: "1-n" },
    E { tag: LOSSY_IMAGE_COMPRESSION_METHOD, alias: "LossyImageCompressionMethod", vr: VR::CS, vm: "1-n" },
    E { tag: MODALITY_LUT_SEQUENCE, alias: "ModalityLUTSequence", vr: VR::SQ, vm: "1" },
    E { tag: LUT_DESCRIPTOR, alias: "LUTDescriptor", vr: VR::US, vm: "3" },
    E { tag: LUT_EXPLANATION, alias: "LUTExplanation", vr: VR::LO, vm: "1" },
    E { tag: LUT_DATA, alias: "LUTData", vr: VR::US, vm: "1-n" },
    E { tag: VOILUT_SEQUENCE, alias: "VOILUTSequence", vr: VR::SQ, vm: "1" },
    E { tag: REQUESTED_PROCEDURE_DESCRIPTION, alias: "RequestedProcedureDescription", vr: VR::LO, vm: "1" },
    E { tag: PERFORMED_PROCEDURE_STEP_START_DATE, alias: "PerformedProcedureStepStartDate", vr: VR::DA, vm: "1" },
    E { tag: PERFORMED_PROCEDURE_STEP_START_TIME, alias: "PerformedProcedureStepStartTime", vr: VR::TM, vm: "1" },
    E { tag: PERFORMED_PROCEDURE_STEP_ID, alias: "PerformedProcedureStepID", vr: VR::SH, vm: "1" },
    E { tag: PERFORMED_PROCEDURE_STEP_DESCRIPTION, alias: "PerformedProcedureStepDescription", vr: VR::LO, vm: "1" },
    E { tag: PERFORMED_PROTOCOL_CODE_SEQUENCE, alias: "PerformedProtocolCodeSequence", vr: VR::SQ, vm: "1" },
    E { tag: REQUEST_ATTRIBUTES_SEQUENCE, alias: "RequestAttributesSequence", vr: VR::SQ, vm: "1" },
    E { tag: RELATIONSHIP_TYPE, alias: "RelationshipType", vr: VR::CS, vm: "1" },
    E { tag: VALUE_TYPE, alias: "ValueType", vr: VR::CS, vm: "1" },
    E { tag: CONCEPT_NAME_CODE_SEQUENCE, alias: "ConceptNameCodeSequence", vr: VR::SQ, vm: "1" },
    E { tag: UID, alias: "UID", vr: VR::UI, vm: "1" },
    E { tag: TEXT_VALUE, alias: "TextValue", vr: VR::UT, vm: "1" },
    E { tag: CONCEPT_CODE_SEQUENCE, alias: "ConceptCodeSequence", vr: VR::SQ, vm: "1" },
    E { tag: CONTENT_SEQUENCE, alias: "ContentSequence", vr: VR::SQ, vm: "1" },
    E { tag: RADIOPHARMACEUTICAL_INFORMATION_SEQUENCE, alias: "RadiopharmaceuticalInformationSequence", vr: VR::SQ, vm: "1" },
    E { tag: NUMBER_OF_SLICES, alias: "NumberOfSlices", vr: VR::US, vm: "1" },
    E { tag: STORAGE_MEDIA_FILE_SET_UID, alias: "StorageMediaFileSetUID", vr: VR::UI, vm: "1" },
    E { tag: BEAM_SEQUENCE, alias: "BeamSequence", vr: VR::SQ, vm: "1" },
    E { tag: TREATMENT_MACHINE_NAME, alias: "TreatmentMachineName", vr: VR::SH, vm: "1" },
    E { tag: PRIMARY_DOSIMETER_UNIT, alias: "PrimaryDosimeterUnit", vr: VR::CS, vm: "1" },
    E { tag: SOURCE_AXIS_DISTANCE, alias: "SourceAxisDistance", vr: VR::DS, vm: "1" },
    E { tag: BEAM_NUMBER, alias: "BeamNumber", vr: VR::IS, vm: "1" },
    E { tag: BEAM_NAME, alias: "BeamName", vr: VR::LO, vm: "1" },
    E { tag: BEAM_TYPE, alias: "BeamType", vr: VR::CS, vm: "1" },
    E { tag: RADIATION_TYPE, alias: "RadiationType", vr: VR::CS, vm: "1" },
    E { tag: NUMBER_OF_CONTROL_POINTS, alias: "NumberOfControlPoints", vr: VR::IS, vm: "1" },
    E { tag: CONTROL_POINT_SEQUENCE, alias: "ControlPointSequence", vr: VR::SQ, vm: "1" },
    E { tag: REFERENCED_RT_PLAN_SEQUENCE, alias: "ReferencedRTPlanSequence", vr: VR::SQ, vm: "1" },
    E { tag: OVERLAY_ROWS, alias: "OverlayRows", vr: VR::US, vm: "1" },
    E { tag: OVERLAY_COLUMNS, alias: "OverlayColumns", vr: VR::US, vm: "1" },
    E { tag: OVERLAY_TYPE, alias: "OverlayType", vr: VR::CS, vm: "1" },
    E { tag: OVERLAY_ORIGIN, alias: "OverlayOrigin", vr: VR::SS, vm: "2" },
    E { tag: OVERLAY_BITS_ALLOCATED, alias: "OverlayBitsAllocated", vr: VR::US, vm: "1" },
    E { tag: OVERLAY_BIT_POSITION, alias: "OverlayBitPosition", vr: VR::US, vm: "1" },
    E { tag: OVERLAY_DATA, alias: "OverlayData", vr: VR::OW, vm: "1" },
    E { tag: EXTENDED_OFFSET_TABLE, alias: "ExtendedOffsetTable", vr: VR::OV, vm: "1" },
    E { tag: EXTENDED_OFFSET_TABLE_LENGTHS, alias: "ExtendedOffsetTableLengths", vr: VR::OV, vm: "1" },
    E { tag: PIXEL_DATA, alias: "PixelData", vr: VR::OW, vm: "1" },
    E { tag: DIGITAL_SIGNATURES_SEQUENCE, alias: "DigitalSignaturesSequence", vr: VR::SQ, vm: "1" },
    E { tag: DATA_SET_TRAILING_PADDING, alias: "DataSetTrailingPadding", vr: VR::OB, vm: "1" },
];
