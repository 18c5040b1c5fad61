//! A CLI tool for converting DICOM files
//! between transfer syntaxes and encoding options.
//!
//! The input is read as a file with meta group,
//! or as a bare data set with `--read-dataset`.
//! The output is written to a temporary file next to the destination
//! and only moved into place once complete.
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use dcmio_encoding::TransferSyntax;
use dcmio_object::{
    pixeldata, EncodingType, FileFormat, GroupLength, OpenFileOptions, Padding, ReadError,
    ReadMode, ReadOptions, SaveFileOptions, WriteError, WriteMode, WriteOptions,
};
use dcmio_transfer_syntax_registry::entries::{
    DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN, EXPLICIT_VR_BIG_ENDIAN, EXPLICIT_VR_LITTLE_ENDIAN,
    IMPLICIT_VR_LITTLE_ENDIAN, RLE_LOSSLESS,
};
use dcmio_transfer_syntax_registry::CodecRegistry;
use snafu::{Report, ResultExt, Snafu, Whatever};
use tracing::{error, info, Level};

/// Convert a DICOM file or data set
#[derive(Debug, Parser)]
#[command(version)]
struct App {
    /// Path to the DICOM file to read
    input: PathBuf,

    /// Path to the DICOM file to write
    output: PathBuf,

    /// Read the input as a bare data set, without meta group
    #[arg(long = "read-dataset")]
    read_dataset: bool,

    /// Transfer syntax of an input data set without meta group
    #[arg(long = "read-xfer", value_enum, default_value_t = ReadXfer::Auto)]
    read_xfer: ReadXfer,

    /// Maximum length of values loaded while reading, in bytes;
    /// longer values are loaded when needed
    #[arg(long = "max-read-length", value_name = "N")]
    max_read_length: Option<u32>,

    /// Write a bare data set, without preamble and meta group
    #[arg(long = "write-dataset", conflicts_with = "update_meta")]
    write_dataset: bool,

    /// Transfer syntax of the output
    #[arg(long = "write-xfer", value_enum, default_value_t = WriteXfer::Same)]
    write_xfer: WriteXfer,

    /// Take the SOP class and instance UIDs of the meta group
    /// from the data set even if already present
    #[arg(long = "update-meta")]
    update_meta: bool,

    /// Group length elements in the output
    #[arg(long = "group-length", value_enum, default_value_t = GroupLengthOption::Recalc)]
    group_length: GroupLengthOption,

    /// Length encoding of sequences and items
    #[arg(long = "length", value_enum, default_value_t = LengthOption::Explicit)]
    length: LengthOption,

    /// Data set trailing padding in the output
    #[arg(long = "padding", value_enum, default_value_t = PaddingOption::Retain)]
    padding: PaddingOption,

    /// Pad the file to a multiple of this many bytes (even number)
    #[arg(long = "file-pad", value_name = "N", default_value_t = 0)]
    file_pad: u32,

    /// Pad sequence items to a multiple of this many bytes (even number)
    #[arg(long = "item-pad", value_name = "N", default_value_t = 0)]
    item_pad: u32,

    /// Write UN and UT values as OB
    #[arg(long = "disable-new-vr")]
    disable_new_vr: bool,

    /// Print more information about the conversion
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Print debug information
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum ReadXfer {
    /// Use the meta group or detect from the data set
    Auto,
    /// Explicit VR little endian
    Little,
    /// Explicit VR big endian
    Big,
    /// Implicit VR little endian
    Implicit,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum WriteXfer {
    /// Keep the transfer syntax of the input
    Same,
    /// Explicit VR little endian
    Little,
    /// Explicit VR big endian
    Big,
    /// Implicit VR little endian
    Implicit,
    /// Deflated explicit VR little endian
    Deflated,
    /// RLE lossless
    Rle,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum GroupLengthOption {
    /// Recalculate existing group lengths
    Recalc,
    /// Write group lengths for every group
    Create,
    /// Write no group lengths
    Remove,
    /// Keep group lengths as read
    Retain,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LengthOption {
    Explicit,
    Undefined,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum PaddingOption {
    /// Keep padding elements as read
    Retain,
    /// Remove all padding elements
    Off,
    /// Pad to `--file-pad` and `--item-pad`
    Create,
}

impl ReadXfer {
    fn transfer_syntax(self) -> Option<TransferSyntax> {
        match self {
            ReadXfer::Auto => None,
            ReadXfer::Little => Some(EXPLICIT_VR_LITTLE_ENDIAN),
            ReadXfer::Big => Some(EXPLICIT_VR_BIG_ENDIAN),
            ReadXfer::Implicit => Some(IMPLICIT_VR_LITTLE_ENDIAN),
        }
    }
}

impl WriteXfer {
    fn transfer_syntax(self) -> Option<TransferSyntax> {
        match self {
            WriteXfer::Same => None,
            WriteXfer::Little => Some(EXPLICIT_VR_LITTLE_ENDIAN),
            WriteXfer::Big => Some(EXPLICIT_VR_BIG_ENDIAN),
            WriteXfer::Implicit => Some(IMPLICIT_VR_LITTLE_ENDIAN),
            WriteXfer::Deflated => Some(DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN),
            WriteXfer::Rle => Some(RLE_LOSSLESS),
        }
    }
}

#[derive(Debug, Snafu)]
enum Error {
    #[snafu(display("Could not read '{}'", path.display()))]
    Open {
        path: PathBuf,
        #[snafu(backtrace)]
        source: ReadError,
    },
    #[snafu(display("Could not convert pixel data"))]
    ChangeRepresentation {
        #[snafu(backtrace)]
        source: pixeldata::Error,
    },
    #[snafu(display("Could not write '{}'", path.display()))]
    Save {
        path: PathBuf,
        #[snafu(backtrace)]
        source: WriteError,
    },
}

fn main() {
    let app = App::parse();

    let level = if app.debug {
        Level::DEBUG
    } else if app.verbose {
        Level::INFO
    } else {
        Level::WARN
    };
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .finish(),
    )
    .whatever_context("Could not set up global logging subscriber")
    .unwrap_or_else(|e: Whatever| {
        eprintln!("[ERROR] {}", Report::from_error(e));
    });

    run(app).unwrap_or_else(|e| {
        error!("{}", Report::from_error(e));
        std::process::exit(1);
    });
}

fn open_options(app: &App) -> OpenFileOptions {
    let mut read_options = ReadOptions::new();
    if let Some(max) = app.max_read_length {
        read_options = read_options.max_read_length(max);
    }
    let mut options = OpenFileOptions::new()
        .read_mode(if app.read_dataset {
            ReadMode::Dataset
        } else {
            ReadMode::FileFormat
        })
        .read_options(read_options);
    if let Some(ts) = app.read_xfer.transfer_syntax() {
        options = options.transfer_syntax(ts);
    }
    options
}

fn save_options(app: &App) -> SaveFileOptions {
    let group_length = match app.group_length {
        GroupLengthOption::Recalc => GroupLength::Recalculate,
        GroupLengthOption::Create => GroupLength::WithGroupLength,
        GroupLengthOption::Remove => GroupLength::WithoutGroupLength,
        GroupLengthOption::Retain => GroupLength::NoChange,
    };
    let encoding = match app.length {
        LengthOption::Explicit => EncodingType::ExplicitLength,
        LengthOption::Undefined => EncodingType::UndefinedLength,
    };
    let padding = match app.padding {
        PaddingOption::Retain => Padding::NoChange,
        PaddingOption::Off => Padding::WithoutPadding,
        PaddingOption::Create => Padding::WithPadding,
    };
    let write_mode = if app.write_dataset {
        WriteMode::Dataset
    } else if app.update_meta {
        WriteMode::UpdateMeta
    } else {
        WriteMode::FileFormat
    };

    let mut options = SaveFileOptions::new().write_mode(write_mode).write_options(
        WriteOptions::new()
            .encoding(encoding)
            .group_length(group_length)
            .padding(padding, app.file_pad, app.item_pad)
            .enable_new_vrs(!app.disable_new_vr),
    );
    if let Some(ts) = app.write_xfer.transfer_syntax() {
        options = options.transfer_syntax(ts);
    }
    options
}

fn run(app: App) -> Result<(), Error> {
    let mut file = open_options(&app)
        .open_file(&app.input)
        .context(OpenSnafu { path: &app.input })?;
    info!(
        "Read {} in {}",
        app.input.display(),
        file.transfer_syntax().name()
    );

    let options = save_options(&app);
    if let Some(ts) = options.transfer_syntax {
        let codecs = CodecRegistry::with_builtin();
        file.choose_representation(&ts, &codecs)
            .context(ChangeRepresentationSnafu)?;
    }

    file.save_file(&app.output, &options)
        .context(SaveSnafu { path: &app.output })?;
    info!(
        "Wrote {} in {}",
        app.output.display(),
        file.transfer_syntax().name()
    );
    Ok(())
}
