use std::path::PathBuf;
use thiserror::Error;

use crate::types::Vendor;

/// Result type for mtnifti operations
pub type Result<T> = std::result::Result<T, MtniftiError>;

/// Error types for mtnifti operations
#[derive(Error, Debug)]
pub enum MtniftiError {
    /// File could not be parsed as DICOM
    #[error("Invalid DICOM file {}: {reason}", .path.display())]
    InvalidDicom { path: PathBuf, reason: String },

    /// Tag not found in DICOM file
    #[error("Tag not found: {0}")]
    TagNotFound(String),

    /// Invalid tag value
    #[error("Invalid tag value: {0}")]
    InvalidValue(String),

    /// A vendor rule was applied to a header from another manufacturer
    #[error("Not a {expected} header (manufacturer: {manufacturer:?})")]
    VendorMismatch {
        expected: Vendor,
        manufacturer: String,
    },

    /// Manufacturer matches none of the known vendors
    #[error("Unsupported vendor: {0:?}")]
    UnsupportedVendor(String),

    /// Toshiba SAR value is neither the minimum nor the maximum of the series
    #[error("SAR value is neither min nor max (val: {value:?}, min: {min:?}, max: {max:?})")]
    AmbiguousSar {
        value: String,
        min: String,
        max: String,
    },

    /// Output file already exists
    #[error("File already exists: {}", .0.display())]
    FileAlreadyExists(PathBuf),

    /// Output path has a suffix other than .nii or .nii.gz
    #[error("Unsupported output format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// One of the MT populations is empty
    #[error("MT sequence detection failed ({})", .0.display())]
    MtDetectionFailed(PathBuf),

    /// dcm2niix exited with an error or reported a warning
    #[error("Converter failed ({command}, status {status}):\n{output}")]
    ConverterFailure {
        command: String,
        status: String,
        output: String,
    },

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<dicom_core::value::ConvertValueError> for MtniftiError {
    fn from(e: dicom_core::value::ConvertValueError) -> Self {
        MtniftiError::InvalidValue(format!("{}", e))
    }
}
