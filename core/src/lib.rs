pub mod api;
pub mod cli;
pub mod conversion;
pub mod error;
pub mod extraction;
pub mod types;

pub use api::{dicom_to_nifti, ConversionJob, ConversionReport, Sequence, MTR_SEQUENCE};
pub use cli::report::TextReport;
pub use conversion::{
    convert_dicom_dir, convert_mt, convert_with_dcm2niix, Converter, Dcm2Niix, DicomRecord,
    OutputTarget,
};
pub use error::{MtniftiError, Result};
pub use extraction::{is_mt_on, sar_range, MtSignal};
pub use types::*;
