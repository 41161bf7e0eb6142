//! DICOM-to-NIfTI conversion
//!
//! Wraps the external dcm2niix converter behind the [`Converter`] trait and
//! implements the paired MT workflow: a mixed series is split into MT-on and
//! MT-off staging directories, and each one is converted separately.

mod converter;
mod partition;
mod record;
#[cfg(test)]
pub(crate) mod testing;

pub use converter::{
    convert_dicom_dir, convert_with_dcm2niix, Converter, Dcm2Niix, OutputTarget,
};
pub use partition::{
    convert_mt, partition, required_sar_range, MtConversion, Partition, StagingSet,
};
pub use record::{read_dicom_dir, DicomRecord};
