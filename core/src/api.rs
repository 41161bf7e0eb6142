use crate::conversion::{convert_dicom_dir, convert_mt, Converter, Dcm2Niix};
use crate::error::Result;
use crate::types::{ConversionConfig, NiftiFormat};
use log::info;
use std::fmt;
use std::path::{Path, PathBuf};

/// Sequence designator reserved for paired MT-on/MT-off conversion
pub const MTR_SEQUENCE: &str = "mtr";

/// What a conversion job produces
///
/// # Example
///
/// ```
/// use mtnifti_core::Sequence;
///
/// assert_eq!(Sequence::from("mtr"), Sequence::Mtr);
/// assert_eq!(Sequence::from("t1"), Sequence::Series("t1".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum Sequence {
    /// Mixed MT-on/MT-off series, converted into two volumes
    Mtr,
    /// Plain series, converted into `<name>.nii.gz`
    Series(String),
}

impl From<&str> for Sequence {
    fn from(s: &str) -> Self {
        if s == MTR_SEQUENCE {
            Sequence::Mtr
        } else {
            Sequence::Series(s.to_string())
        }
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sequence::Mtr => write!(f, "{}", MTR_SEQUENCE),
            Sequence::Series(name) => write!(f, "{}", name),
        }
    }
}

/// A single conversion: source directory, output directory and sequence
///
/// Constructed from caller input and consumed by [`ConversionJob::run`].
///
/// # Example
///
/// ```no_run
/// use mtnifti_core::{ConversionConfig, ConversionJob, Dcm2Niix};
///
/// let job = ConversionJob::new("/data/dicom/mt", "/data/nifti", "mtr");
/// let report = job.run(&Dcm2Niix::default(), &ConversionConfig::default()).unwrap();
/// assert_eq!(report.outputs.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub sequence: Sequence,
}

impl ConversionJob {
    pub fn new(
        source_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        sequence: &str,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_dir: output_dir.into(),
            sequence: Sequence::from(sequence),
        }
    }

    /// Runs the job
    ///
    /// `mtr` jobs are partitioned into MT-on/MT-off volumes named by
    /// `config`; any other sequence is converted directly to
    /// `<sequence>.nii.gz` in the output directory.
    pub fn run<C: Converter + ?Sized>(
        self,
        converter: &C,
        config: &ConversionConfig,
    ) -> Result<ConversionReport> {
        info!(
            "Converting {} ({}) into {}",
            self.source_dir.display(),
            self.sequence,
            self.output_dir.display()
        );

        let (outputs, mton_files, mtoff_files) = match &self.sequence {
            Sequence::Mtr => {
                let result = convert_mt(
                    converter,
                    &self.source_dir,
                    &config.mton_path(&self.output_dir),
                    &config.mtoff_path(&self.output_dir),
                    config.staging_root.as_deref(),
                )?;
                (
                    vec![result.mton_path, result.mtoff_path],
                    Some(result.mton_files),
                    Some(result.mtoff_files),
                )
            }
            Sequence::Series(name) => {
                let output_path = self.output_dir.join(format!(
                    "{}{}",
                    name,
                    NiftiFormat::Compressed.extension()
                ));
                let written = convert_dicom_dir(converter, &self.source_dir, &output_path)?;
                (vec![written], None, None)
            }
        };

        Ok(ConversionReport {
            source_dir: self.source_dir,
            sequence: self.sequence,
            outputs,
            mton_files,
            mtoff_files,
        })
    }
}

/// Outcome of a finished conversion job
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ConversionReport {
    /// Directory the DICOM files were read from
    pub source_dir: PathBuf,

    /// Sequence designator of the job
    pub sequence: Sequence,

    /// Volumes written, MT-on first for paired jobs
    pub outputs: Vec<PathBuf>,

    /// Number of MT-on images (paired jobs only)
    pub mton_files: Option<usize>,

    /// Number of MT-off images (paired jobs only)
    pub mtoff_files: Option<usize>,
}

/// Converts a DICOM directory using dcm2niix from `PATH` and default names
///
/// With `sequence == "mtr"` this writes `mton.nii.gz` and `mtoff.nii.gz` into
/// `output_dir`; otherwise it writes `<sequence>.nii.gz`.
pub fn dicom_to_nifti(
    source_dir: &Path,
    output_dir: &Path,
    sequence: &str,
) -> Result<ConversionReport> {
    let config = ConversionConfig::default();
    let converter = Dcm2Niix::new(&config.dcm2niix_path);
    ConversionJob::new(source_dir, output_dir, sequence).run(&converter, &config)
}
