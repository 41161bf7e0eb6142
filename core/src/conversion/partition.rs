use crate::conversion::converter::{convert_dicom_dir, Converter};
use crate::conversion::record::{read_dicom_dir, DicomRecord};
use crate::error::{MtniftiError, Result};
use crate::extraction::sar_range_of_values;
use crate::types::{MtState, SarRange, Vendor};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory holding copies of one MT population
///
/// The directory is removed when the set is dropped, so it never outlives
/// the job on any exit path.
#[derive(Debug)]
pub struct StagingSet {
    state: MtState,
    dir: TempDir,
    len: usize,
}

impl StagingSet {
    /// Creates a fresh, uniquely named staging directory
    ///
    /// The directory is created under `root`, or the system temporary
    /// directory when `root` is None.
    pub fn create(state: MtState, root: Option<&Path>) -> Result<Self> {
        let suffix = format!("-{}", state);
        let mut builder = tempfile::Builder::new();
        builder.prefix("mtnifti-").suffix(&suffix);
        let dir = match root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        Ok(Self { state, dir, len: 0 })
    }

    /// Copies a record's file into the staging directory
    fn stage(&mut self, record: &DicomRecord) -> Result<()> {
        let file_name = record.file_path.file_name().ok_or_else(|| {
            MtniftiError::InvalidValue(format!(
                "No file name in {}",
                record.file_path.display()
            ))
        })?;
        fs::copy(&record.file_path, self.dir.path().join(file_name))?;
        self.len += 1;
        Ok(())
    }

    pub fn state(&self) -> MtState {
        self.state
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Number of files staged
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes the staging directory, reporting any removal error
    pub fn close(self) -> Result<()> {
        self.dir.close()?;
        Ok(())
    }
}

/// A series split into its MT-on and MT-off populations
#[derive(Debug)]
pub struct Partition {
    pub mton: StagingSet,
    pub mtoff: StagingSet,
}

impl Partition {
    /// Whether both populations received at least one file
    pub fn is_complete(&self) -> bool {
        !self.mton.is_empty() && !self.mtoff.is_empty()
    }
}

/// SAR range for the Toshiba heuristic, computed only when it is needed
///
/// Returns `None` unless at least one record is a Toshiba image. When one is,
/// the range spans the SAR of every Toshiba record in the series.
pub fn required_sar_range(records: &[DicomRecord]) -> Option<SarRange> {
    if !records.iter().any(|r| r.vendor() == Vendor::Toshiba) {
        return None;
    }
    sar_range_of_values(records.iter().filter_map(|r| r.signal.sar()))
}

/// Classifies each record and copies it into the matching staging directory
///
/// # Errors
///
/// Fails on the first record that cannot be classified (e.g. `AmbiguousSar`)
/// or copied. Staging directories created so far are removed.
pub fn partition(records: &[DicomRecord], staging_root: Option<&Path>) -> Result<Partition> {
    let sar_range = required_sar_range(records);
    if let Some(range) = &sar_range {
        debug!("SAR range: {}", range);
    }

    let mut partition = Partition {
        mton: StagingSet::create(MtState::On, staging_root)?,
        mtoff: StagingSet::create(MtState::Off, staging_root)?,
    };

    for record in records {
        let state = record.mt_state(sar_range.as_ref())?;
        debug!("{}: {} ({})", record.file_path.display(), state, record.vendor());
        match state {
            MtState::On => partition.mton.stage(record)?,
            MtState::Off => partition.mtoff.stage(record)?,
        }
    }

    info!(
        "Staged {} MT-on and {} MT-off files",
        partition.mton.len(),
        partition.mtoff.len()
    );
    Ok(partition)
}

/// Result of a paired MT conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MtConversion {
    pub mton_path: PathBuf,
    pub mtoff_path: PathBuf,
    pub mton_files: usize,
    pub mtoff_files: usize,
}

/// Converts a directory holding both MT-on and MT-off images into two volumes
///
/// Steps:
/// 1. Read every top-level entry of `source_dir` as DICOM
/// 2. Compute the SAR range if any record is a Toshiba image
/// 3. Classify each record and copy it into the MT-on or MT-off staging directory
/// 4. Convert the MT-on population to `mton_path`, then MT-off to `mtoff_path`,
///    removing each staging directory after its conversion
///
/// # Errors
///
/// - `InvalidDicom` if any entry cannot be parsed
/// - `MtDetectionFailed` if either population is empty (no output is written)
/// - `FileAlreadyExists` if an output path exists when its turn comes
/// - any classification or converter error
pub fn convert_mt<C: Converter + ?Sized>(
    converter: &C,
    source_dir: &Path,
    mton_path: &Path,
    mtoff_path: &Path,
    staging_root: Option<&Path>,
) -> Result<MtConversion> {
    let records = read_dicom_dir(source_dir)?;
    info!(
        "Read {} DICOM files from {}",
        records.len(),
        source_dir.display()
    );

    let partition = partition(&records, staging_root)?;
    if !partition.is_complete() {
        return Err(MtniftiError::MtDetectionFailed(source_dir.to_path_buf()));
    }

    let Partition { mton, mtoff } = partition;
    let mton_files = mton.len();
    let mtoff_files = mtoff.len();

    let mton_path = convert_staged(converter, mton, mton_path)?;
    let mtoff_path = convert_staged(converter, mtoff, mtoff_path)?;

    Ok(MtConversion {
        mton_path,
        mtoff_path,
        mton_files,
        mtoff_files,
    })
}

fn convert_staged<C: Converter + ?Sized>(
    converter: &C,
    staging: StagingSet,
    output_path: &Path,
) -> Result<PathBuf> {
    let written = convert_dicom_dir(converter, staging.path(), output_path)?;
    info!("Wrote {} volume {}", staging.state(), written.display());
    staging.close()?;
    Ok(written)
}
