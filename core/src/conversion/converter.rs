use crate::error::{MtniftiError, Result};
use crate::types::{NiftiFormat, DEFAULT_DCM2NIIX};
use log::{info, warn};
use regex::Regex;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;

/// Destination of a single conversion, split the way dcm2niix expects it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    /// Output directory (`-o`)
    pub dir: PathBuf,
    /// File name without the NIfTI suffix (`-f`)
    pub basename: String,
    /// Compression, from the suffix (`-z`)
    pub format: NiftiFormat,
}

impl OutputTarget {
    /// Splits an output path into directory, basename and format
    ///
    /// A path without a directory component is placed in `.`.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` unless the file name ends in `.nii` or `.nii.gz`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| MtniftiError::UnsupportedFormat(path.to_path_buf()))?;
        let (basename, format) = NiftiFormat::split_file_name(file_name)
            .filter(|(stem, _)| !stem.is_empty())
            .ok_or_else(|| MtniftiError::UnsupportedFormat(path.to_path_buf()))?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Ok(Self {
            dir,
            basename: basename.to_string(),
            format,
        })
    }

    /// Full path of the file the converter will write
    pub fn path(&self) -> PathBuf {
        self.dir
            .join(format!("{}{}", self.basename, self.format.extension()))
    }
}

/// Converts a directory of DICOM files into one NIfTI volume
///
/// Implementations only run the conversion; output validation is done by
/// [`convert_dicom_dir`] before the converter is called.
pub trait Converter {
    fn convert(&self, source_dir: &Path, target: &OutputTarget) -> Result<()>;
}

/// Runs `converter` after checking the output path
///
/// # Errors
///
/// - `FileAlreadyExists` if `output_path` exists (nothing is run)
/// - `UnsupportedFormat` if `output_path` is not `.nii` or `.nii.gz`
/// - whatever the converter reports
pub fn convert_dicom_dir<C: Converter + ?Sized>(
    converter: &C,
    source_dir: &Path,
    output_path: &Path,
) -> Result<PathBuf> {
    if output_path.exists() {
        return Err(MtniftiError::FileAlreadyExists(output_path.to_path_buf()));
    }
    let target = OutputTarget::from_path(output_path)?;
    converter.convert(source_dir, &target)?;
    Ok(target.path())
}

/// Converts `source_dir` with the `dcm2niix` found on `PATH`
pub fn convert_with_dcm2niix(source_dir: &Path, output_path: &Path) -> Result<PathBuf> {
    convert_dicom_dir(&Dcm2Niix::default(), source_dir, output_path)
}

/// Subprocess adapter for the dcm2niix command-line converter
///
/// The exit status alone is not trusted: output mentioning a warning is
/// treated as a failure even when dcm2niix exits zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dcm2Niix {
    program: PathBuf,
    prefix_args: Vec<OsString>,
}

impl Default for Dcm2Niix {
    fn default() -> Self {
        Self::new(DEFAULT_DCM2NIIX)
    }
}

impl Dcm2Niix {
    /// Creates an adapter for the given executable
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            prefix_args: Vec::new(),
        }
    }

    /// Builder: Arguments placed before the dcm2niix options
    ///
    /// Used when dcm2niix runs through a wrapper, e.g.
    /// `singularity exec image.sif dcm2niix`.
    pub fn with_prefix_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.prefix_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self, source_dir: &Path, target: &OutputTarget) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.prefix_args)
            .arg("-z")
            .arg(target.format.compression_flag())
            .arg("-o")
            .arg(&target.dir)
            .arg("-f")
            .arg(&target.basename)
            .arg(source_dir);
        cmd
    }
}

impl Converter for Dcm2Niix {
    fn convert(&self, source_dir: &Path, target: &OutputTarget) -> Result<()> {
        let mut cmd = self.command(source_dir, target);
        info!(
            "Converting {} -> {}",
            source_dir.display(),
            target.path().display()
        );

        let output = cmd.output()?;
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() || contains_warning(&combined) {
            warn!("dcm2niix output:\n{}", combined);
            return Err(MtniftiError::ConverterFailure {
                command: format!("{:?}", cmd),
                status: output.status.to_string(),
                output: combined,
            });
        }

        Ok(())
    }
}

/// Checks converter output for a case-insensitive "warning"
fn contains_warning(output: &str) -> bool {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| Regex::new(r"(?i)warning").expect("Failed to compile regex"));
    re.is_match(output)
}
