pub mod report;

use crate::types::{ConversionConfig, DEFAULT_DCM2NIIX, DEFAULT_MTOFF_NAME, DEFAULT_MTON_NAME};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for mtnifti
#[derive(Parser, Debug)]
#[command(name = "mtnifti")]
#[command(about = "Convert DICOM series to NIfTI, splitting MT-on/MT-off acquisitions")]
#[command(version)]
pub struct Cli {
    /// Directory containing the DICOM files of one series
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Existing directory the NIfTI volumes are written to
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Sequence name; "mtr" splits the series into MT-on and MT-off volumes
    #[arg(value_name = "SEQUENCE")]
    pub sequence: String,

    /// dcm2niix executable
    #[arg(long, value_name = "PATH", default_value = DEFAULT_DCM2NIIX)]
    pub dcm2niix: PathBuf,

    /// Output file name of the MT-on volume
    #[arg(long, default_value = DEFAULT_MTON_NAME)]
    pub mton_name: String,

    /// Output file name of the MT-off volume
    #[arg(long, default_value = DEFAULT_MTOFF_NAME)]
    pub mtoff_name: String,

    /// Directory for temporary staging directories (default: system temp)
    #[arg(long, value_name = "DIR")]
    pub staging_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Builds the conversion configuration from the arguments
    pub fn config(&self) -> ConversionConfig {
        let config = ConversionConfig::default()
            .with_dcm2niix_path(&self.dcm2niix)
            .with_mt_names(&self.mton_name, &self.mtoff_name);
        match &self.staging_dir {
            Some(dir) => config.with_staging_root(dir),
            None => config,
        }
    }
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["mtnifti", "/dicom", "/out", "mtr"]);
        assert_eq!(cli.sequence, "mtr");
        assert!(!cli.verbose);
        assert_eq!(cli.config(), ConversionConfig::default());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "mtnifti",
            "/dicom",
            "/out",
            "mtr",
            "--dcm2niix",
            "/opt/dcm2niix",
            "--mton-name",
            "on.nii",
            "--staging-dir",
            "/scratch",
            "-v",
        ]);
        let config = cli.config();
        assert_eq!(config.dcm2niix_path, PathBuf::from("/opt/dcm2niix"));
        assert_eq!(config.mton_name, "on.nii");
        assert_eq!(config.mtoff_name, DEFAULT_MTOFF_NAME);
        assert_eq!(config.staging_root, Some(PathBuf::from("/scratch")));
        assert!(cli.verbose);
    }
}
