use std::path::{Path, PathBuf};

/// Default converter executable, looked up on `PATH`
pub const DEFAULT_DCM2NIIX: &str = "dcm2niix";

/// Default output name for the MT-on volume of a paired conversion
pub const DEFAULT_MTON_NAME: &str = "mton.nii.gz";

/// Default output name for the MT-off volume of a paired conversion
pub const DEFAULT_MTOFF_NAME: &str = "mtoff.nii.gz";

/// Configuration for conversion jobs
///
/// # Example
///
/// ```
/// use mtnifti_core::ConversionConfig;
///
/// let config = ConversionConfig::default()
///     .with_dcm2niix_path("/opt/mricrogl/dcm2niix")
///     .with_mt_names("on.nii", "off.nii");
///
/// assert_eq!(config.mton_name, "on.nii");
/// assert_eq!(config.mtoff_name, "off.nii");
/// assert!(config.staging_root.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct ConversionConfig {
    /// Path or name of the dcm2niix executable
    pub dcm2niix_path: PathBuf,

    /// File name of the MT-on output, relative to the output directory
    pub mton_name: String,

    /// File name of the MT-off output, relative to the output directory
    pub mtoff_name: String,

    /// Parent directory for staging directories
    /// If None, the system temporary directory is used.
    pub staging_root: Option<PathBuf>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            dcm2niix_path: PathBuf::from(DEFAULT_DCM2NIIX),
            mton_name: DEFAULT_MTON_NAME.to_string(),
            mtoff_name: DEFAULT_MTOFF_NAME.to_string(),
            staging_root: None,
        }
    }
}

impl ConversionConfig {
    /// Builder: Set the dcm2niix executable
    pub fn with_dcm2niix_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dcm2niix_path = path.into();
        self
    }

    /// Builder: Set the MT-on and MT-off output names
    pub fn with_mt_names(mut self, mton: impl Into<String>, mtoff: impl Into<String>) -> Self {
        self.mton_name = mton.into();
        self.mtoff_name = mtoff.into();
        self
    }

    /// Builder: Create staging directories under `root`
    pub fn with_staging_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.staging_root = Some(root.into());
        self
    }

    /// Full MT-on output path inside `output_dir`
    pub fn mton_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(&self.mton_name)
    }

    /// Full MT-off output path inside `output_dir`
    pub fn mtoff_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(&self.mtoff_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConversionConfig::default();
        assert_eq!(config.dcm2niix_path, PathBuf::from("dcm2niix"));
        assert_eq!(config.mton_name, "mton.nii.gz");
        assert_eq!(config.mtoff_name, "mtoff.nii.gz");
        assert!(config.staging_root.is_none());
    }

    #[test]
    fn test_output_paths() {
        let config = ConversionConfig::default();
        let out = Path::new("/data/out");
        assert_eq!(config.mton_path(out), PathBuf::from("/data/out/mton.nii.gz"));
        assert_eq!(
            config.mtoff_path(out),
            PathBuf::from("/data/out/mtoff.nii.gz")
        );
    }

    #[test]
    fn test_builder_chaining() {
        let config = ConversionConfig::default()
            .with_staging_root("/scratch")
            .with_dcm2niix_path("/usr/local/bin/dcm2niix");
        assert_eq!(config.staging_root, Some(PathBuf::from("/scratch")));
        assert_eq!(
            config.dcm2niix_path,
            PathBuf::from("/usr/local/bin/dcm2niix")
        );
    }
}
