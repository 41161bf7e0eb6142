use crate::error::{MtniftiError, Result};
use crate::extraction::tags::{get_string_value, MANUFACTURER};
use crate::extraction::MtSignal;
use crate::types::{MtState, SarRange, Vendor};
use dicom_object::{open_file, InMemDicomObject};
use std::path::{Path, PathBuf};

/// DICOM file path combined with the header fields needed for MT classification
///
/// Immutable once read: the file is parsed once and only the vendor's
/// signal field is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct DicomRecord {
    /// Path to the DICOM file
    pub file_path: PathBuf,

    /// Manufacturer (0008,0070)
    pub manufacturer: String,

    /// Vendor-specific MT signal
    pub signal: MtSignal,
}

impl DicomRecord {
    /// Creates a record from a DICOM file path
    ///
    /// # Errors
    ///
    /// Returns `InvalidDicom` if the file cannot be parsed, or the
    /// extraction error if the header lacks the vendor's fields.
    pub fn from_file(path: PathBuf) -> Result<Self> {
        let dcm = open_file(&path).map_err(|e| MtniftiError::InvalidDicom {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        Self::from_dicom(path, &dcm)
    }

    /// Creates a record from an already-opened DICOM object
    pub fn from_dicom(path: PathBuf, dcm: &InMemDicomObject) -> Result<Self> {
        let signal = MtSignal::extract(dcm)?;
        Ok(Self {
            file_path: path,
            manufacturer: get_string_value(dcm, MANUFACTURER).unwrap_or_default(),
            signal,
        })
    }

    pub fn vendor(&self) -> Vendor {
        self.signal.vendor()
    }

    /// Classifies this record; `sar_range` is required for Toshiba only
    pub fn mt_state(&self, sar_range: Option<&SarRange>) -> Result<MtState> {
        self.signal.mt_state(sar_range)
    }
}

/// Reads every entry at the top level of `dir` as a DICOM record
///
/// Entries are visited in sorted path order. Enumeration is not recursive,
/// and any entry that is not a readable DICOM file fails the whole read.
pub fn read_dicom_dir(dir: &Path) -> Result<Vec<DicomRecord>> {
    let mut paths = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    paths.into_iter().map(DicomRecord::from_file).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::testing::{write_dicom, TestDicom};
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_from_file_toshiba() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_dicom(temp_dir.path(), "img1.dcm", "TOSHIBA_MEC", Some("2.0"), &[]);

        let record = DicomRecord::from_file(path.clone()).unwrap();

        assert_eq!(record.file_path, path);
        assert_eq!(record.manufacturer, "TOSHIBA_MEC");
        assert_eq!(record.vendor(), Vendor::Toshiba);
        assert_eq!(record.signal.sar(), Some(2.0));
    }

    #[rstest]
    #[case(false, 1.0, MtState::On)]
    #[case(false, 0.0, MtState::Off)]
    #[case(true, 1.0, MtState::On)]
    #[case(true, 0.0, MtState::Off)]
    fn test_from_file_philips(
        #[case] implicit_vr: bool,
        #[case] mt_value: f32,
        #[case] expected: MtState,
    ) {
        let temp_dir = TempDir::new().unwrap();
        let path = TestDicom {
            philips_mt_value: Some(mt_value),
            implicit_vr,
            ..TestDicom::new("Philips Medical Systems")
        }
        .write(temp_dir.path(), "img1.dcm");

        let record = DicomRecord::from_file(path).unwrap();

        assert_eq!(record.vendor(), Vendor::Philips);
        assert_eq!(
            record.signal,
            MtSignal::Philips {
                mt_value: f64::from(mt_value)
            }
        );
        assert_eq!(record.mt_state(None).unwrap(), expected);
    }

    #[test]
    fn test_from_file_hitachi() {
        let temp_dir = TempDir::new().unwrap();
        let on = TestDicom {
            sequence_variant: &["SP", "MTC"],
            ..TestDicom::new("Hitachi Medical Corporation")
        }
        .write(temp_dir.path(), "on.dcm");
        let off = TestDicom {
            sequence_variant: &["SP"],
            implicit_vr: true,
            ..TestDicom::new("Hitachi Medical Corporation")
        }
        .write(temp_dir.path(), "off.dcm");

        let on = DicomRecord::from_file(on).unwrap();
        let off = DicomRecord::from_file(off).unwrap();

        assert_eq!(on.vendor(), Vendor::Hitachi);
        assert_eq!(on.mt_state(None).unwrap(), MtState::On);
        assert_eq!(off.mt_state(None).unwrap(), MtState::Off);
    }

    #[test]
    fn test_from_file_not_dicom() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        fs::write(&path, b"This is not a DICOM file").unwrap();

        let err = DicomRecord::from_file(path.clone()).unwrap_err();

        assert!(matches!(err, MtniftiError::InvalidDicom { path: p, .. } if p == path));
    }

    #[test]
    fn test_read_dicom_dir_sorted() {
        let temp_dir = TempDir::new().unwrap();
        write_dicom(temp_dir.path(), "b.dcm", "SIEMENS", None, &["MT"]);
        write_dicom(temp_dir.path(), "a.dcm", "SIEMENS", None, &[]);

        let records = read_dicom_dir(temp_dir.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert!(records[0].file_path.ends_with("a.dcm"));
        assert_eq!(records[0].mt_state(None).unwrap(), MtState::Off);
        assert_eq!(records[1].mt_state(None).unwrap(), MtState::On);
    }

    #[test]
    fn test_read_dicom_dir_rejects_stray_file() {
        let temp_dir = TempDir::new().unwrap();
        write_dicom(temp_dir.path(), "a.dcm", "SIEMENS", None, &[]);
        fs::write(temp_dir.path().join("README"), b"scanner export").unwrap();

        let err = read_dicom_dir(temp_dir.path()).unwrap_err();

        assert!(matches!(err, MtniftiError::InvalidDicom { .. }));
    }
}
