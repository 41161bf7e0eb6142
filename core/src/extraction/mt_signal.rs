use crate::error::{MtniftiError, Result};
use crate::types::{format_sar, MtState, SarRange, Vendor};
use dicom_object::InMemDicomObject;

use super::tags::{
    get_float_value, get_multi_string_value, get_string_value, MANUFACTURER, PHILIPS_MT_VALUE,
    SAR, SCAN_OPTIONS, SEQUENCE_VARIANT,
};

/// GE ScanOptions token for an MT-on acquisition
pub const GE_MT_OPTION: &str = "MT_GEMS";

/// Siemens ScanOptions token for an MT-on acquisition
pub const SIEMENS_MT_OPTION: &str = "MT";

/// Hitachi SequenceVariant token for an MT-on acquisition
pub const HITACHI_MT_VARIANT: &str = "MTC";

/// Vendor-specific header fields that encode the MT state
///
/// One variant per supported vendor, each carrying only the field its
/// rule needs. The vendor is selected once from the Manufacturer value
/// when the signal is extracted, so classification never re-checks it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum MtSignal {
    /// ScanOptions (0018,0022)
    Ge { scan_options: Vec<String> },
    /// Private MT value (2005,10A0)
    Philips { mt_value: f64 },
    /// SequenceVariant (0018,0021)
    Hitachi { sequence_variant: Vec<String> },
    /// ScanOptions (0018,0022)
    Siemens { scan_options: Vec<String> },
    /// SAR (0018,1316)
    Toshiba { sar: f64 },
}

impl MtSignal {
    /// Extracts the MT signal, choosing the vendor from the Manufacturer value
    ///
    /// # Errors
    ///
    /// - `TagNotFound` if Manufacturer or the vendor's signal field is missing
    /// - `UnsupportedVendor` if the manufacturer matches no known vendor
    pub fn extract(dcm: &InMemDicomObject) -> Result<Self> {
        let manufacturer = read_manufacturer(dcm)?;
        match Vendor::from_manufacturer(&manufacturer) {
            Vendor::Unknown => Err(MtniftiError::UnsupportedVendor(manufacturer)),
            vendor => Self::extract_fields(dcm, vendor),
        }
    }

    /// Extracts the MT signal using a specific vendor's rule
    ///
    /// # Errors
    ///
    /// Returns `VendorMismatch` if the Manufacturer value does not name `vendor`.
    pub fn extract_as(dcm: &InMemDicomObject, vendor: Vendor) -> Result<Self> {
        let manufacturer = read_manufacturer(dcm)?;
        if vendor.is_unknown() {
            return Err(MtniftiError::UnsupportedVendor(manufacturer));
        }
        if !vendor.matches(&manufacturer) {
            return Err(MtniftiError::VendorMismatch {
                expected: vendor,
                manufacturer,
            });
        }
        Self::extract_fields(dcm, vendor)
    }

    fn extract_fields(dcm: &InMemDicomObject, vendor: Vendor) -> Result<Self> {
        let tokens = |tag| get_multi_string_value(dcm, tag).unwrap_or_default();
        match vendor {
            Vendor::Ge => Ok(MtSignal::Ge {
                scan_options: tokens(SCAN_OPTIONS),
            }),
            Vendor::Philips => {
                let mt_value = get_float_value(dcm, PHILIPS_MT_VALUE)?.ok_or_else(|| {
                    MtniftiError::TagNotFound(format!("Philips MT value {}", PHILIPS_MT_VALUE))
                })?;
                Ok(MtSignal::Philips { mt_value })
            }
            Vendor::Hitachi => Ok(MtSignal::Hitachi {
                sequence_variant: tokens(SEQUENCE_VARIANT),
            }),
            Vendor::Siemens => Ok(MtSignal::Siemens {
                scan_options: tokens(SCAN_OPTIONS),
            }),
            Vendor::Toshiba => {
                let sar = get_float_value(dcm, SAR)?
                    .ok_or_else(|| MtniftiError::TagNotFound(format!("SAR {}", SAR)))?;
                Ok(MtSignal::Toshiba { sar })
            }
            Vendor::Unknown => Err(MtniftiError::UnsupportedVendor(vendor.to_string())),
        }
    }

    /// Vendor whose rule this signal follows
    pub fn vendor(&self) -> Vendor {
        match self {
            MtSignal::Ge { .. } => Vendor::Ge,
            MtSignal::Philips { .. } => Vendor::Philips,
            MtSignal::Hitachi { .. } => Vendor::Hitachi,
            MtSignal::Siemens { .. } => Vendor::Siemens,
            MtSignal::Toshiba { .. } => Vendor::Toshiba,
        }
    }

    /// SAR value, for Toshiba signals only
    pub fn sar(&self) -> Option<f64> {
        match self {
            MtSignal::Toshiba { sar } => Some(*sar),
            _ => None,
        }
    }

    /// Decides whether the MT module was active
    ///
    /// `sar_range` is only consulted for Toshiba, which has no MT flag: the
    /// image with the highest SAR of an on/off pair is taken to be MT-on.
    ///
    /// # Errors
    ///
    /// - `AmbiguousSar` if a Toshiba SAR equals neither extreme of the range
    /// - `InvalidValue` if a Toshiba signal is classified without a range
    ///
    /// # Example
    ///
    /// ```
    /// use mtnifti_core::{MtSignal, SarRange};
    ///
    /// let ge = MtSignal::Ge { scan_options: vec!["FAST_GEMS".into(), "MT_GEMS".into()] };
    /// assert!(ge.is_mt_on(None).unwrap());
    ///
    /// let range = SarRange::new("1.0", "2.0");
    /// let toshiba = MtSignal::Toshiba { sar: 1.0 };
    /// assert!(!toshiba.is_mt_on(Some(&range)).unwrap());
    /// ```
    pub fn is_mt_on(&self, sar_range: Option<&SarRange>) -> Result<bool> {
        match self {
            MtSignal::Ge { scan_options } => Ok(has_token(scan_options, GE_MT_OPTION)),
            MtSignal::Philips { mt_value } => Ok(*mt_value > 0.0),
            MtSignal::Hitachi { sequence_variant } => {
                Ok(has_token(sequence_variant, HITACHI_MT_VARIANT))
            }
            MtSignal::Siemens { scan_options } => Ok(has_token(scan_options, SIEMENS_MT_OPTION)),
            MtSignal::Toshiba { sar } => {
                let range = sar_range.ok_or_else(|| {
                    MtniftiError::InvalidValue(
                        "Toshiba MT classification requires a SAR range".to_string(),
                    )
                })?;
                is_max_sar(&format_sar(*sar), range)
            }
        }
    }

    /// Same as [`MtSignal::is_mt_on`], as an [`MtState`]
    pub fn mt_state(&self, sar_range: Option<&SarRange>) -> Result<MtState> {
        self.is_mt_on(sar_range).map(MtState::from)
    }
}

/// Checks whether a DICOM header indicates an MT-on acquisition
///
/// The vendor is taken from the Manufacturer value. `sar_range` is required
/// for Toshiba headers and ignored otherwise.
pub fn is_mt_on(dcm: &InMemDicomObject, sar_range: Option<&SarRange>) -> Result<bool> {
    MtSignal::extract(dcm)?.is_mt_on(sar_range)
}

/// Checks a DICOM header against one vendor's rule
///
/// Fails with `VendorMismatch` when the header comes from another manufacturer.
pub fn is_mt_on_as(
    vendor: Vendor,
    dcm: &InMemDicomObject,
    sar_range: Option<&SarRange>,
) -> Result<bool> {
    MtSignal::extract_as(dcm, vendor)?.is_mt_on(sar_range)
}

fn read_manufacturer(dcm: &InMemDicomObject) -> Result<String> {
    get_string_value(dcm, MANUFACTURER)
        .ok_or_else(|| MtniftiError::TagNotFound(format!("Manufacturer {}", MANUFACTURER)))
}

fn has_token(values: &[String], token: &str) -> bool {
    values.iter().any(|v| v == token)
}

fn is_max_sar(sar: &str, range: &SarRange) -> Result<bool> {
    if sar != range.min && sar != range.max {
        return Err(MtniftiError::AmbiguousSar {
            value: sar.to_string(),
            min: range.min.clone(),
            max: range.max.clone(),
        });
    }
    Ok(sar == range.max)
}
