use std::fmt;

/// Scanner vendor, selected once from the Manufacturer attribute
///
/// Each vendor encodes the magnetization-transfer flag differently, so the
/// vendor decides which header fields the classifier reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum Vendor {
    Ge,
    Philips,
    Hitachi,
    Siemens,
    Toshiba,
    Unknown,
}

impl Vendor {
    /// Known vendors in the order they are tried against the Manufacturer string
    ///
    /// The order matters: the first vendor whose name is a substring wins.
    pub const DISPATCH_ORDER: [Vendor; 5] = [
        Vendor::Ge,
        Vendor::Philips,
        Vendor::Hitachi,
        Vendor::Siemens,
        Vendor::Toshiba,
    ];

    /// Lowercase substring identifying this vendor in a Manufacturer value
    pub fn needle(&self) -> Option<&'static str> {
        match self {
            Vendor::Ge => Some("ge"),
            Vendor::Philips => Some("philips"),
            Vendor::Hitachi => Some("hitachi"),
            Vendor::Siemens => Some("siemens"),
            Vendor::Toshiba => Some("toshiba"),
            Vendor::Unknown => None,
        }
    }

    /// Detects the vendor from a Manufacturer value (case-insensitive substring match)
    ///
    /// # Example
    ///
    /// ```
    /// use mtnifti_core::Vendor;
    ///
    /// assert_eq!(Vendor::from_manufacturer("GE MEDICAL SYSTEMS"), Vendor::Ge);
    /// assert_eq!(Vendor::from_manufacturer("Philips Healthcare"), Vendor::Philips);
    /// assert_eq!(Vendor::from_manufacturer("ACME"), Vendor::Unknown);
    /// ```
    pub fn from_manufacturer(manufacturer: &str) -> Self {
        Self::DISPATCH_ORDER
            .into_iter()
            .find(|vendor| vendor.matches(manufacturer))
            .unwrap_or(Vendor::Unknown)
    }

    /// Checks whether the Manufacturer value names this vendor
    pub fn matches(&self, manufacturer: &str) -> bool {
        match self.needle() {
            Some(needle) => manufacturer.to_lowercase().contains(needle),
            None => false,
        }
    }

    /// Returns whether this vendor is unknown
    pub fn is_unknown(&self) -> bool {
        matches!(self, Vendor::Unknown)
    }

    /// Returns display name
    pub fn simple_name(&self) -> &'static str {
        match self {
            Vendor::Ge => "GE",
            Vendor::Philips => "Philips",
            Vendor::Hitachi => "Hitachi",
            Vendor::Siemens => "Siemens",
            Vendor::Toshiba => "Toshiba",
            Vendor::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Whether the magnetization-transfer module was active for an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum MtState {
    On,
    Off,
}

impl MtState {
    pub fn is_on(&self) -> bool {
        matches!(self, MtState::On)
    }

    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            MtState::On => "mton",
            MtState::Off => "mtoff",
        }
    }
}

impl From<bool> for MtState {
    fn from(is_on: bool) -> Self {
        if is_on {
            MtState::On
        } else {
            MtState::Off
        }
    }
}

impl fmt::Display for MtState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// NIfTI output flavour, derived from the output file suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum NiftiFormat {
    /// `.nii.gz`
    Compressed,
    /// `.nii`
    Uncompressed,
}

impl NiftiFormat {
    /// File suffix including the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            NiftiFormat::Compressed => ".nii.gz",
            NiftiFormat::Uncompressed => ".nii",
        }
    }

    /// Value passed to `dcm2niix -z`
    pub fn compression_flag(&self) -> &'static str {
        match self {
            NiftiFormat::Compressed => "p",
            NiftiFormat::Uncompressed => "n",
        }
    }

    /// Splits a file name into its stem and format
    ///
    /// Returns `None` when the name ends in neither `.nii.gz` nor `.nii`.
    pub fn split_file_name(file_name: &str) -> Option<(&str, NiftiFormat)> {
        [NiftiFormat::Compressed, NiftiFormat::Uncompressed]
            .into_iter()
            .find_map(|format| {
                file_name
                    .strip_suffix(format.extension())
                    .map(|stem| (stem, format))
            })
    }
}

impl fmt::Display for NiftiFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("GE MEDICAL SYSTEMS", Vendor::Ge)]
    #[case("ge healthcare", Vendor::Ge)]
    #[case("Philips Medical Systems", Vendor::Philips)]
    #[case("Hitachi Medical Corporation", Vendor::Hitachi)]
    #[case("SIEMENS", Vendor::Siemens)]
    #[case("TOSHIBA_MEC", Vendor::Toshiba)]
    #[case("Bruker", Vendor::Unknown)]
    #[case("", Vendor::Unknown)]
    fn test_vendor_from_manufacturer(#[case] manufacturer: &str, #[case] expected: Vendor) {
        assert_eq!(Vendor::from_manufacturer(manufacturer), expected);
    }

    #[test]
    fn test_vendor_dispatch_order_is_first_match() {
        // Both names present: GE is tried first
        assert_eq!(Vendor::from_manufacturer("Siemens-GE"), Vendor::Ge);
    }

    #[test]
    fn test_unknown_vendor_matches_nothing() {
        assert!(!Vendor::Unknown.matches("unknown"));
        assert!(Vendor::Unknown.is_unknown());
    }

    #[test]
    fn test_mt_state_from_bool() {
        assert_eq!(MtState::from(true), MtState::On);
        assert_eq!(MtState::from(false), MtState::Off);
        assert!(MtState::On.is_on());
        assert_eq!(MtState::Off.to_string(), "mtoff");
    }

    #[rstest]
    #[case("mton.nii.gz", Some(("mton", NiftiFormat::Compressed)))]
    #[case("t1.nii", Some(("t1", NiftiFormat::Uncompressed)))]
    #[case("a.b.nii.gz", Some(("a.b", NiftiFormat::Compressed)))]
    #[case("volume.mgz", None)]
    #[case("volume.gz", None)]
    fn test_split_file_name(#[case] name: &str, #[case] expected: Option<(&str, NiftiFormat)>) {
        assert_eq!(NiftiFormat::split_file_name(name), expected);
    }

    #[test]
    fn test_compression_flags() {
        assert_eq!(NiftiFormat::Compressed.compression_flag(), "p");
        assert_eq!(NiftiFormat::Uncompressed.compression_flag(), "n");
    }
}
