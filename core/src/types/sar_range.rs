use std::fmt;

/// Renders a SAR value in the canonical string form used for exact matching
///
/// Shortest round-trip representation that always keeps a fractional part,
/// so `1` renders as `"1.0"` and `2.50` as `"2.5"`.
pub fn format_sar(value: f64) -> String {
    format!("{:?}", value)
}

/// Minimum and maximum SAR observed across a series
///
/// Both extremes are kept as canonical strings (see [`format_sar`]); the
/// Toshiba rule compares each record's SAR against them textually rather
/// than numerically.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct SarRange {
    pub min: String,
    pub max: String,
}

impl SarRange {
    /// Creates a new SarRange from its string extremes
    pub fn new(min: impl Into<String>, max: impl Into<String>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    /// Builds a range from numeric extremes
    pub fn from_values(min: f64, max: f64) -> Self {
        Self::new(format_sar(min), format_sar(max))
    }

    /// Whether the minimum and maximum coincide (every image had the same SAR)
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }
}

impl fmt::Display for SarRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}
