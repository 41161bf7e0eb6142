use crate::error::{MtniftiError, Result};
use crate::types::SarRange;
use dicom_object::InMemDicomObject;

use super::tags::{get_float_value, SAR};

/// Finds the minimum and maximum SAR across a set of DICOM headers
///
/// Every header must carry a numeric SAR (0018,1316).
///
/// # Errors
///
/// - `TagNotFound` if a header has no SAR value
/// - `InvalidValue` if `headers` is empty
pub fn sar_range<'a, I>(headers: I) -> Result<SarRange>
where
    I: IntoIterator<Item = &'a InMemDicomObject>,
{
    let values = headers
        .into_iter()
        .map(|dcm| {
            get_float_value(dcm, SAR)?
                .ok_or_else(|| MtniftiError::TagNotFound(format!("SAR {}", SAR)))
        })
        .collect::<Result<Vec<f64>>>()?;

    sar_range_of_values(values)
        .ok_or_else(|| MtniftiError::InvalidValue("No SAR values to compare".to_string()))
}

/// Minimum and maximum of raw SAR values, rendered in canonical form
///
/// Returns `None` for an empty input. NaN values are ignored.
///
/// # Example
///
/// ```
/// use mtnifti_core::extraction::sar_range_of_values;
///
/// let range = sar_range_of_values([1.0, 3.0, 2.0]).unwrap();
/// assert_eq!(range.min, "1.0");
/// assert_eq!(range.max, "3.0");
/// ```
pub fn sar_range_of_values<I>(values: I) -> Option<SarRange>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
        .map(|(min, max)| SarRange::from_values(min, max))
}
