use crate::error::{MtniftiError, Result};
use dicom_core::value::{PrimitiveValue, Value};
use dicom_core::{Tag, VR};
use dicom_object::InMemDicomObject;

pub use dicom_dictionary_std::tags::{MANUFACTURER, SAR, SCAN_OPTIONS, SEQUENCE_VARIANT};

// Philips private MT flag, decoded as a number (> 0 means MT on)
pub const PHILIPS_MT_VALUE: Tag = Tag(0x2005, 0x10A0);

/// Helper to get string value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to string
pub fn get_string_value(dcm: &InMemDicomObject, tag: Tag) -> Option<String> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_str().ok())
        .map(|s| s.trim().to_string())
}

/// Helper to get floating point value from DICOM tag
///
/// Works for binary (FL/FD) and decimal string (DS) encodings. Elements
/// without a dictionary entry read from implicit VR files arrive as UN
/// bytes; a 4-byte value is decoded as little-endian f32 and an 8-byte
/// value as f64.
///
/// Returns `Ok(None)` if the tag is not present.
///
/// # Errors
///
/// Returns `InvalidValue` if the element is present but cannot be decoded.
pub fn get_float_value(dcm: &InMemDicomObject, tag: Tag) -> Result<Option<f64>> {
    let elem = match dcm.element(tag) {
        Ok(elem) => elem,
        Err(_) => return Ok(None),
    };

    let is_raw_bytes = elem.vr() == VR::UN
        || matches!(elem.value(), Value::Primitive(PrimitiveValue::U8(_)));
    if !is_raw_bytes {
        return Ok(Some(elem.to_float64()?));
    }

    let bytes = elem.to_bytes()?;
    match *bytes {
        [a, b, c, d] => Ok(Some(f64::from(f32::from_le_bytes([a, b, c, d])))),
        [a, b, c, d, e, f, g, h] => Ok(Some(f64::from_le_bytes([a, b, c, d, e, f, g, h]))),
        _ => Err(MtniftiError::InvalidValue(format!(
            "{} has {} bytes, expected 4 or 8",
            tag,
            bytes.len()
        ))),
    }
}

/// Helper to get multi-string value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to Vec<String>
pub fn get_multi_string_value(dcm: &InMemDicomObject, tag: Tag) -> Option<Vec<String>> {
    dcm.element(tag).ok().and_then(|elem| {
        if let Ok(strs) = elem.to_multi_str() {
            Some(strs.iter().map(|s| s.trim().to_string()).collect())
        } else {
            // Fallback: single string with backslash separators
            elem.to_str()
                .ok()
                .map(|s| s.split('\\').map(|part| part.trim().to_string()).collect())
        }
    })
}
