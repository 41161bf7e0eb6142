//! Core type definitions for MT conversion
//!
//! This module provides the value types used throughout the mtnifti library:
//! - [`Vendor`]: Scanner manufacturer, which selects the MT classification rule
//! - [`MtState`]: Whether the magnetization-transfer pulse was on or off
//! - [`NiftiFormat`]: Compressed or uncompressed NIfTI output
//! - [`SarRange`]: Minimum and maximum SAR of a series (Toshiba heuristic)
//! - [`ConversionConfig`]: Converter location, output names and staging location

mod config;
mod enums;
mod sar_range;

pub use config::{ConversionConfig, DEFAULT_DCM2NIIX, DEFAULT_MTOFF_NAME, DEFAULT_MTON_NAME};
pub use enums::{MtState, NiftiFormat, Vendor};
pub use sar_range::{format_sar, SarRange};
