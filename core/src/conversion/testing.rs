//! Test helpers shared by the conversion tests

use crate::conversion::{Converter, OutputTarget};
use crate::error::Result;
use crate::extraction::tags::{
    MANUFACTURER, PHILIPS_MT_VALUE, SAR, SCAN_OPTIONS, SEQUENCE_VARIANT,
};
use dicom_core::{DataElement, PrimitiveValue, Tag, VR};
use dicom_dictionary_std::{tags, uids};
use dicom_object::{FileMetaTableBuilder, InMemDicomObject};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_INSTANCE: AtomicU32 = AtomicU32::new(1);

/// Minimal MR image with the vendor fields used for MT classification
#[derive(Debug, Default, Clone)]
pub struct TestDicom<'a> {
    pub manufacturer: &'a str,
    pub sar: Option<&'a str>,
    pub scan_options: &'a [&'a str],
    pub sequence_variant: &'a [&'a str],
    pub philips_mt_value: Option<f32>,
    /// Write with Implicit VR Little Endian instead of Explicit VR
    pub implicit_vr: bool,
}

impl<'a> TestDicom<'a> {
    pub fn new(manufacturer: &'a str) -> Self {
        Self {
            manufacturer,
            ..Default::default()
        }
    }

    pub fn write(&self, dir: &Path, name: &str) -> PathBuf {
        let instance_uid = format!("2.25.{}", NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed));

        let mut obj = InMemDicomObject::new_empty();
        obj.put(DataElement::new(
            tags::SOP_CLASS_UID,
            VR::UI,
            PrimitiveValue::from(uids::MR_IMAGE_STORAGE),
        ));
        obj.put(DataElement::new(
            tags::SOP_INSTANCE_UID,
            VR::UI,
            PrimitiveValue::from(instance_uid.as_str()),
        ));
        obj.put(DataElement::new(
            MANUFACTURER,
            VR::LO,
            PrimitiveValue::from(self.manufacturer),
        ));
        if let Some(sar) = self.sar {
            obj.put(DataElement::new(SAR, VR::DS, PrimitiveValue::from(sar)));
        }
        put_strs(&mut obj, SEQUENCE_VARIANT, self.sequence_variant);
        put_strs(&mut obj, SCAN_OPTIONS, self.scan_options);
        if let Some(value) = self.philips_mt_value {
            obj.put(DataElement::new(
                PHILIPS_MT_VALUE,
                VR::FL,
                PrimitiveValue::from(value),
            ));
        }

        let transfer_syntax = if self.implicit_vr {
            uids::IMPLICIT_VR_LITTLE_ENDIAN
        } else {
            uids::EXPLICIT_VR_LITTLE_ENDIAN
        };
        let file_obj = obj
            .with_meta(
                FileMetaTableBuilder::new()
                    .transfer_syntax(transfer_syntax)
                    .media_storage_sop_class_uid(uids::MR_IMAGE_STORAGE)
                    .media_storage_sop_instance_uid(instance_uid),
            )
            .unwrap();

        let path = dir.join(name);
        file_obj.write_to_file(&path).unwrap();
        path
    }
}

fn put_strs(obj: &mut InMemDicomObject, tag: Tag, values: &[&str]) {
    if !values.is_empty() {
        obj.put(DataElement::new(
            tag,
            VR::CS,
            PrimitiveValue::Strs(values.iter().map(|s| s.to_string()).collect()),
        ));
    }
}

/// Writes a minimal MR image file with the given vendor fields
pub fn write_dicom(
    dir: &Path,
    name: &str,
    manufacturer: &str,
    sar: Option<&str>,
    scan_options: &[&str],
) -> PathBuf {
    TestDicom {
        sar,
        scan_options,
        ..TestDicom::new(manufacturer)
    }
    .write(dir, name)
}

/// Converter that records the staged file names and writes an empty output
#[derive(Default)]
pub struct FakeConverter {
    pub calls: RefCell<Vec<(OutputTarget, Vec<String>)>>,
}

impl FakeConverter {
    pub fn staged_counts(&self) -> Vec<usize> {
        self.calls
            .borrow()
            .iter()
            .map(|(_, files)| files.len())
            .collect()
    }
}

impl Converter for FakeConverter {
    fn convert(&self, source_dir: &Path, target: &OutputTarget) -> Result<()> {
        let mut files = fs::read_dir(source_dir)?
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect::<std::io::Result<Vec<_>>>()?;
        files.sort();
        fs::write(target.path(), b"")?;
        self.calls.borrow_mut().push((target.clone(), files));
        Ok(())
    }
}
