use crate::api::ConversionReport;
use std::fmt;

/// Text report formatter for a finished conversion
pub struct TextReport<'a> {
    report: &'a ConversionReport,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(report: &'a ConversionReport) -> Self {
        Self { report }
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Conversion Report")?;
        writeln!(f, "=================")?;
        writeln!(f)?;
        writeln!(f, "Source:         {}", self.report.source_dir.display())?;
        writeln!(f, "Sequence:       {}", self.report.sequence)?;
        if let (Some(on), Some(off)) = (self.report.mton_files, self.report.mtoff_files) {
            writeln!(f, "MT-on images:   {}", on)?;
            writeln!(f, "MT-off images:  {}", off)?;
        }
        writeln!(f)?;

        writeln!(f, "Outputs")?;
        writeln!(f, "-------")?;
        for output in &self.report.outputs {
            writeln!(f, "{}", output.display())?;
        }

        Ok(())
    }
}
