//! XLSX workbook writer.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use super::write_atomic;
use crate::config::ReportConfig;
use crate::core::report::{Cell, Report};
use crate::error::{JobpackError, Result};

const ARTIFACT: &str = "XLSX report";

/// Writes a report as a workbook, one worksheet per table.
///
/// # Format
/// - Sheet names and order follow the report's tables
/// - Row 1 holds bold column headers, data starts on row 2
/// - Counts are numeric cells, everything else is text
/// - Column widths come from [`Table::column_widths`](crate::core::report::Table::column_widths)
pub fn write_xlsx(
    report: &Report,
    output_path: impl AsRef<Path>,
    config: &ReportConfig,
) -> Result<()> {
    let path = output_path.as_ref();
    let bytes = to_xlsx(report, config)
        .map_err(|err| JobpackError::report(ARTIFACT, Some(path.to_path_buf()), err))?;
    write_atomic(path, ARTIFACT, &bytes)
}

/// Renders a report to XLSX bytes.
pub fn to_xlsx(report: &Report, config: &ReportConfig) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    for table in &report.tables {
        let sheet = workbook.add_worksheet();
        sheet.set_name(&table.name)?;

        for (col, name) in table.columns.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, name, &header)?;
        }

        for (row_idx, row) in table.rows.iter().enumerate() {
            let row_num = (row_idx + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                match cell {
                    Cell::Number(n) => {
                        sheet.write_number(row_num, col as u16, *n as f64)?;
                    }
                    other => {
                        sheet.write_string(row_num, col as u16, other.to_string())?;
                    }
                }
            }
        }

        for (col, width) in table.column_widths(config).into_iter().enumerate() {
            sheet.set_column_width(col as u16, width as f64)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}
