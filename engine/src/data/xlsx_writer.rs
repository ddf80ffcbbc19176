// Serializes a table to an .xlsx workbook with a single sheet.
use std::path::Path;

use chrono::Datelike;
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, XlsxError};
use shared::models::{Cell, Table};

use crate::error::EngineResult;

// Excel's hard sheet limits.
const MAX_ROWS: usize = 1_048_576;
const MAX_COLUMNS: usize = 16_384;

pub struct XlsxExporter {
    sheet_name: String,
}

impl XlsxExporter {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        XlsxExporter {
            sheet_name: sheet_name.into(),
        }
    }

    /// Workbook bytes, ready to be offered for download.
    pub fn to_bytes(&self, table: &Table) -> EngineResult<Vec<u8>> {
        let mut workbook = self.build_workbook(table)?;
        Ok(workbook.save_to_buffer()?)
    }

    pub fn write_to_path(&self, table: &Table, path: &Path) -> EngineResult<()> {
        let mut workbook = self.build_workbook(table)?;
        workbook.save(path)?;
        tracing::info!(path = %path.display(), rows = table.len(), "Wrote spreadsheet");
        Ok(())
    }

    fn build_workbook(&self, table: &Table) -> EngineResult<Workbook> {
        // Header row counts against the row limit.
        if table.len() + 1 > MAX_ROWS || table.columns.len() > MAX_COLUMNS {
            return Err(XlsxError::RowColumnLimitError.into());
        }

        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();
        let date_format = Format::new().set_num_format("yyyy-mm-dd");

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;

        for (col, name) in table.columns.iter().enumerate() {
            worksheet.write_string_with_format(0, col as ColNum, name, &header_format)?;
        }

        for (row_idx, row) in table.rows.iter().enumerate() {
            let xl_row = (row_idx + 1) as RowNum;
            for (col_idx, cell) in row.iter().enumerate() {
                let xl_col = col_idx as ColNum;
                match cell {
                    Cell::Text(s) => {
                        worksheet.write_string(xl_row, xl_col, s)?;
                    }
                    Cell::Number(v) => {
                        worksheet.write_number(xl_row, xl_col, *v)?;
                    }
                    Cell::Integer(i) => {
                        worksheet.write_number(xl_row, xl_col, *i as f64)?;
                    }
                    Cell::Date(d) if (1900..=9999).contains(&d.year()) => {
                        worksheet.write_datetime_with_format(xl_row, xl_col, d, &date_format)?;
                    }
                    // Excel has no serial number for these; keep the value readable.
                    Cell::Date(d) => {
                        worksheet.write_string(xl_row, xl_col, d.format("%Y-%m-%d").to_string())?;
                    }
                    Cell::Null => {}
                }
            }
        }

        Ok(workbook)
    }
}
