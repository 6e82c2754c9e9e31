// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Spreadsheet rendering for session exports

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use thiserror::Error;

use crate::session::ScanRecord;

pub const SHEET_NAME: &str = "Hardware Inventory";

pub const HEADERS: [&str; 7] = [
    "#",
    "Brand",
    "Capacity",
    "Generation",
    "Speed (MHz)",
    "Form Factor",
    "Scanned At",
];

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No items to export")]
    Empty,

    #[error("Failed to render spreadsheet: {0}")]
    Xlsx(#[from] XlsxError),
}

/// Download file name for a session export
pub fn export_filename(session_id: &str) -> String {
    let safe: String = session_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("hardware_inventory_{}.xlsx", safe)
}

fn row_values(index: usize, record: &ScanRecord) -> [String; 7] {
    [
        index.to_string(),
        record.info.brand.clone(),
        record.info.capacity.clone(),
        record.info.generation.clone(),
        record.info.speed.clone(),
        record.info.form_factor.clone(),
        record.timestamp.clone(),
    ]
}

/// Character width per column: longest header or value, plus 2
fn column_widths(records: &[ScanRecord]) -> [usize; 7] {
    let mut widths = HEADERS.map(|h| h.chars().count());
    for (idx, record) in records.iter().enumerate() {
        for (col, value) in row_values(idx + 1, record).iter().enumerate() {
            widths[col] = widths[col].max(value.chars().count());
        }
    }
    widths.map(|w| w + 2)
}

/// Render records into an xlsx workbook: one header row plus one row per record
pub fn render_workbook(records: &[ScanRecord]) -> Result<Vec<u8>, ExportError> {
    if records.is_empty() {
        return Err(ExportError::Empty);
    }

    let widths = column_widths(records);
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        for (col, header) in HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &bold)?;
        }

        for (idx, record) in records.iter().enumerate() {
            let row = (idx + 1) as u32;
            let values = row_values(idx + 1, record);

            worksheet.write_number(row, 0, (idx + 1) as f64)?;
            for (col, value) in values.iter().enumerate().skip(1) {
                worksheet.write_string(row, col as u16, value.as_str())?;
            }
        }

        for (col, width) in widths.iter().enumerate() {
            worksheet.set_column_width(col as u16, *width as f64)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}
