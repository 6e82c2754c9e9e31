// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod spreadsheet;

pub use spreadsheet::{
    export_filename, render_workbook, ExportError, HEADERS, SHEET_NAME, XLSX_CONTENT_TYPE,
};
