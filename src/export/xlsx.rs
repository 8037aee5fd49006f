// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::excel_date::parse_to_excel_date;
use crate::export::{ExchangeRecord, get_headers, notify_export_success};
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

const HEADER_BG: u32 = 0x1F6E43;
const BAND_EVEN: u32 = 0xE8F5EC;
const BAND_ODD: u32 = 0xFFFFFF;

/// Spreadsheet copy of the ledger under the configured column `headers`:
/// banded rows, frozen header, real date/time cells and columns sized to
/// their content.
pub fn export_xlsx(records: &[ExchangeRecord], headers: &[String], path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Registros").map_err(xlsx_error)?;

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(HEADER_BG))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, header.as_str(), &header_format)
            .map_err(xlsx_error)?;
    }
    worksheet.set_freeze_panes(1, 0).map_err(xlsx_error)?;

    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    widths.resize(widths.len().max(get_headers().len()), 0);

    for (i, rec) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        let band = Color::RGB(if i % 2 == 0 { BAND_EVEN } else { BAND_ODD });

        for (col, value) in rec.to_row().iter().enumerate() {
            write_cell(worksheet, row, col as u16, value, band)?;
            widths[col] = widths[col].max(value.width());
        }
    }

    for (col, w) in widths.iter().enumerate() {
        worksheet
            .set_column_width(col as u16, *w as f64 + 2.0)
            .map_err(xlsx_error)?;
    }

    let label = if records.is_empty() {
        "XLSX (empty ledger)"
    } else {
        "XLSX"
    };
    workbook.save(path).map_err(xlsx_error)?;
    notify_export_success(label, path);
    Ok(())
}

/// Dates and times become Excel serials, everything else stays text.
fn write_cell(ws: &mut Worksheet, row: u32, col: u16, value: &str, band: Color) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(band)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    match parse_to_excel_date(value) {
        Some((num_format, serial)) => {
            ws.write_with_format(row, col, serial, &base.set_num_format(num_format))
                .map_err(xlsx_error)?;
        }
        None => {
            ws.write_with_format(row, col, value, &base)
                .map_err(xlsx_error)?;
        }
    }
    Ok(())
}

fn xlsx_error(e: rust_xlsxwriter::XlsxError) -> AppError {
    AppError::Serialize(format!("XLSX error: {e}"))
}
