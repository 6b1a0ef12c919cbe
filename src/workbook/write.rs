// src/workbook/write.rs

use rust_xlsxwriter::{Color, ConditionalFormatFormula, Format, Workbook, Worksheet, XlsxError};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, instrument};

use super::layout::{self, Value};
use crate::error::WorkbookError;
use crate::ship::{Dataset, Rarity};

/// Write `ships` to a single-sheet workbook at `path`, replacing any existing file.
///
/// The ID column is stored as text, the whole table gets an autofilter and
/// rows are coloured by rarity over the `ID`..`Acquired` columns.
#[instrument(level = "info", skip(path, ships), fields(path = %path.as_ref().display(), records = ships.len()))]
pub fn write_dataset<P: AsRef<Path>>(
    path: P,
    sheet_name: &str,
    ships: &Dataset,
) -> Result<(), WorkbookError> {
    let path = path.as_ref();
    let write_err = |source| WorkbookError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name).map_err(write_err)?;
    fill_sheet(sheet, ships).map_err(write_err)?;

    // save beside the target, then rename over it
    let tmp_path = tmp_path_for(path);
    if let Err(source) = workbook.save(&tmp_path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(write_err(source));
    }
    if let Err(source) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(WorkbookError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    debug!("saved workbook");
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "ships.xlsx".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}

fn fill_sheet(sheet: &mut Worksheet, ships: &Dataset) -> Result<(), XlsxError> {
    let text_format = Format::new().set_num_format("@");
    sheet.set_column_format(layout::ID_COL, &text_format)?;

    for (col, header) in layout::headers().into_iter().enumerate() {
        sheet.write_string(0, col as u16, header)?;
    }

    for (i, ship) in ships.iter().enumerate() {
        let row = i as u32 + 1;
        for (col, value) in layout::row_values(ship).into_iter().enumerate() {
            let col = col as u16;
            match value {
                Value::Text(s) if col == layout::ID_COL => {
                    sheet.write_string_with_format(row, col, s, &text_format)?;
                }
                Value::Text(s) if !s.is_empty() => {
                    sheet.write_string(row, col, s)?;
                }
                Value::Number(n) => {
                    sheet.write_number(row, col, n)?;
                }
                Value::Text(_) | Value::Blank => {}
            }
        }
    }

    let last_row = ships.len() as u32;
    let last_col = layout::column_count() - 1;
    sheet.autofilter(0, 0, last_row, last_col)?;

    if ships.is_empty() {
        return Ok(());
    }
    let (first_col, end_col) = layout::COLOURED_COLS;
    for rarity in Rarity::ALL {
        let format = Format::new()
            .set_background_color(Color::RGB(layout::rarity_colour(rarity)))
            .set_font_color(Color::RGB(layout::FONT_COLOUR));
        let rule = ConditionalFormatFormula::new()
            .set_rule(layout::rarity_rule(rarity).as_str())
            .set_format(format);
        sheet.add_conditional_format(1, first_col, last_row, end_col, &rule)?;
    }

    Ok(())
}
