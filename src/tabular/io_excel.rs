use calamine::{open_workbook, DataType, Range, Reader, Xlsx};

use snafu::prelude::*;

use crate::tabular::*;

/// Reads a table from an Excel workbook.
///
/// The first row is the header. Rows in which every cell is empty are
/// skipped.
pub fn read_excel_table(path: &str, worksheet_name: Option<&str>) -> CliResult<RawTable> {
    let wrange = get_range(path, worksheet_name)?;

    let mut iter = wrange.rows();
    let header: Vec<String> = iter
        .next()
        .context(EmptyExcelSnafu { path })?
        .iter()
        .map(|c| read_cell(c).to_string())
        .collect();
    debug!("read_excel_table: header: {:?}", header);

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for (idx, row) in iter.enumerate() {
        if row.iter().all(|c| matches!(c, DataType::Empty)) {
            debug!("read_excel_table: skipping empty row {}", idx + 2);
            continue;
        }
        rows.push(row.iter().map(read_cell).collect());
    }
    Ok(RawTable { header, rows })
}

fn get_range(path: &str, worksheet_name: Option<&str>) -> CliResult<Range<DataType>> {
    debug!(
        "read_excel_table: path: {:?} worksheet: {:?}",
        path, worksheet_name
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet) = worksheet_name {
        workbook
            .worksheet_range(worksheet)
            .context(MissingWorksheetSnafu { path, worksheet })?
            .context(OpeningExcelSnafu { path })
    } else {
        workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path })
    }
}

// Numbers stay numbers, the validation decides what to do with the rest.
fn read_cell(cell: &DataType) -> Cell {
    match cell {
        DataType::Int(i) => Cell::Number(*i as f64),
        DataType::Float(f) => Cell::Number(*f),
        DataType::String(s) => Cell::Text(s.clone()),
        DataType::Bool(b) => Cell::Text(b.to_string()),
        DataType::Empty => Cell::Empty,
        other => Cell::Text(format!("{:?}", other)),
    }
}
