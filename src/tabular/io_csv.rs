// Primitives for reading and writing CSV files.

use snafu::prelude::*;

use crate::tabular::{io_common::read_text_file, *};

pub fn read_csv_table(path: &str, delimiter: u8) -> CliResult<RawTable> {
    let text = read_text_file(path)?;
    parse_csv_table(path, &text, delimiter)
}

/// Parses delimited text with a header row. All the cells are kept as text.
pub fn parse_csv_table(path: &str, text: &str, delimiter: u8) -> CliResult<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let header: Vec<String> = rdr
        .headers()
        .context(CsvReadSnafu { path, lineno: 1usize })?
        .iter()
        .map(|s| s.to_string())
        .collect();
    debug!("parse_csv_table: header: {:?}", header);

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvReadSnafu { path, lineno })?;
        debug!("parse_csv_table: lineno: {:?} row: {:?}", lineno, line);
        rows.push(line.iter().map(|s| Cell::Text(s.to_string())).collect());
    }
    Ok(RawTable { header, rows })
}

pub fn write_result_table(path: &str, table: &ResultTable, delimiter: u8) -> CliResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .context(CsvWriteSnafu { path })?;
    wtr.write_record(&table.header)
        .context(CsvWriteSnafu { path })?;
    for row in table.rows.iter() {
        wtr.write_record(row).context(CsvWriteSnafu { path })?;
    }
    wtr.flush().context(WritingOutputSnafu { path })?;
    info!("write_result_table: {} rows written to {:?}", table.rows.len(), path);
    Ok(())
}
