use anyhow::Result;
use geobatch_core::entities::Table;
use std::io;

/// Read a table with a header row.
///
/// Every record must have as many fields as the header.
pub fn read_table<R: io::Read>(rdr: R, delimiter: u8) -> Result<Table> {
    let mut rdr = ::csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(rdr);
    let columns = rdr.headers()?.iter().map(ToString::to_string).collect();
    let rows = rdr
        .records()
        .map(|r| r.map(|r| r.iter().map(ToString::to_string).collect()))
        .collect::<Result<Vec<Vec<String>>, _>>()?;
    Ok(Table::new(columns, rows)?)
}

pub fn write_table<W: io::Write>(wtr: W, table: &Table, delimiter: u8) -> Result<()> {
    let mut wtr = ::csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(wtr);
    wtr.write_record(table.columns())?;
    for row in table.rows() {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}
