//! Scenario table export as delimited text.
//!
//! Rounding to two decimals happens here, at presentation time; the table
//! itself always carries full-precision values.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use hillval_core::model::ScenarioTable;

const HEADER: &str = "Cutoff,Production,Avg NPV,Avg Life,CAPEX";

/// Write one row per cell, in table order.
pub fn write_table<W: Write>(writer: &mut W, table: &ScenarioTable) -> io::Result<()> {
    writeln!(writer, "{HEADER}")?;
    for cell in &table.cells {
        writeln!(
            writer,
            "{:.2},{:.2},{:.2},{:.2},{:.2}",
            cell.cutoff, cell.production, cell.avg_npv, cell.avg_mine_life_years, cell.avg_capex
        )?;
    }
    Ok(())
}

/// Write the table to a file, creating or truncating it.
pub fn export_table(path: &Path, table: &ScenarioTable) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_table(&mut writer, table)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hillval_core::model::ScenarioCell;

    fn sample_table() -> ScenarioTable {
        ScenarioTable::new(vec![ScenarioCell {
            cutoff: 0.5,
            production: 4.0,
            avg_npv: -1302.456789,
            avg_mine_life_years: 203.0625,
            avg_capex: 1600.0,
        }])
    }

    #[test]
    fn test_rounding_applied_at_write_time() {
        let mut out = Vec::new();
        write_table(&mut out, &sample_table()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(HEADER));
        assert_eq!(lines.next(), Some("0.50,4.00,-1302.46,203.06,1600.00"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hill_of_value_output.csv");
        export_table(&path, &sample_table()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with(HEADER));
        assert_eq!(text.lines().count(), 2);
    }
}
