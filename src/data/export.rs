use anyhow::{Context, Result, anyhow};

use super::model::KeywordTable;

/// Serialize a result table with a header row; null cells become empty.
pub fn to_delimited(table: &KeywordTable, delimiter: u8) -> Result<Vec<u8>> {
    if table.columns().is_empty() {
        return Ok(Vec::new());
    }
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer
        .write_record(table.columns())
        .context("writing header row")?;
    for (row_no, record) in table.records().iter().enumerate() {
        writer
            .write_record(record.values.iter().map(|v| v.to_string()))
            .with_context(|| format!("writing row {}", row_no + 1))?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow!("flushing CSV output: {}", e.error()))
}
