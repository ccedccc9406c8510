use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use anyhow::Context;

use crate::config::AnalysisConfig;

use super::bucket::{DifficultyRange, PositionRange};
use super::error::{AnalysisError, Result};
use super::events::EventLog;
use super::model::{CellValue, KeywordTable, columns};

// ---------------------------------------------------------------------------
// Raw input
// ---------------------------------------------------------------------------

/// File contents handed over by the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFile {
    /// Display name; becomes the `Source` of idea rows.
    pub name: String,
    pub bytes: Vec<u8>,
}

impl RawFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        RawFile {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a picked file wholesale, named after its file name.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(RawFile { name, bytes })
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load an organic positions export.
///
/// Columns are renamed to their canonical names and the two range-label
/// columns are appended. `Position` and `Keyword Difficulty` must exist and
/// every non-empty cell in them must be numeric; empty cells bucket to the
/// `Other` / `Unknown` sentinels.
pub fn load_positions(
    raw: &RawFile,
    config: &AnalysisConfig,
    log: &mut EventLog,
) -> Result<KeywordTable> {
    log.info(format!("Loading positions file: {}", raw.name));

    let mut table = parse_table(raw, config.delimiter_byte())?;
    apply_renames(&mut table, &config.column_renames);

    let position_col = require_numeric_column(&table, &raw.name, columns::POSITION)?;
    let kd_col = require_numeric_column(&table, &raw.name, columns::KEYWORD_DIFFICULTY)?;

    table.set_column(columns::POSITION_RANGE, |r| {
        label_cell(PositionRange::from_cell(r.get(position_col)).label())
    });
    table.set_column(columns::KD_RANGE, |r| {
        label_cell(DifficultyRange::from_cell(r.get(kd_col)).label())
    });

    log.info(format!(
        "Loaded {} with {} rows and {} columns",
        raw.name,
        table.len(),
        table.columns().len()
    ));
    Ok(table)
}

/// Merge one or more keyword ideas exports.
///
/// Each row is tagged with its file name in `Source`; files are concatenated
/// in the given order and duplicate keywords (exact, case-sensitive text)
/// keep their first occurrence. Unreadable files are reported and skipped.
pub fn load_ideas(
    raws: &[RawFile],
    config: &AnalysisConfig,
    log: &mut EventLog,
) -> Result<KeywordTable> {
    if raws.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let mut parsed = Vec::with_capacity(raws.len());
    for raw in raws {
        log.info(format!("Loading keyword ideas file: {}", raw.name));
        let table = parse_table(raw, config.delimiter_byte()).and_then(|t| {
            match t.column_index(columns::KEYWORD) {
                Some(_) => Ok(t),
                None => Err(AnalysisError::load(
                    &raw.name,
                    format!("missing required column '{}'", columns::KEYWORD),
                )),
            }
        });
        match table {
            Ok(mut table) => {
                apply_renames(&mut table, &config.column_renames);
                table.set_column(columns::SOURCE, |_| CellValue::Text(raw.name.clone()));
                parsed.push(table);
            }
            Err(e) => log.error(e.to_string()),
        }
    }

    if parsed.is_empty() {
        return Err(AnalysisError::load(
            "keyword ideas",
            "none of the supplied files could be read",
        ));
    }

    let combined = concat_tables(&parsed);
    let before = combined.len();
    let deduped = dedup_by_keyword(&combined);
    log.info(format!(
        "Combined ideas files: {before} rows before deduplication, {} after",
        deduped.len()
    ));
    Ok(deduped)
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse delimited text with a header row into a table.
///
/// The `Keyword` column is kept as raw text; every other cell has its type
/// inferred. Rows with a different field count than the header are rejected.
fn parse_table(raw: &RawFile, delimiter: u8) -> Result<KeywordTable> {
    let bytes = raw
        .bytes
        .strip_prefix(b"\xEF\xBB\xBF".as_slice())
        .unwrap_or(&raw.bytes);
    let text = std::str::from_utf8(bytes)
        .map_err(|e| AnalysisError::load(&raw.name, format!("file is not valid UTF-8: {e}")))?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AnalysisError::load(&raw.name, format!("reading header row: {e}")))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(AnalysisError::load(&raw.name, "missing header row"));
    }

    let keyword_idx = headers.iter().position(|h| h == columns::KEYWORD);
    let mut table = KeywordTable::new(headers);

    for (row_no, result) in reader.records().enumerate() {
        let record = result
            .map_err(|e| AnalysisError::load(&raw.name, format!("row {}: {e}", row_no + 1)))?;
        let values = record
            .iter()
            .enumerate()
            .map(|(i, value)| {
                if Some(i) == keyword_idx {
                    CellValue::Text(value.to_string())
                } else {
                    CellValue::infer(value)
                }
            })
            .collect();
        table.push_record(values);
    }

    Ok(table)
}

fn apply_renames(table: &mut KeywordTable, renames: &BTreeMap<String, String>) {
    for (from, to) in renames {
        table.rename_column(from, to);
    }
}

fn require_numeric_column(table: &KeywordTable, file: &str, name: &str) -> Result<usize> {
    let col = table
        .column_index(name)
        .ok_or_else(|| AnalysisError::load(file, format!("missing required column '{name}'")))?;

    for (row_no, record) in table.records().iter().enumerate() {
        if let CellValue::Text(value) = record.get(col) {
            return Err(AnalysisError::load(
                file,
                format!("row {}: '{name}' value '{value}' is not numeric", row_no + 1),
            ));
        }
    }
    Ok(col)
}

fn label_cell(label: &str) -> CellValue {
    CellValue::Text(label.to_string())
}

// ---------------------------------------------------------------------------
// Merging
// ---------------------------------------------------------------------------

/// Concatenate tables over the union of their columns (first-seen order).
fn concat_tables(tables: &[KeywordTable]) -> KeywordTable {
    let mut union: Vec<String> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for table in tables {
        for col in table.columns() {
            if !positions.contains_key(col) {
                positions.insert(col.clone(), union.len());
                union.push(col.clone());
            }
        }
    }

    let width = union.len();
    let mut combined = KeywordTable::new(union);
    for table in tables {
        let mapping: Vec<usize> = table.columns().iter().map(|c| positions[c]).collect();
        for record in table.records() {
            let mut values = vec![CellValue::Null; width];
            for (src, &dst) in mapping.iter().enumerate() {
                values[dst] = record.get(src).clone();
            }
            combined.push_record(values);
        }
    }
    combined
}

/// Keep the first row for each exact keyword text.
fn dedup_by_keyword(table: &KeywordTable) -> KeywordTable {
    let Some(col) = table.column_index(columns::KEYWORD) else {
        return table.clone();
    };
    let mut seen: HashSet<String> = HashSet::with_capacity(table.len());
    let keep: Vec<usize> = table
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| seen.insert(r.keyword(col)))
        .map(|(i, _)| i)
        .collect();
    table.select(&keep)
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSITIONS: &str = "\
Keyword;Position;Search Volume;Keyword Difficulty;CPC;SERP Features by Keyword
running shoes;2;5400;48;1.2;Sitelinks
trail shoes;;900;12;0.8;
shoe laces;57;300;70;0.1;Video
";

    fn config() -> AnalysisConfig {
        AnalysisConfig::default()
    }

    #[test]
    fn positions_are_renamed_and_bucketed() {
        let mut log = EventLog::new();
        let table = load_positions(&RawFile::new("positions.csv", POSITIONS), &config(), &mut log)
            .unwrap();

        assert_eq!(table.len(), 3);
        assert!(table.column_index("Volume").is_some());
        assert!(table.column_index("CPC (USD)").is_some());
        assert!(table.column_index("SERP Features").is_some());
        assert!(table.column_index("Search Volume").is_none());

        let range = |row, col| table.cell(row, col).and_then(|c| c.as_str()).map(String::from);
        assert_eq!(range(0, columns::POSITION_RANGE).as_deref(), Some("1-3"));
        assert_eq!(range(0, columns::KD_RANGE).as_deref(), Some("46-55"));
        assert_eq!(range(1, columns::POSITION_RANGE).as_deref(), Some("Other"));
        assert_eq!(range(1, columns::KD_RANGE).as_deref(), Some("0-15"));
        assert_eq!(range(2, columns::POSITION_RANGE).as_deref(), Some("51-100"));
        assert_eq!(range(2, columns::KD_RANGE).as_deref(), Some(">65"));
        assert!(!log.is_empty());
    }

    #[test]
    fn every_positions_row_gets_labels() {
        let table =
            load_positions(&RawFile::new("p.csv", POSITIONS), &config(), &mut EventLog::new())
                .unwrap();
        for row in 0..table.len() {
            assert!(!table.cell(row, columns::POSITION_RANGE).unwrap().is_null());
            assert!(!table.cell(row, columns::KD_RANGE).unwrap().is_null());
        }
    }

    #[test]
    fn keyword_column_stays_text() {
        let raw = RawFile::new("p.csv", "Keyword;Position;Keyword Difficulty\n404;1;10\n");
        let table = load_positions(&raw, &config(), &mut EventLog::new()).unwrap();
        assert_eq!(table.cell(0, "Keyword"), Some(&CellValue::Text("404".into())));
    }

    #[test]
    fn missing_position_column_is_a_load_error() {
        let raw = RawFile::new("p.csv", "Keyword;Keyword Difficulty\nshoes;10\n");
        let err = load_positions(&raw, &config(), &mut EventLog::new()).unwrap_err();
        assert!(matches!(err, AnalysisError::Load { .. }));
        assert!(err.to_string().contains("Position"));
    }

    #[test]
    fn non_numeric_difficulty_is_a_load_error() {
        let raw = RawFile::new("p.csv", "Keyword;Position;Keyword Difficulty\nshoes;1;hard\n");
        let err = load_positions(&raw, &config(), &mut EventLog::new()).unwrap_err();
        assert!(err.to_string().contains("not numeric"));
    }

    #[test]
    fn ragged_rows_and_bad_encoding_fail() {
        let ragged = RawFile::new("p.csv", "Keyword;Position;Keyword Difficulty\nshoes;1\n");
        assert!(load_positions(&ragged, &config(), &mut EventLog::new()).is_err());

        let latin1 = RawFile::new("p.csv", b"Keyword;Position;Keyword Difficulty\nchauss\xE9es;1;2\n".to_vec());
        assert!(load_positions(&latin1, &config(), &mut EventLog::new()).is_err());
    }

    #[test]
    fn byte_order_mark_is_ignored() {
        let mut bytes = b"\xEF\xBB\xBF".to_vec();
        bytes.extend_from_slice(POSITIONS.as_bytes());
        let table = load_positions(&RawFile::new("p.csv", bytes), &config(), &mut EventLog::new())
            .unwrap();
        assert_eq!(table.columns()[0], "Keyword");
    }

    #[test]
    fn ideas_without_files_is_empty_input() {
        let err = load_ideas(&[], &config(), &mut EventLog::new()).unwrap_err();
        assert_eq!(err, AnalysisError::EmptyInput);
    }

    #[test]
    fn duplicate_ideas_keep_first_source() {
        let first = RawFile::new("first.csv", "Keyword;Volume\nrunning shoes;100\nsandals;20\n");
        let second = RawFile::new("second.csv", "Keyword;Volume\nrunning shoes;999\nRunning Shoes;5\n");
        let ideas = load_ideas(&[first, second], &config(), &mut EventLog::new()).unwrap();

        assert_eq!(
            ideas.keywords().unwrap(),
            vec!["running shoes", "sandals", "Running Shoes"]
        );
        assert_eq!(ideas.cell(0, "Source"), Some(&CellValue::Text("first.csv".into())));
        assert_eq!(ideas.cell(0, "Volume"), Some(&CellValue::Integer(100)));
        assert_eq!(ideas.cell(2, "Source"), Some(&CellValue::Text("second.csv".into())));
    }

    #[test]
    fn ideas_columns_are_unioned() {
        let first = RawFile::new("a.csv", "Keyword;Volume\nshoes;10\n");
        let second = RawFile::new("b.csv", "Keyword;Intent;Volume\nboots;commercial;30\n");
        let ideas = load_ideas(&[first, second], &config(), &mut EventLog::new()).unwrap();

        assert_eq!(ideas.columns(), &["Keyword", "Volume", "Source", "Intent"]);
        assert_eq!(ideas.cell(0, "Intent"), Some(&CellValue::Null));
        assert_eq!(ideas.cell(1, "Volume"), Some(&CellValue::Integer(30)));
    }

    #[test]
    fn unreadable_ideas_file_is_skipped() {
        let good = RawFile::new("good.csv", "Keyword;Volume\nshoes;10\n");
        let bad = RawFile::new("bad.csv", "Term;Volume\nshoes;10\n");
        let mut log = EventLog::new();
        let ideas = load_ideas(&[bad, good], &config(), &mut log).unwrap();

        assert_eq!(ideas.len(), 1);
        assert!(log.events().iter().any(|e| e.level == log::Level::Error));

        let only_bad = RawFile::new("bad.csv", "Term;Volume\nshoes;10\n");
        assert!(matches!(
            load_ideas(&[only_bad], &config(), &mut EventLog::new()),
            Err(AnalysisError::Load { .. })
        ));
    }

    #[test]
    fn ideas_search_volume_is_renamed() {
        let raw = RawFile::new("ideas.csv", "Keyword;Search Volume\nshoes;10\n");
        let ideas = load_ideas(&[raw], &config(), &mut EventLog::new()).unwrap();
        assert_eq!(ideas.cell(0, "Volume"), Some(&CellValue::Integer(10)));
    }
}
