use std::fmt;

/// Canonical column names used by the loader and the downstream steps.
pub mod columns {
    pub const KEYWORD: &str = "Keyword";
    pub const POSITION: &str = "Position";
    pub const KEYWORD_DIFFICULTY: &str = "Keyword Difficulty";
    pub const VOLUME: &str = "Volume";
    pub const SOURCE: &str = "Source";
    pub const POSITION_RANGE: &str = "Position Range";
    pub const KD_RANGE: &str = "Keyword Difficulty Range";
}

// ---------------------------------------------------------------------------
// CellValue – a single cell of an exported report
// ---------------------------------------------------------------------------

/// A dynamically-typed cell, inferred per value at load time.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Infer the type of a raw field: empty → Null, then integer, float, text.
    pub fn infer(raw: &str) -> Self {
        let s = raw.trim();
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        CellValue::Text(raw.to_string())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

static NULL_CELL: CellValue = CellValue::Null;

// ---------------------------------------------------------------------------
// KeywordRecord – one row of a report
// ---------------------------------------------------------------------------

/// One row, aligned with the owning table's column list.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordRecord {
    pub values: Vec<CellValue>,
}

impl KeywordRecord {
    /// Cell at `col`, or Null when the row is shorter than the table.
    pub fn get(&self, col: usize) -> &CellValue {
        self.values.get(col).unwrap_or(&NULL_CELL)
    }

    /// Raw keyword text at `col` as stored.
    pub fn keyword(&self, col: usize) -> String {
        self.get(col).to_string()
    }

    /// Join key for case-insensitive matching.
    pub fn keyword_key(&self, col: usize) -> String {
        self.keyword(col).to_lowercase()
    }
}

// ---------------------------------------------------------------------------
// KeywordTable – an ordered, row-oriented report
// ---------------------------------------------------------------------------

/// A loaded (or derived) report: ordered columns plus rows.
///
/// Every filtering step builds a new table through [`KeywordTable::select`];
/// inputs are never mutated downstream of the loader.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordTable {
    columns: Vec<String>,
    records: Vec<KeywordRecord>,
}

impl KeywordTable {
    pub fn new(columns: Vec<String>) -> Self {
        KeywordTable {
            columns,
            records: Vec::new(),
        }
    }

    /// An empty table with no columns, returned when a step fails.
    pub fn empty() -> Self {
        KeywordTable::default()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[KeywordRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell lookup by row number and column name.
    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        let col = self.column_index(column)?;
        self.records.get(row).map(|r| r.get(col))
    }

    /// Append a row, padding with Null or truncating to the column count.
    pub fn push_record(&mut self, mut values: Vec<CellValue>) {
        values.resize(self.columns.len(), CellValue::Null);
        self.records.push(KeywordRecord { values });
    }

    /// Fill a derived column from each row, overwriting it when the
    /// column already exists and appending it otherwise.
    pub fn set_column<F>(&mut self, name: &str, mut derive: F)
    where
        F: FnMut(&KeywordRecord) -> CellValue,
    {
        match self.column_index(name) {
            Some(idx) => {
                for record in &mut self.records {
                    let value = derive(record);
                    record.values[idx] = value;
                }
            }
            None => {
                for record in &mut self.records {
                    let value = derive(record);
                    record.values.push(value);
                }
                self.columns.push(name.to_string());
            }
        }
    }

    /// Rename a column in place; returns whether it was present.
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        match self.column_index(from) {
            Some(idx) => {
                self.columns[idx] = to.to_string();
                true
            }
            None => false,
        }
    }

    /// Copy the rows at `indices` (in the given order) into a new table.
    pub fn select(&self, indices: &[usize]) -> KeywordTable {
        KeywordTable {
            columns: self.columns.clone(),
            records: indices
                .iter()
                .filter_map(|&i| self.records.get(i).cloned())
                .collect(),
        }
    }

    /// Raw keyword text of every row, or `None` without a `Keyword` column.
    pub fn keywords(&self) -> Option<Vec<String>> {
        let col = self.column_index(columns::KEYWORD)?;
        Some(self.records.iter().map(|r| r.keyword(col)).collect())
    }
}
