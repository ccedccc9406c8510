use std::collections::HashSet;

use super::error::{AnalysisError, Result};
use super::events::EventLog;
use super::model::{KeywordTable, columns};

/// Ideas rows whose keyword (case-insensitively) has no positions row.
///
/// Rows keep the ideas columns and order. Case variants that survived the
/// case-sensitive ideas deduplication are all returned.
pub fn find_missing(
    positions: &KeywordTable,
    ideas: &KeywordTable,
    log: &mut EventLog,
) -> Result<KeywordTable> {
    log.info("Searching for missing keywords");
    let ranked = keyword_set(positions, "positions")?;
    let ideas_col = keyword_column(ideas, "ideas")?;

    let mut distinct: HashSet<String> = HashSet::new();
    let keep: Vec<usize> = ideas
        .records()
        .iter()
        .enumerate()
        .filter_map(|(i, r)| {
            let key = r.keyword_key(ideas_col);
            if ranked.contains(&key) {
                None
            } else {
                distinct.insert(key);
                Some(i)
            }
        })
        .collect();

    log.info(format!("{} missing keywords found", distinct.len()));
    Ok(ideas.select(&keep))
}

/// Positions rows whose keyword (case-insensitively) also appears in ideas.
///
/// Rows keep the positions columns and order, so the result carries rank
/// and difficulty rather than idea volume and source.
pub fn find_common(
    positions: &KeywordTable,
    ideas: &KeywordTable,
    log: &mut EventLog,
) -> Result<KeywordTable> {
    log.info("Searching for common keywords");
    let targeted = keyword_set(ideas, "ideas")?;
    let positions_col = keyword_column(positions, "positions")?;

    let mut distinct: HashSet<String> = HashSet::new();
    let keep: Vec<usize> = positions
        .records()
        .iter()
        .enumerate()
        .filter_map(|(i, r)| {
            let key = r.keyword_key(positions_col);
            if targeted.contains(&key) {
                distinct.insert(key);
                Some(i)
            } else {
                None
            }
        })
        .collect();

    log.info(format!("{} common keywords found", distinct.len()));
    Ok(positions.select(&keep))
}

fn keyword_column(table: &KeywordTable, which: &str) -> Result<usize> {
    table.column_index(columns::KEYWORD).ok_or_else(|| {
        AnalysisError::Reconciliation(format!(
            "{which} table has no '{}' column",
            columns::KEYWORD
        ))
    })
}

fn keyword_set(table: &KeywordTable, which: &str) -> Result<HashSet<String>> {
    let col = keyword_column(table, which)?;
    Ok(table.records().iter().map(|r| r.keyword_key(col)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn table(columns: &[&str], rows: &[&[&str]]) -> KeywordTable {
        let mut t = KeywordTable::new(columns.iter().map(|c| c.to_string()).collect());
        for row in rows {
            t.push_record(row.iter().map(|v| CellValue::infer(v)).collect());
        }
        t
    }

    fn keywords(t: &KeywordTable) -> Vec<String> {
        t.keywords().unwrap()
    }

    #[test]
    fn missing_and_common_partition_ideas() {
        let positions = table(&["Keyword", "Position"], &[&["a", "1"], &["b", "2"], &["c", "3"]]);
        let ideas = table(&["Keyword", "Source"], &[&["b", "x"], &["c", "x"], &["d", "x"]]);
        let mut log = EventLog::new();

        let missing = find_missing(&positions, &ideas, &mut log).unwrap();
        let common = find_common(&positions, &ideas, &mut log).unwrap();

        assert_eq!(keywords(&missing), vec!["d"]);
        assert_eq!(keywords(&common), vec!["b", "c"]);

        // Each ideas keyword is either missing or common, never both.
        for k in keywords(&ideas) {
            let in_missing = keywords(&missing).contains(&k);
            let in_common = keywords(&common).contains(&k);
            assert!(in_missing ^ in_common, "{k}");
        }
    }

    #[test]
    fn matching_ignores_case() {
        let positions = table(&["Keyword"], &[&["Shoes"]]);
        let ideas = table(&["Keyword"], &[&["shoes"], &["boots"]]);
        let mut log = EventLog::new();

        assert_eq!(keywords(&find_missing(&positions, &ideas, &mut log).unwrap()), vec!["boots"]);
        assert_eq!(keywords(&find_common(&positions, &ideas, &mut log).unwrap()), vec!["Shoes"]);
    }

    #[test]
    fn case_variants_all_survive_in_missing() {
        let positions = table(&["Keyword"], &[&["sandals"]]);
        let ideas = table(&["Keyword"], &[&["Boots"], &["boots"], &["sandals"]]);
        let missing = find_missing(&positions, &ideas, &mut EventLog::new()).unwrap();
        assert_eq!(keywords(&missing), vec!["Boots", "boots"]);
    }

    #[test]
    fn results_carry_their_source_columns() {
        let positions = table(&["Keyword", "Position"], &[&["a", "1"]]);
        let ideas = table(&["Keyword", "Source"], &[&["A", "ideas.csv"], &["z", "ideas.csv"]]);
        let mut log = EventLog::new();

        let common = find_common(&positions, &ideas, &mut log).unwrap();
        assert_eq!(common.columns(), positions.columns());
        assert_eq!(common.cell(0, "Position"), Some(&CellValue::Integer(1)));

        let missing = find_missing(&positions, &ideas, &mut log).unwrap();
        assert_eq!(missing.columns(), ideas.columns());
    }

    #[test]
    fn empty_inputs_give_empty_results() {
        let empty = table(&["Keyword"], &[]);
        let ideas = table(&["Keyword"], &[&["a"]]);
        let mut log = EventLog::new();

        assert_eq!(find_missing(&empty, &ideas, &mut log).unwrap().len(), 1);
        assert!(find_common(&empty, &ideas, &mut log).unwrap().is_empty());
        assert!(find_missing(&ideas, &empty, &mut log).unwrap().is_empty());
    }

    #[test]
    fn missing_keyword_column_is_a_reconciliation_error() {
        let positions = table(&["Term"], &[&["a"]]);
        let ideas = table(&["Keyword"], &[&["a"]]);
        let err = find_common(&positions, &ideas, &mut EventLog::new()).unwrap_err();
        assert!(matches!(err, AnalysisError::Reconciliation(_)));
    }
}
