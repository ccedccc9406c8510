use regex::{Regex, RegexBuilder};

use super::bucket::{DifficultyRange, PositionRange};
use super::error::{AnalysisError, PatternSide, Result};
use super::model::{KeywordRecord, KeywordTable, columns};

// ---------------------------------------------------------------------------
// Range filters
// ---------------------------------------------------------------------------

/// Keep rows whose range labels are among the selected ones.
///
/// An empty selection leaves that axis unrestricted; when both axes are
/// active a row must match both. Rows of a table without the label column
/// never match an active axis.
pub fn apply_range_filters(
    table: &KeywordTable,
    position_ranges: &[PositionRange],
    kd_ranges: &[DifficultyRange],
) -> KeywordTable {
    let position_labels: Vec<&str> = position_ranges.iter().map(|r| r.label()).collect();
    let kd_labels: Vec<&str> = kd_ranges.iter().map(|r| r.label()).collect();

    let position_col = table.column_index(columns::POSITION_RANGE);
    let kd_col = table.column_index(columns::KD_RANGE);

    let keep = filtered_indices(table, |record| {
        label_selected(record, position_col, &position_labels)
            && label_selected(record, kd_col, &kd_labels)
    });
    table.select(&keep)
}

fn label_selected(record: &KeywordRecord, col: Option<usize>, selected: &[&str]) -> bool {
    if selected.is_empty() {
        return true;
    }
    match col.and_then(|c| record.get(c).as_str()) {
        Some(label) => selected.contains(&label),
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Keyword pattern filters
// ---------------------------------------------------------------------------

/// Keep rows whose keyword matches `include` and does not match `exclude`.
///
/// Both patterns are case-insensitive regex searches anywhere in the
/// keyword; empty patterns are ignored. A malformed pattern is reported as
/// [`AnalysisError::InvalidPattern`] and nothing is filtered; callers fall
/// back to the unfiltered table.
pub fn apply_keyword_filters(
    table: &KeywordTable,
    include: &str,
    exclude: &str,
) -> Result<KeywordTable> {
    let include = compile(include, PatternSide::Include)?;
    let exclude = compile(exclude, PatternSide::Exclude)?;
    if include.is_none() && exclude.is_none() {
        return Ok(table.clone());
    }

    let Some(col) = table.column_index(columns::KEYWORD) else {
        // Nothing to match against.
        return Ok(if include.is_some() {
            table.select(&[])
        } else {
            table.clone()
        });
    };

    let keep = filtered_indices(table, |record| {
        let keyword = record.keyword(col);
        include.as_ref().map_or(true, |re| re.is_match(&keyword))
            && !exclude.as_ref().is_some_and(|re| re.is_match(&keyword))
    });
    Ok(table.select(&keep))
}

fn compile(pattern: &str, side: PatternSide) -> Result<Option<Regex>> {
    if pattern.is_empty() {
        return Ok(None);
    }
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map(Some)
        .map_err(|e| AnalysisError::InvalidPattern {
            side,
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })
}

/// Return indices of rows that pass `predicate`.
fn filtered_indices<F>(table: &KeywordTable, mut predicate: F) -> Vec<usize>
where
    F: FnMut(&KeywordRecord) -> bool,
{
    table
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| predicate(record))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn ranked(rows: &[(&str, &str, &str)]) -> KeywordTable {
        let mut t = KeywordTable::new(vec![
            columns::KEYWORD.to_string(),
            columns::POSITION_RANGE.to_string(),
            columns::KD_RANGE.to_string(),
        ]);
        for (k, p, kd) in rows {
            t.push_record(vec![
                CellValue::Text(k.to_string()),
                CellValue::Text(p.to_string()),
                CellValue::Text(kd.to_string()),
            ]);
        }
        t
    }

    fn sample() -> KeywordTable {
        ranked(&[
            ("running shoes", "1-3", "0-15"),
            ("trail Shoes", "4-10", "46-55"),
            ("shoe laces", "51-100", "16-25"),
            ("boots", "Other", "Unknown"),
        ])
    }

    #[test]
    fn empty_selection_keeps_everything() {
        let table = sample();
        assert_eq!(apply_range_filters(&table, &[], &[]), table);
    }

    #[test]
    fn range_axes_are_conjunctive() {
        let table = sample();
        let only_position = apply_range_filters(
            &table,
            &[PositionRange::Top3, PositionRange::Top10],
            &[],
        );
        assert_eq!(only_position.keywords().unwrap(), vec!["running shoes", "trail Shoes"]);

        let both = apply_range_filters(
            &table,
            &[PositionRange::Top3, PositionRange::Top10],
            &[DifficultyRange::VeryEasy, DifficultyRange::Easy],
        );
        assert_eq!(both.keywords().unwrap(), vec!["running shoes"]);

        let sentinels = apply_range_filters(&table, &[PositionRange::Other], &[DifficultyRange::Unknown]);
        assert_eq!(sentinels.keywords().unwrap(), vec!["boots"]);
    }

    #[test]
    fn range_filter_is_idempotent() {
        let table = sample();
        let positions = [PositionRange::Top10, PositionRange::Top100];
        let kd = [DifficultyRange::Easy, DifficultyRange::Difficult];
        let once = apply_range_filters(&table, &positions, &kd);
        let twice = apply_range_filters(&once, &positions, &kd);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn tables_without_labels_fail_active_axes() {
        let mut ideas = KeywordTable::new(vec![columns::KEYWORD.to_string()]);
        ideas.push_record(vec![CellValue::Text("a".into())]);
        assert!(apply_range_filters(&ideas, &[PositionRange::Top3], &[]).is_empty());
        assert_eq!(apply_range_filters(&ideas, &[], &[]).len(), 1);
    }

    #[test]
    fn include_is_a_case_insensitive_search() {
        let filtered = apply_keyword_filters(&sample(), "SHOE", "").unwrap();
        assert_eq!(
            filtered.keywords().unwrap(),
            vec!["running shoes", "trail Shoes", "shoe laces"]
        );

        let anchored = apply_keyword_filters(&sample(), "^shoe", "").unwrap();
        assert_eq!(anchored.keywords().unwrap(), vec!["shoe laces"]);
    }

    #[test]
    fn include_and_exclude_combine() {
        let filtered = apply_keyword_filters(&sample(), "shoe", "trail|laces").unwrap();
        assert_eq!(filtered.keywords().unwrap(), vec!["running shoes"]);

        let excluded = apply_keyword_filters(&sample(), "", "shoes?").unwrap();
        assert_eq!(excluded.keywords().unwrap(), vec!["boots"]);
    }

    #[test]
    fn empty_patterns_are_a_no_op() {
        let table = sample();
        assert_eq!(apply_keyword_filters(&table, "", "").unwrap(), table);
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = apply_keyword_filters(&sample(), "(unclosed", "").unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InvalidPattern { side: PatternSide::Include, .. }
        ));

        let err = apply_keyword_filters(&sample(), "shoe", "[").unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InvalidPattern { side: PatternSide::Exclude, .. }
        ));
    }
}
