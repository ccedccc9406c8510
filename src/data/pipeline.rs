use crate::config::AnalysisConfig;

use super::bucket::{DifficultyRange, PositionRange};
use super::error::{AnalysisError, Result};
use super::events::EventLog;
use super::filter::{apply_keyword_filters, apply_range_filters};
use super::loader::{RawFile, load_ideas, load_positions};
use super::model::KeywordTable;
use super::reconcile::{find_common, find_missing};
use super::summary::{Summary, summarize};

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Free-text include / exclude regexes attached to one result table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordPatterns {
    pub include: String,
    pub exclude: String,
}

/// Everything the user can change between runs.
///
/// The range selections are shared by the common and distribution tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterParams {
    pub position_ranges: Vec<PositionRange>,
    pub kd_ranges: Vec<DifficultyRange>,
    pub missing: KeywordPatterns,
    pub common: KeywordPatterns,
    pub distribution: KeywordPatterns,
}

impl FilterParams {
    /// Initial selections from the configuration, no patterns.
    pub fn from_config(config: &AnalysisConfig) -> Self {
        FilterParams {
            position_ranges: config.default_position_ranges.clone(),
            kd_ranges: config.default_kd_ranges.clone(),
            ..Default::default()
        }
    }

    pub fn patterns_mut(&mut self, kind: ResultKind) -> &mut KeywordPatterns {
        match kind {
            ResultKind::Missing => &mut self.missing,
            ResultKind::Common => &mut self.common,
            ResultKind::Distribution => &mut self.distribution,
        }
    }
}

// ---------------------------------------------------------------------------
// Step outcome
// ---------------------------------------------------------------------------

/// A table that is always usable, plus the error recovered to produce it.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub table: KeywordTable,
    pub error: Option<AnalysisError>,
}

impl StepOutcome {
    /// Keep the table on success, use `fallback` on failure.
    pub fn recover(result: Result<KeywordTable>, fallback: impl FnOnce() -> KeywordTable) -> Self {
        match result {
            Ok(table) => StepOutcome { table, error: None },
            Err(e) => StepOutcome {
                table: fallback(),
                error: Some(e),
            },
        }
    }

    /// Move the error (if any) into the run's messages and log.
    fn settle(self, messages: &mut Vec<AnalysisError>, log: &mut EventLog) -> KeywordTable {
        if let Some(e) = self.error {
            if e.is_warning() {
                log.warn(e.to_string());
            } else {
                log.error(e.to_string());
            }
            messages.push(e);
        }
        self.table
    }
}

/// Keyword pattern filtering that falls back to the unfiltered table.
pub fn filter_keywords_fail_open(table: &KeywordTable, patterns: &KeywordPatterns) -> StepOutcome {
    StepOutcome::recover(
        apply_keyword_filters(table, &patterns.include, &patterns.exclude),
        || table.clone(),
    )
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// The three tables offered for review and download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Missing,
    Common,
    Distribution,
}

impl ResultKind {
    pub const ALL: [ResultKind; 3] = [ResultKind::Missing, ResultKind::Common, ResultKind::Distribution];

    pub fn title(self) -> &'static str {
        match self {
            ResultKind::Missing => "Missing keywords",
            ResultKind::Common => "Common keywords",
            ResultKind::Distribution => "Positions by range",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ResultKind::Missing => "missing_keywords.csv",
            ResultKind::Common => "common_keywords.csv",
            ResultKind::Distribution => "filtered_keywords.csv",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    pub kind: ResultKind,
    pub table: KeywordTable,
    pub summary: Summary,
}

impl ResultTable {
    fn new(kind: ResultKind, table: KeywordTable) -> Self {
        let summary = summarize(&table);
        ResultTable { kind, table, summary }
    }
}

/// Output of one full run.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub positions: KeywordTable,
    pub ideas: KeywordTable,
    pub missing: ResultTable,
    pub common: ResultTable,
    pub distribution: ResultTable,
    /// Errors and warnings recovered during the run, in order.
    pub messages: Vec<AnalysisError>,
    pub log: EventLog,
}

impl AnalysisReport {
    pub fn result(&self, kind: ResultKind) -> &ResultTable {
        match kind {
            ResultKind::Missing => &self.missing,
            ResultKind::Common => &self.common,
            ResultKind::Distribution => &self.distribution,
        }
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Run load → reconcile → filter → summarize from scratch.
///
/// Every step error is recovered where it happens; the report always holds
/// three tables, possibly empty.
pub fn run_analysis(
    positions_file: &RawFile,
    ideas_files: &[RawFile],
    params: &FilterParams,
    config: &AnalysisConfig,
) -> AnalysisReport {
    let mut log = EventLog::new();
    let mut messages = Vec::new();

    let positions = StepOutcome::recover(
        load_positions(positions_file, config, &mut log),
        KeywordTable::empty,
    )
    .settle(&mut messages, &mut log);
    let ideas = StepOutcome::recover(load_ideas(ideas_files, config, &mut log), KeywordTable::empty)
        .settle(&mut messages, &mut log);

    if positions.is_empty() || ideas.is_empty() {
        log.warn("Nothing to reconcile: positions or ideas table is empty");
        let empty = |kind| ResultTable::new(kind, KeywordTable::empty());
        return AnalysisReport {
            positions,
            ideas,
            missing: empty(ResultKind::Missing),
            common: empty(ResultKind::Common),
            distribution: empty(ResultKind::Distribution),
            messages,
            log,
        };
    }

    let missing = StepOutcome::recover(find_missing(&positions, &ideas, &mut log), KeywordTable::empty)
        .settle(&mut messages, &mut log);
    let missing = filter_keywords_fail_open(&missing, &params.missing).settle(&mut messages, &mut log);

    let common = StepOutcome::recover(find_common(&positions, &ideas, &mut log), KeywordTable::empty)
        .settle(&mut messages, &mut log);
    let common = apply_range_filters(&common, &params.position_ranges, &params.kd_ranges);
    let common = filter_keywords_fail_open(&common, &params.common).settle(&mut messages, &mut log);

    let distribution = apply_range_filters(&positions, &params.position_ranges, &params.kd_ranges);
    let distribution =
        filter_keywords_fail_open(&distribution, &params.distribution).settle(&mut messages, &mut log);

    AnalysisReport {
        missing: ResultTable::new(ResultKind::Missing, missing),
        common: ResultTable::new(ResultKind::Common, common),
        distribution: ResultTable::new(ResultKind::Distribution, distribution),
        positions,
        ideas,
        messages,
        log,
    }
}
