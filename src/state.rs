use std::path::Path;

use anyhow::{Context, Result};

use crate::color::RangeColors;
use crate::config::AnalysisConfig;
use crate::data::bucket::{DifficultyRange, PositionRange};
use crate::data::export::to_delimited;
use crate::data::loader::RawFile;
use crate::data::pipeline::{AnalysisReport, FilterParams, ResultKind, run_analysis};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Analysis,
    Logs,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AnalysisConfig,

    /// Positions export picked by the user (None until opened).
    pub positions_file: Option<RawFile>,

    /// Keyword ideas exports, in the order they were picked.
    pub ideas_files: Vec<RawFile>,

    /// Range selections and per-table patterns.
    pub params: FilterParams,

    /// Output of the last run (None until a positions file is loaded).
    pub report: Option<AnalysisReport>,

    pub colors: RangeColors,

    pub tab: Tab,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl AppState {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            params: FilterParams::from_config(&config),
            config,
            positions_file: None,
            ideas_files: Vec::new(),
            report: None,
            colors: RangeColors::new(),
            tab: Tab::Analysis,
            status_message: None,
        }
    }

    /// Replace the positions export and rerun.
    pub fn set_positions_file(&mut self, file: RawFile) {
        self.positions_file = Some(file);
        self.recompute();
    }

    /// Replace the keyword ideas exports and rerun.
    pub fn set_ideas_files(&mut self, files: Vec<RawFile>) {
        self.ideas_files = files;
        self.recompute();
    }

    /// Forget all files and results; filter selections are kept.
    pub fn clear(&mut self) {
        self.positions_file = None;
        self.ideas_files.clear();
        self.report = None;
        self.status_message = None;
    }

    /// Run the whole pipeline again from the raw files.
    pub fn recompute(&mut self) {
        self.report = self
            .positions_file
            .as_ref()
            .map(|positions| run_analysis(positions, &self.ideas_files, &self.params, &self.config));
    }

    /// Toggle a single position range in the shared selection.
    pub fn toggle_position_range(&mut self, range: PositionRange) {
        toggle(&mut self.params.position_ranges, range);
        self.recompute();
    }

    pub fn toggle_kd_range(&mut self, range: DifficultyRange) {
        toggle(&mut self.params.kd_ranges, range);
        self.recompute();
    }

    /// Select every position range (`true`) or none (`false`).
    ///
    /// An empty selection does not restrict the axis at all.
    pub fn select_all_positions(&mut self, all: bool) {
        self.params.position_ranges = if all { PositionRange::ALL.to_vec() } else { Vec::new() };
        self.recompute();
    }

    pub fn select_all_kd(&mut self, all: bool) {
        self.params.kd_ranges = if all { DifficultyRange::ALL.to_vec() } else { Vec::new() };
        self.recompute();
    }

    /// Write one result table to `path` in the configured delimited format.
    pub fn export(&self, kind: ResultKind, path: &Path) -> Result<usize> {
        let report = self.report.as_ref().context("no analysis to export")?;
        let result = report.result(kind);
        let bytes = to_delimited(&result.table, self.config.delimiter_byte())?;
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        Ok(result.table.len())
    }
}

/// Add or remove `value`, keeping the selection in ladder order.
fn toggle<T: Ord + Copy>(selection: &mut Vec<T>, value: T) {
    if let Some(pos) = selection.iter().position(|v| *v == value) {
        selection.remove(pos);
    } else {
        selection.push(value);
        selection.sort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSITIONS: &str = "\
Keyword;Position;Search Volume;Keyword Difficulty;CPC;SERP Features by Keyword
shoes;2;100;10;0.5;
boots;30;50;40;0.7;
";

    fn loaded() -> AppState {
        let mut state = AppState::default();
        state.set_positions_file(RawFile::new("positions.csv", POSITIONS));
        state.set_ideas_files(vec![RawFile::new("ideas.csv", "Keyword;Volume\nSHOES;90\nsandals;40\n")]);
        state
    }

    #[test]
    fn starts_with_configured_ranges() {
        let state = AppState::default();
        assert_eq!(state.params.position_ranges, vec![PositionRange::Top3, PositionRange::Top10]);
        assert!(state.report.is_none());
    }

    #[test]
    fn loading_files_produces_a_report() {
        let state = loaded();
        let report = state.report.as_ref().unwrap();
        assert_eq!(report.missing.table.keywords().unwrap(), vec!["sandals"]);
        assert_eq!(report.common.table.keywords().unwrap(), vec!["shoes"]);
    }

    #[test]
    fn toggling_ranges_reruns() {
        let mut state = loaded();
        state.select_all_kd(false);
        state.toggle_position_range(PositionRange::Top50);
        assert_eq!(
            state.params.position_ranges,
            vec![PositionRange::Top3, PositionRange::Top10, PositionRange::Top50]
        );
        let report = state.report.as_ref().unwrap();
        assert_eq!(report.distribution.table.len(), 2);

        state.toggle_position_range(PositionRange::Top3);
        let report = state.report.as_ref().unwrap();
        assert_eq!(report.distribution.table.keywords().unwrap(), vec!["boots"]);
    }

    #[test]
    fn clear_forgets_files() {
        let mut state = loaded();
        state.clear();
        assert!(state.positions_file.is_none());
        assert!(state.ideas_files.is_empty());
        assert!(state.report.is_none());
    }

    #[test]
    fn export_without_report_fails() {
        let state = AppState::default();
        assert!(state
            .export(ResultKind::Missing, Path::new("missing.csv"))
            .is_err());
    }
}
