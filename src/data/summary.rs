use super::bucket::PositionRange;
use super::model::{KeywordTable, columns};

/// Headline numbers shown under each result table.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub count: usize,
    pub volume_total: f64,
}

/// Row count and `Volume` sum; non-numeric or missing volumes count as 0.
pub fn summarize(table: &KeywordTable) -> Summary {
    let volume_total = table
        .column_index(columns::VOLUME)
        .map(|col| {
            table
                .records()
                .iter()
                .filter_map(|r| r.get(col).as_f64())
                .filter(|v| v.is_finite())
                .sum::<f64>()
        })
        .unwrap_or(0.0);

    Summary {
        count: table.len(),
        volume_total,
    }
}

/// Rows per `Position Range` label, in ladder order.
///
/// Labels absent from the table count as 0, so the result always has one
/// entry per range.
pub fn range_distribution(table: &KeywordTable) -> Vec<(PositionRange, usize)> {
    let mut counts: Vec<(PositionRange, usize)> =
        PositionRange::ALL.iter().map(|&r| (r, 0)).collect();
    let Some(col) = table.column_index(columns::POSITION_RANGE) else {
        return counts;
    };
    for record in table.records() {
        let Some(range) = record.get(col).as_str().and_then(|s| s.parse::<PositionRange>().ok())
        else {
            continue;
        };
        if let Some(entry) = counts.iter_mut().find(|(r, _)| *r == range) {
            entry.1 += 1;
        }
    }
    counts
}
