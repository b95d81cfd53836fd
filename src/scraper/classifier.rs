use crate::dates::DateTokenSet;

use super::MatchRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classification {
    pub finished: bool,
    /// Only ever true for finished rows.
    pub date_matches: bool,
}

impl Classification {
    pub fn accepted(&self) -> bool {
        self.finished && self.date_matches
    }
}

/// Decides whether a row is a finished game played on the target day.
#[derive(Debug, Clone)]
pub struct RowClassifier {
    finished_marker: String,
    tokens: DateTokenSet,
}

impl RowClassifier {
    pub fn new(finished_marker: impl Into<String>, tokens: DateTokenSet) -> Self {
        Self {
            finished_marker: finished_marker.into(),
            tokens,
        }
    }

    /// Rows without the finished marker are rejected before any date text
    /// is read. For finished rows the row's own date is tried first, then
    /// the nearest day header above it.
    pub fn classify<R: MatchRow + ?Sized>(&self, row: &R) -> Classification {
        let finished = row
            .status()
            .is_some_and(|status| status.contains(self.finished_marker.as_str()));
        if !finished {
            return Classification::default();
        }

        let own = row.own_date_text().unwrap_or_default();
        if self.tokens.matches(&own) {
            return Classification {
                finished,
                date_matches: true,
            };
        }

        let header = row.header_date_text().unwrap_or_default();
        let haystack = format!("{own} {header}");
        Classification {
            finished,
            date_matches: self.tokens.matches(&haystack),
        }
    }
}
