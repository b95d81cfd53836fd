use serde::{Deserialize, Serialize};

pub const UNKNOWN_COMPETITION: &str = "Unknown competition";

// ── Side ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}

// ── Match result ──────────────────────────────────────────────────────────────

/// One finished game. A score the site printed but that did not parse as a
/// base-10 integer is `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    pub home: String,
    pub away: String,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    /// `home_score > away_score`. A tie or an unparsed score leaves this
    /// false, so the away side is reported as the winner.
    pub winner_home: bool,
}

impl MatchResult {
    pub fn new(
        home: impl Into<String>,
        away: impl Into<String>,
        home_score: Option<u32>,
        away_score: Option<u32>,
    ) -> Self {
        let winner_home = matches!((home_score, away_score), (Some(h), Some(a)) if h > a);
        Self {
            home: home.into(),
            away: away.into(),
            home_score,
            away_score,
            winner_home,
        }
    }
}

// ── Competition bucket ────────────────────────────────────────────────────────

/// Everything one results page yielded, in page order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompetitionBucket {
    pub name: String,
    pub url: String,
    pub matches: Vec<MatchResult>,
}

impl CompetitionBucket {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            matches: Vec::new(),
        }
    }

    pub fn push(&mut self, result: MatchResult) {
        self.matches.push(result);
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
