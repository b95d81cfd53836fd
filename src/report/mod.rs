//! Markdown recap rendering.

use crate::dates::TargetDay;
use crate::models::{CompetitionBucket, MatchResult};
use std::cmp::Ordering;
use std::fmt::Write;

const WIN: &str = "(W)";
const LOSS: &str = "(L)";

/// Render the daily recap. Empty buckets are left out, the rest are ordered
/// by competition name. The output is trimmed and ends in exactly one
/// newline.
pub fn build_report(buckets: &[CompetitionBucket], day: TargetDay) -> String {
    let mut sorted: Vec<&CompetitionBucket> = buckets.iter().filter(|b| !b.is_empty()).collect();
    sorted.sort_by(|a, b| collate(&a.name, &b.name));

    let mut md = format!("Daily Recap – {}\n\n", day.label());
    for bucket in sorted {
        let _ = writeln!(md, "### {}", bucket.name);
        for m in &bucket.matches {
            let _ = writeln!(md, "{}", match_line(m));
        }
        md.push('\n');
    }

    format!("{}\n", md.trim())
}

/// `**Tigers (W)** – Lions (L) Final score: 4–2`
pub fn match_line(m: &MatchResult) -> String {
    let score = format!("{}–{}", fmt_score(m.home_score), fmt_score(m.away_score));
    if m.winner_home {
        format!("**{} {WIN}** – {} {LOSS} Final score: {score}", m.home, m.away)
    } else {
        format!("{} {LOSS} – **{} {WIN}** Final score: {score}", m.home, m.away)
    }
}

fn fmt_score(score: Option<u32>) -> String {
    score.map_or_else(|| "NaN".to_string(), |s| s.to_string())
}

/// Human ordering for competition names: case and common Latin accents are
/// ignored first, the raw string breaks ties.
pub fn collate(a: &str, b: &str) -> Ordering {
    let key = |s: &str| s.chars().flat_map(char::to_lowercase).map(fold_accent).collect::<String>();
    key(a).cmp(&key(b)).then_with(|| a.cmp(b))
}

fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}
