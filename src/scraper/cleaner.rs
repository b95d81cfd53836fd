use crate::models::{MatchResult, Side};

use super::MatchRow;

/// Base-10, surrounding whitespace ignored. "4" → 4 | "04" → 4 | "4 (7)" → None
pub fn parse_score(s: &str) -> Option<u32> {
    s.trim().parse().ok()
}

fn present(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

/// Build a result from an accepted row. Rows missing either team name or
/// either score text yield `None`. A score that is present but not numeric
/// is kept as `None` inside the result rather than dropping the row.
pub fn extract<R: MatchRow + ?Sized>(row: &R) -> Option<MatchResult> {
    let home = present(row.participant(Side::Home))?;
    let away = present(row.participant(Side::Away))?;
    let home_score = present(row.score(Side::Home))?;
    let away_score = present(row.score(Side::Away))?;

    Some(MatchResult::new(
        home,
        away,
        parse_score(&home_score),
        parse_score(&away_score),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::testing::FakeRow;

    fn game(home: &str, away: &str, sh: &str, sa: &str) -> FakeRow {
        FakeRow::new("event__match--finished")
            .participants(home, away)
            .scores(sh, sa)
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("4"), Some(4));
        assert_eq!(parse_score(" 12 "), Some(12));
        assert_eq!(parse_score("04"), Some(4));
        assert_eq!(parse_score("-"), None);
        assert_eq!(parse_score("4 (7)"), None);
        assert_eq!(parse_score("-1"), None);
    }

    #[test]
    fn winner_follows_scores() {
        let away_win = extract(&game("A", "B", "3", "5")).unwrap();
        assert!(!away_win.winner_home);

        let home_win = extract(&game("A", "B", "5", "3")).unwrap();
        assert!(home_win.winner_home);
        assert_eq!(home_win.home_score, Some(5));
        assert_eq!(home_win.away_score, Some(3));

        let tie = extract(&game("A", "B", "4", "4")).unwrap();
        assert!(!tie.winner_home);
    }

    #[test]
    fn any_missing_field_drops_the_row() {
        assert!(extract(&game("", "B", "1", "0")).is_none());
        assert!(extract(&game("A", "  ", "1", "0")).is_none());
        assert!(extract(&game("A", "B", "", "0")).is_none());
        assert!(extract(&game("A", "B", "1", "")).is_none());
        assert!(extract(&FakeRow::new("event__match--finished")).is_none());
    }

    #[test]
    fn names_are_trimmed() {
        let result = extract(&game("  Tigers ", "Lions\n", "4", "2")).unwrap();
        assert_eq!(result.home, "Tigers");
        assert_eq!(result.away, "Lions");
    }

    #[test]
    fn non_numeric_score_is_kept_unparsed() {
        let result = extract(&game("A", "B", "7", "abd.")).unwrap();
        assert_eq!(result.home_score, Some(7));
        assert_eq!(result.away_score, None);
        assert!(!result.winner_home);
    }
}
