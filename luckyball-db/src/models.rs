use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const MAIN_MAX: u8 = 48;
pub const LUCKY_BALL_MAX: u8 = 18;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drawing {
    pub date: NaiveDate,
    /// Main numbers in the left-to-right order of the source row.
    pub main: [u8; 5],
    pub lucky_ball: u8,
}

impl Drawing {
    pub fn new(date: NaiveDate, main: [u8; 5], lucky_ball: u8) -> Self {
        Self {
            date,
            main,
            lucky_ball,
        }
    }

    /// Compare a pick against this drawing.
    pub fn matches(&self, main: &[u8; 5], lucky_ball: u8) -> MatchOutcome {
        let main_matches = main.iter().filter(|n| self.main.contains(n)).count() as u8;
        MatchOutcome {
            main_matches,
            lucky_match: lucky_ball == self.lucky_ball,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub main_matches: u8,
    pub lucky_match: bool,
}

impl std::fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.lucky_match {
            write!(f, "{}+LB", self.main_matches)
        } else {
            write!(f, "{}", self.main_matches)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pool {
    Main,
    LuckyBall,
}

impl Pool {
    pub fn size(&self) -> usize {
        match self {
            Pool::Main => MAIN_MAX as usize,
            Pool::LuckyBall => LUCKY_BALL_MAX as usize,
        }
    }

    pub fn pick_count(&self) -> usize {
        match self {
            Pool::Main => 5,
            Pool::LuckyBall => 1,
        }
    }

    pub fn numbers_from<'a>(&self, draw: &'a Drawing) -> &'a [u8] {
        match self {
            Pool::Main => &draw.main,
            Pool::LuckyBall => std::slice::from_ref(&draw.lucky_ball),
        }
    }

    pub fn contains(&self, number: u8) -> bool {
        number >= 1 && number as usize <= self.size()
    }
}

impl std::fmt::Display for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pool::Main => write!(f, "main"),
            Pool::LuckyBall => write!(f, "lucky ball"),
        }
    }
}

/// Check ranges and uniqueness of a pick. The error is a human readable reason.
pub fn validate_draw(main: &[u8; 5], lucky_ball: u8) -> Result<(), String> {
    for &n in main {
        if !Pool::Main.contains(n) {
            return Err(format!("number {} out of range (1-{})", n, MAIN_MAX));
        }
    }
    if !Pool::LuckyBall.contains(lucky_ball) {
        return Err(format!(
            "lucky ball {} out of range (1-{})",
            lucky_ball, LUCKY_BALL_MAX
        ));
    }
    for i in 0..main.len() {
        for j in (i + 1)..main.len() {
            if main[i] == main[j] {
                return Err(format!("duplicate number {}", main[i]));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_validate_draw_ok() {
        assert!(validate_draw(&[1, 2, 3, 4, 5], 1).is_ok());
        assert!(validate_draw(&[48, 47, 46, 45, 44], 18).is_ok());
    }

    #[test]
    fn test_validate_draw_main_out_of_range() {
        assert!(validate_draw(&[0, 2, 3, 4, 5], 1).is_err());
        assert!(validate_draw(&[1, 2, 3, 4, 49], 1).is_err());
    }

    #[test]
    fn test_validate_draw_lucky_out_of_range() {
        assert!(validate_draw(&[1, 2, 3, 4, 5], 0).is_err());
        let err = validate_draw(&[1, 2, 3, 4, 5], 19).unwrap_err();
        assert!(err.contains("lucky ball 19"));
    }

    #[test]
    fn test_validate_draw_duplicate() {
        let err = validate_draw(&[7, 1, 7, 4, 5], 3).unwrap_err();
        assert_eq!(err, "duplicate number 7");
    }

    #[test]
    fn test_pool_size() {
        assert_eq!(Pool::Main.size(), 48);
        assert_eq!(Pool::LuckyBall.size(), 18);
        assert_eq!(Pool::Main.pick_count(), 5);
        assert_eq!(Pool::LuckyBall.pick_count(), 1);
    }

    #[test]
    fn test_pool_numbers_from() {
        let draw = Drawing::new(date(2024, 1, 1), [5, 1, 2, 3, 4], 9);
        assert_eq!(Pool::Main.numbers_from(&draw), &[5, 1, 2, 3, 4]);
        assert_eq!(Pool::LuckyBall.numbers_from(&draw), &[9]);
    }

    #[test]
    fn test_matches() {
        let draw = Drawing::new(date(2024, 1, 1), [1, 2, 3, 4, 5], 6);
        let outcome = draw.matches(&[5, 4, 10, 11, 12], 6);
        assert_eq!(outcome.main_matches, 2);
        assert!(outcome.lucky_match);
        assert_eq!(outcome.to_string(), "2+LB");

        let miss = draw.matches(&[20, 21, 22, 23, 24], 1);
        assert_eq!(miss.main_matches, 0);
        assert!(!miss.lucky_match);
    }

    #[test]
    fn test_matches_bounded_by_five() {
        let draw = Drawing::new(date(2024, 1, 1), [1, 2, 3, 4, 5], 6);
        assert_eq!(draw.matches(&[1, 2, 3, 4, 5], 6).main_matches, 5);
    }
}
