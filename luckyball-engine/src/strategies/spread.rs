use luckyball_db::models::{Drawing, Pool};

use super::hot::recent_slice;
use super::{Picker, numbers};
use crate::config::AnalyzerConfig;
use crate::stats::frequency;

pub const MAX_BUCKETS: usize = 5;

/// Index of the equal-width range `number` falls in.
pub fn bucket_of(number: u8, buckets: usize) -> usize {
    (number as usize - 1) * buckets / Pool::Main.size()
}

/// Best-frequency number from each range of 1..=48, then the hottest recent
/// number not yet chosen. Remaining slots take the next hot numbers.
pub fn jackpot_spread(window: &[Drawing], config: &AnalyzerConfig) -> ([u8; 5], u8) {
    let buckets = config.bucket_count.clamp(1, MAX_BUCKETS);
    let hot = frequency(window, Pool::Main).ranked();

    let mut leaders: Vec<Option<u8>> = vec![None; buckets];
    for &(number, _) in &hot {
        let slot = &mut leaders[bucket_of(number, buckets)];
        if slot.is_none() {
            *slot = Some(number);
        }
    }

    let recent = frequency(recent_slice(window, config), Pool::Main).ranked();

    let mut picker = Picker::new();
    picker
        .take(leaders.into_iter().flatten(), buckets)
        .take(numbers(&recent), 1);
    let main = picker.finish(numbers(&hot));

    let lucky = frequency(window, Pool::LuckyBall).most_frequent();
    (main, lucky)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{draw, make_test_draws, three_draws};

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(bucket_of(1, 4), 0);
        assert_eq!(bucket_of(12, 4), 0);
        assert_eq!(bucket_of(13, 4), 1);
        assert_eq!(bucket_of(36, 4), 2);
        assert_eq!(bucket_of(37, 4), 3);
        assert_eq!(bucket_of(48, 4), 3);
        assert_eq!(bucket_of(48, 5), 4);
        assert_eq!(bucket_of(48, 1), 0);
    }

    #[test]
    fn test_jackpot_spread_scenario() {
        let config = AnalyzerConfig::default();
        let (mut main, lucky) = jackpot_spread(&three_draws(), &config);
        main.sort_unstable();
        assert_eq!(main, [1, 2, 13, 25, 37]);
        assert_eq!(lucky, 1);
    }

    #[test]
    fn test_jackpot_spread_covers_every_bucket() {
        let config = AnalyzerConfig::default();
        let (main, _) = jackpot_spread(&make_test_draws(200), &config);
        for bucket in 0..4 {
            assert!(main.iter().any(|&n| bucket_of(n, 4) == bucket), "bucket {bucket}");
        }
    }

    #[test]
    fn test_recent_pick_comes_from_recent_window() {
        let mut window: Vec<_> = (0..10).map(|d| draw(d, [1, 13, 25, 37, 48], 2)).collect();
        window.push(draw(10, [20, 21, 22, 23, 24], 5));
        let config = AnalyzerConfig {
            recent_window: 1,
            ..Default::default()
        };
        let (mut main, lucky) = jackpot_spread(&window, &config);
        main.sort_unstable();
        assert_eq!(main, [1, 13, 20, 25, 37]);
        assert_eq!(lucky, 2);
    }
}
