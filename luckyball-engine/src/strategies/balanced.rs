use luckyball_db::models::{Drawing, Pool};

use super::hot::recent_slice;
use super::{Picker, numbers};
use crate::config::AnalyzerConfig;
use crate::stats::{frequency, gaps};

/// Two hot, two overdue and one number from the latest drawing, in that
/// order. Duplicates are skipped and the gap is filled with the next hot
/// numbers.
pub fn balanced(window: &[Drawing], config: &AnalyzerConfig) -> ([u8; 5], u8) {
    let hot = frequency(window, Pool::Main).ranked();
    let overdue = gaps(window, Pool::Main).ranked();

    let mut latest: Vec<u8> = window.last().map(|d| d.main.to_vec()).unwrap_or_default();
    latest.sort_unstable();

    let mut picker = Picker::new();
    picker
        .take(numbers(&hot), 2)
        .take(numbers(&overdue), 2)
        .take(latest, 1);
    let main = picker.finish(numbers(&hot));

    let lucky = frequency(recent_slice(window, config), Pool::LuckyBall).most_frequent();
    (main, lucky)
}
