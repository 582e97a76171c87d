use luckyball_db::models::{Drawing, Pool};

use super::{Picker, numbers};
use crate::config::AnalyzerConfig;
use crate::stats::frequency;

/// The trailing `recent_window` drawings of `window` (never empty when `window` isn't).
pub(crate) fn recent_slice<'a>(window: &'a [Drawing], config: &AnalyzerConfig) -> &'a [Drawing] {
    let size = config.recent_window.max(1);
    &window[window.len().saturating_sub(size)..]
}

pub fn recent_hot(window: &[Drawing], config: &AnalyzerConfig) -> ([u8; 5], u8) {
    let recent = recent_slice(window, config);
    let main = frequency(recent, Pool::Main).top(5);
    let lucky = frequency(recent, Pool::LuckyBall).most_frequent();
    (Picker::new().finish(numbers(&main)), lucky)
}

pub fn all_time_hot(window: &[Drawing]) -> ([u8; 5], u8) {
    let main = frequency(window, Pool::Main).top(5);
    let lucky = frequency(window, Pool::LuckyBall).most_frequent();
    (Picker::new().finish(numbers(&main)), lucky)
}

pub fn cold(window: &[Drawing]) -> ([u8; 5], u8) {
    let main = frequency(window, Pool::Main).bottom(5);
    let lucky = frequency(window, Pool::LuckyBall).least_frequent();
    (Picker::new().finish(numbers(&main)), lucky)
}
