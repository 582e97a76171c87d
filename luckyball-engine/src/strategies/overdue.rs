use luckyball_db::models::{Drawing, Pool};

use super::{Picker, numbers};
use crate::stats::gaps;

/// Numbers with the longest current absence, equal gaps by smaller number.
pub fn overdue(window: &[Drawing]) -> ([u8; 5], u8) {
    let main = gaps(window, Pool::Main).top(5);
    let lucky = gaps(window, Pool::LuckyBall).most_overdue();
    (Picker::new().finish(numbers(&main)), lucky)
}
