use chrono::{Days, NaiveDate};
use luckyball_db::models::Drawing;

/// Drawing dated `day` days after 2024-01-01.
pub fn draw(day: u32, main: [u8; 5], lucky_ball: u8) -> Drawing {
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    Drawing::new(base + Days::new(day as u64), main, lucky_ball)
}

/// D1=(1,2,3,4,5; LB=6), D2=(1,2,3,4,6; LB=7), D3=(7,8,9,10,11; LB=1)
pub fn three_draws() -> Vec<Drawing> {
    vec![
        draw(0, [1, 2, 3, 4, 5], 6),
        draw(1, [1, 2, 3, 4, 6], 7),
        draw(2, [7, 8, 9, 10, 11], 1),
    ]
}

/// Deterministic, varied history of `n` drawings.
pub fn make_test_draws(n: usize) -> Vec<Drawing> {
    (0..n)
        .map(|i| {
            let mut main = [0u8; 5];
            for (k, slot) in main.iter_mut().enumerate() {
                *slot = ((i * 7 + k * 11) % 48 + 1) as u8;
            }
            draw(i as u32, main, (i * 5 % 18 + 1) as u8)
        })
        .collect()
}
