//! Frequency, recency, gap and pairing statistics over a window of drawings.
//!
//! Every function takes the window explicitly and never looks outside it.
//! Rankings break equal counts by the smaller number so results are stable.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use luckyball_db::models::{Drawing, Pool};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyTable {
    pool: Pool,
    counts: Vec<u32>,
}

impl FrequencyTable {
    pub fn new(pool: Pool) -> Self {
        Self {
            pool,
            counts: vec![0; pool.size()],
        }
    }

    fn increment(&mut self, number: u8) {
        if let Some(slot) = number
            .checked_sub(1)
            .and_then(|idx| self.counts.get_mut(idx as usize))
        {
            *slot += 1;
        }
    }

    pub fn pool(&self) -> Pool {
        self.pool
    }

    pub fn count(&self, number: u8) -> u32 {
        number
            .checked_sub(1)
            .and_then(|idx| self.counts.get(idx as usize))
            .copied()
            .unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// `(number, count)` for every number of the pool, ascending by number.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, &c)| ((i + 1) as u8, c))
    }

    /// Every number, most frequent first.
    pub fn ranked(&self) -> Vec<(u8, u32)> {
        rank_descending(self.iter())
    }

    pub fn top(&self, k: usize) -> Vec<(u8, u32)> {
        let mut ranked = self.ranked();
        ranked.truncate(k);
        ranked
    }

    /// Least frequent first, equal counts by smaller number.
    pub fn bottom(&self, k: usize) -> Vec<(u8, u32)> {
        let mut ranked: Vec<(u8, u32)> = self.iter().collect();
        ranked.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));
        ranked.truncate(k);
        ranked
    }

    pub fn most_frequent(&self) -> u8 {
        self.ranked().first().map(|(n, _)| *n).unwrap_or(1)
    }

    pub fn least_frequent(&self) -> u8 {
        self.bottom(1).first().map(|(n, _)| *n).unwrap_or(1)
    }
}

/// Draws since last appearance, measured from the end of the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapRecord {
    pool: Pool,
    gaps: Vec<u32>,
}

impl GapRecord {
    pub fn pool(&self) -> Pool {
        self.pool
    }

    pub fn gap(&self, number: u8) -> u32 {
        number
            .checked_sub(1)
            .and_then(|idx| self.gaps.get(idx as usize))
            .copied()
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.gaps
            .iter()
            .enumerate()
            .map(|(i, &g)| ((i + 1) as u8, g))
    }

    /// Longest absence first.
    pub fn ranked(&self) -> Vec<(u8, u32)> {
        rank_descending(self.iter())
    }

    pub fn top(&self, k: usize) -> Vec<(u8, u32)> {
        let mut ranked = self.ranked();
        ranked.truncate(k);
        ranked
    }

    pub fn most_overdue(&self) -> u8 {
        self.ranked().first().map(|(n, _)| *n).unwrap_or(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairCount {
    pub pair: (u8, u8),
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverdueNumber {
    pub number: u8,
    pub current_gap: u32,
    pub average_gap: f64,
    pub ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberStats {
    pub number: u8,
    pub frequency: u32,
    pub gap: u32,
}

fn rank_descending(values: impl Iterator<Item = (u8, u32)>) -> Vec<(u8, u32)> {
    let mut ranked: Vec<(u8, u32)> = values.collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
}

pub fn frequency(window: &[Drawing], pool: Pool) -> FrequencyTable {
    let mut table = FrequencyTable::new(pool);
    for draw in window {
        for &n in pool.numbers_from(draw) {
            table.increment(n);
        }
    }
    table
}

pub fn gaps(window: &[Drawing], pool: Pool) -> GapRecord {
    let len = window.len() as u32;
    let mut gaps = vec![len; pool.size()];
    for (t, draw) in window.iter().enumerate() {
        let gap = len - 1 - t as u32;
        for &n in pool.numbers_from(draw) {
            if let Some(slot) = n.checked_sub(1).and_then(|idx| gaps.get_mut(idx as usize)) {
                *slot = gap;
            }
        }
    }
    GapRecord { pool, gaps }
}

/// One main-number table per position, in the stored order of each drawing.
pub fn positional(window: &[Drawing]) -> Vec<FrequencyTable> {
    let mut tables = vec![FrequencyTable::new(Pool::Main); 5];
    for draw in window {
        for (table, &n) in tables.iter_mut().zip(draw.main.iter()) {
            table.increment(n);
        }
    }
    tables
}

pub fn pairs(window: &[Drawing], top_k: usize) -> Vec<PairCount> {
    let mut counts: HashMap<(u8, u8), u32> = HashMap::new();
    for draw in window {
        let mut numbers = draw.main;
        numbers.sort_unstable();
        for i in 0..numbers.len() {
            for j in (i + 1)..numbers.len() {
                *counts.entry((numbers[i], numbers[j])).or_insert(0) += 1;
            }
        }
    }

    let mut ranked: Vec<PairCount> = counts
        .into_iter()
        .map(|(pair, count)| PairCount { pair, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then(a.pair.cmp(&b.pair)));
    ranked.truncate(top_k);
    ranked
}

/// Mean spacing between consecutive appearances, indexed by `number - 1`.
/// `None` for numbers seen fewer than twice.
pub fn average_gaps(window: &[Drawing], pool: Pool) -> Vec<Option<f64>> {
    let mut last_seen: Vec<Option<usize>> = vec![None; pool.size()];
    let mut spacing_sum = vec![0usize; pool.size()];
    let mut spacing_count = vec![0usize; pool.size()];

    for (t, draw) in window.iter().enumerate() {
        for &n in pool.numbers_from(draw) {
            let idx = (n as usize).wrapping_sub(1);
            if idx >= pool.size() {
                continue;
            }
            if let Some(prev) = last_seen[idx] {
                spacing_sum[idx] += t - prev;
                spacing_count[idx] += 1;
            }
            last_seen[idx] = Some(t);
        }
    }

    spacing_sum
        .iter()
        .zip(&spacing_count)
        .map(|(&sum, &count)| (count > 0).then(|| sum as f64 / count as f64))
        .collect()
}

/// Main numbers absent for longer than `threshold` times their average gap.
pub fn overdue(window: &[Drawing], threshold: f64) -> Vec<OverdueNumber> {
    let current = gaps(window, Pool::Main);
    let averages = average_gaps(window, Pool::Main);

    let mut result: Vec<OverdueNumber> = current
        .iter()
        .zip(averages)
        .filter_map(|((number, current_gap), average)| {
            let average_gap = average?;
            let ratio = current_gap as f64 / average_gap;
            (current_gap as f64 > average_gap * threshold).then_some(OverdueNumber {
                number,
                current_gap,
                average_gap,
                ratio,
            })
        })
        .collect();

    result.sort_by(|a, b| {
        b.ratio
            .partial_cmp(&a.ratio)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.number.cmp(&b.number))
    });
    result
}

pub fn number_stats(window: &[Drawing], pool: Pool) -> Vec<NumberStats> {
    let freq = frequency(window, pool);
    let gaps = gaps(window, pool);
    freq.iter()
        .map(|(number, frequency)| NumberStats {
            number,
            frequency,
            gap: gaps.gap(number),
        })
        .collect()
}
