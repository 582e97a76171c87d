//! Historical drawings loaded from CSV, kept in ascending date order.

use std::io::Read;
use std::ops::Range;
use std::path::Path;

use chrono::NaiveDate;
use log::info;

use crate::error::{LuckyError, Result};
use crate::models::{Drawing, validate_draw};

const DATE_FORMATS: [&str; 2] = ["%m/%d/%Y", "%Y-%m-%d"];
const MAIN_COLUMNS: [&str; 5] = ["number 1", "number 2", "number 3", "number 4", "number 5"];

/// Immutable, date-ascending sequence of drawings. Windows are borrowed slices.
#[derive(Debug, Clone, Default)]
pub struct DrawHistory {
    draws: Vec<Drawing>,
}

struct Columns {
    date: usize,
    main: [usize; 5],
    lucky_ball: usize,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| LuckyError::malformed(0, format!("missing column '{}'", name)))
        };

        let mut main = [0usize; 5];
        for (slot, name) in main.iter_mut().zip(MAIN_COLUMNS) {
            *slot = find(name)?;
        }

        Ok(Self {
            date: find("date")?,
            main,
            lucky_ball: find("lucky ball")?,
        })
    }
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

fn parse_record(record: &csv::StringRecord, columns: &Columns, row: usize) -> Result<Drawing> {
    let get = |idx: usize, name: &str| -> Result<String> {
        record
            .get(idx)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| LuckyError::malformed(row, format!("missing field '{}'", name)))
    };

    let get_u8 = |idx: usize, name: &str| -> Result<u8> {
        let s = get(idx, name)?;
        s.parse::<u8>()
            .map_err(|_| LuckyError::malformed(row, format!("cannot parse '{}' as {}", s, name)))
    };

    let raw_date = get(columns.date, "date")?;
    let date = parse_date(&raw_date).ok_or_else(|| {
        let numbers_blank = columns
            .main
            .iter()
            .chain(std::iter::once(&columns.lucky_ball))
            .all(|&idx| record.get(idx).is_none_or(|s| s.trim().is_empty()));
        if numbers_blank {
            LuckyError::malformed(
                row,
                format!(
                    "invalid date '{}': looks like footer text, remove trailing non-data rows from the export",
                    raw_date
                ),
            )
        } else {
            LuckyError::malformed(row, format!("invalid date '{}'", raw_date))
        }
    })?;

    let mut main = [0u8; 5];
    for (i, (slot, name)) in main.iter_mut().zip(MAIN_COLUMNS).enumerate() {
        *slot = get_u8(columns.main[i], name)?;
    }
    let lucky_ball = get_u8(columns.lucky_ball, "lucky ball")?;

    validate_draw(&main, lucky_ball).map_err(|reason| LuckyError::malformed(row, reason))?;

    Ok(Drawing::new(date, main, lucky_ball))
}

impl DrawHistory {
    /// Load a history from a CSV file with `Date`, `Number 1`..`Number 5` and
    /// `Lucky Ball` columns. Any bad row aborts the whole load.
    pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let history = Self::from_reader(file)?;
        info!(
            "loaded {} drawings from {}",
            history.len(),
            path.display()
        );
        Ok(history)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns = Columns::from_headers(reader.headers()?)?;

        let mut rows = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let row = i + 1;
            let record = record.map_err(|e| LuckyError::malformed(row, e.to_string()))?;
            rows.push((row, parse_record(&record, &columns, row)?));
        }

        Self::from_rows(rows)
    }

    /// Build a history from drawings in any order. Drawings are validated and
    /// sorted; a repeated date is rejected.
    pub fn from_drawings(draws: Vec<Drawing>) -> Result<Self> {
        let mut rows = Vec::with_capacity(draws.len());
        for (i, draw) in draws.into_iter().enumerate() {
            let row = i + 1;
            validate_draw(&draw.main, draw.lucky_ball)
                .map_err(|reason| LuckyError::malformed(row, reason))?;
            rows.push((row, draw));
        }
        Self::from_rows(rows)
    }

    fn from_rows(mut rows: Vec<(usize, Drawing)>) -> Result<Self> {
        rows.sort_by(|a, b| a.1.date.cmp(&b.1.date).then(a.0.cmp(&b.0)));

        for pair in rows.windows(2) {
            if pair[0].1.date == pair[1].1.date {
                let row = pair[0].0.max(pair[1].0);
                return Err(LuckyError::malformed(
                    row,
                    format!("duplicate date {}", pair[1].1.date),
                ));
            }
        }

        Ok(Self {
            draws: rows.into_iter().map(|(_, d)| d).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    pub fn all(&self) -> &[Drawing] {
        &self.draws
    }

    pub fn get(&self, index: usize) -> Option<&Drawing> {
        self.draws.get(index)
    }

    /// Drawings `[range.start, range.end)`, clamped to the history.
    pub fn range(&self, range: Range<usize>) -> &[Drawing] {
        let end = range.end.min(self.draws.len());
        let start = range.start.min(end);
        &self.draws[start..end]
    }

    /// The most recent `n` drawings (all of them when `n >= len`).
    pub fn last(&self, n: usize) -> &[Drawing] {
        let start = self.draws.len().saturating_sub(n);
        &self.draws[start..]
    }

    /// Every drawing strictly before `date`.
    pub fn before(&self, date: NaiveDate) -> &[Drawing] {
        let end = self.draws.partition_point(|d| d.date < date);
        &self.draws[..end]
    }

    pub fn find(&self, date: NaiveDate) -> Option<&Drawing> {
        self.draws
            .binary_search_by(|d| d.date.cmp(&date))
            .ok()
            .map(|i| &self.draws[i])
    }

    pub fn first_on_or_after(&self, date: NaiveDate) -> Option<&Drawing> {
        let idx = self.draws.partition_point(|d| d.date < date);
        self.draws.get(idx)
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.draws.first().map(|d| d.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.draws.last().map(|d| d.date)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Drawing> {
        self.draws.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Date,Number 1,Number 2,Number 3,Number 4,Number 5,Lucky Ball\n";

    fn load(body: &str) -> Result<DrawHistory> {
        DrawHistory::from_reader(format!("{HEADER}{body}").as_bytes())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expect_malformed(result: Result<DrawHistory>) -> (usize, String) {
        match result {
            Err(LuckyError::MalformedRecord { row, reason }) => (row, reason),
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("01/21/2026"), Some(date(2026, 1, 21)));
        assert_eq!(parse_date("2026-01-21"), Some(date(2026, 1, 21)));
        assert_eq!(parse_date("21.01.2026"), None);
    }

    #[test]
    fn test_load_sorts_ascending() {
        let history = load(
            "01/21/2026,3,10,22,32,38,11\n\
             01/19/2026,5,17,22,42,48,16\n\
             01/20/2026,6,9,28,41,45,8\n",
        )
        .unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history.first_date(), Some(date(2026, 1, 19)));
        assert_eq!(history.last_date(), Some(date(2026, 1, 21)));
        assert_eq!(history.all()[1].main, [6, 9, 28, 41, 45]);
    }

    #[test]
    fn test_load_keeps_input_order_of_numbers() {
        let history = load("01/21/2026,38,3,22,10,32,11\n").unwrap();
        assert_eq!(history.all()[0].main, [38, 3, 22, 10, 32]);
    }

    #[test]
    fn test_load_extra_columns_and_case() {
        let csv = "DATE,lucky ball,number 5,number 4,number 3,number 2,number 1,Jackpot\n\
                   2026-01-21,11,38,32,22,10,3,x\n";
        let history = DrawHistory::from_reader(csv.as_bytes()).unwrap();
        let draw = &history.all()[0];
        assert_eq!(draw.main, [3, 10, 22, 32, 38]);
        assert_eq!(draw.lucky_ball, 11);
    }

    #[test]
    fn test_missing_column() {
        let csv = "Date,Number 1,Number 2,Number 3,Number 4,Number 5\n";
        let (row, reason) = expect_malformed(DrawHistory::from_reader(csv.as_bytes()));
        assert_eq!(row, 0);
        assert!(reason.contains("lucky ball"));
    }

    #[test]
    fn test_out_of_range_identifies_row() {
        let (row, reason) = expect_malformed(load(
            "01/19/2026,5,17,22,42,48,16\n\
             01/20/2026,6,9,28,41,49,8\n",
        ));
        assert_eq!(row, 2);
        assert!(reason.contains("49"), "{reason}");
    }

    #[test]
    fn test_short_row_rejected() {
        let (row, reason) = expect_malformed(load("01/19/2026,5,17,22,42\n"));
        assert_eq!(row, 1);
        assert!(reason.contains("missing field"), "{reason}");
    }

    #[test]
    fn test_bad_date_rejected() {
        let (row, reason) = expect_malformed(load(
            "01/19/2026,5,17,22,42,48,16\n\
             Numbers are unofficial,,,,,,\n",
        ));
        assert_eq!(row, 2);
        assert!(reason.contains("invalid date"), "{reason}");
        assert!(reason.contains("footer"), "{reason}");
    }

    #[test]
    fn test_bad_date_with_numbers_is_not_called_footer() {
        let (row, reason) = expect_malformed(load("2026/19/01,5,17,22,42,48,16\n"));
        assert_eq!(row, 1);
        assert!(reason.contains("invalid date"), "{reason}");
        assert!(!reason.contains("footer"), "{reason}");
    }

    #[test]
    fn test_duplicate_number_rejected() {
        let (_, reason) = expect_malformed(load("01/19/2026,5,5,22,42,48,16\n"));
        assert!(reason.contains("duplicate number 5"));
    }

    #[test]
    fn test_duplicate_date_rejected() {
        let (row, reason) = expect_malformed(load(
            "01/19/2026,5,17,22,42,48,16\n\
             01/20/2026,6,9,28,41,45,8\n\
             2026-01-19,1,2,3,4,5,6\n",
        ));
        assert_eq!(row, 3);
        assert!(reason.contains("duplicate date"));
    }

    #[test]
    fn test_windows() {
        let draws = (1..=5)
            .map(|d| Drawing::new(date(2024, 1, d), [1, 2, 3, 4, d as u8 + 4], 1))
            .collect();
        let history = DrawHistory::from_drawings(draws).unwrap();

        assert_eq!(history.last(2).len(), 2);
        assert_eq!(history.last(2)[0].date, date(2024, 1, 4));
        assert_eq!(history.last(10).len(), 5);
        assert_eq!(history.before(date(2024, 1, 3)).len(), 2);
        assert_eq!(history.before(date(2023, 1, 1)).len(), 0);
        assert_eq!(history.range(1..3).len(), 2);
        assert_eq!(history.range(4..10).len(), 1);
        assert!(history.find(date(2024, 1, 2)).is_some());
        assert!(history.find(date(2024, 2, 2)).is_none());
        assert_eq!(
            history.first_on_or_after(date(2023, 12, 1)).map(|d| d.date),
            Some(date(2024, 1, 1))
        );
        assert!(history.first_on_or_after(date(2024, 1, 6)).is_none());
    }

    #[test]
    fn test_from_drawings_validates() {
        let draws = vec![Drawing::new(date(2024, 1, 1), [1, 2, 3, 4, 5], 0)];
        let (row, _) = expect_malformed(DrawHistory::from_drawings(draws));
        assert_eq!(row, 1);
    }
}
