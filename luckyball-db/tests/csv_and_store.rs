use std::io::Write;

use chrono::NaiveDate;
use luckyball_db::db::{self, TicketRecord, TicketResult};
use luckyball_db::{DrawHistory, LuckyError};

const CSV: &str = "\
Date,Number 1,Number 2,Number 3,Number 4,Number 5,Lucky Ball
01/03/2024,7,8,9,10,11,1
01/01/2024,1,2,3,4,5,6
01/02/2024,1,2,3,4,6,7
";

fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn load_csv_orders_by_date() {
    let file = write_csv(CSV);
    let history = DrawHistory::load_csv(file.path()).unwrap();

    assert_eq!(history.len(), 3);
    assert_eq!(history.first_date(), NaiveDate::from_ymd_opt(2024, 1, 1));
    assert_eq!(history.last_date(), NaiveDate::from_ymd_opt(2024, 1, 3));
    assert_eq!(history.all()[0].main, [1, 2, 3, 4, 5]);
    assert_eq!(history.last(1)[0].lucky_ball, 1);
}

#[test]
fn load_csv_rejects_whole_file_on_bad_row() {
    let bad = format!("{CSV}01/04/2024,1,2,3,4,49,2\n");
    let file = write_csv(&bad);
    match DrawHistory::load_csv(file.path()) {
        Err(LuckyError::MalformedRecord { row, .. }) => assert_eq!(row, 4),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn load_csv_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = DrawHistory::load_csv(dir.path().join("absent.csv"));
    assert!(matches!(result, Err(LuckyError::Io(_))));
}

#[test]
fn ticket_store_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("tickets.db");

    let ticket = TicketRecord {
        id: None,
        date_played: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        strategy: "jackpot_spread".to_string(),
        main: [1, 13, 25, 37, 40],
        lucky_ball: 7,
        cost_cents: 200,
        result: None,
    };

    let id = {
        let conn = db::open_db(&path).unwrap();
        db::migrate(&conn).unwrap();
        db::insert_ticket(&conn, &ticket).unwrap()
    };

    let conn = db::open_db(&path).unwrap();
    db::migrate(&conn).unwrap();
    assert_eq!(db::count_tickets(&conn).unwrap(), 1);

    let result = TicketResult {
        drawing_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        main_matches: 1,
        lucky_match: true,
        prize_cents: 600,
    };
    assert!(db::record_result(&conn, id, &result).unwrap());

    let stored = db::fetch_tickets(&conn).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, Some(id));
    assert_eq!(stored[0].strategy, "jackpot_spread");
    assert_eq!(stored[0].result, Some(result));
}
