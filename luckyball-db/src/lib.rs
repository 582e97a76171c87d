pub mod db;
pub mod error;
pub mod history;
pub mod models;

pub use rusqlite;

pub use error::{LuckyError, Result};
pub use history::DrawHistory;
pub use models::{Drawing, MatchOutcome, Pool};
