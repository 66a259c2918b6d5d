#![allow(dead_code)]

use chrono::NaiveDateTime;
use labframe::{Cell, DataFrame, Index};

pub fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

/// Seven analyst actions labeled by timestamp, the lecture dataset
pub fn firm_frame() -> DataFrame<NaiveDateTime> {
    let dates = [
        "2012-02-16 07:42:00",
        "2020-09-23 08:58:55",
        "2020-09-23 09:01:26",
        "2020-09-23 09:11:01",
        "2020-09-23 11:15:12",
        "2020-11-18 11:07:44",
        "2020-12-09 15:34:34",
    ];
    let firms = [
        "JP Morgan",
        "Deutsche Bank",
        "Deutsche Bank",
        "Wunderlich",
        "Deutsche Bank",
        "Morgan Stanley",
        "JP Morgan",
    ];
    let actions = ["main", "main", "main", "down", "up", "up", "main"];

    let index = Index::with_name(
        dates.iter().map(|s| ts(s)).collect(),
        Some("date".to_string()),
    );
    let mut df = DataFrame::with_index(index);
    df.add_column("firm", firms.iter().map(|&s| Cell::from(s)).collect())
        .unwrap();
    df.add_column("action", actions.iter().map(|&s| Cell::from(s)).collect())
        .unwrap();
    df
}

/// `firm_frame` with a derived `event_date` column (date part of the label)
pub fn firm_frame_with_event_date() -> DataFrame<NaiveDateTime> {
    let df = firm_frame();
    let event_dates: Vec<Cell> = df
        .index()
        .values()
        .iter()
        .map(|t| Cell::from(t.format("%Y-%m-%d").to_string()))
        .collect();
    df.with_column("event_date", event_dates).unwrap()
}
