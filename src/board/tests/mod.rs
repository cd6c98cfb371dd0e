//! Unit tests for the chore board.

mod query_tests;

use crate::board::domain::Responsible;
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub(super) struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Noon UTC on the given day.
    pub(super) fn on(year: i32, month: u32, day: u32) -> Self {
        Self(
            Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
                .single()
                .expect("valid test date"),
        )
    }

    pub(super) fn today(self) -> NaiveDate {
        self.0.date_naive()
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub(super) fn responsibles(names: &[&str]) -> Vec<Responsible> {
    names
        .iter()
        .map(|name| Responsible::new(*name, None).expect("valid responsible"))
        .collect()
}
