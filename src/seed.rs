// src/seed.rs
// Daily seed: every player on the same calendar day shares the same candidate photos.

use chrono::{Datelike, Local, NaiveDate};

/// Seed for `date` as the number `YYYYMMDD`.
pub fn daily_seed(date: NaiveDate) -> u64 {
    u64::from(date.year().unsigned_abs()) * 10_000
        + u64::from(date.month()) * 100
        + u64::from(date.day())
}

pub fn today_seed() -> u64 {
    daily_seed(Local::now().date_naive())
}
