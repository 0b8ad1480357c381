pub mod time_utils;

pub use time_utils::{month_key, parse_date, timestamp_now, today_in, YearMonth};
