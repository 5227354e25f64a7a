use chrono::{NaiveDate, TimeZone, Utc};

// Mocking out time so that it is possible to run tests that depend on time.
pub trait ISys: Send + Sync {
    /// The current timestamp in millis
    fn get_timestamp_millis(&self) -> i64;
}

/// System that gets the real time and is used when not testing
pub struct RealSys {}
impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock standing still at a fixed instant
pub struct MockSys {
    timestamp_millis: i64,
}

impl MockSys {
    pub fn new(timestamp_millis: i64) -> Self {
        Self { timestamp_millis }
    }

    /// Noon UTC of the given date
    pub fn at_date(date: NaiveDate) -> Self {
        Self::new(noon_utc_millis(date))
    }
}

fn noon_utc_millis(date: NaiveDate) -> i64 {
    date.and_hms_opt(12, 0, 0)
        .map(|noon| Utc.from_utc_datetime(&noon).timestamp_millis())
        .unwrap_or_default()
}

impl ISys for MockSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.timestamp_millis
    }
}
