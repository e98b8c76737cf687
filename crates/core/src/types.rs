/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates carry no time component and serialize as `YYYY-MM-DD`.
pub type CalendarDate = chrono::NaiveDate;
