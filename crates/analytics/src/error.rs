use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Invalid year range: {min}..={max} is empty")]
    InvalidYearRange { min: i32, max: i32 },
}
