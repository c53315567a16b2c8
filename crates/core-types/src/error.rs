use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Duplicate country code {0} in reference table")]
    DuplicateCountryCode(u32),
}
