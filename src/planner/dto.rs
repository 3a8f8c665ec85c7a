use serde::Deserialize;
use time::Date;

use crate::error::ApiError;

/// `?from=YYYY-MM-DD&to=YYYY-MM-DD`, both optional.
#[derive(Debug, Default, Deserialize)]
pub struct DateWindow {
    #[serde(default)]
    pub from: Option<Date>,
    #[serde(default)]
    pub to: Option<Date>,
}

impl DateWindow {
    pub fn validate(&self) -> Result<(), ApiError> {
        match (self.from, self.to) {
            (Some(from), Some(to)) if from > to => Err(ApiError::InvalidRange(format!(
                "from {from} is after to {to}"
            ))),
            _ => Ok(()),
        }
    }

    /// Fills missing bounds from `default`.
    pub fn or(&self, default: (Date, Date)) -> (Date, Date) {
        (self.from.unwrap_or(default.0), self.to.unwrap_or(default.1))
    }
}
