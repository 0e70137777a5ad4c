//! Typed access to submission fields

use std::str::FromStr;

use shared_types::Submission;

use crate::error::FormError;

pub fn require<'a>(submission: &'a Submission, field: &str) -> Result<&'a str, FormError> {
    submission
        .get(field)
        .ok_or_else(|| FormError::MissingField(field.to_string()))
}

pub fn require_number<T: FromStr>(submission: &Submission, field: &str) -> Result<T, FormError> {
    let value = require(submission, field)?;
    value.parse().map_err(|_| FormError::InvalidNumber {
        field: field.to_string(),
        value: value.to_string(),
    })
}
