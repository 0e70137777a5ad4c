use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid number in field '{field}': {value}")]
    InvalidNumber { field: String, value: String },

    #[error("Invalid amount '{0}': expected digits with a two-digit decimal part, e.g. 1,234.56")]
    InvalidAmount(String),

    #[error("Invalid date '{0}': expected DD/MM/YYYY followed by a time")]
    InvalidDate(String),

    #[error("Unsupported company type '{0}': expected S.A. or LTDA")]
    UnsupportedCompanyType(String),

    #[error("Party count {count} out of range 1..={max}")]
    PartyCount { count: usize, max: usize },

    #[error("At least one party is required")]
    NoParties,

    #[error("Total shares exceed {}", u64::MAX)]
    TotalOverflow,

    #[error("Number too large to write in words: {0}")]
    NumberTooLarge(u64),
}
