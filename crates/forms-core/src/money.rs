//! Currency amounts written out for contracts

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::FormError;
use crate::numwords;

lazy_static! {
    /// Whole part (plain or grouped by thousands), separator, two-digit cents
    static ref AMOUNT: Regex =
        Regex::new(r"^(\d{1,3}(?:[.,]\d{3})+|\d+)[.,](\d{2})$").unwrap();
}

const CURRENCY_NAME: &str = "DOLARES DE LOS ESTADOS UNIDOS DE AMERICA";

/// A dollar amount as submitted, e.g. `"1,234.56"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoneyAmount {
    raw: String,
    dollars: u64,
    cents: String,
}

impl MoneyAmount {
    /// Parse a submitted amount
    ///
    /// The last separator must be followed by exactly two digits of cents.
    /// Grouping separators in the whole part may be `,` or `.`.
    pub fn parse(raw: &str) -> Result<Self, FormError> {
        let raw = raw.trim();
        let caps = AMOUNT
            .captures(raw)
            .ok_or_else(|| FormError::InvalidAmount(raw.to_string()))?;

        let digits: String = caps[1].chars().filter(char::is_ascii_digit).collect();
        let dollars = digits
            .parse()
            .map_err(|_| FormError::InvalidAmount(raw.to_string()))?;

        Ok(Self {
            raw: raw.to_string(),
            dollars,
            cents: caps[2].to_string(),
        })
    }

    pub fn dollars(&self) -> u64 {
        self.dollars
    }

    /// Two-digit cents as submitted
    pub fn cents(&self) -> &str {
        &self.cents
    }

    /// `"<WORDS> DOLARES DE LOS ESTADOS UNIDOS DE AMERICA <CC>/100 ($<raw>)"`
    pub fn in_words(&self) -> Result<String, FormError> {
        Ok(format!(
            "{} {} {}/100 (${})",
            numwords::to_words(self.dollars)?,
            CURRENCY_NAME,
            self.cents,
            self.raw
        ))
    }
}
