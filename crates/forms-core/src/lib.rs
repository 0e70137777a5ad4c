//! Legal form processing
//!
//! Turns validated submissions into the values a document template needs:
//! - Spanish cardinal words for amounts and ordinals
//! - Currency and date phrasing
//! - List-driven party clauses
//! - Complete fill plans for each supported document

pub mod acta;
pub mod clauses;
pub mod company;
pub mod dates;
pub mod error;
pub mod fields;
pub mod minuta;
pub mod money;
pub mod numwords;
pub mod roster;

pub use acta::ActaForm;
pub use company::CompanyType;
pub use dates::CelebrationDate;
pub use error::FormError;
pub use minuta::{BuyerType, MinutaForm};
pub use money::MoneyAmount;
