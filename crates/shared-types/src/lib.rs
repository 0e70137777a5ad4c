pub mod types;

pub use types::{ActaSummary, Alicuota, Party, Submission};
