//! Office document (.docx) template filling engine
//!
//! This crate fills placeholder markers inside the XML parts of a packaged
//! office document, including:
//! - Single-pass, longest-match placeholder substitution
//! - Structural removal of unused template fragments
//! - Staged archive rewrite with atomic replacement
//! - Template management
//!
//! The template archive is only ever read. Each fill produces a new archive
//! with a unique name in the destination directory.

pub mod archive;
pub mod errors;
pub mod inspect;
pub mod placeholder;
pub mod templates;
pub mod xml;

pub use archive::{fill_template, read_part, FillPlan, FilledDocument, PartEdit, PartOp};
pub use errors::EngineError;
pub use placeholder::PlaceholderTable;

/// Main document body part of a word-processing package
pub const DOCUMENT_PART: &str = "word/document.xml";

/// Secondary header part used by the meeting minutes template
pub const HEADER_PART: &str = "word/header2.xml";

/// MIME type of generated documents
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
