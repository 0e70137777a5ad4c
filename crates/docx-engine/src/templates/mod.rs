//! Template management

pub mod registry;

pub use registry::{get_template, list_templates, TemplateInfo, ACTA_TEMPLATE, MINUTA_TEMPLATE};
