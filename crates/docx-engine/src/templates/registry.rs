//! Template registry and metadata

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;
use crate::{DOCUMENT_PART, HEADER_PART};

/// Shareholders' / partners' general meeting minutes
pub const ACTA_TEMPLATE: &str = "acta_junta_general";

/// Property sale agreement draft
pub const MINUTA_TEMPLATE: &str = "minuta_compraventa";

/// Information about an available template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateInfo {
    /// Template name (used in routes)
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Archive file name inside the templates directory
    pub file_name: String,
    /// Download file name offered to the client
    pub download_name: String,
    /// XML parts the template fills
    pub parts: Vec<String>,
    /// Required input fields
    pub required_inputs: Vec<String>,
    /// Optional input fields
    pub optional_inputs: Vec<String>,
    /// Number of party slots laid out in the template, if it lists parties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_parties: Option<usize>,
}

impl TemplateInfo {
    /// Location of the template archive inside `templates_dir`
    pub fn path_in(&self, templates_dir: &Path) -> PathBuf {
        templates_dir.join(&self.file_name)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// List all available templates
pub fn list_templates() -> Vec<TemplateInfo> {
    vec![
        TemplateInfo {
            name: ACTA_TEMPLATE.to_string(),
            description: "Acta de junta general universal de accionistas o socios (S.A. / LTDA)"
                .to_string(),
            file_name: "modeloacta.docx".to_string(),
            download_name: "acta.docx".to_string(),
            parts: strings(&[DOCUMENT_PART, HEADER_PART]),
            required_inputs: strings(&[
                "ciatype",
                "actademo_cianombre",
                "actademo_chosendate",
                "accnumber",
                "actademo_capital",
                "actademo_valnominal",
                "actademo_acc1nombre",
                "actademo_acc1acciones",
            ]),
            optional_inputs: strings(&[
                "actademo_acc2nombre",
                "actademo_acc2acciones",
                "actademo_acc3nombre",
                "actademo_acc3acciones",
            ]),
            max_parties: Some(3),
        },
        TemplateInfo {
            name: MINUTA_TEMPLATE.to_string(),
            description: "Minuta de compraventa de alícuota con préstamo hipotecario".to_string(),
            file_name: "minuta1modelo1.docx".to_string(),
            download_name: "minuta.docx".to_string(),
            parts: strings(&[DOCUMENT_PART]),
            required_inputs: strings(&[
                "minutademo_alicuota",
                "minutademo_preciodecv",
                "minutademo_montodp",
                "minutademo_montopres",
                "minutademo_precioeb",
                "minutademo_conyuge1name",
                "minutademo_ifin",
                "minutademo_tipodecomprador",
            ]),
            // conyuge2name becomes required for spouse buyers
            optional_inputs: strings(&["minutademo_conyuge2name"]),
            max_parties: None,
        },
    ]
}

/// Look up a template by name
pub fn get_template(name: &str) -> Result<TemplateInfo, EngineError> {
    list_templates()
        .into_iter()
        .find(|t| t.name == name)
        .ok_or_else(|| EngineError::TemplateNotFound(name.to_string()))
}
