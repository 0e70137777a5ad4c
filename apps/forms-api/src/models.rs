//! Data models for the forms API

use serde::{Deserialize, Serialize};
use shared_types::Alicuota;
use sqlx::FromRow;
use uuid::Uuid;

/// Acta summary row
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DbActa {
    pub id: i64,
    pub makedate: String,
    pub cianame: String,
    pub ciatype: String,
    pub celebdate: String,
    pub accnumber: i64,
    pub primary_group_id: i64,
    pub user_name: String,
    pub accdata: String,
}

/// Property record row
#[derive(Debug, Clone, FromRow)]
pub struct DbAlicuota {
    pub id: i64,
    pub alicuota: String,
    pub info1: String,
    pub info2: String,
    pub info3: String,
    pub info4: String,
    pub info5: String,
}

impl From<DbAlicuota> for Alicuota {
    fn from(row: DbAlicuota) -> Self {
        Alicuota {
            id: row.id,
            alicuota: row.alicuota,
            info1: row.info1,
            info2: row.info2,
            info3: row.info3,
            info4: row.info4,
            info5: row.info5,
        }
    }
}

/// Request to add a property record
#[derive(Debug, Clone, Deserialize)]
pub struct NewAlicuotaRequest {
    pub alicuota: String,
    #[serde(default)]
    pub info1: String,
    #[serde(default)]
    pub info2: String,
    #[serde(default)]
    pub info3: String,
    #[serde(default)]
    pub info4: String,
    #[serde(default)]
    pub info5: String,
}

/// Acta history of a group, with names to suggest in the form
#[derive(Debug, Clone, Serialize)]
pub struct ActaListResponse {
    pub actas: Vec<DbActa>,
    pub company_names: Vec<String>,
    pub shareholder_names: Vec<String>,
}

/// Handle for a freshly generated document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedDocumentResponse {
    pub id: Uuid,
    pub download_url: String,
    pub file_name: String,
    /// Markers the template still contained after filling
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unreplaced_markers: Vec<String>,
}

impl GeneratedDocumentResponse {
    pub fn new(id: Uuid, file_name: impl Into<String>, unreplaced_markers: Vec<String>) -> Self {
        Self {
            id,
            download_url: format!("/api/documents/{}", id),
            file_name: file_name.into(),
            unreplaced_markers,
        }
    }
}
