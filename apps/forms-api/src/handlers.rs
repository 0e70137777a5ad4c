//! HTTP handlers for the forms API

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    Json,
};
use chrono::Utc;
use docx_engine::templates::{get_template, list_templates, TemplateInfo, ACTA_TEMPLATE, MINUTA_TEMPLATE};
use docx_engine::{fill_template, FillPlan, FilledDocument, DOCX_MIME_TYPE};
use forms_core::dates::local_timestamp;
use forms_core::{roster, ActaForm, MinutaForm};
use shared_types::{Alicuota, Submission};
use uuid::Uuid;

use crate::delivery::FileGuard;
use crate::error::ApiError;
use crate::identity::Identity;
use crate::models::*;
use crate::state::AppState;
use crate::store;

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// Template metadata
pub async fn templates() -> Json<Vec<TemplateInfo>> {
    Json(list_templates())
}

/// Sanitize a submission and check the template's always-required fields
fn validate(submission: Submission, template: &TemplateInfo) -> Result<Submission, ApiError> {
    let submission = submission.sanitized();
    let missing = submission.missing(&template.required_inputs);
    if !missing.is_empty() {
        return Err(ApiError::MissingFields(
            missing.into_iter().map(str::to_string).collect(),
        ));
    }
    Ok(submission)
}

/// Fill `template` off the async runtime
///
/// The output is guarded from the moment it is persisted, so it is removed
/// unless the caller disarms the guard, even if the request is dropped while
/// the fill is still running.
pub(crate) async fn generate(
    state: &AppState,
    template: &TemplateInfo,
    plan: FillPlan,
) -> Result<(FilledDocument, FileGuard), ApiError> {
    let source = template.path_in(&state.templates_dir);
    if !source.is_file() {
        tracing::error!("Template archive missing: {}", source.display());
        return Err(ApiError::TemplateNotFound(template.name.clone()));
    }
    let dest = state.output_dir.clone();

    let filled = tokio::task::spawn_blocking(move || {
        fill_template(&source, &dest, &plan).map(|filled| {
            let guard = FileGuard::new(&filled.path);
            (filled, guard)
        })
    })
    .await
    .map_err(|e| ApiError::Internal(e.into()))??;
    Ok(filled)
}

fn unreplaced(filled: &FilledDocument) -> Vec<String> {
    filled.unreplaced.iter().map(|(_, m)| m.clone()).collect()
}

/// Acta history of the caller's group
pub async fn list_actas(
    State(state): State<Arc<AppState>>,
    identity: Identity,
) -> Result<Json<ActaListResponse>, ApiError> {
    let actas = store::list_actas(&state.db, identity.group_id).await?;

    let mut company_names: Vec<String> = Vec::new();
    for acta in &actas {
        if !company_names.contains(&acta.cianame) {
            company_names.push(acta.cianame.clone());
        }
    }
    let shareholder_names = roster::unique_names(actas.iter().map(|a| a.accdata.as_str()));

    Ok(Json(ActaListResponse {
        actas,
        company_names,
        shareholder_names,
    }))
}

/// Generate meeting minutes and record their summary
pub async fn create_acta(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    Json(submission): Json<Submission>,
) -> Result<(StatusCode, Json<GeneratedDocumentResponse>), ApiError> {
    let template = get_template(ACTA_TEMPLATE)?;
    let submission = validate(submission, &template)?;

    let max_parties = template.max_parties.unwrap_or(usize::MAX);
    let form = ActaForm::from_submission(&submission, max_parties)?;
    let plan = form.fill_plan(&template)?;

    let (filled, guard) = generate(&state, &template, plan).await?;

    let summary = form.summary(local_timestamp(Utc::now(), state.timezone));
    let row = store::insert_acta(&state.db, &summary, identity.group_id, &identity.user_name).await?;

    let id = state
        .documents
        .register(&identity.user_name, &template.download_name, filled.path.clone())
        .await;
    guard.disarm();

    tracing::info!(
        "Generated acta {} for '{}' ({} part(s) rewritten, record {})",
        id,
        identity.user_name,
        filled.parts_modified,
        row
    );

    Ok((
        StatusCode::CREATED,
        Json(GeneratedDocumentResponse::new(
            id,
            &template.download_name,
            unreplaced(&filled),
        )),
    ))
}

/// Property records offered in the sale agreement form
pub async fn list_alicuotas(
    State(state): State<Arc<AppState>>,
    _identity: Identity,
) -> Result<Json<Vec<Alicuota>>, ApiError> {
    Ok(Json(store::list_alicuotas(&state.db).await?))
}

pub async fn create_alicuota(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    Json(req): Json<NewAlicuotaRequest>,
) -> Result<(StatusCode, Json<Alicuota>), ApiError> {
    if req.alicuota.trim().is_empty() {
        return Err(ApiError::MissingFields(vec!["alicuota".to_string()]));
    }

    let alicuota = store::insert_alicuota(&state.db, &req).await?;
    tracing::info!("'{}' added alicuota {}", identity.user_name, alicuota.id);

    Ok((StatusCode::CREATED, Json(alicuota)))
}

/// Generate a sale agreement for a recorded property
pub async fn create_minuta(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    Json(submission): Json<Submission>,
) -> Result<(StatusCode, Json<GeneratedDocumentResponse>), ApiError> {
    let template = get_template(MINUTA_TEMPLATE)?;
    let submission = validate(submission, &template)?;

    let alicuota_id = MinutaForm::alicuota_id(&submission)?;
    let alicuota = store::get_alicuota(&state.db, alicuota_id)
        .await?
        .ok_or(ApiError::AlicuotaNotFound(alicuota_id))?;

    let form = MinutaForm::from_submission(&submission, alicuota)?;
    let plan = form.fill_plan()?;

    let (filled, guard) = generate(&state, &template, plan).await?;
    let id = state
        .documents
        .register(&identity.user_name, &template.download_name, filled.path.clone())
        .await;
    guard.disarm();

    tracing::info!(
        "Generated minuta {} for '{}' (alicuota {})",
        id,
        identity.user_name,
        alicuota_id
    );

    Ok((
        StatusCode::CREATED,
        Json(GeneratedDocumentResponse::new(
            id,
            &template.download_name,
            unreplaced(&filled),
        )),
    ))
}

/// One-shot download; the file is deleted once read
pub async fn download_document(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    Path(id): Path<String>,
) -> Result<(StatusCode, [(header::HeaderName, String); 4], Vec<u8>), ApiError> {
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::DocumentNotFound(id.clone()))?;
    let document = state.documents.take(id, &identity.user_name).await?;
    let _guard = FileGuard::new(&document.path);

    let bytes = tokio::fs::read(&document.path)
        .await
        .map_err(|e| ApiError::Internal(e.into()))?;

    tracing::info!(
        "Delivering {} ({} bytes) to '{}', {} document(s) still pending",
        document.download_name,
        bytes.len(),
        identity.user_name,
        state.documents.len().await
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, DOCX_MIME_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", document.download_name),
            ),
            (header::CONTENT_LENGTH, bytes.len().to_string()),
            (header::CACHE_CONTROL, "must-revalidate".to_string()),
        ],
        bytes,
    ))
}
