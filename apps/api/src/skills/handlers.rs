//! Axum route handlers for the skill gap API.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::extraction::Upload;
use crate::skills::analyzer::{analyze_skill_gap, resolve_role, AnalysisResult};
use crate::skills::extractor::extract_skills;
use crate::skills::roadmap::{
    compare_multiple_roles, get_available_roles, get_skill_roadmap, RoleComparison, SkillRoadmap,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Multipart form shared by the upload endpoints.
#[derive(Debug, Default)]
struct ResumeForm {
    /// `None` when no `resume` field was sent; an empty filename when the
    /// field was sent without a file.
    resume: Option<Upload>,
    role: Option<String>,
    include_resources: bool,
}

impl ResumeForm {
    async fn read(multipart: Result<Multipart, MultipartRejection>) -> Result<Self, AppError> {
        let mut multipart = multipart.map_err(|e| AppError::Validation(e.body_text()))?;
        let mut form = ResumeForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
        {
            let name = field.name().map(str::to_owned);
            match name.as_deref() {
                Some("resume") => {
                    let filename = field.file_name().unwrap_or_default().to_string();
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(format!("Invalid file: {e}")))?;
                    form.resume = Some(Upload { filename, data });
                }
                Some("role") => form.role = Some(read_text(field).await?),
                Some("include_resources") => {
                    form.include_resources =
                        read_text(field).await?.trim().eq_ignore_ascii_case("true");
                }
                _ => {}
            }
        }

        Ok(form)
    }

    fn require_resume(&mut self) -> Result<Upload, AppError> {
        let upload = self
            .resume
            .take()
            .ok_or_else(|| AppError::MissingInput("Resume file is required".to_string()))?;
        if upload.filename.is_empty() {
            return Err(AppError::MissingInput("Resume file is empty".to_string()));
        }
        Ok(upload)
    }
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed form field: {e}")))
}

/// Runs CPU-bound analysis off the async executor.
async fn run_blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(e.into()))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SkillsResponse {
    /// The role filter actually applied, if any.
    pub role: Option<String>,
    pub skills: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /analyze
///
/// Multipart: `resume` (file), `role`, `include_resources`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let mut form = ResumeForm::read(multipart).await?;
    let upload = form.require_resume()?;
    let text = state.extractor.extract(&upload).await?;

    let role = form.role.unwrap_or_default();
    let options = state.config.analysis_options(form.include_resources);
    let catalog = state.catalog.clone();
    let result =
        run_blocking(move || analyze_skill_gap(&catalog, &text, &role, &options)).await??;

    info!(
        role = %result.role,
        match_percentage = result.match_percentage,
        matched = result.total_matched,
        missing = result.total_missing,
        "Resume analyzed"
    );
    Ok(Json(result))
}

/// POST /compare
///
/// Multipart: `resume` (file). Ranks every role by match percentage.
pub async fn handle_compare(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<RoleComparison>, AppError> {
    let mut form = ResumeForm::read(multipart).await?;
    let upload = form.require_resume()?;
    let text = state.extractor.extract(&upload).await?;

    let options = state.config.analysis_options(false);
    let catalog = state.catalog.clone();
    let comparison =
        run_blocking(move || compare_multiple_roles(&catalog, &text, &options)).await??;

    if let Some(best) = &comparison.best_match {
        info!(
            best_role = %best.role,
            match_percentage = best.match_percentage,
            "Roles compared"
        );
    }
    Ok(Json(comparison))
}

/// POST /skills
///
/// Multipart: `resume` (file), optional `role`. Lists detected skills.
/// Unknown roles are rejected when `strict_roles` is set, otherwise ignored.
pub async fn handle_extract_skills(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SkillsResponse>, AppError> {
    let mut form = ResumeForm::read(multipart).await?;
    let upload = form.require_resume()?;
    let text = state.extractor.extract(&upload).await?;

    let requested = form
        .role
        .map(|r| r.trim().to_lowercase())
        .filter(|r| !r.is_empty());
    let role = match requested {
        Some(r) if state.config.strict_roles => {
            Some(resolve_role(&state.catalog, &r)?.id.to_string())
        }
        Some(r) => state.catalog.role(&r).map(|role| role.id.to_string()),
        None => None,
    };

    let catalog = state.catalog.clone();
    let filter = role.clone();
    let skills = run_blocking(move || extract_skills(&catalog, &text, filter.as_deref())).await?;

    info!(role = ?role, detected = skills.len(), "Skills extracted");
    Ok(Json(SkillsResponse { role, skills }))
}

/// GET /roles
pub async fn handle_roles(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(get_available_roles(&state.catalog))
}

/// GET /roadmap/:role
pub async fn handle_roadmap(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> Result<Json<SkillRoadmap>, AppError> {
    Ok(Json(get_skill_roadmap(&state.catalog, &role)?))
}
