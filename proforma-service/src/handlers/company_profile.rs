//! Company profile handlers.

use axum::{extract::State, Json};
use service_core::error::AppError;
use tracing::info;

use crate::dtos::CompanyProfileSaved;
use crate::models::{CompanyProfile, CompanyProfileInput};
use crate::services::invoicing::effective_company_profile;
use crate::AppState;

/// The saved profile, or the sample profile when none has been saved yet.
///
/// GET /api/company-profile
pub async fn get_company_profile(
    State(state): State<AppState>,
) -> Result<Json<CompanyProfile>, AppError> {
    Ok(Json(effective_company_profile(state.store.as_ref()).await?))
}

/// Create or update the singleton profile.
///
/// POST /api/company-profile
pub async fn save_company_profile(
    State(state): State<AppState>,
    Json(input): Json<CompanyProfileInput>,
) -> Result<Json<CompanyProfileSaved>, AppError> {
    let data = state.store.upsert_company_profile(input).await?;

    let message = if state.store.is_demo() {
        "Demo mode: company profile was not saved".to_string()
    } else {
        info!(name = %data.name, "Company profile updated");
        "Company profile saved successfully".to_string()
    };

    Ok(Json(CompanyProfileSaved { message, data }))
}
