//! JSON administrative surface: record management for every catalog entity.

pub mod certifications;
pub mod companies;
pub mod datasheets;
pub mod layouts;
pub mod manufacturers;
pub mod mfg_activities;
pub mod pv_modules;

use axum::{http::StatusCode, response::Json, Router};

use crate::{errors::ServiceError, ApiResponse, AppState};

/// Result of a create endpoint: `201 Created` with the new record.
pub type Created<T> = Result<(StatusCode, Json<ApiResponse<T>>), ServiceError>;

pub(crate) fn created<T>(data: T) -> Created<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::success(data))))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/companies", companies::routes())
        .nest("/manufacturers", manufacturers::routes())
        .nest("/certifications", certifications::routes())
        .nest("/mfg-activities", mfg_activities::routes())
        .nest("/pv-modules", pv_modules::routes())
        .nest("/datasheets", datasheets::routes())
        .nest("/layouts", layouts::routes())
}
