use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use crate::{
    dto::CertificationResponse,
    errors::ServiceError,
    handlers::common::{paginated, ListParams},
    services::certifications::CertificationInput,
    ApiResponse, ApiResult, AppState, PaginatedResponse,
};

use super::{created, Created};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_certifications).post(create_certification))
        .route(
            "/:id",
            get(get_certification)
                .put(update_certification)
                .delete(delete_certification),
        )
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/certifications",
    params(ListParams),
    responses(
        (status = 200, description = "Certifications by body, standard, newest version first", body = ApiResponse<PaginatedResponse<CertificationResponse>>),
        (status = 400, description = "Page out of range", body = crate::errors::ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn list_certifications(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<PaginatedResponse<CertificationResponse>> {
    let (page, limit) = params.window(&state.config)?;
    let (rows, total) = state
        .services
        .certifications
        .list_certifications(params.search(), page, limit)
        .await?;
    Ok(Json(ApiResponse::success(paginated(rows, total, page, limit))))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/certifications",
    request_body = CertificationInput,
    responses(
        (status = 201, description = "Certification created", body = ApiResponse<CertificationResponse>),
        (status = 400, description = "Invalid field", body = crate::errors::ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn create_certification(
    State(state): State<AppState>,
    Json(payload): Json<CertificationInput>,
) -> Created<CertificationResponse> {
    let record = state
        .services
        .certifications
        .create_certification(payload)
        .await?;
    created(record.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/certifications/{id}",
    params(("id" = i32, Path, description = "Certification id")),
    responses(
        (status = 200, description = "Certification", body = ApiResponse<CertificationResponse>),
        (status = 404, description = "Certification not found", body = crate::errors::ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn get_certification(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<CertificationResponse> {
    let record = state.services.certifications.get_certification(id).await?;
    Ok(Json(ApiResponse::success(record.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/certifications/{id}",
    params(("id" = i32, Path, description = "Certification id")),
    request_body = CertificationInput,
    responses(
        (status = 200, description = "Certification replaced", body = ApiResponse<CertificationResponse>),
        (status = 400, description = "Invalid field", body = crate::errors::ErrorResponse),
        (status = 404, description = "Certification not found", body = crate::errors::ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn update_certification(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CertificationInput>,
) -> ApiResult<CertificationResponse> {
    let record = state
        .services
        .certifications
        .update_certification(id, payload)
        .await?;
    Ok(Json(ApiResponse::success(record.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/certifications/{id}",
    params(("id" = i32, Path, description = "Certification id")),
    responses(
        (status = 204, description = "Certification deleted and unlinked from modules"),
        (status = 404, description = "Certification not found", body = crate::errors::ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn delete_certification(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ServiceError> {
    state.services.certifications.delete_certification(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
