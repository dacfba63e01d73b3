use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use crate::{
    dto::MfgActivityResponse,
    errors::ServiceError,
    handlers::common::{paginated, ListParams},
    services::mfg_activities::MfgActivityInput,
    ApiResponse, ApiResult, AppState, PaginatedResponse,
};

use super::{created, Created};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_mfg_activities).post(create_mfg_activity))
        .route(
            "/:id",
            get(get_mfg_activity)
                .put(update_mfg_activity)
                .delete(delete_mfg_activity),
        )
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/mfg-activities",
    params(ListParams),
    responses(
        (status = 200, description = "Activities ordered by name", body = ApiResponse<PaginatedResponse<MfgActivityResponse>>),
        (status = 400, description = "Page out of range", body = crate::errors::ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn list_mfg_activities(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<PaginatedResponse<MfgActivityResponse>> {
    let (page, limit) = params.window(&state.config)?;
    let (rows, total) = state
        .services
        .mfg_activities
        .list_mfg_activities(params.search(), page, limit)
        .await?;
    Ok(Json(ApiResponse::success(paginated(rows, total, page, limit))))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/mfg-activities",
    request_body = MfgActivityInput,
    responses(
        (status = 201, description = "Activity created", body = ApiResponse<MfgActivityResponse>),
        (status = 400, description = "Invalid field", body = crate::errors::ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn create_mfg_activity(
    State(state): State<AppState>,
    Json(payload): Json<MfgActivityInput>,
) -> Created<MfgActivityResponse> {
    let activity = state
        .services
        .mfg_activities
        .create_mfg_activity(payload)
        .await?;
    created(activity.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/mfg-activities/{id}",
    params(("id" = i32, Path, description = "Activity id")),
    responses(
        (status = 200, description = "Activity", body = ApiResponse<MfgActivityResponse>),
        (status = 404, description = "Activity not found", body = crate::errors::ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn get_mfg_activity(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<MfgActivityResponse> {
    let activity = state.services.mfg_activities.get_mfg_activity(id).await?;
    Ok(Json(ApiResponse::success(activity.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/mfg-activities/{id}",
    params(("id" = i32, Path, description = "Activity id")),
    request_body = MfgActivityInput,
    responses(
        (status = 200, description = "Activity replaced", body = ApiResponse<MfgActivityResponse>),
        (status = 400, description = "Invalid field", body = crate::errors::ErrorResponse),
        (status = 404, description = "Activity not found", body = crate::errors::ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn update_mfg_activity(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<MfgActivityInput>,
) -> ApiResult<MfgActivityResponse> {
    let activity = state
        .services
        .mfg_activities
        .update_mfg_activity(id, payload)
        .await?;
    Ok(Json(ApiResponse::success(activity.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/mfg-activities/{id}",
    params(("id" = i32, Path, description = "Activity id")),
    responses(
        (status = 204, description = "Activity deleted and unlinked from manufacturers"),
        (status = 404, description = "Activity not found", body = crate::errors::ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn delete_mfg_activity(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ServiceError> {
    state.services.mfg_activities.delete_mfg_activity(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
