use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    dto::{PvModuleListItem, PvModuleResponse},
    errors::ServiceError,
    handlers::common::{page_window, paginated},
    services::pv_modules::PvModuleInput,
    ApiResponse, ApiResult, AppState, PaginatedResponse,
};

use super::{created, Created};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_pv_modules).post(create_pv_module))
        .route(
            "/:id",
            get(get_pv_module)
                .put(update_pv_module)
                .delete(delete_pv_module),
        )
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PvModuleListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Substring of the model name
    pub search: Option<String>,
    /// Exact cell type code; empty matches blank
    pub cell_type: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/pv-modules",
    params(PvModuleListQuery),
    responses(
        (status = 200, description = "Modules ordered by manufacturer then model name", body = ApiResponse<PaginatedResponse<PvModuleListItem>>),
        (status = 400, description = "Unknown cell type filter or page out of range", body = crate::errors::ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn list_pv_modules(
    State(state): State<AppState>,
    Query(query): Query<PvModuleListQuery>,
) -> ApiResult<PaginatedResponse<PvModuleListItem>> {
    let (page, limit) = page_window(query.page, query.limit, &state.config)?;
    let (rows, total) = state
        .services
        .pv_modules
        .list_pv_modules(
            query.search.as_deref(),
            query.cell_type.as_deref(),
            page,
            limit,
        )
        .await?;
    Ok(Json(ApiResponse::success(paginated(rows, total, page, limit))))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/pv-modules",
    request_body = PvModuleInput,
    responses(
        (status = 201, description = "Module created", body = ApiResponse<PvModuleResponse>),
        (status = 400, description = "Invalid field", body = crate::errors::ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn create_pv_module(
    State(state): State<AppState>,
    Json(payload): Json<PvModuleInput>,
) -> Created<PvModuleResponse> {
    let record = state.services.pv_modules.create_pv_module(payload).await?;
    created(record.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/pv-modules/{id}",
    params(("id" = i32, Path, description = "PV module id")),
    responses(
        (status = 200, description = "Module", body = ApiResponse<PvModuleResponse>),
        (status = 404, description = "Module not found", body = crate::errors::ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn get_pv_module(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<PvModuleResponse> {
    let record = state.services.pv_modules.get_pv_module(id).await?;
    Ok(Json(ApiResponse::success(record.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/pv-modules/{id}",
    params(("id" = i32, Path, description = "PV module id")),
    request_body = PvModuleInput,
    responses(
        (status = 200, description = "Module replaced", body = ApiResponse<PvModuleResponse>),
        (status = 400, description = "Invalid field", body = crate::errors::ErrorResponse),
        (status = 404, description = "Module not found", body = crate::errors::ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn update_pv_module(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<PvModuleInput>,
) -> ApiResult<PvModuleResponse> {
    let record = state
        .services
        .pv_modules
        .update_pv_module(id, payload)
        .await?;
    Ok(Json(ApiResponse::success(record.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/pv-modules/{id}",
    params(("id" = i32, Path, description = "PV module id")),
    responses(
        (status = 204, description = "Module and all its datasheets deleted"),
        (status = 404, description = "Module not found", body = crate::errors::ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn delete_pv_module(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ServiceError> {
    state.services.pv_modules.delete_pv_module(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
