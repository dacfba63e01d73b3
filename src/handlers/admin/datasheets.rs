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
    dto::DatasheetResponse,
    errors::ServiceError,
    handlers::common::{page_window, paginated},
    services::datasheets::DatasheetInput,
    ApiResponse, ApiResult, AppState, PaginatedResponse,
};

use super::{created, Created};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_datasheets).post(create_datasheet))
        .route(
            "/:id",
            get(get_datasheet)
                .put(update_datasheet)
                .delete(delete_datasheet),
        )
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DatasheetListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Only datasheets of this module
    pub pv_module_id: Option<i32>,
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/datasheets",
    params(DatasheetListQuery),
    responses(
        (status = 200, description = "Datasheets by module, highest rated power first", body = ApiResponse<PaginatedResponse<DatasheetResponse>>),
        (status = 400, description = "Page out of range", body = crate::errors::ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn list_datasheets(
    State(state): State<AppState>,
    Query(query): Query<DatasheetListQuery>,
) -> ApiResult<PaginatedResponse<DatasheetResponse>> {
    let (page, limit) = page_window(query.page, query.limit, &state.config)?;
    let (rows, total) = state
        .services
        .datasheets
        .list_datasheets(query.pv_module_id, page, limit)
        .await?;
    Ok(Json(ApiResponse::success(paginated(rows, total, page, limit))))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/datasheets",
    request_body = DatasheetInput,
    responses(
        (status = 201, description = "Datasheet created", body = ApiResponse<DatasheetResponse>),
        (status = 400, description = "Invalid field", body = crate::errors::ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn create_datasheet(
    State(state): State<AppState>,
    Json(payload): Json<DatasheetInput>,
) -> Created<DatasheetResponse> {
    let datasheet = state.services.datasheets.create_datasheet(payload).await?;
    created(datasheet.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/datasheets/{id}",
    params(("id" = i32, Path, description = "Datasheet id")),
    responses(
        (status = 200, description = "Datasheet", body = ApiResponse<DatasheetResponse>),
        (status = 404, description = "Datasheet not found", body = crate::errors::ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn get_datasheet(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<DatasheetResponse> {
    let datasheet = state.services.datasheets.get_datasheet(id).await?;
    Ok(Json(ApiResponse::success(datasheet.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/datasheets/{id}",
    params(("id" = i32, Path, description = "Datasheet id")),
    request_body = DatasheetInput,
    responses(
        (status = 200, description = "Datasheet replaced", body = ApiResponse<DatasheetResponse>),
        (status = 400, description = "Invalid field", body = crate::errors::ErrorResponse),
        (status = 404, description = "Datasheet not found", body = crate::errors::ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn update_datasheet(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<DatasheetInput>,
) -> ApiResult<DatasheetResponse> {
    let datasheet = state
        .services
        .datasheets
        .update_datasheet(id, payload)
        .await?;
    Ok(Json(ApiResponse::success(datasheet.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/datasheets/{id}",
    params(("id" = i32, Path, description = "Datasheet id")),
    responses(
        (status = 204, description = "Datasheet deleted"),
        (status = 404, description = "Datasheet not found", body = crate::errors::ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn delete_datasheet(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ServiceError> {
    state.services.datasheets.delete_datasheet(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
