use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use crate::{
    dto::{ManufacturerListItem, ManufacturerResponse},
    errors::ServiceError,
    handlers::common::{paginated, ListParams},
    services::manufacturers::NewManufacturerInput,
    ApiResponse, ApiResult, AppState, PaginatedResponse,
};

use super::{created, Created};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_manufacturers).post(create_manufacturer))
        .route(
            "/:id",
            get(get_manufacturer)
                .put(update_manufacturer)
                .delete(delete_manufacturer),
        )
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/manufacturers",
    params(ListParams),
    responses(
        (status = 200, description = "Manufacturers with parent, country, capacity and activities", body = ApiResponse<PaginatedResponse<ManufacturerListItem>>),
        (status = 400, description = "Page out of range", body = crate::errors::ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn list_manufacturers(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<PaginatedResponse<ManufacturerListItem>> {
    let (page, limit) = params.window(&state.config)?;
    let (rows, total) = state
        .services
        .manufacturers
        .list_manufacturers(params.search(), page, limit)
        .await?;
    Ok(Json(ApiResponse::success(paginated(rows, total, page, limit))))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/manufacturers",
    request_body = NewManufacturerInput,
    responses(
        (status = 201, description = "Company and manufacturer created", body = ApiResponse<ManufacturerResponse>),
        (status = 400, description = "Invalid field", body = crate::errors::ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn create_manufacturer(
    State(state): State<AppState>,
    Json(payload): Json<NewManufacturerInput>,
) -> Created<ManufacturerResponse> {
    let record = state
        .services
        .manufacturers
        .create_manufacturer(payload)
        .await?;
    created(record.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/manufacturers/{id}",
    params(("id" = i32, Path, description = "Manufacturer (company) id")),
    responses(
        (status = 200, description = "Manufacturer", body = ApiResponse<ManufacturerResponse>),
        (status = 404, description = "Manufacturer not found", body = crate::errors::ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn get_manufacturer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<ManufacturerResponse> {
    let record = state.services.manufacturers.get_manufacturer(id).await?;
    Ok(Json(ApiResponse::success(record.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/manufacturers/{id}",
    params(("id" = i32, Path, description = "Manufacturer (company) id")),
    request_body = NewManufacturerInput,
    responses(
        (status = 200, description = "Manufacturer replaced", body = ApiResponse<ManufacturerResponse>),
        (status = 400, description = "Invalid field", body = crate::errors::ErrorResponse),
        (status = 404, description = "Manufacturer not found", body = crate::errors::ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn update_manufacturer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<NewManufacturerInput>,
) -> ApiResult<ManufacturerResponse> {
    let record = state
        .services
        .manufacturers
        .update_manufacturer(id, payload)
        .await?;
    Ok(Json(ApiResponse::success(record.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/manufacturers/{id}",
    params(("id" = i32, Path, description = "Manufacturer (company) id")),
    responses(
        (status = 204, description = "Manufacturer and its company deleted"),
        (status = 404, description = "Manufacturer not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Referenced by devices or certifications", body = crate::errors::ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn delete_manufacturer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ServiceError> {
    state.services.manufacturers.delete_manufacturer(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
