use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};

use crate::{dto::ManufacturerWithDevicesResponse, ApiResponse, ApiResult, AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/:id", get(get_manufacturer))
}

#[utoipa::path(
    get,
    path = "/api/v1/manufacturers/{id}",
    params(("id" = i32, Path, description = "Manufacturer (company) id")),
    responses(
        (status = 200, description = "Manufacturer with its devices", body = ApiResponse<ManufacturerWithDevicesResponse>),
        (status = 404, description = "Manufacturer not found", body = crate::errors::ErrorResponse)
    ),
    tag = "catalog"
)]
pub async fn get_manufacturer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<ManufacturerWithDevicesResponse> {
    let manufacturer = state
        .services
        .catalog
        .get_manufacturer_with_devices(id)
        .await?;
    Ok(Json(ApiResponse::success(manufacturer.into())))
}
