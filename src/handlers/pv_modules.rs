use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    dto::{DatasheetResponse, ModuleListItem, PvModuleWithDatasheetsResponse},
    ApiResponse, ApiResult, AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_modules))
        .route("/:id", get(get_module))
        .route("/:id/datasheets/:datasheet_id", get(get_module_datasheet))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ModuleIndexQuery {
    /// Number of modules to return; defaults to the configured index size
    pub limit: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/api/v1/modules",
    params(ModuleIndexQuery),
    responses(
        (status = 200, description = "Modules ordered by manufacturer then model name", body = ApiResponse<Vec<ModuleListItem>>)
    ),
    tag = "catalog"
)]
pub async fn list_modules(
    State(state): State<AppState>,
    Query(query): Query<ModuleIndexQuery>,
) -> ApiResult<Vec<ModuleListItem>> {
    let max = state.config.api_max_page_size.max(state.config.index_page_size);
    let limit = query
        .limit
        .unwrap_or(state.config.index_page_size)
        .clamp(1, max);

    let modules = state.services.catalog.list_pv_modules(Some(limit)).await?;
    Ok(Json(ApiResponse::success(
        modules.into_iter().map(ModuleListItem::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/modules/{id}",
    params(("id" = i32, Path, description = "PV module id")),
    responses(
        (status = 200, description = "Module with datasheets, highest rated power first", body = ApiResponse<PvModuleWithDatasheetsResponse>),
        (status = 404, description = "Module not found", body = crate::errors::ErrorResponse)
    ),
    tag = "catalog"
)]
pub async fn get_module(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<PvModuleWithDatasheetsResponse> {
    let module = state
        .services
        .catalog
        .get_pv_module_with_datasheets(id)
        .await?;
    Ok(Json(ApiResponse::success(module.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/modules/{id}/datasheets/{datasheet_id}",
    params(
        ("id" = i32, Path, description = "PV module id"),
        ("datasheet_id" = i32, Path, description = "Datasheet id")
    ),
    responses(
        (status = 200, description = "Datasheet", body = ApiResponse<DatasheetResponse>),
        (status = 404, description = "No such datasheet for this module", body = crate::errors::ErrorResponse)
    ),
    tag = "catalog"
)]
pub async fn get_module_datasheet(
    State(state): State<AppState>,
    Path((id, datasheet_id)): Path<(i32, i32)>,
) -> ApiResult<DatasheetResponse> {
    let datasheet = state
        .services
        .catalog
        .get_datasheet(id, datasheet_id)
        .await?;
    Ok(Json(ApiResponse::success(datasheet.into())))
}
