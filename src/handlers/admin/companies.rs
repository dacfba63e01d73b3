use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};

use crate::{
    dto::{CompanyResponse, ManufacturerResponse},
    errors::ServiceError,
    handlers::common::{paginated, ListParams},
    services::{companies::CompanyInput, manufacturers::ManufacturerInput},
    ApiResponse, ApiResult, AppState, PaginatedResponse,
};

use super::{created, Created};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_companies).post(create_company))
        .route(
            "/:id",
            get(get_company).put(update_company).delete(delete_company),
        )
        .route("/:id/manufacturer", post(extend_company))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/companies",
    params(ListParams),
    responses(
        (status = 200, description = "Companies ordered by short name", body = ApiResponse<PaginatedResponse<CompanyResponse>>),
        (status = 400, description = "Page out of range", body = crate::errors::ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn list_companies(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<PaginatedResponse<CompanyResponse>> {
    let (page, limit) = params.window(&state.config)?;
    let (companies, total) = state
        .services
        .companies
        .list_companies(params.search(), page, limit)
        .await?;
    Ok(Json(ApiResponse::success(paginated(
        companies, total, page, limit,
    ))))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/companies",
    request_body = CompanyInput,
    responses(
        (status = 201, description = "Company created", body = ApiResponse<CompanyResponse>),
        (status = 400, description = "Invalid field", body = crate::errors::ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn create_company(
    State(state): State<AppState>,
    Json(payload): Json<CompanyInput>,
) -> Created<CompanyResponse> {
    let company = state.services.companies.create_company(payload).await?;
    created(company.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/companies/{id}",
    params(("id" = i32, Path, description = "Company id")),
    responses(
        (status = 200, description = "Company", body = ApiResponse<CompanyResponse>),
        (status = 404, description = "Company not found", body = crate::errors::ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<CompanyResponse> {
    let company = state.services.companies.get_company(id).await?;
    Ok(Json(ApiResponse::success(company.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/companies/{id}",
    params(("id" = i32, Path, description = "Company id")),
    request_body = CompanyInput,
    responses(
        (status = 200, description = "Company replaced", body = ApiResponse<CompanyResponse>),
        (status = 400, description = "Invalid field", body = crate::errors::ErrorResponse),
        (status = 404, description = "Company not found", body = crate::errors::ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn update_company(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CompanyInput>,
) -> ApiResult<CompanyResponse> {
    let company = state.services.companies.update_company(id, payload).await?;
    Ok(Json(ApiResponse::success(company.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/companies/{id}",
    params(("id" = i32, Path, description = "Company id")),
    responses(
        (status = 204, description = "Company deleted; child companies lose their parent"),
        (status = 404, description = "Company not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Referenced by devices or certifications", body = crate::errors::ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn delete_company(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ServiceError> {
    state.services.companies.delete_company(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/companies/{id}/manufacturer",
    params(("id" = i32, Path, description = "Company id")),
    request_body = ManufacturerInput,
    responses(
        (status = 201, description = "Company promoted to manufacturer", body = ApiResponse<ManufacturerResponse>),
        (status = 400, description = "Already a manufacturer or invalid field", body = crate::errors::ErrorResponse),
        (status = 404, description = "Company not found", body = crate::errors::ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn extend_company(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ManufacturerInput>,
) -> Created<ManufacturerResponse> {
    let record = state
        .services
        .manufacturers
        .extend_company(id, payload)
        .await?;
    created(record.into())
}
