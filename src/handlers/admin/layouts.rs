//! Field panels for record-editing forms.

use axum::{extract::Path, response::Json, routing::get, Router};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator};
use utoipa::ToSchema;

use crate::{errors::ServiceError, ApiResponse, ApiResult, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_layouts))
        .route("/:entity", get(get_layout))
}

/// Entities with an editing layout; path segment spelling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum LayoutEntity {
    Company,
    Manufacturer,
    Certification,
    MfgActivity,
    PvModule,
    Datasheet,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Panel {
    /// `None` for the untitled leading panel
    pub title: Option<String>,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Layout {
    #[schema(example = "pv-module")]
    pub entity: String,
    /// Columns shown in the record list
    pub list_display: Vec<String>,
    /// Fields the list can be filtered on
    pub list_filter: Vec<String>,
    pub panels: Vec<Panel>,
}

fn panel(title: Option<&str>, fields: &[&str]) -> Panel {
    Panel {
        title: title.map(str::to_string),
        fields: fields.iter().map(|f| f.to_string()).collect(),
    }
}

fn strings(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| f.to_string()).collect()
}

pub fn layout(entity: LayoutEntity) -> Layout {
    let (list_display, list_filter, panels) = match entity {
        LayoutEntity::Company => (
            strings(&["short_name", "legal_name", "hq_country", "parent_company_id"]),
            strings(&[]),
            vec![panel(
                None,
                &["legal_name", "short_name", "hq_city", "hq_country", "parent_company_id"],
            )],
        ),
        LayoutEntity::Manufacturer => (
            strings(&[
                "short_name",
                "parent_company",
                "hq_country",
                "mfg_capacity_yr",
                "mfg_activities",
            ]),
            strings(&[]),
            vec![
                panel(
                    None,
                    &["legal_name", "short_name", "hq_city", "hq_country", "parent_company_id"],
                ),
                panel(
                    Some("Manufacturing"),
                    &["mfg_experience", "mfg_capacity_yr", "mfg_country", "mfg_activity_ids"],
                ),
                panel(Some("Misc."), &["comments"]),
            ],
        ),
        LayoutEntity::Certification => (
            strings(&["body", "standard", "version"]),
            strings(&[]),
            vec![panel(None, &["body_id", "standard", "version", "comments"])],
        ),
        LayoutEntity::MfgActivity => (
            strings(&["name"]),
            strings(&[]),
            vec![panel(None, &["name", "comments"])],
        ),
        LayoutEntity::PvModule => (
            strings(&[
                "manufacturer",
                "model_name",
                "p_max",
                "cell_count",
                "cell_type",
                "cell_tech",
                "is_bifacial",
            ]),
            strings(&["cell_type"]),
            vec![
                panel(
                    None,
                    &[
                        "manufacturer_id",
                        "model_name",
                        "p_max",
                        "v_sys_max",
                        "is_bifacial",
                        "has_frame",
                        "has_arcoat",
                    ],
                ),
                panel(
                    Some("Cell"),
                    &["cell_count", "cell_type", "cell_tech", "doping_type"],
                ),
                panel(Some("Misc."), &["certification_ids", "comments"]),
            ],
        ),
        LayoutEntity::Datasheet => (
            strings(&["pv_module_id", "p_max_stc", "year_published"]),
            strings(&["pv_module_id"]),
            vec![
                panel(None, &["pv_module_id", "year_published"]),
                panel(
                    Some("Standard Testing Conditions (25C, 1kW/m^2)"),
                    &["p_max_stc", "eff_stc", "v_mp_stc", "i_mp_stc", "v_oc_stc", "i_sc_stc"],
                ),
                panel(
                    Some("Temperature Coefficients"),
                    &["temp_co_p_max", "temp_co_v_oc", "temp_co_i_sc"],
                ),
                panel(Some("Physical"), &["length", "width", "thickness", "weight"]),
            ],
        ),
    };

    Layout {
        entity: entity.as_ref().to_string(),
        list_display,
        list_filter,
        panels,
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/layouts",
    responses(
        (status = 200, description = "Every editing layout", body = ApiResponse<Vec<Layout>>)
    ),
    tag = "admin"
)]
pub async fn list_layouts() -> ApiResult<Vec<Layout>> {
    Ok(Json(ApiResponse::success(
        LayoutEntity::iter().map(layout).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/layouts/{entity}",
    params(("entity" = String, Path, description = "company, manufacturer, certification, mfg-activity, pv-module or datasheet")),
    responses(
        (status = 200, description = "Editing layout", body = ApiResponse<Layout>),
        (status = 404, description = "No layout for this entity", body = crate::errors::ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn get_layout(Path(entity): Path<String>) -> ApiResult<Layout> {
    let entity = entity
        .parse::<LayoutEntity>()
        .map_err(|_| ServiceError::NotFound(format!("No layout for '{}'", entity)))?;
    Ok(Json(ApiResponse::success(layout(entity))))
}
