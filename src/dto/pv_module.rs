use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    entities::{pv_module, Device},
    services::{
        catalog::{ModuleSummary, PvModuleWithDatasheets},
        pv_modules::{PvModuleListRow, PvModuleRecord},
    },
    validation::ELECTRICAL,
};

use super::{CertificationResponse, DatasheetResponse};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PvModuleResponse {
    pub id: i32,
    pub manufacturer_id: i32,
    #[schema(example = "AcmeCo")]
    pub manufacturer: String,
    /// Manufacturer and model name
    #[schema(example = "AcmeCo X1")]
    pub label: String,
    #[schema(example = "X1")]
    pub model_name: String,
    #[schema(example = "310.00")]
    pub p_max: Option<Decimal>,
    pub v_sys_max: Option<Decimal>,
    pub cell_count: Option<i32>,
    /// `""` is unspecified, `null` is absent
    pub cell_type: Option<String>,
    pub doping_type: Option<String>,
    pub cell_tech: Option<String>,
    pub is_bifacial: Option<bool>,
    pub has_frame: Option<bool>,
    pub has_arcoat: Option<bool>,
    pub certifications: Vec<CertificationResponse>,
    pub comments: Option<String>,
}

impl From<PvModuleRecord> for PvModuleResponse {
    fn from(record: PvModuleRecord) -> Self {
        let m = record.module;
        Self {
            id: m.id,
            manufacturer_id: m.manufacturer_id,
            label: m.label(&record.manufacturer_short_name),
            manufacturer: record.manufacturer_short_name,
            model_name: m.model_name,
            p_max: ELECTRICAL.present_opt(m.p_max),
            v_sys_max: ELECTRICAL.present_opt(m.v_sys_max),
            cell_count: m.cell_count,
            cell_type: m.cell_type,
            doping_type: m.doping_type,
            cell_tech: m.cell_tech,
            is_bifacial: m.is_bifacial,
            has_frame: m.has_frame,
            has_arcoat: m.has_arcoat,
            certifications: record
                .certifications
                .into_iter()
                .map(CertificationResponse::from)
                .collect(),
            comments: m.comments,
        }
    }
}

/// Module index entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModuleListItem {
    pub id: i32,
    pub manufacturer_id: i32,
    pub manufacturer: String,
    pub model_name: String,
    pub label: String,
    pub p_max: Option<Decimal>,
    pub cell_type: Option<String>,
    pub cell_tech: Option<String>,
    pub is_bifacial: Option<bool>,
}

impl From<ModuleSummary> for ModuleListItem {
    fn from(summary: ModuleSummary) -> Self {
        let label = summary.label();
        let m = summary.module;
        Self {
            id: m.id,
            manufacturer_id: m.manufacturer_id,
            manufacturer: summary.manufacturer_short_name,
            model_name: m.model_name,
            label,
            p_max: ELECTRICAL.present_opt(m.p_max),
            cell_type: m.cell_type,
            cell_tech: m.cell_tech,
            is_bifacial: m.is_bifacial,
        }
    }
}

/// A device listed under its manufacturer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeviceSummary {
    pub id: i32,
    pub model_name: String,
    pub label: String,
    pub p_max: Option<Decimal>,
    pub cell_type: Option<String>,
}

impl DeviceSummary {
    pub fn new(module: pv_module::Model, manufacturer_short_name: &str) -> Self {
        Self {
            label: module.label(manufacturer_short_name),
            id: module.id,
            model_name: module.model_name,
            p_max: ELECTRICAL.present_opt(module.p_max),
            cell_type: module.cell_type,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PvModuleListItem {
    pub id: i32,
    pub manufacturer: String,
    pub model_name: String,
    pub p_max: Option<Decimal>,
    pub cell_count: Option<i32>,
    pub cell_type: Option<String>,
    pub cell_tech: Option<String>,
    pub is_bifacial: Option<bool>,
}

impl From<PvModuleListRow> for PvModuleListItem {
    fn from(row: PvModuleListRow) -> Self {
        Self {
            id: row.id,
            manufacturer: row.manufacturer,
            model_name: row.model_name,
            p_max: row.p_max,
            cell_count: row.cell_count,
            cell_type: row.cell_type,
            cell_tech: row.cell_tech,
            is_bifacial: row.is_bifacial,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PvModuleWithDatasheetsResponse {
    pub pv_module: PvModuleResponse,
    /// Highest rated power first
    pub datasheets: Vec<DatasheetResponse>,
}

impl From<PvModuleWithDatasheets> for PvModuleWithDatasheetsResponse {
    fn from(value: PvModuleWithDatasheets) -> Self {
        Self {
            pv_module: value.pv_module.into(),
            datasheets: value
                .datasheets
                .into_iter()
                .map(DatasheetResponse::from)
                .collect(),
        }
    }
}
