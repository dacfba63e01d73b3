use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    entities::mfg_activity,
    services::{
        catalog::ManufacturerWithDevices,
        manufacturers::{ManufacturerListRow, ManufacturerRecord},
    },
    validation::CAPACITY,
};

use super::pv_module::DeviceSummary;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MfgActivityResponse {
    pub id: i32,
    #[schema(example = "Module assembly")]
    pub name: String,
    pub comments: Option<String>,
}

impl From<mfg_activity::Model> for MfgActivityResponse {
    fn from(model: mfg_activity::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            comments: model.comments,
        }
    }
}

/// Combined company and manufacturer record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": 1,
    "legal_name": null,
    "short_name": "AcmeCo",
    "hq_city": null,
    "hq_country": "CN",
    "parent_company_id": null,
    "parent_company": null,
    "mfg_experience": null,
    "mfg_capacity_yr": "5.000",
    "mfg_country": ["CN", "VN"],
    "mfg_activities": [],
    "comments": null
}))]
pub struct ManufacturerResponse {
    pub id: i32,
    pub legal_name: Option<String>,
    pub short_name: String,
    pub hq_city: Option<String>,
    pub hq_country: Option<String>,
    pub parent_company_id: Option<i32>,
    /// Short name of the parent company
    pub parent_company: Option<String>,
    pub mfg_experience: Option<String>,
    /// GW per year
    pub mfg_capacity_yr: Option<Decimal>,
    pub mfg_country: Vec<String>,
    pub mfg_activities: Vec<MfgActivityResponse>,
    pub comments: Option<String>,
}

impl From<ManufacturerRecord> for ManufacturerResponse {
    fn from(record: ManufacturerRecord) -> Self {
        let company = record.company;
        let manufacturer = record.manufacturer;
        Self {
            id: company.id,
            legal_name: company.legal_name,
            short_name: company.short_name,
            hq_city: company.hq_city,
            hq_country: company.hq_country,
            parent_company_id: company.parent_company_id,
            parent_company: record.parent_company.map(|p| p.short_name),
            mfg_experience: manufacturer.mfg_experience,
            mfg_capacity_yr: CAPACITY.present_opt(manufacturer.mfg_capacity_yr),
            mfg_country: record.mfg_country,
            mfg_activities: record
                .mfg_activities
                .into_iter()
                .map(MfgActivityResponse::from)
                .collect(),
            comments: manufacturer.comments,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ManufacturerListItem {
    pub id: i32,
    pub short_name: String,
    pub parent_company: Option<String>,
    pub hq_country: Option<String>,
    pub mfg_capacity_yr: Option<Decimal>,
    /// Activity names, comma separated
    pub mfg_activities: String,
}

impl From<ManufacturerListRow> for ManufacturerListItem {
    fn from(row: ManufacturerListRow) -> Self {
        Self {
            id: row.company_id,
            short_name: row.short_name,
            parent_company: row.parent_company,
            hq_country: row.hq_country,
            mfg_capacity_yr: row.mfg_capacity_yr,
            mfg_activities: row.mfg_activities,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ManufacturerWithDevicesResponse {
    pub manufacturer: ManufacturerResponse,
    /// Devices ordered by model name
    pub devices: Vec<DeviceSummary>,
}

impl From<ManufacturerWithDevices> for ManufacturerWithDevicesResponse {
    fn from(value: ManufacturerWithDevices) -> Self {
        let short_name = value.manufacturer.company.short_name.clone();
        Self {
            manufacturer: value.manufacturer.into(),
            devices: value
                .devices
                .into_iter()
                .map(|device| DeviceSummary::new(device, &short_name))
                .collect(),
        }
    }
}
