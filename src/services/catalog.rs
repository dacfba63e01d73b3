//! Read paths behind the public pages: module index, manufacturer detail,
//! module detail with datasheet history, single datasheet.

use std::sync::Arc;

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use serde::Serialize;
use tracing::instrument;

use crate::{
    entities::{pv_module, pv_module_datasheet, Device},
    errors::ServiceError,
};

use super::datasheets::by_power;
use super::manufacturers::{load_manufacturer_record, ManufacturerRecord};
use super::pv_modules::{load_pv_module_record, ordered_by_device, short_names, PvModuleRecord};

/// Index page size used when the caller gives none.
pub const DEFAULT_INDEX_LIMIT: u64 = 25;

/// A module with the short name of its manufacturer.
#[derive(Clone, Debug, Serialize)]
pub struct ModuleSummary {
    pub module: pv_module::Model,
    pub manufacturer_short_name: String,
}

impl ModuleSummary {
    pub fn label(&self) -> String {
        self.module.label(&self.manufacturer_short_name)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ManufacturerWithDevices {
    pub manufacturer: ManufacturerRecord,
    pub devices: Vec<pv_module::Model>,
}

#[derive(Clone, Debug, Serialize)]
pub struct PvModuleWithDatasheets {
    pub pv_module: PvModuleRecord,
    pub datasheets: Vec<pv_module_datasheet::Model>,
}

#[derive(Clone)]
pub struct CatalogService {
    db: Arc<DatabaseConnection>,
}

impl CatalogService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// First `limit` modules ordered by manufacturer then model name.
    #[instrument(skip(self))]
    pub async fn list_pv_modules(&self, limit: Option<u64>) -> Result<Vec<ModuleSummary>, ServiceError> {
        let limit = limit.unwrap_or(DEFAULT_INDEX_LIMIT);
        let modules = ordered_by_device(pv_module::Entity::find())
            .limit(limit)
            .all(&*self.db)
            .await?;
        let names = short_names(&*self.db, modules.iter().map(|m| m.manufacturer_id)).await?;

        Ok(modules
            .into_iter()
            .map(|module| ModuleSummary {
                manufacturer_short_name: names
                    .get(&module.manufacturer_id)
                    .cloned()
                    .unwrap_or_default(),
                module,
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get_manufacturer_with_devices(
        &self,
        id: i32,
    ) -> Result<ManufacturerWithDevices, ServiceError> {
        let manufacturer = load_manufacturer_record(&*self.db, id).await?;
        let devices = pv_module::Entity::find()
            .filter(pv_module::Column::ManufacturerId.eq(id))
            .order_by_asc(pv_module::Column::ModelName)
            .order_by_asc(pv_module::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(ManufacturerWithDevices {
            manufacturer,
            devices,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_pv_module_with_datasheets(
        &self,
        id: i32,
    ) -> Result<PvModuleWithDatasheets, ServiceError> {
        let pv_module = load_pv_module_record(&*self.db, id).await?;
        let datasheets = by_power(
            pv_module_datasheet::Entity::find()
                .filter(pv_module_datasheet::Column::PvModuleId.eq(id)),
        )
        .all(&*self.db)
        .await?;

        Ok(PvModuleWithDatasheets {
            pv_module,
            datasheets,
        })
    }

    /// A datasheet is only found through the module it belongs to.
    #[instrument(skip(self))]
    pub async fn get_datasheet(
        &self,
        module_id: i32,
        datasheet_id: i32,
    ) -> Result<pv_module_datasheet::Model, ServiceError> {
        pv_module_datasheet::Entity::find_by_id(datasheet_id)
            .filter(pv_module_datasheet::Column::PvModuleId.eq(module_id))
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "Datasheet {} not found for PV module {}",
                    datasheet_id, module_id
                ))
            })
    }
}
