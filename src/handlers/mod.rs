pub mod admin;
pub mod common;
pub mod manufacturers;
pub mod pv_modules;
pub mod reference;

use sea_orm::DatabaseConnection;
use slog::Logger;
use std::sync::Arc;

use crate::services::{
    CatalogService, CertificationService, CompanyService, DatasheetService, ManufacturerService,
    MfgActivityService, PvModuleService,
};

pub use crate::AppState;

/// Services layer used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub companies: Arc<CompanyService>,
    pub manufacturers: Arc<ManufacturerService>,
    pub certifications: Arc<CertificationService>,
    pub mfg_activities: Arc<MfgActivityService>,
    pub pv_modules: Arc<PvModuleService>,
    pub datasheets: Arc<DatasheetService>,
    pub catalog: Arc<CatalogService>,
}

impl AppServices {
    /// Builds every service over one connection pool. Each service logs
    /// through a child of `base_logger` tagged with its component name.
    pub fn new(db: Arc<DatabaseConnection>, base_logger: Logger) -> Self {
        let component = |name: &'static str| base_logger.new(slog::o!("component" => name));

        Self {
            companies: Arc::new(CompanyService::new(db.clone(), component("company_service"))),
            manufacturers: Arc::new(ManufacturerService::new(
                db.clone(),
                component("manufacturer_service"),
            )),
            certifications: Arc::new(CertificationService::new(
                db.clone(),
                component("certification_service"),
            )),
            mfg_activities: Arc::new(MfgActivityService::new(
                db.clone(),
                component("mfg_activity_service"),
            )),
            pv_modules: Arc::new(PvModuleService::new(
                db.clone(),
                component("pv_module_service"),
            )),
            datasheets: Arc::new(DatasheetService::new(
                db.clone(),
                component("datasheet_service"),
            )),
            catalog: Arc::new(CatalogService::new(db)),
        }
    }

    /// Services that log nowhere; for tests and tools.
    pub fn with_discard_logger(db: Arc<DatabaseConnection>) -> Self {
        Self::new(db, Logger::root(slog::Discard, slog::o!()))
    }
}
