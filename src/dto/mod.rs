//! JSON views of catalog records.
//!
//! Decimal fields are rescaled to their column precision on the way out so
//! `5` is always rendered `"5.000"` whatever the backend returns.

pub mod certification;
pub mod company;
pub mod datasheet;
pub mod manufacturer;
pub mod pv_module;

pub use certification::CertificationResponse;
pub use company::CompanyResponse;
pub use datasheet::DatasheetResponse;
pub use manufacturer::{
    ManufacturerListItem, ManufacturerResponse, ManufacturerWithDevicesResponse,
    MfgActivityResponse,
};
pub use pv_module::{DeviceSummary, ModuleListItem, PvModuleListItem, PvModuleResponse, PvModuleWithDatasheetsResponse};
