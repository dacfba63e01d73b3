pub mod certification;
pub mod choices;
pub mod company;
pub mod device;
pub mod manufacturer;
pub mod manufacturer_country;
pub mod manufacturer_mfg_activity;
pub mod mfg_activity;
pub mod pv_module;
pub mod pv_module_certification;
pub mod pv_module_datasheet;

pub use choices::{CellTech, CellType, Choice, ChoiceCode, DopingType};
pub use device::Device;
