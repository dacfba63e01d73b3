use super::pv_module;

/// Shape shared by every manufactured product in the catalog.
///
/// Devices sort by manufacturer, then model name.
pub trait Device {
    fn manufacturer_id(&self) -> i32;

    fn model_name(&self) -> &str;

    /// Display label, e.g. `"AcmeCo X1"`.
    fn label(&self, manufacturer_short_name: &str) -> String {
        format!("{} {}", manufacturer_short_name, self.model_name())
    }
}

impl Device for pv_module::Model {
    fn manufacturer_id(&self) -> i32 {
        self.manufacturer_id
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
