use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PV Modules API",
        version = "0.2.0",
        description = r#"
# Photovoltaic Module Catalog API

Reference data on PV module models: the companies that build and certify
them, manufacturing profiles, module specifications and datasheet revisions.

## Catalog

Read-only views under `/api/v1/modules`, `/api/v1/manufacturers` and
`/api/v1/reference`.

## Administration

Record maintenance under `/api/v1/admin`. When the server is configured with
an admin key, send it in the `X-API-Key` header.

## Decimals

Decimal measurements are serialized as strings carrying the column scale,
e.g. `"305.00"` for rated power and `"1.650"` for module length.

## Errors

Failures share one body shape:

```json
{
  "error": "Conflict",
  "message": "Cannot delete manufacturer 3: referenced by 2 pv module(s)",
  "timestamp": "2024-01-01T00:00:00Z"
}
```
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "catalog", description = "Read-only module catalog"),
        (name = "reference", description = "Choice lists for coded fields"),
        (name = "admin", description = "Record administration")
    ),
    paths(
        // Catalog
        crate::handlers::pv_modules::list_modules,
        crate::handlers::pv_modules::get_module,
        crate::handlers::pv_modules::get_module_datasheet,
        crate::handlers::manufacturers::get_manufacturer,
        crate::handlers::reference::list_choices,

        // Admin: companies
        crate::handlers::admin::companies::list_companies,
        crate::handlers::admin::companies::create_company,
        crate::handlers::admin::companies::get_company,
        crate::handlers::admin::companies::update_company,
        crate::handlers::admin::companies::delete_company,
        crate::handlers::admin::companies::extend_company,

        // Admin: manufacturers
        crate::handlers::admin::manufacturers::list_manufacturers,
        crate::handlers::admin::manufacturers::create_manufacturer,
        crate::handlers::admin::manufacturers::get_manufacturer,
        crate::handlers::admin::manufacturers::update_manufacturer,
        crate::handlers::admin::manufacturers::delete_manufacturer,

        // Admin: certifications
        crate::handlers::admin::certifications::list_certifications,
        crate::handlers::admin::certifications::create_certification,
        crate::handlers::admin::certifications::get_certification,
        crate::handlers::admin::certifications::update_certification,
        crate::handlers::admin::certifications::delete_certification,

        // Admin: manufacturing activities
        crate::handlers::admin::mfg_activities::list_mfg_activities,
        crate::handlers::admin::mfg_activities::create_mfg_activity,
        crate::handlers::admin::mfg_activities::get_mfg_activity,
        crate::handlers::admin::mfg_activities::update_mfg_activity,
        crate::handlers::admin::mfg_activities::delete_mfg_activity,

        // Admin: PV modules
        crate::handlers::admin::pv_modules::list_pv_modules,
        crate::handlers::admin::pv_modules::create_pv_module,
        crate::handlers::admin::pv_modules::get_pv_module,
        crate::handlers::admin::pv_modules::update_pv_module,
        crate::handlers::admin::pv_modules::delete_pv_module,

        // Admin: datasheets
        crate::handlers::admin::datasheets::list_datasheets,
        crate::handlers::admin::datasheets::create_datasheet,
        crate::handlers::admin::datasheets::get_datasheet,
        crate::handlers::admin::datasheets::update_datasheet,
        crate::handlers::admin::datasheets::delete_datasheet,

        // Admin: form layouts
        crate::handlers::admin::layouts::list_layouts,
        crate::handlers::admin::layouts::get_layout,
    ),
    components(
        schemas(
            // Inputs
            crate::services::companies::CompanyInput,
            crate::services::manufacturers::ManufacturerInput,
            crate::services::manufacturers::NewManufacturerInput,
            crate::services::certifications::CertificationInput,
            crate::services::mfg_activities::MfgActivityInput,
            crate::services::pv_modules::PvModuleInput,
            crate::services::datasheets::DatasheetInput,

            // Views
            crate::dto::CompanyResponse,
            crate::dto::ManufacturerResponse,
            crate::dto::ManufacturerListItem,
            crate::dto::ManufacturerWithDevicesResponse,
            crate::dto::MfgActivityResponse,
            crate::dto::CertificationResponse,
            crate::dto::PvModuleResponse,
            crate::dto::PvModuleListItem,
            crate::dto::ModuleListItem,
            crate::dto::DeviceSummary,
            crate::dto::PvModuleWithDatasheetsResponse,
            crate::dto::DatasheetResponse,
            crate::handlers::reference::ChoiceOption,
            crate::handlers::reference::ChoicesResponse,
            crate::handlers::admin::layouts::Layout,
            crate::handlers::admin::layouts::Panel,

            // Error types
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDocV1;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_catalog_and_admin_paths() {
        let openapi = ApiDocV1::openapi();
        let json = serde_json::to_string_pretty(&openapi).expect("serialize openapi");
        assert!(json.contains("PV Modules API"));
        assert!(json.contains("/api/v1/modules/{id}/datasheets/{datasheet_id}"));
        assert!(json.contains("/api/v1/admin/pv-modules"));
        assert!(json.contains("DatasheetResponse"));
    }
}
