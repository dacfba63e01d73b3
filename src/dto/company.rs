use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::company;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": 1,
    "legal_name": "Acme Solar Co., Ltd.",
    "short_name": "AcmeCo",
    "hq_city": "Wuxi",
    "hq_country": "CN",
    "parent_company_id": null
}))]
pub struct CompanyResponse {
    pub id: i32,
    pub legal_name: Option<String>,
    pub short_name: String,
    pub hq_city: Option<String>,
    pub hq_country: Option<String>,
    pub parent_company_id: Option<i32>,
}

impl From<company::Model> for CompanyResponse {
    fn from(model: company::Model) -> Self {
        Self {
            id: model.id,
            legal_name: model.legal_name,
            short_name: model.short_name,
            hq_city: model.hq_city,
            hq_country: model.hq_country,
            parent_company_id: model.parent_company_id,
        }
    }
}
