use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::services::certifications::CertificationRecord;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CertificationResponse {
    pub id: i32,
    pub body_id: Option<i32>,
    /// Short name of the certifying body
    #[schema(example = "TUV")]
    pub body: Option<String>,
    #[schema(example = "IEC 61215")]
    pub standard: String,
    #[schema(example = "2021")]
    pub version: Option<String>,
    pub comments: Option<String>,
}

impl From<CertificationRecord> for CertificationResponse {
    fn from(record: CertificationRecord) -> Self {
        let c = record.certification;
        Self {
            id: c.id,
            body_id: c.body_id,
            body: record.body_short_name,
            standard: c.standard,
            version: c.version,
            comments: c.comments,
        }
    }
}
