use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Any company or legal entity.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub legal_name: Option<String>,
    #[sea_orm(unique, indexed)]
    pub short_name: String,
    pub hq_city: Option<String>,
    pub hq_country: Option<String>,
    pub parent_company_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentCompanyId",
        to = "Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    ParentCompany,
    #[sea_orm(has_one = "super::manufacturer::Entity")]
    Manufacturer,
    #[sea_orm(has_many = "super::certification::Entity")]
    Certifications,
}

impl Related<super::manufacturer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Manufacturer.def()
    }
}

impl Related<super::certification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Certifications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
