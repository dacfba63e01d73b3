use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A standard (with optional version) certified by a body company.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "certifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub body_id: Option<i32>,
    pub standard: String,
    pub version: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub comments: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::company::Entity",
        from = "Column::BodyId",
        to = "super::company::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Body,
    #[sea_orm(has_many = "super::pv_module_certification::Entity")]
    ModuleLinks,
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Body.def()
    }
}

impl Related<super::pv_module_certification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ModuleLinks.def()
    }
}

impl Related<super::pv_module::Entity> for Entity {
    fn to() -> RelationDef {
        super::pv_module_certification::Relation::PvModule.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::pv_module_certification::Relation::Certification.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
