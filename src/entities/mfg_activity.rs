use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "mfg_activities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub comments: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::manufacturer_mfg_activity::Entity")]
    ManufacturerLinks,
}

impl Related<super::manufacturer_mfg_activity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ManufacturerLinks.def()
    }
}

impl Related<super::manufacturer::Entity> for Entity {
    fn to() -> RelationDef {
        super::manufacturer_mfg_activity::Relation::Manufacturer.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::manufacturer_mfg_activity::Relation::MfgActivity.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
