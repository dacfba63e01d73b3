use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "manufacturer_mfg_activities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub manufacturer_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub mfg_activity_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::manufacturer::Entity",
        from = "Column::ManufacturerId",
        to = "super::manufacturer::Column::CompanyId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Manufacturer,
    #[sea_orm(
        belongs_to = "super::mfg_activity::Entity",
        from = "Column::MfgActivityId",
        to = "super::mfg_activity::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    MfgActivity,
}

impl Related<super::manufacturer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Manufacturer.def()
    }
}

impl Related<super::mfg_activity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MfgActivity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
