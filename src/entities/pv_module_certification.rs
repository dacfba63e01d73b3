use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pv_module_certifications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub pv_module_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub certification_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pv_module::Entity",
        from = "Column::PvModuleId",
        to = "super::pv_module::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    PvModule,
    #[sea_orm(
        belongs_to = "super::certification::Entity",
        from = "Column::CertificationId",
        to = "super::certification::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Certification,
}

impl Related<super::pv_module::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PvModule.def()
    }
}

impl Related<super::certification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Certification.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
