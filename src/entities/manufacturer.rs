use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Manufacturer extension of a company. Shares the company's identity:
/// `company_id` is both the primary key and the link to `companies`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "manufacturers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub company_id: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub mfg_experience: Option<String>,
    /// Annual manufacturing capacity in GW
    #[sea_orm(column_type = "Decimal(Some((6, 3)))", nullable)]
    pub mfg_capacity_yr: Option<Decimal>,
    #[sea_orm(column_type = "Text", nullable)]
    pub comments: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::company::Entity",
        from = "Column::CompanyId",
        to = "super::company::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Company,
    #[sea_orm(has_many = "super::manufacturer_country::Entity")]
    Countries,
    #[sea_orm(has_many = "super::pv_module::Entity")]
    PvModules,
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<super::manufacturer_country::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Countries.def()
    }
}

impl Related<super::pv_module::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PvModules.def()
    }
}

impl Related<super::mfg_activity::Entity> for Entity {
    fn to() -> RelationDef {
        super::manufacturer_mfg_activity::Relation::MfgActivity.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::manufacturer_mfg_activity::Relation::Manufacturer.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
