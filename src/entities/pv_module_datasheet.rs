use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Published datasheet revision of a PV module. Electrical values are
/// measured at standard testing conditions (25C, 1kW/m^2).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pv_module_datasheets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub pv_module_id: i32,
    pub year_published: Option<i32>,
    #[sea_orm(column_type = "Decimal(Some((6, 2)))", nullable)]
    pub p_max_stc: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((6, 2)))", nullable)]
    pub eff_stc: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((6, 2)))", nullable)]
    pub v_mp_stc: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((6, 2)))", nullable)]
    pub i_mp_stc: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((6, 2)))", nullable)]
    pub v_oc_stc: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((6, 2)))", nullable)]
    pub i_sc_stc: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((6, 2)))", nullable)]
    pub temp_co_p_max: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((6, 2)))", nullable)]
    pub temp_co_v_oc: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((6, 2)))", nullable)]
    pub temp_co_i_sc: Option<Decimal>,
    /// Longest module dimension in mm
    #[sea_orm(column_type = "Decimal(Some((6, 3)))", nullable)]
    pub length: Option<Decimal>,
    /// Second longest module dimension in mm
    #[sea_orm(column_type = "Decimal(Some((6, 3)))", nullable)]
    pub width: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((6, 3)))", nullable)]
    pub thickness: Option<Decimal>,
    /// Weight in kg
    #[sea_orm(column_type = "Decimal(Some((6, 3)))", nullable)]
    pub weight: Option<Decimal>,
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
}

impl Related<super::pv_module::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PvModule.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
