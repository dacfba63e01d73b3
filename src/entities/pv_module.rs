use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A photovoltaic panel model.
///
/// `cell_type`, `doping_type` and `cell_tech` hold raw codes: `None` is
/// NULL, `Some("")` is blank. See [`super::choices`] for the typed view.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pv_modules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub manufacturer_id: i32,
    pub model_name: String,
    /// Rated max power bin in W
    #[sea_orm(column_type = "Decimal(Some((6, 2)))", nullable)]
    pub p_max: Option<Decimal>,
    /// Max system DC voltage
    #[sea_orm(column_type = "Decimal(Some((6, 2)))", nullable)]
    pub v_sys_max: Option<Decimal>,
    pub cell_count: Option<i32>,
    pub cell_type: Option<String>,
    pub doping_type: Option<String>,
    pub cell_tech: Option<String>,
    pub is_bifacial: Option<bool>,
    pub has_frame: Option<bool>,
    pub has_arcoat: Option<bool>,
    #[sea_orm(column_type = "Text", nullable)]
    pub comments: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::manufacturer::Entity",
        from = "Column::ManufacturerId",
        to = "super::manufacturer::Column::CompanyId",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Manufacturer,
    #[sea_orm(has_many = "super::pv_module_datasheet::Entity")]
    Datasheets,
    #[sea_orm(has_many = "super::pv_module_certification::Entity")]
    CertificationLinks,
}

impl Related<super::manufacturer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Manufacturer.def()
    }
}

impl Related<super::pv_module_datasheet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Datasheets.def()
    }
}

impl Related<super::pv_module_certification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CertificationLinks.def()
    }
}

impl Related<super::certification::Entity> for Entity {
    fn to() -> RelationDef {
        super::pv_module_certification::Relation::Certification.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::pv_module_certification::Relation::PvModule.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
