use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    entities::pv_module_datasheet,
    validation::{DIMENSION, ELECTRICAL},
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": 2,
    "pv_module_id": 1,
    "year_published": 2021,
    "p_max_stc": "305.00",
    "eff_stc": "18.70",
    "length": "1650.000",
    "weight": "18.500"
}))]
pub struct DatasheetResponse {
    pub id: i32,
    pub pv_module_id: i32,
    pub year_published: Option<i32>,
    /// Max power output at STC in W
    pub p_max_stc: Option<Decimal>,
    /// Module efficiency at STC in percent
    pub eff_stc: Option<Decimal>,
    pub v_mp_stc: Option<Decimal>,
    pub i_mp_stc: Option<Decimal>,
    pub v_oc_stc: Option<Decimal>,
    pub i_sc_stc: Option<Decimal>,
    pub temp_co_p_max: Option<Decimal>,
    pub temp_co_v_oc: Option<Decimal>,
    pub temp_co_i_sc: Option<Decimal>,
    /// mm
    pub length: Option<Decimal>,
    /// mm
    pub width: Option<Decimal>,
    /// mm
    pub thickness: Option<Decimal>,
    /// kg
    pub weight: Option<Decimal>,
}

impl From<pv_module_datasheet::Model> for DatasheetResponse {
    fn from(m: pv_module_datasheet::Model) -> Self {
        Self {
            id: m.id,
            pv_module_id: m.pv_module_id,
            year_published: m.year_published,
            p_max_stc: ELECTRICAL.present_opt(m.p_max_stc),
            eff_stc: ELECTRICAL.present_opt(m.eff_stc),
            v_mp_stc: ELECTRICAL.present_opt(m.v_mp_stc),
            i_mp_stc: ELECTRICAL.present_opt(m.i_mp_stc),
            v_oc_stc: ELECTRICAL.present_opt(m.v_oc_stc),
            i_sc_stc: ELECTRICAL.present_opt(m.i_sc_stc),
            temp_co_p_max: ELECTRICAL.present_opt(m.temp_co_p_max),
            temp_co_v_oc: ELECTRICAL.present_opt(m.temp_co_v_oc),
            temp_co_i_sc: ELECTRICAL.present_opt(m.temp_co_i_sc),
            length: DIMENSION.present_opt(m.length),
            width: DIMENSION.present_opt(m.width),
            thickness: DIMENSION.present_opt(m.thickness),
            weight: DIMENSION.present_opt(m.weight),
        }
    }
}
