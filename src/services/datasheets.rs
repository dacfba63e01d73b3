use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{
    sea_query::NullOrdering, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use slog::Logger;
use tracing::instrument;
use utoipa::ToSchema;

use crate::{
    entities::{pv_module, pv_module_datasheet},
    errors::ServiceError,
    validation::{self, DIMENSION, ELECTRICAL},
};

use super::{page_offset, Page};

/// Editable datasheet fields. Electrical values take 2 decimal places,
/// physical values 3.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct DatasheetInput {
    pub pv_module_id: i32,
    #[schema(example = 2021)]
    pub year_published: Option<i32>,
    #[schema(example = "305.00")]
    pub p_max_stc: Option<Decimal>,
    pub eff_stc: Option<Decimal>,
    pub v_mp_stc: Option<Decimal>,
    pub i_mp_stc: Option<Decimal>,
    pub v_oc_stc: Option<Decimal>,
    pub i_sc_stc: Option<Decimal>,
    pub temp_co_p_max: Option<Decimal>,
    pub temp_co_v_oc: Option<Decimal>,
    pub temp_co_i_sc: Option<Decimal>,
    pub length: Option<Decimal>,
    pub width: Option<Decimal>,
    pub thickness: Option<Decimal>,
    pub weight: Option<Decimal>,
}

/// Highest rated power first; unrated revisions last.
pub(crate) fn by_power(query: Select<pv_module_datasheet::Entity>) -> Select<pv_module_datasheet::Entity> {
    query
        .order_by_with_nulls(
            pv_module_datasheet::Column::PMaxStc,
            Order::Desc,
            NullOrdering::Last,
        )
        .order_by_asc(pv_module_datasheet::Column::Id)
}

async fn apply_input<C: ConnectionTrait>(
    conn: &C,
    input: DatasheetInput,
    active: &mut pv_module_datasheet::ActiveModel,
) -> Result<(), ServiceError> {
    if pv_module::Entity::find_by_id(input.pv_module_id)
        .one(conn)
        .await?
        .is_none()
    {
        return Err(ServiceError::invalid_field(
            "pv_module_id",
            format!("PV module {} does not exist", input.pv_module_id),
        ));
    }

    let electrical = |field: &str, value| validation::check_decimal_opt(field, value, ELECTRICAL);
    let physical = |field: &str, value| validation::check_decimal_opt(field, value, DIMENSION);

    active.pv_module_id = Set(input.pv_module_id);
    active.year_published = Set(validation::check_small_count(
        "year_published",
        input.year_published,
    )?);
    active.p_max_stc = Set(electrical("p_max_stc", input.p_max_stc)?);
    active.eff_stc = Set(electrical("eff_stc", input.eff_stc)?);
    active.v_mp_stc = Set(electrical("v_mp_stc", input.v_mp_stc)?);
    active.i_mp_stc = Set(electrical("i_mp_stc", input.i_mp_stc)?);
    active.v_oc_stc = Set(electrical("v_oc_stc", input.v_oc_stc)?);
    active.i_sc_stc = Set(electrical("i_sc_stc", input.i_sc_stc)?);
    active.temp_co_p_max = Set(electrical("temp_co_p_max", input.temp_co_p_max)?);
    active.temp_co_v_oc = Set(electrical("temp_co_v_oc", input.temp_co_v_oc)?);
    active.temp_co_i_sc = Set(electrical("temp_co_i_sc", input.temp_co_i_sc)?);
    active.length = Set(physical("length", input.length)?);
    active.width = Set(physical("width", input.width)?);
    active.thickness = Set(physical("thickness", input.thickness)?);
    active.weight = Set(physical("weight", input.weight)?);
    Ok(())
}

#[derive(Clone)]
pub struct DatasheetService {
    db: Arc<DatabaseConnection>,
    logger: Logger,
}

impl DatasheetService {
    pub fn new(db: Arc<DatabaseConnection>, logger: Logger) -> Self {
        Self { db, logger }
    }

    #[instrument(skip(self, input), fields(pv_module_id = input.pv_module_id))]
    pub async fn create_datasheet(
        &self,
        input: DatasheetInput,
    ) -> Result<pv_module_datasheet::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let mut active = pv_module_datasheet::ActiveModel {
            ..Default::default()
        };
        apply_input(&txn, input, &mut active).await?;
        let created = active.insert(&txn).await?;
        txn.commit().await?;

        slog::info!(self.logger, "datasheet created";
            "datasheet_id" => created.id,
            "pv_module_id" => created.pv_module_id);
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get_datasheet(&self, id: i32) -> Result<pv_module_datasheet::Model, ServiceError> {
        pv_module_datasheet::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Datasheet", id))
    }

    #[instrument(skip(self, input))]
    pub async fn update_datasheet(
        &self,
        id: i32,
        input: DatasheetInput,
    ) -> Result<pv_module_datasheet::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let existing = pv_module_datasheet::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Datasheet", id))?;
        let mut active: pv_module_datasheet::ActiveModel = existing.into();
        apply_input(&txn, input, &mut active).await?;
        let updated = active.update(&txn).await?;
        txn.commit().await?;

        slog::info!(self.logger, "datasheet updated"; "datasheet_id" => id);
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_datasheet(&self, id: i32) -> Result<(), ServiceError> {
        let result = pv_module_datasheet::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("Datasheet", id));
        }

        slog::info!(self.logger, "datasheet deleted"; "datasheet_id" => id);
        Ok(())
    }

    /// Lists datasheets by module, highest rated power first.
    #[instrument(skip(self))]
    pub async fn list_datasheets(
        &self,
        pv_module_id: Option<i32>,
        page: u64,
        limit: u64,
    ) -> Result<Page<pv_module_datasheet::Model>, ServiceError> {
        let mut query = pv_module_datasheet::Entity::find();
        if let Some(module_id) = pv_module_id {
            query = query.filter(pv_module_datasheet::Column::PvModuleId.eq(module_id));
        }

        let total = query.clone().count(&*self.db).await?;
        let datasheets = by_power(query.order_by_asc(pv_module_datasheet::Column::PvModuleId))
            .offset(page_offset(page, limit))
            .limit(limit)
            .all(&*self.db)
            .await?;

        Ok((datasheets, total))
    }
}
