use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use slog::Logger;
use tracing::instrument;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    entities::{
        certification,
        choices::{to_column, CellTech, CellType, Choice, DopingType},
        company, manufacturer, pv_module, pv_module_certification, pv_module_datasheet,
    },
    errors::ServiceError,
    validation::{self, TrimmedInput, ELECTRICAL},
};

use super::certifications::{self, CertificationRecord};
use super::{dedup_ids, page_offset, Page};

#[derive(Clone, Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct PvModuleInput {
    pub manufacturer_id: i32,
    #[validate(length(max = 50))]
    #[schema(example = "X1")]
    pub model_name: String,
    /// Rated max power bin in W
    #[schema(example = "310.00")]
    pub p_max: Option<Decimal>,
    /// Max system DC voltage
    pub v_sys_max: Option<Decimal>,
    pub cell_count: Option<i32>,
    /// Cell type code; `""` means unspecified, `null` means absent
    #[schema(example = "Mono_Si")]
    pub cell_type: Option<String>,
    pub doping_type: Option<String>,
    pub cell_tech: Option<String>,
    pub is_bifacial: Option<bool>,
    pub has_frame: Option<bool>,
    pub has_arcoat: Option<bool>,
    #[serde(default)]
    pub certification_ids: Vec<i32>,
    pub comments: Option<String>,
}

impl TrimmedInput for PvModuleInput {
    fn trim_text(&mut self) {
        validation::trim_in_place(&mut self.model_name);
    }
}

/// A module with its manufacturer's short name and certifications.
#[derive(Clone, Debug, Serialize)]
pub struct PvModuleRecord {
    pub module: pv_module::Model,
    pub manufacturer_short_name: String,
    pub certifications: Vec<CertificationRecord>,
}

/// Admin list projection.
#[derive(Clone, Debug, Serialize)]
pub struct PvModuleListRow {
    pub id: i32,
    pub manufacturer: String,
    pub model_name: String,
    pub p_max: Option<Decimal>,
    pub cell_count: Option<i32>,
    pub cell_type: Option<String>,
    pub cell_tech: Option<String>,
    pub is_bifacial: Option<bool>,
}

/// Orders devices by manufacturer short name, then model name.
pub(crate) fn ordered_by_device(query: Select<pv_module::Entity>) -> Select<pv_module::Entity> {
    query
        .join(JoinType::InnerJoin, pv_module::Relation::Manufacturer.def())
        .join(JoinType::InnerJoin, manufacturer::Relation::Company.def())
        .order_by_asc(company::Column::ShortName)
        .order_by_asc(pv_module::Column::ModelName)
        .order_by_asc(pv_module::Column::Id)
}

/// Short names keyed by company id.
pub(crate) async fn short_names<C: ConnectionTrait>(
    conn: &C,
    ids: impl IntoIterator<Item = i32>,
) -> Result<HashMap<i32, String>, ServiceError> {
    let ids: Vec<i32> = ids.into_iter().collect::<HashSet<_>>().into_iter().collect();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    Ok(company::Entity::find()
        .filter(company::Column::Id.is_in(ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|c| (c.id, c.short_name))
        .collect())
}

pub(crate) async fn load_pv_module_record<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<PvModuleRecord, ServiceError> {
    let module = pv_module::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::not_found("PV module", id))?;

    let manufacturer_short_name = company::Entity::find_by_id(module.manufacturer_id)
        .one(conn)
        .await?
        .map(|c| c.short_name)
        .unwrap_or_default();

    let linked: Vec<i32> = pv_module_certification::Entity::find()
        .filter(pv_module_certification::Column::PvModuleId.eq(id))
        .all(conn)
        .await?
        .into_iter()
        .map(|link| link.certification_id)
        .collect();
    let certifications = if linked.is_empty() {
        Vec::new()
    } else {
        certifications::ordered(
            certification::Entity::find().filter(certification::Column::Id.is_in(linked)),
        )
        .all(conn)
        .await?
        .into_iter()
        .map(CertificationRecord::from)
        .collect()
    };

    Ok(PvModuleRecord {
        module,
        manufacturer_short_name,
        certifications,
    })
}

/// Validates `input` onto `active` and returns the certification ids to link.
async fn apply_input<C: ConnectionTrait>(
    conn: &C,
    input: PvModuleInput,
    active: &mut pv_module::ActiveModel,
) -> Result<Vec<i32>, ServiceError> {
    let input = input.validate_trimmed()?;
    let model_name = validation::required_text("model_name", &input.model_name)?;

    if manufacturer::Entity::find_by_id(input.manufacturer_id)
        .one(conn)
        .await?
        .is_none()
    {
        return Err(ServiceError::invalid_field(
            "manufacturer_id",
            format!("manufacturer {} does not exist", input.manufacturer_id),
        ));
    }

    let cell_type = Choice::<CellType>::parse_optional(input.cell_type.as_deref())?;
    let doping_type = Choice::<DopingType>::parse_optional(input.doping_type.as_deref())?;
    let cell_tech = Choice::<CellTech>::parse_optional(input.cell_tech.as_deref())?;

    let certification_ids = dedup_ids(&input.certification_ids);
    if !certification_ids.is_empty() {
        let found: HashSet<i32> = certification::Entity::find()
            .filter(certification::Column::Id.is_in(certification_ids.clone()))
            .all(conn)
            .await?
            .into_iter()
            .map(|c| c.id)
            .collect();
        if let Some(missing) = certification_ids.iter().find(|id| !found.contains(id)) {
            return Err(ServiceError::invalid_field(
                "certification_ids",
                format!("certification {} does not exist", missing),
            ));
        }
    }

    active.manufacturer_id = Set(input.manufacturer_id);
    active.model_name = Set(model_name);
    active.p_max = Set(validation::check_decimal_opt("p_max", input.p_max, ELECTRICAL)?);
    active.v_sys_max = Set(validation::check_decimal_opt(
        "v_sys_max",
        input.v_sys_max,
        ELECTRICAL,
    )?);
    active.cell_count = Set(validation::check_small_count("cell_count", input.cell_count)?);
    active.cell_type = Set(to_column(cell_type));
    active.doping_type = Set(to_column(doping_type));
    active.cell_tech = Set(to_column(cell_tech));
    active.is_bifacial = Set(input.is_bifacial);
    active.has_frame = Set(input.has_frame);
    active.has_arcoat = Set(input.has_arcoat);
    active.comments = Set(validation::optional_text(input.comments));

    Ok(certification_ids)
}

async fn link_certifications<C: ConnectionTrait>(
    conn: &C,
    pv_module_id: i32,
    certification_ids: Vec<i32>,
) -> Result<(), ServiceError> {
    pv_module_certification::Entity::delete_many()
        .filter(pv_module_certification::Column::PvModuleId.eq(pv_module_id))
        .exec(conn)
        .await?;
    if !certification_ids.is_empty() {
        pv_module_certification::Entity::insert_many(certification_ids.into_iter().map(
            |certification_id| pv_module_certification::ActiveModel {
                pv_module_id: Set(pv_module_id),
                certification_id: Set(certification_id),
            },
        ))
        .exec_without_returning(conn)
        .await?;
    }
    Ok(())
}

#[derive(Clone)]
pub struct PvModuleService {
    db: Arc<DatabaseConnection>,
    logger: Logger,
}

impl PvModuleService {
    pub fn new(db: Arc<DatabaseConnection>, logger: Logger) -> Self {
        Self { db, logger }
    }

    #[instrument(skip(self, input), fields(model_name = %input.model_name))]
    pub async fn create_pv_module(
        &self,
        input: PvModuleInput,
    ) -> Result<PvModuleRecord, ServiceError> {
        let txn = self.db.begin().await?;
        let mut active = pv_module::ActiveModel {
            ..Default::default()
        };
        let certification_ids = apply_input(&txn, input, &mut active).await?;
        let created = active.insert(&txn).await?;
        link_certifications(&txn, created.id, certification_ids).await?;
        let record = load_pv_module_record(&txn, created.id).await?;
        txn.commit().await?;

        slog::info!(self.logger, "pv module created";
            "pv_module_id" => created.id,
            "manufacturer_id" => created.manufacturer_id,
            "model_name" => &created.model_name);
        Ok(record)
    }

    #[instrument(skip(self))]
    pub async fn get_pv_module(&self, id: i32) -> Result<PvModuleRecord, ServiceError> {
        load_pv_module_record(&*self.db, id).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_pv_module(
        &self,
        id: i32,
        input: PvModuleInput,
    ) -> Result<PvModuleRecord, ServiceError> {
        let txn = self.db.begin().await?;
        let existing = pv_module::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("PV module", id))?;
        let mut active: pv_module::ActiveModel = existing.into();
        let certification_ids = apply_input(&txn, input, &mut active).await?;
        active.update(&txn).await?;
        link_certifications(&txn, id, certification_ids).await?;
        let record = load_pv_module_record(&txn, id).await?;
        txn.commit().await?;

        slog::info!(self.logger, "pv module updated"; "pv_module_id" => id);
        Ok(record)
    }

    /// Deletes a module together with its datasheets and certification
    /// links, all or nothing.
    #[instrument(skip(self))]
    pub async fn delete_pv_module(&self, id: i32) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;
        pv_module::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("PV module", id))?;

        let datasheets = pv_module_datasheet::Entity::delete_many()
            .filter(pv_module_datasheet::Column::PvModuleId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;
        pv_module_certification::Entity::delete_many()
            .filter(pv_module_certification::Column::PvModuleId.eq(id))
            .exec(&txn)
            .await?;
        pv_module::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        slog::info!(self.logger, "pv module deleted";
            "pv_module_id" => id,
            "datasheets_deleted" => datasheets);
        Ok(())
    }

    /// Admin list ordered by manufacturer then model name.
    #[instrument(skip(self))]
    pub async fn list_pv_modules(
        &self,
        search: Option<&str>,
        cell_type: Option<&str>,
        page: u64,
        limit: u64,
    ) -> Result<Page<PvModuleListRow>, ServiceError> {
        let mut query = pv_module::Entity::find();
        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(pv_module::Column::ModelName.contains(term));
        }
        if let Some(raw) = cell_type {
            let choice = Choice::<CellType>::parse(raw)?;
            query = query.filter(pv_module::Column::CellType.eq(choice.as_str()));
        }

        let total = query.clone().count(&*self.db).await?;
        let modules = ordered_by_device(query)
            .offset(page_offset(page, limit))
            .limit(limit)
            .all(&*self.db)
            .await?;
        let names = short_names(&*self.db, modules.iter().map(|m| m.manufacturer_id)).await?;

        let items = modules
            .into_iter()
            .map(|m| PvModuleListRow {
                id: m.id,
                manufacturer: names.get(&m.manufacturer_id).cloned().unwrap_or_default(),
                model_name: m.model_name,
                p_max: ELECTRICAL.present_opt(m.p_max),
                cell_count: m.cell_count,
                cell_type: m.cell_type,
                cell_tech: m.cell_tech,
                is_bifacial: m.is_bifacial,
            })
            .collect();

        Ok((items, total))
    }
}
