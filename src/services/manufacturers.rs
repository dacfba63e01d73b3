use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use slog::Logger;
use tracing::instrument;
use utoipa::ToSchema;

use crate::{
    entities::{company, manufacturer, manufacturer_country, manufacturer_mfg_activity, mfg_activity},
    errors::ServiceError,
    validation::{self, CAPACITY},
};

use super::companies::{delete_company_identity, insert_company, replace_company, CompanyInput};
use super::{dedup_ids, page_offset, Page};

/// Manufacturer-only fields layered over a company.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ManufacturerInput {
    pub mfg_experience: Option<String>,
    /// Annual manufacturing capacity in GW, at most 3 decimal places
    #[schema(example = "5.000")]
    pub mfg_capacity_yr: Option<Decimal>,
    /// ISO 3166-1 alpha-2 codes of manufacturing countries
    #[serde(default)]
    #[schema(example = json!(["CN", "VN"]))]
    pub mfg_country: Vec<String>,
    #[serde(default)]
    pub mfg_activity_ids: Vec<i32>,
    pub comments: Option<String>,
}

/// Company and manufacturer fields written together.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct NewManufacturerInput {
    #[serde(flatten)]
    pub company: CompanyInput,
    #[serde(flatten)]
    pub manufacturer: ManufacturerInput,
}

/// A manufacturer as one combined record.
#[derive(Clone, Debug, Serialize)]
pub struct ManufacturerRecord {
    pub company: company::Model,
    pub parent_company: Option<company::Model>,
    pub manufacturer: manufacturer::Model,
    pub mfg_country: Vec<String>,
    pub mfg_activities: Vec<mfg_activity::Model>,
}

/// Admin list projection.
#[derive(Clone, Debug, Serialize)]
pub struct ManufacturerListRow {
    pub company_id: i32,
    pub short_name: String,
    pub parent_company: Option<String>,
    pub hq_country: Option<String>,
    pub mfg_capacity_yr: Option<Decimal>,
    /// Activity names joined with ", "
    pub mfg_activities: String,
}

struct CleanManufacturer {
    mfg_experience: Option<String>,
    mfg_capacity_yr: Option<Decimal>,
    mfg_country: Vec<String>,
    mfg_activity_ids: Vec<i32>,
    comments: Option<String>,
}

async fn clean_manufacturer<C: ConnectionTrait>(
    conn: &C,
    input: ManufacturerInput,
) -> Result<CleanManufacturer, ServiceError> {
    let mfg_capacity_yr =
        validation::check_decimal_opt("mfg_capacity_yr", input.mfg_capacity_yr, CAPACITY)?;
    let mfg_country = validation::normalize_country_set("mfg_country", &input.mfg_country)?;

    let mfg_activity_ids = dedup_ids(&input.mfg_activity_ids);
    if !mfg_activity_ids.is_empty() {
        let found: HashSet<i32> = mfg_activity::Entity::find()
            .filter(mfg_activity::Column::Id.is_in(mfg_activity_ids.clone()))
            .all(conn)
            .await?
            .into_iter()
            .map(|activity| activity.id)
            .collect();
        if let Some(missing) = mfg_activity_ids.iter().find(|id| !found.contains(id)) {
            return Err(ServiceError::invalid_field(
                "mfg_activity_ids",
                format!("mfg activity {} does not exist", missing),
            ));
        }
    }

    Ok(CleanManufacturer {
        mfg_experience: validation::optional_text(input.mfg_experience),
        mfg_capacity_yr,
        mfg_country,
        mfg_activity_ids,
        comments: validation::optional_text(input.comments),
    })
}

async fn write_manufacturer<C: ConnectionTrait>(
    conn: &C,
    company_id: i32,
    clean: CleanManufacturer,
    existing: Option<manufacturer::Model>,
) -> Result<(), ServiceError> {
    match existing {
        Some(model) => {
            let mut active: manufacturer::ActiveModel = model.into();
            active.mfg_experience = Set(clean.mfg_experience);
            active.mfg_capacity_yr = Set(clean.mfg_capacity_yr);
            active.comments = Set(clean.comments);
            active.update(conn).await?;
        }
        None => {
            manufacturer::ActiveModel {
                company_id: Set(company_id),
                mfg_experience: Set(clean.mfg_experience),
                mfg_capacity_yr: Set(clean.mfg_capacity_yr),
                comments: Set(clean.comments),
            }
            .insert(conn)
            .await?;
        }
    }

    manufacturer_country::Entity::delete_many()
        .filter(manufacturer_country::Column::ManufacturerId.eq(company_id))
        .exec(conn)
        .await?;
    if !clean.mfg_country.is_empty() {
        manufacturer_country::Entity::insert_many(clean.mfg_country.into_iter().map(|code| {
            manufacturer_country::ActiveModel {
                manufacturer_id: Set(company_id),
                country_code: Set(code),
            }
        }))
        .exec_without_returning(conn)
        .await?;
    }

    manufacturer_mfg_activity::Entity::delete_many()
        .filter(manufacturer_mfg_activity::Column::ManufacturerId.eq(company_id))
        .exec(conn)
        .await?;
    if !clean.mfg_activity_ids.is_empty() {
        manufacturer_mfg_activity::Entity::insert_many(clean.mfg_activity_ids.into_iter().map(
            |activity_id| manufacturer_mfg_activity::ActiveModel {
                manufacturer_id: Set(company_id),
                mfg_activity_id: Set(activity_id),
            },
        ))
        .exec_without_returning(conn)
        .await?;
    }

    Ok(())
}

/// Loads the combined record for manufacturer `id`.
pub(crate) async fn load_manufacturer_record<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<ManufacturerRecord, ServiceError> {
    let (manufacturer, company) = manufacturer::Entity::find_by_id(id)
        .find_also_related(company::Entity)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::not_found("Manufacturer", id))?;
    let company = company.ok_or_else(|| {
        ServiceError::InternalError(format!("manufacturer {} has no company row", id))
    })?;

    let parent_company = match company.parent_company_id {
        Some(parent_id) => company::Entity::find_by_id(parent_id).one(conn).await?,
        None => None,
    };

    let mfg_country = manufacturer_country::Entity::find()
        .filter(manufacturer_country::Column::ManufacturerId.eq(id))
        .order_by_asc(manufacturer_country::Column::CountryCode)
        .all(conn)
        .await?
        .into_iter()
        .map(|row| row.country_code)
        .collect();

    let mfg_activities = manufacturer
        .find_related(mfg_activity::Entity)
        .order_by_asc(mfg_activity::Column::Name)
        .all(conn)
        .await?;

    Ok(ManufacturerRecord {
        company,
        parent_company,
        manufacturer,
        mfg_country,
        mfg_activities,
    })
}

/// Manufacturer registry operations. A manufacturer shares its identity
/// with a company row.
#[derive(Clone)]
pub struct ManufacturerService {
    db: Arc<DatabaseConnection>,
    logger: Logger,
}

impl ManufacturerService {
    pub fn new(db: Arc<DatabaseConnection>, logger: Logger) -> Self {
        Self { db, logger }
    }

    /// Creates the company and its manufacturer extension in one write.
    #[instrument(skip(self, input), fields(short_name = %input.company.short_name))]
    pub async fn create_manufacturer(
        &self,
        input: NewManufacturerInput,
    ) -> Result<ManufacturerRecord, ServiceError> {
        let txn = self.db.begin().await?;
        let company = insert_company(&txn, input.company).await?;
        let clean = clean_manufacturer(&txn, input.manufacturer).await?;
        write_manufacturer(&txn, company.id, clean, None).await?;
        let record = load_manufacturer_record(&txn, company.id).await?;
        txn.commit().await?;

        slog::info!(self.logger, "manufacturer created";
            "company_id" => record.company.id,
            "short_name" => &record.company.short_name);
        Ok(record)
    }

    /// Promotes an existing company to a manufacturer.
    #[instrument(skip(self, input))]
    pub async fn extend_company(
        &self,
        company_id: i32,
        input: ManufacturerInput,
    ) -> Result<ManufacturerRecord, ServiceError> {
        let txn = self.db.begin().await?;
        company::Entity::find_by_id(company_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Company", company_id))?;
        if manufacturer::Entity::find_by_id(company_id)
            .one(&txn)
            .await?
            .is_some()
        {
            return Err(ServiceError::invalid_field(
                "company_id",
                format!("company {} is already a manufacturer", company_id),
            ));
        }

        let clean = clean_manufacturer(&txn, input).await?;
        write_manufacturer(&txn, company_id, clean, None).await?;
        let record = load_manufacturer_record(&txn, company_id).await?;
        txn.commit().await?;

        slog::info!(self.logger, "company extended to manufacturer"; "company_id" => company_id);
        Ok(record)
    }

    #[instrument(skip(self))]
    pub async fn get_manufacturer(&self, id: i32) -> Result<ManufacturerRecord, ServiceError> {
        load_manufacturer_record(&*self.db, id).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_manufacturer(
        &self,
        id: i32,
        input: NewManufacturerInput,
    ) -> Result<ManufacturerRecord, ServiceError> {
        let txn = self.db.begin().await?;
        let existing = manufacturer::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Manufacturer", id))?;
        replace_company(&txn, id, input.company).await?;
        let clean = clean_manufacturer(&txn, input.manufacturer).await?;
        write_manufacturer(&txn, id, clean, Some(existing)).await?;
        let record = load_manufacturer_record(&txn, id).await?;
        txn.commit().await?;

        slog::info!(self.logger, "manufacturer updated"; "company_id" => id);
        Ok(record)
    }

    /// Deletes the whole company identity behind a manufacturer.
    #[instrument(skip(self))]
    pub async fn delete_manufacturer(&self, id: i32) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;
        manufacturer::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Manufacturer", id))?;
        let deleted = delete_company_identity(&txn, id, "manufacturer")
            .await
            .map_err(|err| {
                if matches!(err, ServiceError::ReferentialIntegrity { .. }) {
                    slog::warn!(self.logger, "manufacturer delete blocked"; "company_id" => id, "reason" => %err);
                }
                err
            })?;
        txn.commit().await?;

        slog::info!(self.logger, "manufacturer deleted";
            "company_id" => id,
            "short_name" => &deleted.short_name);
        Ok(())
    }

    /// Admin list ordered by short name.
    #[instrument(skip(self))]
    pub async fn list_manufacturers(
        &self,
        search: Option<&str>,
        page: u64,
        limit: u64,
    ) -> Result<Page<ManufacturerListRow>, ServiceError> {
        let db = &*self.db;
        let mut query = manufacturer::Entity::find().find_also_related(company::Entity);
        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(company::Column::ShortName.contains(term));
        }

        let total = query.clone().count(db).await?;
        let rows = query
            .order_by_asc(company::Column::ShortName)
            .offset(page_offset(page, limit))
            .limit(limit)
            .all(db)
            .await?;

        let ids: Vec<i32> = rows.iter().map(|(m, _)| m.company_id).collect();
        let parent_ids: Vec<i32> = rows
            .iter()
            .filter_map(|(_, c)| c.as_ref().and_then(|c| c.parent_company_id))
            .collect();

        let parents: HashMap<i32, String> = if parent_ids.is_empty() {
            HashMap::new()
        } else {
            company::Entity::find()
                .filter(company::Column::Id.is_in(parent_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|c| (c.id, c.short_name))
                .collect()
        };

        let mut activities: BTreeMap<i32, Vec<String>> = BTreeMap::new();
        if !ids.is_empty() {
            let links = manufacturer_mfg_activity::Entity::find()
                .filter(manufacturer_mfg_activity::Column::ManufacturerId.is_in(ids))
                .find_also_related(mfg_activity::Entity)
                .order_by_asc(mfg_activity::Column::Name)
                .all(db)
                .await?;
            for (link, activity) in links {
                if let Some(activity) = activity {
                    activities
                        .entry(link.manufacturer_id)
                        .or_default()
                        .push(activity.name);
                }
            }
        }

        let items = rows
            .into_iter()
            .filter_map(|(manufacturer, company)| {
                let company = company?;
                Some(ManufacturerListRow {
                    company_id: manufacturer.company_id,
                    short_name: company.short_name,
                    parent_company: company
                        .parent_company_id
                        .and_then(|id| parents.get(&id).cloned()),
                    hq_country: company.hq_country,
                    mfg_capacity_yr: CAPACITY.present_opt(manufacturer.mfg_capacity_yr),
                    mfg_activities: activities
                        .remove(&manufacturer.company_id)
                        .unwrap_or_default()
                        .join(", "),
                })
            })
            .collect();

        Ok((items, total))
    }
}
