use std::sync::Arc;

use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use slog::Logger;
use tracing::instrument;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    entities::{
        certification, company, manufacturer, manufacturer_country, manufacturer_mfg_activity,
        pv_module,
    },
    errors::ServiceError,
    validation::{self, TrimmedInput},
};

use super::{page_offset, Page};

/// Editable fields of a company.
#[derive(Clone, Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CompanyInput {
    #[validate(length(max = 50))]
    pub legal_name: Option<String>,
    /// Display identity and sort key; unique
    #[validate(length(max = 20))]
    #[schema(example = "AcmeCo")]
    pub short_name: String,
    #[validate(length(max = 50))]
    pub hq_city: Option<String>,
    /// ISO 3166-1 alpha-2 code
    #[schema(example = "CN")]
    pub hq_country: Option<String>,
    pub parent_company_id: Option<i32>,
}

impl TrimmedInput for CompanyInput {
    fn trim_text(&mut self) {
        validation::trim_opt_in_place(&mut self.legal_name);
        validation::trim_in_place(&mut self.short_name);
        validation::trim_opt_in_place(&mut self.hq_city);
        validation::trim_opt_in_place(&mut self.hq_country);
    }
}

/// Validated company fields ready to persist.
#[derive(Clone, Debug)]
pub(crate) struct CleanCompany {
    legal_name: Option<String>,
    short_name: String,
    hq_city: Option<String>,
    hq_country: Option<String>,
    parent_company_id: Option<i32>,
}

impl CleanCompany {
    fn apply(self, active: &mut company::ActiveModel) {
        active.legal_name = Set(self.legal_name);
        active.short_name = Set(self.short_name);
        active.hq_city = Set(self.hq_city);
        active.hq_country = Set(self.hq_country);
        active.parent_company_id = Set(self.parent_company_id);
    }
}

/// Validates `input` for the company `existing_id` (or a new one).
pub(crate) async fn clean_company<C: ConnectionTrait>(
    conn: &C,
    input: CompanyInput,
    existing_id: Option<i32>,
) -> Result<CleanCompany, ServiceError> {
    let input = input.validate_trimmed()?;

    let short_name = validation::required_text("short_name", &input.short_name)?;
    let mut duplicate = company::Entity::find().filter(company::Column::ShortName.eq(short_name.as_str()));
    if let Some(id) = existing_id {
        duplicate = duplicate.filter(company::Column::Id.ne(id));
    }
    if duplicate.count(conn).await? > 0 {
        return Err(ServiceError::invalid_field(
            "short_name",
            duplicate_message(&short_name),
        ));
    }

    let hq_country = validation::optional_text(input.hq_country)
        .map(|code| validation::normalize_country("hq_country", &code))
        .transpose()?;

    if let Some(parent_id) = input.parent_company_id {
        if existing_id == Some(parent_id) {
            return Err(ServiceError::invalid_field(
                "parent_company_id",
                "a company cannot be its own parent",
            ));
        }
        if company::Entity::find_by_id(parent_id).one(conn).await?.is_none() {
            return Err(ServiceError::invalid_field(
                "parent_company_id",
                format!("company {} does not exist", parent_id),
            ));
        }
    }

    Ok(CleanCompany {
        legal_name: validation::optional_text(input.legal_name),
        short_name,
        hq_city: validation::optional_text(input.hq_city),
        hq_country,
        parent_company_id: input.parent_company_id,
    })
}

fn duplicate_message(short_name: &str) -> String {
    format!("company with short name '{}' already exists", short_name)
}

/// A concurrent writer can take the name between the check and the write.
fn duplicate_short_name(err: sea_orm::DbErr, short_name: &str) -> ServiceError {
    ServiceError::unique_field(err, "short_name", duplicate_message(short_name))
}

pub(crate) async fn insert_company<C: ConnectionTrait>(
    conn: &C,
    input: CompanyInput,
) -> Result<company::Model, ServiceError> {
    let clean = clean_company(conn, input, None).await?;
    let short_name = clean.short_name.clone();
    let mut active = company::ActiveModel {
        ..Default::default()
    };
    clean.apply(&mut active);
    active
        .insert(conn)
        .await
        .map_err(|err| duplicate_short_name(err, &short_name))
}

pub(crate) async fn replace_company<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    input: CompanyInput,
) -> Result<company::Model, ServiceError> {
    let existing = company::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::not_found("Company", id))?;
    let clean = clean_company(conn, input, Some(id)).await?;
    let short_name = clean.short_name.clone();
    let mut active: company::ActiveModel = existing.into();
    clean.apply(&mut active);
    active
        .update(conn)
        .await
        .map_err(|err| duplicate_short_name(err, &short_name))
}

/// Deletes a company identity and its manufacturer extension.
///
/// Devices and certifications naming the company block the delete; child
/// companies lose their parent.
pub(crate) async fn delete_company_identity<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    label: &str,
) -> Result<company::Model, ServiceError> {
    let existing = company::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::not_found("Company", id))?;

    let devices = pv_module::Entity::find()
        .filter(pv_module::Column::ManufacturerId.eq(id))
        .count(conn)
        .await?;
    if devices > 0 {
        return Err(ServiceError::protected(
            format!("{} {}", label, id),
            "pv module(s)",
            devices,
        ));
    }

    let certifications = certification::Entity::find()
        .filter(certification::Column::BodyId.eq(id))
        .count(conn)
        .await?;
    if certifications > 0 {
        return Err(ServiceError::protected(
            format!("{} {}", label, id),
            "certification(s)",
            certifications,
        ));
    }

    company::Entity::update_many()
        .col_expr(
            company::Column::ParentCompanyId,
            Expr::value(Option::<i32>::None),
        )
        .filter(company::Column::ParentCompanyId.eq(id))
        .exec(conn)
        .await?;

    manufacturer_country::Entity::delete_many()
        .filter(manufacturer_country::Column::ManufacturerId.eq(id))
        .exec(conn)
        .await?;
    manufacturer_mfg_activity::Entity::delete_many()
        .filter(manufacturer_mfg_activity::Column::ManufacturerId.eq(id))
        .exec(conn)
        .await?;
    manufacturer::Entity::delete_by_id(id).exec(conn).await?;
    company::Entity::delete_by_id(id).exec(conn).await?;

    Ok(existing)
}

/// Company registry operations
#[derive(Clone)]
pub struct CompanyService {
    db: Arc<DatabaseConnection>,
    logger: Logger,
}

impl CompanyService {
    pub fn new(db: Arc<DatabaseConnection>, logger: Logger) -> Self {
        Self { db, logger }
    }

    #[instrument(skip(self, input), fields(short_name = %input.short_name))]
    pub async fn create_company(&self, input: CompanyInput) -> Result<company::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let created = insert_company(&txn, input).await?;
        txn.commit().await?;

        slog::info!(self.logger, "company created";
            "company_id" => created.id,
            "short_name" => &created.short_name);
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get_company(&self, id: i32) -> Result<company::Model, ServiceError> {
        company::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Company", id))
    }

    #[instrument(skip(self, input))]
    pub async fn update_company(
        &self,
        id: i32,
        input: CompanyInput,
    ) -> Result<company::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let updated = replace_company(&txn, id, input).await?;
        txn.commit().await?;

        slog::info!(self.logger, "company updated"; "company_id" => id);
        Ok(updated)
    }

    /// Deletes a company, applying the PROTECT and SET_NULL rules of its
    /// dependents in one transaction.
    #[instrument(skip(self))]
    pub async fn delete_company(&self, id: i32) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;
        let deleted = delete_company_identity(&txn, id, "company")
            .await
            .map_err(|err| {
                if matches!(err, ServiceError::ReferentialIntegrity { .. }) {
                    slog::warn!(self.logger, "company delete blocked"; "company_id" => id, "reason" => %err);
                }
                err
            })?;
        txn.commit().await?;

        slog::info!(self.logger, "company deleted";
            "company_id" => id,
            "short_name" => &deleted.short_name);
        Ok(())
    }

    /// Lists companies ordered by short name, optionally filtered by a
    /// substring of the short or legal name.
    #[instrument(skip(self))]
    pub async fn list_companies(
        &self,
        search: Option<&str>,
        page: u64,
        limit: u64,
    ) -> Result<Page<company::Model>, ServiceError> {
        let mut query = company::Entity::find();
        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(company::Column::ShortName.contains(term))
                    .add(company::Column::LegalName.contains(term)),
            );
        }

        let total = query.clone().count(&*self.db).await?;
        let companies = query
            .order_by_asc(company::Column::ShortName)
            .order_by_asc(company::Column::Id)
            .offset(page_offset(page, limit))
            .limit(limit)
            .all(&*self.db)
            .await?;

        Ok((companies, total))
    }
}
