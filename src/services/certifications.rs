use std::sync::Arc;

use sea_orm::{
    sea_query::NullOrdering, ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    Select, SelectTwo, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use slog::Logger;
use tracing::instrument;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    entities::{certification, company, pv_module_certification},
    errors::ServiceError,
    validation::{self, TrimmedInput},
};

use super::{page_offset, Page};

#[derive(Clone, Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CertificationInput {
    /// Company acting as the certifying body
    pub body_id: Option<i32>,
    #[validate(length(max = 20))]
    #[schema(example = "IEC 61215")]
    pub standard: String,
    #[validate(length(max = 10))]
    #[schema(example = "2021")]
    pub version: Option<String>,
    pub comments: Option<String>,
}

impl TrimmedInput for CertificationInput {
    fn trim_text(&mut self) {
        validation::trim_in_place(&mut self.standard);
        validation::trim_opt_in_place(&mut self.version);
    }
}

/// A certification with its body's short name.
#[derive(Clone, Debug, Serialize)]
pub struct CertificationRecord {
    pub certification: certification::Model,
    pub body_short_name: Option<String>,
}

impl From<(certification::Model, Option<company::Model>)> for CertificationRecord {
    fn from((certification, body): (certification::Model, Option<company::Model>)) -> Self {
        Self {
            certification,
            body_short_name: body.map(|b| b.short_name),
        }
    }
}

/// Orders certifications by body, then standard, then newest version first.
pub(crate) fn ordered(
    query: Select<certification::Entity>,
) -> SelectTwo<certification::Entity, company::Entity> {
    query
        .find_also_related(company::Entity)
        .order_by_with_nulls(company::Column::ShortName, Order::Asc, NullOrdering::Last)
        .order_by_asc(certification::Column::Standard)
        .order_by_with_nulls(certification::Column::Version, Order::Desc, NullOrdering::Last)
        .order_by_asc(certification::Column::Id)
}

async fn apply_input<C: ConnectionTrait>(
    conn: &C,
    input: CertificationInput,
    active: &mut certification::ActiveModel,
) -> Result<(), ServiceError> {
    let input = input.validate_trimmed()?;
    let standard = validation::required_text("standard", &input.standard)?;

    if let Some(body_id) = input.body_id {
        if company::Entity::find_by_id(body_id).one(conn).await?.is_none() {
            return Err(ServiceError::invalid_field(
                "body_id",
                format!("company {} does not exist", body_id),
            ));
        }
    }

    active.body_id = Set(input.body_id);
    active.standard = Set(standard);
    active.version = Set(validation::optional_text(input.version));
    active.comments = Set(validation::optional_text(input.comments));
    Ok(())
}

#[derive(Clone)]
pub struct CertificationService {
    db: Arc<DatabaseConnection>,
    logger: Logger,
}

impl CertificationService {
    pub fn new(db: Arc<DatabaseConnection>, logger: Logger) -> Self {
        Self { db, logger }
    }

    #[instrument(skip(self, input), fields(standard = %input.standard))]
    pub async fn create_certification(
        &self,
        input: CertificationInput,
    ) -> Result<CertificationRecord, ServiceError> {
        let txn = self.db.begin().await?;
        let mut active = certification::ActiveModel {
            ..Default::default()
        };
        apply_input(&txn, input, &mut active).await?;
        let created = active.insert(&txn).await?;
        txn.commit().await?;

        slog::info!(self.logger, "certification created"; "certification_id" => created.id);
        self.get_certification(created.id).await
    }

    #[instrument(skip(self))]
    pub async fn get_certification(&self, id: i32) -> Result<CertificationRecord, ServiceError> {
        certification::Entity::find_by_id(id)
            .find_also_related(company::Entity)
            .one(&*self.db)
            .await?
            .map(CertificationRecord::from)
            .ok_or_else(|| ServiceError::not_found("Certification", id))
    }

    #[instrument(skip(self, input))]
    pub async fn update_certification(
        &self,
        id: i32,
        input: CertificationInput,
    ) -> Result<CertificationRecord, ServiceError> {
        let txn = self.db.begin().await?;
        let existing = certification::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Certification", id))?;
        let mut active: certification::ActiveModel = existing.into();
        apply_input(&txn, input, &mut active).await?;
        active.update(&txn).await?;
        txn.commit().await?;

        slog::info!(self.logger, "certification updated"; "certification_id" => id);
        self.get_certification(id).await
    }

    /// Deletes a certification and unlinks it from every module.
    #[instrument(skip(self))]
    pub async fn delete_certification(&self, id: i32) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;
        certification::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Certification", id))?;

        let unlinked = pv_module_certification::Entity::delete_many()
            .filter(pv_module_certification::Column::CertificationId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;
        certification::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        slog::info!(self.logger, "certification deleted"; "certification_id" => id, "unlinked" => unlinked);
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_certifications(
        &self,
        search: Option<&str>,
        page: u64,
        limit: u64,
    ) -> Result<Page<CertificationRecord>, ServiceError> {
        let mut query = certification::Entity::find();
        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            let bodies: Vec<i32> = company::Entity::find()
                .select_only()
                .column(company::Column::Id)
                .filter(company::Column::ShortName.contains(term))
                .into_tuple()
                .all(&*self.db)
                .await?;
            query = query.filter(
                Condition::any()
                    .add(certification::Column::Standard.contains(term))
                    .add(certification::Column::BodyId.is_in(bodies)),
            );
        }

        let total = query.clone().count(&*self.db).await?;
        let rows = ordered(query)
            .offset(page_offset(page, limit))
            .limit(limit)
            .all(&*self.db)
            .await?;

        Ok((rows.into_iter().map(CertificationRecord::from).collect(), total))
    }
}
