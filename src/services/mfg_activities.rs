use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use slog::Logger;
use tracing::instrument;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    entities::{manufacturer_mfg_activity, mfg_activity},
    errors::ServiceError,
    validation::{self, TrimmedInput},
};

use super::{page_offset, Page};

#[derive(Clone, Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct MfgActivityInput {
    #[validate(length(max = 50))]
    #[schema(example = "Cell")]
    pub name: String,
    pub comments: Option<String>,
}

async fn clean_name<C: ConnectionTrait>(
    conn: &C,
    raw: &str,
    existing_id: Option<i32>,
) -> Result<String, ServiceError> {
    let name = validation::required_text("name", raw)?;
    let mut duplicate = mfg_activity::Entity::find().filter(mfg_activity::Column::Name.eq(name.as_str()));
    if let Some(id) = existing_id {
        duplicate = duplicate.filter(mfg_activity::Column::Id.ne(id));
    }
    if duplicate.count(conn).await? > 0 {
        return Err(ServiceError::invalid_field("name", duplicate_message(&name)));
    }
    Ok(name)
}

fn duplicate_message(name: &str) -> String {
    format!("mfg activity '{}' already exists", name)
}

fn duplicate_name(err: sea_orm::DbErr, name: &str) -> ServiceError {
    ServiceError::unique_field(err, "name", duplicate_message(name))
}

impl TrimmedInput for MfgActivityInput {
    fn trim_text(&mut self) {
        validation::trim_in_place(&mut self.name);
    }
}

/// Manufacturing activity lookup table
#[derive(Clone)]
pub struct MfgActivityService {
    db: Arc<DatabaseConnection>,
    logger: Logger,
}

impl MfgActivityService {
    pub fn new(db: Arc<DatabaseConnection>, logger: Logger) -> Self {
        Self { db, logger }
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_mfg_activity(
        &self,
        input: MfgActivityInput,
    ) -> Result<mfg_activity::Model, ServiceError> {
        let input = input.validate_trimmed()?;
        let txn = self.db.begin().await?;
        let name = clean_name(&txn, &input.name, None).await?;
        let created = mfg_activity::ActiveModel {
            name: Set(name.clone()),
            comments: Set(validation::optional_text(input.comments)),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|err| duplicate_name(err, &name))?;
        txn.commit().await?;

        slog::info!(self.logger, "mfg activity created"; "mfg_activity_id" => created.id, "name" => &created.name);
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get_mfg_activity(&self, id: i32) -> Result<mfg_activity::Model, ServiceError> {
        mfg_activity::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Mfg activity", id))
    }

    #[instrument(skip(self, input))]
    pub async fn update_mfg_activity(
        &self,
        id: i32,
        input: MfgActivityInput,
    ) -> Result<mfg_activity::Model, ServiceError> {
        let input = input.validate_trimmed()?;
        let txn = self.db.begin().await?;
        let existing = mfg_activity::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Mfg activity", id))?;
        let name = clean_name(&txn, &input.name, Some(id)).await?;

        let mut active: mfg_activity::ActiveModel = existing.into();
        active.name = Set(name.clone());
        active.comments = Set(validation::optional_text(input.comments));
        let updated = active
            .update(&txn)
            .await
            .map_err(|err| duplicate_name(err, &name))?;
        txn.commit().await?;

        slog::info!(self.logger, "mfg activity updated"; "mfg_activity_id" => id);
        Ok(updated)
    }

    /// Deletes an activity and unlinks it from every manufacturer.
    #[instrument(skip(self))]
    pub async fn delete_mfg_activity(&self, id: i32) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;
        mfg_activity::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Mfg activity", id))?;

        let unlinked = manufacturer_mfg_activity::Entity::delete_many()
            .filter(manufacturer_mfg_activity::Column::MfgActivityId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;
        mfg_activity::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        slog::info!(self.logger, "mfg activity deleted"; "mfg_activity_id" => id, "unlinked" => unlinked);
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_mfg_activities(
        &self,
        search: Option<&str>,
        page: u64,
        limit: u64,
    ) -> Result<Page<mfg_activity::Model>, ServiceError> {
        let mut query = mfg_activity::Entity::find();
        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(mfg_activity::Column::Name.contains(term));
        }

        let total = query.clone().count(&*self.db).await?;
        let activities = query
            .order_by_asc(mfg_activity::Column::Name)
            .offset(page_offset(page, limit))
            .limit(limit)
            .all(&*self.db)
            .await?;

        Ok((activities, total))
    }
}
