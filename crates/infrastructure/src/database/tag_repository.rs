use async_trait::async_trait;
use domain::{DatasetId, DomainError, NewTag, Tag, TagId, TagRepository};
use migration::unique_index;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;

use super::entities::tags;
use super::error::{StorageFailure, classify, finish_delete, missing, storage_error};
use super::lookup::{dataset_exists, tag_category_exists};

pub struct SeaOrmTagRepository {
    db: DatabaseConnection,
}

impl SeaOrmTagRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn rejection(&self, err: DbErr, tag: &NewTag) -> DomainError {
        match classify(err) {
            StorageFailure::UniqueViolation(msg) => {
                // A same-text tag wins even when the label index fired first
                match self.find_by_text(tag.dataset_id, &tag.text).await {
                    Ok(Some(_)) => duplicate_text(tag),
                    _ => duplicate_error(&msg, tag),
                }
            }
            StorageFailure::ForeignKeyViolation(_) => DomainError::ReferenceNotFound(format!(
                "{} or {} does not exist",
                tag.dataset_id, tag.category_id
            )),
            StorageFailure::Other(e) => e,
        }
    }
}

fn duplicate_text(tag: &NewTag) -> DomainError {
    DomainError::DuplicateTag(format!(
        "'{}' is already defined in {}",
        tag.text, tag.dataset_id
    ))
}

/// Picks the violated index from the driver message. PostgreSQL names the
/// index, SQLite lists the indexed columns.
fn duplicate_error(message: &str, tag: &NewTag) -> DomainError {
    if message.contains(unique_index::TAGS_LABEL_DATASET) || message.contains("tags.tag_label") {
        DomainError::DuplicateLabel(format!(
            "label {} is already used in {}",
            tag.label, tag.dataset_id
        ))
    } else {
        duplicate_text(tag)
    }
}

#[async_trait]
impl TagRepository for SeaOrmTagRepository {
    async fn define(&self, tag: &NewTag) -> Result<TagId, DomainError> {
        if !dataset_exists(&self.db, tag.dataset_id).await? {
            return Err(missing(tag.dataset_id));
        }
        if !tag_category_exists(&self.db, tag.category_id).await? {
            return Err(missing(tag.category_id));
        }

        let model = tags::ActiveModel {
            tag: Set(tag.text.clone()),
            tag_label: Set(tag.label),
            category_id: Set(tag.category_id.get()),
            dataset_id: Set(tag.dataset_id.get()),
            ..Default::default()
        };

        // No pre-check: the unique indexes decide between racing writers
        let res = match tags::Entity::insert(model).exec(&self.db).await {
            Ok(res) => res,
            Err(err) => return Err(self.rejection(err, tag).await),
        };

        let id = TagId::new(res.last_insert_id);
        info!(%id, dataset_id = %tag.dataset_id, text = %tag.text, label = tag.label, "Tag defined");
        Ok(id)
    }

    async fn find_by_id(&self, id: TagId) -> Result<Option<Tag>, DomainError> {
        let model = tags::Entity::find_by_id(id.get())
            .one(&self.db)
            .await
            .map_err(storage_error)?;

        Ok(model.map(Tag::from))
    }

    async fn find_by_label(
        &self,
        dataset_id: DatasetId,
        label: i32,
    ) -> Result<Option<Tag>, DomainError> {
        let model = tags::Entity::find()
            .filter(tags::Column::DatasetId.eq(dataset_id.get()))
            .filter(tags::Column::TagLabel.eq(label))
            .one(&self.db)
            .await
            .map_err(storage_error)?;

        Ok(model.map(Tag::from))
    }

    async fn find_by_text(
        &self,
        dataset_id: DatasetId,
        text: &str,
    ) -> Result<Option<Tag>, DomainError> {
        let model = tags::Entity::find()
            .filter(tags::Column::DatasetId.eq(dataset_id.get()))
            .filter(tags::Column::Tag.eq(text))
            .one(&self.db)
            .await
            .map_err(storage_error)?;

        Ok(model.map(Tag::from))
    }

    async fn list_for_dataset(&self, dataset_id: DatasetId) -> Result<Vec<Tag>, DomainError> {
        let models = tags::Entity::find()
            .filter(tags::Column::DatasetId.eq(dataset_id.get()))
            .order_by_asc(tags::Column::TagLabel)
            .all(&self.db)
            .await
            .map_err(storage_error)?;

        Ok(models.into_iter().map(Tag::from).collect())
    }

    async fn delete(&self, id: TagId) -> Result<(), DomainError> {
        let result = tags::Entity::delete_by_id(id.get()).exec(&self.db).await;

        finish_delete(result, id)?;
        info!(%id, "Tag deleted");
        Ok(())
    }
}
