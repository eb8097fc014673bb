use std::collections::HashSet;

use async_trait::async_trait;
use domain::{
    ArticleId, ArticleTagAssociation, ArticleTagCount, AssociationId, AssociationRepository,
    DomainError, NewAssociation, Tag, TagId, TagOccurrence,
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use tracing::{debug, info};

use super::entities::{article_tag_map, tags};
use super::error::{StorageFailure, classify, finish_delete, missing, storage_error};
use super::lookup::{article_exists, tag_exists};

pub struct SeaOrmAssociationRepository {
    db: DatabaseConnection,
}

impl SeaOrmAssociationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn position_column(position: u32) -> Result<i32, DomainError> {
    i32::try_from(position)
        .map_err(|_| DomainError::InvalidInput(format!("position {position} out of range")))
}

fn stored_position(position: i32, id: i32) -> Result<u32, DomainError> {
    u32::try_from(position).map_err(|_| {
        DomainError::Storage(format!("association {id} has negative position {position}"))
    })
}

async fn insert_association<C: ConnectionTrait>(
    conn: &C,
    article_id: ArticleId,
    association: &NewAssociation,
) -> Result<AssociationId, DomainError> {
    let model = article_tag_map::ActiveModel {
        article_id: Set(article_id.get()),
        tag_id: Set(association.tag_id.get()),
        word: Set(association.word.clone()),
        position: Set(position_column(association.position)?),
        ..Default::default()
    };

    let res = article_tag_map::Entity::insert(model)
        .exec(conn)
        .await
        .map_err(|err| match classify(err) {
            // (article_id, tag_id, position) is the table's only unique index
            StorageFailure::UniqueViolation(_) => DomainError::DuplicatePosition(format!(
                "{} already recorded for {} at position {}",
                association.tag_id, article_id, association.position
            )),
            StorageFailure::ForeignKeyViolation(_) => DomainError::ReferenceNotFound(format!(
                "{} or {} does not exist",
                article_id, association.tag_id
            )),
            StorageFailure::Other(e) => e,
        })?;

    Ok(AssociationId::new(res.last_insert_id))
}

#[async_trait]
impl AssociationRepository for SeaOrmAssociationRepository {
    async fn associate(
        &self,
        article_id: ArticleId,
        association: &NewAssociation,
    ) -> Result<AssociationId, DomainError> {
        if !article_exists(&self.db, article_id).await? {
            return Err(missing(article_id));
        }
        if !tag_exists(&self.db, association.tag_id).await? {
            return Err(missing(association.tag_id));
        }

        let id = insert_association(&self.db, article_id, association).await?;
        info!(
            %id,
            %article_id,
            tag_id = %association.tag_id,
            position = association.position,
            "Association recorded"
        );
        Ok(id)
    }

    async fn associate_batch(
        &self,
        article_id: ArticleId,
        batch: &[NewAssociation],
    ) -> Result<Vec<AssociationId>, DomainError> {
        let txn = self.db.begin().await.map_err(storage_error)?;

        if !article_exists(&txn, article_id).await? {
            return Err(missing(article_id));
        }

        let mut known_tags = HashSet::new();
        let mut ids = Vec::with_capacity(batch.len());
        for association in batch {
            if known_tags.insert(association.tag_id) && !tag_exists(&txn, association.tag_id).await? {
                return Err(missing(association.tag_id));
            }
            // Any early return drops `txn`, which rolls the batch back
            ids.push(insert_association(&txn, article_id, association).await?);
        }

        txn.commit().await.map_err(storage_error)?;
        info!(%article_id, rows = ids.len(), "Association batch committed");
        Ok(ids)
    }

    async fn occurrences_for_article(
        &self,
        article_id: ArticleId,
    ) -> Result<Vec<TagOccurrence>, DomainError> {
        if !article_exists(&self.db, article_id).await? {
            return Err(DomainError::NotFound(format!("{article_id} does not exist")));
        }

        // One statement, so a batch committing concurrently is seen whole or not at all
        let rows = article_tag_map::Entity::find()
            .filter(article_tag_map::Column::ArticleId.eq(article_id.get()))
            .find_also_related(tags::Entity)
            .order_by_asc(article_tag_map::Column::Position)
            .order_by_asc(article_tag_map::Column::Id)
            .all(&self.db)
            .await
            .map_err(storage_error)?;

        debug!(%article_id, rows = rows.len(), "Loaded tag occurrences");

        rows.into_iter()
            .map(|(association, tag)| {
                let tag = tag.ok_or_else(|| {
                    DomainError::Storage(format!(
                        "association {} points at a missing tag",
                        association.id
                    ))
                })?;

                Ok(TagOccurrence {
                    association_id: AssociationId::new(association.id),
                    tag: Tag::from(tag),
                    position: stored_position(association.position, association.id)?,
                    word: association.word,
                })
            })
            .collect()
    }

    async fn articles_for_tag(&self, tag_id: TagId) -> Result<Vec<ArticleId>, DomainError> {
        if !tag_exists(&self.db, tag_id).await? {
            return Err(DomainError::NotFound(format!("{tag_id} does not exist")));
        }

        let article_ids: Vec<i32> = article_tag_map::Entity::find()
            .select_only()
            .column(article_tag_map::Column::ArticleId)
            .filter(article_tag_map::Column::TagId.eq(tag_id.get()))
            .order_by_asc(article_tag_map::Column::Id)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(storage_error)?;

        // Keep the first association of each article
        let mut seen = HashSet::new();
        Ok(article_ids
            .into_iter()
            .filter(|id| seen.insert(*id))
            .map(ArticleId::new)
            .collect())
    }

    async fn find(&self, id: AssociationId) -> Result<Option<ArticleTagAssociation>, DomainError> {
        let model = article_tag_map::Entity::find_by_id(id.get())
            .one(&self.db)
            .await
            .map_err(storage_error)?;

        model
            .map(|m| {
                Ok(ArticleTagAssociation {
                    id,
                    article_id: ArticleId::new(m.article_id),
                    tag_id: TagId::new(m.tag_id),
                    position: stored_position(m.position, m.id)?,
                    word: m.word,
                })
            })
            .transpose()
    }

    /// Only articles with at least one association appear
    async fn tag_counts(&self) -> Result<Vec<ArticleTagCount>, DomainError> {
        let rows: Vec<(i32, i64)> = article_tag_map::Entity::find()
            .select_only()
            .column(article_tag_map::Column::ArticleId)
            .column_as(Expr::col(article_tag_map::Column::Id).count(), "tag_count")
            .group_by(article_tag_map::Column::ArticleId)
            .order_by_asc(article_tag_map::Column::ArticleId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(storage_error)?;

        Ok(rows
            .into_iter()
            .map(|(article_id, count)| ArticleTagCount {
                article_id: ArticleId::new(article_id),
                tag_count: count.max(0) as u64,
            })
            .collect())
    }

    async fn delete(&self, id: AssociationId) -> Result<(), DomainError> {
        let result = article_tag_map::Entity::delete_by_id(id.get())
            .exec(&self.db)
            .await;

        finish_delete(result, id)?;
        info!(%id, "Association deleted");
        Ok(())
    }
}
