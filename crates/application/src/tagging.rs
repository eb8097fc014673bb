use std::sync::Arc;

use domain::tag::repeated_position;
use domain::{
    ArticleId, ArticleTagAssociation, ArticleTagCount, AssociationId, AssociationRepository,
    DatasetId, DomainError, NewAssociation, NewTag, Result, Tag, TagCategoryId, TagId,
    TagOccurrence, TagRepository,
};
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use tracing::{info, warn};

/// Records which tags occur at which word positions of which articles.
///
/// Uniqueness is enforced by storage:
/// - tag text and tag label are each unique within a dataset
/// - a tag is recorded at most once per (article, position)
///
/// Nothing is ever overwritten; re-submitting a fact fails with a
/// duplicate error the caller may choose to ignore.
pub struct TagAssociationEngine {
    tags: Arc<dyn TagRepository>,
    associations: Arc<dyn AssociationRepository>,
}

impl TagAssociationEngine {
    pub fn new(tags: Arc<dyn TagRepository>, associations: Arc<dyn AssociationRepository>) -> Self {
        Self { tags, associations }
    }

    pub async fn define_tag(
        &self,
        dataset_id: DatasetId,
        text: &str,
        label: i32,
        category_id: TagCategoryId,
    ) -> Result<TagId> {
        let tag = NewTag::new(dataset_id, text, label, category_id)?;

        match self.tags.define(&tag).await {
            Ok(id) => Ok(id),
            Err(e) => {
                warn!(%dataset_id, text = %tag.text, label, error = %e, "Tag definition rejected");
                Err(e)
            }
        }
    }

    pub async fn associate(
        &self,
        article_id: ArticleId,
        tag_id: TagId,
        word: &str,
        position: u32,
    ) -> Result<AssociationId> {
        let association = NewAssociation::new(tag_id, word, position)?;

        self.associations
            .associate(article_id, &association)
            .await
            .inspect_err(|e| {
                if e.is_duplicate() {
                    warn!(%article_id, %tag_id, position, "Association already recorded");
                }
            })
    }

    /// Records every triple or none of them. Ids come back in input order.
    ///
    /// An empty batch writes nothing but still fails with
    /// `ReferenceNotFound` for an unknown article, like `associate`.
    pub async fn associate_batch(
        &self,
        article_id: ArticleId,
        batch: &[(TagId, String, u32)],
    ) -> Result<Vec<AssociationId>> {
        let batch = batch
            .iter()
            .map(|(tag_id, word, position)| NewAssociation::new(*tag_id, word.as_str(), *position))
            .collect::<Result<Vec<_>>>()?;

        if let Some((tag_id, position)) = repeated_position(&batch) {
            warn!(%article_id, %tag_id, position, "Batch repeats a tag position");
            return Err(DomainError::DuplicatePosition(format!(
                "{tag_id} appears twice at position {position} in the batch for {article_id}"
            )));
        }

        let ids = self.associations.associate_batch(article_id, &batch).await?;
        info!(%article_id, count = ids.len(), "Tagged article");
        Ok(ids)
    }

    /// Occurrences of tags in an article, ordered by position then by
    /// association id.
    ///
    /// The stream is lazy: storage is queried on first poll, and every call
    /// starts a fresh read. An unknown article yields a single `NotFound`.
    pub fn tags_for_article(
        &self,
        article_id: ArticleId,
    ) -> BoxStream<'static, Result<TagOccurrence>> {
        let repo = Arc::clone(&self.associations);

        stream::once(async move { repo.occurrences_for_article(article_id).await })
            .map_ok(|rows| stream::iter(rows.into_iter().map(Ok::<_, DomainError>)))
            .try_flatten()
            .boxed()
    }

    /// Distinct articles carrying the tag, in first-association order.
    /// Same laziness as [`Self::tags_for_article`].
    pub fn articles_for_tag(&self, tag_id: TagId) -> BoxStream<'static, Result<ArticleId>> {
        let repo = Arc::clone(&self.associations);

        stream::once(async move { repo.articles_for_tag(tag_id).await })
            .map_ok(|ids| stream::iter(ids.into_iter().map(Ok::<_, DomainError>)))
            .try_flatten()
            .boxed()
    }

    /// Association counts per article, ordered by article id. Untagged
    /// articles are left out.
    pub async fn tag_counts(&self) -> Result<Vec<ArticleTagCount>> {
        self.associations.tag_counts().await
    }

    pub async fn find_association(
        &self,
        id: AssociationId,
    ) -> Result<Option<ArticleTagAssociation>> {
        self.associations.find(id).await
    }

    pub async fn find_tag(&self, id: TagId) -> Result<Option<Tag>> {
        self.tags.find_by_id(id).await
    }

    pub async fn find_tag_by_label(&self, dataset_id: DatasetId, label: i32) -> Result<Option<Tag>> {
        self.tags.find_by_label(dataset_id, label).await
    }

    pub async fn find_tag_by_text(&self, dataset_id: DatasetId, text: &str) -> Result<Option<Tag>> {
        self.tags.find_by_text(dataset_id, text.trim()).await
    }

    pub async fn tags_in_dataset(&self, dataset_id: DatasetId) -> Result<Vec<Tag>> {
        self.tags.list_for_dataset(dataset_id).await
    }

    pub async fn delete_tag(&self, id: TagId) -> Result<()> {
        self.tags.delete(id).await
    }

    pub async fn delete_association(&self, id: AssociationId) -> Result<()> {
        self.associations.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::tag::{MockAssociationRepository, MockTagRepository};

    fn engine(tags: MockTagRepository, associations: MockAssociationRepository) -> TagAssociationEngine {
        TagAssociationEngine::new(Arc::new(tags), Arc::new(associations))
    }

    fn occurrence(id: i32, position: u32) -> TagOccurrence {
        TagOccurrence {
            association_id: AssociationId::new(id),
            tag: Tag {
                id: TagId::new(1),
                text: "election".to_string(),
                label: 10,
                category_id: TagCategoryId::new(1),
                dataset_id: DatasetId::new(1),
            },
            word: "election".to_string(),
            position,
        }
    }

    #[tokio::test]
    async fn test_define_tag_rejects_blank_text() {
        let engine = engine(MockTagRepository::new(), MockAssociationRepository::new());
        let result = engine
            .define_tag(DatasetId::new(1), "  ", 3, TagCategoryId::new(1))
            .await;
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_define_tag_reports_duplicate() {
        let mut tags = MockTagRepository::new();
        tags.expect_define()
            .times(1)
            .returning(|_| Err(DomainError::DuplicateTag("election".to_string())));

        let engine = engine(tags, MockAssociationRepository::new());
        let result = engine
            .define_tag(DatasetId::new(1), "election", 10, TagCategoryId::new(1))
            .await;
        assert!(matches!(result, Err(DomainError::DuplicateTag(_))));
    }

    #[tokio::test]
    async fn test_batch_with_repeated_position_never_reaches_storage() {
        let mut associations = MockAssociationRepository::new();
        associations.expect_associate_batch().never();

        let engine = engine(MockTagRepository::new(), associations);
        let batch = vec![
            (TagId::new(1), "election".to_string(), 4),
            (TagId::new(2), "vote".to_string(), 5),
            (TagId::new(1), "Election".to_string(), 4),
        ];
        let result = engine.associate_batch(ArticleId::new(1), &batch).await;
        assert!(matches!(result, Err(DomainError::DuplicatePosition(_))));
    }

    #[tokio::test]
    async fn test_same_position_different_tags_is_allowed() {
        let mut associations = MockAssociationRepository::new();
        associations
            .expect_associate_batch()
            .withf(|_, batch| batch.len() == 2)
            .times(1)
            .returning(|_, _| Ok(vec![AssociationId::new(1), AssociationId::new(2)]));

        let engine = engine(MockTagRepository::new(), associations);
        let batch = vec![
            (TagId::new(1), "election".to_string(), 4),
            (TagId::new(2), "election".to_string(), 4),
        ];
        let ids = engine.associate_batch(ArticleId::new(1), &batch).await.unwrap();
        assert_eq!(ids, vec![AssociationId::new(1), AssociationId::new(2)]);
    }

    #[tokio::test]
    async fn test_empty_batch_still_checks_article() {
        let mut associations = MockAssociationRepository::new();
        associations
            .expect_associate_batch()
            .withf(|_, batch| batch.is_empty())
            .times(1)
            .returning(|id, _| Err(DomainError::ReferenceNotFound(format!("{id} does not exist"))));

        let engine = engine(MockTagRepository::new(), associations);
        let result = engine.associate_batch(ArticleId::new(99), &[]).await;
        assert!(matches!(result, Err(DomainError::ReferenceNotFound(_))));
    }

    #[tokio::test]
    async fn test_tags_for_article_is_lazy_and_restartable() {
        let mut associations = MockAssociationRepository::new();
        associations
            .expect_occurrences_for_article()
            .times(2)
            .returning(|_| Ok(vec![occurrence(2, 1), occurrence(1, 3)]));

        let engine = engine(MockTagRepository::new(), associations);

        // Building the stream does not touch storage
        let first = engine.tags_for_article(ArticleId::new(1));
        let unused = engine.tags_for_article(ArticleId::new(1));
        drop(unused);

        let positions: Vec<u32> = first.map_ok(|o| o.position).try_collect().await.unwrap();
        assert_eq!(positions, vec![1, 3]);

        let again: Vec<TagOccurrence> = engine
            .tags_for_article(ArticleId::new(1))
            .try_collect()
            .await
            .unwrap();
        assert_eq!(again.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_article_yields_single_error() {
        let mut associations = MockAssociationRepository::new();
        associations
            .expect_occurrences_for_article()
            .returning(|id| Err(DomainError::NotFound(format!("{id} does not exist"))));

        let engine = engine(MockTagRepository::new(), associations);
        let items: Vec<Result<TagOccurrence>> =
            engine.tags_for_article(ArticleId::new(5)).collect().await;

        assert_eq!(items.len(), 1);
        assert!(matches!(items[0], Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_articles_for_tag_stream() {
        let mut associations = MockAssociationRepository::new();
        associations
            .expect_articles_for_tag()
            .returning(|_| Ok(vec![ArticleId::new(4), ArticleId::new(2)]));

        let engine = engine(MockTagRepository::new(), associations);
        let ids: Vec<ArticleId> = engine
            .articles_for_tag(TagId::new(1))
            .try_collect()
            .await
            .unwrap();
        assert_eq!(ids, vec![ArticleId::new(4), ArticleId::new(2)]);
    }
}
