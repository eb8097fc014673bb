use async_trait::async_trait;

use super::{ArticleTagAssociation, ArticleTagCount, NewAssociation, NewTag, Tag, TagOccurrence};
use crate::DomainError;
use crate::ids::{ArticleId, AssociationId, DatasetId, TagId};

/// Repository interface for the tag dictionary
///
/// Uniqueness of (dataset, text) and (dataset, label) must be decided by the
/// storage engine's unique indexes, with violations reported as
/// `DuplicateTag` / `DuplicateLabel`.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn define(&self, tag: &NewTag) -> Result<TagId, DomainError>;

    async fn find_by_id(&self, id: TagId) -> Result<Option<Tag>, DomainError>;

    async fn find_by_label(
        &self,
        dataset_id: DatasetId,
        label: i32,
    ) -> Result<Option<Tag>, DomainError>;

    async fn find_by_text(
        &self,
        dataset_id: DatasetId,
        text: &str,
    ) -> Result<Option<Tag>, DomainError>;

    /// Tags of a dataset ordered by label
    async fn list_for_dataset(&self, dataset_id: DatasetId) -> Result<Vec<Tag>, DomainError>;

    /// Restrict delete: fails with `ReferenceInUse` while associations exist
    async fn delete(&self, id: TagId) -> Result<(), DomainError>;
}

/// Repository interface for the article-to-tag mapping
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait AssociationRepository: Send + Sync {
    /// Fails with `DuplicatePosition` if (article, tag, position) exists
    async fn associate(
        &self,
        article_id: ArticleId,
        association: &NewAssociation,
    ) -> Result<AssociationId, DomainError>;

    /// All rows in one transaction; any failure persists nothing.
    /// Ids are returned in input order.
    async fn associate_batch(
        &self,
        article_id: ArticleId,
        batch: &[NewAssociation],
    ) -> Result<Vec<AssociationId>, DomainError>;

    /// Occurrences ordered by position, then association id.
    /// Fails with `NotFound` for an unknown article.
    async fn occurrences_for_article(
        &self,
        article_id: ArticleId,
    ) -> Result<Vec<TagOccurrence>, DomainError>;

    /// Distinct articles in first-association order.
    /// Fails with `NotFound` for an unknown tag.
    async fn articles_for_tag(&self, tag_id: TagId) -> Result<Vec<ArticleId>, DomainError>;

    async fn find(&self, id: AssociationId) -> Result<Option<ArticleTagAssociation>, DomainError>;

    /// Association counts per article, ordered by article id. Articles
    /// without any association are not listed.
    async fn tag_counts(&self) -> Result<Vec<ArticleTagCount>, DomainError>;

    async fn delete(&self, id: AssociationId) -> Result<(), DomainError>;
}
