use async_trait::async_trait;

use super::{Article, NewArticle};
use crate::DomainError;
use crate::ids::{ArticleId, NewsSiteId};

/// Repository interface for article persistence
///
/// Url and title carry no uniqueness constraint, so duplicate articles are
/// structurally allowed; callers deduplicate through `find_by_url`.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Fails with `ReferenceNotFound` when the site does not exist
    async fn insert(&self, article: &NewArticle) -> Result<ArticleId, DomainError>;

    async fn find_by_id(&self, id: ArticleId) -> Result<Option<Article>, DomainError>;

    /// Lowest id carrying this url, if any
    async fn find_by_url(&self, url: &str) -> Result<Option<ArticleId>, DomainError>;

    /// Articles ordered by id, optionally restricted to one site
    async fn list(&self, site_id: Option<NewsSiteId>) -> Result<Vec<Article>, DomainError>;

    /// The only mutation path for an existing article
    async fn update_summary(&self, id: ArticleId, summary: &str) -> Result<(), DomainError>;

    /// Restrict delete: fails with `ReferenceInUse` while associations exist
    async fn delete(&self, id: ArticleId) -> Result<(), DomainError>;

    /// Removes the article and its associations in one transaction,
    /// returning the number of associations removed
    async fn delete_with_associations(&self, id: ArticleId) -> Result<u64, DomainError>;
}
