use std::sync::Arc;

use chrono::NaiveDateTime;
use domain::{Article, ArticleId, ArticleRepository, DomainError, NewArticle, NewsSiteId, Result};
use tracing::{debug, info};

/// Append-only store of news articles
pub struct ArticleStore {
    repo: Arc<dyn ArticleRepository>,
}

impl ArticleStore {
    pub fn new(repo: Arc<dyn ArticleRepository>) -> Self {
        Self { repo }
    }

    /// Store a new article. The same url or title may be stored more than
    /// once; each call creates a distinct row.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert_article(
        &self,
        title: &str,
        content: &str,
        url: &str,
        date: NaiveDateTime,
        site_id: NewsSiteId,
        image_url: &str,
        summary: Option<&str>,
    ) -> Result<ArticleId> {
        let mut article = NewArticle::new(title, content, url, date, site_id, image_url)?;
        if let Some(summary) = summary {
            article = article.with_summary(summary)?;
        }

        self.repo.insert(&article).await
    }

    /// Lowest article id stored under `url`
    pub async fn find_article_by_url(&self, url: &str) -> Result<Option<ArticleId>> {
        self.repo.find_by_url(url.trim()).await
    }

    pub async fn find_article(&self, id: ArticleId) -> Result<Option<Article>> {
        self.repo.find_by_id(id).await
    }

    pub async fn list_articles(&self, site_id: Option<NewsSiteId>) -> Result<Vec<Article>> {
        let articles = self.repo.list(site_id).await?;
        debug!(count = articles.len(), site_id = ?site_id, "Listed articles");
        Ok(articles)
    }

    pub async fn update_summary(&self, id: ArticleId, summary: &str) -> Result<()> {
        let summary = summary.trim();
        if summary.is_empty() {
            return Err(DomainError::InvalidInput(
                "article summary cannot be empty".to_string(),
            ));
        }
        self.repo.update_summary(id, summary).await
    }

    /// Fails with `ReferenceInUse` while the article has tag associations
    pub async fn delete_article(&self, id: ArticleId) -> Result<()> {
        self.repo.delete(id).await
    }

    /// Removes the article together with all of its associations in one
    /// transaction. Returns the number of associations removed.
    pub async fn delete_article_with_associations(&self, id: ArticleId) -> Result<u64> {
        let removed = self.repo.delete_with_associations(id).await?;
        info!(%id, removed, "Article purged");
        Ok(removed)
    }
}
