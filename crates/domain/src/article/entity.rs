use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ids::{ArticleId, NewsSiteId};
use crate::validation::{optional, required};

/// A news article bound to exactly one site.
///
/// Append-only apart from `summary`, which a summarization step may fill in
/// after the initial insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub content: String,
    pub url: String,
    pub date: NaiveDateTime,
    pub site_id: NewsSiteId,
    pub image_url: String,
    pub summary: Option<String>,
}

/// Validated input for `ArticleRepository::insert`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub url: String,
    pub date: NaiveDateTime,
    pub site_id: NewsSiteId,
    pub image_url: String,
    pub summary: Option<String>,
}

impl NewArticle {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        url: impl Into<String>,
        date: NaiveDateTime,
        site_id: NewsSiteId,
        image_url: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            title: required("article title", title)?,
            // Body text is stored verbatim
            content: content.into(),
            url: required("article url", url)?,
            date,
            site_id,
            image_url: image_url.into().trim().to_string(),
            summary: None,
        })
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Result<Self> {
        self.summary = optional("article summary", Some(summary.into()))?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DomainError;

    fn date() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2024-01-01T00:00:00", "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn test_article_creation() {
        let article = NewArticle::new(
            "T",
            "C",
            "http://x",
            date(),
            NewsSiteId::new(1),
            "http://img",
        )
        .unwrap();

        assert_eq!(article.title, "T");
        assert_eq!(article.url, "http://x");
        assert_eq!(article.site_id, NewsSiteId::new(1));
        assert!(article.summary.is_none());
    }

    #[test]
    fn test_article_requires_url() {
        let result = NewArticle::new("T", "C", " ", date(), NewsSiteId::new(1), "");
        assert_eq!(
            result.unwrap_err(),
            DomainError::InvalidInput("article url cannot be empty".to_string())
        );
    }

    #[test]
    fn test_content_kept_verbatim() {
        let article =
            NewArticle::new("T", "  line one\n", "u", date(), NewsSiteId::new(1), "").unwrap();
        assert_eq!(article.content, "  line one\n");
    }

    #[test]
    fn test_with_summary() {
        let article = NewArticle::new("T", "C", "u", date(), NewsSiteId::new(1), "")
            .unwrap()
            .with_summary(" short ")
            .unwrap();
        assert_eq!(article.summary.as_deref(), Some("short"));
    }
}
