use async_trait::async_trait;
use domain::{Article, ArticleId, ArticleRepository, DomainError, NewArticle, NewsSiteId};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use tracing::{debug, info};

use super::entities::{article_tag_map, news_articles};
use super::error::{StorageFailure, classify, finish_delete, missing, storage_error};
use super::lookup::news_site_exists;

pub struct SeaOrmArticleRepository {
    db: DatabaseConnection,
}

impl SeaOrmArticleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ArticleRepository for SeaOrmArticleRepository {
    async fn insert(&self, article: &NewArticle) -> Result<ArticleId, DomainError> {
        if !news_site_exists(&self.db, article.site_id).await? {
            return Err(missing(article.site_id));
        }

        let model = news_articles::ActiveModel {
            title: Set(article.title.clone()),
            content: Set(article.content.clone()),
            article_url: Set(article.url.clone()),
            article_date: Set(article.date),
            site_id: Set(article.site_id.get()),
            image_url: Set(article.image_url.clone()),
            summary: Set(article.summary.clone()),
            ..Default::default()
        };

        let res = news_articles::Entity::insert(model)
            .exec(&self.db)
            .await
            .map_err(|err| match classify(err) {
                // Site deleted between the probe and the insert
                StorageFailure::ForeignKeyViolation(_) => missing(article.site_id),
                StorageFailure::UniqueViolation(msg) => DomainError::Storage(msg),
                StorageFailure::Other(e) => e,
            })?;

        let id = ArticleId::new(res.last_insert_id);
        info!(%id, site_id = %article.site_id, url = %article.url, "Article stored");
        Ok(id)
    }

    async fn find_by_id(&self, id: ArticleId) -> Result<Option<Article>, DomainError> {
        let model = news_articles::Entity::find_by_id(id.get())
            .one(&self.db)
            .await
            .map_err(storage_error)?;

        Ok(model.map(Article::from))
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<ArticleId>, DomainError> {
        let id: Option<i32> = news_articles::Entity::find()
            .select_only()
            .column(news_articles::Column::Id)
            .filter(news_articles::Column::ArticleUrl.eq(url))
            .order_by_asc(news_articles::Column::Id)
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(storage_error)?;

        debug!(url, found = id.is_some(), "Article lookup by url");
        Ok(id.map(ArticleId::new))
    }

    async fn list(&self, site_id: Option<NewsSiteId>) -> Result<Vec<Article>, DomainError> {
        let mut query = news_articles::Entity::find();
        if let Some(site_id) = site_id {
            query = query.filter(news_articles::Column::SiteId.eq(site_id.get()));
        }

        let models = query
            .order_by_asc(news_articles::Column::Id)
            .all(&self.db)
            .await
            .map_err(storage_error)?;

        Ok(models.into_iter().map(Article::from).collect())
    }

    async fn update_summary(&self, id: ArticleId, summary: &str) -> Result<(), DomainError> {
        let res = news_articles::Entity::update_many()
            .col_expr(news_articles::Column::Summary, Expr::value(summary))
            .filter(news_articles::Column::Id.eq(id.get()))
            .exec(&self.db)
            .await
            .map_err(storage_error)?;

        if res.rows_affected == 0 {
            return Err(DomainError::NotFound(format!("{id} does not exist")));
        }

        info!(%id, "Article summary updated");
        Ok(())
    }

    async fn delete(&self, id: ArticleId) -> Result<(), DomainError> {
        let result = news_articles::Entity::delete_by_id(id.get())
            .exec(&self.db)
            .await;

        finish_delete(result, id)?;
        info!(%id, "Article deleted");
        Ok(())
    }

    async fn delete_with_associations(&self, id: ArticleId) -> Result<u64, DomainError> {
        let txn = self.db.begin().await.map_err(storage_error)?;

        let removed = article_tag_map::Entity::delete_many()
            .filter(article_tag_map::Column::ArticleId.eq(id.get()))
            .exec(&txn)
            .await
            .map_err(storage_error)?
            .rows_affected;

        let result = news_articles::Entity::delete_by_id(id.get())
            .exec(&txn)
            .await;
        // Dropping the transaction on error rolls the association delete back
        finish_delete(result, id)?;

        txn.commit().await.map_err(storage_error)?;
        info!(%id, removed, "Article deleted with its associations");
        Ok(removed)
    }
}
