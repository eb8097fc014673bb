//! Existence probes used to report which parent of a write is missing.
//!
//! The foreign keys remain the real guard; these only sharpen the error.

use domain::{
    ArticleId, CountryId, DatasetId, DomainError, LanguageId, NewsSiteId, TagCategoryId, TagId,
};
use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait};

use super::entities::{
    countries, datasets, languages, news_articles, news_sites, tag_categories, tags,
};
use super::error::storage_error;

macro_rules! exists_fn {
    ($name:ident, $entity:ty, $id:ty) => {
        pub(crate) async fn $name<C: ConnectionTrait>(conn: &C, id: $id) -> Result<bool, DomainError> {
            let count = <$entity>::find_by_id(id.get())
                .count(conn)
                .await
                .map_err(storage_error)?;
            Ok(count > 0)
        }
    };
}

exists_fn!(language_exists, languages::Entity, LanguageId);
exists_fn!(country_exists, countries::Entity, CountryId);
exists_fn!(news_site_exists, news_sites::Entity, NewsSiteId);
exists_fn!(article_exists, news_articles::Entity, ArticleId);
exists_fn!(dataset_exists, datasets::Entity, DatasetId);
exists_fn!(tag_category_exists, tag_categories::Entity, TagCategoryId);
exists_fn!(tag_exists, tags::Entity, TagId);
