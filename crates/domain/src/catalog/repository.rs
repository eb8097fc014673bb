use async_trait::async_trait;

use super::{
    CatalogRef, Country, Dataset, Language, NewCountry, NewDataset, NewLanguage, NewNewsSite,
    NewTagCategory, NewsSite, TagCategory,
};
use crate::DomainError;
use crate::ids::{CountryId, DatasetId, LanguageId, NewsSiteId, TagCategoryId};

/// Repository interface for the slowly-changing reference tables
///
/// Upserts are idempotent by unique key: an existing row carrying the same
/// values yields its id, a row that shares only part of the key fails with
/// `ConflictingUniqueValue`, a missing parent fails with `ReferenceNotFound`.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn upsert_language(&self, language: &NewLanguage) -> Result<LanguageId, DomainError>;

    async fn upsert_country(&self, country: &NewCountry) -> Result<CountryId, DomainError>;

    async fn upsert_news_site(&self, site: &NewNewsSite) -> Result<NewsSiteId, DomainError>;

    async fn upsert_dataset(&self, dataset: &NewDataset) -> Result<DatasetId, DomainError>;

    async fn upsert_tag_category(
        &self,
        category: &NewTagCategory,
    ) -> Result<TagCategoryId, DomainError>;

    async fn find_language(&self, id: LanguageId) -> Result<Option<Language>, DomainError>;

    async fn find_country(&self, id: CountryId) -> Result<Option<Country>, DomainError>;

    async fn find_news_site(&self, id: NewsSiteId) -> Result<Option<NewsSite>, DomainError>;

    async fn find_dataset(&self, id: DatasetId) -> Result<Option<Dataset>, DomainError>;

    async fn find_tag_category(
        &self,
        id: TagCategoryId,
    ) -> Result<Option<TagCategory>, DomainError>;

    /// All countries ordered by name
    async fn list_countries(&self) -> Result<Vec<Country>, DomainError>;

    /// Sites of the country with the given code, ordered by name
    async fn news_sites_for_country(
        &self,
        country_code: &str,
    ) -> Result<Vec<NewsSite>, DomainError>;

    /// Restrict delete: fails with `ReferenceInUse` while dependents exist
    async fn delete(&self, entry: CatalogRef) -> Result<(), DomainError>;
}
