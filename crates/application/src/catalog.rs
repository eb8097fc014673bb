use std::sync::Arc;

use domain::{
    CatalogRef, CatalogRepository, Country, CountryId, Dataset, DatasetId, Language, LanguageId,
    NewCountry, NewDataset, NewLanguage, NewNewsSite, NewTagCategory, NewsSite, NewsSiteId,
    Result, TagCategory, TagCategoryId,
};
use tracing::{debug, warn};

/// Idempotent registration of the reference entities that articles and
/// tags hang off: languages, countries, news sites, datasets, categories.
///
/// Every upsert returns the id of the row carrying exactly the given values,
/// inserting it if needed. A row that shares only part of the unique key
/// is a `ConflictingUniqueValue`.
pub struct ReferenceCatalog {
    repo: Arc<dyn CatalogRepository>,
}

impl ReferenceCatalog {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
        Self { repo }
    }

    pub async fn upsert_language(&self, name: &str, code: &str) -> Result<LanguageId> {
        let language = NewLanguage::new(name, code)?;
        let id = self.repo.upsert_language(&language).await.inspect_err(|e| {
            warn!(name = %language.name, code = %language.code, error = %e, "Language rejected")
        })?;
        debug!(%id, code = %language.code, "Language registered");
        Ok(id)
    }

    pub async fn upsert_country(
        &self,
        name: &str,
        code: &str,
        language_id: LanguageId,
    ) -> Result<CountryId> {
        let country = NewCountry::new(name, code, language_id)?;
        let id = self.repo.upsert_country(&country).await.inspect_err(|e| {
            warn!(name = %country.name, code = %country.code, %language_id, error = %e, "Country rejected")
        })?;
        debug!(%id, code = %country.code, "Country registered");
        Ok(id)
    }

    pub async fn upsert_news_site(
        &self,
        name: &str,
        code: &str,
        country_id: CountryId,
    ) -> Result<NewsSiteId> {
        let site = NewNewsSite::new(name, code, country_id)?;
        let id = self.repo.upsert_news_site(&site).await.inspect_err(|e| {
            warn!(name = %site.name, code = %site.code, %country_id, error = %e, "News site rejected")
        })?;
        debug!(%id, code = %site.code, "News site registered");
        Ok(id)
    }

    pub async fn upsert_dataset(&self, name: &str) -> Result<DatasetId> {
        let dataset = NewDataset::new(name)?;
        self.repo.upsert_dataset(&dataset).await
    }

    pub async fn upsert_tag_category(&self, name: &str) -> Result<TagCategoryId> {
        let category = NewTagCategory::new(name)?;
        self.repo.upsert_tag_category(&category).await
    }

    pub async fn find_language(&self, id: LanguageId) -> Result<Option<Language>> {
        self.repo.find_language(id).await
    }

    pub async fn find_country(&self, id: CountryId) -> Result<Option<Country>> {
        self.repo.find_country(id).await
    }

    pub async fn find_news_site(&self, id: NewsSiteId) -> Result<Option<NewsSite>> {
        self.repo.find_news_site(id).await
    }

    pub async fn find_dataset(&self, id: DatasetId) -> Result<Option<Dataset>> {
        self.repo.find_dataset(id).await
    }

    pub async fn find_tag_category(&self, id: TagCategoryId) -> Result<Option<TagCategory>> {
        self.repo.find_tag_category(id).await
    }

    /// All countries ordered by name
    pub async fn list_countries(&self) -> Result<Vec<Country>> {
        self.repo.list_countries().await
    }

    /// Sites of the country with the given code, ordered by name. An unknown
    /// code yields an empty list.
    pub async fn news_sites_for_country(&self, country_code: &str) -> Result<Vec<NewsSite>> {
        self.repo.news_sites_for_country(country_code.trim()).await
    }

    /// Restrict delete: refused with `ReferenceInUse` while dependents exist
    pub async fn delete(&self, entry: CatalogRef) -> Result<()> {
        self.repo.delete(entry).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::DomainError;
    use domain::catalog::MockCatalogRepository;

    #[tokio::test]
    async fn test_upsert_language_validates_before_storage() {
        // No expectations: any repository call would panic
        let catalog = ReferenceCatalog::new(Arc::new(MockCatalogRepository::new()));

        let result = catalog.upsert_language("English", "   ").await;
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_upsert_country_passes_trimmed_values() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_upsert_country()
            .withf(|c| c.name == "USA" && c.code == "us" && c.language_id == LanguageId::new(1))
            .times(1)
            .returning(|_| Ok(CountryId::new(1)));

        let catalog = ReferenceCatalog::new(Arc::new(repo));
        let id = catalog
            .upsert_country(" USA ", "us", LanguageId::new(1))
            .await
            .unwrap();
        assert_eq!(id, CountryId::new(1));
    }

    #[tokio::test]
    async fn test_conflict_is_propagated() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_upsert_news_site().returning(|_| {
            Err(DomainError::ConflictingUniqueValue(
                "news site code taken".to_string(),
            ))
        });

        let catalog = ReferenceCatalog::new(Arc::new(repo));
        let err = catalog
            .upsert_news_site("Reuters", "reuters", CountryId::new(1))
            .await
            .unwrap_err();
        assert!(err.is_duplicate());
    }

    #[tokio::test]
    async fn test_news_sites_lookup_trims_code() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_news_sites_for_country()
            .withf(|code| code == "us")
            .returning(|_| Ok(vec![]));

        let catalog = ReferenceCatalog::new(Arc::new(repo));
        assert!(catalog.news_sites_for_country(" us ").await.unwrap().is_empty());
    }
}
