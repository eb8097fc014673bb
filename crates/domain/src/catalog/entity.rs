use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ids::{CountryId, DatasetId, LanguageId, NewsSiteId, TagCategoryId};
use crate::validation::required;

/// Language of a country's news output. Immutable once referenced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub id: LanguageId,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: CountryId,
    pub name: String,
    pub code: String,
    pub language_id: LanguageId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsSite {
    pub id: NewsSiteId,
    pub name: String,
    pub code: String,
    pub country_id: CountryId,
}

/// Namespace partitioning the tag vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub id: DatasetId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCategory {
    pub id: TagCategoryId,
    pub name: String,
}

/// Validated input for `CatalogRepository::upsert_language`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLanguage {
    pub name: String,
    pub code: String,
}

impl NewLanguage {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: required("language name", name)?,
            code: required("language code", code)?,
        })
    }

    /// Whether an existing row carries exactly these values
    pub fn matches(&self, existing: &Language) -> bool {
        existing.name == self.name && existing.code == self.code
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCountry {
    pub name: String,
    pub code: String,
    pub language_id: LanguageId,
}

impl NewCountry {
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        language_id: LanguageId,
    ) -> Result<Self> {
        Ok(Self {
            name: required("country name", name)?,
            code: required("country code", code)?,
            language_id,
        })
    }

    pub fn matches(&self, existing: &Country) -> bool {
        existing.name == self.name
            && existing.code == self.code
            && existing.language_id == self.language_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNewsSite {
    pub name: String,
    pub code: String,
    pub country_id: CountryId,
}

impl NewNewsSite {
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        country_id: CountryId,
    ) -> Result<Self> {
        Ok(Self {
            name: required("news site name", name)?,
            code: required("news site code", code)?,
            country_id,
        })
    }

    pub fn matches(&self, existing: &NewsSite) -> bool {
        existing.name == self.name
            && existing.code == self.code
            && existing.country_id == self.country_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDataset {
    pub name: String,
}

impl NewDataset {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: required("dataset name", name)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTagCategory {
    pub name: String,
}

impl NewTagCategory {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: required("category name", name)?,
        })
    }
}

/// A single catalog row addressed for deletion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum CatalogRef {
    Language(LanguageId),
    Country(CountryId),
    NewsSite(NewsSiteId),
    Dataset(DatasetId),
    TagCategory(TagCategoryId),
}

impl std::fmt::Display for CatalogRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogRef::Language(id) => write!(f, "{id}"),
            CatalogRef::Country(id) => write!(f, "{id}"),
            CatalogRef::NewsSite(id) => write!(f, "{id}"),
            CatalogRef::Dataset(id) => write!(f, "{id}"),
            CatalogRef::TagCategory(id) => write!(f, "{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DomainError;

    #[test]
    fn test_new_language_trims_fields() {
        let lang = NewLanguage::new(" English ", "en ").unwrap();
        assert_eq!(lang.name, "English");
        assert_eq!(lang.code, "en");
    }

    #[test]
    fn test_new_language_requires_code() {
        let result = NewLanguage::new("English", "");
        assert_eq!(
            result.unwrap_err(),
            DomainError::InvalidInput("language code cannot be empty".to_string())
        );
    }

    #[test]
    fn test_country_match_includes_language() {
        let new = NewCountry::new("USA", "us", LanguageId::new(1)).unwrap();
        let mut existing = Country {
            id: CountryId::new(1),
            name: "USA".to_string(),
            code: "us".to_string(),
            language_id: LanguageId::new(1),
        };
        assert!(new.matches(&existing));

        existing.language_id = LanguageId::new(2);
        assert!(!new.matches(&existing));
    }

    #[test]
    fn test_news_site_match_detects_code_mismatch() {
        let new = NewNewsSite::new("Reuters", "reuters", CountryId::new(1)).unwrap();
        let existing = NewsSite {
            id: NewsSiteId::new(4),
            name: "Reuters".to_string(),
            code: "rtrs".to_string(),
            country_id: CountryId::new(1),
        };
        assert!(!new.matches(&existing));
    }

    #[test]
    fn test_blank_dataset_rejected() {
        assert!(NewDataset::new("  ").is_err());
        assert!(NewTagCategory::new("").is_err());
    }

    #[test]
    fn test_catalog_ref_display() {
        assert_eq!(
            CatalogRef::NewsSite(NewsSiteId::new(3)).to_string(),
            "news site 3"
        );
    }
}
