//! Domain layer - Pure business logic with no external dependencies
//!
//! This crate contains:
//! - Entities (Language, Country, NewsSite, Article, Dataset, TagCategory, Tag)
//! - Typed surrogate ids
//! - Repository interfaces (traits)
//! - The error taxonomy shared by every layer
//!
//! Principles:
//! - No dependencies on infrastructure
//! - Input validated when new entities are constructed
//! - Uniqueness and referential integrity are left to storage constraints

pub mod article;
pub mod catalog;
pub mod error;
pub mod ids;
pub mod tag;
mod validation;

// Re-export commonly used types
pub use article::{Article, ArticleRepository, NewArticle};
pub use catalog::{
    CatalogRef, CatalogRepository, Country, Dataset, Language, NewCountry, NewDataset,
    NewLanguage, NewNewsSite, NewTagCategory, NewsSite, TagCategory,
};
pub use error::{DomainError, Result};
pub use ids::{
    ArticleId, AssociationId, CountryId, DatasetId, LanguageId, NewsSiteId, TagCategoryId, TagId,
};
pub use tag::{
    ArticleTagAssociation, ArticleTagCount, AssociationRepository, NewAssociation, NewTag, Tag,
    TagOccurrence, TagRepository,
};
