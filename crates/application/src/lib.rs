//! Application layer - Use cases over the news tagging store
//!
//! - `ReferenceCatalog`: languages, countries, sites, datasets, categories
//! - `ArticleStore`: append-only articles
//! - `TagAssociationEngine`: tag vocabulary and article-tag associations

pub mod article;
pub mod catalog;
pub mod tagging;

pub use article::ArticleStore;
pub use catalog::ReferenceCatalog;
pub use tagging::TagAssociationEngine;
