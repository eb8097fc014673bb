mod entity;
mod repository;

pub use entity::{
    CatalogRef, Country, Dataset, Language, NewCountry, NewDataset, NewLanguage, NewNewsSite,
    NewTagCategory, NewsSite, TagCategory,
};
pub use repository::CatalogRepository;

#[cfg(any(test, feature = "mocks"))]
pub use repository::MockCatalogRepository;
