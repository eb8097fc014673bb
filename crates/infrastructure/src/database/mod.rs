mod article_repository;
mod association_repository;
mod catalog_repository;
mod connection;
mod error;
mod lookup;
mod tag_repository;

pub mod entities;

pub use article_repository::SeaOrmArticleRepository;
pub use association_repository::SeaOrmAssociationRepository;
pub use catalog_repository::SeaOrmCatalogRepository;
pub use connection::{connect, migrate, redacted_url};
pub use tag_repository::SeaOrmTagRepository;
