//! Infrastructure layer - Storage integrations

pub mod config;
pub mod database;

pub use config::{DatabaseConfig, StoreConfig};
pub use database::{
    SeaOrmArticleRepository, SeaOrmAssociationRepository, SeaOrmCatalogRepository,
    SeaOrmTagRepository,
};
