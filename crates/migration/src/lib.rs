pub use sea_orm_migration::prelude::*;

mod m20240101_000001_initial_setup;

/// Names of the unique indexes the repositories translate into typed errors
pub mod unique_index {
    pub const TAGS_TAG_DATASET: &str = "uq_tags_tag_dataset";
    pub const TAGS_LABEL_DATASET: &str = "uq_tags_label_dataset";
    pub const ARTICLE_TAG_POSITION: &str = "uq_article_tag_map_article_tag_position";
}

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240101_000001_initial_setup::Migration)]
    }
}
