//! Shared fixtures for repository integration tests.
//!
//! Every test gets its own in-memory SQLite database with the full schema
//! applied, so tests never see each other's rows.

#![allow(dead_code)]

use chrono::NaiveDateTime;
use domain::{
    ArticleId, ArticleRepository, CatalogRepository, CountryId, DatasetId, NewArticle, NewCountry,
    NewDataset, NewLanguage, NewNewsSite, NewTag, NewTagCategory, NewsSiteId, TagCategoryId,
    TagId, TagRepository,
};
use infrastructure::database::{connect, migrate};
use infrastructure::{
    DatabaseConfig, SeaOrmArticleRepository, SeaOrmCatalogRepository, SeaOrmTagRepository,
};
use sea_orm::DatabaseConnection;

pub async fn setup_db() -> DatabaseConnection {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        ..DatabaseConfig::default()
    };
    let db = connect(&config).await.expect("Failed to open in-memory database");
    migrate(&db).await.expect("Failed to apply migrations");
    db
}

pub fn date(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

/// English / USA / Reuters, the usual parents for an article
pub async fn seed_site(db: &DatabaseConnection) -> (CountryId, NewsSiteId) {
    let catalog = SeaOrmCatalogRepository::new(db.clone());
    let language = catalog
        .upsert_language(&NewLanguage::new("English", "en").unwrap())
        .await
        .unwrap();
    let country = catalog
        .upsert_country(&NewCountry::new("USA", "us", language).unwrap())
        .await
        .unwrap();
    let site = catalog
        .upsert_news_site(&NewNewsSite::new("Reuters", "reuters", country).unwrap())
        .await
        .unwrap();
    (country, site)
}

pub async fn seed_article(db: &DatabaseConnection, site: NewsSiteId, url: &str) -> ArticleId {
    let article = NewArticle::new(
        "Vote tally",
        "The election results are in",
        url,
        date("2024-01-01 00:00:00"),
        site,
        "",
    )
    .unwrap();
    SeaOrmArticleRepository::new(db.clone())
        .insert(&article)
        .await
        .unwrap()
}

pub async fn seed_vocabulary(db: &DatabaseConnection) -> (DatasetId, TagCategoryId) {
    let catalog = SeaOrmCatalogRepository::new(db.clone());
    let dataset = catalog
        .upsert_dataset(&NewDataset::new("ner-v1").unwrap())
        .await
        .unwrap();
    let category = catalog
        .upsert_tag_category(&NewTagCategory::new("event").unwrap())
        .await
        .unwrap();
    (dataset, category)
}

pub async fn seed_tag(
    db: &DatabaseConnection,
    dataset: DatasetId,
    category: TagCategoryId,
    text: &str,
    label: i32,
) -> TagId {
    SeaOrmTagRepository::new(db.clone())
        .define(&NewTag::new(dataset, text, label, category).unwrap())
        .await
        .unwrap()
}
