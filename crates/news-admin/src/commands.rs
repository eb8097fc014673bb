use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use application::{ArticleStore, ReferenceCatalog, TagAssociationEngine};
use domain::{ArticleId, CountryId, DatasetId, LanguageId, NewsSiteId, TagCategoryId, TagId};
use futures::TryStreamExt;
use infrastructure::database::migrate;
use infrastructure::{
    SeaOrmArticleRepository, SeaOrmAssociationRepository, SeaOrmCatalogRepository,
    SeaOrmTagRepository,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::cli::Command;

/// One entry of a `tag-article` input file
#[derive(Debug, Deserialize, PartialEq)]
pub struct TagTriple {
    pub tag_id: i32,
    pub word: String,
    pub position: u32,
}

pub fn read_triples(path: &Path) -> Result<Vec<(TagId, String, u32)>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let triples: Vec<TagTriple> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of tag triples", path.display()))?;

    Ok(triples
        .into_iter()
        .map(|t| (TagId::new(t.tag_id), t.word, t.position))
        .collect())
}

/// The three services wired to one connection pool
pub struct Services {
    db: DatabaseConnection,
    catalog: ReferenceCatalog,
    articles: ArticleStore,
    engine: TagAssociationEngine,
}

impl Services {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            catalog: ReferenceCatalog::new(Arc::new(SeaOrmCatalogRepository::new(db.clone()))),
            articles: ArticleStore::new(Arc::new(SeaOrmArticleRepository::new(db.clone()))),
            engine: TagAssociationEngine::new(
                Arc::new(SeaOrmTagRepository::new(db.clone())),
                Arc::new(SeaOrmAssociationRepository::new(db.clone())),
            ),
            db,
        }
    }

    /// Execute one command and return its JSON result
    pub async fn run(&self, command: Command) -> Result<Value> {
        debug!(?command, "Running command");

        let output = match command {
            Command::Migrate => {
                migrate(&self.db).await?;
                json!({ "migrated": true })
            }
            Command::AddLanguage { name, code } => {
                let id = self.catalog.upsert_language(&name, &code).await?;
                json!({ "language_id": id })
            }
            Command::AddCountry {
                name,
                code,
                language_id,
            } => {
                let id = self
                    .catalog
                    .upsert_country(&name, &code, LanguageId::new(language_id))
                    .await?;
                json!({ "country_id": id })
            }
            Command::AddSite {
                name,
                code,
                country_id,
            } => {
                let id = self
                    .catalog
                    .upsert_news_site(&name, &code, CountryId::new(country_id))
                    .await?;
                json!({ "site_id": id })
            }
            Command::AddDataset { name } => {
                let id = self.catalog.upsert_dataset(&name).await?;
                json!({ "dataset_id": id })
            }
            Command::AddCategory { name } => {
                let id = self.catalog.upsert_tag_category(&name).await?;
                json!({ "category_id": id })
            }
            Command::AddArticle {
                site_id,
                title,
                url,
                date,
                content_file,
                image_url,
                summary,
            } => {
                let content = std::fs::read_to_string(&content_file)
                    .with_context(|| format!("Failed to read {}", content_file.display()))?;
                let id = self
                    .articles
                    .insert_article(
                        &title,
                        &content,
                        &url,
                        date,
                        NewsSiteId::new(site_id),
                        &image_url,
                        summary.as_deref(),
                    )
                    .await?;
                json!({ "article_id": id })
            }
            Command::DefineTag {
                dataset_id,
                text,
                label,
                category_id,
            } => {
                let id = self
                    .engine
                    .define_tag(
                        DatasetId::new(dataset_id),
                        &text,
                        label,
                        TagCategoryId::new(category_id),
                    )
                    .await?;
                json!({ "tag_id": id })
            }
            Command::TagArticle { article_id, file } => {
                let batch = read_triples(&file)?;
                let ids = self
                    .engine
                    .associate_batch(ArticleId::new(article_id), &batch)
                    .await?;
                info!(article_id, count = ids.len(), "Article tagged from file");
                json!({ "association_ids": ids })
            }
            Command::Countries => serde_json::to_value(self.catalog.list_countries().await?)?,
            Command::Sites { country_code } => {
                serde_json::to_value(self.catalog.news_sites_for_country(&country_code).await?)?
            }
            Command::ArticleTags { article_id } => {
                let occurrences: Vec<_> = self
                    .engine
                    .tags_for_article(ArticleId::new(article_id))
                    .try_collect()
                    .await?;
                serde_json::to_value(occurrences)?
            }
            Command::TagCounts => serde_json::to_value(self.engine.tag_counts().await?)?,
        };

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::DomainError;
    use infrastructure::DatabaseConfig;
    use infrastructure::database::connect;
    use std::io::Write;

    async fn services() -> Services {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            ..DatabaseConfig::default()
        };
        let services = Services::new(connect(&config).await.unwrap());
        services.run(Command::Migrate).await.unwrap();
        services
    }

    async fn seed(services: &Services) {
        let commands = [
            Command::AddLanguage {
                name: "English".into(),
                code: "en".into(),
            },
            Command::AddCountry {
                name: "USA".into(),
                code: "us".into(),
                language_id: 1,
            },
            Command::AddSite {
                name: "Reuters".into(),
                code: "reuters".into(),
                country_id: 1,
            },
            Command::AddDataset { name: "ds1".into() },
            Command::AddCategory {
                name: "politics".into(),
            },
            Command::DefineTag {
                dataset_id: 1,
                text: "election".into(),
                label: 10,
                category_id: 1,
            },
            Command::DefineTag {
                dataset_id: 1,
                text: "vote".into(),
                label: 11,
                category_id: 1,
            },
        ];
        for command in commands {
            services.run(command).await.unwrap();
        }
    }

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_read_triples() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "tags.json",
            r#"[{"tag_id": 1, "word": "election", "position": 4}]"#,
        );
        assert_eq!(
            read_triples(&path).unwrap(),
            vec![(TagId::new(1), "election".to_string(), 4)]
        );

        let bad = write_file(&dir, "bad.json", r#"{"tag_id": 1}"#);
        assert!(read_triples(&bad).is_err());
    }

    #[tokio::test]
    async fn test_tag_article_from_file() {
        let services = services().await;
        seed(&services).await;
        let dir = tempfile::tempdir().unwrap();

        let body = write_file(&dir, "body.txt", "The election and the vote");
        let out = services
            .run(Command::AddArticle {
                site_id: 1,
                title: "T".into(),
                url: "http://x".into(),
                date: chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .unwrap(),
                content_file: body,
                image_url: "http://img".into(),
                summary: None,
            })
            .await
            .unwrap();
        assert_eq!(out, json!({ "article_id": 1 }));

        let tags = write_file(
            &dir,
            "tags.json",
            r#"[{"tag_id": 2, "word": "vote", "position": 4},
                {"tag_id": 1, "word": "election", "position": 1}]"#,
        );
        let out = services
            .run(Command::TagArticle {
                article_id: 1,
                file: tags,
            })
            .await
            .unwrap();
        assert_eq!(out, json!({ "association_ids": [1, 2] }));

        let out = services
            .run(Command::ArticleTags { article_id: 1 })
            .await
            .unwrap();
        assert_eq!(out[0]["tag"]["text"], "election");
        assert_eq!(out[1]["position"], 4);

        let out = services.run(Command::TagCounts).await.unwrap();
        assert_eq!(out, json!([{ "article_id": 1, "tag_count": 2 }]));
    }

    #[tokio::test]
    async fn test_sites_and_countries() {
        let services = services().await;
        seed(&services).await;

        let out = services.run(Command::Countries).await.unwrap();
        assert_eq!(out[0]["code"], "us");

        let out = services
            .run(Command::Sites {
                country_code: "us".into(),
            })
            .await
            .unwrap();
        assert_eq!(out[0]["name"], "Reuters");
    }

    #[tokio::test]
    async fn test_domain_error_surfaces() {
        let services = services().await;
        seed(&services).await;

        let err = services
            .run(Command::DefineTag {
                dataset_id: 1,
                text: "election".into(),
                label: 12,
                category_id: 1,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::DuplicateTag(_))
        ));
    }
}
