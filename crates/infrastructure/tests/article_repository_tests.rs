//! Integration tests for SeaOrmArticleRepository against in-memory SQLite

mod common;

use common::{date, seed_article, seed_site, seed_tag, seed_vocabulary, setup_db};
use domain::{
    ArticleId, ArticleRepository, AssociationRepository, DomainError, NewArticle,
    NewAssociation, NewsSiteId,
};
use infrastructure::{SeaOrmArticleRepository, SeaOrmAssociationRepository};

#[tokio::test]
async fn test_insert_and_find_article() {
    let db = setup_db().await;
    let (_, site) = seed_site(&db).await;
    let repo = SeaOrmArticleRepository::new(db);

    let article = NewArticle::new(
        "Vote tally",
        "  body kept as-is  ",
        "https://example.com/a",
        date("2024-03-05 12:30:00"),
        site,
        "https://example.com/a.jpg",
    )
    .unwrap();
    let id = repo.insert(&article).await.unwrap();
    assert_eq!(id, ArticleId::new(1));

    let stored = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.content, "  body kept as-is  ");
    assert_eq!(stored.date, date("2024-03-05 12:30:00"));
    assert_eq!(stored.site_id, site);
    assert_eq!(stored.summary, None);
}

#[tokio::test]
async fn test_insert_unknown_site_is_rejected() {
    let db = setup_db().await;
    let repo = SeaOrmArticleRepository::new(db);

    let article = NewArticle::new(
        "Orphan",
        "",
        "https://example.com/orphan",
        date("2024-01-01 00:00:00"),
        NewsSiteId::new(77),
        "",
    )
    .unwrap();
    let result = repo.insert(&article).await;
    assert!(matches!(result, Err(DomainError::ReferenceNotFound(_))));
    assert!(repo.list(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_same_url_twice_creates_two_articles() {
    let db = setup_db().await;
    let (_, site) = seed_site(&db).await;

    let first = seed_article(&db, site, "https://example.com/dup").await;
    let second = seed_article(&db, site, "https://example.com/dup").await;
    assert_ne!(first, second);

    let repo = SeaOrmArticleRepository::new(db);
    assert_eq!(
        repo.find_by_url("https://example.com/dup").await.unwrap(),
        Some(first)
    );
    assert_eq!(repo.find_by_url("https://example.com/none").await.unwrap(), None);
}

#[tokio::test]
async fn test_list_filters_by_site() {
    let db = setup_db().await;
    let (_, site) = seed_site(&db).await;
    seed_article(&db, site, "https://example.com/1").await;
    seed_article(&db, site, "https://example.com/2").await;
    let repo = SeaOrmArticleRepository::new(db);

    assert_eq!(repo.list(Some(site)).await.unwrap().len(), 2);
    assert!(repo.list(Some(NewsSiteId::new(99))).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_summary() {
    let db = setup_db().await;
    let (_, site) = seed_site(&db).await;
    let id = seed_article(&db, site, "https://example.com/s").await;
    let repo = SeaOrmArticleRepository::new(db);

    repo.update_summary(id, "Short version").await.unwrap();
    let stored = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.summary.as_deref(), Some("Short version"));

    let result = repo.update_summary(ArticleId::new(500), "x").await;
    assert!(matches!(result, Err(DomainError::NotFound(_))));
}

#[tokio::test]
async fn test_delete_tagged_article_requires_explicit_cascade() {
    let db = setup_db().await;
    let (_, site) = seed_site(&db).await;
    let article = seed_article(&db, site, "https://example.com/t").await;
    let (dataset, category) = seed_vocabulary(&db).await;
    let tag = seed_tag(&db, dataset, category, "election", 10).await;

    let associations = SeaOrmAssociationRepository::new(db.clone());
    associations
        .associate_batch(
            article,
            &[
                NewAssociation::new(tag, "election", 1).unwrap(),
                NewAssociation::new(tag, "election", 7).unwrap(),
            ],
        )
        .await
        .unwrap();

    let repo = SeaOrmArticleRepository::new(db);
    let result = repo.delete(article).await;
    assert!(matches!(result, Err(DomainError::ReferenceInUse(_))));

    let removed = repo.delete_with_associations(article).await.unwrap();
    assert_eq!(removed, 2);
    assert!(repo.find_by_id(article).await.unwrap().is_none());
    assert!(associations.tag_counts().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_with_associations_missing_article() {
    let db = setup_db().await;
    let repo = SeaOrmArticleRepository::new(db);

    let result = repo.delete_with_associations(ArticleId::new(3)).await;
    assert!(matches!(result, Err(DomainError::NotFound(_))));
}
