use sea_orm_migration::prelude::*;

use crate::unique_index;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create languages table
        manager
            .create_table(
                Table::create()
                    .table(Languages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Languages::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Languages::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Languages::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create countries table
        manager
            .create_table(
                Table::create()
                    .table(Countries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Countries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Countries::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Countries::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Countries::LanguageId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_country_language")
                            .from(Countries::Table, Countries::LanguageId)
                            .to(Languages::Table, Languages::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create news_sites table
        manager
            .create_table(
                Table::create()
                    .table(NewsSites::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NewsSites::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(NewsSites::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(NewsSites::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(NewsSites::CountryId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_news_site_country")
                            .from(NewsSites::Table, NewsSites::CountryId)
                            .to(Countries::Table, Countries::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create news_articles table (no uniqueness on url)
        manager
            .create_table(
                Table::create()
                    .table(NewsArticles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NewsArticles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(NewsArticles::Title).text().not_null())
                    .col(ColumnDef::new(NewsArticles::Content).text().not_null())
                    .col(ColumnDef::new(NewsArticles::ArticleUrl).text().not_null())
                    .col(
                        ColumnDef::new(NewsArticles::ArticleDate)
                            .date_time()
                            .not_null(),
                    )
                    .col(ColumnDef::new(NewsArticles::SiteId).integer().not_null())
                    .col(ColumnDef::new(NewsArticles::ImageUrl).text().not_null())
                    .col(ColumnDef::new(NewsArticles::Summary).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_news_article_site")
                            .from(NewsArticles::Table, NewsArticles::SiteId)
                            .to(NewsSites::Table, NewsSites::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_news_articles_url")
                    .table(NewsArticles::Table)
                    .col(NewsArticles::ArticleUrl)
                    .to_owned(),
            )
            .await?;

        // Create datasets table
        manager
            .create_table(
                Table::create()
                    .table(Datasets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Datasets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Datasets::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create tag_categories table
        manager
            .create_table(
                Table::create()
                    .table(TagCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TagCategories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TagCategories::CategoryName)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create tags table
        manager
            .create_table(
                Table::create()
                    .table(Tags::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tags::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tags::Tag).string().not_null())
                    .col(ColumnDef::new(Tags::TagLabel).integer().not_null())
                    .col(ColumnDef::new(Tags::CategoryId).integer().not_null())
                    .col(ColumnDef::new(Tags::DatasetId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tag_category")
                            .from(Tags::Table, Tags::CategoryId)
                            .to(TagCategories::Table, TagCategories::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tag_dataset")
                            .from(Tags::Table, Tags::DatasetId)
                            .to(Datasets::Table, Datasets::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Tag text and label are each unique within a dataset
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name(unique_index::TAGS_TAG_DATASET)
                    .table(Tags::Table)
                    .col(Tags::Tag)
                    .col(Tags::DatasetId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name(unique_index::TAGS_LABEL_DATASET)
                    .table(Tags::Table)
                    .col(Tags::TagLabel)
                    .col(Tags::DatasetId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create article_tag_map table
        manager
            .create_table(
                Table::create()
                    .table(ArticleTagMap::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ArticleTagMap::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ArticleTagMap::ArticleId).integer().not_null())
                    .col(ColumnDef::new(ArticleTagMap::TagId).integer().not_null())
                    .col(ColumnDef::new(ArticleTagMap::Word).string().not_null())
                    .col(ColumnDef::new(ArticleTagMap::Position).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_article_tag_map_article")
                            .from(ArticleTagMap::Table, ArticleTagMap::ArticleId)
                            .to(NewsArticles::Table, NewsArticles::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_article_tag_map_tag")
                            .from(ArticleTagMap::Table, ArticleTagMap::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // A tag is recorded at most once per word position of an article
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name(unique_index::ARTICLE_TAG_POSITION)
                    .table(ArticleTagMap::Table)
                    .col(ArticleTagMap::ArticleId)
                    .col(ArticleTagMap::TagId)
                    .col(ArticleTagMap::Position)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Serves tags_for_article ordering
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_article_tag_map_article_position")
                    .table(ArticleTagMap::Table)
                    .col(ArticleTagMap::ArticleId)
                    .col(ArticleTagMap::Position)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_article_tag_map_tag")
                    .table(ArticleTagMap::Table)
                    .col(ArticleTagMap::TagId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ArticleTagMap::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Tags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TagCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Datasets::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(NewsArticles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(NewsSites::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Countries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Languages::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Languages {
    Table,
    Id,
    Name,
    Code,
}

#[derive(DeriveIden)]
enum Countries {
    Table,
    Id,
    Name,
    Code,
    LanguageId,
}

#[derive(DeriveIden)]
enum NewsSites {
    Table,
    Id,
    Name,
    Code,
    CountryId,
}

#[derive(DeriveIden)]
enum NewsArticles {
    Table,
    Id,
    Title,
    Content,
    ArticleUrl,
    ArticleDate,
    SiteId,
    ImageUrl,
    Summary,
}

#[derive(DeriveIden)]
enum Datasets {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum TagCategories {
    Table,
    Id,
    CategoryName,
}

#[derive(DeriveIden)]
enum Tags {
    Table,
    Id,
    Tag,
    TagLabel,
    CategoryId,
    DatasetId,
}

#[derive(DeriveIden)]
enum ArticleTagMap {
    Table,
    Id,
    ArticleId,
    TagId,
    Word,
    Position,
}
