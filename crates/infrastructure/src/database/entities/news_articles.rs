use domain::{Article, ArticleId, NewsSiteId};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "news_articles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[sea_orm(column_type = "Text")]
    pub article_url: String,
    pub article_date: DateTime,
    pub site_id: i32,
    #[sea_orm(column_type = "Text")]
    pub image_url: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub summary: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::news_sites::Entity",
        from = "Column::SiteId",
        to = "super::news_sites::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    NewsSite,
    #[sea_orm(has_many = "super::article_tag_map::Entity")]
    ArticleTagMap,
}

impl Related<super::news_sites::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NewsSite.def()
    }
}

impl Related<super::article_tag_map::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArticleTagMap.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Article {
    fn from(model: Model) -> Self {
        Article {
            id: ArticleId::new(model.id),
            title: model.title,
            content: model.content,
            url: model.article_url,
            date: model.article_date,
            site_id: NewsSiteId::new(model.site_id),
            image_url: model.image_url,
            summary: model.summary,
        }
    }
}
