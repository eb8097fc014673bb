use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// (article_id, tag_id, position) carries a unique index
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "article_tag_map")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub article_id: i32,
    pub tag_id: i32,
    pub word: String,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::news_articles::Entity",
        from = "Column::ArticleId",
        to = "super::news_articles::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    NewsArticle,
    #[sea_orm(
        belongs_to = "super::tags::Entity",
        from = "Column::TagId",
        to = "super::tags::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Tag,
}

impl Related<super::news_articles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NewsArticle.def()
    }
}

impl Related<super::tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tag.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
