use domain::{CountryId, NewsSite, NewsSiteId};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "news_sites")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(unique)]
    pub code: String,
    pub country_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::countries::Entity",
        from = "Column::CountryId",
        to = "super::countries::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Country,
    #[sea_orm(has_many = "super::news_articles::Entity")]
    NewsArticles,
}

impl Related<super::countries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Country.def()
    }
}

impl Related<super::news_articles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NewsArticles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for NewsSite {
    fn from(model: Model) -> Self {
        NewsSite {
            id: NewsSiteId::new(model.id),
            name: model.name,
            code: model.code,
            country_id: CountryId::new(model.country_id),
        }
    }
}
