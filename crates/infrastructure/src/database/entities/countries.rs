use domain::{Country, CountryId, LanguageId};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "countries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(unique)]
    pub code: String,
    pub language_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::languages::Entity",
        from = "Column::LanguageId",
        to = "super::languages::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Language,
    #[sea_orm(has_many = "super::news_sites::Entity")]
    NewsSites,
}

impl Related<super::languages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Language.def()
    }
}

impl Related<super::news_sites::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NewsSites.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Country {
    fn from(model: Model) -> Self {
        Country {
            id: CountryId::new(model.id),
            name: model.name,
            code: model.code,
            language_id: LanguageId::new(model.language_id),
        }
    }
}
