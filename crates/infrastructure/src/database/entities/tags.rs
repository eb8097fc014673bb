use domain::{DatasetId, Tag, TagCategoryId, TagId};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// (tag, dataset_id) and (tag_label, dataset_id) carry unique indexes
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub tag: String,
    pub tag_label: i32,
    pub category_id: i32,
    pub dataset_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tag_categories::Entity",
        from = "Column::CategoryId",
        to = "super::tag_categories::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    TagCategory,
    #[sea_orm(
        belongs_to = "super::datasets::Entity",
        from = "Column::DatasetId",
        to = "super::datasets::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Dataset,
    #[sea_orm(has_many = "super::article_tag_map::Entity")]
    ArticleTagMap,
}

impl Related<super::tag_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TagCategory.def()
    }
}

impl Related<super::datasets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dataset.def()
    }
}

impl Related<super::article_tag_map::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArticleTagMap.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Tag {
    fn from(model: Model) -> Self {
        Tag {
            id: TagId::new(model.id),
            text: model.tag,
            label: model.tag_label,
            category_id: TagCategoryId::new(model.category_id),
            dataset_id: DatasetId::new(model.dataset_id),
        }
    }
}
