mod association;
mod entity;
mod repository;

pub use association::{
    ArticleTagAssociation, ArticleTagCount, NewAssociation, TagOccurrence, repeated_position,
};
pub use entity::{NewTag, Tag};
pub use repository::{AssociationRepository, TagRepository};

#[cfg(any(test, feature = "mocks"))]
pub use repository::{MockAssociationRepository, MockTagRepository};
