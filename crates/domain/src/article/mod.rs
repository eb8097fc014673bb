mod entity;
mod repository;

pub use entity::{Article, NewArticle};
pub use repository::ArticleRepository;

#[cfg(any(test, feature = "mocks"))]
pub use repository::MockArticleRepository;
