//! sea-orm entities mirroring the tables created by the `migration` crate

pub mod article_tag_map;
pub mod countries;
pub mod datasets;
pub mod languages;
pub mod news_articles;
pub mod news_sites;
pub mod tag_categories;
pub mod tags;
