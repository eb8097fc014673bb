use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Administer the news tagging store", long_about = None)]
pub struct Cli {
    /// Directory holding default.toml / <RUN_MODE>.toml
    #[arg(long, default_value = "config")]
    pub config_dir: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Apply pending schema migrations
    Migrate,

    AddLanguage {
        name: String,
        code: String,
    },

    AddCountry {
        name: String,
        code: String,
        #[arg(long)]
        language_id: i32,
    },

    AddSite {
        name: String,
        code: String,
        #[arg(long)]
        country_id: i32,
    },

    AddDataset {
        name: String,
    },

    AddCategory {
        name: String,
    },

    /// Store an article for a news site
    AddArticle {
        #[arg(long)]
        site_id: i32,
        #[arg(long)]
        title: String,
        #[arg(long)]
        url: String,
        /// Publication time, e.g. 2024-01-01T00:00:00
        #[arg(long, value_parser = parse_timestamp)]
        date: NaiveDateTime,
        /// File with the article body
        #[arg(long)]
        content_file: PathBuf,
        #[arg(long, default_value = "")]
        image_url: String,
        #[arg(long)]
        summary: Option<String>,
    },

    DefineTag {
        #[arg(long)]
        dataset_id: i32,
        text: String,
        label: i32,
        #[arg(long)]
        category_id: i32,
    },

    /// Record a JSON array of {tag_id, word, position} for one article, all or nothing
    TagArticle {
        article_id: i32,
        file: PathBuf,
    },

    /// List countries ordered by name
    Countries,

    /// List the news sites of a country
    Sites {
        country_code: String,
    },

    /// Print the tag occurrences of an article ordered by position
    ArticleTags {
        article_id: i32,
    },

    /// Number of tag associations per article
    TagCounts,
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S"))
        .map_err(|e| format!("invalid timestamp '{value}': {e}"))
}
