use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ids::{DatasetId, TagCategoryId, TagId};
use crate::validation::required;

/// A tag of a dataset's vocabulary.
///
/// Both `text` and `label` are unique within the dataset. The label is an
/// opaque integer code (typically a classifier's class id); its numeric order
/// carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub text: String,
    pub label: i32,
    pub category_id: TagCategoryId,
    pub dataset_id: DatasetId,
}

/// Validated input for `TagRepository::define`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub dataset_id: DatasetId,
    pub text: String,
    pub label: i32,
    pub category_id: TagCategoryId,
}

impl NewTag {
    pub fn new(
        dataset_id: DatasetId,
        text: impl Into<String>,
        label: i32,
        category_id: TagCategoryId,
    ) -> Result<Self> {
        Ok(Self {
            dataset_id,
            text: required("tag text", text)?,
            label,
            category_id,
        })
    }
}
