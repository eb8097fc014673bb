use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::Tag;
use crate::error::{DomainError, Result};
use crate::ids::{ArticleId, AssociationId, TagId};
use crate::validation::required;

/// A recorded occurrence of a tag at a word position within an article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleTagAssociation {
    pub id: AssociationId,
    pub article_id: ArticleId,
    pub tag_id: TagId,
    pub word: String,
    pub position: u32,
}

/// One (tag, word, position) triple submitted by the tagging collaborator.
///
/// `position` is a word offset, not a byte offset. Whether `word` really sits
/// at `position` in the article body is not checked here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAssociation {
    pub tag_id: TagId,
    pub word: String,
    pub position: u32,
}

impl NewAssociation {
    pub fn new(tag_id: TagId, word: impl Into<String>, position: u32) -> Result<Self> {
        // Storage keeps positions in a signed 32-bit column
        if i32::try_from(position).is_err() {
            return Err(DomainError::InvalidInput(format!(
                "position {position} exceeds {}",
                i32::MAX
            )));
        }

        Ok(Self {
            tag_id,
            word: required("tagged word", word)?,
            position,
        })
    }
}

/// First (tag, position) pair that appears more than once in a batch
pub fn repeated_position(batch: &[NewAssociation]) -> Option<(TagId, u32)> {
    let mut seen = HashSet::with_capacity(batch.len());
    batch
        .iter()
        .map(|a| (a.tag_id, a.position))
        .find(|key| !seen.insert(*key))
}

/// Read model returned by `tags_for_article`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagOccurrence {
    pub association_id: AssociationId,
    pub tag: Tag,
    pub word: String,
    pub position: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleTagCount {
    pub article_id: ArticleId,
    pub tag_count: u64,
}
