//! Typed surrogate keys
//!
//! Ids are generated by storage. Wrapping them keeps a `TagId` from being
//! passed where an `ArticleId` is expected.

use serde::{Deserialize, Serialize};

macro_rules! surrogate_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            pub const fn new(value: i32) -> Self {
                Self(value)
            }

            /// Get the raw storage key
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl From<i32> for $name {
            fn from(value: i32) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{} {}", $label, self.0)
            }
        }
    };
}

surrogate_id!(LanguageId, "language");
surrogate_id!(CountryId, "country");
surrogate_id!(NewsSiteId, "news site");
surrogate_id!(ArticleId, "article");
surrogate_id!(DatasetId, "dataset");
surrogate_id!(TagCategoryId, "tag category");
surrogate_id!(TagId, "tag");
surrogate_id!(
    /// Identifies one article/tag/position row
    AssociationId,
    "association"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_names_the_entity() {
        assert_eq!(ArticleId::new(7).to_string(), "article 7");
        assert_eq!(NewsSiteId::new(1).to_string(), "news site 1");
    }

    #[test]
    fn test_id_serializes_as_plain_integer() {
        let json = serde_json::to_string(&TagId::new(42)).unwrap();
        assert_eq!(json, "42");

        let id: DatasetId = serde_json::from_str("3").unwrap();
        assert_eq!(id.get(), 3);
    }
}
