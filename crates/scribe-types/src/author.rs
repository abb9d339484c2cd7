use serde::{Deserialize, Serialize};

use crate::identity::AuthorId;

/// Derive the display name for a first/last name pair.
///
/// The parts are joined with a single space and the result is trimmed, so an
/// empty or missing last name does not leave a trailing space.
pub fn display_name(first_name: &str, last_name: &str) -> String {
    format!("{first_name} {last_name}").trim().to_string()
}

/// A stored author record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: AuthorId,
    pub first_name: String,
    pub last_name: String,
    /// Globally unique across all authors.
    pub user_name: String,
}

impl Author {
    /// Build an author record from creation fields and a store-assigned id.
    pub fn from_new(id: AuthorId, new: NewAuthor) -> Self {
        Self {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
            user_name: new.user_name,
        }
    }

    pub fn display_name(&self) -> String {
        display_name(&self.first_name, &self.last_name)
    }
}

/// Fields required to create an [`Author`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
}

/// Partial update of an [`Author`]. `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: Option<String>,
}

impl AuthorPatch {
    /// Returns `true` if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.user_name.is_none()
    }

    /// Apply the set fields to `author` in place.
    pub fn apply(&self, author: &mut Author) {
        if let Some(first_name) = &self.first_name {
            author.first_name.clone_from(first_name);
        }
        if let Some(last_name) = &self.last_name {
            author.last_name.clone_from(last_name);
        }
        if let Some(user_name) = &self.user_name {
            author.user_name.clone_from(user_name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn jane() -> Author {
        Author::from_new(
            AuthorId::new(),
            NewAuthor {
                first_name: "Jane".into(),
                last_name: "Doe".into(),
                user_name: "jdoe".into(),
            },
        )
    }

    #[test]
    fn display_name_joins_with_space() {
        assert_eq!(display_name("Ada", "Lovelace"), "Ada Lovelace");
    }

    #[test]
    fn display_name_trims_missing_last_name() {
        assert_eq!(display_name("Ada", ""), "Ada");
        assert_eq!(display_name("", "Lovelace"), "Lovelace");
        assert_eq!(display_name("", ""), "");
    }

    #[test]
    fn author_display_name() {
        assert_eq!(jane().display_name(), "Jane Doe");
    }

    #[test]
    fn patch_applies_only_set_fields() {
        let mut author = jane();
        let patch = AuthorPatch {
            last_name: Some("Smith".into()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
        patch.apply(&mut author);
        assert_eq!(author.first_name, "Jane");
        assert_eq!(author.last_name, "Smith");
        assert_eq!(author.user_name, "jdoe");
    }

    #[test]
    fn empty_patch() {
        let mut author = jane();
        let before = author.clone();
        let patch = AuthorPatch::default();
        assert!(patch.is_empty());
        patch.apply(&mut author);
        assert_eq!(author, before);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(jane()).unwrap();
        assert_eq!(json["firstName"], "Jane");
        assert_eq!(json["userName"], "jdoe");
    }

    proptest! {
        #[test]
        fn display_name_never_has_outer_whitespace(
            first in "[A-Za-z ]{0,12}",
            last in "[A-Za-z ]{0,12}",
        ) {
            let name = display_name(&first, &last);
            prop_assert_eq!(name.trim(), name.as_str());
        }

        #[test]
        fn display_name_of_plain_words(first in "[A-Za-z]{1,12}", last in "[A-Za-z]{1,12}") {
            prop_assert_eq!(display_name(&first, &last), format!("{first} {last}"));
        }
    }
}
