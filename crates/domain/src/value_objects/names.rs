//! Validated name newtypes for domain entities
//!
//! These newtypes ensure that names are valid by construction:
//! - Non-empty
//! - Within length limits
//! - Trimmed of leading/trailing whitespace
//!
//! The display form is kept exactly as entered (after trimming). Lookup keys
//! are derived separately by [`crate::keys::normalize`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for name fields (CharacterName, CatalogName)
const MAX_NAME_LENGTH: usize = 100;

/// Maximum length for description fields
const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// Maximum length for an external owner identifier
const MAX_OWNER_ID_LENGTH: usize = 64;

macro_rules! define_name {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create a new validated name.
            ///
            /// # Errors
            ///
            /// Returns `DomainError::Validation` if the name is empty after
            /// trimming or exceeds the maximum name length.
            pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
                let name = name.into();
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::validation(concat!($label, " cannot be empty")));
                }
                if trimmed.chars().count() > MAX_NAME_LENGTH {
                    return Err(DomainError::validation(format!(
                        concat!($label, " cannot exceed {} characters"),
                        MAX_NAME_LENGTH
                    )));
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Returns the name as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(name: $name) -> String {
                name.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_name!(
    /// A validated character name (non-empty, <=100 chars, trimmed)
    CharacterName,
    "Character name"
);

define_name!(
    /// A validated catalog template name, shared by items and enemies
    CatalogName,
    "Catalog name"
);

// ============================================================================
// Description
// ============================================================================

/// Free-form description text (may be empty, <=2000 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

impl Description {
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(DomainError::validation(format!(
                "Description cannot exceed {} characters",
                MAX_DESCRIPTION_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Description {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Description> for String {
    fn from(description: Description) -> String {
        description.0
    }
}

// ============================================================================
// OwnerId
// ============================================================================

/// Identifier of the external account that owns a character.
///
/// Opaque to the core (the chat platform's user id). It may not contain the
/// key separator `:` or whitespace, so `owner:name` keys stay unambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OwnerId(String);

impl OwnerId {
    /// Create a validated owner id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the id is empty, too long, or
    /// contains `:` or whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.is_empty() {
            return Err(DomainError::validation("Owner id cannot be empty"));
        }
        if id.len() > MAX_OWNER_ID_LENGTH {
            return Err(DomainError::validation(format!(
                "Owner id cannot exceed {} characters",
                MAX_OWNER_ID_LENGTH
            )));
        }
        if id.contains(crate::keys::KEY_SEPARATOR) || id.chars().any(char::is_whitespace) {
            return Err(DomainError::validation(
                "Owner id cannot contain ':' or whitespace",
            ));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for OwnerId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<OwnerId> for String {
    fn from(id: OwnerId) -> String {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_name_is_trimmed() {
        let name = CharacterName::new("  Link  ").unwrap();
        assert_eq!(name.as_str(), "Link");
    }

    #[test]
    fn empty_names_are_rejected() {
        assert!(CharacterName::new("   ").is_err());
        assert!(CatalogName::new("").is_err());
    }

    #[test]
    fn overlong_names_are_rejected() {
        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        let err = CatalogName::new(long).unwrap_err();
        assert!(err.to_string().contains("cannot exceed"));
    }

    #[test]
    fn description_may_be_empty() {
        assert!(Description::new("").unwrap().is_empty());
        assert!(Description::new("x".repeat(MAX_DESCRIPTION_LENGTH + 1)).is_err());
    }

    #[test]
    fn owner_id_rejects_separator() {
        assert!(OwnerId::new("123456").is_ok());
        assert!(OwnerId::new("12:34").is_err());
        assert!(OwnerId::new("12 34").is_err());
        assert!(OwnerId::new("").is_err());
    }

    #[test]
    fn names_deserialize_through_validation() {
        let name: CharacterName = serde_json::from_str("\" Zelda \"").unwrap();
        assert_eq!(name.as_str(), "Zelda");
        assert!(serde_json::from_str::<CharacterName>("\"\"").is_err());
    }
}
