//! Typed ID wrappers providing compile-time safety for record identifiers.
//!
//! Each ID type is a newtype over the SQLite integer row id, preventing
//! accidental misuse (e.g., passing a `SkillId` where a `ProjectId` is
//! expected).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Generate a newtype ID wrapper over `i64`.
///
/// The macro produces a struct with:
/// - `get()` returning the raw row id
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Serialize`, `Deserialize`
/// - `Display` and `FromStr` delegating to the inner integer
/// - `From<i64>` and `Into<i64>` conversions
macro_rules! record_id {
    ($($(#[doc = $doc:expr])* $name:ident),+ $(,)?) => {
        $(
            $(#[doc = $doc])*
            #[derive(
                Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
                Serialize, Deserialize, utoipa::ToSchema,
            )]
            #[serde(transparent)]
            pub struct $name(i64);

            impl $name {
                /// Return the raw row id.
                #[must_use]
                pub fn get(&self) -> i64 {
                    self.0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl FromStr for $name {
                type Err = std::num::ParseIntError;

                fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                    s.parse::<i64>().map(Self)
                }
            }

            impl From<i64> for $name {
                fn from(id: i64) -> Self {
                    Self(id)
                }
            }

            impl From<$name> for i64 {
                fn from(id: $name) -> Self {
                    id.0
                }
            }
        )+
    };
}

record_id! {
    /// Identifier of a profile row.
    ProfileId,
    /// Identifier of a skill row.
    SkillId,
    /// Identifier of a project row.
    ProjectId,
    /// Identifier of a social link row.
    SocialLinkId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_i64() {
        let id = ProjectId::from(7);
        let back: i64 = id.into();
        assert_eq!(back, 7);
        assert_eq!(id.get(), 7);
    }

    #[test]
    fn display_and_from_str() {
        let id = SkillId::from(12);
        let parsed: SkillId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn invalid_from_str() {
        assert!(SocialLinkId::from_str("abc").is_err());
    }

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&ProfileId::from(3)).unwrap();
        assert_eq!(json, "3");
        let back: ProfileId = serde_json::from_str("3").unwrap();
        assert_eq!(back, ProfileId::from(3));
    }
}
