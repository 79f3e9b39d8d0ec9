//! Rust structs mapping to database tables.
//!
//! Each model implements `from_row` for constructing itself from a
//! `rusqlite::Row`. The `*Fields` structs carry every writable column and
//! are used for both inserts and full updates.

use folio_core::{ProfileId, ProjectId, SkillId, SocialLinkId};

/// Default profile name, matching the column default.
pub const DEFAULT_PROFILE_NAME: &str = "John Doe";

/// Default profile tagline, matching the column default.
pub const DEFAULT_PROFILE_TAGLINE: &str = "Full Stack Developer | Animation Enthusiast";

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    pub tagline: String,
    pub bio: String,
    /// Media key of the owned profile image.
    pub profile_image: Option<String>,
}

impl Profile {
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: ProfileId::from(row.get::<_, i64>(0)?),
            name: row.get(1)?,
            tagline: row.get(2)?,
            bio: row.get(3)?,
            profile_image: row.get(4)?,
        })
    }

    pub fn fields(&self) -> ProfileFields {
        ProfileFields {
            name: self.name.clone(),
            tagline: self.tagline.clone(),
            bio: self.bio.clone(),
            profile_image: self.profile_image.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileFields {
    pub name: String,
    pub tagline: String,
    pub bio: String,
    pub profile_image: Option<String>,
}

impl Default for ProfileFields {
    fn default() -> Self {
        Self {
            name: DEFAULT_PROFILE_NAME.into(),
            tagline: DEFAULT_PROFILE_TAGLINE.into(),
            bio: String::new(),
            profile_image: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Skill
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub order: u32,
}

impl Skill {
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: SkillId::from(row.get::<_, i64>(0)?),
            name: row.get(1)?,
            order: row.get(2)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillFields {
    pub name: String,
    pub order: u32,
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    /// Comma-separated technology names as entered by the admin.
    pub technologies: String,
    /// Media key of the owned project image.
    pub image: Option<String>,
    pub live_demo_url: Option<String>,
    pub github_repo_url: Option<String>,
    pub order: u32,
}

impl Project {
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: ProjectId::from(row.get::<_, i64>(0)?),
            title: row.get(1)?,
            description: row.get(2)?,
            technologies: row.get(3)?,
            image: row.get(4)?,
            live_demo_url: row.get(5)?,
            github_repo_url: row.get(6)?,
            order: row.get(7)?,
        })
    }

    /// Technologies split on commas, each trimmed, blanks dropped.
    pub fn technologies_list(&self) -> Vec<String> {
        split_technologies(&self.technologies)
    }

    pub fn fields(&self) -> ProjectFields {
        ProjectFields {
            title: self.title.clone(),
            description: self.description.clone(),
            technologies: self.technologies.clone(),
            image: self.image.clone(),
            live_demo_url: self.live_demo_url.clone(),
            github_repo_url: self.github_repo_url.clone(),
            order: self.order,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectFields {
    pub title: String,
    pub description: String,
    pub technologies: String,
    pub image: Option<String>,
    pub live_demo_url: Option<String>,
    pub github_repo_url: Option<String>,
    pub order: u32,
}

/// Split a comma-joined technology string into trimmed, non-empty tokens.
pub fn split_technologies(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

// ---------------------------------------------------------------------------
// SocialLink
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SocialLink {
    pub id: SocialLinkId,
    pub name: String,
    pub url: String,
    /// Icon name from the frontend's icon set (e.g. `Github`, `Linkedin`).
    pub icon_name: String,
    pub order: u32,
}

impl SocialLink {
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: SocialLinkId::from(row.get::<_, i64>(0)?),
            name: row.get(1)?,
            url: row.get(2)?,
            icon_name: row.get(3)?,
            order: row.get(4)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SocialLinkFields {
    pub name: String,
    pub url: String,
    pub icon_name: String,
    pub order: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn technologies_are_trimmed() {
        assert_eq!(
            split_technologies("Go, Rust , Python"),
            vec!["Go", "Rust", "Python"]
        );
    }

    #[test]
    fn empty_technology_tokens_are_dropped() {
        assert_eq!(split_technologies("A,,B, ,"), vec!["A", "B"]);
        assert!(split_technologies("").is_empty());
        assert!(split_technologies(" , ").is_empty());
    }

    #[test]
    fn project_technologies_list() {
        let project = Project {
            id: ProjectId::from(1),
            title: "Site".into(),
            description: "Portfolio".into(),
            technologies: "A,B".into(),
            image: None,
            live_demo_url: None,
            github_repo_url: None,
            order: 0,
        };
        assert_eq!(project.technologies_list(), vec!["A", "B"]);
    }

    #[test]
    fn profile_fields_default_matches_schema() {
        let fields = ProfileFields::default();
        assert_eq!(fields.name, "John Doe");
        assert_eq!(fields.tagline, "Full Stack Developer | Animation Enthusiast");
        assert!(fields.bio.is_empty());
        assert!(fields.profile_image.is_none());
    }
}
