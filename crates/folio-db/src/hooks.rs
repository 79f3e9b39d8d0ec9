//! Owned-file lifecycle hooks.
//!
//! Profiles and projects own at most one image file each. The image-setting
//! and delete queries for those tables call [`after_update`] / [`after_delete`]
//! once their own write has committed, which releases any file the record
//! no longer references.
//!
//! Cleanup is best-effort: a file that is already gone is fine, and any
//! other failure is logged and swallowed so the record write still succeeds.

use std::io::ErrorKind;

use folio_core::MediaStore;

use crate::models::{Profile, Project};

/// A record that may own an image file in the media store.
pub trait OwnsImage {
    /// Entity name used in log output.
    const ENTITY: &'static str;

    /// Media key of the owned image, if any.
    fn image_key(&self) -> Option<&str>;
}

impl OwnsImage for Profile {
    const ENTITY: &'static str = "profile";

    fn image_key(&self) -> Option<&str> {
        self.profile_image.as_deref()
    }
}

impl OwnsImage for Project {
    const ENTITY: &'static str = "project";

    fn image_key(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

/// Release the previous image if the committed update changed it.
///
/// Returns `true` if a file removal was attempted.
pub fn after_update<T: OwnsImage>(media: &dyn MediaStore, old: &T, new: &T) -> bool {
    match (old.image_key(), new.image_key()) {
        (Some(old_key), new_key) if Some(old_key) != new_key => {
            release(media, T::ENTITY, old_key);
            true
        }
        _ => false,
    }
}

/// Release the image of a record that has been deleted.
///
/// Returns `true` if a file removal was attempted.
pub fn after_delete<T: OwnsImage>(media: &dyn MediaStore, deleted: &T) -> bool {
    match deleted.image_key() {
        Some(key) => {
            release(media, T::ENTITY, key);
            true
        }
        None => false,
    }
}

fn release(media: &dyn MediaStore, entity: &str, key: &str) {
    match media.remove(key) {
        Ok(()) => tracing::debug!(entity, key, "Released image file"),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(entity, key, "Image file already absent");
        }
        Err(e) => tracing::warn!(entity, key, error = %e, "Failed to release image file"),
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingStore;
    use super::*;
    use folio_core::ProjectId;

    fn project(image: Option<&str>) -> Project {
        Project {
            id: ProjectId::from(1),
            title: "Site".into(),
            description: "d".into(),
            technologies: "Rust".into(),
            image: image.map(String::from),
            live_demo_url: None,
            github_repo_url: None,
            order: 0,
        }
    }

    #[test]
    fn changed_image_releases_old_file() {
        let store = RecordingStore::with_files(&["project_images/old.png"]);
        let released = after_update(
            &store,
            &project(Some("project_images/old.png")),
            &project(Some("project_images/new.png")),
        );
        assert!(released);
        assert_eq!(store.removed(), vec!["project_images/old.png"]);
        assert!(!store.contains("project_images/old.png"));
    }

    #[test]
    fn same_image_is_kept() {
        let store = RecordingStore::with_files(&["project_images/same.png"]);
        let released = after_update(
            &store,
            &project(Some("project_images/same.png")),
            &project(Some("project_images/same.png")),
        );
        assert!(!released);
        assert!(store.removed().is_empty());
        assert!(store.contains("project_images/same.png"));
    }

    #[test]
    fn cleared_image_releases_old_file() {
        let store = RecordingStore::with_files(&["project_images/old.png"]);
        assert!(after_update(
            &store,
            &project(Some("project_images/old.png")),
            &project(None)
        ));
        assert_eq!(store.removed(), vec!["project_images/old.png"]);
    }

    #[test]
    fn newly_set_image_releases_nothing() {
        let store = RecordingStore::default();
        assert!(!after_update(
            &store,
            &project(None),
            &project(Some("project_images/new.png"))
        ));
        assert!(store.removed().is_empty());
    }

    #[test]
    fn delete_releases_image() {
        let store = RecordingStore::with_files(&["project_images/a.png"]);
        assert!(after_delete(&store, &project(Some("project_images/a.png"))));
        assert!(!store.contains("project_images/a.png"));
    }

    #[test]
    fn delete_without_image_is_noop() {
        let store = RecordingStore::default();
        assert!(!after_delete(&store, &project(None)));
        assert!(store.removed().is_empty());
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let store = RecordingStore::default();
        // Must not panic; NotFound is swallowed.
        assert!(after_delete(&store, &project(Some("project_images/gone.png"))));
        assert_eq!(store.removed(), vec!["project_images/gone.png"]);
    }

    #[test]
    fn storage_failure_is_swallowed() {
        let store = RecordingStore {
            fail_with: Some(std::io::ErrorKind::PermissionDenied),
            ..RecordingStore::default()
        };
        assert!(after_delete(&store, &project(Some("project_images/locked.png"))));
    }
}
