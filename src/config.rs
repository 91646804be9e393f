// Configuration: where the site's JSON documents live.
//
// Every operation takes a `&Config` instead of hard-coding paths, so the
// same code can run against the real `public/` directory or a scratch
// directory in tests.

use std::env;
use std::path::{Path, PathBuf};

/// Prefix stored in front of every operator-supplied image file name.
pub const IMAGES_PREFIX: &str = "/images/";

/// Locations of all documents the editor reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding every document below.
    pub root: PathBuf,
    pub gallery: PathBuf,
    pub potw: PathBuf,
    pub events: PathBuf,
    /// Archive of removed events. May not exist yet.
    pub deleted_events: PathBuf,
    /// Before/after log of event edits. May not exist yet.
    pub event_changes: PathBuf,
    pub current_members: PathBuf,
    pub previous_members: PathBuf,
    /// Tracing filter used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Config {
    /// Build the standard document layout under `root`.
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        Config {
            gallery: root.join("gallery_photos.json"),
            potw: root.join("potw.json"),
            events: root.join("events.json"),
            deleted_events: root.join("deleted_events.json"),
            event_changes: root.join("event_changes.json"),
            current_members: root.join("current_members.json"),
            previous_members: root.join("previous_members.json"),
            log_level: "warn".into(),
            root,
        }
    }

    /// Create a Config from `SITE_CONTENT_ROOT` / `SITE_CONTENT_LOG`
    /// (a `.env` file is honoured) or fall back to `public` and `warn`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let root = env::var("SITE_CONTENT_ROOT").unwrap_or_else(|_| "public".into());
        let mut config = Config::with_root(root);
        if let Ok(level) = env::var("SITE_CONTENT_LOG") {
            config.log_level = level;
        }
        config
    }
}

/// Turn a bare file name into the stored image path. A value that already
/// carries the prefix (e.g. an accepted default) is returned unchanged.
pub fn image_path(file_name: &str) -> String {
    if file_name.starts_with(IMAGES_PREFIX) {
        file_name.to_string()
    } else {
        format!("{}{}", IMAGES_PREFIX, file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_root_places_every_document_under_root() {
        let config = Config::with_root("/tmp/site");
        assert_eq!(config.gallery, PathBuf::from("/tmp/site/gallery_photos.json"));
        assert_eq!(config.potw, PathBuf::from("/tmp/site/potw.json"));
        assert_eq!(config.events, PathBuf::from("/tmp/site/events.json"));
        assert_eq!(config.deleted_events, PathBuf::from("/tmp/site/deleted_events.json"));
        assert_eq!(config.event_changes, PathBuf::from("/tmp/site/event_changes.json"));
        assert_eq!(config.current_members, PathBuf::from("/tmp/site/current_members.json"));
        assert_eq!(config.previous_members, PathBuf::from("/tmp/site/previous_members.json"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn image_path_prefixes_images_dir() {
        assert_eq!(image_path("week3.jpeg"), "/images/week3.jpeg");
        assert_eq!(image_path("/images/week3.jpeg"), "/images/week3.jpeg");
    }
}
