//! Reading and writing the JSON documents.
//!
//! Documents are always read whole, validated, and rewritten whole. Writes go
//! through a temp file in the same directory followed by a rename, and
//! operations touching two files stage both temp files before renaming
//! either.

use std::fs;
use std::io::{ErrorKind, Write as _};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ContentError, Result};
use crate::models::{first_duplicate, Event, EventChange, GalleryImage, PotwBook, PreviousRosters, Roster};

/// A JSON document the editor knows how to load.
pub trait Document: Serialize + DeserializeOwned {
    /// Structural checks serde cannot express.
    fn validate(&self) -> std::result::Result<(), String> {
        Ok(())
    }
}

impl Document for Vec<GalleryImage> {
    fn validate(&self) -> std::result::Result<(), String> {
        match first_duplicate(self.iter().map(|img| img.id)) {
            Some(id) => Err(format!("duplicate image id {}", id)),
            None => Ok(()),
        }
    }
}

// Shared by the live list and the archive; the archive may legitimately
// hold the same id twice, so uniqueness is checked by `events`.
impl Document for Vec<Event> {}

impl Document for Vec<EventChange> {}

impl Document for PotwBook {
    fn validate(&self) -> std::result::Result<(), String> {
        for (month, entries) in self {
            if let Some(entry) = entries.iter().find(|e| !(1..=4).contains(&e.week)) {
                return Err(format!("{} has week {} outside 1-4", month, entry.week));
            }
            if let Some(week) = first_duplicate(entries.iter().map(|e| u64::from(e.week))) {
                return Err(format!("{} has week {} twice", month, week));
            }
        }
        Ok(())
    }
}

impl Document for Roster {
    fn validate(&self) -> std::result::Result<(), String> {
        match first_duplicate(self.all_members().map(|m| m.id)) {
            Some(id) => Err(format!("duplicate member id {}", id)),
            None => Ok(()),
        }
    }
}

impl Document for PreviousRosters {}

/// Load and validate a document that must exist.
pub fn load<T: Document>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(path, &raw)
}

/// Load a document that may not have been created yet.
pub fn load_or_default<T: Document + Default>(path: &Path) -> Result<T> {
    match fs::read_to_string(path) {
        Ok(raw) => parse(path, &raw),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!("{} does not exist yet, starting empty", path.display());
            Ok(T::default())
        }
        Err(source) => Err(ContentError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn parse<T: Document>(path: &Path, raw: &str) -> Result<T> {
    let doc: T = serde_json::from_str(raw).map_err(|source| ContentError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;
    doc.validate().map_err(|reason| ContentError::Invalid {
        path: path.to_path_buf(),
        reason,
    })?;
    tracing::debug!("loaded {}", path.display());
    Ok(doc)
}

/// Pretty JSON with 2-space indentation; non-ASCII is written as-is.
pub fn to_pretty_json<T: Serialize + ?Sized>(doc: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(doc)
}

/// Write a single document.
pub fn save<T: Serialize + ?Sized>(path: &Path, doc: &T) -> Result<()> {
    let mut writes = StagedWrites::new();
    writes.stage(path, doc)?;
    writes.commit()
}

/// A set of document writes that become visible together.
///
/// `stage` fully writes and syncs a temp file next to the target. Nothing
/// replaces a target until `commit`; dropping without committing removes
/// the temp files and leaves every target as it was.
#[derive(Debug, Default)]
pub struct StagedWrites {
    staged: Vec<(PathBuf, PathBuf)>,
}

impl StagedWrites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage<T: Serialize + ?Sized>(&mut self, path: &Path, doc: &T) -> Result<()> {
        let json = to_pretty_json(doc).map_err(|source| ContentError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
        let tmp = temp_path(path);
        let io_err = |source| ContentError::Io {
            path: tmp.clone(),
            source,
        };
        // Registered before writing so a partial temp file is cleaned up too.
        self.staged.push((tmp.clone(), path.to_path_buf()));
        let mut f = fs::File::create(&tmp).map_err(io_err)?;
        f.write_all(json.as_bytes()).map_err(io_err)?;
        f.sync_all().map_err(io_err)?;
        Ok(())
    }

    pub fn commit(mut self) -> Result<()> {
        while let Some((tmp, target)) = self.staged.first().cloned() {
            fs::rename(&tmp, &target).map_err(|source| ContentError::Io {
                path: target.clone(),
                source,
            })?;
            self.staged.remove(0);
            if let Some(dir) = target.parent().and_then(|p| fs::File::open(p).ok()) {
                let _ = dir.sync_all();
            }
            tracing::info!("wrote {}", target.display());
        }
        Ok(())
    }
}

impl Drop for StagedWrites {
    fn drop(&mut self) {
        for (tmp, _) in self.staged.drain(..) {
            let _ = fs::remove_file(tmp);
        }
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    path.with_file_name(format!(".{}.tmp.{}", name, std::process::id()))
}
