//! Photo of the week: entries grouped by month, one per week.

use serde_json::Map;

use crate::config::{image_path, Config};
use crate::error::{ContentError, Result};
use crate::models::{PotwBook, PotwEntry};
use crate::store;

#[derive(Debug, Clone, Default)]
pub struct NewPotwEntry {
    pub month: String,
    pub week: u8,
    pub theme: String,
    pub photographer: String,
    pub email: String,
    pub description: String,
    pub file_name: String,
}

pub fn load_book(config: &Config) -> Result<PotwBook> {
    store::load(&config.potw)
}

/// Month names in file order.
pub fn months(book: &PotwBook) -> Vec<String> {
    book.keys().cloned().collect()
}

/// Fails if `month` is unknown, `week` is outside 1-4, or the week is taken.
pub fn ensure_week_free(book: &PotwBook, month: &str, week: u8) -> Result<()> {
    if !(1..=4).contains(&week) {
        return Err(ContentError::InvalidWeek(week));
    }
    let entries = book
        .get(month)
        .ok_or_else(|| ContentError::UnknownMonth(month.to_string()))?;
    if entries.iter().any(|e| e.week == week) {
        return Err(ContentError::DuplicateWeek {
            month: month.to_string(),
            week,
        });
    }
    Ok(())
}

/// Append an entry to its month and persist. A rejected entry writes nothing.
pub fn add_entry(config: &Config, input: NewPotwEntry) -> Result<PotwEntry> {
    let mut book = load_book(config)?;
    ensure_week_free(&book, &input.month, input.week)?;

    let entry = PotwEntry {
        week: input.week,
        theme: input.theme,
        photographer: input.photographer,
        email: input.email,
        description: input.description,
        image: image_path(&input.file_name),
        extra: Map::new(),
    };
    if let Some(entries) = book.get_mut(&input.month) {
        entries.push(entry.clone());
    }
    store::save(&config.potw, &book)?;
    tracing::info!(month = %input.month, week = input.week, "added potw entry");
    Ok(entry)
}
