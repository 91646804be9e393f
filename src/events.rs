//! Events: add, archive-on-remove, and typed field edits with a change log.

use serde_json::Map;

use crate::config::{image_path, Config};
use crate::error::{ContentError, Result};
use crate::models::{first_duplicate, link_text, next_id, Event, EventChange, EventStatus};
use crate::store::{self, StagedWrites};

#[derive(Debug, Clone, Default)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub dates: String,
    pub location: String,
    pub collab: String,
    pub file_name: String,
    pub ongoing: bool,
    pub registration_open: bool,
    pub registration_link: String,
    pub result_link: String,
}

/// Editable fields, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventField {
    Id,
    Title,
    Description,
    Dates,
    Location,
    Collab,
    Image,
    RegistrationOpen,
    RegistrationLink,
    Status,
    ResultLink,
}

impl EventField {
    pub const ALL: [EventField; 11] = [
        EventField::Id,
        EventField::Title,
        EventField::Description,
        EventField::Dates,
        EventField::Location,
        EventField::Collab,
        EventField::Image,
        EventField::RegistrationOpen,
        EventField::RegistrationLink,
        EventField::Status,
        EventField::ResultLink,
    ];

    /// JSON key of the field.
    pub fn key(self) -> &'static str {
        match self {
            EventField::Id => "id",
            EventField::Title => "title",
            EventField::Description => "description",
            EventField::Dates => "dates",
            EventField::Location => "location",
            EventField::Collab => "collab",
            EventField::Image => "image",
            EventField::RegistrationOpen => "registrationOpen",
            EventField::RegistrationLink => "registrationLink",
            EventField::Status => "status",
            EventField::ResultLink => "resultLink",
        }
    }

    /// Current value of a text field, used as the prompt default.
    /// `None` for fields that are not edited as free text.
    pub fn text_value(self, event: &Event) -> Option<String> {
        match self {
            EventField::Title => Some(event.title.clone()),
            EventField::Description => Some(event.description.clone()),
            EventField::Dates => Some(event.dates.clone()),
            EventField::Location => Some(event.location.clone()),
            EventField::Collab => Some(event.collab.clone()),
            EventField::Image => Some(event.image.clone()),
            EventField::RegistrationLink => Some(event.registration_link.clone()),
            EventField::ResultLink => Some(link_text(&event.result_link)),
            EventField::Id | EventField::RegistrationOpen | EventField::Status => None,
        }
    }
}

/// A new value for one field, already in the field's type.
#[derive(Debug, Clone, PartialEq)]
pub enum EventEdit {
    /// Ids are never rewritten; the edit is recorded but changes nothing.
    Id,
    Text(EventField, String),
    RegistrationOpen(bool),
    Status(EventStatus),
}

impl EventEdit {
    pub fn field(&self) -> EventField {
        match self {
            EventEdit::Id => EventField::Id,
            EventEdit::Text(field, _) => *field,
            EventEdit::RegistrationOpen(_) => EventField::RegistrationOpen,
            EventEdit::Status(_) => EventField::Status,
        }
    }
}

/// Apply `edit` to `event` in place.
pub fn apply_edit(event: &mut Event, edit: EventEdit) {
    match edit {
        EventEdit::Id => {}
        EventEdit::RegistrationOpen(open) => event.registration_open = open,
        EventEdit::Status(status) => event.status = status,
        EventEdit::Text(field, value) => match field {
            EventField::Title => event.title = value,
            EventField::Description => event.description = value,
            EventField::Dates => event.dates = value,
            EventField::Location => event.location = value,
            EventField::Collab => event.collab = value,
            EventField::Image => event.image = image_path(&value),
            EventField::RegistrationLink => event.registration_link = value,
            EventField::ResultLink => {
                // An empty answer for a link that was never set changes nothing.
                if !(value.is_empty() && link_text(&event.result_link).is_empty()) {
                    event.result_link = Some(Some(value));
                }
            }
            // Not text fields.
            EventField::Id | EventField::RegistrationOpen | EventField::Status => {}
        },
    }
}

/// Load the live event list; ids must be unique.
pub fn load_events(config: &Config) -> Result<Vec<Event>> {
    let events: Vec<Event> = store::load(&config.events)?;
    if let Some(id) = first_duplicate(events.iter().map(|e| e.id)) {
        return Err(ContentError::Invalid {
            path: config.events.clone(),
            reason: format!("duplicate event id {}", id),
        });
    }
    Ok(events)
}

pub fn find_event(events: &[Event], id: u64) -> Result<&Event> {
    events
        .iter()
        .find(|e| e.id == id)
        .ok_or(ContentError::EventNotFound(id))
}

pub fn add_event(config: &Config, input: NewEvent) -> Result<Event> {
    let mut events = load_events(config)?;
    let event = Event {
        id: next_id(events.iter().map(|e| e.id)),
        title: input.title,
        description: input.description,
        dates: input.dates,
        location: input.location,
        collab: input.collab,
        image: image_path(&input.file_name),
        registration_open: input.registration_open,
        registration_link: input.registration_link,
        status: EventStatus::from_ongoing(input.ongoing),
        result_link: Some(Some(input.result_link)),
        extra: Map::new(),
    };
    events.push(event.clone());
    store::save(&config.events, &events)?;
    tracing::info!(id = event.id, status = %event.status, "added event");
    Ok(event)
}

/// Remove an event and append it, unchanged, to the archive.
pub fn remove_event(config: &Config, id: u64) -> Result<Event> {
    let mut events = load_events(config)?;
    let pos = events
        .iter()
        .position(|e| e.id == id)
        .ok_or(ContentError::EventNotFound(id))?;
    let removed = events.remove(pos);

    let mut archive: Vec<Event> = store::load_or_default(&config.deleted_events)?;
    archive.push(removed.clone());

    let mut writes = StagedWrites::new();
    writes.stage(&config.events, &events)?;
    writes.stage(&config.deleted_events, &archive)?;
    writes.commit()?;
    tracing::info!(id, "removed and archived event");
    Ok(removed)
}

/// Apply one field edit and record the before/after snapshots.
pub fn update_event(config: &Config, id: u64, edit: EventEdit) -> Result<EventChange> {
    let mut events = load_events(config)?;
    let event = events
        .iter_mut()
        .find(|e| e.id == id)
        .ok_or(ContentError::EventNotFound(id))?;
    let field = edit.field();
    let old = event.clone();
    apply_edit(event, edit);
    let change = EventChange {
        timestamp: chrono::Local::now()
            .format("%Y-%m-%dT%H:%M:%S%.6f")
            .to_string(),
        old,
        new: event.clone(),
    };

    let mut changes: Vec<EventChange> = store::load_or_default(&config.event_changes)?;
    changes.push(change.clone());

    let mut writes = StagedWrites::new();
    writes.stage(&config.events, &events)?;
    writes.stage(&config.event_changes, &changes)?;
    writes.commit()?;
    tracing::info!(id, field = field.key(), "updated event");
    Ok(change)
}
