// UI layer: interactive prompts built on `dialoguer`.
// Each flow collects input, hands it to the matching content module, and
// prints the outcome. Rejections (unknown id, taken week, ...) are printed
// and end the flow; I/O and malformed-document errors are returned.

use std::time::Duration;

use anyhow::Result;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::Config;
use crate::error::ContentError;
use crate::events::{self, EventEdit, EventField, NewEvent};
use crate::gallery::{self, NewImage};
use crate::models::{EventStatus, MemberCategory};
use crate::potw::{self, NewPotwEntry};
use crate::store;
use crate::team::{self, NewMember};

/// Top-level menu. Runs a single content area and returns.
///
/// Escape (or `q`) at the menu counts as an invalid choice: a message is
/// printed and nothing else happens.
pub fn main_menu(config: &Config) -> Result<()> {
    clear_screen();
    let items = vec!["Update Gallery", "Update POTW", "Update Events", "Update Team"];
    let selection = Select::new()
        .with_prompt("What do you want to update?")
        .items(&items)
        .default(0)
        .interact_opt()?;
    match selection {
        Some(0) => update_gallery(config),
        Some(1) => update_potw(config),
        Some(2) => update_events(config),
        Some(3) => update_team(config),
        _ => {
            println!("Invalid option.");
            Ok(())
        }
    }
}

fn clear_screen() {
    // Purely cosmetic, a terminal that refuses is fine.
    let _ = execute!(std::io::stdout(), Clear(ClearType::All), MoveTo(0, 0));
}

fn update_gallery(config: &Config) -> Result<()> {
    println!("\nAdd Image to Gallery");
    if !Confirm::new().with_prompt("Add new image?").default(true).interact()? {
        return Ok(());
    }
    let input = NewImage {
        file_name: text("Image file name (in /images/)")?,
        photographer: text("Photographer name")?,
        alt: text("Alt text")?,
    };
    if let Some(image) = report(saving(|| gallery::add_image(config, input)))? {
        println!("Added image with id {}.", image.id);
    }
    Ok(())
}

fn update_potw(config: &Config) -> Result<()> {
    let book = potw::load_book(config)?;
    let months = potw::months(&book);
    if months.is_empty() {
        println!("No months found in {}.", config.potw.display());
        return Ok(());
    }
    println!("\nAdd POTW");
    let idx = Select::new()
        .with_prompt("Select month")
        .items(&months)
        .default(0)
        .interact()?;
    let month = months[idx].clone();
    let week: u8 = Input::new().with_prompt("Week of month (1-4)").interact_text()?;
    if report(potw::ensure_week_free(&book, &month, week))?.is_none() {
        return Ok(());
    }

    let input = NewPotwEntry {
        month,
        week,
        theme: text("Theme")?,
        photographer: text("Photographer")?,
        email: text("Email (optional)")?,
        description: text("Description (optional)")?,
        file_name: text("Image file name (in /images/)")?,
    };
    let month = input.month.clone();
    if report(saving(|| potw::add_entry(config, input)))?.is_some() {
        println!("Added POTW for {} week {}.", month, week);
    }
    Ok(())
}

fn update_events(config: &Config) -> Result<()> {
    let items = vec!["Add Event", "Remove Event", "Update Event"];
    let selection = Select::new()
        .with_prompt("Select option")
        .items(&items)
        .default(0)
        .interact_opt()?;
    match selection {
        Some(0) => add_event(config),
        Some(1) => remove_event(config),
        Some(2) => update_event(config),
        _ => {
            println!("Invalid option.");
            Ok(())
        }
    }
}

fn add_event(config: &Config) -> Result<()> {
    let input = NewEvent {
        title: text("Title")?,
        description: text("Description")?,
        dates: text("Dates")?,
        location: text("Location")?,
        collab: text("Collab")?,
        file_name: text("Image file name (in /images/)")?,
        ongoing: Confirm::new().with_prompt("Ongoing?").default(true).interact()?,
        registration_open: Confirm::new()
            .with_prompt("Registration Open?")
            .default(true)
            .interact()?,
        registration_link: text("Registration Link")?,
        result_link: text("Result Link (optional)")?,
    };
    if let Some(event) = report(saving(|| events::add_event(config, input)))? {
        println!("Added event with id {}.", event.id);
    }
    Ok(())
}

fn remove_event(config: &Config) -> Result<()> {
    let list = events::load_events(config)?;
    let groups = [
        ("Ongoing Events:", EventStatus::Ongoing),
        ("Previous Events:", EventStatus::Previous),
    ];
    for (heading, status) in groups {
        println!("{}", heading);
        for e in list.iter().filter(|e| e.status == status) {
            println!("{}: {}", e.id, e.title);
        }
    }
    let id: u64 = Input::new().with_prompt("Enter id to delete").interact_text()?;
    let Some(event) = report(events::find_event(&list, id))? else {
        return Ok(());
    };
    let sure = Confirm::new()
        .with_prompt(format!("Are you sure you want to delete '{}'?", event.title))
        .default(false)
        .interact()?;
    if !sure {
        println!("Aborted.");
        return Ok(());
    }
    if report(saving(|| events::remove_event(config, id)))?.is_some() {
        println!("Event deleted and archived.");
    }
    Ok(())
}

fn update_event(config: &Config) -> Result<()> {
    let list = events::load_events(config)?;
    for e in &list {
        println!("{}: {}", e.id, e.title);
    }
    let id: u64 = Input::new().with_prompt("Enter id to update").interact_text()?;
    let Some(event) = report(events::find_event(&list, id))? else {
        return Ok(());
    };
    println!("{}", store::to_pretty_json(event)?);

    let keys: Vec<&str> = EventField::ALL.iter().map(|f| f.key()).collect();
    let idx = Select::new()
        .with_prompt("Select field to edit")
        .items(&keys)
        .default(0)
        .interact()?;
    let field = EventField::ALL[idx];
    let edit = match field {
        EventField::Id => {
            println!("The id cannot be changed; it is kept as {}.", event.id);
            EventEdit::Id
        }
        EventField::RegistrationOpen => EventEdit::RegistrationOpen(
            Confirm::new()
                .with_prompt("Registration Open?")
                .default(event.registration_open)
                .interact()?,
        ),
        EventField::Status => {
            let statuses = [EventStatus::Ongoing, EventStatus::Previous];
            let current = statuses.iter().position(|s| *s == event.status).unwrap_or(0);
            let idx = Select::new()
                .with_prompt("Status")
                .items(&statuses)
                .default(current)
                .interact()?;
            EventEdit::Status(statuses[idx])
        }
        text_field => {
            let current = text_field.text_value(event).unwrap_or_default();
            let value: String = Input::new()
                .with_prompt(format!("Enter new value for {}", text_field.key()))
                .default(current)
                .allow_empty(true)
                .interact_text()?;
            EventEdit::Text(text_field, value)
        }
    };
    if report(saving(|| events::update_event(config, id, edit)))?.is_some() {
        println!("Event updated and change logged.");
    }
    Ok(())
}

fn update_team(config: &Config) -> Result<()> {
    let items = vec!["Add Member", "Remove Member", "Shift Tenure"];
    let selection = Select::new()
        .with_prompt("Select option")
        .items(&items)
        .default(0)
        .interact_opt()?;
    match selection {
        Some(0) => add_member(config),
        Some(1) => remove_member(config),
        Some(2) => shift_tenure(config),
        _ => {
            println!("Invalid option.");
            Ok(())
        }
    }
}

fn add_member(config: &Config) -> Result<()> {
    let kind = text("Member type (Core/Leader/Web Dev)")?;
    let category = MemberCategory::from_prefix(&kind).ok_or(ContentError::UnknownMemberType(kind));
    let Some(category) = report(category)? else {
        return Ok(());
    };
    let input = NewMember {
        name: text("Name")?,
        role: text("Role")?,
        description: text("Description")?,
        file_name: text("Image file name (in /images/)")?,
        linkedin: text("LinkedIn (optional)")?,
    };
    if let Some(member) = report(saving(|| team::add_member(config, category, input)))? {
        println!("Added {} member with id {}.", category.label(), member.id);
    }
    Ok(())
}

fn remove_member(config: &Config) -> Result<()> {
    let roster = team::load_roster(config)?;
    for category in MemberCategory::ALL {
        println!("{}:", category.key());
        for m in roster.members(category) {
            println!("  {}: {}", m.id, m.name);
        }
    }
    let id: u64 = Input::new().with_prompt("Enter id to remove").interact_text()?;
    let Some((_, member)) = report(team::find_member(&roster, id))? else {
        return Ok(());
    };
    let sure = Confirm::new()
        .with_prompt(format!("Are you sure you want to remove '{}'?", member.name))
        .default(false)
        .interact()?;
    if !sure {
        println!("Aborted.");
        return Ok(());
    }
    if report(saving(|| team::remove_member(config, id)))?.is_some() {
        println!("Member removed.");
    }
    Ok(())
}

fn shift_tenure(config: &Config) -> Result<()> {
    let tenure = text("Enter new tenure (e.g. 2024-2025)")?;
    println!(
        "This will move all current members to {} under tenure '{}' and clear current members.",
        config.previous_members.display(),
        tenure
    );
    if !Confirm::new().with_prompt("Are you sure?").default(false).interact()? {
        println!("Aborted.");
        return Ok(());
    }
    if report(saving(|| team::shift_tenure(config, &tenure)))?.is_some() {
        println!("Tenure shifted.");
    }
    Ok(())
}

/// Free-text prompt; empty input is allowed and trimmed.
fn text(prompt: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(value.trim().to_string())
}

/// Print an operator-facing rejection and turn it into `None`; anything
/// else is a real failure.
fn report<T>(result: crate::error::Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_rejection() => {
            println!("{}. Aborting.", e);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Run a write with a spinner on screen.
fn saving<T>(write: impl FnOnce() -> crate::error::Result<T>) -> crate::error::Result<T> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Saving...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    let result = write();
    spinner.finish_and_clear();
    result
}
