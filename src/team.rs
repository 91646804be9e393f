//! Team roster: members by category, plus archived tenures.

use serde_json::Map;

use crate::config::{image_path, Config};
use crate::error::{ContentError, Result};
use crate::models::{next_id, Member, MemberCategory, PreviousRosters, Roster};
use crate::store::{self, StagedWrites};

#[derive(Debug, Clone, Default)]
pub struct NewMember {
    pub name: String,
    pub role: String,
    pub description: String,
    pub file_name: String,
    pub linkedin: String,
}

pub fn load_roster(config: &Config) -> Result<Roster> {
    store::load(&config.current_members)
}

pub fn load_previous(config: &Config) -> Result<PreviousRosters> {
    store::load(&config.previous_members)
}

/// Add a member to `category`. Ids are unique across the whole roster.
pub fn add_member(config: &Config, category: MemberCategory, input: NewMember) -> Result<Member> {
    let mut roster = load_roster(config)?;
    let member = Member {
        id: next_id(roster.all_members().map(|m| m.id)),
        name: input.name,
        role: input.role,
        description: input.description,
        image: image_path(&input.file_name),
        linkedin: Some(Some(input.linkedin)),
        extra: Map::new(),
    };
    roster.members_mut(category).push(member.clone());
    store::save(&config.current_members, &roster)?;
    tracing::info!(id = member.id, category = category.key(), "added member");
    Ok(member)
}

pub fn find_member(roster: &Roster, id: u64) -> Result<(MemberCategory, &Member)> {
    MemberCategory::ALL
        .into_iter()
        .find_map(|c| roster.members(c).iter().find(|m| m.id == id).map(|m| (c, m)))
        .ok_or(ContentError::MemberNotFound(id))
}

/// Remove the member with `id` from whichever category holds it.
pub fn remove_member(config: &Config, id: u64) -> Result<Member> {
    let mut roster = load_roster(config)?;
    let (category, _) = find_member(&roster, id)?;
    let members = roster.members_mut(category);
    let pos = members
        .iter()
        .position(|m| m.id == id)
        .ok_or(ContentError::MemberNotFound(id))?;
    let removed = members.remove(pos);
    store::save(&config.current_members, &roster)?;
    tracing::info!(id, category = category.key(), "removed member");
    Ok(removed)
}

/// Archive the current roster under `tenure` and start an empty one.
///
/// An existing snapshot under the same label is replaced. Unknown top-level
/// keys of the roster go into the snapshot; the new roster holds only the
/// three empty categories. Both documents are staged before either is
/// replaced on disk.
pub fn shift_tenure(config: &Config, tenure: &str) -> Result<Roster> {
    let current = load_roster(config)?;
    let mut previous = load_previous(config)?;
    if previous.insert(tenure.to_string(), current.clone()).is_some() {
        tracing::warn!(tenure, "overwriting existing tenure snapshot");
    }

    let mut writes = StagedWrites::new();
    writes.stage(&config.current_members, &Roster::default())?;
    writes.stage(&config.previous_members, &previous)?;
    writes.commit()?;
    tracing::info!(tenure, "shifted tenure");
    Ok(current)
}
