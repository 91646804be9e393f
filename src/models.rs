//! Typed records for every document the site reads.
//!
//! Field names follow the camelCase keys of the JSON files. Keys the editor
//! does not know about are kept in `extra` so a rewrite never drops them.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One picture in the gallery grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: u64,
    pub alt: String,
    pub src: String,
    pub photographer: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A photo-of-the-week entry. Stored under its month in [`PotwBook`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotwEntry {
    pub week: u8,
    pub theme: String,
    pub photographer: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub description: String,
    pub image: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Month name => entries, in file order.
pub type PotwBook = IndexMap<String, Vec<PotwEntry>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Ongoing,
    Previous,
}

impl EventStatus {
    pub fn from_ongoing(ongoing: bool) -> Self {
        if ongoing {
            EventStatus::Ongoing
        } else {
            EventStatus::Previous
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventStatus::Ongoing => write!(f, "ongoing"),
            EventStatus::Previous => write!(f, "previous"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub dates: String,
    pub location: String,
    #[serde(default)]
    pub collab: String,
    pub image: String,
    pub registration_open: bool,
    #[serde(default)]
    pub registration_link: String,
    pub status: EventStatus,
    /// `None` when the key is absent, `Some(None)` for an explicit `null`.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub result_link: Option<Option<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Entry of the event change log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventChange {
    /// ISO 8601 local time of the edit.
    pub timestamp: String,
    pub old: Event,
    pub new: Event,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: u64,
    pub name: String,
    pub role: String,
    pub description: String,
    pub image: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<Option<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberCategory {
    Leadership,
    Core,
    WebDev,
}

impl MemberCategory {
    pub const ALL: [MemberCategory; 3] = [
        MemberCategory::Leadership,
        MemberCategory::Core,
        MemberCategory::WebDev,
    ];

    /// Match operator input such as "Core", "leader" or "web dev".
    pub fn from_prefix(input: &str) -> Option<Self> {
        let input = input.trim().to_lowercase();
        if input.starts_with("core") {
            Some(MemberCategory::Core)
        } else if input.starts_with("lead") {
            Some(MemberCategory::Leadership)
        } else if input.starts_with("web") {
            Some(MemberCategory::WebDev)
        } else {
            None
        }
    }

    /// Key of this category in the roster document.
    pub fn key(self) -> &'static str {
        match self {
            MemberCategory::Leadership => "leadershipTeam",
            MemberCategory::Core => "coreTeam",
            MemberCategory::WebDev => "webDevTeam",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MemberCategory::Leadership => "Leadership",
            MemberCategory::Core => "Core",
            MemberCategory::WebDev => "Web Dev",
        }
    }
}

/// The current team, or one archived tenure of it.
///
/// Older tenures may lack a category; it loads as empty and is written
/// back as `[]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roster {
    #[serde(default)]
    pub leadership_team: Vec<Member>,
    #[serde(default)]
    pub core_team: Vec<Member>,
    #[serde(default)]
    pub web_dev_team: Vec<Member>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Roster {
    pub fn members(&self, category: MemberCategory) -> &Vec<Member> {
        match category {
            MemberCategory::Leadership => &self.leadership_team,
            MemberCategory::Core => &self.core_team,
            MemberCategory::WebDev => &self.web_dev_team,
        }
    }

    pub fn members_mut(&mut self, category: MemberCategory) -> &mut Vec<Member> {
        match category {
            MemberCategory::Leadership => &mut self.leadership_team,
            MemberCategory::Core => &mut self.core_team,
            MemberCategory::WebDev => &mut self.web_dev_team,
        }
    }

    /// Every member across all categories, in document order.
    pub fn all_members(&self) -> impl Iterator<Item = &Member> {
        MemberCategory::ALL
            .into_iter()
            .flat_map(move |c| self.members(c).iter())
    }

    pub fn is_empty(&self) -> bool {
        self.all_members().next().is_none()
    }
}

/// Tenure label => roster snapshot, in file order.
pub type PreviousRosters = IndexMap<String, Roster>;

/// Keeps a present `null` distinct from a missing key.
fn nullable<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Text of an optional link, empty when absent or `null`.
pub fn link_text(link: &Option<Option<String>>) -> String {
    link.clone().flatten().unwrap_or_default()
}

/// `max(ids) + 1`, or 1 for an empty collection.
pub fn next_id(ids: impl IntoIterator<Item = u64>) -> u64 {
    ids.into_iter().max().unwrap_or(0) + 1
}

/// First id that appears twice, if any.
pub fn first_duplicate(ids: impl IntoIterator<Item = u64>) -> Option<u64> {
    let mut seen = HashSet::new();
    ids.into_iter().find(|id| !seen.insert(*id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn next_id_is_max_plus_one() {
        assert_eq!(next_id([3, 9, 4]), 10);
        assert_eq!(next_id(Vec::<u64>::new()), 1);
    }

    #[test]
    fn duplicate_ids_are_detected() {
        assert_eq!(first_duplicate([1, 2, 3]), None);
        assert_eq!(first_duplicate([1, 2, 1]), Some(1));
    }

    #[test]
    fn member_category_prefixes() {
        assert_eq!(MemberCategory::from_prefix("Core"), Some(MemberCategory::Core));
        assert_eq!(MemberCategory::from_prefix("Leader"), Some(MemberCategory::Leadership));
        assert_eq!(MemberCategory::from_prefix(" web dev"), Some(MemberCategory::WebDev));
        assert_eq!(MemberCategory::from_prefix("alumni"), None);
        assert_eq!(MemberCategory::from_prefix(""), None);
    }

    #[test]
    fn event_keeps_unknown_keys() {
        let raw = json!({
            "id": 5,
            "title": "Photo Walk",
            "description": "",
            "dates": "May 4",
            "location": "Campus",
            "collab": "",
            "image": "/images/walk.jpg",
            "registrationOpen": false,
            "registrationLink": "",
            "status": "ongoing",
            "highlight": true
        });
        let event: Event = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(event.status, EventStatus::Ongoing);
        assert_eq!(event.result_link, None);
        assert_eq!(event.extra.get("highlight"), Some(&json!(true)));
        assert_eq!(serde_json::to_value(&event).unwrap(), raw);
    }

    #[test]
    fn roster_uses_site_keys() {
        let roster: Roster = serde_json::from_value(json!({
            "leadershipTeam": [],
            "coreTeam": [{"id": 1, "name": "A", "role": "r", "description": "d", "image": "/images/a.jpg"}],
            "webDevTeam": []
        }))
        .unwrap();
        assert_eq!(roster.members(MemberCategory::Core).len(), 1);
        assert!(!roster.is_empty());
        assert!(Roster::default().is_empty());
    }

    #[test]
    fn roster_missing_category_loads_empty() {
        let roster: Roster =
            serde_json::from_value(json!({"leadershipTeam": [], "coreTeam": []})).unwrap();
        assert!(roster.web_dev_team.is_empty());
    }

    #[test]
    fn roster_keeps_unknown_keys() {
        let raw = json!({"leadershipTeam": [], "coreTeam": [], "webDevTeam": [], "alumni": [1]});
        let roster: Roster = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&roster).unwrap(), raw);
    }

    #[test]
    fn null_links_survive_a_rewrite() {
        let raw = json!({
            "id": 1, "name": "A", "role": "r", "description": "d",
            "image": "/images/a.jpg", "linkedin": null
        });
        let member: Member = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(member.linkedin, Some(None));
        assert_eq!(serde_json::to_value(&member).unwrap(), raw);

        let mut without = raw;
        without.as_object_mut().unwrap().remove("linkedin");
        let member: Member = serde_json::from_value(without.clone()).unwrap();
        assert_eq!(member.linkedin, None);
        assert_eq!(serde_json::to_value(&member).unwrap(), without);
        assert_eq!(link_text(&member.linkedin), "");
    }
}
