//! Session-local get/set/append/replace/remove over a `Profile`.
//!
//! Edits are permissive: out-of-range indices and invalid experience drafts are
//! silent no-ops, never errors. Nothing here is persisted.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::models::profile::{
    EducationEntry, ExperienceEntry, LanguageEntry, Profile, ProfileField, ProfileList,
};

/// Returns a new list with the element at `index` excluded.
///
/// An out-of-range index yields an unchanged copy.
pub fn remove_at<T: Clone>(items: &[T], index: usize) -> Vec<T> {
    items
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, item)| item.clone())
        .collect()
}

/// One element of any profile list, typed by the list it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ListItem {
    Skill(String),
    Experience(ExperienceEntry),
    Education(EducationEntry),
    Language(LanguageEntry),
}

impl ListItem {
    /// Decodes a JSON body into the item shape expected by `list`.
    pub fn from_json(list: ProfileList, value: Value) -> Result<Self, serde_json::Error> {
        Ok(match list {
            ProfileList::Skills => ListItem::Skill(serde_json::from_value(value)?),
            ProfileList::Experiences => ListItem::Experience(serde_json::from_value(value)?),
            ProfileList::Educations => ListItem::Education(serde_json::from_value(value)?),
            ProfileList::Languages => ListItem::Language(serde_json::from_value(value)?),
        })
    }

    fn list(&self) -> ProfileList {
        match self {
            ListItem::Skill(_) => ProfileList::Skills,
            ListItem::Experience(_) => ProfileList::Experiences,
            ListItem::Education(_) => ProfileList::Educations,
            ListItem::Language(_) => ProfileList::Languages,
        }
    }
}

/// Input collected by the "add experience" dialog before it is appended.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceDraft {
    pub title: String,
    pub company: String,
    pub date: String,
    pub desc: String,
}

impl ExperienceDraft {
    /// A draft is accepted only when both title and company carry non-whitespace text.
    pub fn into_entry(self) -> Option<ExperienceEntry> {
        let title = self.title.trim();
        let company = self.company.trim();
        if title.is_empty() || company.is_empty() {
            return None;
        }
        Some(ExperienceEntry {
            title: title.to_string(),
            company: company.to_string(),
            date: self.date.trim().to_string(),
            desc: self.desc.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfileEditor {
    profile: Profile,
}

impl ProfileEditor {
    pub fn new(profile: Profile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Snapshot used by a render call.
    pub fn snapshot(&self) -> Profile {
        self.profile.clone()
    }

    pub fn replace_profile(&mut self, profile: Profile) {
        self.profile = profile;
    }

    pub fn get(&self, field: ProfileField) -> Option<&str> {
        self.profile.field(field)
    }

    pub fn set(&mut self, field: ProfileField, value: impl Into<String>) {
        *self.profile.field_mut(field) = Some(value.into());
    }

    /// Clears a scalar field; the renderer shows the placeholder in its place.
    pub fn clear(&mut self, field: ProfileField) {
        *self.profile.field_mut(field) = None;
    }

    /// Appends `item` to its list. Returns false when `item` does not belong to `list`.
    pub fn append(&mut self, list: ProfileList, item: ListItem) -> bool {
        if item.list() != list {
            return false;
        }
        match item {
            ListItem::Skill(s) => self.profile.skills.push(s),
            ListItem::Experience(e) => self.profile.experiences.push(e),
            ListItem::Education(e) => self.profile.educations.push(e),
            ListItem::Language(l) => self.profile.languages.push(l),
        }
        true
    }

    /// Replaces the element at `index`. Returns false (and changes nothing) when the
    /// index is out of range or the item shape does not match the list.
    pub fn replace(&mut self, list: ProfileList, index: usize, item: ListItem) -> bool {
        if item.list() != list {
            return false;
        }
        let replaced = match item {
            ListItem::Skill(s) => replace_slot(&mut self.profile.skills, index, s),
            ListItem::Experience(e) => replace_slot(&mut self.profile.experiences, index, e),
            ListItem::Education(e) => replace_slot(&mut self.profile.educations, index, e),
            ListItem::Language(l) => replace_slot(&mut self.profile.languages, index, l),
        };
        if !replaced {
            debug!(list = list.as_str(), index, "replace ignored: index out of range");
        }
        replaced
    }

    /// Removes the element at `index`; an out-of-range index leaves the list unchanged.
    pub fn remove(&mut self, list: ProfileList, index: usize) {
        match list {
            ProfileList::Skills => self.profile.skills = remove_at(&self.profile.skills, index),
            ProfileList::Experiences => {
                self.profile.experiences = remove_at(&self.profile.experiences, index)
            }
            ProfileList::Educations => {
                self.profile.educations = remove_at(&self.profile.educations, index)
            }
            ProfileList::Languages => {
                self.profile.languages = remove_at(&self.profile.languages, index)
            }
        }
    }

    /// Appends the draft as a new experience if it passes the title/company check.
    /// Returns whether an entry was appended.
    pub fn submit_experience(&mut self, draft: ExperienceDraft) -> bool {
        match draft.into_entry() {
            Some(entry) => {
                self.profile.experiences.push(entry);
                true
            }
            None => false,
        }
    }
}

fn replace_slot<T>(items: &mut [T], index: usize, value: T) -> bool {
    match items.get_mut(index) {
        Some(slot) => {
            *slot = value;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with_skills(skills: &[&str]) -> ProfileEditor {
        ProfileEditor::new(Profile {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        })
    }

    // ── experience draft ────────────────────────────────────────────────────

    #[test]
    fn test_draft_with_empty_company_is_not_appended() {
        let mut editor = ProfileEditor::default();
        let appended = editor.submit_experience(ExperienceDraft {
            title: "Developer".to_string(),
            company: String::new(),
            ..Default::default()
        });
        assert!(!appended);
        assert!(editor.profile().experiences.is_empty());
    }

    #[test]
    fn test_draft_with_whitespace_title_is_not_appended() {
        let mut editor = ProfileEditor::default();
        let appended = editor.submit_experience(ExperienceDraft {
            title: "   ".to_string(),
            company: "Acme".to_string(),
            ..Default::default()
        });
        assert!(!appended);
        assert!(editor.profile().experiences.is_empty());
    }

    #[test]
    fn test_valid_draft_appends_entry_with_blank_date_and_desc() {
        let mut editor = ProfileEditor::new(Profile {
            experiences: vec![ExperienceEntry {
                title: "Stajyer".to_string(),
                company: "Eski Şirket".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        });
        let appended = editor.submit_experience(ExperienceDraft {
            title: "Developer".to_string(),
            company: "Acme".to_string(),
            ..Default::default()
        });
        assert!(appended);
        assert_eq!(editor.profile().experiences.len(), 2);
        assert_eq!(
            editor.profile().experiences.last(),
            Some(&ExperienceEntry {
                title: "Developer".to_string(),
                company: "Acme".to_string(),
                date: String::new(),
                desc: String::new(),
            })
        );
    }

    // ── scalar fields ───────────────────────────────────────────────────────

    #[test]
    fn test_set_and_clear_scalar_field() {
        let mut editor = ProfileEditor::default();
        editor.set(ProfileField::Title, "Backend Geliştirici");
        assert_eq!(editor.get(ProfileField::Title), Some("Backend Geliştirici"));
        editor.clear(ProfileField::Title);
        assert_eq!(editor.get(ProfileField::Title), None);
    }

    // ── list operations ─────────────────────────────────────────────────────

    #[test]
    fn test_remove_at_excludes_element() {
        let items = vec!["a", "b", "c"];
        assert_eq!(remove_at(&items, 1), vec!["a", "c"]);
    }

    #[test]
    fn test_remove_at_out_of_range_is_unchanged() {
        let items = vec!["a", "b"];
        assert_eq!(remove_at(&items, 5), items);
    }

    #[test]
    fn test_editor_remove_skill() {
        let mut editor = editor_with_skills(&["Rust", "Go", "SQL"]);
        editor.remove(ProfileList::Skills, 0);
        assert_eq!(editor.profile().skills, vec!["Go", "SQL"]);
    }

    #[test]
    fn test_replace_in_range_and_out_of_range() {
        let mut editor = editor_with_skills(&["Rust"]);
        assert!(editor.replace(
            ProfileList::Skills,
            0,
            ListItem::Skill("Rust (async)".to_string())
        ));
        assert!(!editor.replace(ProfileList::Skills, 3, ListItem::Skill("Go".to_string())));
        assert_eq!(editor.profile().skills, vec!["Rust (async)"]);
    }

    #[test]
    fn test_append_rejects_mismatched_item() {
        let mut editor = ProfileEditor::default();
        assert!(!editor.append(ProfileList::Languages, ListItem::Skill("Rust".to_string())));
        assert!(editor.profile().languages.is_empty());
        assert!(editor.profile().skills.is_empty());
    }

    #[test]
    fn test_list_item_from_json_by_list_kind() {
        let item = ListItem::from_json(
            ProfileList::Languages,
            serde_json::json!({"name": "İngilizce", "level": "İleri"}),
        )
        .unwrap();
        assert_eq!(
            item,
            ListItem::Language(LanguageEntry {
                name: "İngilizce".to_string(),
                level: "İleri".to_string(),
            })
        );
        assert!(ListItem::from_json(ProfileList::Skills, serde_json::json!({"x": 1})).is_err());
    }
}
