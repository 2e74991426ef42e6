use serde::{Deserialize, Serialize};

/// A candidate profile as edited in the profile editor and rendered into a CV.
///
/// Scalar fields are optional; a missing or blank value renders as the template's
/// placeholder text. List fields are stored untruncated; display caps are applied
/// only by the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub about: Option<String>,
    pub skills: Vec<String>,
    pub experiences: Vec<ExperienceEntry>,
    pub educations: Vec<EducationEntry>,
    pub languages: Vec<LanguageEntry>,
    /// Image reference (URL). Falls back to a generated avatar when absent.
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    /// Free-text date range, e.g. "2020 - Günümüz".
    pub date: String,
    pub desc: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: String,
    pub school: String,
    pub date: String,
    pub desc: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageEntry {
    pub name: String,
    /// Proficiency label, e.g. "İleri" or "B2".
    pub level: String,
}

/// Scalar profile fields addressable by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Name,
    Title,
    Email,
    Phone,
    Location,
    About,
    Photo,
}

impl ProfileField {
    pub const ALL: [ProfileField; 7] = [
        ProfileField::Name,
        ProfileField::Title,
        ProfileField::Email,
        ProfileField::Phone,
        ProfileField::Location,
        ProfileField::About,
        ProfileField::Photo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Title => "title",
            ProfileField::Email => "email",
            ProfileField::Phone => "phone",
            ProfileField::Location => "location",
            ProfileField::About => "about",
            ProfileField::Photo => "photo",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == key)
    }
}

/// List-valued profile fields addressable by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileList {
    Skills,
    Experiences,
    Educations,
    Languages,
}

impl ProfileList {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileList::Skills => "skills",
            ProfileList::Experiences => "experiences",
            ProfileList::Educations => "educations",
            ProfileList::Languages => "languages",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        [
            ProfileList::Skills,
            ProfileList::Experiences,
            ProfileList::Educations,
            ProfileList::Languages,
        ]
        .into_iter()
        .find(|l| l.as_str() == key)
    }
}

impl Profile {
    pub fn field(&self, field: ProfileField) -> Option<&str> {
        let value = match field {
            ProfileField::Name => &self.name,
            ProfileField::Title => &self.title,
            ProfileField::Email => &self.email,
            ProfileField::Phone => &self.phone,
            ProfileField::Location => &self.location,
            ProfileField::About => &self.about,
            ProfileField::Photo => &self.photo,
        };
        value.as_deref()
    }

    pub(crate) fn field_mut(&mut self, field: ProfileField) -> &mut Option<String> {
        match field {
            ProfileField::Name => &mut self.name,
            ProfileField::Title => &mut self.title,
            ProfileField::Email => &mut self.email,
            ProfileField::Phone => &mut self.phone,
            ProfileField::Location => &mut self.location,
            ProfileField::About => &mut self.about,
            ProfileField::Photo => &mut self.photo,
        }
    }

    /// Returns the field value when it holds visible text.
    pub fn filled(&self, field: ProfileField) -> Option<&str> {
        self.field(field).filter(|v| !v.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_deserializes_with_missing_fields() {
        let profile: Profile = serde_json::from_str(r#"{"name": "Ayşe Yılmaz"}"#).unwrap();
        assert_eq!(profile.name.as_deref(), Some("Ayşe Yılmaz"));
        assert!(profile.title.is_none());
        assert!(profile.skills.is_empty());
    }

    #[test]
    fn test_experience_entry_uses_desc_key() {
        let entry: ExperienceEntry =
            serde_json::from_str(r#"{"title": "Developer", "company": "Acme", "desc": "Rust"}"#)
                .unwrap();
        assert_eq!(entry.desc, "Rust");
        assert_eq!(entry.date, "");
    }

    #[test]
    fn test_filled_treats_blank_as_missing() {
        let profile = Profile {
            title: Some("   ".to_string()),
            email: Some("a@b.c".to_string()),
            ..Default::default()
        };
        assert_eq!(profile.filled(ProfileField::Title), None);
        assert_eq!(profile.filled(ProfileField::Email), Some("a@b.c"));
        assert_eq!(profile.filled(ProfileField::Name), None);
    }

    #[test]
    fn test_field_and_list_keys_round_trip() {
        for field in ProfileField::ALL {
            assert_eq!(ProfileField::parse(field.as_str()), Some(field));
        }
        assert_eq!(ProfileList::parse("languages"), Some(ProfileList::Languages));
        assert_eq!(ProfileList::parse("hobbies"), None);
    }
}
