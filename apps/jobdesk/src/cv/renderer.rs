//! Turns a `Profile` snapshot into a single-page `Document`.
//!
//! Rendering never fails. Blank scalar fields become placeholder text, empty lists
//! fall back to the example content in `placeholders`, and every list is cut to the
//! template's display cap. Sections always come out in the same order:
//! About → Skills → Experience → Education → Languages.

use crate::cv::avatar::AvatarService;
use crate::cv::document::{
    ContactKind, ContactLine, Document, EntryBlock, Header, LabelValue, Page, Photo, Section,
    SectionBody, SectionKind, A4_HEIGHT_MM, A4_WIDTH_MM,
};
use crate::cv::placeholders;
use crate::cv::template::{HeaderLayout, Rgb8, TemplateId};
use crate::models::profile::{Profile, ProfileField};

pub fn render(profile: &Profile, template: TemplateId, avatars: &AvatarService) -> Document {
    let style = template.style();
    let caps = style.caps;

    let name = text_or(profile, ProfileField::Name, placeholders::NAME);

    let photo = match style.header {
        HeaderLayout::Inline => None,
        HeaderLayout::PhotoLeft | HeaderLayout::PhotoTopCentered => Some(photo_for(
            profile,
            &name,
            avatars,
            style.palette.accent,
        )),
    };

    let header = Header {
        title: text_or(profile, ProfileField::Title, placeholders::TITLE),
        contacts: vec![
            ContactLine {
                kind: ContactKind::Email,
                text: text_or(profile, ProfileField::Email, placeholders::EMAIL),
            },
            ContactLine {
                kind: ContactKind::Phone,
                text: text_or(profile, ProfileField::Phone, placeholders::PHONE),
            },
            ContactLine {
                kind: ContactKind::Location,
                text: text_or(profile, ProfileField::Location, placeholders::LOCATION),
            },
        ],
        photo,
        name: name.clone(),
    };

    let skills = or_examples(&profile.skills, placeholders::skills);
    let experiences = or_examples(&profile.experiences, placeholders::experiences);
    let educations = or_examples(&profile.educations, placeholders::educations);
    let languages = or_examples(&profile.languages, placeholders::languages);

    let sections = vec![
        Section {
            kind: SectionKind::About,
            heading: placeholders::SECTION_ABOUT.to_string(),
            body: SectionBody::Paragraph(text_or(
                profile,
                ProfileField::About,
                placeholders::ABOUT,
            )),
        },
        Section {
            kind: SectionKind::Skills,
            heading: placeholders::SECTION_SKILLS.to_string(),
            body: SectionBody::Tags(skills.into_iter().take(caps.skills).collect()),
        },
        Section {
            kind: SectionKind::Experience,
            heading: placeholders::SECTION_EXPERIENCE.to_string(),
            body: SectionBody::Entries(
                experiences
                    .into_iter()
                    .take(caps.experiences)
                    .map(|e| EntryBlock {
                        heading: or_label(&e.title, placeholders::EXPERIENCE_TITLE),
                        subheading: or_label(&e.company, placeholders::EXPERIENCE_COMPANY),
                        date: e.date.trim().to_string(),
                        detail: e.desc.trim().to_string(),
                    })
                    .collect(),
            ),
        },
        Section {
            kind: SectionKind::Education,
            heading: placeholders::SECTION_EDUCATION.to_string(),
            body: SectionBody::Entries(
                educations
                    .into_iter()
                    .take(caps.educations)
                    .map(|e| EntryBlock {
                        heading: or_label(&e.degree, placeholders::EDUCATION_DEGREE),
                        subheading: or_label(&e.school, placeholders::EDUCATION_SCHOOL),
                        date: e.date.trim().to_string(),
                        detail: e.desc.trim().to_string(),
                    })
                    .collect(),
            ),
        },
        Section {
            kind: SectionKind::Languages,
            heading: placeholders::SECTION_LANGUAGES.to_string(),
            body: SectionBody::Pairs(
                languages
                    .into_iter()
                    .take(caps.languages)
                    .map(|l| LabelValue {
                        label: or_label(&l.name, placeholders::LANGUAGE_NAME),
                        value: or_label(&l.level, placeholders::LANGUAGE_LEVEL),
                    })
                    .collect(),
            ),
        },
    ];

    Document {
        template,
        file_name: export_file_name(&name),
        page: Page {
            width_mm: A4_WIDTH_MM,
            height_mm: A4_HEIGHT_MM,
            style: *style,
            header,
            sections,
        },
    }
}

/// `<name with spaces replaced by underscores>_CV.pdf`
pub fn export_file_name(name: &str) -> String {
    format!("{}_CV.pdf", name.trim().replace(' ', "_"))
}

fn text_or(profile: &Profile, field: ProfileField, placeholder: &str) -> String {
    profile
        .filled(field)
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| placeholder.to_string())
}

fn or_label(value: &str, label: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        label.to_string()
    } else {
        value.to_string()
    }
}

fn or_examples<T: Clone>(items: &[T], examples: fn() -> Vec<T>) -> Vec<T> {
    if items.is_empty() {
        examples()
    } else {
        items.to_vec()
    }
}

fn photo_for(profile: &Profile, name: &str, avatars: &AvatarService, accent: Rgb8) -> Photo {
    let initials = initials(name);
    match profile.filled(ProfileField::Photo) {
        Some(url) => Photo {
            source: url.trim().to_string(),
            generated: false,
            initials,
        },
        None => Photo {
            source: avatars.url_for(name, accent),
            generated: true,
            initials,
        },
    }
}

/// Up to two uppercase initials from the first two words of `name`.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|w| w.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}
