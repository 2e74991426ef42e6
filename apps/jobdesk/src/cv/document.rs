//! Declarative document tree produced by the renderer and consumed by the PDF exporter.

use serde::{Deserialize, Serialize};

use crate::cv::template::{TemplateId, TemplateStyle};

/// A4 portrait, in millimetres.
pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub template: TemplateId,
    /// Suggested download name, `<Name_With_Underscores>_CV.pdf`.
    pub file_name: String,
    pub page: Page,
}

/// The single page of a CV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub width_mm: f32,
    pub height_mm: f32,
    pub style: TemplateStyle,
    pub header: Header,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub title: String,
    pub contacts: Vec<ContactLine>,
    /// Absent for templates whose header carries no photo block.
    pub photo: Option<Photo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    Email,
    Phone,
    Location,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactLine {
    pub kind: ContactKind,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    /// Image reference: the profile photo or a generated avatar URL.
    pub source: String,
    pub generated: bool,
    /// Initials drawn when the image itself is not embedded.
    pub initials: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    About,
    Skills,
    Experience,
    Education,
    Languages,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub kind: SectionKind,
    pub heading: String,
    pub body: SectionBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum SectionBody {
    Paragraph(String),
    Tags(Vec<String>),
    Entries(Vec<EntryBlock>),
    Pairs(Vec<LabelValue>),
}

/// One experience or education block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryBlock {
    pub heading: String,
    pub subheading: String,
    pub date: String,
    pub detail: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelValue {
    pub label: String,
    pub value: String,
}

#[cfg(test)]
impl Document {
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.page.sections.iter().find(|s| s.kind == kind)
    }

    /// Every visible text run on the page, in reading order.
    pub fn text_runs(&self) -> Vec<&str> {
        let header = &self.page.header;
        let mut runs: Vec<&str> = vec![header.name.as_str(), header.title.as_str()];
        runs.extend(header.contacts.iter().map(|c| c.text.as_str()));
        for section in &self.page.sections {
            runs.push(section.heading.as_str());
            match &section.body {
                SectionBody::Paragraph(text) => runs.push(text.as_str()),
                SectionBody::Tags(tags) => runs.extend(tags.iter().map(String::as_str)),
                SectionBody::Entries(entries) => {
                    for e in entries {
                        runs.extend([
                            e.heading.as_str(),
                            e.subheading.as_str(),
                            e.date.as_str(),
                            e.detail.as_str(),
                        ]);
                    }
                }
                SectionBody::Pairs(pairs) => {
                    for p in pairs {
                        runs.extend([p.label.as_str(), p.value.as_str()]);
                    }
                }
            }
        }
        runs.retain(|r| !r.is_empty());
        runs
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.text_runs().iter().any(|r| r.contains(needle))
    }
}
