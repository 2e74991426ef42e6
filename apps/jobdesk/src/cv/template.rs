//! Static per-template style tables and display caps.
//!
//! The five CV templates share one layout pipeline and differ only in palette,
//! header arrangement, section-card treatment, font face, and list caps.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Template identifiers
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateId {
    Modern,
    Minimal,
    Elegant,
    Professional,
    Creative,
}

impl TemplateId {
    pub const ALL: [TemplateId; 5] = [
        TemplateId::Modern,
        TemplateId::Minimal,
        TemplateId::Elegant,
        TemplateId::Professional,
        TemplateId::Creative,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            TemplateId::Modern => "modern",
            TemplateId::Minimal => "minimal",
            TemplateId::Elegant => "elegant",
            TemplateId::Professional => "professional",
            TemplateId::Creative => "creative",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TemplateId::Modern => "Modern",
            TemplateId::Minimal => "Minimal",
            TemplateId::Elegant => "Zarif",
            TemplateId::Professional => "Profesyonel",
            TemplateId::Creative => "Yaratıcı",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.key().eq_ignore_ascii_case(key))
    }

    pub fn style(&self) -> &'static TemplateStyle {
        match self {
            TemplateId::Modern => &MODERN,
            TemplateId::Minimal => &MINIMAL,
            TemplateId::Elegant => &ELEGANT,
            TemplateId::Professional => &PROFESSIONAL,
            TemplateId::Creative => &CREATIVE,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Style table types
// ────────────────────────────────────────────────────────────────────────────

/// An sRGB colour with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb8(pub u8, pub u8, pub u8);

impl Rgb8 {
    /// Lowercase hex without the leading `#`, as the avatar service expects.
    pub fn hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Channels scaled to 0.0–1.0 for the PDF colour space.
    pub fn unit(&self) -> (f32, f32, f32) {
        (
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub page_background: Rgb8,
    pub header_background: Rgb8,
    pub header_text: Rgb8,
    pub accent: Rgb8,
    pub text: Rgb8,
    pub muted_text: Rgb8,
    pub card_background: Rgb8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderLayout {
    /// Photo at the left edge, name/title/contacts stacked to its right.
    PhotoLeft,
    /// Photo centered above a centered name block.
    PhotoTopCentered,
    /// No photo block; name, title and contacts run on the top lines.
    Inline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStyle {
    /// Filled background panel behind each section.
    Filled,
    /// Thin accent rule under each section heading, no panel.
    Underlined,
    /// Accent bar down the left edge of each section.
    SideBar,
}

/// Font faces available without shipping font files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFace {
    Helvetica,
    TimesRoman,
}

/// Maximum number of entries rendered from each profile list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayCaps {
    pub skills: usize,
    pub experiences: usize,
    pub educations: usize,
    pub languages: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemplateStyle {
    pub palette: Palette,
    pub header: HeaderLayout,
    pub cards: CardStyle,
    pub font: FontFace,
    pub name_size_pt: f32,
    pub heading_size_pt: f32,
    pub body_size_pt: f32,
    /// Vertical gap between sections, in millimetres.
    pub section_gap_mm: f32,
    pub caps: DisplayCaps,
}

// ────────────────────────────────────────────────────────────────────────────
// Style tables
// ────────────────────────────────────────────────────────────────────────────

static MODERN: TemplateStyle = TemplateStyle {
    palette: Palette {
        page_background: Rgb8(255, 255, 255),
        header_background: Rgb8(37, 99, 235),
        header_text: Rgb8(255, 255, 255),
        accent: Rgb8(37, 99, 235),
        text: Rgb8(31, 41, 55),
        muted_text: Rgb8(107, 114, 128),
        card_background: Rgb8(239, 246, 255),
    },
    header: HeaderLayout::PhotoLeft,
    cards: CardStyle::Filled,
    font: FontFace::Helvetica,
    name_size_pt: 22.0,
    heading_size_pt: 12.0,
    body_size_pt: 9.5,
    section_gap_mm: 5.0,
    caps: DisplayCaps {
        skills: 8,
        experiences: 3,
        educations: 2,
        languages: 4,
    },
};

static MINIMAL: TemplateStyle = TemplateStyle {
    palette: Palette {
        page_background: Rgb8(255, 255, 255),
        header_background: Rgb8(255, 255, 255),
        header_text: Rgb8(17, 24, 39),
        accent: Rgb8(17, 24, 39),
        text: Rgb8(55, 65, 81),
        muted_text: Rgb8(156, 163, 175),
        card_background: Rgb8(255, 255, 255),
    },
    header: HeaderLayout::Inline,
    cards: CardStyle::Underlined,
    font: FontFace::Helvetica,
    name_size_pt: 20.0,
    heading_size_pt: 11.0,
    body_size_pt: 9.5,
    section_gap_mm: 6.0,
    caps: DisplayCaps {
        skills: 8,
        experiences: 3,
        educations: 2,
        languages: 3,
    },
};

static ELEGANT: TemplateStyle = TemplateStyle {
    palette: Palette {
        page_background: Rgb8(253, 251, 247),
        header_background: Rgb8(253, 251, 247),
        header_text: Rgb8(60, 47, 30),
        accent: Rgb8(176, 141, 87),
        text: Rgb8(60, 47, 30),
        muted_text: Rgb8(140, 120, 95),
        card_background: Rgb8(247, 241, 230),
    },
    header: HeaderLayout::PhotoTopCentered,
    cards: CardStyle::Underlined,
    font: FontFace::TimesRoman,
    name_size_pt: 24.0,
    heading_size_pt: 13.0,
    body_size_pt: 10.0,
    section_gap_mm: 5.0,
    caps: DisplayCaps {
        skills: 6,
        experiences: 2,
        educations: 1,
        languages: 2,
    },
};

static PROFESSIONAL: TemplateStyle = TemplateStyle {
    palette: Palette {
        page_background: Rgb8(255, 255, 255),
        header_background: Rgb8(30, 58, 95),
        header_text: Rgb8(255, 255, 255),
        accent: Rgb8(30, 58, 95),
        text: Rgb8(33, 37, 41),
        muted_text: Rgb8(108, 117, 125),
        card_background: Rgb8(241, 245, 249),
    },
    header: HeaderLayout::PhotoLeft,
    cards: CardStyle::SideBar,
    font: FontFace::Helvetica,
    name_size_pt: 21.0,
    heading_size_pt: 12.0,
    body_size_pt: 9.5,
    section_gap_mm: 4.5,
    caps: DisplayCaps {
        skills: 8,
        experiences: 3,
        educations: 2,
        languages: 4,
    },
};

static CREATIVE: TemplateStyle = TemplateStyle {
    palette: Palette {
        page_background: Rgb8(250, 245, 255),
        header_background: Rgb8(124, 58, 237),
        header_text: Rgb8(255, 255, 255),
        accent: Rgb8(219, 39, 119),
        text: Rgb8(46, 16, 101),
        muted_text: Rgb8(109, 40, 217),
        card_background: Rgb8(243, 232, 255),
    },
    header: HeaderLayout::PhotoTopCentered,
    cards: CardStyle::Filled,
    font: FontFace::Helvetica,
    name_size_pt: 23.0,
    heading_size_pt: 12.5,
    body_size_pt: 9.5,
    section_gap_mm: 5.0,
    caps: DisplayCaps {
        skills: 6,
        experiences: 2,
        educations: 1,
        languages: 3,
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_caps_per_template() {
        assert_eq!(TemplateId::Modern.style().caps.skills, 8);
        assert_eq!(TemplateId::Minimal.style().caps.skills, 8);
        assert_eq!(TemplateId::Professional.style().caps.skills, 8);
        assert_eq!(TemplateId::Elegant.style().caps.skills, 6);
        assert_eq!(TemplateId::Creative.style().caps.skills, 6);
    }

    #[test]
    fn test_list_caps_stay_in_documented_ranges() {
        for template in TemplateId::ALL {
            let caps = template.style().caps;
            assert!((2..=3).contains(&caps.experiences), "{template:?}");
            assert!((1..=2).contains(&caps.educations), "{template:?}");
            assert!((2..=4).contains(&caps.languages), "{template:?}");
        }
    }

    #[test]
    fn test_parse_is_case_insensitive_and_rejects_unknown() {
        assert_eq!(TemplateId::parse("Elegant"), Some(TemplateId::Elegant));
        assert_eq!(TemplateId::parse("creative"), Some(TemplateId::Creative));
        assert_eq!(TemplateId::parse("retro"), None);
    }

    #[test]
    fn test_rgb_hex_is_zero_padded() {
        assert_eq!(Rgb8(37, 99, 235).hex(), "2563eb");
        assert_eq!(Rgb8(0, 5, 10).hex(), "00050a");
    }
}
