//! Placeholder text and example content shown where a profile has no data.

use crate::models::profile::{EducationEntry, ExperienceEntry, LanguageEntry};

pub const NAME: &str = "Adınız Soyadınız";
pub const TITLE: &str = "Meslek Unvanınız";
pub const EMAIL: &str = "ornek@email.com";
pub const PHONE: &str = "+90 555 123 45 67";
pub const LOCATION: &str = "İstanbul, Türkiye";
pub const ABOUT: &str = "Kendinizi kısaca tanıtın: deneyiminiz, uzmanlık alanlarınız ve \
                         kariyer hedefleriniz hakkında birkaç cümle yazın.";

// Per-entry labels for blank sub-fields.
pub const EXPERIENCE_TITLE: &str = "Pozisyon";
pub const EXPERIENCE_COMPANY: &str = "Şirket Adı";
pub const EDUCATION_DEGREE: &str = "Bölüm / Derece";
pub const EDUCATION_SCHOOL: &str = "Okul Adı";
pub const LANGUAGE_NAME: &str = "Dil";
pub const LANGUAGE_LEVEL: &str = "Seviye";

pub const SECTION_ABOUT: &str = "Hakkımda";
pub const SECTION_SKILLS: &str = "Yetenekler";
pub const SECTION_EXPERIENCE: &str = "Deneyim";
pub const SECTION_EDUCATION: &str = "Eğitim";
pub const SECTION_LANGUAGES: &str = "Diller";

const SKILLS: [&str; 8] = [
    "JavaScript",
    "React",
    "Node.js",
    "TypeScript",
    "HTML & CSS",
    "Git",
    "SQL",
    "Takım Çalışması",
];

pub fn skills() -> Vec<String> {
    SKILLS.iter().map(|s| s.to_string()).collect()
}

pub fn experiences() -> Vec<ExperienceEntry> {
    vec![
        ExperienceEntry {
            title: "Kıdemli Yazılım Geliştirici".to_string(),
            company: "ABC Teknoloji A.Ş.".to_string(),
            date: "2021 - Günümüz".to_string(),
            desc: "Web uygulamalarının mimari tasarımı ve geliştirilmesi, ekip içi kod \
                   incelemeleri ve performans iyileştirmeleri."
                .to_string(),
        },
        ExperienceEntry {
            title: "Yazılım Geliştirici".to_string(),
            company: "XYZ Yazılım".to_string(),
            date: "2018 - 2021".to_string(),
            desc: "Müşteri projelerinde ön yüz ve arka uç geliştirme, REST servislerinin \
                   entegrasyonu."
                .to_string(),
        },
        ExperienceEntry {
            title: "Stajyer Geliştirici".to_string(),
            company: "Yenilik Bilişim".to_string(),
            date: "2017 - 2018".to_string(),
            desc: "Test otomasyonu ve dahili araçların geliştirilmesine destek.".to_string(),
        },
    ]
}

pub fn educations() -> Vec<EducationEntry> {
    vec![
        EducationEntry {
            degree: "Bilgisayar Mühendisliği Lisans".to_string(),
            school: "İstanbul Teknik Üniversitesi".to_string(),
            date: "2013 - 2017".to_string(),
            desc: "Bitirme projesi: dağıtık sistemlerde veri tutarlılığı.".to_string(),
        },
        EducationEntry {
            degree: "Fen Bilimleri".to_string(),
            school: "Ankara Fen Lisesi".to_string(),
            date: "2009 - 2013".to_string(),
            desc: String::new(),
        },
    ]
}

pub fn languages() -> Vec<LanguageEntry> {
    [
        ("Türkçe", "Ana Dil"),
        ("İngilizce", "İleri"),
        ("Almanca", "Orta"),
        ("Fransızca", "Başlangıç"),
    ]
    .into_iter()
    .map(|(name, level)| LanguageEntry {
        name: name.to_string(),
        level: level.to_string(),
    })
    .collect()
}
