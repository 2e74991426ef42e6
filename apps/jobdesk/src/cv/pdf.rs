//! Draws a rendered `Document` onto a single A4 page with `printpdf`.
//!
//! Layout runs top-down with a millimetre cursor; printpdf's origin is bottom-left, so
//! every draw call converts through `PdfCanvas::y`. Content that would run past the
//! bottom margin is clipped: every section keeps at least its heading, an overflowing
//! body loses its trailing lines and ends in an ellipsis, and the output is always
//! exactly one page.

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rect, Rgb,
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::cv::document::{
    Document, EntryBlock, Header, Section, SectionBody, A4_HEIGHT_MM, A4_WIDTH_MM,
};
use crate::cv::font_metrics::{get_metrics, FontMetricTable, ELLIPSIS, PT_PER_MM};
use crate::cv::template::{CardStyle, FontFace, HeaderLayout, Rgb8, TemplateStyle};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

const MARGIN_MM: f32 = 15.0;
const CONTENT_WIDTH_MM: f32 = A4_WIDTH_MM - 2.0 * MARGIN_MM;
const CARD_PADDING_MM: f32 = 3.5;
const LINE_SPACING: f32 = 1.35;
const PHOTO_SIZE_MM: f32 = 28.0;
/// Built-in bold faces run wider than the regular-weight tables.
const BOLD_ALLOWANCE: f32 = 1.08;
/// Header lines shrink to this fraction of their size before being clipped.
const MIN_SHRINK: f32 = 0.75;

/// Converts a rendered document into PDF bytes.
pub fn export_pdf(doc: &Document) -> Result<Vec<u8>, RenderError> {
    let style = &doc.page.style;
    let (pdf, page, layer) = PdfDocument::new(
        doc.file_name.trim_end_matches(".pdf"),
        Mm(doc.page.width_mm),
        Mm(doc.page.height_mm),
        "CV",
    );
    let (regular, bold) = match style.font {
        FontFace::Helvetica => (BuiltinFont::Helvetica, BuiltinFont::HelveticaBold),
        FontFace::TimesRoman => (BuiltinFont::TimesRoman, BuiltinFont::TimesBold),
    };
    let regular = pdf.add_builtin_font(regular).map_err(pdf_err)?;
    let bold = pdf.add_builtin_font(bold).map_err(pdf_err)?;

    let canvas = PdfCanvas {
        layer: pdf.get_page(page).get_layer(layer),
        regular,
        bold,
        metrics: get_metrics(style.font),
        page_height_mm: doc.page.height_mm,
    };

    canvas.fill_rect(
        0.0,
        0.0,
        doc.page.width_mm,
        doc.page.height_mm,
        style.palette.page_background,
    );

    let start = draw_header(&canvas, style, &doc.page.header);
    let placed = plan_sections(doc, canvas.metrics, start);
    for p in &placed {
        draw_section(&canvas, style, p.section, &p.runs, p.top, p.height);
    }

    let used_mm = placed.last().map(|p| p.top + p.height).unwrap_or(start);
    debug!(template = doc.template.key(), used_mm, "CV page laid out");
    pdf.save_to_bytes().map_err(pdf_err)
}

fn pdf_err(e: impl std::fmt::Debug) -> RenderError {
    RenderError::Pdf(format!("{e:?}"))
}

/// Replaces the Turkish letters the built-in PDF fonts cannot encode.
pub fn pdf_text(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'ş' => 's',
            'Ş' => 'S',
            'ğ' => 'g',
            'Ğ' => 'G',
            'ı' => 'i',
            'İ' => 'I',
            other => other,
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Canvas
// ────────────────────────────────────────────────────────────────────────────

struct PdfCanvas<'a> {
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    metrics: &'a FontMetricTable,
    page_height_mm: f32,
}

impl PdfCanvas<'_> {
    /// Converts a top-down offset into printpdf's bottom-up coordinate.
    fn y(&self, top_mm: f32) -> Mm {
        Mm(self.page_height_mm - top_mm)
    }

    fn set_fill(&self, color: Rgb8) {
        let (r, g, b) = color.unit();
        self.layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
    }

    fn fill_rect(&self, x: f32, top: f32, width: f32, height: f32, color: Rgb8) {
        self.set_fill(color);
        let rect = Rect::new(Mm(x), self.y(top + height), Mm(x + width), self.y(top))
            .with_mode(PaintMode::Fill);
        self.layer.add_rect(rect);
    }

    /// Draws `text` with its baseline at `baseline` (top-down mm).
    fn text(&self, text: &str, x: f32, baseline: f32, size_pt: f32, bold: bool, color: Rgb8) {
        if text.is_empty() {
            return;
        }
        self.set_fill(color);
        let font = if bold { &self.bold } else { &self.regular };
        self.layer
            .use_text(pdf_text(text), size_pt, Mm(x), self.y(baseline), font);
    }

    /// Like `text`, but shrinks and then clips the line to `max_width` mm.
    #[allow(clippy::too_many_arguments)]
    fn fitted(
        &self,
        text: &str,
        x: f32,
        baseline: f32,
        size_pt: f32,
        bold: bool,
        color: Rgb8,
        max_width: f32,
    ) {
        let (line, size) = fit_line(self.metrics, text, size_pt, bold, max_width);
        self.text(&line, x, baseline, size, bold, color);
    }

    fn centered(&self, text: &str, baseline: f32, size_pt: f32, bold: bool, color: Rgb8) {
        let (line, size) = fit_line(self.metrics, text, size_pt, bold, CONTENT_WIDTH_MM);
        let mut width = self.metrics.width_mm(&line, size);
        if bold {
            width *= BOLD_ALLOWANCE;
        }
        let x = ((A4_WIDTH_MM - width) / 2.0).max(MARGIN_MM);
        self.text(&line, x, baseline, size, bold, color);
    }

    fn line_height(size_pt: f32) -> f32 {
        size_pt / PT_PER_MM * LINE_SPACING
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Header
// ────────────────────────────────────────────────────────────────────────────

/// Vertical space taken by the header block, including the gap below it.
fn header_height(style: &TemplateStyle) -> f32 {
    match style.header {
        HeaderLayout::PhotoLeft => 52.0,
        HeaderLayout::PhotoTopCentered => 74.0,
        HeaderLayout::Inline => 49.0,
    }
}

/// Shrinks `text` down to `MIN_SHRINK` of its size to fit `max_width` mm, clipping
/// with an ellipsis past that. Returns the line and the size to draw it at.
fn fit_line(
    metrics: &FontMetricTable,
    text: &str,
    size_pt: f32,
    bold: bool,
    max_width: f32,
) -> (String, f32) {
    let max_width = if bold { max_width / BOLD_ALLOWANCE } else { max_width };
    let width = metrics.width_mm(text, size_pt);
    if width <= max_width {
        return (text.to_string(), size_pt);
    }
    let size = (size_pt * max_width / width).max(size_pt * MIN_SHRINK);
    (metrics.truncate_to_width(text, size, max_width), size)
}

/// Draws the header block and returns the cursor position below it.
fn draw_header(canvas: &PdfCanvas<'_>, style: &TemplateStyle, header: &Header) -> f32 {
    let palette = &style.palette;
    let contacts = header
        .contacts
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join("  |  ");

    match style.header {
        HeaderLayout::PhotoLeft => {
            let band = 44.0;
            canvas.fill_rect(0.0, 0.0, A4_WIDTH_MM, band, palette.header_background);
            let photo_top = (band - PHOTO_SIZE_MM) / 2.0;
            draw_photo(canvas, style, header, MARGIN_MM, photo_top);

            let x = MARGIN_MM + PHOTO_SIZE_MM + 8.0;
            let max = A4_WIDTH_MM - MARGIN_MM - x;
            let ink = palette.header_text;
            canvas.fitted(&header.name, x, 17.0, style.name_size_pt, true, ink, max);
            canvas.fitted(&header.title, x, 25.0, style.heading_size_pt, false, ink, max);
            canvas.fitted(&contacts, x, 33.0, style.body_size_pt, false, ink, max);
            header_height(style)
        }
        HeaderLayout::PhotoTopCentered => {
            let band = 66.0;
            canvas.fill_rect(0.0, 0.0, A4_WIDTH_MM, band, palette.header_background);
            draw_photo(canvas, style, header, (A4_WIDTH_MM - PHOTO_SIZE_MM) / 2.0, 7.0);

            canvas.centered(&header.name, 46.0, style.name_size_pt, true, palette.header_text);
            canvas.centered(&header.title, 53.0, style.heading_size_pt, false, palette.accent);
            canvas.centered(&contacts, 60.0, style.body_size_pt, false, palette.header_text);
            header_height(style)
        }
        HeaderLayout::Inline => {
            let (x, max) = (MARGIN_MM, CONTENT_WIDTH_MM);
            let (ink, muted) = (palette.header_text, palette.muted_text);
            canvas.fitted(&header.name, x, 22.0, style.name_size_pt, true, ink, max);
            canvas.fitted(&header.title, x, 30.0, style.heading_size_pt, false, muted, max);
            canvas.fitted(&contacts, x, 37.0, style.body_size_pt, false, palette.text, max);
            canvas.fill_rect(MARGIN_MM, 41.0, CONTENT_WIDTH_MM, 0.6, palette.accent);
            header_height(style)
        }
    }
}

/// Photo tile with initials. The image itself is referenced, not embedded.
fn draw_photo(canvas: &PdfCanvas<'_>, style: &TemplateStyle, header: &Header, x: f32, top: f32) {
    let Some(photo) = &header.photo else {
        return;
    };
    canvas.fill_rect(x, top, PHOTO_SIZE_MM, PHOTO_SIZE_MM, style.palette.card_background);
    let size = PHOTO_SIZE_MM * 0.9;
    let width = canvas.metrics.width_mm(&photo.initials, size);
    let baseline = top + PHOTO_SIZE_MM / 2.0 + size / PT_PER_MM * 0.35;
    canvas.text(
        &photo.initials,
        x + (PHOTO_SIZE_MM - width) / 2.0,
        baseline,
        size,
        true,
        style.palette.accent,
    );
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

/// One laid-out line inside a section body.
struct TextRun {
    text: String,
    size_pt: f32,
    bold: bool,
    muted: bool,
    /// Right-aligned companion text on the same baseline (entry dates).
    right: Option<String>,
    advance_mm: f32,
}

impl TextRun {
    fn new(text: String, size_pt: f32) -> Self {
        TextRun {
            text,
            size_pt,
            bold: false,
            muted: false,
            right: None,
            advance_mm: PdfCanvas::line_height(size_pt),
        }
    }
}

fn inner_width(style: &TemplateStyle) -> f32 {
    match style.cards {
        CardStyle::Filled => CONTENT_WIDTH_MM - 2.0 * CARD_PADDING_MM,
        CardStyle::SideBar => CONTENT_WIDTH_MM - CARD_PADDING_MM - 1.5,
        CardStyle::Underlined => CONTENT_WIDTH_MM,
    }
}

fn layout_section(
    metrics: &FontMetricTable,
    style: &TemplateStyle,
    section: &Section,
) -> Vec<TextRun> {
    let width = inner_width(style);
    let size = style.body_size_pt;
    let wrap = |text: &str| metrics.wrap(text, size, width);

    match &section.body {
        SectionBody::Paragraph(text) => wrap(text)
            .into_iter()
            .map(|line| TextRun::new(line, size))
            .collect(),
        SectionBody::Tags(tags) => wrap(&tags.join("  ·  "))
            .into_iter()
            .map(|line| TextRun::new(line, size))
            .collect(),
        SectionBody::Entries(entries) => entries
            .iter()
            .flat_map(|entry| layout_entry(metrics, style, entry, width))
            .collect(),
        SectionBody::Pairs(pairs) => pairs
            .iter()
            .map(|p| {
                let mut run = TextRun::new(p.label.clone(), size);
                run.bold = true;
                run.right = Some(p.value.clone());
                run
            })
            .collect(),
    }
}

fn layout_entry(
    metrics: &FontMetricTable,
    style: &TemplateStyle,
    entry: &EntryBlock,
    width: f32,
) -> Vec<TextRun> {
    let size = style.body_size_pt;
    let mut runs = Vec::new();

    let mut heading = TextRun::new(entry.heading.clone(), size + 0.5);
    heading.bold = true;
    if !entry.date.is_empty() {
        heading.right = Some(entry.date.clone());
    }
    runs.push(heading);

    let mut company = TextRun::new(entry.subheading.clone(), size);
    company.muted = true;
    runs.push(company);

    runs.extend(
        metrics
            .wrap(&entry.detail, size, width)
            .into_iter()
            .map(|line| TextRun::new(line, size)),
    );
    if let Some(last) = runs.last_mut() {
        last.advance_mm += 1.5;
    }
    runs
}

fn heading_height(style: &TemplateStyle) -> f32 {
    PdfCanvas::line_height(style.heading_size_pt) + 2.0
}

fn section_height(style: &TemplateStyle, runs: &[TextRun]) -> f32 {
    let body: f32 = runs.iter().map(|r| r.advance_mm).sum();
    let padding = match style.cards {
        CardStyle::Filled => 2.0 * CARD_PADDING_MM,
        CardStyle::SideBar => CARD_PADDING_MM,
        CardStyle::Underlined => 0.0,
    };
    heading_height(style) + body + padding
}

/// A section positioned on the page with the body lines that fit.
struct PlacedSection<'d> {
    section: &'d Section,
    runs: Vec<TextRun>,
    top: f32,
    height: f32,
}

/// Positions every section below `start`. Each section reserves room for the headings
/// of the sections after it; a body that does not fit loses its trailing lines and the
/// last kept line ends in an ellipsis.
fn plan_sections<'d>(
    doc: &'d Document,
    metrics: &FontMetricTable,
    start: f32,
) -> Vec<PlacedSection<'d>> {
    let style = &doc.page.style;
    let sections = &doc.page.sections;
    let bottom = doc.page.height_mm - MARGIN_MM;
    let heading_only = section_height(style, &[]);

    let mut cursor = start;
    let mut placed = Vec::with_capacity(sections.len());
    for (i, section) in sections.iter().enumerate() {
        let later = (sections.len() - i - 1) as f32;
        let reserved = later * (heading_only + style.section_gap_mm);
        let available = (bottom - cursor - reserved).max(heading_only);

        let mut runs = layout_section(metrics, style, section);
        let full = runs.len();
        while !runs.is_empty() && section_height(style, &runs) > available {
            runs.pop();
        }
        if runs.len() < full {
            if let Some(last) = runs.last_mut() {
                let marked = format!("{}{ELLIPSIS}", last.text.trim_end());
                last.text = metrics.truncate_to_width(&marked, last.size_pt, inner_width(style));
            }
            warn!(
                section = ?section.kind,
                template = doc.template.key(),
                dropped_lines = full - runs.len(),
                "CV section clipped to fit one page"
            );
        }

        let height = section_height(style, &runs);
        placed.push(PlacedSection {
            section,
            runs,
            top: cursor,
            height,
        });
        cursor += height + style.section_gap_mm;
    }
    placed
}

fn draw_section(
    canvas: &PdfCanvas<'_>,
    style: &TemplateStyle,
    section: &Section,
    runs: &[TextRun],
    top: f32,
    height: f32,
) {
    let palette = &style.palette;
    let (x, mut cursor) = match style.cards {
        CardStyle::Filled => {
            canvas.fill_rect(MARGIN_MM, top, CONTENT_WIDTH_MM, height, palette.card_background);
            (MARGIN_MM + CARD_PADDING_MM, top + CARD_PADDING_MM)
        }
        CardStyle::SideBar => {
            canvas.fill_rect(MARGIN_MM, top, 1.5, height, palette.accent);
            (MARGIN_MM + 1.5 + CARD_PADDING_MM, top + CARD_PADDING_MM / 2.0)
        }
        CardStyle::Underlined => (MARGIN_MM, top),
    };

    let heading_line = PdfCanvas::line_height(style.heading_size_pt);
    canvas.text(
        &section.heading,
        x,
        cursor + heading_line * 0.75,
        style.heading_size_pt,
        true,
        palette.accent,
    );
    if style.cards == CardStyle::Underlined {
        canvas.fill_rect(x, cursor + heading_line, CONTENT_WIDTH_MM, 0.4, palette.accent);
    }
    cursor += heading_height(style);

    let right_edge = x + inner_width(style);
    for run in runs {
        let baseline = cursor + run.advance_mm * 0.7;
        let color = if run.muted { palette.muted_text } else { palette.text };
        canvas.text(&run.text, x, baseline, run.size_pt, run.bold, color);
        if let Some(right) = &run.right {
            let width = canvas.metrics.width_mm(right, style.body_size_pt);
            canvas.text(
                right,
                right_edge - width,
                baseline,
                style.body_size_pt,
                false,
                palette.muted_text,
            );
        }
        cursor += run.advance_mm;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cv::avatar::{AvatarService, DEFAULT_AVATAR_BASE_URL};
    use crate::cv::document::SectionKind;
    use crate::cv::renderer::render;
    use crate::cv::template::TemplateId;
    use crate::models::profile::{ExperienceEntry, Profile};

    fn avatars() -> AvatarService {
        AvatarService::new(DEFAULT_AVATAR_BASE_URL).unwrap()
    }

    #[test]
    fn test_every_template_exports_a_pdf() {
        for template in TemplateId::ALL {
            let doc = render(&Profile::default(), template, &avatars());
            let bytes = export_pdf(&doc).expect("export should succeed");
            assert!(bytes.starts_with(b"%PDF"), "{template:?} did not produce a PDF");
        }
    }

    fn oversized_profile() -> Profile {
        Profile {
            about: Some("Dağıtık sistemler ve veri altyapısı üzerine çalışıyorum. ".repeat(12)),
            experiences: vec![
                ExperienceEntry {
                    title: "Developer".to_string(),
                    company: "Acme".to_string(),
                    date: "2020".to_string(),
                    desc: "Ödeme servislerinin bakımını ve geliştirmesini yürüttüm. ".repeat(25),
                };
                3
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_oversized_profile_keeps_every_section_on_the_page() {
        let expected = [
            SectionKind::About,
            SectionKind::Skills,
            SectionKind::Experience,
            SectionKind::Education,
            SectionKind::Languages,
        ];
        for template in TemplateId::ALL {
            let doc = render(&oversized_profile(), template, &avatars());
            let style = &doc.page.style;
            let placed = plan_sections(&doc, get_metrics(style.font), header_height(style));

            let kinds: Vec<SectionKind> = placed.iter().map(|p| p.section.kind).collect();
            assert_eq!(kinds, expected, "{template:?}");

            let last = placed.last().unwrap();
            assert!(
                last.top + last.height <= doc.page.height_mm - MARGIN_MM + 1e-3,
                "{template:?} overflows the page"
            );

            let experience = placed
                .iter()
                .find(|p| p.section.kind == SectionKind::Experience)
                .unwrap();
            let clipped_line = &experience.runs.last().unwrap().text;
            assert!(clipped_line.ends_with(ELLIPSIS), "{template:?}: {clipped_line:?}");

            assert!(export_pdf(&doc).unwrap().starts_with(b"%PDF"));
        }
    }

    #[test]
    fn test_short_profile_is_not_clipped() {
        let doc = render(&Profile::default(), TemplateId::Modern, &avatars());
        let style = &doc.page.style;
        let metrics = get_metrics(style.font);
        let placed = plan_sections(&doc, metrics, header_height(style));
        for p in &placed {
            assert_eq!(p.runs.len(), layout_section(metrics, style, p.section).len());
            assert!(p.runs.iter().all(|r| !r.text.ends_with(ELLIPSIS)));
        }
    }

    #[test]
    fn test_fit_line_shrinks_then_clips_long_header_text() {
        let metrics = get_metrics(FontFace::Helvetica);
        assert_eq!(
            fit_line(metrics, "Ada Lovelace", 22.0, true, 120.0),
            ("Ada Lovelace".to_string(), 22.0)
        );

        let email = "ayse.yilmaz.kariyer.basvurulari@uzun-bir-sirket-alanadi.com.tr";
        let (line, size) = fit_line(metrics, email, 9.0, false, 60.0);
        assert!(size >= 9.0 * MIN_SHRINK && size < 9.0);
        assert!(metrics.width_mm(&line, size) <= 60.0 + 1e-3, "{line:?} at {size}");

        let (name, size) = fit_line(metrics, &"Uzunisim ".repeat(12), 22.0, true, 120.0);
        assert!(name.ends_with(ELLIPSIS));
        assert!(metrics.width_mm(&name, size) * BOLD_ALLOWANCE <= 120.0 + 1e-3);
    }

    #[test]
    fn test_long_header_fields_still_export() {
        let profile = Profile {
            name: Some("Ayşe Gülşen Karaosmanoğlu Yıldırımoğulları Demirkıranoğlu".to_string()),
            email: Some("ayse.gulsen.karaosmanoglu.basvurular@uzun-bir-alanadi.com.tr".to_string()),
            ..Default::default()
        };
        for template in TemplateId::ALL {
            let doc = render(&profile, template, &avatars());
            assert!(export_pdf(&doc).unwrap().starts_with(b"%PDF"));
        }
    }

    #[test]
    fn test_pdf_text_transliterates_unsupported_letters() {
        assert_eq!(pdf_text("Şişli İğne ılık"), "Sisli Igne ilik");
        assert_eq!(pdf_text("Çömlek Üzüm"), "Çömlek Üzüm");
    }
}
