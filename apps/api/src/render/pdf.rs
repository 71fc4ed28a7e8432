//! PDF export renderer.
//!
//! Builds the same three template layouts as the live preview into an A4 PDF
//! using the builtin core fonts (Helvetica for modern/creative, Times for
//! classic). Section assembly happens in a pure planning step so the
//! omit-empty-sections invariant is testable without decoding PDF bytes;
//! drawing walks the plan with a cursor, breaking pages when the column runs
//! out of height. Word-wrap comes from the static metric tables in
//! `layout::font_metrics`.

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rect, Rgb,
};

use crate::errors::AppError;
use crate::layout::{get_metrics, max_line_em, FontFamily, FontMetricTable};
use crate::models::cv::CvData;
use crate::models::template::TemplateId;
use crate::render::format::{contact_items, contact_line, date_range, degree_line, display_name};

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 16.0;
const SIDEBAR_W: f32 = 62.0;
const SIDEBAR_PAD: f32 = 8.0;
const MM_PER_PT: f32 = 25.4 / 72.0;

type RgbTriple = (f32, f32, f32);

const INK: RgbTriple = (0.06, 0.09, 0.16);
const MUTED: RgbTriple = (0.28, 0.33, 0.41);
const INDIGO: RgbTriple = (0.31, 0.27, 0.90);
const SLATE: RgbTriple = (0.20, 0.25, 0.33);
const TEAL: RgbTriple = (0.06, 0.46, 0.43);
const TEAL_LIGHT: RgbTriple = (0.80, 0.98, 0.94);
const WHITE: RgbTriple = (1.0, 1.0, 1.0);

/// Renders the PDF document for one template. Returns the raw bytes.
pub fn render_pdf(title: &str, data: &CvData, template_id: TemplateId) -> Result<Vec<u8>, AppError> {
    let mut writer = match template_id {
        TemplateId::Classic => PdfWriter::new(title, FontFamily::TimesRoman)?,
        _ => PdfWriter::new(title, FontFamily::Helvetica)?,
    };

    match template_id {
        TemplateId::Modern => draw_modern(&mut writer, title, data),
        TemplateId::Classic => draw_classic(&mut writer, title, data),
        TemplateId::Creative => draw_creative(&mut writer, title, data),
    }

    writer
        .doc
        .save_to_bytes()
        .map_err(|e| AppError::Pdf(e.to_string()))
}

// ────────────────────────────────────────────────────────────────────────────
// Section planning (pure, shared by all templates)
// ────────────────────────────────────────────────────────────────────────────

pub(crate) struct BodySection {
    pub heading: &'static str,
    pub blocks: Vec<BodyBlock>,
}

pub(crate) enum BodyBlock {
    Item {
        title: String,
        subtitle: String,
        meta: String,
        body: String,
    },
    Chips(Vec<String>),
}

/// Assembles the main-column sections in render order, omitting every
/// section whose backing list is empty. `chips_in_main` is false for the
/// creative template, whose sidebar claims skills/languages/certifications.
pub(crate) fn plan_body(data: &CvData, chips_in_main: bool) -> Vec<BodySection> {
    let mut sections = Vec::new();

    if !data.experience.is_empty() {
        sections.push(BodySection {
            heading: "Experience",
            blocks: data
                .experience
                .iter()
                .map(|e| BodyBlock::Item {
                    title: placeholder(&e.position, "Role"),
                    subtitle: e.company.clone(),
                    meta: date_range(&e.start_date, &e.end_date, e.current),
                    body: e.description.clone(),
                })
                .collect(),
        });
    }
    if !data.education.is_empty() {
        sections.push(BodySection {
            heading: "Education",
            blocks: data
                .education
                .iter()
                .map(|e| BodyBlock::Item {
                    title: degree_line(&e.degree, &e.field),
                    subtitle: e.institution.clone(),
                    meta: date_range(&e.start_date, &e.end_date, e.current),
                    body: e.description.clone(),
                })
                .collect(),
        });
    }
    if !data.projects.is_empty() {
        sections.push(BodySection {
            heading: "Projects",
            blocks: data
                .projects
                .iter()
                .map(|p| BodyBlock::Item {
                    title: placeholder(&p.name, "Project"),
                    subtitle: p.url.clone(),
                    meta: p.technologies.join(", "),
                    body: p.description.clone(),
                })
                .collect(),
        });
    }
    if chips_in_main && !data.skills.is_empty() {
        sections.push(BodySection {
            heading: "Skills",
            blocks: vec![BodyBlock::Chips(
                data.skills
                    .iter()
                    .map(|s| format!("{} ({})", placeholder(&s.name, "Skill"), s.level.as_str()))
                    .collect(),
            )],
        });
    }
    if chips_in_main && !data.certifications.is_empty() {
        sections.push(BodySection {
            heading: "Certifications",
            blocks: data
                .certifications
                .iter()
                .map(|c| BodyBlock::Item {
                    title: placeholder(&c.name, "Certification"),
                    subtitle: c.issuer.clone(),
                    meta: c.date.clone(),
                    body: String::new(),
                })
                .collect(),
        });
    }
    if chips_in_main && !data.languages.is_empty() {
        sections.push(BodySection {
            heading: "Languages",
            blocks: vec![BodyBlock::Chips(
                data.languages
                    .iter()
                    .map(|l| format!("{} - {}", placeholder(&l.name, "Language"), l.proficiency.as_str()))
                    .collect(),
            )],
        });
    }

    sections
}

/// Sidebar sections for the creative template, again omitting empty lists.
pub(crate) fn plan_sidebar(data: &CvData) -> Vec<(&'static str, Vec<String>)> {
    let mut sections = Vec::new();
    if !data.skills.is_empty() {
        sections.push((
            "Skills",
            data.skills
                .iter()
                .map(|s| placeholder(&s.name, "Skill"))
                .collect(),
        ));
    }
    if !data.languages.is_empty() {
        sections.push((
            "Languages",
            data.languages
                .iter()
                .map(|l| format!("{} - {}", placeholder(&l.name, "Language"), l.proficiency.as_str()))
                .collect(),
        ));
    }
    if !data.certifications.is_empty() {
        sections.push((
            "Certifications",
            data.certifications
                .iter()
                .map(|c| placeholder(&c.name, "Certification"))
                .collect(),
        ));
    }
    sections
}

fn placeholder(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Cursor-based page writer
// ────────────────────────────────────────────────────────────────────────────

struct PdfWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    metrics: &'static FontMetricTable,
    /// Baseline cursor, in mm from the page bottom.
    y: f32,
    /// Sidebar band color, redrawn on every page break (creative template).
    sidebar_band: Option<RgbTriple>,
}

impl PdfWriter {
    fn new(title: &str, family: FontFamily) -> Result<Self, AppError> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_W), Mm(PAGE_H), "Page 1");
        let (regular_font, bold_font) = match family {
            FontFamily::Helvetica => (BuiltinFont::Helvetica, BuiltinFont::HelveticaBold),
            FontFamily::TimesRoman => (BuiltinFont::TimesRoman, BuiltinFont::TimesBold),
        };
        let regular = doc
            .add_builtin_font(regular_font)
            .map_err(|e| AppError::Pdf(e.to_string()))?;
        let bold = doc
            .add_builtin_font(bold_font)
            .map_err(|e| AppError::Pdf(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(PdfWriter {
            doc,
            layer,
            regular,
            bold,
            metrics: get_metrics(family),
            y: PAGE_H - MARGIN,
            sidebar_band: None,
        })
    }

    fn line_height(size_pt: f32) -> f32 {
        size_pt * MM_PER_PT * 1.35
    }

    fn text_width_mm(&self, text: &str, size_pt: f32) -> f32 {
        self.metrics.measure_str(text) * size_pt * MM_PER_PT
    }

    fn break_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Page");
        self.layer = self.doc.get_page(page).get_layer(layer);
        if let Some(color) = self.sidebar_band {
            self.fill_rect(0.0, 0.0, SIDEBAR_W, PAGE_H, color);
        }
        self.y = PAGE_H - MARGIN;
    }

    /// Moves the cursor down one line of `size_pt`, breaking the page first
    /// when the line would land below the bottom margin.
    fn advance(&mut self, size_pt: f32) {
        let h = Self::line_height(size_pt);
        if self.y - h < MARGIN {
            self.break_page();
        }
        self.y -= h;
    }

    fn set_fill(&self, color: RgbTriple) {
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(color.0, color.1, color.2, None)));
    }

    fn font(&self, bold: bool) -> &IndirectFontRef {
        if bold {
            &self.bold
        } else {
            &self.regular
        }
    }

    /// Writes one line at `x`, advancing the cursor.
    fn line(&mut self, x: f32, size_pt: f32, bold: bool, color: RgbTriple, text: &str) {
        self.advance(size_pt);
        self.set_fill(color);
        self.layer
            .use_text(text, size_pt, Mm(x), Mm(self.y), self.font(bold));
    }

    /// Writes one line horizontally centered between the page margins.
    fn line_centered(&mut self, size_pt: f32, bold: bool, color: RgbTriple, text: &str) {
        let x = (PAGE_W - self.text_width_mm(text, size_pt)) / 2.0;
        self.line(x.max(MARGIN), size_pt, bold, color, text);
    }

    /// Writes a left item title and a right-aligned meta on one baseline.
    fn line_split(
        &mut self,
        x: f32,
        right_edge: f32,
        size_pt: f32,
        color: RgbTriple,
        left: &str,
        meta: &str,
    ) {
        self.advance(size_pt);
        self.set_fill(color);
        self.layer
            .use_text(left, size_pt, Mm(x), Mm(self.y), self.font(true));
        if !meta.is_empty() {
            let meta_size = size_pt - 1.5;
            let meta_x = right_edge - self.text_width_mm(meta, meta_size);
            self.set_fill(MUTED);
            self.layer
                .use_text(meta, meta_size, Mm(meta_x), Mm(self.y), self.font(false));
        }
    }

    /// Word-wraps `text` into the column `[x, x + width_mm]` and writes it.
    fn wrapped(&mut self, x: f32, width_mm: f32, size_pt: f32, bold: bool, color: RgbTriple, text: &str) {
        let max_em = max_line_em(width_mm, size_pt);
        for wrapped_line in self.metrics.wrap_words(text, max_em) {
            self.line(x, size_pt, bold, color, &wrapped_line);
        }
    }

    /// Like `wrapped`, but each line centered (classic header summary).
    fn wrapped_centered(&mut self, width_mm: f32, size_pt: f32, color: RgbTriple, text: &str) {
        let max_em = max_line_em(width_mm, size_pt);
        for wrapped_line in self.metrics.wrap_words(text, max_em) {
            self.line_centered(size_pt, false, color, &wrapped_line);
        }
    }

    fn gap(&mut self, mm: f32) {
        self.y = (self.y - mm).max(MARGIN);
    }

    fn rule(&mut self, x1: f32, x2: f32, color: RgbTriple, thickness_pt: f32) {
        self.layer
            .set_outline_color(Color::Rgb(Rgb::new(color.0, color.1, color.2, None)));
        self.layer.set_outline_thickness(thickness_pt);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(x1), Mm(self.y)), false),
                (Point::new(Mm(x2), Mm(self.y)), false),
            ],
            is_closed: false,
        });
        self.gap(2.5);
    }

    fn fill_rect(&self, x1: f32, y1: f32, x2: f32, y2: f32, color: RgbTriple) {
        self.set_fill(color);
        self.layer
            .add_rect(Rect::new(Mm(x1), Mm(y1), Mm(x2), Mm(y2)).with_mode(PaintMode::Fill));
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Template drawing
// ────────────────────────────────────────────────────────────────────────────

fn draw_modern(w: &mut PdfWriter, title: &str, data: &CvData) {
    let width = PAGE_W - 2.0 * MARGIN;

    w.line(MARGIN, 20.0, true, INK, &display_name(title, data));
    let contact = contact_line(data);
    if !contact.is_empty() {
        w.line(MARGIN, 9.0, false, MUTED, &contact);
    }
    if !data.personal_info.summary.is_empty() {
        w.gap(1.5);
        w.wrapped(MARGIN, width, 9.0, false, SLATE, &data.personal_info.summary);
    }
    w.gap(2.0);
    w.rule(MARGIN, PAGE_W - MARGIN, INDIGO, 1.5);
    w.gap(2.0);

    draw_body(w, &plan_body(data, true), MARGIN, width, INDIGO, false);
}

fn draw_classic(w: &mut PdfWriter, title: &str, data: &CvData) {
    let width = PAGE_W - 2.0 * MARGIN;

    w.line_centered(21.0, true, INK, &display_name(title, data).to_uppercase());
    let contact = contact_line(data);
    if !contact.is_empty() {
        w.line_centered(9.0, false, MUTED, &contact);
    }
    if !data.personal_info.summary.is_empty() {
        w.gap(1.5);
        w.wrapped_centered(width, 9.5, SLATE, &data.personal_info.summary);
    }
    w.gap(2.0);
    w.rule(MARGIN, PAGE_W - MARGIN, MUTED, 0.8);
    w.gap(2.0);

    draw_body(w, &plan_body(data, true), MARGIN, width, SLATE, true);
}

fn draw_creative(w: &mut PdfWriter, title: &str, data: &CvData) {
    w.sidebar_band = Some(TEAL);
    w.fill_rect(0.0, 0.0, SIDEBAR_W, PAGE_H, TEAL);

    // Sidebar column
    let sidebar_x = SIDEBAR_PAD;
    let sidebar_width = SIDEBAR_W - 2.0 * SIDEBAR_PAD;
    w.wrapped(sidebar_x, sidebar_width, 15.0, true, WHITE, &display_name(title, data));
    w.gap(2.0);
    for item in contact_items(data) {
        w.wrapped(sidebar_x, sidebar_width, 8.0, false, TEAL_LIGHT, &item);
    }
    for (heading, entries) in plan_sidebar(data) {
        w.gap(4.0);
        w.line(sidebar_x, 9.5, true, WHITE, &heading.to_uppercase());
        for entry in entries {
            w.wrapped(sidebar_x, sidebar_width, 8.5, false, TEAL_LIGHT, &entry);
        }
    }

    // Main column restarts at the top of the page.
    w.y = PAGE_H - MARGIN;
    let main_x = SIDEBAR_W + 10.0;
    let main_width = PAGE_W - main_x - MARGIN;

    w.gap(2.0);
    w.rule(main_x, main_x + 18.0, (0.08, 0.72, 0.65), 2.5);
    if !data.personal_info.summary.is_empty() {
        w.wrapped(main_x, main_width, 9.5, false, SLATE, &data.personal_info.summary);
        w.gap(3.0);
    }

    draw_body(w, &plan_body(data, false), main_x, main_width, TEAL, false);
}

fn draw_body(
    w: &mut PdfWriter,
    sections: &[BodySection],
    x: f32,
    width: f32,
    heading_color: RgbTriple,
    classic_layout: bool,
) {
    for section in sections {
        w.line(x, 11.0, true, heading_color, &section.heading.to_uppercase());
        if classic_layout {
            w.rule(x, x + width, (0.80, 0.84, 0.88), 0.8);
        }
        w.gap(1.0);

        for block in &section.blocks {
            match block {
                BodyBlock::Item {
                    title,
                    subtitle,
                    meta,
                    body,
                } => {
                    if classic_layout {
                        w.line_split(x, x + width, 10.0, INK, title, meta);
                    } else {
                        w.line(x, 10.0, true, INK, title);
                    }
                    if !subtitle.is_empty() {
                        w.line(x, 9.0, false, MUTED, subtitle);
                    }
                    if !classic_layout && !meta.is_empty() {
                        w.line(x, 8.5, false, MUTED, meta);
                    }
                    if !body.is_empty() {
                        w.wrapped(x, width, 9.0, false, SLATE, body);
                    }
                    w.gap(2.5);
                }
                BodyBlock::Chips(chips) => {
                    w.wrapped(x, width, 9.0, false, SLATE, &chips.join("  ·  "));
                    w.gap(2.0);
                }
            }
        }
        w.gap(2.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{sample_cv_data, SAMPLE_TITLE};

    #[test]
    fn test_plan_body_omits_empty_sections() {
        let mut data = sample_cv_data();
        data.projects.clear();
        data.education.clear();
        let headings: Vec<&str> = plan_body(&data, true).iter().map(|s| s.heading).collect();
        assert_eq!(
            headings,
            vec!["Experience", "Skills", "Certifications", "Languages"]
        );
    }

    #[test]
    fn test_plan_body_default_data_is_empty() {
        assert!(plan_body(&CvData::default(), true).is_empty());
        assert!(plan_sidebar(&CvData::default()).is_empty());
    }

    #[test]
    fn test_plan_body_creative_moves_chips_to_sidebar() {
        let data = sample_cv_data();
        let main: Vec<&str> = plan_body(&data, false).iter().map(|s| s.heading).collect();
        assert_eq!(main, vec!["Experience", "Education", "Projects"]);
        let sidebar: Vec<&str> = plan_sidebar(&data).iter().map(|(h, _)| *h).collect();
        assert_eq!(sidebar, vec!["Skills", "Languages", "Certifications"]);
    }

    #[test]
    fn test_render_produces_pdf_bytes_for_all_templates() {
        let data = sample_cv_data();
        for template_id in TemplateId::ALL {
            let bytes = render_pdf(SAMPLE_TITLE, &data, template_id).unwrap();
            assert!(
                bytes.starts_with(b"%PDF"),
                "{} output is not a PDF",
                template_id.as_str()
            );
            assert!(bytes.len() > 1_000);
        }
    }

    #[test]
    fn test_render_default_data_still_produces_document() {
        let bytes = render_pdf("Blank Resume", &CvData::default(), TemplateId::Modern).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_survives_very_long_descriptions() {
        let mut data = sample_cv_data();
        data.experience[0].description = "shipped and maintained systems ".repeat(400);
        let bytes = render_pdf(SAMPLE_TITLE, &data, TemplateId::Classic).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
