//! HTML live-preview renderer.
//!
//! Produces one self-contained HTML document per template. The creative
//! layout moves contact, skills, languages, and certifications into a
//! sidebar; modern and classic keep everything in the main column. Sections
//! with zero items are omitted entirely.

use crate::models::cv::CvData;
use crate::models::template::TemplateId;
use crate::render::format::{contact_items, date_range, degree_line, display_name};

/// Renders the live preview document for one template.
pub fn render_preview(title: &str, data: &CvData, template_id: TemplateId) -> String {
    let body = match template_id {
        TemplateId::Modern => modern_body(title, data),
        TemplateId::Classic => classic_body(title, data),
        TemplateId::Creative => creative_body(title, data),
    };

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n<body class=\"{}\">\n{}</body>\n</html>\n",
        escape(title),
        PREVIEW_CSS,
        template_id.as_str(),
        body
    )
}

fn modern_body(title: &str, data: &CvData) -> String {
    let mut out = String::from("<div class=\"resume modern\">\n");
    out.push_str("<header class=\"header\">\n");
    out.push_str(&format!("<h1>{}</h1>\n", escape(&display_name(title, data))));
    let contact = contact_items(data);
    if !contact.is_empty() {
        out.push_str(&format!(
            "<p class=\"contact\">{}</p>\n",
            escape(&contact.join(" | "))
        ));
    }
    if !data.personal_info.summary.is_empty() {
        out.push_str(&format!(
            "<p class=\"summary\">{}</p>\n",
            escape(&data.personal_info.summary)
        ));
    }
    out.push_str("</header>\n");
    push_main_sections(&mut out, data, &SectionVisibility::all());
    out.push_str("</div>\n");
    out
}

fn classic_body(title: &str, data: &CvData) -> String {
    let mut out = String::from("<div class=\"resume classic\">\n");
    out.push_str("<header class=\"header centered\">\n");
    out.push_str(&format!("<h1>{}</h1>\n", escape(&display_name(title, data))));
    let contact = contact_items(data);
    if !contact.is_empty() {
        out.push_str(&format!(
            "<p class=\"contact\">{}</p>\n",
            escape(&contact.join(" | "))
        ));
    }
    if !data.personal_info.summary.is_empty() {
        out.push_str(&format!(
            "<p class=\"summary\">{}</p>\n",
            escape(&data.personal_info.summary)
        ));
    }
    out.push_str("<hr class=\"rule\">\n</header>\n");
    push_main_sections(&mut out, data, &SectionVisibility::all());
    out.push_str("</div>\n");
    out
}

fn creative_body(title: &str, data: &CvData) -> String {
    let mut out = String::from("<div class=\"resume creative\">\n<aside class=\"sidebar\">\n");
    out.push_str(&format!("<h1>{}</h1>\n", escape(&display_name(title, data))));
    for item in contact_items(data) {
        out.push_str(&format!("<p class=\"contact\">{}</p>\n", escape(&item)));
    }
    if !data.skills.is_empty() {
        out.push_str("<h2 class=\"section-title\">Skills</h2>\n");
        for skill in &data.skills {
            out.push_str(&format!("<p>{}</p>\n", escape(or_placeholder(&skill.name, "Skill"))));
        }
    }
    if !data.languages.is_empty() {
        out.push_str("<h2 class=\"section-title\">Languages</h2>\n");
        for language in &data.languages {
            out.push_str(&format!(
                "<p>{} - {}</p>\n",
                escape(or_placeholder(&language.name, "Language")),
                language.proficiency.as_str()
            ));
        }
    }
    if !data.certifications.is_empty() {
        out.push_str("<h2 class=\"section-title\">Certifications</h2>\n");
        for certification in &data.certifications {
            out.push_str(&format!(
                "<p>{}</p>\n",
                escape(or_placeholder(&certification.name, "Certification"))
            ));
        }
    }
    out.push_str("</aside>\n<div class=\"main\">\n");
    if !data.personal_info.summary.is_empty() {
        out.push_str(&format!(
            "<p class=\"summary\">{}</p>\n",
            escape(&data.personal_info.summary)
        ));
    }
    push_main_sections(
        &mut out,
        data,
        &SectionVisibility {
            skills: false,
            languages: false,
            certifications: false,
        },
    );
    out.push_str("</div>\n</div>\n");
    out
}

/// Which of the chip/list sections the main column shows. The creative
/// sidebar claims skills, languages, and certifications for itself.
struct SectionVisibility {
    skills: bool,
    languages: bool,
    certifications: bool,
}

impl SectionVisibility {
    fn all() -> Self {
        SectionVisibility {
            skills: true,
            languages: true,
            certifications: true,
        }
    }
}

struct SectionItem {
    title: String,
    subtitle: String,
    meta: String,
    body: String,
}

fn push_main_sections(out: &mut String, data: &CvData, visible: &SectionVisibility) {
    let experience: Vec<SectionItem> = data
        .experience
        .iter()
        .map(|e| SectionItem {
            title: or_placeholder(&e.position, "Role").to_string(),
            subtitle: e.company.clone(),
            meta: date_range(&e.start_date, &e.end_date, e.current),
            body: e.description.clone(),
        })
        .collect();
    let education: Vec<SectionItem> = data
        .education
        .iter()
        .map(|e| SectionItem {
            title: degree_line(&e.degree, &e.field),
            subtitle: e.institution.clone(),
            meta: date_range(&e.start_date, &e.end_date, e.current),
            body: e.description.clone(),
        })
        .collect();
    let projects: Vec<SectionItem> = data
        .projects
        .iter()
        .map(|p| SectionItem {
            title: or_placeholder(&p.name, "Project").to_string(),
            subtitle: p.url.clone(),
            meta: p.technologies.join(", "),
            body: p.description.clone(),
        })
        .collect();
    let certifications: Vec<SectionItem> = data
        .certifications
        .iter()
        .map(|c| SectionItem {
            title: or_placeholder(&c.name, "Certification").to_string(),
            subtitle: c.issuer.clone(),
            meta: c.date.clone(),
            body: String::new(),
        })
        .collect();

    push_item_section(out, "Experience", &experience);
    push_item_section(out, "Education", &education);
    push_item_section(out, "Projects", &projects);
    if visible.certifications {
        push_item_section(out, "Certifications", &certifications);
    }
    if visible.skills && !data.skills.is_empty() {
        let chips: Vec<String> = data
            .skills
            .iter()
            .map(|s| format!("{} ({})", or_placeholder(&s.name, "Skill"), s.level.as_str()))
            .collect();
        push_chip_section(out, "Skills", &chips);
    }
    if visible.languages && !data.languages.is_empty() {
        let chips: Vec<String> = data
            .languages
            .iter()
            .map(|l| {
                format!(
                    "{} - {}",
                    or_placeholder(&l.name, "Language"),
                    l.proficiency.as_str()
                )
            })
            .collect();
        push_chip_section(out, "Languages", &chips);
    }
}

fn push_item_section(out: &mut String, heading: &str, items: &[SectionItem]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!(
        "<section class=\"section\">\n<h2 class=\"section-title\">{heading}</h2>\n"
    ));
    for item in items {
        out.push_str("<div class=\"item\">\n");
        out.push_str(&format!("<p class=\"item-title\">{}</p>\n", escape(&item.title)));
        if !item.subtitle.is_empty() {
            out.push_str(&format!(
                "<p class=\"item-subtitle\">{}</p>\n",
                escape(&item.subtitle)
            ));
        }
        if !item.meta.is_empty() {
            out.push_str(&format!("<p class=\"item-meta\">{}</p>\n", escape(&item.meta)));
        }
        if !item.body.is_empty() {
            out.push_str(&format!("<p class=\"item-body\">{}</p>\n", escape(&item.body)));
        }
        out.push_str("</div>\n");
    }
    out.push_str("</section>\n");
}

fn push_chip_section(out: &mut String, heading: &str, chips: &[String]) {
    out.push_str(&format!(
        "<section class=\"section\">\n<h2 class=\"section-title\">{heading}</h2>\n<div class=\"chips\">\n"
    ));
    for chip in chips {
        out.push_str(&format!("<span class=\"chip\">{}</span>\n", escape(chip)));
    }
    out.push_str("</div>\n</section>\n");
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const PREVIEW_CSS: &str = r#"
body { margin: 0; font-family: Helvetica, Arial, sans-serif; color: #0f172a; }
.resume { max-width: 760px; margin: 0 auto; padding: 24px; background: #ffffff; }
.header { padding-bottom: 12px; margin-bottom: 16px; }
.header h1 { margin: 0 0 4px; font-size: 24px; }
.contact { color: #475569; font-size: 12px; margin: 2px 0; }
.summary { color: #334155; font-size: 13px; line-height: 1.5; }
.section { margin-bottom: 16px; }
.section-title { font-size: 12px; text-transform: uppercase; letter-spacing: 0.2em; margin: 0 0 6px; }
.item { margin-bottom: 10px; }
.item-title { font-weight: 600; font-size: 13px; margin: 0; }
.item-subtitle { color: #475569; font-size: 12px; margin: 1px 0; }
.item-meta { color: #64748b; font-size: 11px; margin: 1px 0; }
.item-body { color: #334155; font-size: 12px; line-height: 1.45; margin: 3px 0 0; }
.chips { display: flex; flex-wrap: wrap; gap: 6px; }
.chip { font-size: 11px; padding: 2px 8px; border-radius: 999px; }
.modern .header { border-bottom: 2px solid #4f46e5; }
.modern .section-title { color: #3730a3; }
.modern .chip { background: #e0e7ff; color: #3730a3; }
.classic { font-family: "Times New Roman", Times, serif; background: #fdfcf9; }
.classic .header.centered { text-align: center; }
.classic .header h1 { text-transform: uppercase; letter-spacing: 0.2em; }
.classic .rule { border: none; border-top: 1px solid #94a3b8; }
.classic .section-title { color: #334155; border-bottom: 1px solid #cbd5e1; padding-bottom: 2px; }
.classic .chip { border: 1px solid #cbd5e1; border-radius: 2px; color: #334155; }
.creative { display: grid; grid-template-columns: 180px 1fr; padding: 0; }
.creative .sidebar { background: #0f766e; color: #ffffff; padding: 24px 16px; }
.creative .sidebar h1 { font-size: 20px; margin: 0 0 10px; }
.creative .sidebar .contact { color: #ccfbf1; }
.creative .sidebar .section-title { color: #ffffff; margin-top: 16px; }
.creative .sidebar p { color: #ccfbf1; font-size: 12px; margin: 3px 0; }
.creative .main { padding: 24px; }
.creative .main .section-title { color: #0f766e; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{sample_cv_data, SAMPLE_TITLE};

    #[test]
    fn test_all_templates_render_full_fixture() {
        let data = sample_cv_data();
        for template_id in TemplateId::ALL {
            let html = render_preview(SAMPLE_TITLE, &data, template_id);
            assert!(html.starts_with("<!DOCTYPE html>"));
            assert!(html.contains("Ada Lovelace"));
            for heading in ["Experience", "Education", "Projects", "Certifications", "Skills", "Languages"] {
                assert!(
                    html.contains(&format!(">{heading}</h2>")),
                    "{} preview must include the {heading} section",
                    template_id.as_str()
                );
            }
        }
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let mut data = sample_cv_data();
        data.projects.clear();
        data.languages.clear();
        for template_id in TemplateId::ALL {
            let html = render_preview(SAMPLE_TITLE, &data, template_id);
            assert!(!html.contains(">Projects</h2>"), "{}", template_id.as_str());
            assert!(!html.contains(">Languages</h2>"), "{}", template_id.as_str());
            assert!(html.contains(">Experience</h2>"), "{}", template_id.as_str());
        }
    }

    #[test]
    fn test_default_data_renders_title_only_header() {
        let html = render_preview("Blank Resume", &CvData::default(), TemplateId::Modern);
        assert!(html.contains("Blank Resume"));
        assert!(!html.contains("class=\"section\""));
    }

    #[test]
    fn test_creative_sidebar_claims_chip_sections() {
        let html = render_preview(SAMPLE_TITLE, &sample_cv_data(), TemplateId::Creative);
        let sidebar_end = html.find("</aside>").unwrap();
        let sidebar = &html[..sidebar_end];
        assert!(sidebar.contains(">Skills</h2>"));
        assert!(sidebar.contains(">Languages</h2>"));
        assert!(sidebar.contains(">Certifications</h2>"));
        // and the main column does not repeat them
        let main = &html[sidebar_end..];
        assert!(!main.contains(">Skills</h2>"));
        assert!(!main.contains(">Certifications</h2>"));
    }

    #[test]
    fn test_html_is_escaped() {
        let mut data = CvData::default();
        data.personal_info.summary = "<script>alert(1)</script> & more".to_string();
        let html = render_preview("Resume", &data, TemplateId::Modern);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&amp; more"));
    }

    #[test]
    fn test_date_range_present_marker_shows() {
        let html = render_preview(SAMPLE_TITLE, &sample_cv_data(), TemplateId::Classic);
        assert!(html.contains("Jan 2023 - Present"));
    }
}
