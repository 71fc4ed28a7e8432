//! Formatting helpers shared by the preview and PDF renderers.

use crate::models::cv::CvData;

/// "first last" trimmed, falling back to the CV title.
pub fn display_name(title: &str, data: &CvData) -> String {
    let name = format!(
        "{} {}",
        data.personal_info.first_name, data.personal_info.last_name
    );
    let name = name.trim();
    if name.is_empty() {
        title.to_string()
    } else {
        name.to_string()
    }
}

/// The non-empty contact fields, in fixed order.
pub fn contact_items(data: &CvData) -> Vec<String> {
    [
        &data.personal_info.email,
        &data.personal_info.phone,
        &data.personal_info.location,
        &data.personal_info.linkedin,
        &data.personal_info.portfolio,
    ]
    .into_iter()
    .filter(|field| !field.is_empty())
    .cloned()
    .collect()
}

/// Contact fields joined into a single " | " separated line.
pub fn contact_line(data: &CvData) -> String {
    contact_items(data).join(" | ")
}

/// "start - end", with "Present" replacing the end date while current.
/// Empty parts are dropped entirely.
pub fn date_range(start: &str, end: &str, current: bool) -> String {
    let end = if current { "Present" } else { end };
    [start, end]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" - ")
}

/// "degree in field", tolerating either part missing; falls back to
/// "Education" when both are empty.
pub fn degree_line(degree: &str, field: &str) -> String {
    let joined = [degree, field]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" in ");
    if joined.is_empty() {
        "Education".to_string()
    } else {
        joined
    }
}

/// Download file name derived from the CV title: lowercased, non-alphanumeric
/// runs collapsed to "-", ".pdf" appended. A title with nothing usable
/// becomes "resume.pdf".
pub fn pdf_file_name(title: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;
    for c in title.trim().to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        "resume.pdf".to_string()
    } else {
        format!("{slug}.pdf")
    }
}
