//! Coercion of arbitrary stored JSON into a fully valid CV shape.
//!
//! Anything can be in the storage file: hand-edited records, output of an
//! older schema, plain garbage. Every field is individually type-checked and
//! falls back to its default; list entries that are not objects are dropped;
//! unrecognized enum values fall back to the defined default. Normalizing
//! already-valid data returns an equal structure.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::models::cv::{
    generate_id, Certification, CustomSection, CustomSectionItem, Cv, CvData, Education,
    Experience, Language, LanguageProficiency, PersonalInfo, Project, Skill, SkillLevel,
    DEFAULT_TITLE, LOCAL_USER_ID,
};
use crate::models::template::TemplateId;

fn get_string(value: Option<&Value>) -> String {
    value.and_then(Value::as_str).unwrap_or_default().to_string()
}

fn get_string_or(value: Option<&Value>, fallback: &str) -> String {
    match value.and_then(Value::as_str) {
        Some(s) => s.to_string(),
        None => fallback.to_string(),
    }
}

fn get_bool(value: Option<&Value>) -> bool {
    value.and_then(Value::as_bool).unwrap_or(false)
}

/// Returns the stored item id, or a generated one when missing/non-string.
fn get_id(value: Option<&Value>) -> String {
    match value.and_then(Value::as_str) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => generate_id(),
    }
}

fn get_timestamp(value: Option<&Value>, fallback: DateTime<Utc>) -> DateTime<Utc> {
    value
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(fallback)
}

/// Maps each object entry of an array field, dropping everything else.
fn map_objects<T>(value: Option<&Value>, f: impl Fn(&Value) -> T) -> Vec<T> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter(|v| v.is_object()).map(&f).collect())
        .unwrap_or_default()
}

fn normalize_skill_level(value: Option<&Value>) -> SkillLevel {
    match value.and_then(Value::as_str) {
        Some("beginner") => SkillLevel::Beginner,
        Some("intermediate") => SkillLevel::Intermediate,
        Some("advanced") => SkillLevel::Advanced,
        Some("expert") => SkillLevel::Expert,
        _ => SkillLevel::default(),
    }
}

fn normalize_proficiency(value: Option<&Value>) -> LanguageProficiency {
    match value.and_then(Value::as_str) {
        Some("basic") => LanguageProficiency::Basic,
        Some("conversational") => LanguageProficiency::Conversational,
        Some("fluent") => LanguageProficiency::Fluent,
        Some("native") => LanguageProficiency::Native,
        _ => LanguageProficiency::default(),
    }
}

/// Coerces arbitrary JSON into a structurally valid `CvData`.
pub fn normalize_cv_data(value: &Value) -> CvData {
    let Some(obj) = value.as_object() else {
        return CvData::default();
    };

    let personal = obj
        .get("personalInfo")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    CvData {
        personal_info: PersonalInfo {
            first_name: get_string(personal.get("firstName")),
            last_name: get_string(personal.get("lastName")),
            email: get_string(personal.get("email")),
            phone: get_string(personal.get("phone")),
            location: get_string(personal.get("location")),
            linkedin: get_string(personal.get("linkedin")),
            portfolio: get_string(personal.get("portfolio")),
            summary: get_string(personal.get("summary")),
        },
        experience: map_objects(obj.get("experience"), |v| Experience {
            id: get_id(v.get("id")),
            company: get_string(v.get("company")),
            position: get_string(v.get("position")),
            start_date: get_string(v.get("startDate")),
            end_date: get_string(v.get("endDate")),
            current: get_bool(v.get("current")),
            description: get_string(v.get("description")),
        }),
        education: map_objects(obj.get("education"), |v| Education {
            id: get_id(v.get("id")),
            institution: get_string(v.get("institution")),
            degree: get_string(v.get("degree")),
            field: get_string(v.get("field")),
            start_date: get_string(v.get("startDate")),
            end_date: get_string(v.get("endDate")),
            current: get_bool(v.get("current")),
            description: get_string(v.get("description")),
        }),
        skills: map_objects(obj.get("skills"), |v| Skill {
            id: get_id(v.get("id")),
            name: get_string(v.get("name")),
            level: normalize_skill_level(v.get("level")),
        }),
        projects: map_objects(obj.get("projects"), |v| Project {
            id: get_id(v.get("id")),
            name: get_string(v.get("name")),
            description: get_string(v.get("description")),
            url: get_string(v.get("url")),
            technologies: v
                .get("technologies")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        }),
        certifications: map_objects(obj.get("certifications"), |v| Certification {
            id: get_id(v.get("id")),
            name: get_string(v.get("name")),
            issuer: get_string(v.get("issuer")),
            date: get_string(v.get("date")),
            url: get_string(v.get("url")),
        }),
        languages: map_objects(obj.get("languages"), |v| Language {
            id: get_id(v.get("id")),
            name: get_string(v.get("name")),
            proficiency: normalize_proficiency(v.get("proficiency")),
        }),
        custom_sections: map_objects(obj.get("customSections"), |v| CustomSection {
            id: get_id(v.get("id")),
            title: get_string(v.get("title")),
            items: map_objects(v.get("items"), |item| CustomSectionItem {
                id: get_id(item.get("id")),
                title: get_string(item.get("title")),
                subtitle: get_string(item.get("subtitle")),
                description: get_string(item.get("description")),
                date: get_string(item.get("date")),
            }),
        }),
    }
}

/// Coerces one stored element into a `Cv` record.
///
/// Records without a non-empty string id are unrecoverable and dropped.
pub fn normalize_cv(value: &Value) -> Option<Cv> {
    let obj = value.as_object()?;

    let id = obj.get("id").and_then(Value::as_str)?.to_string();
    if id.is_empty() {
        return None;
    }

    let now = Utc::now();
    let template_id =
        TemplateId::parse_or_default(obj.get("templateId").and_then(Value::as_str).unwrap_or(""));

    Some(Cv {
        id,
        user_id: get_string_or(obj.get("userId"), LOCAL_USER_ID),
        title: get_string_or(obj.get("title"), DEFAULT_TITLE),
        template_id,
        data: normalize_cv_data(obj.get("data").unwrap_or(&Value::Null)),
        created_at: get_timestamp(obj.get("createdAt"), now),
        updated_at: get_timestamp(obj.get("updatedAt"), now),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_object_yields_all_defaults() {
        let data = normalize_cv_data(&json!({}));
        assert_eq!(data, CvData::default());
    }

    #[test]
    fn test_non_object_yields_all_defaults() {
        assert_eq!(normalize_cv_data(&json!(null)), CvData::default());
        assert_eq!(normalize_cv_data(&json!([1, 2])), CvData::default());
        assert_eq!(normalize_cv_data(&json!("resume")), CvData::default());
    }

    #[test]
    fn test_wrong_field_types_fall_back() {
        let data = normalize_cv_data(&json!({
            "personalInfo": { "firstName": 42, "lastName": ["x"], "email": "a@b.c" },
            "experience": "not-an-array",
            "skills": [{ "id": "s1", "name": "Rust", "level": 7 }],
        }));
        assert_eq!(data.personal_info.first_name, "");
        assert_eq!(data.personal_info.last_name, "");
        assert_eq!(data.personal_info.email, "a@b.c");
        assert!(data.experience.is_empty());
        assert_eq!(data.skills[0].level, SkillLevel::Intermediate);
    }

    #[test]
    fn test_non_object_list_entries_dropped() {
        let data = normalize_cv_data(&json!({
            "experience": [{ "id": "e1", "company": "Acme" }, "junk", 3, null],
        }));
        assert_eq!(data.experience.len(), 1);
        assert_eq!(data.experience[0].company, "Acme");
    }

    #[test]
    fn test_unknown_enum_values_fall_back() {
        let data = normalize_cv_data(&json!({
            "skills": [{ "id": "s1", "name": "Rust", "level": "wizard" }],
            "languages": [{ "id": "l1", "name": "English", "proficiency": "telepathic" }],
        }));
        assert_eq!(data.skills[0].level, SkillLevel::Intermediate);
        assert_eq!(data.languages[0].proficiency, LanguageProficiency::Fluent);
    }

    #[test]
    fn test_missing_item_id_is_generated() {
        let data = normalize_cv_data(&json!({
            "projects": [{ "name": "Forge" }],
        }));
        assert!(!data.projects[0].id.is_empty());
    }

    #[test]
    fn test_technologies_filters_non_strings() {
        let data = normalize_cv_data(&json!({
            "projects": [{ "id": "p1", "technologies": ["Rust", 9, null, "Axum"] }],
        }));
        assert_eq!(data.projects[0].technologies, vec!["Rust", "Axum"]);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let data = normalize_cv_data(&json!({
            "personalInfo": { "firstName": "Ada", "lastName": "Lovelace" },
            "experience": [{
                "id": "exp-1", "company": "Analytical Engines Ltd",
                "position": "Lead Engineer", "startDate": "Jan 2023",
                "endDate": "", "current": true, "description": "Led delivery."
            }],
            "skills": [{ "id": "s1", "name": "Rust", "level": "expert" }],
            "languages": [{ "id": "l1", "name": "English", "proficiency": "native" }],
        }));
        let roundtripped = normalize_cv_data(&serde_json::to_value(&data).unwrap());
        assert_eq!(data, roundtripped);
    }

    #[test]
    fn test_normalize_cv_requires_id() {
        assert!(normalize_cv(&json!({ "title": "No id" })).is_none());
        assert!(normalize_cv(&json!({ "id": "" })).is_none());
        assert!(normalize_cv(&json!("junk")).is_none());
    }

    #[test]
    fn test_normalize_cv_defaults_metadata() {
        let cv = normalize_cv(&json!({ "id": "cv-1" })).unwrap();
        assert_eq!(cv.user_id, "local");
        assert_eq!(cv.title, "Untitled Resume");
        assert_eq!(cv.template_id, TemplateId::Modern);
        assert_eq!(cv.data, CvData::default());
    }

    #[test]
    fn test_normalize_cv_parses_timestamps() {
        let cv = normalize_cv(&json!({
            "id": "cv-1",
            "createdAt": "2025-03-01T10:00:00Z",
            "updatedAt": "not-a-date",
        }))
        .unwrap();
        assert_eq!(cv.created_at.to_rfc3339(), "2025-03-01T10:00:00+00:00");
        // malformed updatedAt falls back to now, which is after createdAt
        assert!(cv.updated_at >= cv.created_at);
    }

    #[test]
    fn test_unknown_template_falls_back_to_modern() {
        let cv = normalize_cv(&json!({ "id": "cv-1", "templateId": "brutalist" })).unwrap();
        assert_eq!(cv.template_id, TemplateId::Modern);
    }
}
