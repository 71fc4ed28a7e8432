//! The CV record and its nested data payload.
//!
//! Every list item carries a stable string id used as the update/remove key.
//! Ids are opaque strings (v4 UUIDs for anything we generate), so records
//! imported from elsewhere keep their original keys through normalization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::template::TemplateId;

/// Generates a fresh opaque id for a CV or a list item.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

pub const DEFAULT_TITLE: &str = "Untitled Resume";

/// The user id assigned to CVs created without a signed-in session.
pub const LOCAL_USER_ID: &str = "local";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cv {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub template_id: TemplateId,
    pub data: CvData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cv {
    /// A fresh CV record with defaulted data and generated id/timestamps.
    /// A blank title falls back to [`DEFAULT_TITLE`].
    pub fn new(title: &str, template_id: TemplateId) -> Self {
        let now = Utc::now();
        let trimmed = title.trim();
        Cv {
            id: generate_id(),
            user_id: LOCAL_USER_ID.to_string(),
            title: if trimmed.is_empty() {
                DEFAULT_TITLE.to_string()
            } else {
                trimmed.to_string()
            },
            template_id,
            data: CvData::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvData {
    pub personal_info: PersonalInfo,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
    pub languages: Vec<Language>,
    pub custom_sections: Vec<CustomSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub portfolio: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub level: SkillLevel,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
            SkillLevel::Expert => "expert",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub url: String,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub id: String,
    pub name: String,
    pub proficiency: LanguageProficiency,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageProficiency {
    Basic,
    Conversational,
    #[default]
    Fluent,
    Native,
}

impl LanguageProficiency {
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageProficiency::Basic => "basic",
            LanguageProficiency::Conversational => "conversational",
            LanguageProficiency::Fluent => "fluent",
            LanguageProficiency::Native => "native",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomSection {
    pub id: String,
    pub title: String,
    pub items: Vec<CustomSectionItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomSectionItem {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub date: String,
}
