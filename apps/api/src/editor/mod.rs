//! Editor operations over the CV data payload.
//!
//! The editor exposes seven fixed sections. Each incoming [`EditCommand`]
//! targets one of them and produces a new `CvData` by structural copy:
//! updates are a map-and-replace by item id, removals a filter by id, and a
//! command naming an absent id is a no-op.

pub mod autosave;
pub mod handlers;

use serde::{Deserialize, Serialize};

use crate::models::cv::{
    generate_id, Certification, CvData, Education, Experience, Language, LanguageProficiency,
    Project, Skill, SkillLevel,
};

/// The seven fixed editor sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Personal,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Languages,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Personal,
        Section::Experience,
        Section::Education,
        Section::Skills,
        Section::Projects,
        Section::Certifications,
        Section::Languages,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Personal => "Personal Info",
            Section::Experience => "Experience",
            Section::Education => "Education",
            Section::Skills => "Skills",
            Section::Projects => "Projects",
            Section::Certifications => "Certifications",
            Section::Languages => "Languages",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalField {
    FirstName,
    LastName,
    Email,
    Phone,
    Location,
    Linkedin,
    Portfolio,
    Summary,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperiencePatch {
    pub company: Option<String>,
    pub position: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationPatch {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub field: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillPatch {
    pub name: Option<String>,
    pub level: Option<SkillLevel>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub technologies: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificationPatch {
    pub name: Option<String>,
    pub issuer: Option<String>,
    pub date: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LanguagePatch {
    pub name: Option<String>,
    pub proficiency: Option<LanguageProficiency>,
}

/// A single editor mutation, tagged by operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditCommand {
    SetPersonalField {
        field: PersonalField,
        value: String,
    },
    AddExperience,
    UpdateExperience {
        id: String,
        #[serde(default)]
        patch: ExperiencePatch,
    },
    RemoveExperience {
        id: String,
    },
    AddEducation,
    UpdateEducation {
        id: String,
        #[serde(default)]
        patch: EducationPatch,
    },
    RemoveEducation {
        id: String,
    },
    AddSkill,
    UpdateSkill {
        id: String,
        #[serde(default)]
        patch: SkillPatch,
    },
    RemoveSkill {
        id: String,
    },
    AddProject,
    UpdateProject {
        id: String,
        #[serde(default)]
        patch: ProjectPatch,
    },
    RemoveProject {
        id: String,
    },
    AddCertification,
    UpdateCertification {
        id: String,
        #[serde(default)]
        patch: CertificationPatch,
    },
    RemoveCertification {
        id: String,
    },
    AddLanguage,
    UpdateLanguage {
        id: String,
        #[serde(default)]
        patch: LanguagePatch,
    },
    RemoveLanguage {
        id: String,
    },
}

impl EditCommand {
    /// The editor section this command belongs to.
    pub fn section(&self) -> Section {
        use EditCommand::*;
        match self {
            SetPersonalField { .. } => Section::Personal,
            AddExperience | UpdateExperience { .. } | RemoveExperience { .. } => {
                Section::Experience
            }
            AddEducation | UpdateEducation { .. } | RemoveEducation { .. } => Section::Education,
            AddSkill | UpdateSkill { .. } | RemoveSkill { .. } => Section::Skills,
            AddProject | UpdateProject { .. } | RemoveProject { .. } => Section::Projects,
            AddCertification | UpdateCertification { .. } | RemoveCertification { .. } => {
                Section::Certifications
            }
            AddLanguage | UpdateLanguage { .. } | RemoveLanguage { .. } => Section::Languages,
        }
    }

    /// Applies the command, returning a new data payload.
    pub fn apply(&self, data: &CvData) -> CvData {
        let mut next = data.clone();
        match self {
            EditCommand::SetPersonalField { field, value } => {
                let info = &mut next.personal_info;
                let slot = match field {
                    PersonalField::FirstName => &mut info.first_name,
                    PersonalField::LastName => &mut info.last_name,
                    PersonalField::Email => &mut info.email,
                    PersonalField::Phone => &mut info.phone,
                    PersonalField::Location => &mut info.location,
                    PersonalField::Linkedin => &mut info.linkedin,
                    PersonalField::Portfolio => &mut info.portfolio,
                    PersonalField::Summary => &mut info.summary,
                };
                *slot = value.clone();
            }
            EditCommand::AddExperience => next.experience.push(Experience {
                id: generate_id(),
                ..Experience::default()
            }),
            EditCommand::UpdateExperience { id, patch } => {
                update_by_id(&mut next.experience, id, |e| e.id.as_str(), |entry| {
                    apply_opt(&mut entry.company, &patch.company);
                    apply_opt(&mut entry.position, &patch.position);
                    apply_opt(&mut entry.start_date, &patch.start_date);
                    apply_opt(&mut entry.end_date, &patch.end_date);
                    apply_opt(&mut entry.current, &patch.current);
                    apply_opt(&mut entry.description, &patch.description);
                });
            }
            EditCommand::RemoveExperience { id } => next.experience.retain(|e| &e.id != id),
            EditCommand::AddEducation => next.education.push(Education {
                id: generate_id(),
                ..Education::default()
            }),
            EditCommand::UpdateEducation { id, patch } => {
                update_by_id(&mut next.education, id, |e| e.id.as_str(), |entry| {
                    apply_opt(&mut entry.institution, &patch.institution);
                    apply_opt(&mut entry.degree, &patch.degree);
                    apply_opt(&mut entry.field, &patch.field);
                    apply_opt(&mut entry.start_date, &patch.start_date);
                    apply_opt(&mut entry.end_date, &patch.end_date);
                    apply_opt(&mut entry.current, &patch.current);
                    apply_opt(&mut entry.description, &patch.description);
                });
            }
            EditCommand::RemoveEducation { id } => next.education.retain(|e| &e.id != id),
            EditCommand::AddSkill => next.skills.push(Skill {
                id: generate_id(),
                ..Skill::default()
            }),
            EditCommand::UpdateSkill { id, patch } => {
                update_by_id(&mut next.skills, id, |s| s.id.as_str(), |entry| {
                    apply_opt(&mut entry.name, &patch.name);
                    apply_opt(&mut entry.level, &patch.level);
                });
            }
            EditCommand::RemoveSkill { id } => next.skills.retain(|s| &s.id != id),
            EditCommand::AddProject => next.projects.push(Project {
                id: generate_id(),
                ..Project::default()
            }),
            EditCommand::UpdateProject { id, patch } => {
                update_by_id(&mut next.projects, id, |p| p.id.as_str(), |entry| {
                    apply_opt(&mut entry.name, &patch.name);
                    apply_opt(&mut entry.description, &patch.description);
                    apply_opt(&mut entry.url, &patch.url);
                    apply_opt(&mut entry.technologies, &patch.technologies);
                });
            }
            EditCommand::RemoveProject { id } => next.projects.retain(|p| &p.id != id),
            EditCommand::AddCertification => next.certifications.push(Certification {
                id: generate_id(),
                ..Certification::default()
            }),
            EditCommand::UpdateCertification { id, patch } => {
                update_by_id(&mut next.certifications, id, |c| c.id.as_str(), |entry| {
                    apply_opt(&mut entry.name, &patch.name);
                    apply_opt(&mut entry.issuer, &patch.issuer);
                    apply_opt(&mut entry.date, &patch.date);
                    apply_opt(&mut entry.url, &patch.url);
                });
            }
            EditCommand::RemoveCertification { id } => {
                next.certifications.retain(|c| &c.id != id)
            }
            EditCommand::AddLanguage => next.languages.push(Language {
                id: generate_id(),
                ..Language::default()
            }),
            EditCommand::UpdateLanguage { id, patch } => {
                update_by_id(&mut next.languages, id, |l| l.id.as_str(), |entry| {
                    apply_opt(&mut entry.name, &patch.name);
                    apply_opt(&mut entry.proficiency, &patch.proficiency);
                });
            }
            EditCommand::RemoveLanguage { id } => next.languages.retain(|l| &l.id != id),
        }
        next
    }
}

fn apply_opt<T: Clone>(slot: &mut T, patch: &Option<T>) {
    if let Some(value) = patch {
        *slot = value.clone();
    }
}

fn update_by_id<T>(
    items: &mut [T],
    id: &str,
    key: impl Fn(&T) -> &str,
    apply: impl FnOnce(&mut T),
) {
    if let Some(entry) = items.iter_mut().find(|item| key(item) == id) {
        apply(entry);
    }
}
