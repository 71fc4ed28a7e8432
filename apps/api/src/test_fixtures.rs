//! Shared sample data for unit tests across the rendering and editor modules.

use crate::models::cv::{
    Certification, CvData, Education, Experience, Language, LanguageProficiency, PersonalInfo,
    Project, Skill, SkillLevel,
};

pub const SAMPLE_TITLE: &str = "Senior Engineer Resume";

/// A filled-in CvData covering every section except custom sections.
pub fn sample_cv_data() -> CvData {
    CvData {
        personal_info: PersonalInfo {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "+44 20 7946 0958".into(),
            location: "London, UK".into(),
            linkedin: "linkedin.com/in/ada".into(),
            portfolio: "ada.dev".into(),
            summary: "Engineer focused on analytical machines and correct-by-construction software.".into(),
        },
        experience: vec![Experience {
            id: "exp-1".into(),
            company: "Analytical Engines Ltd".into(),
            position: "Principal Engineer".into(),
            start_date: "Jan 2023".into(),
            end_date: String::new(),
            current: true,
            description: "Leading the compute platform team and its punched-card pipeline.".into(),
        }],
        education: vec![Education {
            id: "edu-1".into(),
            institution: "University of London".into(),
            degree: "BSc".into(),
            field: "Mathematics".into(),
            start_date: "Sep 2014".into(),
            end_date: "Jun 2018".into(),
            current: false,
            description: String::new(),
        }],
        skills: vec![
            Skill {
                id: "skill-1".into(),
                name: "Rust".into(),
                level: SkillLevel::Expert,
            },
            Skill {
                id: "skill-2".into(),
                name: "Distributed Systems".into(),
                level: SkillLevel::Advanced,
            },
        ],
        projects: vec![Project {
            id: "proj-1".into(),
            name: "Difference Engine".into(),
            description: "Mechanical computer for polynomial tables.".into(),
            url: "github.com/ada/difference-engine".into(),
            technologies: vec!["brass".into(), "steam".into()],
        }],
        certifications: vec![Certification {
            id: "cert-1".into(),
            name: "Chartered Engineer".into(),
            issuer: "Royal Society".into(),
            date: "2021".into(),
            url: String::new(),
        }],
        languages: vec![
            Language {
                id: "lang-1".into(),
                name: "English".into(),
                proficiency: LanguageProficiency::Native,
            },
            Language {
                id: "lang-2".into(),
                name: "French".into(),
                proficiency: LanguageProficiency::Conversational,
            },
        ],
        custom_sections: Vec::new(),
    }
}
