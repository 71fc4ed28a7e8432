use serde::{Deserialize, Serialize};

/// The three fixed visual layouts applied to the same CV data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    #[default]
    Modern,
    Classic,
    Creative,
}

impl TemplateId {
    pub const ALL: [TemplateId; 3] = [TemplateId::Modern, TemplateId::Classic, TemplateId::Creative];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Modern => "modern",
            TemplateId::Classic => "classic",
            TemplateId::Creative => "creative",
        }
    }

    /// Parses a template id, falling back to `Modern` for anything unrecognized.
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "classic" => TemplateId::Classic,
            "creative" => TemplateId::Creative,
            _ => TemplateId::Modern,
        }
    }
}

/// Read-only catalog entry describing one template.
#[derive(Debug, Clone, Serialize)]
pub struct Template {
    pub id: TemplateId,
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub thumbnail: &'static str,
}

/// The fixed template catalog served by the templates endpoint.
pub const TEMPLATES: [Template; 3] = [
    Template {
        id: TemplateId::Modern,
        name: "Modern",
        description: "Clean and contemporary design with a professional look",
        category: "modern",
        thumbnail: "/templates/modern.png",
    },
    Template {
        id: TemplateId::Classic,
        name: "Classic",
        description: "Traditional layout perfect for corporate applications",
        category: "classic",
        thumbnail: "/templates/classic.png",
    },
    Template {
        id: TemplateId::Creative,
        name: "Creative",
        description: "Stand out with unique colors and creative layout",
        category: "creative",
        thumbnail: "/templates/creative.png",
    },
];
