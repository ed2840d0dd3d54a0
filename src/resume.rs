use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ContextError;

/// The résumé collected by the wizard. It is only read during generation.
///
/// The wizard keeps the personal fields at the top level of its state, hence the flattening.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    #[serde(flatten)]
    pub personal: PersonalInformation,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInformation {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    /// A `#rrggbb` color, anything else falls back to the configured default.
    #[serde(default)]
    pub header_color: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    #[serde(default)]
    pub level: SkillLevel,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub enum SkillLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

impl std::fmt::Display for SkillLevel {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
            SkillLevel::Expert => "Expert",
        };
        write!(formatter, "{}", label)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
}

impl ExperienceEntry {
    /// `"{start} - {end}"`, where the end reads `Present` for a current position.
    pub fn date_range(&self) -> String {
        let end_date = if self.current {
            "Present"
        } else {
            self.end_date.as_str()
        };
        format!("{} - {}", self.start_date, end_date)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub points: Vec<String>,
}

impl ProjectEntry {
    pub fn date_range(&self) -> String {
        format!("{} - {}", self.start_date, self.end_date)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub gpa: Option<String>,
}

impl EducationEntry {
    /// The date range, followed by `" • GPA: {gpa}"` when a GPA was given.
    pub fn date_line(&self) -> String {
        let date_range = format!("{} - {}", self.start_date, self.end_date);
        match present(&self.gpa) {
            Some(gpa) => format!("{} • GPA: {}", date_range, gpa),
            None => date_range,
        }
    }
}

/// Returns the trimmed value of an optional field, treating blank strings as absent.
pub fn present(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

impl PersonalInformation {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// The labelled contact items in their fixed order, skipping the absent ones.
    pub fn contact_items(&self) -> Vec<String> {
        [
            ("Email", &self.email),
            ("Phone", &self.phone),
            ("Address", &self.address),
            ("LinkedIn", &self.linkedin),
            ("Website", &self.website),
        ]
        .into_iter()
        .filter_map(|(label, field)| present(field).map(|value| format!("{}: {}", label, value)))
        .collect()
    }
}

impl ResumeDocument {
    pub fn from_path(resume_path: &Path) -> Result<ResumeDocument, ContextError> {
        let resume_content = std::fs::read_to_string(resume_path).map_err(|error| {
            ContextError::with_error(format!("Unable to read the résumé {:?}", resume_path), &error)
        })?;

        ResumeDocument::from_json_str(&resume_content).map_err(|error| ContextError {
            context: format!("Unable to parse the résumé {:?}", resume_path),
            source_error: error.source_error,
        })
    }

    pub fn from_json_str(resume_content: &str) -> Result<ResumeDocument, ContextError> {
        serde_json::from_str(resume_content)
            .map_err(|error| ContextError::with_error("Unable to parse the résumé", &error))
    }

    /// Applies the acceptance rules of the wizard form. Generation itself never calls this, it is
    /// up to the caller to decide whether incomplete data may be rendered.
    pub fn validate(&self) -> Result<(), ContextError> {
        let mut violations = Vec::new();

        if self.personal.first_name.trim().is_empty() {
            violations.push("the first name is required".to_string());
        }
        if self.personal.last_name.trim().is_empty() {
            violations.push("the last name is required".to_string());
        }
        if present(&self.personal.email).is_none() {
            violations.push("the email is required".to_string());
        }
        for (index, skill) in self.skills.iter().enumerate() {
            if skill.name.trim().is_empty() {
                violations.push(format!("skill {} has no name", index + 1));
            }
        }
        for (index, experience) in self.experience.iter().enumerate() {
            if experience.company.trim().is_empty() || experience.position.trim().is_empty() {
                violations.push(format!(
                    "experience {} needs both a company and a position",
                    index + 1
                ));
            }
            for (project_index, project) in experience.projects.iter().enumerate() {
                if project.name.trim().is_empty() {
                    violations.push(format!(
                        "project {} of experience {} has no name",
                        project_index + 1,
                        index + 1
                    ));
                }
            }
        }
        for (index, education) in self.education.iter().enumerate() {
            if education.institution.trim().is_empty() || education.degree.trim().is_empty() {
                violations.push(format!(
                    "education {} needs both an institution and a degree",
                    index + 1
                ));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ContextError {
                context: "The résumé is incomplete".into(),
                source_error: Some(violations.join(", ")),
            })
        }
    }
}
