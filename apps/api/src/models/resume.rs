use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;

/// Wire form of a résumé submission.
///
/// Every field is optional here so that missing identity fields are reported by
/// `validate` with a field-level message instead of a generic JSON rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumePayload {
    #[serde(alias = "full_name")]
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub summary: Option<String>,
    pub skills: Option<String>,
    pub experience: Option<Vec<ExperienceEntry>>,
    pub education: Option<Vec<EducationEntry>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub role: String,
    pub company: String,
    pub description: String,
}

impl ExperienceEntry {
    pub fn is_blank(&self) -> bool {
        self.role.trim().is_empty()
            && self.company.trim().is_empty()
            && self.description.trim().is_empty()
    }

    /// "role at company", or whichever half is present.
    pub fn title(&self) -> String {
        match (self.role.trim(), self.company.trim()) {
            ("", company) => company.to_string(),
            (role, "") => role.to_string(),
            (role, company) => format!("{role} at {company}"),
        }
    }
}

/// Education entries are accepted and counted but never laid out.
pub type EducationEntry = Value;

/// A validated résumé. Identity fields are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeDocument {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub summary: Option<String>,
    pub skills: Option<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
}

impl ResumePayload {
    /// Checks the identity block and produces an immutable `ResumeDocument`.
    ///
    /// Every missing or blank identity field is reported at once.
    pub fn validate(self) -> Result<ResumeDocument, AppError> {
        let full_name = non_blank(self.full_name);
        let email = non_blank(self.email);
        let phone = non_blank(self.phone);

        let mut missing = Vec::new();
        if full_name.is_none() {
            missing.push("fullName");
        }
        if email.is_none() {
            missing.push("email");
        }
        if phone.is_none() {
            missing.push("phone");
        }

        match (full_name, email, phone) {
            (Some(full_name), Some(email), Some(phone)) => Ok(ResumeDocument {
                full_name,
                email,
                phone,
                summary: self.summary,
                skills: self.skills,
                experience: self.experience.unwrap_or_default(),
                education: self.education.unwrap_or_default(),
            }),
            _ => Err(AppError::MissingFields(missing)),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ResumeDocument {
    pub fn summary_text(&self) -> Option<&str> {
        self.summary.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn skills_text(&self) -> Option<&str> {
        self.skills.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Experience entries that carry at least one non-blank field, in display order.
    pub fn visible_experience(&self) -> impl Iterator<Item = &ExperienceEntry> {
        self.experience.iter().filter(|e| !e.is_blank())
    }

    pub fn contact_line(&self) -> String {
        format!("{} | {}", self.email, self.phone)
    }

    /// Fields that were supplied but have no place in the rendered document.
    pub fn unused_fields(&self) -> Vec<&'static str> {
        if self.education.is_empty() {
            Vec::new()
        } else {
            vec!["education"]
        }
    }
}

#[cfg(test)]
pub(crate) fn jane_doe() -> ResumeDocument {
    ResumeDocument {
        full_name: "Jane Doe".to_string(),
        email: "jane@x.com".to_string(),
        phone: "555-0100".to_string(),
        summary: Some("Engineer.".to_string()),
        skills: Some("Go, SQL".to_string()),
        experience: vec![ExperienceEntry {
            role: "Dev".to_string(),
            company: "Acme".to_string(),
            description: "Built things.".to_string(),
        }],
        education: vec![],
    }
}
