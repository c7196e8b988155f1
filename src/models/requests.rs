use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{default_experience_level, default_language_preference, UserProfile};

/// Request to add an internship posting
///
/// List fields accept either a JSON array or a comma-separated string.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewInternshipRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub company: String,
    #[validate(length(min = 1))]
    pub location: String,
    #[validate(length(min = 1))]
    pub sector: String,
    #[validate(length(min = 1))]
    pub duration: String,
    #[serde(default)]
    pub stipend: Option<String>,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(deserialize_with = "string_or_list")]
    #[validate(length(min = 1))]
    pub required_skills: Vec<String>,
    #[validate(length(min = 1))]
    pub education_requirement: String,
    #[serde(default = "default_experience_level")]
    pub experience_required: String,
    #[serde(default)]
    pub remote_option: bool,
    #[validate(length(min = 1))]
    pub application_deadline: String,
}

/// Profile submission, the JSON counterpart of the profile form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProfileRequest {
    pub name: String,
    pub age: u8,
    pub education_level: String,
    pub field_of_study: String,
    #[serde(deserialize_with = "string_or_list")]
    pub skills: Vec<String>,
    #[serde(deserialize_with = "string_or_list")]
    pub interests: Vec<String>,
    pub location: String,
    #[serde(default, deserialize_with = "string_or_list")]
    pub preferred_locations: Vec<String>,
    #[serde(default = "default_experience_level")]
    pub experience_level: String,
    #[serde(default = "default_language_preference")]
    pub language_preference: String,
}

impl TryFrom<CreateProfileRequest> for UserProfile {
    type Error = String;

    fn try_from(req: CreateProfileRequest) -> Result<Self, Self::Error> {
        let profile = UserProfile {
            name: req.name.trim().to_string(),
            age: req.age,
            education_level: req.education_level.parse()?,
            field_of_study: req.field_of_study.trim().to_string(),
            skills: req.skills,
            interests: req.interests,
            location: req.location.trim().to_string(),
            preferred_locations: req.preferred_locations,
            experience_level: req.experience_level,
            language_preference: req.language_preference,
        };
        profile.check()?;
        Ok(profile)
    }
}

/// Request to apply to an internship
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApplyRequest {
    #[validate(length(min = 1))]
    pub session_id: String,
    #[validate(length(min = 1))]
    pub internship_id: String,
}

/// Query string for the recommendations endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationQuery {
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrList {
    Joined(String),
    List(Vec<String>),
}

/// Split a comma-separated value, trimming entries and dropping blanks
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match StringOrList::deserialize(deserializer)? {
        StringOrList::Joined(raw) => split_list(&raw),
        StringOrList::List(items) => items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
    })
}
