use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Ordered education levels, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    HighSchool,
    Diploma,
    Undergraduate,
    Postgraduate,
}

impl EducationLevel {
    pub const ALL: [EducationLevel; 4] = [
        EducationLevel::HighSchool,
        EducationLevel::Diploma,
        EducationLevel::Undergraduate,
        EducationLevel::Postgraduate,
    ];

    /// Position in the hierarchy, starting at 1 for high school
    pub fn rank(self) -> u8 {
        match self {
            EducationLevel::HighSchool => 1,
            EducationLevel::Diploma => 2,
            EducationLevel::Undergraduate => 3,
            EducationLevel::Postgraduate => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EducationLevel::HighSchool => "high_school",
            EducationLevel::Diploma => "diploma",
            EducationLevel::Undergraduate => "undergraduate",
            EducationLevel::Postgraduate => "postgraduate",
        }
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EducationLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high_school" => Ok(EducationLevel::HighSchool),
            "diploma" => Ok(EducationLevel::Diploma),
            "undergraduate" => Ok(EducationLevel::Undergraduate),
            "postgraduate" => Ok(EducationLevel::Postgraduate),
            other => Err(format!("unknown education level: {}", other)),
        }
    }
}

/// Candidate profile submitted by a student
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserProfile {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[validate(range(min = 16, max = 35))]
    pub age: u8,
    pub education_level: EducationLevel,
    #[validate(length(min = 2, max = 100))]
    pub field_of_study: String,
    #[validate(length(min = 1, max = 10))]
    pub skills: Vec<String>,
    #[validate(length(min = 1, max = 8))]
    pub interests: Vec<String>,
    #[validate(length(min = 2, max = 100))]
    pub location: String,
    #[validate(length(max = 5))]
    #[serde(default)]
    pub preferred_locations: Vec<String>,
    #[serde(default = "default_experience_level")]
    pub experience_level: String,
    #[serde(default = "default_language_preference")]
    pub language_preference: String,
}

impl UserProfile {
    /// Field-level validation plus the checks the derive cannot express
    pub fn check(&self) -> Result<(), String> {
        self.validate().map_err(|e| e.to_string())?;

        for (field, values) in [
            ("skills", &self.skills),
            ("interests", &self.interests),
            ("preferred_locations", &self.preferred_locations),
        ] {
            if values.iter().any(|v| v.trim().is_empty()) {
                return Err(format!("{}: entries must not be blank", field));
            }
        }

        Ok(())
    }
}

pub(crate) fn default_experience_level() -> String { "beginner".to_string() }
pub(crate) fn default_language_preference() -> String { "english".to_string() }

/// Internship posting as held by storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternshipPosting {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub sector: String,
    pub duration: String,
    #[serde(default)]
    pub stipend: Option<String>,
    pub description: String,
    pub required_skills: Vec<String>,
    pub education_requirement: String,
    pub experience_required: String,
    pub remote_option: bool,
    pub application_deadline: String,
}

/// Ranked posting with its score and the reasons behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub internship: InternshipPosting,
    pub match_score: f64,
    pub match_reasons: Vec<String>,
}

/// A submitted application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub application_id: String,
    pub user_id: String,
    pub internship_id: String,
    pub status: String,
    pub applied_at: chrono::DateTime<chrono::Utc>,
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub skills: f64,
    pub education: f64,
    pub location: f64,
    pub interests: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum WeightsError {
    #[error("weight `{0}` must be within [0, 1], got {1}")]
    OutOfRange(&'static str, f64),

    #[error("weights must sum to 1.0, got {0}")]
    BadSum(f64),
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.skills + self.education + self.location + self.interests
    }

    /// Reject weight sets that could push a combined score outside [0, 1]
    pub fn validate(&self) -> Result<(), WeightsError> {
        for (name, value) in [
            ("skills", self.skills),
            ("education", self.education),
            ("location", self.location),
            ("interests", self.interests),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(WeightsError::OutOfRange(name, value));
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(WeightsError::BadSum(sum));
        }

        Ok(())
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skills: 0.4,
            education: 0.2,
            location: 0.2,
            interests: 0.2,
        }
    }
}
