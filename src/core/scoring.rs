use crate::models::{InternshipPosting, ScoringWeights, UserProfile};
use crate::core::{
    education::calculate_education_match,
    interests::calculate_interest_match,
    location::calculate_location_match,
    skills::calculate_skill_match,
};

/// Skill labels listed in the skills reason
const MAX_SKILL_REASONS: usize = 3;
/// Interest labels listed in the interests reason
const MAX_INTEREST_REASONS: usize = 2;

/// Per-component scores for one profile/posting pair
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub skills: f64,
    pub education: f64,
    pub location: f64,
    pub interests: f64,
    /// Weighted sum of the four components, in [0, 1]
    pub combined: f64,
    pub skill_matches: Vec<String>,
    pub interest_matches: Vec<String>,
}

/// Calculate the weighted match score (0-1) of a posting for a profile
///
/// Scoring formula:
/// combined = (
///     skills_score * 0.4 +       # required skill overlap
///     education_score * 0.2 +    # level vs requirement
///     location_score * 0.2 +     # remote / same city / preferred
///     interests_score * 0.2      # interests found in posting text
/// )
pub fn calculate_match_score(
    profile: &UserProfile,
    posting: &InternshipPosting,
    weights: &ScoringWeights,
) -> ScoreBreakdown {
    let (skills, skill_matches) = calculate_skill_match(&profile.skills, &posting.required_skills);

    let education = calculate_education_match(
        profile.education_level.as_str(),
        &posting.education_requirement,
    );

    let location = calculate_location_match(
        &profile.location,
        &profile.preferred_locations,
        &posting.location,
        posting.remote_option,
    );

    let (interests, interest_matches) = calculate_interest_match(
        &profile.interests,
        &posting.sector,
        &posting.title,
        &posting.description,
    );

    let combined = skills * weights.skills
        + education * weights.education
        + location * weights.location
        + interests * weights.interests;

    ScoreBreakdown {
        skills,
        education,
        location,
        interests,
        combined: combined.clamp(0.0, 1.0),
        skill_matches,
        interest_matches,
    }
}

/// Build the human-readable reasons for a scored posting
///
/// Order is fixed: skills, education, location, interests, experience.
pub fn build_match_reasons(
    breakdown: &ScoreBreakdown,
    profile: &UserProfile,
    posting: &InternshipPosting,
) -> Vec<String> {
    let mut reasons = Vec::new();

    if !breakdown.skill_matches.is_empty() {
        let shown: Vec<&str> = breakdown
            .skill_matches
            .iter()
            .take(MAX_SKILL_REASONS)
            .map(String::as_str)
            .collect();
        reasons.push(format!("Skills match: {}", shown.join(", ")));
    }

    if breakdown.education >= 0.7 {
        reasons.push("Education requirement met".to_string());
    }

    if breakdown.location >= 0.9 {
        let reason = if posting.remote_option {
            "Remote work available"
        } else {
            "Location matches preference"
        };
        reasons.push(reason.to_string());
    }

    if !breakdown.interest_matches.is_empty() {
        let shown: Vec<&str> = breakdown
            .interest_matches
            .iter()
            .take(MAX_INTEREST_REASONS)
            .map(String::as_str)
            .collect();
        reasons.push(format!("Interests align: {}", shown.join(", ")));
    }

    if posting.experience_required.to_lowercase() == profile.experience_level.to_lowercase() {
        reasons.push("Experience level perfect match".to_string());
    }

    reasons
}

/// Scale a combined score to 0-100 with one decimal place
///
/// Rounds the exact value of `combined * 100` with ties to even, so a score
/// stored as 39.25 becomes 39.2.
pub fn to_match_score(combined: f64) -> f64 {
    let scaled = combined * 100.0;
    format!("{:.1}", scaled)
        .parse()
        .unwrap_or((scaled * 10.0).round() / 10.0)
}
