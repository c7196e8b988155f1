use crate::core::text::{normalize, title_case};

/// Contribution of an exact user/required skill match
pub const EXACT_MATCH: f64 = 1.0;
/// Contribution when one skill contains the other
pub const PARTIAL_MATCH: f64 = 0.7;
/// Contribution of a synonym-group match
pub const SYNONYM_MATCH: f64 = 0.8;

/// Fixed synonym table. Only the member lists take part in matching; the
/// group name is a label.
pub static SKILL_SYNONYMS: &[(&str, &[&str])] = &[
    ("programming", &["coding", "development", "software"]),
    ("python", &["django", "flask"]),
    ("javascript", &["js", "react", "node"]),
    ("design", &["graphic design", "ui", "ux", "visual"]),
    ("marketing", &["digital marketing", "social media"]),
    ("writing", &["content writing", "copywriting", "blogging"]),
    ("analysis", &["data analysis", "analytics", "research"]),
];

/// Calculate skill overlap score (0-1) and matched skill labels
///
/// Each user skill is scanned against the required skills in order:
/// an exact match adds 1.0, otherwise a substring match in either direction
/// adds 0.7, and the first hit stops the scan. Separately, every synonym
/// group holding the user skill adds 0.8 for the first other required skill
/// in the same group, even when the direct scan already matched.
///
/// The sum is divided by the number of required skills and capped at 1.0.
pub fn calculate_skill_match(
    user_skills: &[String],
    required_skills: &[String],
) -> (f64, Vec<String>) {
    if required_skills.is_empty() {
        return (0.0, Vec::new());
    }

    let user_skills: Vec<String> = user_skills.iter().map(|s| normalize(s)).collect();
    let required: Vec<String> = required_skills.iter().map(|s| normalize(s)).collect();

    let mut matches = Vec::new();
    let mut raw_score = 0.0;

    for user_skill in &user_skills {
        // Direct and partial matches
        for req_skill in &required {
            if user_skill == req_skill {
                matches.push(title_case(req_skill));
                raw_score += EXACT_MATCH;
                break;
            } else if req_skill.contains(user_skill.as_str()) || user_skill.contains(req_skill.as_str()) {
                matches.push(title_case(req_skill));
                raw_score += PARTIAL_MATCH;
                break;
            }
        }

        // Synonym matches, independent of the scan above
        for (_, group) in SKILL_SYNONYMS {
            if !group.contains(&user_skill.as_str()) {
                continue;
            }
            if let Some(req_skill) = required
                .iter()
                .find(|req| *req != user_skill && group.contains(&req.as_str()))
            {
                matches.push(title_case(req_skill));
                raw_score += SYNONYM_MATCH;
            }
        }
    }

    let score = (raw_score / required_skills.len() as f64).min(1.0);
    (score, matches)
}
