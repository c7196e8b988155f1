use crate::models::EducationLevel;

/// Hierarchy position of an education string; unrecognized values map to 0
#[inline]
pub fn education_rank(level: &str) -> u8 {
    level.parse::<EducationLevel>().map(EducationLevel::rank).unwrap_or(0)
}

/// Calculate education score from user level vs required level
///
/// 1.0 when the user meets the requirement, 0.7 when exactly one level
/// below, 0.3 otherwise.
pub fn calculate_education_match(user_education: &str, required_education: &str) -> f64 {
    let user_level = education_rank(user_education);
    let required_level = education_rank(required_education);

    if user_level >= required_level {
        1.0
    } else if user_level + 1 == required_level {
        0.7
    } else {
        0.3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meets_requirement() {
        assert_eq!(calculate_education_match("postgraduate", "undergraduate"), 1.0);
        assert_eq!(calculate_education_match("diploma", "diploma"), 1.0);
    }

    #[test]
    fn test_one_level_below() {
        assert_eq!(calculate_education_match("diploma", "undergraduate"), 0.7);
    }

    #[test]
    fn test_far_below() {
        assert_eq!(calculate_education_match("high_school", "postgraduate"), 0.3);
    }

    #[test]
    fn test_unrecognized_levels() {
        assert_eq!(education_rank("phd"), 0);
        assert_eq!(education_rank(" Undergraduate "), 3);
        // Unknown user level sits two below diploma
        assert_eq!(calculate_education_match("unknown", "diploma"), 0.3);
        // Unknown requirement is level 0, which everyone meets
        assert_eq!(calculate_education_match("high_school", "any"), 1.0);
    }

    #[test]
    fn test_monotonic_in_user_level() {
        for required in EducationLevel::ALL {
            let scores: Vec<f64> = EducationLevel::ALL
                .iter()
                .map(|user| calculate_education_match(user.as_str(), required.as_str()))
                .collect();
            assert!(scores.windows(2).all(|w| w[0] <= w[1]), "{:?}", scores);
        }
    }
}
