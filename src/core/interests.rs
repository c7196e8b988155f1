use crate::core::text::{normalize, title_case};

/// Contribution when the whole interest appears in the posting text
pub const FULL_MATCH: f64 = 1.0;
/// Contribution when only some word of the interest appears
pub const WORD_MATCH: f64 = 0.7;

/// Calculate interest alignment score (0-1) and matched interest labels
///
/// Interests are looked up in the lowercased `sector title description`
/// text. Matching is by substring, so "art" also hits "startup".
pub fn calculate_interest_match(
    user_interests: &[String],
    sector: &str,
    title: &str,
    description: &str,
) -> (f64, Vec<String>) {
    if user_interests.is_empty() {
        return (0.0, Vec::new());
    }

    let text = format!("{} {} {}", sector, title, description).to_lowercase();

    let mut matches = Vec::new();
    let mut raw_score = 0.0;

    for interest in user_interests.iter().map(|i| normalize(i)) {
        if text.contains(interest.as_str()) {
            raw_score += FULL_MATCH;
            matches.push(title_case(&interest));
        } else if interest.split_whitespace().any(|word| text.contains(word)) {
            raw_score += WORD_MATCH;
            matches.push(title_case(&interest));
        }
    }

    let score = (raw_score / user_interests.len() as f64).min(1.0);
    (score, matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interests(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_full_and_word_matches() {
        let (score, matches) = calculate_interest_match(
            &interests(&["technology", "web development", "finance"]),
            "Technology",
            "Software Development Intern",
            "Work on web applications using Python and React",
        );

        // 1.0 + 0.7 + 0.0 over three interests
        assert!((score - 1.7 / 3.0).abs() < 1e-9);
        assert_eq!(matches, vec!["Technology", "Web Development"]);
    }

    #[test]
    fn test_empty_interests() {
        let (score, matches) = calculate_interest_match(&[], "Tech", "Intern", "");
        assert_eq!(score, 0.0);
        assert!(matches.is_empty());
    }

    #[test]
    fn test_substring_semantics() {
        let (score, matches) = calculate_interest_match(
            &interests(&["  ART "]),
            "Startups",
            "Founder's Office Intern",
            "",
        );

        assert_eq!(score, 1.0);
        assert_eq!(matches, vec!["Art"]);
    }

    #[test]
    fn test_no_overlap() {
        let (score, matches) = calculate_interest_match(
            &interests(&["healthcare"]),
            "Marketing",
            "Digital Marketing Intern",
            "Assist in social media campaigns",
        );

        assert_eq!(score, 0.0);
        assert!(matches.is_empty());
    }
}
