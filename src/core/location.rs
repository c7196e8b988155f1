use crate::core::text::normalize;

/// Calculate location score (0.2-1.0)
///
/// Rules, first match wins:
/// - remote posting: 1.0
/// - same location as the user: 1.0
/// - listed in the user's preferred locations: 0.9
/// - substring of (or containing) the user's or a preferred location: 0.6
/// - anything else: 0.2
pub fn calculate_location_match(
    user_location: &str,
    preferred_locations: &[String],
    internship_location: &str,
    remote_option: bool,
) -> f64 {
    if remote_option {
        return 1.0;
    }

    let user_location = normalize(user_location);
    let internship_location = normalize(internship_location);
    let preferred: Vec<String> = preferred_locations.iter().map(|l| normalize(l)).collect();

    if user_location == internship_location {
        return 1.0;
    }

    if preferred.contains(&internship_location) {
        return 0.9;
    }

    let related = std::iter::once(&user_location)
        .chain(preferred.iter())
        .any(|loc| internship_location.contains(loc.as_str()) || loc.contains(internship_location.as_str()));
    if related {
        return 0.6;
    }

    0.2
}
