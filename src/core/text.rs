/// Lowercase and trim, the normal form every matcher compares in
#[inline]
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Capitalize the first letter of every word and lowercase the rest.
///
/// A word starts at any letter that follows a non-letter, so
/// `"node.js"` becomes `"Node.Js"` and `"3d modeling"` becomes `"3D Modeling"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;

    for c in s.chars() {
        if prev_alpha {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_alpha = c.is_alphabetic();
    }

    out
}
