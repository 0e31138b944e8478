//! Query helpers shared by the Diesel repositories.

/// Escape LIKE metacharacters and wrap the needle for a substring match.
///
/// Backslash is PostgreSQL's default LIKE escape character.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
