/// Turn a caller-supplied fragment into a `LIKE` pattern matching it as a
/// literal substring.
///
/// `\`, `%` and `_` are escaped with a backslash (PostgreSQL's default LIKE
/// escape). Returns `None` for an empty fragment: an empty fragment never
/// takes part in a match.
pub fn contains_pattern(fragment: &str) -> Option<String> {
    if fragment.is_empty() {
        return None;
    }

    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for ch in fragment.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    Some(pattern)
}
