pub mod comment;
pub mod device;
pub mod lookup;
pub mod network;
pub mod rating;

pub use lookup::RatingLookup;

/// `ILIKE` pattern matching `search` anywhere, with its own wildcards escaped.
pub(crate) fn contains_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::contains_pattern;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("glo"), "%glo%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("mtn_ng"), "%mtn\\_ng%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }
}
