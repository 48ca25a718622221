//! Lenient string matching for assertions.
//!
//! Supports three matching modes, tried in order: glob patterns, regex, and
//! exact comparison. Used by [`matches_value`](super::base::Assert::matches_value)
//! and exposed for custom predicates built with `satisfies`.

use glob::Pattern;

/// Match a string against a pattern.
///
/// Matching modes, tried in order:
/// 1. **Glob patterns**: e.g. `*.txt`, `**/config.json`
/// 2. **Regex** (with the `regex` feature): e.g. `^v\d+\.\d+$`
/// 3. **Exact match**: literal string comparison
///
/// A pattern that parses in neither mode falls through to exact comparison,
/// so this never fails on malformed patterns. For strict single-mode
/// matching use `matches_glob` or `matches` on a string assertion.
///
/// # Example
///
/// ```rust
/// use affirm::value_matches;
///
/// assert!(value_matches("*.txt", "notes.txt"));
/// assert!(value_matches(r"^v\d+$", "v42"));
/// assert!(value_matches("literal", "literal"));
/// assert!(!value_matches("*.txt", "notes.rs"));
/// ```
pub fn value_matches(pattern: &str, actual: &str) -> bool {
    if let Ok(glob) = Pattern::new(pattern) {
        if glob.matches(actual) {
            return true;
        }
    }

    #[cfg(feature = "regex")]
    if let Ok(re) = regex::Regex::new(pattern) {
        if re.is_match(actual) {
            return true;
        }
    }

    actual == pattern
}

/// Create a `HashMap` from key-value pairs, for map assertions.
///
/// # Example
///
/// ```rust
/// use affirm::{assert_that, entries};
///
/// let map = entries! {
///     "host" => "localhost",
///     "port" => "5432",
/// };
/// assert_that(&map).contains_key(&"host");
/// ```
#[macro_export]
macro_rules! entries {
    ($($key:expr => $value:expr),* $(,)?) => {{
        let mut map = std::collections::HashMap::new();
        $(
            map.insert($key, $value);
        )*
        map
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_matching() {
        assert!(value_matches("*.env", ".env"));
        assert!(value_matches("*.env", "test.env"));
        assert!(!value_matches("*.env", "test.txt"));
    }

    #[test]
    fn test_glob_path_matching() {
        assert!(value_matches("**/config.json", "src/config.json"));
        assert!(value_matches("**/config.json", "config.json"));
    }

    #[cfg(feature = "regex")]
    #[test]
    fn test_regex_matching() {
        assert!(value_matches(r"^npm (install|i)$", "npm install"));
        assert!(value_matches(r"^npm (install|i)$", "npm i"));
        assert!(!value_matches(r"^npm (install|i)$", "npm run"));
    }

    #[test]
    fn test_exact_matching() {
        assert!(value_matches("/tmp/test.txt", "/tmp/test.txt"));
        assert!(!value_matches("/tmp/test.txt", "/tmp/other.txt"));
    }

    #[test]
    fn test_entries_macro() {
        let map = entries! {
            "host" => "localhost",
            "port" => "5432",
        };
        assert_eq!(map.get("host"), Some(&"localhost"));
        assert_eq!(map.get("port"), Some(&"5432"));
    }
}
