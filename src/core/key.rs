//! Entry keys and key sanitization.
//!
//! Resource entry names must match `[A-Za-z_][A-Za-z0-9_.-]*`. Free-form
//! operator input is turned into such a name by [`sanitize`]; an
//! [`EntryKey`] can only hold a name that satisfies the pattern.

use crate::error::{KeyError, Result};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

/// Pattern every entry key must match.
pub const KEY_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_.-]*$";

fn key_regex() -> &'static Regex {
    static KEY_REGEX: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    KEY_REGEX.get_or_init(|| Regex::new(KEY_PATTERN).expect("valid regex"))
}

const fn is_key_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

const fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

/// Normalizes arbitrary text into a valid entry key.
///
/// An underscore is prepended when the input does not start with an ASCII
/// letter or underscore, then every character outside `[A-Za-z0-9_.-]` is
/// replaced by an underscore. Empty input yields `"_"`.
///
/// # Examples
///
/// ```
/// use string_res::core::sanitize;
///
/// assert_eq!(sanitize("new greeting"), "new_greeting");
/// assert_eq!(sanitize("1st"), "_1st");
/// assert_eq!(sanitize(""), "_");
/// ```
#[must_use]
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 1);

    if !input.chars().next().is_some_and(is_key_start) {
        out.push('_');
    }

    out.extend(
        input
            .chars()
            .map(|c| if is_key_char(c) { c } else { '_' }),
    );
    out
}

/// Returns true if `key` is a valid entry key.
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    key_regex().is_match(key)
}

/// A validated resource entry name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntryKey(String);

impl EntryKey {
    /// Builds a key from free-form text via [`sanitize`].
    #[must_use]
    pub fn sanitized(input: &str) -> Self {
        Self(sanitize(input))
    }

    /// Validates an already-clean key.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Invalid`] if `key` does not match [`KEY_PATTERN`].
    pub fn parse(key: &str) -> Result<Self> {
        if is_valid_key(key) {
            Ok(Self(key.to_string()))
        } else {
            Err(KeyError::Invalid {
                key: key.to_string(),
            }
            .into())
        }
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntryKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test_case("hello", "hello" ; "already valid")]
    #[test_case("new greeting", "new_greeting" ; "space")]
    #[test_case("1st_place", "_1st_place" ; "leading digit")]
    #[test_case("-dash", "_-dash" ; "leading hyphen")]
    #[test_case(".dot", "_.dot" ; "leading period")]
    #[test_case("_private", "_private" ; "leading underscore")]
    #[test_case("a.b-c_d", "a.b-c_d" ; "allowed punctuation")]
    #[test_case("what's up?", "what_s_up_" ; "punctuation replaced")]
    #[test_case("café", "caf_" ; "non ascii letter")]
    #[test_case("été", "__t_" ; "non ascii first")]
    #[test_case(" x", "__x" ; "leading space")]
    #[test_case("", "_" ; "empty")]
    fn test_sanitize(input: &str, expected: &str) {
        assert_eq!(sanitize(input), expected);
    }

    #[test]
    fn test_is_valid_key() {
        assert!(is_valid_key("app_name"));
        assert!(is_valid_key("_"));
        assert!(is_valid_key("a1.b-2"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("1abc"));
        assert!(!is_valid_key("has space"));
        assert!(!is_valid_key("line\nbreak"));
    }

    #[test]
    fn test_entry_key_parse() {
        let key = EntryKey::parse("app_name").unwrap();
        assert_eq!(key.as_str(), "app_name");
        assert_eq!(key.to_string(), "app_name");

        let err = EntryKey::parse("9lives").unwrap_err();
        assert!(err.to_string().contains("9lives"));
    }

    #[test]
    fn test_entry_key_sanitized() {
        let key = EntryKey::sanitized("new greeting");
        assert_eq!(key.as_str(), "new_greeting");
    }

    proptest! {
        #[test]
        fn sanitized_output_is_valid(input in any::<String>()) {
            prop_assert!(is_valid_key(&sanitize(&input)));
        }

        #[test]
        fn sanitize_is_idempotent(input in any::<String>()) {
            let once = sanitize(&input);
            prop_assert_eq!(sanitize(&once), once);
        }

        #[test]
        fn valid_keys_are_unchanged(input in "[A-Za-z_][A-Za-z0-9_.-]{0,30}") {
            prop_assert_eq!(sanitize(&input), input);
        }
    }
}
