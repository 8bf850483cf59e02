// SPDX-License-Identifier: MIT OR Apache-2.0

//! Placeholder interpolation.
//!
//! String values may embed references to other keys as `${key.path}`. Each
//! placeholder is replaced by the value the caller's resolver returns for the
//! key it names. Expansion is a single pass: text produced by a replacement is
//! never scanned again.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::HashMap;

/// `${`, optional whitespace, one or more non-whitespace characters, optional
/// whitespace, `}`. The middle run is greedy, so `${a},${b}` is one match.
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{(\s+)?(\S)+(\s+)?\}").expect("invalid placeholder regex"));

/// Word characters and dots; the first run inside a placeholder is the key.
static KEY_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9A-Za-z_]+(\.)?)+").expect("invalid key path regex"));

/// Extracts the key path referenced by a placeholder.
///
/// Whitespace and any character other than ASCII word characters and dots end
/// the key. Returns the empty string when the placeholder holds no key
/// characters at all.
///
/// # Examples
///
/// ```
/// use layercfg::domain::placeholder::placeholder_key;
///
/// assert_eq!(placeholder_key("${ s.d  }"), "s.d");
/// assert_eq!(placeholder_key("${s1.s.s.a_d  }"), "s1.s.s.a_d");
/// assert_eq!(placeholder_key("${-}"), "");
/// ```
pub fn placeholder_key(placeholder: &str) -> &str {
    KEY_PATH
        .find(placeholder)
        .map(|m| m.as_str())
        .unwrap_or("")
}

/// Replaces every placeholder in `value` with `resolve(key)`.
///
/// Placeholders are located left to right in the input and every match is
/// replaced in place. Identical placeholders receive the same value, and text
/// produced by a replacement is never expanded, even when it looks like a
/// later placeholder. A value without placeholders is returned borrowed and
/// unchanged.
///
/// # Examples
///
/// ```
/// use layercfg::domain::placeholder::interpolate;
///
/// let out = interpolate("http://${host}:${ port }/", |key| match key {
///     "host" => "localhost".to_string(),
///     "port" => "8080".to_string(),
///     _ => String::new(),
/// });
/// assert_eq!(out, "http://localhost:8080/");
///
/// let plain = interpolate("no references", |_| unreachable!());
/// assert!(matches!(plain, std::borrow::Cow::Borrowed("no references")));
/// ```
pub fn interpolate<'a, F>(value: &'a str, mut resolve: F) -> Cow<'a, str>
where
    F: FnMut(&str) -> String,
{
    if !value.contains("${") {
        return Cow::Borrowed(value);
    }

    // Keyed by placeholder text so identical placeholders share one value.
    let mut resolved: HashMap<String, String> = HashMap::new();
    PLACEHOLDER.replace_all(value, |caps: &Captures<'_>| {
        let placeholder = &caps[0];
        resolved
            .entry(placeholder.to_string())
            .or_insert_with(|| resolve(placeholder_key(placeholder)))
            .clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(pairs: &[(&str, &str)]) -> impl FnMut(&str) -> String {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned().unwrap_or_default()
    }

    #[test]
    fn test_no_placeholder_is_borrowed() {
        let out = interpolate("plain value", resolver(&[]));
        assert!(matches!(out, Cow::Borrowed("plain value")));
    }

    #[test]
    fn test_dollar_without_match_is_borrowed() {
        let out = interpolate("cost ${ }", resolver(&[]));
        assert!(matches!(out, Cow::Borrowed("cost ${ }")));
    }

    #[test]
    fn test_whitespace_inside_braces() {
        let out = interpolate("a ${s.d  }", resolver(&[("s.d", "88")]));
        assert_eq!(out, "a 88");
    }

    #[test]
    fn test_multiple_placeholders() {
        let out = interpolate(
            "${scheme} ${host} ${ port }",
            resolver(&[("scheme", "https"), ("host", "example.org"), ("port", "443")]),
        );
        assert_eq!(out, "https example.org 443");
    }

    #[test]
    fn test_adjacent_placeholders_greedy_match() {
        // `\S+` spans the comma, so the whole run is one placeholder keyed by `s.d`.
        let out = interpolate("${s.d},${s.dd}", resolver(&[("s.d", "1"), ("s.dd", "2")]));
        assert_eq!(out, "1");
    }

    #[test]
    fn test_repeated_placeholder_all_replaced() {
        let mut calls = 0;
        let out = interpolate("${x}-${x}", |key| {
            calls += 1;
            format!("<{}>", key)
        });
        // Greedy matching turns `${x}-${x}` into a single placeholder.
        assert_eq!(out, "<x>");
        assert_eq!(calls, 1);

        let out = interpolate("${x} ${x}", |key| format!("<{}>", key));
        assert_eq!(out, "<x> <x>");
    }

    #[test]
    fn test_missing_key_resolves_to_empty() {
        let out = interpolate("[${missing}]", resolver(&[]));
        assert_eq!(out, "[]");
    }

    #[test]
    fn test_single_pass_only() {
        let out = interpolate("${a}", resolver(&[("a", "${b}"), ("b", "x")]));
        assert_eq!(out, "${b}");
    }

    #[test]
    fn test_placeholder_key_stops_at_other_characters() {
        assert_eq!(placeholder_key("${db.host:5432}"), "db.host");
        assert_eq!(placeholder_key("${ a_b.c }"), "a_b.c");
    }

    #[test]
    fn test_replacement_is_not_expanded_by_later_placeholder() {
        let out = interpolate("${a} ${b}", resolver(&[("a", "${b}"), ("b", "X")]));
        assert_eq!(out, "${b} X");
    }

    #[test]
    fn test_identical_placeholders_resolved_once() {
        let mut calls = 0;
        let out = interpolate("${x} ${ y } ${x}", |key| {
            calls += 1;
            format!("<{}>", key)
        });
        assert_eq!(out, "<x> <y> <x>");
        assert_eq!(calls, 2);
    }
}
