//! Identifier rewriting so several fragments can share one HTML document.
//!
//! Inline SVG ids, CSS class names and keyframe names all live in the page's
//! global namespace. Appending a per-fragment suffix to each declared
//! identifier keeps two copies of the same arrow from fighting over them.

use crate::error::IdentifierRewriteError;
use rand::Rng;
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Length of suffixes produced by [`random_suffix`].
pub const RANDOM_SUFFIX_LEN: usize = 6;

/// A maximal identifier-like run. Hyphens continue a token, so `arrow` is a
/// different token from `arrow-dim`.
fn token_pattern() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_-]*").expect("token pattern is valid"))
}

/// Identifier-like tokens of `text`, in order.
pub(crate) fn tokens(text: &str) -> impl Iterator<Item = &str> + '_ {
    token_pattern().find_iter(text).map(|m| m.as_str())
}

fn is_valid_suffix(suffix: &str) -> bool {
    !suffix.is_empty()
        && suffix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Rewrite every whole-token occurrence of each key to `<key>-<suffix>`.
///
/// Every key must occur at least once in `text`.
pub fn apply_unique_suffix(
    text: &str,
    suffix: &str,
    keys: &[&str],
) -> Result<String, IdentifierRewriteError> {
    if !is_valid_suffix(suffix) {
        return Err(IdentifierRewriteError::InvalidSuffix(suffix.to_string()));
    }

    let tokens = token_pattern();
    for key in keys {
        if !tokens.find_iter(text).any(|m| m.as_str() == *key) {
            return Err(IdentifierRewriteError::MissingIdentifier {
                identifier: key.to_string(),
            });
        }
    }

    let rewritten = tokens.replace_all(text, |caps: &Captures<'_>| {
        let token = &caps[0];
        if keys.contains(&token) {
            format!("{token}-{suffix}")
        } else {
            token.to_string()
        }
    });
    Ok(rewritten.into_owned())
}

/// Fresh lowercase hex suffix.
pub fn random_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..RANDOM_SUFFIX_LEN)
        .map(|_| char::from_digit(rng.gen_range(0..16), 16).unwrap_or('0'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_declarations_and_references() {
        let text = r#"<clipPath id="arrowClip"/><g clip-path="url(#arrowClip)"/>"#;
        let out = apply_unique_suffix(text, "x1", &["arrowClip"]).unwrap();
        assert_eq!(
            out,
            r#"<clipPath id="arrowClip-x1"/><g clip-path="url(#arrowClip-x1)"/>"#
        );
    }

    #[test]
    fn only_whole_tokens_match() {
        let text = ".arrow { } .arrow-dim { } .arrowhead { } #arrowClip";
        let out = apply_unique_suffix(text, "a", &["arrow"]).unwrap();
        assert_eq!(out, ".arrow-a { } .arrow-dim { } .arrowhead { } #arrowClip");
    }

    #[test]
    fn class_lists_and_keyframes_are_rewritten() {
        let text = r#"@keyframes flow { } .arrow { animation: flow 2s linear infinite; } <g class="arrow other">"#;
        let out = apply_unique_suffix(text, "b", &["arrow", "flow"]).unwrap();
        assert_eq!(
            out,
            r#"@keyframes flow-b { } .arrow-b { animation: flow-b 2s linear infinite; } <g class="arrow-b other">"#
        );
    }

    #[test]
    fn text_outside_keys_is_untouched() {
        let text = r#"<svg xmlns="http://www.w3.org/2000/svg"><g class="flow"/></svg>"#;
        let out = apply_unique_suffix(text, "z", &["flow"]).unwrap();
        assert_eq!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg"><g class="flow-z"/></svg>"#
        );
    }

    #[test]
    fn missing_identifier_is_reported() {
        let err = apply_unique_suffix("<g class=\"arrow-dim\"/>", "a", &["arrow"]).unwrap_err();
        assert_eq!(
            err,
            IdentifierRewriteError::MissingIdentifier {
                identifier: "arrow".to_string()
            }
        );
    }

    #[test]
    fn suffix_must_be_identifier_safe() {
        for bad in ["", "a b", "x\"", "ü"] {
            assert!(matches!(
                apply_unique_suffix("flow", bad, &["flow"]),
                Err(IdentifierRewriteError::InvalidSuffix(_))
            ));
        }
        assert!(apply_unique_suffix("flow", "Run_2-b", &["flow"]).is_ok());
    }

    #[test]
    fn random_suffixes_are_hex() {
        let suffix = random_suffix();
        assert_eq!(suffix.len(), RANDOM_SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
