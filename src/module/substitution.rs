//! `${NAME}` placeholder substitution for compose documents.
//!
//! A placeholder is `${` followed by an identifier (`[A-Za-z_][A-Za-z0-9_]*`)
//! and `}`. Substitution is a single pass: replacement values are never
//! re-scanned, and placeholders with no matching variable are left in place.

use regex::{Captures, Regex};
use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid placeholder pattern")
    })
}

/// Replace every `${NAME}` whose NAME is in `variables`.
pub fn substitute_placeholders(text: &str, variables: &HashMap<String, String>) -> String {
    placeholder_pattern()
        .replace_all(text, |caps: &Captures| match variables.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Names of all placeholders referenced in `text`.
pub fn placeholders(text: &str) -> BTreeSet<String> {
    placeholder_pattern()
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_substitutes_every_occurrence() {
        let text = "ports:\n  - ${PORT}:80\nenvironment:\n  LISTEN: ${PORT}\n";
        let rendered = substitute_placeholders(text, &vars(&[("PORT", "8080")]));
        assert_eq!(rendered, "ports:\n  - 8080:80\nenvironment:\n  LISTEN: 8080\n");
        assert!(!rendered.contains("${PORT}"));
    }

    #[test]
    fn test_unknown_placeholders_pass_through() {
        let rendered = substitute_placeholders("${A}-${B}", &vars(&[("A", "1")]));
        assert_eq!(rendered, "1-${B}");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let rendered = substitute_placeholders("${A}", &vars(&[("A", "${B}"), ("B", "2")]));
        assert_eq!(rendered, "${B}");
    }

    #[test]
    fn test_malformed_placeholders_untouched() {
        let text = "$PORT ${1X} ${} ${PORT";
        assert_eq!(substitute_placeholders(text, &vars(&[("PORT", "1")])), text);
    }

    #[test]
    fn test_placeholders_lists_names() {
        let names = placeholders("${B} ${A} ${B} $C");
        assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["A", "B"]);
    }
}
