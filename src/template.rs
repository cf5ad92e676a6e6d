// Literal placeholder substitution over document text.

/// Default placeholder for the full commit hash.
pub const HASH_TOKEN: &str = "{{HASH}}";
/// Placeholder for the abbreviated commit hash.
pub const HASH_SHORT_TOKEN: &str = "{{HASH_SHORT}}";
/// Placeholder for the UTC date of the run.
pub const DATE_TOKEN: &str = "{{DATE}}";

/// One token-to-value mapping applied during rendering.
pub struct Substitution<'a> {
    pub token: &'a str,
    pub value: &'a str,
}

pub fn count_occurrences(content: &str, token: &str) -> usize {
    content.matches(token).count()
}

/// Replaces every literal occurrence of each token with its value.
/// No escaping, no regex: bytes outside the tokens are never altered.
/// Returns the rendered text and the total number of replacements.
pub fn apply(content: &str, substitutions: &[Substitution]) -> (String, usize) {
    let mut rendered = content.to_string();
    let mut replaced = 0;

    for sub in substitutions {
        let n = rendered.matches(sub.token).count();
        if n > 0 {
            rendered = rendered.replace(sub.token, sub.value);
            replaced += n;
        }
    }

    (rendered, replaced)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash(value: &str) -> Vec<Substitution<'_>> {
        vec![Substitution {
            token: HASH_TOKEN,
            value,
        }]
    }

    #[test]
    fn single_occurrence_is_replaced() {
        let (out, n) = apply("Build: {{HASH}}\n", &hash("abc123"));
        assert_eq!(out, "Build: abc123\n");
        assert_eq!(n, 1);
    }

    #[test]
    fn absent_token_leaves_content_byte_identical() {
        let (out, n) = apply("No placeholder here\n", &hash("abc123"));
        assert_eq!(out, "No placeholder here\n");
        assert_eq!(n, 0);
    }

    #[test]
    fn every_occurrence_gets_the_same_value() {
        let (out, n) = apply("{{HASH}} and {{HASH}} and {{HASH}}", &hash("abc123"));
        assert_eq!(out, "abc123 and abc123 and abc123");
        assert_eq!(n, 3);
    }

    #[test]
    fn surrounding_text_is_untouched() {
        let (out, _) = apply("pre {{HASH}} post", &hash("abc123"));
        assert!(out.starts_with("pre "));
        assert!(out.ends_with(" post"));
    }

    #[test]
    fn multiple_tokens_are_counted_together() {
        let subs = vec![
            Substitution {
                token: HASH_TOKEN,
                value: "abc123",
            },
            Substitution {
                token: DATE_TOKEN,
                value: "2026-08-23",
            },
        ];
        let (out, n) = apply("rev {{HASH}} on {{DATE}}\n", &subs);
        assert_eq!(out, "rev abc123 on 2026-08-23\n");
        assert_eq!(n, 2);
    }

    #[test]
    fn count_occurrences_matches_apply() {
        let content = "{{HASH}} {{HASH}}";
        assert_eq!(count_occurrences(content, HASH_TOKEN), 2);
        let (_, n) = apply(content, &hash("x"));
        assert_eq!(n, 2);
    }
}
