//! Heading text normalization.

use std::sync::LazyLock;

use regex::Regex;

static DISPLAY_MATH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\$(.+?)\$\$").unwrap());
static INLINE_MATH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$(.+?)\$").unwrap());
static TEXT_COMMAND: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\text\{([^}]+)\}").unwrap());
static COMMAND: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\[a-zA-Z]+").unwrap());
static BRACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[{}]").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Strip math delimiters and TeX markup from heading text for display.
///
/// Stages run in a fixed order: `$$..$$`, `$..$`, `\text{..}`, any other
/// `\command`, braces, then whitespace collapse and trim. Unbalanced
/// delimiters are left as they are.
pub fn display_text(raw: &str) -> String {
    let text = DISPLAY_MATH.replace_all(raw, "${1}");
    let text = INLINE_MATH.replace_all(&text, "${1}");
    let text = TEXT_COMMAND.replace_all(&text, "${1}");
    let text = COMMAND.replace_all(&text, "");
    let text = BRACES.replace_all(&text, "");
    WHITESPACE.replace_all(&text, " ").trim().to_owned()
}

/// Anchor id for a heading's raw text.
///
/// Lowercases, turns every run of characters outside `[a-z0-9]` into one
/// hyphen, and drops hyphens at either end. Ids are not deduplicated.
pub fn anchor_id(raw: &str) -> String {
    let mut id = String::with_capacity(raw.len());
    let mut pending_dash = false;

    for c in raw.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !id.is_empty() {
                id.push('-');
            }
            pending_dash = false;
            id.push(c);
        } else {
            pending_dash = true;
        }
    }

    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── anchor_id tests ──────────────────────────────────────────────

    #[test]
    fn test_anchor_id_basic() {
        assert_eq!(anchor_id("Attention Is All You Need!"), "attention-is-all-you-need");
    }

    #[test]
    fn test_anchor_id_collapses_runs_and_trims() {
        assert_eq!(anchor_id("  --Hello,   World--  "), "hello-world");
        assert_eq!(anchor_id("C++ & Rust: 2024 edition"), "c-rust-2024-edition");
    }

    #[test]
    fn test_anchor_id_keeps_math_source() {
        assert_eq!(
            anchor_id("Cost ($$J(\\theta)$$) Function"),
            "cost-j-theta-function"
        );
    }

    #[test]
    fn test_anchor_id_non_ascii_becomes_separator() {
        assert_eq!(anchor_id("Café Déjà vu"), "caf-d-j-vu");
        assert_eq!(anchor_id("日本語"), "");
        assert_eq!(anchor_id("!!!"), "");
    }

    // ── display_text tests ───────────────────────────────────────────

    #[test]
    fn test_display_text_display_math_and_commands() {
        assert_eq!(
            display_text("Cost ($$J(\\theta)$$) Function"),
            "Cost (J()) Function"
        );
    }

    #[test]
    fn test_display_text_inline_math_drops_commands() {
        assert_eq!(
            display_text("The loss $L = -\\log p$ converges"),
            "The loss L = - p converges"
        );
    }

    #[test]
    fn test_display_text_keeps_text_argument() {
        assert_eq!(
            display_text("Why $\\text{softmax}(x)$ works"),
            "Why softmax(x) works"
        );
    }

    #[test]
    fn test_display_text_strips_braces_and_whitespace() {
        assert_eq!(display_text("  Sets {a,   b}  "), "Sets a, b");
    }

    #[test]
    fn test_display_text_unbalanced_math_is_best_effort() {
        assert_eq!(display_text("Price is $5 today"), "Price is $5 today");
    }

    #[test]
    fn test_display_text_plain() {
        assert_eq!(display_text("Introduction"), "Introduction");
    }
}
