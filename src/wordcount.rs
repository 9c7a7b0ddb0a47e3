//! Markdown-aware word counting.
//!
//! The count is derived data: scene word counts are recomputed from the
//! body on every save and must be reproducible bit-for-bit, so the
//! stripping rules and their order are fixed:
//!
//! 1. line-start heading markers
//! 2. emphasis spans (keep the enclosed text)
//! 3. links (keep the link text, drop the target)
//! 4. fenced code blocks (dropped entirely)
//! 5. inline code spans (dropped entirely)
//!
//! then split on whitespace and count non-empty tokens.

use std::sync::LazyLock;

use regex::Regex;

static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#+\s+").unwrap());
static EMPHASIS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[*_]{1,2}([^*_]+)[*_]{1,2}").unwrap());
static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());
static FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`[^`]+`").unwrap());

/// Strip Markdown syntax from `text`, leaving prose tokens.
///
/// Pure and idempotent: re-applying to its own output is a no-op once no
/// markup remains.
pub fn strip_markdown(text: &str) -> String {
    let text = HEADING.replace_all(text, "");
    let text = EMPHASIS.replace_all(&text, "$1");
    let text = LINK.replace_all(&text, "$1");
    let text = FENCE.replace_all(&text, "");
    let text = INLINE_CODE.replace_all(&text, "");
    text.into_owned()
}

/// Count prose words in Markdown `text`.
pub fn count_words(text: &str) -> usize {
    strip_markdown(text).split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text() {
        assert_eq!(count_words("One two three"), 3);
        assert_eq!(count_words("One two"), 2);
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   \n\t "), 0);
    }

    #[test]
    fn mixed_markup_pinned() {
        // Heading marker stripped, emphasis and link keep inner text, the
        // inline code span is dropped but its trailing period remains a token.
        let text = "# Title\n\nHello **world**, see [link](http://x) and `code`.";
        assert_eq!(strip_markdown(text), "Title\n\nHello world, see link and .");
        assert_eq!(count_words(text), 7);
    }

    #[test]
    fn headings_stripped_at_line_start_only() {
        assert_eq!(count_words("# Heading\nplain"), 2);
        // No whitespace after the hashes: not a heading marker.
        assert_eq!(count_words("#tag not heading? #word"), 4);
    }

    #[test]
    fn emphasis_keeps_inner_text() {
        assert_eq!(strip_markdown("_em_ and __strong__"), "em and strong");
        assert_eq!(count_words("*a*b*c*"), 1);
        assert_eq!(strip_markdown("*a*b*c*"), "abc");
    }

    #[test]
    fn links_keep_text_drop_target() {
        assert_eq!(strip_markdown("see [the docs](https://example.com/x)"), "see the docs");
        assert_eq!(count_words("see [the docs](https://example.com/x)"), 3);
    }

    #[test]
    fn fenced_blocks_dropped_entirely() {
        let text = "```rust\nfn main() {}\n```\nafter";
        assert_eq!(count_words(text), 1);
    }

    #[test]
    fn inline_code_dropped_entirely() {
        assert_eq!(count_words("a `x y z` b"), 2);
    }

    #[test]
    fn idempotent_on_stripped_output() {
        let texts = [
            "# Title\n\nHello **world**, see [link](http://x) and `code`.",
            "```py\nprint(1)\n```\n*rest* of _it_",
            "plain words only",
        ];
        for text in texts {
            let stripped = strip_markdown(text);
            assert_eq!(count_words(&stripped), count_words(text));
            assert_eq!(strip_markdown(&stripped), stripped);
        }
    }
}
