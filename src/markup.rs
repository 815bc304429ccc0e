//! Inline markup transform for chat bubbles
//!
//! Content is HTML-escaped first, then a small set of literal regex
//! substitutions is applied in order: `**bold**`, `*italic*`, `` `code` `` outside fences,
//! newline to `<br>`, and finally fenced ```` ``` ```` blocks on the
//! already-substituted text.

use regex::{Captures, Regex};
use std::sync::OnceLock;

fn bold_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern is valid"))
}

fn italic_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\*(.*?)\*").expect("italic pattern is valid"))
}

// Fenced spans are matched first and passed through untouched
fn inline_code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)(```.*?```)|`([^`\n]+)`").expect("inline code pattern is valid")
    })
}

fn fenced_block_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)```(.*?)```").expect("fence pattern is valid"))
}

/// Escape the characters that are significant in HTML text and attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Turn raw message text into an HTML fragment
///
/// # Examples
///
/// ```
/// use chatclone::markup::format_message;
///
/// assert_eq!(
///     format_message("**a** *b* `c`"),
///     "<strong>a</strong> <em>b</em> <code>c</code>"
/// );
/// assert_eq!(format_message("```x\ny```"), "<pre><code>x<br>y</code></pre>");
/// ```
pub fn format_message(content: &str) -> String {
    let escaped = escape_html(content);
    let formatted = bold_pattern().replace_all(&escaped, "<strong>$1</strong>");
    let formatted = italic_pattern().replace_all(&formatted, "<em>$1</em>");
    let formatted = inline_code_pattern().replace_all(&formatted, |caps: &Captures<'_>| {
        match (caps.get(1), caps.get(2)) {
            (Some(fence), _) => fence.as_str().to_string(),
            (None, Some(code)) => format!("<code>{}</code>", code.as_str()),
            (None, None) => String::new(),
        }
    });
    let formatted = formatted.replace('\n', "<br>");

    fenced_block_pattern()
        .replace_all(&formatted, "<pre><code>$1</code></pre>")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_italic_code() {
        assert_eq!(
            format_message("**a** *b* `c`"),
            "<strong>a</strong> <em>b</em> <code>c</code>"
        );
    }

    #[test]
    fn test_fenced_block_with_newline() {
        assert_eq!(format_message("```x\ny```"), "<pre><code>x<br>y</code></pre>");
    }

    #[test]
    fn test_single_line_fence_is_not_inline_code() {
        assert_eq!(format_message("```x```"), "<pre><code>x</code></pre>");
    }

    #[test]
    fn test_inline_code_after_fence_on_same_line() {
        assert_eq!(
            format_message("```a\nb``` and `c`"),
            "<pre><code>a<br>b</code></pre> and <code>c</code>"
        );
    }

    #[test]
    fn test_fenced_block_keeps_language_line() {
        assert_eq!(
            format_message("see:\n```rust\nfn main() {}\n```"),
            "see:<br><pre><code>rust<br>fn main() {}<br></code></pre>"
        );
    }

    #[test]
    fn test_newlines_become_breaks() {
        assert_eq!(format_message("one\ntwo\n"), "one<br>two<br>");
    }

    #[test]
    fn test_bold_is_not_eaten_by_italic() {
        assert_eq!(
            format_message("**bold** and *it*"),
            "<strong>bold</strong> and <em>it</em>"
        );
    }

    #[test]
    fn test_unpaired_markers_left_alone() {
        assert_eq!(format_message("2 * 3 = 6"), "2 * 3 = 6");
        assert_eq!(format_message("a ` b"), "a ` b");
    }

    #[test]
    fn test_html_is_escaped_before_markup() {
        assert_eq!(
            format_message("<script>alert('x')</script> **ok**"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; <strong>ok</strong>"
        );
    }

    #[test]
    fn test_escaped_markup_inside_code() {
        assert_eq!(format_message("`a < b`"), "<code>a &lt; b</code>");
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(format_message("hello world"), "hello world");
        assert_eq!(format_message(""), "");
    }
}
