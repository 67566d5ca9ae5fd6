//! Fallback MJML rewrite.
//!
//! Not a full MJML renderer. An ordered list of substitution rules unwraps
//! the common components to plain HTML so a preview still shows the
//! translated text when the mjml CLI is missing. Pure string-to-string,
//! deterministic, no failure mode.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

struct RewriteRule {
    name: &'static str,
    pattern: Regex,
    replacement: &'static str,
    /// Re-applied until the output stops changing. Needed where one pass
    /// can only consume one match per enclosing tag.
    until_stable: bool,
}

impl RewriteRule {
    fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("invalid rewrite pattern"),
            replacement,
            until_stable: false,
        }
    }

    fn stable(mut self) -> Self {
        self.until_stable = true;
        self
    }

    fn apply(&self, input: &str) -> String {
        let mut output = self.pattern.replace_all(input, self.replacement).into_owned();
        if self.until_stable {
            while self.pattern.is_match(&output) {
                output = self.pattern.replace_all(&output, self.replacement).into_owned();
            }
        }
        output
    }
}

static RULES: Lazy<Vec<RewriteRule>> = Lazy::new(|| {
    vec![
        // Strip the document and head wrapper tags. Content stays so the
        // preview tag inside the head can still be converted below.
        RewriteRule::new("strip-mjml-wrapper", r"(?i)</?mjml[^>]*>", ""),
        RewriteRule::new("strip-head-wrapper", r"(?i)</?mj-head[^>]*>", ""),
        // Head-only blocks have no body rendering at all
        RewriteRule::new(
            "strip-head-blocks",
            r"(?is)<mj-title\b[^>]*>.*?</mj-title>|<mj-style\b[^>]*>.*?</mj-style>|<mj-attributes\b[^>]*>.*?</mj-attributes>|<mj-font\b[^>]*/?>|<mj-breakpoint\b[^>]*/?>",
            "",
        ),
        // mj-preview → hidden block; no visual footprint, but inbox preview
        // snippets still pick the text up
        RewriteRule::new(
            "preview-to-hidden",
            r"(?is)<mj-preview>(.*?)</mj-preview>",
            r#"<div style="display:none;visibility:hidden;">${1}</div>"#,
        ),
        // mj-text → p
        RewriteRule::new(
            "text-to-paragraph",
            r"(?is)<mj-text\b[^>]*>(.*?)</mj-text>",
            "<p>${1}</p>",
        ),
        // mj-button → <a>
        RewriteRule::new(
            "button-to-link",
            r"(?is)<mj-button\b([^>]*)>(.*?)</mj-button>",
            "<p><a${1}>${2}</a></p>",
        ),
        // mj-* attributes are not valid on <a>; one pass strips one
        // attribute per tag, so run to a fixed point
        RewriteRule::new(
            "strip-mj-attrs-on-links",
            r#"(?i)<a([^>]*)\bmj-?[a-z0-9_-]+="[^"]*"([^>]*)>"#,
            "<a${1}${2}>",
        )
        .stable(),
        // mj-image → <img>
        RewriteRule::new(
            "image-to-img",
            r"(?is)<mj-image\b([^>]*?)/?>",
            "<img${1}/>",
        ),
        // Unwrap structural containers; their layout semantics are dropped
        RewriteRule::new("unwrap-body", r"(?i)</?mj-body[^>]*>", ""),
        RewriteRule::new("unwrap-section", r"(?i)</?mj-section[^>]*>", ""),
        RewriteRule::new("unwrap-column", r"(?i)</?mj-column[^>]*>", ""),
        // Remove mj-raw wrappers but keep inner HTML intact
        RewriteRule::new("unwrap-raw", r"(?is)<mj-raw>(.*?)</mj-raw>", "${1}"),
    ]
});

static HTML_ROOT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<html\b").expect("invalid pattern"));

/// Rewrite an MJML document to best-effort HTML.
pub fn rewrite(mjml: &str) -> String {
    let mut html = mjml.to_string();
    for rule in RULES.iter() {
        html = rule.apply(&html);
        trace!(rule = rule.name, "rewrite rule applied");
    }
    wrap_if_bare(&html)
}

/// Wrap in a minimal document shell when no <html> root survived.
fn wrap_if_bare(html: &str) -> String {
    if HTML_ROOT.is_match(html) {
        html.to_string()
    } else {
        format!("<!doctype html>\n<html><body>\n{}\n</body></html>", html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(name: &str, input: &str) -> String {
        RULES
            .iter()
            .find(|r| r.name == name)
            .unwrap_or_else(|| panic!("no rule named {name}"))
            .apply(input)
    }

    #[test]
    fn strips_mjml_wrapper() {
        assert_eq!(apply("strip-mjml-wrapper", "<mjml lang=\"en\">x</mjml>"), "x");
    }

    #[test]
    fn head_wrapper_goes_but_preview_survives() {
        let input = "<mj-head><mj-title>T</mj-title><mj-preview>P</mj-preview></mj-head>";
        let out = apply(
            "preview-to-hidden",
            &apply("strip-head-blocks", &apply("strip-head-wrapper", input)),
        );
        assert_eq!(out, "<div style=\"display:none;visibility:hidden;\">P</div>");
    }

    #[test]
    fn preview_becomes_hidden_block() {
        let out = apply("preview-to-hidden", "<mj-preview>Snippet</mj-preview>");
        assert_eq!(
            out,
            "<div style=\"display:none;visibility:hidden;\">Snippet</div>"
        );
    }

    #[test]
    fn text_becomes_paragraph() {
        let out = apply(
            "text-to-paragraph",
            "<mj-text font-size=\"13px\">Hello\nthere</mj-text>",
        );
        assert_eq!(out, "<p>Hello\nthere</p>");
    }

    #[test]
    fn button_becomes_wrapped_link() {
        let out = apply(
            "button-to-link",
            "<mj-button href=\"https://x.example\">Go</mj-button>",
        );
        assert_eq!(out, "<p><a href=\"https://x.example\">Go</a></p>");
    }

    #[test]
    fn mj_attributes_are_stripped_off_links() {
        let input = "<a href=\"/x\" mj-class=\"btn\" mjml-style=\"color:red\">Go</a>";
        let out = apply("strip-mj-attrs-on-links", input);
        assert!(out.contains("href=\"/x\""));
        assert!(!out.contains("mj-class"));
        assert!(!out.contains("mjml-style"));
        assert!(out.ends_with(">Go</a>"));
    }

    #[test]
    fn image_becomes_img() {
        let out = apply("image-to-img", "<mj-image src=\"/logo.png\" alt=\"logo\" />");
        assert_eq!(out, "<img src=\"/logo.png\" alt=\"logo\" />");
    }

    #[test]
    fn containers_are_unwrapped() {
        let input = "<mj-body><mj-section css-class=\"s\"><mj-column>x</mj-column></mj-section></mj-body>";
        let out = apply("unwrap-column", &apply("unwrap-section", &apply("unwrap-body", input)));
        assert_eq!(out, "x");
    }

    #[test]
    fn raw_content_survives_verbatim() {
        let input = "<mj-raw><table><tr><td>kept</td></tr></table></mj-raw>";
        assert_eq!(apply("unwrap-raw", input), "<table><tr><td>kept</td></tr></table>");
    }

    #[test]
    fn bare_output_gets_a_document_shell() {
        let out = wrap_if_bare("<p>Hi</p>");
        assert!(out.starts_with("<!doctype html>"));
        assert!(out.contains("<html><body>"));
    }

    #[test]
    fn existing_root_is_not_rewrapped() {
        let input = "<html><body><p>Hi</p></body></html>";
        assert_eq!(wrap_if_bare(input), input);
    }
}
