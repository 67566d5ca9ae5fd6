//! Fallback rewrite tests over whole documents.

use mjt::infrastructure::compiler::fallback::rewrite;

const SAMPLE: &str = r#"<mjml>
  <mj-head>
    <mj-title>Spring sale</mj-title>
    <mj-preview>Our best offers inside</mj-preview>
  </mj-head>
  <mj-body>
    <mj-section>
      <mj-column>
        <mj-text font-size="13px">Hello there</mj-text>
        <mj-image src="/logo.png" alt="logo" />
        <mj-button href="https://shop.example/sale" mj-class="primary">Shop now</mj-button>
        <mj-raw><table><tr><td>legacy block</td></tr></table></mj-raw>
      </mj-column>
    </mj-section>
  </mj-body>
</mjml>"#;

#[test]
fn minimal_text_block_becomes_paragraph_in_a_document_shell() {
    let html = rewrite("<mj-text>Hi</mj-text>");

    assert!(html.contains("<p>Hi</p>"), "html was: {html}");
    assert!(html.starts_with("<!doctype html>"), "html was: {html}");
    assert!(html.contains("<html><body>"), "html was: {html}");
}

#[test]
fn rewrite_is_deterministic() {
    let first = rewrite(SAMPLE);
    let second = rewrite(SAMPLE);
    assert_eq!(first, second);
}

#[test]
fn sample_document_is_fully_unwrapped() {
    let html = rewrite(SAMPLE);

    // Head content is gone, preview survives as a hidden block
    assert!(!html.contains("Spring sale"));
    assert!(html.contains(r#"<div style="display:none;visibility:hidden;">Our best offers inside</div>"#));

    // Component conversions
    assert!(html.contains("<p>Hello there</p>"));
    assert!(html.contains("<img src=\"/logo.png\" alt=\"logo\" />"));
    assert!(html.contains(">Shop now</a></p>"));
    assert!(html.contains("href=\"https://shop.example/sale\""));

    // Raw passthrough kept verbatim
    assert!(html.contains("<table><tr><td>legacy block</td></tr></table>"));

    // Structural wrappers and mj-* attributes are gone
    assert!(!html.contains("<mj-"));
    assert!(!html.contains("</mj-"));
    assert!(!html.contains("mj-class"));
}

#[test]
fn preview_block_has_no_visual_footprint_but_keeps_text() {
    let html = rewrite("<mj-preview>Inbox snippet</mj-preview>");
    assert!(html.contains("display:none"));
    assert!(html.contains("Inbox snippet"));
}

#[test]
fn every_input_ends_up_with_a_document_root() {
    for input in ["", "plain words", "<mj-text>x</mj-text>", "<p>already html</p>"] {
        let html = rewrite(input);
        assert!(html.to_lowercase().contains("<html"), "no root for input {input:?}");
    }
}

#[test]
fn existing_document_root_is_preserved() {
    let input = "<html><body><mj-text>x</mj-text></body></html>";
    let html = rewrite(input);
    assert!(html.contains("<p>x</p>"));
    // Already rooted, so no second shell is added
    assert_eq!(html.matches("<html").count(), 1);
}
