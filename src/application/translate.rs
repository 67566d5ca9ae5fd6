use crate::domain::error::MjtError;
use crate::domain::model::Translation;
use crate::state::AppState;

/// Fixed text used by the connectivity probe.
pub const PROBE_TEXT: &str = "Hello";

/// One-shot connectivity check: translate a fixed greeting and report the
/// outcome. Exercises credential resolution and host failover end to end
/// without touching any document.
pub async fn probe(state: &AppState, target_lang: &str) -> Result<Translation, MjtError> {
    state
        .deepl_client()
        .translate_text(PROBE_TEXT, target_lang, &[])
        .await
}

/// Translate a whole markup document as one HTML-aware fragment.
///
/// Tags survive translation (tag_handling=html); splitting the document
/// into per-text-node segments is the caller's concern, not ours.
pub async fn translate_document(
    state: &AppState,
    markup: &str,
    target_lang: &str,
) -> Result<Translation, MjtError> {
    let options = config_options(state).await;
    state
        .deepl_client()
        .translate_html(markup, target_lang, &options)
        .await
}

/// Translate plain text (no markup to protect).
pub async fn translate_text(
    state: &AppState,
    text: &str,
    target_lang: &str,
) -> Result<Translation, MjtError> {
    let options = config_options(state).await;
    state
        .deepl_client()
        .translate_text(text, target_lang, &options)
        .await
}

/// DeepL options sourced from config.
async fn config_options(state: &AppState) -> Vec<(String, String)> {
    let config = state.config.read().await;
    let mut options = Vec::new();
    if let Some(formality) = &config.deepl.formality {
        options.push(("formality".to_string(), formality.clone()));
    }
    options
}
