use crate::domain::error::MjtError;
use crate::domain::model::{ApiCredential, CompiledHtml, Translation};
use async_trait::async_trait;

/// Trait for credential resolution
///
/// Injected into the translation client at construction instead of being
/// looked up through an ambient helper. Resolved fresh on every request
/// because keys may rotate. `None` means no key is configured.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn api_key(&self) -> Option<ApiCredential>;
}

/// Trait for translation services
///
/// This trait provides an abstraction over the translation provider.
/// Implementations can be swapped without changing the calling code.
#[async_trait]
pub trait Translator {
    /// Plain-text translation (no HTML handling).
    async fn translate_text(
        &self,
        text: &str,
        target_lang: &str,
        options: &[(String, String)],
    ) -> Result<Translation, MjtError>;

    /// HTML-aware translation (DeepL tag_handling=html).
    async fn translate_html(
        &self,
        html: &str,
        target_lang: &str,
        options: &[(String, String)],
    ) -> Result<Translation, MjtError>;
}

/// Trait for markup-to-HTML rendering
///
/// Rendering never hard-fails; the contract is "always produce usable
/// output", so the result carries which engine produced it instead of an
/// error variant.
#[async_trait]
pub trait MarkupRenderer {
    async fn compile(&self, markup: &str) -> CompiledHtml;
}
