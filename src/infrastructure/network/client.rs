use crate::domain::error::MjtError;
use crate::domain::model::{ApiCredential, Endpoints, PlanTier, TranslateMode, Translation};
use crate::domain::traits::{CredentialProvider, Translator};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

// DeepL response body. One struct covers both shapes: 200 responses carry
// `translations`, error responses may carry `message`.
#[derive(Deserialize, Debug)]
struct DeeplResponse {
    translations: Option<Vec<DeeplTranslation>>,
    message: Option<String>,
}

#[derive(Deserialize, Debug)]
struct DeeplTranslation {
    text: String,
}

/// DeepL translation client with plan-tier host failover.
///
/// The first host is guessed from the key suffix; a 403 (the provider's
/// "wrong host for this key's plan" signal) triggers exactly one retry
/// against the other tier. Every other outcome is returned as-is, so
/// genuine auth failures and rate limits propagate immediately.
pub struct DeeplClient {
    http: Client,
    credentials: Arc<dyn CredentialProvider>,
    endpoints: Endpoints,
}

impl DeeplClient {
    pub fn new(http: Client, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self::with_endpoints(http, credentials, Endpoints::default())
    }

    /// Test seam: same client, endpoints pointed at a local listener.
    pub fn with_endpoints(
        http: Client,
        credentials: Arc<dyn CredentialProvider>,
        endpoints: Endpoints,
    ) -> Self {
        Self {
            http,
            credentials,
            endpoints,
        }
    }

    /// Plain-text translation (no HTML handling).
    ///
    /// `options` can include DeepL options like formality, etc.
    pub async fn translate_text(
        &self,
        text: &str,
        target_lang: &str,
        options: &[(String, String)],
    ) -> Result<Translation, MjtError> {
        let payload = build_payload(text, target_lang, TranslateMode::PlainText, options);
        self.request_with_host_failover(&payload).await
    }

    /// HTML-aware translation (DeepL tag_handling=html).
    pub async fn translate_html(
        &self,
        html: &str,
        target_lang: &str,
        options: &[(String, String)],
    ) -> Result<Translation, MjtError> {
        let payload = build_payload(html, target_lang, TranslateMode::HtmlAware, options);
        self.request_with_host_failover(&payload).await
    }

    /// Detect plan by key and try the free/pro host accordingly, with a
    /// single 403 fallback to the other host.
    async fn request_with_host_failover(
        &self,
        payload: &[(String, String)],
    ) -> Result<Translation, MjtError> {
        let credential = self
            .credentials
            .api_key()
            .await
            .ok_or(MjtError::MissingCredential)?;

        let first_host = credential.plan_hint();
        let alt_host = first_host.other();

        debug!(
            guess = %first_host,
            first_host = self.endpoints.url(first_host),
            alt_host = self.endpoints.url(alt_host),
            "plan guess"
        );

        let first = self.call_deepl(first_host, &credential, payload).await;
        let outcome = match first {
            Err(ref e) if e.is_plan_mismatch() => {
                info!(
                    first_host = self.endpoints.url(first_host),
                    alt_host = self.endpoints.url(alt_host),
                    "403 on first host, trying fallback"
                );
                self.call_deepl(alt_host, &credential, payload).await
            }
            other => other,
        };

        match &outcome {
            Ok(translation) => info!(
                host = %translation.host,
                status = translation.status,
                "translation succeeded"
            ),
            Err(e) => warn!(error = %e, "translation failed"),
        }

        outcome
    }

    /// Low-level HTTP request. `payload` is the full DeepL form body; the
    /// auth key is attached here and nowhere else.
    async fn call_deepl(
        &self,
        host: PlanTier,
        credential: &ApiCredential,
        payload: &[(String, String)],
    ) -> Result<Translation, MjtError> {
        let url = self.endpoints.url(host);

        let mut form: Vec<(&str, &str)> = Vec::with_capacity(payload.len() + 1);
        form.push(("auth_key", credential.key()));
        form.extend(payload.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        let response = self
            .http
            .post(url)
            .header(ACCEPT, "application/json")
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                warn!(host = %host, error = %e, "HTTP error");
                MjtError::Transport {
                    host,
                    message: e.to_string(),
                }
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| MjtError::Transport {
            host,
            message: e.to_string(),
        })?;

        normalize_response(host, status, &body)
    }
}

#[async_trait]
impl Translator for DeeplClient {
    async fn translate_text(
        &self,
        text: &str,
        target_lang: &str,
        options: &[(String, String)],
    ) -> Result<Translation, MjtError> {
        DeeplClient::translate_text(self, text, target_lang, options).await
    }

    async fn translate_html(
        &self,
        html: &str,
        target_lang: &str,
        options: &[(String, String)],
    ) -> Result<Translation, MjtError> {
        DeeplClient::translate_html(self, html, target_lang, options).await
    }
}

/// Build the DeepL form body.
///
/// `target_lang` is upper-cased for the wire. HTML-aware mode keeps tags
/// intact and stops newline-based sentence splitting. Caller options are
/// appended last and override defaults with the same key.
pub fn build_payload(
    text: &str,
    target_lang: &str,
    mode: TranslateMode,
    options: &[(String, String)],
) -> Vec<(String, String)> {
    let mut payload = vec![
        ("text".to_string(), text.to_string()),
        ("target_lang".to_string(), target_lang.to_uppercase()),
        ("preserve_formatting".to_string(), "1".to_string()),
    ];

    if mode == TranslateMode::HtmlAware {
        payload.push(("tag_handling".to_string(), "html".to_string()));
        payload.push(("split_sentences".to_string(), "nonewlines".to_string()));
    }

    for (key, value) in options {
        payload.retain(|(existing, _)| existing != key);
        payload.push((key.clone(), value.clone()));
    }

    payload
}

/// Map a raw wire response onto the result taxonomy: 200 with at least one
/// translated segment is a success, non-200 carries the provider message
/// when present, 200 without the expected field is malformed.
pub fn normalize_response(
    host: PlanTier,
    status: u16,
    body: &str,
) -> Result<Translation, MjtError> {
    let parsed: Option<DeeplResponse> = serde_json::from_str(body).ok();

    if status != 200 {
        let message = parsed
            .and_then(|p| p.message)
            .unwrap_or_else(|| format!("HTTP error {}", status));
        return Err(MjtError::RemoteRejected {
            host,
            status,
            message,
        });
    }

    let translation = parsed
        .and_then(|p| p.translations)
        .and_then(|mut t| if t.is_empty() { None } else { Some(t.remove(0)) });

    match translation {
        Some(t) => Ok(Translation {
            text: t.text,
            host,
            status,
        }),
        None => Err(MjtError::MalformedResponse { host, status }),
    }
}
