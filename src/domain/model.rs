use serde::{Deserialize, Serialize};
use std::fmt;

/// DeepL endpoints
pub const API_URL_FREE: &str = "https://api-free.deepl.com/v2/translate";
pub const API_URL_PRO: &str = "https://api.deepl.com/v2/translate";

/// Suffix marker DeepL appends to free-plan keys.
const FREE_KEY_SUFFIX: &str = ":fx";

// DeepL service tier. Each tier is served from its own host; a key paired
// with the wrong host answers 403.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlanTier {
    Free,
    Pro,
}

impl PlanTier {
    pub fn other(self) -> Self {
        match self {
            PlanTier::Free => PlanTier::Pro,
            PlanTier::Pro => PlanTier::Free,
        }
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanTier::Free => write!(f, "free"),
            PlanTier::Pro => write!(f, "pro"),
        }
    }
}

/// Wire endpoints per tier. Production values are the DeepL constants;
/// tests substitute a local listener.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub free: String,
    pub pro: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            free: API_URL_FREE.to_string(),
            pro: API_URL_PRO.to_string(),
        }
    }
}

impl Endpoints {
    pub fn url(&self, tier: PlanTier) -> &str {
        match tier {
            PlanTier::Free => &self.free,
            PlanTier::Pro => &self.pro,
        }
    }
}

/// A DeepL API key plus the tier guessed from its suffix.
///
/// The guess only decides which host is tried first. Whatever host actually
/// answers is authoritative and may differ after failover. Keys may rotate,
/// so credentials are resolved fresh for every request and never cached.
#[derive(Clone)]
pub struct ApiCredential {
    key: String,
}

impl ApiCredential {
    /// Returns `None` for an empty key so "not configured" and "configured
    /// with an empty string" behave identically.
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        if key.is_empty() {
            None
        } else {
            Some(Self { key })
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn plan_hint(&self) -> PlanTier {
        if self.key.ends_with(FREE_KEY_SUFFIX) {
            PlanTier::Free
        } else {
            PlanTier::Pro
        }
    }
}

// Never print the raw key, not even in debug output.
impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredential")
            .field("key", &"<redacted>")
            .field("plan_hint", &self.plan_hint())
            .finish()
    }
}

// Request body flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslateMode {
    /// Raw text, no markup to protect.
    PlainText,
    /// HTML fragment; tags are preserved and newline-based sentence
    /// splitting is disabled so inline tags inside sentences survive.
    HtmlAware,
}

/// A successful translation, including which host actually served it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Translation {
    pub text: String,
    pub host: PlanTier,
    pub status: u16,
}

// Which path produced the compiled HTML
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// External mjml CLI, full layout fidelity.
    Cli,
    /// Built-in rewrite, best effort.
    Fallback,
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Engine::Cli => write!(f, "cli"),
            Engine::Fallback => write!(f, "fallback"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompiledHtml {
    pub html: String,
    pub engine: Engine,
}
